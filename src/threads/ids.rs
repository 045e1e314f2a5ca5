use std::fmt;

/// Identity the observed runtime assigns to a managed thread.
///
/// The value is opaque (the CLR hands out the address of its internal thread object) and only
/// unique while the thread is alive: once a thread is destroyed the runtime may reuse the same
/// value for a new one. A value of 0 never designates a live thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RuntimeThreadId(pub usize);

impl RuntimeThreadId {
    /// Creates a new runtime thread id from its raw value
    #[must_use]
    pub fn new(value: usize) -> Self {
        RuntimeThreadId(value)
    }

    /// Returns the raw value
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Returns true if this is the null id (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for RuntimeThreadId {
    fn from(value: usize) -> Self {
        RuntimeThreadId(value)
    }
}

impl fmt::Display for RuntimeThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Operating system identifier of a thread (the `tid` on Linux).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OsThreadId(pub u32);

impl OsThreadId {
    /// Returns the raw value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OsThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Native handle of an operating system thread.
///
/// On Windows this is the `HANDLE` given by the runtime, on Linux it carries the `tid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OsThreadHandle(pub usize);

impl OsThreadHandle {
    /// Returns the raw value
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Returns true if the handle has not been provided yet
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for OsThreadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Identifier assigned by the profiler to every [`crate::threads::ThreadInfo`] it creates.
///
/// Unlike [`RuntimeThreadId`], this value is never reused during the lifetime of the process,
/// which makes it suitable as a key handed out to code living outside of the profiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfilerThreadId(pub u32);

impl ProfilerThreadId {
    /// Returns the raw value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProfilerThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a round-robin cursor created by [`crate::threads::ThreadRegistry::create_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadCursor(pub(crate) usize);

impl ThreadCursor {
    /// Returns the index of this cursor inside the cursor table of its registry
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ThreadCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_thread_id_display() {
        assert_eq!(RuntimeThreadId::new(0x7f00_1234).to_string(), "0x7f001234");
        assert!(RuntimeThreadId::default().is_null());
        assert!(!RuntimeThreadId::from(1).is_null());
    }

    #[test]
    fn test_os_thread_handle_null() {
        assert!(OsThreadHandle::default().is_null());
        assert_eq!(OsThreadHandle(0x10).to_string(), "0x10");
    }

    #[test]
    fn test_cursor_display() {
        assert_eq!(ThreadCursor(3).to_string(), "#3");
        assert_eq!(ThreadCursor(3).index(), 3);
    }
}
