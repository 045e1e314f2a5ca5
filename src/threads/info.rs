use std::sync::{
    atomic::{AtomicU32, AtomicUsize, Ordering},
    RwLock,
};

use crate::threads::{OsThreadHandle, OsThreadId, ProfilerThreadId, RuntimeThreadId};

/// Name reported for threads that never received a managed name
pub const UNKNOWN_THREAD_NAME: &str = "Managed thread (name unknown)";

static NEXT_PROFILER_THREAD_ID: AtomicU32 = AtomicU32::new(1);

/// A managed thread tracked by the profiler.
///
/// A `ThreadInfo` is created the first time the [`crate::threads::ThreadRegistry`] hears about a
/// runtime thread id and lives as long as someone holds a [`crate::threads::ThreadInfoRc`] to it:
/// the registry keeps one handle until the thread is unregistered, raw samples keep one until
/// they are transformed, and samplers keep one for the duration of a stack walk.
///
/// The OS identity and the name are filled in asynchronously, when the runtime notifies the
/// profiler about them, so they are stored with interior mutability.
///
/// # Thread Safety
///
/// `ThreadInfo` is [`Send`] and [`Sync`]. The OS id and handle are individual atomics: a reader
/// racing with [`ThreadInfo::set_os_info`] may observe the new id together with the old handle.
#[derive(Debug)]
pub struct ThreadInfo {
    profiler_thread_id: ProfilerThreadId,
    runtime_thread_id: RuntimeThreadId,
    os_thread_id: AtomicU32,
    os_thread_handle: AtomicUsize,
    name: RwLock<Option<String>>,
}

impl ThreadInfo {
    /// Creates a new thread record for the given runtime thread id.
    ///
    /// A fresh [`ProfilerThreadId`] is assigned; the OS identity is unknown (0) and no name is
    /// set.
    #[must_use]
    pub fn new(runtime_thread_id: RuntimeThreadId) -> Self {
        ThreadInfo {
            profiler_thread_id: ProfilerThreadId(
                NEXT_PROFILER_THREAD_ID.fetch_add(1, Ordering::Relaxed),
            ),
            runtime_thread_id,
            os_thread_id: AtomicU32::new(0),
            os_thread_handle: AtomicUsize::new(0),
            name: RwLock::new(None),
        }
    }

    /// Returns the identifier assigned by the profiler
    #[must_use]
    pub fn profiler_thread_id(&self) -> ProfilerThreadId {
        self.profiler_thread_id
    }

    /// Returns the identifier assigned by the runtime
    #[must_use]
    pub fn runtime_thread_id(&self) -> RuntimeThreadId {
        self.runtime_thread_id
    }

    /// Returns the OS thread id, 0 until [`ThreadInfo::set_os_info`] was called
    #[must_use]
    pub fn os_thread_id(&self) -> OsThreadId {
        OsThreadId(self.os_thread_id.load(Ordering::Acquire))
    }

    /// Returns the native thread handle, null until [`ThreadInfo::set_os_info`] was called
    #[must_use]
    pub fn os_thread_handle(&self) -> OsThreadHandle {
        OsThreadHandle(self.os_thread_handle.load(Ordering::Acquire))
    }

    /// Associates the OS level identity of the thread
    pub fn set_os_info(&self, os_thread_id: OsThreadId, os_thread_handle: OsThreadHandle) {
        self.os_thread_handle
            .store(os_thread_handle.value(), Ordering::Release);
        self.os_thread_id
            .store(os_thread_id.value(), Ordering::Release);
    }

    /// Returns a copy of the managed name, if one was set
    #[must_use]
    pub fn name(&self) -> Option<String> {
        read_lock!(self.name).clone()
    }

    /// Sets the managed name of the thread.
    ///
    /// The runtime reports a thread losing its name with an empty string, so an empty `name`
    /// clears it.
    pub fn set_name(&self, name: &str) {
        let mut guard = write_lock!(self.name);
        *guard = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    /// Returns the thread id as written into exported samples, e.g. `<12> [#4711]`
    #[must_use]
    pub fn profile_thread_id(&self) -> String {
        format!("<{}> [#{}]", self.profiler_thread_id, self.os_thread_id())
    }

    /// Returns the thread name as written into exported samples.
    ///
    /// Threads without a managed name are reported as `Managed thread (name unknown)`; the
    /// OS thread id is appended in both cases, e.g. `Worker [#4711]`.
    #[must_use]
    pub fn profile_thread_name(&self) -> String {
        let guard = read_lock!(self.name);
        format!(
            "{} [#{}]",
            guard.as_deref().unwrap_or(UNKNOWN_THREAD_NAME),
            self.os_thread_id()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiler_ids_are_unique() {
        let first = ThreadInfo::new(RuntimeThreadId(1));
        let second = ThreadInfo::new(RuntimeThreadId(1));

        assert_ne!(first.profiler_thread_id(), second.profiler_thread_id());
        assert!(second.profiler_thread_id() > first.profiler_thread_id());
    }

    #[test]
    fn test_os_info() {
        let info = ThreadInfo::new(RuntimeThreadId(0x42));
        assert_eq!(info.os_thread_id(), OsThreadId(0));
        assert!(info.os_thread_handle().is_null());

        info.set_os_info(OsThreadId(4711), OsThreadHandle(0x1000));
        assert_eq!(info.os_thread_id(), OsThreadId(4711));
        assert_eq!(info.os_thread_handle(), OsThreadHandle(0x1000));
        assert_eq!(info.runtime_thread_id(), RuntimeThreadId(0x42));
    }

    #[test]
    fn test_profile_strings() {
        let info = ThreadInfo::new(RuntimeThreadId(0x42));
        info.set_os_info(OsThreadId(4711), OsThreadHandle(0x1000));

        assert_eq!(
            info.profile_thread_id(),
            format!("<{}> [#4711]", info.profiler_thread_id())
        );
        assert_eq!(
            info.profile_thread_name(),
            "Managed thread (name unknown) [#4711]"
        );

        info.set_name("Worker");
        assert_eq!(info.name().as_deref(), Some("Worker"));
        assert_eq!(info.profile_thread_name(), "Worker [#4711]");
    }

    #[test]
    fn test_empty_name_clears() {
        let info = ThreadInfo::new(RuntimeThreadId(0x42));
        info.set_name("Worker");
        info.set_name("");

        assert!(info.name().is_none());
        assert_eq!(info.profile_thread_name(), "Managed thread (name unknown) [#0]");
    }
}
