//! Access to thread information owned by the operating system or by the runtime.
//!
//! The [`crate::threads::ThreadRegistry`] only learns about threads through runtime callbacks.
//! Two pieces of information are not delivered that way and have to be queried on demand:
//!
//! - the native name (or debugger description) of a thread, which the runtime does not notify
//!   about, see [`NativeThreadNames`]
//! - the runtime identity of the calling thread, see [`CurrentThreadSource`]

use crate::threads::{OsThreadHandle, RuntimeThreadId};

/// Queries the native name of an operating system thread.
pub trait NativeThreadNames: Send + Sync {
    /// Returns the native name of the thread behind `handle`.
    ///
    /// The result must not be longer than `max_len - 1` UTF-16 code units, so that it fits a
    /// buffer of `max_len` units including the terminating NUL. `None` means the name could not
    /// be retrieved, which callers treat as "no name".
    fn native_thread_name(&self, handle: OsThreadHandle, max_len: usize) -> Option<String>;
}

/// Resolves the runtime identity of the calling thread.
pub trait CurrentThreadSource: Send + Sync {
    /// Returns the runtime thread id of the calling thread, or `None` when the runtime can not
    /// provide it (e.g. the thread is not a managed thread).
    fn current_runtime_thread_id(&self) -> Option<RuntimeThreadId>;
}

impl<F> CurrentThreadSource for F
where
    F: Fn() -> Option<RuntimeThreadId> + Send + Sync,
{
    fn current_runtime_thread_id(&self) -> Option<RuntimeThreadId> {
        self()
    }
}

/// A [`NativeThreadNames`] implementation that never finds a name
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNativeThreadNames;

impl NativeThreadNames for NoNativeThreadNames {
    fn native_thread_name(&self, _handle: OsThreadHandle, _max_len: usize) -> Option<String> {
        None
    }
}

/// Reads native thread names from `/proc/self/task/<tid>/comm`.
///
/// On Linux the runtime provides the `tid` as the thread handle.
#[cfg(target_os = "linux")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcfsThreadNames;

#[cfg(target_os = "linux")]
impl NativeThreadNames for ProcfsThreadNames {
    fn native_thread_name(&self, handle: OsThreadHandle, max_len: usize) -> Option<String> {
        if handle.is_null() || max_len == 0 {
            return None;
        }

        let path = format!("/proc/self/task/{}/comm", handle.value());
        let comm = std::fs::read_to_string(path).ok()?;
        let comm = comm.trim_end_matches('\n');

        let mut name = String::new();
        let mut units = 0;
        for c in comm.chars() {
            units += c.len_utf16();
            if units > max_len - 1 {
                break;
            }
            name.push(c);
        }

        Some(name)
    }
}
