//! Registry of the managed threads currently alive in the observed runtime.
//!
//! The [`ThreadRegistry`] is fed by runtime callbacks (thread created, thread destroyed, OS
//! identity assigned, name changed) and consumed by samplers that periodically walk all live
//! threads. Walkers use cursors: each consumer creates its own [`ThreadCursor`] once and then
//! repeatedly calls [`ThreadRegistry::loop_next`], visiting the threads round-robin while
//! threads keep joining and leaving.
//!
//! # Storage
//!
//! Threads are stored in insertion order. The registry owns exactly one handle on every
//! [`ThreadInfo`] from its creation until [`ThreadRegistry::unregister`] hands that handle to
//! the caller. Two indexes provide lookups by [`RuntimeThreadId`] and by [`ProfilerThreadId`].
//!
//! # Cursors
//!
//! A cursor is the position of the next thread to return. When the thread at position `R` is
//! removed, every cursor at position `P` is fixed up so that it keeps designating the thread it
//! was about to visit:
//!
//! - `P > R`: the cursor moves left by one, following its thread
//! - `P <= R`: the cursor is unchanged
//! - if the cursor ends up beyond the last thread, it wraps to 0
//!
//! ```text
//!      x                              x
//!  T0  T1  T2  T3                 T0  T1  T2
//!          ^ = 2                          ^ = 2
//!  T0  T2  T3                     T0  T1
//!      ^ = 1                      ^ = 0 (reset)
//! ```
//!
//! # Thread Safety
//!
//! All structural operations serialize on a single mutex. Critical sections are O(1), except
//! removals which are linear in the number of threads and cursors. No external facility is
//! ever called while the lock is held.

use std::{collections::HashMap, sync::Arc, sync::Mutex};

use tracing::{debug, error};
use widestring::U16Str;

use crate::{
    service::Service,
    threads::{
        CurrentThreadSource, NativeThreadNames, NoNativeThreadNames, OsThreadHandle, OsThreadId,
        ProfilerThreadId, RuntimeThreadId, ThreadCursor, ThreadInfo, ThreadInfoRc,
    },
    Error, Result,
};

/// Initial capacity of the storage and both indexes
const MIN_BUFFER_SIZE: usize = 50;

/// Identity details returned by [`ThreadRegistry::try_get_thread_info`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadDetails {
    /// Identity assigned by the runtime
    pub runtime_thread_id: RuntimeThreadId,
    /// OS thread id, 0 if not known yet
    pub os_thread_id: OsThreadId,
    /// Native handle, null if not known yet
    pub os_thread_handle: OsThreadHandle,
    /// Length in UTF-16 code units of the managed thread name (0 if none was set), before any
    /// truncation to the caller's buffer
    pub name_len: usize,
}

/// Result of [`ThreadRegistry::try_get_current_thread_info`]
#[derive(Debug, Clone)]
pub enum CurrentThreadInfo {
    /// The runtime identity of the calling thread can not be determined
    NotAvailable,
    /// The calling thread is a managed thread that the registry does not know yet
    NotFound,
    /// The record of the calling thread
    Found(ThreadInfoRc),
}

struct RegistryState {
    /// Live threads in insertion order, addressed by cursor positions
    threads: Vec<ProfilerThreadId>,
    /// Owner of the registry's handle on each thread
    by_profiler_id: HashMap<ProfilerThreadId, ThreadInfoRc>,
    by_runtime_id: HashMap<RuntimeThreadId, ProfilerThreadId>,
    /// Cursor positions, indexed by [`ThreadCursor`]
    cursors: Vec<usize>,
}

impl RegistryState {
    fn with_capacity(capacity: usize) -> Self {
        RegistryState {
            threads: Vec::with_capacity(capacity),
            by_profiler_id: HashMap::with_capacity(capacity),
            by_runtime_id: HashMap::with_capacity(capacity),
            cursors: Vec::new(),
        }
    }

    fn find(&self, runtime_thread_id: RuntimeThreadId) -> Option<&ThreadInfoRc> {
        let profiler_id = self.by_runtime_id.get(&runtime_thread_id)?;
        self.by_profiler_id.get(profiler_id)
    }

    /// Must only be called with the registry lock held; the public entry points and all
    /// mutators share it so that none of them has to re-acquire the lock.
    fn get_or_create(&mut self, runtime_thread_id: RuntimeThreadId) -> ThreadInfoRc {
        if let Some(info) = self.find(runtime_thread_id) {
            return info.clone();
        }

        let info = Arc::new(ThreadInfo::new(runtime_thread_id));
        let profiler_id = info.profiler_thread_id();

        self.threads.push(profiler_id);
        self.by_runtime_id.insert(runtime_thread_id, profiler_id);
        self.by_profiler_id.insert(profiler_id, info.clone());

        info
    }

    fn remove(&mut self, runtime_thread_id: RuntimeThreadId) -> Option<ThreadInfoRc> {
        let profiler_id = self.by_runtime_id.remove(&runtime_thread_id)?;
        let info = self.by_profiler_id.remove(&profiler_id)?;

        if let Some(position) = self.threads.iter().position(|id| *id == profiler_id) {
            self.threads.remove(position);
            self.update_cursors(position);
        }

        Some(info)
    }

    /// Applies the fix-up rule to every cursor after the removal of the thread at `removed`.
    /// `threads` already has its new length.
    fn update_cursors(&mut self, removed: usize) {
        let len = self.threads.len();
        for position in &mut self.cursors {
            if removed < *position {
                *position -= 1;
            }

            if *position >= len {
                *position = 0;
            }
        }
    }
}

/// Registry of live managed threads with round-robin cursors.
///
/// # Examples
///
/// ```rust
/// use stackscope::threads::{OsThreadHandle, OsThreadId, RuntimeThreadId, ThreadRegistry};
///
/// let registry = ThreadRegistry::new();
/// registry.set_os_info(RuntimeThreadId::new(0x100), OsThreadId(10), OsThreadHandle(10));
/// registry.set_name(RuntimeThreadId::new(0x200), "Worker");
///
/// let cursor = registry.create_cursor();
/// let first = registry.loop_next(cursor).unwrap();
/// let second = registry.loop_next(cursor).unwrap();
/// assert_eq!(first.runtime_thread_id(), RuntimeThreadId::new(0x100));
/// assert_eq!(second.name().as_deref(), Some("Worker"));
///
/// let removed = registry.unregister(RuntimeThreadId::new(0x100))?;
/// assert_eq!(removed.os_thread_id(), OsThreadId(10));
/// assert_eq!(registry.count(), 1);
/// # Ok::<(), stackscope::Error>(())
/// ```
pub struct ThreadRegistry {
    state: Mutex<RegistryState>,
    current_thread: Option<Arc<dyn CurrentThreadSource>>,
    native_names: Arc<dyn NativeThreadNames>,
}

impl ThreadRegistry {
    /// Creates an empty registry.
    ///
    /// Without a [`CurrentThreadSource`], [`ThreadRegistry::try_get_current_thread_info`]
    /// always answers [`CurrentThreadInfo::NotAvailable`], and no native thread names are
    /// looked up.
    #[must_use]
    pub fn new() -> Self {
        ThreadRegistry {
            state: Mutex::new(RegistryState::with_capacity(MIN_BUFFER_SIZE)),
            current_thread: None,
            native_names: Arc::new(NoNativeThreadNames),
        }
    }

    /// Uses `source` to resolve the runtime identity of the calling thread
    #[must_use]
    pub fn with_current_thread_source(mut self, source: Arc<dyn CurrentThreadSource>) -> Self {
        self.current_thread = Some(source);
        self
    }

    /// Uses `names` to query native names of threads without a managed name
    #[must_use]
    pub fn with_native_thread_names(mut self, names: Arc<dyn NativeThreadNames>) -> Self {
        self.native_names = names;
        self
    }

    /// Returns the record of `runtime_thread_id`, creating and indexing it on first sight.
    ///
    /// Calling this repeatedly with the same id returns the same record.
    pub fn get_or_create(&self, runtime_thread_id: RuntimeThreadId) -> ThreadInfoRc {
        lock!(self.state).get_or_create(runtime_thread_id)
    }

    /// Removes a thread from the registry.
    ///
    /// The registry's own handle is returned to the caller, who releases it by dropping it.
    /// Cursors are fixed up so that they keep designating the thread they were about to visit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ThreadNotRegistered`] if `runtime_thread_id` is unknown; the registry is
    /// left untouched.
    pub fn unregister(&self, runtime_thread_id: RuntimeThreadId) -> Result<ThreadInfoRc> {
        let removed = lock!(self.state).remove(runtime_thread_id);

        match removed {
            Some(info) => {
                debug!(
                    runtime_thread_id = %runtime_thread_id,
                    profiler_thread_id = %info.profiler_thread_id(),
                    "thread unregistered"
                );
                Ok(info)
            }
            None => {
                error!(
                    runtime_thread_id = %runtime_thread_id,
                    "thread cannot be unregistered because it is not in the list"
                );
                Err(Error::ThreadNotRegistered(runtime_thread_id))
            }
        }
    }

    /// Associates the OS identity of a thread, creating its record if needed
    pub fn set_os_info(
        &self,
        runtime_thread_id: RuntimeThreadId,
        os_thread_id: OsThreadId,
        os_thread_handle: OsThreadHandle,
    ) {
        let info = lock!(self.state).get_or_create(runtime_thread_id);
        info.set_os_info(os_thread_id, os_thread_handle);

        debug!(
            runtime_thread_id = %runtime_thread_id,
            os_thread_id = %os_thread_id,
            os_thread_handle = %os_thread_handle,
            profiler_thread_id = %info.profiler_thread_id(),
            "thread OS info set"
        );
    }

    /// Sets the managed name of a thread, creating its record if needed
    pub fn set_name(&self, runtime_thread_id: RuntimeThreadId, name: &str) {
        let info = lock!(self.state).get_or_create(runtime_thread_id);
        info.set_name(name);

        debug!(
            runtime_thread_id = %runtime_thread_id,
            name,
            profiler_thread_id = %info.profiler_thread_id(),
            "thread name set"
        );
    }

    /// Returns the number of live threads
    #[must_use]
    pub fn count(&self) -> usize {
        lock!(self.state).threads.len()
    }

    /// Creates a new cursor positioned on the first thread.
    ///
    /// Cursors are never reclaimed; create one per consumer and keep it for the lifetime of the
    /// registry.
    pub fn create_cursor(&self) -> ThreadCursor {
        let mut state = lock!(self.state);
        state.cursors.push(0);
        ThreadCursor(state.cursors.len() - 1)
    }

    /// Returns the position the cursor will visit next.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCursor`] if the cursor was not created by this registry.
    pub fn cursor_position(&self, cursor: ThreadCursor) -> Result<usize> {
        lock!(self.state)
            .cursors
            .get(cursor.0)
            .copied()
            .ok_or(Error::InvalidCursor(cursor))
    }

    /// Returns the thread under the cursor and advances it, wrapping around after the last
    /// thread.
    ///
    /// Returns `None` if there is no live thread or if the cursor is not valid. Threads
    /// registered during a walk are visited once the cursor reaches their position; no stronger
    /// guarantee is made while the registry changes.
    pub fn loop_next(&self, cursor: ThreadCursor) -> Option<ThreadInfoRc> {
        let mut guard = lock!(self.state);
        let state = &mut *guard;

        let count = state.threads.len();
        if count == 0 {
            return None;
        }

        let position = state.cursors.get_mut(cursor.0)?;
        let info = state
            .threads
            .get(*position)
            .and_then(|id| state.by_profiler_id.get(id))
            .cloned()?;

        *position = if *position + 1 < count {
            *position + 1
        } else {
            0
        };

        Some(info)
    }

    /// Looks a thread up by the identifier assigned by the profiler
    pub fn find_by_profiler_id(&self, profiler_thread_id: ProfilerThreadId) -> Option<ThreadInfoRc> {
        lock!(self.state)
            .by_profiler_id
            .get(&profiler_thread_id)
            .cloned()
    }

    /// Looks a thread up by the identifier assigned by the runtime
    pub fn find_by_runtime_id(&self, runtime_thread_id: RuntimeThreadId) -> Option<ThreadInfoRc> {
        lock!(self.state).find(runtime_thread_id).cloned()
    }

    /// Returns the identity of a thread and copies its name into `name_buffer`.
    ///
    /// The name is written as UTF-16, truncated to `name_buffer.len() - 1` code units and
    /// terminated by a NUL. If no managed name was set, the native name of the thread is
    /// queried instead; if that fails too, an empty string is written. Nothing is written into
    /// an empty buffer.
    ///
    /// Native names are not notified by the runtime and are read on every call, so callers are
    /// expected to cache the result.
    ///
    /// ## Returns
    ///
    /// `None` if no thread with `profiler_thread_id` is registered.
    pub fn try_get_thread_info(
        &self,
        profiler_thread_id: ProfilerThreadId,
        name_buffer: &mut [u16],
    ) -> Option<ThreadDetails> {
        let info = self.find_by_profiler_id(profiler_thread_id)?;

        let managed_name = info
            .name()
            .map(|name| name.encode_utf16().collect::<Vec<u16>>())
            .unwrap_or_default();

        if !name_buffer.is_empty() {
            let capacity = name_buffer.len() - 1;
            if managed_name.is_empty() || capacity == 0 {
                let native = self
                    .native_names
                    .native_thread_name(info.os_thread_handle(), name_buffer.len())
                    .map(|name| name.encode_utf16().collect::<Vec<u16>>())
                    .unwrap_or_default();
                write_name(name_buffer, U16Str::from_slice(&native));
            } else {
                write_name(name_buffer, U16Str::from_slice(&managed_name));
            }
        }

        Some(ThreadDetails {
            runtime_thread_id: info.runtime_thread_id(),
            os_thread_id: info.os_thread_id(),
            os_thread_handle: info.os_thread_handle(),
            name_len: managed_name.len(),
        })
    }

    /// Returns the record of the calling thread.
    ///
    /// Distinguishes between a runtime that can not tell which thread is calling
    /// ([`CurrentThreadInfo::NotAvailable`]) and a calling thread that has no record yet
    /// ([`CurrentThreadInfo::NotFound`]).
    pub fn try_get_current_thread_info(&self) -> CurrentThreadInfo {
        let Some(source) = &self.current_thread else {
            return CurrentThreadInfo::NotAvailable;
        };

        let runtime_thread_id = match source.current_runtime_thread_id() {
            Some(id) if !id.is_null() => id,
            _ => return CurrentThreadInfo::NotAvailable,
        };

        match lock!(self.state).find(runtime_thread_id) {
            Some(info) => CurrentThreadInfo::Found(info.clone()),
            None => CurrentThreadInfo::NotFound,
        }
    }
}

impl Default for ThreadRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for ThreadRegistry {
    fn name(&self) -> &str {
        "ThreadRegistry"
    }
}

/// Copies `name` into `buffer`, truncated to leave room for the terminating NUL
fn write_name(buffer: &mut [u16], name: &U16Str) {
    let Some(capacity) = buffer.len().checked_sub(1) else {
        return;
    };

    let copied = name.len().min(capacity);
    buffer[..copied].copy_from_slice(&name.as_slice()[..copied]);
    buffer[copied] = 0;
}
