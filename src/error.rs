use thiserror::Error;

use crate::threads::{RuntimeThreadId, ThreadCursor};

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Most of the sampling pipeline never fails: lookups against the frame, app-domain and
/// runtime-id stores fall back to documented default values instead of producing an error.
/// The variants below are reserved for registry operations whose failure the caller has to
/// know about.
///
/// # Error Categories
///
/// ## Thread Registry Errors
/// - [`Error::ThreadNotRegistered`] - A runtime thread id is unknown to the registry
/// - [`Error::InvalidCursor`] - A cursor handle was not created by this registry
///
/// # Examples
///
/// ```rust
/// use stackscope::{Error, threads::{RuntimeThreadId, ThreadRegistry}};
///
/// let registry = ThreadRegistry::new();
/// match registry.unregister(RuntimeThreadId::new(0x1234)) {
///     Ok(thread) => println!("Removed {}", thread.profile_thread_id()),
///     Err(Error::ThreadNotRegistered(id)) => println!("Unknown thread {}", id),
///     Err(e) => println!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The runtime thread id is not tracked by the registry.
    ///
    /// Returned by [`crate::threads::ThreadRegistry::unregister`] when the runtime reports the
    /// destruction of a thread the registry never saw (or already removed). The registry
    /// is left untouched.
    #[error("Thread {0} cannot be unregistered because it is not in the list")]
    ThreadNotRegistered(RuntimeThreadId),

    /// The cursor handle does not belong to the cursor table of this registry.
    #[error("Cursor {0} is not a valid iterator of this registry")]
    InvalidCursor(ThreadCursor),
}
