//! # Thread Tracking Module
//!
//! This module keeps track of the managed threads of the observed runtime. It provides:
//!
//! - [`ThreadInfo`]: one tracked thread, shared between the registry, samplers and raw samples
//!   through [`ThreadInfoRc`] handles
//! - [`ThreadRegistry`]: the set of live threads, indexed by runtime and profiler ids, with
//!   round-robin [`ThreadCursor`]s for samplers
//! - [`NativeThreadNames`] and [`CurrentThreadSource`]: facilities the registry queries on demand
//!
//! ## Ownership
//!
//! Thread records are reference counted with [`std::sync::Arc`]. Every accessor that hands out a
//! record hands out a new handle; dropping the handle releases it. A record is destroyed once the
//! registry released its own handle (see [`ThreadRegistry::unregister`]) and every other holder
//! dropped theirs.
//!
//! ## Usage
//!
//! ```rust
//! use stackscope::threads::{RuntimeThreadId, ThreadRegistry};
//!
//! let registry = ThreadRegistry::new();
//! let thread = registry.get_or_create(RuntimeThreadId::new(0x7f00_0010));
//! assert_eq!(registry.count(), 1);
//! println!("{}", thread.profile_thread_id());
//! ```
use std::sync::Arc;

mod ids;
mod info;
mod native;
mod registry;

pub use ids::*;
pub use info::*;
pub use native::*;
pub use registry::*;

/// A reference to a `ThreadInfo`
pub type ThreadInfoRc = Arc<ThreadInfo>;
