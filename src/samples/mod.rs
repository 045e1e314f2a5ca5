//! # Samples Module
//!
//! This module defines what flows through the collection pipeline. It follows a dual-variant
//! pattern:
//!
//! - [`RawSample`]: filled by a sampler with unresolved data (instruction pointers, app-domain
//!   id, a handle on the sampled thread) and a kind specific payload
//! - [`Sample`]: the normalized variant with resolved frames, names and values, ready to be
//!   exported
//!
//! The payload of a raw sample implements [`SampleValues`]; this crate provides one payload per
//! profiler kind and the [`ValueType`] layout they write into.
//!
//! ## Usage
//!
//! ```rust
//! use stackscope::samples::{AppDomainId, ExceptionValues, RawSample};
//!
//! let raw = RawSample::new(
//!     1_000,
//!     AppDomainId(1),
//!     ExceptionValues {
//!         type_name: "System.NullReferenceException".to_string(),
//!         message: "Object reference not set to an instance of an object.".to_string(),
//!     },
//! );
//! assert!(raw.thread_info.is_none());
//! ```
use std::fmt;

mod kinds;
mod raw;
mod sample;
mod values;

pub use kinds::*;
pub use raw::*;
pub use sample::*;
pub use values::*;

/// An address captured while walking a call stack
pub type InstructionPointer = usize;

/// Identity the runtime assigns to an app-domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AppDomainId(pub usize);

impl fmt::Display for AppDomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}
