//! # Lookup Stores Module
//!
//! The transformation of raw samples consults three stores owned by other parts of the
//! profiler:
//!
//! - [`FrameStore`]: resolves instruction pointers into module and function names
//! - [`AppDomainStore`]: provides the name and process id of an app-domain
//! - [`RuntimeIdStore`]: provides the identity of the runtime instance hosting an app-domain
//!
//! Every lookup may miss; the transformation falls back to documented defaults instead of
//! failing. The traits are `Send + Sync` so that a single store can be shared by all
//! collectors and used from the rayon pool.
//!
//! This module also provides concurrent in-memory implementations fed by the runtime
//! callbacks: [`FrameCache`], [`AppDomainMap`] and [`RuntimeIdMap`].

use crate::samples::{AppDomainId, Frame, InstructionPointer};

mod appdomains;
mod frames;
mod runtime_ids;

pub use appdomains::*;
pub use frames::*;
pub use runtime_ids::*;

/// Resolves instruction pointers into frames
pub trait FrameStore: Send + Sync {
    /// Returns the frame of `ip`, or `None` if it can not be resolved
    fn resolve(&self, ip: InstructionPointer) -> Option<Frame>;
}

/// Details of an app-domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDomainInfo {
    /// Id of the process hosting the app-domain
    pub pid: u32,
    /// Friendly name of the app-domain
    pub name: String,
}

/// Provides app-domain details
pub trait AppDomainStore: Send + Sync {
    /// Returns the details of `app_domain_id`, or `None` if it is unknown
    fn app_domain_info(&self, app_domain_id: AppDomainId) -> Option<AppDomainInfo>;
}

/// Provides the identity of the runtime instance an app-domain belongs to
pub trait RuntimeIdStore: Send + Sync {
    /// Returns the runtime identity of `app_domain_id`, or `None` if it is unknown
    fn runtime_id(&self, app_domain_id: AppDomainId) -> Option<String>;
}
