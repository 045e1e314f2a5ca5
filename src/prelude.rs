//! # stackscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the stackscope library. Import this module to get quick access to the essential
//! types for collecting samples and tracking threads.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all stackscope operations
pub use crate::Error;

/// The result type used throughout stackscope
pub use crate::Result;

/// Configuration of the sample collection pipeline
pub use crate::config::SamplingConfig;

/// Lifecycle of long-lived components
pub use crate::service::Service;

// ================================================================================================
// Thread Tracking
// ================================================================================================

/// Thread records and identities
pub use crate::threads::{
    OsThreadHandle, OsThreadId, ProfilerThreadId, RuntimeThreadId, ThreadInfo, ThreadInfoRc,
};

/// Thread registry and its results
pub use crate::threads::{CurrentThreadInfo, ThreadCursor, ThreadDetails, ThreadRegistry};

/// Facilities queried by the registry
pub use crate::threads::{CurrentThreadSource, NativeThreadNames, NoNativeThreadNames};

// ================================================================================================
// Samples
// ================================================================================================

/// Raw and exportable samples
pub use crate::samples::{AppDomainId, Frame, InstructionPointer, Label, RawSample, Sample};

/// Sample kinds and their value layout
pub use crate::samples::{
    AllocationValues, ContentionValues, CpuTimeValues, ExceptionValues, SampleValues, ValueType,
    WallTimeValues,
};

// ================================================================================================
// Collection Pipeline
// ================================================================================================

/// Collectors and transformation
pub use crate::collector::{Collector, SampleTransformer, SamplesProvider};

/// Lookup stores
pub use crate::stores::{
    AppDomainInfo, AppDomainMap, AppDomainStore, FrameCache, FrameStore, RuntimeIdMap,
    RuntimeIdStore,
};

/// Timestamps for raw samples
pub use crate::utils::timestamp_ns;
