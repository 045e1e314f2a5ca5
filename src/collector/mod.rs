//! # Sample Collection Module
//!
//! This module implements the pipeline between samplers and the exporter:
//!
//! - [`Collector`]: one per profiler kind, generic over the raw sample payload. Samplers append
//!   raw samples; the exporter drains them as exportable samples.
//! - [`SampleTransformer`]: enriches a raw sample with runtime, app-domain and thread details,
//!   symbolizes its stack and lets the payload contribute its values.
//! - [`SamplesProvider`]: the kind-agnostic view of a collector used by the exporter.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use stackscope::{
//!     collector::{Collector, SamplesProvider},
//!     config::SamplingConfig,
//!     samples::{CpuTimeValues, ValueType, WallTimeValues},
//!     stores::{AppDomainMap, FrameCache, RuntimeIdMap},
//! };
//!
//! let frames = Arc::new(FrameCache::new());
//! let app_domains = Arc::new(AppDomainMap::new());
//! let runtime_ids = Arc::new(RuntimeIdMap::new());
//!
//! let wall = Collector::<WallTimeValues>::new(
//!     "WallTimeProvider",
//!     ValueType::WallTime.index(),
//!     frames.clone(),
//!     app_domains.clone(),
//!     runtime_ids.clone(),
//!     SamplingConfig::default(),
//! );
//! let cpu = Collector::<CpuTimeValues>::new(
//!     "CpuTimeProvider",
//!     ValueType::CpuTime.index(),
//!     frames,
//!     app_domains,
//!     runtime_ids,
//!     SamplingConfig::default(),
//! );
//!
//! let providers: Vec<&dyn SamplesProvider> = vec![&wall, &cpu];
//! let exported: usize = providers.iter().map(|p| p.samples().len()).sum();
//! assert_eq!(exported, 0);
//! ```
#[allow(clippy::module_inception)]
mod collector;
mod transform;

pub use collector::*;
pub use transform::*;

use crate::samples::Sample;

/// A source of exportable samples, regardless of the profiler kind that produced them
pub trait SamplesProvider: Send + Sync {
    /// Returns the name of the provider
    fn name(&self) -> &str;

    /// Returns the samples collected since the previous call, oldest first
    fn samples(&self) -> Vec<Sample>;
}
