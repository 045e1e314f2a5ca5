// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(clippy::too_many_arguments)]

//! # stackscope
//!
//! The in-process data collection core of a sampling profiler for the .NET runtime.
//!
//! `stackscope` sits between the samplers running inside a profiled process and the exporter
//! shipping profiles to a backend. It provides:
//!
//! - **📥 Contention free collection** - Samplers append raw samples from any thread and are
//!   never blocked by symbolization
//! - **🔍 Enrichment** - Raw samples are symbolized and labeled with runtime, process,
//!   app-domain, thread and trace correlation details
//! - **🧵 Thread tracking** - A registry of live managed threads with round-robin cursors that
//!   stay stable while threads come and go
//! - **🧩 Extensible sample kinds** - Wall time, CPU, exceptions, allocations and lock
//!   contention share the same pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use stackscope::prelude::*;
//!
//! let registry = ThreadRegistry::new();
//! registry.set_os_info(RuntimeThreadId::new(0x7f00_0010), OsThreadId(4711), OsThreadHandle(4711));
//! registry.set_name(RuntimeThreadId::new(0x7f00_0010), "Worker");
//!
//! let frames = Arc::new(FrameCache::new());
//! frames.insert(0x1000, Frame::new("App.dll", "Worker.Run"));
//!
//! let app_domains = Arc::new(AppDomainMap::new());
//! app_domains.insert(AppDomainId(1), std::process::id(), "DefaultDomain");
//!
//! let collector = Collector::<WallTimeValues>::new(
//!     "WallTimeProvider",
//!     ValueType::WallTime.index(),
//!     frames,
//!     app_domains,
//!     Arc::new(RuntimeIdMap::new()),
//!     SamplingConfig::default(),
//! );
//!
//! // sampler side: walk the threads and record what they are doing
//! let cursor = registry.create_cursor();
//! if let Some(thread) = registry.loop_next(cursor) {
//!     let mut raw = RawSample::new(timestamp_ns(), AppDomainId(1), WallTimeValues { duration_ns: 10_000_000 });
//!     raw.stack = vec![0x1000];
//!     raw.thread_info = Some(thread);
//!     collector.add(raw);
//! }
//!
//! // exporter side
//! let samples = collector.samples();
//! assert_eq!(samples[0].thread_name(), "Worker [#4711]");
//! assert_eq!(samples[0].app_domain_name(), "DefaultDomain");
//! ```
//!
//! ## Architecture
//!
//! - [`threads`] - Thread records and the thread registry
//! - [`samples`] - Raw and exportable samples, sample kinds and value types
//! - [`collector`] - Buffering and transformation of raw samples
//! - [`stores`] - Frame, app-domain and runtime id lookups used by the transformation
//! - [`config`] - Pipeline configuration
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! `stackscope` emits [`tracing`] events and never installs a subscriber; the host decides
//! where they go.
#[macro_use]
pub(crate) mod macros;

pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use stackscope::prelude::*;
///
/// let registry = ThreadRegistry::new();
/// assert_eq!(registry.count(), 0);
/// ```
pub mod prelude;

/// Buffering of raw samples and their transformation into exportable samples
pub mod collector;

/// Configuration of the sample collection pipeline
pub mod config;

/// Raw samples, exportable samples and sample kinds
pub mod samples;

/// Lifecycle of long-lived profiler components
pub mod service;

/// Lookup stores consulted while transforming raw samples
pub mod stores;

/// Tracking of the managed threads of the observed runtime
pub mod threads;

/// Helpers shared by samplers and the pipeline
pub mod utils;

/// `stackscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `stackscope` Error type
///
/// The main error type for all fallible operations in this crate.
pub use error::Error;
