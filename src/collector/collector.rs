//! Per-kind buffering of raw samples.
//!
//! A [`Collector`] is shared between the samplers that fill it and the exporter that drains
//! it. Appends and drains only contend on the swap of the pending buffer; transformation runs
//! after the swap.

use std::{mem, sync::Arc, sync::Mutex};

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::trace;

use crate::{
    collector::{SampleTransformer, SamplesProvider},
    config::SamplingConfig,
    samples::{RawSample, Sample, SampleValues},
    service::Service,
    stores::{AppDomainStore, FrameStore, RuntimeIdStore},
};

/// Buffers the raw samples of one profiler kind and turns them into exportable samples.
///
/// Samplers call [`Collector::add`] from any thread; the exporter periodically calls
/// [`Collector::samples`] to drain what was collected since the previous call.
///
/// # Thread Safety
///
/// A single mutex protects the pending buffer. `add` holds it for a push, `samples` for a swap
/// with an empty buffer; symbolization and every store lookup happen after the lock was
/// released, so samplers are never blocked by a drain. Drains are expected to come from one
/// consumer at a time. Samples added while a drain is running are returned by the next one.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use stackscope::{
///     collector::Collector,
///     config::SamplingConfig,
///     samples::{AppDomainId, Frame, RawSample, ValueType, WallTimeValues},
///     stores::{AppDomainMap, FrameCache, RuntimeIdMap},
/// };
///
/// let frames = Arc::new(FrameCache::new());
/// frames.insert(0x1000, Frame::new("App.dll", "Program.Main"));
///
/// let collector = Collector::<WallTimeValues>::new(
///     "WallTimeProvider",
///     ValueType::WallTime.index(),
///     frames,
///     Arc::new(AppDomainMap::new()),
///     Arc::new(RuntimeIdMap::new()),
///     SamplingConfig::default(),
/// );
///
/// let mut raw = RawSample::new(1_000, AppDomainId(1), WallTimeValues { duration_ns: 10 });
/// raw.stack = vec![0x1000];
/// collector.add(raw);
///
/// let samples = collector.samples();
/// assert_eq!(samples.len(), 1);
/// assert_eq!(samples[0].frames()[0].function.as_ref(), "Program.Main");
/// assert!(collector.samples().is_empty());
/// ```
pub struct Collector<V: SampleValues> {
    name: String,
    value_offset: usize,
    frame_store: Arc<dyn FrameStore>,
    app_domain_store: Arc<dyn AppDomainStore>,
    runtime_id_store: Arc<dyn RuntimeIdStore>,
    config: SamplingConfig,
    collected: Mutex<Vec<RawSample<V>>>,
}

impl<V: SampleValues> Collector<V> {
    /// Creates an empty collector.
    ///
    /// ## Arguments
    ///
    /// * `name` - Name of the collector, used in logs
    /// * `value_offset` - First value slot written by the payloads of this collector
    /// * `frame_store` - Resolves instruction pointers
    /// * `app_domain_store` - Provides app-domain names and process ids
    /// * `runtime_id_store` - Provides runtime instance identities
    /// * `config` - Transformation options
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value_offset: usize,
        frame_store: Arc<dyn FrameStore>,
        app_domain_store: Arc<dyn AppDomainStore>,
        runtime_id_store: Arc<dyn RuntimeIdStore>,
        config: SamplingConfig,
    ) -> Self {
        Collector {
            name: name.into(),
            value_offset,
            frame_store,
            app_domain_store,
            runtime_id_store,
            config,
            collected: Mutex::new(Vec::new()),
        }
    }

    /// Returns the first value slot written by this collector
    #[must_use]
    pub fn value_offset(&self) -> usize {
        self.value_offset
    }

    /// Appends a raw sample to the pending buffer
    pub fn add(&self, sample: RawSample<V>) {
        lock!(self.collected).push(sample);
    }

    /// Returns the number of raw samples waiting for the next drain
    #[must_use]
    pub fn pending(&self) -> usize {
        lock!(self.collected).len()
    }

    /// Drains the pending raw samples and returns them transformed, in the order they were
    /// added.
    ///
    /// Batches of at least [`SamplingConfig::parallel_transform_threshold`] samples are
    /// transformed on the rayon pool; the order is preserved either way.
    pub fn samples(&self) -> Vec<Sample> {
        let input = self.fetch_raw_samples();
        if input.is_empty() {
            return Vec::new();
        }

        trace!(collector = %self.name, count = input.len(), "transforming raw samples");

        let transformer = SampleTransformer::new(
            self.frame_store.as_ref(),
            self.app_domain_store.as_ref(),
            self.runtime_id_store.as_ref(),
            self.config.timestamps_as_label,
            self.config.values_count,
        );
        let value_offset = self.value_offset;

        if input.len() >= self.config.parallel_transform_threshold {
            input
                .into_par_iter()
                .map(|raw| transformer.transform(raw, value_offset))
                .collect()
        } else {
            input
                .into_iter()
                .map(|raw| transformer.transform(raw, value_offset))
                .collect()
        }
    }

    fn fetch_raw_samples(&self) -> Vec<RawSample<V>> {
        mem::take(&mut *lock!(self.collected))
    }
}

impl<V: SampleValues> Service for Collector<V> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<V: SampleValues> SamplesProvider for Collector<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn samples(&self) -> Vec<Sample> {
        Collector::samples(self)
    }
}
