use crate::{
    samples::{AppDomainId, InstructionPointer, Sample, ValueType},
    threads::ThreadInfoRc,
};

/// The kind specific part of a raw sample.
///
/// Each profiler (wall time, CPU, exceptions, allocations, contention) defines its own payload
/// type. The generic transformation knows nothing about its shape: after all common details are
/// filled in, it hands the payload to [`SampleValues::contribute`], which writes the value(s)
/// and any kind specific labels.
pub trait SampleValues: Send {
    /// Value types written by [`SampleValues::contribute`], in slot order starting at the
    /// collector's value offset
    const VALUE_TYPES: &'static [ValueType];

    /// Writes the values of this payload into `sample`, starting at slot `value_offset`.
    ///
    /// Called exactly once per transformed raw sample.
    fn contribute(self, sample: &mut Sample, value_offset: usize);
}

/// An observation captured by a sampler, before symbolization and enrichment.
///
/// A raw sample is filled by the producer, appended to a [`crate::collector::Collector`] and
/// consumed by exactly one transformation.
///
/// # Examples
///
/// ```rust
/// use stackscope::samples::{AppDomainId, RawSample, WallTimeValues};
///
/// let mut raw = RawSample::new(1_000, AppDomainId(1), WallTimeValues { duration_ns: 10_000_000 });
/// raw.stack = vec![0x7ff0_1000, 0x7ff0_2000];
/// raw.local_root_span_id = 42;
/// raw.span_id = 43;
/// ```
#[derive(Debug)]
pub struct RawSample<V> {
    /// Time at which the observed event ended, in nanoseconds
    pub timestamp: u64,
    /// App-domain the sampled thread was executing in
    pub app_domain_id: AppDomainId,
    /// Local root span id of the active trace, 0 if none
    pub local_root_span_id: u64,
    /// Active span id, 0 if none
    pub span_id: u64,
    /// Captured call stack, most recent call first
    pub stack: Vec<InstructionPointer>,
    /// The sampled thread. The sample owns this handle until it is transformed.
    pub thread_info: Option<ThreadInfoRc>,
    /// Kind specific payload
    pub values: V,
}

impl<V: SampleValues> RawSample<V> {
    /// Creates a raw sample with an empty stack, no thread and no trace correlation
    #[must_use]
    pub fn new(timestamp: u64, app_domain_id: AppDomainId, values: V) -> Self {
        RawSample {
            timestamp,
            app_domain_id,
            local_root_span_id: 0,
            span_id: 0,
            stack: Vec::new(),
            thread_info: None,
            values,
        }
    }
}
