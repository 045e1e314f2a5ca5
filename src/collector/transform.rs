//! Conversion of raw samples into exportable samples.
//!
//! Resolves the frames of a raw sample and attaches runtime, app-domain, thread and span
//! details read from the stores, falling back to placeholders when a lookup misses.

use tracing::debug;

use crate::{
    samples::{RawSample, Sample, SampleValues},
    stores::{AppDomainStore, FrameStore, RuntimeIdStore},
};

/// Thread id written into samples that carry no thread record
pub const UNKNOWN_THREAD_ID: &str = "<0> [# 0]";

/// Thread name written into samples that carry no thread record
pub const UNKNOWN_THREAD_NAME: &str = "Managed thread (name unknown) [#0]";

/// Process id written into samples whose app-domain is unknown
pub const UNKNOWN_PID: &str = "0";

/// Turns raw samples into exportable [`Sample`]s.
///
/// The transformer holds no state besides the stores it reads from, so a single instance can
/// transform a whole batch, on one thread or on many.
pub struct SampleTransformer<'a> {
    frame_store: &'a dyn FrameStore,
    app_domain_store: &'a dyn AppDomainStore,
    runtime_id_store: &'a dyn RuntimeIdStore,
    timestamps_as_label: bool,
    values_count: usize,
}

impl<'a> SampleTransformer<'a> {
    /// Creates a transformer reading from the given stores.
    ///
    /// ## Arguments
    ///
    /// * `timestamps_as_label` - Add an `end_timestamp_ns` label to every sample
    /// * `values_count` - Number of value slots of the produced samples
    #[must_use]
    pub fn new(
        frame_store: &'a dyn FrameStore,
        app_domain_store: &'a dyn AppDomainStore,
        runtime_id_store: &'a dyn RuntimeIdStore,
        timestamps_as_label: bool,
        values_count: usize,
    ) -> Self {
        SampleTransformer {
            frame_store,
            app_domain_store,
            runtime_id_store,
            timestamps_as_label,
            values_count,
        }
    }

    /// Transforms one raw sample.
    ///
    /// Lookup misses never fail the transformation:
    /// - unknown runtime id: empty identity
    /// - unknown app-domain: empty name and process id `0`
    /// - no thread record: placeholder thread id and name
    /// - unresolved instruction pointer: the frame is left out
    ///
    /// The thread handle carried by `raw` is released here. The payload contributes its values
    /// last, starting at slot `value_offset`.
    pub fn transform<V: SampleValues>(&self, raw: RawSample<V>, value_offset: usize) -> Sample {
        let RawSample {
            timestamp,
            app_domain_id,
            local_root_span_id,
            span_id,
            stack,
            thread_info,
            values,
        } = raw;

        let runtime_id = self
            .runtime_id_store
            .runtime_id(app_domain_id)
            .unwrap_or_default();

        let mut sample = Sample::new(timestamp, runtime_id, stack.len(), self.values_count);
        if local_root_span_id != 0 && span_id != 0 {
            sample.add_label(
                Sample::LOCAL_ROOT_SPAN_ID_LABEL,
                local_root_span_id.to_string(),
            );
            sample.add_label(Sample::SPAN_ID_LABEL, span_id.to_string());
        }

        match self.app_domain_store.app_domain_info(app_domain_id) {
            Some(info) => {
                sample.set_app_domain_name(info.name);
                sample.set_pid(info.pid.to_string());
            }
            None => {
                debug!(app_domain_id = %app_domain_id, "unknown app-domain");
                sample.set_app_domain_name("");
                sample.set_pid(UNKNOWN_PID);
            }
        }

        match thread_info {
            Some(thread) => {
                sample.set_thread_id(thread.profile_thread_id());
                sample.set_thread_name(thread.profile_thread_name());
            }
            None => {
                sample.set_thread_id(UNKNOWN_THREAD_ID);
                sample.set_thread_name(UNKNOWN_THREAD_NAME);
            }
        }

        for ip in stack {
            if let Some(frame) = self.frame_store.resolve(ip) {
                sample.add_frame(frame);
            }
        }

        if self.timestamps_as_label {
            // timestamps are taken when the observed event ends
            sample.add_label(Sample::END_TIMESTAMP_LABEL, timestamp.to_string());
        }

        values.contribute(&mut sample, value_offset);
        sample
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use strum::EnumCount;

    use super::*;
    use crate::{
        samples::{AppDomainId, ValueType, WallTimeValues},
        test::{fixture_stores, raw_wall_sample},
        threads::{OsThreadHandle, OsThreadId, RuntimeThreadId, ThreadInfo},
    };

    #[test]
    fn test_transform_full() {
        let stores = fixture_stores();
        let transformer = stores.transformer(true);

        let thread = Arc::new(ThreadInfo::new(RuntimeThreadId(0x10)));
        thread.set_os_info(OsThreadId(4711), OsThreadHandle(0x4711));
        thread.set_name("Worker");

        let mut raw = raw_wall_sample(1_000, 250);
        raw.thread_info = Some(thread.clone());
        raw.local_root_span_id = 11;
        raw.span_id = 12;

        let sample = transformer.transform(raw, ValueType::WallTime.index());

        assert_eq!(sample.timestamp(), 1_000);
        assert_eq!(sample.runtime_id(), "01234567-89ab-cdef-0123-456789abcdef");
        assert_eq!(sample.app_domain_name(), "DefaultDomain");
        assert_eq!(sample.pid(), "4242");
        assert_eq!(sample.thread_id(), thread.profile_thread_id());
        assert_eq!(sample.thread_name(), "Worker [#4711]");
        assert_eq!(sample.label(Sample::LOCAL_ROOT_SPAN_ID_LABEL), Some("11"));
        assert_eq!(sample.label(Sample::SPAN_ID_LABEL), Some("12"));
        assert_eq!(sample.label(Sample::END_TIMESTAMP_LABEL), Some("1000"));
        assert_eq!(sample.values()[ValueType::WallTime.index()], 250);
        assert_eq!(sample.values().len(), ValueType::COUNT);

        // the handle carried by the raw sample was released
        assert_eq!(Arc::strong_count(&thread), 1);
    }

    #[test]
    fn test_span_labels_require_both_ids() {
        let stores = fixture_stores();
        let transformer = stores.transformer(false);

        for (root, span) in [(0, 0), (0, 12), (11, 0)] {
            let mut raw = raw_wall_sample(1, 1);
            raw.local_root_span_id = root;
            raw.span_id = span;

            let sample = transformer.transform(raw, 0);
            assert!(sample.labels().is_empty());
        }
    }

    #[test]
    fn test_unknown_app_domain_and_runtime() {
        let stores = fixture_stores();
        let transformer = stores.transformer(false);

        let raw = RawSample::new(1, AppDomainId(0xdead), WallTimeValues { duration_ns: 1 });
        let sample = transformer.transform(raw, 0);

        assert_eq!(sample.app_domain_name(), "");
        assert_eq!(sample.pid(), "0");
        assert_eq!(sample.runtime_id(), "");
    }

    #[test]
    fn test_missing_thread_placeholders() {
        let stores = fixture_stores();
        let transformer = stores.transformer(false);

        let sample = transformer.transform(raw_wall_sample(1, 1), 0);

        assert_eq!(sample.thread_id(), "<0> [# 0]");
        assert_eq!(sample.thread_name(), "Managed thread (name unknown) [#0]");
    }

    #[test]
    fn test_unresolved_frames_skipped() {
        let stores = fixture_stores();
        let transformer = stores.transformer(false);

        let mut raw = raw_wall_sample(1, 1);
        raw.stack = vec![0x1000, 0xbad, 0x2000, 0xbad2, 0x3000];

        let sample = transformer.transform(raw, 0);
        let functions: Vec<&str> = sample.frames().iter().map(|f| &*f.function).collect();

        assert_eq!(
            functions,
            vec!["Thread.Sleep", "Worker.Run", "Program.Main"]
        );
    }

    #[test]
    fn test_no_timestamp_label_when_disabled() {
        let stores = fixture_stores();
        let transformer = stores.transformer(false);

        let sample = transformer.transform(raw_wall_sample(99, 1), 0);
        assert!(sample.label(Sample::END_TIMESTAMP_LABEL).is_none());
    }
}
