use std::sync::Arc;

use tracing::debug;

/// A resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Name of the module containing the code
    pub module: Arc<str>,
    /// Human readable description of the frame, usually the method signature
    pub function: Arc<str>,
}

impl Frame {
    /// Creates a new frame
    #[must_use]
    pub fn new(module: impl Into<Arc<str>>, function: impl Into<Arc<str>>) -> Self {
        Frame {
            module: module.into(),
            function: function.into(),
        }
    }
}

/// A label attached to a sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Name of the label, one of the well known names of [`Sample`]
    pub name: &'static str,
    /// Value of the label
    pub value: String,
}

/// A normalized, symbolized sample ready to be exported.
///
/// Samples are produced by [`crate::collector::Collector::samples`] from raw samples. The
/// generic part of the transformation fills in the runtime, process, app-domain and thread
/// details and the stack; the kind specific [`crate::samples::SampleValues`] hook then writes
/// the values and its own labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    timestamp: u64,
    runtime_id: String,
    pid: String,
    app_domain_name: String,
    thread_id: String,
    thread_name: String,
    frames: Vec<Frame>,
    labels: Vec<Label>,
    values: Vec<i64>,
}

impl Sample {
    /// Label carrying the local root span id of the trace active when the sample was taken
    pub const LOCAL_ROOT_SPAN_ID_LABEL: &'static str = "local root span id";
    /// Label carrying the span id active when the sample was taken
    pub const SPAN_ID_LABEL: &'static str = "span id";
    /// Label carrying the time, in nanoseconds, at which the observed event ended
    pub const END_TIMESTAMP_LABEL: &'static str = "end_timestamp_ns";
    /// Label carrying the type of a thrown exception
    pub const EXCEPTION_TYPE_LABEL: &'static str = "exception type";
    /// Label carrying the message of a thrown exception
    pub const EXCEPTION_MESSAGE_LABEL: &'static str = "exception message";
    /// Label carrying the type of a sampled allocation
    pub const ALLOCATION_CLASS_LABEL: &'static str = "allocation class";
    /// Label carrying the duration bucket of a lock contention
    pub const DURATION_BUCKET_LABEL: &'static str = "duration bucket";

    /// Creates a sample without thread, app-domain or stack information.
    ///
    /// ## Arguments
    ///
    /// * `timestamp` - Time at which the observed event ended, in nanoseconds
    /// * `runtime_id` - Identity of the runtime instance, may be empty
    /// * `frames_capacity` - Expected number of frames
    /// * `values_count` - Number of value slots, all initialized to 0
    #[must_use]
    pub fn new(
        timestamp: u64,
        runtime_id: impl Into<String>,
        frames_capacity: usize,
        values_count: usize,
    ) -> Self {
        Sample {
            timestamp,
            runtime_id: runtime_id.into(),
            pid: String::new(),
            app_domain_name: String::new(),
            thread_id: String::new(),
            thread_name: String::new(),
            frames: Vec::with_capacity(frames_capacity),
            labels: Vec::new(),
            values: vec![0; values_count],
        }
    }

    /// Returns the timestamp in nanoseconds
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the runtime instance identity, empty if unknown
    #[must_use]
    pub fn runtime_id(&self) -> &str {
        &self.runtime_id
    }

    /// Returns the process id
    #[must_use]
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Sets the process id
    pub fn set_pid(&mut self, pid: impl Into<String>) {
        self.pid = pid.into();
    }

    /// Returns the app-domain name
    #[must_use]
    pub fn app_domain_name(&self) -> &str {
        &self.app_domain_name
    }

    /// Sets the app-domain name
    pub fn set_app_domain_name(&mut self, name: impl Into<String>) {
        self.app_domain_name = name.into();
    }

    /// Returns the thread id
    #[must_use]
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    /// Sets the thread id
    pub fn set_thread_id(&mut self, thread_id: impl Into<String>) {
        self.thread_id = thread_id.into();
    }

    /// Returns the thread name
    #[must_use]
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Sets the thread name
    pub fn set_thread_name(&mut self, thread_name: impl Into<String>) {
        self.thread_name = thread_name.into();
    }

    /// Returns the frames, most recent call first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Appends a frame below the ones already added
    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Returns all labels in insertion order
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Adds a label
    pub fn add_label(&mut self, name: &'static str, value: impl Into<String>) {
        self.labels.push(Label {
            name,
            value: value.into(),
        });
    }

    /// Returns the value of the first label called `name`
    #[must_use]
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| label.value.as_str())
    }

    /// Returns the value slots
    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Writes `value` into the slot at `index`.
    ///
    /// Slots outside of the layout the sample was created with are ignored.
    pub fn set_value(&mut self, index: usize, value: i64) {
        match self.values.get_mut(index) {
            Some(slot) => *slot = value,
            None => debug!(
                index,
                values_count = self.values.len(),
                "value slot outside of the sample layout"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sample() {
        let sample = Sample::new(42, "runtime", 8, 3);
        assert_eq!(sample.timestamp(), 42);
        assert_eq!(sample.runtime_id(), "runtime");
        assert_eq!(sample.values(), &[0, 0, 0]);
        assert!(sample.frames().is_empty());
        assert!(sample.labels().is_empty());
        assert_eq!(sample.pid(), "");
    }

    #[test]
    fn test_labels() {
        let mut sample = Sample::new(0, "", 0, 0);
        sample.add_label(Sample::SPAN_ID_LABEL, "12");
        sample.add_label(Sample::EXCEPTION_TYPE_LABEL, "System.Exception");

        assert_eq!(sample.label(Sample::SPAN_ID_LABEL), Some("12"));
        assert_eq!(sample.label(Sample::LOCAL_ROOT_SPAN_ID_LABEL), None);
        assert_eq!(sample.labels().len(), 2);
    }

    #[test]
    fn test_values_outside_layout_ignored() {
        let mut sample = Sample::new(0, "", 0, 2);
        sample.set_value(1, 7);
        sample.set_value(2, 9);
        assert_eq!(sample.values(), &[0, 7]);
    }

    #[test]
    fn test_frames_keep_order() {
        let mut sample = Sample::new(0, "", 2, 0);
        sample.add_frame(Frame::new("System.Private.CoreLib.dll", "Thread.Sleep"));
        sample.add_frame(Frame::new("App.dll", "Program.Main"));

        let functions: Vec<&str> = sample.frames().iter().map(|f| &*f.function).collect();
        assert_eq!(functions, vec!["Thread.Sleep", "Program.Main"]);
    }
}
