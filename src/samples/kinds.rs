//! Payloads of the raw samples produced by each profiler.

use crate::samples::{Sample, SampleValues, ValueType};

const MILLISECOND_NS: i64 = 1_000_000;

/// Wall time spent by a thread since it was last sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTimeValues {
    /// Elapsed time in nanoseconds
    pub duration_ns: i64,
}

impl SampleValues for WallTimeValues {
    const VALUE_TYPES: &'static [ValueType] = &[ValueType::WallTime];

    fn contribute(self, sample: &mut Sample, value_offset: usize) {
        sample.set_value(value_offset, self.duration_ns);
    }
}

/// CPU time consumed by a thread since it was last sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimeValues {
    /// Consumed CPU time in nanoseconds
    pub duration_ns: i64,
}

impl SampleValues for CpuTimeValues {
    const VALUE_TYPES: &'static [ValueType] = &[ValueType::CpuTime];

    fn contribute(self, sample: &mut Sample, value_offset: usize) {
        sample.set_value(value_offset, self.duration_ns);
    }
}

/// A thrown exception
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionValues {
    /// Full name of the exception type
    pub type_name: String,
    /// Exception message
    pub message: String,
}

impl SampleValues for ExceptionValues {
    const VALUE_TYPES: &'static [ValueType] = &[ValueType::Exception];

    fn contribute(self, sample: &mut Sample, value_offset: usize) {
        sample.set_value(value_offset, 1);
        sample.add_label(Sample::EXCEPTION_TYPE_LABEL, self.type_name);
        sample.add_label(Sample::EXCEPTION_MESSAGE_LABEL, self.message);
    }
}

/// A sampled allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationValues {
    /// Full name of the allocated type
    pub class_name: String,
    /// Size of the allocation in bytes
    pub size: i64,
}

impl SampleValues for AllocationValues {
    const VALUE_TYPES: &'static [ValueType] =
        &[ValueType::AllocationCount, ValueType::AllocationSize];

    fn contribute(self, sample: &mut Sample, value_offset: usize) {
        sample.set_value(value_offset, 1);
        sample.set_value(value_offset + 1, self.size);
        sample.add_label(Sample::ALLOCATION_CLASS_LABEL, self.class_name);
    }
}

/// A lock contention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentionValues {
    /// Time spent waiting for the lock, in nanoseconds
    pub duration_ns: i64,
}

impl ContentionValues {
    /// Returns the coarse duration bucket the contention falls into
    #[must_use]
    pub fn bucket(&self) -> &'static str {
        match self.duration_ns / MILLISECOND_NS {
            i64::MIN..=9 => "0 - 9 ms",
            10..=49 => "10 - 49 ms",
            50..=99 => "50 - 99 ms",
            100..=499 => "100 - 499 ms",
            _ => "500+ ms",
        }
    }
}

impl SampleValues for ContentionValues {
    const VALUE_TYPES: &'static [ValueType] = &[ValueType::LockCount, ValueType::LockTime];

    fn contribute(self, sample: &mut Sample, value_offset: usize) {
        sample.set_value(value_offset, 1);
        sample.set_value(value_offset + 1, self.duration_ns);
        sample.add_label(Sample::DURATION_BUCKET_LABEL, self.bucket());
    }
}
