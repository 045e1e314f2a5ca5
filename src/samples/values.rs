use strum::{AsRefStr, Display, EnumCount, EnumIter};

use crate::samples::SampleValues;

/// The kinds of value a [`crate::samples::Sample`] can carry.
///
/// In the default layout every value type owns the slot at its discriminant, so all samples
/// produced by the profiler share the same value vector shape regardless of the collector they
/// come from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumCount, EnumIter,
)]
pub enum ValueType {
    /// Wall clock time spent in the sampled stack
    #[strum(serialize = "wall")]
    WallTime,
    /// CPU time spent in the sampled stack
    #[strum(serialize = "cpu")]
    CpuTime,
    /// Number of thrown exceptions
    #[strum(serialize = "exception")]
    Exception,
    /// Number of sampled allocations
    #[strum(serialize = "alloc-samples")]
    AllocationCount,
    /// Size of sampled allocations
    #[strum(serialize = "alloc-size")]
    AllocationSize,
    /// Number of lock contentions
    #[strum(serialize = "lock-count")]
    LockCount,
    /// Time spent waiting for locks
    #[strum(serialize = "lock-time")]
    LockTime,
}

impl ValueType {
    /// Returns the slot of this value type in the default layout
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit of the values
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            ValueType::WallTime | ValueType::CpuTime | ValueType::LockTime => "nanoseconds",
            ValueType::AllocationSize => "bytes",
            ValueType::Exception | ValueType::AllocationCount | ValueType::LockCount => "count",
        }
    }

    /// Returns the offset of the first slot written by `V` in the default layout
    #[must_use]
    pub fn default_offset<V: SampleValues>() -> usize {
        V::VALUE_TYPES.first().map_or(0, |value_type| value_type.index())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::samples::{AllocationValues, ContentionValues, WallTimeValues};

    #[test]
    fn test_names_and_units() {
        assert_eq!(ValueType::WallTime.to_string(), "wall");
        assert_eq!(ValueType::AllocationSize.as_ref(), "alloc-size");
        assert_eq!(ValueType::AllocationSize.unit(), "bytes");
        assert_eq!(ValueType::LockTime.unit(), "nanoseconds");
    }

    #[test]
    fn test_indexes_are_dense() {
        for (i, value_type) in ValueType::iter().enumerate() {
            assert_eq!(value_type.index(), i);
        }
        assert_eq!(ValueType::iter().count(), ValueType::COUNT);
    }

    #[test]
    fn test_default_offsets() {
        assert_eq!(ValueType::default_offset::<WallTimeValues>(), 0);
        assert_eq!(ValueType::default_offset::<AllocationValues>(), 3);
        assert_eq!(ValueType::default_offset::<ContentionValues>(), 5);
    }
}
