//! Configuration of the sample collection pipeline
//!
//! This module provides the options a [`crate::collector::Collector`] reads once at
//! construction. Loading them from the profiler's environment is up to the host.

use strum::EnumCount;

use crate::samples::ValueType;

/// Configuration for transforming raw samples into exportable samples
///
/// Presets cover the common setups; individual fields can be adjusted afterwards since all of
/// them are public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Add an `end_timestamp_ns` label carrying the sample timestamp to every sample
    pub timestamps_as_label: bool,

    /// Number of value slots in every produced sample (default: one per [`ValueType`])
    pub values_count: usize,

    /// Minimal number of drained raw samples for the transformation to run on the rayon pool.
    /// `usize::MAX` always transforms on the draining thread.
    pub parallel_transform_threshold: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            timestamps_as_label: false,
            values_count: ValueType::COUNT,
            parallel_transform_threshold: 4096,
        }
    }
}

impl SamplingConfig {
    /// Creates the default configuration with timestamp labels enabled
    #[must_use]
    pub fn with_timestamps() -> Self {
        Self {
            timestamps_as_label: true,
            ..Self::default()
        }
    }

    /// Creates the default configuration that never transforms in parallel
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel_transform_threshold: usize::MAX,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = SamplingConfig::default();
        assert!(!default.timestamps_as_label);
        assert_eq!(default.values_count, ValueType::COUNT);

        assert!(SamplingConfig::with_timestamps().timestamps_as_label);
        assert_eq!(
            SamplingConfig::sequential().parallel_transform_threshold,
            usize::MAX
        );
    }
}
