//! Shared fixtures for unit tests.

use crate::{BucketIndex, DatePartitioner, PartitionRule, PartitionStrategy};

/// Year the calendar-year fixtures treat as "now"
pub const FIXTURE_YEAR: i32 = 2026;

/// Rule anchored at `begin` with the default `yyyy-MM-dd` format
pub fn anchored<S: PartitionStrategy>(begin: &str) -> DatePartitioner<S> {
    DatePartitioner::with_current_year(&PartitionRule::default().with_begin_date(begin), FIXTURE_YEAR)
        .unwrap_or_else(|e| panic!("failed to build rule anchored at {begin}: {e}"))
}

/// Rule without anchors, following the calendar
pub fn calendar<S: PartitionStrategy>() -> DatePartitioner<S> {
    calendar_in(FIXTURE_YEAR)
}

pub fn calendar_in<S: PartitionStrategy>(current_year: i32) -> DatePartitioner<S> {
    DatePartitioner::with_current_year(&PartitionRule::default(), current_year)
        .unwrap_or_else(|e| panic!("failed to build calendar-year rule: {e}"))
}

pub fn indices(buckets: &[BucketIndex]) -> Vec<usize> {
    buckets.iter().map(|bucket| bucket.get()).collect()
}
