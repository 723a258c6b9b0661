use crate::{
    codec::CodecError,
    partition::DatePartitioner,
    strategy::PartitionStrategy,
    types::BucketIndex,
};

/// Error type for range lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// A range bound does not parse with the rule's date format.
    #[error("Range bound {value:?} does not match the date format")]
    BadInput {
        value:  String,
        #[source]
        source: CodecError,
    },
}

impl<S: PartitionStrategy> DatePartitioner<S> {
    /// Returns the distinct buckets touched by the inclusive range `begin..=end`,
    /// in the order they are first reached when walking forward from `begin`.
    ///
    /// An inverted range (`begin` later than `end`) yields an empty list. Bounds
    /// before the anchor date wrap around like single values do.
    ///
    /// # Errors
    /// Returns `RangeError::BadInput` if either bound does not parse.
    pub fn calculate_range(&self, begin: &str, end: &str) -> Result<Vec<BucketIndex>, RangeError> {
        let start_units = self.bound_units(begin)?;
        let end_units = self.bound_units(end)?;

        let buckets = collect_buckets(start_units, end_units, self.bucket_count());
        log::debug!(
            "{} range {begin:?}..={end:?} spans units {start_units}..={end_units}, {} bucket(s)",
            S::NAME,
            buckets.len()
        );
        Ok(buckets)
    }

    fn bound_units(&self, value: &str) -> Result<i64, RangeError> {
        let date = self.parse(value).map_err(|source| RangeError::BadInput {
            value: value.to_owned(),
            source,
        })?;
        Ok(self.units_from_anchor(&date))
    }
}

/// Walks `start_units..=end_units`, keeping each bucket the first time it shows up.
///
/// Stops as soon as every bucket has been seen, so the walk never takes more than
/// `bucket_count` steps past the first repeat-free stretch.
pub(crate) fn collect_buckets(start_units: i64, end_units: i64, bucket_count: usize) -> Vec<BucketIndex> {
    let mut seen = vec![false; bucket_count];
    let mut buckets = Vec::with_capacity(bucket_count);

    for units in start_units..=end_units {
        let bucket = BucketIndex::from_units(units, bucket_count);
        if !seen[bucket.get()] {
            seen[bucket.get()] = true;
            buckets.push(bucket);
            if buckets.len() == bucket_count {
                break;
            }
        }
    }
    buckets
}
