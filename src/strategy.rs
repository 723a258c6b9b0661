use crate::consts::{HALF_MONTHS_PER_YEAR, MONTHS_PER_YEAR};
use crate::types::DateValue;

/// Bucket-width arithmetic of a date partitioning rule.
///
/// A strategy splits every calendar year into `UNITS_PER_YEAR` equal-ranked units
/// and maps each unit to one bucket, so the bucket count equals the units per year.
/// Everything else (configuration, remap, range scan) is shared by
/// [`DatePartitioner`](crate::DatePartitioner).
pub trait PartitionStrategy: Send + Sync + 'static {
    /// Number of buckets, which is also the number of units in one year
    const UNITS_PER_YEAR: u8;

    /// Short name used in logs and by [`PartitionKind`](crate::PartitionKind)
    const NAME: &'static str;

    /// Position of `date` within its own year, in `0..UNITS_PER_YEAR`.
    fn unit_in_year(date: &DateValue) -> i64;

    fn bucket_count() -> usize {
        usize::from(Self::UNITS_PER_YEAR)
    }

    /// Signed number of whole units from `anchor` to `date`.
    ///
    /// Negative when `date` falls into an earlier unit than `anchor`.
    fn elapsed_units(date: &DateValue, anchor: &DateValue) -> i64 {
        (i64::from(date.year()) - i64::from(anchor.year())) * i64::from(Self::UNITS_PER_YEAR)
            + Self::unit_in_year(date)
            - Self::unit_in_year(anchor)
    }
}

/// One bucket per calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Month;

impl PartitionStrategy for Month {
    const NAME: &'static str = "month";
    const UNITS_PER_YEAR: u8 = MONTHS_PER_YEAR;

    fn unit_in_year(date: &DateValue) -> i64 {
        i64::from(date.month())
    }
}

/// Two buckets per calendar month: days 1-15 and day 16 to the end of the month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HalfMonth;

impl PartitionStrategy for HalfMonth {
    const NAME: &'static str = "half-month";
    const UNITS_PER_YEAR: u8 = HALF_MONTHS_PER_YEAR;

    fn unit_in_year(date: &DateValue) -> i64 {
        i64::from(date.month() * 2 + date.half_of_month())
    }
}

/// Folds a signed unit count into `0..bucket_count`.
///
/// Negative counts wrap forward (`-1` is the last bucket) and counts past the end
/// cycle back to the start, so a rule never needs more than `bucket_count` shards.
/// Equivalent to `n - (-x % n)` for negative `x` followed by a final `% n`.
///
/// # Panics
/// Panics if `bucket_count` is zero; `PartitionConfig` never holds a zero count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn remap(units: i64, bucket_count: usize) -> usize {
    assert!(bucket_count > 0, "bucket count must be positive");
    let n = i64::try_from(bucket_count).unwrap_or(i64::MAX);
    // rem_euclid keeps the result in [0, n), so the cast is lossless
    units.rem_euclid(n) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> DateValue {
        DateValue::from_calendar(year, month, day).unwrap()
    }

    /// The two-step wrap the rule engines historically used, for comparison.
    fn naive_remap(units: i64, n: i64) -> i64 {
        let wrapped = if units < 0 { n - (-units) % n } else { units };
        wrapped % n
    }

    #[test]
    fn test_remap_cases() {
        struct TestCase {
            units:       i64,
            n:           usize,
            expected:    usize,
            description: &'static str,
        }

        let cases = [
            TestCase {
                units:       0,
                n:           12,
                expected:    0,
                description: "anchor unit",
            },
            TestCase {
                units:       11,
                n:           12,
                expected:    11,
                description: "last unit of first cycle",
            },
            TestCase {
                units:       12,
                n:           12,
                expected:    0,
                description: "exactly one cycle later",
            },
            TestCase {
                units:       -1,
                n:           12,
                expected:    11,
                description: "one unit before anchor",
            },
            TestCase {
                units:       -12,
                n:           12,
                expected:    0,
                description: "exactly one cycle before anchor",
            },
            TestCase {
                units:       -25,
                n:           24,
                expected:    23,
                description: "just over one half-month cycle before anchor",
            },
            TestCase {
                units:       50,
                n:           24,
                expected:    2,
                description: "two half-month cycles later",
            },
        ];

        for case in &cases {
            assert_eq!(remap(case.units, case.n), case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_remap_matches_naive_wrap_and_stays_in_range() {
        for n in [12_usize, 24] {
            for units in -100_i64..=100 {
                let bucket = remap(units, n);
                assert!(bucket < n);
                assert_eq!(bucket as i64, naive_remap(units, n as i64), "units {units}, n {n}");
            }
        }
    }

    #[test]
    fn test_remap_is_idempotent() {
        for units in -50_i64..=50 {
            let once = remap(units, 12);
            assert_eq!(remap(once as i64, 12), once);
        }
    }

    #[test]
    fn test_remap_extreme_units() {
        assert!(remap(i64::MIN, 12) < 12);
        assert!(remap(i64::MAX, 24) < 24);
    }

    #[test]
    #[should_panic(expected = "bucket count must be positive")]
    fn test_remap_zero_buckets() {
        let _ = remap(1, 0);
    }

    #[test]
    fn test_bucket_counts() {
        assert_eq!(Month::bucket_count(), 12);
        assert_eq!(HalfMonth::bucket_count(), 24);
    }

    #[test]
    fn test_month_units() {
        assert_eq!(Month::unit_in_year(&date(2024, 1, 31)), 0);
        assert_eq!(Month::unit_in_year(&date(2024, 12, 1)), 11);

        let anchor = date(2024, 1, 1);
        assert_eq!(Month::elapsed_units(&date(2024, 1, 31), &anchor), 0);
        assert_eq!(Month::elapsed_units(&date(2025, 1, 1), &anchor), 12);
        assert_eq!(Month::elapsed_units(&date(2023, 12, 1), &anchor), -1);
        assert_eq!(Month::elapsed_units(&date(2025, 6, 1), &anchor), 17);
    }

    #[test]
    fn test_half_month_units() {
        assert_eq!(HalfMonth::unit_in_year(&date(2024, 1, 15)), 0);
        assert_eq!(HalfMonth::unit_in_year(&date(2024, 1, 16)), 1);
        assert_eq!(HalfMonth::unit_in_year(&date(2024, 2, 1)), 2);
        assert_eq!(HalfMonth::unit_in_year(&date(2024, 12, 31)), 23);

        let anchor = date(2024, 1, 16);
        assert_eq!(HalfMonth::elapsed_units(&date(2024, 1, 31), &anchor), 0);
        assert_eq!(HalfMonth::elapsed_units(&date(2024, 1, 1), &anchor), -1);
        assert_eq!(HalfMonth::elapsed_units(&date(2025, 1, 16), &anchor), 24);
        assert_eq!(HalfMonth::elapsed_units(&date(2023, 12, 20), &anchor), -2);
    }
}
