use crate::consts::{DECEMBER, DECEMBER_DAYS, FIRST_HALF_LAST_DAY, JANUARY, MIN_DAY};
use crate::prelude::*;
use crate::strategy::remap;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A calendar date as seen by the partition rules.
///
/// The month is zero-based (`0` is January, `11` is December) to match the bucket
/// arithmetic; [`DateValue::from_calendar`] takes the usual one-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateValue {
    year:  i32,
    month: u32,
    day:   u32,
}

impl DateValue {
    /// Creates a date from a one-based month, validating the day for that month.
    pub fn from_calendar(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// January 1st of `year`
    pub const fn first_of_year(year: i32) -> Self {
        Self {
            year,
            month: JANUARY,
            day: MIN_DAY,
        }
    }

    /// December 31st of `year`
    pub const fn last_of_year(year: i32) -> Self {
        Self {
            year,
            month: DECEMBER,
            day: DECEMBER_DAYS,
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month (0..=11)
    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    /// `0` for days 1 through 15, `1` for the rest of the month
    pub const fn half_of_month(&self) -> u32 {
        if self.day > FIRST_HALF_LAST_DAY { 1 } else { 0 }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self {
            year:  date.year(),
            month: date.month0(),
            day:   date.day(),
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

/// Logical index of one physical partition, always below the rule's bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, Into, Serialize)]
#[serde(transparent)]
pub struct BucketIndex(usize);

impl BucketIndex {
    /// Creates an index, returning `None` if it is outside `0..bucket_count`.
    pub const fn new(value: usize, bucket_count: usize) -> Option<Self> {
        if value < bucket_count { Some(Self(value)) } else { None }
    }

    /// Folds a signed count of elapsed bucket units into `0..bucket_count`.
    pub(crate) fn from_units(units: i64, bucket_count: usize) -> Self {
        Self(remap(units, bucket_count))
    }

    /// Returns the index as usize
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}
