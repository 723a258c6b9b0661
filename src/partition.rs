use std::{fmt, marker::PhantomData, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    codec::CodecError,
    config::{ConfigError, PartitionConfig, PartitionRule, Scene},
    prelude::*,
    range::RangeError,
    strategy::{HalfMonth, Month, PartitionStrategy},
    types::{BucketIndex, DateValue},
};

/// Error type for single value lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// The column value does not parse with the rule's date format.
    #[error("columnValue: {value:?}. Please check if the format is satisfied")]
    BadInput {
        value:  String,
        #[source]
        source: CodecError,
    },
}

/// Date partition rule: one configuration driven by a [`PartitionStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePartitioner<S> {
    config:   PartitionConfig,
    strategy: PhantomData<S>,
}

/// Twelve buckets, one per calendar month.
pub type MonthPartitioner = DatePartitioner<Month>;
/// Twenty-four buckets, two per calendar month.
pub type HalfMonthPartitioner = DatePartitioner<HalfMonth>;

impl<S: PartitionStrategy> DatePartitioner<S> {
    /// Builds the rule once; it is read-only afterwards.
    ///
    /// # Errors
    /// Returns `ConfigError` if the date format or an anchor date is invalid.
    pub fn new(rule: &PartitionRule) -> Result<Self, ConfigError> {
        Ok(Self::from_config(PartitionConfig::configure(rule, S::bucket_count())?))
    }

    /// Like [`DatePartitioner::new`], with `current_year` standing in for the clock.
    ///
    /// # Errors
    /// Returns `ConfigError` if the date format or an anchor date is invalid.
    pub fn with_current_year(rule: &PartitionRule, current_year: i32) -> Result<Self, ConfigError> {
        let config = PartitionConfig::configure_for_year(rule, S::bucket_count(), current_year)?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: PartitionConfig) -> Self {
        log::debug!(
            "configured {} partitioning: format={:?}, scene={}, anchor={}, buckets={}",
            S::NAME,
            config.date_format(),
            config.scene(),
            config.anchor_begin(),
            config.bucket_count()
        );
        Self {
            config,
            strategy: PhantomData,
        }
    }

    pub const fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Number of partitions the rule routes to (12 or 24).
    pub const fn bucket_count(&self) -> usize {
        self.config.bucket_count()
    }

    /// Returns the bucket a single column value belongs to.
    ///
    /// # Errors
    /// Returns `CalcError::BadInput`, carrying the raw value, if it does not parse.
    pub fn calculate(&self, value: &str) -> Result<BucketIndex, CalcError> {
        let date = self.parse(value).map_err(|source| CalcError::BadInput {
            value: value.to_owned(),
            source,
        })?;

        let units = match self.config.scene() {
            Scene::CalendarYear => S::unit_in_year(&date),
            Scene::ExplicitAnchor => self.units_from_anchor(&date),
        };
        Ok(BucketIndex::from_units(units, self.bucket_count()))
    }

    /// Elapsed units between the begin anchor and `date`, before remapping.
    pub(crate) fn units_from_anchor(&self, date: &DateValue) -> i64 {
        S::elapsed_units(date, &self.config.anchor_begin())
    }

    pub(crate) fn parse(&self, value: &str) -> Result<DateValue, CodecError> {
        self.config.parse(value).inspect_err(|err| {
            log::warn!("{} partitioning rejected column value: {err}", S::NAME);
        })
    }
}

/// Object-safe view of a partition rule, as held by a query router.
pub trait PartitionFunction: fmt::Debug + Send + Sync {
    /// Bucket of a single column value.
    ///
    /// # Errors
    /// Returns `CalcError` if the value does not parse.
    fn calculate(&self, value: &str) -> Result<BucketIndex, CalcError>;

    /// Distinct buckets touched by the inclusive range `begin..=end`.
    ///
    /// # Errors
    /// Returns `RangeError` if either bound does not parse.
    fn calculate_range(&self, begin: &str, end: &str) -> Result<Vec<BucketIndex>, RangeError>;

    /// Number of partitions the rule routes to.
    fn partition_num(&self) -> usize;
}

impl<S: PartitionStrategy + fmt::Debug> PartitionFunction for DatePartitioner<S> {
    fn calculate(&self, value: &str) -> Result<BucketIndex, CalcError> {
        Self::calculate(self, value)
    }

    fn calculate_range(&self, begin: &str, end: &str) -> Result<Vec<BucketIndex>, RangeError> {
        Self::calculate_range(self, begin, end)
    }

    fn partition_num(&self) -> usize {
        self.bucket_count()
    }
}

/// Selects a partitioning strategy by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionKind {
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "half-month")]
    HalfMonth,
}

impl PartitionKind {
    pub fn bucket_count(self) -> usize {
        match self {
            Self::Month => Month::bucket_count(),
            Self::HalfMonth => HalfMonth::bucket_count(),
        }
    }

    /// Builds the rule for this kind behind the router-facing trait.
    ///
    /// # Errors
    /// Returns `ConfigError` if the date format or an anchor date is invalid.
    pub fn build(self, rule: &PartitionRule) -> Result<Box<dyn PartitionFunction>, ConfigError> {
        Ok(match self {
            Self::Month => Box::new(MonthPartitioner::new(rule)?),
            Self::HalfMonth => Box::new(HalfMonthPartitioner::new(rule)?),
        })
    }
}

impl FromStr for PartitionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "by-month" => Ok(Self::Month),
            "half-month" | "half_month" | "halfmonth" | "by-half-month" => Ok(Self::HalfMonth),
            _ => Err(ConfigError::UnknownKind(s.to_owned())),
        }
    }
}
