use crate::codec::{CodecError, DateCodec};
use crate::consts::{BEGIN_DATE_FIELD, DEFAULT_DATE_FORMAT, END_DATE_FIELD};
use crate::prelude::*;
use crate::types::DateValue;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Rule properties as they appear in the router's rule schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionRule {
    /// Pattern every column value is written in
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Anchor date mapped to bucket 0; unset means "January of the current year"
    #[serde(default, rename = "sBeginDate", alias = "beginDate")]
    pub begin_date:  Option<String>,
    /// Accepted and validated, but it never changes the bucket count
    #[serde(default, rename = "sEndDate", alias = "endDate")]
    pub end_date:    Option<String>,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_owned()
}

impl Default for PartitionRule {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            begin_date:  None,
            end_date:    None,
        }
    }
}

impl PartitionRule {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_begin_date(mut self, begin_date: impl Into<String>) -> Self {
        self.begin_date = Some(begin_date.into());
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    fn has_no_anchor(&self) -> bool {
        is_blank(self.begin_date.as_deref()) && is_blank(self.end_date.as_deref())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// How bucket positions are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Scene {
    /// No anchor configured: buckets follow the calendar, January is bucket 0.
    #[display(fmt = "calendar-year")]
    CalendarYear,
    /// Buckets are counted from the configured begin date.
    #[display(fmt = "explicit-anchor")]
    ExplicitAnchor,
}

/// Error type for building a [`PartitionConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The date format pattern cannot be used.
    #[error("Invalid date format {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source:  CodecError,
    },

    /// An anchor date does not parse with the configured format.
    #[error("Invalid {field} {value:?} for date format {pattern:?}")]
    InvalidDate {
        field:   &'static str,
        value:   String,
        pattern: String,
        #[source]
        source:  CodecError,
    },

    /// A rule must route to at least one partition.
    #[error("Bucket count must be positive")]
    NoBuckets,

    /// Unknown partition kind name.
    #[error("Unknown partition kind {0:?} (expected \"month\" or \"half-month\")")]
    UnknownKind(String),
}

/// Validated, immutable settings of one partition rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionConfig {
    codec:        DateCodec,
    anchor_begin: DateValue,
    anchor_end:   Option<DateValue>,
    bucket_count: usize,
    scene:        Scene,
}

impl PartitionConfig {
    /// Builds the configuration, resolving "the current year" from the local clock.
    ///
    /// # Errors
    /// See [`PartitionConfig::configure_for_year`].
    pub fn configure(rule: &PartitionRule, bucket_count: usize) -> Result<Self, ConfigError> {
        Self::configure_for_year(rule, bucket_count, Local::now().year())
    }

    /// Builds the configuration with an explicit current year.
    ///
    /// The bucket count is always the strategy's fixed count; a configured end date
    /// is parsed and kept but does not resize the rule.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidPattern` for an unusable date format and
    /// `ConfigError::InvalidDate` when an anchor does not parse. A rule with only an
    /// end date fails on its empty begin date. A zero bucket count is
    /// `ConfigError::NoBuckets`.
    pub fn configure_for_year(
        rule: &PartitionRule,
        bucket_count: usize,
        current_year: i32,
    ) -> Result<Self, ConfigError> {
        if bucket_count == 0 {
            return Err(ConfigError::NoBuckets);
        }
        let codec = DateCodec::new(&rule.date_format).map_err(|source| ConfigError::InvalidPattern {
            pattern: rule.date_format.clone(),
            source,
        })?;

        if rule.has_no_anchor() {
            return Ok(Self {
                codec,
                anchor_begin: DateValue::first_of_year(current_year),
                anchor_end: Some(DateValue::last_of_year(current_year)),
                bucket_count,
                scene: Scene::CalendarYear,
            });
        }

        let begin = rule.begin_date.as_deref().unwrap_or_default();
        let anchor_begin = parse_anchor(&codec, BEGIN_DATE_FIELD, begin)?;
        let anchor_end = match rule.end_date.as_deref() {
            Some(end) if !end.is_empty() => Some(parse_anchor(&codec, END_DATE_FIELD, end)?),
            _ => None,
        };

        Ok(Self {
            codec,
            anchor_begin,
            anchor_end,
            bucket_count,
            scene: Scene::ExplicitAnchor,
        })
    }

    pub fn date_format(&self) -> &str {
        self.codec.pattern()
    }

    pub const fn codec(&self) -> &DateCodec {
        &self.codec
    }

    pub const fn anchor_begin(&self) -> DateValue {
        self.anchor_begin
    }

    /// Configured end date, or December 31st of the current year in
    /// [`Scene::CalendarYear`]
    pub const fn anchor_end(&self) -> Option<DateValue> {
        self.anchor_end
    }

    pub const fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub const fn scene(&self) -> Scene {
        self.scene
    }

    pub(crate) fn parse(&self, value: &str) -> Result<DateValue, CodecError> {
        self.codec.parse(value)
    }
}

fn parse_anchor(codec: &DateCodec, field: &'static str, value: &str) -> Result<DateValue, ConfigError> {
    codec.parse(value).map_err(|source| ConfigError::InvalidDate {
        field,
        value: value.to_owned(),
        pattern: codec.pattern().to_owned(),
        source,
    })
}
