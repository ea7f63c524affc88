//! History aggregation: calendar buckets and per-bucket averages.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseBucketError;

/// Calendar grouping used for history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[default]
    Month,
    Week,
}

impl Bucket {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
        }
    }

    /// chrono format pattern producing the bucket label.
    ///
    /// Weeks use the ISO week-year, so the days around New Year that share a
    /// Monday share a label. Labels of one bucket kind sort chronologically
    /// as plain strings.
    #[must_use]
    pub const fn label_format(self) -> &'static str {
        match self {
            Self::Month => "%Y-%m",
            Self::Week => "%G-W%V",
        }
    }

    #[must_use]
    pub fn label(self, at: DateTime<Utc>) -> String {
        at.format(self.label_format()).to_string()
    }

    /// Label of the week starting on `monday`.
    #[must_use]
    pub fn week_label(monday: NaiveDate) -> String {
        monday.format(Self::Week.label_format()).to_string()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = ParseBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            _ => Err(ParseBucketError(s.to_owned())),
        }
    }
}

/// Unweighted mean of all observations in one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketAverage {
    pub bucket: String,
    pub average: f64,
    pub samples: i64,
}
