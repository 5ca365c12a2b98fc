use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors raised while building domain values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("invalid outcome class {0} (expected 0 or 1)")]
    InvalidClass(i64),

    #[error("invalid payload mass {0} kg")]
    InvalidPayload(f64),

    #[error("invalid payload range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome.  Read from the integer class used in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value (0 = failure, 1 = success).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = DataError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DataError::InvalidClass(other)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch.  Field names map onto the CSV header of
/// `spacex_launch_dash.csv`; any other columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_kg,
            outcome,
            booster_category: booster_category.into(),
        }
    }

    /// Payload must be a finite, non-negative mass.
    pub fn validate(&self) -> Result<(), DataError> {
        if !self.payload_kg.is_finite() || self.payload_kg < 0.0 {
            return Err(DataError::InvalidPayload(self.payload_kg));
        }
        Ok(())
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

// ---------------------------------------------------------------------------
// SiteFilter – dropdown selection
// ---------------------------------------------------------------------------

/// Dropdown value: every site, or a single named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Wire value used by the dropdown and the `--site` flag.
    pub const ALL: &'static str = "ALL";

    /// `"ALL"` selects every site; any other value names one site.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => f.write_str("All Sites"),
            SiteFilter::Site(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – slider selection, closed interval in kg
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    min_kg: f64,
    max_kg: f64,
}

impl PayloadRange {
    /// Bounds of the payload slider when no data is loaded.
    pub const DEFAULT: PayloadRange = PayloadRange {
        min_kg: 0.0,
        max_kg: 10_000.0,
    };

    pub fn new(min_kg: f64, max_kg: f64) -> Result<Self, DataError> {
        if min_kg.is_nan() || max_kg.is_nan() || min_kg > max_kg {
            return Err(DataError::InvalidRange {
                min: min_kg,
                max: max_kg,
            });
        }
        Ok(Self { min_kg, max_kg })
    }

    pub fn min_kg(&self) -> f64 {
        self.min_kg
    }

    pub fn max_kg(&self) -> f64 {
        self.max_kg
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.min_kg <= payload_kg && payload_kg <= self.max_kg
    }

    /// Widen outward to multiples of `step` so a stepped slider can reach
    /// both ends.  A non-positive step leaves the range unchanged.
    pub fn aligned_to(self, step: f64) -> Self {
        if step.is_nan() || step <= 0.0 {
            return self;
        }
        Self {
            min_kg: (self.min_kg / step).floor() * step,
            max_kg: (self.max_kg / step).ceil() * step,
        }
    }

    /// Move the lower handle; the upper one follows if crossed.
    pub fn with_min(self, min_kg: f64) -> Self {
        if min_kg.is_nan() {
            return self;
        }
        Self {
            min_kg,
            max_kg: self.max_kg.max(min_kg),
        }
    }

    /// Move the upper handle; the lower one follows if crossed.
    pub fn with_max(self, max_kg: f64) -> Self {
        if max_kg.is_nan() {
            return self;
        }
        Self {
            min_kg: self.min_kg.min(max_kg),
            max_kg,
        }
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.0}, {:.0}] kg", self.min_kg, self.max_kg)
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Immutable launch table with pre-computed column summaries.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
    payload_bounds: Option<PayloadRange>,
}

impl LaunchTable {
    /// Build column summaries from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = records.iter().map(|r| r.site.clone()).collect();
        let booster_categories = records.iter().map(|r| r.booster_category.clone()).collect();

        let payload_bounds = records
            .iter()
            .map(|r| r.payload_kg)
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
            .and_then(|(lo, hi)| PayloadRange::new(lo, hi).ok());

        LaunchTable {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Observed `[min, max]` payload, or `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        self.payload_bounds
    }

    /// Total number of successful launches.
    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
