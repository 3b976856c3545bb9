use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::filter::PayloadRange;

/// Source column names, shared by every loader.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";
pub const CLASS_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// Outcome – the binary class column
// ---------------------------------------------------------------------------

/// Mission outcome. Stored in the source as the integer class `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// The class value as it appears in the source table.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<i64> for Outcome {
    type Error = DataError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DataError::InvalidOutcome(other)),
        }
    }
}

/// Numeric class columns (e.g. Parquet float or boolean) are read as `f64`;
/// anything but an exact 0.0 / 1.0 is rejected instead of truncated.
impl TryFrom<f64> for Outcome {
    type Error = DataError;

    fn try_from(class: f64) -> Result<Self, Self::Error> {
        if !class.is_finite() || class.fract() != 0.0 {
            return Err(DataError::NonIntegralOutcome(class));
        }
        Outcome::try_from(class as i64)
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt. Columns not listed here are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
    #[serde(rename = "class")]
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the read-only table held for the process lifetime
// ---------------------------------------------------------------------------

/// The loaded launch table plus values derived once at construction.
///
/// There are no mutating methods: every chart is recomputed from
/// [`LaunchDataset::records`], so the holder can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    booster_categories: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Validate the rows and compute the site list and payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let mut sites = BTreeSet::new();
        let mut boosters = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            let mass = rec.payload_mass_kg;
            if !mass.is_finite() || mass < 0.0 {
                return Err(DataError::InvalidPayload(mass));
            }
            min_payload = min_payload.min(mass);
            max_payload = max_payload.max(mass);
            sites.insert(rec.site.clone());
            boosters.insert(rec.booster_category.clone());
        }

        Ok(LaunchDataset {
            records,
            sites: sites.into_iter().collect(),
            booster_categories: boosters.into_iter().collect(),
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct site labels, sorted.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster categories, sorted.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// The full payload range, used as the slider bounds and default value.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload, self.max_payload)
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
