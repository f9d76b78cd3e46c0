use std::collections::BTreeSet;
use std::fmt;

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome, stored as `class` = 1 (success) / 0 (failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric value as it appears in the `class` column.
    pub fn as_class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Numeric value used as the y coordinate of the scatter plot.
    pub fn as_f64(self) -> f64 {
        self.as_class() as f64
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: String,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices and payload
/// bounds. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    launch_sites: Vec<String>,
    booster_categories: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Validate the rows and build the site / category indices.
    ///
    /// Rows are numbered from 0 in error messages.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::NoRecords);
        }

        let mut sites = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            if rec.launch_site.trim().is_empty() {
                return Err(DatasetError::EmptyLaunchSite { row });
            }
            let mass = rec.payload_mass_kg;
            if !mass.is_finite() || mass < 0.0 {
                return Err(DatasetError::InvalidPayload {
                    row,
                    value: mass.to_string(),
                });
            }
            min_payload = min_payload.min(mass);
            max_payload = max_payload.max(mass);
            sites.insert(rec.launch_site.clone());
            categories.insert(rec.booster_version_category.clone());
        }

        Ok(LaunchDataset {
            records,
            launch_sites: sites.into_iter().collect(),
            booster_categories: categories.into_iter().collect(),
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Sorted unique launch site labels.
    pub fn launch_sites(&self) -> &[String] {
        &self.launch_sites
    }

    /// Sorted unique booster version categories.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.launch_sites.binary_search_by(|s| s.as_str().cmp(site)).is_ok()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn indexes_sites_categories_and_bounds() {
        let ds = two_sites();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.launch_sites(), ["A", "B"]);
        assert_eq!(ds.booster_categories(), ["B4", "FT", "v1.1"]);
        assert_eq!(ds.min_payload(), 500.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert!(ds.has_site("B"));
        assert!(!ds.has_site("C"));
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(
            LaunchDataset::from_records(Vec::new()).unwrap_err(),
            DatasetError::NoRecords
        );
    }

    #[test]
    fn rejects_negative_payload_and_blank_site() {
        let bad_mass = vec![record("A", -1.0, Outcome::Success, "FT")];
        assert!(matches!(
            LaunchDataset::from_records(bad_mass),
            Err(DatasetError::InvalidPayload { row: 0, .. })
        ));

        let blank_site = vec![
            record("A", 1.0, Outcome::Success, "FT"),
            record("  ", 1.0, Outcome::Success, "FT"),
        ];
        assert_eq!(
            LaunchDataset::from_records(blank_site).unwrap_err(),
            DatasetError::EmptyLaunchSite { row: 1 }
        );
    }

    #[test]
    fn outcome_converts_from_class() {
        assert_eq!(Outcome::try_from(1), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(0), Ok(Outcome::Failure));
        assert!(Outcome::try_from(2).is_err());
        assert_eq!(Outcome::Success.as_f64(), 1.0);
    }
}
