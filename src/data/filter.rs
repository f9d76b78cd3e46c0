use std::collections::BTreeMap;
use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};
use crate::config::{PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN};
use crate::error::RangeError;

// ---------------------------------------------------------------------------
// Selection inputs
// ---------------------------------------------------------------------------

/// Value of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    /// The `"ALL"` sentinel.
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub const ALL: &'static str = "ALL";

    /// Interpret a dropdown value; `"ALL"` maps to [`SiteSelection::All`].
    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Whether a record launched from the selected site.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str(Self::ALL),
            SiteSelection::Site(site) => f.write_str(site),
        }
    }
}

/// Inclusive payload mass bounds, `low <= high`, inside the slider domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, RangeError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(RangeError::NotFinite);
        }
        if low > high {
            return Err(RangeError::Inverted { low, high });
        }
        if low < PAYLOAD_SLIDER_MIN || high > PAYLOAD_SLIDER_MAX {
            return Err(RangeError::OutOfDomain {
                low,
                high,
                min: PAYLOAD_SLIDER_MIN,
                max: PAYLOAD_SLIDER_MAX,
            });
        }
        Ok(Self { low, high })
    }

    /// The whole slider domain.
    #[cfg(test)]
    pub fn full() -> Self {
        Self {
            low: PAYLOAD_SLIDER_MIN,
            high: PAYLOAD_SLIDER_MAX,
        }
    }

    /// Observed payload bounds of a dataset, clamped into the slider domain.
    pub fn observed(dataset: &LaunchDataset) -> Self {
        let low = dataset.min_payload().clamp(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX);
        let high = dataset.max_payload().clamp(low, PAYLOAD_SLIDER_MAX);
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records inside `range` (inclusive) launched from `site`, in table order.
///
/// An empty result is a valid answer, never an error.
pub fn filter_records<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| site.matches(rec))
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Successful launches per site over the whole dataset.
///
/// Deliberately independent of the payload range: the "all sites" pie has
/// always summarised the full table. Every site appears, including those
/// with zero successes, sorted by label.
pub fn success_by_site(dataset: &LaunchDataset) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = dataset
        .launch_sites()
        .iter()
        .map(|s| (s.as_str(), 0))
        .collect();
    for rec in dataset.records() {
        if rec.outcome.is_success() {
            *counts.entry(rec.launch_site.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(site, n)| (site.to_string(), n))
        .collect()
}

/// Success / failure tally for one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    pub success: usize,
    pub failure: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.success + self.failure
    }
}

/// Outcome counts for every launch from `site`, ignoring payload mass.
pub fn outcome_counts(dataset: &LaunchDataset, site: &str) -> OutcomeCounts {
    dataset
        .records()
        .iter()
        .filter(|rec| rec.launch_site == site)
        .fold(OutcomeCounts::default(), |mut acc, rec| {
            if rec.outcome.is_success() {
                acc.success += 1;
            } else {
                acc.failure += 1;
            }
            acc
        })
}
