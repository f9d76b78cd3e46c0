use std::f64::consts::TAU;

use eframe::egui::Color32;

use crate::color::{ColorMap, outcome_color};
use crate::data::filter::{SiteSelection, outcome_counts, success_by_site};
use crate::data::model::{LaunchDataset, Outcome};

/// Segments used to approximate a full circle.
const CIRCLE_SEGMENTS: usize = 128;

/// One sector of the pie.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub value: usize,
    pub color: Color32,
}

/// Pie chart description. Wedges are laid out clockwise from 12 o'clock in
/// the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub legend_title: String,
    pub wedges: Vec<Wedge>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.wedges.iter().map(|w| w.value).sum()
    }

    /// Share of wedge `idx` in `[0, 1]`; zero when the pie is empty.
    pub fn fraction(&self, idx: usize) -> f64 {
        let total = self.total();
        match self.wedges.get(idx) {
            Some(w) if total > 0 => w.value as f64 / total as f64,
            _ => 0.0,
        }
    }

    /// `(start, sweep)` in radians for every wedge, clockwise from the top.
    pub fn spans(&self) -> Vec<(f64, f64)> {
        let mut start = 0.0;
        (0..self.wedges.len())
            .map(|i| {
                let sweep = self.fraction(i) * TAU;
                let span = (start, sweep);
                start += sweep;
                span
            })
            .collect()
    }

    /// Text drawn inside wedge `idx`: its label and percentage.
    pub fn wedge_text(&self, idx: usize) -> String {
        let label = self.wedges.get(idx).map(|w| w.label.as_str()).unwrap_or("");
        format!("{label}\n{:.1}%", self.fraction(idx) * 100.0)
    }
}

/// Build the success pie for the current site selection.
///
/// * `All` – successes per site over the whole table (payload range is not
///   applied).
/// * `Site` – success vs failure counts for that site.
pub fn build_pie(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => {
            let colors = ColorMap::new(dataset.launch_sites());
            let wedges = success_by_site(dataset)
                .into_iter()
                .map(|(site, value)| Wedge {
                    color: colors.color_for(&site),
                    label: site,
                    value,
                })
                .collect();
            PieChart {
                title: "Total Success Launches by Site".to_string(),
                legend_title: "Launch Site".to_string(),
                wedges,
            }
        }
        SiteSelection::Site(name) => {
            let counts = outcome_counts(dataset, name);
            if counts.total() == 0 {
                log::debug!("No launches recorded for {name}");
            }
            let wedge = |outcome: Outcome, value| Wedge {
                label: outcome.label().to_string(),
                value,
                color: outcome_color(outcome),
            };
            PieChart {
                title: format!("Success vs Failure Launches for {name}"),
                legend_title: "Launch Outcome".to_string(),
                wedges: vec![
                    wedge(Outcome::Success, counts.success),
                    wedge(Outcome::Failure, counts.failure),
                ],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Point on a circle of `radius` at `angle` radians clockwise from the top.
fn polar(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Closed outline of a wedge: centre, then the arc from `start` to
/// `start + sweep`.
pub fn wedge_outline(start: f64, sweep: f64, radius: f64) -> Vec<[f64; 2]> {
    let segments = ((sweep / TAU) * CIRCLE_SEGMENTS as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(segments + 2);
    points.push([0.0, 0.0]);
    for i in 0..=segments {
        let angle = start + sweep * i as f64 / segments as f64;
        points.push(polar(angle, radius));
    }
    points
}

/// Where the wedge text goes: the bisector at 60% of the radius, or the
/// centre when the wedge is the whole pie.
pub fn label_anchor(start: f64, sweep: f64, radius: f64) -> [f64; 2] {
    if sweep >= TAU - f64::EPSILON {
        return [0.0, 0.0];
    }
    polar(start + sweep / 2.0, radius * 0.6)
}
