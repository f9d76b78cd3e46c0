use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::filter::{PayloadRange, SiteSelection, filter_records};
use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};

/// One launch on the payload / outcome plane, with hover detail.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: String,
    pub launch_site: String,
}

impl ScatterPoint {
    fn from_record(rec: &LaunchRecord) -> Self {
        Self {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version: rec.booster_version.clone(),
            launch_site: rec.launch_site.clone(),
        }
    }

    pub fn position(&self) -> [f64; 2] {
        [self.payload_mass_kg, self.outcome.as_f64()]
    }

    /// Multi-line hover text.
    pub fn detail(&self) -> String {
        format!(
            "Booster Version: {}\nLaunch Site: {}\nPayload Mass: {} kg\nOutcome: {}",
            self.booster_version, self.launch_site, self.payload_mass_kg, self.outcome
        )
    }
}

/// All points of one booster version category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Color32,
    pub points: Vec<ScatterPoint>,
}

/// Payload mass vs outcome scatter description.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub range: PayloadRange,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// The point of series `category` closest to `(x, y)`, for hover text.
    pub fn detail_at(&self, category: &str, x: f64, y: f64) -> Option<&ScatterPoint> {
        let series = self.series.iter().find(|s| s.category == category)?;
        series.points.iter().min_by(|a, b| {
            let da = distance_sq(a.position(), [x, y]);
            let db = distance_sq(b.position(), [x, y]);
            da.total_cmp(&db)
        })
    }
}

fn distance_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

/// y-axis tick text: the two outcome rows are named, everything else blank.
pub fn outcome_tick_label(value: f64) -> &'static str {
    if value == Outcome::Failure.as_f64() {
        Outcome::Failure.label()
    } else if value == Outcome::Success.as_f64() {
        Outcome::Success.label()
    } else {
        ""
    }
}

/// Build the scatter for the site and payload range. Categories without
/// points in the filtered set are omitted; an empty set gives no series.
pub fn build_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> ScatterChart {
    let records = filter_records(dataset, site, range);
    let colors = ColorMap::new(dataset.booster_categories());

    let series = dataset
        .booster_categories()
        .iter()
        .filter_map(|category| {
            let points: Vec<ScatterPoint> = records
                .iter()
                .filter(|rec| rec.booster_version_category == *category)
                .map(|rec| ScatterPoint::from_record(rec))
                .collect();
            if points.is_empty() {
                return None;
            }
            Some(ScatterSeries {
                category: category.clone(),
                color: colors.color_for(category),
                points,
            })
        })
        .collect();

    ScatterChart {
        title: format!(
            "Payload Mass vs Launch Outcome ({}-{} Kg)",
            range.low(),
            range.high()
        ),
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "Launch Outcome (1=Success, 0=Failure)".to_string(),
        range: *range,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::two_sites;

    #[test]
    fn full_range_all_sites_plots_every_record() {
        let ds = two_sites();
        let chart = build_scatter(&ds, &SiteSelection::All, &PayloadRange::full());
        assert_eq!(chart.point_count(), ds.len());
        assert_eq!(chart.title, "Payload Mass vs Launch Outcome (0-16000 Kg)");
    }

    #[test]
    fn series_follow_booster_categories() {
        let ds = two_sites();
        let chart = build_scatter(
            &ds,
            &SiteSelection::Site("A".to_string()),
            &PayloadRange::full(),
        );
        let names: Vec<&str> = chart.series.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["FT", "v1.1"]);
        assert_eq!(chart.point_count(), 3);
    }

    #[test]
    fn category_colour_survives_filtering() {
        let ds = two_sites();
        let all = build_scatter(&ds, &SiteSelection::All, &PayloadRange::full());
        let narrow = build_scatter(
            &ds,
            &SiteSelection::All,
            &PayloadRange::new(9000.0, 10000.0).unwrap(),
        );
        let ft = |c: &ScatterChart| c.series.iter().find(|s| s.category == "FT").unwrap().color;
        assert_eq!(ft(&all), ft(&narrow));
    }

    #[test]
    fn empty_selection_renders_no_points() {
        let ds = two_sites();
        let chart = build_scatter(
            &ds,
            &SiteSelection::All,
            &PayloadRange::new(12000.0, 12000.0).unwrap(),
        );
        assert!(chart.series.is_empty());
        assert_eq!(chart.point_count(), 0);
        assert_eq!(chart.title, "Payload Mass vs Launch Outcome (12000-12000 Kg)");
        assert!(chart.detail_at("FT", 0.0, 0.0).is_none());
    }

    #[test]
    fn hover_detail_finds_nearest_point() {
        let ds = two_sites();
        let chart = build_scatter(&ds, &SiteSelection::All, &PayloadRange::full());
        let p = chart.detail_at("FT", 3050.0, 1.0).unwrap();
        assert_eq!(p.launch_site, "B");
        assert_eq!(p.payload_mass_kg, 3000.0);
        assert!(p.detail().contains("Launch Site: B"));
        assert!(chart.detail_at("v1.0", 3050.0, 1.0).is_none());
    }

    #[test]
    fn outcome_ticks() {
        assert_eq!(outcome_tick_label(0.0), "Failure");
        assert_eq!(outcome_tick_label(1.0), "Success");
        assert_eq!(outcome_tick_label(0.5), "");
    }
}
