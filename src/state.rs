use crate::config::DashboardConfig;
use crate::controller::Controller;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which slider handle the user moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

/// Keep `low <= high` after one handle moved: the other handle is pushed
/// along with it.
pub fn reconcile_handles(low: f64, high: f64, moved: Handle) -> (f64, f64) {
    if low <= high {
        return (low, high);
    }
    match moved {
        Handle::Low => (low, low),
        Handle::High => (high, high),
    }
}

/// Dropdown entries: `All Sites` first, then every site in label order.
pub fn site_options(dataset: &LaunchDataset) -> Vec<(String, SiteSelection)> {
    std::iter::once(("All Sites", SiteSelection::ALL))
        .chain(dataset.launch_sites().iter().map(|s| (s.as_str(), s.as_str())))
        .map(|(label, value)| (label.to_string(), SiteSelection::from_value(value)))
        .collect()
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Selection and current figures.
    pub controller: Controller<'static>,

    /// Dropdown entries (label, value).
    pub site_options: Vec<(String, SiteSelection)>,

    /// Search text typed into the dropdown.
    pub site_filter: String,

    /// Slider handle positions as edited in the UI.
    pub payload_low: f64,
    pub payload_high: f64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: &'static LaunchDataset, config: DashboardConfig) -> Self {
        let controller = Controller::dashboard(dataset);
        let range = controller.selection().payload;
        Self {
            config,
            site_options: site_options(dataset),
            site_filter: String::new(),
            controller,
            payload_low: range.low(),
            payload_high: range.high(),
            status_message: None,
        }
    }

    /// Label of the current dropdown value.
    pub fn selected_site_label(&self) -> &str {
        let current = &self.controller.selection().site;
        self.site_options
            .iter()
            .find(|(_, value)| value == current)
            .map(|(label, _)| label.as_str())
            .unwrap_or("")
    }

    /// Dropdown entries whose label contains the search text, ignoring case.
    pub fn visible_site_options(&self) -> Vec<&(String, SiteSelection)> {
        let needle = self.site_filter.trim().to_lowercase();
        self.site_options
            .iter()
            .filter(|(label, _)| needle.is_empty() || label.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn select_site(&mut self, site: SiteSelection) {
        self.site_filter.clear();
        self.controller.set_site(site);
    }

    /// Put both handles back on the startup default.
    pub fn reset_payload(&mut self) {
        let range = PayloadRange::observed(self.controller.dataset());
        self.payload_low = range.low();
        self.payload_high = range.high();
        self.controller.set_payload_range(range);
        self.status_message = None;
    }

    /// Push the edited handle positions into the controller.
    pub fn commit_payload(&mut self, moved: Handle) {
        let (low, high) = reconcile_handles(self.payload_low, self.payload_high, moved);
        self.payload_low = low;
        self.payload_high = high;

        match PayloadRange::new(low, high) {
            Ok(range) => {
                self.controller.set_payload_range(range);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Ignoring payload range: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, two_sites};
    use crate::data::model::Outcome;

    fn leaked() -> &'static LaunchDataset {
        Box::leak(Box::new(two_sites()))
    }

    #[test]
    fn handles_never_cross() {
        assert_eq!(reconcile_handles(1000.0, 5000.0, Handle::Low), (1000.0, 5000.0));
        assert_eq!(reconcile_handles(6000.0, 5000.0, Handle::Low), (6000.0, 6000.0));
        assert_eq!(reconcile_handles(6000.0, 5000.0, Handle::High), (5000.0, 5000.0));
    }

    #[test]
    fn options_start_with_all_sites() {
        let opts = site_options(&two_sites());
        let labels: Vec<&str> = opts.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["All Sites", "A", "B"]);
        assert_eq!(opts[0].1, SiteSelection::All);
    }

    #[test]
    fn starts_on_observed_payload_bounds() {
        let state = AppState::new(leaked(), DashboardConfig::default());
        assert_eq!((state.payload_low, state.payload_high), (500.0, 9600.0));
        assert_eq!(state.selected_site_label(), "All Sites");
    }

    #[test]
    fn commit_payload_updates_scatter() {
        let mut state = AppState::new(leaked(), DashboardConfig::default());
        state.payload_low = 9000.0;
        state.payload_high = 4000.0;
        state.commit_payload(Handle::Low);
        assert_eq!(state.controller.selection().payload.low(), 9000.0);
        assert_eq!(state.controller.selection().payload.high(), 9000.0);
        assert_eq!(state.controller.scatter().unwrap().point_count(), 0);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn select_site_switches_pie() {
        let mut state = AppState::new(leaked(), DashboardConfig::default());
        state.select_site(SiteSelection::Site("B".to_string()));
        assert_eq!(state.selected_site_label(), "B");
        assert_eq!(
            state.controller.pie().unwrap().title,
            "Success vs Failure Launches for B"
        );
    }

    #[test]
    fn reset_restores_clamped_default() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success, "FT"),
            record("A", 17000.0, Outcome::Success, "B5"),
        ])
        .unwrap();
        let mut state = AppState::new(Box::leak(Box::new(ds)), DashboardConfig::default());
        let default = state.controller.selection().payload;
        assert_eq!((default.low(), default.high()), (500.0, 16000.0));

        state.payload_low = 2000.0;
        state.commit_payload(Handle::Low);
        assert_eq!(state.controller.selection().payload.low(), 2000.0);

        state.reset_payload();
        assert_eq!(state.controller.selection().payload, default);
        assert_eq!((state.payload_low, state.payload_high), (500.0, 16000.0));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn site_search_filters_options() {
        let mut state = AppState::new(leaked(), DashboardConfig::default());
        state.site_filter = " b ".to_string();
        let labels: Vec<&str> = state
            .visible_site_options()
            .iter()
            .map(|(l, _)| l.as_str())
            .collect();
        assert_eq!(labels, vec!["B"]);

        state.site_filter = "all".to_string();
        assert_eq!(state.visible_site_options().len(), 1);

        state.select_site(SiteSelection::Site("B".to_string()));
        assert!(state.site_filter.is_empty());
        assert_eq!(state.visible_site_options().len(), 3);
    }
}
