use std::collections::BTreeMap;
use std::sync::Arc;

use crate::chart::{Figure, PieChart, ScatterChart, build_pie, build_scatter};
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Controls, slots, bindings
// ---------------------------------------------------------------------------

/// Input controls on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Control {
    SiteDropdown,
    PayloadSlider,
}

/// Chart outputs on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    SuccessPie,
    PayloadScatter,
}

/// Current value of every control.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Selection {
    /// All sites, payload range spanning the observed masses.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        Self {
            site: SiteSelection::All,
            payload: PayloadRange::observed(dataset),
        }
    }
}

/// Pure recompute function for one slot.
pub type Recompute = fn(&LaunchDataset, &Selection) -> Figure;

/// "these controls → this slot → this recompute" registration.
#[derive(Debug, Clone)]
pub struct Binding {
    pub slot: Slot,
    pub inputs: &'static [Control],
    pub recompute: Recompute,
}

impl Binding {
    pub fn listens_to(&self, control: Control) -> bool {
        self.inputs.contains(&control)
    }
}

fn recompute_pie(dataset: &LaunchDataset, selection: &Selection) -> Figure {
    Figure::Pie(build_pie(dataset, &selection.site))
}

fn recompute_scatter(dataset: &LaunchDataset, selection: &Selection) -> Figure {
    Figure::Scatter(Arc::new(build_scatter(
        dataset,
        &selection.site,
        &selection.payload,
    )))
}

/// The two bindings of the launch dashboard. The pie only listens to the
/// site dropdown.
pub fn dashboard_bindings() -> Vec<Binding> {
    vec![
        Binding {
            slot: Slot::SuccessPie,
            inputs: &[Control::SiteDropdown],
            recompute: recompute_pie,
        },
        Binding {
            slot: Slot::PayloadScatter,
            inputs: &[Control::SiteDropdown, Control::PayloadSlider],
            recompute: recompute_scatter,
        },
    ]
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the selection and the figure in every slot. A control change
/// synchronously recomputes exactly the bindings listening to it.
pub struct Controller<'a> {
    dataset: &'a LaunchDataset,
    bindings: Vec<Binding>,
    selection: Selection,
    figures: BTreeMap<Slot, Figure>,
}

impl<'a> Controller<'a> {
    /// Register `bindings` and render every slot once.
    pub fn new(dataset: &'a LaunchDataset, bindings: Vec<Binding>, selection: Selection) -> Self {
        let figures = bindings
            .iter()
            .map(|b| (b.slot, (b.recompute)(dataset, &selection)))
            .collect();
        Self {
            dataset,
            bindings,
            selection,
            figures,
        }
    }

    pub fn dashboard(dataset: &'a LaunchDataset) -> Self {
        Self::new(dataset, dashboard_bindings(), Selection::initial(dataset))
    }

    pub fn dataset(&self) -> &'a LaunchDataset {
        self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn figure(&self, slot: Slot) -> Option<&Figure> {
        self.figures.get(&slot)
    }

    pub fn pie(&self) -> Option<&PieChart> {
        match self.figure(Slot::SuccessPie)? {
            Figure::Pie(p) => Some(p),
            _ => None,
        }
    }

    pub fn scatter(&self) -> Option<&Arc<ScatterChart>> {
        match self.figure(Slot::PayloadScatter)? {
            Figure::Scatter(s) => Some(s),
            _ => None,
        }
    }

    /// Dropdown changed. Returns the slots that were recomputed.
    pub fn set_site(&mut self, site: SiteSelection) -> Vec<Slot> {
        if site == self.selection.site {
            return Vec::new();
        }
        if let SiteSelection::Site(name) = &site {
            if !self.dataset.has_site(name) {
                log::warn!("Unknown launch site '{name}' selected; charts will be empty");
            }
        }
        log::debug!("Site selection: {} -> {site}", self.selection.site);
        self.selection.site = site;
        self.dispatch(Control::SiteDropdown)
    }

    /// Range slider changed. Returns the slots that were recomputed.
    pub fn set_payload_range(&mut self, range: PayloadRange) -> Vec<Slot> {
        if range == self.selection.payload {
            return Vec::new();
        }
        self.selection.payload = range;
        self.dispatch(Control::PayloadSlider)
    }

    fn dispatch(&mut self, control: Control) -> Vec<Slot> {
        let mut refreshed = Vec::new();
        for binding in self.bindings.iter().filter(|b| b.listens_to(control)) {
            let figure = (binding.recompute)(self.dataset, &self.selection);
            self.figures.insert(binding.slot, figure);
            refreshed.push(binding.slot);
        }
        log::debug!("{control:?} changed; refreshed {refreshed:?}");
        refreshed
    }
}
