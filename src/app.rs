use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(dataset: &'static LaunchDataset, config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(dataset, config),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: dropdown and payload slider ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let height = (ui.available_height() / 2.0 - 24.0).max(120.0);
            let controller = &self.state.controller;

            if let Some(pie) = controller.pie() {
                plot::pie_chart(ui, pie, height);
            }
            ui.separator();
            if let Some(scatter) = controller.scatter() {
                plot::scatter_chart(ui, scatter, &self.state.config, height);
            }
        });
    }
}
