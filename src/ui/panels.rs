use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::state::{AppState, Handle};

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range selector.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch Site");
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.selected_site_label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_filter)
                    .hint_text("Select a Launch Site here"),
            );
            let current = &state.controller.selection().site;
            for (label, value) in state.visible_site_options() {
                if ui.selectable_label(current == value, label).clicked() {
                    picked = Some(value.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(site);
    }

    ui.add_space(12.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let (min, max, step) = (
        state.config.slider_min,
        state.config.slider_max,
        state.config.slider_step,
    );

    let low_changed = ui
        .add(
            Slider::new(&mut state.payload_low, min..=max)
                .step_by(step)
                .text("Min"),
        )
        .changed();
    if low_changed {
        state.commit_payload(Handle::Low);
    }

    let high_changed = ui
        .add(
            Slider::new(&mut state.payload_high, min..=max)
                .step_by(step)
                .text("Max"),
        )
        .changed();
    if high_changed {
        state.commit_payload(Handle::High);
    }

    if ui.small_button("Reset").clicked() {
        state.reset_payload();
    }

    if let Some(msg) = &state.status_message {
        ui.add_space(8.0);
        ui.label(RichText::new(msg).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new(&state.config.window_title)
                .size(28.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        let ds = state.controller.dataset();
        let plotted = state
            .controller
            .scatter()
            .map(|s| s.point_count())
            .unwrap_or(0);
        ui.label(format!(
            "{} launches loaded from {} sites, {} plotted",
            ds.len(),
            ds.launch_sites().len(),
            plotted
        ));
    });
}
