use std::sync::Arc;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Corner, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::chart::pie::{label_anchor, wedge_outline};
use crate::chart::scatter::outcome_tick_label;
use crate::chart::{PieChart, ScatterChart};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Success pie
// ---------------------------------------------------------------------------

/// Render the pie chart. An empty pie draws no area.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart, height: f32) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&chart.title);
        ui.weak(format!("legend: {}", chart.legend_title));
    });

    let spans = chart.spans();
    let total = chart.total();

    Plot::new("success_pie")
        .legend(Legend::default().position(Corner::RightTop))
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            if total == 0 {
                plot_ui.text(Text::new(
                    PlotPoint::new(0.0, 0.0),
                    RichText::new("No launches").color(Color32::GRAY),
                ));
            }

            for (idx, (wedge, &(start, sweep))) in chart.wedges.iter().zip(&spans).enumerate() {
                // Zero wedges are still drawn so they keep a legend entry.
                let polygon = Polygon::new(PlotPoints::from(wedge_outline(start, sweep, 1.0)))
                    .name(&wedge.label)
                    .fill_color(wedge.color)
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(polygon);

                if sweep > 0.0 {
                    let [x, y] = label_anchor(start, sweep, 1.0);
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(chart.wedge_text(idx))
                            .color(Color32::WHITE)
                            .strong(),
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs outcome scatter
// ---------------------------------------------------------------------------

/// Render the scatter plot with hover detail per point.
pub fn scatter_chart(
    ui: &mut Ui,
    chart: &Arc<ScatterChart>,
    config: &DashboardConfig,
    height: f32,
) {
    ui.strong(&chart.title);

    let hover_chart = Arc::clone(chart);

    Plot::new("payload_scatter")
        .legend(Legend::default().position(Corner::RightBottom))
        .height(height)
        .x_axis_label(&chart.x_label)
        .y_axis_label(&chart.y_label)
        .include_x(chart.range.low())
        .include_x(chart.range.high())
        .include_y(-0.5)
        .include_y(1.5)
        .y_axis_formatter(|mark, _range| outcome_tick_label(mark.value).to_string())
        .label_formatter(move |name, value| {
            hover_chart
                .detail_at(name, value.x, value.y)
                .map(|p| p.detail())
                .unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series.points.iter().map(|p| p.position()).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(series.color.gamma_multiply(config.marker_opacity))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(config.marker_radius),
                );
            }
        });
}
