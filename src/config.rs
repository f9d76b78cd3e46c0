// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// File names tried, in order, in the working directory at startup.
pub const DATA_CANDIDATES: [&str; 3] = [
    "spacex_launch_dash.csv",
    "spacex_launch_dash.parquet",
    "spacex_launch_dash.json",
];

/// Lower bound of the payload slider (kg).
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;

/// Upper bound of the payload slider (kg).
pub const PAYLOAD_SLIDER_MAX: f64 = 16000.0;

/// Slider step (kg).
pub const PAYLOAD_SLIDER_STEP: f64 = 500.0;

/// Compile-time settings for the dashboard window and controls.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
    /// Scatter marker radius in points (diameter 16).
    pub marker_radius: f32,
    /// Scatter marker opacity.
    pub marker_opacity: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 900.0],
            min_window_size: [700.0, 500.0],
            slider_min: PAYLOAD_SLIDER_MIN,
            slider_max: PAYLOAD_SLIDER_MAX,
            slider_step: PAYLOAD_SLIDER_STEP,
            marker_radius: 8.0,
            marker_opacity: 0.8,
        }
    }
}
