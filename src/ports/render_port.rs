//! Chart rendering port.

use crate::domain::stat::StatKind;

/// Per-dataset drawing style.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub color: String,
    pub width: f64,
    /// Dash pattern (on, off) lengths; solid when `None`.
    pub dash: Option<(f64, f64)>,
    /// Marker radius at each point; 0 draws the line only.
    pub point_radius: f64,
}

/// Capability to draw a line chart of named datasets over a shared label
/// axis, plus the inline error slots next to the inputs.
pub trait RenderSurface {
    /// Replaces the whole chart with a single base dataset.
    fn draw_base_chart(&mut self, labels: &[String], name: &str, values: &[f64], style: &SeriesStyle);

    /// Adds or replaces the dataset called `name`: after the call exactly
    /// one dataset with that name exists.
    fn upsert_overlay(&mut self, name: &str, values: &[f64], style: &SeriesStyle);

    /// Removes the dataset called `name` if present.
    fn remove_overlay(&mut self, name: &str);

    /// Tears the chart down entirely.
    fn destroy_chart(&mut self);

    fn show_range_error(&mut self, message: &str);
    fn show_chart_error(&mut self, message: &str);
    fn show_stat_error(&mut self, stat: StatKind, message: &str);
    fn clear_stat_error(&mut self, stat: StatKind);
    /// Clears every error slot.
    fn clear_errors(&mut self);
}
