//! SVG line-chart adapter.
//!
//! Keeps an in-memory chart model (shared labels, ordered named datasets,
//! error slots) and renders it as a standalone SVG document. The y scale is
//! fitted to the data rather than zero-based, and x tick labels are thinned
//! to a fixed maximum to avoid clutter on long date ranges.

use crate::domain::stat::StatKind;
use crate::ports::render_port::{RenderSurface, SeriesStyle};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const PADDING: f64 = 40.0;
const MAX_X_TICKS: usize = 12;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub values: Vec<f64>,
    pub style: SeriesStyle,
}

pub struct SvgChartAdapter {
    width: f64,
    height: f64,
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    range_error: Option<String>,
    chart_error: Option<String>,
    stat_errors: [Option<String>; StatKind::ALL.len()],
}

impl SvgChartAdapter {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            labels: Vec::new(),
            datasets: Vec::new(),
            range_error: None,
            chart_error: None,
            stat_errors: Default::default(),
        }
    }

    pub fn has_chart(&self) -> bool {
        !self.datasets.is_empty()
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn range_error(&self) -> Option<&str> {
        self.range_error.as_deref()
    }

    pub fn chart_error(&self) -> Option<&str> {
        self.chart_error.as_deref()
    }

    pub fn stat_error(&self, stat: StatKind) -> Option<&str> {
        self.stat_errors[stat.index()].as_deref()
    }

    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        fs::write(path, self.render_svg())
    }

    pub fn render_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#
        );
        svg.push('\n');
        let _ = writeln!(svg, r#"<rect width="{w:.0}" height="{h:.0}" fill="white"/>"#);

        if self.has_chart() && !self.labels.is_empty() {
            self.render_plot(&mut svg);
        }
        self.render_errors(&mut svg);

        svg.push_str("</svg>\n");
        svg
    }

    fn render_plot(&self, svg: &mut String) {
        let (w, h) = (self.width, self.height);
        let plot_width = w - 2.0 * PADDING;
        let plot_height = h - 2.0 * PADDING;

        let min_value = self
            .datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(f64::INFINITY, f64::min);
        let max_value = self
            .datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(f64::NEG_INFINITY, f64::max);
        if !min_value.is_finite() || !max_value.is_finite() {
            return;
        }

        let range = max_value - min_value;
        let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
        let scale_x = if self.labels.len() > 1 {
            plot_width / (self.labels.len() - 1) as f64
        } else {
            0.0
        };
        let y_of = |value: f64| h - PADDING - (value - min_value) * scale_y;
        let x_of = |i: usize| PADDING + i as f64 * scale_x;

        // Axes.
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="black"/>"#,
            x = PADDING,
            y1 = PADDING,
            y2 = h - PADDING,
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="black"/>"#,
            x1 = PADDING,
            x2 = w - PADDING,
            y = h - PADDING,
        );

        // Y extent labels.
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{y:.1}" font-size="9" text-anchor="end">{max_value:.2}</text>"#,
            x = PADDING - 4.0,
            y = PADDING + 4.0,
        );
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{y:.1}" font-size="9" text-anchor="end">{min_value:.2}</text>"#,
            x = PADDING - 4.0,
            y = h - PADDING + 4.0,
        );

        // Thinned x tick labels.
        let stride = self.labels.len().div_ceil(MAX_X_TICKS).max(1);
        for (i, label) in self.labels.iter().enumerate().step_by(stride) {
            let _ = writeln!(
                svg,
                r#"<text x="{x:.1}" y="{y:.1}" font-size="9" text-anchor="middle">{label}</text>"#,
                x = x_of(i),
                y = self.height - PADDING + 14.0,
            );
        }

        for dataset in &self.datasets {
            let points: Vec<String> = dataset
                .values
                .iter()
                .enumerate()
                .map(|(i, value)| format!("{:.1},{:.1}", x_of(i), y_of(*value)))
                .collect();
            if points.len() > 1 {
                let dash = match dataset.style.dash {
                    Some((on, off)) => format!(r#" stroke-dasharray="{on:.0},{off:.0}""#),
                    None => String::new(),
                };
                let _ = writeln!(
                    svg,
                    r#"<polyline points="{points}" fill="none" stroke="{color}" stroke-width="{width:.1}"{dash}/>"#,
                    points = points.join(" "),
                    color = dataset.style.color,
                    width = dataset.style.width,
                );
            }
            if dataset.style.point_radius > 0.0 {
                for (i, value) in dataset.values.iter().enumerate() {
                    let _ = writeln!(
                        svg,
                        r#"<circle cx="{x:.1}" cy="{y:.1}" r="{r:.1}" fill="{color}"/>"#,
                        x = x_of(i),
                        y = y_of(*value),
                        r = dataset.style.point_radius,
                        color = dataset.style.color,
                    );
                }
            }
        }

        // Legend, stacked top-left inside the plot area.
        for (i, dataset) in self.datasets.iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<text x="{x:.1}" y="{y:.1}" font-size="10" fill="{color}">{name}</text>"#,
                x = PADDING + 6.0,
                y = PADDING + 12.0 + i as f64 * 13.0,
                color = dataset.style.color,
                name = dataset.name,
            );
        }
    }

    fn render_errors(&self, svg: &mut String) {
        let mut line = 0usize;
        let mut slots: Vec<&str> = Vec::new();
        if let Some(message) = &self.range_error {
            slots.push(message.as_str());
        }
        if let Some(message) = &self.chart_error {
            slots.push(message.as_str());
        }
        for stat in StatKind::ALL {
            if let Some(message) = &self.stat_errors[stat.index()] {
                slots.push(message.as_str());
            }
        }
        for message in slots {
            let _ = writeln!(
                svg,
                r#"<text x="{x:.1}" y="{y:.1}" font-size="11" fill="firebrick">{message}</text>"#,
                x = PADDING,
                y = 14.0 + line as f64 * 14.0,
            );
            line += 1;
        }
    }
}

impl RenderSurface for SvgChartAdapter {
    fn draw_base_chart(
        &mut self,
        labels: &[String],
        name: &str,
        values: &[f64],
        style: &SeriesStyle,
    ) {
        self.labels = labels.to_vec();
        self.datasets = vec![Dataset {
            name: name.to_string(),
            values: values.to_vec(),
            style: style.clone(),
        }];
    }

    fn upsert_overlay(&mut self, name: &str, values: &[f64], style: &SeriesStyle) {
        self.datasets.retain(|d| d.name != name);
        self.datasets.push(Dataset {
            name: name.to_string(),
            values: values.to_vec(),
            style: style.clone(),
        });
    }

    fn remove_overlay(&mut self, name: &str) {
        self.datasets.retain(|d| d.name != name);
    }

    fn destroy_chart(&mut self) {
        self.labels.clear();
        self.datasets.clear();
    }

    fn show_range_error(&mut self, message: &str) {
        self.range_error = Some(message.to_string());
    }

    fn show_chart_error(&mut self, message: &str) {
        self.chart_error = Some(message.to_string());
    }

    fn show_stat_error(&mut self, stat: StatKind, message: &str) {
        self.stat_errors[stat.index()] = Some(message.to_string());
    }

    fn clear_stat_error(&mut self, stat: StatKind) {
        self.stat_errors[stat.index()] = None;
    }

    fn clear_errors(&mut self) {
        self.range_error = None;
        self.chart_error = None;
        self.stat_errors = Default::default();
    }
}
