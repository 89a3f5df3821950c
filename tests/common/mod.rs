#![allow(dead_code)]

use chrono::NaiveDate;
use statchart::domain::series::{DateRange, Generation};
use statchart::domain::stat::StatKind;
use statchart::ports::data_port::{RemoteDataPort, SeriesReply, StatReply};
use statchart::ports::render_port::{RenderSurface, SeriesStyle};

/// Captures outbound requests without answering them; tests deliver replies
/// by hand to exercise ordering, races and staleness.
#[derive(Debug, Default)]
pub struct ScriptedDataPort {
    pub series_requests: Vec<(String, DateRange, Generation)>,
    pub stat_requests: Vec<(String, DateRange, StatKind, Generation)>,
}

impl ScriptedDataPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_count(&self) -> usize {
        self.series_requests.len() + self.stat_requests.len()
    }

    pub fn last_series_generation(&self) -> Generation {
        self.series_requests.last().expect("no series request").2
    }

    pub fn last_stat_request(&self) -> &(String, DateRange, StatKind, Generation) {
        self.stat_requests.last().expect("no stat request")
    }

    pub fn last_stat_generation(&self) -> Generation {
        self.last_stat_request().3
    }
}

impl RemoteDataPort for ScriptedDataPort {
    fn request_series(&mut self, ticker: &str, range: DateRange, generation: Generation) {
        self.series_requests
            .push((ticker.to_string(), range, generation));
    }

    fn request_stat(
        &mut self,
        ticker: &str,
        range: DateRange,
        stat: StatKind,
        generation: Generation,
    ) {
        self.stat_requests
            .push((ticker.to_string(), range, stat, generation));
    }
}

#[derive(Debug, Clone)]
pub struct RecordedDataset {
    pub name: String,
    pub values: Vec<f64>,
    pub style: SeriesStyle,
}

/// In-memory render surface mirroring what would be on screen.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub labels: Vec<String>,
    pub datasets: Vec<RecordedDataset>,
    pub destroyed: usize,
    pub range_error: Option<String>,
    pub chart_error: Option<String>,
    pub stat_errors: [Option<String>; 3],
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self, name: &str) -> Option<&RecordedDataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn dataset_count(&self, name: &str) -> usize {
        self.datasets.iter().filter(|d| d.name == name).count()
    }

    pub fn stat_error(&self, stat: StatKind) -> Option<&str> {
        self.stat_errors[stat.index()].as_deref()
    }
}

impl RenderSurface for RecordingSurface {
    fn draw_base_chart(
        &mut self,
        labels: &[String],
        name: &str,
        values: &[f64],
        style: &SeriesStyle,
    ) {
        self.labels = labels.to_vec();
        self.datasets = vec![RecordedDataset {
            name: name.to_string(),
            values: values.to_vec(),
            style: style.clone(),
        }];
    }

    fn upsert_overlay(&mut self, name: &str, values: &[f64], style: &SeriesStyle) {
        self.datasets.retain(|d| d.name != name);
        self.datasets.push(RecordedDataset {
            name: name.to_string(),
            values: values.to_vec(),
            style: style.clone(),
        });
    }

    fn remove_overlay(&mut self, name: &str) {
        self.datasets.retain(|d| d.name != name);
    }

    fn destroy_chart(&mut self) {
        self.destroyed += 1;
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

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(
        NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
    )
    .unwrap()
}

pub fn series_ok(labels: &[&str], values: &[f64], generation: Generation) -> SeriesReply {
    SeriesReply {
        labels: labels.iter().map(|l| l.to_string()).collect(),
        values: values.to_vec(),
        error: None,
        generation,
    }
}

pub fn series_err(message: &str, generation: Generation) -> SeriesReply {
    SeriesReply {
        labels: Vec::new(),
        values: Vec::new(),
        error: Some(message.to_string()),
        generation,
    }
}

pub fn stat_ok(
    stat: StatKind,
    upper: f64,
    lower: Option<f64>,
    generation: Generation,
) -> StatReply {
    StatReply {
        stat,
        upper: Some(upper),
        lower,
        error: None,
        generation,
    }
}

pub fn stat_err(stat: StatKind, message: &str, generation: Generation) -> StatReply {
    StatReply {
        stat,
        upper: None,
        lower: None,
        error: Some(message.to_string()),
        generation,
    }
}
