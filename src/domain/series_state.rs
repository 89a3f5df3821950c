//! Mutable view state: current filter, base series, active overlays.

use crate::domain::overlay::ActiveOverlaySet;
use crate::domain::series::{DateRange, Generation, Series};

/// Load state of the base series for the current filter.
///
/// Also bounds backend load: a new base fetch is only issued through a
/// filter reset, so at most one is in flight per generation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SeriesLoad {
    #[default]
    Idle,
    /// Fetch issued, reply not yet applied.
    Pending,
    Loaded(Series),
    Failed(String),
}

/// Single source of truth for what should be on screen. Pure in-memory
/// state: it never calls the render surface or the data provider itself.
#[derive(Debug, Clone)]
pub struct SeriesState {
    pub ticker: String,
    pub range: DateRange,
    generation: Generation,
    pub load: SeriesLoad,
    pub overlays: ActiveOverlaySet,
}

impl SeriesState {
    pub fn new(ticker: String, range: DateRange) -> Self {
        Self {
            ticker,
            range,
            generation: Generation::default(),
            load: SeriesLoad::Idle,
            overlays: ActiveOverlaySet::default(),
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Installs a new filter. Bumps the generation so every reply still in
    /// flight for the previous filter is discarded on arrival, clears the
    /// series and turns every overlay off.
    pub fn reset(&mut self, ticker: String, range: DateRange) {
        self.ticker = ticker;
        self.range = range;
        self.generation = self.generation.next();
        self.load = SeriesLoad::Idle;
        self.overlays.clear();
    }

    pub fn mark_series_pending(&mut self) {
        self.load = SeriesLoad::Pending;
    }

    /// Installs a successfully fetched series. The caller is responsible
    /// for the generation check.
    pub fn set_series(&mut self, series: Series) {
        self.load = SeriesLoad::Loaded(series);
    }

    /// Marks the base series failed for the current filter. Overlays cannot
    /// outlive the chart they are drawn on, so they all turn off too.
    pub fn set_error(&mut self, message: String) {
        self.load = SeriesLoad::Failed(message);
        self.overlays.clear();
    }

    /// Labels of the loaded base series; empty while nothing is loaded.
    pub fn labels(&self) -> &[String] {
        match &self.load {
            SeriesLoad::Loaded(series) => &series.labels,
            _ => &[],
        }
    }
}
