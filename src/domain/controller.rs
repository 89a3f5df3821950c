//! View controller: bridges input events to state mutations and drawing.
//!
//! The controller owns the [`SeriesState`] and delegates overlay work to
//! the synchronizer in [`crate::domain::overlay`]. It assumes nothing about
//! the transport behind the ports: replies are whatever the host delivers,
//! in whatever order, and the generation stamp decides what still applies.

use crate::domain::overlay::{self, OverlayState};
use crate::domain::series::{DateRange, Series};
use crate::domain::series_state::SeriesState;
use crate::domain::stat::StatKind;
use crate::ports::data_port::{RemoteDataPort, ReplyEvent, SeriesReply, StatReply};
use crate::ports::render_port::{RenderSurface, SeriesStyle};
use chrono::NaiveDate;

pub const BASE_SERIES_LABEL: &str = "Close Price ($)";

fn base_style() -> SeriesStyle {
    SeriesStyle {
        color: "blue".to_string(),
        width: 2.0,
        dash: None,
        point_radius: 1.5,
    }
}

/// Orchestrates filter changes, stat toggles and provider replies over a
/// single mutable [`SeriesState`].
#[derive(Debug)]
pub struct ViewController {
    state: SeriesState,
    tickers: Vec<String>,
}

impl ViewController {
    /// One-time setup: remembers the selectable tickers and issues the
    /// initial fetch for the default filter.
    pub fn init(
        tickers: Vec<String>,
        default_ticker: String,
        default_range: DateRange,
        port: &mut dyn RemoteDataPort,
    ) -> Self {
        let mut controller = Self {
            state: SeriesState::new(default_ticker, default_range),
            tickers,
        };
        controller.fetch_series(port);
        controller
    }

    pub fn state(&self) -> &SeriesState {
        &self.state
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    fn fetch_series(&mut self, port: &mut dyn RemoteDataPort) {
        self.state.mark_series_pending();
        port.request_series(&self.state.ticker, self.state.range, self.state.generation());
    }

    /// Applies a new (ticker, range) filter.
    ///
    /// An inverted range is reported inline and changes nothing: no reset,
    /// no request. A valid filter resets all view state under a fresh
    /// generation, destroys the old chart and fetches the new base series.
    pub fn on_filter_change(
        &mut self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        port: &mut dyn RemoteDataPort,
        surface: &mut dyn RenderSurface,
    ) {
        let range = match DateRange::new(start, end) {
            Ok(range) => range,
            Err(err) => {
                surface.show_range_error(&err.to_string());
                return;
            }
        };

        self.state.reset(ticker.to_string(), range);
        surface.clear_errors();
        surface.destroy_chart();
        self.fetch_series(port);
    }

    /// Applies a base-series reply. Stale generations are dropped silently.
    pub fn on_series_reply(&mut self, reply: SeriesReply, surface: &mut dyn RenderSurface) {
        if reply.generation != self.state.generation() {
            return;
        }

        if let Some(message) = reply.error {
            self.state.set_error(message.clone());
            surface.destroy_chart();
            surface.show_chart_error(&message);
            return;
        }

        let series = Series::new(reply.labels, reply.values);
        surface.draw_base_chart(&series.labels, BASE_SERIES_LABEL, &series.values, &base_style());
        self.state.set_series(series);

        // A stat reply can outrun the base-series reply, in which case its
        // overlay settled over an empty label sequence. Redraw those across
        // the freshly installed labels.
        for (stat, entry) in self.state.overlays.iter() {
            if let OverlayState::Settled(value) = entry {
                overlay::draw_overlay(stat, value, self.state.labels(), surface);
            }
        }
    }

    /// Delegates a stat toggle click to the overlay synchronizer, using the
    /// current ticker, range and generation.
    pub fn on_stat_toggle(
        &mut self,
        stat: StatKind,
        port: &mut dyn RemoteDataPort,
        surface: &mut dyn RenderSurface,
    ) {
        overlay::toggle_stat(&mut self.state, stat, port, surface);
    }

    /// Delegates a stat reply to the overlay synchronizer.
    pub fn on_stat_reply(&mut self, reply: StatReply, surface: &mut dyn RenderSurface) {
        overlay::apply_stat_reply(&mut self.state, reply, surface);
    }

    /// Routes a host-delivered reply event to the matching handler.
    pub fn on_reply(&mut self, event: ReplyEvent, surface: &mut dyn RenderSurface) {
        match event {
            ReplyEvent::Series(reply) => self.on_series_reply(reply, surface),
            ReplyEvent::Stat(reply) => self.on_stat_reply(reply, surface),
        }
    }
}
