//! Overlay synchronization: reconciling stat toggles with asynchronous,
//! possibly stale, provider replies.
//!
//! This module is the only mutator of [`ActiveOverlaySet`]. Every outbound
//! stat request is stamped with the current generation; a reply whose stamp
//! no longer matches is dropped without touching state, which is what keeps
//! the overlay set consistent when the user changes filters while requests
//! are still in flight.

use crate::domain::series_state::SeriesState;
use crate::domain::stat::{OverlayValue, StatKind, LABEL_STD_LOWER, LABEL_STD_UPPER};
use crate::ports::data_port::{RemoteDataPort, StatReply};
use crate::ports::render_port::{RenderSurface, SeriesStyle};

/// Per-stat overlay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OverlayState {
    #[default]
    Off,
    /// Toggled on, request in flight.
    Pending,
    /// Toggled on, value drawn.
    Settled(OverlayValue),
}

impl OverlayState {
    pub fn is_on(&self) -> bool {
        !matches!(self, OverlayState::Off)
    }
}

/// Toggle state for every stat. Entries never carry a value fetched for a
/// different (ticker, range) context: a filter reset clears them all.
#[derive(Debug, Clone, Default)]
pub struct ActiveOverlaySet {
    states: [OverlayState; StatKind::ALL.len()],
}

impl ActiveOverlaySet {
    pub fn get(&self, stat: StatKind) -> OverlayState {
        self.states[stat.index()]
    }

    pub(crate) fn set(&mut self, stat: StatKind, state: OverlayState) {
        self.states[stat.index()] = state;
    }

    pub(crate) fn clear(&mut self) {
        self.states = [OverlayState::Off; StatKind::ALL.len()];
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, OverlayState)> + '_ {
        StatKind::ALL.iter().map(move |&stat| (stat, self.get(stat)))
    }
}

/// Handles a user click on a stat toggle.
///
/// A stat that is off turns on pending and issues exactly one request,
/// stamped with the current generation; this is the only transition that
/// talks to the provider, so at most one request per stat is ever in
/// flight. A stat that is on (pending or settled) turns off and removes its
/// datasets locally, with no provider round trip.
pub fn toggle_stat(
    state: &mut SeriesState,
    stat: StatKind,
    port: &mut dyn RemoteDataPort,
    surface: &mut dyn RenderSurface,
) {
    match state.overlays.get(stat) {
        OverlayState::Off => {
            state.overlays.set(stat, OverlayState::Pending);
            surface.clear_stat_error(stat);
            port.request_stat(&state.ticker, state.range, stat, state.generation());
        }
        OverlayState::Pending | OverlayState::Settled(_) => {
            state.overlays.set(stat, OverlayState::Off);
            for label in stat.dataset_labels() {
                surface.remove_overlay(label);
            }
        }
    }
}

/// Reconciles a stat reply against current state.
///
/// Discard rules, in order: a stale generation means the filter changed
/// while the request was in flight and the context it was issued for no
/// longer exists; a stat that is off means the user toggled it off before
/// the reply arrived. Neither case mutates anything, and a discarded value
/// never resurrects the "on" state.
pub fn apply_stat_reply(
    state: &mut SeriesState,
    reply: StatReply,
    surface: &mut dyn RenderSurface,
) {
    if reply.generation != state.generation() {
        return;
    }
    if !state.overlays.get(reply.stat).is_on() {
        return;
    }

    if let Some(message) = reply.error {
        // e.g. std dev over a single price point: force the toggle back
        // off, drop any dataset it had drawn and report in the stat's own
        // slot. The base chart and the other overlays are untouched.
        state.overlays.set(reply.stat, OverlayState::Off);
        for label in reply.stat.dataset_labels() {
            surface.remove_overlay(label);
        }
        surface.show_stat_error(reply.stat, &message);
        return;
    }

    let value = match (reply.stat, reply.upper, reply.lower) {
        (StatKind::Std, Some(upper), Some(lower)) => OverlayValue::Band { upper, lower },
        (StatKind::Mean | StatKind::Median, Some(level), _) => OverlayValue::Level(level),
        _ => {
            state.overlays.set(reply.stat, OverlayState::Off);
            surface.show_stat_error(reply.stat, "malformed stat reply");
            return;
        }
    };

    state.overlays.set(reply.stat, OverlayState::Settled(value));
    draw_overlay(reply.stat, value, state.labels(), surface);
}

/// Draws a settled stat as constant-value line(s) spanning the base series
/// labels, replacing any prior dataset with the same label so at most one
/// dataset per label exists.
pub(crate) fn draw_overlay(
    stat: StatKind,
    value: OverlayValue,
    labels: &[String],
    surface: &mut dyn RenderSurface,
) {
    match value {
        OverlayValue::Level(level) => {
            let name = stat.dataset_labels()[0];
            surface.upsert_overlay(name, &vec![level; labels.len()], &level_style(stat));
        }
        OverlayValue::Band { upper, lower } => {
            surface.upsert_overlay(LABEL_STD_UPPER, &vec![upper; labels.len()], &band_style("orange"));
            surface.upsert_overlay(LABEL_STD_LOWER, &vec![lower; labels.len()], &band_style("red"));
        }
    }
}

fn level_style(stat: StatKind) -> SeriesStyle {
    let color = match stat {
        StatKind::Mean => "green",
        StatKind::Median => "purple",
        StatKind::Std => "orange",
    };
    SeriesStyle {
        color: color.to_string(),
        width: 2.0,
        dash: Some((7.0, 5.0)),
        point_radius: 0.0,
    }
}

fn band_style(color: &str) -> SeriesStyle {
    SeriesStyle {
        color: color.to_string(),
        width: 2.0,
        dash: Some((6.0, 4.0)),
        point_radius: 0.0,
    }
}
