//! Remote data provider port.

use crate::domain::series::{DateRange, Generation};
use crate::domain::stat::StatKind;

/// Capability to send a named request to a data provider.
///
/// Calls are fire-and-forget: they return immediately and the result
/// arrives later as a [`ReplyEvent`] delivered by the host, echoing the
/// generation the request was stamped with. In-flight requests are never
/// cancelled at the transport level; a stale reply is discarded on arrival
/// instead.
pub trait RemoteDataPort {
    fn request_series(&mut self, ticker: &str, range: DateRange, generation: Generation);

    fn request_stat(
        &mut self,
        ticker: &str,
        range: DateRange,
        stat: StatKind,
        generation: Generation,
    );
}

/// Reply to [`RemoteDataPort::request_series`]. On success `labels` and
/// `values` have equal length; on failure `error` carries the message to
/// show in the chart's error slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesReply {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub error: Option<String>,
    pub generation: Generation,
}

/// Reply to [`RemoteDataPort::request_stat`]. `lower` is only set for the
/// standard-deviation band.
#[derive(Debug, Clone, PartialEq)]
pub struct StatReply {
    pub stat: StatKind,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
    pub error: Option<String>,
    pub generation: Generation,
}

/// Out-of-band reply delivered by the host to the view controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyEvent {
    Series(SeriesReply),
    Stat(StatReply),
}
