//! Base series and filter types.

use crate::domain::error::StatchartError;
use chrono::NaiveDate;

/// Inclusive date window selected by the user.
///
/// Only constructible through [`DateRange::new`], so an inverted range can
/// never reach a data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, StatchartError> {
        if start > end {
            return Err(StatchartError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One fetched price series: the provider's formatted date labels and the
/// closing price at each label. Always replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Monotonic counter stamped onto every outbound request. A reply is only
/// applied if its stamp still equals the current generation; a filter change
/// bumps the generation, so replies issued for the old filter are discarded
/// on arrival no matter when they land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}
