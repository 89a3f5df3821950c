//! CSV-backed data provider adapter.
//!
//! Serves provider requests from per-ticker CSV files on disk. Replies are
//! queued rather than returned: the host drains the queue and delivers each
//! reply to the controller as a separate event, which preserves the
//! out-of-band reply discipline in a single-threaded process. Failures are
//! reported inside the reply payload, matching the wire contract.

use crate::domain::series::{DateRange, Generation};
use crate::domain::stat::StatKind;
use crate::domain::stats;
use crate::ports::data_port::{RemoteDataPort, ReplyEvent, SeriesReply, StatReply};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

pub const ERR_NO_DATA: &str = "No data available";
pub const ERR_EMPTY_RANGE: &str = "No data for selected range";
pub const ERR_STD_ONE_POINT: &str = "Only one price point, two required for std dev.";

const LABEL_DATE_FORMAT: &str = "%m/%d/%Y";

pub struct CsvProviderAdapter {
    base_path: PathBuf,
    pending: VecDeque<ReplyEvent>,
}

impl CsvProviderAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            pending: VecDeque::new(),
        }
    }

    pub fn has_data(&self, ticker: &str) -> bool {
        self.csv_path(ticker).exists()
    }

    /// Next queued reply, oldest first.
    pub fn take_reply(&mut self) -> Option<ReplyEvent> {
        self.pending.pop_front()
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }

    /// Closing prices inside `range`, sorted by date. Column positions are
    /// taken from the header row, so extra columns are tolerated.
    fn load_closes(&self, ticker: &str, range: DateRange) -> Result<Vec<(NaiveDate, f64)>, String> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Err(ERR_NO_DATA.to_string());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| format!("CSV parse error: {}", e))?
            .clone();
        let date_col = headers
            .iter()
            .position(|h| h == "Date")
            .ok_or_else(|| "missing Date column".to_string())?;
        let close_col = headers
            .iter()
            .position(|h| h == "Close")
            .ok_or_else(|| "missing Close column".to_string())?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| format!("CSV parse error: {}", e))?;

            let date_str = record
                .get(date_col)
                .ok_or_else(|| "missing date value".to_string())?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map_err(|e| format!("invalid date format: {}", e))?;
            if !range.contains(date) {
                continue;
            }

            let close: f64 = record
                .get(close_col)
                .ok_or_else(|| "missing close value".to_string())?
                .parse()
                .map_err(|e| format!("invalid close value: {}", e))?;

            rows.push((date, close));
        }

        rows.sort_by_key(|(date, _)| *date);
        Ok(rows)
    }
}

impl RemoteDataPort for CsvProviderAdapter {
    fn request_series(&mut self, ticker: &str, range: DateRange, generation: Generation) {
        let reply = match self.load_closes(ticker, range) {
            Err(message) => error_series_reply(message, generation),
            Ok(rows) if rows.is_empty() => {
                error_series_reply(ERR_EMPTY_RANGE.to_string(), generation)
            }
            Ok(rows) => {
                let labels = rows
                    .iter()
                    .map(|(date, _)| date.format(LABEL_DATE_FORMAT).to_string())
                    .collect();
                let values = rows.iter().map(|(_, close)| *close).collect();
                SeriesReply {
                    labels,
                    values,
                    error: None,
                    generation,
                }
            }
        };
        self.pending.push_back(ReplyEvent::Series(reply));
    }

    fn request_stat(
        &mut self,
        ticker: &str,
        range: DateRange,
        stat: StatKind,
        generation: Generation,
    ) {
        let reply = match self.load_closes(ticker, range) {
            Err(message) => error_stat_reply(stat, message, generation),
            Ok(rows) => {
                let closes: Vec<f64> = rows.iter().map(|(_, close)| *close).collect();
                compute_stat_reply(stat, &closes, generation)
            }
        };
        self.pending.push_back(ReplyEvent::Stat(reply));
    }
}

fn compute_stat_reply(stat: StatKind, closes: &[f64], generation: Generation) -> StatReply {
    match stat {
        StatKind::Mean => match stats::mean(closes) {
            Some(value) => level_stat_reply(stat, value, generation),
            None => error_stat_reply(stat, ERR_EMPTY_RANGE.to_string(), generation),
        },
        StatKind::Median => match stats::median(closes) {
            Some(value) => level_stat_reply(stat, value, generation),
            None => error_stat_reply(stat, ERR_EMPTY_RANGE.to_string(), generation),
        },
        StatKind::Std => {
            if closes.len() == 1 {
                return error_stat_reply(stat, ERR_STD_ONE_POINT.to_string(), generation);
            }
            match (stats::mean(closes), stats::sample_std(closes)) {
                (Some(mean), Some(std)) => StatReply {
                    stat,
                    upper: Some(mean + std),
                    lower: Some(mean - std),
                    error: None,
                    generation,
                },
                _ => error_stat_reply(stat, ERR_EMPTY_RANGE.to_string(), generation),
            }
        }
    }
}

fn level_stat_reply(stat: StatKind, value: f64, generation: Generation) -> StatReply {
    StatReply {
        stat,
        upper: Some(value),
        lower: None,
        error: None,
        generation,
    }
}

fn error_stat_reply(stat: StatKind, message: String, generation: Generation) -> StatReply {
    StatReply {
        stat,
        upper: None,
        lower: None,
        error: Some(message),
        generation,
    }
}

fn error_series_reply(message: String, generation: Generation) -> SeriesReply {
    SeriesReply {
        labels: Vec::new(),
        values: Vec::new(),
        error: Some(message),
        generation,
    }
}
