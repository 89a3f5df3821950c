//! Statistic overlay kinds and the chart datasets they draw.

use crate::domain::error::StatchartError;
use std::fmt;
use std::str::FromStr;

pub const LABEL_MEAN: &str = "Mean";
pub const LABEL_MEDIAN: &str = "Median";
pub const LABEL_STD_UPPER: &str = "Mean + Std Dev";
pub const LABEL_STD_LOWER: &str = "Mean - Std Dev";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Mean,
    Median,
    Std,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Mean, StatKind::Median, StatKind::Std];

    /// Stable index, used to key fixed per-stat slots.
    pub fn index(self) -> usize {
        match self {
            StatKind::Mean => 0,
            StatKind::Median => 1,
            StatKind::Std => 2,
        }
    }

    /// Dataset label(s) this stat draws on the chart. `Std` draws a band of
    /// two constant lines, the others a single line.
    pub fn dataset_labels(self) -> &'static [&'static str] {
        match self {
            StatKind::Mean => &[LABEL_MEAN],
            StatKind::Median => &[LABEL_MEDIAN],
            StatKind::Std => &[LABEL_STD_UPPER, LABEL_STD_LOWER],
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatKind::Mean => "mean",
            StatKind::Median => "median",
            StatKind::Std => "std",
        };
        write!(f, "{name}")
    }
}

impl FromStr for StatKind {
    type Err = StatchartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(StatKind::Mean),
            "median" => Ok(StatKind::Median),
            "std" => Ok(StatKind::Std),
            _ => Err(StatchartError::UnknownStat {
                name: s.to_string(),
            }),
        }
    }
}

/// Value(s) carried by a settled overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayValue {
    /// A single constant line (mean, median).
    Level(f64),
    /// Two constant lines around the mean (std-dev band).
    Band { upper: f64, lower: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_stats() {
        assert_eq!("mean".parse::<StatKind>().unwrap(), StatKind::Mean);
        assert_eq!("MEDIAN".parse::<StatKind>().unwrap(), StatKind::Median);
        assert_eq!("Std".parse::<StatKind>().unwrap(), StatKind::Std);
    }

    #[test]
    fn parse_rejects_unknown_stat() {
        let err = "variance".parse::<StatKind>().unwrap_err();
        assert!(matches!(err, StatchartError::UnknownStat { .. }));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for stat in StatKind::ALL {
            assert_eq!(stat.to_string().parse::<StatKind>().unwrap(), stat);
        }
    }

    #[test]
    fn std_draws_two_datasets_others_one() {
        assert_eq!(StatKind::Mean.dataset_labels(), &[LABEL_MEAN]);
        assert_eq!(StatKind::Median.dataset_labels(), &[LABEL_MEDIAN]);
        assert_eq!(
            StatKind::Std.dataset_labels(),
            &[LABEL_STD_UPPER, LABEL_STD_LOWER]
        );
    }

    #[test]
    fn indices_are_distinct_and_dense() {
        let mut seen = [false; StatKind::ALL.len()];
        for stat in StatKind::ALL {
            assert!(!seen[stat.index()]);
            seen[stat.index()] = true;
        }
    }
}
