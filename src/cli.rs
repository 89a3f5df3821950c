//! CLI definition and dispatch.

use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_provider_adapter::CsvProviderAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::domain::config_validation::{
    parse_tickers, validate_app_config, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH,
    DEFAULT_WINDOW_DAYS,
};
use crate::domain::controller::ViewController;
use crate::domain::error::StatchartError;
use crate::domain::series::DateRange;
use crate::domain::stat::StatKind;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "statchart", about = "Stock price charts with statistical overlays")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a price chart to an SVG file
    Render {
        #[arg(short, long)]
        config: PathBuf,
        /// Ticker to plot; defaults to the first configured ticker with data
        #[arg(long)]
        ticker: Option<String>,
        /// Range start (YYYY-MM-DD); defaults to the configured window
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Range end (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Comma-separated overlays to draw (mean,median,std)
        #[arg(long)]
        stats: Option<String>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List configured tickers that have data on disk
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Render {
            config,
            ticker,
            start,
            end,
            stats,
            output,
        } => run_render(
            &config,
            ticker.as_deref(),
            start,
            end,
            stats.as_deref(),
            &output,
        ),
        Command::ListTickers { config } => run_list_tickers(&config),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, StatchartError> {
    FileConfigAdapter::from_file(path).map_err(|e| StatchartError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Configured tickers that actually have a data file, warning about the
/// rest on stderr.
pub fn available_tickers(
    config: &dyn ConfigPort,
    provider: &CsvProviderAdapter,
) -> Result<Vec<String>, StatchartError> {
    let raw = config
        .get_string("app", "tickers")
        .ok_or_else(|| StatchartError::ConfigMissing {
            section: "app".to_string(),
            key: "tickers".to_string(),
        })?;

    let mut tickers = Vec::new();
    for ticker in parse_tickers(&raw)? {
        if provider.has_data(&ticker) {
            tickers.push(ticker);
        } else {
            eprintln!("Warning: no data file for {ticker}, skipping");
        }
    }
    Ok(tickers)
}

/// Parses a comma-separated overlay list; each stat at most once, since a
/// repeated toggle would turn the overlay straight back off.
pub fn parse_stat_list(input: &str) -> Result<Vec<StatKind>, StatchartError> {
    let mut stats = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(StatchartError::InvalidStatList {
                reason: "empty entry in stat list".to_string(),
            });
        }
        let stat: StatKind = trimmed.parse()?;
        if stats.contains(&stat) {
            return Err(StatchartError::InvalidStatList {
                reason: format!("duplicate stat: {stat}"),
            });
        }
        stats.push(stat);
    }
    Ok(stats)
}

fn run_render(
    config_path: &Path,
    ticker_arg: Option<&str>,
    start_arg: Option<NaiveDate>,
    end_arg: Option<NaiveDate>,
    stats_arg: Option<&str>,
    output: &Path,
) -> Result<(), StatchartError> {
    let config = load_config(config_path)?;
    validate_app_config(&config)?;

    let data_dir = config
        .get_string("data", "dir")
        .ok_or_else(|| StatchartError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        })?;
    let mut provider = CsvProviderAdapter::new(PathBuf::from(data_dir));
    let tickers = available_tickers(&config, &provider)?;

    let ticker = match ticker_arg {
        Some(t) => {
            let t = t.to_uppercase();
            if !tickers.contains(&t) {
                return Err(StatchartError::UnknownTicker { ticker: t });
            }
            t
        }
        None => tickers
            .first()
            .cloned()
            .ok_or_else(|| StatchartError::Data {
                reason: "no configured ticker has a data file".to_string(),
            })?,
    };

    let window_days = config.get_int("app", "default_window_days", DEFAULT_WINDOW_DAYS);
    let end = end_arg.unwrap_or_else(|| Local::now().date_naive());
    let start = start_arg.unwrap_or(end - Duration::days(window_days));
    let range = DateRange::new(start, end)?;

    let stats = match stats_arg {
        Some(list) => parse_stat_list(list)?,
        None => Vec::new(),
    };

    let width = config.get_int("chart", "width", DEFAULT_CHART_WIDTH);
    let height = config.get_int("chart", "height", DEFAULT_CHART_HEIGHT);
    let mut surface = SvgChartAdapter::new(width as f64, height as f64);

    let mut controller = ViewController::init(tickers, ticker, range, &mut provider);
    drain_replies(&mut controller, &mut provider, &mut surface);

    for stat in stats {
        controller.on_stat_toggle(stat, &mut provider, &mut surface);
    }
    drain_replies(&mut controller, &mut provider, &mut surface);

    surface.write_svg(output)?;
    println!("wrote {}", output.display());
    Ok(())
}

/// Delivers queued provider replies to the controller, oldest first.
fn drain_replies(
    controller: &mut ViewController,
    provider: &mut CsvProviderAdapter,
    surface: &mut SvgChartAdapter,
) {
    while let Some(event) = provider.take_reply() {
        controller.on_reply(event, surface);
    }
}

fn run_list_tickers(config_path: &Path) -> Result<(), StatchartError> {
    let config = load_config(config_path)?;
    validate_app_config(&config)?;

    let data_dir = config
        .get_string("data", "dir")
        .ok_or_else(|| StatchartError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        })?;
    let provider = CsvProviderAdapter::new(PathBuf::from(data_dir));

    for ticker in available_tickers(&config, &provider)? {
        println!("{ticker}");
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), StatchartError> {
    let config = load_config(config_path)?;
    validate_app_config(&config)?;
    println!("{} is valid", config_path.display());
    Ok(())
}
