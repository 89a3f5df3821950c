//! Concrete adapter implementations for ports.

pub mod csv_provider_adapter;
pub mod file_config_adapter;
pub mod svg_chart_adapter;
