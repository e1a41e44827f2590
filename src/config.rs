use std::path::PathBuf;

use clap::Parser;

use crate::data::report::AnalysisConfig;

/// Salary statistics dashboard for data-related jobs.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Salary table to load (.csv, .json or .parquet).
    #[arg(long, env = "SALARY_DASHBOARD_DATA", default_value = "dados-imersao-final.csv")]
    pub data: PathBuf,

    /// Number of roles in the average-salary ranking.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub top_roles: u16,

    /// Number of buckets in the salary histogram.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..))]
    pub histogram_bins: u16,
}

impl Config {
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            top_roles: self.top_roles as usize,
            histogram_bins: self.histogram_bins as usize,
        }
    }
}
