//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::data::model::SiteFilter;

/// SpaceX Launch Records Dashboard
///
/// Pie chart of successful launches per site and a payload-vs-outcome
/// scatter chart, filtered by launch site and payload range.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(
        value_name = "FILE",
        default_value = "spacex_launch_dash.csv",
        env = "SPACEX_DASH_DATA"
    )]
    pub data: PathBuf,

    /// Initially selected launch site, or ALL
    #[arg(long, default_value = SiteFilter::ALL, env = "SPACEX_DASH_SITE")]
    pub site: String,

    /// Step of the payload range sliders, in kg (0 for continuous)
    #[arg(long, default_value_t = 1000.0, value_name = "KG")]
    pub slider_step: f64,
}

impl Args {
    pub fn site_filter(&self) -> SiteFilter {
        SiteFilter::parse(&self.site)
    }
}
