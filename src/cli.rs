use std::path::PathBuf;

use clap::Parser;

use exhibition_explorer::data::filter::FilterState;

/// Explore historical art exhibition records.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Exhibition records (.csv, .json or .parquet)
    #[arg(default_value = "data/data.csv")]
    pub data_file: PathBuf,

    /// Initial value of the maximum-age filter; empty for no limit
    #[arg(long, default_value = "100")]
    pub max_age: String,
}

impl Args {
    pub fn initial_filters(&self) -> FilterState {
        FilterState {
            max_age: self.max_age.clone(),
            ..FilterState::default()
        }
    }
}
