use std::path::{Path, PathBuf};

use clap::Parser;

use crate::data::model::PolarDataset;
use crate::figure::{DEFAULT_DPI, MAX_DPI};

/// Plot lift and drag coefficients versus angle of attack for every
/// Reynolds number in a JavaFoil-style `.dat` file.
#[derive(Parser, Debug, Clone)]
#[command(name = "polar-plot", version, about, long_about = None)]
pub struct Cli {
    /// Path to the .dat file with Cl and Cd data
    #[arg(long, default_value = "ClCdDU91-W2-250.dat")]
    pub data: PathBuf,

    /// Save the figure here (.png, .jpg, .bmp or .svg)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip the interactive window (useful in headless environments)
    #[arg(long)]
    pub no_show: bool,

    /// Image resolution in dots per inch when saving
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI)))]
    pub dpi: u32,

    /// Figure title (defaults to the file's TITLE line)
    #[arg(long)]
    pub title: Option<String>,

    /// Also write the parsed data as .csv or .json
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// `--title`, else the file's `TITLE`, else one derived from the file name.
    pub fn figure_title(&self, dataset: &PolarDataset) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        if let Some(title) = &dataset.title {
            return format!("{title} Airfoil Polars");
        }
        default_title(&self.data)
    }
}

fn default_title(path: &Path) -> String {
    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => format!("{} Airfoil Polars", stem.trim_start_matches("ClCd")),
        None => "Airfoil Polars".to_string(),
    }
}
