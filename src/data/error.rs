use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading a polar data file.
#[derive(Debug, Error)]
pub enum PolarError {
    #[error("data file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: zone header has no numeric Reynolds number: {text}")]
    MalformedZoneHeader { line: usize, text: String },

    #[error("{zone}, line {line}: {reason}")]
    MalformedRow {
        zone: String,
        line: usize,
        reason: String,
    },

    /// The two angle-of-attack columns of a row disagree.
    #[error(
        "{zone}, row {row} (line {line}): mismatched angle-of-attack columns \
         ({aoa_cl} for lift vs {aoa_cd} for drag)"
    )]
    DataIntegrity {
        zone: String,
        row: usize,
        line: usize,
        aoa_cl: f64,
        aoa_cd: f64,
    },

    #[error("no ZONE data found; check the file format")]
    NoZones,
}
