use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::model::PolarDataset;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export extension for {} (use .csv or .json)", path.display())]
    Unsupported { path: PathBuf },

    #[error("writing {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing CSV")]
    Csv(#[from] csv::Error),

    #[error("encoding JSON")]
    Json(#[from] serde_json::Error),
}

/// One flat CSV record: a single row of one Reynolds block.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    reynolds_number: f64,
    label: &'a str,
    aoa: f64,
    cl: f64,
    cd: f64,
}

/// Write the parsed dataset to `path`; format follows the extension.
///
/// * `.csv`  – flat table `reynolds_number,label,aoa,cl,cd`, file order
/// * `.json` – the whole dataset, pretty-printed
pub fn export_dataset(dataset: &PolarDataset, path: &Path) -> Result<(), ExportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(dataset, path)?,
        "json" => write_json(dataset, path)?,
        _ => {
            return Err(ExportError::Unsupported {
                path: path.to_path_buf(),
            })
        }
    }

    log::info!("Exported {} rows to {}", dataset.row_count(), path.display());
    Ok(())
}

fn write_csv(dataset: &PolarDataset, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for block in &dataset.blocks {
        for (&(aoa, cl), &(_, cd)) in block.aoa_cl.iter().zip(block.aoa_cd.iter()) {
            writer.serialize(CsvRecord {
                reynolds_number: block.reynolds_number,
                label: &block.label,
                aoa,
                cl,
                cd,
            })?;
        }
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_json(dataset: &PolarDataset, path: &Path) -> Result<(), ExportError> {
    let text = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, text).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_polars;

    const SAMPLE: &str = "ZONE T=\"Re=5E5\"\n0 0.4 0 0.01\n2 0.6 2 0.012\nZONE T=\"Re=1E6\"\n0 0.45 0 0.009\n";

    #[test]
    fn csv_has_one_record_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polars.csv");
        let ds = parse_polars(SAMPLE).unwrap();

        export_dataset(&ds, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "reynolds_number,label,aoa,cl,cd");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("1000000.0,"), "{}", lines[3]);
    }

    #[test]
    fn json_keeps_block_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polars.json");
        let ds = parse_polars(SAMPLE).unwrap();

        export_dataset(&ds, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let blocks = value["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["label"], "Re = 5×10^5");
        assert_eq!(blocks[0]["aoa_cl"][1][1], 0.6);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let ds = parse_polars(SAMPLE).unwrap();
        let err = export_dataset(&ds, Path::new("out.xlsx")).unwrap_err();
        assert!(matches!(err, ExportError::Unsupported { .. }));
    }
}
