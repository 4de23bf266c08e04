use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::error::PolarError;
use super::label::format_reynolds_label;
use super::model::{PolarDataset, ReynoldsBlock};

/// Largest accepted difference between the lift and drag AoA columns.
pub const AOA_TOLERANCE: f64 = 1e-6;

static REYNOLDS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^re(ynolds)?\s*=").expect("valid header regex"));

static REYNOLDS_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bre(?:ynolds)?\s*=\s*([^\s"()]+)"#).expect("valid token regex")
});

static GROUPED_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(?:,\d{3})+(?:\.\d+)?$").expect("valid digit-group regex")
});

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a JavaFoil-style `.dat` file: one read, then [`parse_polars`].
pub fn load_file(path: &Path) -> Result<PolarDataset, PolarError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => PolarError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PolarError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let dataset = parse_polars(&text)?;
    log::info!(
        "Loaded {} Reynolds zones ({} rows) from {}",
        dataset.len(),
        dataset.row_count(),
        path.display()
    );
    Ok(dataset)
}

/// Parse the contents of a polar file.
///
/// Expected layout (Tecplot-flavoured JavaFoil export):
///
/// ```text
/// TITLE = "DU91-W2-250"
/// VARIABLES = "AoA1" "C_L" "AoA2" "C_D"
/// ZONE T="Re=5E5"
///  -4.0  0.012  -4.0  0.0110
///   0.0  0.455   0.0  0.0098
/// ZONE T="Re=1E6"
/// ...
/// ```
///
/// A bare `Reynolds = 1000000` line is accepted as a zone header too.
/// Blocks come back in file order.
pub fn parse_polars(text: &str) -> Result<PolarDataset, PolarError> {
    let mut dataset = PolarDataset::default();
    let mut current: Option<ReynoldsBlock> = None;
    let mut skipped_before_zone = 0usize;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let upper = line.to_ascii_uppercase();
        if upper.starts_with("TITLE") {
            dataset.title = parse_title(line);
            continue;
        }
        if upper.starts_with("VARIABLES") {
            continue;
        }

        if upper.starts_with("ZONE") || REYNOLDS_HEADER.is_match(line) {
            if let Some(block) = current.take() {
                finish_block(&mut dataset, block);
            }
            current = Some(parse_zone_header(line, line_no)?);
            continue;
        }

        let Some(block) = current.as_mut() else {
            skipped_before_zone += 1;
            continue;
        };

        let [aoa_cl, cl, aoa_cd, cd] = parse_row(line, line_no, &block.label)?;
        if (aoa_cl - aoa_cd).abs() > AOA_TOLERANCE {
            return Err(PolarError::DataIntegrity {
                zone: block.label.clone(),
                row: block.len(),
                line: line_no,
                aoa_cl,
                aoa_cd,
            });
        }

        block.aoa_cl.push((aoa_cl, cl));
        block.aoa_cd.push((aoa_cd, cd));
    }

    if let Some(block) = current.take() {
        finish_block(&mut dataset, block);
    }

    if skipped_before_zone > 0 {
        log::warn!("Skipped {skipped_before_zone} data line(s) before the first ZONE header");
    }

    if dataset.is_empty() {
        return Err(PolarError::NoZones);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

fn finish_block(dataset: &mut PolarDataset, block: ReynoldsBlock) {
    if block.is_empty() {
        log::warn!("{} has no data rows", block.label);
    } else {
        log::debug!("Parsed {} with {} rows", block.label, block.len());
    }
    dataset.blocks.push(block);
}

/// `TITLE = "DU91-W2-250"` → `Some("DU91-W2-250")`.
fn parse_title(line: &str) -> Option<String> {
    let (_, value) = line.split_once('=')?;
    let value = value.trim().trim_matches('"').trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_zone_header(line: &str, line_no: usize) -> Result<ReynoldsBlock, PolarError> {
    let malformed = || PolarError::MalformedZoneHeader {
        line: line_no,
        text: line.to_string(),
    };

    let caps = REYNOLDS_TOKEN.captures(line).ok_or_else(malformed)?;
    // `Re=5E5, F=POINT` leaves a separator comma; `1,000,000` is digit grouping.
    let token = caps[1].trim_end_matches(',');
    let token = if GROUPED_DIGITS.is_match(token) {
        token.replace(',', "")
    } else {
        token.to_string()
    };
    let reynolds_number = token
        .parse::<f64>()
        .ok()
        .filter(|re| re.is_finite())
        .ok_or_else(malformed)?;

    Ok(ReynoldsBlock::new(
        reynolds_number,
        format_reynolds_label(&token),
    ))
}

/// Split a data row on whitespace and/or commas into exactly four floats.
fn parse_row(line: &str, line_no: usize, zone: &str) -> Result<[f64; 4], PolarError> {
    let malformed = |reason: String| PolarError::MalformedRow {
        zone: zone.to_string(),
        line: line_no,
        reason,
    };

    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .collect();

    if tokens.len() != 4 {
        return Err(malformed(format!(
            "expected 4 numeric fields (AoA, Cl, AoA, Cd), found {}",
            tokens.len()
        )));
    }

    let mut values = [0.0f64; 4];
    for (slot, (j, tok)) in values.iter_mut().zip(tokens.iter().enumerate()) {
        let value = tok
            .parse::<f64>()
            .map_err(|_| malformed(format!("field {} ('{tok}') is not a number", j + 1)))?;
        if !value.is_finite() {
            return Err(malformed(format!(
                "field {} ('{tok}') is not a finite number",
                j + 1
            )));
        }
        *slot = value;
    }
    Ok(values)
}
