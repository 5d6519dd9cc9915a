use std::fs;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ExtractError;
use crate::extract::round::round_decimal_place;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^https?://[^ "]+&output=tsv$"#).unwrap());
static TSV_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.tsv$").unwrap());

const REQUIRED_COLUMNS: [&str; 7] = [
    "compoundName",
    "compoundType",
    "mzValue",
    "retentionTime",
    "msLevel",
    "internalStandard",
    "product",
];

/// Target m/z values resolved from a table, with the m/z span they cover.
#[derive(Debug, Clone, Default)]
pub struct TargetList {
    /// Ascending, deduplicated, rounded when rounding is configured.
    pub values: Vec<f64>,
    pub min_mz: f64,
    pub max_mz: f64,
}

/// Resolves the target list from a local `.tsv` path or a tsv-producing URL.
///
/// Rows whose m/z cell does not parse as a finite number are dropped. When
/// `ms_level_filter` is given, rows whose msLevel is absent or not listed are
/// dropped too.
pub fn resolve_target_list(
    source: &str,
    ms_level_filter: Option<&[u32]>,
    mz_tolerance: f64,
    decimal_places: Option<u32>,
) -> Result<TargetList, ExtractError> {
    if !mz_tolerance.is_finite() {
        return Err(ExtractError::InvalidArgument(
            "mzTolerance is not a finite number".to_string(),
        ));
    }
    let text = read_source(source)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| ExtractError::InvalidFormat(format!("target file headers: {e}")))?
        .clone();
    let mut records = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ExtractError::InvalidFormat(format!("target file row: {e}")))?;
        records.push(record);
    }
    if records.is_empty() {
        return Err(ExtractError::NoData("Target m/z data not found".to_string()));
    }
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ExtractError::MissingColumns(missing.join(", ")));
    }

    let mz_column = headers.iter().position(|h| h == "mzValue");
    let level_column = headers.iter().position(|h| h == "msLevel");
    let mut values = Vec::new();
    for record in &records {
        if let (Some(levels), Some(column)) = (ms_level_filter, level_column) {
            let level = record.get(column).and_then(|v| v.trim().parse::<u32>().ok());
            if !level.is_some_and(|l| levels.contains(&l)) {
                continue;
            }
        }
        let mz = mz_column
            .and_then(|column| record.get(column))
            .and_then(|v| v.trim().parse::<f64>().ok());
        match mz {
            Some(mz) if mz.is_finite() => values.push(mz),
            _ => {}
        }
    }
    if values.is_empty() {
        return Err(ExtractError::NoData("Target m/z data not found".to_string()));
    }

    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    if let Some(places) = decimal_places {
        for value in &mut values {
            *value = round_decimal_place(*value, places)?;
        }
    }
    let round = |value: f64| match decimal_places {
        Some(places) => round_decimal_place(value, places),
        None => Ok(value),
    };
    let min_mz = round(values[0] - mz_tolerance)?;
    let max_mz = round(values[values.len() - 1] + mz_tolerance)?;
    Ok(TargetList {
        values,
        min_mz,
        max_mz,
    })
}

fn read_source(source: &str) -> Result<String, ExtractError> {
    if URL_PATTERN.is_match(source) {
        let response = ureq::get(source)
            .call()
            .map_err(|e| ExtractError::InvalidArgument(format!("target file fetch: {e}")))?;
        response
            .into_string()
            .map_err(|e| ExtractError::InvalidArgument(format!("target file fetch: {e}")))
    } else if TSV_PATTERN.is_match(source) {
        fs::read_to_string(source)
            .map_err(|e| ExtractError::InvalidArgument(format!("target file read: {e}")))
    } else {
        Err(ExtractError::InvalidFormat(
            "target file must be a .tsv path or a tsv-producing URL".to_string(),
        ))
    }
}
