//! Patient CSV ingest.
//!
//! One uploaded file becomes one `Vec<PatientRecord>` owned by the pipeline
//! invocation; nothing persists across runs. A malformed row is terminal
//! for the whole invocation and names the offending line.

use log::debug;
use serde::Serialize;
use std::path::Path;

use crate::core::PatientRecord;
use crate::errors::RiskmapError;

/// Read every row of a patient CSV into memory. The file must carry a
/// `.csv` extension and a header row naming the record fields.
pub fn read_patients(path: &Path) -> Result<Vec<PatientRecord>, RiskmapError> {
    ensure_csv(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| map_csv_error(path, e))?;

    let mut patients = Vec::new();
    for (index, row) in reader.deserialize::<PatientRecord>().enumerate() {
        let mut record = row.map_err(|e| map_csv_error(path, e))?;
        if record.patient_id.is_empty() {
            record.patient_id = format!("P{:04}", index + 1);
        }
        patients.push(record);
    }

    debug!(
        "parsed {} patient rows from {}",
        patients.len(),
        path.display()
    );
    Ok(patients)
}

/// Filename/row-count echo for a dataset, without running the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowCount {
    pub filename: String,
    pub rows: usize,
}

/// Count data rows (the header is not a row). Rows are still checked for
/// CSV well-formedness.
pub fn count_rows(path: &Path) -> Result<RowCount, RiskmapError> {
    ensure_csv(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .map_err(|e| map_csv_error(path, e))?;

    let mut rows = 0usize;
    for record in reader.records() {
        record.map_err(|e| map_csv_error(path, e))?;
        rows += 1;
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(RowCount { filename, rows })
}

fn ensure_csv(path: &Path) -> Result<(), RiskmapError> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        Ok(())
    } else {
        Err(RiskmapError::invalid_input(path, "expected a .csv file"))
    }
}

fn map_csv_error(path: &Path, err: csv::Error) -> RiskmapError {
    let message = err.to_string();
    let line = err.position().map(|position| position.line());
    match err.into_kind() {
        csv::ErrorKind::Io(source) => RiskmapError::io(path, source),
        _ => RiskmapError::parse(path, line, message),
    }
}
