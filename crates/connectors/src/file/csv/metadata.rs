use crate::file::csv::error::FileError;
use csv::StringRecord;

/// Positions of the `ID` and `Name` columns within a CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    pub id: usize,
    pub name: usize,
}

impl CsvLayout {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, FileError> {
        Ok(CsvLayout {
            id: find_column(headers, "ID")?,
            name: find_column(headers, "Name")?,
        })
    }
}

pub fn normalize_col_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn find_column(headers: &StringRecord, wanted: &str) -> Result<usize, FileError> {
    let wanted_norm = normalize_col_name(wanted);
    headers
        .iter()
        .position(|h| normalize_col_name(h) == wanted_norm)
        .ok_or_else(|| FileError::MissingColumn(wanted.to_string()))
}
