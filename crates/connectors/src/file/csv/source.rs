use crate::file::csv::{error::FileError, metadata::CsvLayout};
use csv::{ReaderBuilder, StringRecord};
use model::records::row::{NAME_MAX_LENGTH, Row, RowSet};
use std::{fs::File, io, path::Path, time::Instant};
use tracing::{debug, info};

/// Reads every row of the CSV at `path`.
///
/// The file needs an `ID` and a `Name` column (any case, any position);
/// other columns are ignored. The first invalid row aborts the read, so a
/// bad file never reaches the database.
pub fn read_rowset(path: impl AsRef<Path>) -> Result<RowSet, FileError> {
    let path = path.as_ref();
    let start = Instant::now();

    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let layout = CsvLayout::from_headers(reader.headers()?)?;
    debug!(?layout, "Resolved CSV columns");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(parse_record(&record, layout)?);
    }

    info!(
        "Read {} rows from {} in {} ms",
        rows.len(),
        path.display(),
        start.elapsed().as_millis()
    );
    Ok(RowSet::new(rows))
}

fn open_error(path: &Path, err: io::Error) -> FileError {
    match err.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.display().to_string()),
        io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.display().to_string()),
        _ => FileError::IoError(err),
    }
}

fn parse_record(record: &StringRecord, layout: CsvLayout) -> Result<Row, FileError> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let invalid = |reason: String| FileError::InvalidRow { line, reason };

    let id_cell = record.get(layout.id).unwrap_or("").trim();
    if id_cell.is_empty() {
        return Err(invalid("ID is empty".to_string()));
    }
    let id = id_cell.parse::<i64>().map_err(|_| invalid(format!("ID '{id_cell}' is not an integer")))?;
    let id = i32::try_from(id).map_err(|_| invalid(format!("ID {id} is out of range for INTEGER")))?;

    let name = match record.get(layout.name).unwrap_or("") {
        "" => None,
        cell if cell.chars().count() > NAME_MAX_LENGTH => {
            return Err(invalid(format!(
                "Name is longer than {NAME_MAX_LENGTH} characters"
            )));
        }
        cell if cell.contains('\0') => {
            return Err(invalid("Name contains a NUL character".to_string()));
        }
        cell => Some(cell.to_string()),
    };

    Ok(Row { id, name })
}
