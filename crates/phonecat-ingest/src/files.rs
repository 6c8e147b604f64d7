use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::de::DeserializeOwned;

use crate::error::IngestError;

/// Label used in errors for rows that did not come from a file.
pub(crate) const STREAM_LABEL: &str = "<stream>";

/// Lists the `*.csv` files directly inside `dir`, sorted by file name.
pub(crate) fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let io_err = |source| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Deserializes every record of one CSV stream into `T`.
///
/// When `last_segment_headers` is set, each header is reduced to the part
/// after its last `.`, so `listing.ad_price` lands in `ad_price`.
pub(crate) fn read_records<T, R>(
    reader: R,
    origin: &Path,
    last_segment_headers: bool,
) -> Result<Vec<T>, IngestError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let raw_headers = reader
        .headers()
        .map_err(|e| IngestError::csv(origin, e))?
        .clone();
    let headers = if last_segment_headers {
        raw_headers
            .iter()
            .map(|h| h.rsplit('.').next().unwrap_or(h))
            .collect::<StringRecord>()
    } else {
        raw_headers
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(origin, e))?;
        let row = record
            .deserialize(Some(&headers))
            .map_err(|e| IngestError::csv(origin, e))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads every CSV file in `dir` in name order and concatenates the rows.
pub(crate) fn read_dir_records<T: DeserializeOwned>(
    dir: &Path,
    last_segment_headers: bool,
) -> Result<Vec<T>, IngestError> {
    let mut rows = Vec::new();
    for path in csv_files(dir)? {
        let file = fs::File::open(&path).map_err(|source| IngestError::Io {
            path: path.clone(),
            source,
        })?;
        let mut file_rows = read_records(file, &path, last_segment_headers)?;
        tracing::debug!(path = %path.display(), rows = file_rows.len(), "read csv file");
        rows.append(&mut file_rows);
    }
    Ok(rows)
}
