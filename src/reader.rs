//! Reader
//!
//! Load a record table from delimited text: a header line followed by rows of 0/1 values.
use crate::constants::DEFAULT_DELIMITER;
use crate::data::RecordTable;
use crate::errors::BdtreeError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a comma separated file into a table.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<RecordTable, BdtreeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BdtreeError::UnableToRead(format!("{}: {}", path.display(), e)))?;
    read_delimited(BufReader::new(file), DEFAULT_DELIMITER)
}

/// Read delimited text into a table.
///
/// * `reader` - Source of the text; its first line is the header.
/// * `delimiter` - Field separator.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RecordTable, BdtreeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header: Vec<String> = csv_reader
        .headers()
        .map_err(|e| BdtreeError::UnableToRead(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if header.is_empty() {
        return Err(BdtreeError::UnableToRead("missing header line".to_string()));
    }

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| BdtreeError::UnableToRead(e.to_string()))?;
        let row = record
            .iter()
            .map(|field| {
                field.parse::<u8>().map_err(|_| {
                    BdtreeError::ParseString(field.to_string(), format!("row {}", i), "0, 1".to_string())
                })
            })
            .collect::<Result<Vec<u8>, BdtreeError>>()?;
        rows.push(row);
    }
    RecordTable::new(header, rows)
}
