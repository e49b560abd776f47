//! CSV loader
//!
//! Turns the sales table into `RawSaleRow`s. Cells stay text here; typing
//! and validation happen in the record store so every failure carries a
//! row and column.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use sales_types::columns::Column;
use sales_types::record::RawSaleRow;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv input has no headers")]
    MissingHeaders,
    #[error("csv input is missing column '{0}'")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read every row from a CSV source with a header line.
///
/// Columns other than the seven sales columns are ignored.
pub fn read_rows<R: Read>(source: R) -> Result<Vec<RawSaleRow>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::MissingHeaders);
    }
    for column in Column::ALL {
        if !headers.iter().any(|h| h == column.header()) {
            return Err(LoadError::MissingColumn(column.header()));
        }
    }

    let rows = reader
        .deserialize::<RawSaleRow>()
        .collect::<Result<Vec<_>, _>>()?;
    debug!(rows = rows.len(), "CSV rows read");
    Ok(rows)
}

pub fn read_rows_str(input: &str) -> Result<Vec<RawSaleRow>, LoadError> {
    read_rows(input.as_bytes())
}

pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<RawSaleRow>, LoadError> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Salesperson,Customer Name,Car Make,Car Model,Car Year,\
                          Sale Price,Commission Rate,Commission Earned";

    #[test]
    fn test_reads_rows_by_header_name() {
        let csv = format!(
            "{}\n2022-08-01,Monica Moore,Mary Butler,Nissan,Altima,2018,15983,0.0707,1130.02\n",
            HEADER
        );
        let rows = read_rows_str(&csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].salesperson, "Monica Moore");
        assert_eq!(rows[0].car_model, "Altima");
        assert_eq!(rows[0].commission_earned, "1130.02");
    }

    #[test]
    fn test_missing_column() {
        let csv =
            "Salesperson,Car Make,Car Model,Car Year,Date,Sale Price\nA,B,C,2020,2022-01-01,1\n";
        let err = read_rows_str(csv).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Commission Earned")));
    }

    #[test]
    fn test_header_only_is_empty() {
        let rows = read_rows_str(&format!("{}\n", HEADER)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let csv = format!("{}\n2022-08-01,Monica Moore\n", HEADER);
        assert!(matches!(read_rows_str(&csv), Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_empty_input_has_no_headers() {
        assert!(matches!(read_rows_str(""), Err(LoadError::MissingHeaders)));
    }
}
