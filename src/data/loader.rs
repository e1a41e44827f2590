use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Column, Dataset, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to produce a [`Dataset`] from a file. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("malformed parquet record batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing column '{}' (or '{}')", .0.header(), .0.legacy_header())]
    MissingColumn(Column),

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: Column,
        message: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the salary table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (the Portuguese-headed export)
/// * `.json`    – `[{ "year": 2024, "seniority": "senior", ... }, ...]`
/// * `.parquet` – flat table with one column per record field
///
/// Both the English and the Portuguese column headers are accepted.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every record column must be present in the header; extra columns
/// (the Portuguese export also carries local-currency salary, employer
/// country, ...) are ignored.
fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    for column in Column::ALL {
        if !headers.iter().any(|h| column.matches_header(h)) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    let records: Vec<Record> = serde_json::from_str(&text)?;
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table.
///
/// Text columns must be `Utf8`/`LargeUtf8`, `year` an integer column and
/// `salary_usd` an integer or floating-point column. Works with files written
/// by both Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // A file without row groups yields no batches, so check the schema up front.
    for column in Column::ALL {
        if !builder
            .schema()
            .fields()
            .iter()
            .any(|f| column.matches_header(f.name()))
        {
            return Err(LoadError::MissingColumn(column));
        }
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = records.len();
        records.extend(batch_records(&batch, offset)?);
    }

    Ok(Dataset::from_records(records))
}

fn find_column(batch: &RecordBatch, column: Column) -> Result<&ArrayRef, LoadError> {
    let schema = batch.schema();
    let index = schema
        .fields()
        .iter()
        .position(|f| column.matches_header(f.name()))
        .ok_or(LoadError::MissingColumn(column))?;
    Ok(batch.column(index))
}

fn batch_records(batch: &RecordBatch, offset: usize) -> Result<Vec<Record>, LoadError> {
    let year = find_column(batch, Column::Year)?;
    let seniority = find_column(batch, Column::Seniority)?;
    let contract = find_column(batch, Column::ContractType)?;
    let size = find_column(batch, Column::CompanySize)?;
    let role = find_column(batch, Column::RoleTitle)?;
    let remote = find_column(batch, Column::RemoteType)?;
    let country = find_column(batch, Column::ResidenceCountry)?;
    let salary = find_column(batch, Column::SalaryUsd)?;

    (0..batch.num_rows())
        .map(|row| -> Result<Record, LoadError> {
            let at = (offset + row, row);
            Ok(Record {
                year: extract_year(year, at)?,
                seniority: extract_string(seniority, at, Column::Seniority)?,
                contract_type: extract_string(contract, at, Column::ContractType)?,
                company_size: extract_string(size, at, Column::CompanySize)?,
                role_title: extract_string(role, at, Column::RoleTitle)?,
                remote_type: extract_string(remote, at, Column::RemoteType)?,
                residence_country_code: extract_string(country, at, Column::ResidenceCountry)?,
                salary_usd: extract_f64(salary, at, Column::SalaryUsd)?,
            })
        })
        .collect()
}

// -- Parquet / Arrow helpers --
//
// `at` is (row in file, row in batch).

fn invalid(at: (usize, usize), column: Column, message: impl Into<String>) -> LoadError {
    LoadError::InvalidValue {
        row: at.0,
        column,
        message: message.into(),
    }
}

fn extract_string(col: &ArrayRef, at: (usize, usize), column: Column) -> Result<String, LoadError> {
    let row = at.1;
    if col.is_null(row) {
        return Err(invalid(at, column, "null value"));
    }
    match col.data_type() {
        DataType::Utf8 => match col.as_any().downcast_ref::<StringArray>() {
            Some(s) => Ok(s.value(row).to_string()),
            None => Err(invalid(at, column, "expected StringArray")),
        },
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(invalid(at, column, format!("expected a string column, got {other:?}"))),
    }
}

fn extract_i64(col: &ArrayRef, at: (usize, usize), column: Column) -> Result<i64, LoadError> {
    let row = at.1;
    if col.is_null(row) {
        return Err(invalid(at, column, "null value"));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else {
        Err(invalid(
            at,
            column,
            format!("expected an integer column, got {:?}", col.data_type()),
        ))
    }
}

fn extract_year(col: &ArrayRef, at: (usize, usize)) -> Result<i32, LoadError> {
    let year = extract_i64(col, at, Column::Year)?;
    i32::try_from(year).map_err(|_| invalid(at, Column::Year, format!("year {year} out of range")))
}

fn extract_f64(col: &ArrayRef, at: (usize, usize), column: Column) -> Result<f64, LoadError> {
    let row = at.1;
    if col.is_null(row) {
        return Err(invalid(at, column, "null value"));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        extract_i64(col, at, column).map(|v| v as f64)
    }
}
