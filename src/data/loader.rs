use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Dataset, RawCell, RawTable};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalise a GDP table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header `country,<year>,<year>,...`
/// * `.json`         – pandas `orient='split'`: `{ "columns": [...], "data": [[...], ...] }`
/// * `.parquet`      – a `country` string column plus one column per year
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => read_delimited(path, b',')?,
        "tsv" => read_delimited(path, b'\t')?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(DashboardError::UnsupportedFormat(other.to_string())),
    };
    debug!(
        "Read {} rows × {} columns from {}",
        table.rows.len(),
        table.columns.len(),
        path.display()
    );

    let dataset = Dataset::from_raw(table)?;
    let (first, last) = dataset.year_bounds();
    info!(
        "Loaded {} countries over {} years ({first}–{last}) from {}",
        dataset.len(),
        dataset.years().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV / TSV
// ---------------------------------------------------------------------------

fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;
    read_csv(reader)
}

/// Every CSV cell is text; numeric interpretation happens during normalisation.
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<RawTable> {
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(RawCell::from).collect());
    }

    Ok(RawTable { columns, rows })
}

// ---------------------------------------------------------------------------
// JSON (split orientation)
// ---------------------------------------------------------------------------

/// Expected JSON schema (`df.to_json(orient='split', index=False)`):
///
/// ```json
/// {
///   "columns": ["country", "1800", "1801"],
///   "data": [["Afghanistan", 683, "1.2k"], ...]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct SplitTable {
    columns: Vec<String>,
    data: Vec<Vec<JsonValue>>,
}

fn read_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path)?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<RawTable> {
    let split: SplitTable = serde_json::from_str(text)?;
    let rows = split
        .data
        .iter()
        .map(|row| row.iter().map(json_to_cell).collect())
        .collect();
    Ok(RawTable {
        columns: split.columns,
        rows,
    })
}

fn json_to_cell(val: &JsonValue) -> RawCell {
    match val {
        JsonValue::String(s) => RawCell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawCell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawCell::Float(f)
            } else {
                RawCell::Text(n.to_string())
            }
        }
        JsonValue::Null => RawCell::Null,
        // Booleans, arrays and objects are never numbers; keep the text so the
        // error message shows what was there.
        other => RawCell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a wide Parquet table.
///
/// Expected schema:
/// - `country`: Utf8 / LargeUtf8 / Utf8View
/// - one column per year, named by the year; a string type (may carry a `k`
///   suffix), Int32, Int64, Float32 or Float64 are read as-is
/// - other integer and float widths are widened to Float64, and dictionary
///   columns are decoded to their value type first
///
/// Any other column type is rejected before rows are read.
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let mut columns = Vec::new();
    let mut targets = Vec::new();
    for field in builder.schema().fields() {
        let target = readable_type(field.data_type()).ok_or_else(|| {
            DashboardError::UnsupportedColumnType {
                column: field.name().clone(),
                data_type: field.data_type().to_string(),
            }
        })?;
        columns.push(field.name().clone());
        targets.push(target);
    }
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let arrays = batch
            .columns()
            .iter()
            .zip(&targets)
            .map(|(col, target)| widen(col, target))
            .collect::<Result<Vec<ArrayRef>>>()?;

        for row in 0..batch.num_rows() {
            rows.push(
                arrays
                    .iter()
                    .zip(&columns)
                    .map(|(col, name)| arrow_cell(col, name, row))
                    .collect::<Result<Vec<RawCell>>>()?,
            );
        }
    }

    Ok(RawTable { columns, rows })
}

/// The type a column is read as, or `None` when it cannot hold a country or
/// a GDP value.
fn readable_type(data_type: &DataType) -> Option<DataType> {
    match data_type {
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Utf8View
        | DataType::Int32
        | DataType::Int64
        | DataType::Float32
        | DataType::Float64 => Some(data_type.clone()),
        DataType::Dictionary(_, value) => readable_type(value),
        t if t.is_integer() || t.is_floating() => Some(DataType::Float64),
        _ => None,
    }
}

fn widen(col: &ArrayRef, target: &DataType) -> Result<ArrayRef> {
    if col.data_type() == target {
        Ok(Arc::clone(col))
    } else {
        Ok(cast(col, target)?)
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, column: &str, row: usize) -> Result<RawCell> {
    if col.is_null(row) {
        return Ok(RawCell::Null);
    }
    let any = col.as_any();
    let cell = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| RawCell::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| RawCell::Text(a.value(row).to_string())),
        DataType::Utf8View => Some(RawCell::Text(col.as_string_view().value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| RawCell::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| RawCell::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| RawCell::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| RawCell::Float(a.value(row))),
        _ => None,
    };
    cell.ok_or_else(|| DashboardError::UnsupportedColumnType {
        column: column.to_string(),
        data_type: col.data_type().to_string(),
    })
}
