use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use once_cell::sync::OnceCell;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, DataResult};
use super::model::{CellValue, Column, ColumnType, Table};

// ---------------------------------------------------------------------------
// TableStore – cached one-time load
// ---------------------------------------------------------------------------

/// Reads the backing file once and hands out shared references thereafter.
///
/// Repeated `load` calls return clones of the same `Arc<Table>` without
/// touching the filesystem again. Changing the backing path means building
/// a new store.
#[derive(Debug)]
pub struct TableStore {
    path: PathBuf,
    table: OnceCell<Arc<Table>>,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TableStore {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the base table, reading the file only on the first call.
    pub fn load(&self) -> DataResult<Arc<Table>> {
        self.table
            .get_or_try_init(|| load_file(&self.path).map(Arc::new))
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-delimited, header row, column types inferred
/// * `.json`    – `[{ "State": "Kerala", "Year": 2015, ... }, ...]`
/// * `.parquet` – flat table of scalar columns
pub fn load_file(path: &Path) -> DataResult<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per row.
///
/// Types are inferred per column over the non-empty cells: all integer
/// literals → `Integer`, all numeric with at least one decimal → `Real`,
/// anything else → `Text`. Empty cells become `Null`; a column with no
/// values at all gets the `Null` type and is classified to neither set.
fn load_csv(path: &Path) -> DataResult<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(DataError::EmptyFile);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }
    if records.is_empty() {
        return Err(DataError::EmptyFile);
    }

    // Two passes per column: infer the declared type, then materialize
    // typed cells.
    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let raw: Vec<&str> = records
                .iter()
                .map(|rec| rec.get(idx).unwrap_or("").trim())
                .collect();
            let ty = infer_column_type(&raw);
            let values = raw.iter().map(|cell| parse_cell(cell, ty)).collect();
            Column {
                name: name.clone(),
                ty,
                values,
            }
        })
        .collect();

    Ok(Table::new(columns))
}

/// Infer a column's declared type from its raw text cells.
fn infer_column_type(raw: &[&str]) -> ColumnType {
    let mut saw_value = false;
    let mut all_int = true;
    let mut all_numeric = true;

    for cell in raw.iter().filter(|c| !c.is_empty()) {
        saw_value = true;
        if cell.parse::<i64>().is_err() {
            all_int = false;
            if cell.parse::<f64>().is_err() {
                all_numeric = false;
                break;
            }
        }
    }

    if !saw_value {
        ColumnType::Null
    } else if all_int {
        ColumnType::Integer
    } else if all_numeric {
        ColumnType::Real
    } else {
        ColumnType::Text
    }
}

/// Materialize one raw cell under the column's declared type.
fn parse_cell(raw: &str, ty: ColumnType) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    match ty {
        ColumnType::Integer => raw
            .parse::<i64>()
            .map(CellValue::Int)
            .unwrap_or(CellValue::Null),
        ColumnType::Real => raw
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or(CellValue::Null),
        ColumnType::Text => CellValue::Str(raw.to_string()),
        // CSV inference never declares these.
        ColumnType::Boolean | ColumnType::Null => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "State": "Kerala", "Year": 2015, "literacy_rate": 94.0 },
///   { "State": "Assam",  "Year": 2015, "literacy_rate": 72.2 }
/// ]
/// ```
///
/// Keys missing from a record become `Null` cells. JSON carries its own
/// scalar types, so boolean columns can appear here (they classify to
/// neither set downstream).
fn load_json(path: &Path) -> DataResult<Table> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::InvalidData("expected top-level JSON array".into()))?;
    if records.is_empty() {
        return Err(DataError::EmptyFile);
    }

    // Column order: first appearance across records.
    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::InvalidData(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }

    let columns = names
        .iter()
        .map(|name| {
            let cells: Vec<&JsonValue> = records
                .iter()
                .map(|rec| rec.get(name).unwrap_or(&JsonValue::Null))
                .collect();
            let ty = infer_json_column_type(&cells);
            let values = cells.iter().map(|v| json_cell(v, ty)).collect();
            Column {
                name: name.clone(),
                ty,
                values,
            }
        })
        .collect();

    Ok(Table::new(columns))
}

fn infer_json_column_type(cells: &[&JsonValue]) -> ColumnType {
    let mut saw_int = false;
    let mut saw_float = false;
    let mut saw_bool = false;
    let mut saw_other = false;

    for cell in cells.iter().filter(|c| !c.is_null()) {
        match cell {
            JsonValue::Number(n) if n.as_i64().is_some() => saw_int = true,
            JsonValue::Number(_) => saw_float = true,
            JsonValue::Bool(_) => saw_bool = true,
            _ => saw_other = true,
        }
    }

    if saw_other {
        ColumnType::Text
    } else if saw_float {
        if saw_bool { ColumnType::Text } else { ColumnType::Real }
    } else if saw_int {
        if saw_bool { ColumnType::Text } else { ColumnType::Integer }
    } else if saw_bool {
        ColumnType::Boolean
    } else {
        ColumnType::Null
    }
}

fn json_cell(value: &JsonValue, ty: ColumnType) -> CellValue {
    if value.is_null() {
        return CellValue::Null;
    }
    match ty {
        ColumnType::Integer => value
            .as_i64()
            .map(CellValue::Int)
            .unwrap_or(CellValue::Null),
        ColumnType::Real => value
            .as_f64()
            .map(CellValue::Float)
            .unwrap_or(CellValue::Null),
        ColumnType::Boolean => value
            .as_bool()
            .map(CellValue::Bool)
            .unwrap_or(CellValue::Null),
        ColumnType::Text => match value {
            JsonValue::String(s) => CellValue::Str(s.clone()),
            other => CellValue::Str(other.to_string()),
        },
        ColumnType::Null => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table of scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). String, integer, float and boolean
/// columns map to their declared types; anything else is rendered as text.
fn load_parquet(path: &Path) -> DataResult<Table> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let mut columns: Vec<Column> = schema
        .fields()
        .iter()
        .map(|field| Column {
            name: field.name().clone(),
            ty: arrow_column_type(field.data_type()),
            values: Vec::new(),
        })
        .collect();

    for batch_result in reader {
        let batch = batch_result?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(idx);
            for row in 0..batch.num_rows() {
                column.values.push(arrow_cell(array, row));
            }
        }
    }

    if columns.is_empty() || columns.iter().all(|c| c.values.is_empty()) {
        return Err(DataError::EmptyFile);
    }

    Ok(Table::new(columns))
}

fn arrow_column_type(dtype: &DataType) -> ColumnType {
    match dtype {
        DataType::Utf8 | DataType::LargeUtf8 => ColumnType::Text,
        DataType::Int32 | DataType::Int64 => ColumnType::Integer,
        DataType::Float32 | DataType::Float64 => ColumnType::Real,
        DataType::Boolean => ColumnType::Boolean,
        _ => ColumnType::Text,
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            CellValue::Str(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            CellValue::Str(arr.value(row).to_string())
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Int(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Int(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::Bool(arr.value(row))
        }
        _ => array_value_to_string(col.as_ref(), row)
            .map(CellValue::Str)
            .unwrap_or(CellValue::Null),
    }
}
