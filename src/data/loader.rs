use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataLoadError;
use super::model::{
    Record, Table, FWCI, PROMINENCE_PERCENTILE, PUBLICATION_SHARE_GROWTH, REQUIRED_COLUMNS,
    SCHOLARLY_OUTPUT, TOPIC_CLUSTER,
};

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Loader – reads once, then hands out the same table
// ---------------------------------------------------------------------------

/// Owns the dataset for the lifetime of the dashboard.
///
/// The file is read when the loader is opened; afterwards [`Loader::table`]
/// returns the same in-memory table until [`Loader::reload`] is called.
#[derive(Debug, Clone)]
pub struct Loader {
    path: PathBuf,
    table: Arc<Table>,
}

impl Loader {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = load_file(&path)?;
        log::info!(
            "Loaded {} topic clusters from {}",
            table.len(),
            path.display()
        );
        Ok(Loader {
            path,
            table: Arc::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> Arc<Table> {
        Arc::clone(&self.table)
    }

    /// Re-read the source file. On failure the previous table is kept.
    pub fn reload(&mut self) -> Result<Arc<Table>> {
        let table = load_file(&self.path)?;
        log::info!(
            "Reloaded {} topic clusters from {}",
            table.len(),
            self.path.display()
        );
        self.table = Arc::new(table);
        Ok(self.table())
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a topic cluster export from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the export's column names (extra columns ignored)
/// * `.json`    – `[{ "Topic Cluster": "...", "Scholarly Output": 12, ... }, ...]`
/// * `.parquet` – one column per field, any numeric type for the metrics
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    if table.is_empty() {
        return Err(DataLoadError::Empty(path.to_path_buf()));
    }
    Ok(table)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::NotFound(path.to_path_buf()),
        _ => DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Position of each required column, in [`REQUIRED_COLUMNS`] order.
fn locate_columns(names: &[&str]) -> Result<[usize; 5]> {
    let mut positions = [0usize; 5];
    let mut missing = Vec::new();
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        match names.iter().position(|name| *name == column) {
            Some(idx) => *slot = idx,
            None => missing.push(column.to_string()),
        }
    }
    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(DataLoadError::MissingColumns(missing))
    }
}

// -- value checks shared by every format --

fn output_from_f64(row: usize, value: f64) -> Result<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(DataLoadError::malformed(
            row,
            SCHOLARLY_OUTPUT,
            format!("expected a non-negative integer, got {value}"),
        ))
    }
}

fn finite(row: usize, column: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataLoadError::malformed(
            row,
            column,
            format!("expected a finite number, got {value}"),
        ))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);
    let headers = reader.headers()?.clone();
    let names: Vec<&str> = headers.iter().collect();
    let [cluster, output, fwci, prominence, growth] = locate_columns(&names)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let fields = result?;
        let cell = |idx: usize| fields.get(idx).unwrap_or("");

        records.push(Record {
            topic_cluster: cell(cluster).to_string(),
            scholarly_output: parse_output(row, cell(output))?,
            fwci: parse_real(row, FWCI, cell(fwci))?,
            prominence_percentile: parse_real(row, PROMINENCE_PERCENTILE, cell(prominence))?,
            publication_share_growth_pct: parse_real(row, PUBLICATION_SHARE_GROWTH, cell(growth))?,
        });
    }

    Ok(Table::new(records))
}

/// Integers, or integral floats such as `"12.0"`.
fn parse_output(row: usize, text: &str) -> Result<u64> {
    if let Ok(value) = text.parse::<u64>() {
        return Ok(value);
    }
    let value = parse_real(row, SCHOLARLY_OUTPUT, text)?;
    output_from_f64(row, value)
}

fn parse_real(row: usize, column: &'static str, text: &str) -> Result<f64> {
    let value = text
        .parse::<f64>()
        .map_err(|_| DataLoadError::malformed(row, column, format!("'{text}' is not a number")))?;
    finite(row, column, value)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Table> {
    let rows: Vec<Map<String, JsonValue>> =
        serde_json::from_reader(BufReader::new(open(path)?))?;

    rows.iter()
        .enumerate()
        .map(|(row, obj)| json_record(row, obj))
        .collect::<Result<Vec<_>>>()
        .map(Table::new)
}

fn json_record(row: usize, obj: &Map<String, JsonValue>) -> Result<Record> {
    let names: Vec<&str> = obj.keys().map(String::as_str).collect();
    locate_columns(&names)?;

    let topic_cluster = match &obj[TOPIC_CLUSTER] {
        JsonValue::String(s) => s.clone(),
        other => {
            return Err(DataLoadError::malformed(
                row,
                TOPIC_CLUSTER,
                format!("expected text, got {other}"),
            ))
        }
    };
    let number = |column: &'static str| -> Result<f64> {
        let value = &obj[column];
        let parsed = value.as_f64().ok_or_else(|| {
            DataLoadError::malformed(row, column, format!("expected a number, got {value}"))
        })?;
        finite(row, column, parsed)
    };
    let scholarly_output = match obj[SCHOLARLY_OUTPUT].as_u64() {
        Some(value) => value,
        None => output_from_f64(row, number(SCHOLARLY_OUTPUT)?)?,
    };

    Ok(Record {
        topic_cluster,
        scholarly_output,
        fwci: number(FWCI)?,
        prominence_percentile: number(PROMINENCE_PERCENTILE)?,
        publication_share_growth_pct: number(PUBLICATION_SHARE_GROWTH)?,
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export. Metric columns may be any numeric Arrow type
/// (they are cast to Float64); the label column may be Utf8 or LargeUtf8.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let [cluster, output, fwci, prominence, growth] = locate_columns(&names)?;

        let labels = cast(batch.column(cluster), &DataType::Utf8)?;
        let labels = labels.as_string::<i32>();
        let output = float_column(&batch, output)?;
        let fwci = float_column(&batch, fwci)?;
        let prominence = float_column(&batch, prominence)?;
        let growth = float_column(&batch, growth)?;

        let offset = records.len();
        for i in 0..batch.num_rows() {
            let row = offset + i;
            if labels.is_null(i) {
                return Err(DataLoadError::malformed(row, TOPIC_CLUSTER, "missing value"));
            }
            let number = |values: &Float64Array, column: &'static str| -> Result<f64> {
                if values.is_null(i) {
                    return Err(DataLoadError::malformed(row, column, "missing value"));
                }
                finite(row, column, values.value(i))
            };

            records.push(Record {
                topic_cluster: labels.value(i).to_string(),
                scholarly_output: output_from_f64(row, number(&output, SCHOLARLY_OUTPUT)?)?,
                fwci: number(&fwci, FWCI)?,
                prominence_percentile: number(&prominence, PROMINENCE_PERCENTILE)?,
                publication_share_growth_pct: number(&growth, PUBLICATION_SHARE_GROWTH)?,
            });
        }
    }

    Ok(Table::new(records))
}

fn float_column(batch: &RecordBatch, idx: usize) -> Result<Float64Array> {
    let array = cast(batch.column(idx), &DataType::Float64)?;
    Ok(array.as_primitive::<Float64Type>().clone())
}
