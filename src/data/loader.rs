use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{
    ExhibitionDataset, Gender, Record, Status, coerce_age, coerce_paintings, coerce_year,
};

/// Columns every input file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "firstname",
    "lastname",
    "nationality",
    "gender",
    "status_at_exhibition",
    "age_at_exhibition",
    "startdate",
    "country",
    "city",
    "eid",
    "paintings",
];

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), SchemaError> {
    let present: Vec<&str> = present.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an exhibition dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "firstname": "...", "startdate": 1905, ... }, ...]`
/// * `.parquet` – one column per field, text or numeric
pub fn load_file(path: &Path) -> Result<ExhibitionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "{} records, {} nationalities",
        dataset.len(),
        dataset.nationalities.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Raw row – every field as text, as it appears in the file
// ---------------------------------------------------------------------------

/// Cells absent from a short row read as blank.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    firstname: String,
    lastname: String,
    nationality: String,
    gender: String,
    status_at_exhibition: String,
    age_at_exhibition: String,
    startdate: String,
    country: String,
    city: String,
    eid: String,
    paintings: String,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record {
            firstname: raw.firstname,
            lastname: raw.lastname,
            nationality: raw.nationality,
            gender: Gender::parse(&raw.gender),
            status: Status::parse(&raw.status_at_exhibition),
            age_at_exhibition: coerce_age(&raw.age_at_exhibition),
            startdate: coerce_year(&raw.startdate),
            country: raw.country,
            city: raw.city,
            eid: raw.eid,
            paintings: coerce_paintings(&raw.paintings),
        }
    }
}

impl RawRecord {
    /// Build from a `column → text` lookup (JSON objects, Parquet rows).
    fn from_cells(cells: &BTreeMap<String, String>) -> Self {
        let get = |k: &str| cells.get(k).cloned().unwrap_or_default();
        RawRecord {
            firstname: get("firstname"),
            lastname: get("lastname"),
            nationality: get("nationality"),
            gender: get("gender"),
            status_at_exhibition: get("status_at_exhibition"),
            age_at_exhibition: get("age_at_exhibition"),
            startdate: get("startdate"),
            country: get("country"),
            city: get("city"),
            eid: get("eid"),
            paintings: get("paintings"),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ExhibitionDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(Record::from(raw));
    }

    Ok(ExhibitionDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, e.g. `df.to_json(orient='records')`.
///
/// The first object plays the role of a header: it must carry every required
/// key. Later objects may omit keys, which then read as blank cells, the same
/// as a short CSV row.
fn load_json(path: &Path) -> Result<ExhibitionDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        if i == 0 {
            check_columns(obj.keys().map(String::as_str))?;
        }

        let cells: BTreeMap<String, String> = obj
            .iter()
            .map(|(k, v)| (k.clone(), json_to_text(v)))
            .collect();
        records.push(Record::from(RawRecord::from_cells(&cells)));
    }

    Ok(ExhibitionDataset::from_records(records))
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ExhibitionDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    check_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let columns: Vec<(String, &Arc<dyn Array>)> = REQUIRED_COLUMNS
            .iter()
            .map(|name| {
                let idx = schema
                    .index_of(name)
                    .map_err(|_| anyhow::anyhow!("Parquet batch missing '{name}' column"))?;
                Ok((name.to_string(), batch.column(idx)))
            })
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            let cells: BTreeMap<String, String> = columns
                .iter()
                .map(|(name, col)| (name.clone(), arrow_cell_text(col, row)))
                .collect();
            records.push(Record::from(RawRecord::from_cells(&cells)));
        }
    }

    Ok(ExhibitionDataset::from_records(records))
}

/// Render one Arrow cell as text so every format shares the same coercion.
fn arrow_cell_text(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        other => {
            log::warn!("Unsupported parquet column type {other:?}, treating as blank");
            String::new()
        }
    }
}
