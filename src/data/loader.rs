use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::error::DatasetError;

// Column names of the launch table.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 5] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD,
    COL_CLASS,
    COL_BOOSTER_VERSION,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Return the first candidate that exists under `dir`.
pub fn locate_dataset(dir: &Path, candidates: &[&str]) -> Result<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            anyhow!(
                "no launch dataset found in {} (looked for {})",
                dir.display(),
                candidates.join(", ")
            )
        })
}

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * `.parquet` – flat table with the same column names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}-{} kg)",
        dataset.len(),
        path.display(),
        dataset.launch_sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row as written by pandas. `class` is read as a float because
/// some exports write `1.0`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

/// Parse CSV text with a header row into a validated dataset.
pub fn parse_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn { column }.into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(LaunchRecord {
            launch_site: row.launch_site,
            payload_mass_kg: row.payload_mass_kg,
            outcome: outcome_from_f64(row.class, row_no)?,
            booster_version: row.booster_version,
            booster_version_category: row.booster_version_category,
        });
    }

    Ok(LaunchDataset::from_records(records)?)
}

fn outcome_from_f64(value: f64, row: usize) -> Result<Outcome, DatasetError> {
    let invalid = || DatasetError::InvalidOutcome {
        row,
        value: value.to_string(),
    };
    if value.fract() != 0.0 {
        return Err(invalid());
    }
    Outcome::try_from(value as i64).map_err(|_| invalid())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 1,
///     "Booster Version": "F9 v1.0  B0005",
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |column| json_field(obj, column);

        let payload = field(COL_PAYLOAD)?;
        let payload_mass_kg = payload.as_f64().ok_or_else(|| DatasetError::InvalidPayload {
            row: i,
            value: payload.to_string(),
        })?;

        let class = field(COL_CLASS)?;
        let outcome = class
            .as_f64()
            .ok_or_else(|| DatasetError::InvalidOutcome {
                row: i,
                value: class.to_string(),
            })
            .and_then(|v| outcome_from_f64(v, i))?;

        records.push(LaunchRecord {
            launch_site: json_string(field(COL_LAUNCH_SITE)?),
            payload_mass_kg,
            outcome,
            booster_version: json_string(field(COL_BOOSTER_VERSION)?),
            booster_version_category: json_string(field(COL_BOOSTER_CATEGORY)?),
        });
    }

    Ok(LaunchDataset::from_records(records)?)
}

fn json_field<'a>(
    obj: &'a serde_json::Map<String, JsonValue>,
    column: &'static str,
) -> Result<&'a JsonValue> {
    obj.get(column)
        .ok_or_else(|| DatasetError::MissingColumn { column }.into())
}

fn json_string(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// String columns may be Utf8 or LargeUtf8; `Payload Mass (kg)` and `class`
/// may be any of Int32 / Int64 / Float32 / Float64. Works with files
/// written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = batch_column(&batch, COL_LAUNCH_SITE)?;
        let payload_col = batch_column(&batch, COL_PAYLOAD)?;
        let class_col = batch_column(&batch, COL_CLASS)?;
        let version_col = batch_column(&batch, COL_BOOSTER_VERSION)?;
        let category_col = batch_column(&batch, COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let global_row = records.len();
            let payload_mass_kg = extract_f64(payload_col, row)
                .with_context(|| format!("Row {global_row}: failed to read '{COL_PAYLOAD}'"))?;
            let class = extract_f64(class_col, row)
                .with_context(|| format!("Row {global_row}: failed to read '{COL_CLASS}'"))?;

            records.push(LaunchRecord {
                launch_site: extract_string(site_col, row)?,
                payload_mass_kg,
                outcome: outcome_from_f64(class, global_row)?,
                booster_version: extract_string(version_col, row)?,
                booster_version_category: extract_string(category_col, row)?,
            });
        }
    }

    Ok(LaunchDataset::from_records(records)?)
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, column: &'static str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column)
        .map_err(|_| DatasetError::MissingColumn { column })?;
    Ok(batch.column(idx))
}

/// Extract a numeric cell as `f64`.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as f64)
        }
        other => bail!("Expected numeric column, got {other:?}"),
    }
}

/// Extract a string cell; nulls read as the empty string.
fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected string column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT
4,KSC LC-39A,1,3136.0,F9 FT B1031.1,FT
";

    #[test]
    fn csv_ignores_extra_columns() {
        let ds = parse_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.launch_sites(), ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
        assert_eq!(ds.records()[2].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].booster_version, "F9 v1.0  B0005");
        assert_eq!(ds.max_payload(), 9600.0);
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let text = "Launch Site,class,Booster Version,Booster Version Category\nA,1,x,FT\n";
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn { column: COL_PAYLOAD })
        );
    }

    #[test]
    fn csv_non_binary_class_is_fatal() {
        let text = "\
Launch Site,Payload Mass (kg),class,Booster Version,Booster Version Category
A,100,1,x,FT
A,200,2,y,FT
";
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidOutcome { row: 1, .. })
        ));
    }

    #[test]
    fn csv_malformed_payload_is_fatal() {
        let text = "\
Launch Site,Payload Mass (kg),class,Booster Version,Booster Version Category
A,heavy,1,x,FT
";
        assert!(parse_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn json_records_orient() {
        let text = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "class": 1,
             "Booster Version": "F9 FT B1032.1", "Booster Version Category": "FT"},
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5300.5, "class": 0.0,
             "Booster Version": "F9 FT B1030", "Booster Version Category": "FT"}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].payload_mass_kg, 2490.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_missing_column_is_fatal() {
        let text = r#"[{"Launch Site": "A", "class": 1,
            "Booster Version": "x", "Booster Version Category": "FT"}]"#;
        let err = parse_json(text).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn { column: COL_PAYLOAD })
        );
    }

    #[test]
    fn json_non_binary_class_is_fatal() {
        let text = r#"[
            {"Launch Site": "A", "Payload Mass (kg)": 100, "class": 1,
             "Booster Version": "x", "Booster Version Category": "FT"},
            {"Launch Site": "A", "Payload Mass (kg)": 200, "class": 3,
             "Booster Version": "y", "Booster Version Category": "FT"}
        ]"#;
        let err = parse_json(text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidOutcome { row: 1, .. })
        ));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::UnsupportedFormat("xlsx".to_string()))
        );
    }

    #[test]
    fn parquet_round_trip_through_file() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS SLC-40", "VAFB SLC-4E"])),
                Arc::new(Float64Array::from(vec![4700.0, 9600.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["F9 B5 B1046.2", "F9 FT B1029.1"])),
                Arc::new(StringArray::from(vec!["B5", "FT"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!(
            "launch-dash-loader-{}.parquet",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.booster_categories(), ["B5", "FT"]);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn parquet_missing_column_is_fatal() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![2490.0])),
                Arc::new(StringArray::from(vec!["F9 FT B1032.1"])),
                Arc::new(StringArray::from(vec!["FT"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!(
            "launch-dash-no-class-{}.parquet",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn { column: COL_CLASS })
        );
    }

    #[test]
    fn locate_reports_all_candidates() {
        let dir = std::env::temp_dir().join(format!("launch-dash-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let err = locate_dataset(&dir, &["a.csv", "b.parquet"]).unwrap_err();
        assert!(err.to_string().contains("a.csv, b.parquet"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
