use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchRecord, LaunchTable, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the `spacex_launch_dash.csv` layout (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – same column names, numeric payload and integer class
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            read_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON {}", path.display()))?;
            parse_json(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row required; columns are matched by name.  Errors name the
/// 1-based file line of the offending record.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.context("reading CSV record")?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let record: LaunchRecord = row
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV line {line}"))?;
        record
            .validate()
            .with_context(|| format!("CSV line {line}"))?;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`).
pub fn parse_json(text: &str) -> Result<Vec<LaunchRecord>> {
    let records: Vec<LaunchRecord> = serde_json::from_str(text).context("parsing JSON")?;
    for (i, rec) in records.iter().enumerate() {
        rec.validate().with_context(|| format!("Row {i}"))?;
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema:
/// - `Launch Site`: Utf8 / LargeUtf8
/// - `Payload Mass (kg)`: Float64, Float32, Int64 or Int32
/// - `class`: Int64 or Int32 (0 / 1)
/// - `Booster Version Category`: Utf8 / LargeUtf8
///
/// Other columns are ignored.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column(&batch, SITE_COLUMN)?;
        let payload_col = column(&batch, PAYLOAD_COLUMN)?;
        let class_col = column(&batch, CLASS_COLUMN)?;
        let booster_col = column(&batch, BOOSTER_COLUMN)?;

        for row in 0..batch.num_rows() {
            let record = LaunchRecord {
                site: extract_string(site_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{SITE_COLUMN}'"))?,
                payload_kg: extract_f64(payload_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{PAYLOAD_COLUMN}'"))?,
                outcome: Outcome::try_from(
                    extract_i64(class_col, row)
                        .with_context(|| format!("Row {row}: failed to read '{CLASS_COLUMN}'"))?,
                )
                .with_context(|| format!("Row {row}"))?,
                booster_category: extract_string(booster_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{BOOSTER_COLUMN}'"))?,
            };
            record.validate().with_context(|| format!("Row {row}"))?;
            records.push(record);
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
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
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!("Expected a numeric column, got {:?}", col.data_type())
    }
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else {
        bail!("Expected an integer column, got {:?}", col.data_type())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
2,40,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
3,52,VAFB SLC-4E,1,9600.0,F9 FT B1036.1,FT
";

    #[test]
    fn reads_csv_ignoring_extra_columns() {
        let records = read_csv(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(
            records[2],
            LaunchRecord::new("KSC LC-39A", 2490.0, Outcome::Success, "FT")
        );
    }

    #[test]
    fn rejects_unknown_class() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   KSC LC-39A,2490.0,3,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 2"));
    }

    #[test]
    fn rejects_missing_column() {
        let csv = "Launch Site,class,Booster Version Category\nKSC LC-39A,1,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains(PAYLOAD_COLUMN));
    }

    #[test]
    fn errors_point_at_the_file_line() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   KSC LC-39A,2490.0,1,FT\n\
                   KSC LC-39A,3100.0,1,FT\n\
                   VAFB SLC-4E,-1,0,v1.1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "CSV line 4");
    }

    #[test]
    fn rejects_negative_payload() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   KSC LC-39A,-5,1,FT\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn parses_json_records() {
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5000, "class": 1,
             "Booster Version Category": "FT", "Flight Number": 40},
            {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 2000.5, "class": 0,
             "Booster Version Category": "v1.1"}
        ]"#;
        let records = parse_json(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].payload_kg, 5000.0);
        assert_eq!(records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.sites().len(), 3);

        let other = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(load_file(other.path()).is_err());
    }

    #[test]
    fn reads_parquet_with_integer_payload() {
        use arrow::datatypes::{Field, Schema};
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Int64, false),
            Field::new(CLASS_COLUMN, DataType::Int32, false),
            Field::new(BOOSTER_COLUMN, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])),
                Arc::new(Int64Array::from(vec![5300, 9600])),
                Arc::new(Int32Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["B5", "FT"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records()[1],
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Failure, "FT")
        );
    }
}
