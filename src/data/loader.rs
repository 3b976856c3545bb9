use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{
    LaunchDataset, LaunchRecord, Outcome, BOOSTER_COLUMN, CLASS_COLUMN, PAYLOAD_COLUMN,
    SITE_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Launch Site`, `Payload Mass (kg)`,
///                `Booster Version Category` and `class` (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – the same four columns, any numeric width for the numbers
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            read_csv(file)?
        }
        "json" => {
            let file = std::fs::File::open(path).context("opening JSON file")?;
            read_json(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = LaunchDataset::from_records(records)
        .with_context(|| format!("validating {}", path.display()))?;
    log::debug!(
        "{} launches, {} sites, payload {}..={} kg",
        dataset.len(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Deserialize launch rows by header name. Leading index columns, flight
/// numbers and the like are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<LaunchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(records)
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
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(reader: R) -> Result<Vec<LaunchRecord>> {
    serde_json::from_reader(reader).context("parsing JSON launch records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch records from a Parquet file written by Pandas or Polars.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut records)?;
    }
    Ok(records)
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = column_as(batch, SITE_COLUMN, &DataType::Utf8)?;
    let payloads = column_as(batch, PAYLOAD_COLUMN, &DataType::Float64)?;
    let boosters = column_as(batch, BOOSTER_COLUMN, &DataType::Utf8)?;
    let classes = column_as(batch, CLASS_COLUMN, &DataType::Float64)?;

    let sites = downcast::<StringArray>(&sites, SITE_COLUMN)?;
    let payloads = downcast::<Float64Array>(&payloads, PAYLOAD_COLUMN)?;
    let boosters = downcast::<StringArray>(&boosters, BOOSTER_COLUMN)?;
    let classes = downcast::<Float64Array>(&classes, CLASS_COLUMN)?;

    for row in 0..batch.num_rows() {
        if sites.is_null(row)
            || payloads.is_null(row)
            || boosters.is_null(row)
            || classes.is_null(row)
        {
            bail!("Row {row}: null value in a required column");
        }
        let outcome = Outcome::try_from(classes.value(row))
            .with_context(|| format!("Row {row}: reading '{CLASS_COLUMN}'"))?;

        out.push(LaunchRecord {
            site: sites.value(row).to_string(),
            payload_mass_kg: payloads.value(row),
            booster_category: boosters.value(row).to_string(),
            outcome,
        });
    }
    Ok(())
}

// -- Arrow helpers --

/// Look up a column by name and cast it to `target` (e.g. Int32 → Float64,
/// Boolean → Float64, LargeUtf8 → Utf8).
fn column_as(batch: &RecordBatch, name: &str, target: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))?;
    cast(col.as_ref(), target).with_context(|| {
        format!(
            "column '{name}' has type {:?}, expected something castable to {target:?}",
            col.data_type()
        )
    })
}

fn downcast<'a, T: 'static>(col: &'a ArrayRef, name: &str) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column '{name}' has unexpected array type"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Int32Array};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,38,KSC LC-39A,1,5300.0,F9 FT B1031.1,FT
3,50,VAFB SLC-4E,1,9600.0,F9 B4 B1041.1,B4
";

    #[test]
    fn csv_rows_map_by_header_and_ignore_extra_columns() {
        let records = read_csv(CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[1].site, "CCAFS LC-40");
        assert_eq!(records[1].payload_mass_kg, 525.0);
        assert_eq!(records[2].booster_category, "FT");
        assert_eq!(records[3].outcome, Outcome::Success);
        assert_eq!(records[0].outcome, Outcome::Failure);
    }

    #[test]
    fn csv_with_bad_class_reports_row() {
        let text = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,10,FT,7\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn json_records_load() {
        let text = r#"[
            {"Launch Site": "A", "Payload Mass (kg)": 500, "Booster Version Category": "FT", "class": 1},
            {"Launch Site": "B", "Payload Mass (kg)": 600.5, "Booster Version Category": "B5", "class": 0}
        ]"#;
        let records = read_json(text.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].payload_mass_kg, 500.0);
        assert_eq!(records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
    }

    #[test]
    fn unsupported_extension_and_empty_table_fail() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(load_file(file.path()).is_err());

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Launch Site,Payload Mass (kg),Booster Version Category,class\n")
            .unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no launch records"));
    }

    fn write_parquet(batch: &RecordBatch) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer =
            ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn class_batch(classes: Vec<f64>) -> RecordBatch {
        let n = classes.len();
        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Float64, false),
            Field::new(BOOSTER_COLUMN, DataType::Utf8, false),
            Field::new(CLASS_COLUMN, DataType::Float64, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A"; n])),
                Arc::new(Float64Array::from(vec![1000.0; n])),
                Arc::new(StringArray::from(vec!["FT"; n])),
                Arc::new(Float64Array::from(classes)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn parquet_float_class_must_be_whole() {
        let file = write_parquet(&class_batch(vec![1.0, 0.0]));
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);

        let file = write_parquet(&class_batch(vec![1.0, 0.5]));
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 1"));

        let file = write_parquet(&class_batch(vec![1.9]));
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn parquet_columns_are_cast_to_expected_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Int32, false),
            Field::new(BOOSTER_COLUMN, DataType::Utf8, false),
            Field::new(CLASS_COLUMN, DataType::Boolean, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A", "CCAFS SLC-40"])),
                Arc::new(Int32Array::from(vec![2490, 3600])),
                Arc::new(StringArray::from(vec!["FT", "B5"])),
                Arc::new(BooleanArray::from(vec![true, false])),
            ],
        )
        .unwrap();

        let file = write_parquet(&batch);

        let ds = load_file(file.path()).unwrap();
        let recs = ds.records();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].payload_mass_kg, 2490.0);
        assert_eq!(recs[0].outcome, Outcome::Success);
        assert_eq!(recs[1].site, "CCAFS SLC-40");
        assert_eq!(recs[1].outcome, Outcome::Failure);
    }
}
