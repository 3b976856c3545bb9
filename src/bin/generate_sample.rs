use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// (category, first flight number, success probability, max payload kg)
const BOOSTERS: [(&str, i64, f64, f64); 5] = [
    ("v1.0", 1, 0.0, 700.0),
    ("v1.1", 6, 0.2, 4_500.0),
    ("FT", 21, 0.65, 9_600.0),
    ("B4", 42, 0.55, 9_600.0),
    ("B5", 50, 0.95, 9_600.0),
];
const LAUNCHES: i64 = 56;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One synthetic launch row, in source column order.
struct Launch {
    flight: i64,
    site: &'static str,
    class: i64,
    payload: f64,
    booster_version: String,
    category: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (1..=LAUNCHES)
        .map(|flight| {
            // Latest booster generation available at this flight number.
            let (category, _, p_success, max_payload) = BOOSTERS
                .iter()
                .rev()
                .find(|(_, first, ..)| flight >= *first)
                .copied()
                .unwrap_or(BOOSTERS[0]);

            // Early flights only flew from the Cape.
            let site = if flight < 10 { SITES[0] } else { *rng.pick(&SITES) };
            let payload = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < p_success);

            Launch {
                flight,
                site,
                class,
                payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight),
                category,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "",
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for (i, l) in launches.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload),
            l.booster_version.clone(),
            l.category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let csv_path = "spacex_launch_dash.csv";
    let parquet_path = "spacex_launch_dash.parquet";
    write_csv(csv_path, &launches)?;
    write_parquet(parquet_path, &launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {csv_path} and {parquet_path}",
        launches.len()
    );
    Ok(())
}
