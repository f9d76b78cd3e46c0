//! Writes a synthetic `spacex_launch_dash.csv` / `.parquet` pair into the
//! working directory so the dashboard has something to show.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const LAUNCHES: usize = 56;

const SITES: [(&str, u32); 4] = [
    ("CCAFS LC-40", 26),
    ("KSC LC-39A", 13),
    ("VAFB SLC-4E", 10),
    ("CCAFS SLC-40", 7),
];

/// (category, first flight number, payload range kg, success probability)
const ERAS: [(&str, usize, (f64, f64), f64); 5] = [
    ("v1.0", 1, (0.0, 700.0), 0.2),
    ("v1.1", 6, (500.0, 4500.0), 0.35),
    ("FT", 21, (1900.0, 9600.0), 0.8),
    ("B4", 45, (2200.0, 6800.0), 0.6),
    ("B5", 55, (3000.0, 15600.0), 0.95),
];

#[derive(Debug, Serialize)]
struct Launch {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

/// SplitMix64; deterministic so regenerated files are identical.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn pick_site(rng: &mut SplitMix64) -> &'static str {
    let total: u32 = SITES.iter().map(|(_, w)| w).sum();
    let mut ticket = (rng.unit() * total as f64) as u32;
    for (site, weight) in SITES {
        if ticket < weight {
            return site;
        }
        ticket -= weight;
    }
    SITES[0].0
}

fn era_for(flight: usize) -> (&'static str, (f64, f64), f64) {
    let (category, _, payload, p_success) = ERAS
        .iter()
        .rev()
        .find(|(_, first, _, _)| flight >= *first)
        .copied()
        .unwrap_or(ERAS[0]);
    (category, payload, p_success)
}

fn generate(rng: &mut SplitMix64) -> Vec<Launch> {
    (1..=LAUNCHES)
        .map(|flight| {
            let (category, (lo, hi), p_success) = era_for(flight);
            // Payloads are reported to the nearest kilogram.
            let payload = (lo + rng.unit() * (hi - lo)).round();
            let serial = 1000 + flight * 3 / 2;
            Launch {
                flight_number: flight as i64,
                launch_site: pick_site(rng).to_string(),
                class: i64::from(rng.unit() < p_success),
                payload_mass_kg: payload,
                booster_version: format!("F9 {category}  B{serial:04}"),
                booster_version_category: category.to_string(),
            }
        })
        .collect()
}

fn write_csv(launches: &[Launch], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for launch in launches {
        writer.serialize(launch).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(launches: &[Launch], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
        Arc::new(StringArray::from_iter_values(launches.iter().map(|l| &l.launch_site))),
        Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
        Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_mass_kg))),
        Arc::new(StringArray::from_iter_values(launches.iter().map(|l| &l.booster_version))),
        Arc::new(StringArray::from_iter_values(
            launches.iter().map(|l| &l.booster_version_category),
        )),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SplitMix64(42);
    let launches = generate(&mut rng);
    let successes = launches.iter().filter(|l| l.class == 1).count();

    write_csv(&launches, "spacex_launch_dash.csv")?;
    write_parquet(&launches, "spacex_launch_dash.parquet")?;

    log::info!("Wrote {} launches ({} successful)", launches.len(), successes);
    println!(
        "Wrote {} launches to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        launches.len()
    );
    Ok(())
}
