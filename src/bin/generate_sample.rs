use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_YEAR: i32 = 1800;
const LAST_YEAR: i32 = 2100;

/// (country, GDP per capita in 1800, yearly growth, year growth takes off)
const COUNTRIES: &[(&str, f64, f64, i32)] = &[
    ("Argentina", 1400.0, 0.014, 1870),
    ("Australia", 1600.0, 0.017, 1850),
    ("Brazil", 1000.0, 0.015, 1900),
    ("China", 900.0, 0.030, 1978),
    ("Egypt", 800.0, 0.013, 1920),
    ("France", 1700.0, 0.018, 1830),
    ("Germany", 1600.0, 0.019, 1840),
    ("India", 800.0, 0.025, 1990),
    ("Japan", 900.0, 0.022, 1880),
    ("Kenya", 600.0, 0.012, 1960),
    ("Mexico", 1000.0, 0.014, 1890),
    ("Nigeria", 600.0, 0.011, 1960),
    ("Norway", 1300.0, 0.021, 1850),
    ("United Kingdom", 2500.0, 0.015, 1800),
    ("United States", 2000.0, 0.018, 1820),
];

fn gdp_at(year: i32, base: f64, growth: f64, takeoff: i32, rng: &mut SimpleRng) -> f64 {
    // Slow pre-industrial drift, then compound growth from `takeoff`.
    let early = (year.min(takeoff) - FIRST_YEAR) as f64 * 0.002;
    let late = (year - takeoff).max(0) as f64 * growth;
    let trend = base * (early + late).exp();
    (trend * (1.0 + rng.gauss(0.0, 0.02))).max(100.0)
}

/// Values of ten thousand and above are written the way the source data
/// writes them: "12.3k".
fn format_cell(value: f64) -> String {
    if value >= 10_000.0 {
        format!("{:.1}k", value / 1000.0)
    } else {
        format!("{value:.0}")
    }
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let years: Vec<i32> = (FIRST_YEAR..=LAST_YEAR).collect();

    let mut header = vec!["country".to_string()];
    header.extend(years.iter().map(|y| y.to_string()));

    // Row-major text cells, exactly as they will be written.
    let rows: Vec<Vec<String>> = COUNTRIES
        .iter()
        .map(|&(name, base, growth, takeoff)| {
            let mut row = vec![name.to_string()];
            row.extend(
                years
                    .iter()
                    .map(|&y| format_cell(gdp_at(y, base, growth, takeoff, &mut rng))),
            );
            row
        })
        .collect();

    // ---- CSV ----
    let csv_path = "gdp_pcap.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV file")?;
    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    // ---- Parquet (all columns Utf8, same cells) ----
    let schema = Arc::new(Schema::new(
        header
            .iter()
            .map(|name| Field::new(name.as_str(), DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = (0..header.len())
        .map(|col| {
            let values: Vec<&str> = rows.iter().map(|row| row[col].as_str()).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let parquet_path = "gdp_pcap.parquet";
    let file = std::fs::File::create(parquet_path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} countries × {} years to {csv_path} and {parquet_path}",
        rows.len(),
        years.len()
    );
    Ok(())
}
