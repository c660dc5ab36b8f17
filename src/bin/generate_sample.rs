use std::path::PathBuf;

use anyhow::{Context, Result};

use scival_dashboard::config::DEFAULT_DATA_FILE;
use scival_dashboard::data::export::export_csv;
use scival_dashboard::data::model::Record;

/// Subject areas used as topic cluster labels. Several rows share a label,
/// as topic clusters from one field do in a real export.
const FIELDS: [&str; 12] = [
    "Materials Science",
    "Computer Science",
    "Engineering",
    "Medicine",
    "Chemistry",
    "Environmental Science",
    "Physics and Astronomy",
    "Social Sciences",
    "Mathematics",
    "Business, Management and Accounting",
    "Agricultural and Biological Sciences",
    "Energy",
];

const ROWS: usize = 120;

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

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn generate(rng: &mut SimpleRng) -> Vec<Record> {
    (0..ROWS)
        .map(|_| {
            let field = FIELDS[(rng.next_u64() % FIELDS.len() as u64) as usize];
            // Output is heavy-tailed: most clusters are small.
            let scholarly_output = rng.gauss(2.5, 1.0).exp().round().max(1.0) as u64;
            let fwci = round_to(rng.gauss(0.9, 0.45).max(0.0), 2);
            let prominence_percentile = round_to((rng.next_f64() * 100.0).min(99.999), 3);
            let publication_share_growth_pct = round_to(rng.gauss(5.0, 40.0), 1);

            Record {
                topic_cluster: field.to_string(),
                scholarly_output,
                fwci,
                prominence_percentile,
                publication_share_growth_pct,
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let output_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    export_csv(&records, &output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote {} topic clusters to {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use scival_dashboard::data::loader::load_file;

    #[test]
    fn sample_is_deterministic_and_loadable() {
        let records = generate(&mut SimpleRng::new(42));
        assert_eq!(records, generate(&mut SimpleRng::new(42)));
        assert_eq!(records.len(), ROWS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DATA_FILE);
        export_csv(&records, &path).unwrap();
        let table = load_file(&path).unwrap();
        assert_eq!(table.records(), records.as_slice());
        assert!(table.cluster_options().len() <= FIELDS.len());
    }
}
