use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

/// Write a deterministic synthetic salary table for the dashboard.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "dados-imersao-final.csv")]
    output: PathBuf,

    /// Number of records to generate.
    #[arg(long, default_value_t = 5_000)]
    rows: usize,

    /// PRNG seed; the same seed always yields the same file.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One row in the layout of the Portuguese-headed export.
#[derive(Serialize)]
struct Row {
    ano: i32,
    senioridade: &'static str,
    contrato: &'static str,
    tamanho_empresa: &'static str,
    cargo: &'static str,
    remoto: &'static str,
    residencia_iso3: &'static str,
    usd: f64,
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

    /// Pick from `(item, weight)` pairs.
    fn weighted<T: Copy>(&mut self, choices: &[(T, f64)]) -> T {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for &(item, weight) in choices {
            if target < weight {
                return item;
            }
            target -= weight;
        }
        choices[choices.len() - 1].0
    }
}

// (role, base salary in USD)
const ROLES: [(&str, f64); 12] = [
    ("Data Scientist", 140_000.0),
    ("Data Engineer", 135_000.0),
    ("Data Analyst", 95_000.0),
    ("Machine Learning Engineer", 160_000.0),
    ("Analytics Engineer", 130_000.0),
    ("Research Scientist", 170_000.0),
    ("Data Architect", 165_000.0),
    ("Applied Scientist", 175_000.0),
    ("BI Developer", 90_000.0),
    ("Data Manager", 120_000.0),
    ("AI Engineer", 155_000.0),
    ("Head of Data", 200_000.0),
];

// (ISO3, cost-of-labour factor, weight)
const COUNTRIES: [(&str, f64, f64); 10] = [
    ("USA", 1.0, 60.0),
    ("GBR", 0.70, 8.0),
    ("CAN", 0.80, 6.0),
    ("DEU", 0.72, 5.0),
    ("ESP", 0.50, 4.0),
    ("FRA", 0.60, 3.0),
    ("IND", 0.25, 4.0),
    ("BRA", 0.30, 3.0),
    ("PRT", 0.45, 2.0),
    ("NLD", 0.70, 2.0),
];

const SENIORITY: [(&str, f64); 4] = [("junior", 0.65), ("pleno", 0.85), ("senior", 1.0), ("executivo", 1.35)];

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    for _ in 0..args.rows {
        let (cargo, base) = ROLES[(rng.next_u64() % ROLES.len() as u64) as usize];
        let country = rng.weighted(&COUNTRIES.map(|c| ((c.0, c.1), c.2)));
        let (senioridade, level) =
            rng.weighted(&SENIORITY.map(|s| (s, if s.0 == "senior" { 4.0 } else { 2.0 })));
        let ano = rng.weighted(&[(2020, 1.0), (2021, 2.0), (2022, 4.0), (2023, 6.0), (2024, 8.0), (2025, 3.0)]);
        let growth = 1.0 + 0.03 * (ano - 2020) as f64;

        let usd = rng
            .gauss(base * level * country.1 * growth, base * 0.15)
            .max(15_000.0)
            .round();

        writer.serialize(Row {
            ano,
            senioridade,
            contrato: rng.weighted(&[("integral", 95.0), ("contrato", 2.0), ("freelancer", 1.5), ("parcial", 1.5)]),
            tamanho_empresa: rng.weighted(&[("grande", 3.0), ("media", 6.0), ("pequena", 1.0)]),
            cargo,
            remoto: rng.weighted(&[("presencial", 5.0), ("remoto", 4.0), ("hibrido", 1.0)]),
            residencia_iso3: country.0,
            usd,
        })?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} salary records to {}",
        args.rows,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_write_the_dashboard_file() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from("dados-imersao-final.csv"));
        assert_eq!((args.rows, args.seed), (5_000, 42));
    }

    #[test]
    fn output_and_size_are_configurable() {
        let args =
            Args::try_parse_from(["generate_sample", "out.csv", "--rows", "10", "--seed", "7"]).unwrap();
        assert_eq!(args.output, PathBuf::from("out.csv"));
        assert_eq!((args.rows, args.seed), (10, 7));
    }

    #[test]
    fn weighted_choice_is_deterministic() {
        let choices = [("a", 1.0), ("b", 2.0), ("c", 3.0)];
        let mut first = SimpleRng::new(7);
        let mut second = SimpleRng::new(7);
        for _ in 0..50 {
            assert_eq!(first.weighted(&choices), second.weighted(&choices));
        }
    }
}
