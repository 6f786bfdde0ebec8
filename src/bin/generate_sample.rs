use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

/// One row of the generated file. `None` fields are written as empty cells.
#[derive(Serialize)]
struct Record {
    id: u32,
    name: &'static str,
    city: &'static str,
    age: Option<u32>,
    score: Option<f64>,
    active: bool,
}

const NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi",
];
const CITIES: &[&str] = &["Paris", "Rome", "Berlin", "Madrid", "Vienna"];

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }

    /// `true` with probability `1 / n`.
    fn one_in(&mut self, n: u64) -> bool {
        self.below(n) == 0
    }
}

/// Row count from the command line, default 200. Zero is refused: the header
/// is only written with the first record, and a headerless file is not CSV.
fn parse_row_count(arg: Option<&str>) -> Result<u32> {
    let Some(arg) = arg else {
        return Ok(200);
    };
    let n: u32 = arg
        .parse()
        .with_context(|| format!("invalid row count '{arg}'"))?;
    if n == 0 {
        bail!("row count must be at least 1");
    }
    Ok(n)
}

fn main() -> Result<()> {
    env_logger::init();

    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample.csv"));
    let n_rows = parse_row_count(std::env::args().nth(2).as_deref())?;

    let mut rng = SimpleRng::new(42);
    let mut writer =
        csv::Writer::from_path(&out).with_context(|| format!("creating {}", out.display()))?;

    for id in 1..=n_rows {
        let age = (!rng.one_in(8)).then(|| 18 + rng.below(60) as u32);
        let score = (!rng.one_in(10)).then(|| (rng.below(1000) as f64) / 10.0);
        let record = Record {
            id,
            name: rng.pick(NAMES),
            city: rng.pick(CITIES),
            age,
            score,
            active: rng.one_in(2),
        };
        writer.serialize(record).context("writing record")?;
    }
    writer.flush().context("flushing output")?;

    log::info!("Wrote {n_rows} rows to {}", out.display());
    println!("Wrote {n_rows} rows to {}", out.display());
    Ok(())
}
