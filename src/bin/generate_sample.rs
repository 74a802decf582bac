use anyhow::Result;

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

    // (state, baseline literacy %, baseline infant mortality per 1000)
    let states: [(&str, f64, f64); 6] = [
        ("Kerala", 93.9, 6.0),
        ("Goa", 87.4, 8.5),
        ("Punjab", 76.7, 21.0),
        ("Assam", 73.2, 32.0),
        ("Rajasthan", 67.1, 35.0),
        ("Bihar", 63.8, 38.0),
    ];
    let years = 2015..=2021;

    let output_path = "survey_sample.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "State",
        "Year",
        "literacy_rate",
        "infant_mortality",
        "households_surveyed",
    ])?;

    let mut rows = 0usize;
    for (state, literacy, mortality) in states {
        for year in years.clone() {
            let drift = (year - 2015) as f64;
            let lit = (literacy + 0.4 * drift + rng.gauss(0.0, 0.3)).clamp(0.0, 100.0);
            let mort = (mortality - 0.9 * drift + rng.gauss(0.0, 0.5)).max(1.0);
            let households = 2500 + (rng.next_f64() * 1500.0) as i64;

            writer.write_record([
                state.to_string(),
                year.to_string(),
                format!("{lit:.1}"),
                format!("{mort:.1}"),
                households.to_string(),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} survey rows to {output_path}");
    Ok(())
}
