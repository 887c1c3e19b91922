//! Writes `sample_sales.csv`, a larger synthetic dataset for trying the app.

/// Minimal deterministic PRNG (xorshift64*), enough for sample data.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let categories = ["Food", "Tech", "Clothing", "Books"];
    let countries = ["USA", "UK", "Germany", "France", "Japan"];

    let mut out = String::from("Date,Sales,Profit,Category,Country\n");
    for day in 0..365u32 {
        let month = day / 31 + 1;
        let dom = day % 31 + 1;
        let date = format!("2024-{month:02}-{dom:02}");

        let sales = 100.0 + rng.next_f64() * 400.0;
        let margin = 0.2 + rng.next_f64() * 0.3;
        let profit = sales * margin;

        out.push_str(&format!(
            "{date},{:.0},{:.0},{},{}\n",
            sales,
            profit,
            rng.pick(&categories),
            rng.pick(&countries),
        ));
    }

    let output_path = "sample_sales.csv";
    std::fs::write(output_path, &out).expect("Failed to write sample file");
    println!("Wrote 365 rows to {output_path}");
}
