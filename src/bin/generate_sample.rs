use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One output row.  Billing and dates are written as text because a small
/// fraction of them is deliberately unparseable, exercising the cleaning
/// pass of the main binary.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Billing Amount")]
    billing_amount: String,
    #[serde(rename = "Date of Admission")]
    date_of_admission: String,
    #[serde(rename = "Discharge Date")]
    discharge_date: String,
    #[serde(rename = "Insurance Provider")]
    insurance_provider: String,
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

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.range(0, items.len() as i64 - 1) as usize]
    }
}

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bobby", "Carmen", "Diego", "Elena", "Farid", "Grace", "Henrik", "Ingrid", "Jamal",
    "Keiko", "Luis", "Maya", "Noor", "Oscar", "Priya", "Quinn", "Rosa", "Samir", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Chen", "Okafor", "Novak", "Haddad", "Kim", "Larsen", "Moreau", "Patel",
    "Silva", "Tanaka", "Weber", "Yilmaz", "Zhang",
];

const PROVIDERS: &[&str] = &["Medicare", "Aetna", "Cigna", "Blue Cross", "UnitedHealth"];

fn main() {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid start date");

    let output_path = "healthcare_dataset.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let n_rows = 600;
    for _ in 0..n_rows {
        let admission = start + Duration::days(rng.range(0, 364));
        let stay = rng.range(0, 14);
        let discharge = admission + Duration::days(stay);

        // ~2% unparseable billing, ~2% invalid admission dates: the main
        // binary's cleaning pass is expected to drop these rows.
        let billing_amount = if rng.next_f64() < 0.02 {
            rng.pick(&["N/A", "", "pending"]).to_string()
        } else {
            format!("{:.2}", 100.0 + rng.next_f64() * 49_900.0)
        };
        let date_of_admission = if rng.next_f64() < 0.02 {
            format!("{}-13-2020", rng.range(29, 32))
        } else {
            admission.format("%d-%m-%Y").to_string()
        };

        let row = SampleRow {
            name: format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES)),
            age: rng.range(18, 90),
            gender: rng.pick(&["Female", "Male"]).to_string(),
            billing_amount,
            date_of_admission,
            discharge_date: discharge.format("%d-%m-%Y").to_string(),
            insurance_provider: rng.pick(PROVIDERS).to_string(),
        };
        writer.serialize(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {n_rows} records to {output_path}");
}
