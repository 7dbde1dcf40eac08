use serde_json::{json, Map, Value};

// Synthetic reference tables for demoing the viewer without the licensed
// survey data. Curves are a smooth infant growth surge plus steady
// childhood growth, with percentile bands as z-score offsets that widen
// with age. Deterministic output.

/// Per-standard percentile labels and the z-scores of those percentiles.
struct Scale {
    file: &'static str,
    labels: &'static [&'static str],
    z_scores: &'static [f64],
}

const WHO_CDC: Scale = Scale {
    file: "who-cdc-growth-data.json",
    labels: &["p3", "p10", "p25", "p50", "p75", "p90", "p97"],
    z_scores: &[-1.881, -1.282, -0.674, 0.0, 0.674, 1.282, 1.881],
};

const HK2020: Scale = Scale {
    file: "hk2020-growth-data.json",
    labels: &["p0_4", "p2", "p9", "p25", "p50", "p75", "p91", "p98", "p99_6"],
    z_scores: &[-2.652, -2.054, -1.341, -0.674, 0.0, 0.674, 1.341, 2.054, 2.652],
};

/// Monthly for the first two years, quarterly afterwards, up to 18 years.
fn reference_ages() -> Vec<i64> {
    (0..=24).chain((27..=216).step_by(3)).collect()
}

/// Median height in cm at `months`, loosely following real growth tables:
/// ~50 cm at birth, ~75 cm at one year, ~160-170 cm at eighteen.
fn median_height(months: f64, boy: bool) -> f64 {
    let (birth, surge, slope) = if boy {
        (49.9, 26.0, 0.44)
    } else {
        (49.1, 25.0, 0.41)
    };
    birth + surge * (1.0 - (-months / 9.0).exp()) + slope * months
}

/// Standard deviation of height, widening from ~2 cm at birth to ~6 cm.
fn height_spread(months: f64) -> f64 {
    2.0 + 0.02 * months
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn gender_block(scale: &Scale, ages: &[i64], boy: bool) -> Value {
    let mut percentiles = Map::new();
    for (label, z) in scale.labels.iter().zip(scale.z_scores.iter()) {
        let curve: Vec<f64> = ages
            .iter()
            .map(|&m| {
                let months = m as f64;
                round1(median_height(months, boy) + z * height_spread(months))
            })
            .collect();
        percentiles.insert(label.to_string(), json!(curve));
    }
    json!({ "ages": ages, "percentiles": percentiles })
}

fn main() {
    let ages = reference_ages();

    std::fs::create_dir_all("data").expect("Failed to create data directory");

    for scale in [&WHO_CDC, &HK2020] {
        let table = json!({
            "boy": gender_block(scale, &ages, true),
            "girl": gender_block(scale, &ages, false),
        });
        let path = format!("data/{}", scale.file);
        let text = serde_json::to_string(&table).expect("Failed to serialize table");
        std::fs::write(&path, text).expect("Failed to write table");
        println!(
            "Wrote {} ages x {} percentile curves to {path}",
            ages.len(),
            scale.labels.len()
        );
    }
}
