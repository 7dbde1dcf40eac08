use super::model::{GrowthSeries, PercentileScale};

// ---------------------------------------------------------------------------
// Percentile estimation: (age, height) → rank against the reference curves
// ---------------------------------------------------------------------------

/// Estimate the percentile rank of a `height` (cm) at `age_months` against
/// one standard/gender's reference curves.
///
/// Pure function. The age is first clamped into the table's age range, then
/// every curve's height is linearly interpolated inside the bracketing age
/// segment. The result is the linear interpolation of the percentile value
/// between the two curves the height falls between, rounded to one decimal:
/// `"62.4th"`. Heights at or below the lowest curve yield `"<3rd"` style
/// results, heights above the highest `">97th"`.
///
/// Out-of-range ages use the boundary segment's endpoint value rather than
/// extrapolating; callers that validate ages never hit that path.
pub fn estimate(
    series: &GrowthSeries,
    scale: &PercentileScale,
    age_months: f64,
    height: f64,
) -> String {
    let (first, last) = series.age_range();
    let months = age_months.clamp(first, last);

    let (lo, hi) = bracket(&series.ages, months);
    let span = series.ages[hi] - series.ages[lo];
    let age_factor = if span > 0.0 {
        (months - series.ages[lo]) / span
    } else {
        0.0
    };

    // Reference height of every percentile curve at the query age.
    let heights: Vec<f64> = series
        .curves
        .iter()
        .map(|curve| curve[lo] + (curve[hi] - curve[lo]) * age_factor)
        .collect();

    for (k, &curve_height) in heights.iter().enumerate() {
        if height <= curve_height {
            if k == 0 {
                return format!("<{}", ordinal(scale.lowest()));
            }
            let below = heights[k - 1];
            let gap = curve_height - below;
            let frac = if gap > 0.0 { (height - below) / gap } else { 0.0 };
            let value = scale.values[k - 1] + (scale.values[k] - scale.values[k - 1]) * frac;
            return ordinal((value * 10.0).round() / 10.0);
        }
    }

    format!(">{}", ordinal(scale.highest()))
}

/// Indices of the age segment with `ages[i] <= months <= ages[i + 1]`.
/// Falls back to the last segment; with a clamped query that only happens
/// for degenerate single-entry tables.
fn bracket(ages: &[f64], months: f64) -> (usize, usize) {
    for i in 0..ages.len().saturating_sub(1) {
        if ages[i] <= months && months <= ages[i + 1] {
            return (i, i + 1);
        }
    }
    (ages.len().saturating_sub(2), ages.len() - 1)
}

/// English ordinal rendering of a percentile value: integers take their
/// usual suffix ("2nd", "3rd", "50th"), fractional values always "th"
/// ("0.4th", "55.3th", "99.6th"). Also used for chart legend names.
pub fn ordinal(value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 1e-9 {
        return format!("{value:.1}th");
    }
    let n = nearest as i64;
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{HK2020_SCALE, WHO_CDC_SCALE};

    /// Synthetic WHO/CDC-shaped series: three ages, curves spaced 5 cm
    /// apart, each growing 10 cm per year.
    fn who_series() -> GrowthSeries {
        let ages = vec![0.0, 12.0, 24.0];
        let curves = (0..WHO_CDC_SCALE.len())
            .map(|k| {
                ages.iter()
                    .map(|&m| 50.0 + 5.0 * k as f64 + 10.0 * m / 12.0)
                    .collect()
            })
            .collect();
        GrowthSeries { ages, curves }
    }

    fn hk_series() -> GrowthSeries {
        let ages = vec![0.0, 6.0, 12.0];
        let curves = (0..HK2020_SCALE.len())
            .map(|k| {
                ages.iter()
                    .map(|&m| 48.0 + 4.0 * k as f64 + m)
                    .collect()
            })
            .collect();
        GrowthSeries { ages, curves }
    }

    #[test]
    fn exact_median_height_is_50th() {
        let series = who_series();
        // p50 is curve index 3: 65 cm at birth.
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 0.0, 65.0), "50th");
        // Halfway into the second segment p50 sits at 65 + 10 * 18 / 12.
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 18.0, 80.0), "50th");
    }

    #[test]
    fn below_lowest_curve_is_prefixed() {
        let series = who_series();
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 0.0, 40.0), "<3rd");
        // Exactly on the lowest curve also reports below-range.
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 0.0, 50.0), "<3rd");
    }

    #[test]
    fn above_highest_curve_is_prefixed() {
        let series = who_series();
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 12.0, 150.0), ">97th");
        let hk = hk_series();
        assert_eq!(estimate(&hk, &HK2020_SCALE, 6.0, 120.0), ">99.6th");
    }

    #[test]
    fn straddled_pair_interpolates_linearly() {
        let series = who_series();
        // Midway between p25 (60 cm) and p50 (65 cm) at birth.
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 0.0, 62.5), "37.5th");
        // One fifth of the way from p50 to p75: 50 + 25/5.
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 0.0, 66.0), "55th");
    }

    #[test]
    fn numeric_results_stay_inside_the_scale() {
        let series = hk_series();
        for tenth_mm in 400..=1100 {
            let height = tenth_mm as f64 / 10.0;
            let result = estimate(&series, &HK2020_SCALE, 6.0, height);
            if result.starts_with('<') || result.starts_with('>') {
                continue;
            }
            let value: f64 = result
                .trim_end_matches(|c: char| c.is_ascii_alphabetic())
                .parse()
                .unwrap();
            assert!(
                (HK2020_SCALE.lowest()..=HK2020_SCALE.highest()).contains(&value),
                "{height} cm gave out-of-scale {result}"
            );
        }
    }

    #[test]
    fn percentile_is_monotonic_in_height() {
        let series = who_series();
        let rank = |height: f64| -> f64 {
            let s = estimate(&series, &WHO_CDC_SCALE, 7.0, height);
            match s.as_bytes()[0] {
                b'<' => f64::NEG_INFINITY,
                b'>' => f64::INFINITY,
                _ => s.trim_end_matches(|c: char| c.is_ascii_alphabetic())
                    .parse()
                    .unwrap(),
            }
        };
        let mut previous = f64::NEG_INFINITY;
        for cm in 40..120 {
            let current = rank(cm as f64);
            assert!(current >= previous, "rank dropped at {cm} cm");
            previous = current;
        }
    }

    #[test]
    fn out_of_range_ages_clamp_to_the_boundary() {
        let series = who_series();
        let at_last = estimate(&series, &WHO_CDC_SCALE, 24.0, 80.0);
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, 60.0, 80.0), at_last);
        let at_first = estimate(&series, &WHO_CDC_SCALE, 0.0, 62.5);
        assert_eq!(estimate(&series, &WHO_CDC_SCALE, -3.0, 62.5), at_first);
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal(1.0), "1st");
        assert_eq!(ordinal(2.0), "2nd");
        assert_eq!(ordinal(3.0), "3rd");
        assert_eq!(ordinal(11.0), "11th");
        assert_eq!(ordinal(50.0), "50th");
        assert_eq!(ordinal(91.0), "91st");
        assert_eq!(ordinal(0.4), "0.4th");
        assert_eq!(ordinal(55.3), "55.3th");
        assert_eq!(ordinal(99.6), "99.6th");
    }
}
