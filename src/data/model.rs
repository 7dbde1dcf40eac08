use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Standard – which reference growth survey the curves come from
// ---------------------------------------------------------------------------

/// A reference growth standard. Each standard ships its own percentile
/// scale and its own JSON table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standard {
    WhoCdc,
    Hk2020,
}

impl Standard {
    pub const ALL: [Standard; 2] = [Standard::WhoCdc, Standard::Hk2020];

    /// File name of the reference table inside the data directory.
    pub fn table_file(self) -> &'static str {
        match self {
            Standard::WhoCdc => "who-cdc-growth-data.json",
            Standard::Hk2020 => "hk2020-growth-data.json",
        }
    }

    /// The fixed, ordered percentile scale for this standard.
    pub fn scale(self) -> &'static PercentileScale {
        match self {
            Standard::WhoCdc => &WHO_CDC_SCALE,
            Standard::Hk2020 => &HK2020_SCALE,
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standard::WhoCdc => write!(f, "WHO/CDC"),
            Standard::Hk2020 => write!(f, "Hong Kong 2020"),
        }
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Boy,
    Girl,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Boy, Gender::Girl];

    /// Key of this gender's block in the reference table JSON.
    pub fn table_key(self) -> &'static str {
        match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Boy => write!(f, "Boy"),
            Gender::Girl => write!(f, "Girl"),
        }
    }
}

// ---------------------------------------------------------------------------
// PercentileScale – ordered labels and numeric values of a standard
// ---------------------------------------------------------------------------

/// The ordered percentile curves a standard defines, lowest to highest.
/// `labels[i]` is the JSON key of the curve whose percentile is `values[i]`.
#[derive(Debug)]
pub struct PercentileScale {
    pub labels: &'static [&'static str],
    pub values: &'static [f64],
}

impl PercentileScale {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn lowest(&self) -> f64 {
        self.values[0]
    }

    pub fn highest(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

pub static WHO_CDC_SCALE: PercentileScale = PercentileScale {
    labels: &["p3", "p10", "p25", "p50", "p75", "p90", "p97"],
    values: &[3.0, 10.0, 25.0, 50.0, 75.0, 90.0, 97.0],
};

pub static HK2020_SCALE: PercentileScale = PercentileScale {
    labels: &["p0_4", "p2", "p9", "p25", "p50", "p75", "p91", "p98", "p99_6"],
    values: &[0.4, 2.0, 9.0, 25.0, 50.0, 75.0, 91.0, 98.0, 99.6],
};

// ---------------------------------------------------------------------------
// GrowthSeries – one standard/gender slice of the reference tables
// ---------------------------------------------------------------------------

/// Reference heights for one standard and gender.
///
/// `ages` is strictly increasing (months). `curves` follows the standard's
/// scale order and every curve has one height (cm) per age. Heights are
/// assumed non-decreasing across percentiles at each age; the source tables
/// guarantee that, the loader does not re-check it.
#[derive(Debug, Clone)]
pub struct GrowthSeries {
    pub ages: Vec<f64>,
    pub curves: Vec<Vec<f64>>,
}

impl GrowthSeries {
    /// First and last reference age in months.
    pub fn age_range(&self) -> (f64, f64) {
        (self.ages[0], self.ages[self.ages.len() - 1])
    }
}

// ---------------------------------------------------------------------------
// ReferenceDataset – the complete loaded reference tables
// ---------------------------------------------------------------------------

/// All reference tables, loaded once and never mutated. The loader only
/// produces a dataset when every standard/gender combination parsed, so
/// lookups on a loaded dataset always succeed.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    tables: BTreeMap<(Standard, Gender), GrowthSeries>,
}

impl ReferenceDataset {
    pub fn new(tables: BTreeMap<(Standard, Gender), GrowthSeries>) -> Self {
        ReferenceDataset { tables }
    }

    pub fn series(&self, standard: Standard, gender: Gender) -> Option<&GrowthSeries> {
        self.tables.get(&(standard, gender))
    }
}

// ---------------------------------------------------------------------------
// MeasurementPoint – one recorded user measurement
// ---------------------------------------------------------------------------

/// A user measurement ranked against a reference standard. Serialized as-is
/// into the persisted saved-points file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// Creation timestamp in milliseconds; unique within a session.
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub standard: Standard,
    pub gender: Gender,
    pub age_years: f64,
    pub height: f64,
    /// Estimated percentile rank, e.g. `"55.3th"`, `"<3rd"`, `">99.6th"`.
    pub percentile: String,
    /// Measurement date, `YYYY-MM-DD`.
    pub date: String,
}

impl MeasurementPoint {
    /// Display name for lists and the chart legend.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(l) => l.clone(),
            None => format!("{:.1} y", self.age_years),
        }
    }
}
