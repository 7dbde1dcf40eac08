use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{Gender, GrowthSeries, ReferenceDataset, Standard};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the complete reference dataset from a directory holding one JSON
/// table per standard (`who-cdc-growth-data.json`, `hk2020-growth-data.json`).
///
/// All-or-nothing: if any table is missing, unparsable, or structurally
/// invalid the whole load fails and no partial dataset is produced.
pub fn load_dir(dir: &Path) -> Result<ReferenceDataset> {
    let mut tables = BTreeMap::new();

    for standard in Standard::ALL {
        let path = dir.join(standard.table_file());
        let table = load_table(&path, standard)
            .with_context(|| format!("loading {standard} table from {}", path.display()))?;
        for (gender, series) in table {
            tables.insert((standard, gender), series);
        }
    }

    Ok(ReferenceDataset::new(tables))
}

// ---------------------------------------------------------------------------
// Per-standard table parsing
// ---------------------------------------------------------------------------

/// On-disk shape of one standard's table:
///
/// ```json
/// {
///   "boy":  { "ages": [0, 1, ...], "percentiles": { "p50": [49.9, ...], ... } },
///   "girl": { "ages": [0, 1, ...], "percentiles": { "p50": [49.1, ...], ... } }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct TableFile {
    boy: GenderBlock,
    girl: GenderBlock,
}

#[derive(Debug, Deserialize)]
struct GenderBlock {
    ages: Vec<f64>,
    percentiles: BTreeMap<String, Vec<f64>>,
}

fn load_table(path: &Path, standard: Standard) -> Result<Vec<(Gender, GrowthSeries)>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let table: TableFile = serde_json::from_str(&text).context("parsing JSON")?;

    let mut out = Vec::with_capacity(2);
    for (gender, block) in [(Gender::Boy, table.boy), (Gender::Girl, table.girl)] {
        let series = block_to_series(block, standard)
            .with_context(|| format!("'{}' block", gender.table_key()))?;
        out.push((gender, series));
    }
    Ok(out)
}

/// Validate one gender block and re-shape it into scale-ordered curves.
fn block_to_series(block: GenderBlock, standard: Standard) -> Result<GrowthSeries> {
    let GenderBlock { ages, mut percentiles } = block;
    let scale = standard.scale();

    if ages.len() < 2 {
        bail!("expected at least 2 reference ages, found {}", ages.len());
    }
    if !ages.iter().all(|a| a.is_finite()) {
        bail!("non-finite reference age");
    }
    if !ages.windows(2).all(|w| w[0] < w[1]) {
        bail!("reference ages must be strictly increasing");
    }

    let mut curves = Vec::with_capacity(scale.len());
    for &label in scale.labels {
        let curve = percentiles
            .remove(label)
            .with_context(|| format!("missing percentile curve '{label}'"))?;
        if curve.len() != ages.len() {
            bail!(
                "curve '{label}' has {} heights but there are {} ages",
                curve.len(),
                ages.len()
            );
        }
        if !curve.iter().all(|h| h.is_finite()) {
            bail!("non-finite height in curve '{label}'");
        }
        curves.push(curve);
    }

    if let Some(unknown) = percentiles.keys().next() {
        bail!("unknown percentile curve '{unknown}' for the {standard} scale");
    }

    Ok(GrowthSeries { ages, curves })
}
