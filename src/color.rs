use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::PercentileScale;

// ---------------------------------------------------------------------------
// Curve colours: percentile label → Color32
// ---------------------------------------------------------------------------

/// One colour per percentile curve, on a cool-to-warm hue ramp so the low
/// percentiles read blue and the high ones red, with the median drawn
/// strongest.
#[derive(Debug, Clone)]
pub struct CurvePalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CurvePalette {
    /// Build the palette for a standard's scale.
    pub fn new(scale: &PercentileScale) -> Self {
        let n = scale.len();
        let mapping: BTreeMap<String, Color32> = scale
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.5 };
                // 220° (blue) down to 0° (red) across the scale.
                let hsl = Hsl::new(220.0 * (1.0 - t), 0.70, 0.55);
                let rgb: Srgb = hsl.into_color();
                let color = Color32::from_rgb(
                    (rgb.red * 255.0) as u8,
                    (rgb.green * 255.0) as u8,
                    (rgb.blue * 255.0) as u8,
                );
                (label.to_string(), color)
            })
            .collect();

        CurvePalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a percentile curve.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Median curves get a heavier stroke than the outer bands.
    pub fn width_for(&self, label: &str) -> f32 {
        if label == "p50" { 2.5 } else { 1.2 }
    }
}
