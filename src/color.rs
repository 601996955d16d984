use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: insurance provider → Color32
// ---------------------------------------------------------------------------

/// Maps each insurance provider to a distinct colour for the billing chart.
#[derive(Debug, Clone, Default)]
pub struct ProviderColors {
    mapping: BTreeMap<String, Color32>,
}

impl ProviderColors {
    /// Build a colour map from the providers in chart order.
    pub fn new<'a>(providers: impl Iterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = providers.collect();
        let palette = generate_palette(names.len());
        let mapping = names
            .into_iter()
            .zip(palette)
            .map(|(name, color)| (name.to_string(), color))
            .collect();
        ProviderColors { mapping }
    }

    /// Look up the colour for a provider.
    pub fn color_for(&self, provider: &str) -> Color32 {
        self.mapping
            .get(provider)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
