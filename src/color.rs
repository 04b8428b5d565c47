use std::collections::BTreeMap;
use std::fmt;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// SeriesColor – an sRGB triple, serialised as "#rrggbb"
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesColor(pub [u8; 3]);

impl SeriesColor {
    pub const GRAY: SeriesColor = SeriesColor([128, 128, 128]);
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for SeriesColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            SeriesColor([rgb.red, rgb.green, rgb.blue])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: country → SeriesColor
// ---------------------------------------------------------------------------

/// Maps every country of a dataset to a distinct colour.
///
/// Built from the full sorted country list, so a country keeps its colour
/// however the chart is filtered.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, SeriesColor>,
    default_color: SeriesColor,
}

impl ColorMap {
    pub fn new(countries: &[String]) -> Self {
        let palette = generate_palette(countries.len());
        let mapping = countries.iter().cloned().zip(palette).collect();
        ColorMap {
            mapping,
            default_color: SeriesColor::GRAY,
        }
    }

    pub fn color_for(&self, country: &str) -> SeriesColor {
        self.mapping
            .get(country)
            .copied()
            .unwrap_or(self.default_color)
    }
}
