use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

/// Diverging red → yellow → green scale; `t` is clamped to `[0, 1]`.
pub fn red_yellow_green(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    hsl_to_color32(t as f32 * 120.0, 0.70, 0.48)
}

/// Position of `value` within `[min, max]`, or the scale midpoint when the
/// range is degenerate.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        0.5
    } else {
        (value - min) / range
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the category labels of one column to distinct colours, so a
/// category keeps its colour while the filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the full set of labels of a column.
    pub fn new(labels: impl IntoIterator<Item = String>) -> Self {
        let labels: Vec<String> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn scale_runs_red_to_green() {
        let low = red_yellow_green(0.0);
        let high = red_yellow_green(1.0);
        assert!(low.r() > low.g());
        assert!(high.g() > high.r());
        assert_eq!(red_yellow_green(-3.0), low);
        assert_eq!(red_yellow_green(f64::NAN), red_yellow_green(0.5));
    }

    #[test]
    fn degenerate_range_normalizes_to_midpoint() {
        assert_eq!(normalize(7.0, 7.0, 7.0), 0.5);
        assert_eq!(normalize(15.0, 10.0, 20.0), 0.5);
        assert_eq!(normalize(20.0, 10.0, 20.0), 1.0);
    }

    #[test]
    fn unknown_labels_fall_back_to_gray() {
        let map = ColorMap::new(["hybrid".to_string(), "remote".to_string()]);
        assert_ne!(map.color_for("hybrid"), map.color_for("remote"));
        assert_eq!(map.color_for("onsite"), Color32::GRAY);
    }
}
