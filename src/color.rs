use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
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
            srgb_to_color32(hsl.into_color())
        })
        .collect()
}

/// Maps each distinct bar label to one palette colour.
pub fn label_colors<'a>(labels: impl Iterator<Item = &'a str>) -> BTreeMap<String, Color32> {
    let distinct: Vec<String> = {
        let mut seen = Vec::new();
        for l in labels {
            if !seen.iter().any(|s: &String| s == l) {
                seen.push(l.to_string());
            }
        }
        seen
    };
    let palette = generate_palette(distinct.len());
    distinct.into_iter().zip(palette).collect()
}

// ---------------------------------------------------------------------------
// Diverging correlation scale
// ---------------------------------------------------------------------------

/// Map a correlation in [-1, 1] to a blue → white → red scale.
/// NaN (zero-variance column) renders gray.
pub fn correlation_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::GRAY;
    }
    let r = r.clamp(-1.0, 1.0) as f32;
    let white = Srgb::new(0.96, 0.96, 0.96);
    let blue = Srgb::new(0.13, 0.28, 0.65);
    let red = Srgb::new(0.75, 0.13, 0.15);
    let lerp = |a: Srgb, b: Srgb, t: f32| {
        Srgb::new(
            a.red + (b.red - a.red) * t,
            a.green + (b.green - a.green) * t,
            a.blue + (b.blue - a.blue) * t,
        )
    };
    let mixed = if r < 0.0 {
        lerp(white, blue, -r)
    } else {
        lerp(white, red, r)
    };
    srgb_to_color32(mixed)
}

fn srgb_to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert_eq!(generate_palette(5).len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn correlation_extremes_diverge() {
        let negative = correlation_color(-1.0);
        let positive = correlation_color(1.0);
        assert!(negative.b() > negative.r());
        assert!(positive.r() > positive.b());
        assert_eq!(correlation_color(f64::NAN), Color32::GRAY);
    }

    #[test]
    fn label_colors_are_stable_per_label() {
        let colors = label_colors(["a", "b", "a", "c"].into_iter());
        assert_eq!(colors.len(), 3);
    }
}
