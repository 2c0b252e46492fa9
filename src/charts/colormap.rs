//! Value Colormap Module
//! Rainbow-style gradient keyed to value magnitude.

use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// Hue sweep of the rainbow scale, red (low) through violet (high).
const HUE_MIN: f32 = 0.0;
const HUE_MAX: f32 = 300.0;

/// Maps values to colors, normalized to the [min, max] of a single chart.
///
/// Normalization is per chart, not global: the same value may map to a
/// different color on another chart.
#[derive(Debug, Clone, Copy)]
pub struct ValueColormap {
    vmin: f64,
    vmax: f64,
}

impl ValueColormap {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Color for a value; out-of-range values clamp to the scale ends.
    pub fn color_for(&self, value: f64) -> RGBColor {
        Self::color_at(self.normalize(value))
    }

    /// Position of a value on the [0, 1] scale. A zero-width range maps
    /// everything to the midpoint.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return 0.5;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }

    /// Color at position `t` of the [0, 1] scale, as an evenly spaced hue.
    pub fn color_at(t: f64) -> RGBColor {
        let hue = HUE_MIN + (HUE_MAX - HUE_MIN) * t.clamp(0.0, 1.0) as f32;
        let rgb: Srgb = Hsl::new(hue, 0.9, 0.5).into_color();
        RGBColor(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_scale_ends() {
        let cmap = ValueColormap::new(10.0, 20.0);
        assert_eq!(cmap.color_for(10.0), ValueColormap::color_at(0.0));
        assert_eq!(cmap.color_for(20.0), ValueColormap::color_at(1.0));
        // low end of the sweep is red-dominant
        let RGBColor(r, g, b) = ValueColormap::color_at(0.0);
        assert!(r > g && r > b);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let cmap = ValueColormap::new(0.0, 1.0);
        assert_eq!(cmap.color_for(-5.0), ValueColormap::color_at(0.0));
        assert_eq!(cmap.color_for(9.0), ValueColormap::color_at(1.0));
    }

    #[test]
    fn degenerate_range_uses_midpoint() {
        let cmap = ValueColormap::new(7.0, 7.0);
        assert!((cmap.normalize(7.0) - 0.5).abs() < 1e-9);
        assert_eq!(cmap.color_for(7.0), ValueColormap::color_at(0.5));
    }
}
