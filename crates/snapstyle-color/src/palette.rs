//! Palette generation from color harmonies
//!
//! Each [`Harmony`] is a fixed rule over the base color's HSL triplet:
//! either a set of hue rotations at unchanged saturation and lightness, or
//! a ladder over lightness or saturation at the base hue. Palettes are a
//! pure function of the base color and are recomputed in full on every
//! change.

use crate::colorspace::{Hsl, Rgb, hex_to_hsl, hsl_to_rgb, rgb_to_hsl, wrap_hue};
use serde::Serialize;

/// Named color harmony
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Harmony {
    Complementary,
    Triadic,
    Analogous,
    SplitComplementary,
    TetradicSquare,
    TetradicRectangular,
    Monochromatic,
    Shades,
    Tones,
}

/// How a harmony derives its entries from the base color
enum Rule {
    /// Hue offsets in degrees; saturation and lightness unchanged
    Rotate(&'static [f64]),
    /// Lightness offsets in percentage points, clamped to [0, 100]
    LightnessOffsets(&'static [f64]),
    /// Absolute lightness values
    Lightness(&'static [f64]),
    /// Absolute saturation values
    Saturation(&'static [f64]),
}

impl Harmony {
    /// All harmonies, in display order
    pub const ALL: [Harmony; 9] = [
        Harmony::Complementary,
        Harmony::Triadic,
        Harmony::Analogous,
        Harmony::SplitComplementary,
        Harmony::TetradicSquare,
        Harmony::TetradicRectangular,
        Harmony::Monochromatic,
        Harmony::Shades,
        Harmony::Tones,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Harmony::Complementary => "Complementary",
            Harmony::Triadic => "Triadic",
            Harmony::Analogous => "Analogous",
            Harmony::SplitComplementary => "Split Complementary",
            Harmony::TetradicSquare => "Tetradic (Square)",
            Harmony::TetradicRectangular => "Tetradic (Rectangular)",
            Harmony::Monochromatic => "Monochromatic",
            Harmony::Shades => "Shades",
            Harmony::Tones => "Tones",
        }
    }

    fn rule(self) -> Rule {
        match self {
            Harmony::Complementary => Rule::Rotate(&[0.0, 180.0]),
            Harmony::Triadic => Rule::Rotate(&[0.0, 120.0, 240.0]),
            Harmony::Analogous => Rule::Rotate(&[-30.0, 0.0, 30.0]),
            Harmony::SplitComplementary => Rule::Rotate(&[0.0, 150.0, 210.0]),
            Harmony::TetradicSquare => Rule::Rotate(&[0.0, 90.0, 180.0, 270.0]),
            Harmony::TetradicRectangular => Rule::Rotate(&[0.0, 60.0, 180.0, 240.0]),
            Harmony::Monochromatic => {
                Rule::LightnessOffsets(&[-30.0, -15.0, 0.0, 15.0, 30.0])
            }
            Harmony::Shades => Rule::Lightness(&[90.0, 70.0, 50.0, 30.0, 10.0]),
            Harmony::Tones => Rule::Saturation(&[20.0, 40.0, 60.0, 80.0, 100.0]),
        }
    }

    /// Number of colors this harmony produces
    pub fn color_count(self) -> usize {
        match self.rule() {
            Rule::Rotate(v)
            | Rule::LightnessOffsets(v)
            | Rule::Lightness(v)
            | Rule::Saturation(v) => v.len(),
        }
    }
}

/// An ordered set of colors produced by one harmony
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub harmony: Harmony,
    pub colors: Vec<Rgb>,
}

impl Palette {
    /// Display name of the harmony
    pub fn name(&self) -> &'static str {
        self.harmony.name()
    }

    /// Colors as lowercase `#rrggbb` strings, in display order
    pub fn hexes(&self) -> Vec<String> {
        self.colors.iter().map(Rgb::to_hex).collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

fn entry(h: f64, s: f64, l: f64) -> Rgb {
    hsl_to_rgb(Hsl::new(
        wrap_hue(h),
        s.clamp(0.0, 100.0),
        l.clamp(0.0, 100.0),
    ))
}

/// Generate one harmony's palette from a base color.
pub fn generate(harmony: Harmony, base: Hsl) -> Palette {
    let Hsl { h, s, l } = base;
    let colors = match harmony.rule() {
        Rule::Rotate(offsets) => offsets.iter().map(|d| entry(h + d, s, l)).collect(),
        Rule::LightnessOffsets(offsets) => offsets.iter().map(|d| entry(h, s, l + d)).collect(),
        Rule::Lightness(values) => values.iter().map(|&v| entry(h, s, v)).collect(),
        Rule::Saturation(values) => values.iter().map(|&v| entry(h, v, l)).collect(),
    };
    Palette { harmony, colors }
}

/// Generate all nine palettes, in [`Harmony::ALL`] order.
pub fn generate_all(base: Hsl) -> Vec<Palette> {
    Harmony::ALL.iter().map(|&h| generate(h, base)).collect()
}

/// Generate all palettes for an RGB base color.
pub fn generate_all_from_rgb(base: Rgb) -> Vec<Palette> {
    generate_all(rgb_to_hsl(base))
}

/// Generate all palettes for hex text; invalid text uses the fallback color.
pub fn generate_all_from_hex(hex: &str) -> Vec<Palette> {
    generate_all(hex_to_hsl(hex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::{hex_to_rgb, rgb_to_hsv};

    #[test]
    fn test_names_in_order() {
        let names: Vec<_> = Harmony::ALL.iter().map(|h| h.name()).collect();
        assert_eq!(names[0], "Complementary");
        assert_eq!(names[3], "Split Complementary");
        assert_eq!(names[5], "Tetradic (Rectangular)");
        assert_eq!(names[8], "Tones");
    }

    #[test]
    fn test_cardinality_for_extreme_bases() {
        for hex in ["#000000", "#ffffff", "#808080", "#3b82f6", "#ff0000"] {
            let palettes = generate_all_from_hex(hex);
            assert_eq!(palettes.len(), 9);
            for p in &palettes {
                assert_eq!(p.len(), p.harmony.color_count());
            }
            assert_eq!(palettes[0].len(), 2);
            assert_eq!(palettes[4].len(), 4);
            assert_eq!(palettes[5].len(), 4);
            assert_eq!(palettes[6].len(), 5);
            assert_eq!(palettes[7].len(), 5);
            assert_eq!(palettes[8].len(), 5);
        }
    }

    #[test]
    fn test_base_is_preserved() {
        let base = hex_to_rgb("#3b82f6").unwrap();
        let palettes = generate_all_from_rgb(base);
        assert_eq!(palettes[0].colors[0], base);
        assert_eq!(palettes[2].colors[1], base);
        assert_eq!(palettes[6].colors[2], base);
    }

    #[test]
    fn test_complementary_hue() {
        let p = generate_all_from_hex("#3B82F6");
        let second = rgb_to_hsv(p[0].colors[1]);
        assert!((second.h - 37.0).abs() < 1.5);
    }

    /// Hue of each entry relative to `base_h`, in `[0, 360)`.
    fn hue_offsets(p: &Palette, base_h: f64) -> Vec<f64> {
        p.colors
            .iter()
            .map(|&c| (rgb_to_hsl(c).h - base_h).rem_euclid(360.0))
            .collect()
    }

    fn assert_offsets(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            let diff = (a - e).rem_euclid(360.0);
            assert!(diff.min(360.0 - diff) < 1.0, "offset {a} != {e}");
        }
    }

    #[test]
    fn test_rotation_offsets() {
        let base = Hsl::new(200.0, 80.0, 50.0);
        let cases: [(Harmony, &[f64]); 6] = [
            (Harmony::Complementary, &[0.0, 180.0]),
            (Harmony::Triadic, &[0.0, 120.0, 240.0]),
            (Harmony::Analogous, &[330.0, 0.0, 30.0]),
            (Harmony::SplitComplementary, &[0.0, 150.0, 210.0]),
            (Harmony::TetradicSquare, &[0.0, 90.0, 180.0, 270.0]),
            (Harmony::TetradicRectangular, &[0.0, 60.0, 180.0, 240.0]),
        ];
        for (harmony, expected) in cases {
            assert_offsets(&hue_offsets(&generate(harmony, base), base.h), expected);
        }
    }

    #[test]
    fn test_analogous_wraps_below_zero() {
        let p = generate(Harmony::Analogous, Hsl::new(10.0, 80.0, 50.0));
        let hues: Vec<f64> = p.colors.iter().map(|&c| rgb_to_hsl(c).h).collect();
        assert!((hues[0] - 340.0).abs() < 1.0);
        assert!((hues[1] - 10.0).abs() < 1.0);
        assert!((hues[2] - 40.0).abs() < 1.0);
    }

    #[test]
    fn test_palette_json() {
        let p = generate(Harmony::Complementary, Hsl::new(0.0, 100.0, 50.0));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["harmony"], "Complementary");
        assert_eq!(json["colors"][0], "#ff0000");
        assert_eq!(json["colors"][1], "#00ffff");
    }

    #[test]
    fn test_complementary_symmetry() {
        let a = hex_to_rgb("#3b82f6").unwrap();
        let b = generate(Harmony::Complementary, rgb_to_hsl(a)).colors[1];
        let back = generate(Harmony::Complementary, rgb_to_hsl(b)).colors[1];
        for (x, y) in [(a.r, back.r), (a.g, back.g), (a.b, back.b)] {
            assert!((x as i32 - y as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_monochromatic_clamps() {
        let p = generate(Harmony::Monochromatic, Hsl::new(0.0, 0.0, 95.0));
        assert_eq!(p.hexes()[4], "#ffffff");
        let p = generate(Harmony::Monochromatic, Hsl::new(0.0, 0.0, 5.0));
        assert_eq!(p.hexes()[0], "#000000");
    }

    #[test]
    fn test_shades_ladder() {
        let p = generate(Harmony::Shades, Hsl::new(200.0, 0.0, 42.0));
        let levels: Vec<u8> = p.colors.iter().map(|c| c.r).collect();
        assert!(p.colors.iter().all(|c| c.r == c.g && c.g == c.b));
        assert!(levels.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(p.hexes()[2], "#808080");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(generate_all_from_hex("#a1b2c3"), generate_all_from_hex("#A1B2C3"));
    }
}
