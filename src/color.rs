//! HslColor — the canonical color representation for floem-hsl.
//!
//! Stores hue in degrees (0–360, exclusive) and saturation/lightness as
//! percentages. RGB, hex and the display strings are derived on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn get(&self, channel: RgbChannel) -> u8 {
        match channel {
            RgbChannel::Red => self.r,
            RgbChannel::Green => self.g,
            RgbChannel::Blue => self.b,
        }
    }

    /// Copy with one channel replaced.
    pub fn with(mut self, channel: RgbChannel, value: u8) -> Self {
        match channel {
            RgbChannel::Red => self.r = value,
            RgbChannel::Green => self.g = value,
            RgbChannel::Blue => self.b = value,
        }
        self
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RgbChannel {
    Red,
    Green,
    Blue,
}

impl RgbChannel {
    pub fn label(&self) -> &'static str {
        match self {
            RgbChannel::Red => "R",
            RgbChannel::Green => "G",
            RgbChannel::Blue => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HslComponent {
    Hue,
    Saturation,
    Lightness,
}

impl HslComponent {
    /// Largest value the numeric field accepts.
    pub fn max(&self) -> f64 {
        match self {
            HslComponent::Hue => 360.0,
            HslComponent::Saturation | HslComponent::Lightness => 100.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HslComponent::Hue => "H",
            HslComponent::Saturation => "S",
            HslComponent::Lightness => "L",
        }
    }
}

/// Formats offered for display and copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 3] = [ColorFormat::Hex, ColorFormat::Rgb, ColorFormat::Hsl];
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorFormat::Hex => "HEX",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Hsl => "HSL",
        };
        f.write_str(name)
    }
}

/// HSL color. Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHsl", into = "RawHsl")]
pub struct HslColor {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl Default for HslColor {
    fn default() -> Self {
        Self::new(259.0, 90.0, 66.0)
    }
}

impl HslColor {
    /// Create from raw components. Hue wraps into 0–360, the rest clamp to 0–100.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: normalize_hue(hue),
            saturation: clamp_percent(saturation),
            lightness: clamp_percent(lightness),
        }
    }

    /// Hue in degrees (0.0–360.0, exclusive).
    pub fn hue(&self) -> f64 {
        self.hue
    }
    /// Saturation (0.0–100.0).
    pub fn saturation(&self) -> f64 {
        self.saturation
    }
    /// Lightness (0.0–100.0).
    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn component(&self, component: HslComponent) -> f64 {
        match component {
            HslComponent::Hue => self.hue,
            HslComponent::Saturation => self.saturation,
            HslComponent::Lightness => self.lightness,
        }
    }

    /// Copy with one component replaced (normalized like [`HslColor::new`]).
    pub fn with_component(self, component: HslComponent, value: f64) -> Self {
        match component {
            HslComponent::Hue => Self::new(value, self.saturation, self.lightness),
            HslComponent::Saturation => Self::new(self.hue, value, self.lightness),
            HslComponent::Lightness => Self::new(self.hue, self.saturation, value),
        }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        let (h, s, l) = math::rgb_to_hsl(rgb.r, rgb.g, rgb.b);
        Self::new(h, s, l)
    }

    /// Parse a hex string (with or without `#`, 3 or 6 digits).
    pub fn from_hex(hex: &str) -> Option<Self> {
        math::parse_hex(hex).map(|rgb| Self::from_rgb(rgb.into()))
    }

    pub fn to_rgb(&self) -> Rgb {
        math::hsl_to_rgb(self.hue, self.saturation, self.lightness).into()
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        let Rgb { r, g, b } = self.to_rgb();
        math::rgb_to_hex(r, g, b)
    }

    /// `rgb(r, g, b)`
    pub fn rgb_string(&self) -> String {
        let Rgb { r, g, b } = self.to_rgb();
        format!("rgb({}, {}, {})", r, g, b)
    }

    /// `hsl(h, s%, l%)` with whole-number components.
    pub fn hsl_string(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue.round() as i64,
            self.saturation.round() as i64,
            self.lightness.round() as i64,
        )
    }

    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex(),
            ColorFormat::Rgb => self.rgb_string(),
            ColorFormat::Hsl => self.hsl_string(),
        }
    }
}

/// Serialized shape of [`HslColor`]; normalized on the way in.
#[derive(Serialize, Deserialize)]
struct RawHsl {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl From<RawHsl> for HslColor {
    fn from(raw: RawHsl) -> Self {
        Self::new(raw.hue, raw.saturation, raw.lightness)
    }
}

impl From<HslColor> for RawHsl {
    fn from(c: HslColor) -> Self {
        Self {
            hue: c.hue,
            saturation: c.saturation,
            lightness: c.lightness,
        }
    }
}

fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let h = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 { 0.0 } else { h }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_initial_picker_color() {
        let c = HslColor::default();
        assert_eq!((c.hue(), c.saturation(), c.lightness()), (259.0, 90.0, 66.0));
        assert_eq!(c.hsl_string(), "hsl(259, 90%, 66%)");
    }

    #[test]
    fn new_normalizes_components() {
        let c = HslColor::new(360.0, 120.0, -5.0);
        assert_eq!(c.hue(), 0.0);
        assert_eq!(c.saturation(), 100.0);
        assert_eq!(c.lightness(), 0.0);
        assert_eq!(HslColor::new(-90.0, 50.0, 50.0).hue(), 270.0);
        assert_eq!(HslColor::new(f64::NAN, f64::NAN, 50.0).hue(), 0.0);
    }

    #[test]
    fn hex_entry_keeps_its_rgb() {
        let c = HslColor::from_hex("#0F4C81").unwrap();
        assert_eq!(c.to_rgb(), Rgb::new(15, 76, 129));
        assert_eq!(c.to_hex(), "#0F4C81");
        assert_eq!(c.rgb_string(), "rgb(15, 76, 129)");
        assert_eq!(c.hsl_string(), "hsl(208, 79%, 28%)");
    }

    #[test]
    fn shorthand_hex() {
        let c = HslColor::from_hex("fff").unwrap();
        assert_eq!(c.to_hex(), "#FFFFFF");
        assert_eq!(c.hue(), 0.0);
        assert_eq!(c.saturation(), 0.0);
        assert!(HslColor::from_hex("#ZZZ").is_none());
    }

    #[test]
    fn formats() {
        let c = HslColor::new(0.0, 100.0, 50.0);
        assert_eq!(c.format(ColorFormat::Hex), "#FF0000");
        assert_eq!(c.format(ColorFormat::Rgb), "rgb(255, 0, 0)");
        assert_eq!(c.format(ColorFormat::Hsl), "hsl(0, 100%, 50%)");
        assert_eq!(ColorFormat::Rgb.to_string(), "RGB");
    }

    #[test]
    fn rgb_channel_replace() {
        let rgb = Rgb::new(1, 2, 3).with(RgbChannel::Green, 200);
        assert_eq!(rgb, Rgb::new(1, 200, 3));
        assert_eq!(rgb.get(RgbChannel::Blue), 3);
    }

    #[test]
    fn with_component_only_touches_one() {
        let c = HslColor::new(120.0, 40.0, 30.0).with_component(HslComponent::Saturation, 75.0);
        assert_eq!((c.hue(), c.saturation(), c.lightness()), (120.0, 75.0, 30.0));
    }
}
