//! Color math — HSL, RGB and hex conversions without external dependencies.
//!
//! Hue is in degrees, saturation and lightness are percentages (0–100) and
//! RGB channels are 0–255. Rounding is `f64::round` (half away from zero).

/// HSL → RGB using the chroma/hue-shift method.
///
/// `h` wraps modulo 360, `s` and `l` are percentages.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * v).round().clamp(0.0, 255.0) as u8
    };
    (f(0.0), f(8.0), f(4.0))
}

/// RGB → HSL. Returns `(hue, saturation, lightness)`.
///
/// Hue is rounded to a whole degree in 0–359; saturation and lightness are
/// left unrounded. Achromatic input yields hue 0 and saturation 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    let hue = (h * 60.0).round().rem_euclid(360.0);
    (hue, s * 100.0, l * 100.0)
}

/// Format as `#RRGGBB`, uppercase.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Parse a hex color (optional `#`, 3 or 6 digits, any case).
///
/// Shorthand digits are doubled, so `"#abc"` is `#AABBCC`.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let stripped = hex.strip_prefix('#').unwrap_or(hex);
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match stripped.len() {
        3 => {
            let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
            let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
            let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
            let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
            let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Linear interpolation between two RGB colors, `t` in 0.0–1.0.
pub(crate) fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
