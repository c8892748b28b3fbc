//! Sizing, color, and styling constants for the picker.

/// Wheel indicator circle radius
pub const INDICATOR_RADIUS: f64 = 10.0;

/// Wheel indicator stroke width
pub const INDICATOR_STROKE: f64 = 3.0;

/// Indicator strokes switch to black above this lightness
pub const DARK_STROKE_ABOVE: f64 = 55.0;

/// Slider marker widths: white underlay, black line on top
pub const MARKER_OUTER_WIDTH: f64 = 4.0;
pub const MARKER_INNER_WIDTH: f64 = 2.0;

/// Border radius for the slider track
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Numeric input field width
pub const INPUT_WIDTH: f32 = 32.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 72.0;

/// Format value field width (HEX / RGB / HSL rows)
pub const VALUE_WIDTH: f32 = 150.0;

/// Pantone query field width
pub const QUERY_WIDTH: f32 = 150.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Swatch side
pub const SWATCH_SIZE: f32 = 32.0;
