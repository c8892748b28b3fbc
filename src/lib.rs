//! # floem-hsl
//!
//! An HSL color picker widget for [Floem](https://github.com/lapce/floem).
//!
//! Provides a hue/saturation color wheel, a lightness slider, HEX/RGB/HSL
//! inputs with copy buttons, and an optional Pantone name lookup. All of it
//! edits a single [`HslColor`]; every other format is derived from it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_hsl::{hsl_picker, HslColor};
//!
//! let color = RwSignal::new(HslColor::from_hex("#3B82F6").unwrap());
//! // Use `hsl_picker(color)` in your Floem view tree.
//! ```
//!
//! The state machine behind the widget, [`ColorPickerController`], has no
//! Floem dependency and can be driven directly.

mod color;
mod color_editor;
mod color_wheel;
mod config;
mod constants;
mod controller;
mod error;
mod inputs;
mod lightness_slider;
mod lookup;
mod math;
mod pantone;

pub use color::{ColorFormat, HslColor, HslComponent, Rgb, RgbChannel};
pub use color_wheel::{indicator_position, point_to_hue_saturation, rasterize_disc};
pub use config::{LookupConfig, PickerConfig};
pub use controller::{
    ColorPickerController, DragState, LookupTicket, PLACEHOLDER, PantoneStatus, SearchTicket,
};
pub use error::{Error, Result};
pub use lightness_slider::{clamp_lightness, lightness_at, rasterize_lightness_gradient};
pub use lookup::{DebouncedLookup, Generation, RequestGate};
pub use math::{hsl_to_rgb, parse_hex, rgb_to_hex, rgb_to_hsl};
#[cfg(feature = "pantone")]
pub use pantone::GeminiPantone;
pub use pantone::{PantoneSource, parse_hex_response, parse_name_response};

use std::sync::{Arc, Once};

use floem::prelude::*;
use floem::reactive::RwSignal;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the top-level color picker view.
///
/// The picker reads from and writes to `color`. Any external changes to the
/// signal are reflected in the UI, and user edits update the signal. The
/// Pantone lookup is configured from the environment.
pub fn hsl_picker(color: RwSignal<HslColor>) -> impl IntoView {
    let config = PickerConfig {
        lookup: LookupConfig::from_env(),
        ..PickerConfig::default()
    };
    hsl_picker_with_config(color, config)
}

/// Like [`hsl_picker`], with explicit configuration.
pub fn hsl_picker_with_config(color: RwSignal<HslColor>, config: PickerConfig) -> impl IntoView {
    let source = pantone_source(&config.lookup);
    hsl_picker_with_source(color, config, source)
}

/// Like [`hsl_picker_with_config`], with a caller-supplied Pantone source.
///
/// `None` hides the Pantone rows and disables the lookup.
pub fn hsl_picker_with_source(
    color: RwSignal<HslColor>,
    config: PickerConfig,
    source: Option<Arc<dyn PantoneSource>>,
) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    if let Err(e) = config.validate() {
        log::warn!("invalid picker config, using defaults: {e}");
        let defaults = PickerConfig {
            initial: config.initial,
            lookup: config.lookup,
            ..PickerConfig::default()
        };
        return color_editor::color_editor(color, defaults, source);
    }
    color_editor::color_editor(color, config, source)
}

#[cfg(feature = "pantone")]
fn pantone_source(config: &LookupConfig) -> Option<Arc<dyn PantoneSource>> {
    if !config.is_active() {
        log::debug!("pantone lookup disabled");
        return None;
    }
    match GeminiPantone::new(config) {
        Ok(source) => Some(Arc::new(source)),
        Err(e) => {
            log::warn!("pantone lookup unavailable: {e}");
            None
        }
    }
}

#[cfg(not(feature = "pantone"))]
fn pantone_source(_config: &LookupConfig) -> Option<Arc<dyn PantoneSource>> {
    None
}
