//! Standalone demo: opens a window with the HSL picker.
//!
//! Set `GEMINI_API_KEY` (or `API_KEY`) to enable the Pantone lookup and
//! `RUST_LOG=floem_hsl=debug` to watch it work.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_hsl::{HslColor, LookupConfig, PickerConfig, hsl_picker_with_config};

fn main() {
    env_logger::init();

    let color = RwSignal::new(HslColor::default());
    let config = PickerConfig {
        lookup: LookupConfig::from_env(),
        ..PickerConfig::default()
    };

    floem::Application::new()
        .window(
            move |_| {
                hsl_picker_with_config(color, config.clone()).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((280.0, 620.0))
                    .title("floem-hsl"),
            ),
        )
        .run();
}
