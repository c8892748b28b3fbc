//! Color editor: the full picker panel.
//!
//! One `ColorPickerController` signal drives everything: the wheel, the
//! lightness slider, the format rows and the numeric inputs. The caller's
//! `RwSignal<HslColor>` is kept in step both ways. When a Pantone source is
//! available the editor also runs the debounced name lookup and the
//! name → color search on background threads.

use std::sync::Arc;
use std::time::Instant;

use floem::action::exec_after;
use floem::event::EventPropagation;
use floem::ext_event::create_ext_action;
use floem::prelude::*;
use floem::reactive::{
    RwSignal, Scope, SignalGet, SignalUpdate, SignalWith, create_effect, create_memo,
};

use crate::color::{ColorFormat, HslColor, HslComponent, RgbChannel};
use crate::color_wheel::color_wheel;
use crate::config::PickerConfig;
use crate::constants;
use crate::controller::{ColorPickerController, LookupTicket, SearchTicket};
use crate::error::Result;
use crate::inputs::{copy_button, format_row, hex_input, number_input, query_input};
use crate::lightness_slider::lightness_slider;
use crate::pantone::PantoneSource;

/// Creates the picker panel bound to `color`.
pub(crate) fn color_editor(
    color: RwSignal<HslColor>,
    config: PickerConfig,
    source: Option<Arc<dyn PantoneSource>>,
) -> impl IntoView {
    let mut controller = ColorPickerController::from_config(&config);
    controller.set_color(color.get_untracked());
    controller.set_lookup_enabled(source.is_some());
    let state = RwSignal::new(controller);

    // External color → state
    create_effect(move |_| {
        let c = color.get();
        if state.with_untracked(|s| s.color()) != c {
            state.update(|s| {
                s.set_color(c);
            });
        }
    });

    // State → external color
    create_effect(move |_| {
        let c = state.with(|s| s.color());
        if color.get_untracked() != c {
            color.set(c);
        }
    });

    if let Some(source) = source.clone() {
        // Every canonical change bumps the generation; restart the quiet window.
        let generation = create_memo(move |_| state.with(|c| c.lookup_generation()));
        create_effect(move |_| {
            generation.get();
            schedule_lookup(state, source.clone());
        });
    }

    let pantone_rows = match source {
        Some(source) => pantone_rows(state, source).into_any(),
        None => empty().into_any(),
    };

    v_stack((
        // Color wheel (hue + saturation)
        color_wheel(state, config.wheel_size).style(|s| s.margin_top(12.0)),
        // Swatch row
        h_stack((
            empty().style(|s| s.flex_grow(1.0)),
            empty().style(move |st| {
                let rgb = state.with(|c| c.rgb());
                st.width(constants::SWATCH_SIZE)
                    .height(constants::SWATCH_SIZE)
                    .border_radius(constants::RADIUS)
                    .border(1.0)
                    .border_color(Color::rgb8(180, 180, 180))
                    .background(Color::rgb8(rgb.r, rgb.g, rgb.b))
            }),
        ))
        .style(|st| st.items_center().margin_horiz(8.0)),
        // Lightness slider
        lightness_slider(state, config.slider_width, config.slider_height)
            .style(|s| s.margin_horiz(8.0)),
        // Hex + copy row
        h_stack((hex_input(state), copy_button(state, ColorFormat::Hex)))
            .style(|st| st.gap(constants::GAP).items_center().justify_center()),
        // RGB inputs row
        h_stack((
            number_input(
                RgbChannel::Red.label(),
                state,
                |c| c.rgb().r as f64,
                |c, t| c.set_rgb_channel_text(RgbChannel::Red, t),
            ),
            number_input(
                RgbChannel::Green.label(),
                state,
                |c| c.rgb().g as f64,
                |c, t| c.set_rgb_channel_text(RgbChannel::Green, t),
            ),
            number_input(
                RgbChannel::Blue.label(),
                state,
                |c| c.rgb().b as f64,
                |c, t| c.set_rgb_channel_text(RgbChannel::Blue, t),
            ),
            copy_button(state, ColorFormat::Rgb),
        ))
        .style(|st| st.gap(constants::GAP / 2.0).items_center().justify_center()),
        // HSL inputs row
        h_stack((
            number_input(
                HslComponent::Hue.label(),
                state,
                |c| c.color().hue(),
                |c, t| c.set_hsl_component_text(HslComponent::Hue, t),
            ),
            number_input(
                HslComponent::Saturation.label(),
                state,
                |c| c.color().saturation(),
                |c, t| c.set_hsl_component_text(HslComponent::Saturation, t),
            ),
            number_input(
                HslComponent::Lightness.label(),
                state,
                |c| c.color().lightness(),
                |c, t| c.set_hsl_component_text(HslComponent::Lightness, t),
            ),
            copy_button(state, ColorFormat::Hsl),
        ))
        .style(|st| st.gap(constants::GAP / 2.0).items_center().justify_center()),
        // Read-only format strings
        v_stack((
            format_row(state, ColorFormat::Hex),
            format_row(state, ColorFormat::Rgb),
            format_row(state, ColorFormat::Hsl),
        ))
        .style(|st| st.gap(2.0).margin_horiz(8.0)),
        pantone_rows,
    ))
    .style(|st| {
        st.gap(constants::GAP)
            .padding_horiz(constants::PADDING)
            .padding_bottom(constants::PADDING)
            .padding_top(2.0)
            .size_full()
            .justify_center()
            .background(Color::rgb8(242, 242, 242))
    })
    .on_event(floem::event::EventListener::WindowClosed, move |_| {
        state.update(|c| c.teardown());
        EventPropagation::Continue
    })
}

/// Pantone name label plus the name → color search field.
fn pantone_rows(
    state: RwSignal<ColorPickerController>,
    source: Arc<dyn PantoneSource>,
) -> impl IntoView {
    let muted = |s: floem::style::Style| {
        s.font_size(constants::LABEL_FONT)
            .color(Color::rgb8(120, 120, 120))
    };

    v_stack((
        h_stack((
            label(|| "Pantone").style(move |s| muted(s).width(48.0)),
            label(move || state.with(|c| c.pantone_name().display().to_string()))
                .style(|s| s.font_size(constants::INPUT_FONT)),
        ))
        .style(|st| st.items_center().gap(constants::GAP / 2.0)),
        h_stack((
            label(|| "Search").style(move |s| muted(s).width(48.0)),
            query_input(move |query| {
                let mut ticket = None;
                state.update(|c| ticket = c.begin_pantone_search(&query));
                if let Some(ticket) = ticket {
                    spawn_search(state, source.clone(), ticket);
                }
            }),
            label(move || state.with(|c| c.search_status().display().to_string()))
                .style(move |s| muted(s)),
        ))
        .style(|st| st.items_center().gap(constants::GAP / 2.0)),
    ))
    .style(|st| st.gap(4.0).margin_horiz(8.0))
}

/// Arm a timer for the end of the current quiet window.
///
/// A timer whose generation was superseded does nothing: the newer change
/// armed its own. A timer that fires before the window closed re-arms.
fn schedule_lookup(state: RwSignal<ColorPickerController>, source: Arc<dyn PantoneSource>) {
    let Some(due) = state.with_untracked(|c| c.lookup_due_at()) else {
        return;
    };
    let armed_for = state.with_untracked(|c| c.lookup_generation());
    let wait = due.saturating_duration_since(Instant::now());
    exec_after(wait, move |_| {
        if state.with_untracked(|c| c.lookup_generation()) != armed_for {
            return;
        }
        let now = Instant::now();
        if state.with_untracked(|c| c.lookup_due_at().is_none_or(|due| due > now)) {
            schedule_lookup(state, source);
            return;
        }
        let mut ticket = None;
        state.update(|c| ticket = c.poll_lookup(now));
        if let Some(ticket) = ticket {
            spawn_lookup(state, source, ticket);
        }
    });
}

/// Resolve a name for `ticket` off the UI thread.
fn spawn_lookup(
    state: RwSignal<ColorPickerController>,
    source: Arc<dyn PantoneSource>,
    ticket: LookupTicket,
) {
    let LookupTicket { generation, hex } = ticket;
    let apply = create_ext_action(Scope::new(), move |result: Result<Option<String>>| {
        state.update(|c| {
            c.complete_lookup(generation, result);
        });
    });
    std::thread::spawn(move || apply(source.name_for_hex(&hex)));
}

/// Resolve a color for a searched name off the UI thread.
fn spawn_search(
    state: RwSignal<ColorPickerController>,
    source: Arc<dyn PantoneSource>,
    ticket: SearchTicket,
) {
    let SearchTicket { generation, query } = ticket;
    let apply = create_ext_action(Scope::new(), move |result: Result<Option<String>>| {
        state.update(|c| {
            c.complete_pantone_search(generation, result);
        });
    });
    std::thread::spawn(move || apply(source.hex_for_name(&query)));
}
