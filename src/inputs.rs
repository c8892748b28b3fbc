//! Text inputs and copy buttons for editing the picker state.

use std::time::{Duration, Instant};

use floem::action::exec_after;
use floem::event::EventPropagation;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, SignalWith, create_effect};

use crate::color::ColorFormat;
use crate::constants;
use crate::controller::ColorPickerController;

fn field_style(s: floem::style::Style, width: f32) -> floem::style::Style {
    s.width(width)
        .padding(2.0)
        .font_size(constants::INPUT_FONT)
        .font_family("monospace".to_string())
        .background(Color::WHITE)
        .border(1.0)
        .border_color(Color::rgb8(200, 200, 200))
        .border_radius(3.0)
}

fn is_enter(e: &floem::event::Event) -> bool {
    matches!(
        e,
        floem::event::Event::KeyDown(ke)
            if ke.key.logical_key == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
    )
}

/// A numeric field for one color component.
///
/// `read` picks the displayed value out of the state; `commit` applies the
/// typed text and reports whether it was accepted. Text is committed on
/// Enter or focus loss; rejected text snaps back to the current value.
pub(crate) fn number_input(
    lbl: &'static str,
    state: RwSignal<ColorPickerController>,
    read: impl Fn(&ColorPickerController) -> f64 + Copy + 'static,
    commit: impl Fn(&mut ColorPickerController, &str) -> bool + Copy + 'static,
) -> impl IntoView {
    let text = RwSignal::new(format_value(state.with_untracked(read)));

    // State → text (external updates)
    create_effect(move |_| {
        let expected = format_value(state.with(read));
        if text.get_untracked() != expected {
            text.set(expected);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        // Only write when the display changed; the state may hold fractions.
        if is_displayed(&raw, state.with_untracked(read)) {
            return;
        }
        let mut accepted = false;
        state.update(|c| accepted = commit(c, &raw));
        if !accepted {
            log::trace!("ignoring {lbl} input {raw:?}");
        }
        let formatted = format_value(state.with_untracked(read));
        if raw != formatted {
            text.set(formatted);
        }
    };
    let on_commit_clone = on_commit;

    v_stack((
        text_input(text)
            .style(|s| field_style(s, constants::INPUT_WIDTH))
            .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(floem::event::EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    on_commit_clone();
                    return EventPropagation::Stop;
                }
                EventPropagation::Continue
            }),
        label(move || lbl).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

fn format_value(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Whether the field text is just the current value as displayed.
fn is_displayed(raw: &str, current: f64) -> bool {
    raw.trim() == format_value(current)
}

/// Strip `#` and uppercase, for comparing hex text with the state.
fn normalize_hex_text(raw: &str) -> String {
    raw.trim().trim_start_matches('#').to_uppercase()
}

/// A hex input field bound to the picker state.
///
/// Full six-digit values apply while typing; shorthand is applied on Enter
/// or focus loss. Invalid text stays in the field and leaves the color alone.
pub(crate) fn hex_input(state: RwSignal<ColorPickerController>) -> impl IntoView {
    let text = RwSignal::new(state.with_untracked(|c| c.hex()));

    // State → text (only update if not equivalent)
    create_effect(move |_| {
        let hex = state.with(|c| c.hex());
        if normalize_hex_text(&text.get_untracked()) != normalize_hex_text(&hex) {
            text.set(hex);
        }
    });

    // Dynamic: text → state on every complete six-digit value
    create_effect(move |_| {
        let raw = text.get();
        let trimmed = normalize_hex_text(&raw);
        if trimmed.len() == 6
            && trimmed.chars().all(|c| c.is_ascii_hexdigit())
            && state.with_untracked(|c| normalize_hex_text(&c.hex())) != trimmed
        {
            state.update(|c| {
                c.set_hex(&trimmed);
            });
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        let mut accepted = false;
        state.update(|c| accepted = c.set_hex(&raw));
        if accepted {
            let hex = state.with_untracked(|c| c.hex());
            if raw != hex {
                text.set(hex);
            }
        }
    };
    let on_commit_clone = on_commit;

    text_input(text)
        .style(|s| field_style(s, constants::HEX_INPUT_WIDTH))
        .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
            on_commit();
        })
        .on_event_stop(floem::event::EventListener::KeyDown, move |e| {
            if is_enter(e) {
                on_commit_clone();
            }
        })
}

/// A free-text field that calls `on_submit` with its contents on Enter.
pub(crate) fn query_input(on_submit: impl Fn(String) + 'static) -> impl IntoView {
    let text = RwSignal::new(String::new());
    text_input(text)
        .style(|s| field_style(s, constants::QUERY_WIDTH))
        .on_event(floem::event::EventListener::KeyDown, move |e| {
            if is_enter(e) {
                on_submit(text.get_untracked());
                return EventPropagation::Stop;
            }
            EventPropagation::Continue
        })
}

/// A read-only row showing `format` with a copy button.
pub(crate) fn format_row(
    state: RwSignal<ColorPickerController>,
    format: ColorFormat,
) -> impl IntoView {
    h_stack((
        label(move || format.to_string()).style(|s| {
            s.width(28.0)
                .font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
        }),
        label(move || state.with(|c| c.format_value(format))).style(|s| {
            s.width(constants::VALUE_WIDTH)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
        }),
        copy_button(state, format),
    ))
    .style(|s| s.items_center().gap(constants::GAP / 2.0))
}

/// A small copy button for `format`; shows a check mark while the copy
/// confirmation lasts.
pub(crate) fn copy_button(
    state: RwSignal<ColorPickerController>,
    format: ColorFormat,
) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(move || {
            let copied = state.with(|c| c.copied_format(Instant::now()) == Some(format));
            let icon = if copied {
                lucide_icons::Icon::Check
            } else {
                lucide_icons::Icon::Copy
            };
            icon.unicode().to_string()
        })
        .style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(floem::event::EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        pressed.set(false);
        let mut copied = None;
        state.update(|c| copied = c.copy(format));
        let Some(text) = copied else {
            return;
        };
        copy_to_clipboard(&text);
        // Timers can fire a hair early; expire a little after the window.
        let wait = state.with_untracked(|c| c.copy_feedback()) + Duration::from_millis(20);
        exec_after(wait, move |_| {
            if state.with_untracked(|c| c.copied_format(Instant::now()).is_none()) {
                state.update(|c| {
                    c.expire_copy_feedback(Instant::now());
                });
            }
        });
    })
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                log::warn!("clipboard write failed: {e}");
            }
        }
        Err(e) => log::warn!("clipboard unavailable: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_display_as_whole_numbers() {
        assert_eq!(format_value(259.0), "259");
        assert_eq!(format_value(79.17), "79");
        assert_eq!(format_value(28.5), "29");
    }

    #[test]
    fn untouched_field_is_not_committed() {
        assert!(is_displayed("79", 79.17));
        assert!(is_displayed(" 28 ", 28.24));
        assert!(!is_displayed("80", 79.17));
        assert!(!is_displayed("", 79.17));
    }

    #[test]
    fn hex_text_comparison() {
        assert_eq!(normalize_hex_text(" #0f4c81 "), "0F4C81");
        assert_eq!(normalize_hex_text("0F4C81"), normalize_hex_text("#0f4c81"));
    }
}
