//! Picker state: one canonical HSL color and every way of editing it.
//!
//! The controller knows nothing about Floem. Views call the entry points
//! from their event handlers and read the derived formats back; timers and
//! network threads only ever talk to it through tickets.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::color::{ColorFormat, HslColor, HslComponent, Rgb, RgbChannel};
use crate::color_wheel;
use crate::config::PickerConfig;
use crate::error::Result;
use crate::lightness_slider;
use crate::lookup::{DebouncedLookup, Generation, RequestGate};

/// Placeholder shown where no value is available; never copied.
pub const PLACEHOLDER: &str = "N/A";

/// Pointer state of the color wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

impl DragState {
    /// Pointer pressed inside the wheel.
    pub fn press(self) -> Self {
        DragState::Dragging
    }

    /// Pointer released anywhere.
    pub fn release(self) -> Self {
        DragState::Idle
    }

    pub fn is_dragging(self) -> bool {
        self == DragState::Dragging
    }
}

/// Result of a Pantone lookup as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PantoneStatus {
    #[default]
    Idle,
    Searching,
    Found(String),
    NotFound,
    Failed,
}

impl PantoneStatus {
    pub fn display(&self) -> &str {
        match self {
            PantoneStatus::Idle => "",
            PantoneStatus::Searching => "searching…",
            PantoneStatus::Found(name) => name,
            PantoneStatus::NotFound => "not found",
            PantoneStatus::Failed => "search failed",
        }
    }
}

/// A hex → name lookup that is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: Generation,
    pub hex: String,
}

/// A name → hex search started by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: Generation,
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct ColorPickerController {
    color: HslColor,
    drag: DragState,
    copied: Option<(ColorFormat, Instant)>,
    copy_feedback: Duration,
    lookup_enabled: bool,
    lookup: DebouncedLookup,
    pantone_name: PantoneStatus,
    search: RequestGate,
    search_status: PantoneStatus,
    /// Bumped on every canonical change.
    revision: u64,
    /// `revision` when the pending search started.
    search_revision: u64,
}

impl Default for ColorPickerController {
    fn default() -> Self {
        Self::from_config(&PickerConfig::default())
    }
}

impl ColorPickerController {
    pub fn new(initial: HslColor, copy_feedback: Duration, debounce: Duration) -> Self {
        Self {
            color: initial,
            drag: DragState::Idle,
            copied: None,
            copy_feedback,
            lookup_enabled: false,
            lookup: DebouncedLookup::new(debounce),
            pantone_name: PantoneStatus::Idle,
            search: RequestGate::new(),
            search_status: PantoneStatus::Idle,
            revision: 0,
            search_revision: 0,
        }
    }

    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(
            config.initial,
            config.copy_feedback(),
            config.lookup.debounce(),
        )
    }

    /// Turn the automatic name lookup on or off. Enabling schedules a
    /// lookup for the current color.
    pub fn set_lookup_enabled(&mut self, enabled: bool) {
        if enabled == self.lookup_enabled {
            return;
        }
        self.lookup_enabled = enabled;
        if enabled {
            self.lookup.notify_change(Instant::now());
            self.pantone_name = PantoneStatus::Searching;
        } else {
            self.lookup.cancel();
            self.pantone_name = PantoneStatus::Idle;
        }
    }

    pub fn lookup_enabled(&self) -> bool {
        self.lookup_enabled
    }

    // ── Derived views ──────────────────────────────────────────────────

    pub fn color(&self) -> HslColor {
        self.color
    }

    pub fn rgb(&self) -> Rgb {
        self.color.to_rgb()
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn rgb_string(&self) -> String {
        self.color.rgb_string()
    }

    pub fn hsl_string(&self) -> String {
        self.color.hsl_string()
    }

    pub fn format_value(&self, format: ColorFormat) -> String {
        self.color.format(format)
    }

    // ── Entry points ───────────────────────────────────────────────────

    /// Replace the whole color, e.g. from an external signal.
    pub fn set_color(&mut self, color: HslColor) -> bool {
        self.replace(color)
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pointer pressed at `(x, y)` on a wheel of side `size`.
    pub fn wheel_pointer_down(&mut self, x: f64, y: f64, size: f64) {
        trace!("wheel drag start at ({x:.1}, {y:.1})");
        self.drag = self.drag.press();
        self.apply_wheel_point(x, y, size);
    }

    /// Pointer moved; only applied while dragging. Returns whether it was.
    pub fn wheel_pointer_move(&mut self, x: f64, y: f64, size: f64) -> bool {
        if !self.drag.is_dragging() {
            return false;
        }
        self.apply_wheel_point(x, y, size);
        true
    }

    /// Pointer released anywhere in the window.
    pub fn pointer_up(&mut self) {
        if self.drag.is_dragging() {
            trace!("wheel drag end");
        }
        self.drag = self.drag.release();
    }

    fn apply_wheel_point(&mut self, x: f64, y: f64, size: f64) {
        let (hue, saturation) = color_wheel::point_to_hue_saturation(x, y, size);
        self.replace(HslColor::new(hue, saturation, self.color.lightness()));
    }

    /// Lightness from the slider; clamped to 0–100. Non-finite input is ignored.
    pub fn set_lightness(&mut self, value: f64) -> bool {
        let Some(lightness) = lightness_slider::clamp_lightness(value) else {
            return false;
        };
        self.replace(self.color.with_component(HslComponent::Lightness, lightness));
        true
    }

    pub fn set_lightness_text(&mut self, text: &str) -> bool {
        parse_number(text).is_some_and(|v| self.set_lightness(v))
    }

    /// Hex text edit. Invalid text leaves the color untouched and returns false.
    pub fn set_hex(&mut self, text: &str) -> bool {
        let Some(color) = HslColor::from_hex(text.trim()) else {
            return false;
        };
        self.replace(color);
        true
    }

    /// One RGB channel edit, clamped to 0–255 and merged with the current
    /// values of the other two.
    pub fn set_rgb_channel(&mut self, channel: RgbChannel, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let value = value.round().clamp(0.0, 255.0) as u8;
        let merged = self.rgb().with(channel, value);
        self.replace(HslColor::from_rgb(merged));
        true
    }

    pub fn set_rgb_channel_text(&mut self, channel: RgbChannel, text: &str) -> bool {
        parse_number(text).is_some_and(|v| self.set_rgb_channel(channel, v))
    }

    /// One HSL component edit, clamped to its range (hue 360 wraps to 0).
    pub fn set_hsl_component(&mut self, component: HslComponent, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let value = value.round().clamp(0.0, component.max());
        self.replace(self.color.with_component(component, value));
        true
    }

    /// Text variant of [`Self::set_hsl_component`]. Text that matches the
    /// displayed (rounded) value leaves the unrounded component untouched.
    pub fn set_hsl_component_text(&mut self, component: HslComponent, text: &str) -> bool {
        let Some(value) = parse_number(text) else {
            return false;
        };
        if displays_as(value, self.color.component(component), component.max()) {
            return true;
        }
        self.set_hsl_component(component, value)
    }

    fn replace(&mut self, next: HslColor) -> bool {
        if next == self.color {
            return false;
        }
        self.color = next;
        self.revision += 1;
        if self.lookup_enabled {
            self.lookup.notify_change(Instant::now());
            self.pantone_name = PantoneStatus::Searching;
        }
        true
    }

    // ── Clipboard ──────────────────────────────────────────────────────

    /// Text to place on the clipboard for `format`, recording the copy for
    /// feedback. Empty or placeholder values are not copied.
    pub fn copy(&mut self, format: ColorFormat) -> Option<String> {
        self.copy_at(format, Instant::now())
    }

    pub fn copy_at(&mut self, format: ColorFormat, now: Instant) -> Option<String> {
        let value = self.format_value(format);
        if value.is_empty() || value == PLACEHOLDER {
            return None;
        }
        self.copied = Some((format, now));
        Some(value)
    }

    pub fn copy_feedback(&self) -> Duration {
        self.copy_feedback
    }

    /// The format whose copy confirmation should still be shown at `now`.
    pub fn copied_format(&self, now: Instant) -> Option<ColorFormat> {
        match self.copied {
            Some((format, at)) if now.saturating_duration_since(at) < self.copy_feedback => {
                Some(format)
            }
            _ => None,
        }
    }

    /// Clear an elapsed copy confirmation. Returns whether anything changed.
    pub fn expire_copy_feedback(&mut self, now: Instant) -> bool {
        if self.copied.is_some() && self.copied_format(now).is_none() {
            self.copied = None;
            return true;
        }
        false
    }

    // ── Pantone name lookup (hex → name) ───────────────────────────────

    pub fn pantone_name(&self) -> &PantoneStatus {
        &self.pantone_name
    }

    pub fn lookup_generation(&self) -> Generation {
        self.lookup.generation()
    }

    pub fn lookup_debounce(&self) -> Duration {
        self.lookup.quiet()
    }

    /// When the pending lookup becomes due.
    pub fn lookup_due_at(&self) -> Option<Instant> {
        if !self.lookup_enabled {
            return None;
        }
        self.lookup.due_at()
    }

    /// Hand out the lookup for the current color once it has settled.
    pub fn poll_lookup(&mut self, now: Instant) -> Option<LookupTicket> {
        if !self.lookup_enabled {
            return None;
        }
        let generation = self.lookup.poll(now)?;
        let hex = self.hex();
        debug!("pantone lookup #{} for {hex}", generation.value());
        Some(LookupTicket { generation, hex })
    }

    /// Apply a lookup result unless a newer change superseded it.
    pub fn complete_lookup(&mut self, generation: Generation, result: Result<Option<String>>) -> bool {
        if !self.lookup.accept(generation) {
            debug!("discarding stale pantone lookup #{}", generation.value());
            return false;
        }
        self.pantone_name = match result {
            Ok(Some(name)) => PantoneStatus::Found(name),
            Ok(None) => PantoneStatus::NotFound,
            Err(e) => {
                warn!("pantone lookup failed: {e}");
                PantoneStatus::Failed
            }
        };
        true
    }

    // ── Pantone search (name → hex) ────────────────────────────────────

    pub fn search_status(&self) -> &PantoneStatus {
        &self.search_status
    }

    /// Start a search for a Pantone name. Blank queries are ignored.
    pub fn begin_pantone_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let generation = self.search.issue();
        self.search_revision = self.revision;
        debug!("pantone search #{} for {query:?}", generation.value());
        self.search_status = PantoneStatus::Searching;
        Some(SearchTicket {
            generation,
            query: query.to_string(),
        })
    }

    /// Apply a search result: a found hex becomes the current color.
    ///
    /// The result is dropped if the color was edited after the search
    /// started; the user's edit wins.
    pub fn complete_pantone_search(
        &mut self,
        generation: Generation,
        result: Result<Option<String>>,
    ) -> bool {
        if !self.search.accept(generation) {
            debug!("discarding stale pantone search #{}", generation.value());
            return false;
        }
        if self.revision != self.search_revision {
            debug!(
                "discarding pantone search #{}: color edited since",
                generation.value()
            );
            self.search.cancel();
            self.search_status = PantoneStatus::Idle;
            return false;
        }
        self.search_status = match result {
            Ok(Some(hex)) if self.set_hex(&hex) => PantoneStatus::Found(self.hex()),
            Ok(Some(hex)) => {
                warn!("pantone search returned unusable hex {hex:?}");
                PantoneStatus::Failed
            }
            Ok(None) => PantoneStatus::NotFound,
            Err(e) => {
                warn!("pantone search failed: {e}");
                PantoneStatus::Failed
            }
        };
        true
    }

    /// Unmount: forget the drag, feedback and anything in flight.
    pub fn teardown(&mut self) {
        self.drag = DragState::Idle;
        self.copied = None;
        self.lookup.cancel();
        self.search.cancel();
        self.pantone_name = PantoneStatus::Idle;
        self.search_status = PantoneStatus::Idle;
    }
}

/// Parse a numeric field; `None` for anything that is not a finite number.
fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether an entered `value` is what `current` already shows as, once both
/// are rounded and clamped to `0..=max`.
pub(crate) fn displays_as(value: f64, current: f64, max: f64) -> bool {
    value.round().clamp(0.0, max) == current.round().clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn controller() -> ColorPickerController {
        ColorPickerController::new(
            HslColor::new(259.0, 90.0, 66.0),
            Duration::from_millis(2000),
            Duration::from_millis(800),
        )
    }

    fn hsl(c: &ColorPickerController) -> (f64, f64, f64) {
        let color = c.color();
        (color.hue(), color.saturation(), color.lightness())
    }

    #[test]
    fn derived_formats_follow_state() {
        let mut c = controller();
        c.set_color(HslColor::new(0.0, 100.0, 50.0));
        assert_eq!(c.hex(), "#FF0000");
        assert_eq!(c.rgb_string(), "rgb(255, 0, 0)");
        assert_eq!(c.hsl_string(), "hsl(0, 100%, 50%)");
        c.set_lightness(100.0);
        assert_eq!(c.hex(), "#FFFFFF");
    }

    #[test]
    fn hex_entry_end_to_end() {
        let mut c = controller();
        assert!(c.set_hex("#0F4C81"));
        assert_eq!(c.rgb(), Rgb::new(15, 76, 129));
        let (h, s, l) = hsl(&c);
        assert_eq!(h, 208.0);
        assert_eq!(s.round(), 79.0);
        assert_eq!(l.round(), 28.0);
        assert_eq!(c.copy(ColorFormat::Hex).as_deref(), Some("#0F4C81"));
    }

    #[test]
    fn invalid_hex_leaves_state() {
        let mut c = controller();
        let before = c.color();
        assert!(!c.set_hex("#0F4C8"));
        assert!(!c.set_hex("#ZZZ"));
        assert!(!c.set_hex(""));
        assert_eq!(c.color(), before);
    }

    #[test]
    fn wheel_drag_state_machine() {
        let mut c = controller();
        assert_eq!(c.drag_state(), DragState::Idle);

        // Moves without a press do nothing.
        assert!(!c.wheel_pointer_move(250.0, 125.0, 250.0));
        assert_eq!(hsl(&c), (259.0, 90.0, 66.0));

        c.wheel_pointer_down(125.0, 125.0, 250.0);
        assert!(c.is_dragging());
        assert_eq!(hsl(&c), (0.0, 0.0, 66.0));

        assert!(c.wheel_pointer_move(250.0, 125.0, 250.0));
        assert_eq!(hsl(&c), (0.0, 100.0, 66.0));

        // Released outside the wheel still ends the drag.
        c.pointer_up();
        assert_eq!(c.drag_state(), DragState::Idle);
        assert!(!c.wheel_pointer_move(125.0, 250.0, 250.0));
        assert_eq!(hsl(&c), (0.0, 100.0, 66.0));
    }

    #[test]
    fn lightness_is_clamped() {
        let mut c = controller();
        assert!(c.set_lightness(140.0));
        assert_eq!(c.color().lightness(), 100.0);
        assert!(c.set_lightness_text(" 12 "));
        assert_eq!(hsl(&c), (259.0, 90.0, 12.0));
        assert!(!c.set_lightness(f64::NAN));
        assert!(!c.set_lightness_text("abc"));
        assert_eq!(c.color().lightness(), 12.0);
    }

    #[test]
    fn rgb_channel_merges_with_current() {
        let mut c = controller();
        c.set_color(HslColor::new(0.0, 100.0, 50.0));
        assert!(c.set_rgb_channel(RgbChannel::Blue, 255.0));
        assert_eq!(c.rgb(), Rgb::new(255, 0, 255));
        assert_eq!(hsl(&c), (300.0, 100.0, 50.0));

        assert!(c.set_rgb_channel_text(RgbChannel::Red, "999"));
        assert_eq!(c.rgb(), Rgb::new(255, 0, 255));
        assert!(c.set_rgb_channel(RgbChannel::Red, -4.0));
        assert_eq!(c.rgb(), Rgb::new(0, 0, 255));
    }

    #[test]
    fn non_numeric_fields_are_ignored() {
        let mut c = controller();
        let before = c.color();
        assert!(!c.set_rgb_channel_text(RgbChannel::Green, ""));
        assert!(!c.set_rgb_channel_text(RgbChannel::Green, "1e"));
        assert!(!c.set_hsl_component_text(HslComponent::Hue, "-"));
        assert!(!c.set_hsl_component_text(HslComponent::Hue, "inf"));
        assert_eq!(c.color(), before);
    }

    #[test]
    fn hsl_field_touches_one_component() {
        let mut c = controller();
        assert!(c.set_hsl_component(HslComponent::Saturation, 150.0));
        assert_eq!(hsl(&c), (259.0, 100.0, 66.0));
        assert!(c.set_hsl_component_text(HslComponent::Hue, "400"));
        // Clamped to 360, which is the same angle as 0.
        assert_eq!(hsl(&c), (0.0, 100.0, 66.0));
        assert!(c.set_hsl_component_text(HslComponent::Hue, "42.4"));
        assert_eq!(hsl(&c), (42.0, 100.0, 66.0));
    }

    #[test]
    fn re_entering_displayed_values_keeps_the_color() {
        let mut c = controller();
        assert!(c.set_hex("#0F4C81"));
        let before = c.color();
        assert_ne!(before.saturation().fract(), 0.0);

        // What an untouched S/L field sends back on focus loss.
        assert!(c.set_hsl_component_text(HslComponent::Saturation, "79"));
        assert!(c.set_hsl_component_text(HslComponent::Lightness, " 28 "));
        assert!(c.set_hsl_component_text(HslComponent::Hue, "208"));
        assert_eq!(c.color(), before);
        assert_eq!(c.hex(), "#0F4C81");

        // A real edit still applies.
        assert!(c.set_hsl_component_text(HslComponent::Lightness, "29"));
        assert_eq!(c.color().lightness(), 29.0);
    }

    #[test]
    fn displayed_value_comparison() {
        assert!(displays_as(79.0, 79.17, 100.0));
        assert!(displays_as(150.0, 100.0, 100.0));
        assert!(!displays_as(80.0, 79.17, 100.0));
        assert!(!displays_as(360.0, 0.0, 360.0));
    }

    #[test]
    fn search_result_loses_to_later_edit() {
        let mut c = controller();
        let ticket = c.begin_pantone_search("Classic Blue").unwrap();
        c.set_lightness(20.0);
        let edited = c.color();

        assert!(!c.complete_pantone_search(ticket.generation, Ok(Some("#0F4C81".into()))));
        assert_eq!(c.color(), edited);
        assert_eq!(c.search_status(), &PantoneStatus::Idle);

        // A search started after the edit applies.
        let ticket = c.begin_pantone_search("Classic Blue").unwrap();
        assert!(c.complete_pantone_search(ticket.generation, Ok(Some("#0F4C81".into()))));
        assert_eq!(c.hex(), "#0F4C81");
    }

    #[test]
    fn copy_feedback_expires() {
        let mut c = controller();
        let t0 = Instant::now();
        let copied = c.copy_at(ColorFormat::Rgb, t0).unwrap();
        assert_eq!(copied, c.rgb_string());
        assert_eq!(c.copied_format(t0 + Duration::from_millis(1999)), Some(ColorFormat::Rgb));
        assert_eq!(c.copied_format(t0 + Duration::from_millis(2000)), None);
        assert!(!c.expire_copy_feedback(t0 + Duration::from_millis(10)));
        assert!(c.expire_copy_feedback(t0 + Duration::from_millis(2500)));
    }

    #[test]
    fn lookup_disabled_by_default() {
        let mut c = controller();
        c.set_lightness(10.0);
        assert_eq!(c.lookup_due_at(), None);
        assert_eq!(c.poll_lookup(Instant::now() + Duration::from_secs(5)), None);
        assert_eq!(c.pantone_name(), &PantoneStatus::Idle);
    }

    #[test]
    fn lookup_applies_latest_and_drops_stale() {
        let mut c = controller();
        c.set_lookup_enabled(true);
        c.set_hex("#0F4C81");
        assert_eq!(c.pantone_name(), &PantoneStatus::Searching);

        let later = Instant::now() + Duration::from_secs(1);
        let ticket = c.poll_lookup(later).expect("lookup due");
        assert_eq!(ticket.hex, "#0F4C81");
        assert_eq!(c.poll_lookup(later), None);

        // The color moves on before the answer arrives.
        c.set_lightness(50.0);
        assert!(!c.complete_lookup(ticket.generation, Ok(Some("Classic Blue".into()))));
        assert_eq!(c.pantone_name(), &PantoneStatus::Searching);

        let ticket = c.poll_lookup(Instant::now() + Duration::from_secs(1)).unwrap();
        assert!(c.complete_lookup(ticket.generation, Ok(None)));
        assert_eq!(c.pantone_name(), &PantoneStatus::NotFound);
        assert_eq!(c.pantone_name().display(), "not found");
    }

    #[test]
    fn lookup_failure_keeps_color() {
        let mut c = controller();
        c.set_lookup_enabled(true);
        let before = c.color();
        let ticket = c.poll_lookup(Instant::now() + Duration::from_secs(1)).unwrap();
        assert!(c.complete_lookup(ticket.generation, Err(Error::malformed("garbage"))));
        assert_eq!(c.pantone_name(), &PantoneStatus::Failed);
        assert_eq!(c.pantone_name().display(), "search failed");
        assert_eq!(c.color(), before);
    }

    #[test]
    fn search_applies_found_hex() {
        let mut c = controller();
        assert!(c.begin_pantone_search("   ").is_none());

        let first = c.begin_pantone_search("Classic Blue").unwrap();
        let second = c.begin_pantone_search("Ultra Violet").unwrap();
        assert_eq!(second.query, "Ultra Violet");

        assert!(!c.complete_pantone_search(first.generation, Ok(Some("#0F4C81".into()))));
        assert!(c.complete_pantone_search(second.generation, Ok(Some("#5F4B8B".into()))));
        assert_eq!(c.hex(), "#5F4B8B");
        assert_eq!(c.search_status(), &PantoneStatus::Found("#5F4B8B".into()));
    }

    #[test]
    fn search_not_found_keeps_color() {
        let mut c = controller();
        let before = c.color();
        let ticket = c.begin_pantone_search("Nonexistent").unwrap();
        assert!(c.complete_pantone_search(ticket.generation, Ok(None)));
        assert_eq!(c.search_status(), &PantoneStatus::NotFound);
        assert_eq!(c.color(), before);

        let ticket = c.begin_pantone_search("Broken").unwrap();
        assert!(c.complete_pantone_search(ticket.generation, Ok(Some("#XYZ".into()))));
        assert_eq!(c.search_status(), &PantoneStatus::Failed);
        assert_eq!(c.color(), before);
    }

    #[test]
    fn teardown_discards_in_flight() {
        let mut c = controller();
        c.set_lookup_enabled(true);
        let ticket = c.poll_lookup(Instant::now() + Duration::from_secs(1)).unwrap();
        let search = c.begin_pantone_search("Classic Blue").unwrap();
        c.wheel_pointer_down(10.0, 10.0, 250.0);
        c.teardown();

        assert!(!c.is_dragging());
        assert!(!c.complete_lookup(ticket.generation, Ok(Some("x".into()))));
        assert!(!c.complete_pantone_search(search.generation, Ok(Some("#FFFFFF".into()))));
        assert_eq!(c.pantone_name(), &PantoneStatus::Idle);
    }

    struct FakePantone;

    impl crate::pantone::PantoneSource for FakePantone {
        fn name_for_hex(&self, hex: &str) -> Result<Option<String>> {
            Ok((hex == "#0F4C81").then(|| "PANTONE 19-4052 Classic Blue".to_string()))
        }

        fn hex_for_name(&self, name: &str) -> Result<Option<String>> {
            match name {
                "Ultra Violet" => Ok(Some("#5F4B8B".to_string())),
                "Broken" => Err(Error::malformed("no candidates in response")),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn tickets_round_trip_through_a_source() {
        use crate::pantone::PantoneSource;

        let source = FakePantone;
        let mut c = controller();
        c.set_lookup_enabled(true);
        c.set_hex("0f4c81");

        let ticket = c.poll_lookup(Instant::now() + Duration::from_secs(1)).unwrap();
        assert!(c.complete_lookup(ticket.generation, source.name_for_hex(&ticket.hex)));
        assert_eq!(c.pantone_name().display(), "PANTONE 19-4052 Classic Blue");

        let search = c.begin_pantone_search(" Ultra Violet ").unwrap();
        assert!(c.complete_pantone_search(search.generation, source.hex_for_name(&search.query)));
        assert_eq!(c.hex(), "#5F4B8B");
        // Applying the found color schedules a fresh name lookup.
        assert_eq!(c.pantone_name(), &PantoneStatus::Searching);

        let before = c.color();
        let search = c.begin_pantone_search("Broken").unwrap();
        assert!(c.complete_pantone_search(search.generation, source.hex_for_name(&search.query)));
        assert_eq!(c.search_status(), &PantoneStatus::Failed);
        assert_eq!(c.color(), before);
    }
}
