//! Lightness slider (0–100).
//!
//! Renders a horizontal gradient black → base color → white for the
//! current hue and saturation as a rasterized image, avoiding vger's broken
//! linear gradient coordinate handling.

use std::sync::Arc;

use floem::kurbo::{Line, Rect};
use floem::peniko::{self, Blob, Color};

use floem::reactive::{RwSignal, SignalUpdate, SignalWith, create_effect};
use floem::views::Decorators;
use floem::{
    View, ViewId,
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
};
use floem_renderer::Renderer;

use crate::color::HslColor;
use crate::constants;
use crate::controller::ColorPickerController;
use crate::math;

const BLACK: (u8, u8, u8) = (0, 0, 0);
const WHITE: (u8, u8, u8) = (255, 255, 255);

/// Gradient color at `t` (0.0 left, 1.0 right).
///
/// Three stops: black, the hue/saturation at 50% lightness, white.
pub fn gradient_color_at(hue: f64, saturation: f64, t: f64) -> (u8, u8, u8) {
    let mid = math::hsl_to_rgb(hue, saturation, 50.0);
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        math::lerp_rgb(BLACK, mid, t * 2.0)
    } else {
        math::lerp_rgb(mid, WHITE, (t - 0.5) * 2.0)
    }
}

/// Rasterize the lightness gradient to a `width`×`height` RGBA8 buffer.
pub fn rasterize_lightness_gradient(width: u32, height: u32, hue: f64, saturation: f64) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    let mut buf = vec![0u8; w * h * 4];
    for px in 0..width {
        let t = px as f64 / (width.saturating_sub(1)).max(1) as f64;
        let (r, g, b) = gradient_color_at(hue, saturation, t);
        for py in 0..height {
            let offset = (py as usize * w + px as usize) * 4;
            buf[offset] = r;
            buf[offset + 1] = g;
            buf[offset + 2] = b;
            buf[offset + 3] = 255;
        }
    }
    buf
}

/// Lightness for a pointer at `x` on a track `width` wide.
pub fn lightness_at(x: f64, width: f64) -> f64 {
    if width <= 0.0 || !x.is_finite() {
        return 0.0;
    }
    (x / width * 100.0).round().clamp(0.0, 100.0)
}

/// Normalize a range-control value: rounded and clamped to 0–100.
pub fn clamp_lightness(value: f64) -> Option<f64> {
    value
        .is_finite()
        .then(|| value.round().clamp(0.0, 100.0))
}

/// X position of the marker for `lightness` on a track `width` wide.
pub fn marker_x(lightness: f64, width: f64) -> f64 {
    lightness.clamp(0.0, 100.0) / 100.0 * width
}

pub struct LightnessSlider {
    id: ViewId,
    held: bool,
    state: RwSignal<ColorPickerController>,
    color: HslColor,
    size: floem::taffy::prelude::Size<f32>,
    /// Cached gradient image.
    grad_img: Option<peniko::Image>,
    grad_hash: Vec<u8>,
    cached_color: (u8, u8, u8),
    cached_dims: (u32, u32),
}

/// Creates a horizontal lightness slider bound to the picker state.
pub fn lightness_slider(
    state: RwSignal<ColorPickerController>,
    width: u32,
    height: u32,
) -> LightnessSlider {
    let id = ViewId::new();

    create_effect(move |_| {
        let color = state.with(|c| c.color());
        id.update_state(color);
    });

    LightnessSlider {
        id,
        held: false,
        state,
        color: state.with_untracked(|c| c.color()),
        size: Default::default(),
        grad_img: None,
        grad_hash: Vec::new(),
        cached_color: (0, 0, 0),
        cached_dims: (0, 0),
    }
    .style(move |s| {
        s.width(width as f32)
            .height(height as f32)
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl LightnessSlider {
    fn update_from_pointer(&mut self, x: f64) {
        let value = lightness_at(x, self.size.width as f64);
        self.state.update(|c| {
            c.set_lightness(value);
        });
    }

    fn ensure_gradient_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        // The gradient only depends on the 50% stop, i.e. hue and saturation.
        let key = math::hsl_to_rgb(self.color.hue(), self.color.saturation(), 50.0);
        let dims = (pw, ph);
        if self.grad_img.is_some() && self.cached_dims == dims && self.cached_color == key {
            return;
        }

        let pixels =
            rasterize_lightness_gradient(pw, ph, self.color.hue(), self.color.saturation());
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        let id = blob.id();
        self.grad_hash = id.to_le_bytes().to_vec();
        self.grad_img = Some(img);
        self.cached_color = key;
        self.cached_dims = dims;
    }
}

impl View for LightnessSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(color) = state.downcast::<HslColor>() {
            self.color = *color;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                self.update_from_pointer(e.pos.x);
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    self.update_from_pointer(e.pos.x);
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.held = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);

        let scale = cx.scale();
        self.ensure_gradient_image(scale);
        if let Some(ref img) = self.grad_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.grad_hash,
                },
                rect,
            );
        }

        // Marker: white underlay with a thinner black line on top
        let x = marker_x(self.color.lightness(), w);
        let line = Line::new((x, 0.0), (x, h));
        cx.stroke(
            &line,
            Color::WHITE,
            &floem::kurbo::Stroke::new(constants::MARKER_OUTER_WIDTH),
        );
        cx.stroke(
            &line,
            Color::BLACK,
            &floem::kurbo::Stroke::new(constants::MARKER_INNER_WIDTH),
        );

        cx.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_stops() {
        assert_eq!(gradient_color_at(0.0, 100.0, 0.0), (0, 0, 0));
        assert_eq!(gradient_color_at(0.0, 100.0, 0.5), (255, 0, 0));
        assert_eq!(gradient_color_at(0.0, 100.0, 1.0), (255, 255, 255));
        assert_eq!(gradient_color_at(240.0, 100.0, 0.25), (0, 0, 128));
        assert_eq!(gradient_color_at(240.0, 100.0, 0.75), (128, 128, 255));
    }

    #[test]
    fn gradient_raster_columns() {
        let buf = rasterize_lightness_gradient(3, 2, 120.0, 100.0);
        assert_eq!(buf.len(), 3 * 2 * 4);
        assert_eq!(&buf[0..4], &[0, 0, 0, 255]);
        assert_eq!(&buf[4..8], &[0, 255, 0, 255]);
        assert_eq!(&buf[8..12], &[255, 255, 255, 255]);
        // Second row repeats the first.
        assert_eq!(&buf[12..24], &buf[0..12]);
    }

    #[test]
    fn position_to_lightness() {
        assert_eq!(lightness_at(0.0, 250.0), 0.0);
        assert_eq!(lightness_at(125.0, 250.0), 50.0);
        assert_eq!(lightness_at(250.0, 250.0), 100.0);
        assert_eq!(lightness_at(-30.0, 250.0), 0.0);
        assert_eq!(lightness_at(400.0, 250.0), 100.0);
        assert_eq!(lightness_at(10.0, 0.0), 0.0);
    }

    #[test]
    fn range_values_clamp() {
        assert_eq!(clamp_lightness(42.0), Some(42.0));
        assert_eq!(clamp_lightness(-1.0), Some(0.0));
        assert_eq!(clamp_lightness(101.0), Some(100.0));
        assert_eq!(clamp_lightness(f64::NAN), None);
    }

    #[test]
    fn marker_follows_lightness() {
        assert_eq!(marker_x(0.0, 250.0), 0.0);
        assert_eq!(marker_x(66.0, 250.0), 165.0);
        assert_eq!(marker_x(100.0, 250.0), 250.0);
    }
}
