//! Circular HSL color wheel.
//!
//! Angle maps to hue and radius to saturation, at a fixed lightness of 50%.
//! The disc is rasterized to an RGBA8 buffer once per raster size and the
//! image is scaled to the widget rather than redrawn.

use std::sync::Arc;

use floem::kurbo::{Circle, Point, Rect};
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

/// Lightness every wheel pixel is drawn at.
pub const WHEEL_LIGHTNESS: f64 = 50.0;

/// Rasterize the hue/saturation disc to a `size`×`size` RGBA8 buffer.
///
/// Pixels outside the disc stay fully transparent.
pub fn rasterize_disc(size: u32) -> Vec<u8> {
    let center = size as f64 / 2.0;
    let radius = center;

    let side = size as usize;
    let mut buf = vec![0u8; side * side * 4];

    for y in 0..size {
        let dy = y as f64 - center;
        let row_offset = y as usize * side * 4;

        for x in 0..size {
            let dx = x as f64 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > radius {
                continue;
            }

            let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
            let sat = dist / radius * 100.0;
            let (r, g, b) = math::hsl_to_rgb(angle, sat, WHEEL_LIGHTNESS);

            let offset = row_offset + x as usize * 4;
            buf[offset] = r;
            buf[offset + 1] = g;
            buf[offset + 2] = b;
            buf[offset + 3] = 255;
        }
    }

    buf
}

/// Map a point on a wheel of side `size` to `(hue, saturation)`.
///
/// Points beyond the rim clamp to the rim. Both values are whole numbers;
/// hue is 0 at 3 o'clock and grows clockwise.
pub fn point_to_hue_saturation(x: f64, y: f64, size: f64) -> (f64, f64) {
    let center = size / 2.0;
    let radius = center;
    if radius <= 0.0 {
        return (0.0, 0.0);
    }

    let dx = x - center;
    let dy = y - center;
    let dist = (dx * dx + dy * dy).sqrt().min(radius);
    let hue = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    let sat = dist / radius * 100.0;

    (hue.round().rem_euclid(360.0), sat.round())
}

/// Where the indicator for `(hue, saturation)` sits on a wheel of side `size`.
pub fn indicator_position(hue: f64, saturation: f64, size: f64) -> (f64, f64) {
    let center = size / 2.0;
    let angle = hue.to_radians();
    let r = saturation / 100.0 * center;
    (center + angle.cos() * r, center + angle.sin() * r)
}

/// Indicator outline: black on light colors, white on dark ones.
pub fn indicator_stroke(lightness: f64) -> (u8, u8, u8) {
    if lightness > constants::DARK_STROKE_ABOVE {
        (0, 0, 0)
    } else {
        (255, 255, 255)
    }
}

pub(crate) struct ColorWheel {
    id: ViewId,
    state: RwSignal<ColorPickerController>,
    color: HslColor,
    size: floem::taffy::prelude::Size<f32>,
    raster_size: u32,
    /// Cached disc image; only depends on `raster_size`.
    disc_img: Option<peniko::Image>,
    disc_hash: Vec<u8>,
}

/// Creates the hue/saturation wheel bound to the picker state.
///
/// `raster_size` is the side of the rasterized disc in pixels.
pub(crate) fn color_wheel(state: RwSignal<ColorPickerController>, raster_size: u32) -> ColorWheel {
    let id = ViewId::new();

    create_effect(move |_| {
        let color = state.with(|c| c.color());
        id.update_state(color);
    });

    ColorWheel {
        id,
        state,
        color: state.with_untracked(|c| c.color()),
        size: Default::default(),
        raster_size: raster_size.max(1),
        disc_img: None,
        disc_hash: Vec::new(),
    }
    .style(move |s| {
        s.width(raster_size as f32)
            .aspect_ratio(1.0)
            .min_height(100.0)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl ColorWheel {
    /// Side length of the square region used for the wheel.
    fn side(&self) -> f64 {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        w.min(h)
    }

    fn center(&self) -> Point {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        Point::new(w / 2.0, h / 2.0)
    }

    /// The square rect centered within the widget, used for drawing the wheel.
    fn wheel_rect(&self) -> Rect {
        let c = self.center();
        let r = self.side() / 2.0;
        Rect::new(c.x - r, c.y - r, c.x + r, c.y + r)
    }

    /// Widget position → coordinates local to the wheel square.
    fn local(&self, pos: Point) -> (f64, f64, f64) {
        let rect = self.wheel_rect();
        (pos.x - rect.x0, pos.y - rect.y0, self.side())
    }

    fn ensure_disc_image(&mut self) {
        if self.disc_img.is_some() {
            return;
        }

        let size = self.raster_size;
        let pixels = rasterize_disc(size);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, size, size);

        self.disc_hash = blob.id().to_le_bytes().to_vec();
        self.disc_img = Some(img);
    }
}

impl View for ColorWheel {
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
                let (x, y, side) = self.local(e.pos);
                if side <= 0.0 {
                    return EventPropagation::Continue;
                }
                // Claim the pointer so the release arrives even outside the wheel.
                cx.update_active(self.id());
                self.state.update(|c| c.wheel_pointer_down(x, y, side));
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if !self.state.with_untracked(|c| c.is_dragging()) {
                    return EventPropagation::Continue;
                }
                let (x, y, side) = self.local(e.pos);
                self.state.update(|c| {
                    c.wheel_pointer_move(x, y, side);
                });
                EventPropagation::Stop
            }
            Event::PointerUp(_) | Event::FocusLost => {
                if self.state.with_untracked(|c| c.is_dragging()) {
                    self.state.update(|c| c.pointer_up());
                }
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
        let side = self.side();
        if side <= 0.0 {
            return;
        }

        let center = self.center();
        let radius = side / 2.0;

        let wheel_rect = self.wheel_rect();
        let clip = Circle::new(center, radius);
        cx.save();
        cx.clip(&clip);
        self.ensure_disc_image();
        if let Some(ref img) = self.disc_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.disc_hash,
                },
                wheel_rect,
            );
        }
        cx.restore();

        // Indicator: filled with the current color, outlined for contrast
        let (ix, iy) = indicator_position(self.color.hue(), self.color.saturation(), side);
        let marker = Circle::new(
            Point::new(wheel_rect.x0 + ix, wheel_rect.y0 + iy),
            constants::INDICATOR_RADIUS,
        );
        let rgb = self.color.to_rgb();
        cx.fill(&marker, Color::rgb8(rgb.r, rgb.g, rgb.b), 0.0);
        let (sr, sg, sb) = indicator_stroke(self.color.lightness());
        cx.stroke(
            &marker,
            Color::rgb8(sr, sg, sb),
            &floem::kurbo::Stroke::new(constants::INDICATOR_STROKE),
        );
    }
}
