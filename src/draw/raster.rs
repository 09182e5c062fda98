//! Cairo-based raster renderer.
//!
//! Strokes are approximated by stamping filled circles along each segment at
//! equal arc-length steps, so dot density stays even however the segment bends.

use super::bezier::{Bezier, Position};
use super::color::{BLACK, Color};
use super::primitive::{DrawPrimitive, StrokeStyle};
use cairo::{Context, Format, ImageSurface};
use log::warn;
use std::f64::consts::PI;

/// Distance between stamped circles, in logical units.
pub const STAMP_STEP: f64 = 0.5;

/// A bitmap drawing surface plus the context drawing into it.
///
/// Drawing coordinates are logical units; the backing bitmap is scaled by the
/// device pixel ratio.
pub struct RasterRenderer {
    surface: ImageSurface,
    ctx: Context,
    logical_width: f64,
    logical_height: f64,
    ratio: f64,
    color_cache: Option<(String, Color)>,
}

impl std::fmt::Debug for RasterRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterRenderer")
            .field("logical_width", &self.logical_width)
            .field("logical_height", &self.logical_height)
            .field("ratio", &self.ratio)
            .finish()
    }
}

impl RasterRenderer {
    /// Allocates a transparent surface of `width` x `height` logical units.
    pub fn new(width: f64, height: f64, ratio: f64) -> Result<Self, cairo::Error> {
        let ratio = ratio.max(1.0);
        let pixel_width = (width * ratio).round().max(1.0) as i32;
        let pixel_height = (height * ratio).round().max(1.0) as i32;
        let surface = ImageSurface::create(Format::ARgb32, pixel_width, pixel_height)?;
        let ctx = Context::new(&surface)?;
        ctx.scale(ratio, ratio);
        ctx.set_antialias(cairo::Antialias::Best);

        Ok(Self {
            surface,
            ctx,
            logical_width: width,
            logical_height: height,
            ratio,
            color_cache: None,
        })
    }

    pub fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    pub fn pixel_size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Replaces every pixel with `color` (transparent colors erase).
    pub fn fill(&mut self, color: Color) {
        let _ = self.ctx.save();
        self.ctx.set_operator(cairo::Operator::Source);
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        let _ = self.ctx.paint();
        let _ = self.ctx.restore();
    }

    /// Paints a decoded image scaled into the given logical rectangle.
    pub fn draw_image(&mut self, image: &ImageSurface, x: f64, y: f64, width: f64, height: f64) {
        if image.width() <= 0 || image.height() <= 0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let _ = self.ctx.save();
        self.ctx.translate(x, y);
        self.ctx
            .scale(width / image.width() as f64, height / image.height() as f64);
        if self.ctx.set_source_surface(image, 0.0, 0.0).is_ok() {
            let _ = self.ctx.paint();
        }
        let _ = self.ctx.restore();
    }

    /// Encodes the surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, cairo::IoError> {
        self.surface.flush();
        let mut bytes = Vec::new();
        self.surface.write_to_png(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads the ARGB value of the pixel at device coordinates.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.surface.width() || y >= self.surface.height() {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut value = None;
        let _ = self.surface.with_data(|data| {
            if let Some(bytes) = data.get(offset..offset + 4) {
                value = Some(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
            }
        });
        value
    }

    /// Whether any pixel has a non-zero alpha channel.
    pub fn has_ink(&self) -> bool {
        self.surface.flush();
        let width = self.surface.width() as usize;
        let stride = self.surface.stride() as usize;
        let mut inked = false;
        let _ = self.surface.with_data(|data| {
            inked = data.chunks(stride).any(|row| {
                row[..width * 4]
                    .chunks_exact(4)
                    .any(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) >> 24 != 0)
            });
        });
        inked
    }

    fn set_pen(&mut self, css: &str) {
        let color = match &self.color_cache {
            Some((text, color)) if text == css => *color,
            _ => {
                let color = Color::parse(css).unwrap_or_else(|err| {
                    warn!("{err}, drawing in black");
                    BLACK
                });
                self.color_cache = Some((css.to_string(), color));
                color
            }
        };
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }

    fn stamp(&self, center: Position, radius: f64) {
        self.ctx.new_sub_path();
        self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, 2.0 * PI);
    }
}

impl DrawPrimitive for RasterRenderer {
    fn draw_dot(&mut self, center: Position, radius: f64, style: &StrokeStyle) {
        self.set_pen(&style.color);
        self.ctx.new_path();
        self.stamp(center, radius);
        let _ = self.ctx.fill();
    }

    fn draw_curve(&mut self, curve: &Bezier, style: &StrokeStyle) {
        self.set_pen(&style.color);
        self.ctx.new_path();
        for (center, width) in curve.walk(STAMP_STEP) {
            self.stamp(center, width.min(style.max_width));
        }
        let _ = self.ctx.fill();
    }
}
