//! Canvas 2D implementation of the field's drawing surface.

use glam::Vec2;
use particle_field::{Color, FieldError, Surface, SurfaceMetrics};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up `<canvas id=canvas_id>` and its 2D context.
    pub fn from_id(canvas_id: &str) -> Result<Self, FieldError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| FieldError::SurfaceUnavailable("no document".into()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| FieldError::SurfaceUnavailable(format!("no element #{canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::SurfaceUnavailable(format!("#{canvas_id} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| FieldError::SurfaceUnavailable("2d context unavailable".into()))?;
        Ok(Self { canvas, ctx })
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }
}

impl SurfaceMetrics for CanvasSurface {
    fn measured_size(&self) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(rect.width() as f32, rect.height() as f32)
    }
}

impl Surface for CanvasSurface {
    /// Match the backing store to `size`. The CSS box is left to the page so
    /// the next measurement still reflects the layout. Clears the canvas.
    fn fit(&mut self, size: Vec2) {
        self.canvas.set_width(size.x as u32);
        self.canvas.set_height(size.y as u32);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.set_fill(color);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        let (x, y) = (center.x as f64, center.y as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius as f64) else {
            log::debug!("radial gradient rejected at ({x}, {y}) r={radius}");
            return;
        };
        for (offset, color) in [(0.0, inner), (1.0, outer)] {
            if let Err(err) = gradient.add_color_stop(offset, &color.to_css()) {
                log::debug!("color stop {offset} rejected: {:?}", err);
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius as f64, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }
}
