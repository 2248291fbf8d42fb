//! Browser canvas backend.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{Rgba, Surface};

/// A [`Surface`] that draws into a 2D canvas context.
///
/// Exceptions thrown by the context (`arc` with a negative radius, a
/// non-finite gradient coordinate) are returned as `JsValue` errors.
pub struct Canvas<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> Canvas<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn circle_path(&self, (x, y): (f32, f32), radius: f32) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU)
    }
}

impl Surface for Canvas<'_> {
    type Error = JsValue;

    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    ) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(x as f64, y as f64, width as f64, height as f64);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba,
        width: f32,
    ) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.move_to(from.0 as f64, from.1 as f64);
        self.ctx.line_to(to.0 as f64, to.1 as f64);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    ) -> Result<(), JsValue> {
        let (x, y) = (center.0 as f64, center.1 as f64);
        let gradient = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, radius as f64)?;
        gradient.add_color_stop(0.0, &inner.to_string())?;
        gradient.add_color_stop(1.0, &outer.to_string())?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.circle_path(center, radius)?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Rgba,
        width: f32,
    ) -> Result<(), JsValue> {
        self.circle_path(center, radius)?;
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
        Ok(())
    }
}
