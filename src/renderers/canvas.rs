//! Canvas 2D binding for the waveform
//!
//! Owns the `<canvas>` element and its 2D context. Drawing happens in CSS
//! pixels; the backing store is scaled by the device pixel ratio on resize.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::renderers::waveform::{WaveStyle, WaveSurface};

/// Backing-store size for a CSS box at the given device pixel ratio
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let scale = |css: f64| (css * dpr).floor().max(1.0) as u32;
    (scale(css_width), scale(css_height))
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Layout size in CSS pixels
    pub fn css_size(&self) -> (f64, f64) {
        (self.canvas.client_width() as f64, self.canvas.client_height() as f64)
    }

    /// Match the backing store to the layout size at `dpr`
    pub fn resize(&self, dpr: f64) -> Result<(), JsValue> {
        let (css_w, css_h) = self.css_size();
        let (w, h) = backing_size(css_w, css_h, dpr);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }
}

impl WaveSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], style: &WaveStyle) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&style.stroke_color);
        ctx.set_line_width(style.line_width);
        ctx.set_shadow_color(&style.glow_color);
        ctx.set_shadow_blur(style.glow_blur);

        ctx.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        ctx.set_shadow_blur(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_scales_and_floors() {
        assert_eq!(backing_size(300.0, 80.0, 2.0), (600, 160));
        assert_eq!(backing_size(101.0, 33.0, 1.5), (151, 49));
    }

    #[test]
    fn test_backing_size_never_zero() {
        assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
        assert_eq!(backing_size(100.0, 50.0, f64::NAN), (100, 50));
    }
}
