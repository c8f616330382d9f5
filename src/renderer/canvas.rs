//! Canvas 2D render surface

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::vertex::colors;
use super::{Rect, RenderSurface};
use crate::error::{RenderError, StartupError};

/// Draws straight onto a `CanvasRenderingContext2D`
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, StartupError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| StartupError::ContextUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| StartupError::ContextUnavailable("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| StartupError::ContextUnavailable("not a 2d context".into()))?;

        log::info!("Canvas 2D surface ready");
        Ok(Self { ctx })
    }
}

impl RenderSurface for Canvas2dSurface {
    fn clear(&mut self, field: Vec2) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(field.x), f64::from(field.y));
    }

    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]) {
        self.ctx.set_fill_style_str(&colors::css(color));
        self.ctx.fill_rect(
            f64::from(rect.origin.x),
            f64::from(rect.origin.y),
            f64::from(rect.size.x),
            f64::from(rect.size.y),
        );
    }

    fn present(&mut self) -> Result<(), RenderError> {
        // Immediate mode: every call already hit the canvas
        Ok(())
    }
}
