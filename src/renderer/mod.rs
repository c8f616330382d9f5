//! Rendering module
//!
//! Every frame the whole field is cleared, then each body is drawn as one
//! filled rectangle at `(center - size / 2, size)`. Two surfaces implement
//! that: a Canvas 2D context and a WebGPU quad batch.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2dSurface;
pub use pipeline::GpuSurface;

use glam::Vec2;

use crate::error::RenderError;
use crate::sim::{Body, World};

/// Axis-aligned rectangle in field pixels, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn of_body(body: &Body) -> Self {
        Self {
            origin: body.min(),
            size: body.size,
        }
    }
}

/// Something frames can be drawn onto
pub trait RenderSurface {
    /// Wipe the whole field
    fn clear(&mut self, field: Vec2);

    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]);

    /// Finish the frame
    fn present(&mut self) -> Result<(), RenderError>;

    /// Rebuild after `RenderError::SurfaceLost`
    fn recover(&mut self) {}
}

/// Draw the world: clear, then one rectangle per body in list order
pub fn draw_world(surface: &mut dyn RenderSurface, world: &World) -> Result<(), RenderError> {
    surface.clear(world.game_size());
    for body in &world.bodies {
        surface.fill_rect(Rect::of_body(body), vertex::colors::for_tag(body.tag()));
    }
    surface.present()
}
