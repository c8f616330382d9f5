//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::sim::BodyTag;

    pub const PLAYER: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const INVADER: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];

    pub fn for_tag(tag: BodyTag) -> [f32; 4] {
        match tag {
            BodyTag::Player => PLAYER,
            BodyTag::Invader => INVADER,
            BodyTag::Bullet => BULLET,
        }
    }

    /// CSS `rgba()` string for the Canvas 2D fill style
    pub fn css(color: [f32; 4]) -> String {
        let [r, g, b, a] = color.map(|c| c.clamp(0.0, 1.0));
        format!(
            "rgba({}, {}, {}, {})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_css_color() {
            assert_eq!(css([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1)");
            assert_eq!(css([2.0, -1.0, 0.0, 0.5]), "rgba(255, 0, 0, 0.5)");
        }
    }
}
