//! Vertex types for 2D rendering
//!
//! Positions are canvas pixels (origin top-left, y down) until the pipeline
//! maps them to clip space.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

    pub fn at(pos: Vec2, color: [f32; 4]) -> Self {
        Self::new(pos.x, pos.y, color)
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
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const KEYPOINT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const SKELETON: [f32; 4] = [1.0, 0.0, 0.0, 0.8];
}
