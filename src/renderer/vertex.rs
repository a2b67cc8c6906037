//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA color, each channel 0.0 - 1.0
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
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

/// Colors for game elements and widgets
pub mod colors {
    use super::{Color, rgb};

    pub const BACKGROUND: Color = rgb(255, 255, 255);
    pub const BLACK: Color = rgb(0, 0, 0);
    pub const WHITE: Color = rgb(255, 255, 255);
    pub const DARK_GREY: Color = rgb(64, 64, 64);
    pub const GREY: Color = rgb(128, 128, 128);
    pub const LIGHT_GREY: Color = rgb(212, 208, 200);

    pub const BLOCK_RED: Color = rgb(220, 40, 40);
    pub const BLOCK_YELLOW: Color = rgb(240, 220, 40);
    pub const BLOCK_GREEN: Color = rgb(40, 190, 70);
    pub const BLOCK_BLUE: Color = rgb(40, 90, 220);
    pub const BLOCK_PURPLE: Color = rgb(150, 50, 200);
    pub const BLOCK_GOLD: Color = rgb(255, 200, 0);
    pub const GOLD_SHINE: Color = rgb(255, 245, 170);
    /// Block outline
    pub const BLOCK_EDGE: Color = [0.0, 0.0, 0.0, 0.35];

    pub const PADDLE: Color = rgb(60, 60, 70);
    pub const BALL: Color = rgb(30, 30, 30);
    /// Line the ball must not cross
    pub const MISS_LINE: Color = rgb(255, 200, 200);

    pub const SCROLLBAR: Color = rgb(0, 0, 180);
    pub const FOCUS: Color = rgb(255, 0, 0);
}
