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

/// Convert an sRGB hex color (0xRRGGBB) to a linear RGBA color.
/// The surface is sRGB, so vertex colors are blended in linear space.
pub fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| {
        let c = ((rgb >> shift) & 0xFF) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0), alpha]
}

/// Colors for range elements (sRGB hex)
pub mod colors {
    pub const SKY_TOP: u32 = 0x87CEEB;
    pub const SKY_BOTTOM: u32 = 0xE0F6FF;
    pub const DIRT: u32 = 0x8B4513;
    pub const GRASS: u32 = 0x228B22;
    /// Ring fills, outer to inner: white, black, blue, red, gold
    pub const RINGS: [u32; 5] = [0xFFFFFF, 0x000000, 0x0066FF, 0xFF0000, 0xFFD700];
    pub const RING_OUTLINE: u32 = 0x000000;
    pub const STAND: u32 = 0x654321;
    pub const BOW_WOOD: u32 = 0x8B4513;
    pub const BOW_STRING: u32 = 0x333333;
    pub const SHAFT: u32 = 0x8B4513;
    pub const ARROW_HEAD: u32 = 0x666666;
    pub const FLETCHING: u32 = 0xFF0000;
    pub const AIM_GUIDE: u32 = 0xFFFFFF;
    pub const AIM_GUIDE_ALPHA: f32 = 0.5;
}
