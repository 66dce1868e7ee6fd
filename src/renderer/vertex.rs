//! Vertex type for tessellated 2D output

use bytemuck::{Pod, Zeroable};

use super::Rgba;

/// 2D vertex with position and color, laid out for direct upload
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

    pub fn colored(x: f32, y: f32, color: Rgba) -> Self {
        Self::new(x, y, color.to_array())
    }

    /// Size in bytes of one vertex in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Reinterpret a vertex list as raw bytes for a GPU or JS buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_and_cast() {
        assert_eq!(Vertex::STRIDE, 24);
        let verts = [Vertex::colored(1.0, 2.0, Rgba::WHITE); 3];
        assert_eq!(as_bytes(&verts).len(), 72);
    }
}
