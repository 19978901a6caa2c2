//! The static quad drawn every frame: four corners and the two triangles
//! that cover them.

use glam::Vec3;
use glow::HasContext;

use crate::abs::Vertex;

pub const VERTEX_SHADER_SOURCE: &str = include_str!("shaders/quad/vert.glsl");
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("shaders/quad/frag.glsl");

/// Name of the colour uniform in the fragment shader.
pub const COLOR_UNIFORM: &str = "u_color";

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct PositionVertex {
    pub position: Vec3,
}

impl PositionVertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }
}

// SAFETY: three `f32`s under `repr(C)`, no padding.
unsafe impl Vertex for PositionVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<PositionVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        }
    }
}

pub const QUAD_VERTICES: [PositionVertex; 4] = [
    PositionVertex::new(0.5, 0.5, 0.0),
    PositionVertex::new(0.5, -0.5, 0.0),
    PositionVertex::new(-0.5, 0.5, 0.0),
    PositionVertex::new(-0.5, -0.5, 0.0),
];

pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2, //
    1, 2, 3,
];

/// Iterates over the triangles of the quad as vertex index triples.
pub fn triangles() -> impl Iterator<Item = [u32; 3]> {
    QUAD_INDICES.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
}
