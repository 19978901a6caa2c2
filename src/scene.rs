use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;

use crate::abs::{Mesh, Shader, ShaderProgram};
use crate::config::RenderConfig;
use crate::quad;

/// Viewport rectangle `(x, y, width, height)` for a framebuffer of the given
/// size in pixels. Sizes beyond what GL accepts saturate at `i32::MAX`.
pub fn viewport_for(width: u32, height: u32) -> (i32, i32, i32, i32) {
    (
        0,
        0,
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    )
}

pub fn set_viewport(gl: &glow::Context, width: u32, height: u32) {
    let (x, y, w, h) = viewport_for(width, height);
    unsafe {
        gl.viewport(x, y, w, h);
    }
}

/// GPU resources for the quad and the state needed to draw it each frame.
pub struct QuadScene {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    program: ShaderProgram,
    clear_color: Vec4,
    quad_color: Vec4,
}

impl QuadScene {
    pub fn new(gl: &Arc<glow::Context>, config: &RenderConfig) -> Result<Self, String> {
        let mesh = Mesh::new(gl, &quad::QUAD_VERTICES, &quad::QUAD_INDICES, glow::TRIANGLES)?;
        log::debug!(
            "Uploaded quad: {} vertices, {} indices, triangles {:?}",
            quad::QUAD_VERTICES.len(),
            mesh.index_count(),
            quad::triangles().collect::<Vec<_>>()
        );

        // Both shaders are dropped at the end of this block, after linking.
        let program = {
            let vert = Shader::new(gl, glow::VERTEX_SHADER, quad::VERTEX_SHADER_SOURCE)?;
            let frag = Shader::new(gl, glow::FRAGMENT_SHADER, quad::FRAGMENT_SHADER_SOURCE)?;
            ShaderProgram::new(gl, &[&vert, &frag])?
        };

        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            program,
            clear_color: Vec4::from_array(config.clear_color),
            quad_color: Vec4::from_array(config.quad_color),
        })
    }

    pub fn render(&self) {
        unsafe {
            let c = self.clear_color;
            self.gl.clear_color(c.x, c.y, c.z, c.w);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_uniform(quad::COLOR_UNIFORM, &self.quad_color);
        self.mesh.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_covers_framebuffer() {
        assert_eq!(viewport_for(800, 600), (0, 0, 800, 600));
        assert_eq!(viewport_for(1, 1), (0, 0, 1, 1));
    }

    #[test]
    fn test_viewport_saturates_oversized_framebuffer() {
        assert_eq!(viewport_for(u32::MAX, 600), (0, 0, i32::MAX, 600));
        assert_eq!(viewport_for(1 << 31, 0), (0, 0, i32::MAX, 0));
        assert_eq!(viewport_for(i32::MAX as u32, 1), (0, 0, i32::MAX, 1));
    }
}
