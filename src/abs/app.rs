//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! window and the OpenGL context rendered into it.

use std::sync::Arc;

use glow::HasContext;
use sdl2::video::{GLProfile, SwapInterval};

use crate::config::WindowConfig;

/// Entry points that must resolve before a [`glow::Context`] is built.
/// glow itself calls `glGetString` and `glGetIntegerv` while constructing the
/// context and panics if they are missing.
const REQUIRED_GL_SYMBOLS: [&str; 7] = [
    "glGetString",
    "glGetIntegerv",
    "glCreateShader",
    "glCreateProgram",
    "glGenBuffers",
    "glGenVertexArrays",
    "glDrawElements",
];

/// Returns the required GL entry points the loader could not resolve.
fn missing_gl_symbols<T>(lookup: impl Fn(&str) -> *const T) -> Vec<&'static str> {
    REQUIRED_GL_SYMBOLS
        .into_iter()
        .filter(|name| lookup(*name).is_null())
        .collect()
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Fields drop in declaration order, so the GL function table and context go
/// away before the window and the SDL subsystems that own them.
pub struct App {
    pub gl: Arc<glow::Context>,
    // Held only so the context outlives `gl` and dies before the window.
    _gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub event_pump: sdl2::EventPump,
    // Keep SDL initialised until everything above has been dropped.
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
}

impl App {
    /// Initialises SDL2, opens a resizable window with a 3.3 core profile
    /// context and loads the OpenGL function pointers.
    pub fn new(config: &WindowConfig) -> Result<Self, String> {
        let sdl = sdl2::init().map_err(|e| format!("Failed to initialise SDL2: {e}"))?;
        let video_subsystem = sdl
            .video()
            .map_err(|e| format!("Failed to initialise video subsystem: {e}"))?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| format!("Failed to create window: {e}"))?;

        let gl_context = window
            .gl_create_context()
            .map_err(|e| format!("Failed to create OpenGL context: {e}"))?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| format!("Failed to make OpenGL context current: {e}"))?;

        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval (vsync: {}): {e}", config.vsync);
        }

        let missing = missing_gl_symbols(|s| video_subsystem.gl_get_proc_address(s));
        if !missing.is_empty() {
            return Err(format!(
                "Failed to load OpenGL functions: missing {}",
                missing.join(", ")
            ));
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        unsafe {
            log::info!(
                "OpenGL {} ({} / {})",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::VENDOR),
                gl.get_parameter_string(glow::RENDERER)
            );
        }

        let event_pump = sdl
            .event_pump()
            .map_err(|e| format!("Failed to obtain event pump: {e}"))?;

        Ok(Self {
            gl: Arc::new(gl),
            _gl_context: gl_context,
            window,
            event_pump,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
        })
    }

    /// Size of the drawable area in pixels, which may differ from the window
    /// size on high-DPI displays.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    /// Presents the back buffer.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RESOLVED: u8 = 0;

    #[test]
    fn test_unresolved_loader_reports_every_symbol() {
        let missing = missing_gl_symbols(|_| std::ptr::null::<()>());
        assert_eq!(missing, REQUIRED_GL_SYMBOLS.to_vec());
        assert_eq!(missing[0], "glGetString");
    }

    #[test]
    fn test_resolved_loader_reports_nothing() {
        let missing = missing_gl_symbols(|_| &RESOLVED as *const u8);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_partially_resolved_loader() {
        let missing = missing_gl_symbols(|name| {
            if name == "glGenVertexArrays" {
                std::ptr::null()
            } else {
                &RESOLVED as *const u8
            }
        });
        assert_eq!(missing, vec!["glGenVertexArrays"]);
    }
}
