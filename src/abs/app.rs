//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2 window
//! and the OpenGL context created for it. [`App`] is the production
//! [`Platform`]: it reports the close signal, polls events and presents frames.

use std::sync::Arc;

use crate::error::AppError;
use crate::render::Platform;
use crate::settings::Settings;

use super::context::GlRenderContext;

/// Everything needed to open the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub msaa_samples: u8,
}

impl WindowSpec {
    /// A window of the given size with the rendering options from `settings`.
    pub fn new(title: &'static str, width: u32, height: u32, settings: &Settings) -> Self {
        Self {
            title,
            width,
            height,
            vsync: settings.vsync,
            msaa_samples: settings.msaa_samples,
        }
    }
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Fields drop in declaration order, so the GL context is released before the
/// window, and the window before SDL itself shuts down.
pub struct App {
    gl: Arc<GlRenderContext>,
    _gl_context: sdl2::video::GLContext,
    event_pump: sdl2::EventPump,
    window: sdl2::video::Window,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
    close_requested: bool,
}

impl App {
    /// Starts SDL2, opens the window, makes a 3.3 core context current on it
    /// and loads the GL function pointers.
    pub fn open(spec: &WindowSpec) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Init)?;
        let video_subsystem = sdl.video().map_err(AppError::Init)?;
        log::debug!("starting SDL2 {}", sdl2::version::version());

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        if spec.msaa_samples > 0 {
            gl_attr.set_multisample_buffers(1);
            gl_attr.set_multisample_samples(spec.msaa_samples);
        }

        let window = video_subsystem
            .window(spec.title, spec.width, spec.height)
            .opengl()
            .build()
            .map_err(|e| AppError::Window(e.to_string()))?;
        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::Context)?;

        if spec.vsync {
            if let Err(e) = video_subsystem.gl_set_swap_interval(sdl2::video::SwapInterval::VSync) {
                log::warn!("could not enable vsync: {e}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(AppError::Init)?;

        Ok(Self {
            gl: Arc::new(GlRenderContext::new(gl)),
            _gl_context: gl_context,
            event_pump,
            window,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
            close_requested: false,
        })
    }
}

impl Platform for App {
    type Context = GlRenderContext;

    fn context(&self) -> &Arc<GlRenderContext> {
        &self.gl
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn poll_events(&mut self) {
        for event in self.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. }
                | sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Close,
                    ..
                } => self.close_requested = true,
                _ => {}
            }
        }
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn set_title(&mut self, title: &str) {
        if let Err(e) = self.window.set_title(title) {
            log::warn!("could not set window title: {e}");
        }
    }
}
