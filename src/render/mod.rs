//! The triangle scene and the render loop that presents it.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;

use crate::abs::{Mesh, RenderContext, ShaderProgram, VertexLayout};
use crate::error::AppError;
use crate::settings::Settings;
use crate::time::{FrameCounter, fps_title};

pub const WINDOW_TITLE: &str = "Hello Triangle";
pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;

pub const TRIANGLE: [Vec3; 3] = [
    Vec3::new(0.0, 0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
];

pub const VERTEX_SHADER: &str = include_str!("shaders/triangle/vert.glsl");
pub const FRAGMENT_SHADER: &str = include_str!("shaders/triangle/frag.glsl");

/// The window system side of a frame: close signal, events and presentation.
pub trait Platform {
    type Context: RenderContext;

    /// The render context that is current on this platform's window.
    fn context(&self) -> &Arc<Self::Context>;
    fn should_close(&self) -> bool;
    /// Processes pending window events without blocking.
    fn poll_events(&mut self);
    /// Presents the back buffer.
    fn swap_buffers(&mut self);
    fn set_title(&mut self, title: &str);
}

/// GPU resources for the one triangle that is drawn every frame.
pub struct Triangle<C: RenderContext> {
    pub mesh: Mesh<C>,
    pub program: ShaderProgram<C>,
}

impl<C: RenderContext> Triangle<C> {
    /// Uploads the vertex data, then compiles and links the shader pair.
    pub fn new(ctx: &Arc<C>) -> Result<Self, AppError> {
        let mesh = Mesh::new(ctx, &TRIANGLE, VertexLayout::POSITIONS).map_err(AppError::Gpu)?;
        let program = ShaderProgram::from_sources(ctx, VERTEX_SHADER, FRAGMENT_SHADER)?;
        Ok(Self { mesh, program })
    }

    pub fn draw(&self, ctx: &C) {
        ctx.draw(
            self.program.id(),
            self.mesh.vertex_array(),
            self.mesh.vertex_count(),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Draws and presents one frame per iteration until the platform asks to close.
pub struct RenderLoop {
    state: LoopState,
    clear_color: [f32; 4],
    fps_in_title: bool,
    frames: u64,
    counter: FrameCounter,
}

impl RenderLoop {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: LoopState::Running,
            clear_color: settings.clear_color,
            fps_in_title: settings.fps_in_title,
            frames: 0,
            counter: FrameCounter::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one iteration. The close signal is checked first, and once the
    /// loop has terminated no further work is issued.
    pub fn tick<P: Platform>(&mut self, platform: &mut P, scene: &Triangle<P::Context>) -> LoopState {
        if self.state == LoopState::Terminated {
            return self.state;
        }
        if platform.should_close() {
            self.state = LoopState::Terminated;
            return self.state;
        }

        let ctx = Arc::clone(platform.context());
        ctx.clear();
        ctx.set_clear_color(self.clear_color);
        scene.draw(&ctx);
        platform.poll_events();
        platform.swap_buffers();
        self.frames += 1;

        if let Some(fps) = self.counter.tick(Instant::now()) {
            if self.fps_in_title {
                platform.set_title(&fps_title(fps));
            } else {
                log::debug!("{fps:.2} fps");
            }
        }

        self.state
    }

    /// Iterates until terminated and returns the number of frames presented.
    pub fn run<P: Platform>(&mut self, platform: &mut P, scene: &Triangle<P::Context>) -> u64 {
        while self.tick(platform, scene) == LoopState::Running {}
        self.frames
    }
}
