//! Opens a window, uploads one triangle and draws it every frame until the
//! window is closed.
//!
//! Setup runs in a fixed order: window and context, function loading,
//! vertex buffer upload, shader compile and link. Then the [`render::RenderLoop`]
//! runs until the platform reports a close request.

pub mod abs;
pub mod error;
pub mod logging;
pub mod render;
pub mod settings;
pub mod time;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use abs::{RenderContext, WindowSpec};
use error::AppError;
use render::{Platform, RenderLoop, Triangle, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use settings::Settings;

/// Opens the platform with `open`, sets up the triangle and renders until
/// close. Returns the number of frames presented.
///
/// An error from `open` is returned before any GPU object exists. GPU objects
/// are released before the platform, and with it the context, is torn down.
pub fn run<P, F>(settings: &Settings, open: F) -> Result<u64, AppError>
where
    P: Platform,
    F: FnOnce(&WindowSpec) -> Result<P, AppError>,
{
    let spec = WindowSpec::new(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT, settings);
    let mut platform = open(&spec)?;
    let ctx = Arc::clone(platform.context());

    let info = ctx.info();
    log::info!("Renderer: {}", info.renderer);
    log::info!("OpenGL version supported: {}", info.version);
    log::debug!("GLSL version: {}", info.shading_language);
    log::debug!("GL Context Params:");
    for (name, value) in ctx.parameters() {
        log::debug!("{name} {value}");
    }
    log::debug!("-----------------------------");

    ctx.enable_depth_test();

    let scene = Triangle::new(&ctx)?;
    let frames = RenderLoop::new(settings).run(&mut platform, &scene);
    log::debug!("window closed after {frames} frames");

    drop(scene);
    drop(ctx);
    drop(platform);
    Ok(frames)
}

/// Process exit status for the result of [`run`].
pub fn exit_status(result: &Result<u64, AppError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
