//! Errors that stop the program before the render loop starts.

use crate::abs::ShaderError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not start SDL2: {0}")]
    Init(String),
    #[error("could not open window with SDL2: {0}")]
    Window(String),
    #[error("could not create OpenGL context: {0}")]
    Context(String),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("could not create GPU object: {0}")]
    Gpu(String),
}
