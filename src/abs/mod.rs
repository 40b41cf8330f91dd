//! This module contains the thin GPU layer: the window and context setup,
//! the explicit render context, shader compilation and mesh upload.

pub mod app;
pub mod context;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use context::*;
pub use mesh::*;
pub use shader::*;
