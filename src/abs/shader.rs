//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for compiling and linking
//! shader stages. Every compile and link emits its info log at `info` level, whether or not it
//! succeeded, so driver warnings are always visible.

use std::fmt;
use std::sync::Arc;

use super::context::RenderContext;

/// A single programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("VERTEX"),
            ShaderStage::Fragment => f.write_str("FRAGMENT"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not create {stage} shader object: {reason}")]
    Create { stage: ShaderStage, reason: String },
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("could not create shader program object: {0}")]
    CreateProgram(String),
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },
}

/// Which object an info log came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Stage(ShaderStage),
    Program,
}

/// Info log text returned by the driver after a compile or link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderLog {
    pub source: LogSource,
    pub text: String,
}

impl ShaderLog {
    /// Writes the log to stdout through the shader log target.
    pub fn emit(&self) {
        log::info!(target: crate::logging::SHADER_LOG_TARGET, "{self}");
    }
}

impl fmt::Display for ShaderLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            LogSource::Stage(stage) => {
                writeln!(f, "{stage} SHADER LOG:")?;
                writeln!(f, "BUFFER LENGTH: {}", self.text.len())?;
                f.write_str(&self.text)?;
                if !self.text.is_empty() && !self.text.ends_with('\n') {
                    writeln!(f)?;
                }
                write!(f, "END {stage} SHADER LOG.")
            }
            LogSource::Program => {
                writeln!(f, "SHADER PROGRAM LOG:")?;
                f.write_str(&self.text)?;
                if !self.text.is_empty() && !self.text.ends_with('\n') {
                    writeln!(f)?;
                }
                write!(f, "END SHADER PROGRAM LOG.")
            }
        }
    }
}

/// Represents an individual compiled shader stage.
pub struct Shader<C: RenderContext> {
    ctx: Arc<C>,
    id: C::Shader,
    stage: ShaderStage,
    log: ShaderLog,
}

impl<C: RenderContext> Shader<C> {
    /// Compiles a new shader from the given source code.
    pub fn new(ctx: &Arc<C>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let id = ctx
            .create_shader(stage)
            .map_err(|reason| ShaderError::Create { stage, reason })?;

        let compiled = ctx.compile_shader(id, source);
        let log = ShaderLog {
            source: LogSource::Stage(stage),
            text: ctx.shader_info_log(id),
        };
        log.emit();

        if !compiled {
            ctx.delete_shader(id);
            return Err(ShaderError::Compile {
                stage,
                log: log.text,
            });
        }

        Ok(Self {
            ctx: Arc::clone(ctx),
            id,
            stage,
            log,
        })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn log(&self) -> &ShaderLog {
        &self.log
    }
}

impl<C: RenderContext> Drop for Shader<C> {
    fn drop(&mut self) {
        self.ctx.delete_shader(self.id);
    }
}

/// Represents a linked shader program.
pub struct ShaderProgram<C: RenderContext> {
    ctx: Arc<C>,
    id: C::Program,
    logs: Vec<ShaderLog>,
}

impl<C: RenderContext> ShaderProgram<C> {
    /// Links a new shader program from the given shaders.
    pub fn new(ctx: &Arc<C>, shaders: &[&Shader<C>]) -> Result<Self, ShaderError> {
        let program = ctx.create_program().map_err(ShaderError::CreateProgram)?;

        for shader in shaders {
            ctx.attach_shader(program, shader.id);
        }

        let linked = ctx.link_program(program);
        let log = ShaderLog {
            source: LogSource::Program,
            text: ctx.program_info_log(program),
        };
        log.emit();

        for shader in shaders {
            ctx.detach_shader(program, shader.id);
        }

        if !linked {
            ctx.delete_program(program);
            return Err(ShaderError::Link { log: log.text });
        }

        let mut logs: Vec<ShaderLog> = shaders.iter().map(|s| s.log.clone()).collect();
        logs.push(log);

        Ok(Self {
            ctx: Arc::clone(ctx),
            id: program,
            logs,
        })
    }

    /// Compiles a vertex and a fragment stage and links them.
    ///
    /// Both stages are compiled, and both logs emitted, before any compile
    /// error is returned; the vertex stage's error wins if both fail. The stage
    /// objects are released once the program is linked or a step fails.
    pub fn from_sources(ctx: &Arc<C>, vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        let vert = Shader::new(ctx, ShaderStage::Vertex, vertex);
        let frag = Shader::new(ctx, ShaderStage::Fragment, fragment);
        let (vert, frag) = (vert?, frag?);
        Self::new(ctx, &[&vert, &frag])
    }

    pub fn id(&self) -> C::Program {
        self.id
    }

    /// Stage logs in attachment order, followed by the link log.
    pub fn logs(&self) -> &[ShaderLog] {
        &self.logs
    }
}

impl<C: RenderContext> Drop for ShaderProgram<C> {
    fn drop(&mut self) {
        self.ctx.delete_program(self.id);
    }
}
