//! Explicit GPU state.
//!
//! OpenGL keeps the current program, vertex array and buffer as ambient global
//! state. The [`RenderContext`] trait hides that behind methods which take the
//! handles they operate on, so nothing outside this module binds anything.
//! [`GlRenderContext`] is the implementation backed by [`glow`].

use std::fmt::Debug;

use glow::HasContext;

use super::mesh::VertexLayout;
use super::shader::ShaderStage;

/// Renderer and driver strings reported by the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub renderer: String,
    pub version: String,
    pub shading_language: String,
}

/// The GPU operations used by this program.
///
/// Resource handles are plain `Copy` values. Ownership of the underlying
/// objects lives in the wrappers in [`super::mesh`] and [`super::shader`].
pub trait RenderContext {
    type Buffer: Copy + Debug;
    type VertexArray: Copy + Debug;
    type Shader: Copy + Debug;
    type Program: Copy + Debug;

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    /// Uploads `data` as a write-once, read-many vertex buffer.
    fn upload_static(&self, buffer: Self::Buffer, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    /// Records in `vertex_array` that attribute `layout.index` reads floats from `buffer`.
    fn describe_attribute(
        &self,
        vertex_array: Self::VertexArray,
        buffer: Self::Buffer,
        layout: &VertexLayout,
    );
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Compiles `source` into `shader` and returns the compile status.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Links `program` and returns the link status.
    fn link_program(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    /// Only draw a fragment when it is closer than what is already there.
    fn enable_depth_test(&self);
    /// Clears the color and depth buffers of the current frame.
    fn clear(&self);
    fn set_clear_color(&self, color: [f32; 4]);
    /// Draws `vertex_count` vertices from `vertex_array` as triangles with `program`.
    fn draw(&self, program: Self::Program, vertex_array: Self::VertexArray, vertex_count: i32);

    fn info(&self) -> ContextInfo;
    /// Implementation limits, as `(name, value)` pairs for the GL log.
    fn parameters(&self) -> Vec<(&'static str, String)>;
}

/// [`RenderContext`] over a loaded OpenGL context.
pub struct GlRenderContext {
    gl: glow::Context,
}

const INTEGER_PARAMETERS: [(u32, &str); 10] = [
    (
        glow::MAX_COMBINED_TEXTURE_IMAGE_UNITS,
        "GL_MAX_COMBINED_TEXTURE_IMAGE_UNITS",
    ),
    (glow::MAX_CUBE_MAP_TEXTURE_SIZE, "GL_MAX_CUBE_MAP_TEXTURE_SIZE"),
    (glow::MAX_DRAW_BUFFERS, "GL_MAX_DRAW_BUFFERS"),
    (
        glow::MAX_FRAGMENT_UNIFORM_COMPONENTS,
        "GL_MAX_FRAGMENT_UNIFORM_COMPONENTS",
    ),
    (glow::MAX_TEXTURE_IMAGE_UNITS, "GL_MAX_TEXTURE_IMAGE_UNITS"),
    (glow::MAX_TEXTURE_SIZE, "GL_MAX_TEXTURE_SIZE"),
    (glow::MAX_VARYING_COMPONENTS, "GL_MAX_VARYING_COMPONENTS"),
    (glow::MAX_VERTEX_ATTRIBS, "GL_MAX_VERTEX_ATTRIBS"),
    (
        glow::MAX_VERTEX_TEXTURE_IMAGE_UNITS,
        "GL_MAX_VERTEX_TEXTURE_IMAGE_UNITS",
    ),
    (
        glow::MAX_VERTEX_UNIFORM_COMPONENTS,
        "GL_MAX_VERTEX_UNIFORM_COMPONENTS",
    ),
];

impl GlRenderContext {
    /// Wraps a context whose function pointers are already loaded and which
    /// is current on this thread.
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }
}

impl RenderContext for GlRenderContext {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Shader = glow::Shader;
    type Program = glow::Program;

    fn create_buffer(&self) -> Result<glow::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn upload_static(&self, buffer: glow::Buffer, data: &[u8]) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn create_vertex_array(&self) -> Result<glow::VertexArray, String> {
        unsafe { self.gl.create_vertex_array() }
    }

    fn describe_attribute(
        &self,
        vertex_array: glow::VertexArray,
        buffer: glow::Buffer,
        layout: &VertexLayout,
    ) {
        unsafe {
            self.gl.bind_vertex_array(Some(vertex_array));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl.enable_vertex_attrib_array(layout.index);
            self.gl.vertex_attrib_pointer_f32(
                layout.index,
                layout.components,
                glow::FLOAT,
                false,
                layout.stride,
                layout.offset,
            );
            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn delete_vertex_array(&self, vertex_array: glow::VertexArray) {
        unsafe { self.gl.delete_vertex_array(vertex_array) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        unsafe { self.gl.create_shader(stage.gl_enum()) }
    }

    fn compile_shader(&self, shader: glow::Shader, source: &str) -> bool {
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            self.gl.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) -> bool {
        unsafe {
            self.gl.link_program(program);
            self.gl.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn enable_depth_test(&self) {
        unsafe {
            self.gl.enable(glow::DEPTH_TEST);
            self.gl.depth_func(glow::LESS);
        }
    }

    fn clear(&self) {
        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn set_clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn draw(&self, program: glow::Program, vertex_array: glow::VertexArray, vertex_count: i32) {
        unsafe {
            self.gl.use_program(Some(program));
            self.gl.bind_vertex_array(Some(vertex_array));
            self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count);
        }
    }

    fn info(&self) -> ContextInfo {
        unsafe {
            ContextInfo {
                renderer: self.gl.get_parameter_string(glow::RENDERER),
                version: self.gl.get_parameter_string(glow::VERSION),
                shading_language: self
                    .gl
                    .get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
            }
        }
    }

    fn parameters(&self) -> Vec<(&'static str, String)> {
        unsafe {
            let mut params: Vec<(&'static str, String)> = INTEGER_PARAMETERS
                .iter()
                .map(|&(param, name)| (name, self.gl.get_parameter_i32(param).to_string()))
                .collect();

            let mut dims = [0i32; 2];
            self.gl
                .get_parameter_i32_slice(glow::MAX_VIEWPORT_DIMS, &mut dims);
            params.push(("GL_MAX_VIEWPORT_DIMS", format!("{} {}", dims[0], dims[1])));

            // Booleans come back as 0 or 1 through the integer query.
            let stereo = self.gl.get_parameter_i32(glow::STEREO);
            params.push(("GL_STEREO", stereo.to_string()));
            params
        }
    }
}
