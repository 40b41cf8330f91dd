//! Test doubles: a [`RenderContext`] that records every call instead of
//! talking to a driver, and a [`Platform`] that reports close after a fixed
//! number of polls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::abs::{ContextInfo, RenderContext, ShaderStage, VertexLayout};
use crate::render::Platform;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    UploadStatic { buffer: u32, bytes: usize },
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    DescribeAttribute {
        vertex_array: u32,
        buffer: u32,
        layout: VertexLayout,
    },
    DeleteVertexArray(u32),
    CreateShader(u32, ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    EnableDepthTest,
    Clear,
    SetClearColor([f32; 4]),
    Draw {
        program: u32,
        vertex_array: u32,
        count: i32,
    },
    PollEvents,
    SwapBuffers,
    SetTitle(String),
    Terminate,
}

/// Records calls in order. Object handles are allocated from one counter
/// starting at 1.
#[derive(Default)]
pub struct RecordingContext {
    fail_buffer: bool,
    fail_vertex_array: bool,
    fail_link: bool,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicU32,
    shader_logs: Mutex<HashMap<u32, String>>,
    shader_stages: Mutex<HashMap<u32, ShaderStage>>,
    attached: Mutex<HashMap<u32, Vec<u32>>>,
    link_status: Mutex<HashMap<u32, bool>>,
}

impl RecordingContext {
    /// Every `create_buffer` fails.
    pub fn failing_buffer() -> Self {
        Self {
            fail_buffer: true,
            ..Default::default()
        }
    }

    /// Every `create_vertex_array` fails.
    pub fn failing_vertex_array() -> Self {
        Self {
            fail_vertex_array: true,
            ..Default::default()
        }
    }

    /// Every `link_program` reports failure.
    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn link_status(&self, program: u32) -> Option<bool> {
        self.link_status.lock().unwrap().get(&program).copied()
    }

    /// Objects created and not yet deleted.
    pub fn live_objects(&self) -> i64 {
        self.calls().iter().fold(0, |live, call| match call {
            Call::CreateBuffer(_)
            | Call::CreateVertexArray(_)
            | Call::CreateShader(..)
            | Call::CreateProgram(_) => live + 1,
            Call::DeleteBuffer(_)
            | Call::DeleteVertexArray(_)
            | Call::DeleteShader(_)
            | Call::DeleteProgram(_) => live - 1,
            _ => live,
        })
    }

    fn allocate(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl RenderContext for RecordingContext {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffer {
            return Err("out of memory".to_string());
        }
        let id = self.allocate();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn upload_static(&self, buffer: u32, data: &[u8]) {
        self.record(Call::UploadStatic {
            buffer,
            bytes: data.len(),
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        if self.fail_vertex_array {
            return Err("out of memory".to_string());
        }
        let id = self.allocate();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn describe_attribute(&self, vertex_array: u32, buffer: u32, layout: &VertexLayout) {
        self.record(Call::DescribeAttribute {
            vertex_array,
            buffer,
            layout: *layout,
        });
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.allocate();
        self.shader_stages.lock().unwrap().insert(id, stage);
        self.record(Call::CreateShader(id, stage));
        Ok(id)
    }

    /// Accepts any source with a `main` and balanced braces.
    fn compile_shader(&self, shader: u32, source: &str) -> bool {
        self.record(Call::CompileShader(shader));
        let balanced = source.matches('{').count() == source.matches('}').count();
        let ok = balanced && source.contains("void main");
        let log = if ok {
            String::new()
        } else {
            format!(
                "0:{}(1): error: syntax error, unexpected end of file\n",
                source.lines().count()
            )
        };
        self.shader_logs.lock().unwrap().insert(shader, log);
        ok
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shader_logs
            .lock()
            .unwrap()
            .get(&shader)
            .cloned()
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.allocate();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attached
            .lock()
            .unwrap()
            .entry(program)
            .or_default()
            .push(shader);
        self.record(Call::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader { program, shader });
    }

    /// Succeeds when one vertex and one fragment stage are attached.
    fn link_program(&self, program: u32) -> bool {
        self.record(Call::LinkProgram(program));
        let stages = self.shader_stages.lock().unwrap();
        let attached = self.attached.lock().unwrap();
        let has = |stage: ShaderStage| {
            attached
                .get(&program)
                .is_some_and(|shaders| shaders.iter().any(|s| stages.get(s) == Some(&stage)))
        };
        let ok = !self.fail_link && has(ShaderStage::Vertex) && has(ShaderStage::Fragment);
        self.link_status.lock().unwrap().insert(program, ok);
        ok
    }

    fn program_info_log(&self, program: u32) -> String {
        match self.link_status(program) {
            Some(false) => "error: linking failed\n".to_string(),
            _ => String::new(),
        }
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn enable_depth_test(&self) {
        self.record(Call::EnableDepthTest);
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn set_clear_color(&self, color: [f32; 4]) {
        self.record(Call::SetClearColor(color));
    }

    fn draw(&self, program: u32, vertex_array: u32, vertex_count: i32) {
        self.record(Call::Draw {
            program,
            vertex_array,
            count: vertex_count,
        });
    }

    fn info(&self) -> ContextInfo {
        ContextInfo {
            renderer: "recording".to_string(),
            version: "3.3 (recording)".to_string(),
            shading_language: "3.30".to_string(),
        }
    }

    fn parameters(&self) -> Vec<(&'static str, String)> {
        vec![("GL_MAX_VERTEX_ATTRIBS", "16".to_string())]
    }
}

/// Reports close once `close_after_polls` polls have happened, and records
/// its own calls into the context's log. Dropping it records [`Call::Terminate`].
pub struct ScriptedPlatform {
    ctx: Arc<RecordingContext>,
    close_after_polls: usize,
    polls: usize,
}

impl ScriptedPlatform {
    pub fn new(close_after_polls: usize) -> Self {
        Self::with_context(Arc::new(RecordingContext::default()), close_after_polls)
    }

    pub fn with_context(ctx: Arc<RecordingContext>, close_after_polls: usize) -> Self {
        Self {
            ctx,
            close_after_polls,
            polls: 0,
        }
    }
}

impl Platform for ScriptedPlatform {
    type Context = RecordingContext;

    fn context(&self) -> &Arc<RecordingContext> {
        &self.ctx
    }

    fn should_close(&self) -> bool {
        self.polls >= self.close_after_polls
    }

    fn poll_events(&mut self) {
        self.polls += 1;
        self.ctx.record(Call::PollEvents);
    }

    fn swap_buffers(&mut self) {
        self.ctx.record(Call::SwapBuffers);
    }

    fn set_title(&mut self, title: &str) {
        self.ctx.record(Call::SetTitle(title.to_string()));
    }
}

impl Drop for ScriptedPlatform {
    fn drop(&mut self) {
        self.ctx.record(Call::Terminate);
    }
}
