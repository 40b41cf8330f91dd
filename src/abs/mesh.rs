//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct, which owns a static vertex buffer
//! on the GPU together with the vertex array describing how its bytes map to
//! a vertex attribute.

use std::sync::Arc;

use glam::Vec3;

use super::context::RenderContext;

/// How a buffer's raw bytes feed one vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Attribute slot in the vertex shader.
    pub index: u32,
    /// Floats per vertex.
    pub components: i32,
    /// Bytes between consecutive vertices. Zero means tightly packed.
    pub stride: i32,
    /// Byte offset of the first vertex.
    pub offset: i32,
}

impl VertexLayout {
    /// Tightly packed `vec3` positions in attribute slot 0.
    pub const POSITIONS: Self = Self {
        index: 0,
        components: 3,
        stride: 0,
        offset: 0,
    };
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh<C: RenderContext> {
    ctx: Arc<C>,
    vao: C::VertexArray,
    vbo: C::Buffer,
    layout: VertexLayout,
    vertex_count: i32,
    byte_len: usize,
}

impl<C: RenderContext> Mesh<C> {
    /// Uploads `positions` into a new static buffer and describes it with `layout`.
    pub fn new(ctx: &Arc<C>, positions: &[Vec3], layout: VertexLayout) -> Result<Self, String> {
        let bytes: &[u8] = bytemuck::cast_slice(positions);
        let vertex_count = i32::try_from(positions.len())
            .map_err(|_| format!("{} vertices exceed a single draw call", positions.len()))?;

        let vbo = ctx.create_buffer()?;
        ctx.upload_static(vbo, bytes);

        let vao = match ctx.create_vertex_array() {
            Ok(vao) => vao,
            Err(e) => {
                ctx.delete_buffer(vbo);
                return Err(e);
            }
        };
        ctx.describe_attribute(vao, vbo, &layout);

        Ok(Self {
            ctx: Arc::clone(ctx),
            vao,
            vbo,
            layout,
            vertex_count,
            byte_len: bytes.len(),
        })
    }

    pub fn vertex_array(&self) -> C::VertexArray {
        self.vao
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Vertices submitted per draw.
    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Size of the uploaded vertex data in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl<C: RenderContext> Drop for Mesh<C> {
    fn drop(&mut self) {
        self.ctx.delete_vertex_array(self.vao);
        self.ctx.delete_buffer(self.vbo);
    }
}
