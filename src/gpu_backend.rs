// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `coolcoobs`.
//
// `coolcoobs` is free software: you can redistribute it and/or modify it under the
// terms of either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
//   version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `coolcoobs` is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR
// PURPOSE. See the GNU Lesser General Public License or the Mozilla Public License for more
// details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `coolcoobs`. If not, see <https://www.gnu.org/licenses/>.

//! The graphics API seam.

use std::error::Error;
use std::fmt;

/// A pipeline stage that a shader can be compiled for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex stage.
    Vertex,

    /// The fragment stage.
    Fragment,
}

impl ShaderStage {
    /// A human readable name for the stage.
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The backend for the renderer.
///
/// Every method is an immediate, blocking call into the graphics driver. Implementations are
/// expected to only be used on the thread that owns the current context.
pub trait GpuContext {
    /// A compiled (or failed) shader stage object.
    type Shader: Copy;

    /// A program object that stages are linked into.
    type Program: Copy;

    /// The location of a uniform inside of a linked program.
    type UniformLocation;

    /// The type associated with a GPU vertex buffer.
    ///
    /// Contains the vertices and the attribute layout for [`Vertex`].
    type VertexBuffer;

    /// The error type associated with this GPU context.
    type Error: Error + 'static;

    /// Create a new, empty shader object for the given stage.
    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, Self::Error>;

    /// Replace the source text of a shader.
    fn shader_source(&mut self, shader: Self::Shader, source: &str);

    /// Compile the source text currently held by a shader.
    fn compile_shader(&mut self, shader: Self::Shader);

    /// Whether the last compilation of this shader succeeded.
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;

    /// The compiler's diagnostic output for this shader.
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    /// Delete a shader object.
    fn delete_shader(&mut self, shader: Self::Shader);

    /// Create a new, empty program object.
    fn create_program(&mut self) -> Result<Self::Program, Self::Error>;

    /// Attach a shader to a program.
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);

    /// Detach a shader from a program.
    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader);

    /// Link the shaders attached to a program.
    fn link_program(&mut self, program: Self::Program);

    /// Whether the last link of this program succeeded.
    fn program_link_status(&self, program: Self::Program) -> bool;

    /// The linker's diagnostic output for this program.
    fn program_info_log(&self, program: Self::Program) -> String;

    /// Bind a program for subsequent draw calls, or unbind with `None`.
    fn use_program(&mut self, program: Option<Self::Program>);

    /// Delete a program object.
    fn delete_program(&mut self, program: Self::Program);

    /// Look up the location of an active uniform.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// Set an integer (or boolean) uniform on the bound program.
    fn set_uniform_i32(&mut self, location: &Self::UniformLocation, value: i32);

    /// Set a float uniform on the bound program.
    fn set_uniform_f32(&mut self, location: &Self::UniformLocation, value: f32);

    /// Set a column-major 4x4 matrix uniform on the bound program.
    fn set_uniform_mat4(&mut self, location: &Self::UniformLocation, value: &[f32; 16]);

    /// Create a new vertex buffer laid out for [`Vertex`].
    fn create_vertex_buffer(&mut self) -> Result<Self::VertexBuffer, Self::Error>;

    /// Replace the contents of a vertex buffer.
    fn write_vertices(&mut self, buffer: &Self::VertexBuffer, vertices: &[Vertex]);

    /// Delete a vertex buffer.
    fn delete_vertex_buffer(&mut self, buffer: Self::VertexBuffer);

    /// Clear the color buffer.
    fn clear(&mut self, color: [f32; 4]);

    /// Set the viewport to cover `(0, 0)` to `(width, height)`.
    fn viewport(&mut self, width: u32, height: u32);

    /// Draw `count` vertices from `buffer` as a triangle list, starting at `first`.
    fn draw_triangles(&mut self, buffer: &Self::VertexBuffer, first: u32, count: u32);
}

impl<C: GpuContext + ?Sized> GpuContext for &mut C {
    type Shader = C::Shader;
    type Program = C::Program;
    type UniformLocation = C::UniformLocation;
    type VertexBuffer = C::VertexBuffer;
    type Error = C::Error;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, Self::Error> {
        (**self).create_shader(stage)
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        (**self).shader_source(shader, source)
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        (**self).compile_shader(shader)
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        (**self).shader_compile_status(shader)
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        (**self).shader_info_log(shader)
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        (**self).delete_shader(shader)
    }

    fn create_program(&mut self) -> Result<Self::Program, Self::Error> {
        (**self).create_program()
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        (**self).attach_shader(program, shader)
    }

    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        (**self).detach_shader(program, shader)
    }

    fn link_program(&mut self, program: Self::Program) {
        (**self).link_program(program)
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        (**self).program_link_status(program)
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        (**self).program_info_log(program)
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        (**self).use_program(program)
    }

    fn delete_program(&mut self, program: Self::Program) {
        (**self).delete_program(program)
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        (**self).uniform_location(program, name)
    }

    fn set_uniform_i32(&mut self, location: &Self::UniformLocation, value: i32) {
        (**self).set_uniform_i32(location, value)
    }

    fn set_uniform_f32(&mut self, location: &Self::UniformLocation, value: f32) {
        (**self).set_uniform_f32(location, value)
    }

    fn set_uniform_mat4(&mut self, location: &Self::UniformLocation, value: &[f32; 16]) {
        (**self).set_uniform_mat4(location, value)
    }

    fn create_vertex_buffer(&mut self) -> Result<Self::VertexBuffer, Self::Error> {
        (**self).create_vertex_buffer()
    }

    fn write_vertices(&mut self, buffer: &Self::VertexBuffer, vertices: &[Vertex]) {
        (**self).write_vertices(buffer, vertices)
    }

    fn delete_vertex_buffer(&mut self, buffer: Self::VertexBuffer) {
        (**self).delete_vertex_buffer(buffer)
    }

    fn clear(&mut self, color: [f32; 4]) {
        (**self).clear(color)
    }

    fn viewport(&mut self, width: u32, height: u32) {
        (**self).viewport(width, height)
    }

    fn draw_triangles(&mut self, buffer: &Self::VertexBuffer, first: u32, count: u32) {
        (**self).draw_triangles(buffer, first, count)
    }
}

/// The vertex type used by the renderer.
///
/// Attribute 0 is the position and attribute 1 is the color, both three floats wide.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// The position of the vertex.
    pub pos: [f32; 3],

    /// The color of the vertex, in linear RGB.
    pub color: [f32; 3],
}

impl Vertex {
    /// Shader attribute location of [`Vertex::pos`].
    pub const POSITION_LOCATION: u32 = 0;

    /// Shader attribute location of [`Vertex::color`].
    pub const COLOR_LOCATION: u32 = 1;

    /// Create a new vertex.
    pub const fn new(pos: [f32; 3], color: [f32; 3]) -> Self {
        Self { pos, color }
    }
}
