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

//! An OpenGL backend for [`coolcoobs`] that uses the [`glow`] crate.
//!
//! [`glow`]: https://crates.io/crates/glow

use coolcoobs::{GpuContext, ShaderStage, Vertex, GLSL_CORE_HEADER, GLSL_ES_HEADER};
use glow::HasContext;

use std::fmt;
use std::mem;

/// A wrapper around a `glow` context.
pub struct GlowContext<H: HasContext + ?Sized> {
    /// Whether the context is OpenGL ES (or WebGL).
    embedded: bool,

    /// The underlying context.
    context: H,
}

impl<H: HasContext + ?Sized> fmt::Debug for GlowContext<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowContext")
            .field("embedded", &self.embedded)
            .finish_non_exhaustive()
    }
}

impl<H: HasContext> GlowContext<H> {
    /// Create a new [`GlowContext`] from a [`glow`] context.
    ///
    /// # Safety
    ///
    /// The context must be current while calling new, and it must stay current on this thread
    /// for as long as this type is used through [`GpuContext`].
    pub unsafe fn new(context: H) -> Result<Self, GlError> {
        // Get the current version.
        let version = context.version();

        // Check that the version is supported.
        let has_supported_version = if version.is_embedded {
            version.major >= 3
        } else {
            version.major >= 4 || (version.major >= 3 && version.minor >= 3)
        };
        if !has_supported_version {
            return Err(GlError(
                "OpenGL version 3.3 (or 3.0 ES) or higher is required".into(),
            ));
        }

        tracing::debug!(
            major = version.major,
            minor = version.minor,
            embedded = version.is_embedded,
            "created glow context"
        );

        Ok(Self {
            embedded: version.is_embedded,
            context,
        })
    }
}

impl<H: HasContext + ?Sized> GlowContext<H> {
    /// Get a reference to the underlying [`glow`] context.
    pub fn context(&self) -> &H {
        &self.context
    }

    /// The `#version` directive the built-in shaders need on this context.
    pub fn glsl_header(&self) -> &'static str {
        if self.embedded {
            GLSL_ES_HEADER
        } else {
            GLSL_CORE_HEADER
        }
    }
}

/// A wrapper around a `glow` vertex buffer.
pub struct GlVertexBuffer<H: HasContext + ?Sized> {
    /// The underlying vertex buffer.
    vbo: H::Buffer,

    /// The vertex array object.
    vao: H::VertexArray,
}

impl<H: HasContext + ?Sized> fmt::Debug for GlVertexBuffer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlVertexBuffer")
            .field("vbo", &self.vbo)
            .field("vao", &self.vao)
            .finish()
    }
}

/// An error from the OpenGL driver.
#[derive(Debug)]
pub struct GlError(String);

impl From<String> for GlError {
    fn from(s: String) -> Self {
        GlError(s)
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gl error: {}", self.0)
    }
}

impl std::error::Error for GlError {}

impl<H: HasContext + ?Sized> GpuContext for GlowContext<H> {
    type Shader = H::Shader;
    type Program = H::Program;
    type UniformLocation = H::UniformLocation;
    type VertexBuffer = GlVertexBuffer<H>;
    type Error = GlError;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, Self::Error> {
        let shader_type = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };

        unsafe { self.context.create_shader(shader_type).gl_err() }
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        unsafe {
            self.context.shader_source(shader, source);
        }
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        unsafe {
            self.context.compile_shader(shader);
        }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.context.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.context.get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        unsafe {
            self.context.delete_shader(shader);
        }
    }

    fn create_program(&mut self) -> Result<Self::Program, Self::Error> {
        unsafe { self.context.create_program().gl_err() }
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe {
            self.context.attach_shader(program, shader);
        }
    }

    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe {
            self.context.detach_shader(program, shader);
        }
    }

    fn link_program(&mut self, program: Self::Program) {
        unsafe {
            self.context.link_program(program);
        }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.context.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.context.get_program_info_log(program) }
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        unsafe {
            self.context.use_program(program);
        }
    }

    fn delete_program(&mut self, program: Self::Program) {
        unsafe {
            self.context.delete_program(program);
        }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.context.get_uniform_location(program, name) }
    }

    fn set_uniform_i32(&mut self, location: &Self::UniformLocation, value: i32) {
        unsafe {
            self.context.uniform_1_i32(Some(location), value);
        }

        gl_error(&self.context);
    }

    fn set_uniform_f32(&mut self, location: &Self::UniformLocation, value: f32) {
        unsafe {
            self.context.uniform_1_f32(Some(location), value);
        }

        gl_error(&self.context);
    }

    fn set_uniform_mat4(&mut self, location: &Self::UniformLocation, value: &[f32; 16]) {
        unsafe {
            self.context
                .uniform_matrix_4_f32_slice(Some(location), false, value);
        }

        gl_error(&self.context);
    }

    fn create_vertex_buffer(&mut self) -> Result<Self::VertexBuffer, Self::Error> {
        let gl = &self.context;

        unsafe {
            let vbo = gl.create_buffer().gl_err()?;
            let vao = match gl.create_vertex_array() {
                Ok(vao) => vao,
                Err(err) => {
                    gl.delete_buffer(vbo);
                    return Err(GlError(err));
                }
            };

            // Bind the buffers.
            gl.bind_vertex_array(Some(vao));
            let _guard = CallOnDrop(|| {
                gl.bind_vertex_array(None);
                gl.bind_buffer(glow::ARRAY_BUFFER, None);
            });
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));

            // Set up vertex attributes.
            let vertex_attributes = [
                (
                    Vertex::POSITION_LOCATION,
                    3,
                    bytemuck::offset_of!(Vertex, pos),
                ),
                (
                    Vertex::COLOR_LOCATION,
                    3,
                    bytemuck::offset_of!(Vertex, color),
                ),
            ];

            let stride = mem::size_of::<Vertex>() as i32;
            for (location, size, offset) in vertex_attributes {
                gl.vertex_attrib_pointer_f32(
                    location,
                    size,
                    glow::FLOAT,
                    false,
                    stride,
                    offset as i32,
                );
                gl.enable_vertex_attrib_array(location);
            }

            gl_error(gl);

            Ok(GlVertexBuffer { vbo, vao })
        }
    }

    fn write_vertices(&mut self, buffer: &Self::VertexBuffer, vertices: &[Vertex]) {
        let gl = &self.context;

        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer.vbo));
            let _guard = CallOnDrop(|| {
                gl.bind_buffer(glow::ARRAY_BUFFER, None);
            });

            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::DYNAMIC_DRAW,
            );
        }

        gl_error(gl);
    }

    fn delete_vertex_buffer(&mut self, buffer: Self::VertexBuffer) {
        unsafe {
            self.context.delete_buffer(buffer.vbo);
            self.context.delete_vertex_array(buffer.vao);
        }
    }

    fn clear(&mut self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            self.context.clear_color(r, g, b, a);
            self.context.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn viewport(&mut self, width: u32, height: u32) {
        unsafe {
            self.context.viewport(0, 0, width as i32, height as i32);
        }
    }

    fn draw_triangles(&mut self, buffer: &Self::VertexBuffer, first: u32, count: u32) {
        let gl = &self.context;

        unsafe {
            gl.bind_vertex_array(Some(buffer.vao));
            let _unbind_vao = CallOnDrop(|| {
                gl.bind_vertex_array(None);
            });

            gl.draw_arrays(glow::TRIANGLES, first as i32, count as i32);
        }

        gl_error(gl);
    }
}

fn gl_error(h: &(impl HasContext + ?Sized)) {
    let err = unsafe { h.get_error() };

    if err != glow::NO_ERROR {
        let error_str = match err {
            glow::INVALID_ENUM => "GL_INVALID_ENUM",
            glow::INVALID_VALUE => "GL_INVALID_VALUE",
            glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
            glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
            _ => "Unknown GL error",
        };

        tracing::error!("GL error: {}", error_str)
    }
}

trait ResultExt<T, E> {
    fn gl_err(self) -> Result<T, GlError>;
}

impl<T, E: Into<GlError>> ResultExt<T, E> for Result<T, E> {
    fn gl_err(self) -> Result<T, GlError> {
        self.map_err(Into::into)
    }
}

struct CallOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for CallOnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}
