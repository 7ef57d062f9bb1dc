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

//! Shader compilation, linking and uniform access.

use crate::error::ShaderError;
use crate::gpu_backend::{GpuContext, ShaderStage};

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// The longest compiler or linker diagnostic that will be reported, in characters.
pub const MAX_INFO_LOG: usize = 511;

/// Where the text of a shader stage comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// A plain-text file that is read in full.
    File(PathBuf),

    /// Literal GLSL.
    Inline(String),
}

impl ShaderSource {
    /// A source that is read from `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// A source made of literal GLSL text.
    pub fn inline(source: impl Into<String>) -> Self {
        Self::Inline(source.into())
    }

    /// Get the GLSL text, reading it from disk if necessary.
    pub fn load(&self, stage: ShaderStage) -> Result<Cow<'_, str>, ShaderError> {
        match self {
            Self::Inline(source) => Ok(Cow::Borrowed(source.as_str())),
            Self::File(path) => match fs::read_to_string(path) {
                Ok(source) => Ok(Cow::Owned(source)),
                Err(source) => {
                    tracing::error!(
                        "failed to read {stage} shader source {}: {source}",
                        path.display()
                    );
                    Err(ShaderError::FileOpen {
                        stage,
                        path: path.clone(),
                        source,
                    })
                }
            },
        }
    }
}

/// A linked vertex + fragment shader program.
///
/// The program handle is owned by this value. It is only ever constructed from a successful
/// link, and [`ShaderProgram::destroy`] consumes it.
pub struct ShaderProgram<C: GpuContext + ?Sized> {
    program: C::Program,
}

impl<C: GpuContext + ?Sized> fmt::Debug for ShaderProgram<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").finish_non_exhaustive()
    }
}

impl<C: GpuContext + ?Sized> ShaderProgram<C> {
    /// Compile both stages and link them into a program.
    ///
    /// Every failure is logged once and then returned. The intermediate stage objects are
    /// deleted whether or not linking succeeds.
    pub fn new(
        context: &mut C,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<Self, ShaderError> {
        let vertex_source = vertex.load(ShaderStage::Vertex)?;
        let fragment_source = fragment.load(ShaderStage::Fragment)?;

        Self::from_sources(context, &vertex_source, &fragment_source)
    }

    /// Compile and link a program from literal GLSL.
    pub fn from_sources(
        context: &mut C,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex_shader = compile_shader(context, ShaderStage::Vertex, vertex_source)?;
        let fragment_shader =
            match compile_shader(context, ShaderStage::Fragment, fragment_source) {
                Ok(shader) => shader,
                Err(err) => {
                    context.delete_shader(vertex_shader);
                    return Err(err);
                }
            };

        let result = link_program(context, vertex_shader, fragment_shader);

        context.delete_shader(vertex_shader);
        context.delete_shader(fragment_shader);

        result.map(|program| {
            tracing::debug!("linked shader program");
            Self { program }
        })
    }

    /// The underlying program handle.
    pub fn id(&self) -> C::Program {
        self.program
    }

    /// Bind this program for subsequent draw calls.
    pub fn use_program(&self, context: &mut C) {
        context.use_program(Some(self.program));
    }

    /// Release the program object.
    pub fn destroy(self, context: &mut C) {
        context.delete_program(self.program);
    }

    /// Set a boolean uniform. The program must be bound.
    pub fn set_bool(&self, context: &mut C, name: &str, value: bool) -> Result<(), ShaderError> {
        let location = self.uniform(context, name)?;
        context.set_uniform_i32(&location, value as i32);
        Ok(())
    }

    /// Set an integer uniform. The program must be bound.
    pub fn set_int(&self, context: &mut C, name: &str, value: i32) -> Result<(), ShaderError> {
        let location = self.uniform(context, name)?;
        context.set_uniform_i32(&location, value);
        Ok(())
    }

    /// Set a float uniform. The program must be bound.
    pub fn set_float(&self, context: &mut C, name: &str, value: f32) -> Result<(), ShaderError> {
        let location = self.uniform(context, name)?;
        context.set_uniform_f32(&location, value);
        Ok(())
    }

    /// Set a 4x4 matrix uniform. The program must be bound.
    pub fn set_mat4(
        &self,
        context: &mut C,
        name: &str,
        value: &glam::Mat4,
    ) -> Result<(), ShaderError> {
        let location = self.uniform(context, name)?;
        context.set_uniform_mat4(&location, &value.to_cols_array());
        Ok(())
    }

    // Locations are looked up on every call.
    fn uniform(&self, context: &C, name: &str) -> Result<C::UniformLocation, ShaderError> {
        context
            .uniform_location(self.program, name)
            .ok_or_else(|| {
                tracing::error!("uniform {name} not found");
                ShaderError::UniformNotFound(name.to_string())
            })
    }
}

fn compile_shader<C: GpuContext + ?Sized>(
    context: &mut C,
    stage: ShaderStage,
    source: &str,
) -> Result<C::Shader, ShaderError> {
    let shader = context
        .create_shader(stage)
        .map_err(|e| backend_error(format!("failed to create {stage} shader: {e}")))?;

    context.shader_source(shader, source);
    context.compile_shader(shader);

    if !context.shader_compile_status(shader) {
        let log = bound_info_log(&context.shader_info_log(shader));
        context.delete_shader(shader);

        tracing::error!("failed to compile {stage} shader\n{log}");
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

fn link_program<C: GpuContext + ?Sized>(
    context: &mut C,
    vertex_shader: C::Shader,
    fragment_shader: C::Shader,
) -> Result<C::Program, ShaderError> {
    let program = context
        .create_program()
        .map_err(|e| backend_error(format!("failed to create program: {e}")))?;

    context.attach_shader(program, vertex_shader);
    context.attach_shader(program, fragment_shader);
    context.link_program(program);
    context.detach_shader(program, vertex_shader);
    context.detach_shader(program, fragment_shader);

    if !context.program_link_status(program) {
        let log = bound_info_log(&context.program_info_log(program));
        context.delete_program(program);

        tracing::error!("failed to link shader program\n{log}");
        return Err(ShaderError::Link(log));
    }

    Ok(program)
}

fn backend_error(message: String) -> ShaderError {
    tracing::error!("{message}");
    ShaderError::Backend(message)
}

/// Strip trailing padding off of a driver log and cut it down to [`MAX_INFO_LOG`] characters.
pub(crate) fn bound_info_log(log: &str) -> String {
    log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
        .chars()
        .take(MAX_INFO_LOG)
        .collect()
}
