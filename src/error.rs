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

//! Error types.

use crate::gpu_backend::ShaderStage;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building or driving a [`ShaderProgram`].
///
/// [`ShaderProgram`]: crate::ShaderProgram
#[derive(Debug, Error)]
pub enum ShaderError {
    /// A shader source file could not be read.
    #[error("failed to read {stage} shader source {}: {source}", path.display())]
    FileOpen {
        /// The stage the file was meant for.
        stage: ShaderStage,
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A shader stage was rejected by the compiler.
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile {
        /// The stage that failed.
        stage: ShaderStage,
        /// The compiler's diagnostic output, bounded to [`MAX_INFO_LOG`] characters.
        ///
        /// [`MAX_INFO_LOG`]: crate::MAX_INFO_LOG
        log: String,
    },

    /// The program was rejected at link time.
    #[error("failed to link shader program:\n{0}")]
    Link(String),

    /// The name has no active binding in the linked program.
    #[error("uniform {0} not found")]
    UniformNotFound(String),

    /// The backend could not create a GPU object.
    #[error("gpu backend error: {0}")]
    Backend(String),
}

/// Errors produced by the [`Renderer`].
///
/// [`Renderer`]: crate::Renderer
#[derive(Debug, Error)]
pub enum RendererError {
    /// The shader program could not be built.
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// The backend could not create a GPU object.
    #[error("gpu backend error: {0}")]
    Backend(String),
}
