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

//! The rendering core of a small OpenGL demo that draws spinning, blue-gradient diamonds.
//!
//! This crate holds everything that does not depend on a particular graphics binding or
//! window system. Implement the [`GpuContext`] trait on a type that represents an active
//! graphics context, then hand it to a [`Renderer`]. The `coolcoobs-glow` crate provides an
//! implementation on top of [`glow`].
//!
//! All of the types here are meant to live on the thread that owns the graphics context.
//!
//! [`glow`]: https://crates.io/crates/glow

#![forbid(unsafe_code, rust_2018_idioms)]

mod app;
mod config;
mod error;
mod geometry;
mod gpu_backend;
mod renderer;
mod scene;
mod shader;

pub use self::app::{AppState, Control, InputEvent};
pub use self::config::{
    builtin_fragment_shader, builtin_vertex_shader, Config, GLSL_CORE_HEADER, GLSL_ES_HEADER,
};
pub use self::error::{RendererError, ShaderError};
pub use self::geometry::{GeometryBuffer, ROYAL_BLUE, SKY_BLUE, TRIANGLE_COUNT, VERTEX_COUNT};
pub use self::gpu_backend::{GpuContext, ShaderStage, Vertex};
pub use self::renderer::{Renderer, MODEL_UNIFORM};
pub use self::scene::{Instance, Scene};
pub use self::shader::{ShaderProgram, ShaderSource, MAX_INFO_LOG};

pub use glam;
