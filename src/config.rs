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

//! Settings for the renderer and the window around it.

use crate::shader::ShaderSource;

/// The version directive for desktop OpenGL 3.3.
pub const GLSL_CORE_HEADER: &str = "#version 330 core";

/// The version directive for OpenGL ES 3.0 / WebGL 2.
pub const GLSL_ES_HEADER: &str = "#version 300 es\nprecision mediump float;";

const VERTEX_SHADER: &str = include_str!("./shaders/coob.v.glsl");
const FRAGMENT_SHADER: &str = include_str!("./shaders/coob.f.glsl");

/// The built-in vertex shader, prefixed with `header`.
pub fn builtin_vertex_shader(header: &str) -> ShaderSource {
    ShaderSource::Inline(format!("{header}\n{VERTEX_SHADER}"))
}

/// The built-in fragment shader, prefixed with `header`.
pub fn builtin_fragment_shader(header: &str) -> ShaderSource {
    ShaderSource::Inline(format!("{header}\n{FRAGMENT_SHADER}"))
}

/// Everything the demo can be told to do differently.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the vertex shader comes from.
    pub vertex_shader: ShaderSource,

    /// Where the fragment shader comes from.
    pub fragment_shader: ShaderSource,

    /// How many copies of the shape to draw.
    pub instances: usize,

    /// Whether instances are scattered and spun over time.
    pub animate: bool,

    /// The color the frame is cleared to.
    pub clear_color: [f32; 4],

    /// Whether the window covers the primary monitor without decorations.
    pub fullscreen: bool,

    /// The window title.
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vertex_shader: builtin_vertex_shader(GLSL_CORE_HEADER),
            fragment_shader: builtin_fragment_shader(GLSL_CORE_HEADER),
            instances: 1,
            animate: false,
            clear_color: [0.0, 0.027, 0.212, 0.1],
            fullscreen: true,
            title: "coolcoobs".into(),
        }
    }
}

impl Config {
    /// Use the built-in shaders with a different version header.
    pub fn with_builtin_shaders(mut self, header: &str) -> Self {
        self.vertex_shader = builtin_vertex_shader(header);
        self.fragment_shader = builtin_fragment_shader(header);
        self
    }

    /// Use custom shader sources.
    pub fn with_shaders(mut self, vertex: ShaderSource, fragment: ShaderSource) -> Self {
        self.vertex_shader = vertex;
        self.fragment_shader = fragment;
        self
    }

    /// Draw `count` spinning instances.
    pub fn with_animation(mut self, count: usize) -> Self {
        self.instances = count;
        self.animate = true;
        self
    }

    /// Set the clear color.
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Run in a regular decorated window instead of fullscreen.
    pub fn windowed(mut self) -> Self {
        self.fullscreen = false;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
