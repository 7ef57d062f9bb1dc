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

//! Many randomly placed diamonds spinning in a window.
//!
//! The shaders are read from `examples/shaders/` at startup, so they can be edited without
//! rebuilding. They are written for `#version 330 core`, so this demo needs a desktop OpenGL
//! 3.3 context; on the OpenGL ES fallback they fail to compile and the demo exits with the
//! compiler log.

#[path = "util/setup_context.rs"]
mod util;

use coolcoobs::{Config, ShaderSource};

const INSTANCES: usize = 24;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init();

    let shaders = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/shaders");
    let config = Config::default()
        .windowed()
        .with_title("coolcoobs swarm")
        .with_animation(INSTANCES)
        .with_shaders(
            ShaderSource::file(format!("{shaders}/swarm.vert")),
            ShaderSource::file(format!("{shaders}/swarm.frag")),
        );

    util::run(config)
}
