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

//! The per-frame draw sequence.

use crate::config::Config;
use crate::error::RendererError;
use crate::geometry::{GeometryBuffer, VERTEX_COUNT};
use crate::gpu_backend::GpuContext;
use crate::scene::Scene;
use crate::shader::ShaderProgram;

use std::fmt;

/// The name of the model matrix uniform in the shaders.
pub const MODEL_UNIFORM: &str = "uModel";

/// Owns the program, the uploaded shape and the scene.
pub struct Renderer<C: GpuContext + ?Sized> {
    /// The linked program.
    program: ShaderProgram<C>,

    /// The shape currently in `vbo`.
    geometry: GeometryBuffer,

    /// The vertex buffer holding `geometry`.
    vbo: C::VertexBuffer,

    /// The instances to draw.
    scene: Scene,

    /// The color every frame starts from.
    clear_color: [f32; 4],

    /// Cleared the first time the model uniform is missing and never set again.
    has_model_uniform: bool,
}

impl<C: GpuContext + ?Sized> fmt::Debug for Renderer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("geometry", &self.geometry)
            .field("scene", &self.scene)
            .finish_non_exhaustive()
    }
}

impl<C: GpuContext + ?Sized> Renderer<C> {
    /// Compile the configured shaders, upload a fresh shape and build the scene.
    pub fn new(context: &mut C, config: &Config) -> Result<Self, RendererError> {
        Self::with_rng(context, config, &mut rand::thread_rng())
    }

    /// Like [`Renderer::new`], drawing all randomness from `rng`.
    pub fn with_rng<R: rand::Rng + ?Sized>(
        context: &mut C,
        config: &Config,
        rng: &mut R,
    ) -> Result<Self, RendererError> {
        let program = ShaderProgram::new(context, &config.vertex_shader, &config.fragment_shader)?;

        let vbo = match context.create_vertex_buffer() {
            Ok(vbo) => vbo,
            Err(err) => {
                program.destroy(context);
                tracing::error!("failed to create vertex buffer: {err}");
                return Err(RendererError::Backend(err.to_string()));
            }
        };

        let geometry = GeometryBuffer::generate_with(rng);
        context.write_vertices(&vbo, geometry.vertices());

        let scene = Scene::from_settings(config.instances, config.animate, rng);
        tracing::debug!(
            half_extent = geometry.half_extent(),
            instances = scene.instances().len(),
            "renderer ready"
        );

        Ok(Self {
            program,
            geometry,
            vbo,
            scene,
            clear_color: config.clear_color,
            has_model_uniform: true,
        })
    }

    /// The shape being drawn.
    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    /// The instances being drawn.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The linked program.
    pub fn program(&self) -> &ShaderProgram<C> {
        &self.program
    }

    /// Replace the shape with a freshly sampled one and upload it.
    pub fn regenerate(&mut self, context: &mut C) {
        self.regenerate_with(context, &mut rand::thread_rng());
    }

    /// Like [`Renderer::regenerate`], sampling the new size from `rng`.
    pub fn regenerate_with<R: rand::Rng + ?Sized>(&mut self, context: &mut C, rng: &mut R) {
        self.geometry = GeometryBuffer::generate_with(rng);
        context.write_vertices(&self.vbo, self.geometry.vertices());
    }

    /// Draw one frame, `dt` seconds after the last one.
    ///
    /// A program without the model uniform still draws, just without per-instance transforms.
    /// The missing uniform is only reported on the first frame it is noticed.
    pub fn render(&mut self, context: &mut C, (width, height): (u32, u32), dt: f32) {
        self.scene.advance(dt);

        context.viewport(width, height);
        context.clear(self.clear_color);

        self.program.use_program(context);

        for instance in self.scene.instances() {
            if self.has_model_uniform {
                let model = instance.model_matrix();
                if self.program.set_mat4(context, MODEL_UNIFORM, &model).is_err() {
                    self.has_model_uniform = false;
                }
            }

            context.draw_triangles(&self.vbo, 0, VERTEX_COUNT as u32);
        }

        context.use_program(None);
    }

    /// Release every GPU object owned by the renderer.
    pub fn destroy(self, context: &mut C) {
        context.delete_vertex_buffer(self.vbo);
        self.program.destroy(context);
    }
}
