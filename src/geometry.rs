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

//! The diamond shape drawn by the demo.

use crate::gpu_backend::Vertex;

use rand::Rng;

/// Color of the four outer corners.
pub const ROYAL_BLUE: [f32; 3] = [65.0 / 255.0, 105.0 / 255.0, 225.0 / 255.0];

/// Color of the shared center vertex.
pub const SKY_BLUE: [f32; 3] = [135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0];

/// The number of vertices in one shape.
pub const VERTEX_COUNT: usize = 12;

/// The number of triangles in one shape.
pub const TRIANGLE_COUNT: usize = VERTEX_COUNT / 3;

/// The range the side length is sampled from.
const SIDE_LENGTH: std::ops::Range<f32> = 0.5..1.5;

/// Four triangles fanned around the origin, interleaving position and color.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    half_extent: f32,
    vertices: [Vertex; VERTEX_COUNT],
}

impl GeometryBuffer {
    /// Generate a shape with a freshly sampled size.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate a shape, sampling its size from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let side_length = rng.gen_range(SIDE_LENGTH);
        Self::with_half_extent(side_length / 2.0)
    }

    /// Build the shape for a known half-extent.
    pub fn with_half_extent(h: f32) -> Self {
        let corner = |x: f32, y: f32| Vertex::new([x, y, 0.0], ROYAL_BLUE);
        let center = Vertex::new([0.0, 0.0, 0.0], SKY_BLUE);

        // Corners run clockwise from the top right; each triangle closes on the center.
        let corners = [
            corner(h, h),
            corner(h, -h),
            corner(-h, -h),
            corner(-h, h),
        ];

        let mut vertices = [Vertex::default(); VERTEX_COUNT];
        for (i, triangle) in vertices.chunks_exact_mut(3).enumerate() {
            triangle[0] = corners[i];
            triangle[1] = corners[(i + 1) % corners.len()];
            triangle[2] = center;
        }

        Self {
            half_extent: h,
            vertices,
        }
    }

    /// Half of the side length of the shape.
    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    /// The vertices, three per triangle.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The vertices as raw bytes, ready to upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Iterate over the triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
    }
}

impl Default for GeometryBuffer {
    fn default() -> Self {
        Self::generate()
    }
}
