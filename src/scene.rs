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

//! Instances of the shape scattered over the screen.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

use std::f32::consts::TAU;

/// How far from the center an instance may be placed, in clip space.
pub const SPREAD: f32 = 0.8;

/// Angular speeds are sampled from this range, in radians per second.
pub const ANGULAR_SPEED: std::ops::RangeInclusive<f32> = 0.5..=2.0;

/// One copy of the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    /// Where the shape is centered.
    pub position: Vec3,

    /// The unit axis the shape spins around.
    pub axis: Vec3,

    /// The current rotation, in `[0, TAU)`.
    pub angle: f32,

    /// Radians per second.
    pub angular_speed: f32,
}

impl Instance {
    /// A still instance at the origin.
    pub fn still() -> Self {
        Self {
            position: Vec3::ZERO,
            axis: Vec3::Z,
            angle: 0.0,
            angular_speed: 0.0,
        }
    }

    /// An instance with a random position, axis, angle and speed.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let position = Vec3::new(
            rng.gen_range(-SPREAD..=SPREAD),
            rng.gen_range(-SPREAD..=SPREAD),
            0.0,
        );

        Self {
            position,
            axis: random_axis(rng),
            angle: rng.gen_range(0.0..TAU),
            angular_speed: rng.gen_range(ANGULAR_SPEED),
        }
    }

    /// Spin the instance forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.angular_speed * dt).rem_euclid(TAU);
    }

    /// The model matrix: rotate about the axis, then move into place.
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_axis_angle(self.axis, self.angle);
        Mat4::from_translation(self.position) * Mat4::from_quat(rotation)
    }
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );

        // Reject points outside the unit ball and too close to zero.
        let len = v.length_squared();
        if len > 1.0e-4 && len <= 1.0 {
            return v.normalize();
        }
    }
}

/// The set of instances drawn every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    instances: Vec<Instance>,
    animate: bool,
}

impl Scene {
    /// A scene with exactly one still instance in the middle of the screen.
    pub fn single() -> Self {
        Self {
            instances: vec![Instance::still()],
            animate: false,
        }
    }

    /// A scene of `count` randomly placed instances that spin over time.
    pub fn animated<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        Self {
            instances: (0..count).map(|_| Instance::random(rng)).collect(),
            animate: true,
        }
    }

    /// Build a scene from the instance count and animation flag of a [`Config`].
    ///
    /// The scene always holds exactly `count` instances; zero draws nothing.
    ///
    /// [`Config`]: crate::Config
    pub fn from_settings<R: Rng + ?Sized>(count: usize, animate: bool, rng: &mut R) -> Self {
        if animate {
            Self::animated(count, rng)
        } else if count == 1 {
            Self::single()
        } else {
            let instances = (0..count)
                .map(|_| Instance {
                    angular_speed: 0.0,
                    ..Instance::random(rng)
                })
                .collect();
            Self {
                instances,
                animate: false,
            }
        }
    }

    /// Move every instance forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.animate {
            return;
        }

        for instance in &mut self.instances {
            instance.advance(dt);
        }
    }

    /// The instances in draw order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Whether [`Scene::advance`] moves anything.
    pub fn is_animated(&self) -> bool {
        self.animate
    }
}
