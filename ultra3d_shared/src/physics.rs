//! Avatar movement.
//!
//! Momentum-based third-person control: the stick picks a heading relative
//! to the camera, the avatar turns toward it proportionally and ramps its
//! forward speed. Vertical motion is a jump impulse plus constant gravity
//! against a single ground height per course.
//!
//! Sign convention: a jump drives `y` down and gravity drives it up, so
//! `ground_y` is the largest `y` the avatar can have.

use serde::{Deserialize, Serialize};

pub use crate::config::PhysicsConfig;
use crate::input::Controls;
use crate::math::{angle_diff, wrap_angle, Vec3};

/// Forward speed below which friction snaps to a full stop.
pub const STOP_THRESHOLD: f32 = 0.1;

/// Forward speed above which a grounded avatar counts as running.
pub const RUN_THRESHOLD: f32 = 1.0;

/// Distance from `ground_y` that still counts as standing on the ground.
pub const GROUND_EPSILON: f32 = 1e-3;

/// Discrete animation state, derived from motion every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarState {
    Idle,
    Run,
    Jump,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub position: Vec3,
    /// Signed forward speed along `face_angle`.
    pub vel_fwd: f32,
    pub vel_y: f32,
    /// Heading in `(-π, π]`; 0 faces +z.
    pub face_angle: f32,
    pub ground_y: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

impl Avatar {
    pub fn new(spawn: Vec3, ground_y: f32) -> Self {
        Self {
            position: spawn,
            vel_fwd: 0.0,
            vel_y: 0.0,
            face_angle: 0.0,
            ground_y,
        }
    }

    /// Puts the avatar at `spawn` at rest. Facing is kept.
    pub fn reset(&mut self, spawn: Vec3, ground_y: f32) {
        self.position = spawn;
        self.ground_y = ground_y;
        self.vel_fwd = 0.0;
        self.vel_y = 0.0;
    }

    pub fn is_grounded(&self) -> bool {
        self.position.y >= self.ground_y - GROUND_EPSILON
    }

    pub fn state(&self) -> AvatarState {
        if !self.is_grounded() {
            AvatarState::Jump
        } else if self.vel_fwd > RUN_THRESHOLD {
            AvatarState::Run
        } else {
            AvatarState::Idle
        }
    }

    /// Advances one frame. `camera_yaw` must be the yaw the previous frame
    /// rendered with.
    pub fn update(&mut self, held: Controls, camera_yaw: f32, cfg: &PhysicsConfig) {
        let (dx, dz) = held.move_intent();
        let moving = dx != 0 || dz != 0;

        if moving {
            let target = camera_yaw + f32::atan2(dx as f32, dz as f32);
            self.face_angle = turn_toward(self.face_angle, target, cfg.turn_speed);
            if self.vel_fwd < cfg.max_speed {
                self.vel_fwd = (self.vel_fwd + cfg.accel).min(cfg.max_speed);
            }
        } else {
            self.vel_fwd *= cfg.friction;
            if self.vel_fwd.abs() < STOP_THRESHOLD {
                self.vel_fwd = 0.0;
            }
        }

        let (sin_face, cos_face) = self.face_angle.sin_cos();
        self.position.x += sin_face * self.vel_fwd;
        self.position.z += cos_face * self.vel_fwd;

        if held.contains(Controls::JUMP) && self.is_grounded() {
            self.vel_y = -cfg.jump_force;
        }

        self.vel_y += cfg.gravity;
        self.position.y += self.vel_y;

        if self.position.y > self.ground_y {
            self.position.y = self.ground_y;
            self.vel_y = 0.0;
        }
    }
}

/// Turns `current` a fraction `turn_speed` of the shortest way to `target`.
pub fn turn_toward(current: f32, target: f32, turn_speed: f32) -> f32 {
    wrap_angle(current + angle_diff(current, target) * turn_speed)
}
