//! Orbit ("Lakitu") follow camera and perspective projection.
//!
//! The camera orbits its target on a sphere of radius `distance`. Yaw, pitch
//! and position all chase their targets with the same per-frame lag, so
//! the view trails the avatar instead of snapping to it. The filter is
//! frame-rate dependent on purpose: one update is one frame.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::config::{CameraConfig, GameConfig};
use crate::math::{approach, Vec3};

/// Points at or closer than this rotated depth are culled.
pub const NEAR_PLANE: f32 = 1.0;

/// Yaw change per yaw-left/yaw-right press.
pub const YAW_STEP: f32 = FRAC_PI_2;

/// Pitch change per pitch-up/pitch-down press, in degrees.
pub const PITCH_STEP_DEG: f32 = 12.0;

/// Pitch the camera starts at and returns to on reset, in degrees.
pub const RESET_PITCH_DEG: f32 = 15.0;

/// Offset from the spawn point where the camera is placed on reset.
pub const RESET_OFFSET: Vec3 = Vec3::new(0.0, 200.0, 300.0);

/// A world point mapped to screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub x: f32,
    pub y: f32,
    /// Perspective factor; multiply world sizes by it to get pixel sizes.
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,

    cfg: CameraConfig,
    half_width: f32,
    half_height: f32,
    fov_scale: f32,
}

impl Camera {
    pub fn new(cfg: &GameConfig) -> Self {
        let pitch = RESET_PITCH_DEG.to_radians();
        Self {
            position: Vec3::new(0.0, 200.0, 0.0),
            yaw: 0.0,
            pitch,
            target_yaw: 0.0,
            target_pitch: pitch,
            cfg: cfg.camera,
            half_width: cfg.width as f32 / 2.0,
            half_height: cfg.height as f32 / 2.0,
            fov_scale: cfg.fov_scale(),
        }
    }

    /// Applies new tuning without touching the orbit state.
    pub fn set_config(&mut self, cfg: &GameConfig) {
        self.cfg = cfg.camera;
        self.half_width = cfg.width as f32 / 2.0;
        self.half_height = cfg.height as f32 / 2.0;
        self.fov_scale = cfg.fov_scale();
        self.target_pitch = self.clamp_pitch(self.target_pitch);
    }

    pub fn fov_scale(&self) -> f32 {
        self.fov_scale
    }

    /// Snaps the camera behind `focus` with the default angles.
    pub fn reset(&mut self, focus: Vec3) {
        let pitch = self.clamp_pitch(RESET_PITCH_DEG.to_radians());
        self.position = focus + RESET_OFFSET;
        self.yaw = 0.0;
        self.target_yaw = 0.0;
        self.pitch = pitch;
        self.target_pitch = pitch;
    }

    /// Turns the orbit target by one step; `direction` is `-1.0` or `1.0`.
    pub fn step_yaw(&mut self, direction: f32) {
        self.target_yaw += direction * YAW_STEP;
    }

    /// Tilts the orbit target by one step; `direction` is `-1.0` or `1.0`.
    pub fn step_pitch(&mut self, direction: f32) {
        let next = self.target_pitch + direction * PITCH_STEP_DEG.to_radians();
        self.target_pitch = self.clamp_pitch(next);
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.cfg.pitch_min(), self.cfg.pitch_max())
    }

    /// Unit vector from the camera toward the orbit target.
    pub fn orbit_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Where the camera would sit with no lag for the current angles.
    pub fn desired_position(&self, target: Vec3) -> Vec3 {
        let dir = self.orbit_direction();
        let dist = self.cfg.distance;
        Vec3::new(
            target.x - dir.x * dist,
            target.y + dir.y * dist,
            target.z - dir.z * dist,
        )
    }

    /// Advances the orbit one frame toward `target`.
    pub fn update(&mut self, target: Vec3) {
        let lag = self.cfg.lag;
        self.target_pitch = self.clamp_pitch(self.target_pitch);
        self.yaw = approach(self.yaw, self.target_yaw, lag);
        self.pitch = approach(self.pitch, self.target_pitch, lag);

        let desired = self.desired_position(target);
        self.position = Vec3::new(
            approach(self.position.x, desired.x, lag),
            approach(self.position.y, desired.y, lag),
            approach(self.position.z, desired.z, lag),
        );
    }

    /// Maps a world point to screen space, or `None` when it is behind the
    /// near plane.
    ///
    /// The yaw rotation is the inverse of [`Camera::orbit_direction`], so the
    /// orbit target always lands on screen center; flipping the sign of the
    /// `sin` terms puts it behind the camera after a quarter turn.
    pub fn project(&self, point: Vec3) -> Option<Projection> {
        let rel = point - self.position;

        // Undo yaw about the vertical axis.
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let x = rel.x * cos_yaw - rel.z * sin_yaw;
        let z = rel.x * sin_yaw + rel.z * cos_yaw;

        // Then undo pitch about the camera's horizontal axis.
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let y = rel.y * cos_pitch + z * sin_pitch;
        let depth = z * cos_pitch - rel.y * sin_pitch;

        if depth <= NEAR_PLANE {
            return None;
        }
        let scale = self.fov_scale / depth;
        Some(Projection {
            x: self.half_width + x * scale,
            y: self.half_height + y * scale,
            scale,
        })
    }
}
