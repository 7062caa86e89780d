//! Configuration system.
//!
//! Loads game configuration from JSON strings (file IO left to app).
//! Every field has a default, so a config file only needs the values it
//! overrides.

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// Camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal field of view in degrees.
    pub fov_deg: f32,
    /// Orbit distance from the tracked target.
    pub distance: f32,
    pub pitch_min_deg: f32,
    pub pitch_max_deg: f32,
    /// Per-frame smoothing fraction for yaw, pitch and position.
    pub lag: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 52.0,
            distance: 550.0,
            pitch_min_deg: -28.0,
            pitch_max_deg: 62.0,
            lag: 0.08,
        }
    }
}

impl CameraConfig {
    pub fn pitch_min(&self) -> f32 {
        self.pitch_min_deg.to_radians()
    }

    pub fn pitch_max(&self) -> f32 {
        self.pitch_max_deg.to_radians()
    }
}

/// Avatar movement tuning. All rates are per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub max_speed: f32,
    pub accel: f32,
    pub friction: f32,
    pub turn_speed: f32,
    pub gravity: f32,
    pub jump_force: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_speed: 12.0,
            accel: 0.5,
            friction: 0.85,
            turn_speed: 0.15,
            gravity: 0.8,
            jump_force: 16.0,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Fixed frame rate of the game loop.
    pub fps: u32,
    pub camera: CameraConfig,
    pub physics: PhysicsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 60,
            camera: CameraConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates config from JSON.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse game config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the ranges the camera and physics rely on: the pitch clamp
    /// needs `min <= max`, lag and friction must shrink the error each frame.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.width > 0 && self.height > 0, "viewport must be non-empty");
        ensure!(self.fps > 0, "fps must be positive");

        let cam = &self.camera;
        ensure!(
            cam.fov_deg > 0.0 && cam.fov_deg < 180.0,
            "camera.fov_deg must be in (0, 180), got {}",
            cam.fov_deg
        );
        ensure!(
            cam.pitch_min_deg <= cam.pitch_max_deg,
            "camera pitch limits inverted: {} > {}",
            cam.pitch_min_deg,
            cam.pitch_max_deg
        );
        ensure!(
            cam.lag > 0.0 && cam.lag <= 1.0,
            "camera.lag must be in (0, 1], got {}",
            cam.lag
        );
        ensure!(cam.distance > 0.0, "camera.distance must be positive, got {}", cam.distance);

        let phys = &self.physics;
        ensure!(phys.max_speed >= 0.0, "physics.max_speed must not be negative");
        ensure!(phys.accel >= 0.0, "physics.accel must not be negative");
        ensure!(
            (0.0..1.0).contains(&phys.friction),
            "physics.friction must be in [0, 1), got {}",
            phys.friction
        );
        ensure!(
            phys.turn_speed > 0.0 && phys.turn_speed <= 1.0,
            "physics.turn_speed must be in (0, 1], got {}",
            phys.turn_speed
        );
        ensure!(phys.gravity >= 0.0, "physics.gravity must not be negative");
        ensure!(phys.jump_force >= 0.0, "physics.jump_force must not be negative");
        Ok(())
    }

    /// Perspective scale derived from the horizontal FOV and viewport width.
    pub fn fov_scale(&self) -> f32 {
        self.width as f32 / (2.0 * (self.camera.fov_deg.to_radians() / 2.0).tan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json_str(r#"{"fps": 30, "physics": {"gravity": 1.5}}"#).unwrap();
        assert_eq!(cfg.fps, 30);
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.physics.gravity, 1.5);
        assert_eq!(cfg.physics.max_speed, 12.0);
        assert_eq!(cfg.camera, CameraConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(GameConfig::from_json_str("{ fps: }").is_err());
    }

    #[test]
    fn inverted_pitch_limits_are_rejected() {
        let err = GameConfig::from_json_str(
            r#"{"camera": {"pitch_min_deg": 70, "pitch_max_deg": 10}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("pitch limits inverted"), "{err}");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for json in [
            r#"{"fps": 0}"#,
            r#"{"width": 0}"#,
            r#"{"camera": {"fov_deg": 180}}"#,
            r#"{"camera": {"lag": 0}}"#,
            r#"{"camera": {"lag": 2.5}}"#,
            r#"{"physics": {"friction": 1.0}}"#,
            r#"{"physics": {"turn_speed": 0}}"#,
        ] {
            assert!(GameConfig::from_json_str(json).is_err(), "{json} accepted");
        }
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn fov_scale_matches_half_angle() {
        let cfg = GameConfig::default();
        let expected = 800.0 / (2.0 * 26f32.to_radians().tan());
        assert!((cfg.fov_scale() - expected).abs() < 1e-3);
    }
}
