//! Play session.
//!
//! Owns the camera, the avatar and the loaded scene. One [`GameSession::step`]
//! is one frame of simulation; [`GameSession::render`] turns the current
//! state into a draw list. Order within a step is fixed: camera presses,
//! avatar physics against last frame's yaw, then the camera follows.

use tracing::{debug, info};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::courses::{self, CourseDef};
use crate::input::{Controls, InputFrame};
use crate::palette::SKY_BLUE;
use crate::physics::{Avatar, AvatarState};
use crate::render::{render_world, DrawCommand};
use crate::scene::Scene;

pub struct GameSession {
    pub camera: Camera,
    pub avatar: Avatar,
    scene: Scene,
    course_index: usize,
    cfg: GameConfig,
    prev_held: Controls,
    last_state: AvatarState,
    tick: u64,
}

impl GameSession {
    /// Creates a session with the given course loaded.
    pub fn new(cfg: GameConfig, course_index: usize) -> anyhow::Result<Self> {
        cfg.validate()?;
        let mut session = Self {
            camera: Camera::new(&cfg),
            avatar: Avatar::default(),
            scene: Scene::default(),
            course_index: 0,
            cfg,
            prev_held: Controls::empty(),
            last_state: AvatarState::Idle,
            tick: 0,
        };
        session.load_course(course_index)?;
        Ok(session)
    }

    /// Replaces the scene and resets avatar and camera. Out-of-range
    /// indices clamp to the nearest course. Returns the loaded index.
    pub fn load_course(&mut self, index: usize) -> anyhow::Result<usize> {
        let index = courses::clamp_index(index);
        let def = courses::course(index);
        let scene = (def.build)()?;

        info!(course = %def.name, index, polygons = scene.len(), "Loading course");

        self.scene = scene;
        self.course_index = index;
        self.avatar.reset(def.spawn, def.ground_y);
        self.camera.reset(def.spawn);
        self.prev_held = Controls::empty();
        self.last_state = self.avatar.state();
        self.tick = 0;
        Ok(index)
    }

    /// Applies retuned config (e.g. from the console) without reloading.
    /// Invalid config is rejected and the current one kept.
    pub fn set_config(&mut self, cfg: GameConfig) -> anyhow::Result<()> {
        cfg.validate()?;
        self.camera.set_config(&cfg);
        self.cfg = cfg;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn course(&self) -> &'static CourseDef {
        courses::course(self.course_index)
    }

    pub fn course_index(&self) -> usize {
        self.course_index
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advances one frame with the controls held this frame and no key
    /// events.
    pub fn step(&mut self, held: Controls) {
        self.step_input(&InputFrame::from_held(held));
    }

    /// Advances one frame. Every key-down event steps the camera once;
    /// a camera control that went down without an event (held from the
    /// console) steps it once on its rising edge.
    pub fn step_input(&mut self, input: &InputFrame) {
        let held = input.held;
        let mut from_events = Controls::empty();
        for pressed in input.presses() {
            self.press_camera(pressed);
            from_events |= pressed;
        }
        self.press_camera(held.newly_pressed(self.prev_held).difference(from_events));
        self.prev_held = held;

        self.avatar.update(held, self.camera.yaw, &self.cfg.physics);
        self.camera.update(self.avatar.position);

        let state = self.avatar.state();
        if state != self.last_state {
            debug!(tick = self.tick, from = ?self.last_state, to = ?state, "Avatar state");
            self.last_state = state;
        }
        self.tick += 1;
    }

    fn press_camera(&mut self, pressed: Controls) {
        if pressed.contains(Controls::YAW_LEFT) {
            self.camera.step_yaw(-1.0);
        }
        if pressed.contains(Controls::YAW_RIGHT) {
            self.camera.step_yaw(1.0);
        }
        if pressed.contains(Controls::PITCH_UP) {
            self.camera.step_pitch(1.0);
        }
        if pressed.contains(Controls::PITCH_DOWN) {
            self.camera.step_pitch(-1.0);
        }
    }

    /// Draw list for the current frame: sky, sorted world, avatar.
    pub fn render(&self) -> Vec<DrawCommand> {
        render_world(&self.scene, &self.camera, &self.avatar, SKY_BLUE)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::input::{InputEvent, Key};

    #[test]
    fn loading_course_resets_avatar_and_camera() {
        let mut s = GameSession::new(GameConfig::default(), 0).unwrap();
        for _ in 0..30 {
            s.step(Controls::MOVE_UP | Controls::MOVE_RIGHT);
        }
        assert!(s.avatar.vel_fwd > 0.0);

        let idx = s.load_course(7).unwrap();
        assert_eq!(idx, 7);
        assert_eq!(s.avatar.position.y, 25.0);
        assert_eq!(s.avatar.ground_y, 15.0);
        assert_eq!(s.avatar.vel_fwd, 0.0);
        assert_eq!(s.camera.yaw, 0.0);
        assert_eq!(s.tick(), 0);
    }

    #[test]
    fn yaw_press_is_edge_triggered() {
        let mut s = GameSession::new(GameConfig::default(), 0).unwrap();
        for _ in 0..5 {
            s.step(Controls::YAW_RIGHT);
        }
        assert_eq!(s.camera.target_yaw, FRAC_PI_2);
        s.step(Controls::empty());
        s.step(Controls::YAW_LEFT);
        assert_eq!(s.camera.target_yaw, 0.0);
    }

    #[test]
    fn each_key_down_steps_the_camera() {
        let mut s = GameSession::new(GameConfig::default(), 0).unwrap();
        let double_tap = InputFrame {
            held: Controls::YAW_LEFT,
            events: vec![InputEvent::KeyDown(Key::Q), InputEvent::KeyDown(Key::Q)],
        };
        s.step_input(&double_tap);
        assert_eq!(s.camera.target_yaw, -PI);

        // Still held next frame with no new key-down: no further step.
        s.step(Controls::YAW_LEFT);
        assert_eq!(s.camera.target_yaw, -PI);
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut cfg = GameConfig::default();
        cfg.camera.pitch_min_deg = 70.0;
        cfg.camera.pitch_max_deg = 10.0;
        assert!(GameSession::new(cfg.clone(), 0).is_err());

        let mut s = GameSession::new(GameConfig::default(), 0).unwrap();
        assert!(s.set_config(cfg).is_err());
        assert_eq!(s.config(), &GameConfig::default());
    }

    #[test]
    fn physics_reads_previous_frame_yaw() {
        let mut s = GameSession::new(GameConfig::default(), 0).unwrap();
        s.camera.yaw = 0.0;
        s.camera.target_yaw = 1.0;
        s.step(Controls::MOVE_UP);
        // Heading moved toward the pre-step yaw of 0, not the smoothed one.
        assert_eq!(s.avatar.face_angle, 0.0);
        assert!(s.camera.yaw > 0.0);
    }

    #[test]
    fn render_starts_with_sky_and_ends_with_sprite() {
        let mut s = GameSession::new(GameConfig::default(), 0).unwrap();
        for _ in 0..120 {
            s.step(Controls::empty());
        }
        let frame = s.render();
        assert_eq!(frame[0], DrawCommand::Clear { color: SKY_BLUE });
        assert!(matches!(frame.last(), Some(DrawCommand::Circle { .. })));
    }
}
