//! Application state machine.
//!
//! The app owns:
//! - The play session (camera, avatar, loaded course)
//! - The current screen (title, course select, playing)
//! - Console with tuning cvars
//! - Accumulated input and the render backend

use std::time::Duration;

use anyhow::{bail, Context};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use ultra3d_shared::{
    config::GameConfig,
    console::{Console, CvarValue},
    courses,
    input::{InputEvent, InputFrame, Key},
    render::{DrawCommand, FrameRecorder, NullRenderer, RenderBackend},
    session::GameSession,
};

use crate::{
    input::{control_from_name, key_from_name, InputState},
    screens,
};

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    CourseSelect { selected: usize },
    Playing,
}

/// Tuning cvars and the config field each one drives.
const TUNING_CVARS: [(&str, &str); 8] = [
    ("cam_lag", "Camera smoothing factor per frame"),
    ("cam_dist", "Camera orbit distance"),
    ("mv_max_speed", "Top forward speed"),
    ("mv_accel", "Forward acceleration per frame"),
    ("mv_friction", "Speed multiplier when no input"),
    ("mv_turn_speed", "Heading turn rate per frame"),
    ("mv_gravity", "Downward acceleration per frame"),
    ("mv_jump_force", "Initial jump speed"),
];

fn tuning_value(cfg: &GameConfig, name: &str) -> Option<f32> {
    let value = match name {
        "cam_lag" => cfg.camera.lag,
        "cam_dist" => cfg.camera.distance,
        "mv_max_speed" => cfg.physics.max_speed,
        "mv_accel" => cfg.physics.accel,
        "mv_friction" => cfg.physics.friction,
        "mv_turn_speed" => cfg.physics.turn_speed,
        "mv_gravity" => cfg.physics.gravity,
        "mv_jump_force" => cfg.physics.jump_force,
        _ => return None,
    };
    Some(value)
}

fn tuning_slot<'a>(cfg: &'a mut GameConfig, name: &str) -> Option<&'a mut f32> {
    let slot = match name {
        "cam_lag" => &mut cfg.camera.lag,
        "cam_dist" => &mut cfg.camera.distance,
        "mv_max_speed" => &mut cfg.physics.max_speed,
        "mv_accel" => &mut cfg.physics.accel,
        "mv_friction" => &mut cfg.physics.friction,
        "mv_turn_speed" => &mut cfg.physics.turn_speed,
        "mv_gravity" => &mut cfg.physics.gravity,
        "mv_jump_force" => &mut cfg.physics.jump_force,
        _ => return None,
    };
    Some(slot)
}

pub struct App {
    pub session: GameSession,
    pub console: Console,
    pub input: InputState,
    screen: Screen,
    recorder: FrameRecorder,
    output: Box<dyn RenderBackend>,
    frame: u64,
    quit: bool,
}

impl App {
    /// Creates a windowless app on the title screen. `course_index` is
    /// preloaded so the session is never empty.
    pub fn new(cfg: GameConfig, course_index: usize) -> anyhow::Result<Self> {
        Self::with_backend(cfg, course_index, Box::new(NullRenderer))
    }

    /// Creates the app presenting every frame to `output` as well as to the
    /// internal recorder used by `dump`.
    pub fn with_backend(
        cfg: GameConfig,
        course_index: usize,
        output: Box<dyn RenderBackend>,
    ) -> anyhow::Result<Self> {
        let mut console = Console::new();
        for (name, description) in TUNING_CVARS {
            let value = tuning_value(&cfg, name).unwrap_or_default();
            console.register_cvar(name, CvarValue::Float(f64::from(value)), description);
        }

        let session = GameSession::new(cfg, course_index).context("create session")?;
        Ok(Self {
            session,
            console,
            input: InputState::default(),
            screen: Screen::Title,
            recorder: FrameRecorder::default(),
            output,
            frame: 0,
            quit: false,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        self.recorder.last_frame()
    }

    /// Milliseconds of wall time the frame counter represents.
    pub fn elapsed_ms(&self) -> u64 {
        self.frame * 1000 / u64::from(self.session.config().fps.max(1))
    }

    fn set_screen(&mut self, screen: Screen) {
        if screen != self.screen {
            info!(from = ?self.screen, to = ?screen, "Screen");
            self.screen = screen;
        }
    }

    /// Loads a course and switches to play.
    pub fn play(&mut self, course_index: usize) -> anyhow::Result<()> {
        self.session.load_course(course_index)?;
        self.set_screen(Screen::Playing);
        Ok(())
    }

    /// Runs one frame: input, simulation, draw list.
    pub fn step(&mut self) -> anyhow::Result<()> {
        let input = self.input.take_frame();
        self.handle_events(&input)?;

        if self.screen == Screen::Playing {
            self.session.step_input(&input);
        }

        let frame = self.draw_list();
        self.recorder.present(&frame);
        self.output.present(&frame);
        self.frame += 1;

        if self.frame % 120 == 0 {
            let pos = self.session.avatar.position;
            debug!(
                frame = self.frame,
                screen = ?self.screen,
                x = pos.x,
                y = pos.y,
                z = pos.z,
                "Status"
            );
        }
        Ok(())
    }

    fn handle_events(&mut self, input: &InputFrame) -> anyhow::Result<()> {
        for event in &input.events {
            match (self.screen, *event) {
                (Screen::Title, InputEvent::KeyDown(Key::Space | Key::Enter)) => {
                    self.set_screen(Screen::CourseSelect {
                        selected: self.session.course_index(),
                    });
                }
                (Screen::Title, InputEvent::KeyDown(Key::Escape)) => {
                    info!("Quit requested from title");
                    self.quit = true;
                }
                (Screen::CourseSelect { selected }, InputEvent::KeyDown(key)) => {
                    self.course_select_key(selected, key)?;
                }
                (Screen::CourseSelect { .. }, InputEvent::Click { x, y }) => {
                    if let Some(index) = screens::course_at(x, y, self.session.config().width) {
                        self.play(index)?;
                    }
                }
                (Screen::Playing, InputEvent::KeyDown(Key::Escape)) => {
                    self.set_screen(Screen::CourseSelect {
                        selected: self.session.course_index(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn course_select_key(&mut self, selected: usize, key: Key) -> anyhow::Result<()> {
        let last = courses::course_count() - 1;
        let selected = match key {
            Key::Escape => {
                self.set_screen(Screen::Title);
                return Ok(());
            }
            Key::Enter => return self.play(selected),
            Key::Up => selected.saturating_sub(1),
            Key::Down => (selected + 1).min(last),
            Key::Digit(0) => 9.min(last),
            Key::Digit(d) => (usize::from(d) - 1).min(last),
            _ => selected,
        };
        self.set_screen(Screen::CourseSelect { selected });
        Ok(())
    }

    fn draw_list(&self) -> Vec<DrawCommand> {
        let cfg = self.session.config();
        match self.screen {
            Screen::Title => screens::title_screen(cfg.width, cfg.height, self.elapsed_ms()),
            Screen::CourseSelect { selected } => {
                screens::course_select(cfg.width, cfg.height, selected)
            }
            Screen::Playing => {
                let mut frame = self.session.render();
                frame.extend(screens::hud(
                    self.session.course().name,
                    &self.session.avatar,
                    cfg.height,
                ));
                frame
            }
        }
    }

    /// Runs a number of frames paced at the configured frame rate.
    pub async fn run_for_frames(&mut self, frames: u64) -> anyhow::Result<()> {
        let dt = Duration::from_secs_f32(1.0 / self.session.config().fps.max(1) as f32);
        let mut next = Instant::now();

        for _ in 0..frames {
            next += dt;
            self.step()?;
            if self.quit {
                break;
            }
            tokio::time::sleep_until(next).await;
        }
        Ok(())
    }

    /// Copies tuning cvars into the session config. Values the config
    /// rejects are rolled back in the console.
    fn sync_cvars(&mut self) -> anyhow::Result<()> {
        let mut cfg = self.session.config().clone();
        for (name, _) in TUNING_CVARS {
            let Some(value) = self.console.cvar_f32(name) else {
                warn!(cvar = name, "Non-numeric tuning cvar ignored");
                continue;
            };
            if let Some(slot) = tuning_slot(&mut cfg, name) {
                *slot = value;
            }
        }
        if &cfg == self.session.config() {
            return Ok(());
        }

        debug!(?cfg, "Applying tuned config");
        if let Err(e) = self.session.set_config(cfg) {
            warn!(error = %e, "Tuning rejected");
            let current = self.session.config().clone();
            for (name, _) in TUNING_CVARS {
                if let Some(value) = tuning_value(&current, name) {
                    self.console.set_cvar(name, CvarValue::Float(f64::from(value)))?;
                }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Executes a console command.
    pub fn exec_console(&mut self, line: &str) -> anyhow::Result<Vec<String>> {
        let line = line.trim();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&head) = tokens.first() else {
            return Ok(Vec::new());
        };

        if let Some(name) = head.strip_prefix('+') {
            let control =
                control_from_name(name).with_context(|| format!("unknown control: {name}"))?;
            self.input.hold(control);
            return Ok(Vec::new());
        }
        if let Some(name) = head.strip_prefix('-') {
            let control =
                control_from_name(name).with_context(|| format!("unknown control: {name}"))?;
            self.input.release(control);
            return Ok(Vec::new());
        }

        match head {
            "key" => {
                let Some(name) = tokens.get(1) else {
                    bail!("usage: key <name>");
                };
                let key = key_from_name(name).with_context(|| format!("unknown key: {name}"))?;
                self.input.tap(key);
                Ok(Vec::new())
            }
            "release" => {
                self.input.release_all();
                Ok(Vec::new())
            }
            "click" => {
                let [_, x, y] = tokens.as_slice() else {
                    bail!("usage: click <x> <y>");
                };
                let x: f32 = x.parse().context("click x")?;
                let y: f32 = y.parse().context("click y")?;
                self.input.click(x, y);
                Ok(Vec::new())
            }
            "course" => {
                let Some(n) = tokens.get(1) else {
                    let out = courses::COURSES
                        .iter()
                        .enumerate()
                        .map(|(i, c)| format!("  {}. {}", i + 1, c.name))
                        .collect();
                    return Ok(out);
                };
                let n: usize = n.parse().context("course number")?;
                self.play(n.saturating_sub(1))?;
                Ok(vec![format!("Playing {}", self.session.course().name)])
            }
            "status" => {
                let s = &self.session;
                let pos = s.avatar.position;
                Ok(vec![
                    format!("Screen: {:?}", self.screen),
                    format!("Frame: {}", self.frame),
                    format!("Course: {} ({})", s.course().name, s.course_index() + 1),
                    format!("Tick: {}", s.tick()),
                    format!(
                        "Avatar: ({:.1}, {:.1}, {:.1}) {:?}",
                        pos.x,
                        pos.y,
                        pos.z,
                        s.avatar.state()
                    ),
                    format!(
                        "Camera: yaw {:.1} pitch {:.1}",
                        s.camera.yaw.to_degrees(),
                        s.camera.pitch.to_degrees()
                    ),
                    format!("Held: {:?}", self.input.held()),
                ])
            }
            "dump" => {
                let json = self.recorder.last_frame_json().context("serialize frame")?;
                Ok(vec![json])
            }
            "quit" | "exit" => {
                self.quit = true;
                Ok(vec!["Bye".to_string()])
            }
            _ => {
                let mut out = self.console.exec(line)?;
                if let Err(e) = self.sync_cvars() {
                    out.push(format!("Rejected: {e:#}"));
                }
                Ok(out)
            }
        }
    }
}
