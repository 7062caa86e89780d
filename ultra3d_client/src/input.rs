//! Input handling.
//!
//! In a windowed build this would be fed by keyboard and mouse callbacks.
//! Here the console drives it: keys can be held (`+jump`), released
//! (`-jump`) or tapped for a single frame (`key space`). Each frame the
//! accumulated state is sampled into an [`InputFrame`].

use ultra3d_shared::input::{Controls, InputEvent, InputFrame, Key};

/// Parses a key name as typed in the console.
pub fn key_from_name(name: &str) -> Option<Key> {
    let key = match name.to_ascii_lowercase().as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "space" => Key::Space,
        "enter" | "return" => Key::Enter,
        "escape" | "esc" => Key::Escape,
        "q" => Key::Q,
        "e" => Key::E,
        "r" => Key::R,
        "f" => Key::F,
        other => {
            let digit = other.parse::<u8>().ok().filter(|d| *d <= 9)?;
            Key::Digit(digit)
        }
    };
    Some(key)
}

/// Parses a control name (`jump`, `yaw_left`, ...) or a bound key name.
pub fn control_from_name(name: &str) -> Option<Controls> {
    let control = match name.to_ascii_lowercase().as_str() {
        "forward" => Controls::MOVE_UP,
        "back" => Controls::MOVE_DOWN,
        "jump" => Controls::JUMP,
        "yaw_left" => Controls::YAW_LEFT,
        "yaw_right" => Controls::YAW_RIGHT,
        "pitch_up" => Controls::PITCH_UP,
        "pitch_down" => Controls::PITCH_DOWN,
        "confirm" => Controls::CONFIRM,
        "cancel" => Controls::CANCEL,
        other => key_from_name(other)?.control(),
    };
    (!control.is_empty()).then_some(control)
}

/// User input accumulated between frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: Controls,
    tapped: Controls,
    events: Vec<InputEvent>,
}

impl InputState {
    pub fn hold(&mut self, control: Controls) {
        self.held |= control;
    }

    pub fn release(&mut self, control: Controls) {
        self.held.remove(control);
    }

    pub fn release_all(&mut self) {
        self.held = Controls::empty();
    }

    /// A key press that lasts exactly one frame.
    pub fn tap(&mut self, key: Key) {
        self.tapped |= key.control();
        self.events.push(InputEvent::KeyDown(key));
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.events.push(InputEvent::Click { x, y });
    }

    pub fn held(&self) -> Controls {
        self.held
    }

    /// Samples this frame's input and clears one-frame state.
    pub fn take_frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            held: self.held | self.tapped,
            events: std::mem::take(&mut self.events),
        };
        self.tapped = Controls::empty();
        frame
    }
}
