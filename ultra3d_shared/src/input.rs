//! Input model.
//!
//! The windowing layer is out of scope; it reduces raw device state to a set
//! of held logical [`Controls`] plus discrete [`InputEvent`]s once per frame.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Logical controls currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Controls: u16 {
        const MOVE_UP = 1 << 0;
        const MOVE_DOWN = 1 << 1;
        const MOVE_LEFT = 1 << 2;
        const MOVE_RIGHT = 1 << 3;
        const JUMP = 1 << 4;
        const YAW_LEFT = 1 << 5;
        const YAW_RIGHT = 1 << 6;
        const PITCH_UP = 1 << 7;
        const PITCH_DOWN = 1 << 8;
        const CONFIRM = 1 << 9;
        const CANCEL = 1 << 10;
    }
}

impl Controls {
    /// Stick intent `(dx, dz)`, each in `{-1, 0, 1}`.
    ///
    /// Right wins over left and down wins over up when both are held.
    pub fn move_intent(self) -> (i8, i8) {
        let mut dx = 0;
        let mut dz = 0;
        if self.contains(Self::MOVE_LEFT) {
            dx = -1;
        }
        if self.contains(Self::MOVE_RIGHT) {
            dx = 1;
        }
        if self.contains(Self::MOVE_UP) {
            dz = 1;
        }
        if self.contains(Self::MOVE_DOWN) {
            dz = -1;
        }
        (dx, dz)
    }

    /// Controls held now that were not held in `previous`.
    pub fn newly_pressed(self, previous: Controls) -> Controls {
        self.difference(previous)
    }
}

/// Physical keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Q,
    E,
    R,
    F,
    /// Number row or keypad digit, `0..=9`.
    Digit(u8),
}

impl Key {
    /// Default binding of this key to a logical control.
    pub fn control(self) -> Controls {
        match self {
            Key::Up => Controls::MOVE_UP,
            Key::Down => Controls::MOVE_DOWN,
            Key::Left => Controls::MOVE_LEFT,
            Key::Right => Controls::MOVE_RIGHT,
            Key::Space => Controls::JUMP,
            Key::Q => Controls::YAW_LEFT,
            Key::E => Controls::YAW_RIGHT,
            Key::R => Controls::PITCH_UP,
            Key::F => Controls::PITCH_DOWN,
            Key::Enter => Controls::CONFIRM,
            Key::Escape => Controls::CANCEL,
            Key::Digit(_) => Controls::empty(),
        }
    }
}

/// Discrete per-frame input events, used by menu navigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    Click { x: f32, y: f32 },
}

/// One frame's input snapshot.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub held: Controls,
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    /// A frame with held controls and no events.
    pub fn from_held(held: Controls) -> Self {
        Self {
            held,
            events: Vec::new(),
        }
    }

    /// Controls pressed this frame, one entry per key-down event.
    pub fn presses(&self) -> impl Iterator<Item = Controls> + '_ {
        self.events.iter().filter_map(|event| match event {
            InputEvent::KeyDown(key) => Some(key.control()).filter(|c| !c.is_empty()),
            InputEvent::Click { .. } => None,
        })
    }
}
