//! `ultra3d_client`
//!
//! Application layer on top of `ultra3d_shared`:
//! - Screen flow (title, course select, playing)
//! - Key bindings and console-driven input
//! - Menu and HUD draw lists
//! - Console commands and tuning cvars

pub mod app;
pub mod input;
pub mod screens;

pub use app::{App, Screen};
