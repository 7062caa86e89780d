//! `ultra3d_shared`
//!
//! Core of the pseudo-3D course demo, independent of any window or
//! rasterizer.
//!
//! Design goals:
//! - Deterministic, frame-stepped simulation (no delta time).
//! - Clear separation of concerns (math, camera, physics, scene, render).
//! - Output is plain data: an ordered list of screen-space draw commands.
//! - No `unsafe`.

pub mod camera;
pub mod config;
pub mod console;
pub mod courses;
pub mod input;
pub mod math;
pub mod palette;
pub mod physics;
pub mod render;
pub mod scene;
pub mod session;
