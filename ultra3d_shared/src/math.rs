//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! Everything is `f32`; angles are radians.

use std::f32::consts::{PI, TAU};
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// 3D vector. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn dist_sq(self, other: Self) -> f32 {
        (self - other).len_sq()
    }

    /// Moves `self` toward `to` by fraction `t` (clamped to `[0, 1]`).
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x + (to.x - self.x) * t,
            self.y + (to.y - self.y) * t,
            self.z + (to.z - self.z) * t,
        )
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Rotates `(x, z)` around `(cx, cz)` by `angle`.
pub fn rotate_point(x: f32, z: f32, cx: f32, cz: f32, angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    let (x, z) = (x - cx, z - cz);
    (x * c - z * s + cx, x * s + z * c + cz)
}

/// Wraps an angle into `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-π, π]`.
pub fn angle_diff(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// First-order low-pass step: moves `value` a fraction `lag` of the way to `target`.
pub fn approach(value: f32, target: f32, lag: f32) -> f32 {
    value + (target - value) * lag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_lerp_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rotate_quarter_turn_about_center() {
        let (x, z) = rotate_point(2.0, 1.0, 1.0, 1.0, PI / 2.0);
        assert!((x - 1.0).abs() < 1e-5);
        assert!((z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn wrap_angle_range() {
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
        for i in -40..40 {
            let a = wrap_angle(i as f32 * 0.7);
            assert!(a > -PI && a <= PI, "{a} out of range");
        }
    }

    #[test]
    fn angle_diff_takes_short_way() {
        let d = angle_diff(0.1, TAU - 0.1);
        assert!((d + 0.2).abs() < 1e-4);
    }
}
