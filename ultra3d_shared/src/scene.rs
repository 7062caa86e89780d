//! Scene model: flat colored polygons in world space.

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// RGBA fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color, fully opaque.
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Linear blend toward `to`; `t` is clamped to `[0, 1]`.
    pub fn mix(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Self::rgba(ch(self.r, to.r), ch(self.g, to.g), ch(self.b, to.b), ch(self.a, to.a))
    }
}

/// A flat convex polygon. Vertex order is the winding order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec3>,
    color: Color,
}

impl Polygon {
    pub fn new(points: Vec<Vec3>, color: Color) -> anyhow::Result<Self> {
        if points.len() < 3 {
            bail!("polygon needs at least 3 vertices, got {}", points.len());
        }
        Ok(Self { points, color })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Average of the vertices.
    pub fn centroid(&self) -> Vec3 {
        let sum = self.points.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
        let n = self.points.len() as f32;
        Vec3::new(sum.x / n, sum.y / n, sum.z / n)
    }
}

/// The geometry of one course. Built once per load, never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    polygons: Vec<Polygon>,
}

impl Scene {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Accumulates polygons for a scene builder.
#[derive(Default)]
pub struct SceneBuilder {
    polygons: Vec<Polygon>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a polygon from `(x, y, z)` tuples.
    pub fn poly(mut self, points: &[(f32, f32, f32)], color: Color) -> anyhow::Result<Self> {
        let points = points.iter().map(|&(x, y, z)| Vec3::new(x, y, z)).collect();
        self.polygons.push(Polygon::new(points, color)?);
        Ok(self)
    }

    /// Adds a horizontal square `[-half, half]²` at height `y`.
    pub fn floor(self, half: f32, y: f32, color: Color) -> anyhow::Result<Self> {
        self.poly(
            &[(-half, y, -half), (half, y, -half), (half, y, half), (-half, y, half)],
            color,
        )
    }

    pub fn build(self) -> Scene {
        Scene::new(self.polygons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_polygons() {
        let err = Polygon::new(vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)], Color::rgb(0, 0, 0));
        assert!(err.is_err());
        assert!(SceneBuilder::new().poly(&[], Color::rgb(1, 2, 3)).is_err());
    }

    #[test]
    fn centroid_is_vertex_average() {
        let tri = Polygon::new(
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 6.0, 3.0)],
            Color::rgb(255, 0, 0),
        )
        .unwrap();
        assert_eq!(tri.centroid(), Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn builder_keeps_insertion_order() {
        let scene = SceneBuilder::new()
            .floor(100.0, 0.0, Color::rgb(0, 255, 0))
            .and_then(|b| b.floor(50.0, -1.0, Color::rgb(0, 0, 255)))
            .unwrap()
            .build();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.polygons()[1].color(), Color::rgb(0, 0, 255));
        assert_eq!(scene.polygons()[0].points()[2], Vec3::new(100.0, 0.0, 100.0));
    }

    #[test]
    fn mix_endpoints() {
        let a = Color::rgb(0, 100, 200);
        let b = Color::rgb(200, 100, 0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }
}
