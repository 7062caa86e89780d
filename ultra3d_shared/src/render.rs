//! Rendering.
//!
//! The core never touches pixels. It produces an ordered list of
//! screen-space [`DrawCommand`]s and hands them to a [`RenderBackend`].
//!
//! World geometry uses the painter's algorithm: polygons are sorted by
//! squared distance from the camera to their centroid, farthest first, and
//! drawn in that order so nearer faces overdraw farther ones. There is no
//! depth buffer, so intersecting or very large polygons can be misordered.
//! The avatar sprite is always drawn after the world.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::palette::{AVATAR_BLUE, AVATAR_RED, BUTTON_YELLOW, SHADOW};
use crate::physics::Avatar;
use crate::scene::{Color, Scene};

/// The sprite is anchored this far above the avatar's feet.
pub const SPRITE_LIFT: f32 = 40.0;
/// World-space sprite height.
pub const SPRITE_SIZE: f32 = 60.0;
/// World-space shadow ellipse extents.
pub const SHADOW_WIDTH: f32 = 40.0;
pub const SHADOW_HEIGHT: f32 = 20.0;
/// Shadow sits this far above the ground plane.
pub const SHADOW_LIFT: f32 = 2.0;
/// Body corner radius in pixels; not scaled with depth.
pub const BODY_CORNER_RADIUS: f32 = 4.0;

/// Screen-space axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// One primitive for an external 2D rasterizer. Coordinates are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        color: Color,
    },
    Ellipse {
        bounds: ScreenRect,
        color: Color,
    },
    Rect {
        bounds: ScreenRect,
        corner_radius: f32,
        color: Color,
    },
    Circle {
        center: (f32, f32),
        radius: f32,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
    },
    Text {
        pos: (f32, f32),
        anchor: TextAnchor,
        text: String,
        size: f32,
        color: Color,
    },
}

/// Which point of the rendered text `pos` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
}

/// A minimal rendering API.
pub trait RenderBackend {
    fn begin_frame(&mut self);
    fn draw(&mut self, cmd: &DrawCommand);
    fn end_frame(&mut self);

    /// Submits a whole frame.
    fn present(&mut self, frame: &[DrawCommand]) {
        self.begin_frame();
        for cmd in frame {
            self.draw(cmd);
        }
        self.end_frame();
    }
}

/// Discards every frame. The display for runs with no window.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {}
    fn draw(&mut self, _cmd: &DrawCommand) {}
    fn end_frame(&mut self) {}
}

/// Keeps the most recently presented frame.
#[derive(Default)]
pub struct FrameRecorder {
    pending: Vec<DrawCommand>,
    last: Vec<DrawCommand>,
    frames: u64,
}

impl FrameRecorder {
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Serializes the last frame for an out-of-process rasterizer.
    pub fn last_frame_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.last)
    }
}

impl RenderBackend for FrameRecorder {
    fn begin_frame(&mut self) {
        self.pending.clear();
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        self.pending.push(cmd.clone());
    }

    fn end_frame(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.last);
        self.frames += 1;
    }
}

/// Scene polygon indices, farthest centroid first. Ties keep scene order.
pub fn painter_order(scene: &Scene, camera: &Camera) -> Vec<usize> {
    let mut keyed: Vec<(usize, f32)> = scene
        .polygons()
        .iter()
        .enumerate()
        .map(|(i, poly)| (i, poly.centroid().dist_sq(camera.position)))
        .collect();
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Appends the depth-sorted, projected scene polygons to `out`.
///
/// A polygon with any vertex behind the near plane is skipped whole.
pub fn draw_scene(scene: &Scene, camera: &Camera, out: &mut Vec<DrawCommand>) {
    let polygons = scene.polygons();
    for index in painter_order(scene, camera) {
        let poly = &polygons[index];
        let projected: Option<Vec<(f32, f32)>> = poly
            .points()
            .iter()
            .map(|p| camera.project(*p).map(|s| (s.x, s.y)))
            .collect();
        if let Some(points) = projected {
            out.push(DrawCommand::Polygon {
                points,
                color: poly.color(),
            });
        }
    }
}

/// Appends the avatar's shadow and sprite to `out`.
pub fn draw_avatar(avatar: &Avatar, camera: &Camera, out: &mut Vec<DrawCommand>) {
    let pos = avatar.position;
    let mut anchor = pos;
    anchor.y -= SPRITE_LIFT;
    let Some(body) = camera.project(anchor) else {
        return;
    };

    let mut foot = pos;
    foot.y = avatar.ground_y - SHADOW_LIFT;
    if let Some(shadow) = camera.project(foot) {
        let w = SHADOW_WIDTH * shadow.scale;
        let h = SHADOW_HEIGHT * shadow.scale;
        out.push(DrawCommand::Ellipse {
            bounds: ScreenRect::new(shadow.x - w / 2.0, shadow.y - h / 2.0, w, h),
            color: SHADOW,
        });
    }

    let (sx, sy) = (body.x, body.y);
    let size = SPRITE_SIZE * body.scale;
    let brim_offset = (avatar.face_angle - camera.yaw).sin() * (size / 3.0);

    out.push(DrawCommand::Circle {
        center: (sx, sy - size * 0.4),
        radius: size / 2.0,
        color: AVATAR_RED,
    });
    out.push(DrawCommand::Circle {
        center: (sx + brim_offset, sy - size * 0.3),
        radius: size / 2.5,
        color: AVATAR_RED,
    });
    out.push(DrawCommand::Rect {
        bounds: ScreenRect::new(sx - size / 3.0, sy, size / 1.5, size / 1.5),
        corner_radius: BODY_CORNER_RADIUS,
        color: AVATAR_BLUE,
    });
    for side in [-1.0, 1.0] {
        out.push(DrawCommand::Circle {
            center: (sx + side * size / 6.0, sy + size / 4.0),
            radius: size / 10.0,
            color: BUTTON_YELLOW,
        });
    }
}

/// Builds a full world frame: sky clear, scene, then avatar on top.
pub fn render_world(
    scene: &Scene,
    camera: &Camera,
    avatar: &Avatar,
    sky: Color,
) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(scene.len() + 7);
    out.push(DrawCommand::Clear { color: sky });
    draw_scene(scene, camera, &mut out);
    draw_avatar(avatar, camera, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::math::Vec3;
    use crate::palette::SKY_BLUE;
    use crate::scene::{Polygon, SceneBuilder};

    fn camera_at_origin() -> Camera {
        let mut cam = Camera::new(&GameConfig::default());
        cam.position = Vec3::ZERO;
        cam.yaw = 0.0;
        cam.pitch = 0.0;
        cam
    }

    fn tri_at(z: f32, color: Color) -> Polygon {
        Polygon::new(
            vec![
                Vec3::new(-1.0, 0.0, z),
                Vec3::new(1.0, 0.0, z),
                Vec3::new(0.0, 0.0, z),
            ],
            color,
        )
        .unwrap()
    }

    #[test]
    fn farthest_polygon_first() {
        let scene = Scene::new(vec![
            tri_at(10.0, Color::rgb(10, 0, 0)),
            tri_at(50.0, Color::rgb(50, 0, 0)),
            tri_at(5.0, Color::rgb(5, 0, 0)),
        ]);
        let cam = camera_at_origin();
        assert_eq!(painter_order(&scene, &cam), vec![1, 0, 2]);

        let mut out = Vec::new();
        draw_scene(&scene, &cam, &mut out);
        let reds: Vec<u8> = out
            .iter()
            .map(|c| match c {
                DrawCommand::Polygon { color, .. } => color.r,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(reds, vec![50, 10, 5]);
    }

    #[test]
    fn partially_behind_polygon_is_skipped_whole() {
        let straddling = Polygon::new(
            vec![
                Vec3::new(-5.0, 0.0, -20.0),
                Vec3::new(5.0, 0.0, 20.0),
                Vec3::new(0.0, 5.0, 20.0),
            ],
            Color::rgb(1, 1, 1),
        )
        .unwrap();
        let scene = Scene::new(vec![straddling, tri_at(30.0, Color::rgb(2, 2, 2))]);
        let mut out = Vec::new();
        draw_scene(&scene, &camera_at_origin(), &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn avatar_drawn_last_and_scaled() {
        let scene = SceneBuilder::new()
            .floor(500.0, 0.0, Color::rgb(0, 200, 0))
            .unwrap()
            .build();
        let cam = camera_at_origin();
        let mut near = Avatar::new(Vec3::new(0.0, 100.0, 200.0), 100.0);
        let frame = render_world(&scene, &cam, &near, SKY_BLUE);

        assert_eq!(frame[0], DrawCommand::Clear { color: SKY_BLUE });
        // shadow, cap, brim, body, two buttons
        let sprite = &frame[frame.len() - 6..];
        assert!(matches!(sprite[0], DrawCommand::Ellipse { .. }));
        assert!(matches!(
            &sprite[3],
            DrawCommand::Rect { corner_radius, .. } if *corner_radius == BODY_CORNER_RADIUS
        ));

        let cap_radius = |frame: &[DrawCommand]| match &frame[frame.len() - 5] {
            DrawCommand::Circle { radius, .. } => *radius,
            other => panic!("expected cap circle, got {other:?}"),
        };
        let near_radius = cap_radius(&frame[..]);
        near.position.z = 800.0;
        let far_frame = render_world(&scene, &cam, &near, SKY_BLUE);
        assert!(cap_radius(&far_frame[..]) < near_radius);
    }

    #[test]
    fn avatar_behind_camera_draws_nothing() {
        let cam = camera_at_origin();
        let avatar = Avatar::new(Vec3::new(0.0, 0.0, -100.0), 0.0);
        let mut out = Vec::new();
        draw_avatar(&avatar, &cam, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn brim_follows_facing_relative_to_camera() {
        let cam = camera_at_origin();
        let mut avatar = Avatar::new(Vec3::new(0.0, 0.0, 300.0), 0.0);
        avatar.face_angle = std::f32::consts::FRAC_PI_2;
        let mut out = Vec::new();
        draw_avatar(&avatar, &cam, &mut out);
        let (cap, brim) = match (&out[1], &out[2]) {
            (DrawCommand::Circle { center: c, .. }, DrawCommand::Circle { center: b, .. }) => (*c, *b),
            other => panic!("unexpected {other:?}"),
        };
        assert!(brim.0 > cap.0);
    }

    #[test]
    fn recorder_keeps_last_frame_and_serializes() {
        let mut rec = FrameRecorder::default();
        rec.present(&[DrawCommand::Clear { color: SKY_BLUE }]);
        rec.present(&[DrawCommand::Line {
            from: (0.0, 0.0),
            to: (10.0, 0.0),
            color: SKY_BLUE,
        }]);
        assert_eq!(rec.frames_presented(), 2);
        assert_eq!(rec.last_frame().len(), 1);
        let json = rec.last_frame_json().unwrap();
        assert!(json.contains("\"kind\": \"line\""));
    }
}
