//! Menu and HUD draw lists.
//!
//! Everything here is layout data turned into [`DrawCommand`]s; the world
//! itself is drawn by the session.

use std::f32::consts::{FRAC_PI_2, TAU};

use ultra3d_shared::courses::COURSES;
use ultra3d_shared::palette::*;
use ultra3d_shared::physics::Avatar;
use ultra3d_shared::render::{DrawCommand, ScreenRect, TextAnchor};
use ultra3d_shared::scene::Color;

pub const TITLE: &str = "Ultra Mario 3D Bros";
const TITLE_SIZE: f32 = 48.0;
const MENU_SIZE: f32 = 24.0;
const BODY_SIZE: f32 = 18.0;

/// "Press start" toggles with this period.
pub const BLINK_MS: u64 = 500;

const STAR_RADIUS: f32 = 50.0;
const ROW_TOP: f32 = 90.0;
const ROW_PITCH: f32 = 32.0;
const ROW_HEIGHT: f32 = 28.0;
const ROW_MARGIN: f32 = 80.0;
const ROW_BORDER: f32 = 2.0;
const ROW_RADIUS: f32 = 6.0;

fn text(
    x: f32,
    y: f32,
    anchor: TextAnchor,
    s: impl Into<String>,
    size: f32,
    color: Color,
) -> DrawCommand {
    DrawCommand::Text {
        pos: (x, y),
        anchor,
        text: s.into(),
        size,
        color,
    }
}

/// Title screen: sky gradient, star, outlined title, blinking prompt.
pub fn title_screen(width: u32, height: u32, elapsed_ms: u64) -> Vec<DrawCommand> {
    let (w, h) = (width as f32, height as f32);
    let mut out = Vec::with_capacity(height as usize + 64);

    for row in 0..height {
        let y = row as f32;
        out.push(DrawCommand::Line {
            from: (0.0, y),
            to: (w, y),
            color: SKY_TOP.mix(SKY_BOTTOM, y / h),
        });
    }

    let (cx, cy) = (w / 2.0, h / 2.0 - 100.0);
    let star: Vec<(f32, f32)> = (0..5)
        .map(|i| {
            let angle = FRAC_PI_2 + i as f32 * TAU / 5.0;
            (cx + angle.cos() * STAR_RADIUS, cy - angle.sin() * STAR_RADIUS)
        })
        .collect();
    out.push(DrawCommand::Polygon {
        points: star.clone(),
        color: TITLE_GOLD,
    });
    for (i, &from) in star.iter().enumerate() {
        out.push(DrawCommand::Line {
            from,
            to: star[(i + 1) % star.len()],
            color: STAR_EDGE,
        });
    }

    let (tx, ty) = (w / 2.0, h / 2.0 - 40.0);
    for dx in -3..=3 {
        for dy in -3..=3 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (x, y) = (tx + dx as f32, ty + dy as f32);
            out.push(text(x, y, TextAnchor::TopCenter, TITLE, TITLE_SIZE, TITLE_OUTLINE));
        }
    }
    out.push(text(tx - 2.0, ty - 2.0, TextAnchor::TopCenter, TITLE, TITLE_SIZE, TITLE_RED));
    out.push(text(tx, ty, TextAnchor::TopCenter, TITLE, TITLE_SIZE, TITLE_GOLD));

    if (elapsed_ms / BLINK_MS) % 2 == 1 {
        out.push(text(
            w / 2.0,
            h / 2.0 + 40.0,
            TextAnchor::TopCenter,
            "Press SPACE to Start",
            MENU_SIZE,
            WHITE,
        ));
    }

    out.push(text(
        w / 2.0,
        h - 50.0,
        TextAnchor::TopCenter,
        "(C) Cat's 1999-2026  (C) Nintendo",
        BODY_SIZE,
        PALE_BLUE,
    ));
    out
}

/// Screen bounds of a course-select row.
pub fn course_row(index: usize, width: u32) -> ScreenRect {
    let y = ROW_TOP + index as f32 * ROW_PITCH;
    ScreenRect::new(ROW_MARGIN, y - 4.0, width as f32 - 2.0 * ROW_MARGIN, ROW_HEIGHT)
}

/// Course row under a click, if any.
pub fn course_at(x: f32, y: f32, width: u32) -> Option<usize> {
    (0..COURSES.len()).find(|&i| course_row(i, width).contains(x, y))
}

/// Course select: one rounded row per course, the selection highlighted.
pub fn course_select(width: u32, height: u32, selected: usize) -> Vec<DrawCommand> {
    let w = width as f32;
    let mut out = vec![
        DrawCommand::Clear { color: SKY_BOTTOM },
        text(w / 2.0, 30.0, TextAnchor::TopCenter, "Select Course", TITLE_SIZE, TITLE_GOLD),
    ];

    for (i, def) in COURSES.iter().enumerate() {
        let row = course_row(i, width);
        let fill = if i == selected { ROW_SELECTED } else { GRASS_GREEN };
        out.push(DrawCommand::Rect {
            bounds: row,
            corner_radius: ROW_RADIUS,
            color: BLACK,
        });
        out.push(DrawCommand::Rect {
            bounds: ScreenRect::new(
                row.x + ROW_BORDER,
                row.y + ROW_BORDER,
                row.w - 2.0 * ROW_BORDER,
                row.h - 2.0 * ROW_BORDER,
            ),
            corner_radius: ROW_RADIUS - ROW_BORDER,
            color: fill,
        });
        let label = format!("{}. {}", i + 1, def.name);
        out.push(text(100.0, row.y + 4.0, TextAnchor::TopLeft, label, BODY_SIZE, WHITE));
    }

    out.push(text(
        w / 2.0,
        height as f32 - 36.0,
        TextAnchor::TopCenter,
        "1-9/0: Select  ENTER: Play  ESC: Back",
        BODY_SIZE,
        PALE_BLUE,
    ));
    out
}

/// In-course overlay: course name and position, control help.
pub fn hud(course_name: &str, avatar: &Avatar, height: u32) -> Vec<DrawCommand> {
    let status = format!(
        "{}  STAR: 0  x: {} z: {}",
        course_name,
        avatar.position.x as i32,
        avatar.position.z as i32
    );
    vec![
        text(20.0, 20.0, TextAnchor::TopLeft, status, BODY_SIZE, WHITE),
        text(
            20.0,
            height as f32 - 40.0,
            TextAnchor::TopLeft,
            "ARROWS: Move | SPACE: Jump | Q/E: Yaw | R/F: Pitch",
            BODY_SIZE,
            YELLOW,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_hit_test() {
        assert_eq!(course_at(400.0, 90.0, 800), Some(0));
        assert_eq!(course_at(400.0, 90.0 + 32.0 * 3.0 + 10.0, 800), Some(3));
        assert_eq!(course_at(50.0, 90.0, 800), None);
        assert_eq!(course_at(400.0, 40.0, 800), None);
        // Gap between rows 0 and 1.
        assert_eq!(course_at(400.0, 115.0, 800), None);
    }

    #[test]
    fn prompt_blinks() {
        let has_prompt = |ms| {
            title_screen(800, 600, ms).iter().any(|c| {
                matches!(c, DrawCommand::Text { text, .. } if text == "Press SPACE to Start")
            })
        };
        assert!(!has_prompt(0));
        assert!(has_prompt(600));
        assert!(!has_prompt(1100));
    }

    #[test]
    fn title_draws_gradient_then_star() {
        let frame = title_screen(800, 600, 0);
        assert!(matches!(frame[0], DrawCommand::Line { .. }));
        assert!(matches!(&frame[600], DrawCommand::Polygon { points, .. } if points.len() == 5));
    }

    #[test]
    fn selected_row_is_highlighted() {
        let frame = course_select(800, 600, 2);
        let fills: Vec<Color> = frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { color, .. } if *color != BLACK => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), COURSES.len());
        assert_eq!(fills[2], ROW_SELECTED);
        assert_eq!(fills[0], GRASS_GREEN);
    }
}
