//! Movement, camera follow and rendering through a running session.

use std::f32::consts::FRAC_PI_2;

use ultra3d_shared::input::Controls;
use ultra3d_shared::physics::AvatarState;
use ultra3d_shared::render::DrawCommand;
use ultra3d_tests::{hold_for, session_on};

#[test]
fn running_forward_reaches_top_speed_then_coasts_to_stop() -> anyhow::Result<()> {
    let mut s = session_on(0)?;
    let max = s.config().physics.max_speed;

    hold_for(&mut s, Controls::MOVE_UP, 40);
    assert_eq!(s.avatar.vel_fwd, max);
    assert_eq!(s.avatar.state(), AvatarState::Run);

    hold_for(&mut s, Controls::empty(), 60);
    assert_eq!(s.avatar.vel_fwd, 0.0);
    assert_eq!(s.avatar.state(), AvatarState::Idle);
    Ok(())
}

#[test]
fn jump_leaves_and_returns_to_ground() -> anyhow::Result<()> {
    let mut s = session_on(0)?;
    hold_for(&mut s, Controls::empty(), 1);

    hold_for(&mut s, Controls::JUMP, 1);
    assert!(s.avatar.position.y < 0.0);
    assert_eq!(s.avatar.state(), AvatarState::Jump);

    let mut apex = 0.0f32;
    for _ in 0..60 {
        s.step(Controls::empty());
        apex = apex.min(s.avatar.position.y);
        assert!(s.avatar.position.y <= s.avatar.ground_y);
    }
    assert!(apex < -100.0);
    assert_eq!(s.avatar.position.y, 0.0);
    assert!(s.avatar.is_grounded());
    Ok(())
}

#[test]
fn forward_is_relative_to_camera_yaw() -> anyhow::Result<()> {
    let mut s = session_on(0)?;
    hold_for(&mut s, Controls::YAW_RIGHT, 1);
    hold_for(&mut s, Controls::empty(), 200);
    assert!((s.camera.yaw - FRAC_PI_2).abs() < 1e-3);

    let start = s.avatar.position;
    hold_for(&mut s, Controls::MOVE_UP, 120);
    let moved = s.avatar.position - start;
    assert!(moved.x > 0.0, "moved {moved:?}");
    assert!(moved.x > moved.z.abs() * 5.0, "moved {moved:?}");
    Ok(())
}

#[test]
fn camera_settles_with_avatar_at_screen_center() -> anyhow::Result<()> {
    let mut s = session_on(0)?;
    hold_for(&mut s, Controls::MOVE_UP | Controls::MOVE_RIGHT, 300);
    hold_for(&mut s, Controls::empty(), 300);

    let p = s
        .camera
        .project(s.avatar.position)
        .ok_or_else(|| anyhow::anyhow!("avatar behind camera"))?;
    let cfg = s.config();
    assert!((p.x - cfg.width as f32 / 2.0).abs() < 2.0, "x = {}", p.x);
    assert!((p.y - cfg.height as f32 / 2.0).abs() < 2.0, "y = {}", p.y);
    Ok(())
}

#[test]
fn pitch_presses_stay_in_range() -> anyhow::Result<()> {
    let mut s = session_on(0)?;
    for _ in 0..10 {
        s.step(Controls::PITCH_UP);
        s.step(Controls::empty());
    }
    hold_for(&mut s, Controls::empty(), 200);
    let max = s.config().camera.pitch_max();
    assert!(s.camera.target_pitch <= max);
    assert!(s.camera.pitch <= max + 1e-4);

    for _ in 0..20 {
        s.step(Controls::PITCH_DOWN);
        s.step(Controls::empty());
    }
    assert!(s.camera.target_pitch >= s.config().camera.pitch_min());
    Ok(())
}

#[test]
fn world_polygons_are_drawn_far_to_near() -> anyhow::Result<()> {
    let mut s = session_on(0)?;
    hold_for(&mut s, Controls::empty(), 120);

    let order = ultra3d_shared::render::painter_order(s.scene(), &s.camera);
    let cam = s.camera.position;
    let dists: Vec<f32> = order
        .iter()
        .map(|&i| s.scene().polygons()[i].centroid().dist_sq(cam))
        .collect();
    assert!(dists.windows(2).all(|w| w[0] >= w[1]));

    let frame = s.render();
    assert!(matches!(frame.first(), Some(DrawCommand::Clear { .. })));
    assert!(frame
        .iter()
        .any(|c| matches!(c, DrawCommand::Polygon { points, .. } if points.len() >= 3)));
    Ok(())
}
