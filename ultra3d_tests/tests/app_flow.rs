//! Screen flow and console scripting through the client app.

use ultra3d_client::{App, Screen};
use ultra3d_shared::config::GameConfig;
use ultra3d_shared::render::DrawCommand;
use ultra3d_tests::{init_tracing, playing_app, script};

#[test]
fn keyboard_menu_to_course_and_back() -> anyhow::Result<()> {
    init_tracing();
    let mut app = App::new(GameConfig::default(), 0)?;
    script(&mut app, &["key space", "key 8", "key down", "key enter"])?;

    assert_eq!(app.screen(), Screen::Playing);
    assert_eq!(app.session.course_index(), 8);
    assert_eq!(app.session.course().name, "Shifting Sand Land");

    script(&mut app, &["key escape"])?;
    assert_eq!(app.screen(), Screen::CourseSelect { selected: 8 });
    Ok(())
}

#[test]
fn course_select_frame_lists_every_course() -> anyhow::Result<()> {
    let mut app = App::new(GameConfig::default(), 0)?;
    script(&mut app, &["key enter"])?;

    let labels: Vec<&str> = app
        .last_frame()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(labels.contains(&"1. Castle Grounds"));
    assert!(labels.contains(&"16. Rainbow Ride"));
    Ok(())
}

#[test]
fn hud_reports_course_and_position() -> anyhow::Result<()> {
    let mut app = playing_app(3)?;
    script(&mut app, &["status"])?;

    let hud = app.last_frame().iter().find_map(|c| match c {
        DrawCommand::Text { text, .. } if text.contains("STAR") => Some(text.clone()),
        _ => None,
    });
    assert_eq!(hud.as_deref(), Some("Jolly Roger Bay  STAR: 0  x: 0 z: 0"));
    Ok(())
}

#[test]
fn tuning_cvars_change_physics() -> anyhow::Result<()> {
    let mut app = playing_app(0)?;
    script(&mut app, &["mv_max_speed 4", "+up"])?;
    for _ in 0..30 {
        app.step()?;
    }
    assert_eq!(app.session.avatar.vel_fwd, 4.0);

    let out = app.exec_console("mv_max_speed")?;
    assert_eq!(out, vec!["mv_max_speed = 4 (default: 12)"]);
    Ok(())
}

#[test]
fn dump_emits_tagged_json() -> anyhow::Result<()> {
    let mut app = playing_app(0)?;
    app.step()?;
    let out = app.exec_console("dump")?;
    assert_eq!(out.len(), 1);
    assert!(out[0].contains(r#""kind": "clear""#));
    assert!(out[0].contains(r#""kind": "text""#));
    Ok(())
}

#[tokio::test]
async fn paced_run_advances_frames() -> anyhow::Result<()> {
    let cfg = GameConfig {
        fps: 200,
        ..GameConfig::default()
    };
    let mut app = App::new(cfg, 0)?;
    app.play(0)?;
    app.exec_console("+up")?;

    let started = tokio::time::Instant::now();
    app.run_for_frames(10).await?;
    assert_eq!(app.frame(), 10);
    assert_eq!(app.session.tick(), 10);
    assert!(started.elapsed() >= std::time::Duration::from_millis(45));
    assert!(app.session.avatar.vel_fwd > 0.0);
    Ok(())
}

#[tokio::test]
async fn quit_stops_paced_run() -> anyhow::Result<()> {
    let mut app = App::new(GameConfig::default(), 0)?;
    app.exec_console("quit")?;
    app.run_for_frames(100).await?;
    assert_eq!(app.frame(), 1);
    assert!(app.should_quit());
    Ok(())
}

#[test]
fn bad_config_is_an_error_not_a_panic() -> anyhow::Result<()> {
    let json = r#"{"camera": {"pitch_min_deg": 70, "pitch_max_deg": 10}}"#;
    assert!(GameConfig::from_json_str(json).is_err());

    let mut cfg = GameConfig::default();
    cfg.camera.pitch_min_deg = 70.0;
    cfg.camera.pitch_max_deg = 10.0;
    assert!(App::new(cfg, 0).is_err());
    Ok(())
}

#[test]
fn rejected_tuning_leaves_game_playable() -> anyhow::Result<()> {
    let mut app = playing_app(0)?;
    let out = script(&mut app, &["cam_lag 2.5", "key e"])?;
    assert!(out.iter().any(|l| l.starts_with("Rejected:")), "{out:?}");
    for _ in 0..200 {
        app.step()?;
    }
    let yaw = app.session.camera.yaw;
    assert!((yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-3, "yaw = {yaw}");
    Ok(())
}
