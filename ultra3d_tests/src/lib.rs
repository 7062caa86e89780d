//! Shared helpers for the integration tests.

use ultra3d_client::App;
use ultra3d_shared::{config::GameConfig, input::Controls, session::GameSession};

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// A session with default config on the given course.
pub fn session_on(course_index: usize) -> anyhow::Result<GameSession> {
    GameSession::new(GameConfig::default(), course_index)
}

/// Steps a session `frames` times holding `held`.
pub fn hold_for(session: &mut GameSession, held: Controls, frames: usize) {
    for _ in 0..frames {
        session.step(held);
    }
}

/// An app already playing the given course.
pub fn playing_app(course_index: usize) -> anyhow::Result<App> {
    let mut app = App::new(GameConfig::default(), course_index)?;
    app.play(course_index)?;
    Ok(app)
}

/// Feeds console lines to the app, one frame after each.
pub fn script(app: &mut App, lines: &[&str]) -> anyhow::Result<Vec<String>> {
    let mut out = Vec::new();
    for line in lines {
        out.extend(app.exec_console(line)?);
        app.step()?;
    }
    Ok(out)
}
