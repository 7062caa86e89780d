//! Game binary.
//!
//! Usage:
//!   cargo run -p ultra3d_client -- [--config game.json] [--fps 60] [--course 1] [--frames N]
//!
//! With `--course` the game starts playing that course (1-based); otherwise
//! it opens on the title screen. `--frames N` runs N frames headless and
//! exits. Input comes from the console on stdin.
//!
//! Console commands:
//!   +<control> / -<control> - Hold / release a control (`+up`, `+jump`, `-q`)
//!   key <name>              - Press a key for one frame (`key enter`, `key 3`)
//!   click <x> <y>           - Click at a screen position
//!   course [n]              - List courses, or play course n
//!   status                  - Show game status
//!   dump                    - Print the last frame's draw list as JSON
//!   cvarlist / set / help   - Console variables
//!   quit                    - Exit

use std::env;
use std::io::{BufRead, Write};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{info, warn};
use ultra3d_client::App;
use ultra3d_shared::config::GameConfig;

struct Args {
    cfg: GameConfig,
    course: Option<usize>,
    frames: Option<u64>,
}

fn parse_args() -> anyhow::Result<Args> {
    let argv: Vec<String> = env::args().collect();
    let mut config_path = None;
    let mut fps = None;
    let mut course = None;
    let mut frames = None;
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--config" if i + 1 < argv.len() => {
                config_path = Some(argv[i + 1].clone());
                i += 2;
            }
            "--fps" if i + 1 < argv.len() => {
                fps = Some(argv[i + 1].parse::<u32>().context("parse --fps")?);
                i += 2;
            }
            "--course" if i + 1 < argv.len() => {
                course = Some(argv[i + 1].parse().context("parse --course")?);
                i += 2;
            }
            "--frames" if i + 1 < argv.len() => {
                frames = Some(argv[i + 1].parse().context("parse --frames")?);
                i += 2;
            }
            _ => i += 1,
        }
    }

    let mut cfg = match config_path {
        Some(path) => {
            let text =
                std::fs::read_to_string(&path).with_context(|| format!("read config {}", path))?;
            GameConfig::from_json_str(&text)?
        }
        None => GameConfig::default(),
    };
    if let Some(fps) = fps {
        cfg.fps = fps;
    }
    cfg.validate().context("invalid config")?;
    Ok(Args {
        cfg,
        course,
        frames,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let Args { cfg, course, frames } = parse_args()?;
    info!(
        width = cfg.width,
        height = cfg.height,
        fps = cfg.fps,
        fov = cfg.camera.fov_deg,
        "Starting"
    );

    let start_index = course.map_or(0, |n| n.saturating_sub(1));
    let mut app = App::new(cfg.clone(), start_index)?;
    if course.is_some() {
        app.play(start_index)?;
    }

    if let Some(frames) = frames {
        app.run_for_frames(frames).await?;
        info!(frames = app.frame(), course = %app.session.course().name, "Headless run finished");
        println!("{}", app.exec_console("dump")?.join("\n"));
        return Ok(());
    }

    // Set up console input channel.
    let (console_tx, mut console_rx) = mpsc::channel::<String>(32);

    // Spawn stdin reader thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("] ");
            let _ = stdout.flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    println!("Type 'help' for commands, 'key space' to start, 'quit' to exit.");
    println!();

    let frame_interval = std::time::Duration::from_secs_f32(1.0 / cfg.fps as f32);
    let mut next_frame = tokio::time::Instant::now();

    while !app.should_quit() {
        while let Ok(line) = console_rx.try_recv() {
            match app.exec_console(&line) {
                Ok(output) => {
                    for line in output {
                        println!("{}", line);
                    }
                }
                Err(e) => {
                    warn!(command = %line, error = %e, "Console command failed");
                    println!("Error: {:#}", e);
                }
            }
        }

        app.step()?;

        next_frame += frame_interval;
        tokio::time::sleep_until(next_frame).await;
    }

    info!(frames = app.frame(), "Exiting");
    Ok(())
}
