//! LED Tetris session runner (default binary).
//!
//! Speaks the line-delimited JSON protocol on stdin/stdout so any UI process
//! can host the engine. Logs go to stderr; set `RUST_LOG=debug` for spawns and
//! commits.

use anyhow::{Context, Result};

use led_tetris::driver::{run_session, SessionConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let config = SessionConfig::from_env();
    config
        .game
        .validate()
        .context("invalid game configuration")?;

    let stats = run_session(config, tokio::io::stdin(), tokio::io::stdout())
        .await
        .context("session I/O failed")?;

    log::info!(
        "final score {} at level {} ({} blocks placed)",
        stats.score,
        stats.level,
        stats.blocks_placed
    );
    Ok(())
}
