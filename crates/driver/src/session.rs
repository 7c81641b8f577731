//! Session module - real-time fall timer and message loop
//!
//! A session owns one [`Game`] and drives it from two sources on a single
//! task: inbound protocol lines and a fall deadline. The deadline only exists
//! while the game is playing and is tagged with the game's timer generation,
//! so a pause, reset, game over or level-up discards a descent scheduled
//! before it.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::time::{sleep_until, Instant};

use led_tetris_core::{BlockSource, Game, GamePhase, GameStats, StepOutcome};

use crate::config::SessionConfig;
use crate::protocol::{
    parse_request, write_message, ClientRequest, ErrorMessage, EventMessage, ObservationMessage,
    OutboundMessage,
};

/// Scheduled automatic descent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    generation: u64,
    at: Instant,
}

/// Run a session with a seeded random block source until `reader` hits EOF
///
/// Returns the final game statistics.
pub async fn run_session<R, W>(config: SessionConfig, reader: R, writer: W) -> io::Result<GameStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let game = Game::with_seed(config.game);
    run_game_session(game, config, reader, writer).await
}

/// Run a session around an existing game
pub async fn run_game_session<S, R, W>(
    game: Game<S>,
    config: SessionConfig,
    reader: R,
    writer: W,
) -> io::Result<GameStats>
where
    S: BlockSource,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session {
        game,
        stream: config.stream,
        writer,
        deadline: None,
    };

    log::info!(
        "session open: {}x{} board, rotation {}, gravity {}",
        config.game.width,
        config.game.height,
        config.game.rotation.as_str(),
        config.game.gravity.as_str()
    );

    if config.autostart {
        session.game.start_game();
    }
    session.flush_events().await?;
    session.send_observation().await?;

    let mut lines = BufReader::new(reader).lines();
    loop {
        session.refresh_deadline();
        let deadline = session.deadline.map(|d| d.at);

        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => session.handle_line(&line).await?,
                    None => break,
                }
            }
            _ = sleep_until_deadline(deadline) => {
                session.fire_deadline().await?;
            }
        }
    }

    let stats = *session.game.stats();
    log::info!(
        "session closed: score {}, level {}, {} lines",
        stats.score,
        stats.level,
        stats.lines_cleared
    );
    Ok(stats)
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

struct Session<S: BlockSource, W> {
    game: Game<S>,
    stream: bool,
    writer: W,
    deadline: Option<Deadline>,
}

impl<S, W> Session<S, W>
where
    S: BlockSource,
    W: AsyncWrite + Unpin,
{
    fn interval(&self) -> Duration {
        Duration::from_millis(self.game.fall_interval_ms() as u64)
    }

    /// Drop a stale deadline and schedule a new one if the game is playing
    fn refresh_deadline(&mut self) {
        if self.game.phase() != GamePhase::Playing || !self.game.is_timer_armed() {
            self.deadline = None;
            return;
        }

        let generation = self.game.timer_generation();
        match self.deadline {
            Some(d) if d.generation == generation => {}
            _ => {
                self.deadline = Some(Deadline {
                    generation,
                    at: Instant::now() + self.interval(),
                });
            }
        }
    }

    async fn fire_deadline(&mut self) -> io::Result<()> {
        let Some(fired) = self.deadline else {
            return Ok(());
        };

        let outcome = self.game.step();
        log::trace!("descent: {:?}", outcome);

        // Same generation: keep the cadence instead of drifting by handling time.
        self.deadline = Some(Deadline {
            generation: fired.generation,
            at: fired.at + self.interval(),
        });

        self.flush_events().await?;
        if outcome != StepOutcome::Inactive {
            self.send_changed().await?;
        }
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> io::Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let request = match parse_request(trimmed) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("rejected message: {}", err);
                let msg = OutboundMessage::Error(ErrorMessage::from(&err));
                return write_message(&mut self.writer, &msg).await;
            }
        };

        let changed = match request {
            ClientRequest::Command(command) => {
                let applied = self.game.handle_command(command);
                if !applied {
                    log::debug!("command {} had no effect", command.as_str());
                }
                applied
            }
            ClientRequest::Control(control) => {
                let applied = self.game.handle_control(control);
                if !applied {
                    log::debug!(
                        "control {} ignored in phase {}",
                        control.as_str(),
                        self.game.phase().as_str()
                    );
                }
                applied
            }
            ClientRequest::Observe => return self.send_observation().await,
        };

        self.flush_events().await?;
        if changed {
            self.send_changed().await?;
        }
        Ok(())
    }

    async fn flush_events(&mut self) -> io::Result<()> {
        let events: Vec<_> = self.game.drain_events().collect();
        for event in events {
            let msg = OutboundMessage::Event(EventMessage::from(event));
            write_message(&mut self.writer, &msg).await?;
        }
        Ok(())
    }

    async fn send_changed(&mut self) -> io::Result<()> {
        if self.stream {
            self.send_observation().await?;
        }
        Ok(())
    }

    async fn send_observation(&mut self) -> io::Result<()> {
        let snapshot = self.game.snapshot();
        let msg = OutboundMessage::Observation(ObservationMessage::from(&snapshot));
        write_message(&mut self.writer, &msg).await
    }
}
