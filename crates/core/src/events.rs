//! Events module - notifications raised by the game loop
//!
//! The game queues [`GameEvent`]s as they happen; callers drain the queue after
//! each call into the engine, either directly or through a [`GameListener`].

use crate::board::BlockId;
use crate::game_state::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A falling block was committed (`None` if it sat entirely above the board)
    BlockPlaced { id: Option<BlockId> },
    LinesCleared { count: u32 },
    ScoreChanged(u32),
    LevelChanged(u32),
    PhaseChanged(GamePhase),
    GameOver,
}

/// Callback-style consumer of game events
///
/// Every method has a no-op default; implement only what you need.
pub trait GameListener {
    fn on_score_change(&mut self, _score: u32) {}
    fn on_level_change(&mut self, _level: u32) {}
    fn on_game_over(&mut self) {}
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Feed events to a listener in order
pub fn dispatch<L, I>(listener: &mut L, events: I)
where
    L: GameListener + ?Sized,
    I: IntoIterator<Item = GameEvent>,
{
    for event in events {
        listener.on_event(&event);
        match event {
            GameEvent::ScoreChanged(score) => listener.on_score_change(score),
            GameEvent::LevelChanged(level) => listener.on_level_change(level),
            GameEvent::GameOver => listener.on_game_over(),
            _ => {}
        }
    }
}
