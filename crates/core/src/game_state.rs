//! Game state module - the game loop state machine
//!
//! This module ties together all core components: board, catalog, block
//! source, scoring and the fall timer. It owns the falling block, runs the
//! `Idle -> Playing <-> Paused -> GameOver` lifecycle and turns player commands
//! and timer ticks into board mutations.
//!
//! Nothing here blocks or sleeps. A driver either calls [`Game::tick`] with
//! elapsed time, or owns a real timer and calls [`Game::step`] whenever
//! [`Game::fall_interval_ms`] has passed, using [`Game::timer_generation`] to
//! discard deadlines computed before a pause, level-up or game over.

use crate::board::Board;
use crate::catalog::{get_shape, lookup, Shape};
use crate::collision::{can_place, commit};
use crate::config::{GameConfig, RotationPolicy};
use crate::events::{dispatch, GameEvent, GameListener};
use crate::rng::{BlockSource, RandomBlockSource};
use crate::scoring::GameStats;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PlacedSnapshot};
use crate::timer::FallTimer;
use crate::types::*;

/// The block currently under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingBlock {
    pub kind: BlockKind,
    pub x: i8,
    pub y: i8,
    /// Clockwise quarter turns, 0-3
    pub rotation: u8,
    pub color: Rgb,
}

impl FallingBlock {
    pub fn new(kind: BlockKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
            color: lookup(kind).color,
        }
    }

    /// Create a block at the spawn position for a board of `board_width`
    pub fn spawn(kind: BlockKind, board_width: u8) -> Self {
        let cols = lookup(kind).shape.cols();
        Self::new(kind, spawn_x(board_width, cols), 0)
    }

    /// Get the shape for the current rotation
    pub fn shape(&self) -> Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of every filled cell (may include rows < 0)
    pub fn cells(&self) -> impl Iterator<Item = Pos> {
        let (x, y) = (self.x, self.y);
        self.shape()
            .cells()
            .map(move |(dx, dy)| Pos::new(x + dx, y + dy))
    }

    /// Check if the block fits where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        can_place(board, &self.shape(), self.x, self.y)
    }
}

/// Spawn column: centered, then clamped so the shape fits horizontally
pub fn spawn_x(board_width: u8, shape_cols: u8) -> i8 {
    let centered = (board_width / 2) as i16 - (shape_cols / 2) as i16;
    let max_x = (board_width as i16 - shape_cols as i16).max(0);
    centered.clamp(0, max_x) as i8
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Inputs to the phase transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Start,
    Pause,
    Resume,
    SpawnBlocked,
    Reset,
}

impl GamePhase {
    /// Transition table. `None` means the event is ignored in this phase.
    ///
    /// | From | Event | To |
    /// |------|-------|----|
    /// | Idle | Start | Playing |
    /// | Playing | Pause | Paused |
    /// | Paused | Resume | Playing |
    /// | Playing | SpawnBlocked | GameOver |
    /// | any | Reset | Idle |
    pub fn on(self, event: PhaseEvent) -> Option<GamePhase> {
        match (self, event) {
            (GamePhase::Idle, PhaseEvent::Start) => Some(GamePhase::Playing),
            (GamePhase::Playing, PhaseEvent::Pause) => Some(GamePhase::Paused),
            (GamePhase::Paused, PhaseEvent::Resume) => Some(GamePhase::Playing),
            (GamePhase::Playing, PhaseEvent::SpawnBlocked) => Some(GamePhase::GameOver),
            (_, PhaseEvent::Reset) => Some(GamePhase::Idle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Result of one descent attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not playing, or no falling block
    Inactive,
    Moved,
    /// Block committed and the next one spawned
    Locked { lines_cleared: u32 },
    /// Block committed and the next one had no room
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S: BlockSource = RandomBlockSource> {
    config: GameConfig,
    board: Board,
    active: Option<FallingBlock>,
    next: Option<BlockKind>,
    source: S,
    stats: GameStats,
    phase: GamePhase,
    timer: FallTimer,
    events: Vec<GameEvent>,
}

impl Game<RandomBlockSource> {
    /// Create a game drawing kinds uniformly at random from `config.seed`
    pub fn with_seed(config: GameConfig) -> Self {
        Self::new(config, RandomBlockSource::new(config.seed))
    }
}

impl<S: BlockSource> Game<S> {
    /// Create an idle game. `config` must pass [`GameConfig::validate`].
    pub fn new(config: GameConfig, source: S) -> Self {
        let board = Board::new(config.width, config.height);
        Self::with_board(config, source, board)
    }

    /// Create an idle game on a prepared board
    ///
    /// Panics if the board dimensions differ from the config.
    pub fn with_board(config: GameConfig, source: S, board: Board) -> Self {
        assert_eq!(
            (board.width(), board.height()),
            (config.width, config.height),
            "board does not match config"
        );
        let stats = GameStats::new();
        Self {
            config,
            board,
            active: None,
            next: None,
            source,
            timer: FallTimer::new(stats.fall_interval_ms()),
            stats,
            phase: GamePhase::Idle,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<FallingBlock> {
        self.active
    }

    /// The queued kind that spawns after the current block commits
    pub fn next_kind(&self) -> Option<BlockKind> {
        self.next
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.timer.interval_ms()
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Changes whenever a previously scheduled descent must be discarded
    pub fn timer_generation(&self) -> u64 {
        self.timer.generation()
    }

    fn transition(&mut self, event: PhaseEvent) -> bool {
        let Some(next) = self.phase.on(event) else {
            return false;
        };
        log::info!("phase {} -> {}", self.phase.as_str(), next.as_str());
        self.phase = next;
        self.events.push(GameEvent::PhaseChanged(next));
        true
    }

    /// Start playing and spawn the first block
    pub fn start_game(&mut self) -> bool {
        if !self.transition(PhaseEvent::Start) {
            return false;
        }

        self.next = Some(self.source.next_kind());
        self.timer.set_interval(self.stats.fall_interval_ms());
        self.timer.arm();
        self.spawn_next();
        true
    }

    /// Pause; the pending descent is cancelled
    pub fn pause(&mut self) -> bool {
        if !self.transition(PhaseEvent::Pause) {
            return false;
        }
        self.timer.cancel();
        true
    }

    /// Resume; the fall timer restarts from zero
    pub fn resume(&mut self) -> bool {
        if !self.transition(PhaseEvent::Resume) {
            return false;
        }
        self.timer.arm();
        true
    }

    /// Return to `Idle` with an empty board and fresh stats
    ///
    /// The block source keeps its position, so the next game continues the
    /// same sequence rather than replaying it.
    pub fn reset(&mut self) -> bool {
        if !self.transition(PhaseEvent::Reset) {
            return false;
        }

        let old = self.stats;
        self.board = Board::new(self.config.width, self.config.height);
        self.active = None;
        self.next = None;
        self.stats = GameStats::new();
        self.timer.cancel();
        self.timer.set_interval(self.stats.fall_interval_ms());

        if old.score != self.stats.score {
            self.events.push(GameEvent::ScoreChanged(self.stats.score));
        }
        if old.level != self.stats.level {
            self.events.push(GameEvent::LevelChanged(self.stats.level));
        }
        true
    }

    /// Apply a lifecycle request
    pub fn handle_control(&mut self, control: ControlCommand) -> bool {
        match control {
            ControlCommand::Start => self.start_game(),
            ControlCommand::Pause => self.pause(),
            ControlCommand::Resume => self.resume(),
            ControlCommand::Reset => self.reset(),
        }
    }

    /// Apply a player command to the falling block
    ///
    /// Returns false (and changes nothing) when the move is blocked or the
    /// game is not playing.
    pub fn handle_command(&mut self, command: GameCommand) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        match command {
            GameCommand::MoveLeft => self.try_move(-1, 0),
            GameCommand::MoveRight => self.try_move(1, 0),
            GameCommand::SoftDrop => self.try_move(0, 1),
            GameCommand::Rotate => self.try_rotate(),
        }
    }

    /// Try to move the falling block
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = FallingBlock {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };
        if !moved.is_valid(&self.board) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Try to rotate the falling block one quarter turn clockwise in place
    pub(crate) fn try_rotate(&mut self) -> bool {
        if self.config.rotation == RotationPolicy::Disabled {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = FallingBlock {
            rotation: (active.rotation + 1) % 4,
            ..active
        };
        if !rotated.is_valid(&self.board) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// One automatic descent: move down, or commit and spawn the next block
    pub fn step(&mut self) -> StepOutcome {
        if self.phase != GamePhase::Playing {
            return StepOutcome::Inactive;
        }
        let Some(active) = self.active else {
            return StepOutcome::Inactive;
        };

        if self.try_move(0, 1) {
            return StepOutcome::Moved;
        }

        self.lock_block(active)
    }

    /// Advance the fall timer by `elapsed_ms` and run any due descents
    ///
    /// Returns the number of descents executed.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if self.phase != GamePhase::Playing {
            return 0;
        }

        let generation = self.timer.generation();
        let due = self.timer.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            // A level-up or game over restarts the schedule; drop what is left.
            if self.timer.generation() != generation || self.phase != GamePhase::Playing {
                break;
            }
            self.step();
            ran += 1;
        }
        ran
    }

    /// Commit `active` and spawn the next block
    fn lock_block(&mut self, active: FallingBlock) -> StepOutcome {
        let outcome = commit(&mut self.board, &active, self.config.gravity);
        self.active = None;
        self.stats.blocks_placed = self.stats.blocks_placed.saturating_add(1);
        self.events.push(GameEvent::BlockPlaced {
            id: outcome.block_id,
        });

        let lines = outcome.resolution.lines_cleared;
        if lines > 0 {
            self.events.push(GameEvent::LinesCleared { count: lines });

            let change = self.stats.apply_clear(lines);
            if change.score_changed {
                self.events.push(GameEvent::ScoreChanged(self.stats.score));
            }
            if change.level_changed {
                log::info!(
                    "level {} reached, fall interval {}ms",
                    self.stats.level,
                    self.stats.fall_interval_ms()
                );
                self.events.push(GameEvent::LevelChanged(self.stats.level));
                self.timer.set_interval(self.stats.fall_interval_ms());
            }
        }

        if self.spawn_next() {
            StepOutcome::Locked {
                lines_cleared: lines,
            }
        } else {
            StepOutcome::GameOver
        }
    }

    /// Promote the queued kind to the falling block and queue another
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_kind(),
        };
        self.next = Some(self.source.next_kind());

        let block = FallingBlock::spawn(kind, self.board.width());
        if !block.is_valid(&self.board) {
            log::info!(
                "no room to spawn {} at ({}, {}); game over with score {}",
                kind.as_str(),
                block.x,
                block.y,
                self.stats.score
            );
            self.active = None;
            self.transition(PhaseEvent::SpawnBlocked);
            self.timer.cancel();
            self.events.push(GameEvent::GameOver);
            return false;
        }

        log::debug!("spawn {} at ({}, {})", kind.as_str(), block.x, block.y);
        self.active = Some(block);
        true
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Deliver all queued events to `listener`
    pub fn dispatch_events<L: GameListener + ?Sized>(&mut self, listener: &mut L) {
        let events: Vec<GameEvent> = self.events.drain(..).collect();
        dispatch(listener, events);
    }

    /// Read-only copy of everything a UI needs to draw a frame
    pub fn snapshot(&self) -> GameSnapshot {
        let mut grid = Vec::new();
        self.board.write_id_grid(&mut grid);

        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            grid,
            blocks: self.board.blocks().map(PlacedSnapshot::from).collect(),
            active: self.active.map(ActiveSnapshot::from),
            next: self.next,
            phase: self.phase,
            score: self.stats.score,
            level: self.stats.level,
            lines: self.stats.lines_cleared,
            blocks_placed: self.stats.blocks_placed,
            fall_interval_ms: self.timer.interval_ms(),
        }
    }
}
