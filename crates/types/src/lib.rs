//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, driver protocol, tests).
//!
//! # Board Dimensions
//!
//! Canonical playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_MS` | 1000 | Fall interval at level 1 |
//! | `FALL_STEP_MS` | 100 | Interval reduction per level gained |
//! | `MIN_FALL_MS` | 500 | Floor of the fall interval |
//!
//! # Scoring Constants
//!
//! - `POINTS_PER_LINE`: 100 points per cleared line, multiplied by the level
//! - `POINTS_PER_LEVEL`: every 1000 points raises the level by one
//!
//! # Examples
//!
//! ```
//! use led_tetris_types::{BlockKind, GameCommand, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let kind = BlockKind::from_str("factory-light").unwrap();
//! assert_eq!(kind, BlockKind::FactoryLight);
//! assert_eq!(kind.as_str(), "factory-light");
//!
//! let cmd = GameCommand::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, GameCommand::MoveLeft);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest board side accepted by the engine
pub const MAX_BOARD_SIDE: u8 = 64;

/// Fall interval at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_MS: u32 = 1000;

/// Fall interval reduction for each level above 1
pub const FALL_STEP_MS: u32 = 100;

/// The fall interval never drops below this floor
pub const MIN_FALL_MS: u32 = 500;

/// Points per cleared line at level 1
pub const POINTS_PER_LINE: u32 = 100;

/// Score span of a single level
pub const POINTS_PER_LEVEL: u32 = 1000;

/// Largest side of a catalog shape's bounding box
pub const MAX_SHAPE_SIDE: u8 = 8;

/// Upper bound on filled cells in any catalog shape
pub const MAX_BLOCK_CELLS: usize = 8;


/// The four lighting-fixture block kinds
///
/// - **BaseLed**: red 2x2 base light
/// - **Downlight**: teal two-cell column
/// - **SquareLight**: light-blue single cell
/// - **FactoryLight**: green eight-cell high-bay column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    BaseLed,
    Downlight,
    SquareLight,
    FactoryLight,
}

impl BlockKind {
    /// Every kind, in catalog order
    pub const ALL: [BlockKind; 4] = [
        BlockKind::BaseLed,
        BlockKind::Downlight,
        BlockKind::SquareLight,
        BlockKind::FactoryLight,
    ];

    /// Parse block kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use led_tetris_types::BlockKind;
    ///
    /// assert_eq!(BlockKind::from_str("downlight"), Some(BlockKind::Downlight));
    /// assert_eq!(BlockKind::from_str("Square-Light"), Some(BlockKind::SquareLight));
    /// assert_eq!(BlockKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "base-led" => Some(BlockKind::BaseLed),
            "downlight" => Some(BlockKind::Downlight),
            "square-light" => Some(BlockKind::SquareLight),
            "factory-light" => Some(BlockKind::FactoryLight),
            _ => None,
        }
    }

    /// Convert to kebab-case string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::BaseLed => "base-led",
            BlockKind::Downlight => "downlight",
            BlockKind::SquareLight => "square-light",
            BlockKind::FactoryLight => "factory-light",
        }
    }
}

/// Display color of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Size class of a block's artwork (width : height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    OneToOne,
    OneToTwo,
    OneToFour,
    OneToEight,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::OneToOne => "1:1",
            AspectRatio::OneToTwo => "1:2",
            AspectRatio::OneToFour => "1:4",
            AspectRatio::OneToEight => "1:8",
        }
    }
}

/// A board coordinate. `y` grows downward; negative rows lie above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// Player commands routed to the falling block
///
/// These never change the game phase; they only move or rotate the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Move block one cell left
    MoveLeft,
    /// Move block one cell right
    MoveRight,
    /// Move block one cell down
    SoftDrop,
    /// Rotate block 90° clockwise (no-op when rotation is disabled)
    Rotate,
}

impl GameCommand {
    /// Parse command from string (for the driver protocol)
    ///
    /// # Examples
    ///
    /// ```
    /// use led_tetris_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("softDrop"), Some(GameCommand::SoftDrop));
    /// assert_eq!(GameCommand::from_str("ROTATE"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotate" => Some(GameCommand::Rotate),
            _ => None,
        }
    }

    /// Convert to camelCase string for the driver protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::Rotate => "rotate",
        }
    }
}

/// Session lifecycle requests from the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Pause,
    Resume,
    Reset,
}

impl ControlCommand {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(ControlCommand::Start),
            "pause" => Some(ControlCommand::Pause),
            "resume" => Some(ControlCommand::Resume),
            "reset" => Some(ControlCommand::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlCommand::Start => "start",
            ControlCommand::Pause => "pause",
            ControlCommand::Resume => "resume",
            ControlCommand::Reset => "reset",
        }
    }
}
