//! Protocol module - line-delimited JSON messages between a UI and the engine
//!
//! Every message is one JSON object on one line with a `type` field.
//!
//! UI -> engine:
//!
//! ```text
//! {"type":"command","command":"moveLeft"}
//! {"type":"control","action":"pause"}
//! {"type":"observe"}
//! ```
//!
//! Engine -> UI: `observation` (a full snapshot), `event` (score, level,
//! line clear, phase, game over) and `error`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use led_tetris_core::{GameEvent, GameSnapshot};
use led_tetris_types::{ControlCommand, GameCommand, Pos};

// ============== UI -> Engine Messages ==============

/// Raw inbound message as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum InboundMessage {
    Command { command: String },
    Control { action: String },
    Observe,
}

/// A validated request from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRequest {
    Command(GameCommand),
    Control(ControlCommand),
    Observe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Not JSON, or not one of the known message shapes
    InvalidJson(String),
    UnknownCommand(String),
    UnknownAction(String),
}

impl ProtocolError {
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::InvalidJson(_) => "invalid_json",
            ProtocolError::UnknownCommand(_) => "unknown_command",
            ProtocolError::UnknownAction(_) => "unknown_action",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProtocolError::InvalidJson(_) => {
                "message is not a valid command, control or observe request"
            }
            ProtocolError::UnknownCommand(_) => {
                "command must be one of moveLeft, moveRight, softDrop, rotate"
            }
            ProtocolError::UnknownAction(_) => "action must be one of start, pause, resume, reset",
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidJson(detail)
            | ProtocolError::UnknownCommand(detail)
            | ProtocolError::UnknownAction(detail) => write!(f, "{}: {}", self.message(), detail),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Parse one inbound line
pub fn parse_request(line: &str) -> Result<ClientRequest, ProtocolError> {
    let msg: InboundMessage =
        serde_json::from_str(line).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;

    match msg {
        InboundMessage::Command { command } => GameCommand::from_str(&command)
            .map(ClientRequest::Command)
            .ok_or(ProtocolError::UnknownCommand(command)),
        InboundMessage::Control { action } => ControlCommand::from_str(&action)
            .map(ClientRequest::Control)
            .ok_or(ProtocolError::UnknownAction(action)),
        InboundMessage::Observe => Ok(ClientRequest::Observe),
    }
}

// ============== Engine -> UI Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    Observation(ObservationMessage),
    Event(EventMessage),
    Error(ErrorMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationMessage {
    pub width: u8,
    pub height: u8,
    pub phase: &'static str,
    pub playable: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub blocks_placed: u32,
    pub fall_interval_ms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'static str>,
    pub active: Option<ActiveView>,
    pub blocks: Vec<BlockView>,
    /// `board[y][x]` holds the id of the covering block, or null
    pub board: Vec<Vec<Option<u32>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveView {
    pub kind: &'static str,
    pub x: i8,
    pub y: i8,
    pub rotation: u8,
    pub color: String,
    pub cells: Vec<[i8; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub id: u32,
    pub kind: &'static str,
    pub color: String,
    pub cells: Vec<[i8; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventMessage {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub code: &'static str,
    pub message: String,
}

fn cell_pairs(cells: &[Pos]) -> Vec<[i8; 2]> {
    cells.iter().map(|p| [p.x, p.y]).collect()
}

impl From<&GameSnapshot> for ObservationMessage {
    fn from(snap: &GameSnapshot) -> Self {
        let width = snap.width as usize;
        let board = if width == 0 {
            Vec::new()
        } else {
            snap.grid.chunks(width).map(|row| row.to_vec()).collect()
        };

        Self {
            width: snap.width,
            height: snap.height,
            phase: snap.phase.as_str(),
            playable: snap.playable(),
            score: snap.score,
            level: snap.level,
            lines: snap.lines,
            blocks_placed: snap.blocks_placed,
            fall_interval_ms: snap.fall_interval_ms,
            next: snap.next.map(|kind| kind.as_str()),
            active: snap.active.as_ref().map(|a| ActiveView {
                kind: a.kind.as_str(),
                x: a.x,
                y: a.y,
                rotation: a.rotation,
                color: a.color.to_hex(),
                cells: cell_pairs(&a.cells),
            }),
            blocks: snap
                .blocks
                .iter()
                .map(|b| BlockView {
                    id: b.id,
                    kind: b.kind.as_str(),
                    color: b.color.to_hex(),
                    cells: cell_pairs(&b.cells),
                })
                .collect(),
            board,
        }
    }
}

impl From<GameEvent> for EventMessage {
    fn from(event: GameEvent) -> Self {
        let (event, value, phase) = match event {
            GameEvent::BlockPlaced { id } => ("blockPlaced", id.map(|id| id.0), None),
            GameEvent::LinesCleared { count } => ("linesCleared", Some(count), None),
            GameEvent::ScoreChanged(score) => ("scoreChanged", Some(score), None),
            GameEvent::LevelChanged(level) => ("levelChanged", Some(level), None),
            GameEvent::PhaseChanged(phase) => ("phaseChanged", None, Some(phase.as_str())),
            GameEvent::GameOver => ("gameOver", None, None),
        };
        Self {
            event,
            value,
            phase,
        }
    }
}

impl From<&ProtocolError> for ErrorMessage {
    fn from(err: &ProtocolError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Serialize `msg` as one line and flush it
pub async fn write_message<W>(writer: &mut W, msg: &OutboundMessage) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = serde_json::to_vec(msg)?;
    buf.push(b'\n');
    writer.write_all(&buf).await?;
    writer.flush().await
}
