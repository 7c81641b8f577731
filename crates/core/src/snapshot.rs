use crate::board::PlacedBlock;
use crate::game_state::{FallingBlock, GamePhase};
use crate::types::{BlockKind, Pos, Rgb};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: BlockKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub color: Rgb,
    /// Absolute cells, including any above row 0
    pub cells: Vec<Pos>,
}

impl From<FallingBlock> for ActiveSnapshot {
    fn from(value: FallingBlock) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            color: value.color,
            cells: value.cells().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedSnapshot {
    pub id: u32,
    pub kind: BlockKind,
    pub color: Rgb,
    pub cells: Vec<Pos>,
}

impl From<&PlacedBlock> for PlacedSnapshot {
    fn from(value: &PlacedBlock) -> Self {
        Self {
            id: value.id.0,
            kind: value.kind,
            color: value.color,
            cells: value.cells.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major occupancy; each cell holds the id of the covering block
    pub grid: Vec<Option<u32>>,
    pub blocks: Vec<PlacedSnapshot>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<BlockKind>,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub blocks_placed: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    /// Id of the block covering (x, y), if any
    pub fn cell(&self, x: u8, y: u8) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.grid[y as usize * self.width as usize + x as usize]
    }

    /// Color of the block covering (x, y), if any
    pub fn cell_color(&self, x: u8, y: u8) -> Option<Rgb> {
        let id = self.cell(x, y)?;
        self.blocks.iter().find(|b| b.id == id).map(|b| b.color)
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
