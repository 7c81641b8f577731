//! Board module - object-based playfield
//!
//! The board owns every committed block as a [`PlacedBlock`] record in an arena
//! keyed by [`BlockId`], plus an occupancy index mapping each cell to the id of
//! the block covering it. The two structures must always agree: a cell is
//! occupied if and only if exactly one placed block lists that coordinate.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Row 0 is the top visible row; negative rows lie above the board and are
//! never stored.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::catalog::lookup;
use crate::types::{BlockKind, Pos, Rgb, MAX_BLOCK_CELLS, MAX_BOARD_SIDE};

/// Cell list of a placed block
pub type BlockCells = ArrayVec<Pos, MAX_BLOCK_CELLS>;

/// Identifier of a placed block (never reused within one board's lifetime)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// A committed block tracked as a first-class record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Top-left anchor of the block's bounding box at commit time, shifted with the block
    pub anchor: Pos,
    pub rotation: u8,
    pub color: Rgb,
    /// Absolute in-grid cells this block occupies
    pub cells: BlockCells,
}

impl PlacedBlock {
    /// Lowest (largest y) row covered by this block
    pub fn bottom(&self) -> i8 {
        self.cells.iter().map(|p| p.y).max().unwrap_or(self.anchor.y)
    }

    /// Move the block down by `dy` rows
    pub(crate) fn shift_down(&mut self, dy: i8) {
        self.anchor.y += dy;
        for cell in &mut self.cells {
            cell.y += dy;
        }
    }
}

/// The playfield: occupancy index plus placed-block arena
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Row-major occupancy (y * width + x)
    cells: Vec<Option<BlockId>>,
    blocks: BTreeMap<BlockId, PlacedBlock>,
    next_id: u32,
}

impl Board {
    /// Create a new empty board
    ///
    /// Panics if either side is 0 or larger than [`MAX_BOARD_SIDE`]; configs
    /// are validated before a board is built.
    pub fn new(width: u8, height: u8) -> Self {
        assert!(
            (1..=MAX_BOARD_SIDE).contains(&width) && (1..=MAX_BOARD_SIDE).contains(&height),
            "board dimensions out of range: {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            blocks: BTreeMap::new(),
            next_id: 0,
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Option<BlockId>> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x as i16 >= self.width as i16 || y < 0 || y as i16 >= self.height as i16
    }

    /// One row of the occupancy index
    fn row(&self, y: usize) -> &[Option<BlockId>] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, bottom to top
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn block(&self, id: BlockId) -> Option<&PlacedBlock> {
        self.blocks.get(&id)
    }

    /// Placed blocks in ascending id order
    pub fn blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.blocks.values()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Record a new block and stamp its cells into the occupancy index
    ///
    /// Panics if `cells` is empty, or if any cell is out of bounds or already
    /// occupied.
    pub fn insert_block(
        &mut self,
        kind: BlockKind,
        anchor: Pos,
        rotation: u8,
        cells: BlockCells,
    ) -> BlockId {
        assert!(!cells.is_empty(), "placed block needs at least one cell");
        for cell in &cells {
            assert!(!self.is_out_of_bounds(cell.x, cell.y), "cell out of bounds: {:?}", cell);
            assert!(!self.is_occupied(cell.x, cell.y), "cell already occupied: {:?}", cell);
        }

        let id = BlockId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.blocks.insert(
            id,
            PlacedBlock {
                id,
                kind,
                anchor,
                rotation,
                color: lookup(kind).color,
                cells,
            },
        );
        self.stamp(id);
        id
    }

    /// Remove a block and free its cells
    pub fn remove_block(&mut self, id: BlockId) -> Option<PlacedBlock> {
        let block = self.blocks.remove(&id)?;
        for cell in &block.cells {
            if let Some(idx) = self.index(cell.x, cell.y) {
                if self.cells[idx] == Some(id) {
                    self.cells[idx] = None;
                }
            }
        }
        Some(block)
    }

    /// Write a block's cells into the occupancy index
    pub(crate) fn stamp(&mut self, id: BlockId) {
        let Some(block) = self.blocks.get(&id) else {
            return;
        };
        for cell in &block.cells {
            let idx = self.index(cell.x, cell.y);
            debug_assert!(idx.is_some(), "block {:?} cell out of bounds: {:?}", id, cell);
            if let Some(idx) = idx {
                debug_assert!(self.cells[idx].is_none(), "cell {:?} already occupied", cell);
                self.cells[idx] = Some(id);
            }
        }
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> Option<&mut PlacedBlock> {
        self.blocks.get_mut(&id)
    }

    /// Ids of blocks with at least one cell in any of `rows`
    pub(crate) fn blocks_touching_rows(&self, rows: &[usize]) -> Vec<BlockId> {
        self.blocks
            .values()
            .filter(|b| b.cells.iter().any(|c| rows.contains(&(c.y as usize))))
            .map(|b| b.id)
            .collect()
    }

    /// Empty the occupancy index without touching the block arena
    pub(crate) fn clear_occupancy(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Rebuild the occupancy index from scratch out of the block arena
    pub fn rebuild_occupancy(&mut self) {
        self.clear_occupancy();
        let ids: Vec<BlockId> = self.blocks.keys().copied().collect();
        for id in ids {
            self.stamp(id);
        }
    }

    /// Check that the occupancy index and the block cell lists agree
    pub fn is_consistent(&self) -> bool {
        let listed: usize = self.blocks.values().map(|b| b.cells.len()).sum();
        if listed != self.occupied_count() {
            return false;
        }
        self.blocks.values().all(|b| {
            b.cells
                .iter()
                .all(|c| self.get(c.x, c.y) == Some(Some(b.id)))
        })
    }

    /// Remove every block
    pub fn clear(&mut self) {
        self.clear_occupancy();
        self.blocks.clear();
    }

    /// Copy the occupancy index into `out` as raw ids, row-major
    pub fn write_id_grid(&self, out: &mut Vec<Option<u32>>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| cell.map(|id| id.0)));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}
