//! Collision module - placement legality and committing blocks
//!
//! [`can_place`] is the single source of truth for "may this shape sit here".
//! Cells above the board (row < 0) are only checked horizontally, which lets a
//! freshly spawned block poke out of the top of the playfield.

use crate::board::{BlockCells, BlockId, Board};
use crate::catalog::Shape;
use crate::game_state::FallingBlock;
use crate::resolve::{resolve, GravityPolicy, Resolution};
use crate::types::Pos;

/// Result of committing a falling block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Id of the new placed block, `None` when every cell was above the board
    pub block_id: Option<BlockId>,
    pub resolution: Resolution,
}

/// Check whether `shape` anchored at (x, y) fits on the board
///
/// Rejects any filled cell with a column outside `[0, width)` or a row at or
/// below the floor, and any in-grid cell that is already occupied. Pure.
pub fn can_place(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    shape.cells().all(|(dx, dy)| {
        let bx = x as i16 + dx as i16;
        let by = y as i16 + dy as i16;

        if bx < 0 || bx >= board.width() as i16 || by >= board.height() as i16 {
            return false;
        }

        by < 0 || !board.is_occupied(bx as i8, by as i8)
    })
}

/// Fix a falling block into the board, then resolve line clears and gravity
///
/// The caller must have validated the position with [`can_place`]. Cells with
/// row < 0 are dropped.
pub fn commit(board: &mut Board, block: &FallingBlock, gravity: GravityPolicy) -> CommitOutcome {
    let shape = block.shape();
    debug_assert!(
        can_place(board, &shape, block.x, block.y),
        "commit of an illegal position {:?}",
        block
    );

    let cells: BlockCells = block
        .cells()
        .filter(|p| p.y >= 0 && !board.is_out_of_bounds(p.x, p.y))
        .collect();

    let block_id = if cells.is_empty() {
        None
    } else {
        Some(board.insert_block(
            block.kind,
            Pos::new(block.x, block.y),
            block.rotation,
            cells,
        ))
    };

    log::debug!(
        "commit {} at ({}, {}) -> {:?}",
        block.kind.as_str(),
        block.x,
        block.y,
        block_id
    );

    let resolution = resolve(board, gravity);
    CommitOutcome {
        block_id,
        resolution,
    }
}
