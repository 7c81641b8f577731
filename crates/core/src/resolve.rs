//! Resolve module - line clears and block gravity
//!
//! Resolution runs in passes:
//!
//! 1. Collect every full row, bottom to top, before touching anything.
//! 2. Delete each placed block with at least one cell in a cleared row. Blocks
//!    are never trimmed; a partially cleared block disappears whole.
//! 3. Shift each survivor down by the number of cleared rows below it and
//!    rebuild the occupancy index.
//! 4. Settle survivors under gravity, lowest first, against an incrementally
//!    stamped grid so no block can pass through one already resting below it.
//!
//! If settling completes new rows the pass repeats. All rows cleared by the
//! cascade are reported together so a commit is scored once.

use crate::board::{BlockId, Board};

/// When gravity runs during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityPolicy {
    /// Settle only after at least one row was cleared
    AfterClear,
    /// Settle after every commit, even when nothing was cleared
    #[default]
    AfterEveryCommit,
}

impl GravityPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "after-clear" => Some(GravityPolicy::AfterClear),
            "every-commit" | "after-every-commit" => Some(GravityPolicy::AfterEveryCommit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GravityPolicy::AfterClear => "after-clear",
            GravityPolicy::AfterEveryCommit => "every-commit",
        }
    }
}

/// Outcome of one resolve call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Total rows cleared across all cascade passes
    pub lines_cleared: u32,
    /// Cleared row indices, each pass bottom to top, passes in order
    pub cleared_rows: Vec<usize>,
    /// Blocks deleted because they touched a cleared row
    pub removed_blocks: Vec<BlockId>,
    /// Number of block moves made by gravity
    pub settled_moves: usize,
}

/// Clear full rows and settle the remaining blocks
pub fn resolve(board: &mut Board, gravity: GravityPolicy) -> Resolution {
    let mut out = Resolution::default();
    let mut settled_without_clear = false;

    loop {
        let full = board.full_rows();
        if full.is_empty() {
            if out.lines_cleared == 0
                && !settled_without_clear
                && gravity == GravityPolicy::AfterEveryCommit
            {
                settled_without_clear = true;
                let moved = settle(board);
                out.settled_moves += moved;
                // Blocks that fell may have completed rows.
                if moved > 0 {
                    continue;
                }
            }
            break;
        }

        remove_rows(board, &full, &mut out);
        out.lines_cleared += full.len() as u32;
        out.cleared_rows.extend_from_slice(&full);
        out.settled_moves += settle(board);
    }

    if out.lines_cleared > 0 {
        log::info!(
            "cleared {} line(s), removed {} block(s)",
            out.lines_cleared,
            out.removed_blocks.len()
        );
    }
    debug_assert!(board.is_consistent());
    out
}

/// Delete blocks touching `rows` and shift the survivors down
fn remove_rows(board: &mut Board, rows: &[usize], out: &mut Resolution) {
    for id in board.blocks_touching_rows(rows) {
        board.remove_block(id);
        out.removed_blocks.push(id);
    }

    let shifts: Vec<(BlockId, i8)> = board
        .blocks()
        .map(|b| {
            let bottom = b.bottom();
            let below = rows.iter().filter(|&&r| r as i8 > bottom).count();
            (b.id, below as i8)
        })
        .filter(|&(_, dy)| dy > 0)
        .collect();

    for (id, dy) in shifts {
        if let Some(block) = board.block_mut(id) {
            block.shift_down(dy);
        }
    }

    board.rebuild_occupancy();
}

/// Drop every block as far as it can fall. Returns the number of blocks moved.
pub fn settle(board: &mut Board) -> usize {
    let mut order: Vec<(i8, BlockId)> = board.blocks().map(|b| (b.bottom(), b.id)).collect();
    // Lowest bottom edge first; ties broken by id for determinism.
    order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    board.clear_occupancy();

    let mut moved = 0;
    for (_, id) in order {
        let dy = drop_distance(board, id);
        if dy > 0 {
            if let Some(block) = board.block_mut(id) {
                block.shift_down(dy);
            }
            moved += 1;
        }
        board.stamp(id);
    }
    moved
}

/// How far a block can fall against the currently stamped cells
fn drop_distance(board: &Board, id: BlockId) -> i8 {
    let Some(block) = board.block(id) else {
        return 0;
    };

    let mut dy: i8 = 0;
    loop {
        let fits = block.cells.iter().all(|c| {
            let y = c.y + dy + 1;
            !board.is_out_of_bounds(c.x, y) && !board.is_occupied(c.x, y)
        });
        if !fits {
            break;
        }
        dy += 1;
    }
    dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BlockCells;
    use crate::types::{BlockKind, Pos};

    fn put(board: &mut Board, kind: BlockKind, list: &[(i8, i8)]) -> BlockId {
        let cells: BlockCells = list.iter().map(|&(x, y)| Pos::new(x, y)).collect();
        let anchor = Pos::new(
            list.iter().map(|c| c.0).min().unwrap(),
            list.iter().map(|c| c.1).min().unwrap(),
        );
        board.insert_block(kind, anchor, 0, cells)
    }

    #[test]
    fn test_no_full_rows_is_identity() {
        let mut board = Board::new(4, 4);
        put(&mut board, BlockKind::BaseLed, &[(0, 2), (1, 2), (0, 3), (1, 3)]);
        put(&mut board, BlockKind::SquareLight, &[(0, 1)]);
        let before = board.clone();

        for policy in [GravityPolicy::AfterClear, GravityPolicy::AfterEveryCommit] {
            let out = resolve(&mut board, policy);
            assert_eq!(out.lines_cleared, 0);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_after_clear_policy_leaves_floating_block() {
        let mut board = Board::new(4, 4);
        let floating = put(&mut board, BlockKind::SquareLight, &[(2, 0)]);

        resolve(&mut board, GravityPolicy::AfterClear);
        assert_eq!(board.block(floating).unwrap().cells[0], Pos::new(2, 0));

        resolve(&mut board, GravityPolicy::AfterEveryCommit);
        assert_eq!(board.block(floating).unwrap().cells[0], Pos::new(2, 3));
    }

    #[test]
    fn test_partially_cleared_block_is_deleted_whole() {
        let mut board = Board::new(2, 4);
        // On a two-wide board the base LED completes rows 2 and 3 by itself.
        let base = put(&mut board, BlockKind::BaseLed, &[(0, 2), (1, 2), (0, 3), (1, 3)]);
        put(&mut board, BlockKind::SquareLight, &[(0, 1)]);
        let out = resolve(&mut board, GravityPolicy::AfterClear);

        assert_eq!(out.lines_cleared, 2);
        assert_eq!(out.cleared_rows, vec![3, 2]);
        assert!(out.removed_blocks.contains(&base));
        assert_eq!(board.block_count(), 1);
        // Survivor fell to the floor.
        assert!(board.is_occupied(0, 3));
    }

    #[test]
    fn test_straddling_block_removed_while_others_shift() {
        let mut board = Board::new(3, 5);
        // Row 4 full: three singles.
        put(&mut board, BlockKind::SquareLight, &[(0, 4)]);
        put(&mut board, BlockKind::SquareLight, &[(1, 4)]);
        // Downlight straddles rows 3-4 in column 2.
        let tall = put(&mut board, BlockKind::Downlight, &[(2, 3), (2, 4)]);
        // Single resting on the left at row 3.
        let rest = put(&mut board, BlockKind::SquareLight, &[(0, 3)]);

        let out = resolve(&mut board, GravityPolicy::AfterClear);
        assert_eq!(out.lines_cleared, 1);
        assert!(board.block(tall).is_none());
        assert_eq!(board.block(rest).unwrap().cells[0], Pos::new(0, 4));
        assert_eq!(board.occupied_count(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_gravity_never_passes_through() {
        let mut board = Board::new(3, 6);
        // Bottom row full except nothing: fill row 5 with three singles.
        put(&mut board, BlockKind::SquareLight, &[(0, 5)]);
        put(&mut board, BlockKind::SquareLight, &[(1, 5)]);
        put(&mut board, BlockKind::SquareLight, &[(2, 5)]);
        // Column 1 stack floating above the cleared row.
        let low = put(&mut board, BlockKind::Downlight, &[(1, 2), (1, 3)]);
        let high = put(&mut board, BlockKind::SquareLight, &[(1, 0)]);

        resolve(&mut board, GravityPolicy::AfterClear);

        let low_cells = &board.block(low).unwrap().cells;
        let high_cells = &board.block(high).unwrap().cells;
        assert_eq!(low_cells.as_slice(), &[Pos::new(1, 4), Pos::new(1, 5)]);
        assert_eq!(high_cells.as_slice(), &[Pos::new(1, 3)]);
    }

    #[test]
    fn test_cascade_clears_rows_completed_by_gravity() {
        let mut board = Board::new(2, 3);
        // Row 2 full.
        put(&mut board, BlockKind::SquareLight, &[(0, 2)]);
        put(&mut board, BlockKind::SquareLight, &[(1, 2)]);
        // Two singles at different heights; after the clear they land side by side.
        put(&mut board, BlockKind::SquareLight, &[(0, 1)]);
        put(&mut board, BlockKind::SquareLight, &[(1, 0)]);

        let out = resolve(&mut board, GravityPolicy::AfterClear);
        assert_eq!(out.lines_cleared, 2);
        assert_eq!(board.block_count(), 0);
    }

    #[test]
    fn test_settle_without_clear_rechecks_rows() {
        let mut board = Board::new(2, 3);
        put(&mut board, BlockKind::SquareLight, &[(0, 2)]);
        // Floating single that completes row 2 once it lands.
        put(&mut board, BlockKind::SquareLight, &[(1, 0)]);

        let out = resolve(&mut board, GravityPolicy::AfterEveryCommit);
        assert_eq!(out.lines_cleared, 1);
        assert_eq!(out.cleared_rows, vec![2]);
        assert_eq!(out.settled_moves, 1);
        assert!(board.full_rows().is_empty());
        assert_eq!(board.block_count(), 0);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_gravity_policy_names() {
        assert_eq!(GravityPolicy::from_str("after-clear"), Some(GravityPolicy::AfterClear));
        assert_eq!(GravityPolicy::from_str("EVERY-COMMIT"), Some(GravityPolicy::AfterEveryCommit));
        assert_eq!(GravityPolicy::from_str("never"), None);
        assert_eq!(GravityPolicy::default(), GravityPolicy::AfterEveryCommit);
    }
}
