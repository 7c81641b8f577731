//! Board tests - placement, commits and line-clear resolution

use led_tetris::core::board::BlockCells;
use led_tetris::core::{
    can_place, commit, get_shape, resolve, BlockId, Board, FallingBlock, GravityPolicy,
};
use led_tetris::types::{BlockKind, Pos, BOARD_HEIGHT, BOARD_WIDTH};

fn put(board: &mut Board, kind: BlockKind, list: &[(i8, i8)]) -> BlockId {
    let cells: BlockCells = list.iter().map(|&(x, y)| Pos::new(x, y)).collect();
    let anchor = Pos::new(
        list.iter().map(|c| c.0).min().unwrap(),
        list.iter().map(|c| c.1).min().unwrap(),
    );
    board.insert_block(kind, anchor, 0, cells)
}

fn cells_of(board: &Board, id: BlockId) -> Vec<(i8, i8)> {
    let mut cells: Vec<(i8, i8)> = board
        .block(id)
        .unwrap()
        .cells
        .iter()
        .map(|p| (p.x, p.y))
        .collect();
    cells.sort();
    cells
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.occupied_count(), 0);
    assert_eq!(board.block_count(), 0);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
#[should_panic]
fn test_board_rejects_zero_width() {
    Board::new(0, 20);
}

#[test]
fn test_can_place_walls_and_floor() {
    let board = Board::default();
    let base = get_shape(BlockKind::BaseLed, 0);

    assert!(can_place(&board, &base, 0, 0));
    assert!(can_place(&board, &base, 8, 18));
    assert!(!can_place(&board, &base, -1, 0));
    assert!(!can_place(&board, &base, 9, 0));
    assert!(!can_place(&board, &base, 0, 19));
}

#[test]
fn test_can_place_above_board_skips_occupancy() {
    let mut board = Board::new(4, 4);
    put(&mut board, BlockKind::SquareLight, &[(0, 0)]);
    let factory = get_shape(BlockKind::FactoryLight, 0);

    // Rows -7..=0 in column 0: the only in-grid cell is occupied.
    assert!(!can_place(&board, &factory, 0, -7));
    // Entirely above the board: never checked against the grid.
    assert!(can_place(&board, &factory, 0, -8));
    // Column bounds still apply above the board.
    assert!(!can_place(&board, &factory, 4, -8));
}

#[test]
fn test_can_place_is_pure() {
    let mut board = Board::new(4, 4);
    put(&mut board, BlockKind::BaseLed, &[(0, 2), (1, 2), (0, 3), (1, 3)]);
    let before = board.clone();
    let shape = get_shape(BlockKind::Downlight, 0);

    let first = can_place(&board, &shape, 1, 1);
    let second = can_place(&board, &shape, 1, 1);
    assert_eq!(first, second);
    assert!(!first);
    assert_eq!(board, before);
}

#[test]
fn test_commit_drops_rows_above_board() {
    let mut board = Board::new(4, 4);
    let block = FallingBlock::new(BlockKind::Downlight, 2, -1);

    let outcome = commit(&mut board, &block, GravityPolicy::AfterClear);
    let id = outcome.block_id.unwrap();
    assert_eq!(cells_of(&board, id), vec![(2, 0)]);
    assert_eq!(board.occupied_count(), 1);
    assert!(board.is_consistent());
}

#[test]
fn test_commit_entirely_above_board_creates_nothing() {
    let mut board = Board::new(4, 4);
    let block = FallingBlock::new(BlockKind::Downlight, 0, -2);

    let outcome = commit(&mut board, &block, GravityPolicy::AfterEveryCommit);
    assert_eq!(outcome.block_id, None);
    assert_eq!(board.block_count(), 0);
    assert_eq!(outcome.resolution.lines_cleared, 0);
}

#[test]
fn test_full_rows_are_removed_as_a_batch() {
    // Rows 2 and 3 are both full; a single-row rescan would skip one of them.
    let mut board = Board::new(2, 4);
    put(&mut board, BlockKind::SquareLight, &[(0, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(1, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(0, 2)]);
    put(&mut board, BlockKind::SquareLight, &[(1, 2)]);
    let top = put(&mut board, BlockKind::SquareLight, &[(0, 1)]);

    let res = resolve(&mut board, GravityPolicy::AfterClear);
    assert_eq!(res.lines_cleared, 2);
    assert_eq!(res.cleared_rows, vec![3, 2]);
    assert_eq!(res.removed_blocks.len(), 4);
    assert_eq!(cells_of(&board, top), vec![(0, 3)]);
}

#[test]
fn test_blocks_below_cleared_row_are_unaffected() {
    // Row 2 is full; the square at (2, 3) sits entirely below it.
    let mut board = Board::new(3, 4);
    let under = put(&mut board, BlockKind::SquareLight, &[(2, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(0, 2)]);
    put(&mut board, BlockKind::SquareLight, &[(1, 2)]);
    put(&mut board, BlockKind::SquareLight, &[(2, 2)]);
    let above = put(&mut board, BlockKind::SquareLight, &[(1, 1)]);

    let res = resolve(&mut board, GravityPolicy::AfterClear);
    assert_eq!(res.lines_cleared, 1);
    assert_eq!(cells_of(&board, under), vec![(2, 3)]);
    // Shifted down one row, then gravity drops it onto the floor.
    assert_eq!(cells_of(&board, above), vec![(1, 3)]);
    assert!(board.is_consistent());
}

#[test]
fn test_straddling_block_is_deleted_whole() {
    // A downlight covering rows 2-3 where only row 3 is full.
    let mut board = Board::new(2, 4);
    put(&mut board, BlockKind::Downlight, &[(0, 2), (0, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(1, 3)]);

    let res = resolve(&mut board, GravityPolicy::AfterClear);
    assert_eq!(res.lines_cleared, 1);
    assert_eq!(board.block_count(), 0);
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_gravity_policy_decides_floating_blocks() {
    let mut floating = Board::new(3, 4);
    let id = put(&mut floating, BlockKind::SquareLight, &[(1, 0)]);
    let mut settled = floating.clone();

    let res = resolve(&mut floating, GravityPolicy::AfterClear);
    assert_eq!(res.settled_moves, 0);
    assert_eq!(cells_of(&floating, id), vec![(1, 0)]);

    let res = resolve(&mut settled, GravityPolicy::AfterEveryCommit);
    assert_eq!(res.settled_moves, 1);
    assert_eq!(cells_of(&settled, id), vec![(1, 3)]);
}

#[test]
fn test_gravity_never_passes_through() {
    // Base LED resting on the floor, a downlight hovering above it.
    let mut board = Board::new(3, 6);
    let base = put(&mut board, BlockKind::BaseLed, &[(0, 4), (1, 4), (0, 5), (1, 5)]);
    let down = put(&mut board, BlockKind::Downlight, &[(1, 0), (1, 1)]);

    resolve(&mut board, GravityPolicy::AfterEveryCommit);
    assert_eq!(cells_of(&board, base), vec![(0, 4), (0, 5), (1, 4), (1, 5)]);
    assert_eq!(cells_of(&board, down), vec![(1, 2), (1, 3)]);
}

#[test]
fn test_gravity_cascade_clears_again() {
    // Clearing row 3 lets the square at (2, 0) fall into the gap in row 2,
    // completing it in a second pass.
    let mut board = Board::new(3, 4);
    put(&mut board, BlockKind::SquareLight, &[(0, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(1, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(2, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(0, 2)]);
    put(&mut board, BlockKind::SquareLight, &[(1, 2)]);
    put(&mut board, BlockKind::SquareLight, &[(2, 0)]);

    let res = resolve(&mut board, GravityPolicy::AfterClear);
    assert_eq!(res.lines_cleared, 2);
    assert_eq!(board.block_count(), 0);
}

#[test]
fn test_gravity_without_clear_completes_row() {
    // Nothing is full until the floating downlight lands in column 2.
    let mut board = Board::new(3, 4);
    put(&mut board, BlockKind::SquareLight, &[(0, 3)]);
    put(&mut board, BlockKind::SquareLight, &[(1, 3)]);
    let rest = put(&mut board, BlockKind::SquareLight, &[(0, 2)]);
    let down = put(&mut board, BlockKind::Downlight, &[(2, 0), (2, 1)]);
    let mut untouched = board.clone();

    let res = resolve(&mut board, GravityPolicy::AfterEveryCommit);
    assert_eq!(res.lines_cleared, 1);
    assert_eq!(res.cleared_rows, vec![3]);
    assert!(res.removed_blocks.contains(&down));
    assert_eq!(cells_of(&board, rest), vec![(0, 3)]);
    assert!(board.full_rows().is_empty());
    assert!(board.is_consistent());

    let res = resolve(&mut untouched, GravityPolicy::AfterClear);
    assert_eq!(res.lines_cleared, 0);
    assert_eq!(cells_of(&untouched, down), vec![(2, 0), (2, 1)]);
}
