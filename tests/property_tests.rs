//! Property tests for board and game invariants
//!
//! Random games are played on small boards with generated seeds and command
//! streams. After every engine call:
//! - the occupancy index agrees with the placed-block cell lists
//! - no two placed blocks share a cell
//! - with gravity after every commit, every placed block rests on the floor
//!   or on another block
//! - `can_place` answers the same twice and leaves the board untouched

use std::collections::HashSet;

use proptest::prelude::*;

use led_tetris::core::{
    can_place, get_shape, resolve, Board, Game, GameConfig, GravityPolicy, RandomBlockSource,
    RotationPolicy,
};
use led_tetris::types::{BlockKind, GameCommand};

#[derive(Debug, Clone, Copy)]
enum Input {
    Command(GameCommand),
    Step,
}

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        Just(Input::Command(GameCommand::MoveLeft)),
        Just(Input::Command(GameCommand::MoveRight)),
        Just(Input::Command(GameCommand::SoftDrop)),
        Just(Input::Command(GameCommand::Rotate)),
        Just(Input::Step),
        Just(Input::Step),
    ]
}

fn assert_cells_disjoint(board: &Board) {
    let mut seen = HashSet::new();
    for block in board.blocks() {
        for cell in &block.cells {
            assert!(seen.insert(*cell), "cell {:?} claimed twice", cell);
        }
    }
}

fn assert_all_resting(board: &Board) {
    for block in board.blocks() {
        let resting = block.cells.iter().any(|c| {
            let below = c.y + 1;
            below as i16 >= board.height() as i16
                || matches!(board.get(c.x, below), Some(Some(id)) if id != block.id)
        });
        assert!(resting, "block {:?} is floating", block.id);
    }
}

fn play(seed: u32, width: u8, height: u8, rotation: bool, inputs: &[Input]) -> Game {
    let config = GameConfig {
        width,
        height,
        seed,
        rotation: if rotation {
            RotationPolicy::Enabled
        } else {
            RotationPolicy::Disabled
        },
        gravity: GravityPolicy::AfterEveryCommit,
    };
    let mut game = Game::new(config, RandomBlockSource::new(seed));
    game.start_game();

    for input in inputs {
        match *input {
            Input::Command(command) => {
                game.handle_command(command);
            }
            Input::Step => {
                game.step();
            }
        }

        let board = game.board();
        let listed: usize = board.blocks().map(|b| b.cells.len()).sum();
        assert_eq!(board.occupied_count(), listed);
        assert!(board.is_consistent());
        assert_cells_disjoint(board);
        assert_all_resting(board);
    }
    game
}

proptest! {
    #[test]
    fn random_play_keeps_board_invariants(
        seed in any::<u32>(),
        width in 1u8..=8,
        height in 1u8..=12,
        rotation in any::<bool>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let game = play(seed, width, height, rotation, &inputs);
        prop_assert!(game.score() % 100 == 0);
        prop_assert!(game.level() >= 1);
    }

    #[test]
    fn can_place_is_pure(
        seed in any::<u32>(),
        inputs in prop::collection::vec(input_strategy(), 1..200),
        kind_idx in 0usize..4,
        rotation in 0u8..4,
        x in -10i8..20,
        y in -10i8..30,
    ) {
        let game = play(seed, 6, 10, true, &inputs);
        let board = game.board().clone();
        let shape = get_shape(BlockKind::ALL[kind_idx], rotation);

        let first = can_place(&board, &shape, x, y);
        let second = can_place(&board, &shape, x, y);
        prop_assert_eq!(first, second);
        prop_assert_eq!(&board, game.board());
    }

    #[test]
    fn resolve_without_full_rows_is_identity(
        seed in any::<u32>(),
        inputs in prop::collection::vec(input_strategy(), 1..200),
    ) {
        let game = play(seed, 6, 10, false, &inputs);
        let mut board = game.board().clone();
        prop_assume!(board.full_rows().is_empty());

        let before = board.clone();
        let res = resolve(&mut board, GravityPolicy::AfterClear);
        prop_assert_eq!(res.lines_cleared, 0);
        prop_assert_eq!(board, before);
    }
}
