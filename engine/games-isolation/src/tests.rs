use super::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn cell(col: i32, row: i32) -> Cell {
    Cell::at(col, row).unwrap()
}

#[test]
fn test_initial_state() {
    let state = Isolation::new();
    assert_eq!(state.ply_count(), 0);
    assert_eq!(state.player(), PlayerId::FIRST);
    assert_eq!(state.locs(), [None, None]);
    assert_eq!(state.open_count(), BOARD_SIZE as u32);
    assert!(!state.terminal_test());
    assert_eq!(state.utility(PlayerId::FIRST), 0.0);
}

#[test]
fn test_placement_moves_cover_every_open_cell() {
    let state = Isolation::new();
    let actions = state.actions();
    assert_eq!(actions.len(), BOARD_SIZE);
    assert_eq!(actions[0], Cell(0));
    assert_eq!(actions[BOARD_SIZE - 1], Cell(98));

    // Second player may land anywhere except the occupied square
    let after = state.result(&cell(5, 4));
    let actions = after.actions();
    assert_eq!(actions.len(), BOARD_SIZE - 1);
    assert!(!actions.contains(&cell(5, 4)));
}

#[test]
fn test_cell_coordinates() {
    let c = cell(3, 2);
    assert_eq!(c, Cell(25));
    assert_eq!(c.col(), 3);
    assert_eq!(c.row(), 2);
    assert!(Cell::at(-1, 0).is_none());
    assert!(Cell::at(WIDTH as i32, 0).is_none());
    assert!(Cell::at(0, HEIGHT as i32).is_none());
}

#[test]
fn test_knight_moves_after_placement() {
    let state = Isolation::new()
        .result(&cell(5, 4)) // P1 in the centre
        .result(&cell(0, 0)); // P2 in the corner

    assert_eq!(state.player(), PlayerId::FIRST);
    let moves = state.actions();
    assert_eq!(moves.len(), 8);
    for m in &moves {
        let dc = (m.col() - 5).abs();
        let dr = (m.row() - 4).abs();
        assert!((dc, dr) == (1, 2) || (dc, dr) == (2, 1), "{m:?} is not a knight jump");
    }
}

#[test]
fn test_corner_mobility() {
    let state = Isolation::new()
        .result(&cell(5, 4))
        .result(&cell(0, 0));
    // Corner knight reaches only two squares
    assert_eq!(state.mobility(PlayerId::SECOND), 2);
    assert_eq!(state.mobility(PlayerId::FIRST), 8);
    assert_eq!(state.location(PlayerId::SECOND), Some(cell(0, 0)));
}

#[test]
fn test_visited_cells_stay_blocked() {
    let start = cell(5, 4);
    let state = Isolation::new()
        .result(&start)
        .result(&cell(0, 0))
        .result(&cell(6, 6)) // P1 jumps away
        .result(&cell(1, 2)); // P2 jumps away

    assert!(!state.is_open(start));
    assert!(!state.is_open(cell(0, 0)));
    assert!(!state.actions().contains(&start));
    assert_eq!(state.open_count(), BOARD_SIZE as u32 - 4);
}

#[test]
fn test_result_does_not_mutate_receiver() {
    let state = Isolation::new();
    let before = state.clone();
    let _ = state.result(&cell(2, 2));
    assert_eq!(state, before);
}

#[test]
fn test_trapped_player_loses() {
    // P1 in the corner with both knight squares blocked
    let blocked = [cell(1, 2), cell(2, 1)];
    let state = Isolation::with_blocked(&blocked)
        .result(&cell(0, 0))
        .result(&cell(10, 8));

    assert_eq!(state.player(), PlayerId::FIRST);
    assert!(state.terminal_test());
    assert!(state.actions().is_empty());
    assert_eq!(state.utility(PlayerId::FIRST), -1.0);
    assert_eq!(state.utility(PlayerId::SECOND), 1.0);
}

#[test]
fn test_with_blocked() {
    let state = Isolation::with_blocked(&[cell(0, 0), cell(10, 8)]);
    assert!(!state.is_open(cell(0, 0)));
    assert!(!state.is_open(cell(10, 8)));
    assert_eq!(state.actions().len(), BOARD_SIZE - 2);
}

#[test]
fn test_random_games_terminate() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for _ in 0..20 {
        let mut state = Isolation::new();
        let mut previous = state.player();
        while !state.terminal_test() {
            let action = *state.actions().choose(&mut rng).unwrap();
            state = state.result(&action);
            assert_eq!(state.player(), previous.opponent());
            previous = state.player();
        }

        assert!(state.ply_count() >= 2);
        let loser = state.player();
        assert_eq!(state.utility(loser), -1.0);
        assert_eq!(state.utility(loser.opponent()), 1.0);
    }
}

#[test]
fn test_display() {
    let state = Isolation::with_blocked(&[cell(1, 0)])
        .result(&cell(0, 0))
        .result(&cell(2, 0));
    let text = state.to_string();
    let first_row = text.lines().next().unwrap();
    assert!(first_row.starts_with("1 # 2 ."));
    assert_eq!(text.lines().count(), HEIGHT);
}
