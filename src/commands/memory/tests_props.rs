//! Property tests for the board state machine (pure game logic, no Discord).
//!
//! Invariants checked after every click:
//! - each face appears on exactly two tiles
//! - matched tiles come in pairs and equal `2 * matched_count`
//! - `won` holds exactly when `matched_count == matched_to_win`
//! - face-up unmatched tiles: at most one while unlocked, exactly two while locked
//! - a click while locked changes nothing

use proptest::prelude::*;
use std::time::Duration;

use super::board::{Board, ClickOutcome, Ignored};
use super::tile::testing::RecordingPresenter;

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

fn faces(pairs: usize) -> Vec<usize> {
    (0..pairs).collect()
}

fn new_board(pairs: usize, seed: u64) -> (Board<usize>, RecordingPresenter) {
    let mut presenter = RecordingPresenter::default();
    let mut board = Board::new(faces(pairs), Duration::from_millis(650), Some(seed))
        .expect("distinct faces");
    board.lay_out(&mut presenter);
    (board, presenter)
}

#[derive(Clone, Debug, PartialEq)]
struct Snapshot {
    tiles: Vec<(u32, usize, bool, bool)>,
    mistakes: u32,
    matched_count: usize,
    won: bool,
    last_revealed: Option<u32>,
}

fn snapshot(board: &Board<usize>) -> Snapshot {
    Snapshot {
        tiles: board
            .tiles()
            .iter()
            .map(|tile| (tile.id, tile.value, tile.revealed, tile.matched))
            .collect(),
        mistakes: board.mistakes(),
        matched_count: board.matched_count(),
        won: board.has_won(),
        last_revealed: board.last_revealed().map(|tile| tile.id),
    }
}

fn sorted_ids(board: &Board<usize>) -> Vec<u32> {
    let mut ids: Vec<u32> = board.tiles().iter().map(|tile| tile.id).collect();
    ids.sort_unstable();
    ids
}

fn check_invariants(board: &Board<usize>) -> Result<(), TestCaseError> {
    let pairs = board.matched_to_win();
    for face in 0..pairs {
        let count = board.tiles().iter().filter(|tile| tile.value == face).count();
        prop_assert_eq!(count, 2, "face {} must sit on exactly two tiles", face);
    }

    let matched = board.tiles().iter().filter(|tile| tile.matched).count();
    prop_assert_eq!(matched, board.matched_count() * 2);
    prop_assert!(board.tiles().iter().filter(|t| t.matched).all(|t| t.revealed));
    prop_assert_eq!(board.has_won(), board.matched_count() == pairs);

    let face_up = board
        .tiles()
        .iter()
        .filter(|tile| tile.revealed && !tile.matched)
        .count();
    if board.is_locked() {
        prop_assert_eq!(face_up, 2);
    } else {
        prop_assert!(face_up <= 1);
        prop_assert_eq!(face_up == 1, board.last_revealed().is_some());
    }
    Ok(())
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property: `create_tiles` deals every face exactly twice.
    #[test]
    fn prop_create_tiles_deals_pairs(pairs in 1usize..=32, seed in any::<u64>()) {
        let (board, _) = new_board(pairs, seed);

        prop_assert_eq!(board.tiles().len(), pairs * 2);
        prop_assert_eq!(board.matched_to_win(), pairs);
        check_invariants(&board)?;
        prop_assert!(board.tiles().iter().all(|tile| !tile.revealed && !tile.matched));
    }

    /// Property: shuffling only permutes, the multiset of tiles is unchanged.
    #[test]
    fn prop_shuffle_is_permutation(pairs in 1usize..=32, seed in any::<u64>()) {
        let (mut board, _) = new_board(pairs, seed);
        let before = sorted_ids(&board);
        let mut values_before: Vec<usize> = board.tiles().iter().map(|t| t.value).collect();

        board.shuffle_tiles();

        let mut values_after: Vec<usize> = board.tiles().iter().map(|t| t.value).collect();
        values_before.sort_unstable();
        values_after.sort_unstable();
        prop_assert_eq!(before, sorted_ids(&board));
        prop_assert_eq!(values_before, values_after);
    }

    /// Property: random play never breaks the board invariants, locked clicks
    /// are no-ops and the counters move by exactly one per decided pair.
    #[test]
    fn prop_random_play_keeps_invariants(
        pairs in 1usize..=10,
        seed in any::<u64>(),
        steps in prop::collection::vec((0u32..24, any::<bool>()), 0..120),
    ) {
        let (mut board, mut presenter) = new_board(pairs, seed);

        for (id, expire) in steps {
            if expire {
                board.expire_lock(&mut presenter);
                check_invariants(&board)?;
                continue;
            }

            let before = snapshot(&board);
            let outcome = board.on_tile_click(id, &mut presenter);
            let after = snapshot(&board);

            match outcome {
                ClickOutcome::Ignored(reason) => {
                    prop_assert_eq!(&before, &after);
                    if before.won {
                        prop_assert_ne!(reason, Ignored::Locked);
                    }
                }
                ClickOutcome::Revealed => {
                    prop_assert_eq!(after.last_revealed, Some(id));
                    prop_assert_eq!(before.mistakes, after.mistakes);
                }
                ClickOutcome::Matched { won } => {
                    prop_assert_eq!(after.matched_count, before.matched_count + 1);
                    prop_assert_eq!(after.mistakes, before.mistakes);
                    prop_assert_eq!(won, after.won);
                    prop_assert!(board.tile(id).is_some_and(|tile| tile.matched));
                }
                ClickOutcome::Mismatch { pair, .. } => {
                    prop_assert_eq!(after.mistakes, before.mistakes + 1);
                    prop_assert_eq!(after.matched_count, before.matched_count);
                    prop_assert_eq!(pair[1], id);
                    prop_assert!(board.is_locked());
                }
            }
            check_invariants(&board)?;
        }
    }

    /// Property: once won, the board stays won until reset.
    #[test]
    fn prop_won_is_sticky_until_reset(
        pairs in 1usize..=8,
        seed in any::<u64>(),
        extra_clicks in prop::collection::vec(0u32..16, 0..20),
    ) {
        let (mut board, mut presenter) = new_board(pairs, seed);
        for face in 0..pairs {
            let ids: Vec<u32> = board
                .tiles()
                .iter()
                .filter(|tile| tile.value == face)
                .map(|tile| tile.id)
                .collect();
            board.on_tile_click(ids[0], &mut presenter);
            board.on_tile_click(ids[1], &mut presenter);
        }
        prop_assert!(board.has_won());
        prop_assert_eq!(board.mistakes(), 0);

        for id in extra_clicks {
            board.on_tile_click(id, &mut presenter);
            prop_assert!(board.has_won());
        }

        board.reset(&mut presenter);
        prop_assert!(!board.has_won());
        prop_assert_eq!(board.matched_count(), 0);
        prop_assert_eq!(board.mistakes(), 0);
        check_invariants(&board)?;
    }
}
