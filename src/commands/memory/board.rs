use super::tile::{Tile, TilePresenter};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("a board needs at least one pair of faces")]
    NoFaces,
    #[error("faces #{first} and #{second} are equal, every pair needs its own face")]
    DuplicateFace { first: usize, second: usize },
}

/// Why a click left the board untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
    Locked,
    AlreadyMatched,
    SameTile,
    UnknownTile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Revealed,
    Matched { won: bool },
    Mismatch { pair: [u32; 2], unlock_at: Instant },
    Ignored(Ignored),
}

struct PendingHide {
    pair: [usize; 2],
    unlock_at: Instant,
}

/// Tile set plus the reveal/match state machine of one game.
///
/// Input is locked exactly while a hide is pending: after a mismatch both
/// tiles stay face up until [`Board::expire_lock`] runs, which the host calls
/// once [`Board::unlock_at`] has passed.
pub struct Board<V> {
    faces: Vec<V>,
    tiles: Vec<Tile<V>>,
    last_revealed: Option<usize>,
    pending_hide: Option<PendingHide>,
    mistakes: u32,
    matched_count: usize,
    matched_to_win: usize,
    won: bool,
    mismatch_delay: Duration,
    rng: StdRng,
}

impl<V: Clone + PartialEq> Board<V> {
    /// Builds an empty board for the given pair faces. Tiles are created on
    /// the first [`Board::lay_out`]. A `seed` makes every shuffle reproducible.
    pub fn new(
        faces: Vec<V>,
        mismatch_delay: Duration,
        seed: Option<u64>,
    ) -> Result<Self, BoardError> {
        if faces.is_empty() {
            return Err(BoardError::NoFaces);
        }
        for (first, face) in faces.iter().enumerate() {
            if let Some(offset) = faces[first + 1..].iter().position(|other| other == face) {
                return Err(BoardError::DuplicateFace {
                    first,
                    second: first + 1 + offset,
                });
            }
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            matched_to_win: faces.len(),
            faces,
            tiles: Vec::new(),
            last_revealed: None,
            pending_hide: None,
            mistakes: 0,
            matched_count: 0,
            won: false,
            mismatch_delay,
            rng,
        })
    }

    /// Replaces the tile set with two tiles per face, then shuffles it.
    /// Pair partners get the ids `i` and `i + pairs`.
    pub fn create_tiles(&mut self) {
        let pairs = self.faces.len() as u32;
        self.tiles = self
            .faces
            .iter()
            .zip(0..)
            .flat_map(|(face, id)| {
                [
                    Tile::new(id, face.clone()),
                    Tile::new(id + pairs, face.clone()),
                ]
            })
            .collect();
        self.shuffle_tiles();
    }

    /// Uniform Fisher-Yates permutation of the current tiles.
    pub fn shuffle_tiles(&mut self) {
        self.tiles.shuffle(&mut self.rng);
    }

    /// Creates the tiles if there are none yet and hands them to the presenter.
    pub fn lay_out<P: TilePresenter<V> + ?Sized>(&mut self, presenter: &mut P) {
        if self.tiles.is_empty() {
            self.create_tiles();
        }
        presenter.lay_out(&self.tiles);
    }

    pub fn on_tile_click<P: TilePresenter<V> + ?Sized>(
        &mut self,
        id: u32,
        presenter: &mut P,
    ) -> ClickOutcome {
        if self.pending_hide.is_some() {
            return ClickOutcome::Ignored(Ignored::Locked);
        }
        let Some(index) = self.position(id) else {
            return ClickOutcome::Ignored(Ignored::UnknownTile);
        };
        if self.tiles[index].matched {
            return ClickOutcome::Ignored(Ignored::AlreadyMatched);
        }

        let first = match self.last_revealed {
            None => {
                self.last_revealed = Some(index);
                self.tiles[index].reveal(presenter);
                return ClickOutcome::Revealed;
            }
            Some(first) if first == index => return ClickOutcome::Ignored(Ignored::SameTile),
            Some(first) => first,
        };

        self.tiles[index].reveal(presenter);

        if self.tiles[first].value == self.tiles[index].value {
            self.tiles[first].set_matched(true, presenter);
            self.tiles[index].set_matched(true, presenter);
            self.last_revealed = None;
            self.matched_count += 1;
            if self.matched_count == self.matched_to_win {
                self.won = true;
            }
            ClickOutcome::Matched { won: self.won }
        } else {
            self.mistakes += 1;
            let unlock_at = Instant::now() + self.mismatch_delay;
            self.pending_hide = Some(PendingHide {
                pair: [first, index],
                unlock_at,
            });
            ClickOutcome::Mismatch {
                pair: [self.tiles[first].id, id],
                unlock_at,
            }
        }
    }

    /// Fires the pending hide: flips the mismatched pair back down and
    /// unlocks input. Returns `false` when nothing was pending.
    pub fn expire_lock<P: TilePresenter<V> + ?Sized>(&mut self, presenter: &mut P) -> bool {
        let Some(PendingHide { pair, .. }) = self.pending_hide.take() else {
            return false;
        };
        for index in pair {
            self.tiles[index].reveal(presenter);
        }
        self.last_revealed = None;
        true
    }

    /// Throws the tiles away and starts over with a fresh shuffle. A pending
    /// hide is cancelled.
    pub fn reset<P: TilePresenter<V> + ?Sized>(&mut self, presenter: &mut P) {
        self.tiles.clear();
        self.create_tiles();
        self.pending_hide = None;
        self.last_revealed = None;
        self.won = false;
        self.mistakes = 0;
        self.matched_count = 0;
        self.matched_to_win = self.faces.len();
        presenter.lay_out(&self.tiles);
    }

    pub fn tiles(&self) -> &[Tile<V>] {
        &self.tiles
    }

    pub fn tile(&self, id: u32) -> Option<&Tile<V>> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn last_revealed(&self) -> Option<&Tile<V>> {
        self.last_revealed.map(|index| &self.tiles[index])
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn matched_to_win(&self) -> usize {
        self.matched_to_win
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn is_locked(&self) -> bool {
        self.pending_hide.is_some()
    }

    pub fn unlock_at(&self) -> Option<Instant> {
        self.pending_hide.as_ref().map(|pending| pending.unlock_at)
    }

    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id == id)
    }
}

#[cfg(test)]
pub(crate) fn ids_of<V: PartialEq>(board: &Board<V>, value: &V) -> [u32; 2] {
    let ids: Vec<u32> = board
        .tiles
        .iter()
        .filter(|tile| &tile.value == value)
        .map(|tile| tile.id)
        .collect();
    [ids[0], ids[1]]
}
