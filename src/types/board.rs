use std::fmt::{self, Display};
use std::ops::{Index, Range};

use smallvec::SmallVec;

use super::game_state::{Outcome, PlayerId};

/// Total number of pits on the board: six houses and one store per player.
pub const NUM_PITS: usize = 14;

/// Number of houses each player controls.
pub const HOUSES_PER_SIDE: usize = 6;

/// Index into the board's pit array.
///
/// Layout (counter-clockwise): `0..=5` are player 1's houses, `6` is
/// player 1's store, `7..=12` are player 2's houses, `13` is player 2's
/// store.
pub type PitId = usize;

/// Seed counts for every pit on the board.
///
/// `Board` is pure data: every transition ([`Board::sow`]) returns a new
/// board and leaves the input untouched. Seeds are only ever moved
/// between pits, so the total seed count is invariant under `sow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pits: [u32; NUM_PITS],
}

/// Result of a successful [`Board::sow`]: the updated board and the
/// player to move next (the same player again if the last seed landed in
/// their own store).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sown {
    pub board: Board,
    pub next_player: PlayerId,
}

/// A move rejected by [`Board::sow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SowError {
    #[error("pit {0} is a store and cannot be sown")]
    SowedStore(PitId),
    #[error("pit {0} is not one of {1}'s houses")]
    NotOwnHouse(PitId, PlayerId),
    #[error("pit {0} has no seeds")]
    EmptyHouse(PitId),
}

impl Board {
    /// Sets up a board with `seeds_per_house` seeds in each of the twelve
    /// houses and both stores empty.
    pub fn new(seeds_per_house: u32) -> Self {
        let mut pits = [seeds_per_house; NUM_PITS];
        pits[Self::store(PlayerId::PlayerFirst)] = 0;
        pits[Self::store(PlayerId::PlayerSecond)] = 0;
        Self { pits }
    }

    /// Builds a board directly from pit contents.
    pub fn from_pits(pits: [u32; NUM_PITS]) -> Self {
        Self { pits }
    }

    #[inline]
    pub fn pits(&self) -> &[u32; NUM_PITS] {
        &self.pits
    }

    #[inline]
    pub fn seeds(&self, pit: PitId) -> u32 {
        self.pits[pit]
    }

    /// The store `player` accumulates score in: pit 6 or pit 13.
    #[inline]
    pub const fn store(player: PlayerId) -> PitId {
        (player as PitId + 1) * 7 - 1
    }

    #[inline]
    pub const fn is_store(pit: PitId) -> bool {
        pit % 7 == 6
    }

    /// The houses `player` may sow from.
    #[inline]
    pub const fn houses(player: PlayerId) -> Range<PitId> {
        match player {
            PlayerId::PlayerFirst => 0..HOUSES_PER_SIDE,
            PlayerId::PlayerSecond => HOUSES_PER_SIDE + 1..2 * HOUSES_PER_SIDE + 1,
        }
    }

    #[inline]
    pub fn is_owned_house(pit: PitId, player: PlayerId) -> bool {
        Self::houses(player).contains(&pit)
    }

    /// The house directly across the board from house `pit`.
    /// Not defined for stores.
    #[inline]
    pub fn opposite(pit: PitId) -> PitId {
        debug_assert!(!Self::is_store(pit));
        2 * HOUSES_PER_SIDE - pit
    }

    /// Seeds in `player`'s store.
    #[inline]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.pits[Self::store(player)]
    }

    /// Seeds remaining in `player`'s houses (excluding the store).
    #[inline]
    pub fn house_seeds(&self, player: PlayerId) -> u32 {
        Self::houses(player).map(|pit| self.pits[pit]).sum()
    }

    /// Seeds on `player`'s whole side: houses plus store. At game end the
    /// seeds left in a player's houses are swept to their store, so this
    /// is the player's final score on a terminal board.
    #[inline]
    pub fn side_total(&self, player: PlayerId) -> u32 {
        self.house_seeds(player) + self.score(player)
    }

    #[inline]
    pub fn total_seeds(&self) -> u32 {
        self.pits.iter().sum()
    }

    /// The houses `player` may legally sow from right now, in ascending
    /// pit order.
    pub fn legal_moves(&self, player: PlayerId) -> SmallVec<[PitId; HOUSES_PER_SIDE]> {
        Self::houses(player).filter(|&pit| self.pits[pit] > 0).collect()
    }

    /// The game ends as soon as either player's houses are all empty.
    pub fn is_terminal(&self) -> bool {
        self.house_seeds(PlayerId::PlayerFirst) == 0 || self.house_seeds(PlayerId::PlayerSecond) == 0
    }

    /// Final result of a terminal board, or `None` while the game is
    /// still in progress. Each player is credited with the seeds left in
    /// their own houses.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        let first = self.side_total(PlayerId::PlayerFirst);
        let second = self.side_total(PlayerId::PlayerSecond);
        Some(match first.cmp(&second) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerId::PlayerFirst),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerId::PlayerSecond),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }

    /// Sows all seeds from `pit`, one per pit counter-clockwise, skipping
    /// the origin pit and the opponent's store.
    ///
    /// If the last seed lands alone in one of `player`'s houses and the
    /// opposite house is non-empty, both that seed and the opposite
    /// house's seeds are captured into `player`'s store. If the last seed
    /// lands in `player`'s own store, the same player moves again.
    pub fn sow(&self, pit: PitId, player: PlayerId) -> Result<Sown, SowError> {
        if Self::is_store(pit) {
            return Err(SowError::SowedStore(pit));
        }
        if !Self::is_owned_house(pit, player) {
            return Err(SowError::NotOwnHouse(pit, player));
        }
        let mut seeds = self.pits[pit];
        if seeds == 0 {
            return Err(SowError::EmptyHouse(pit));
        }

        let mut board = *self;
        let skipped_store = Self::store(player.opposite());
        board.pits[pit] = 0;
        let mut cur = pit;
        while seeds > 0 {
            cur = (cur + 1) % NUM_PITS;
            if cur == pit || cur == skipped_store {
                continue;
            }
            board.pits[cur] += 1;
            seeds -= 1;
        }

        board.try_capture(cur, player);
        let next_player = if cur == Self::store(player) {
            player
        } else {
            player.opposite()
        };
        Ok(Sown { board, next_player })
    }

    /// Captures into `player`'s store when the last sown seed landed
    /// alone in one of their houses and the opposite house holds seeds.
    fn try_capture(&mut self, last_pit: PitId, player: PlayerId) {
        if self.pits[last_pit] != 1 || !Self::is_owned_house(last_pit, player) {
            return;
        }
        let opposite = Self::opposite(last_pit);
        if self.pits[opposite] == 0 {
            return;
        }
        let store = Self::store(player);
        self.pits[store] += self.pits[opposite] + self.pits[last_pit];
        self.pits[opposite] = 0;
        self.pits[last_pit] = 0;
    }
}

impl Index<PitId> for Board {
    type Output = u32;

    #[inline]
    fn index(&self, index: PitId) -> &Self::Output {
        &self.pits[index]
    }
}

impl Display for Board {
    /// Two-row rendering mirroring the physical layout: player 2's houses
    /// on top (reversed), stores flanking the rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top: Vec<u32> = Self::houses(PlayerId::PlayerSecond)
            .rev()
            .map(|pit| self.pits[pit])
            .collect();
        let bottom: Vec<u32> = Self::houses(PlayerId::PlayerFirst)
            .map(|pit| self.pits[pit])
            .collect();
        writeln!(f, "-----------------------------------------")?;
        writeln!(f, " {top:?}")?;
        writeln!(
            f,
            "{:<3}{:>18}",
            self.score(PlayerId::PlayerSecond),
            self.score(PlayerId::PlayerFirst)
        )?;
        write!(f, " {bottom:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pit_geometry() {
        assert_eq!(Board::store(PlayerId::PlayerFirst), 6);
        assert_eq!(Board::store(PlayerId::PlayerSecond), 13);
        assert!(Board::is_store(6));
        assert!(Board::is_store(13));
        assert!(!Board::is_store(0));
        assert!(!Board::is_store(12));
        assert_eq!(Board::opposite(0), 12);
        assert_eq!(Board::opposite(5), 7);
        assert_eq!(Board::opposite(9), 3);
        assert!(Board::is_owned_house(0, PlayerId::PlayerFirst));
        assert!(!Board::is_owned_house(6, PlayerId::PlayerFirst));
        assert!(!Board::is_owned_house(7, PlayerId::PlayerFirst));
        assert!(Board::is_owned_house(12, PlayerId::PlayerSecond));
    }

    #[test]
    fn test_setup_fills_houses_only() {
        let board = Board::new(4);
        assert_eq!(
            board.pits(),
            &[4, 4, 4, 4, 4, 4, 0, 4, 4, 4, 4, 4, 4, 0]
        );
        assert_eq!(board.total_seeds(), 48);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_legal_moves_ascending() {
        let board = Board::from_pits([0, 2, 0, 1, 0, 3, 0, 4, 4, 4, 4, 4, 4, 0]);
        assert_eq!(board.legal_moves(PlayerId::PlayerFirst).as_slice(), &[1, 3, 5]);
        assert_eq!(
            board.legal_moves(PlayerId::PlayerSecond).as_slice(),
            &[7, 8, 9, 10, 11, 12]
        );
    }

    #[test]
    fn test_sow_wraps_and_skips_origin_and_opponent_store() {
        let board = Board::from_pits([14, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0]);
        let sown = board.sow(0, PlayerId::PlayerFirst).unwrap();
        // 12 seeds land in pits 1..=12, then pit 13 (opponent store) and
        // the origin are skipped, and the last two land in pits 1 and 2.
        assert_eq!(sown.board.pits(), &[0, 3, 3, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 0]);
        assert_eq!(sown.board.score(PlayerId::PlayerSecond), 0);
        assert_eq!(sown.next_player, PlayerId::PlayerSecond);
        assert_eq!(sown.board.total_seeds(), board.total_seeds());
    }

    #[test]
    fn test_sow_rejects_illegal_moves() {
        let board = Board::new(4);
        assert_eq!(
            board.sow(6, PlayerId::PlayerFirst),
            Err(SowError::SowedStore(6))
        );
        assert_eq!(
            board.sow(13, PlayerId::PlayerFirst),
            Err(SowError::SowedStore(13))
        );
        assert_eq!(
            board.sow(7, PlayerId::PlayerFirst),
            Err(SowError::NotOwnHouse(7, PlayerId::PlayerFirst))
        );
        let empty = Board::from_pits([0, 4, 4, 4, 4, 4, 0, 4, 4, 4, 4, 4, 4, 0]);
        assert_eq!(
            empty.sow(0, PlayerId::PlayerFirst),
            Err(SowError::EmptyHouse(0))
        );
    }

    #[test]
    fn test_display_mirrors_physical_layout() {
        let board = Board::from_pits([1, 2, 3, 4, 5, 6, 9, 7, 8, 9, 10, 11, 12, 20]);
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], " [12, 11, 10, 9, 8, 7]");
        assert!(lines[2].starts_with("20"));
        assert!(lines[2].ends_with('9'));
        assert_eq!(lines[3], " [1, 2, 3, 4, 5, 6]");
    }
}
