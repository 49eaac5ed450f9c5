use core::fmt;
use serde::{Deserialize, Serialize};

/// A seat at the table, `0..=3`. The engine always occupies seat 0; seats
/// 1, 2, 3 are the three opponents in play order, matching the indexing
/// convention of [`crate::belief::BeliefState::card_probs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat(u8);

impl Seat {
    pub const ENGINE: Seat = Seat(0);
    pub const ALL: [Seat; 4] = [Seat(0), Seat(1), Seat(2), Seat(3)];

    pub const fn new(id: u8) -> Self {
        assert!(id < 4, "seat id must be in 0..=3");
        Seat(id)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 4 { Some(Seat(index as u8)) } else { None }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn id(self) -> u8 {
        self.0
    }

    pub const fn next(self) -> Seat {
        Seat((self.0 + 1) % 4)
    }

    /// Opponent index `0..3` used for [`crate::belief::BeliefState`]'s
    /// per-card probability vectors; `None` for the engine's own seat.
    pub const fn opponent_index(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some((self.0 - 1) as usize)
        }
    }

    pub const fn from_opponent_index(index: usize) -> Option<Self> {
        if index < 3 { Some(Seat((index + 1) as u8)) } else { None }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
