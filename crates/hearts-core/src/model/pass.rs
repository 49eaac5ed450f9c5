use crate::model::seat::Seat;

/// Pre-round passing direction. Cycles `Left, Right, Across, Hold, ...`
/// across successive rounds; the cycle itself is pure and cheap so it is
/// carried here even though driving a full game is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassingDirection {
    Left,
    Right,
    Across,
    Hold,
}

impl PassingDirection {
    pub const fn requires_selection(self) -> bool {
        !matches!(self, PassingDirection::Hold)
    }

    pub const fn next_in_cycle(self) -> PassingDirection {
        match self {
            PassingDirection::Left => PassingDirection::Right,
            PassingDirection::Right => PassingDirection::Across,
            PassingDirection::Across => PassingDirection::Hold,
            PassingDirection::Hold => PassingDirection::Left,
        }
    }

    /// The seat the engine (always seat 0) passes to: left is `+1`, right
    /// is `+3` (i.e. `-1` mod 4), across is `+2`. `None` for `Hold`.
    pub const fn target_from_engine(self) -> Option<Seat> {
        match self {
            PassingDirection::Left => Some(Seat::new(1)),
            PassingDirection::Right => Some(Seat::new(3)),
            PassingDirection::Across => Some(Seat::new(2)),
            PassingDirection::Hold => None,
        }
    }
}
