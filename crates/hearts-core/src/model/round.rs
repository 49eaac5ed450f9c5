use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::seat::Seat;
use crate::model::trick::Trick;

/// Per-round game state: each seat's remaining hand, completed tricks in
/// order, the in-progress trick, and whether hearts have been broken.
/// Deliberately dumb — it records state, it does not enforce legality;
/// that's `rules::legal_moves`'s job, consulted by every caller before
/// mutating this struct.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [CardSet; 4],
    trick_history: Vec<Trick>,
    current_trick: Trick,
    hearts_broken: bool,
}

impl RoundState {
    pub fn new(hands: [CardSet; 4], leader: Seat) -> Self {
        Self {
            hands,
            trick_history: Vec::with_capacity(13),
            current_trick: Trick::new(leader),
            hearts_broken: false,
        }
    }

    pub fn hand(&self, seat: Seat) -> CardSet {
        self.hands[seat.index()]
    }

    pub fn hand_mut(&mut self, seat: Seat) -> &mut CardSet {
        &mut self.hands[seat.index()]
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn set_hearts_broken(&mut self, broken: bool) {
        self.hearts_broken = broken;
    }

    pub fn is_first_trick(&self) -> bool {
        self.trick_history.is_empty()
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    /// Plays `card` for `seat` into the current trick, marking hearts
    /// broken when appropriate. Does not check legality or turn order.
    pub fn play_into_current_trick(&mut self, seat: Seat, card: Card) {
        if card.suit.is_heart() {
            self.hearts_broken = true;
        }
        if self.current_trick.is_empty() {
            self.current_trick = Trick::new(seat);
        }
        self.current_trick.push(seat, card);
    }

    /// Closes out the current trick (which must be complete) and opens a
    /// fresh one led by its winner.
    pub fn complete_current_trick(&mut self) -> Seat {
        debug_assert!(self.current_trick.is_complete());
        let winner = self
            .current_trick
            .winner()
            .expect("complete trick has a winner");
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        self.trick_history.push(finished);
        winner
    }

    /// All tricks played so far, including the current one if complete.
    pub fn all_tricks(&self) -> Vec<&Trick> {
        let mut tricks: Vec<&Trick> = self.trick_history.iter().collect();
        if self.current_trick.is_complete() {
            tricks.push(&self.current_trick);
        }
        tricks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn empty_round() -> RoundState {
        RoundState::new(
            [CardSet::EMPTY, CardSet::EMPTY, CardSet::EMPTY, CardSet::EMPTY],
            Seat::new(0),
        )
    }

    #[test]
    fn playing_a_heart_breaks_hearts() {
        let mut round = empty_round();
        round.play_into_current_trick(Seat::new(0), Card::new(Rank::Two, Suit::Hearts));
        assert!(round.hearts_broken());
    }

    #[test]
    fn completing_a_trick_moves_it_to_history_and_sets_new_leader() {
        let mut round = empty_round();
        round.play_into_current_trick(Seat::new(0), Card::TWO_OF_CLUBS);
        round.play_into_current_trick(Seat::new(1), Card::new(Rank::King, Suit::Clubs));
        round.play_into_current_trick(Seat::new(2), Card::new(Rank::Four, Suit::Clubs));
        round.play_into_current_trick(Seat::new(3), Card::new(Rank::Five, Suit::Clubs));

        let winner = round.complete_current_trick();
        assert_eq!(winner, Seat::new(1));
        assert_eq!(round.trick_history().len(), 1);
        assert_eq!(round.current_trick().leader(), Seat::new(1));
    }

    #[test]
    fn is_first_trick_until_one_is_completed() {
        let mut round = empty_round();
        assert!(round.is_first_trick());
        round.play_into_current_trick(Seat::new(0), Card::TWO_OF_CLUBS);
        round.play_into_current_trick(Seat::new(1), Card::new(Rank::King, Suit::Clubs));
        round.play_into_current_trick(Seat::new(2), Card::new(Rank::Four, Suit::Clubs));
        round.play_into_current_trick(Seat::new(3), Card::new(Rank::Five, Suit::Clubs));
        assert!(round.is_first_trick());
        round.complete_current_trick();
        assert!(!round.is_first_trick());
    }
}
