//! Pure rules primitives: legality, trick resolution, round scoring.
//! No module here owns any mutable state.

use crate::error::EngineError;
use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

/// Legal cards to play from `hand` given the current `trick`, in ascending
/// `(rank, suit)` order.
///
/// Returns [`EngineError::IllFormedInput`] only for the one case that is a
/// programmer error: being asked to lead the first trick from a hand that
/// doesn't hold the Two of Clubs.
pub fn legal_moves(
    hand: CardSet,
    trick: &Trick,
    hearts_broken: bool,
    is_first_trick: bool,
) -> Result<Vec<Card>, EngineError> {
    if trick.is_empty() {
        if is_first_trick {
            return if hand.contains(Card::TWO_OF_CLUBS) {
                Ok(vec![Card::TWO_OF_CLUBS])
            } else {
                Err(EngineError::IllFormedInput(
                    "first-trick lead requires the Two of Clubs in hand".to_string(),
                ))
            };
        }

        let can_lead_hearts = hearts_broken || hand.is_all_hearts();
        let candidates: Vec<Card> = hand
            .iter()
            .filter(|c| can_lead_hearts || !c.suit.is_heart())
            .collect();
        return Ok(candidates);
    }

    let led_suit = trick
        .lead_suit()
        .expect("non-empty trick always has a lead suit");

    let mut candidates: Vec<Card> = if hand.has_suit(led_suit) {
        hand.iter().filter(|c| c.suit == led_suit).collect()
    } else {
        hand.iter().collect()
    };

    if is_first_trick {
        candidates.retain(|c| !c.suit.is_heart() && !c.is_queen_of_spades());
    }

    Ok(candidates)
}

/// Seat that won `trick`. Errs on an empty trick.
pub fn trick_winner(trick: &Trick) -> Result<Seat, EngineError> {
    trick
        .winner()
        .ok_or_else(|| EngineError::IllFormedInput("cannot determine winner of an empty trick".to_string()))
}

/// Hearts plus a 13-point Queen of Spades penalty.
pub fn trick_points(trick: &Trick) -> u8 {
    trick.points()
}

/// Cumulative penalty per seat across `tricks`, with the shoot-the-moon
/// rewrite applied: if exactly one seat's total is 26, that seat scores 0
/// and every other seat scores 26. Every seat in `0..=3` appears in the
/// result, defaulting to 0.
pub fn round_score(tricks: &[Trick]) -> [u32; 4] {
    let mut totals = [0u32; 4];
    for trick in tricks {
        if let Ok(winner) = trick_winner(trick) {
            totals[winner.index()] += trick_points(trick) as u32;
        }
    }

    let shooter = Seat::ALL
        .iter()
        .copied()
        .find(|&seat| totals[seat.index()] == 26);

    if let Some(shooter) = shooter {
        let mut rewritten = [26u32; 4];
        rewritten[shooter.index()] = 0;
        return rewritten;
    }

    totals
}
