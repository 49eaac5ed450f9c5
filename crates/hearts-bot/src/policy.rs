//! Deterministic, state-only simulation policy. Used both to play out the
//! non-engine seats during rollouts and to play out the engine itself once
//! a candidate card has been fixed.

use hearts_core::model::card::Card;
use hearts_core::model::trick::Trick;

/// Chooses a card from `legal` — the caller's already-computed legal move
/// list — following a fixed priority order: win cheaply when following,
/// probe for voids with the lowest card when leading, dump safely when
/// void. `legal` must be non-empty; `tricks_completed` gates the
/// early-game Queen-of-Spades avoidance when leading.
pub fn choose_card(legal: &[Card], trick: &Trick, tricks_completed: usize) -> Card {
    debug_assert!(!legal.is_empty(), "choose_card requires a non-empty legal set");

    if legal.len() == 1 {
        return legal[0];
    }

    if trick.is_empty() {
        return choose_lead(legal, tricks_completed);
    }

    let led_suit = trick.lead_suit().expect("non-empty trick has a lead suit");
    let same_suit: Vec<Card> = legal.iter().copied().filter(|c| c.suit == led_suit).collect();

    if !same_suit.is_empty() {
        choose_following(&same_suit, trick, led_suit)
    } else {
        choose_void(legal, trick)
    }
}

/// Priority 2: exclude the Queen of Spades before the third trick, then
/// probe for voids with the lowest remaining card.
fn choose_lead(legal: &[Card], tricks_completed: usize) -> Card {
    let mut candidates: Vec<Card> = legal.to_vec();
    if tricks_completed < 3 {
        let without_queen: Vec<Card> = candidates
            .iter()
            .copied()
            .filter(|c| !c.is_queen_of_spades())
            .collect();
        if !without_queen.is_empty() {
            candidates = without_queen;
        }
    }
    *candidates.iter().min_by_key(|c| c.rank).expect("non-empty candidates")
}

/// Priority 3: win as cheaply as possible, or dump the highest card of the
/// led suit if we can't win.
fn choose_following(same_suit: &[Card], trick: &Trick, led_suit: hearts_core::model::suit::Suit) -> Card {
    let highest_in_trick = trick
        .plays()
        .iter()
        .filter(|p| p.card.suit == led_suit)
        .map(|p| p.card.rank)
        .max()
        .expect("led suit was played at least once");

    let winning: Vec<Card> = same_suit
        .iter()
        .copied()
        .filter(|c| c.rank > highest_in_trick)
        .collect();

    if !winning.is_empty() {
        *winning.iter().min_by_key(|c| c.rank).unwrap()
    } else {
        *same_suit.iter().max_by_key(|c| c.rank).unwrap()
    }
}

/// Priority 4: void in the led suit. Avoid feeding the Queen of Spades
/// into a trick that already carries points when a safer discard exists;
/// otherwise dump the highest card we can spare.
fn choose_void(legal: &[Card], trick: &Trick) -> Card {
    let points_in_trick = trick.points();
    let holds_queen = legal.iter().any(|c| c.is_queen_of_spades());

    if points_in_trick > 0 && holds_queen {
        let non_point: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|c| !c.suit.is_heart() && !c.is_queen_of_spades())
            .collect();
        if !non_point.is_empty() {
            return *non_point.iter().max_by_key(|c| c.rank).unwrap();
        }
    }

    let safe: Vec<Card> = legal.iter().copied().filter(|c| !c.is_queen_of_spades()).collect();
    if !safe.is_empty() {
        *safe.iter().max_by_key(|c| c.rank).unwrap()
    } else {
        *legal.iter().max_by_key(|c| c.rank).unwrap()
    }
}
