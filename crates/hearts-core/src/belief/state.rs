//! Belief state over hidden card placement, and the closed `Observation`
//! family that updates it.

use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use std::collections::{HashMap, HashSet};

/// Per-card distribution over the three opponents, indexed `[P(player 1),
/// P(player 2), P(player 3)]`. The engine's own seat is never a
/// key of `card_probs` — once the belief is constructed, every card in the
/// engine's hand is simply known, not tracked probabilistically.
#[derive(Debug, Clone)]
pub struct BeliefState {
    card_probs: HashMap<Card, [f32; 3]>,
    voids: HashSet<(Seat, Suit)>,
    passed_to: HashMap<Seat, HashSet<Card>>,
}

const EPSILON: f32 = 1e-9;

impl BeliefState {
    /// Seeds a uniform belief over every card not in `engine_hand`, then
    /// collapses the cards the engine itself passed away to certainty.
    /// Constructed once per round, right after the passing phase resolves.
    pub fn initialize(
        engine_hand: impl IntoIterator<Item = Card>,
        passed_to: HashMap<Seat, HashSet<Card>>,
    ) -> Self {
        let engine_cards: HashSet<Card> = engine_hand.into_iter().collect();
        let mut card_probs = HashMap::new();

        for id in 0..52u8 {
            let card = Card::from_id(id).expect("valid card id");
            if engine_cards.contains(&card) {
                continue;
            }

            let owner = passed_to
                .iter()
                .find(|(_, cards)| cards.contains(&card))
                .map(|(seat, _)| *seat);

            let probs = match owner.and_then(|seat| seat.opponent_index()) {
                Some(idx) => {
                    let mut v = [0.0f32; 3];
                    v[idx] = 1.0;
                    v
                }
                None => [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
            };
            card_probs.insert(card, probs);
        }

        Self {
            card_probs,
            voids: HashSet::new(),
            passed_to,
        }
    }

    pub fn card_probs(&self) -> &HashMap<Card, [f32; 3]> {
        &self.card_probs
    }

    pub fn prob(&self, card: Card, seat: Seat) -> Option<f32> {
        let idx = seat.opponent_index()?;
        self.card_probs.get(&card).map(|v| v[idx])
    }

    pub fn voids(&self) -> &HashSet<(Seat, Suit)> {
        &self.voids
    }

    pub fn is_void(&self, seat: Seat, suit: Suit) -> bool {
        self.voids.contains(&(seat, suit))
    }

    pub fn passed_to(&self, seat: Seat) -> Option<&HashSet<Card>> {
        self.passed_to.get(&seat)
    }

    /// Renormalizes `card`'s probability vector. When the vector has
    /// collapsed to all-zero — every opponent voided in this suit — falls
    /// back to a deterministic assignment on the unique non-void opponent
    /// if there is exactly one, and only spreads uniform mass over the
    /// full {1,2,3} otherwise. A naive unconditional uniform fallback would
    /// silently violate the void invariant whenever a single non-void
    /// opponent remains.
    fn renormalize(&mut self, card: Card) {
        let Some(probs) = self.card_probs.get(&card).copied() else {
            return;
        };
        let total: f32 = probs.iter().sum();
        if total > EPSILON {
            let probs = self.card_probs.get_mut(&card).expect("card still tracked");
            for p in probs.iter_mut() {
                *p /= total;
            }
            return;
        }

        let non_void: Vec<usize> = (0..3)
            .filter(|&idx| {
                let seat = Seat::from_opponent_index(idx).expect("valid opponent index");
                !self.is_void(seat, card.suit)
            })
            .collect();

        let probs = self.card_probs.get_mut(&card).expect("card still tracked");
        match non_void.as_slice() {
            [only] => {
                *probs = [0.0; 3];
                probs[*only] = 1.0;
            }
            [] => *probs = [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
            several => {
                let share = 1.0 / several.len() as f32;
                *probs = [0.0; 3];
                for &idx in several {
                    probs[idx] = share;
                }
            }
        }
    }

    fn apply_card_played(&mut self, card: Card) {
        self.card_probs.remove(&card);
    }

    fn apply_void_shown(&mut self, seat: Seat, suit: Suit) {
        self.voids.insert((seat, suit));
        let Some(idx) = seat.opponent_index() else {
            return;
        };

        let affected: Vec<Card> = self
            .card_probs
            .keys()
            .copied()
            .filter(|c| c.suit == suit)
            .collect();

        for card in affected {
            if let Some(probs) = self.card_probs.get_mut(&card) {
                probs[idx] = 0.0;
            }
            self.renormalize(card);
        }
    }

    fn apply_trick_complete(&mut self, trick: &Trick) {
        let Some(led_suit) = trick.lead_suit() else {
            return;
        };
        for play in trick.plays() {
            if play.card.suit != led_suit {
                self.apply_void_shown(play.seat, led_suit);
            }
        }
    }

    fn apply_pass_record(&mut self, target: Seat, cards: &HashSet<Card>) {
        self.passed_to.entry(target).or_default().extend(cards.iter().copied());
        let Some(idx) = target.opponent_index() else {
            return;
        };
        for &card in cards {
            if let Some(probs) = self.card_probs.get_mut(&card) {
                *probs = [0.0; 3];
                probs[idx] = 1.0;
            }
        }
    }

    /// Applies one observation, mutating the belief in place.
    pub fn apply(&mut self, observation: &Observation) {
        match observation {
            Observation::CardPlayed { card, .. } => self.apply_card_played(*card),
            Observation::VoidShown { seat, suit } => self.apply_void_shown(*seat, *suit),
            Observation::TrickComplete { trick } => self.apply_trick_complete(trick),
            Observation::PassRecord { target, cards } => self.apply_pass_record(*target, cards),
        }
    }
}

/// The closed set of observations the belief updater understands (spec
/// §4.2, §9 "Polymorphism" — encoded as a tagged enum, not an open trait
/// hierarchy, because the set of observation kinds is fixed by the rules
/// of Hearts).
#[derive(Debug, Clone)]
pub enum Observation {
    CardPlayed { seat: Seat, card: Card },
    VoidShown { seat: Seat, suit: Suit },
    TrickComplete { trick: Trick },
    PassRecord { target: Seat, cards: HashSet<Card> },
}
