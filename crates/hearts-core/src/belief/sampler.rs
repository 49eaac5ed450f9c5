//! Constrained sequential-assignment world sampler.

use super::state::BeliefState;
use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::seat::Seat;
use rand::Rng;
use rand::seq::SliceRandom;

/// Default bounded-rejection attempt budget before falling back to a
/// best-effort greedy assignment.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// A fully materialised, legal three-hand assignment for the opponents.
#[derive(Debug, Clone, Copy)]
pub struct SampledWorld {
    pub hands: [CardSet; 3],
    /// Set when the rejection-sampling budget was exhausted and this world
    /// came from the best-effort greedy fallback instead (spec's
    /// `InconsistentBelief` case). The sampler has no `tracing` dependency
    /// of its own, so it surfaces this on the value instead of logging
    /// directly; `hearts-bot`'s evaluator is the one that logs it.
    pub used_fallback: bool,
}

impl SampledWorld {
    pub fn hand(&self, seat: Seat) -> CardSet {
        let idx = seat
            .opponent_index()
            .expect("sampled worlds only cover opponent seats 1..=3");
        self.hands[idx]
    }
}

/// Draws an opponent-hand assignment consistent with `belief`, trying up
/// to `max_attempts` rejection-sampling passes before falling back to a
/// best-effort greedy pass that ignores strict void correctness but still
/// terminates and respects hand-size caps.
pub fn sample_world<R: Rng + ?Sized>(
    belief: &BeliefState,
    max_attempts: usize,
    rng: &mut R,
) -> SampledWorld {
    for _ in 0..max_attempts.max(1) {
        if let Some(world) = try_sample_once(belief, rng, true) {
            return world;
        }
    }

    // Rejection budget exhausted: fall through to the best-effort greedy pass.
    // `hearts-bot`'s evaluator logs this at the decision boundary via
    // `SampledWorld::used_fallback`; the sampler itself has no `tracing`
    // dependency.
    try_sample_once(belief, rng, false).expect("greedy fallback always assigns every card")
}

/// One pass of the algorithm. `strict` selects whether void violations are
/// rejected (`true`, the normal rejection-sampling path) or merely steer
/// the assignment toward the first opponent under the size cap (`false`,
/// the best-effort greedy fallback).
fn try_sample_once<R: Rng + ?Sized>(
    belief: &BeliefState,
    rng: &mut R,
    strict: bool,
) -> Option<SampledWorld> {
    let mut hands = [CardSet::EMPTY; 3];
    let mut sizes = [0u8; 3];

    for opponent in [Seat::new(1), Seat::new(2), Seat::new(3)] {
        let idx = opponent.opponent_index().unwrap();
        if let Some(cards) = belief.passed_to(opponent) {
            for &card in cards {
                if belief.card_probs().contains_key(&card) {
                    hands[idx].insert(card);
                    sizes[idx] += 1;
                }
            }
        }
    }

    let mut unknown: Vec<Card> = belief
        .card_probs()
        .keys()
        .copied()
        .filter(|c| !hands.iter().any(|h| h.contains(*c)))
        .collect();
    unknown.shuffle(rng);

    for card in unknown {
        let mut probs = *belief.card_probs().get(&card).expect("card is tracked");
        for idx in 0..3 {
            let seat = Seat::from_opponent_index(idx).unwrap();
            if sizes[idx] >= 13 || belief.is_void(seat, card.suit) {
                probs[idx] = 0.0;
            }
        }

        let total: f32 = probs.iter().sum();
        if total <= 0.0 {
            if strict {
                return None;
            }
            let fallback_idx = (0..3).find(|&idx| sizes[idx] < 13)?;
            hands[fallback_idx].insert(card);
            sizes[fallback_idx] += 1;
            continue;
        }

        for p in probs.iter_mut() {
            *p /= total;
        }
        let idx = sample_index(&probs, rng);
        hands[idx].insert(card);
        sizes[idx] += 1;
    }

    if strict && sizes.iter().any(|&s| s != 13) {
        return None;
    }

    Some(SampledWorld { hands, used_fallback: !strict })
}

fn sample_index<R: Rng + ?Sized>(weights: &[f32; 3], rng: &mut R) -> usize {
    let roll: f32 = rng.r#gen();
    let mut cumulative = 0.0;
    for (idx, &w) in weights.iter().enumerate() {
        cumulative += w;
        if roll < cumulative {
            return idx;
        }
    }
    2
}
