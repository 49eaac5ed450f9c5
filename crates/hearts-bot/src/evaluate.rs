//! Monte-Carlo card selection: samples consistent worlds from a belief,
//! rolls each legal candidate out to the end of the round under the
//! simulation policy, and returns the candidate with the lowest average
//! points taken by the engine. A handful of deterministic overrides skip
//! sampling entirely when the answer is already forced.

use crate::simulate;
use hearts_core::belief::{BeliefState, sample_world};
use hearts_core::model::card::Card;
use hearts_core::model::round::RoundState;
use hearts_core::model::seat::Seat;
use hearts_core::rules;
use rand::Rng;
use std::collections::HashMap;

/// Tunables for a single [`select_card`] call.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub n_samples: usize,
    pub max_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            max_attempts: 1000,
        }
    }
}

/// Chooses the engine's next card out of `round`'s current trick, given its
/// `hand` and current `belief` over the hidden opponent cards.
pub fn select_card<R: Rng + ?Sized>(
    round: &RoundState,
    hand: hearts_core::model::hand::CardSet,
    belief: &BeliefState,
    config: &EngineConfig,
    rng: &mut R,
) -> Card {
    let is_first_trick = round.is_first_trick();
    let mut legal = rules::legal_moves(hand, round.current_trick(), round.hearts_broken(), is_first_trick)
        .unwrap_or_else(|_| hand.to_vec());
    if legal.is_empty() {
        legal = hand.to_vec();
    }

    if let Some(card) = check_override(&legal, round) {
        tracing::debug!(card = %card, "evaluator override applied, skipping sampling");
        return card;
    }

    let mut totals: HashMap<Card, f64> = legal.iter().map(|&c| (c, 0.0)).collect();

    for _ in 0..config.n_samples {
        let world = sample_world(belief, config.max_attempts, rng);
        if world.used_fallback {
            tracing::warn!(
                max_attempts = config.max_attempts,
                "belief sampler exhausted rejection budget, using best-effort fallback world"
            );
        }
        for &candidate in &legal {
            let mut engine_hand_after = hand;
            engine_hand_after.remove(candidate);
            let scores = play_candidate_and_finish(round, engine_hand_after, &world, candidate, rng);
            *totals.get_mut(&candidate).expect("candidate tracked") += scores[0] as f64;
        }
    }

    let sample_count = config.n_samples.max(1) as f64;
    let chosen = legal
        .iter()
        .copied()
        .min_by(|a, b| {
            let avg_a = totals[a] / sample_count;
            let avg_b = totals[b] / sample_count;
            avg_a.partial_cmp(&avg_b).unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("legal is non-empty");

    tracing::debug!(card = %chosen, samples = config.n_samples, "evaluator selected card");
    chosen
}

/// Hard rules that skip Monte-Carlo sampling entirely: a forced single
/// move, the mandatory Two of Clubs opening lead, and a guaranteed-safe
/// dump as the last player to a pointless trick.
fn check_override(legal: &[Card], round: &RoundState) -> Option<Card> {
    if legal.len() == 1 {
        return Some(legal[0]);
    }

    if round.is_first_trick() && round.current_trick().is_empty() && legal.contains(&Card::TWO_OF_CLUBS) {
        return Some(Card::TWO_OF_CLUBS);
    }

    let trick = round.current_trick();
    if trick.plays().len() == 3 {
        if let Some(led_suit) = trick.lead_suit() {
            let highest_in_trick = trick
                .plays()
                .iter()
                .filter(|p| p.card.suit == led_suit)
                .map(|p| p.card.rank)
                .max();
            let can_win = highest_in_trick
                .is_some_and(|highest| legal.iter().any(|c| c.suit == led_suit && c.rank > highest));
            if !can_win && trick.points() == 0 {
                return legal.iter().copied().max_by_key(|c| c.rank);
            }
        }
    }

    None
}

fn play_candidate_and_finish<R: Rng + ?Sized>(
    round: &RoundState,
    engine_hand_after: hearts_core::model::hand::CardSet,
    world: &hearts_core::belief::SampledWorld,
    candidate: Card,
    rng: &mut R,
) -> [u32; 4] {
    let mut sim = round.clone();
    *sim.hand_mut(Seat::ENGINE) = engine_hand_after;
    for seat in [Seat::new(1), Seat::new(2), Seat::new(3)] {
        *sim.hand_mut(seat) = world.hand(seat);
    }

    sim.play_into_current_trick(Seat::ENGINE, candidate);
    let next = if sim.current_trick().is_complete() {
        sim.complete_current_trick()
    } else {
        sim.current_trick().next_to_play()
    };

    simulate::play_out(&mut sim, next, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearts_core::belief::Observation;
    use hearts_core::model::hand::CardSet;
    use hearts_core::model::rank::Rank;
    use hearts_core::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap as StdHashMap;

    #[test]
    fn single_legal_move_short_circuits_without_sampling() {
        let hand = CardSet::from_cards([Card::TWO_OF_CLUBS]);
        let round = RoundState::new([hand, CardSet::EMPTY, CardSet::EMPTY, CardSet::EMPTY], Seat::new(0));
        let belief = BeliefState::initialize(hand.to_vec(), StdHashMap::new());
        let config = EngineConfig { n_samples: 1, max_attempts: 10 };
        let mut rng = StdRng::seed_from_u64(1);

        let chosen = select_card(&round, hand, &belief, &config, &mut rng);
        assert_eq!(chosen, Card::TWO_OF_CLUBS);
    }

    #[test]
    fn forced_two_of_clubs_opening_lead_skips_sampling() {
        let hand = CardSet::from_cards([Card::TWO_OF_CLUBS, Card::new(Rank::King, Suit::Diamonds)]);
        let round = RoundState::new([hand, CardSet::EMPTY, CardSet::EMPTY, CardSet::EMPTY], Seat::new(0));
        let belief = BeliefState::initialize(hand.to_vec(), StdHashMap::new());
        let config = EngineConfig { n_samples: 1, max_attempts: 10 };
        let mut rng = StdRng::seed_from_u64(2);

        let chosen = select_card(&round, hand, &belief, &config, &mut rng);
        assert_eq!(chosen, Card::TWO_OF_CLUBS);
    }

    #[test]
    fn safe_dump_as_last_player_to_a_pointless_trick() {
        let hand = CardSet::from_cards([
            Card::new(Rank::Ten, Suit::Diamonds),
            Card::new(Rank::King, Suit::Diamonds),
        ]);
        let mut round = RoundState::new(
            [hand, CardSet::EMPTY, CardSet::EMPTY, CardSet::EMPTY],
            Seat::new(1),
        );
        round.play_into_current_trick(Seat::new(1), Card::new(Rank::Three, Suit::Clubs));
        round.play_into_current_trick(Seat::new(2), Card::new(Rank::Four, Suit::Clubs));
        round.play_into_current_trick(Seat::new(3), Card::new(Rank::Five, Suit::Clubs));

        let belief = BeliefState::initialize(hand.to_vec(), StdHashMap::new());
        let config = EngineConfig { n_samples: 1, max_attempts: 10 };
        let mut rng = StdRng::seed_from_u64(3);

        let chosen = select_card(&round, hand, &belief, &config, &mut rng);
        assert_eq!(chosen, Card::new(Rank::King, Suit::Diamonds));
    }

    fn club(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }
    fn diamond(rank: Rank) -> Card {
        Card::new(rank, Suit::Diamonds)
    }
    fn spade(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }
    fn heart(rank: Rank) -> Card {
        Card::new(rank, Suit::Hearts)
    }

    const CLUB_RANKS: [Rank; 12] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
    ];
    const DIAMOND_RANKS: [Rank; 12] = CLUB_RANKS;
    const SPADE_RANKS_NO_QUEEN: [Rank; 12] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::King, Rank::Ace,
    ];
    const HEART_RANKS: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    /// A full, self-consistent 52-card deal where seat 3 holds nothing but
    /// hearts, used to exercise a genuine (non-overridden) sampling path
    /// through `select_card` end to end.
    fn four_suit_deal() -> [CardSet; 4] {
        let engine: Vec<Card> = CLUB_RANKS.iter().map(|&r| club(r)).chain([Card::QUEEN_OF_SPADES]).collect();
        let seat1: Vec<Card> = [club(Rank::Ace)]
            .into_iter()
            .chain(DIAMOND_RANKS.iter().map(|&r| diamond(r)))
            .collect();
        let seat2: Vec<Card> = [diamond(Rank::Ace)]
            .into_iter()
            .chain(SPADE_RANKS_NO_QUEEN.iter().map(|&r| spade(r)))
            .collect();
        let seat3: Vec<Card> = HEART_RANKS.iter().map(|&r| heart(r)).collect();
        [
            CardSet::from_cards(engine),
            CardSet::from_cards(seat1),
            CardSet::from_cards(seat2),
            CardSet::from_cards(seat3),
        ]
    }

    fn play_filler_trick(round: &mut RoundState) {
        round.play_into_current_trick(Seat::new(3), heart(Rank::Two));
        round.play_into_current_trick(Seat::new(0), club(Rank::Three));
        round.play_into_current_trick(Seat::new(1), diamond(Rank::Three));
        round.play_into_current_trick(Seat::new(2), spade(Rank::Three));
        let winner = round.complete_current_trick();
        assert_eq!(winner, Seat::new(3));

        round.hand_mut(Seat::new(3)).remove(heart(Rank::Two));
        round.hand_mut(Seat::new(0)).remove(club(Rank::Three));
        round.hand_mut(Seat::new(1)).remove(diamond(Rank::Three));
        round.hand_mut(Seat::new(2)).remove(spade(Rank::Three));
    }

    fn belief_for_deal(round: &RoundState) -> BeliefState {
        let mut belief = BeliefState::initialize(
            CLUB_RANKS.iter().map(|&r| club(r)).chain([Card::QUEEN_OF_SPADES]).collect::<Vec<_>>(),
            HashMap::new(),
        );
        for played in [
            heart(Rank::Two),
            club(Rank::Three),
            diamond(Rank::Three),
            spade(Rank::Three),
            heart(Rank::Three),
        ] {
            belief.apply(&Observation::CardPlayed { seat: Seat::new(3), card: played });
        }
        for seat in [Seat::new(1), Seat::new(2), Seat::new(3)] {
            let cards = round.hand(seat).to_vec().into_iter().collect();
            belief.apply(&Observation::PassRecord { target: seat, cards });
        }
        belief
    }

    #[test]
    fn monte_carlo_path_is_deterministic_given_a_seed() {
        let hands = four_suit_deal();
        let mut round = RoundState::new(hands, Seat::new(3));
        play_filler_trick(&mut round);
        round.play_into_current_trick(Seat::new(3), heart(Rank::Three));
        round.hand_mut(Seat::new(3)).remove(heart(Rank::Three));

        let hand = round.hand(Seat::new(0));
        let belief = belief_for_deal(&round);
        let config = EngineConfig { n_samples: 4, max_attempts: 50 };

        let mut rng_a = StdRng::seed_from_u64(777);
        let chosen_a = select_card(&round, hand, &belief, &config, &mut rng_a);

        let mut rng_b = StdRng::seed_from_u64(777);
        let chosen_b = select_card(&round, hand, &belief, &config, &mut rng_b);

        assert_eq!(chosen_a, chosen_b);
        assert!(hand.contains(chosen_a));
    }
}
