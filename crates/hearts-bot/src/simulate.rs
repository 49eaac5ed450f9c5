//! Plays a partially-completed round to the end using the deterministic
//! simulation policy, for use as the rollout inside the Monte-Carlo
//! evaluator.

use crate::policy;
use hearts_core::model::round::RoundState;
use hearts_core::model::seat::Seat;
use hearts_core::rules;
use rand::Rng;
use rand::seq::SliceRandom;

/// Plays `round` to completion starting with `next` on the move, then
/// returns the final per-seat penalty totals (shoot-the-moon rewrite
/// already applied). `round`'s hands must already hold every card each
/// seat is assumed to hold in this rollout; this function only removes
/// cards as they're played.
///
/// If the policy ever disagrees with `legal_moves` — which should not
/// happen, but `legal_moves` is the single source of truth — the move is
/// replaced with a uniformly random legal card as a safety net. If
/// `legal_moves` itself yields no candidates (the first-trick
/// all-points-left edge case), the full hand is substituted.
pub fn play_out<R: Rng + ?Sized>(round: &mut RoundState, mut next: Seat, rng: &mut R) -> [u32; 4] {
    while round.tricks_completed() < 13 {
        while !round.current_trick().is_complete() {
            let seat = next;
            let hand = round.hand(seat);
            let trick = round.current_trick().clone();
            let hearts_broken = round.hearts_broken();
            let is_first_trick = round.is_first_trick();
            let tricks_completed = round.tricks_completed();

            let mut legal = rules::legal_moves(hand, &trick, hearts_broken, is_first_trick)
                .unwrap_or_else(|_| hand.to_vec());
            if legal.is_empty() {
                legal = hand.to_vec();
            }

            let proposed = policy::choose_card(&legal, &trick, tricks_completed);
            let card = if legal.contains(&proposed) {
                proposed
            } else {
                *legal.choose(rng).expect("legal is non-empty")
            };

            round.hand_mut(seat).remove(card);
            round.play_into_current_trick(seat, card);
            next = seat.next();
        }
        next = round.complete_current_trick();
    }

    rules::round_score(round.trick_history())
}
