//! The engine façade: the one thing an embedding shell talks to. Owns the
//! belief state and the engine's own hand across a round, and turns the
//! lower-level `evaluate`/`simulate`/`policy` pieces into the handful of
//! calls a driver needs: initialize once per round, ask for a card, feed
//! observations back as other seats act.

use crate::evaluate::{self, EngineConfig};
use hearts_core::EngineError;
use hearts_core::belief::{BeliefState, Observation};
use hearts_core::model::card::Card;
use hearts_core::model::hand::CardSet;
use hearts_core::model::pass::PassingDirection;
use hearts_core::model::round::RoundState;
use hearts_core::model::seat::Seat;
use hearts_core::model::trick::Trick;
use rand::Rng;
use std::collections::{HashMap, HashSet};

const NOT_INITIALIZED: &str = "engine not initialized: call initialize_beliefs first";

pub struct HeartsEngine {
    config: EngineConfig,
    hand: Option<CardSet>,
    beliefs: Option<BeliefState>,
}

impl HeartsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, hand: None, beliefs: None }
    }

    /// Seeds the belief state for a new round, right after the passing
    /// phase resolves. `passed_to` records which of the engine's own cards
    /// went to which opponent seat.
    pub fn initialize_beliefs(&mut self, hand: CardSet, passed_to: HashMap<Seat, HashSet<Card>>) {
        tracing::info!(hand_size = hand.len(), "initializing beliefs for new round");
        self.beliefs = Some(BeliefState::initialize(hand.to_vec(), passed_to));
        self.hand = Some(hand);
    }

    /// Baseline passing strategy: the three highest `(rank, suit)` cards.
    /// `Hold` never requires a selection and returns an empty vector.
    pub fn pass_cards(&self, hand: CardSet, direction: PassingDirection) -> Vec<Card> {
        if !direction.requires_selection() {
            return Vec::new();
        }
        let mut sorted = hand.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted.truncate(3);
        sorted
    }

    /// Chooses the engine's next card given the current round state. Errs
    /// only if the engine hasn't been initialized for this round yet.
    pub fn play_card<R: Rng + ?Sized>(
        &self,
        round: &RoundState,
        rng: &mut R,
    ) -> Result<Card, EngineError> {
        let hand = self
            .hand
            .ok_or_else(|| EngineError::IllFormedInput(NOT_INITIALIZED.to_string()))?;
        let beliefs = self
            .beliefs
            .as_ref()
            .ok_or_else(|| EngineError::IllFormedInput(NOT_INITIALIZED.to_string()))?;

        Ok(evaluate::select_card(round, hand, beliefs, &self.config, rng))
    }

    /// Records that `seat` played `card`, updating the belief and, if it
    /// was the engine's own play, its tracked hand.
    pub fn observe_card_played(&mut self, seat: Seat, card: Card) {
        let Some(beliefs) = self.beliefs.as_mut() else {
            return;
        };
        beliefs.apply(&Observation::CardPlayed { seat, card });

        if seat == Seat::ENGINE {
            if let Some(hand) = self.hand.as_mut() {
                hand.remove(card);
            }
        }
    }

    /// Records a completed trick: infers voids for every seat that didn't
    /// follow the led suit, then records each of its plays individually.
    pub fn observe_trick_complete(&mut self, trick: &Trick) {
        if self.beliefs.is_none() {
            return;
        }
        self.beliefs
            .as_mut()
            .unwrap()
            .apply(&Observation::TrickComplete { trick: trick.clone() });

        if let Some(led_suit) = trick.lead_suit() {
            for play in trick.plays() {
                if play.card.suit != led_suit {
                    tracing::trace!(seat = %play.seat, suit = %led_suit, "void inferred");
                }
            }
        }

        for play in trick.plays() {
            self.observe_card_played(play.seat, play.card);
        }
    }

    pub fn hand(&self) -> Option<CardSet> {
        self.hand
    }

    pub fn beliefs(&self) -> Option<&BeliefState> {
        self.beliefs.as_ref()
    }
}
