use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;

/// One (player, card) entry within a trick, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

/// An ordered sequence of up to four plays, plus the seat that led it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|p| p.card.suit)
    }

    /// Appends a play without validating legality — callers are expected
    /// to have consulted `legal_moves` first.
    pub fn push(&mut self, seat: Seat, card: Card) {
        debug_assert!(!self.is_complete(), "pushing onto a complete trick");
        self.plays.push(Play { seat, card });
    }

    /// Highest card of the led suit wins; ties are impossible since every
    /// card is unique.
    pub fn winner(&self) -> Option<Seat> {
        let lead_suit = self.lead_suit()?;
        self.plays
            .iter()
            .filter(|p| p.card.suit == lead_suit)
            .max_by_key(|p| p.card.rank)
            .map(|p| p.seat)
    }

    pub fn points(&self) -> u8 {
        self.plays.iter().map(|p| p.card.penalty_value()).sum()
    }

    pub fn next_to_play(&self) -> Seat {
        self.plays.last().map(|p| p.seat.next()).unwrap_or(self.leader)
    }
}
