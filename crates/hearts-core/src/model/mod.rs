//! Immutable card identity and round data structures.

pub mod card;
pub mod hand;
pub mod pass;
pub mod rank;
pub mod round;
pub mod seat;
pub mod suit;
pub mod trick;

pub use card::Card;
pub use hand::CardSet;
pub use pass::PassingDirection;
pub use rank::Rank;
pub use round::RoundState;
pub use seat::Seat;
pub use suit::Suit;
pub use trick::{Play, Trick};
