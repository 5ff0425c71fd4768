pub mod bid;
pub mod card;
pub mod decision;
pub mod hand;
pub mod mode;
pub mod observation;
pub mod position;
pub mod profiles;
pub mod rank;
pub mod suit;
pub mod trick;

pub use bid::{Bid, BidAction};
pub use card::Card;
pub use decision::{BidComponents, BidDecision, PlayDecision, StrategyLabel};
pub use hand::Hand;
pub use mode::{Contract, Mode};
pub use observation::{
    BiddingContext, Declaration, DeclarationKind, DoublingLevel, Observation, Phase,
    PlayingContext, SeatInTrick, TeamScore,
};
pub use position::Position;
pub use profiles::{Difficulty, Personality};
pub use rank::Rank;
pub use suit::Suit;
pub use trick::{resolve_winner, CompletedTrick, Play, TrickInProgress};
