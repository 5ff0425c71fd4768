//! Inference over partial information (§4.4): partner read, opponent model,
//! bid reader, and trick review. These run first in the playing pipeline and
//! feed their outputs into the `Hints` context consulted by tactical
//! selectors and macro planners.

pub mod bid_reader;
pub mod opponent_model;
pub mod partner_read;
pub mod trick_review;

pub use bid_reader::{BidRead, BuyerStrengthTier, PlayImplications};
pub use opponent_model::{OpponentModel, OpponentRead, PlayStyle};
pub use partner_read::PartnerRead;
pub use trick_review::{Momentum, StrategyShift, SuitResult, TrickReview};
