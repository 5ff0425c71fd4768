//! The decision core's pipeline (§2, §4): evaluation, bidding, inference,
//! tactical selectors, macro planners, the brain cascade (§4.7), and the
//! personality/difficulty post-processors (§4.8) that sit on top of it.
//!
//! The two public entry points a host calls are [`decide_bid`] and
//! [`decide_play`] (§6); everything else in this crate exists to compute
//! the hints and candidate decisions those two functions cascade through.

pub mod bidding;
pub mod brain;
pub mod difficulty;
pub mod evaluation;
pub mod hints;
pub mod inference;
pub mod macro_plan;
pub mod params;
pub mod personality;
pub mod tactical;

pub use brain::{decide_bid, decide_bid_with_params, decide_play, decide_play_with_params};
pub use hints::Hints;
pub use params::BotParams;
