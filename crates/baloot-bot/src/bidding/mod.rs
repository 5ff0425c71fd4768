//! The bidding pipeline (§4.3): sun/hokum evaluators feed the bid optimizer,
//! which assembles the final [`baloot_core::model::BidDecision`].

pub mod hokum_evaluator;
pub mod optimizer;
pub mod sun_evaluator;

pub use hokum_evaluator::HokumEvaluation;
pub use optimizer::{decide, should_double};
pub use sun_evaluator::SunEvaluation;
