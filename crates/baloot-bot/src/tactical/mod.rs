//! Tactical selectors (§4.5): lead selector, follow optimizer, seat
//! strategy, and cooperative play. The brain cascade consults
//! `cooperative_play` and the seat/follow pair directly at their own
//! priority levels; [`default_tactical`] packages the seat-aware fallback
//! the cascade falls back to last.

pub mod cooperative_play;
pub mod follow_optimizer;
pub mod lead_selector;
pub mod seat_strategy;

use baloot_core::model::{Observation, PlayDecision};
use baloot_core::tracker::CardTracker;

use crate::hints::Hints;

/// The brain's last-resort tactical step (§4.7 priority 8): lead selector
/// when we hold the lead, otherwise seat strategy's seat-specific
/// refinement, falling through to the general follow cascade.
pub fn default_tactical(obs: &Observation, hints: &Hints, tracker: &CardTracker) -> PlayDecision {
    let ctx = obs.playing().expect("tactical selectors require playing phase");
    if ctx.seat_in_trick.is_leader() {
        return lead_selector::select(obs, hints, tracker);
    }
    if let Some(refined) = seat_strategy::refine(obs, tracker) {
        return refined;
    }
    follow_optimizer::select(obs, hints, tracker)
}
