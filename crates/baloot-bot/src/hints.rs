//! The shared hint dictionary passed down the playing pipeline (§3 "Hint
//! dictionaries", §9 "From dynamic dictionaries to tagged structures").
//! Computed once per [`baloot_core::model::Observation`] by the inference
//! layer, then consulted read-only by every tactical selector, macro
//! planner, and the brain cascade itself.

use baloot_core::model::Observation;
use baloot_core::tracker::CardTracker;

use crate::inference::{bid_reader, opponent_model, partner_read, trick_review};
use crate::inference::{BidRead, OpponentModel, PartnerRead, TrickReview};
use crate::macro_plan::trump_manager::{self, TrumpManagerOutput};

#[derive(Debug, Clone)]
pub struct Hints {
    pub partner_read: PartnerRead,
    pub opponent_model: OpponentModel,
    pub bid_read: BidRead,
    pub trick_review: TrickReview,
    pub trump_manager: Option<TrumpManagerOutput>,
}

impl Hints {
    /// Runs every inference module once over `obs` and `tracker` (§4.4,
    /// §4.5 trump manager). The tracker is consulted read-only here — only
    /// the host's sequential event stream mutates it (§5).
    pub fn gather(obs: &Observation, tracker: &CardTracker) -> Self {
        let partner_read = partner_read::read(obs);
        let opponent_model = opponent_model::model(obs);
        let bid_read = bid_reader::read(obs);
        let trick_review = trick_review::review(obs);
        let trump_manager = trump_manager::plan(obs, tracker, &partner_read);

        Self {
            partner_read,
            opponent_model,
            bid_read,
            trick_review,
            trump_manager,
        }
    }
}
