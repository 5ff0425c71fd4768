use serde::{Deserialize, Serialize};

use crate::model::position::Position;
use crate::model::suit::Suit;

/// A tagged auction action (§3). `Hokum` carries the suit it proposes as
/// trump; `Ashkal` is a SUN variant where the bidder's partner picks up the
/// face-up card instead of the bidder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidAction {
    Pass,
    Hokum(Suit),
    Sun,
    Ashkal,
    Double,
    Redouble,
}

impl BidAction {
    pub const fn is_pass(self) -> bool {
        matches!(self, BidAction::Pass)
    }

    pub const fn is_mode_commitment(self) -> bool {
        matches!(self, BidAction::Hokum(_) | BidAction::Sun | BidAction::Ashkal)
    }

    pub const fn is_doubling(self) -> bool {
        matches!(self, BidAction::Double | BidAction::Redouble)
    }
}

/// One entry in the auction history (§3: "bid_history").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub seat: Position,
    pub action: BidAction,
}

impl Bid {
    pub const fn new(seat: Position, action: BidAction) -> Self {
        Self { seat, action }
    }
}
