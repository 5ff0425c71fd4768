use baloot_core::model::{Contract, Difficulty, Hand};
use baloot_core::tracker::CardTracker;

use crate::evaluation::{hand_shape, trick_projection};

/// Raw SUN candidacy strength plus its supporting trick projection (§4.3).
#[derive(Debug, Clone, Copy)]
pub struct SunEvaluation {
    pub strength: f32,
    pub projected_tricks: f32,
    pub quick_tricks: f32,
    pub shape_adjustment: f32,
}

/// Scores `hand` as a SUN candidate: masters/long-suit/aces via trick
/// projection, plus the hand-shape adjustment (§4.2 SUN column).
pub fn evaluate(hand: &Hand) -> SunEvaluation {
    let contract = Contract::sun();
    let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
    let projection = trick_projection::project(hand, contract, &tracker);
    let shape = hand_shape::evaluate(hand, contract.mode, None);

    let strength = projection.expected + shape.sun_adjustment * 0.1;

    SunEvaluation {
        strength,
        projected_tricks: projection.expected,
        quick_tricks: projection.quick,
        shape_adjustment: shape.sun_adjustment,
    }
}
