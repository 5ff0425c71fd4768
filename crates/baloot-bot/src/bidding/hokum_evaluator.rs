use baloot_core::model::{Contract, Difficulty, Hand, Suit};
use baloot_core::tracker::CardTracker;

use crate::evaluation::{hand_shape, trick_projection};

/// Raw HOKUM candidacy strength for one candidate trump suit (§4.3: "every
/// suit is scored independently as a candidate trump").
#[derive(Debug, Clone, Copy)]
pub struct HokumEvaluation {
    pub suit: Suit,
    pub strength: f32,
    pub projected_tricks: f32,
    pub quick_tricks: f32,
    pub shape_adjustment: f32,
}

fn evaluate_suit(hand: &Hand, suit: Suit) -> HokumEvaluation {
    let contract = Contract::hokum(suit);
    let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
    let projection = trick_projection::project(hand, contract, &tracker);
    let shape = hand_shape::evaluate(hand, contract.mode, Some(suit));

    let strength = projection.expected + shape.hokum_adjustment * 0.1 + shape.ruff_potential * 0.2;

    HokumEvaluation {
        suit,
        strength,
        projected_tricks: projection.expected,
        quick_tricks: projection.quick,
        shape_adjustment: shape.hokum_adjustment,
    }
}

/// Scores every suit as a candidate trump and returns the best one (§4.3).
/// A suit with zero held cards is never proposed: you cannot buy HOKUM in a
/// suit you're void in.
pub fn best_suit(hand: &Hand) -> Option<HokumEvaluation> {
    Suit::ALL
        .into_iter()
        .filter(|&suit| hand.count_in_suit(suit) > 0)
        .map(|suit| evaluate_suit(hand, suit))
        .max_by(|a, b| a.strength.total_cmp(&b.strength))
}
