use baloot_core::model::{Contract, Hand, Rank};
use baloot_core::tracker::CardTracker;

use super::hand_shape;

/// Bounded trick-count estimate for a (hand, contract) pair (§4.2). No
/// search: masters, long-suit runners, trump power, side aces, and shape all
/// contribute additively and the result is clamped to `[0, 8]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrickProjection {
    pub min: f32,
    pub expected: f32,
    pub max: f32,
    /// "Fast" tricks available without giving up the lead — masters plus
    /// top-of-sequence trump honours. Feeds `should_double` (§4.3).
    pub quick: f32,
}

/// Trump power contribution (§4.2): J=3, 9=2, A=1, plus one per additional
/// trump beyond the first three honours.
fn trump_power(hand: &Hand, contract: Contract) -> f32 {
    let Some(trump) = contract.trump else {
        return 0.0;
    };
    let mut power = 0.0;
    let mut honours = 0;
    for card in hand.cards() {
        if card.suit != trump {
            continue;
        }
        match card.rank {
            Rank::Jack => {
                power += 3.0;
                honours += 1;
            }
            Rank::Nine => {
                power += 2.0;
                honours += 1;
            }
            Rank::Ace => {
                power += 1.0;
                honours += 1;
            }
            _ => {}
        }
    }
    let trump_count = hand.count_in_suit(trump);
    power + (trump_count.saturating_sub(honours)) as f32 * 0.5
}

/// Side aces outside the trump suit (§4.2); each one is a likely trick.
fn side_aces(hand: &Hand, contract: Contract) -> f32 {
    hand.cards()
        .iter()
        .filter(|c| Some(c.suit) != contract.trump && c.rank == Rank::Ace)
        .count() as f32
}

/// Projects `{min, expected, max, quick}` tricks for `hand` under `contract`,
/// using `tracker` to determine which held cards are already masters (§4.1
/// `is_master`, §4.2 trick projection).
pub fn project(hand: &Hand, contract: Contract, tracker: &CardTracker) -> TrickProjection {
    let masters: Vec<_> = hand
        .cards()
        .iter()
        .filter(|&&c| tracker.is_master(c, contract))
        .collect();
    let master_tricks = masters.len() as f32;

    let shape = hand_shape::evaluate(hand, contract.mode, contract.trump);
    let power = trump_power(hand, contract);
    let aces = side_aces(hand, contract);

    let base = master_tricks + shape.long_suit_tricks + power * 0.5 + aces * 0.5;
    let shape_bonus = match contract.mode {
        baloot_core::model::Mode::Sun => shape.sun_adjustment * 0.1,
        baloot_core::model::Mode::Hokum => shape.hokum_adjustment * 0.1,
    };

    let expected = (base + shape_bonus).clamp(0.0, 8.0);
    let min = (master_tricks * 0.8).clamp(0.0, 8.0);
    let max = (base + shape_bonus.abs() + 1.0).clamp(0.0, 8.0).max(expected);
    let quick = (master_tricks + power.min(3.0)).clamp(0.0, 8.0);

    TrickProjection {
        min,
        expected,
        max,
        quick,
    }
}
