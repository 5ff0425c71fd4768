use std::collections::BTreeSet;

use baloot_core::model::{BidAction, Observation, Rank, Suit};

/// Inferred picture of partner's hand built from their bids and plays
/// (§4.4). Every field defaults to "no evidence yet" rather than null, per
/// §9's "treat absence as a first-class case".
#[derive(Debug, Clone, Default)]
pub struct PartnerRead {
    pub likely_strong_suits: Vec<Suit>,
    pub likely_void_suits: Vec<Suit>,
    pub estimated_trumps: u8,
    pub has_high_trumps: bool,
    pub confidence: f32,
}

/// Builds a [`PartnerRead`] from `obs.bid_history` (HOKUM ⇒ strong trump,
/// SUN ⇒ balanced) and partner's plays in `obs`'s trick history (high leads
/// ⇒ strength, discards off a led suit ⇒ weakness, ruffs ⇒ trumps). §4.4.
pub fn read(obs: &Observation) -> PartnerRead {
    let partner = obs.partner();
    let mut strong = BTreeSet::new();
    let mut void = BTreeSet::new();
    let mut estimated_trumps = 0u8;
    let mut has_high_trumps = false;
    let mut evidence = 0.0f32;

    for bid in &obs.bid_history {
        if bid.seat != partner {
            continue;
        }
        match bid.action {
            BidAction::Hokum(suit) => {
                strong.insert(suit);
                estimated_trumps = estimated_trumps.max(3);
                has_high_trumps = true;
                evidence += 2.0;
            }
            BidAction::Sun | BidAction::Ashkal => {
                evidence += 1.0;
            }
            BidAction::Pass | BidAction::Double | BidAction::Redouble => {}
        }
    }

    if let Some(ctx) = obs.playing() {
        for trick in &ctx.trick_history {
            let Some(lead_suit) = trick.lead_suit() else {
                continue;
            };
            let Some(card) = trick.card_played_by(partner) else {
                continue;
            };
            evidence += 0.5;

            if card.suit != lead_suit {
                if ctx.contract.is_trump(card.suit) {
                    estimated_trumps = estimated_trumps.saturating_add(1);
                    if matches!(card.rank, Rank::Jack | Rank::Nine) {
                        has_high_trumps = true;
                    }
                    evidence += 1.0;
                } else {
                    void.insert(lead_suit);
                    evidence += 0.5;
                }
            } else if trick.leader == partner && matches!(card.rank, Rank::Ace | Rank::King) {
                strong.insert(card.suit);
                evidence += 1.0;
            }
        }
    }

    PartnerRead {
        likely_strong_suits: strong.into_iter().collect(),
        likely_void_suits: void.into_iter().collect(),
        estimated_trumps,
        has_high_trumps,
        confidence: (evidence / 6.0).clamp(0.0, 1.0),
    }
}
