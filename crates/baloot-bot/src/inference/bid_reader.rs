use std::collections::BTreeSet;

use baloot_core::model::{BidAction, DoublingLevel, Observation, Position, Suit};

/// Coarse classification of how strong the buyer's hand likely was, derived
/// from which round they bought in and whether they were opposed by a
/// double (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyerStrengthTier {
    Strong,
    Marginal,
    Overbid,
}

/// Play-phase intelligence extracted from the auction (§4.4).
#[derive(Debug, Clone, Default)]
pub struct PlayImplications {
    pub safe_leads: Vec<Suit>,
    pub avoid_leads: Vec<Suit>,
    pub partner_likely_has: Vec<Suit>,
}

#[derive(Debug, Clone)]
pub struct BidRead {
    pub buyer_strength_tier: BuyerStrengthTier,
    /// Suits a passer is inferred weak in: every suit bid HOKUM by someone
    /// else during the auction, for each seat that later passed.
    pub passer_weak_suits: Vec<(Position, Suit)>,
    pub play_implications: PlayImplications,
}

/// Extracts play-phase intelligence from `obs.bid_history` (§4.4): the
/// buyer's strength tier, per-passer weak-suit inferences, and the derived
/// safe/avoid lead suits plus a guess at what partner likely holds.
pub fn read(obs: &Observation) -> BidRead {
    let buyer_strength_tier = buyer_tier(obs);

    let hokum_suits: BTreeSet<Suit> = obs
        .bid_history
        .iter()
        .filter_map(|b| match b.action {
            BidAction::Hokum(suit) => Some(suit),
            _ => None,
        })
        .collect();

    let mut passer_weak_suits = Vec::new();
    for bid in &obs.bid_history {
        if bid.action.is_pass() {
            for &suit in &hokum_suits {
                passer_weak_suits.push((bid.seat, suit));
            }
        }
    }

    let partner = obs.partner();
    let partner_likely_has: Vec<Suit> = obs
        .bid_history
        .iter()
        .filter(|b| b.seat == partner)
        .filter_map(|b| match b.action {
            BidAction::Hokum(suit) => Some(suit),
            _ => None,
        })
        .collect();

    let avoid_leads: Vec<Suit> = passer_weak_suits
        .iter()
        .filter(|(seat, _)| *seat != obs.my_position && *seat != partner)
        .map(|(_, suit)| *suit)
        .collect();

    let safe_leads: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|s| !avoid_leads.contains(s) && !partner_likely_has.contains(s))
        .collect();

    BidRead {
        buyer_strength_tier,
        passer_weak_suits,
        play_implications: PlayImplications {
            safe_leads,
            avoid_leads,
            partner_likely_has,
        },
    }
}

fn buyer_tier(obs: &Observation) -> BuyerStrengthTier {
    let commitments = obs
        .bid_history
        .iter()
        .filter(|b| b.action.is_mode_commitment())
        .count();

    if obs.doubling_level != DoublingLevel::None && commitments <= 1 {
        return BuyerStrengthTier::Overbid;
    }

    match commitments {
        0 | 1 => BuyerStrengthTier::Strong,
        2 => BuyerStrengthTier::Marginal,
        _ => BuyerStrengthTier::Overbid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{Bid, BiddingContext, Card, Difficulty, Hand, Personality, Phase, Rank, TeamScore};

    fn obs_with(bid_history: Vec<Bid>, doubling: DoublingLevel) -> Observation {
        Observation {
            my_position: Position::P0,
            bid_history,
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: doubling,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Expert,
            rng_seed: 0,
            phase: Phase::Bidding(BiddingContext {
                hand: Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Clubs)]),
                face_up_card: None,
                legal_actions: Vec::new(),
            }),
        }
    }

    #[test]
    fn a_single_commitment_reads_as_strong() {
        let obs = obs_with(
            vec![Bid::new(Position::P1, BidAction::Hokum(Suit::Hearts))],
            DoublingLevel::None,
        );
        let bid_read = read(&obs);
        assert_eq!(bid_read.buyer_strength_tier, BuyerStrengthTier::Strong);
    }

    #[test]
    fn a_doubled_single_commitment_reads_as_overbid() {
        let obs = obs_with(
            vec![Bid::new(Position::P1, BidAction::Hokum(Suit::Hearts))],
            DoublingLevel::Double,
        );
        let bid_read = read(&obs);
        assert_eq!(bid_read.buyer_strength_tier, BuyerStrengthTier::Overbid);
    }

    #[test]
    fn a_passer_is_inferred_weak_in_the_bid_suit() {
        let obs = obs_with(
            vec![
                Bid::new(Position::P1, BidAction::Pass),
                Bid::new(Position::P2, BidAction::Hokum(Suit::Spades)),
            ],
            DoublingLevel::None,
        );
        let bid_read = read(&obs);
        assert!(bid_read
            .passer_weak_suits
            .contains(&(Position::P1, Suit::Spades)));
    }
}
