use baloot_core::model::{Card, Observation, PlayDecision, StrategyLabel, Suit};

use crate::hints::Hints;

const LEADING_CONFIDENCE_MIN: f32 = 0.25;
const FOLLOWING_CONFIDENCE_MIN: f32 = 0.20;

struct LegalCard {
    index: usize,
    card: Card,
}

fn legal_cards(obs: &Observation) -> Vec<LegalCard> {
    let ctx = obs.playing().expect("cooperative_play requires playing phase");
    ctx.legal_actions
        .iter()
        .map(|&index| LegalCard {
            index,
            card: ctx.hand.cards()[index],
        })
        .collect()
}

fn lowest_in_suit(cards: &[LegalCard], suit: Suit) -> Option<&LegalCard> {
    cards.iter().filter(|lc| lc.card.suit == suit).min_by_key(|lc| lc.card.rank.value())
}

fn highest_in_suit(cards: &[LegalCard], suit: Suit) -> Option<&LegalCard> {
    cards.iter().filter(|lc| lc.card.suit == suit).max_by_key(|lc| lc.card.rank.value())
}

/// Bridges `partner_read` into a leading override (§4.5): feed a suit we
/// know partner is strong in, steer away from a suit we know they're void
/// in, draw trump on their behalf when they can't, or set up a run in our
/// own long suit as a last resort. Silent below [`LEADING_CONFIDENCE_MIN`]
/// partner-read confidence — there's nothing to bridge yet.
pub fn leading_override(obs: &Observation, hints: &Hints) -> Option<PlayDecision> {
    let ctx = obs.playing()?;
    let partner_read = &hints.partner_read;
    if partner_read.confidence < LEADING_CONFIDENCE_MIN {
        return None;
    }
    let cards = legal_cards(obs);

    if let Some(&suit) = partner_read.likely_strong_suits.first() {
        if let Some(lc) = lowest_in_suit(&cards, suit) {
            return Some(decision(
                lc.index,
                StrategyLabel::FeedStrong,
                partner_read.confidence,
                format!("leading low into partner's strong suit {suit:?}"),
            ));
        }
    }

    if let Some(trump) = ctx.contract.trump {
        if partner_read.estimated_trumps == 0 {
            let trump_count = cards.iter().filter(|lc| lc.card.suit == trump).count();
            if trump_count >= 2 {
                if let Some(lc) = highest_in_suit(&cards, trump) {
                    return Some(decision(
                        lc.index,
                        StrategyLabel::TrumpDraw,
                        partner_read.confidence,
                        "partner shows no trumps of their own: drawing on their behalf".to_string(),
                    ));
                }
            }
        }
    }

    if !partner_read.likely_void_suits.is_empty() {
        if let Some(suit) = Suit::ALL
            .into_iter()
            .filter(|s| Some(*s) != ctx.contract.trump)
            .find(|s| !partner_read.likely_void_suits.contains(s) && cards.iter().any(|lc| lc.card.suit == *s))
        {
            if let Some(lc) = lowest_in_suit(&cards, suit) {
                return Some(decision(
                    lc.index,
                    StrategyLabel::AvoidVoid,
                    partner_read.confidence,
                    format!("steering away from {:?}, where partner shows void", partner_read.likely_void_suits[0]),
                ));
            }
        }
    }

    let longest = Suit::ALL
        .into_iter()
        .filter(|s| Some(*s) != ctx.contract.trump)
        .max_by_key(|&s| cards.iter().filter(|lc| lc.card.suit == s).count())?;
    if cards.iter().filter(|lc| lc.card.suit == longest).count() >= 3 {
        let lc = highest_in_suit(&cards, longest)?;
        return Some(decision(
            lc.index,
            StrategyLabel::SetupRun,
            partner_read.confidence,
            format!("setting up a run in our long suit {longest:?} for partner to read"),
        ));
    }

    None
}

/// Bridges `partner_read` into a following override (§4.5) once we're void
/// on the led suit — protect partner's winning trick, discard into a suit
/// they're also void in, or reinforce with trump when they're carrying
/// strength of their own. Silent below [`FOLLOWING_CONFIDENCE_MIN`].
pub fn following_override(obs: &Observation, hints: &Hints) -> Option<PlayDecision> {
    let ctx = obs.playing()?;
    let partner_read = &hints.partner_read;
    if partner_read.confidence < FOLLOWING_CONFIDENCE_MIN {
        return None;
    }

    let lead_suit = ctx.current_trick.lead_suit()?;
    let cards = legal_cards(obs);
    if cards.iter().any(|lc| lc.card.suit == lead_suit) {
        return None;
    }

    let current_best = ctx.current_trick.current_best(ctx.contract)?;
    let partner_winning = current_best.position == obs.partner();

    if partner_winning {
        if partner_read.has_high_trumps {
            if let Some(trump) = ctx.contract.trump {
                if let Some(lc) = lowest_in_suit(&cards, trump) {
                    return Some(decision(
                        lc.index,
                        StrategyLabel::TrumpSupport,
                        partner_read.confidence,
                        "partner is carrying high trumps: reinforcing with a small trump".to_string(),
                    ));
                }
            }
        }

        let lc = cards
            .iter()
            .filter(|lc| Some(lc.card.suit) != ctx.contract.trump)
            .max_by_key(|lc| lc.card.rank.value())
            .or_else(|| cards.iter().max_by_key(|lc| lc.card.rank.value()))?;
        return Some(decision(
            lc.index,
            StrategyLabel::Sacrifice,
            partner_read.confidence,
            "partner already holds the trick: discarding a card we no longer need".to_string(),
        ));
    }

    if let Some(&suit) = partner_read
        .likely_void_suits
        .iter()
        .find(|s| cards.iter().any(|lc| lc.card.suit == **s))
    {
        if let Some(lc) = highest_in_suit(&cards, suit) {
            return Some(decision(
                lc.index,
                StrategyLabel::SmartDiscard,
                partner_read.confidence,
                format!("discarding in {suit:?}, where partner is also void"),
            ));
        }
    }

    None
}

fn decision(card_index: usize, strategy_label: StrategyLabel, confidence: f32, reasoning: String) -> PlayDecision {
    PlayDecision {
        card_index,
        strategy_label,
        confidence,
        reasoning,
        modules_consulted: vec!["partner_read".to_string(), "cooperative_play".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Bid, BidAction, Contract, Difficulty, Hand, Personality, Phase, Play, PlayingContext,
        Position, Rank, SeatInTrick, TeamScore, TrickInProgress,
    };
    use baloot_core::tracker::CardTracker;

    fn obs_with(hand: Hand, bid_history: Vec<Bid>, table: Vec<Play>, seat: u8) -> Observation {
        let legal_actions = (0..hand.len()).collect();
        Observation {
            my_position: Position::P0,
            bid_history,
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: baloot_core::model::DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty: Difficulty::Expert,
            rng_seed: 0,
            phase: Phase::Playing(PlayingContext {
                hand,
                contract: Contract::sun(),
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: 0,
                current_trick: TrickInProgress::with_plays(table),
                seat_in_trick: SeatInTrick(seat),
                trick_history: Vec::new(),
                legal_actions,
            }),
        }
    }

    #[test]
    fn feeds_partners_known_strong_suit_when_leading() {
        let hand = Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Hearts), Card::new(Rank::Eight, Suit::Clubs)]);
        let obs = obs_with(
            hand.clone(),
            vec![Bid::new(Position::P2, BidAction::Hokum(Suit::Hearts))],
            Vec::new(),
            1,
        );
        let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
        let hints = Hints::gather(&obs, &tracker);
        let result = leading_override(&obs, &hints).expect("partner bid hokum hearts");
        assert_eq!(result.strategy_label, StrategyLabel::FeedStrong);
    }

    #[test]
    fn insufficient_confidence_yields_no_override() {
        let hand = Hand::with_cards(vec![Card::new(Rank::Seven, Suit::Hearts)]);
        let obs = obs_with(hand.clone(), Vec::new(), Vec::new(), 1);
        let tracker = CardTracker::new(Difficulty::Expert, 0, hand.cards());
        let hints = Hints::gather(&obs, &tracker);
        assert!(leading_override(&obs, &hints).is_none());
    }
}
