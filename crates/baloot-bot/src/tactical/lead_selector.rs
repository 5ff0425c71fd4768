use baloot_core::model::{Card, Observation, PlayDecision, StrategyLabel, Suit};
use baloot_core::tracker::CardTracker;

use crate::hints::Hints;
use crate::inference::Momentum;
use crate::macro_plan::trump_manager::TrumpAction;

const PARTNER_FEED_CONFIDENCE: f32 = 0.4;

struct LegalCard {
    index: usize,
    card: Card,
}

fn legal_cards(obs: &Observation) -> Vec<LegalCard> {
    let ctx = obs.playing().expect("lead_selector requires playing phase");
    ctx.legal_actions
        .iter()
        .map(|&index| LegalCard {
            index,
            card: ctx.hand.cards()[index],
        })
        .collect()
}

fn shortest_suit_with<'a>(
    cards: &'a [LegalCard],
    predicate: impl Fn(&LegalCard) -> bool,
) -> Option<Suit> {
    let mut counts = std::collections::HashMap::new();
    for lc in cards.iter().filter(|lc| predicate(lc)) {
        *counts.entry(lc.card.suit).or_insert(0usize) += 1;
    }
    counts.into_iter().min_by_key(|&(_, n)| n).map(|(s, _)| s)
}

fn lowest_in_suit(cards: &[LegalCard], suit: Suit) -> Option<&LegalCard> {
    cards
        .iter()
        .filter(|lc| lc.card.suit == suit)
        .min_by_key(|lc| lc.card.rank.value())
}

fn highest_in_suit(cards: &[LegalCard], suit: Suit) -> Option<&LegalCard> {
    cards
        .iter()
        .filter(|lc| lc.card.suit == suit)
        .max_by_key(|lc| lc.card.rank.value())
}

fn highest_overall(cards: &[LegalCard]) -> &LegalCard {
    cards
        .iter()
        .max_by_key(|lc| lc.card.rank.value())
        .expect("at least one legal card")
}

/// Picks the opening card of a trick following the §4.5 priority cascade.
/// Always returns a decision — step 8 (longest non-trump's lowest card) is
/// the unconditional fallback.
pub fn select(obs: &Observation, hints: &Hints, tracker: &CardTracker) -> PlayDecision {
    let ctx = obs.playing().expect("lead_selector requires playing phase");
    let cards = legal_cards(obs);
    let trump = ctx.contract.trump;

    // 1. MASTER_CASH: lead a master from our shortest side suit.
    if let Some(master_suit) = shortest_suit_with(&cards, |lc| {
        tracker.is_master(lc.card, ctx.contract) && Some(lc.card.suit) != trump
    }) {
        if let Some(lc) = highest_in_suit(&cards, master_suit) {
            return decision(
                lc.index,
                StrategyLabel::MasterCash,
                0.8,
                format!("{} is a master in our shortest side suit {:?}", lc.card, master_suit),
                vec!["lead_selector".to_string()],
            );
        }
    }

    // 2. TRUMP_DRAW: honour trump_manager's DRAW directive.
    if let Some(tm) = &hints.trump_manager {
        if tm.action == TrumpAction::Draw && tm.lead_trump {
            if let Some(trump_suit) = trump {
                if let Some(lc) = highest_in_suit(&cards, trump_suit) {
                    return decision(
                        lc.index,
                        StrategyLabel::TrumpDraw,
                        0.75,
                        "trump manager calls for drawing trumps".to_string(),
                        vec!["trump_manager".to_string(), "lead_selector".to_string()],
                    );
                }
            }
        }
    }

    // 3. DEFENSE_PRIORITY: follow the bid reader's safe/avoid leads when defending.
    if !ctx.we_are_buyers {
        for &suit in &hints.bid_read.play_implications.safe_leads {
            if let Some(lc) = lowest_in_suit(&cards, suit) {
                return decision(
                    lc.index,
                    StrategyLabel::DefensePriority,
                    0.6,
                    format!("defending: {:?} is a safe lead per the bid reader", suit),
                    vec!["bid_reader".to_string(), "lead_selector".to_string()],
                );
            }
        }
    }

    // 4. PARTNER_FEED: lead low into partner's strongest suit when confident.
    if hints.partner_read.confidence >= PARTNER_FEED_CONFIDENCE {
        for &suit in &hints.partner_read.likely_strong_suits {
            if let Some(lc) = lowest_in_suit(&cards, suit) {
                return decision(
                    lc.index,
                    StrategyLabel::PartnerFeed,
                    hints.partner_read.confidence,
                    format!("feeding partner's strong suit {:?}", suit),
                    vec!["partner_read".to_string(), "lead_selector".to_string()],
                );
            }
        }
    }

    // 5. LONG_RUN: lead high from a 4+ card suit topped by an Ace.
    for suit in Suit::ALL {
        let count = cards.iter().filter(|lc| lc.card.suit == suit).count();
        if count >= 4 {
            if let Some(lc) = highest_in_suit(&cards, suit) {
                if lc.card.rank == baloot_core::model::Rank::Ace {
                    return decision(
                        lc.index,
                        StrategyLabel::LongRun,
                        0.65,
                        format!("long run in {:?} topped by the Ace", suit),
                        vec!["lead_selector".to_string()],
                    );
                }
            }
        }
    }

    // 6. Avoid opponent-model avoid-lead suits when an alternative exists.
    let avoided: Vec<_> = cards
        .iter()
        .filter(|lc| !hints.opponent_model.avoid_lead_suits.contains(&lc.card.suit))
        .collect();
    let pool: Vec<&LegalCard> = if avoided.is_empty() {
        cards.iter().collect()
    } else {
        avoided
    };

    // 7. DESPERATION: losing late in the round, lead our highest card.
    if ctx.tricks_played >= 6 && matches!(hints.trick_review.momentum, Momentum::Losing | Momentum::Collapsing) {
        let lc = pool
            .iter()
            .max_by_key(|lc| lc.card.rank.value())
            .copied()
            .unwrap_or_else(|| highest_overall(&cards));
        return decision(
            lc.index,
            StrategyLabel::Desperation,
            0.55,
            "losing late in the round: leading our highest card".to_string(),
            vec!["trick_review".to_string(), "lead_selector".to_string()],
        );
    }

    // 8. Default: longest non-trump suit's lowest card.
    let longest_non_trump = Suit::ALL
        .into_iter()
        .filter(|&s| Some(s) != trump)
        .max_by_key(|&s| pool.iter().filter(|lc| lc.card.suit == s).count());

    if let Some(suit) = longest_non_trump {
        if let Some(lc) = pool.iter().filter(|lc| lc.card.suit == suit).min_by_key(|lc| lc.card.rank.value()) {
            return decision(
                lc.index,
                StrategyLabel::DefaultLead,
                0.5,
                format!("default lead: lowest card of our longest side suit {:?}", suit),
                vec!["lead_selector".to_string()],
            );
        }
    }

    let fallback = pool.first().copied().unwrap_or_else(|| highest_overall(&cards));
    decision(
        fallback.index,
        StrategyLabel::DefaultLead,
        0.5,
        "default lead: no clearer signal available".to_string(),
        vec!["lead_selector".to_string()],
    )
}

fn decision(
    card_index: usize,
    strategy_label: StrategyLabel,
    confidence: f32,
    reasoning: String,
    modules_consulted: Vec<String>,
) -> PlayDecision {
    PlayDecision {
        card_index,
        strategy_label,
        confidence,
        reasoning,
        modules_consulted,
    }
}
