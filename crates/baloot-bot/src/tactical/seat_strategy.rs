use baloot_core::model::{Card, Observation, PlayDecision, StrategyLabel};
use baloot_core::tracker::CardTracker;

struct LegalCard {
    index: usize,
    card: Card,
}

fn legal_cards(obs: &Observation) -> Vec<LegalCard> {
    let ctx = obs.playing().expect("seat_strategy requires playing phase");
    ctx.legal_actions
        .iter()
        .map(|&index| LegalCard {
            index,
            card: ctx.hand.cards()[index],
        })
        .collect()
}

/// Seat-in-trick refinements that run ahead of the general follow cascade
/// (§4.5), exploiting the later seats' perfect information about this trick.
/// Returns `None` when the seat has nothing special to say, letting
/// [`super::follow_optimizer::select`] decide instead. Only applies to
/// followers with a card to contest the led suit — a void hand has nothing
/// to refine here and falls straight through to the follow optimizer.
pub fn refine(obs: &Observation, tracker: &CardTracker) -> Option<PlayDecision> {
    let ctx = obs.playing()?;
    let lead_suit = ctx.current_trick.lead_suit()?;
    let cards = legal_cards(obs);
    let same_suit: Vec<&LegalCard> = cards.iter().filter(|lc| lc.card.suit == lead_suit).collect();
    if same_suit.is_empty() {
        return None;
    }

    let contract = ctx.contract;
    let current_best = ctx.current_trick.current_best(contract)?;
    let points = ctx.current_trick.point_total(contract);

    match ctx.seat_in_trick.0 {
        4 => {
            let winner = same_suit
                .iter()
                .filter(|lc| lc.card.beats(current_best.card, contract))
                .min_by_key(|lc| lc.card.rank.value())?;
            Some(decision(
                winner.index,
                StrategyLabel::Finesse4th,
                0.75,
                "last to play this trick: winning with the minimum card that does the job".to_string(),
            ))
        }
        3 => {
            let candidate = same_suit
                .iter()
                .filter(|lc| lc.card.beats(current_best.card, contract))
                .min_by_key(|lc| lc.card.rank.value())?;
            if tracker.is_master(candidate.card, contract) {
                return None;
            }
            let low = same_suit.iter().min_by_key(|lc| lc.card.rank.value())?;
            Some(decision(
                low.index,
                StrategyLabel::Hedge,
                0.55,
                "our cheapest winner isn't a master: the 4th seat could still beat it".to_string(),
            ))
        }
        2 => {
            let holds_master = same_suit
                .iter()
                .any(|lc| tracker.is_master(lc.card, contract));
            if holds_master || points >= 15 {
                let commit = same_suit
                    .iter()
                    .filter(|lc| lc.card.beats(current_best.card, contract))
                    .min_by_key(|lc| lc.card.rank.value())
                    .or_else(|| same_suit.iter().max_by_key(|lc| lc.card.rank.value()))?;
                Some(decision(
                    commit.index,
                    StrategyLabel::Commit,
                    0.6,
                    "first follower with a master or a rich trick in play: committing to win it".to_string(),
                ))
            } else {
                let duck = same_suit.iter().min_by_key(|lc| lc.card.rank.value())?;
                Some(decision(
                    duck.index,
                    StrategyLabel::Duck,
                    0.5,
                    "first follower with nothing decisive yet: ducking low".to_string(),
                ))
            }
        }
        _ => None,
    }
}

fn decision(card_index: usize, strategy_label: StrategyLabel, confidence: f32, reasoning: String) -> PlayDecision {
    PlayDecision {
        card_index,
        strategy_label,
        confidence,
        reasoning,
        modules_consulted: vec!["seat_strategy".to_string()],
    }
}
