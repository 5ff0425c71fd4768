use baloot_core::model::{Observation, PlayDecision, StrategyLabel, Suit};
use baloot_core::tracker::CardTracker;

use crate::inference::Momentum;

const TRICKS_REMAINING_LOW: u8 = 4;
const TRICKS_REMAINING_HIGH: u8 = 6;
const CONFIDENCE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct MidGamePlan {
    pub decision: PlayDecision,
    pub expected_tricks: f32,
}

struct Candidate {
    index: usize,
    suit: Suit,
}

fn legal_candidates(obs: &Observation) -> Vec<Candidate> {
    let ctx = obs.playing().expect("mid_game planner requires playing phase");
    ctx.legal_actions
        .iter()
        .map(|&index| Candidate {
            index,
            suit: ctx.hand.cards()[index].suit,
        })
        .collect()
}

fn tricks_remaining(obs: &Observation) -> u8 {
    let ctx = obs.playing().expect("mid_game planner requires playing phase");
    8 - ctx.tricks_played
}

/// Evaluates the mid-game priority list (§4.6), active for 4-6 tricks
/// remaining. Returns the first candidate plan with confidence >= 0.5.
pub fn plan(obs: &Observation, tracker: &CardTracker, momentum: Momentum) -> Option<MidGamePlan> {
    obs.playing()?;
    let remaining = tricks_remaining(obs);
    if !(TRICKS_REMAINING_LOW..=TRICKS_REMAINING_HIGH).contains(&remaining) {
        return None;
    }

    let candidates = legal_candidates(obs);

    if let Some(plan) = cash_and_exit(obs, tracker, &candidates) {
        return Some(plan);
    }
    if let Some(plan) = strip_then_endplay(obs, &candidates) {
        return Some(plan);
    }
    if let Some(plan) = trump_force(obs, &candidates) {
        return Some(plan);
    }
    if let Some(plan) = count_and_duck(obs, tracker, momentum, &candidates) {
        return Some(plan);
    }
    desperation_gambit(obs, momentum, &candidates)
        .filter(|plan| plan.decision.confidence >= CONFIDENCE_THRESHOLD)
}

fn cash_and_exit(obs: &Observation, tracker: &CardTracker, candidates: &[Candidate]) -> Option<MidGamePlan> {
    let ctx = obs.playing()?;
    let masters: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| tracker.is_master(ctx.hand.cards()[c.index], ctx.contract))
        .collect();
    let master = masters.first()?;
    let exit = candidates.iter().find(|c| c.suit != master.suit)?;

    Some(MidGamePlan {
        decision: PlayDecision {
            card_index: master.index,
            strategy_label: StrategyLabel::CashAndExit,
            confidence: 0.6,
            reasoning: format!(
                "cashing our master in {:?} with {:?} as the exit suit",
                master.suit, exit.suit
            ),
            modules_consulted: vec!["mid_game_planner".to_string()],
        },
        expected_tricks: 1.0,
    })
}

fn strip_then_endplay(obs: &Observation, candidates: &[Candidate]) -> Option<MidGamePlan> {
    let ctx = obs.playing()?;
    let suit = Suit::ALL.into_iter().find(|&s| {
        let held = ctx.hand.count_in_suit(s);
        held > 0 && held as usize == candidates.iter().filter(|c| c.suit == s).count() && held >= 2
    })?;
    let card = candidates.iter().find(|c| c.suit == suit)?;

    Some(MidGamePlan {
        decision: PlayDecision {
            card_index: card.index,
            strategy_label: StrategyLabel::StripThenEndplay,
            confidence: 0.55,
            reasoning: format!("stripping {:?}, where we hold every remaining card", suit),
            modules_consulted: vec!["mid_game_planner".to_string()],
        },
        expected_tricks: 1.0,
    })
}

fn trump_force(obs: &Observation, candidates: &[Candidate]) -> Option<MidGamePlan> {
    let ctx = obs.playing()?;
    let trump = ctx.contract.trump?;
    let card = candidates.iter().find(|c| c.suit != trump)?;

    Some(MidGamePlan {
        decision: PlayDecision {
            card_index: card.index,
            strategy_label: StrategyLabel::TrumpForce,
            confidence: 0.5,
            reasoning: "leading a non-trump non-master to exhaust opponents' trumps".to_string(),
            modules_consulted: vec!["mid_game_planner".to_string()],
        },
        expected_tricks: 0.5,
    })
}

fn count_and_duck(
    obs: &Observation,
    tracker: &CardTracker,
    momentum: Momentum,
    candidates: &[Candidate],
) -> Option<MidGamePlan> {
    let ctx = obs.playing()?;
    if momentum != Momentum::Losing {
        return None;
    }
    let has_future_winner = candidates
        .iter()
        .any(|c| tracker.is_master(ctx.hand.cards()[c.index], ctx.contract));
    if !has_future_winner {
        return None;
    }
    let lowest = candidates
        .iter()
        .min_by_key(|c| ctx.hand.cards()[c.index].rank.value())?;

    Some(MidGamePlan {
        decision: PlayDecision {
            card_index: lowest.index,
            strategy_label: StrategyLabel::CountAndDuck,
            confidence: 0.5,
            reasoning: "surrendering this trick cheaply while holding future winners".to_string(),
            modules_consulted: vec!["mid_game_planner".to_string()],
        },
        expected_tricks: 0.0,
    })
}

fn desperation_gambit(obs: &Observation, momentum: Momentum, candidates: &[Candidate]) -> Option<MidGamePlan> {
    let ctx = obs.playing()?;
    if momentum != Momentum::Collapsing && momentum != Momentum::Losing {
        return None;
    }
    let highest = candidates
        .iter()
        .max_by_key(|c| ctx.hand.cards()[c.index].rank.value())?;

    Some(MidGamePlan {
        decision: PlayDecision {
            card_index: highest.index,
            strategy_label: StrategyLabel::DesperationGambit,
            confidence: 0.5,
            reasoning: "losing badly: leading our highest card".to_string(),
            modules_consulted: vec!["mid_game_planner".to_string()],
        },
        expected_tricks: 0.3,
    })
}
