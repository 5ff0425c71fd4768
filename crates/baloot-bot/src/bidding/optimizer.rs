use baloot_core::model::{BidAction, BidComponents, BidDecision, Observation};

use crate::evaluation::score_pressure;
use crate::params::BotParams;

use super::{hokum_evaluator, sun_evaluator};

const BASE_SUN_THRESHOLD: f32 = 4.0;
const BASE_HOKUM_THRESHOLD: f32 = 3.5;
const DOUBLE_TRICK_THRESHOLD: f32 = 6.5;
const DOUBLE_QUICK_THRESHOLD: f32 = 3.0;
const STEAL_MARGIN: f32 = 1.0;

/// Assembles a full [`BidDecision`] from the sun/hokum evaluators, hand
/// shape, and score pressure (§4.3). Returns `PASS` when neither mode clears
/// its adjusted threshold.
pub fn decide(obs: &Observation, params: &BotParams) -> BidDecision {
    let Some(ctx) = obs.bidding() else {
        return BidDecision {
            action: BidAction::Pass,
            confidence: 0.0,
            reasoning: "optimizer invoked outside the bidding phase".to_string(),
            components: BidComponents::default(),
            modules_consulted: vec!["bid_optimizer".to_string()],
        };
    };

    let sun = sun_evaluator::evaluate(&ctx.hand);
    let hokum = hokum_evaluator::best_suit(&ctx.hand);
    let pressure = score_pressure::bid_pressure(&obs.match_score);

    let position_bonus = (obs.bid_history.len().min(3) as f32) * params.bid_position_late_bonus;

    let adjusted_sun_threshold = BASE_SUN_THRESHOLD - pressure.bid_threshold_delta * BASE_SUN_THRESHOLD;
    let adjusted_hokum_threshold =
        BASE_HOKUM_THRESHOLD - pressure.bid_threshold_delta * BASE_HOKUM_THRESHOLD;

    let sun_fires = sun.projected_tricks >= adjusted_sun_threshold;
    let hokum_fires = hokum
        .map(|h| h.projected_tricks >= adjusted_hokum_threshold)
        .unwrap_or(false);

    let mut components = BidComponents {
        sun_strength: sun.strength,
        hokum_strength: hokum.map(|h| h.strength).unwrap_or(0.0),
        projected_sun_tricks: sun.projected_tricks,
        projected_hokum_tricks: hokum.map(|h| h.projected_tricks).unwrap_or(0.0),
        shape_adjustment: hokum
            .map(|h| h.shape_adjustment)
            .unwrap_or(sun.shape_adjustment),
        score_pressure_delta: pressure.bid_threshold_delta,
        position_bonus,
    };

    let prefer_hokum = hokum_fires
        && (!sun_fires || hokum.map(|h| h.strength).unwrap_or(0.0) >= sun.strength);

    let (action, confidence, reasoning) = if prefer_hokum {
        let h = hokum.expect("hokum_fires implies Some");
        let confidence = (0.5 + (h.projected_tricks - adjusted_hokum_threshold) * 0.1
            + position_bonus)
            .clamp(params.confidence_floor, 1.0);
        (
            BidAction::Hokum(h.suit),
            confidence,
            format!(
                "HOKUM {:?}: projected {:.1} tricks clears adjusted threshold {:.2}",
                h.suit, h.projected_tricks, adjusted_hokum_threshold
            ),
        )
    } else if sun_fires {
        let confidence = (0.5 + (sun.projected_tricks - adjusted_sun_threshold) * 0.1
            + position_bonus)
            .clamp(params.confidence_floor, 1.0);
        (
            BidAction::Sun,
            confidence,
            format!(
                "SUN: projected {:.1} tricks clears adjusted threshold {:.2}",
                sun.projected_tricks, adjusted_sun_threshold
            ),
        )
    } else if let Some(steal) = should_steal(obs, &components) {
        components.hokum_strength = components.hokum_strength.max(steal.strength);
        (
            BidAction::Hokum(steal.suit),
            0.55,
            format!(
                "gablak: stealing {:?} from a committed opponent with margin {:.2}",
                steal.suit, steal.margin
            ),
        )
    } else {
        (
            BidAction::Pass,
            0.5,
            format!(
                "neither SUN ({:.1} < {:.2}) nor HOKUM ({:.1} < {:.2}) clears threshold",
                sun.projected_tricks,
                adjusted_sun_threshold,
                hokum.map(|h| h.projected_tricks).unwrap_or(0.0),
                adjusted_hokum_threshold
            ),
        )
    };

    BidDecision {
        action,
        confidence,
        reasoning,
        components,
        modules_consulted: vec![
            "sun_evaluator".to_string(),
            "hokum_evaluator".to_string(),
            "bid_optimizer".to_string(),
        ],
    }
}

/// `should_double` (§4.3): a quick, high-confidence sweep is worth escalating.
pub fn should_double(components: &BidComponents, pressure_permits: bool) -> bool {
    components.projected_hokum_tricks.max(components.projected_sun_tricks) >= DOUBLE_TRICK_THRESHOLD
        && pressure_permits
}

struct StealCandidate {
    suit: baloot_core::model::Suit,
    strength: f32,
    margin: f32,
}

/// `should_steal` (gablak, §4.3): an opponent has already committed to a
/// mode and our hand, evaluated in that same mode, beats their inferred
/// strength by a margin.
fn should_steal(obs: &Observation, components: &BidComponents) -> Option<StealCandidate> {
    let Some(ctx) = obs.bidding() else { return None };
    let opponent_committed = obs.bid_history.iter().find(|bid| {
        !obs.my_position.same_team(bid.seat) && bid.action.is_mode_commitment()
    })?;

    let suit = match opponent_committed.action {
        BidAction::Hokum(suit) => suit,
        _ => return None,
    };

    let hokum = hokum_evaluator::best_suit(&ctx.hand)?;
    if hokum.suit != suit {
        return None;
    }
    let margin = components.hokum_strength - BASE_HOKUM_THRESHOLD;
    if margin >= STEAL_MARGIN {
        Some(StealCandidate {
            suit,
            strength: hokum.strength,
            margin,
        })
    } else {
        None
    }
}
