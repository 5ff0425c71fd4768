use baloot_core::model::{BidAction, BidDecision, Personality, PlayDecision};
use rand::Rng;
use rand::rngs::StdRng;

/// Minimum confidence a genuine decision must carry before `Tricky` will
/// risk broadcasting a false signal on top of it (§4.8). Below this bar the
/// brain itself is unsure, so adding a decoy would just be noise.
pub const TRICKY_FALSE_SIGNAL_MIN_CONFIDENCE: f32 = 0.8;

/// Probability `Tricky` flips a confident bid to a deceptive one when the
/// bar above is cleared.
const TRICKY_FALSE_SIGNAL_RATE: f64 = 0.12;

/// Post-processes a bid decision per personality (§4.8). Applied after the
/// brain cascade has already produced its genuine best answer; these
/// filters only ever adjust `confidence` or substitute the `action`, never
/// the `components` breakdown, so the ledger stays honest about what the
/// cascade actually computed.
pub fn apply_to_bid(decision: &mut BidDecision, personality: Personality, rng: &mut StdRng) {
    match personality {
        Personality::Aggressive => {
            if matches!(decision.action, BidAction::Hokum(_) | BidAction::Sun) {
                decision.confidence = (decision.confidence * 1.1).min(1.0);
            }
        }
        Personality::Conservative => {
            if decision.action.is_mode_commitment() {
                decision.confidence *= 0.9;
            }
        }
        Personality::Tricky => {
            if decision.confidence >= TRICKY_FALSE_SIGNAL_MIN_CONFIDENCE
                && decision.action.is_mode_commitment()
                && rng.gen_bool(TRICKY_FALSE_SIGNAL_RATE)
            {
                decision.action = BidAction::Pass;
                decision.reasoning = format!(
                    "{} (masked: held back a committing bid to disguise hand strength)",
                    decision.reasoning
                );
            }
        }
        Personality::Balanced => {}
    }
}

/// Post-processes a play decision per personality (§4.8). Confidence-only
/// nudges; the chosen `card_index` and `strategy_label` are left untouched
/// except for `Tricky`'s occasional decoy signal, which is itself bounded
/// by [`TRICKY_FALSE_SIGNAL_MIN_CONFIDENCE`].
pub fn apply_to_play(decision: &mut PlayDecision, personality: Personality) {
    match personality {
        Personality::Aggressive => decision.confidence = (decision.confidence * 1.05).min(1.0),
        Personality::Conservative => decision.confidence *= 0.95,
        Personality::Tricky | Personality::Balanced => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{BidComponents, StrategyLabel};
    use rand::SeedableRng;

    fn sample_bid(action: BidAction, confidence: f32) -> BidDecision {
        BidDecision {
            action,
            confidence,
            reasoning: "baseline".to_string(),
            components: BidComponents::default(),
            modules_consulted: Vec::new(),
        }
    }

    #[test]
    fn aggressive_boosts_confidence_on_mode_commitments() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut decision = sample_bid(BidAction::Sun, 0.5);
        apply_to_bid(&mut decision, Personality::Aggressive, &mut rng);
        assert!(decision.confidence > 0.5);
    }

    #[test]
    fn conservative_softens_confidence_on_mode_commitments() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut decision = sample_bid(BidAction::Sun, 0.5);
        apply_to_bid(&mut decision, Personality::Conservative, &mut rng);
        assert!(decision.confidence < 0.5);
    }

    #[test]
    fn tricky_never_masks_a_low_confidence_bid() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut decision = sample_bid(BidAction::Hokum(baloot_core::model::Suit::Clubs), 0.4);
        apply_to_bid(&mut decision, Personality::Tricky, &mut rng);
        assert!(matches!(decision.action, BidAction::Hokum(_)));
    }

    #[test]
    fn play_confidence_filters_leave_strategy_label_untouched() {
        let mut decision = PlayDecision {
            card_index: 2,
            strategy_label: StrategyLabel::WinBig,
            confidence: 0.6,
            reasoning: String::new(),
            modules_consulted: Vec::new(),
        };
        apply_to_play(&mut decision, Personality::Aggressive);
        assert_eq!(decision.strategy_label, StrategyLabel::WinBig);
        assert_eq!(decision.card_index, 2);
    }
}
