//! Difficulty-tier filters (§4.8): card-tracker fidelity is already gated
//! inside [`baloot_core::tracker::CardTracker`] (its `drop_rate`); this
//! module covers the other two tiers the spec assigns to difficulty — noise
//! applied to an already-decided play, and how eagerly the brain chases a
//! kaboot.

use rand::Rng;
use rand::rngs::StdRng;

use baloot_core::model::{Difficulty, Observation, PlayDecision};

const EASY_RANDOM_SWAP_RATE: f64 = 0.15;
const MEDIUM_SECOND_BEST_RATE: f64 = 0.10;

/// Applies difficulty-tier noise to an already-decided play (§4.8). EASY has
/// a 15% chance to swap to a uniformly random legal card; MEDIUM has a 10%
/// chance to swap to the legal card with the second-highest rank — a cheap
/// stand-in for "the second-best candidate" given the brain doesn't carry a
/// full per-candidate score. HARD and EXPERT never perturb the decision.
pub fn apply_noise(decision: &mut PlayDecision, obs: &Observation, rng: &mut StdRng) {
    let Some(ctx) = obs.playing() else { return };
    if ctx.legal_actions.len() <= 1 {
        return;
    }

    match obs.difficulty {
        Difficulty::Easy => {
            if rng.gen_bool(EASY_RANDOM_SWAP_RATE) {
                let pick = ctx.legal_actions[rng.gen_range(0..ctx.legal_actions.len())];
                if pick != decision.card_index {
                    decision.card_index = pick;
                    decision.confidence *= 0.5;
                    decision.reasoning =
                        format!("{} (easy-tier noise: swapped to a random legal card)", decision.reasoning);
                }
            }
        }
        Difficulty::Medium => {
            if rng.gen_bool(MEDIUM_SECOND_BEST_RATE) {
                let mut by_rank = ctx.legal_actions.clone();
                by_rank.sort_by_key(|&i| std::cmp::Reverse(ctx.hand.cards()[i].rank.value()));
                if let Some(&second) = by_rank.get(1) {
                    if second != decision.card_index {
                        decision.card_index = second;
                        decision.confidence *= 0.75;
                        decision.reasoning = format!(
                            "{} (medium-tier noise: swapped to the second-best candidate)",
                            decision.reasoning
                        );
                    }
                }
            }
        }
        Difficulty::Hard | Difficulty::Expert => {}
    }
}

/// EXPERT is the only tier the endgame solver activates for (§4.8); other
/// tiers defer straight to the mid-game planner once ≤3 cards remain.
pub fn endgame_solver_enabled(difficulty: Difficulty) -> bool {
    matches!(difficulty, Difficulty::Expert)
}

/// EXPERT additionally enables squeeze-aware endgame reasoning. The alpha-beta
/// search already finds squeeze lines by construction (it's exhaustive); this
/// flag exists for a host to label that behaviour distinctly in telemetry.
pub fn squeeze_detection_enabled(difficulty: Difficulty) -> bool {
    matches!(difficulty, Difficulty::Expert)
}

/// How eagerly the brain chases a kaboot once one is mathematically alive
/// (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KabootAggressiveness {
    Never,
    Passive,
    Active,
    Aggressive,
}

pub fn kaboot_aggressiveness(difficulty: Difficulty) -> KabootAggressiveness {
    match difficulty {
        Difficulty::Easy => KabootAggressiveness::Never,
        Difficulty::Medium => KabootAggressiveness::Passive,
        Difficulty::Hard => KabootAggressiveness::Active,
        Difficulty::Expert => KabootAggressiveness::Aggressive,
    }
}

/// Confidence multiplier applied to a kaboot-pursuit decision per tier —
/// passive play hedges, aggressive play leans in.
pub fn kaboot_confidence_multiplier(aggressiveness: KabootAggressiveness) -> f32 {
    match aggressiveness {
        KabootAggressiveness::Never => 0.0,
        KabootAggressiveness::Passive => 0.8,
        KabootAggressiveness::Active => 1.0,
        KabootAggressiveness::Aggressive => 1.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baloot_core::model::{
        Contract, Hand, Personality, Phase, PlayingContext, Position, Rank, SeatInTrick, Suit,
        StrategyLabel, TeamScore, TrickInProgress,
    };
    use baloot_core::model::Card;
    use rand::SeedableRng;

    fn obs_with(difficulty: Difficulty, hand: Hand) -> Observation {
        let legal_actions = (0..hand.len()).collect();
        Observation {
            my_position: Position::P0,
            bid_history: Vec::new(),
            round_score: TeamScore::default(),
            match_score: TeamScore::default(),
            doubling_level: baloot_core::model::DoublingLevel::None,
            declarations: Vec::new(),
            personality: Personality::Balanced,
            difficulty,
            rng_seed: 0,
            phase: Phase::Playing(PlayingContext {
                hand,
                contract: Contract::sun(),
                buyer: Position::P0,
                we_are_buyers: true,
                tricks_played: 0,
                current_trick: TrickInProgress::new(),
                seat_in_trick: SeatInTrick::LEADER,
                trick_history: Vec::new(),
                legal_actions,
            }),
        }
    }

    #[test]
    fn hard_and_expert_never_perturb_the_decision() {
        let hand = Hand::with_cards(vec![Card::new(Rank::Ace, Suit::Clubs), Card::new(Rank::Seven, Suit::Diamonds)]);
        let obs = obs_with(Difficulty::Expert, hand);
        let mut decision = PlayDecision {
            card_index: 0,
            strategy_label: StrategyLabel::DefaultLead,
            confidence: 0.9,
            reasoning: "baseline".to_string(),
            modules_consulted: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(1);
        apply_noise(&mut decision, &obs, &mut rng);
        assert_eq!(decision.card_index, 0);
        assert_eq!(decision.confidence, 0.9);
    }

    #[test]
    fn kaboot_aggressiveness_follows_the_difficulty_ladder() {
        assert_eq!(kaboot_aggressiveness(Difficulty::Easy), KabootAggressiveness::Never);
        assert_eq!(kaboot_aggressiveness(Difficulty::Expert), KabootAggressiveness::Aggressive);
        assert_eq!(kaboot_confidence_multiplier(KabootAggressiveness::Never), 0.0);
    }

    #[test]
    fn only_expert_enables_the_endgame_solver() {
        assert!(endgame_solver_enabled(Difficulty::Expert));
        assert!(!endgame_solver_enabled(Difficulty::Hard));
    }
}
