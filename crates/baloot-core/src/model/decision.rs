use serde::{Deserialize, Serialize};

use crate::model::bid::BidAction;

/// Every distinct tactic a tactical selector, macro planner, or the brain
/// cascade itself can name as the reason for a play (§4.5-§4.7). Carried on
/// [`PlayDecision`] so a host can tell "the brain's real choice" apart from
/// a personality/difficulty perturbation after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyLabel {
    // Lead selector (§4.5)
    MasterCash,
    TrumpDraw,
    DefensePriority,
    PartnerFeed,
    LongRun,
    Desperation,
    DefaultLead,
    // Follow optimizer (§4.5)
    WinBig,
    WinCheap,
    Dodge,
    FeedPartner,
    TrumpIn,
    TrumpOver,
    ShedSafe,
    DefaultFollow,
    // Seat strategy (§4.5)
    Finesse4th,
    Hedge,
    Commit,
    Duck,
    // Cooperative play, leading (§4.5)
    FeedStrong,
    AvoidVoid,
    SetupRun,
    // Cooperative play, following (§4.5)
    Sacrifice,
    SmartDiscard,
    TrumpSupport,
    // Kaboot pursuit (§4.6)
    MasterFirst,
    LongSuit,
    // Mid-game planner (§4.6)
    CashAndExit,
    StripThenEndplay,
    TrumpForce,
    CountAndDuck,
    DesperationGambit,
    // Endgame solver (§4.6)
    EndgameOptimal,
    // §7 InternalLogicError recovery: trivial lowest-legal-card fallback.
    LowestLegalFallback,
}

/// Breakdown of the raw inputs the bid optimizer combined (§4.3), exposed so
/// a host can render "why" beyond the prose `reasoning` string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BidComponents {
    pub sun_strength: f32,
    pub hokum_strength: f32,
    pub projected_sun_tricks: f32,
    pub projected_hokum_tricks: f32,
    pub shape_adjustment: f32,
    pub score_pressure_delta: f32,
    pub position_bonus: f32,
}

/// Result of `decide_bid` (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidDecision {
    pub action: BidAction,
    pub confidence: f32,
    pub reasoning: String,
    pub components: BidComponents,
    pub modules_consulted: Vec<String>,
}

/// Result of `decide_play` (§3, §6). `card_index` indexes into the
/// `legal_actions` / hand the Observation carried — never an absolute rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayDecision {
    pub card_index: usize,
    pub strategy_label: StrategyLabel,
    pub confidence: f32,
    pub reasoning: String,
    pub modules_consulted: Vec<String>,
}

impl PlayDecision {
    pub fn fallback(card_index: usize, reasoning: impl Into<String>) -> Self {
        Self {
            card_index,
            strategy_label: StrategyLabel::LowestLegalFallback,
            confidence: 0.0,
            reasoning: reasoning.into(),
            modules_consulted: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_decision_carries_zero_confidence() {
        let decision = PlayDecision::fallback(0, "no module fired");
        assert_eq!(decision.confidence, 0.0);
        assert_eq!(decision.strategy_label, StrategyLabel::LowestLegalFallback);
    }
}
