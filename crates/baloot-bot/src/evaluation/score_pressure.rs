use baloot_core::model::TeamScore;

/// Match-progress bucket (§4.2). Thresholds are on the leading side's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Early,
    Mid,
    Late,
    MatchPoint,
}

/// How `us` is faring relative to `them` (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    Leading,
    Trailing,
    Neutral,
    Desperate,
}

fn phase_of(score: &TeamScore) -> MatchPhase {
    let leader = score.us.max(score.them);
    match leader {
        0..=49 => MatchPhase::Early,
        50..=99 => MatchPhase::Mid,
        100..=144 => MatchPhase::Late,
        _ => MatchPhase::MatchPoint,
    }
}

fn situation_of(score: &TeamScore, phase: MatchPhase) -> Situation {
    let diff = score.us as i64 - score.them as i64;
    if phase == MatchPhase::MatchPoint && diff < -20 {
        return Situation::Desperate;
    }
    match diff {
        d if d >= 15 => Situation::Leading,
        d if d <= -15 => Situation::Trailing,
        _ => Situation::Neutral,
    }
}

/// Bidding-time score pressure (§4.2): a threshold delta applied to the bid
/// optimizer's thresholds plus a doubling bias.
#[derive(Debug, Clone, Copy)]
pub struct BidPressure {
    pub phase: MatchPhase,
    pub situation: Situation,
    pub bid_threshold_delta: f32,
    pub doubling_bias: f32,
}

pub fn bid_pressure(match_score: &TeamScore) -> BidPressure {
    let phase = phase_of(match_score);
    let situation = situation_of(match_score, phase);
    // Positive delta relaxes the bid optimizer's trick thresholds (§4.3): a
    // trailing or desperate team needs points and bids more eagerly, a
    // leading team has no reason to take on unnecessary risk.
    let (bid_threshold_delta, doubling_bias) = match situation {
        Situation::Leading => (-0.05, -0.10),
        Situation::Trailing => (0.10, 0.05),
        Situation::Desperate => (0.25, 0.20),
        Situation::Neutral => (0.0, 0.0),
    };
    BidPressure {
        phase,
        situation,
        bid_threshold_delta: bid_threshold_delta.clamp(-0.25, 0.25),
        doubling_bias,
    }
}

/// Play-time score pressure (§4.2): an aggression modifier and risk
/// tolerance consulted by tactical selectors and macro planners.
#[derive(Debug, Clone, Copy)]
pub struct PlayPressure {
    pub phase: MatchPhase,
    pub situation: Situation,
    pub aggression_modifier: f32,
    pub risk_tolerance: f32,
}

pub fn play_pressure(match_score: &TeamScore) -> PlayPressure {
    let phase = phase_of(match_score);
    let situation = situation_of(match_score, phase);
    let (aggression_modifier, risk_tolerance) = match situation {
        Situation::Leading => (-0.10, 0.25),
        Situation::Trailing => (0.10, 0.55),
        Situation::Desperate => (0.30, 0.85),
        Situation::Neutral => (0.0, 0.40),
    };
    PlayPressure {
        phase,
        situation,
        aggression_modifier,
        risk_tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_big_lead_at_match_point_tightens_bidding() {
        let score = TeamScore::new(150, 100);
        let pressure = bid_pressure(&score);
        assert_eq!(pressure.phase, MatchPhase::MatchPoint);
        assert_eq!(pressure.situation, Situation::Leading);
        assert!(pressure.bid_threshold_delta < 0.0);
    }

    #[test]
    fn a_large_deficit_at_match_point_is_desperate() {
        let score = TeamScore::new(100, 140);
        let pressure = play_pressure(&score);
        assert_eq!(pressure.situation, Situation::Desperate);
        assert!(pressure.aggression_modifier > 0.2);
        assert!(pressure.risk_tolerance > 0.5);
    }

    #[test]
    fn close_scores_are_neutral() {
        let score = TeamScore::new(60, 58);
        let pressure = bid_pressure(&score);
        assert_eq!(pressure.situation, Situation::Neutral);
        assert_eq!(pressure.bid_threshold_delta, 0.0);
    }
}
