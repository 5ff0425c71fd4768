/// Tunable weights consulted across evaluation, bidding, and tactical
/// modules. Centralizing them here means a single struct literal captures a
/// whole behavioral tuning, and benchmarks can sweep it without touching
/// decision logic.
#[derive(Debug, Clone, Copy)]
pub struct BotParams {
    pub bid_strength_threshold: f32,
    pub bid_hokum_shape_bonus: f32,
    pub bid_partner_signal_weight: f32,
    pub bid_score_pressure_weight: f32,
    pub bid_position_late_bonus: f32,

    pub lead_master_bonus: f32,
    pub lead_trump_draw_bonus: f32,
    pub lead_defense_priority_bonus: f32,
    pub lead_partner_feed_bonus: f32,
    pub lead_long_run_bonus: f32,

    pub follow_win_big_bonus: f32,
    pub follow_win_cheap_bonus: f32,
    pub follow_dodge_bonus: f32,
    pub follow_feed_partner_bonus: f32,
    pub follow_trump_in_bonus: f32,
    pub follow_shed_safe_bonus: f32,

    pub kaboot_pursuit_threshold: f32,
    pub endgame_trick_budget: u8,
    pub endgame_time_budget_ms: u64,

    pub agreement_confidence_boost: f32,
    pub confidence_floor: f32,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            bid_strength_threshold: 0.52,
            bid_hokum_shape_bonus: 0.08,
            bid_partner_signal_weight: 0.15,
            bid_score_pressure_weight: 0.10,
            bid_position_late_bonus: 0.05,

            lead_master_bonus: 6.0,
            lead_trump_draw_bonus: 4.0,
            lead_defense_priority_bonus: 3.0,
            lead_partner_feed_bonus: 2.5,
            lead_long_run_bonus: 2.0,

            follow_win_big_bonus: 5.0,
            follow_win_cheap_bonus: 3.0,
            follow_dodge_bonus: 2.5,
            follow_feed_partner_bonus: 3.5,
            follow_trump_in_bonus: 4.5,
            follow_shed_safe_bonus: 1.5,

            kaboot_pursuit_threshold: 0.6,
            endgame_trick_budget: 5,
            endgame_time_budget_ms: 100,

            agreement_confidence_boost: 0.1,
            confidence_floor: 0.5,
        }
    }
}

impl BotParams {
    /// Applies `BALOOT_*` environment overrides on top of [`Default`]
    /// (§10.3), for the handful of knobs worth tuning without a recompile:
    /// the bid threshold and the kaboot-pursuit bar. Anything unset or
    /// unparsable keeps the default value.
    pub fn from_env() -> Self {
        let mut params = Self::default();
        if let Some(value) = env_f32("BALOOT_BID_STRENGTH_THRESHOLD") {
            params.bid_strength_threshold = value;
        }
        if let Some(value) = env_f32("BALOOT_KABOOT_PURSUIT_THRESHOLD") {
            params.kaboot_pursuit_threshold = value;
        }
        params
    }
}

fn env_f32(key: &str) -> Option<f32> {
    std::env::var(key).ok()?.trim().parse().ok()
}
