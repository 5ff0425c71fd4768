use serde::{Deserialize, Serialize};

/// Behavioral profile applied as a post-processing filter after the brain
/// cascade returns (§4.8). Pure data here; the adjustments themselves live
/// in `baloot-bot::personality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Personality {
    Aggressive,
    Conservative,
    Tricky,
    #[default]
    Balanced,
}

/// Skill tier applied as a post-processing filter (§4.8). Gates card-tracker
/// fidelity, play noise, and kaboot pursuit aggressiveness; the adjustments
/// themselves live in `baloot-bot::difficulty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}
