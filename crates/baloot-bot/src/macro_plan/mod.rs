//! Multi-trick planning (§4.6): the kaboot pursuit tracker, the mid-game
//! planner, the endgame solver, and HOKUM trump management. Each module is
//! consulted by the brain cascade in priority order and is free to decline
//! (return `None`) when its situation doesn't apply.

pub mod endgame;
pub mod kaboot;
pub mod mid_game;
pub mod trump_manager;

pub use endgame::{solve as solve_endgame, EndgameOutput};
pub use kaboot::{assess as assess_kaboot, KabootAssessment, KabootStatus};
pub use mid_game::{plan as plan_mid_game, MidGamePlan};
pub use trump_manager::{plan as plan_trump, TrumpAction, TrumpManagerOutput};
