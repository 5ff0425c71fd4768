//! Hand evaluators (§4.2): shape classification, trick projection, score
//! pressure/context, and point density. These are pure functions consulted
//! by both the bidding pipeline and the tactical/macro play pipeline.

pub mod hand_shape;
pub mod point_density;
pub mod score_pressure;
pub mod trick_projection;

pub use hand_shape::{HandShape, ShapeType};
pub use point_density::{Density, PointDensity};
pub use score_pressure::{BidPressure, MatchPhase, PlayPressure, Situation};
pub use trick_projection::TrickProjection;
