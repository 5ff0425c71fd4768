#![deny(warnings)]
pub mod error;
pub mod model;
pub mod tracker;

pub use error::{CoreError, CoreResult};
pub use tracker::CardTracker;
