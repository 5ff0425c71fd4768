//! Deterministic tournament/benchmark harness for `baloot-bot` (SPEC_FULL.md
//! §0, §10.7). Drives many simulated rounds through the decision core's
//! public API via a deliberately minimal mock host (see [`host`]) and
//! aggregates the quantified properties in spec.md §8 (P9 difficulty
//! ordering, P10 personality footprint). This is test tooling, not the
//! product the core ships as.

pub mod analytics;
pub mod config;
pub mod host;
pub mod logging;
pub mod tournament;
