//! Engine-level configuration.
//!
//! [`EngineConfig`] bundles the time model, branch geometry, ruleset and
//! fusion settings for one run. It loads from JSON, validates every part,
//! projects into the per-crate config types and exposes a SHA-256
//! fingerprint of its canonical form.

pub mod engine;
pub mod error;
pub mod fusion;

pub use engine::EngineConfig;
pub use error::ConfigError;
pub use fusion::{DEFAULT_KAPPA, FusionMode, FusionSettings};
