//! Harmonic fusion of discrete cyclic categories with continuous longitudes.
//!
//! Categories become reference phasors at their sector centers, body
//! longitudes become object phasors, and each order k is compared
//! independently through intensity, cross term and a bounded alignment.

pub mod config;
pub mod error;
pub mod harmonics;
pub mod phasor;

pub use config::{DEFAULT_EPSILON, DEFAULT_ORDERS, HarmonicConfig, PhaseConvention};
pub use error::FusionError;
pub use harmonics::{
    FusionSummary, HarmonicResult, PhaseEntry, PhaseSide, WeightedBody, WeightedCategory,
    category_angle_deg, compute_harmonics, object_angle_deg, summarize,
};
pub use phasor::{Phasor, harmonic_phase_deg, phasor_sum, weighted_unit};
