//! Twelve-category discretization for the BaZodiac engine.
//!
//! This crate provides:
//! - Hard assignment of longitudes and hours to half-open 30° sectors under
//!   one of two mutually exclusive conventions
//! - Soft (kernel) weights over the twelve sector centers
//! - Stems, branches and the 60-term cycle
//! - Year/month/day/hour pillar derivation from a [`Ruleset`]
//!
//! The single entry point for discretization is [`assign_branch`].

pub mod config;
pub mod cycle;
pub mod error;
pub mod mapping;
pub mod pillars;
pub mod ruleset;

pub use config::{
    BranchConvention, BranchCoordinateConfig, ConventionKind, DEFAULT_APEX_CENTER_DEG,
    DEFAULT_SECTOR_WIDTH_DEG,
};
pub use cycle::{ALL_BRANCHES, ALL_STEMS, Branch, Element, Sexagenary, Stem};
pub use error::BranchError;
pub use mapping::{
    AssignmentMode, BranchAssignment, BranchInput, BranchOutput, DEG_PER_HOUR,
    SOFT_WEIGHT_SUM_TOLERANCE, SoftWeights, assign_branch, sector_index, soft_weights,
};
pub use pillars::{
    BoundaryDiagnostics, FourPillars, HOUR_UNSTABLE_MIN, HiddenStems, MONTH_UNSTABLE_DEG,
    PillarInput, PillarOverrides, boundary_diagnostics, compute_pillars, day_pillar,
    hour_branch_index, hour_pillar, month_branch_index, month_pillar, year_pillar,
};
pub use ruleset::{
    DayCycleAnchor, HiddenStem, HiddenStemRole, LICHUN_DEG, MonthSegmentation, PillarWeights,
    Ruleset,
};
