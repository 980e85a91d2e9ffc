use bazi_branch::{BranchAssignment, BranchCoordinateConfig, FourPillars, Ruleset, SoftWeights};
use bazi_fusion::{HarmonicConfig, HarmonicResult, WeightedBody};
use bazi_time::{BirthEvent, TimeScaleSet};

/// Everything the validator may look at. Any subset may be supplied;
/// absent parts are simply not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationInputs<'a> {
    pub birth_event: Option<&'a BirthEvent>,
    pub time_scales: Option<&'a TimeScaleSet>,
    pub branch_config: Option<&'a BranchCoordinateConfig>,
    pub assignments: &'a [BranchAssignment],
    pub soft_weights: &'a [SoftWeights],
    pub ruleset: Option<&'a Ruleset>,
    pub pillars: Option<&'a FourPillars>,
    /// A day pillar was supplied by the caller instead of derived.
    pub day_override_supplied: bool,
    pub bodies: &'a [WeightedBody],
    pub harmonic_config: Option<&'a HarmonicConfig>,
    pub harmonics: &'a [HarmonicResult],
}
