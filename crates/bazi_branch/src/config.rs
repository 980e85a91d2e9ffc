//! Sector geometry and the mapping convention.

use bazi_angle::{circular_distance, wrap360};
use serde::{Deserialize, Serialize};

use crate::error::BranchError;

/// Default center of category 0 (Zi), degrees.
pub const DEFAULT_APEX_CENTER_DEG: f64 = 270.0;
/// Default sector width, degrees.
pub const DEFAULT_SECTOR_WIDTH_DEG: f64 = 30.0;

const ORIGIN_TOLERANCE_DEG: f64 = 1e-9;

/// How the sector grid is aligned with the longitudes being mapped.
///
/// Exactly one convention applies to a whole computation; the two are
/// never combined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BranchConvention {
    /// Move the sector boundaries; longitudes stay as given.
    ShiftBoundaries,
    /// Rotate longitudes by `phase_offset_deg` and the boundary origin by
    /// `origin_shift_deg`. Both must be present and equal.
    ShiftLongitudes {
        phase_offset_deg: f64,
        origin_shift_deg: Option<f64>,
    },
}

/// Discriminant of [`BranchConvention`], carried on every assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConventionKind {
    ShiftBoundaries,
    ShiftLongitudes,
}

impl ConventionKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShiftBoundaries => "SHIFT_BOUNDARIES",
            Self::ShiftLongitudes => "SHIFT_LONGITUDES",
        }
    }
}

impl BranchConvention {
    pub const fn kind(&self) -> ConventionKind {
        match self {
            Self::ShiftBoundaries => ConventionKind::ShiftBoundaries,
            Self::ShiftLongitudes { .. } => ConventionKind::ShiftLongitudes,
        }
    }

    /// Check that a longitude shift carries a matching origin shift.
    pub fn check_origin(&self) -> Result<(), BranchError> {
        match *self {
            Self::ShiftBoundaries => Ok(()),
            Self::ShiftLongitudes {
                phase_offset_deg,
                origin_shift_deg,
            } => {
                let inconsistent = BranchError::InconsistentOrigin {
                    phase_offset_deg,
                    origin_shift_deg,
                };
                let Some(origin) = origin_shift_deg else {
                    return Err(inconsistent);
                };
                if !phase_offset_deg.is_finite()
                    || !origin.is_finite()
                    || wrap360(phase_offset_deg) == 0.0
                    || circular_distance(phase_offset_deg, origin) > ORIGIN_TOLERANCE_DEG
                {
                    return Err(inconsistent);
                }
                Ok(())
            }
        }
    }
}

/// Geometry of the twelve sectors plus the mapping convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchCoordinateConfig {
    pub convention: BranchConvention,
    /// Center of category 0.
    pub apex_center_deg: f64,
    pub sector_width_deg: f64,
}

impl Default for BranchCoordinateConfig {
    fn default() -> Self {
        Self {
            convention: BranchConvention::ShiftBoundaries,
            apex_center_deg: DEFAULT_APEX_CENTER_DEG,
            sector_width_deg: DEFAULT_SECTOR_WIDTH_DEG,
        }
    }
}

impl BranchCoordinateConfig {
    /// Grid used for hours of the day: category 0 centered on midnight.
    pub const fn hours() -> Self {
        Self {
            convention: BranchConvention::ShiftBoundaries,
            apex_center_deg: 0.0,
            sector_width_deg: DEFAULT_SECTOR_WIDTH_DEG,
        }
    }

    /// Lower edge of category 0, `apex − width/2`, in [0, 360).
    pub fn origin_deg(&self) -> f64 {
        wrap360(self.apex_center_deg - self.sector_width_deg / 2.0)
    }

    /// Center of category `index`.
    pub fn center_deg(&self, index: u8) -> f64 {
        wrap360(self.apex_center_deg + self.sector_width_deg * index as f64)
    }

    /// Centers of all twelve categories.
    pub fn centers(&self) -> [f64; 12] {
        std::array::from_fn(|i| self.center_deg(i as u8))
    }

    pub fn validate(&self) -> Result<(), BranchError> {
        if !self.apex_center_deg.is_finite() {
            return Err(BranchError::InvalidConfig(
                "apex_center_deg must be finite".into(),
            ));
        }
        // Twelve sectors must tile the circle.
        if (self.sector_width_deg * 12.0 - 360.0).abs() > 1e-9 {
            return Err(BranchError::InvalidConfig(format!(
                "sector_width_deg {} does not tile 360° in 12 sectors",
                self.sector_width_deg
            )));
        }
        self.convention.check_origin()
    }
}
