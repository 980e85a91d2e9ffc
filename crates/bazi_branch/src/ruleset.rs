//! Calendar rulesets: anchors, segmentation and hidden-stem tables.

use serde::{Deserialize, Serialize};

use crate::cycle::Stem;
use crate::error::BranchError;

/// Solar longitude of LiChun, the start of the Yin month and of the year.
pub const LICHUN_DEG: f64 = 315.0;

/// A known day of the 60-day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCycleAnchor {
    /// Julian Day Number of the anchor day.
    pub anchor_jdn: i64,
    /// Its position in the cycle (0 = JiaZi).
    pub anchor_sexagenary_index: u8,
}

impl DayCycleAnchor {
    /// 1912-02-18, a JiaZi day.
    pub const STANDARD: Self = Self {
        anchor_jdn: 2_419_451,
        anchor_sexagenary_index: 0,
    };
}

/// How the solar year is cut into twelve months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthSegmentation {
    /// Months begin at the jieqi crossings, every 30° from LiChun.
    JieqiCrossing,
    /// Months are the apex-centered branch sectors of the solar longitude.
    ApexCentered,
}

/// Role of a hidden stem within its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenStemRole {
    Principal,
    Central,
    Residual,
}

impl HiddenStemRole {
    const BY_POSITION: [Self; 3] = [Self::Principal, Self::Central, Self::Residual];
}

/// Weights applied to pillar categories when they feed harmonic fusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    pub year: f64,
    pub month: f64,
    pub day: f64,
    pub hour: f64,
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            year: 1.0,
            month: 1.0,
            day: 1.0,
            hour: 1.0,
        }
    }
}

/// Everything that varies between schools of pillar derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub id: String,
    pub version: String,
    pub day_cycle_anchor: Option<DayCycleAnchor>,
    pub month_segmentation: MonthSegmentation,
    /// Hidden stems per branch (index 0 = Zi), principal first.
    pub hidden_stems: [Vec<Stem>; 12],
    /// Weights for principal, central and residual hidden stems.
    pub hidden_stem_weights: [f64; 3],
    pub pillar_weights: PillarWeights,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::standard()
    }
}

impl Ruleset {
    /// Jieqi months, JiaZi anchor on 1912-02-18, classical hidden stems.
    pub fn standard() -> Self {
        use Stem::*;
        Self {
            id: "standard_bazi".into(),
            version: "1.0.0".into(),
            day_cycle_anchor: Some(DayCycleAnchor::STANDARD),
            month_segmentation: MonthSegmentation::JieqiCrossing,
            hidden_stems: [
                vec![Gui],
                vec![Ji, Gui, Xin],
                vec![Jia, Bing, Wu],
                vec![Yi],
                vec![Wu, Yi, Gui],
                vec![Bing, Geng, Wu],
                vec![Ding, Ji],
                vec![Ji, Yi, Ding],
                vec![Geng, Ren, Wu],
                vec![Xin],
                vec![Wu, Xin, Ding],
                vec![Ren, Jia],
            ],
            hidden_stem_weights: [1.0, 0.5, 0.3],
            pillar_weights: PillarWeights::default(),
        }
    }

    pub fn validate(&self) -> Result<(), BranchError> {
        if self.id.is_empty() {
            return Err(BranchError::InvalidConfig("ruleset id is empty".into()));
        }
        if let Some(anchor) = self.day_cycle_anchor {
            if anchor.anchor_sexagenary_index >= 60 {
                return Err(BranchError::IndexOutOfRange {
                    what: "anchor sexagenary",
                    index: anchor.anchor_sexagenary_index as usize,
                });
            }
        }
        if let Some(i) = self.hidden_stems.iter().position(|h| h.is_empty() || h.len() > 3) {
            return Err(BranchError::InvalidConfig(format!(
                "branch {i} must have 1 to 3 hidden stems"
            )));
        }
        let w = &self.pillar_weights;
        let pillar = [w.year, w.month, w.day, w.hour];
        let mut weights = self.hidden_stem_weights.iter().chain(pillar.iter());
        if weights.any(|x| !x.is_finite() || *x < 0.0) {
            return Err(BranchError::InvalidConfig(
                "weights must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Hidden stems of a branch with their roles and weights.
    pub fn hidden_stems_of(&self, branch_index: u8) -> Vec<HiddenStem> {
        self.hidden_stems
            .get(branch_index as usize)
            .map(|stems| {
                stems
                    .iter()
                    .zip(HiddenStemRole::BY_POSITION)
                    .zip(self.hidden_stem_weights)
                    .map(|((&stem, role), weight)| HiddenStem { stem, role, weight })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A stem stored within a branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiddenStem {
    pub stem: Stem,
    pub role: HiddenStemRole,
    pub weight: f64,
}
