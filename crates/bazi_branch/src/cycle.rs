//! Heavenly stems (10), earthly branches (12) and their 60-term cycle.

use serde::{Deserialize, Serialize};

use crate::error::BranchError;

/// The 10 heavenly stems starting from Jia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

/// Five phases, in generating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Stem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jia => "Jia",
            Self::Yi => "Yi",
            Self::Bing => "Bing",
            Self::Ding => "Ding",
            Self::Wu => "Wu",
            Self::Ji => "Ji",
            Self::Geng => "Geng",
            Self::Xin => "Xin",
            Self::Ren => "Ren",
            Self::Gui => "Gui",
        }
    }

    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: usize) -> Result<Self, BranchError> {
        ALL_STEMS
            .get(index)
            .copied()
            .ok_or(BranchError::IndexOutOfRange {
                what: "stem",
                index,
            })
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Jia | Self::Yi => Element::Wood,
            Self::Bing | Self::Ding => Element::Fire,
            Self::Wu | Self::Ji => Element::Earth,
            Self::Geng | Self::Xin => Element::Metal,
            Self::Ren | Self::Gui => Element::Water,
        }
    }

    /// Even-indexed stems are yang.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }
}

/// The 12 earthly branches starting from Zi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "Zi",
            Self::Chou => "Chou",
            Self::Yin => "Yin",
            Self::Mao => "Mao",
            Self::Chen => "Chen",
            Self::Si => "Si",
            Self::Wu => "Wu",
            Self::Wei => "Wei",
            Self::Shen => "Shen",
            Self::You => "You",
            Self::Xu => "Xu",
            Self::Hai => "Hai",
        }
    }

    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: usize) -> Result<Self, BranchError> {
        ALL_BRANCHES
            .get(index)
            .copied()
            .ok_or(BranchError::IndexOutOfRange {
                what: "branch",
                index,
            })
    }

    /// Western zodiac animal name.
    pub const fn animal(self) -> &'static str {
        match self {
            Self::Zi => "Rat",
            Self::Chou => "Ox",
            Self::Yin => "Tiger",
            Self::Mao => "Rabbit",
            Self::Chen => "Dragon",
            Self::Si => "Snake",
            Self::Wu => "Horse",
            Self::Wei => "Goat",
            Self::Shen => "Monkey",
            Self::You => "Rooster",
            Self::Xu => "Dog",
            Self::Hai => "Pig",
        }
    }
}

/// Position in the 60-term stem-branch cycle (0 = JiaZi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sexagenary(u8);

impl Sexagenary {
    /// Cycle position from any integer, reduced mod 60.
    pub fn from_cycle(n: i64) -> Self {
        Self(n.rem_euclid(60) as u8)
    }

    pub fn new(index: u8) -> Result<Self, BranchError> {
        if index < 60 {
            Ok(Self(index))
        } else {
            Err(BranchError::IndexOutOfRange {
                what: "sexagenary",
                index: index as usize,
            })
        }
    }

    /// The unique cycle position with this stem and branch.
    ///
    /// Stem and branch must share parity (yang with yang).
    pub fn from_parts(stem: Stem, branch: Branch) -> Result<Self, BranchError> {
        let (s, b) = (stem.index(), branch.index());
        if s % 2 != b % 2 {
            return Err(BranchError::InvalidConfig(format!(
                "{}{} is not a cycle member",
                stem.name(),
                branch.name()
            )));
        }
        (0..60u8)
            .find(|&n| n % 10 == s && n % 12 == b)
            .map(Self)
            .ok_or(BranchError::IndexOutOfRange {
                what: "sexagenary",
                index: 60,
            })
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn stem(self) -> Stem {
        ALL_STEMS[(self.0 % 10) as usize]
    }

    pub const fn branch(self) -> Branch {
        ALL_BRANCHES[(self.0 % 12) as usize]
    }
}

impl TryFrom<u8> for Sexagenary {
    type Error = BranchError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Sexagenary> for u8 {
    fn from(s: Sexagenary) -> u8 {
        s.0
    }
}

impl std::fmt::Display for Sexagenary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem().name(), self.branch().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_arrays() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
        }
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
        }
    }

    #[test]
    fn from_index_bounds() {
        assert_eq!(Stem::from_index(9), Ok(Stem::Gui));
        assert!(Stem::from_index(10).is_err());
        assert_eq!(Branch::from_index(11), Ok(Branch::Hai));
        assert!(Branch::from_index(12).is_err());
    }

    #[test]
    fn sexagenary_composition() {
        assert_eq!(Sexagenary::from_cycle(0).to_string(), "JiaZi");
        assert_eq!(Sexagenary::from_cycle(59).to_string(), "GuiHai");
        assert_eq!(Sexagenary::from_cycle(-1).index(), 59);
        assert_eq!(Sexagenary::from_cycle(40).to_string(), "JiaChen");
        assert_eq!(
            Sexagenary::from_parts(Stem::Jia, Branch::Chen).unwrap().index(),
            40
        );
    }

    #[test]
    fn parity_mismatch_rejected() {
        assert!(Sexagenary::from_parts(Stem::Jia, Branch::Chou).is_err());
        assert!(Sexagenary::new(60).is_err());
    }

    #[test]
    fn every_cycle_member_roundtrips() {
        for n in 0..60u8 {
            let s = Sexagenary::new(n).unwrap();
            assert_eq!(Sexagenary::from_parts(s.stem(), s.branch()), Ok(s));
        }
    }

    #[test]
    fn deserialize_checks_range() {
        let s: Sexagenary = serde_json::from_str("40").unwrap();
        assert_eq!(s.to_string(), "JiaChen");
        assert_eq!(serde_json::to_string(&s).unwrap(), "40");
        assert!(serde_json::from_str::<Sexagenary>("60").is_err());

        let overrides: Result<crate::PillarOverrides, _> =
            serde_json::from_str(r#"{ "month": null, "day": 75 }"#);
        assert!(overrides.is_err());
    }

    #[test]
    fn elements() {
        assert_eq!(Stem::Bing.element(), Element::Fire);
        assert!(Stem::Ren.is_yang());
        assert!(!Stem::Gui.is_yang());
    }
}
