//! Canonical wrapping and circular distance.

use serde::{Deserialize, Serialize};

use crate::error::AngleError;

/// Normalize an angle to [0, 360) degrees.
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0,
/// which is folded back to 0.0 so the upper bound stays open.
pub fn wrap360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, 180] degrees.
pub fn wrap180(deg: f64) -> f64 {
    let r = wrap360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

/// [`wrap360`] that rejects NaN and infinities.
pub fn checked_wrap360(deg: f64, what: &'static str) -> Result<f64, AngleError> {
    if !deg.is_finite() {
        return Err(AngleError::NonFinite(what));
    }
    Ok(wrap360(deg))
}

/// Shortest-arc distance between two angles, in [0, 180].
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (wrap360(a) - wrap360(b)).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

/// Point halfway along the shortest arc from `a` to `b`, in [0, 360).
pub fn circular_midpoint(a: f64, b: f64) -> f64 {
    wrap360(a + wrap180(b - a) / 2.0)
}

/// A half-open circular sector `[lower, upper)`.
///
/// When `lower > upper` the sector straddles 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorBounds {
    pub lower_deg: f64,
    pub upper_deg: f64,
}

impl SectorBounds {
    /// Sector starting at `start_deg` spanning `width_deg`.
    pub fn from_start(start_deg: f64, width_deg: f64) -> Self {
        Self {
            lower_deg: wrap360(start_deg),
            upper_deg: wrap360(start_deg + width_deg),
        }
    }

    /// Angular width in (0, 360].
    pub fn width_deg(&self) -> f64 {
        let w = wrap360(self.upper_deg - self.lower_deg);
        if w == 0.0 { 360.0 } else { w }
    }

    /// Half-open membership: the lower edge is inside, the upper edge is not.
    pub fn contains(&self, deg: f64) -> bool {
        wrap360(deg - self.lower_deg) < self.width_deg()
    }

    /// Distance from `deg` to the nearer of the two edges.
    pub fn distance_to_edge(&self, deg: f64) -> f64 {
        circular_distance(deg, self.lower_deg).min(circular_distance(deg, self.upper_deg))
    }

    /// Midpoint of the sector.
    pub fn center_deg(&self) -> f64 {
        wrap360(self.lower_deg + self.width_deg() / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap360_basics() {
        assert_eq!(wrap360(0.0), 0.0);
        assert_eq!(wrap360(360.0), 0.0);
        assert_eq!(wrap360(720.0), 0.0);
        assert_eq!(wrap360(-1.0), 359.0);
        assert_eq!(wrap360(270.5), 270.5);
    }

    #[test]
    fn wrap360_tiny_negative_stays_open() {
        let r = wrap360(-1e-18);
        assert!((0.0..360.0).contains(&r), "got {r}");
    }

    #[test]
    fn wrap180_basics() {
        assert_eq!(wrap180(0.0), 0.0);
        assert_eq!(wrap180(180.0), 180.0);
        assert_eq!(wrap180(-180.0), 180.0);
        assert_eq!(wrap180(270.0), -90.0);
        assert_eq!(wrap180(-90.0), -90.0);
    }

    #[test]
    fn distance_basics() {
        assert_eq!(circular_distance(0.0, 0.0), 0.0);
        assert_eq!(circular_distance(0.0, 180.0), 180.0);
        assert_eq!(circular_distance(350.0, 10.0), 20.0);
        assert_eq!(circular_distance(270.0, 90.0), 180.0);
        assert_eq!(circular_distance(-10.0, 10.0), 20.0);
    }

    #[test]
    fn midpoint_across_zero() {
        assert!((circular_midpoint(350.0, 10.0) - 0.0).abs() < 1e-12);
        assert!((circular_midpoint(10.0, 350.0) - 0.0).abs() < 1e-12);
        assert!((circular_midpoint(270.0, 300.0) - 285.0).abs() < 1e-12);
    }

    #[test]
    fn checked_rejects_nan() {
        assert_eq!(
            checked_wrap360(f64::NAN, "lambda"),
            Err(AngleError::NonFinite("lambda"))
        );
        assert_eq!(checked_wrap360(-30.0, "lambda"), Ok(330.0));
    }

    #[test]
    fn sector_half_open() {
        let s = SectorBounds::from_start(255.0, 30.0);
        assert!(s.contains(255.0));
        assert!(s.contains(284.9999));
        assert!(!s.contains(285.0));
        assert!(!s.contains(254.9999));
    }

    #[test]
    fn sector_straddling_zero() {
        let s = SectorBounds::from_start(345.0, 30.0);
        assert!(s.lower_deg > s.upper_deg);
        assert!(s.contains(350.0));
        assert!(s.contains(0.0));
        assert!(s.contains(14.9));
        assert!(!s.contains(15.0));
        assert!((s.center_deg() - 0.0).abs() < 1e-12);
        assert!((s.width_deg() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn sector_edge_distance() {
        let s = SectorBounds::from_start(255.0, 30.0);
        assert!((s.distance_to_edge(270.0) - 15.0).abs() < 1e-12);
        assert!((s.distance_to_edge(256.0) - 1.0).abs() < 1e-12);
    }
}
