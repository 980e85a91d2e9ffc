//! Ecliptic ↔ equatorial coordinate transforms.
//!
//! Both directions rotate a unit vector about the x-axis (the equinox
//! direction) by the obliquity and read the angles back with `atan2`,
//! so longitudes and right ascensions land in the correct quadrant and
//! latitudes stay well-conditioned near the poles.
//!
//! Mean obliquity: IAU 2006 (Hilton et al. 2006), public domain.

use serde::{Deserialize, Serialize};

use crate::error::AngleError;
use crate::wrap::wrap360;

/// Mean obliquity of the ecliptic at J2000.0 (IAU 2006), degrees.
pub const OBLIQUITY_J2000_DEG: f64 = 84_381.406 / 3600.0;

/// Ecliptic longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticCoords {
    /// Longitude in [0, 360).
    pub lon_deg: f64,
    /// Latitude in [-90, 90].
    pub lat_deg: f64,
}

/// Right ascension/declination in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoords {
    /// Right ascension in [0, 360).
    pub ra_deg: f64,
    /// Declination in [-90, 90].
    pub dec_deg: f64,
}

/// Mean obliquity of the ecliptic in degrees.
///
/// `t` is Julian centuries of TT since J2000.0.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let arcsec = 84_381.406 - 46.836_769 * t - 0.000_183_1 * t2 + 0.002_003_40 * t3
        - 0.000_000_576 * t4
        - 0.000_000_043_4 * t5;
    arcsec / 3600.0
}

/// Convert equatorial (RA, Dec) to ecliptic (λ, β) for the given obliquity.
pub fn equatorial_to_ecliptic(
    ra_deg: f64,
    dec_deg: f64,
    obliquity_deg: f64,
) -> Result<EclipticCoords, AngleError> {
    check_pair(ra_deg, dec_deg, obliquity_deg, "declination")?;
    let (lon, lat) = rotate_about_x(ra_deg, dec_deg, -obliquity_deg);
    Ok(EclipticCoords {
        lon_deg: lon,
        lat_deg: lat,
    })
}

/// Convert ecliptic (λ, β) to equatorial (RA, Dec) for the given obliquity.
pub fn ecliptic_to_equatorial(
    lon_deg: f64,
    lat_deg: f64,
    obliquity_deg: f64,
) -> Result<EquatorialCoords, AngleError> {
    check_pair(lon_deg, lat_deg, obliquity_deg, "latitude")?;
    let (ra, dec) = rotate_about_x(lon_deg, lat_deg, obliquity_deg);
    Ok(EquatorialCoords {
        ra_deg: ra,
        dec_deg: dec,
    })
}

fn check_pair(
    azimuthal: f64,
    polar: f64,
    obliquity: f64,
    polar_name: &'static str,
) -> Result<(), AngleError> {
    if !azimuthal.is_finite() || !polar.is_finite() {
        return Err(AngleError::NonFinite("coordinate pair"));
    }
    if !obliquity.is_finite() {
        return Err(AngleError::NonFinite("obliquity"));
    }
    if !(-90.0..=90.0).contains(&polar) {
        return Err(AngleError::PolarOutOfRange {
            name: polar_name,
            value: polar,
        });
    }
    Ok(())
}

/// Rotate spherical coordinates about the x-axis by `angle_deg`.
///
/// Positive angles take ecliptic to equatorial.
fn rotate_about_x(azimuthal_deg: f64, polar_deg: f64, angle_deg: f64) -> (f64, f64) {
    let (sin_a, cos_a) = azimuthal_deg.to_radians().sin_cos();
    let (sin_p, cos_p) = polar_deg.to_radians().sin_cos();
    let (sin_e, cos_e) = angle_deg.to_radians().sin_cos();

    let x = cos_p * cos_a;
    let y = cos_p * sin_a;
    let z = sin_p;

    let y_rot = y * cos_e - z * sin_e;
    let z_rot = y * sin_e + z * cos_e;

    let azimuthal = wrap360(y_rot.atan2(x).to_degrees());
    let polar = z_rot.atan2(x.hypot(y_rot)).to_degrees();
    (azimuthal, polar)
}
