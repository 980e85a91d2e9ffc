//! Safe circular arithmetic for the BaZodiac engine.
//!
//! This crate provides:
//! - Canonical angle wrapping into `[0, 360)` and `(-180, 180]`
//! - Shortest-arc distance and half-open sector membership
//! - Ecliptic ↔ equatorial transforms for an arbitrary obliquity
//!
//! Every angle entering the higher crates passes through [`wrap360`] or
//! [`wrap180`] before it is compared with anything else.

pub mod error;
pub mod frames;
pub mod wrap;

pub use error::AngleError;
pub use frames::{
    EclipticCoords, EquatorialCoords, OBLIQUITY_J2000_DEG, ecliptic_to_equatorial,
    equatorial_to_ecliptic, mean_obliquity_deg,
};
pub use wrap::{
    SectorBounds, checked_wrap360, circular_distance, circular_midpoint, wrap180, wrap360,
};
