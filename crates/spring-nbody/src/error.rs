//! Error types for orbital setup, drift and force routines

use crate::particle::ParticleId;
use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations detected before any particle state is touched.
///
/// Quadrupole force models never return these: an out-of-range source
/// index is a silent no-op so call sites can pass indices unconditionally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Orbital elements that do not describe a Keplerian orbit.
    #[error("invalid orbital elements: {0}")]
    InvalidElements(String),

    /// Geometry with undefined motion (zero separation, zero angular momentum, GM <= 0).
    #[error("degenerate orbit: {0}")]
    DegenerateOrbit(String),

    #[error("empty particle range [{start}, {end})")]
    EmptyRange { start: usize, end: usize },

    #[error("particle range [{start}, {end}) exceeds particle count {count}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        count: usize,
    },

    #[error("unknown particle {0}")]
    UnknownParticle(ParticleId),

    /// Mass-weighted averages over a set with no mass.
    #[error("zero total mass: {0}")]
    ZeroMass(String),

    #[error("kepler solver did not converge (M = {mean_anomaly}, e = {eccentricity})")]
    KeplerNotConverged {
        mean_anomaly: f64,
        eccentricity: f64,
    },

    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
