//! Physics layer for spring-particle N-body simulations
//!
//! - [`kepler`]: orbital elements to and from Cartesian state
//! - [`resolved`]: extended bodies made of particle ranges, and their
//!   center-of-mass utilities
//! - [`insertion`]: adding point masses and binaries on Keplerian orbits
//! - [`drift`]: momentum-conserving semi-major axis and eccentricity drift
//! - [`forces`]: point-mass gravity and J2, C22/S22 and rotating
//!   C20/C22/S22 quadrupole fields
//! - [`integrator`]: leapfrog stepping over the force accumulators
//! - [`diagnostics`]: relative orbital elements and obliquity
//!
//! All routines take the [`Simulation`](state::Simulation) explicitly; it
//! carries the particles, `G`, the simulation time and the softening length.

pub mod config;
pub mod diagnostics;
pub mod drift;
pub mod error;
pub mod forces;
pub mod insertion;
pub mod integrator;
pub mod kepler;
pub mod particle;
pub mod resolved;
pub mod state;

pub use error::{Error, Result};

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod diagnostics_test;
#[cfg(test)]
mod integrator_test;
