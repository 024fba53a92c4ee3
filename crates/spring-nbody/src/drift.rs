//! Momentum-conserving secular drift of a two-body orbit
//!
//! Relaxes the semi-major axis and eccentricity of a pair following
//! Beaugé, Michtchenko & Ferraz-Mello (2006, MNRAS 365, 1160). With relative
//! separation `r`, relative velocity `v`, and `v_c` the circular velocity
//! vector (speed `sqrt(G(m1+m2)/|r|)`, in the orbital plane, perpendicular
//! to `r`, in the direction of motion), the relative velocity is kicked by
//!
//! ```text
//! dv = tstep · ( v · inv_tau_a / 2 + (v - v_c) · inv_tau_e )
//! ```
//!
//! where `inv_tau_a = (1/a) da/dt` and `inv_tau_e = (1/e) de/dt`. A positive
//! `inv_tau_a` moves the pair apart. The kick is split between the two
//! members in inverse proportion to their masses, so the pair's total
//! momentum is unchanged and the lighter member takes most of it. Only
//! velocities change; separations respond over later integration steps.

use crate::error::{Error, Result};
use crate::particle::ParticleId;
use crate::resolved::{Member, ResolvedBody};
use crate::state::Simulation;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Inverse timescales of the drift, in units of 1/time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriftRates {
    /// (1/a) da/dt; positive drives the pair apart
    #[serde(default)]
    pub inv_tau_a: f64,
    /// (1/e) de/dt
    #[serde(default)]
    pub inv_tau_e: f64,
}

impl DriftRates {
    pub fn new(inv_tau_a: f64, inv_tau_e: f64) -> Self {
        Self {
            inv_tau_a,
            inv_tau_e,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.inv_tau_a == 0.0 && self.inv_tau_e == 0.0
    }
}

/// Relative velocity kick for one application of the drift
///
/// # Arguments
///
/// * `gm` - G (m1 + m2)
/// * `separation` - position of member 2 relative to member 1
/// * `velocity` - velocity of member 2 relative to member 1
/// * `tstep` - time elapsed since the previous application
///
/// # Errors
///
/// `DegenerateOrbit` for zero separation or a purely radial relative velocity,
/// where the orbital plane is undefined.
pub fn relative_kick(
    gm: f64,
    separation: Vector3<f64>,
    velocity: Vector3<f64>,
    rates: &DriftRates,
    tstep: f64,
) -> Result<Vector3<f64>> {
    let r2 = separation.magnitude_squared();
    if r2 == 0.0 {
        return Err(Error::DegenerateOrbit("drift pair has zero separation".into()));
    }
    let rad = r2.sqrt();
    let vc = (gm / rad).sqrt();

    // r × (v × r) = r² v - (r·v) r: in the orbital plane, perpendicular to r
    let rdotv = separation.dot(&velocity);
    let along_motion = velocity * r2 - separation * rdotv;
    let length = along_motion.magnitude();
    if length == 0.0 {
        return Err(Error::DegenerateOrbit(
            "drift pair has no tangential relative velocity".into(),
        ));
    }
    let vc_vec = along_motion * (vc / length);
    let dd_vc = velocity - vc_vec;

    Ok((velocity * (rates.inv_tau_a / 2.0) + dd_vc * rates.inv_tau_e) * tstep)
}

/// Drift a pair of members, each a point mass or a resolved body
///
/// Member 1 receives `-m2 dv / (m1 + m2)` and member 2 receives
/// `+m1 dv / (m1 + m2)`; a resolved member takes its share as a uniform
/// velocity boost to all of its particles. At most one side may be a
/// resolved body.
pub fn drift_pair(
    sim: &mut Simulation,
    rates: &DriftRates,
    tstep: f64,
    first: Member,
    second: Member,
) -> Result<()> {
    if let (Member::Resolved(_), Member::Resolved(_)) = (first, second) {
        return Err(Error::InvalidParam(
            "drift between two resolved bodies is not supported".into(),
        ));
    }
    if first.overlaps(&second) {
        return Err(Error::InvalidParam(format!(
            "drift members overlap: {:?} and {:?}",
            first, second
        )));
    }

    let m1 = first.mass(sim)?;
    let m2 = second.mass(sim)?;
    let mtot = m1 + m2;
    if mtot == 0.0 {
        return Err(Error::ZeroMass("drift pair is massless".into()));
    }

    let separation = second.position(sim)? - first.position(sim)?;
    let velocity = second.velocity(sim)? - first.velocity(sim)?;
    let dv = relative_kick(sim.g * mtot, separation, velocity, rates, tstep)?;

    first.boost(sim, -dv * (m2 / mtot))?;
    second.boost(sim, dv * (m1 / mtot))?;

    tracing::trace!(?dv, tstep, "applied drift kick");
    Ok(())
}

/// Drift the orbit of two point masses
pub fn drift_binary(
    sim: &mut Simulation,
    rates: &DriftRates,
    tstep: f64,
    im1: ParticleId,
    im2: ParticleId,
) -> Result<()> {
    drift_pair(sim, rates, tstep, Member::Particle(im1), Member::Particle(im2))
}

/// Drift the orbit of a resolved body about a point mass
///
/// The resolved body's velocity share is applied as a uniform boost; its
/// positions and internal velocities are not touched.
pub fn drift_resolved(
    sim: &mut Simulation,
    rates: &DriftRates,
    tstep: f64,
    im1: ParticleId,
    body: ResolvedBody,
) -> Result<()> {
    drift_pair(sim, rates, tstep, Member::Particle(im1), Member::Resolved(body))
}
