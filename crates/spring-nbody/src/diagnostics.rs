//! Orbit diagnostics between members of a simulation
//!
//! Orbital elements of one member about another use `GM = G (m1 + m2)`,
//! so a freshly inserted orbit reads back the elements it was built from.

use crate::error::{Error, Result};
use crate::kepler::{cartesian_to_elements, OrbitalElements, PhaseState};
use crate::resolved::{Member, ResolvedBody};
use crate::state::Simulation;
use nalgebra::Vector3;

/// Position and velocity of `orbiter` relative to `central`
pub fn relative_state(sim: &Simulation, central: &Member, orbiter: &Member) -> Result<PhaseState> {
    Ok(PhaseState::new(
        orbiter.position(sim)? - central.position(sim)?,
        orbiter.velocity(sim)? - central.velocity(sim)?,
    ))
}

/// Orbital elements of `orbiter` about `central`
///
/// # Examples
///
/// ```
/// use spring_nbody::diagnostics::relative_elements;
/// use spring_nbody::insertion::{add_point_mass_kep, OrbitHost};
/// use spring_nbody::kepler::OrbitalElements;
/// use spring_nbody::resolved::Member;
/// use spring_nbody::state::Simulation;
/// use nalgebra::{Point3, Vector3};
///
/// let mut sim = Simulation::new();
/// let star = sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
/// let orbit = OrbitalElements::new(2.0, 0.1, 0.3, 0.0, 0.5, 1.0);
/// let host = OrbitHost::Particle(star);
/// let planet = add_point_mass_kep(&mut sim, 0.001, 0.01, host, &orbit).unwrap();
///
/// let pair = (Member::Particle(star), Member::Particle(planet.id));
/// let measured = relative_elements(&sim, &pair.0, &pair.1).unwrap();
/// assert!((measured.a - 2.0).abs() < 1e-10);
/// assert!((measured.e - 0.1).abs() < 1e-10);
/// ```
pub fn relative_elements(
    sim: &Simulation,
    central: &Member,
    orbiter: &Member,
) -> Result<OrbitalElements> {
    let gm = sim.g * (central.mass(sim)? + orbiter.mass(sim)?);
    cartesian_to_elements(gm, &relative_state(sim, central, orbiter)?)
}

/// Unit normal of the relative orbit, along r × v
pub fn orbit_normal(sim: &Simulation, central: &Member, orbiter: &Member) -> Result<Vector3<f64>> {
    let state = relative_state(sim, central, orbiter)?;
    state
        .position
        .cross(&state.velocity)
        .try_normalize(0.0)
        .ok_or_else(|| Error::DegenerateOrbit("relative orbit has no angular momentum".into()))
}

/// Angle between a resolved body's spin angular momentum and the normal of its
/// orbit about `central`
pub fn obliquity(sim: &Simulation, central: &Member, body: ResolvedBody) -> Result<f64> {
    let normal = orbit_normal(sim, central, &Member::Resolved(body))?;
    let spin = body
        .spin_angular_momentum(sim)?
        .try_normalize(0.0)
        .ok_or_else(|| Error::DegenerateOrbit("resolved body is not spinning".into()))?;
    Ok(spin.dot(&normal).clamp(-1.0, 1.0).acos())
}
