//! Adding point masses and binaries to a simulation on Keplerian orbits
//!
//! Each routine converts orbital elements with [`elements_to_cartesian`],
//! appends the new particles, and returns the mean motion
//! `n = sqrt(GM / |a|³)` of the configured orbit for use as a
//! characteristic frequency. Parameters and elements are validated before
//! anything is appended or moved, so a failed call leaves the simulation
//! unchanged.

use crate::error::{Error, Result};
use crate::forces::gravity::circular_velocity;
use crate::kepler::{elements_to_cartesian, OrbitalElements};
use crate::particle::ParticleId;
use crate::resolved::{lookup, ResolvedBody};
use crate::state::Simulation;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Mass of the extended body that binaries and perturbers are placed around
pub const EXTENDED_BODY_MASS: f64 = 1.0;

/// Smallest display radius given to the secondary of a binary
pub const MIN_SECONDARY_RADIUS: f64 = 1.0;

/// Result of adding a single particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insertion {
    pub id: ParticleId,
    pub mean_motion: f64,
}

/// Result of adding a binary
///
/// The secondary is always appended first and the primary last, so the
/// primary is `sim.last_id()` immediately after the call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryInsertion {
    pub secondary: ParticleId,
    pub primary: ParticleId,
    /// Mean motion of the binary's center of mass, corrected for the binary's quadrupole
    pub mean_motion: f64,
}

/// A two point-mass binary on a circular mutual orbit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinarySpec {
    /// Mass of the primary
    pub primary_mass: f64,
    /// Secondary mass divided by primary mass
    pub mass_ratio: f64,
    /// Separation of the two masses
    pub separation: f64,
    /// Display radius of the primary
    pub primary_radius: f64,
}

impl BinarySpec {
    pub fn secondary_mass(&self) -> f64 {
        self.mass_ratio * self.primary_mass
    }

    /// Display radius of the secondary: `r1 (m2/m1)^(1/3)`, floored at [`MIN_SECONDARY_RADIUS`]
    pub fn secondary_radius(&self) -> f64 {
        (self.primary_radius * self.mass_ratio.cbrt()).max(MIN_SECONDARY_RADIUS)
    }

    /// Secular correction to the mean motion of an orbit of semi-major axis `a`
    /// about the binary: `1 + (3/8) μ_B (sep/a)²` with `μ_B = q / (1 + q)²`
    pub fn quadrupole_correction(&self, a: f64) -> f64 {
        let q = self.mass_ratio;
        let mu_b = q / ((1.0 + q) * (1.0 + q));
        1.0 + 0.375 * mu_b * (self.separation / a).powi(2)
    }

    fn validate(&self) -> Result<()> {
        if !self.primary_mass.is_finite() || self.primary_mass <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "binary primary mass must be > 0, got {}",
                self.primary_mass
            )));
        }
        if !self.mass_ratio.is_finite() || self.mass_ratio < 0.0 {
            return Err(Error::InvalidParam(format!(
                "binary mass ratio must be >= 0, got {}",
                self.mass_ratio
            )));
        }
        if !self.separation.is_finite() || self.separation <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "binary separation must be > 0, got {}",
                self.separation
            )));
        }
        Ok(())
    }
}

/// What a new point mass orbits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitHost {
    /// An existing point mass; the new particle is offset by its state
    Particle(ParticleId),
    /// A resolved body, which is moved onto the relative orbit while the
    /// new particle sits at the origin
    Resolved(ResolvedBody),
}

fn check_mass(mass: f64) -> Result<()> {
    if !mass.is_finite() || mass < 0.0 {
        return Err(Error::InvalidParam(format!(
            "particle mass must be finite and >= 0, got {}",
            mass
        )));
    }
    Ok(())
}

/// Add a binary whose center of mass orbits an extended body of unit mass at the origin
///
/// The binary is laid out along x with the secondary at `-sep m1/mtot` and
/// the primary at `+sep m2/mtot` from the binary's center of mass, moving
/// in ∓y at the circular speed `sqrt(G mtot / sep)`, so the binary orbits
/// counterclockwise in the x-y plane. Its center of mass is placed with
/// `GM = G (mtot + 1)`.
///
/// # Examples
///
/// ```
/// use spring_nbody::insertion::{add_binary_kep, BinarySpec};
/// use spring_nbody::kepler::OrbitalElements;
/// use spring_nbody::state::Simulation;
///
/// let mut sim = Simulation::new();
/// let binary = BinarySpec {
///     primary_mass: 0.01,
///     mass_ratio: 0.1,
///     separation: 0.5,
///     primary_radius: 2.0,
/// };
/// let added = add_binary_kep(&mut sim, &binary, &OrbitalElements::circular(10.0)).unwrap();
///
/// assert_eq!(sim.last_id(), Some(added.primary));
/// assert!(added.secondary < added.primary);
/// ```
pub fn add_binary_kep(
    sim: &mut Simulation,
    binary: &BinarySpec,
    orbit: &OrbitalElements,
) -> Result<BinaryInsertion> {
    binary.validate()?;

    let m1 = binary.primary_mass;
    let m2 = binary.secondary_mass();
    let mtot = m1 + m2;
    let sep = binary.separation;
    let vc_bin = circular_velocity(sim.g, mtot, sep);

    let x1 = sep * m2 / mtot;
    let x2 = -sep * m1 / mtot;
    let vy1 = vc_bin * m2 / mtot;
    let vy2 = -vc_bin * m1 / mtot;

    let gm = sim.g * (mtot + EXTENDED_BODY_MASS);
    let ps = elements_to_cartesian(gm, orbit)?;
    let mean_motion = orbit.mean_motion(gm) * binary.quadrupole_correction(orbit.a);

    let secondary = sim.add_particle(
        m2,
        binary.secondary_radius(),
        Point3::from(ps.position + Vector3::new(x2, 0.0, 0.0)),
        ps.velocity + Vector3::new(0.0, vy2, 0.0),
    );
    let primary = sim.add_particle(
        m1,
        binary.primary_radius,
        Point3::from(ps.position + Vector3::new(x1, 0.0, 0.0)),
        ps.velocity + Vector3::new(0.0, vy1, 0.0),
    );

    tracing::debug!(
        %secondary,
        %primary,
        m1,
        m2,
        sep,
        mean_motion,
        "added binary"
    );
    Ok(BinaryInsertion {
        secondary,
        primary,
        mean_motion,
    })
}

/// Add a point mass orbiting an existing point mass or a resolved body
///
/// `GM` uses the new mass plus the host's mass (the resolved body's total).
///
/// With [`OrbitHost::Particle`] the new particle is placed at the host's
/// position and velocity plus the relative orbit.
///
/// With [`OrbitHost::Resolved`] the body is first re-centered on its own
/// center of mass and center-of-mass velocity, then rigidly moved onto the
/// relative orbit; the new particle sits at rest at the origin. The body's
/// internal configuration, including its spin, is unchanged; a tilted
/// orbit therefore changes the body's obliquity.
pub fn add_point_mass_kep(
    sim: &mut Simulation,
    mass: f64,
    radius: f64,
    host: OrbitHost,
    orbit: &OrbitalElements,
) -> Result<Insertion> {
    check_mass(mass)?;

    let host_mass = match host {
        OrbitHost::Particle(ip) => lookup(sim, ip)?.mass,
        OrbitHost::Resolved(body) => body.sum_mass(sim)?,
    };
    let gm = sim.g * (mass + host_mass);
    let ps = elements_to_cartesian(gm, orbit)?;
    let mean_motion = orbit.mean_motion(gm);

    let id = match host {
        OrbitHost::Particle(ip) => {
            let p = lookup(sim, ip)?;
            let position = p.position + ps.position;
            let velocity = p.velocity + ps.velocity;
            sim.add_particle(mass, radius, position, velocity)
        }
        OrbitHost::Resolved(body) => {
            body.subtract_com(sim)?;
            body.subtract_cov(sim)?;
            body.move_by(sim, ps.position, ps.velocity)?;
            sim.add_particle(mass, radius, Point3::origin(), Vector3::zeros())
        }
    };

    tracing::debug!(%id, mass, host_mass, mean_motion, "added point mass");
    Ok(Insertion { id, mean_motion })
}

/// Add a perturber orbiting an extended body of mass `host_mass` at the origin
///
/// No existing particle is read or moved.
pub fn add_perturber_kep(
    sim: &mut Simulation,
    mass: f64,
    radius: f64,
    host_mass: f64,
    orbit: &OrbitalElements,
) -> Result<Insertion> {
    check_mass(mass)?;
    check_mass(host_mass)?;

    let gm = sim.g * (mass + host_mass);
    let ps = elements_to_cartesian(gm, orbit)?;
    let mean_motion = orbit.mean_motion(gm);

    let id = sim.add_particle(mass, radius, Point3::from(ps.position), ps.velocity);

    tracing::debug!(%id, mass, host_mass, mean_motion, "added perturber");
    Ok(Insertion { id, mean_motion })
}

/// Add a particle with explicit Cartesian state
pub fn add_point_mass_cartesian(
    sim: &mut Simulation,
    mass: f64,
    radius: f64,
    position: Point3<f64>,
    velocity: Vector3<f64>,
) -> Result<ParticleId> {
    check_mass(mass)?;
    let id = sim.add_particle(mass, radius, position, velocity);
    tracing::debug!(%id, mass, "added point mass from cartesian state");
    Ok(id)
}
