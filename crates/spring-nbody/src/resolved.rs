//! Resolved (extended) bodies and center-of-mass utilities
//!
//! A resolved body is a contiguous range of particles `[start, end)` that
//! together represent one extended object, typically held together by
//! springs. Its mass, center of mass and center-of-mass velocity are never
//! stored; they are recomputed from the members on demand.
//!
//! The only ways this module changes member state are rigid: every member
//! gets the same position offset and the same velocity boost, so the
//! internal configuration (relative positions, relative velocities, spin)
//! is preserved exactly.

use crate::error::{Error, Result};
use crate::particle::{Particle, ParticleId};
use crate::state::Simulation;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Half-open particle range `[start, end)` forming one extended body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBody {
    start: usize,
    end: usize,
}

impl ResolvedBody {
    /// Creates a range handle, rejecting empty ranges
    ///
    /// # Examples
    ///
    /// ```
    /// use spring_nbody::resolved::ResolvedBody;
    ///
    /// assert!(ResolvedBody::new(0, 10).is_ok());
    /// assert!(ResolvedBody::new(3, 3).is_err());
    /// ```
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if end <= start {
            return Err(Error::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false: empty ranges cannot be constructed
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        (self.start..self.end).contains(&id.0)
    }

    /// Member particles, or `RangeOutOfBounds` if the range runs past the sequence
    pub fn members<'a>(&self, sim: &'a Simulation) -> Result<&'a [Particle]> {
        sim.particles()
            .get(self.start..self.end)
            .ok_or(Error::RangeOutOfBounds {
                start: self.start,
                end: self.end,
                count: sim.particle_count(),
            })
    }

    pub fn members_mut<'a>(&self, sim: &'a mut Simulation) -> Result<&'a mut [Particle]> {
        let count = sim.particle_count();
        sim.particles_mut()
            .get_mut(self.start..self.end)
            .ok_or(Error::RangeOutOfBounds {
                start: self.start,
                end: self.end,
                count,
            })
    }

    /// Total mass of the members
    pub fn sum_mass(&self, sim: &Simulation) -> Result<f64> {
        Ok(self.members(sim)?.iter().map(|p| p.mass).sum())
    }

    /// Mass-weighted mean position of the members
    pub fn center_of_mass(&self, sim: &Simulation) -> Result<Point3<f64>> {
        let members = self.members(sim)?;
        let mass = massive(members)?;
        let weighted = members
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.position.coords * p.mass);
        Ok(Point3::from(weighted / mass))
    }

    /// Mass-weighted mean velocity of the members
    pub fn center_of_mass_velocity(&self, sim: &Simulation) -> Result<Vector3<f64>> {
        let members = self.members(sim)?;
        let mass = massive(members)?;
        let momentum = members
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.momentum());
        Ok(momentum / mass)
    }

    /// Translates the body so its center of mass sits at the origin
    pub fn subtract_com(&self, sim: &mut Simulation) -> Result<()> {
        let com = self.center_of_mass(sim)?;
        self.move_by(sim, -com.coords, Vector3::zeros())
    }

    /// Boosts the body so its center-of-mass velocity is zero
    pub fn subtract_cov(&self, sim: &mut Simulation) -> Result<()> {
        let cov = self.center_of_mass_velocity(sim)?;
        self.move_by(sim, Vector3::zeros(), -cov)
    }

    /// Adds the same offset to every member's position and the same boost to every velocity
    pub fn move_by(
        &self,
        sim: &mut Simulation,
        offset: Vector3<f64>,
        boost: Vector3<f64>,
    ) -> Result<()> {
        for p in self.members_mut(sim)?.iter_mut() {
            p.position += offset;
            p.velocity += boost;
        }
        Ok(())
    }

    /// Angular momentum of the members about their own center of mass,
    /// measured in the center-of-mass frame
    pub fn spin_angular_momentum(&self, sim: &Simulation) -> Result<Vector3<f64>> {
        let com = self.center_of_mass(sim)?;
        let cov = self.center_of_mass_velocity(sim)?;
        Ok(self.members(sim)?.iter().fold(Vector3::zeros(), |acc, p| {
            acc + (p.position - com).cross(&(p.velocity - cov)) * p.mass
        }))
    }
}

fn massive(members: &[Particle]) -> Result<f64> {
    let mass: f64 = members.iter().map(|p| p.mass).sum();
    if mass == 0.0 {
        return Err(Error::ZeroMass(format!(
            "{} particles with no mass have no center of mass",
            members.len()
        )));
    }
    Ok(mass)
}

/// One side of a two-body pairing: a point mass or a whole resolved body
///
/// Gives insertion, drift and diagnostics a single view of "mass, position,
/// velocity" regardless of whether the object is one particle or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    Particle(ParticleId),
    Resolved(ResolvedBody),
}

impl Member {
    pub fn mass(&self, sim: &Simulation) -> Result<f64> {
        match self {
            Member::Particle(id) => Ok(lookup(sim, *id)?.mass),
            Member::Resolved(body) => body.sum_mass(sim),
        }
    }

    pub fn position(&self, sim: &Simulation) -> Result<Point3<f64>> {
        match self {
            Member::Particle(id) => Ok(lookup(sim, *id)?.position),
            Member::Resolved(body) => body.center_of_mass(sim),
        }
    }

    pub fn velocity(&self, sim: &Simulation) -> Result<Vector3<f64>> {
        match self {
            Member::Particle(id) => Ok(lookup(sim, *id)?.velocity),
            Member::Resolved(body) => body.center_of_mass_velocity(sim),
        }
    }

    /// Applies a velocity change to the member as a whole
    pub fn boost(&self, sim: &mut Simulation, dv: Vector3<f64>) -> Result<()> {
        match self {
            Member::Particle(id) => {
                sim.particle_mut(*id)
                    .ok_or(Error::UnknownParticle(*id))?
                    .velocity += dv;
                Ok(())
            }
            Member::Resolved(body) => body.move_by(sim, Vector3::zeros(), dv),
        }
    }

    /// True if the two members share at least one particle
    pub fn overlaps(&self, other: &Member) -> bool {
        match (self, other) {
            (Member::Particle(a), Member::Particle(b)) => a == b,
            (Member::Particle(id), Member::Resolved(body))
            | (Member::Resolved(body), Member::Particle(id)) => body.contains(*id),
            (Member::Resolved(a), Member::Resolved(b)) => a.start < b.end && b.start < a.end,
        }
    }
}

pub(crate) fn lookup(sim: &Simulation, id: ParticleId) -> Result<&Particle> {
    sim.particle(id).ok_or(Error::UnknownParticle(id))
}
