use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a particle: its insertion index
///
/// Particles are appended and never removed, so a handle returned by
/// [`Simulation::add_particle`](crate::state::Simulation::add_particle)
/// stays valid for the life of the simulation. Handles are ordered by
/// insertion: the most recently appended particle has the highest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub usize);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    pub mass: f64,
    /// Display radius, informational only
    pub radius: f64,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    /// Acceleration accumulator, cleared by the integrator before each force pass
    pub acceleration: Vector3<f64>,
}

impl Particle {
    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Angular momentum about the origin, m (r × v)
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.coords.cross(&self.velocity) * self.mass
    }
}
