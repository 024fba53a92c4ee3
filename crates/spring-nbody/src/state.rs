use crate::config::PhysicsConfig;
use crate::error::Result;
use crate::particle::{Particle, ParticleId};
use nalgebra::{Point3, Vector3};

/// Complete state of a spring-particle simulation at a given time
///
/// Owns the particle sequence. Particles can be appended and mutated in
/// place but never removed, so every [`ParticleId`] handed out remains the
/// index of the particle it was created for.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Current simulation time
    pub time: f64,
    /// Gravitational constant
    pub g: f64,
    /// Softening length for the quadrupole force models
    pub softening: f64,
    particles: Vec<Particle>,
}

impl Simulation {
    /// Creates an empty simulation with default physics (G = 1)
    ///
    /// # Examples
    ///
    /// ```
    /// use spring_nbody::state::Simulation;
    ///
    /// let sim = Simulation::new();
    /// assert_eq!(sim.particle_count(), 0);
    /// assert_eq!(sim.g, 1.0);
    /// ```
    pub fn new() -> Self {
        let config = PhysicsConfig::default();
        Self {
            time: 0.0,
            g: config.g,
            softening: config.softening,
            particles: Vec::new(),
        }
    }

    /// Creates an empty simulation from a validated configuration
    pub fn from_config(config: &PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            time: 0.0,
            g: config.g,
            softening: config.softening,
            particles: Vec::new(),
        })
    }

    /// Appends a particle and returns its handle
    ///
    /// The returned id always equals the particle count before the call.
    /// `mass` must be finite and non-negative; this is checked in debug builds.
    ///
    /// # Examples
    ///
    /// ```
    /// use spring_nbody::state::Simulation;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let mut sim = Simulation::new();
    /// let a = sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
    /// let b = sim.add_particle(0.5, 0.1, Point3::new(1.0, 0.0, 0.0), Vector3::zeros());
    ///
    /// assert_eq!(a.0, 0);
    /// assert_eq!(b.0, 1);
    /// ```
    pub fn add_particle(
        &mut self,
        mass: f64,
        radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> ParticleId {
        debug_assert!(
            mass.is_finite() && mass >= 0.0,
            "particle mass must be finite and non-negative, got {mass}"
        );
        let id = ParticleId(self.particles.len());
        self.particles.push(Particle {
            id,
            mass,
            radius,
            position,
            velocity,
            acceleration: Vector3::zeros(),
        });
        id
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.0)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id.0)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of all particles; the sequence itself cannot grow or shrink through it
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Handle of the most recently appended particle
    pub fn last_id(&self) -> Option<ParticleId> {
        self.particles.len().checked_sub(1).map(ParticleId)
    }

    /// Zeroes every acceleration accumulator before a force pass
    pub fn clear_accelerations(&mut self) {
        self.particles
            .iter_mut()
            .for_each(|p| p.acceleration = Vector3::zeros());
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    /// Returns the total momentum of all particles
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.particles
            .iter()
            .map(|p| p.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    /// Returns the total angular momentum about the origin
    pub fn total_angular_momentum(&self) -> Vector3<f64> {
        self.particles
            .iter()
            .map(|p| p.angular_momentum())
            .fold(Vector3::zeros(), |acc, l| acc + l)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Sum of m·a over all particles, the net force currently accumulated
    pub fn total_force(&self) -> Vector3<f64> {
        self.particles
            .iter()
            .map(|p| p.acceleration * p.mass)
            .fold(Vector3::zeros(), |acc, f| acc + f)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
