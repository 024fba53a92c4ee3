//! Force models for spring-particle simulations
//!
//! Every model here is an additive contributor: it sums into the particle
//! acceleration accumulators, which the integrator clears once before the
//! force pass. Spring forces, point-mass gravity and each quadrupole term
//! can therefore be stacked in a [`CompositeForce`] in any order.

use crate::particle::ParticleId;
use crate::state::Simulation;
use nalgebra::Vector3;

pub mod c22s22;
pub mod gravity;
pub mod j2;
pub mod rotating;


pub use c22s22::StaticC22S22;
pub use gravity::DirectGravity;
pub use j2::J2Pole;
pub use rotating::RotatingQuadrupole;

/// Default softening length added to separations in the quadrupole models
pub const RSOFT: f64 = 0.01;

/// A source of acceleration on particles
///
/// # Examples
///
/// ```
/// use spring_nbody::forces::{ForceModel, DirectGravity};
/// use spring_nbody::state::Simulation;
/// use nalgebra::{Point3, Vector3};
///
/// let mut sim = Simulation::new();
/// sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
/// sim.add_particle(0.001, 0.01, Point3::new(1.0, 0.0, 0.0), Vector3::zeros());
///
/// sim.clear_accelerations();
/// DirectGravity::new().accumulate(&mut sim);
///
/// // The light particle is pulled toward the heavy one
/// assert!(sim.particles()[1].acceleration.x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Add this model's accelerations into every particle's accumulator
    fn accumulate(&self, sim: &mut Simulation);

    /// Potential energy of the current configuration (optional)
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _sim: &Simulation) -> f64 {
        0.0
    }
}

/// Combine multiple force models into a single composite force
///
/// # Examples
///
/// ```
/// use spring_nbody::forces::{CompositeForce, DirectGravity, J2Pole};
/// use spring_nbody::particle::ParticleId;
///
/// let composite = CompositeForce::new()
///     .with_force(DirectGravity::new())
///     .with_force(J2Pole::new(ParticleId(0), 0.1, 1.0));
/// ```
pub struct CompositeForce {
    models: Vec<Box<dyn ForceModel>>,
}

impl CompositeForce {
    /// Creates an empty composite force
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Adds a force model to the composite
    pub fn with_force<F: ForceModel + 'static>(mut self, force: F) -> Self {
        self.models.push(Box::new(force));
        self
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for CompositeForce {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for CompositeForce {
    fn accumulate(&self, sim: &mut Simulation) {
        for model in &self.models {
            model.accumulate(sim);
        }
    }

    fn potential_energy(&self, sim: &Simulation) -> f64 {
        self.models.iter().map(|f| f.potential_energy(sim)).sum()
    }
}

/// Applies a field sourced by particle `source` to every other particle
///
/// `field` maps the separation `d = x_i - x_source` to the acceleration of
/// particle `i`. The source receives the reaction `-a_i m_i / m_source`
/// from each target, so the net force added across the sequence is zero.
/// The source is matched by its slot in the particle list, not by the
/// particle's `id` field.
///
/// Returns false without touching anything if `source` is out of range or
/// massless.
pub(crate) fn apply_with_reaction<F>(
    sim: &mut Simulation,
    source: ParticleId,
    field: F,
) -> bool
where
    F: Fn(Vector3<f64>) -> Vector3<f64>,
{
    let (source_position, source_mass) = match sim.particle(source) {
        Some(p) => (p.position, p.mass),
        None => return false,
    };
    if source_mass == 0.0 {
        return false;
    }

    let mut reaction = Vector3::zeros();
    let skip = source.index();
    for (_, p) in sim
        .particles_mut()
        .iter_mut()
        .enumerate()
        .filter(|(i, _)| *i != skip)
    {
        let accel = field(p.position - source_position);
        p.acceleration += accel;
        reaction -= accel * (p.mass / source_mass);
    }

    if let Some(p) = sim.particle_mut(source) {
        p.acceleration += reaction;
    }
    true
}
