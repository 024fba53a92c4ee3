//! Time integration over the acceleration accumulators
//!
//! Each force evaluation clears every accumulator once and then lets the
//! force model (typically a [`CompositeForce`](crate::forces::CompositeForce)
//! of gravity, springs and quadrupole terms) add its contributions. Drift
//! kicks are applied by the caller between steps.

use crate::forces::ForceModel;
use crate::state::Simulation;

/// A time integrator for spring-particle simulations
pub trait Integrator: Send + Sync {
    /// Advance the simulation by one timestep
    fn step(&self, sim: &mut Simulation, dt: f64, force: &dyn ForceModel);

    /// Advance by `n_steps` timesteps and return the final time
    fn integrate(
        &self,
        sim: &mut Simulation,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(sim, dt, force);
        }
        sim.time
    }
}

/// Symplectic leapfrog integrator (2nd order)
///
/// 1. Kick: v(t + dt/2) = v(t) + a(t) * dt/2
/// 2. Drift: x(t + dt) = x(t) + v(t + dt/2) * dt
/// 3. Kick: v(t + dt) = v(t + dt/2) + a(t + dt) * dt/2
///
/// The simulation time is advanced together with positions, so
/// time-dependent forces such as a rotating quadrupole see the time that
/// matches the positions they are evaluated at.
///
/// # Examples
///
/// ```
/// use spring_nbody::integrator::{Integrator, Leapfrog};
/// use spring_nbody::forces::DirectGravity;
/// use spring_nbody::state::Simulation;
/// use nalgebra::{Point3, Vector3};
///
/// let mut sim = Simulation::new();
/// sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
/// sim.add_particle(0.001, 0.01, Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
///
/// Leapfrog::new().step(&mut sim, 0.01, &DirectGravity::new());
/// assert!(sim.time > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Leapfrog {
    /// Use drift-kick-drift instead of kick-drift-kick
    pub use_dkd: bool,
}

impl Leapfrog {
    /// Kick-drift-kick leapfrog
    pub fn new() -> Self {
        Self { use_dkd: false }
    }

    /// Drift-kick-drift leapfrog
    pub fn new_dkd() -> Self {
        Self { use_dkd: true }
    }

    fn kick(&self, sim: &mut Simulation, dt: f64, force: &dyn ForceModel) {
        sim.clear_accelerations();
        force.accumulate(sim);
        for p in sim.particles_mut() {
            p.velocity += p.acceleration * dt;
        }
    }

    fn drift(&self, sim: &mut Simulation, dt: f64) {
        for p in sim.particles_mut() {
            p.position += p.velocity * dt;
        }
        sim.time += dt;
    }
}

impl Integrator for Leapfrog {
    fn step(&self, sim: &mut Simulation, dt: f64, force: &dyn ForceModel) {
        if self.use_dkd {
            self.drift(sim, dt / 2.0);
            self.kick(sim, dt, force);
            self.drift(sim, dt / 2.0);
        } else {
            self.kick(sim, dt / 2.0, force);
            self.drift(sim, dt);
            self.kick(sim, dt / 2.0, force);
        }
    }
}
