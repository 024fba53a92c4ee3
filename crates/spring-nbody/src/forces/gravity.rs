//! Direct N-body gravity between point masses (O(N²))

use crate::forces::ForceModel;
use crate::state::Simulation;
use serde::{Deserialize, Serialize};

/// Direct O(N²) Newtonian gravity between every pair of particles
///
/// Uses the simulation's `G`. Pair forces are applied equal and opposite,
/// so the accumulated net force is zero to rounding.
///
/// Spring-connected resolved bodies normally get their self-gravity from
/// the spring code; this model is for systems of point masses and for
/// driving the integrator in tests.
///
/// # Examples
///
/// ```
/// use spring_nbody::forces::{DirectGravity, ForceModel};
/// use spring_nbody::state::Simulation;
/// use nalgebra::{Point3, Vector3};
///
/// let mut sim = Simulation::new();
/// sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
/// sim.add_particle(1.0, 0.1, Point3::new(2.0, 0.0, 0.0), Vector3::zeros());
///
/// DirectGravity::new().accumulate(&mut sim);
///
/// // a = G m / r² = 1 / 4
/// assert!((sim.particles()[0].acceleration.x - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectGravity {
    /// Optional softening length to prevent singularities
    pub softening: f64,
}

impl DirectGravity {
    /// Creates a new direct gravity force with no softening
    pub fn new() -> Self {
        Self { softening: 0.0 }
    }

    /// Creates a new direct gravity force with specified softening length
    pub fn with_softening(softening: f64) -> Self {
        Self { softening }
    }
}

impl ForceModel for DirectGravity {
    fn accumulate(&self, sim: &mut Simulation) {
        let g = sim.g;
        let eps2 = self.softening * self.softening;
        let particles = sim.particles_mut();

        for i in 0..particles.len() {
            let (head, tail) = particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                let dr = b.position - a.position;
                let r2 = dr.magnitude_squared() + eps2;
                let inv_r3 = 1.0 / (r2 * r2.sqrt());
                a.acceleration += dr * (g * b.mass * inv_r3);
                b.acceleration -= dr * (g * a.mass * inv_r3);
            }
        }
    }

    fn potential_energy(&self, sim: &Simulation) -> f64 {
        let eps2 = self.softening * self.softening;
        let particles = sim.particles();

        // Each pair counted once
        particles
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                particles[i + 1..].iter().map(move |b| {
                    let r = ((a.position - b.position).magnitude_squared() + eps2).sqrt();
                    -sim.g * a.mass * b.mass / r
                })
            })
            .sum()
    }
}

/// Circular orbital speed sqrt(G M / r) at separation `r`
pub fn circular_velocity(g: f64, total_mass: f64, r: f64) -> f64 {
    (g * total_mass / r).sqrt()
}
