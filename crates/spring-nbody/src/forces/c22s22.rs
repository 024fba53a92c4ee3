//! Static degree-2 order-2 (C22, S22) quadrupole in the global frame

use crate::forces::{apply_with_reaction, ForceModel};
use crate::particle::ParticleId;
use crate::state::Simulation;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// C22/S22 field of a non-rotating source whose body axes coincide with the
/// simulation axes
///
/// Acceleration on a particle at separation `(x, y, z)`, with
/// `ρ = sqrt(r² + ε²)`, `C = 3 G M R² C22`, `S = 6 G M R² S22`:
///
/// ```text
/// a_x = C x (-3x² + 7y² + 2z²)/ρ⁷ + S y (-4x² + y² + z²)/ρ⁷
/// a_y = C y (-7x² + 3y² - 2z²)/ρ⁷ + S x (x² - 4y² + z²)/ρ⁷
/// a_z = -5 C z (x² - y²)/ρ⁷       - 5 S z x y/ρ⁷
/// ```
///
/// The model is skipped whenever `C22 · S22 == 0`, which also switches off a
/// pure C22 or pure S22 field. Use [`RotatingQuadrupole`](crate::forces::RotatingQuadrupole)
/// with zero spin for a single-coefficient static field. A particle
/// coincident with the source at zero softening feels no force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticC22S22 {
    pub source: ParticleId,
    pub c22: f64,
    pub s22: f64,
    /// Reference radius of the source body
    pub radius: f64,
}

impl StaticC22S22 {
    pub fn new(source: ParticleId, c22: f64, s22: f64, radius: f64) -> Self {
        Self {
            source,
            c22,
            s22,
            radius,
        }
    }
}

impl ForceModel for StaticC22S22 {
    fn accumulate(&self, sim: &mut Simulation) {
        if self.c22 * self.s22 == 0.0 {
            return;
        }
        let source_mass = match sim.particle(self.source) {
            Some(p) => p.mass,
            None => {
                tracing::trace!(source = %self.source, "C22/S22 source out of range, skipped");
                return;
            }
        };

        let gmr2 = sim.g * source_mass * self.radius * self.radius;
        let c = 3.0 * gmr2 * self.c22;
        let s = 6.0 * gmr2 * self.s22;
        let eps2 = sim.softening * sim.softening;

        apply_with_reaction(sim, self.source, |d| {
            let (x2, y2, z2) = (d.x * d.x, d.y * d.y, d.z * d.z);
            let rho2 = x2 + y2 + z2 + eps2;
            if rho2 == 0.0 {
                return Vector3::zeros();
            }
            let r7 = rho2.sqrt().powi(7);
            let ax = c * d.x * (-3.0 * x2 + 7.0 * y2 + 2.0 * z2)
                + s * d.y * (-4.0 * x2 + y2 + z2);
            let ay = c * d.y * (-7.0 * x2 + 3.0 * y2 - 2.0 * z2)
                + s * d.x * (x2 - 4.0 * y2 + z2);
            let az = -5.0 * c * d.z * (x2 - y2) - 5.0 * s * d.z * d.x * d.y;
            Vector3::new(ax, ay, az) / r7
        });
    }
}
