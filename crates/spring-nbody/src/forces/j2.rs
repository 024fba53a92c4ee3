//! Axisymmetric J2 oblateness with an arbitrary pole direction

use crate::forces::{apply_with_reaction, ForceModel};
use crate::particle::ParticleId;
use crate::state::Simulation;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// J2 field of one oblate particle acting on every other particle
///
/// The pole points along `(sin θ cos φ, sin θ sin φ, cos θ)`; `θ = 0` puts
/// it on +z. For separation `d` from the source and `cos ψ = d·p̂ / r`:
///
/// ```text
/// a = (3/2) G M J2 R² / (r + ε)^5 · [ (5 cos²ψ - 1) d - 2 (d·p̂) p̂ ]
/// ```
///
/// The softening `ε` is added to `r` itself, not to `r²`. With the pole on
/// +z this is the familiar geopotential form
/// `a_z = (3/2) G M J2 R² z (5 z²/r² - 3) / r^5`.
///
/// Does nothing if the source index is beyond the particle count, if
/// `j2 == 0`, or if the source is massless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct J2Pole {
    pub source: ParticleId,
    /// Dimensionless J2 coefficient
    pub j2: f64,
    /// Reference (equatorial) radius of the source body
    pub radius: f64,
    /// Pole azimuth φ
    #[serde(default)]
    pub pole_phi: f64,
    /// Pole colatitude θ
    #[serde(default)]
    pub pole_theta: f64,
}

impl J2Pole {
    /// J2 field with the pole along +z
    pub fn new(source: ParticleId, j2: f64, radius: f64) -> Self {
        Self {
            source,
            j2,
            radius,
            pole_phi: 0.0,
            pole_theta: 0.0,
        }
    }

    pub fn with_pole(mut self, phi: f64, theta: f64) -> Self {
        self.pole_phi = phi;
        self.pole_theta = theta;
        self
    }

    /// Unit vector along the pole
    pub fn pole(&self) -> Vector3<f64> {
        let (sin_t, cos_t) = self.pole_theta.sin_cos();
        let (sin_p, cos_p) = self.pole_phi.sin_cos();
        Vector3::new(sin_t * cos_p, sin_t * sin_p, cos_t)
    }
}

impl ForceModel for J2Pole {
    fn accumulate(&self, sim: &mut Simulation) {
        if self.j2 == 0.0 {
            return;
        }
        let source_mass = match sim.particle(self.source) {
            Some(p) => p.mass,
            None => {
                tracing::trace!(source = %self.source, "J2 source out of range, skipped");
                return;
            }
        };

        let cst = 1.5 * sim.g * source_mass * self.j2 * self.radius * self.radius;
        let eps = sim.softening;
        let pole = self.pole();

        apply_with_reaction(sim, self.source, |d| {
            let r = d.magnitude();
            if r == 0.0 {
                return Vector3::zeros();
            }
            let r5 = (r + eps).powi(5);
            let dp = d.dot(&pole);
            let cos2 = (dp / r) * (dp / r);
            (d * (5.0 * cos2 - 1.0) - pole * (2.0 * dp)) * (cst / r5)
        });
    }
}
