//! Combined C20/C22/S22 potential of a source spinning about +z

use crate::forces::{apply_with_reaction, ForceModel};
use crate::particle::ParticleId;
use crate::state::Simulation;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Second-degree gravity field of a planet rotating at a fixed rate
///
/// The potential perturbation is
/// `U = -(G M R² / r³) [ C20 (3cos²θ - 1)/2 + 3 (C22 cos 2φ' + S22 sin 2φ') sin²θ ]`
/// with `φ' = φ - Ω t`, where `Ω` is `spin_rate` and `t` the simulation time.
/// The force is `-∇U`, evaluated in spherical components (radial, polar,
/// azimuthal) and rotated to Cartesian. Both `r` and the cylindrical radius
/// are softened as `sqrt(· + ε²)`. With zero softening a particle on the
/// spin axis feels only the radial term, and a coincident particle feels
/// nothing.
///
/// Does nothing if the source index is beyond the particle count, if all
/// three coefficients are zero, or if the source is massless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatingQuadrupole {
    pub source: ParticleId,
    #[serde(default)]
    pub c20: f64,
    #[serde(default)]
    pub c22: f64,
    #[serde(default)]
    pub s22: f64,
    /// Reference radius of the source body
    pub radius: f64,
    /// Spin rate about +z; the body-fixed frame is at angle `spin_rate · t`
    #[serde(default)]
    pub spin_rate: f64,
}

impl RotatingQuadrupole {
    pub fn new(
        source: ParticleId,
        c20: f64,
        c22: f64,
        s22: f64,
        radius: f64,
        spin_rate: f64,
    ) -> Self {
        Self {
            source,
            c20,
            c22,
            s22,
            radius,
            spin_rate,
        }
    }

    /// Body-frame rotation angle at time `t`
    pub fn phase(&self, t: f64) -> f64 {
        self.spin_rate * t
    }
}

impl ForceModel for RotatingQuadrupole {
    fn accumulate(&self, sim: &mut Simulation) {
        if self.c20.abs() + self.c22.abs() + self.s22.abs() == 0.0 {
            return;
        }
        let source_mass = match sim.particle(self.source) {
            Some(p) => p.mass,
            None => {
                tracing::trace!(source = %self.source, "quadrupole source out of range, skipped");
                return;
            }
        };

        let gmr2 = sim.g * source_mass * self.radius * self.radius;
        let eps2 = sim.softening * sim.softening;
        let phase = self.phase(sim.time);
        let (c20, c22, s22) = (self.c20, self.c22, self.s22);

        apply_with_reaction(sim, self.source, |d| {
            let r2 = d.magnitude_squared() + eps2;
            if r2 == 0.0 {
                return Vector3::zeros();
            }
            let w = (d.x * d.x + d.y * d.y + eps2).sqrt();
            let r = r2.sqrt();
            let r4 = r.powi(4);
            let phi = d.y.atan2(d.x) - phase;
            let cos_t = d.z / r;
            let sin_t = w / r;
            let (sin2p, cos2p) = (2.0 * phi).sin_cos();

            let du_dr = 3.0 * gmr2 / r4
                * (c20 * (3.0 * cos_t * cos_t - 1.0) / 2.0
                    + (c22 * cos2p + s22 * sin2p) * 3.0 * sin_t * sin_t);
            // (1/r) ∂U/∂θ
            let du_dtheta = -gmr2 / r4
                * (-c20 + 2.0 * c22 * cos2p + 2.0 * s22 * sin2p)
                * 3.0
                * sin_t
                * cos_t;
            // (1/(r sinθ)) ∂U/∂φ
            let du_dphi = -gmr2 / r4 * (-c22 * sin2p + s22 * cos2p) * 6.0 * sin_t;

            let radial = -du_dr / r;
            // on the axis sinθ = 0, so the polar and azimuthal terms vanish
            if w == 0.0 {
                return d * radial;
            }
            let polar = du_dtheta / (r * w);
            Vector3::new(
                radial * d.x - polar * d.x * d.z + du_dphi * d.y / w,
                radial * d.y - polar * d.y * d.z - du_dphi * d.x / w,
                radial * d.z + du_dtheta * w / r,
            )
        });
    }
}
