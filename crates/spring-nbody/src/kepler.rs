//! Keplerian orbital elements and conversions to and from Cartesian state
//!
//! Conventions:
//! - Angles are radians. The reference plane is the simulation's x-y plane
//!   and the reference direction is +x.
//! - The perifocal frame is rotated into the inertial frame by
//!   `R_z(long_node) · R_x(i) · R_z(arg_peri)`.
//! - Bound orbits have `a > 0` and `0 <= e < 1`. Hyperbolic orbits have
//!   `a < 0` and `e > 1`, with the mean anomaly defined by
//!   `M = e sinh H - H`. Parabolic orbits (`e == 1`) are not representable
//!   by a semi-major axis and are rejected.

use crate::error::{Error, Result};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

const KEPLER_TOLERANCE: f64 = 1e-14;
const KEPLER_MAX_ITERATIONS: usize = 100;

/// Below this sin(i) the orbit is treated as equatorial and the node is set to zero
const EQUATORIAL_TOLERANCE: f64 = 1e-12;

/// Below this eccentricity the orbit is treated as circular and periapsis is put at the node
const CIRCULAR_TOLERANCE: f64 = 1e-12;

/// Classical Keplerian orbital elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (negative for hyperbolic orbits)
    pub a: f64,
    /// Eccentricity
    pub e: f64,
    /// Inclination
    pub i: f64,
    /// Longitude of the ascending node
    pub long_node: f64,
    /// Argument of periapsis
    pub arg_peri: f64,
    /// Mean anomaly
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    pub fn new(a: f64, e: f64, i: f64, long_node: f64, arg_peri: f64, mean_anomaly: f64) -> Self {
        Self {
            a,
            e,
            i,
            long_node,
            arg_peri,
            mean_anomaly,
        }
    }

    /// Circular, equatorial orbit starting on the +x axis
    pub fn circular(a: f64) -> Self {
        Self::new(a, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Mean motion n = sqrt(GM / |a|³)
    pub fn mean_motion(&self, gm: f64) -> f64 {
        (gm / self.a.abs().powi(3)).sqrt()
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.e > 1.0
    }

    /// Periapsis distance q = |a| |1 - e|
    pub fn periapsis(&self) -> f64 {
        self.a.abs() * (1.0 - self.e).abs()
    }

    pub fn validate(&self) -> Result<()> {
        let values = [
            self.a,
            self.e,
            self.i,
            self.long_node,
            self.arg_peri,
            self.mean_anomaly,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidElements(format!(
                "elements must be finite: {:?}",
                self
            )));
        }
        if self.a == 0.0 {
            return Err(Error::InvalidElements("semi-major axis is zero".into()));
        }
        if self.e < 0.0 {
            return Err(Error::InvalidElements(format!(
                "eccentricity must be >= 0, got {}",
                self.e
            )));
        }
        if self.e == 1.0 {
            return Err(Error::InvalidElements(
                "parabolic orbit (e = 1) has no finite semi-major axis".into(),
            ));
        }
        if self.e < 1.0 && self.a < 0.0 {
            return Err(Error::InvalidElements(format!(
                "bound orbit (e = {}) needs a > 0, got a = {}",
                self.e, self.a
            )));
        }
        if self.e > 1.0 && self.a > 0.0 {
            return Err(Error::InvalidElements(format!(
                "hyperbolic orbit (e = {}) needs a < 0, got a = {}",
                self.e, self.a
            )));
        }
        Ok(())
    }
}

/// Cartesian position and velocity relative to the orbit's focus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl PhaseState {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }
}

fn check_gm(gm: f64) -> Result<()> {
    if !gm.is_finite() || gm <= 0.0 {
        return Err(Error::DegenerateOrbit(format!(
            "gravitational parameter must be finite and > 0, got {}",
            gm
        )));
    }
    Ok(())
}

/// Solve Kepler's equation `M = E - e sin E` for the eccentric anomaly (0 <= e < 1)
///
/// Newton-Raphson from `E = M` (or `E = π` for e >= 0.8, which converges for
/// every mean anomaly). The result lies in the same turn as `M` mapped to `[0, 2π)`.
///
/// # Examples
///
/// ```
/// use spring_nbody::kepler::solve_kepler;
///
/// let e = 0.3;
/// let big_e = solve_kepler(1.0, e).unwrap();
/// assert!((big_e - e * big_e.sin() - 1.0).abs() < 1e-12);
/// ```
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> Result<f64> {
    let m = mean_anomaly.rem_euclid(TAU);
    let mut ea = if e < 0.8 { m } else { PI };

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = ea - e * ea.sin() - m;
        let fp = 1.0 - e * ea.cos();
        let delta = f / fp;
        ea -= delta;

        if delta.abs() <= KEPLER_TOLERANCE * ea.abs().max(1.0) {
            return Ok(ea);
        }
    }

    Err(Error::KeplerNotConverged {
        mean_anomaly,
        eccentricity: e,
    })
}

/// Solve the hyperbolic Kepler equation `M = e sinh H - H` (e > 1)
pub fn solve_hyperbolic_kepler(mean_anomaly: f64, e: f64) -> Result<f64> {
    let m = mean_anomaly;
    let mut ha = (m / e).asinh();

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = e * ha.sinh() - ha - m;
        let fp = e * ha.cosh() - 1.0;
        let delta = f / fp;
        ha -= delta;

        if delta.abs() <= KEPLER_TOLERANCE * ha.abs().max(1.0) {
            return Ok(ha);
        }
    }

    Err(Error::KeplerNotConverged {
        mean_anomaly,
        eccentricity: e,
    })
}

/// Rotation matrix from the perifocal frame to the inertial frame
pub fn perifocal_to_inertial(long_node: f64, inclination: f64, arg_peri: f64) -> Matrix3<f64> {
    let (sin_o, cos_o) = long_node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_w, cos_w) = arg_peri.sin_cos();

    Matrix3::new(
        cos_o * cos_w - sin_o * sin_w * cos_i,
        -cos_o * sin_w - sin_o * cos_w * cos_i,
        sin_o * sin_i,
        sin_o * cos_w + cos_o * sin_w * cos_i,
        -sin_o * sin_w + cos_o * cos_w * cos_i,
        -cos_o * sin_i,
        sin_w * sin_i,
        cos_w * sin_i,
        cos_i,
    )
}

/// Convert orbital elements to position and velocity relative to the focus
///
/// # Arguments
///
/// * `gm` - Gravitational parameter G(M + m) of the two-body problem
/// * `elements` - Orbital elements of the relative orbit
///
/// # Errors
///
/// `DegenerateOrbit` if `gm <= 0`, `InvalidElements` if the elements fail
/// [`OrbitalElements::validate`].
///
/// # Examples
///
/// ```
/// use spring_nbody::kepler::{elements_to_cartesian, OrbitalElements};
///
/// // Circular orbit of radius 2 about GM = 1 starts on the +x axis
/// let state = elements_to_cartesian(1.0, &OrbitalElements::circular(2.0)).unwrap();
/// assert!((state.position.x - 2.0).abs() < 1e-12);
/// assert!((state.velocity.y - 0.5_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn elements_to_cartesian(gm: f64, elements: &OrbitalElements) -> Result<PhaseState> {
    check_gm(gm)?;
    elements.validate()?;

    let e = elements.e;
    let (position, velocity) = if e < 1.0 {
        let a = elements.a;
        let ea = solve_kepler(elements.mean_anomaly, e)?;
        let (sin_e, cos_e) = ea.sin_cos();
        let b = (1.0 - e * e).sqrt();
        let n = (gm / (a * a * a)).sqrt();
        let ea_dot = n / (1.0 - e * cos_e);

        (
            Vector3::new(a * (cos_e - e), a * b * sin_e, 0.0),
            Vector3::new(-a * sin_e * ea_dot, a * b * cos_e * ea_dot, 0.0),
        )
    } else {
        let a = -elements.a;
        let ha = solve_hyperbolic_kepler(elements.mean_anomaly, e)?;
        let (sinh_h, cosh_h) = (ha.sinh(), ha.cosh());
        let b = (e * e - 1.0).sqrt();
        let n = (gm / (a * a * a)).sqrt();
        let ha_dot = n / (e * cosh_h - 1.0);

        (
            Vector3::new(a * (e - cosh_h), a * b * sinh_h, 0.0),
            Vector3::new(-a * sinh_h * ha_dot, a * b * cosh_h * ha_dot, 0.0),
        )
    };

    let rot = perifocal_to_inertial(elements.long_node, elements.i, elements.arg_peri);
    Ok(PhaseState::new(rot * position, rot * velocity))
}

/// Convert a relative Cartesian state to orbital elements
///
/// Equatorial orbits get `long_node = 0`; circular orbits get
/// `arg_peri = 0`, so the mean anomaly is then measured from the node.
/// Angles are returned in `[0, 2π)`, except the hyperbolic mean anomaly,
/// which is unbounded.
///
/// # Errors
///
/// `DegenerateOrbit` for `gm <= 0`, zero separation, or a purely radial
/// trajectory; `InvalidElements` for an exactly parabolic state.
pub fn cartesian_to_elements(gm: f64, state: &PhaseState) -> Result<OrbitalElements> {
    check_gm(gm)?;

    let r = state.position;
    let v = state.velocity;
    let r_mag = r.magnitude();
    if r_mag == 0.0 {
        return Err(Error::DegenerateOrbit("zero separation".into()));
    }

    let h = r.cross(&v);
    let h_mag = h.magnitude();
    if h_mag == 0.0 {
        return Err(Error::DegenerateOrbit(
            "zero angular momentum (radial trajectory)".into(),
        ));
    }

    let inv_a = 2.0 / r_mag - v.magnitude_squared() / gm;
    if inv_a == 0.0 {
        return Err(Error::InvalidElements(
            "parabolic state (e = 1) has no finite semi-major axis".into(),
        ));
    }
    let a = 1.0 / inv_a;

    let e_vec = v.cross(&h) / gm - r / r_mag;
    let e = e_vec.magnitude();

    let h_xy = h.x.hypot(h.y);
    let i = h_xy.atan2(h.z);
    let long_node = if h_xy > EQUATORIAL_TOLERANCE * h_mag {
        h.x.atan2(-h.y).rem_euclid(TAU)
    } else {
        0.0
    };

    // Orbital plane frame: x along the node line, z along h
    let to_plane = perifocal_to_inertial(long_node, i, 0.0).transpose();
    let r_plane = to_plane * r;
    let e_plane = to_plane * e_vec;

    let arg_peri = if e > CIRCULAR_TOLERANCE {
        e_plane.y.atan2(e_plane.x).rem_euclid(TAU)
    } else {
        0.0
    };
    let true_anomaly = r_plane.y.atan2(r_plane.x) - arg_peri;
    let (sin_f, cos_f) = true_anomaly.sin_cos();

    let mean_anomaly = if inv_a > 0.0 {
        let ea = ((1.0 - e * e).max(0.0).sqrt() * sin_f).atan2(e + cos_f);
        (ea - e * ea.sin()).rem_euclid(TAU)
    } else {
        let ha = ((e * e - 1.0).max(0.0).sqrt() * sin_f / (1.0 + e * cos_f)).asinh();
        e * ha.sinh() - ha
    };

    Ok(OrbitalElements {
        a,
        e,
        i,
        long_node,
        arg_peri,
        mean_anomaly,
    })
}
