use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::diagnostics::{obliquity, orbit_normal, relative_elements, relative_state};
use crate::error::Error;
use crate::insertion::{add_point_mass_kep, OrbitHost};
use crate::kepler::OrbitalElements;
use crate::resolved::{Member, ResolvedBody};
use crate::state::Simulation;

/// Dumbbell of two equal masses spinning about +z
fn add_spinning_dumbbell(sim: &mut Simulation) -> ResolvedBody {
    let start = sim.particle_count();
    sim.add_particle(0.5, 0.1, Point3::new(0.1, 0.0, 0.0), Vector3::new(0.0, 0.2, 0.0));
    sim.add_particle(0.5, 0.1, Point3::new(-0.1, 0.0, 0.0), Vector3::new(0.0, -0.2, 0.0));
    ResolvedBody::new(start, sim.particle_count()).unwrap()
}

#[test]
fn test_relative_state() {
    let mut sim = Simulation::new();
    let a = sim.add_particle(1.0, 0.1, Point3::new(1.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    let b = sim.add_particle(1.0, 0.1, Point3::new(3.0, 1.0, 0.0), Vector3::new(0.0, 0.5, 0.5));

    let state = relative_state(&sim, &Member::Particle(a), &Member::Particle(b)).unwrap();

    assert_eq!(state.position, Vector3::new(2.0, 0.0, 0.0));
    assert_eq!(state.velocity, Vector3::new(0.0, -0.5, 0.5));
}

#[test]
fn test_orbit_normal_of_inclined_orbit() {
    let mut sim = Simulation::new();
    let star = sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
    let (i, node) = (0.6, 1.2);
    let orbit = OrbitalElements::new(2.0, 0.3, i, node, 0.4, 2.0);
    let planet = add_point_mass_kep(&mut sim, 0.01, 0.01, OrbitHost::Particle(star), &orbit)
        .unwrap()
        .id;

    let normal = orbit_normal(&sim, &Member::Particle(star), &Member::Particle(planet)).unwrap();

    let expected = Vector3::new(node.sin() * i.sin(), -node.cos() * i.sin(), i.cos());
    assert_relative_eq!(normal, expected, epsilon = 1e-12);
}

#[test]
fn test_radial_motion_has_no_normal() {
    let mut sim = Simulation::new();
    let a = sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
    let b = sim.add_particle(1.0, 0.1, Point3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));

    assert!(matches!(
        orbit_normal(&sim, &Member::Particle(a), &Member::Particle(b)),
        Err(Error::DegenerateOrbit(_))
    ));
    assert!(matches!(
        relative_elements(&sim, &Member::Particle(a), &Member::Particle(b)),
        Err(Error::DegenerateOrbit(_))
    ));
}

#[test]
fn test_obliquity_follows_orbit_tilt() {
    let mut sim = Simulation::new();
    let body = add_spinning_dumbbell(&mut sim);
    let orbit = OrbitalElements::new(5.0, 0.1, 0.3, 0.7, 0.0, 1.0);

    let moon = add_point_mass_kep(&mut sim, 0.01, 0.01, OrbitHost::Resolved(body), &orbit)
        .unwrap()
        .id;

    let tilt = obliquity(&sim, &Member::Particle(moon), body).unwrap();
    assert_relative_eq!(tilt, 0.3, epsilon = 1e-12);
}

#[test]
fn test_aligned_spin_has_zero_obliquity() {
    let mut sim = Simulation::new();
    let star = sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
    let body = add_spinning_dumbbell(&mut sim);
    body.move_by(&mut sim, Vector3::new(4.0, 0.0, 0.0), Vector3::new(0.0, 0.5, 0.0))
        .unwrap();

    let tilt = obliquity(&sim, &Member::Particle(star), body).unwrap();
    assert_relative_eq!(tilt, 0.0, epsilon = 1e-7);
}

#[test]
fn test_retrograde_spin() {
    let mut sim = Simulation::new();
    let star = sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
    let body = add_spinning_dumbbell(&mut sim);
    body.move_by(&mut sim, Vector3::new(4.0, 0.0, 0.0), Vector3::new(0.0, -0.5, 0.0))
        .unwrap();

    let tilt = obliquity(&sim, &Member::Particle(star), body).unwrap();
    assert_relative_eq!(tilt, std::f64::consts::PI, epsilon = 1e-7);
}

#[test]
fn test_non_spinning_body_has_no_obliquity() {
    let mut sim = Simulation::new();
    let star = sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());
    sim.add_particle(0.5, 0.1, Point3::new(4.1, 0.0, 0.0), Vector3::new(0.0, 0.5, 0.0));
    sim.add_particle(0.5, 0.1, Point3::new(3.9, 0.0, 0.0), Vector3::new(0.0, 0.5, 0.0));
    let body = ResolvedBody::new(1, 3).unwrap();

    assert!(matches!(
        obliquity(&sim, &Member::Particle(star), body),
        Err(Error::DegenerateOrbit(_))
    ));
}
