use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

use crate::forces::{CompositeForce, DirectGravity, ForceModel, J2Pole, RotatingQuadrupole};
use crate::integrator::{Integrator, Leapfrog};
use crate::particle::ParticleId;
use crate::state::Simulation;

const STAR: ParticleId = ParticleId(0);
const PLANET: ParticleId = ParticleId(1);

fn make_test_system() -> Simulation {
    let mut sim = Simulation::new();
    sim.add_particle(1.0, 0.1, Point3::origin(), Vector3::zeros());

    // v_circular = sqrt(G (M + m) / r) at r = 1
    let m = 3.0e-6;
    let v_circular = (sim.g * (1.0 + m)).sqrt();
    sim.add_particle(m, 0.01, Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, v_circular, 0.0));
    sim
}

fn separation(sim: &Simulation) -> f64 {
    let star = sim.particle(STAR).unwrap();
    sim.particle(PLANET).unwrap().distance_to(star)
}

fn total_energy(sim: &Simulation, gravity: &DirectGravity) -> f64 {
    sim.kinetic_energy() + gravity.potential_energy(sim)
}

#[test]
fn test_leapfrog_advances_time() {
    let mut sim = make_test_system();
    let integrator = Leapfrog::new();
    let force = DirectGravity::new();

    assert_eq!(sim.time, 0.0);

    integrator.step(&mut sim, 0.01, &force);

    assert!((sim.time - 0.01).abs() < 1e-15);
}

#[test]
fn test_dkd_advances_time() {
    let mut sim = make_test_system();
    Leapfrog::new_dkd().step(&mut sim, 0.01, &DirectGravity::new());
    assert!((sim.time - 0.01).abs() < 1e-15);
}

#[test]
fn test_integrate_returns_final_time() {
    let mut sim = make_test_system();
    let t = Leapfrog::new().integrate(&mut sim, 0.01, 100, &DirectGravity::new());

    assert_relative_eq!(t, 1.0, epsilon = 1e-12);
    assert_eq!(t, sim.time);
}

#[test]
fn test_leapfrog_changes_position() {
    let mut sim = make_test_system();
    let initial_pos = sim.particle(PLANET).unwrap().position;

    Leapfrog::new().step(&mut sim, 0.01, &DirectGravity::new());

    let final_pos = sim.particle(PLANET).unwrap().position;
    assert!((final_pos - initial_pos).magnitude() > 0.0);
}

#[test]
fn test_leapfrog_circular_orbit() {
    let mut sim = make_test_system();
    let integrator = Leapfrog::new();
    let force = DirectGravity::new();

    // One orbit at r = 1 takes 2π
    let dt = 0.001;
    let steps = (TAU / dt) as usize;
    for _ in 0..steps {
        integrator.step(&mut sim, dt, &force);
        assert!((separation(&sim) - 1.0).abs() < 1e-3);
    }

    // Back near the start
    let pos = sim.particle(PLANET).unwrap().position;
    assert!((pos - Point3::new(1.0, 0.0, 0.0)).magnitude() < 0.01);
}

#[test]
fn test_leapfrog_energy_conservation() {
    let mut sim = make_test_system();
    // Make the orbit eccentric
    sim.particle_mut(PLANET).unwrap().velocity *= 1.2;
    let gravity = DirectGravity::new();
    let e0 = total_energy(&sim, &gravity);

    for integrator in [Leapfrog::new(), Leapfrog::new_dkd()] {
        let mut run = sim.clone();
        integrator.integrate(&mut run, 0.001, 20_000, &gravity);
        let e1 = total_energy(&run, &gravity);
        assert!(((e1 - e0) / e0).abs() < 1e-5, "energy drift {}", (e1 - e0) / e0);
    }
}

#[test]
fn test_leapfrog_angular_momentum_conservation() {
    let mut sim = make_test_system();
    sim.particle_mut(PLANET).unwrap().velocity += Vector3::new(0.1, 0.0, 0.2);
    let l0 = sim.total_angular_momentum();

    Leapfrog::new().integrate(&mut sim, 0.001, 10_000, &DirectGravity::new());

    assert_relative_eq!(sim.total_angular_momentum(), l0, epsilon = 1e-15, max_relative = 1e-10);
}

#[test]
fn test_step_clears_stale_accelerations() {
    let mut a = make_test_system();
    let mut b = make_test_system();
    b.particle_mut(PLANET).unwrap().acceleration = Vector3::new(100.0, 100.0, 100.0);

    let integrator = Leapfrog::new();
    let force = DirectGravity::new();
    integrator.step(&mut a, 0.01, &force);
    integrator.step(&mut b, 0.01, &force);

    assert_eq!(a.particles(), b.particles());
}

#[test]
fn test_composite_with_oblate_star() {
    let mut sim = make_test_system();
    let force = CompositeForce::new()
        .with_force(DirectGravity::new())
        .with_force(J2Pole::new(STAR, 1e-3, 0.1).with_pole(0.3, 0.2));
    let p0 = sim.total_momentum();

    Leapfrog::new().integrate(&mut sim, 0.001, 5_000, &force);

    assert_relative_eq!(sim.total_momentum(), p0, epsilon = 1e-14);
    assert!((separation(&sim) - 1.0).abs() < 1e-2);
    // The tilted pole torques the orbit out of the x-y plane
    assert!(sim.particle(PLANET).unwrap().position.z.abs() > 0.0);
}

#[test]
fn test_rotating_field_sees_advancing_time() {
    let mut sim = make_test_system();
    let force = CompositeForce::new()
        .with_force(DirectGravity::new())
        .with_force(RotatingQuadrupole::new(STAR, -1e-3, 1e-3, 0.0, 0.1, 3.0));

    let t = Leapfrog::new_dkd().integrate(&mut sim, 0.01, 50, &force);

    assert_relative_eq!(t, 0.5, epsilon = 1e-12);
    assert!(sim.particles().iter().all(|p| p.position.coords.iter().all(|x| x.is_finite())));
}
