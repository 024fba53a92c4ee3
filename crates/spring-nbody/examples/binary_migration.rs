//! Binary migration example
//!
//! Places a Pluto-Charon-like binary on an orbit about a unit mass, then
//! lets a small moon migrate outward around the binary's primary while its
//! eccentricity is damped. Prints the orbit every few outer periods.
//!
//! Run with: cargo run --package spring-nbody --example binary_migration

use nalgebra::{Point3, Vector3};
use spring_nbody::diagnostics::relative_elements;
use spring_nbody::drift::{drift_binary, DriftRates};
use spring_nbody::forces::{CompositeForce, DirectGravity, ForceModel, J2Pole};
use spring_nbody::insertion::{add_binary_kep, add_point_mass_kep, BinarySpec, OrbitHost};
use spring_nbody::integrator::{Integrator, Leapfrog};
use spring_nbody::kepler::OrbitalElements;
use spring_nbody::resolved::Member;
use spring_nbody::state::Simulation;

fn main() -> spring_nbody::Result<()> {
    println!("Binary migration: moon drifting around an oblate primary\n");
    println!("{}", "=".repeat(60));

    let mut sim = Simulation::new();
    let central = sim.add_particle(1.0, 1.0, Point3::origin(), Vector3::zeros());

    let binary = BinarySpec {
        primary_mass: 1e-3,
        mass_ratio: 0.12,
        separation: 0.05,
        primary_radius: 0.01,
    };
    let added = add_binary_kep(&mut sim, &binary, &OrbitalElements::circular(3.0))?;
    println!(
        "Binary: m1 = {:.2e}, m2 = {:.2e}, sep = {}, outer n = {:.4}",
        binary.primary_mass,
        binary.secondary_mass(),
        binary.separation,
        added.mean_motion
    );

    let moon_orbit = OrbitalElements::new(0.012, 0.1, 0.0, 0.0, 0.0, 0.0);
    let host = OrbitHost::Particle(added.primary);
    let moon = add_point_mass_kep(&mut sim, 1e-8, 1e-4, host, &moon_orbit)?;
    println!(
        "Moon: a = {}, e = {}, n = {:.3}",
        moon_orbit.a, moon_orbit.e, moon.mean_motion
    );

    let force = CompositeForce::new()
        .with_force(DirectGravity::new())
        .with_force(J2Pole::new(added.primary, 0.01, binary.primary_radius));
    let integrator = Leapfrog::new();
    let rates = DriftRates::new(1e-2, -5e-2);

    let moon_period = std::f64::consts::TAU / moon.mean_motion;
    let dt = moon_period / 200.0;
    let report_every = 2_000;
    let n_steps = 20_000;

    let initial_energy = sim.kinetic_energy() + force.potential_energy(&sim);
    let primary = Member::Particle(added.primary);
    let satellite = Member::Particle(moon.id);

    for step in 1..=n_steps {
        integrator.step(&mut sim, dt, &force);
        drift_binary(&mut sim, &rates, dt, added.primary, moon.id)?;

        if step % report_every == 0 {
            let el = relative_elements(&sim, &primary, &satellite)?;
            let outer = relative_elements(&sim, &Member::Particle(central), &primary)?;
            println!(
                "t = {:8.3}: moon a = {:.5}, e = {:.4}; primary a = {:.4}",
                sim.time, el.a, el.e, outer.a
            );
        }
    }

    let final_energy = sim.kinetic_energy() + force.potential_energy(&sim);
    println!("\n{}", "=".repeat(60));
    println!(
        "Expected moon a = {:.5} from exp(t inv_tau_a)",
        moon_orbit.a * (rates.inv_tau_a * sim.time).exp()
    );
    println!(
        "Point-mass energy change (drift is not conservative): {:.2e}",
        (final_energy - initial_energy) / initial_energy
    );
    Ok(())
}
