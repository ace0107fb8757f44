use std::time::Instant;

use crate::error::SimResult;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{NewtonianGravity, Singularity};
use crate::simulation::integrator::Integrator;
use crate::simulation::states::{Body, NVec2, System};

/// Time a single `step` for growing body counts
pub fn bench_step() -> SimResult<()> {
    let ns = [3, 10, 50, 100, 200, 400, 800];
    let steps = 20;

    for n in ns {
        let mut sys = make_system(n)?;
        let integrator = make_integrator();

        // Warm up
        integrator.step(&mut sys, 1.0)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            integrator.step(&mut sys, 1.0)?;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:5}, step = {:10.6} ms", n, per_step * 1000.0);
    }
    Ok(())
}

/// Time whole frames at the default frame clock for a three-body system
pub fn bench_frame() -> SimResult<()> {
    let engine = Engine::default();
    let integrator = make_integrator();
    let mut sys = make_system(3)?;
    let frames = 100;

    let t0 = Instant::now();
    for _ in 0..frames {
        integrator.advance_frame(&mut sys, engine.dt, engine.substeps)?;
    }
    let per_frame = t0.elapsed().as_secs_f64() / frames as f64;

    println!(
        "{} substeps per frame: {:.6} ms per frame, budget {:.3} ms per tick",
        engine.substeps,
        per_frame * 1000.0,
        engine.tick_interval().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Step cost for n = 10..=1000, one CSV row per n
/// Paste output directly into excel to graph
pub fn bench_step_curve() -> SimResult<()> {
    println!("N,step_ms");

    for n in (10..=1000).step_by(10) {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 200 { 20 } else { 3 };
        let mut sys = make_system(n)?;
        let integrator = make_integrator();

        let t0 = Instant::now();
        for _ in 0..steps {
            integrator.step(&mut sys, 1.0)?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}

/// Helper to build a deterministic System of size `n`
fn make_system(n: usize) -> SimResult<System> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new((i_f * 0.37).sin() * 5.0e9, (i_f * 0.13).cos() * 5.0e9);
        bodies.push(Body::new(x, NVec2::zeros(), 1.0e24, 1.0e6, format!("body-{}", i))?);
    }

    System::new(bodies)
}

fn make_integrator() -> Integrator {
    // clamp so that near-overlapping synthetic bodies cannot abort a run
    Integrator::new(NewtonianGravity::new(Singularity::Clamp { min_distance: 1.0e6 }))
}
