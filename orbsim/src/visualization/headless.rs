use std::thread;
use std::time::Instant;

use log::{debug, info};

use crate::error::SimResult;
use crate::simulation::scenario::Scenario;

/// Drive a scenario without a window: one `tick` per timer tick, trails fed
/// after each frame. With `realtime` set, ticks are paced at `engine.tick_hz`.
pub fn run_headless(scenario: &mut Scenario, ticks: usize, realtime: bool) -> SimResult<()> {
    info!(
        "run_headless: {} bodies, {} ticks, {} simulated s per tick",
        scenario.system().len(),
        ticks,
        scenario.engine().simulated_seconds_per_tick()
    );

    let interval = scenario.engine().tick_interval();
    let started = Instant::now();

    for tick in 0..ticks {
        let tick_start = Instant::now();
        scenario.tick()?;

        if log::log_enabled!(log::Level::Debug) {
            for b in scenario.system().bodies() {
                let screen = scenario.viewport().to_screen(scenario.system(), b.position())?;
                debug!("tick {} {}: screen ({:.1}, {:.1})", tick, b.name(), screen.x, screen.y);
            }
        }

        if realtime {
            if let Some(rest) = interval.checked_sub(tick_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    info!(
        "finished at t = {:.0} s ({:.2} days) in {:.3} s wall time",
        scenario.system().t,
        scenario.system().t / 86_400.0,
        started.elapsed().as_secs_f64()
    );
    for b in scenario.system().bodies() {
        info!("\n{}", b);
    }
    for (name, trail) in scenario.trails().iter() {
        info!("trail {}: {} / {} points", name, trail.len(), trail.capacity());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::ScenarioConfig;

    #[test]
    fn runs_requested_ticks() {
        let cfg: ScenarioConfig = serde_yaml::from_str("
engine: { dt: 10.0, substeps: 2 }
trails: { capacity: 3 }
bodies:
  - { name: A, x: [0.0, 0.0], v: [0.0, 0.0], m: 1.0e20 }
  - { name: B, x: [1.0e7, 0.0], v: [0.0, 0.0], m: 1.0e20 }
")
        .unwrap();
        let mut scenario = Scenario::build_scenario(cfg).unwrap();

        run_headless(&mut scenario, 5, false).unwrap();

        assert_eq!(scenario.system().t, 100.0);
        assert_eq!(scenario.trails().get("B").unwrap().len(), 3);
    }
}
