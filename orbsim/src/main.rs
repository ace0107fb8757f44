use orbsim::{ScenarioConfig, Scenario};
use orbsim::run_headless;
use orbsim::{bench_step, bench_frame, bench_step_curve};

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "earth_moon.yaml")]
    file_name: String,

    /// Number of render ticks to run
    #[arg(short, long, default_value_t = 3000)]
    ticks: usize,

    /// Pace ticks at the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_step()?;
        bench_frame()?;
        bench_step_curve()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    run_headless(&mut scenario, args.ticks, args.realtime)?;

    Ok(())
}
