use pasim::{ExecutionConfig, Scenario, SimulationConfig};
use pasim::{run_2d, run_headless, prompt_config};
use pasim::bench_update_curve;

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Ask for every parameter on the console before starting
    #[arg(long)]
    interactive: bool,

    /// Run without a window for --frames frames
    #[arg(long)]
    headless: bool,

    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Worker threads for the parallel update (0 = all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Step particles on a single thread
    #[arg(long)]
    sequential: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Print sequential vs parallel frame timings and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_config_from_yaml(file_name: &str) -> Result<SimulationConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let cfg: SimulationConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(cfg)
}

fn apply_overrides(cfg: &mut SimulationConfig, args: &Args) {
    if args.sequential {
        cfg.engine.mode = ExecutionConfig::Sequential;
    }
    if let Some(threads) = args.threads {
        cfg.engine.threads = threads;
    }
    if args.seed.is_some() {
        cfg.engine.seed = args.seed;
    }
}

// the windowed viewer logs through bevy's LogPlugin instead
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.headless || args.bench {
        init_logger();
    }

    if args.bench {
        return bench_update_curve();
    }

    let mut cfg = load_config_from_yaml(&args.file_name)?;
    apply_overrides(&mut cfg, &args);

    if args.interactive {
        let stdin = io::stdin();
        cfg = prompt_config(cfg, &mut stdin.lock(), &mut io::stdout())?;
    }

    let mut scenario = Scenario::build_scenario(cfg).context("invalid simulation configuration")?;

    if args.headless {
        run_headless(&mut scenario, args.frames);
    } else {
        run_2d(scenario);
    }

    Ok(())
}
