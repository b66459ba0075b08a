#![forbid(unsafe_code)]

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::debug;

use alwabp_vns::instance::Instance;
use alwabp_vns::vns::{VnsConfig, VnsRunner};

/// VNS solver for the assembly line worker assignment and balancing problem
#[derive(Debug, Parser)]
struct App {
    #[command(flatten)]
    verbose: Verbosity,

    /// Instance file in the plain-text ALWABP format; reads stdin when omitted
    instance: Option<PathBuf>,

    /// File to write the formatted best solution to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of VNS iterations
    #[arg(long, default_value_t = 500)]
    max_iter: usize,

    /// Largest shaking neighborhood
    #[arg(long, default_value_t = 3)]
    kmax: usize,

    /// Wall-clock limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = App::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{args:?}");

    let text = match &args.instance {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read instance file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read instance from stdin")?;
            buffer
        }
    };

    let instance: Instance = text.parse().context("malformed instance")?;

    let mut config = VnsConfig::default()
        .with_max_iterations(args.max_iter)
        .with_k_max(args.kmax)
        .with_seed(args.seed);
    if let Some(seconds) = args.time_limit {
        config = config.with_time_limit(Duration::from_secs_f64(seconds));
    }

    let result = VnsRunner::run(&instance, &config);

    // One summary line per run, for downstream aggregation scripts:
    // initial cycle time; best cycle time; elapsed seconds.
    // Infeasible solutions print inf.
    println!(
        "{};{};{:.4}",
        result.initial.cycle_time(),
        result.best.cycle_time(),
        result.elapsed.as_secs_f64()
    );

    if let Some(path) = &args.output {
        fs::write(path, result.best.to_string())
            .with_context(|| format!("cannot write solution to {}", path.display()))?;
    }

    Ok(())
}
