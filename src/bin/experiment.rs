use clap::Parser;
use simtrial::config::ExperimentConfig;
use simtrial::driver::ExperimentDriver;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "experiment",
    about = "Run repeated timed trials against a simulated environment"
)]
struct Args {
    /// Path to experiment config JSON; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the directory recordings are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Override trials per scenario
    #[arg(long)]
    trials: Option<u32>,

    /// Override how long each workload runs (seconds)
    #[arg(long)]
    task_secs: Option<f64>,

    /// Override number of scenarios (1-indexed)
    #[arg(long)]
    scenarios: Option<u32>,

    /// Override the fixed wait after starting the simulation (seconds)
    #[arg(long)]
    startup_delay_secs: Option<f64>,

    /// Stop already-started processes when the run aborts
    #[arg(long)]
    cleanup_on_abort: bool,

    /// Print the trial plan and exit without launching anything
    #[arg(long)]
    dry_run: bool,

    /// Write the run summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "experiment failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> simtrial::Result<()> {
    let config = load_config(&args)?;
    let mut driver = ExperimentDriver::from_config(config);

    if args.dry_run {
        for record in driver.plan() {
            println!(
                "trial scenario={} trial={} artifact={}",
                record.scenario,
                record.trial,
                record.artifact.display()
            );
        }
        return Ok(());
    }

    let summary = driver.run()?;
    if let Some(path) = args.summary_json.as_ref() {
        summary.write_json(path)?;
        info!(path = ?path, "wrote run summary");
    }
    Ok(())
}

fn load_config(args: &Args) -> simtrial::Result<ExperimentConfig> {
    let mut config = match args.config.as_ref() {
        Some(path) => ExperimentConfig::from_path(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(dir) = args.output_dir.clone() {
        config.output_directory = dir;
    }
    if let Some(trials) = args.trials {
        config.trial_count = trials;
    }
    if let Some(secs) = args.task_secs {
        config.task_duration_secs = secs;
    }
    if let Some(scenarios) = args.scenarios {
        config.scenario_count = scenarios;
    }
    if let Some(secs) = args.startup_delay_secs {
        config.startup_delay_secs = secs;
    }
    if args.cleanup_on_abort {
        config.cleanup_on_abort = true;
    }
    config.validate()?;
    Ok(config)
}
