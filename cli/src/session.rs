use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;

use finsim::prelude::{
    sensitivity_sweep, summarize, MonteCarloEngine, SimulationError, SimulationParameters,
    UniformPerturbationModel, SWEEP_GROWTH_RATES, SWEEP_RUN_COUNT,
};
use reporting::charts::{ProfitHistogram, SweepSeries, DEFAULT_BIN_COUNT};
use reporting::report::SimulationReport;
use reporting::tabular::write_trials_csv;
use reporting::utils::errors::Result;

// The engine validates its own mathematical domain; the narrower
// dashboard-style input limits are enforced here.
const BASE_SALES_RANGE: (f64, f64) = (10_000.0, 50_000_000.0);
const GROWTH_RATE_RANGE: (f64, f64) = (0.0, 0.5);
const COST_FRACTION_RANGE: (f64, f64) = (0.05, 0.9);
const TAX_FRACTION_RANGE: (f64, f64) = (0.0, 0.5);
const RUNS_RANGE: (usize, usize) = (50, 5_000);
const INTERVAL_RANGE: (u64, u64) = (5, 300);

#[derive(Debug, Parser)]
#[command(
    name = "finsim",
    about = "Financial decision simulation: uniform-perturbation trials with CSV and report export"
)]
pub struct Cli {
    /// Label printed on the report cover.
    #[arg(long, default_value = "Student")]
    pub student: String,

    /// Base sales anchor (Rs.).
    #[arg(long, default_value_t = 500_000.0)]
    pub base_sales: f64,

    /// Symmetric revenue perturbation half-width.
    #[arg(long, default_value_t = 0.10)]
    pub growth_rate: f64,

    /// Center of the cost-ratio window.
    #[arg(long, default_value_t = 0.40)]
    pub cost_fraction: f64,

    /// Fraction of pre-tax profit removed.
    #[arg(long, default_value_t = 0.20)]
    pub tax_fraction: f64,

    /// Number of independent trials per run.
    #[arg(long, default_value_t = 300)]
    pub runs: usize,

    /// RNG seed; omit for non-reproducible entropy-seeded runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Histogram bin count.
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    pub bins: usize,

    /// Directory for the exported artifacts, created if missing.
    #[arg(long, default_value = "simulation_outputs")]
    pub out_dir: PathBuf,

    /// Re-run on an interval instead of once.
    #[arg(long)]
    pub watch: bool,

    /// Seconds between watch cycles.
    #[arg(long, default_value_t = 10)]
    pub interval_secs: u64,

    /// Stop the watch loop after this many cycles.
    #[arg(long)]
    pub cycles: Option<usize>,
}

fn check_range<T: PartialOrd + std::fmt::Display + Copy>(
    name: &str,
    value: T,
    (lo, hi): (T, T),
) -> Result<()> {
    if value < lo || value > hi {
        return Err(SimulationError::InvalidParameter(format!(
            "{} must be between {} and {}, got {}",
            name, lo, hi, value
        ))
        .into());
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<()> {
    check_range("base-sales", cli.base_sales, BASE_SALES_RANGE)?;
    check_range("growth-rate", cli.growth_rate, GROWTH_RATE_RANGE)?;
    check_range("cost-fraction", cli.cost_fraction, COST_FRACTION_RANGE)?;
    check_range("tax-fraction", cli.tax_fraction, TAX_FRACTION_RANGE)?;
    check_range("runs", cli.runs, RUNS_RANGE)?;
    if cli.watch {
        check_range("interval-secs", cli.interval_secs, INTERVAL_RANGE)?;
    }
    Ok(())
}

/// Explicit stop signal for the watch loop, checked between cycles.
#[derive(Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> StopToken {
        StopToken::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Paths written by one run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub csv: PathBuf,
    pub report_txt: PathBuf,
    pub report_json: PathBuf,
    pub histogram: PathBuf,
    pub sweep: PathBuf,
}

/// One generate → summarize → sweep → export pass.
pub fn run_once(cli: &Cli, rng: &mut StdRng) -> Result<RunArtifacts> {
    fs::create_dir_all(&cli.out_dir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("simulating {} trials", cli.runs));

    let parameters = SimulationParameters::new(
        cli.base_sales,
        cli.growth_rate,
        cli.cost_fraction,
        cli.tax_fraction,
    )?;
    let model = UniformPerturbationModel::new(parameters);
    let trials = model.generate(cli.runs, rng)?;
    let metrics = summarize(&trials)?;
    let sweep = sensitivity_sweep(&parameters, &SWEEP_GROWTH_RATES, SWEEP_RUN_COUNT, rng)?;

    spinner.set_message("writing outputs");
    let artifacts = RunArtifacts {
        csv: cli.out_dir.join(format!("financial_results_{}.csv", stamp)),
        report_txt: cli.out_dir.join(format!("financial_report_{}.txt", stamp)),
        report_json: cli.out_dir.join(format!("financial_report_{}.json", stamp)),
        histogram: cli.out_dir.join(format!("sim_{}_hist.json", stamp)),
        sweep: cli.out_dir.join(format!("sim_{}_sens.json", stamp)),
    };

    write_trials_csv(&trials, BufWriter::new(fs::File::create(&artifacts.csv)?))?;

    let histogram = ProfitHistogram::from_trials(&trials, cli.bins)?;
    fs::write(&artifacts.histogram, serde_json::to_string_pretty(&histogram)?)?;
    let series = SweepSeries::from_points(&sweep);
    fs::write(&artifacts.sweep, serde_json::to_string_pretty(&series)?)?;

    let report = SimulationReport::new(&cli.student, parameters, cli.runs, metrics)
        .with_chart(artifacts.histogram.display().to_string())
        .with_chart(artifacts.sweep.display().to_string());
    fs::write(&artifacts.report_txt, report.render_text())?;
    fs::write(&artifacts.report_json, report.to_json()?)?;

    spinner.finish_with_message(format!("saved outputs under {}", cli.out_dir.display()));
    Ok(artifacts)
}

fn sleep_interruptible(token: &StopToken, duration: Duration) {
    let slice = Duration::from_millis(250);
    let mut remaining = duration;
    while !remaining.is_zero() && !token.is_stopped() {
        let step = remaining.min(slice);
        thread::sleep(step);
        remaining -= step;
    }
}

/// Auto-refresh loop: re-run and re-export until the token is stopped or
/// the cycle budget is exhausted. Returns the number of completed cycles.
pub fn watch(cli: &Cli, token: &StopToken, rng: &mut StdRng) -> Result<usize> {
    let mut completed = 0;
    while !token.is_stopped() {
        let artifacts = run_once(cli, rng)?;
        completed += 1;
        println!(
            "cycle {} at {}: saved {}",
            completed,
            Local::now().format("%H:%M:%S"),
            artifacts.csv.display()
        );
        if let Some(max) = cli.cycles {
            if completed >= max {
                break;
            }
        }
        sleep_interruptible(token, Duration::from_secs(cli.interval_secs));
    }
    Ok(completed)
}

pub fn run(cli: Cli) -> Result<()> {
    validate(&cli)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if cli.watch {
        let token = StopToken::new();
        let completed = watch(&cli, &token, &mut rng)?;
        println!("completed {} watch cycles", completed);
    } else {
        let artifacts = run_once(&cli, &mut rng)?;
        println!("data: {}", artifacts.csv.display());
        println!("report: {}", artifacts.report_txt.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cli(out_dir: PathBuf) -> Cli {
        Cli {
            student: "Tester".to_string(),
            base_sales: 500_000.0,
            growth_rate: 0.10,
            cost_fraction: 0.40,
            tax_fraction: 0.20,
            runs: 60,
            seed: Some(9),
            bins: 20,
            out_dir,
            watch: false,
            interval_secs: 10,
            cycles: None,
        }
    }

    fn temp_out_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("finsim_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn rejects_out_of_widget_range_inputs() {
        let mut cli = test_cli(temp_out_dir("validate"));
        cli.runs = 10;
        assert!(validate(&cli).is_err());
        cli.runs = 300;
        cli.growth_rate = 0.7;
        assert!(validate(&cli).is_err());
        cli.growth_rate = 0.1;
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn run_once_writes_all_artifacts() {
        let out_dir = temp_out_dir("run_once");
        let cli = test_cli(out_dir.clone());
        let mut rng = StdRng::seed_from_u64(9);

        let artifacts = run_once(&cli, &mut rng).unwrap();
        let csv = fs::read_to_string(&artifacts.csv).unwrap();
        assert_eq!(csv.lines().count(), 61);
        let text = fs::read_to_string(&artifacts.report_txt).unwrap();
        assert!(text.contains("Student: Tester"));
        assert!(fs::read_to_string(&artifacts.histogram)
            .unwrap()
            .contains("Simulated Profit Distribution"));
        assert!(fs::read_to_string(&artifacts.sweep)
            .unwrap()
            .contains("Growth Rate vs Average Profit"));

        fs::remove_dir_all(&out_dir).unwrap();
    }

    #[test]
    fn stopped_token_halts_watch_before_first_cycle() {
        let cli = test_cli(temp_out_dir("watch_stop"));
        let token = StopToken::new();
        token.stop();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(watch(&cli, &token, &mut rng).unwrap(), 0);
        assert!(!cli.out_dir.exists());
    }

    #[test]
    fn cycle_budget_bounds_the_watch_loop() {
        let out_dir = temp_out_dir("watch_cycles");
        let mut cli = test_cli(out_dir.clone());
        cli.cycles = Some(1);
        let token = StopToken::new();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(watch(&cli, &token, &mut rng).unwrap(), 1);
        fs::remove_dir_all(&out_dir).unwrap();
    }
}
