use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use gls_routing::evaluation::RouteEvaluator;
use gls_routing::gls::{solve, GlsConfig};
use gls_routing::instance::load_instance;
use gls_routing::local_search::Operator;
use gls_routing::models::ViolationType;
use gls_routing::output::{self, OutputFormat};

/// Solves capacitated vehicle routing instances with Guided Local Search.
#[derive(Parser, Debug)]
#[command(about, version, author)]
struct Args {
    /// Instance files in Solomon format.
    #[arg(required = true)]
    instances: Vec<PathBuf>,

    /// Penalty weight (lambda) of the augmented objective.
    #[arg(long, default_value_t = 0.2)]
    penalty_factor: f64,

    /// Maximum number of improving GLS iterations.
    #[arg(long = "max-iter", default_value_t = 1000)]
    max_iter: usize,

    /// Time budget per instance, in seconds.
    #[arg(long, default_value_t = 3600.0)]
    time_limit: f64,

    /// Local search operators to disable (two-opt, exchange, relocate).
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<Operator>,

    /// Do not write result files.
    #[arg(long)]
    no_sol: bool,

    /// Directory for result files.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Result file format (text or json).
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Log the best cost every N iterations (0 disables).
    #[arg(long, default_value_t = 100)]
    progress_interval: usize,

    /// More output; repeat for trace logging. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn enable_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

fn config_from_args(args: &Args) -> Result<GlsConfig> {
    let time_limit = Duration::try_from_secs_f64(args.time_limit)
        .map_err(|e| anyhow!("invalid --time-limit {}: {e}", args.time_limit))?;
    let config = GlsConfig::default()
        .with_penalty_factor(args.penalty_factor)
        .with_max_iterations(args.max_iter)
        .with_time_limit(time_limit)
        .with_excluded_operators(args.exclude.clone())
        .with_progress_interval(args.progress_interval);
    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

fn run_instance(path: &Path, config: &GlsConfig, args: &Args) -> Result<()> {
    let instance =
        load_instance(path).with_context(|| format!("failed to load {}", path.display()))?;
    let name = instance.name().to_string();
    let model = instance
        .into_cost_model()
        .with_context(|| format!("invalid instance {}", path.display()))?;

    info!(
        instance = %name,
        customers = model.num_customers(),
        vehicles = model.vehicle_count(),
        capacity = model.capacity(),
        "solving"
    );
    debug!(
        instance = %name,
        symmetric = model.distances().is_symmetric(1e-9),
        total_demand = model.total_demand(),
        "cost model"
    );

    let result = match solve(&model, config.clone()) {
        Ok(result) => result,
        Err(e) => {
            warn!(instance = %name, error = %e, "no solution");
            return Ok(());
        }
    };

    let evaluator = RouteEvaluator::new(&model);
    let violations = evaluator.check_solution(&result.solution);
    let duration: f64 = evaluator
        .schedules(&result.solution)
        .iter()
        .map(|s| s.duration)
        .sum();
    let late = violations
        .iter()
        .filter(|v| matches!(v.kind, ViolationType::TimeWindowViolated { .. }))
        .count();
    info!(
        instance = %name,
        distance = %format!("{:.2}", result.cost),
        initial = %format!("{:.2}", result.initial_cost),
        vehicles = result.solution.num_routes(),
        iterations = result.iterations,
        termination = %result.termination,
        feasible = violations.iter().all(|v| !v.is_hard()),
        all_served = result.solution.all_served(model.num_customers()),
        elapsed_ms = result.elapsed.as_millis() as u64,
        "solved"
    );
    debug!(
        instance = %name,
        duration = %format!("{duration:.2}"),
        late,
        "schedule (time windows are reported, not enforced)"
    );

    if !args.no_sol {
        let written = output::save(&args.out_dir, &name, &model, &result, args.format)
            .with_context(|| format!("failed to write result for {name}"))?;
        info!(path = %written.display(), "result written");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    enable_tracing(args.verbose);

    let config = config_from_args(&args)?;
    debug!(?config, "configuration");

    for path in &args.instances {
        run_instance(path, &config, &args)?;
    }
    Ok(())
}
