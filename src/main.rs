use anyhow::{Context, Result};
use clap::Parser;

use swapscope::{
    arguments::{print_debug_info, Args},
    collector::TimeBudget,
    config::load_config_from_path,
    logger::{self as logger, LogTag},
    pipeline,
    rpc::{probe_endpoints, RpcClient},
};

/// Main entry point for swapscope
///
/// Exit code is nonzero only for configuration problems and unrecoverable
/// failures. Running out of time budget is a normal, successful exit.
#[tokio::main]
async fn main() {
    let args = Args::parse();

    let code = match run(args).await {
        Ok(()) => 0,
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ {:#}", e));
            1
        }
    };

    logger::flush();
    std::process::exit(code);
}

async fn run(args: Args) -> Result<()> {
    let paths = args.data_paths();

    // Logger needs the logs directory to create its file
    paths
        .ensure_all_directories()
        .context("Failed to create required directories")?;
    logger::init(args.logger_config(), Some(&paths.logs_directory()));

    logger::info(LogTag::System, "🚀 swapscope starting up...");
    print_debug_info(&args);

    let config_path = args.config_path(&paths);
    let settings = load_config_from_path(&config_path)
        .and_then(|config| config.validate())
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    logger::info(
        LogTag::Config,
        &format!(
            "Loaded {} ({} endpoints, window {})",
            config_path.display(),
            settings.endpoints.len(),
            settings.window.describe()
        ),
    );

    let client = RpcClient::from_settings(&settings).context("Failed to build RPC client")?;

    if args.check_endpoints {
        let results = probe_endpoints(&client).await;
        let healthy = results.iter().filter(|r| r.success).count();
        logger::info(
            LogTag::Rpc,
            &format!("{}/{} endpoints healthy", healthy, results.len()),
        );
    }

    if args.phase.runs_collection() {
        let budget = TimeBudget::new(settings.time_budget);
        let summary = pipeline::run_collection(&client, &settings, &paths, &budget)
            .await
            .context("Collection failed")?;
        if summary.budget_exhausted {
            logger::warning(
                LogTag::System,
                &format!("⏱️ Stopped after {}s; results cover a partial window", budget.elapsed().as_secs()),
            );
        }
    }

    let mut wallets = None;
    if args.phase.runs_aggregation() {
        let (map, _) = pipeline::run_aggregation(&settings, &paths).context("Aggregation failed")?;
        wallets = Some(map);
    }

    if args.phase.runs_report() {
        pipeline::run_report(&settings, &paths, wallets, !args.quiet).context("Report failed")?;
    }

    if client.stats().total_requests() > 0 {
        client.stats().log_summary();
    }

    logger::info(LogTag::System, "✅ swapscope finished");
    Ok(())
}
