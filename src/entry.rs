use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::args::{Cli, Command, RunArgs};
use crate::config::{BenchPlan, PlanOverrides, load_config_file, validate_config, write_example_config};
use crate::error::AppResult;
use crate::run::{LogObserver, NoopObserver, RunObserver, run_plan};
use crate::sinks::{write_csv_report, write_json_report};
use crate::summary::print_summary;

pub(crate) fn run() -> AppResult<()> {
    let cli = Cli::parse();
    crate::logger::init_logging(cli.verbose);

    match cli.command {
        Command::Init(args) => {
            write_example_config(&args.path)?;
            info!("Wrote example config to '{}'.", args.path.display());
            Ok(())
        }
        Command::Run(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_async(args))
        }
    }
}

async fn run_async(args: RunArgs) -> AppResult<()> {
    let file = load_config_file(&args.config)?;
    validate_config(&file)?;

    let overrides = PlanOverrides {
        max_requests: args.max_requests,
        duration_ms: args.duration,
        concurrent: args.concurrent,
    };
    let plan = BenchPlan::from_config(file, overrides);

    let observer: Arc<dyn RunObserver> = if args.quiet {
        Arc::new(NoopObserver)
    } else {
        Arc::new(LogObserver)
    };

    let report = run_plan(&plan, observer).await?;

    if !args.quiet {
        print_summary(&report);
    }
    if let Some(path) = args.export_json.as_ref() {
        write_json_report(path, &report)
            .await
            .map_err(crate::error::AppError::sink)?;
        info!("Wrote JSON report to '{}'.", path.display());
    }
    if let Some(path) = args.export_csv.as_ref() {
        write_csv_report(path, &report)
            .await
            .map_err(crate::error::AppError::sink)?;
        info!("Wrote CSV report to '{}'.", path.display());
    }

    Ok(())
}
