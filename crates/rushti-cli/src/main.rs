mod args;
mod telemetry;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use rushti_core::domain::{BatchReport, TaskOutcome};
use rushti_core::impls::RestConnector;
use rushti_core::ports::BatchObserver;
use rushti_core::{AppConfig, ConcurrentBatchExecutor, Orchestrator, TaskPlan};

use crate::args::{Args, DEFAULT_LOG_FILE};

const APP_NAME: &str = "RushTI";

/// One console line per finished batch; the details go to the log file.
struct ConsoleProgress;

impl BatchObserver for ConsoleProgress {
    fn batch_finished(&self, report: &BatchReport, total: usize) {
        let failed = report
            .results
            .iter()
            .filter(|r| matches!(r.outcome, TaskOutcome::Failure { .. }))
            .count();
        let skipped = report
            .results
            .iter()
            .filter(|r| matches!(r.outcome, TaskOutcome::Skipped { .. }))
            .count();
        println!(
            "batch {}/{total}: {} tasks, {failed} failed, {skipped} skipped",
            report.index + 1,
            report.results.len()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            if !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                telemetry::init_tracing(Path::new(DEFAULT_LOG_FILE));
                tracing::error!("{APP_NAME} invoked with invalid arguments: {err}");
            }
            err.exit();
        }
    };
    telemetry::init_tracing(&args.log_file);

    let started = Instant::now();
    tracing::info!(
        arguments = ?std::env::args().collect::<Vec<_>>(),
        started_at = %chrono::Local::now().to_rfc3339(),
        "{APP_NAME} starts"
    );

    if let Err(e) = run(&args).await {
        tracing::error!("{APP_NAME} aborted: {e:#}");
        return Err(e);
    }

    tracing::info!(
        duration = ?started.elapsed(),
        finished_at = %chrono::Local::now().to_rfc3339(),
        "{APP_NAME} ends"
    );
    Ok(())
}

/// Everything after argument validation. Task outcomes never make this fail.
async fn run(args: &Args) -> anyhow::Result<()> {
    let config = AppConfig::load(&args.config)
        .with_context(|| format!("loading instance configuration {}", args.config.display()))?;
    let plan = TaskPlan::load(&args.task_file).await?;
    tracing::info!(
        batches = plan.batches.len(),
        tasks = plan.task_count(),
        rejected = plan.rejected.len(),
        "Task file read"
    );

    let orchestrator = Orchestrator::new(ConcurrentBatchExecutor::new(args.max_workers))
        .with_observer(Arc::new(ConsoleProgress));
    let report = orchestrator
        .run_with(plan, &config, &RestConnector)
        .await;

    let counts = report.counts();
    tracing::info!(
        succeeded = counts.succeeded,
        failed = counts.failed,
        skipped = counts.skipped,
        rejected = counts.rejected,
        elapsed = ?report.elapsed,
        "All batches finished"
    );
    Ok(())
}
