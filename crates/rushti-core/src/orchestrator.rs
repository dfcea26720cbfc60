//! Orchestrator: runs the batches of a plan one after another.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tracing::Instrument;

use crate::config::AppConfig;
use crate::domain::{RunId, RunReport};
use crate::executor::ConcurrentBatchExecutor;
use crate::parse::TaskPlan;
use crate::ports::{BatchObserver, Connector};
use crate::registry::ServiceRegistry;
use crate::runner::TaskRunner;

pub struct Orchestrator {
    executor: ConcurrentBatchExecutor,
    observer: Option<Arc<dyn BatchObserver>>,
}

impl Orchestrator {
    pub fn new(executor: ConcurrentBatchExecutor) -> Self {
        Self {
            executor,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Connect every configured instance, run `plan`, then log out.
    ///
    /// The registry is shut down on every exit path. A panic escaping batch
    /// execution is resumed only after the sessions have been closed.
    pub async fn run_with(
        &self,
        plan: TaskPlan,
        config: &AppConfig,
        connector: &dyn Connector,
    ) -> RunReport {
        // 1) open sessions; unreachable instances are logged and left out
        let registry = Arc::new(ServiceRegistry::connect(config, connector).await);
        tracing::info!(
            connected = registry.len(),
            configured = config.instances.len(),
            "Service registry ready"
        );

        // 2) run every batch, holding on to a panic instead of unwinding past shutdown
        let outcome = AssertUnwindSafe(self.run(plan, Arc::clone(&registry)))
            .catch_unwind()
            .await;
        // 3) log out, then hand the report (or the panic) back
        registry.shutdown().await;

        match outcome {
            Ok(report) => report,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// Run `plan` against an existing registry.
    ///
    /// Batch `k + 1` is not started before every task of batch `k` is
    /// terminal.
    pub async fn run(&self, plan: TaskPlan, registry: Arc<ServiceRegistry>) -> RunReport {
        let run_id = RunId::generate();
        let span = tracing::info_span!("run", %run_id);
        self.run_batches(plan, registry).instrument(span).await
    }

    async fn run_batches(&self, plan: TaskPlan, registry: Arc<ServiceRegistry>) -> RunReport {
        let started = Instant::now();
        let runner = TaskRunner::new(registry);
        let total = plan.batches.len();
        let mut report = RunReport {
            batches: Vec::with_capacity(total),
            rejected: plan.rejected,
            elapsed: Default::default(),
        };

        for batch in &plan.batches {
            tracing::info!(
                batch = batch.index() + 1,
                of = total,
                tasks = batch.len(),
                max_workers = self.executor.max_concurrency().get(),
                "Starting batch"
            );
            let batch_report = self.executor.execute(batch, &runner).await;
            tracing::info!(batch = batch.index() + 1, of = total, "Batch finished");
            if let Some(observer) = &self.observer {
                observer.batch_finished(&batch_report, total);
            }
            report.batches.push(batch_report);
        }

        report.elapsed = started.elapsed();
        report
    }
}
