//! BatchObserver port - progress notifications between batches.

use crate::domain::BatchReport;

/// Notified by the orchestrator once a batch has fully joined.
///
/// Called on the orchestrator's own task, outside the workers, before the
/// next batch starts.
pub trait BatchObserver: Send + Sync {
    fn batch_finished(&self, report: &BatchReport, total: usize);
}
