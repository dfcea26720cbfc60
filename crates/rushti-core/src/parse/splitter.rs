//! Batch splitter: turns the lines of a task file into ordered batches.

use std::path::Path;

use super::line::parse_line;
use crate::domain::{Batch, ParseError, PlanError, Task};

/// A line dropped because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based position in the input.
    pub line_number: usize,
    pub line: String,
    pub error: ParseError,
}

/// Is `line` a barrier (`wait`, any case, surrounding whitespace ignored)?
pub fn is_barrier(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("wait")
}

/// The executable shape of a task file.
#[derive(Debug, Clone, Default)]
pub struct TaskPlan {
    pub batches: Vec<Batch>,
    pub rejected: Vec<RejectedLine>,
}

impl TaskPlan {
    /// Read and split a task file.
    pub async fn load(path: &Path) -> Result<Self, PlanError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PlanError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        split_batches(content.lines())
    }

    pub fn task_count(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }
}

/// Group `lines` into batches separated by barrier lines.
///
/// Blank lines are ignored. A run between barriers that yields no task
/// produces no batch.
pub fn split_batches<I, S>(lines: I) -> TaskPlan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut plan = TaskPlan::default();
    let mut current: Vec<Task> = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if is_barrier(line) {
            close_batch(&mut plan.batches, &mut current);
            continue;
        }
        match parse_line(line) {
            Ok(Some(task)) => current.push(task),
            Ok(None) => {}
            Err(error) => {
                tracing::error!(
                    line_number = idx + 1,
                    line,
                    error = %error,
                    "Task line could not be parsed, skipping it"
                );
                plan.rejected.push(RejectedLine {
                    line_number: idx + 1,
                    line: line.to_string(),
                    error,
                });
            }
        }
    }
    close_batch(&mut plan.batches, &mut current);

    plan
}

fn close_batch(batches: &mut Vec<Batch>, current: &mut Vec<Task>) {
    if current.is_empty() {
        return;
    }
    let index = batches.len();
    batches.push(Batch::new(index, std::mem::take(current)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn processes(plan: &TaskPlan) -> Vec<Vec<&str>> {
        plan.batches
            .iter()
            .map(|b| b.tasks().iter().map(Task::process).collect())
            .collect()
    }

    #[test]
    fn wait_line_separates_batches() {
        let plan = split_batches([
            r#"instance="A" process="P1" pWaitSec=2"#,
            "wait",
            r#"instance="A" process="P2""#,
        ]);
        assert_eq!(processes(&plan), vec![vec!["P1"], vec!["P2"]]);
        assert_eq!(plan.batches[0].index(), 0);
        assert_eq!(plan.batches[1].index(), 1);
    }

    #[test]
    fn lines_between_barriers_share_a_batch() {
        let plan = TaskPlan::parse(
            "instance=A process=P1\ninstance=B process=P2\nwait\ninstance=A process=P3\n",
        );
        assert_eq!(processes(&plan), vec![vec!["P1", "P2"], vec!["P3"]]);
        assert_eq!(plan.task_count(), 3);
    }

    #[test]
    fn blank_lines_and_mixed_case_barriers_never_make_empty_batches() {
        let plan = split_batches([
            "WAIT",
            "",
            "instance=A process=P1",
            "   ",
            "instance=A process=P2",
            "",
            "  Wait  ",
            "wait",
            "",
            "instance=A process=P3",
            "wait",
            "",
        ]);
        assert_eq!(processes(&plan), vec![vec!["P1", "P2"], vec!["P3"]]);
        assert!(plan.batches.iter().all(|b| !b.is_empty()));
    }

    #[test]
    fn rejected_line_is_dropped_and_rest_of_file_survives() {
        let plan = split_batches([
            r#"process="P1""#,
            r#"instance="A" process="P2""#,
            "wait",
            r#"instance="A" process="P3""#,
        ]);
        assert_eq!(processes(&plan), vec![vec!["P2"], vec!["P3"]]);
        assert_eq!(plan.rejected.len(), 1);
        assert_eq!(plan.rejected[0].line_number, 1);
        assert_eq!(plan.rejected[0].error, ParseError::MissingKey("instance"));
    }

    #[test]
    fn run_of_only_rejected_lines_yields_no_batch() {
        let plan = split_batches(["instance=A process=P1", "wait", "garbage", "wait", "instance=A process=P2"]);
        assert_eq!(processes(&plan), vec![vec!["P1"], vec!["P2"]]);
        assert_eq!(plan.batches[1].index(), 1);
    }

    #[rstest]
    #[case::empty_file("", 0)]
    #[case::only_barriers("wait\nWAIT\n\nwait", 0)]
    #[case::no_barrier("instance=A process=P1\ninstance=A process=P2", 1)]
    #[case::three_runs(
        "instance=A process=P1\nwait\ninstance=A process=P2\nwait\nwait\ninstance=A process=P3",
        3
    )]
    #[case::trailing_barrier("instance=A process=P1\nwait\n", 1)]
    fn batch_count_equals_runs_with_tasks(#[case] content: &str, #[case] expected: usize) {
        assert_eq!(TaskPlan::parse(content).batches.len(), expected);
    }

    #[rstest]
    #[case("wait", true)]
    #[case(" Wait\t", true)]
    #[case("WAIT\r", true)]
    #[case("waiting", false)]
    #[case("instance=wait process=wait", false)]
    fn recognises_barriers(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_barrier(line), expected);
    }

    #[tokio::test]
    async fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        std::fs::write(&path, "instance=A process=P1\nwait\ninstance=A process=P2\n").unwrap();

        let plan = TaskPlan::load(&path).await.unwrap();
        assert_eq!(processes(&plan), vec![vec!["P1"], vec!["P2"]]);
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TaskPlan::load(&dir.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
