//! Command line arguments.
//!
//! Any validation failure here is fatal: nothing is connected and no task
//! runs.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use rushti_core::config::DEFAULT_CONFIG_FILE;

pub const DEFAULT_LOG_FILE: &str = "RushTI.log";

/// Run TM1 processes in parallel, batch by batch, from a task file.
#[derive(Debug, Parser)]
#[command(name = "rushti", version)]
pub struct Args {
    /// Task file. One `instance=.. process=.. [param=value ..]` per line,
    /// `wait` lines between batches.
    #[arg(value_parser = existing_file)]
    pub task_file: PathBuf,

    /// Maximum number of processes running at the same time.
    #[arg(value_parser = worker_count)]
    pub max_workers: NonZeroUsize,

    /// Instance configuration.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err("path to file invalid, file needs to exist".to_string())
    }
}

/// Plain decimal digits only; signs and whitespace are rejected.
fn worker_count(raw: &str) -> Result<NonZeroUsize, String> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err("number of workers needs to be a positive integer".to_string());
    }
    raw.parse::<NonZeroUsize>()
        .map_err(|_| "number of workers needs to be at least 1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn task_file() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "instance=A process=P1\n").unwrap();
        file
    }

    #[test]
    fn accepts_file_and_worker_count() {
        let file = task_file();
        let path = file.path().to_str().unwrap();

        let args = Args::try_parse_from(["rushti", path, "4"]).unwrap();

        assert_eq!(args.task_file, file.path());
        assert_eq!(args.max_workers.get(), 4);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(args.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn config_and_log_file_can_be_overridden() {
        let file = task_file();
        let path = file.path().to_str().unwrap();

        let args = Args::try_parse_from([
            "rushti",
            path,
            "2",
            "--config",
            "/etc/rushti/config.toml",
            "--log-file",
            "/var/log/rushti.log",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("/etc/rushti/config.toml"));
        assert_eq!(args.log_file, PathBuf::from("/var/log/rushti.log"));
    }

    #[rstest]
    #[case::not_a_number("four")]
    #[case::zero("0")]
    #[case::negative("-1")]
    #[case::fraction("1.5")]
    #[case::plus_sign("+4")]
    #[case::padded(" 4")]
    #[case::empty("")]
    fn rejects_invalid_worker_count(#[case] workers: &str) {
        let file = task_file();
        let path = file.path().to_str().unwrap();

        assert!(Args::try_parse_from(["rushti", path, workers]).is_err());
    }

    #[test]
    fn worker_count_accepts_leading_zeros() {
        assert_eq!(worker_count("08").unwrap().get(), 8);
        assert!(worker_count("+4").unwrap_err().contains("positive integer"));
        assert!(worker_count("000").unwrap_err().contains("at least 1"));
    }

    #[test]
    fn rejects_missing_task_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("tasks.txt");

        let err = Args::try_parse_from(["rushti", missing.to_str().unwrap(), "4"]).unwrap_err();

        assert!(err.to_string().contains("file needs to exist"));
    }

    #[test]
    fn rejects_missing_arguments() {
        assert!(Args::try_parse_from(["rushti"]).is_err());
        let file = task_file();
        assert!(Args::try_parse_from(["rushti", file.path().to_str().unwrap()]).is_err());
    }
}
