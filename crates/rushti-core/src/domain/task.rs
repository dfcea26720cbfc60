use std::collections::BTreeMap;
use std::fmt;

/// Parameters forwarded to a remote procedure.
///
/// Keys are kept exactly as written in the task file; remote APIs may treat
/// them case-sensitively.
pub type Parameters = BTreeMap<String, String>;

/// One remote procedure invocation request, as parsed from a task line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    instance: String,
    process: String,
    parameters: Parameters,
    source_line: String,
}

impl Task {
    pub fn new(
        instance: impl Into<String>,
        process: impl Into<String>,
        parameters: Parameters,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            instance: instance.into(),
            process: process.into(),
            parameters,
            source_line: source_line.into(),
        }
    }

    /// Name of the target instance (key into the service registry).
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Name of the remote procedure.
    pub fn process(&self) -> &str {
        &self.process
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The raw line the task was parsed from.
    pub fn source_line(&self) -> &str {
        &self.source_line
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.process, self.instance)
    }
}

/// Tasks that run concurrently between two barriers.
///
/// `index` is the zero-based position of the batch in the task file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    index: usize,
    tasks: Vec<Task>,
}

impl Batch {
    pub fn new(index: usize, tasks: Vec<Task>) -> Self {
        Self { index, tasks }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
