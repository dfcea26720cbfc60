//! Task file parsing: word splitting, task lines, batch splitting.

pub mod lexer;
mod line;
mod splitter;

pub use line::parse_line;
pub use splitter::{RejectedLine, TaskPlan, is_barrier, split_batches};
