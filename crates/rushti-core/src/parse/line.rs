//! Task line parser.
//!
//! A task line is a list of shell-style `key=value` words, for example
//! `instance="tm1srv01" process="Bedrock.Server.Wait" pWaitSec=2`.

use super::lexer;
use crate::domain::{Parameters, ParseError, Task};

const INSTANCE_KEY: &str = "instance";
const PROCESS_KEY: &str = "process";

/// Parse one line into a [`Task`].
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<Task>, ParseError> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let mut instance = None;
    let mut process = None;
    let mut parameters = Parameters::new();

    for word in lexer::split(line)? {
        let Some((key, value)) = word.split_once('=') else {
            return Err(ParseError::MissingEquals(word));
        };
        if key.is_empty() {
            return Err(ParseError::EmptyKey(word));
        }
        let value = clean_value(value);

        if key.eq_ignore_ascii_case(INSTANCE_KEY) {
            instance = Some(value);
        } else if key.eq_ignore_ascii_case(PROCESS_KEY) {
            process = Some(value);
        } else {
            // parameter names are case-sensitive on the remote side
            parameters.insert(key.to_string(), value);
        }
    }

    let instance = instance.ok_or(ParseError::MissingKey(INSTANCE_KEY))?;
    let process = process.ok_or(ParseError::MissingKey(PROCESS_KEY))?;
    Ok(Some(Task::new(instance, process, parameters, line.trim_end())))
}

/// Strip stray double quotes, then whitespace.
fn clean_value(value: &str) -> String {
    value.trim_matches('"').trim().to_string()
}
