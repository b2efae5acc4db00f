use std::time::Instant;

use tracing::{error, info, warn};

use crate::{dispatcher::Reply, DbError, Result};

/// Result of an operation that needed the user's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The user agreed and the operation ran.
    Committed(T),
    /// The user declined; nothing was changed.
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn committed(self) -> Option<T> {
        match self {
            Outcome::Committed(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }
}

/// Something that can ask the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub fn confirmation_prompt(action: &str) -> String {
    format!("Are you sure you want to perform \"{action}\"? [y/n]: ")
}

/// Only `y` (either case) counts as a yes.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Runs `op` only when `confirmed` holds.
pub fn gate<T>(confirmed: bool, op: impl FnOnce() -> Result<T>) -> Result<Outcome<T>> {
    if !confirmed {
        return Ok(Outcome::Cancelled);
    }
    op().map(Outcome::Committed)
}

/// Runs `f` and logs how long it took.
pub fn timed<T>(operation: &str, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let result = f();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    info!(operation, elapsed_ms, "operation finished");
    result
}

/// Turns a failed command into a printable reply.
pub fn contain(command: &str, result: Result<Reply>) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(e) => {
            match &e {
                DbError::Unexpected(detail) => error!(command, %detail, "command failed"),
                other => warn!(command, error = %other, "command rejected"),
            }
            Reply::Message(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_declined_does_not_run() {
        let mut ran = false;
        let outcome = gate(false, || {
            ran = true;
            Ok(1)
        })
        .unwrap();

        assert!(outcome.is_cancelled());
        assert!(!ran);
    }

    #[test]
    fn test_gate_confirmed_runs_and_propagates() {
        assert_eq!(gate(true, || Ok(5)).unwrap(), Outcome::Committed(5));
        assert_eq!(gate::<()>(true, || Err(DbError::Cancelled)).unwrap_err(), DbError::Cancelled);
        assert_eq!(Outcome::Committed(5).committed(), Some(5));
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" Y \n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn test_closures_confirm() {
        let mut asked = vec![];
        let mut confirm = |prompt: &str| {
            asked.push(prompt.to_string());
            true
        };
        assert!(confirm.confirm(&confirmation_prompt("drop table")));
        assert_eq!(asked, vec!["Are you sure you want to perform \"drop table\"? [y/n]: "]);
    }

    #[test]
    fn test_contain_turns_errors_into_messages() {
        let reply = contain("info ghost", Err(DbError::NotFound("ghost".into())));
        assert_eq!(reply, Reply::Message("Error: table \"ghost\" does not exist.".into()));

        let reply = contain("list_tables", Err(DbError::Unexpected("disk full".into())));
        assert_eq!(reply, Reply::Message("Unexpected error: disk full".into()));
    }

    #[test]
    fn test_timed_returns_value() {
        assert_eq!(timed("noop", || 7), 7);
    }
}
