//! Token-sequence execution.

use crate::automaton::Dfa;
use crate::config::Validation;
use crate::error::DfaError;
use crate::state::State;
use serde::{Deserialize, Serialize};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// An accepting state was reached.
    Accepted,
    /// A token had no transition from the current state.
    Rejected,
    /// Tokens ran out on a non-accepting state.
    Exhausted,
}

/// Result of running a token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// States visited, recorded before each token is processed.
    pub path: Vec<String>,
    pub outcome: Outcome,
    /// State the run stopped in.
    pub final_state: String,
    /// Number of tokens consumed, including a token that was rejected.
    pub consumed: usize,
    /// Whether the outcome counts as a success under the automaton's
    /// configuration.
    pub success: bool,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }
}

impl Dfa {
    /// Runs `tokens` from the start state.
    ///
    /// Each token first records the current state in the path. An accepting
    /// current state ends the run without consuming the token; a missing
    /// transition ends it with [`Outcome::Rejected`]. When the tokens run out
    /// the run is accepted if it stands on an accepting state and exhausted
    /// otherwise.
    pub fn run<I, S>(&self, tokens: I) -> Result<RunResult, DfaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self.start_state()?;
        if self.config().validation == Validation::Eager {
            self.validate()?;
        }

        let mut path = Vec::new();
        let mut consumed = 0;

        for token in tokens {
            let token = token.as_ref();
            path.push(current.name().to_string());

            if current.is_accepting() {
                return Ok(self.finish(path, Outcome::Accepted, current, consumed));
            }

            consumed += 1;
            let Some(to) = current.transition_via(token) else {
                return Ok(self.finish(path, Outcome::Rejected, current, consumed));
            };

            current = self
                .states
                .get(to)
                .ok_or_else(|| DfaError::DanglingTransition {
                    from: current.name().to_string(),
                    symbol: token.to_string(),
                    to: to.to_string(),
                })?;
        }

        let outcome = if current.is_accepting() {
            Outcome::Accepted
        } else {
            Outcome::Exhausted
        };
        Ok(self.finish(path, outcome, current, consumed))
    }

    fn finish(
        &self,
        path: Vec<String>,
        outcome: Outcome,
        last: &State,
        consumed: usize,
    ) -> RunResult {
        let success = match outcome {
            Outcome::Accepted => true,
            Outcome::Rejected => false,
            Outcome::Exhausted => self.config().exhausted_is_success,
        };

        tracing::debug!(
            automaton = self.name(),
            outcome = ?outcome,
            final_state = last.name(),
            consumed,
            "run finished"
        );

        RunResult {
            path,
            outcome,
            final_state: last.name().to_string(),
            consumed,
            success,
        }
    }
}
