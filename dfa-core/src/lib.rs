//! # dfa-core
//!
//! Deterministic finite automaton engine.
//!
//! This crate provides:
//! - Named states with symbol-labeled transitions
//! - Automaton storage, mutation and single-step lookup
//! - Structural indexes answering which states and edges relate to symbols
//! - Token-sequence runs with an explicit outcome
//!
//! ```
//! use dfa_core::{Dfa, Outcome, State};
//!
//! let mut dfa = Dfa::new("go");
//! dfa.add_states([
//!     State::new("A").with_transition("go", "B"),
//!     State::new("B").with_transition("go", "C"),
//!     State::new("C").accepting(),
//! ]);
//! dfa.set_start("A");
//!
//! let result = dfa.run(["go", "go"]).unwrap();
//! assert_eq!(result.path, ["A", "B"]);
//! assert_eq!(result.outcome, Outcome::Accepted);
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod index;
pub mod run;
pub mod state;

pub use automaton::Dfa;
pub use config::{DfaConfig, Validation};
pub use error::{ConfigError, DfaError};
pub use index::{Edge, SymbolIndex};
pub use run::{Outcome, RunResult};
pub use state::State;
