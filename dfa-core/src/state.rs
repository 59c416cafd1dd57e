//! Automaton states.

use std::collections::HashMap;

/// A named node with symbol-labeled outgoing transitions.
///
/// Each symbol maps to exactly one destination state name, which is what
/// keeps the automaton deterministic. Destinations are stored by name and are
/// not checked against any automaton here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: String,

    /// Transitions indexed by symbol -> destination state name.
    transitions: HashMap<String, String>,

    accepting: bool,
}

impl State {
    /// Creates a non-accepting state with no transitions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: HashMap::new(),
            accepting: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a transition. An existing transition on the same symbol is
    /// replaced.
    pub fn add_transition(&mut self, symbol: impl Into<String>, to: impl Into<String>) {
        self.transitions.insert(symbol.into(), to.into());
    }

    /// Adds one transition per symbol, all leading to `to`.
    pub fn add_transitions<I, S>(&mut self, to: &str, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for symbol in symbols {
            self.add_transition(symbol, to);
        }
    }

    /// Builder form of [`State::add_transition`].
    pub fn with_transition(mut self, symbol: impl Into<String>, to: impl Into<String>) -> Self {
        self.add_transition(symbol, to);
        self
    }

    /// Builder form of `set_accepting(true)`.
    pub fn accepting(mut self) -> Self {
        self.accepting = true;
        self
    }

    /// Looks up the destination reached via `symbol`.
    pub fn transition_via(&self, symbol: &str) -> Option<&str> {
        self.transitions.get(symbol).map(String::as_str)
    }

    pub fn transitions(&self) -> &HashMap<String, String> {
        &self.transitions
    }

    /// Returns the symbols with an outgoing transition, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.transitions.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = State::new("A");
        assert_eq!(state.name(), "A");
        assert!(!state.is_accepting());
        assert!(state.transitions().is_empty());
    }

    #[test]
    fn test_transition_lookup() {
        let state = State::new("A").with_transition("go", "B");

        assert_eq!(state.transition_via("go"), Some("B"));
        assert_eq!(state.transition_via("stop"), None);
    }

    #[test]
    fn test_transition_overwrite() {
        let mut state = State::new("A");
        state.add_transition("go", "B");
        state.add_transition("go", "C");

        assert_eq!(state.transition_via("go"), Some("C"));
        assert_eq!(state.transitions().len(), 1);
    }

    #[test]
    fn test_bulk_transitions() {
        let mut state = State::new("digit");
        state.add_transitions("number", ["0", "1", "2"]);

        assert_eq!(state.symbols(), vec!["0", "1", "2"]);
        for symbol in ["0", "1", "2"] {
            assert_eq!(state.transition_via(symbol), Some("number"));
        }
    }

    #[test]
    fn test_accepting_flag() {
        let mut state = State::new("end");
        state.set_accepting(true);
        assert!(state.is_accepting());
        state.set_accepting(false);
        assert!(!state.is_accepting());

        assert!(State::new("end").accepting().is_accepting());
    }
}
