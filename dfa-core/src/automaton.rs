//! The automaton - state storage, mutation and single-step transitions.

use crate::config::DfaConfig;
use crate::error::DfaError;
use crate::index::SymbolIndex;
use crate::state::State;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A deterministic finite automaton.
///
/// The automaton exclusively owns its states. Structural mutation goes through
/// `&mut self` and drops the cached [`SymbolIndex`]; queries go through
/// `&self` and rebuild the index on demand, so a fully built automaton can be
/// shared across threads for reading.
#[derive(Debug)]
pub struct Dfa {
    /// Diagnostic label.
    name: String,

    /// States indexed by name.
    pub(crate) states: HashMap<String, State>,

    /// Name of the designated start state.
    start: Option<String>,

    config: DfaConfig,

    /// Derived index, `None` while stale.
    pub(crate) index: RwLock<Option<Arc<SymbolIndex>>>,
}

impl Dfa {
    /// Creates an empty automaton with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, DfaConfig::default())
    }

    /// Creates an empty automaton with the given configuration.
    pub fn with_config(name: impl Into<String>, config: DfaConfig) -> Self {
        Self {
            name: name.into(),
            states: HashMap::new(),
            start: None,
            config,
            index: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &DfaConfig {
        &self.config
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Sets the start state. Existence is checked when a run begins.
    pub fn set_start(&mut self, name: impl Into<String>) {
        self.start = Some(name.into());
        self.invalidate();
    }

    /// Returns the start state name, if one was set.
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Registers a state, replacing any state with the same name.
    pub fn add_state(&mut self, state: State) {
        if let Some(previous) = self.states.insert(state.name().to_string(), state) {
            tracing::trace!(
                automaton = %self.name,
                state = previous.name(),
                "replaced existing state"
            );
        }
        self.invalidate();
    }

    /// Registers several states at once.
    pub fn add_states<I>(&mut self, states: I)
    where
        I: IntoIterator<Item = State>,
    {
        for state in states {
            self.add_state(state);
        }
    }

    /// Gets a state by name.
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// Gets a state for editing. The index is dropped since the caller may
    /// change its transitions.
    pub fn state_mut(&mut self, name: &str) -> Option<&mut State> {
        self.invalidate();
        self.states.get_mut(name)
    }

    /// Returns true if a state with this name is registered.
    pub fn state_exists(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Iterates over all registered states in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// Returns the number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn invalidate(&mut self) {
        self.index.get_mut().take();
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Performs one transition lookup.
    ///
    /// Returns `Ok(None)` when `state` has no transition on `symbol`.
    pub fn step(&self, state: &str, symbol: &str) -> Result<Option<&str>, DfaError> {
        let current = self
            .states
            .get(state)
            .ok_or_else(|| DfaError::UnknownState {
                state: state.to_string(),
            })?;

        let next = current.transition_via(symbol);
        tracing::trace!(state, symbol, next = ?next, "step");
        Ok(next)
    }

    /// Resolves the start state, failing if the automaton cannot run.
    pub(crate) fn start_state(&self) -> Result<&State, DfaError> {
        if self.states.is_empty() {
            return Err(DfaError::NoStates {
                automaton: self.name.clone(),
            });
        }

        let start = self.start.as_deref().ok_or_else(|| DfaError::StartNotSet {
            automaton: self.name.clone(),
        })?;

        self.states
            .get(start)
            .ok_or_else(|| DfaError::UnknownStart {
                start: start.to_string(),
            })
    }

    /// Checks that the automaton can run and that every transition target
    /// is a registered state.
    pub fn validate(&self) -> Result<(), DfaError> {
        self.start_state()?;

        let mut names: Vec<&String> = self.states.keys().collect();
        names.sort();

        for name in names {
            let state = &self.states[name];
            for symbol in state.symbols() {
                if let Some(to) = state.transition_via(symbol) {
                    if !self.states.contains_key(to) {
                        return Err(DfaError::DanglingTransition {
                            from: name.clone(),
                            symbol: symbol.to_string(),
                            to: to.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Clone for Dfa {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            states: self.states.clone(),
            start: self.start.clone(),
            config: self.config.clone(),
            index: RwLock::new(self.index.read().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_machine() -> Dfa {
        let mut dfa = Dfa::new("go");
        dfa.add_states([
            State::new("A").with_transition("go", "B"),
            State::new("B").with_transition("go", "C"),
            State::new("C").accepting(),
        ]);
        dfa.set_start("A");
        dfa
    }

    #[test]
    fn test_new_automaton() {
        let dfa = Dfa::new("empty");
        assert_eq!(dfa.name(), "empty");
        assert!(dfa.is_empty());
        assert_eq!(dfa.start(), None);
        assert!(!dfa.is_indexed());
    }

    #[test]
    fn test_state_lookup() {
        let dfa = go_machine();

        assert_eq!(dfa.len(), 3);
        assert_eq!(dfa.start(), Some("A"));
        assert!(dfa.state_exists("B"));
        assert!(!dfa.state_exists("Z"));
        assert!(dfa.state("C").unwrap().is_accepting());
        assert!(dfa.state("Z").is_none());
    }

    #[test]
    fn test_add_state_overwrites() {
        let mut dfa = go_machine();
        dfa.add_state(State::new("B").with_transition("back", "A"));

        assert_eq!(dfa.len(), 3);
        assert_eq!(dfa.step("B", "go").unwrap(), None);
        assert_eq!(dfa.step("B", "back").unwrap(), Some("A"));
    }

    #[test]
    fn test_step() {
        let dfa = go_machine();

        assert_eq!(dfa.step("A", "go").unwrap(), Some("B"));
        assert_eq!(dfa.step("A", "stop").unwrap(), None);

        let result = dfa.step("Z", "go");
        assert!(matches!(result, Err(DfaError::UnknownState { ref state }) if state == "Z"));
    }

    #[test]
    fn test_state_mut_edits_transitions() {
        let mut dfa = go_machine();
        dfa.state_mut("A").unwrap().add_transition("skip", "C");

        assert_eq!(dfa.step("A", "skip").unwrap(), Some("C"));
        assert!(dfa.state_mut("Z").is_none());
    }

    #[test]
    fn test_validate() {
        let dfa = go_machine();
        dfa.validate().unwrap();

        let empty = Dfa::new("empty");
        assert!(matches!(empty.validate(), Err(DfaError::NoStates { .. })));

        let mut no_start = Dfa::new("no-start");
        no_start.add_state(State::new("A"));
        assert!(matches!(
            no_start.validate(),
            Err(DfaError::StartNotSet { .. })
        ));

        let mut bad_start = go_machine();
        bad_start.set_start("Z");
        assert!(matches!(
            bad_start.validate(),
            Err(DfaError::UnknownStart { ref start }) if start == "Z"
        ));

        let mut dangling = go_machine();
        dangling.state_mut("C").unwrap().add_transition("again", "D");
        assert_eq!(
            dangling.validate(),
            Err(DfaError::DanglingTransition {
                from: "C".to_string(),
                symbol: "again".to_string(),
                to: "D".to_string(),
            })
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let dfa = go_machine();
        let mut copy = dfa.clone();
        copy.add_state(State::new("D"));

        assert_eq!(dfa.len(), 3);
        assert_eq!(copy.len(), 4);
    }

    #[test]
    fn test_shared_across_threads() {
        let dfa = Arc::new(go_machine());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let dfa = Arc::clone(&dfa);
                std::thread::spawn(move || dfa.inspect_edges_for_symbol("go").len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        assert!(dfa.is_indexed());
    }
}
