//! Structural indexes over the transition graph.
//!
//! Two lookups are derived from the states of an automaton:
//!
//! - state pairs: `(s1, s2)` -> every state `q` that is entered via an
//!   `s1`-transition and has an outgoing `s2`-transition.
//! - edges: `s` -> every `(from, to)` edge labeled `s`.
//!
//! The index is always rebuilt from scratch and cached on the [`Dfa`] until the
//! next structural mutation.

use crate::automaton::Dfa;
use crate::state::State;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// A transition edge between two states.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Derived symbol lookups for one version of the state graph.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// Intervening states indexed by (incoming symbol, outgoing symbol).
    state_pairs: HashMap<(String, String), BTreeSet<String>>,

    /// Edges indexed by symbol.
    edges: HashMap<String, BTreeSet<Edge>>,
}

impl SymbolIndex {
    /// Builds the index by visiting every transition of every state once.
    pub(crate) fn build(states: &HashMap<String, State>) -> Self {
        let mut index = Self::default();
        let mut dangling = 0usize;

        for (from, state) in states {
            for (symbol1, to) in state.transitions() {
                match states.get(to) {
                    Some(next) => {
                        for symbol2 in next.transitions().keys() {
                            index
                                .state_pairs
                                .entry((symbol1.clone(), symbol2.clone()))
                                .or_default()
                                .insert(to.clone());
                        }
                    }
                    None => {
                        dangling += 1;
                        tracing::warn!(
                            from = %from,
                            symbol = %symbol1,
                            to = %to,
                            "transition targets an unregistered state"
                        );
                    }
                }

                index
                    .edges
                    .entry(symbol1.clone())
                    .or_default()
                    .insert(Edge::new(from.as_str(), to.as_str()));
            }
        }

        tracing::debug!(
            states = states.len(),
            symbols = index.edges.len(),
            state_pairs = index.state_pairs.len(),
            dangling,
            "built symbol index"
        );

        index
    }

    pub fn states_between(&self, symbol1: &str, symbol2: &str) -> BTreeSet<String> {
        self.state_pairs
            .get(&(symbol1.to_string(), symbol2.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn edges_for_symbol(&self, symbol: &str) -> BTreeSet<Edge> {
        self.edges.get(symbol).cloned().unwrap_or_default()
    }

    pub fn symbols(&self) -> BTreeSet<String> {
        self.edges.keys().cloned().collect()
    }
}

impl Dfa {
    /// Rebuilds both indexes from the current state graph, discarding any
    /// cached version.
    pub fn build_index(&self) -> Arc<SymbolIndex> {
        let mut cached = self.index.write();
        let index = Arc::new(SymbolIndex::build(&self.states));
        *cached = Some(Arc::clone(&index));
        index
    }

    /// Returns the cached index, building it first if it is stale.
    pub fn index(&self) -> Arc<SymbolIndex> {
        if let Some(index) = self.index.read().as_ref() {
            return Arc::clone(index);
        }

        let mut cached = self.index.write();
        // Another reader may have built it while we waited for the lock.
        if let Some(index) = cached.as_ref() {
            return Arc::clone(index);
        }
        let index = Arc::new(SymbolIndex::build(&self.states));
        *cached = Some(Arc::clone(&index));
        index
    }

    /// Returns true if a current index is cached.
    pub fn is_indexed(&self) -> bool {
        self.index.read().is_some()
    }

    /// Returns the states that sit between an incoming `symbol1` transition
    /// and an outgoing `symbol2` transition.
    ///
    /// The pair is ordered: swapping the symbols generally gives a different
    /// answer.
    pub fn inspect_states_between(&self, symbol1: &str, symbol2: &str) -> BTreeSet<String> {
        self.index().states_between(symbol1, symbol2)
    }

    /// Returns every edge labeled `symbol`.
    pub fn inspect_edges_for_symbol(&self, symbol: &str) -> BTreeSet<Edge> {
        self.index().edges_for_symbol(symbol)
    }

    /// Returns the distinct symbols used as transition labels.
    pub fn list_symbols(&self) -> BTreeSet<String> {
        self.index().symbols()
    }
}
