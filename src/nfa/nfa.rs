use std::collections::HashMap;

use super::state::State;
use super::transition::{Predicate, Transition};
use crate::table::Table;

impl<T> std::ops::Index<State> for Vec<T> {
    type Output = T;

    fn index(&self, index: State) -> &Self::Output {
        &self[index.0]
    }
}

impl<T> std::ops::IndexMut<State> for Vec<T> {
    fn index_mut(&mut self, index: State) -> &mut Self::Output {
        &mut self[index.0]
    }
}

/// An immutable, flat epsilon-NFA. States are indices into `transitions`;
/// there are no owning pointers, so the Kleene back-edges this automaton
/// needs are just integers, cheaply `Copy`.
#[derive(Debug)]
pub struct Nfa {
    pub transitions: Vec<Transition>,
    pub start: State,
    /// Single accepting state (Thompson construction guarantees exactly one).
    pub accept: State,
    pub group_count: u32,
    pub group_names: HashMap<u32, String>,
}

impl std::ops::Index<State> for Nfa {
    type Output = Transition;

    fn index(&self, index: State) -> &Self::Output {
        &self.transitions[index]
    }
}

impl std::ops::IndexMut<State> for Nfa {
    fn index_mut(&mut self, index: State) -> &mut Self::Output {
        &mut self.transitions[index]
    }
}

/// An NFA fragment mid-construction: one entry state and a list of
/// dangling out-edges ("out hooks") still needing a target.
#[derive(Debug)]
pub(crate) struct Frag {
    pub start: State,
    pub out: Vec<State>,
}

impl Nfa {
    pub(crate) fn empty_shell(group_count: u32, group_names: HashMap<u32, String>) -> Self {
        Self {
            transitions: Vec::new(),
            start: State(0),
            accept: State(0),
            group_count,
            group_names,
        }
    }

    #[must_use]
    pub(crate) fn new_symbol_state(&mut self, predicate: Predicate) -> State {
        let state = State(self.transitions.len());
        self.transitions.push(Transition::Symbol(predicate, state));
        state
    }

    #[must_use]
    pub(crate) fn new_split_state(&mut self, e1: Option<State>, e2: Option<State>) -> State {
        self.transitions.push(Transition::Split(e1, e2));
        State(self.transitions.len() - 1)
    }

    #[must_use]
    pub(crate) fn new_group_enter_state(&mut self, id: u32, target: State) -> State {
        self.transitions.push(Transition::GroupEnter(id, target));
        State(self.transitions.len() - 1)
    }

    /// Target is unknown yet; it is an out hook to be patched.
    #[must_use]
    pub(crate) fn new_group_exit_state(&mut self, id: u32) -> State {
        let state = State(self.transitions.len());
        self.transitions.push(Transition::GroupExit(id, state));
        state
    }

    #[must_use]
    pub(crate) fn new_accept_state(&mut self) -> State {
        self.transitions.push(Transition::Accept);
        State(self.transitions.len() - 1)
    }

    /// Resolve every out hook in `frag` to point at `to`.
    pub(crate) fn patch(&mut self, frag: &Frag, to: State) {
        for &out in &frag.out {
            match &mut self[out] {
                Transition::Symbol(_, target) => *target = to,
                Transition::GroupExit(_, target) => *target = to,
                Transition::Split(e1, e2) => {
                    if e1.is_none() {
                        *e1 = Some(to);
                    } else {
                        *e2 = Some(to);
                    }
                }
                Transition::GroupEnter(..) | Transition::Accept => {
                    unreachable!("group-enter/accept states are never out hooks")
                }
            }
        }
    }
}

/// State ids exposed to callers (visualizer, CLI) without exposing the
/// internal `Transition` representation.
pub type StateId = usize;

impl Nfa {
    #[must_use]
    pub fn state_ids(&self) -> Vec<StateId> {
        (0..self.transitions.len()).collect()
    }

    /// Transitions out of `s`, with an informational label for each edge.
    /// Labels are not part of any contract tests should rely on.
    #[must_use]
    pub fn transitions_of(&self, s: StateId) -> Vec<(String, StateId)> {
        match &self.transitions[s] {
            Transition::Symbol(pred, target) => vec![(pred.to_string(), target.0)],
            Transition::Split(e1, e2) => {
                let mut out = Vec::new();
                if let Some(e1) = e1 {
                    out.push(("\u{3b5}".to_string(), e1.0));
                }
                if let Some(e2) = e2 {
                    out.push(("\u{3b5}".to_string(), e2.0));
                }
                out
            }
            Transition::GroupEnter(g, target) => vec![(format!("\u{3b5}[enter g={g}]"), target.0)],
            Transition::GroupExit(g, target) => vec![(format!("\u{3b5}[exit g={g}]"), target.0)],
            Transition::Accept => vec![],
        }
    }
}

impl std::fmt::Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers = ["Type", "State", "Label", "e1", "e2"].map(String::from);

        let mut data = vec![];

        for (state, transition) in self.transitions.iter().enumerate() {
            let mut ty = if State(state) == self.start {
                "Start:"
            } else if State(state) == self.accept {
                "Accept:"
            } else {
                ""
            }
            .to_string();

            let mut lab = String::new();
            let mut edge1 = String::new();
            let mut edge2 = String::new();

            match transition {
                Transition::Symbol(predicate, e) => {
                    lab = predicate.to_string();
                    edge1 = e.to_string();
                }
                Transition::Split(e1, e2) => {
                    edge1 = e1.map(|e| e.to_string()).unwrap_or_default();
                    edge2 = e2.map(|e| e.to_string()).unwrap_or_default();
                }
                Transition::GroupEnter(g, e) => {
                    ty = "Enter:".to_string();
                    lab = g.to_string();
                    edge1 = e.to_string();
                }
                Transition::GroupExit(g, e) => {
                    ty = "Exit:".to_string();
                    lab = g.to_string();
                    edge1 = e.to_string();
                }
                Transition::Accept => {
                    // Covered in `ty` above.
                }
            }

            data.push([ty, state.to_string(), lab, edge1, edge2]);
        }

        let table = Table::<5>::new(headers, data);
        table.fmt(f)
    }
}
