//! BFS/set-based simulation: epsilon-closure, per-character stepping, and
//! capture-span tracking. Grounded on the teacher's `Step`/`add_state`/
//! `step` trio in `nfa.rs`, generalized from "one matched group id" to a
//! full capture-span map per live path, and changed to mark every state
//! (not just terminal ones) visited on first touch — the standard
//! Pike/Cox `addstate` dedup (the construction this module's own doc
//! comment in `nfa.rs` cites) that keeps one epsilon-closure at O(states).

use super::nfa::Nfa;
use super::state::State;
use super::transition::Transition;

/// `spans[g] == Some((start, None))` once `GroupEnter(g)` has fired but
/// `GroupExit(g)` has not yet closed it; `Some((start, Some(end)))` once
/// closed; `None` if never entered on this path.
pub(crate) type CaptureSpans = Vec<Option<(usize, Option<usize>)>>;

fn empty_spans(group_count: u32) -> CaptureSpans {
    vec![None; group_count as usize]
}

struct StepCounter {
    visited: Vec<usize>,
    step: usize,
}

impl StepCounter {
    fn new(num_states: usize) -> Self {
        Self {
            visited: vec![0; num_states],
            step: 0,
        }
    }

    fn begin_step(&mut self) {
        self.step += 1;
    }

    fn is_visited(&self, s: State) -> bool {
        self.visited[s.0] == self.step
    }

    fn mark_visited(&mut self, s: State) {
        self.visited[s.0] = self.step;
    }
}

pub(crate) struct FoundMatch {
    pub start: usize,
    pub end: usize,
    pub captures: CaptureSpans,
}

impl Nfa {
    /// Follow epsilon/group-tag transitions from `state`, pushing every
    /// live symbol state onto `list` and recording captures for the accept
    /// state into `accept` the first time it is reached this step (earlier
    /// paths, i.e. earlier alternatives, win — giving deterministic,
    /// leftmost-first-consistent capture tie-breaks).
    #[allow(clippy::too_many_arguments)]
    fn add_state(
        &self,
        step: &mut StepCounter,
        pos: usize,
        list: &mut Vec<(State, CaptureSpans)>,
        accept: &mut Option<CaptureSpans>,
        state: State,
        caps: CaptureSpans,
    ) {
        if step.is_visited(state) {
            return;
        }
        step.mark_visited(state);

        match &self.transitions[state.0] {
            Transition::Split(e1, e2) => {
                if let Some(e1) = e1 {
                    self.add_state(step, pos, list, accept, *e1, caps.clone());
                }
                if let Some(e2) = e2 {
                    self.add_state(step, pos, list, accept, *e2, caps);
                }
            }
            Transition::GroupEnter(id, target) => {
                let mut caps = caps;
                caps[*id as usize] = Some((pos, None));
                self.add_state(step, pos, list, accept, *target, caps);
            }
            Transition::GroupExit(id, target) => {
                let mut caps = caps;
                if let Some((start, _)) = caps[*id as usize] {
                    caps[*id as usize] = Some((start, Some(pos)));
                }
                self.add_state(step, pos, list, accept, *target, caps);
            }
            Transition::Symbol(..) => {
                list.push((state, caps));
            }
            Transition::Accept => {
                if accept.is_none() {
                    *accept = Some(caps);
                }
            }
        }
    }

    /// Attempt a match starting at each candidate position from `from`
    /// onward, returning the first start that accepts and, for that start,
    /// the greedy-longest end position (§4.4).
    pub(crate) fn find_from(
        &self,
        chars: &[char],
        from: usize,
        max_steps: Option<usize>,
    ) -> Option<FoundMatch> {
        let mut budget = max_steps;
        let mut step = StepCounter::new(self.transitions.len());

        for start in from..=chars.len() {
            step.begin_step();
            let mut current = Vec::new();
            let mut accept = None;
            self.add_state(
                &mut step,
                start,
                &mut current,
                &mut accept,
                self.start,
                empty_spans(self.group_count),
            );

            let mut best = accept.map(|caps| (start, caps));
            let mut pos = start;

            while !current.is_empty() && pos < chars.len() {
                if let Some(remaining) = budget.as_mut() {
                    if *remaining == 0 {
                        break;
                    }
                    *remaining -= 1;
                }

                let c = chars[pos];
                pos += 1;
                step.begin_step();

                let mut next = Vec::new();
                let mut next_accept = None;
                for (state, caps) in &current {
                    if let Transition::Symbol(pred, target) = &self.transitions[state.0] {
                        if pred.accepts(c) {
                            self.add_state(&mut step, pos, &mut next, &mut next_accept, *target, caps.clone());
                        }
                    }
                }

                current = next;
                if let Some(caps) = next_accept {
                    best = Some((pos, caps));
                }
            }

            if let Some((end, captures)) = best {
                return Some(FoundMatch { start, end, captures });
            }

            if matches!(budget, Some(0)) {
                break;
            }
        }

        None
    }
}
