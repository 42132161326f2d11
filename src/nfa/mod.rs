mod compile;
mod nfa;
mod simulate;
mod state;
mod transition;

pub use nfa::{Nfa, StateId};
pub use state::State;
pub use transition::{Predicate, Transition};

pub(crate) use compile::compile;
pub(crate) use simulate::CaptureSpans;
