use crate::ast::{Ast, GroupKind};
use crate::error::CompileError;
use crate::parse::ParsedPattern;

use super::nfa::{Frag, Nfa};
use super::state::State;
use super::transition::{Predicate, Transition};

/// Thompson-construct an epsilon-NFA from a parsed pattern. Mirrors the
/// teacher's `NFA::compile`: grow a flat transition vector and patch
/// dangling out-edges as fragments are composed, bottom-up over the AST.
///
/// State 0 is reserved for the entry (`GroupEnter(0)`) before the body is
/// compiled, and the accept state is always pushed last, so the resulting
/// automaton always satisfies "state 0 is the start, state N-1 is the
/// accept" without a separate start/accept accessor, the same way the
/// teacher's `NFA::new()` pre-reserves `Eof` at index 0.
pub fn compile(parsed: ParsedPattern) -> Result<Nfa, CompileError> {
    let ParsedPattern {
        ast,
        group_count,
        group_names,
    } = parsed;

    let mut nfa = Nfa::empty_shell(group_count, group_names);

    // Placeholder target, patched once `body.start` is known below.
    let enter0 = nfa.new_group_enter_state(0, State(0));
    let body = compile_ast(&ast, &mut nfa);
    nfa[enter0] = Transition::GroupEnter(0, body.start);

    // The whole pattern is conceptually wrapped in GroupEnter(0)..GroupExit(0).
    let exit0 = nfa.new_group_exit_state(0);
    nfa.patch(&body, exit0);
    let accept = nfa.new_accept_state();
    nfa.patch(
        &Frag {
            start: exit0,
            out: vec![exit0],
        },
        accept,
    );

    nfa.start = enter0;
    nfa.accept = accept;
    Ok(nfa)
}

fn compile_ast(ast: &Ast, nfa: &mut Nfa) -> Frag {
    match ast {
        Ast::Empty => empty_frag(nfa),
        Ast::Literal(c) => {
            let s = nfa.new_symbol_state(Predicate::Char(*c));
            Frag { start: s, out: vec![s] }
        }
        Ast::Any => {
            let s = nfa.new_symbol_state(Predicate::Any);
            Frag { start: s, out: vec![s] }
        }
        Ast::Class(class) => {
            let s = nfa.new_symbol_state(Predicate::Class(class.clone()));
            Frag { start: s, out: vec![s] }
        }
        Ast::Concat(a, b) => {
            let fa = compile_ast(a, nfa);
            let fb = compile_ast(b, nfa);
            concat(nfa, fa, fb)
        }
        Ast::Alternation(a, b) => {
            let fa = compile_ast(a, nfa);
            let fb = compile_ast(b, nfa);
            let s = nfa.new_split_state(Some(fa.start), Some(fb.start));
            let mut out = fa.out;
            out.extend(fb.out);
            Frag { start: s, out }
        }
        Ast::Repetition { inner, min, max } => compile_repetition(inner, *min, *max, nfa),
        Ast::Group { kind, inner } => {
            let inner_frag = compile_ast(inner, nfa);
            match kind {
                GroupKind::NonCapturing => inner_frag,
                GroupKind::Capturing { id, .. } => {
                    let exit = nfa.new_group_exit_state(*id);
                    nfa.patch(&inner_frag, exit);
                    let enter = nfa.new_group_enter_state(*id, inner_frag.start);
                    Frag {
                        start: enter,
                        out: vec![exit],
                    }
                }
            }
        }
    }
}

fn empty_frag(nfa: &mut Nfa) -> Frag {
    let s = nfa.new_split_state(None, None);
    Frag { start: s, out: vec![s] }
}

fn concat(nfa: &mut Nfa, a: Frag, b: Frag) -> Frag {
    nfa.patch(&a, b.start);
    Frag {
        start: a.start,
        out: b.out,
    }
}

/// Zero-or-more of `frag`, i.e. a Kleene star over an already-compiled
/// fragment: `q0 -> frag.start`, `q0 ->`, `frag.exit -> q0`.
fn kleene_star(nfa: &mut Nfa, frag: Frag) -> Frag {
    let s = nfa.new_split_state(Some(frag.start), None);
    nfa.patch(&frag, s);
    Frag { start: s, out: vec![s] }
}

/// Zero-or-one of `frag`.
fn optional(nfa: &mut Nfa, mut frag: Frag) -> Frag {
    let s = nfa.new_split_state(Some(frag.start), None);
    frag.out.push(s);
    frag.start = s;
    frag
}

/// Lower `{min,max}` per §4.2: `min` mandatory fresh copies, then either
/// nothing (`max == min`), an unbounded Kleene tail (`max == None`), or a
/// chain of optional copies (`max == Some(m) with m > min`).
///
/// Each copy is a fresh Thompson fragment, never shared, since capture
/// groups inside `inner` must fire independently for every traversal of
/// their lexical position.
fn compile_repetition(inner: &Ast, min: u32, max: Option<u32>, nfa: &mut Nfa) -> Frag {
    let mandatory = (0..min)
        .map(|_| compile_ast(inner, nfa))
        .reduce(|a, b| concat(nfa, a, b));

    let tail = match max {
        Some(m) if m == min => None,
        None => {
            let copy = compile_ast(inner, nfa);
            Some(kleene_star(nfa, copy))
        }
        Some(m) => {
            let extra = m - min;
            (0..extra)
                .map(|_| {
                    let copy = compile_ast(inner, nfa);
                    optional(nfa, copy)
                })
                .reduce(|a, b| concat(nfa, a, b))
        }
    };

    match (mandatory, tail) {
        (Some(m), Some(t)) => concat(nfa, m, t),
        (Some(m), None) => m,
        (None, Some(t)) => t,
        (None, None) => empty_frag(nfa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn compile_pattern(pattern: &str) -> Nfa {
        compile(parse::parse(pattern).unwrap()).unwrap()
    }

    #[test]
    fn literal_compiles_to_a_single_symbol_state_plus_wrapper() {
        let nfa = compile_pattern("a");
        // GroupEnter(0) at 0, Symbol('a'), GroupExit(0), Accept at N-1.
        assert_eq!(nfa.transitions.len(), 4);
    }

    #[test]
    fn start_state_is_always_zero_and_accept_is_always_last() {
        let nfa = compile_pattern("(a|b)*c{1,3}");
        assert_eq!(nfa.start, State(0));
        assert_eq!(nfa.accept.0, nfa.transitions.len() - 1);
        assert!(matches!(nfa.transitions[0], Transition::GroupEnter(0, _)));
    }

    #[test]
    fn every_out_hook_is_patched_to_a_real_state() {
        let nfa = compile_pattern("(a|b)*c");
        for transition in &nfa.transitions {
            match transition {
                Transition::Split(e1, e2) => {
                    assert!(e1.is_some() || e2.is_some(), "a Split should have at least one edge");
                }
                Transition::GroupExit(_, target) => {
                    assert!(target.0 < nfa.transitions.len());
                }
                _ => {}
            }
        }
    }

    #[test]
    fn single_accept_state_is_reachable() {
        let nfa = compile_pattern("(a|bb)+");
        assert!(matches!(nfa.transitions[nfa.accept.0], Transition::Accept));
    }
}
