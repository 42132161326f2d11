//! The public façade: `compile`, `test`, `find`, `find_all`, `captures`,
//! `captures_all`, plus the NFA-introspection accessors the visualizer
//! consumes.

use crate::error::CompileError;
use crate::graph_display::DiGraph;
use crate::nfa::{self, CaptureSpans, Nfa, StateId};
use crate::parse;

/// A half-open span of codepoint offsets into the input that was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

/// One capture group's span within a single match. Group 0 is always the
/// whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub group: u32,
    pub name: Option<String>,
    pub start: usize,
    pub end: usize,
}

/// A compiled pattern. Immutable after `compile`, so a single `Engine` can
/// be shared across threads for concurrent read-only evaluation.
#[derive(Debug)]
pub struct Engine {
    nfa: Nfa,
    max_steps: Option<usize>,
}

impl Engine {
    /// Compile `pattern` into an executable automaton, or describe why it
    /// could not be compiled. Never returns a partial engine.
    pub fn compile(pattern: &str) -> Result<Self, CompileError> {
        let parsed = parse::parse(pattern)?;
        let nfa = nfa::compile(parsed)?;
        Ok(Self { nfa, max_steps: None })
    }

    /// Impose an optional ceiling on per-character simulation steps, to
    /// bound pathological patterns against large inputs (§4.4, §9 open
    /// question #2). Disabled (`None`) by default, matching unbounded
    /// source behavior.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    #[must_use]
    pub fn test(&self, input: &str) -> bool {
        self.find(input).is_some()
    }

    #[must_use]
    pub fn find(&self, input: &str) -> Option<Match> {
        let chars: Vec<char> = input.chars().collect();
        self.find_from(&chars, 0).map(|(m, _)| m)
    }

    #[must_use]
    pub fn find_all(&self, input: &str) -> Vec<Match> {
        let chars: Vec<char> = input.chars().collect();
        let mut results = Vec::new();
        let mut from = 0;
        while let Some((m, _)) = self.find_from(&chars, from) {
            from = if m.end > m.start { m.end } else { m.start + 1 };
            results.push(m);
            if from > chars.len() {
                break;
            }
        }
        results
    }

    #[must_use]
    pub fn captures(&self, input: &str) -> Option<Vec<Capture>> {
        let chars: Vec<char> = input.chars().collect();
        self.find_from(&chars, 0)
            .map(|(_, caps)| self.materialize_captures(&caps))
    }

    #[must_use]
    pub fn captures_all(&self, input: &str) -> Vec<Vec<Capture>> {
        let chars: Vec<char> = input.chars().collect();
        let mut results = Vec::new();
        let mut from = 0;
        while let Some((m, caps)) = self.find_from(&chars, from) {
            from = if m.end > m.start { m.end } else { m.start + 1 };
            results.push(self.materialize_captures(&caps));
            if from > chars.len() {
                break;
            }
        }
        results
    }

    fn find_from(&self, chars: &[char], from: usize) -> Option<(Match, CaptureSpans)> {
        let found = self.nfa.find_from(chars, from, self.max_steps)?;
        Some((
            Match {
                start: found.start,
                end: found.end,
            },
            found.captures,
        ))
    }

    fn materialize_captures(&self, caps: &CaptureSpans) -> Vec<Capture> {
        caps.iter()
            .enumerate()
            .filter_map(|(id, span)| {
                let (start, end) = (*span)?;
                let end = end?;
                let id = id as u32;
                Some(Capture {
                    group: id,
                    name: self.nfa.group_names.get(&id).cloned(),
                    start,
                    end,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn states(&self) -> Vec<StateId> {
        self.nfa.state_ids()
    }

    #[must_use]
    pub fn transitions(&self, s: StateId) -> Vec<(String, StateId)> {
        self.nfa.transitions_of(s)
    }

    /// Render the compiled automaton as an SVG graph (§4.6).
    #[must_use]
    pub fn to_svg(&self) -> String {
        let graph: DiGraph = (&self.nfa).into();
        graph.to_string()
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.nfa.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> Engine {
        Engine::compile(pattern).unwrap_or_else(|e| panic!("compile({pattern:?}) failed: {e}"))
    }

    #[test]
    fn scenario_alternation_and_star() {
        let engine = compile("hello (w|w)orld!*");
        assert!(engine.test("hello world!!!"));
        let m = engine.find("hello world!!!").unwrap();
        assert_eq!((m.start, m.end), (0, 14));
        let caps = engine.captures("hello world!!!").unwrap();
        let g1 = caps.iter().find(|c| c.group == 1).unwrap();
        assert_eq!((g1.start, g1.end), (6, 7));
    }

    #[test]
    fn scenario_named_groups() {
        let engine = compile(r"(?<day>\d{2})-(?<month>\d{2})-(?<year>\d{4})");
        let caps = engine.captures("07-01-2024").unwrap();
        let whole = caps.iter().find(|c| c.group == 0).unwrap();
        assert_eq!((whole.start, whole.end), (0, 10));
        let by_name = |name: &str| caps.iter().find(|c| c.name.as_deref() == Some(name)).unwrap();
        assert_eq!((by_name("day").start, by_name("day").end), (0, 2));
        assert_eq!((by_name("month").start, by_name("month").end), (3, 5));
        assert_eq!((by_name("year").start, by_name("year").end), (6, 10));
    }

    #[test]
    fn scenario_nested_alternation_find_all() {
        let engine = compile("(T|t)h(e|(e|o)se)");
        let matches: Vec<(usize, usize)> = engine
            .find_all("the These those The")
            .into_iter()
            .map(|m| (m.start, m.end))
            .collect();
        assert_eq!(matches, vec![(0, 3), (4, 9), (10, 15), (16, 19)]);
    }

    #[test]
    fn scenario_greedy_longest_bounded_repetition() {
        let engine = compile("a{2,4}");
        let m = engine.find("aaaaa").unwrap();
        assert_eq!((m.start, m.end), (0, 4));
    }

    #[test]
    fn scenario_zero_width_matches_advance_by_one() {
        let engine = compile("a*");
        let matches: Vec<(usize, usize)> = engine
            .find_all("bbb")
            .into_iter()
            .map(|m| (m.start, m.end))
            .collect();
        assert_eq!(matches, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn scenario_negated_class_plus() {
        let engine = compile("[^abc]+");
        let matches: Vec<(usize, usize)> = engine
            .find_all("xxabcyy")
            .into_iter()
            .map(|m| (m.start, m.end))
            .collect();
        assert_eq!(matches, vec![(0, 2), (5, 7)]);
    }

    #[test]
    fn unterminated_class_fails_to_compile() {
        assert!(Engine::compile("[").is_err());
    }

    #[test]
    fn unterminated_group_fails_to_compile() {
        assert!(Engine::compile("(foo").is_err());
    }

    #[test]
    fn bad_quantifier_bounds_fail_to_compile() {
        assert!(matches!(
            Engine::compile("a{3,2}"),
            Err(CompileError::BadQuantifier { pos: 1 })
        ));
    }

    #[test]
    fn trailing_backslash_fails_to_compile() {
        assert!(matches!(
            Engine::compile("\\"),
            Err(CompileError::TrailingBackslash { pos: 0 })
        ));
    }

    #[test]
    fn duplicate_group_name_fails_to_compile() {
        assert!(matches!(
            Engine::compile("(?<x>a)(?<x>b)"),
            Err(CompileError::DuplicateGroupName { .. })
        ));
    }

    #[test]
    fn unmatched_close_paren_fails_to_compile() {
        assert!(Engine::compile(")").is_err());
    }

    #[test]
    fn test_find_and_captures_agree() {
        let engine = compile(r"\w+@\w+");
        for input in ["foo@bar", "no match here", ""] {
            assert_eq!(engine.test(input), engine.find(input).is_some());
            assert_eq!(engine.find(input).is_some(), engine.captures(input).is_some());
        }
    }

    #[test]
    fn find_all_bounds_are_strictly_advancing() {
        let engine = compile("a|aa");
        let matches = engine.find_all("aaaa");
        for pair in matches.windows(2) {
            let expected_min = std::cmp::max(pair[0].end, pair[0].start + 1);
            assert!(pair[1].start >= expected_min);
        }
    }

    #[test]
    fn non_capturing_group_is_not_reported() {
        let engine = compile("(?:abc)(def)");
        let caps = engine.captures("abcdef").unwrap();
        assert_eq!(caps.len(), 2); // group 0 (whole match) and group 1 ("def")
        assert!(caps.iter().any(|c| c.group == 1 && c.start == 3 && c.end == 6));
    }

    #[test]
    fn bug_compatible_non_capturing_syntax() {
        let engine = compile("(:?abc)");
        assert!(engine.test("abc"));
        let caps = engine.captures("abc").unwrap();
        assert_eq!(caps.len(), 1); // only group 0; `(:?...)` does not capture
    }

    #[test]
    fn max_steps_can_abort_a_runaway_search() {
        let engine = compile("a*a*a*b").with_max_steps(Some(1));
        assert!(engine.find(&"a".repeat(50)).is_none());
    }
}
