use super::handler::{Handler, Output};
use super::pattern::Pattern;
use super::program::RunState;

/// A rule: when `pattern` matches a line, run `handler` on it.
#[derive(Debug, Clone)]
pub struct Action {
    pub pattern: Pattern,
    pub handler: Handler,
}

impl Default for Action {
    fn default() -> Self {
        Action::print()
    }
}

impl Action {
    pub fn new(pattern: Pattern, handler: Handler) -> Self {
        Action { pattern, handler }
    }

    /// Apply `handler` to matching lines and print every other line unchanged.
    pub fn or_print(pattern: Pattern, handler: Handler) -> Self {
        Action::new(Pattern::match_or_always(pattern), Handler::match_or_print(handler))
    }

    /// Combine two actions: `first` handles lines its pattern matches, `second`
    /// handles lines only its own pattern matches.
    pub fn either_or(first: Action, second: Action) -> Self {
        Action::new(
            Pattern::either_or(first.pattern, second.pattern),
            Handler::either_or(second.handler, first.handler),
        )
    }

    pub fn begin(handler: Handler) -> Self {
        Action::new(Pattern::Begin, handler)
    }

    pub fn end(handler: Handler) -> Self {
        Action::new(Pattern::End, handler)
    }

    pub fn print() -> Self {
        Action::new(Pattern::Always, Handler::Print)
    }

    pub fn double_print() -> Self {
        Action::new(Pattern::Always, Handler::Double)
    }

    pub fn increment_print() -> Self {
        Action::new(Pattern::Always, Handler::increment())
    }

    /// Evaluate the pattern and, on a match, invoke the handler.
    ///
    /// Returns `None` when the pattern did not match; the handler is not
    /// called in that case.
    pub fn apply(&mut self, state: &RunState, line: Option<&str>) -> Option<Output> {
        let m = self.pattern.matches(line);
        if !m.is_match() {
            return None;
        }
        Some(self.handler.invoke(state, m, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegexFlags;

    fn lit(source: &str) -> Pattern {
        Pattern::regex(source, RegexFlags::empty()).unwrap()
    }

    fn apply(action: &mut Action, line: &str) -> Option<Vec<String>> {
        action.apply(&RunState::default(), Some(line)).map(|out| out.collect())
    }

    #[test]
    fn non_matching_line_produces_nothing() {
        let mut action = Action::new(lit("bar"), Handler::Print);
        assert_eq!(apply(&mut action, "foo"), None);
        assert_eq!(apply(&mut action, "bar"), Some(vec!["bar".to_string()]));
    }

    #[test]
    fn or_print_passes_misses_through() {
        let mut action = Action::or_print(lit("bar"), Handler::Emit(vec!["quack!".to_string()]));
        assert_eq!(apply(&mut action, "bar"), Some(vec!["quack!".to_string()]));
        assert_eq!(apply(&mut action, "baz"), Some(vec!["baz".to_string()]));
    }

    #[test]
    fn either_or_routes_to_the_matching_action() {
        let mut action = Action::either_or(
            Action::new(lit("a"), Handler::Double),
            Action::new(lit("b"), Handler::increment()),
        );
        assert_eq!(apply(&mut action, "a"), Some(vec!["a".to_string(), "a".to_string()]));
        assert_eq!(apply(&mut action, "b"), Some(vec!["0: b".to_string()]));
        assert_eq!(apply(&mut action, "c"), Some(vec!["0: c".to_string(), "1: c".to_string()]));
    }

    #[test]
    fn either_or_with_both_sides_missing_goes_left() {
        let mut action =
            Action::new(Pattern::either_or(lit("a"), lit("b")), Handler::either_or(Handler::Print, Handler::Double));
        assert_eq!(apply(&mut action, "c"), Some(vec!["c".to_string()]));
        assert_eq!(apply(&mut action, "a"), Some(vec!["a".to_string(), "a".to_string()]));
    }
}
