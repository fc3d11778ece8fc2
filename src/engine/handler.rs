//! Handlers: what an action does once its pattern has matched.
//!
//! A handler receives the running instance's state, the match and the current
//! line, and returns an [`Output`]: a finite, single-pass sequence of lines.
//! Output is produced on demand, so a handler that repeats a line `n` times
//! does not build `n` strings until they are pulled.
//!
//! Handlers never see a line during the Begin/End phases. `Print`-like
//! handlers produce nothing there; use `Emit` for fixed header/footer lines.

use crate::engine::program::RunState;
use crate::rules::spec::{ChangeLogEntry, bump_release_line, changelog_lines};
use crate::{MatchResult, Range};
use chrono::NaiveDate;

/// Signature for user-supplied handlers.
pub type HandlerFn = fn(&RunState, &MatchResult, Option<&str>) -> Vec<String>;

#[derive(Debug, Clone)]
pub enum Handler {
    /// Yield the line unchanged.
    Print,
    /// Yield the line twice.
    Double,
    /// Count invocations; on the n-th call yield `"0: line"` .. `"n-1: line"`.
    Increment { count: usize },
    /// Replace the text captured as `value` with a new value.
    ReplaceValue(String),
    /// Dispatch on the side of an [`crate::Either`] match, unwrapping it.
    EitherOr { left: Box<Handler>, right: Box<Handler> },
    /// Yield fixed lines regardless of input.
    Emit(Vec<String>),
    Func(HandlerFn),
    /// Rewrite the captured `release` field to its bumped value.
    BumpRelease { rightmost: bool },
    /// Yield the `%changelog` marker followed by a new entry.
    ChangeLog { entry: ChangeLogEntry, date: NaiveDate },
}

impl Handler {
    pub fn increment() -> Handler {
        Handler::Increment { count: 0 }
    }

    pub fn replace_value(value: impl Into<String>) -> Handler {
        Handler::ReplaceValue(value.into())
    }

    pub fn either_or(left: Handler, right: Handler) -> Handler {
        Handler::EitherOr { left: Box::new(left), right: Box::new(right) }
    }

    /// Print lines that did not match, hand matches to `handler`.
    pub fn match_or_print(handler: Handler) -> Handler {
        Handler::either_or(Handler::Print, handler)
    }

    pub fn invoke(&mut self, state: &RunState, m: MatchResult, line: Option<&str>) -> Output {
        match self {
            Handler::Print => line.map(Output::once).unwrap_or_default(),
            Handler::Double => line.map(|l| Output::repeat(l, 2)).unwrap_or_default(),
            Handler::Increment { count } => {
                *count += 1;
                line.map(|l| Output::numbered(l, *count)).unwrap_or_default()
            }
            Handler::ReplaceValue(value) => {
                let Some(line) = line else {
                    return Output::empty();
                };
                match m.captures().and_then(|caps| caps.name_span("value")) {
                    Some(span) => Output::once(&splice(line, span, value)),
                    None => {
                        tracing::warn!(line, "replace handler got a match without a `value` group");
                        Output::once(line)
                    }
                }
            }
            Handler::EitherOr { left, right } => match m {
                MatchResult::Either(either) if either.is_left() => left.invoke(state, *either.value, line),
                MatchResult::Either(either) => right.invoke(state, *either.value, line),
                other => right.invoke(state, other, line),
            },
            Handler::Emit(lines) => Output::lines(lines.clone()),
            Handler::Func(f) => Output::lines(f(state, &m, line)),
            Handler::BumpRelease { rightmost } => {
                line.map(|l| Output::once(&bump_release_line(&m, l, *rightmost))).unwrap_or_default()
            }
            Handler::ChangeLog { entry, date } => {
                line.map(|l| Output::lines(changelog_lines(entry, *date, l))).unwrap_or_default()
            }
        }
    }
}

/// Replace `span` of `line` with `with`.
pub(crate) fn splice(line: &str, span: Range, with: &str) -> String {
    let mut out = String::with_capacity(line.len() + with.len());
    out.push_str(&line[..span.start]);
    out.push_str(with);
    out.push_str(&line[span.end..]);
    out
}

// --- Output ------------------------------------------------------------------

/// Lazily produced lines from one handler invocation.
#[derive(Debug, Default)]
pub struct Output(OutputKind);

#[derive(Debug, Default)]
enum OutputKind {
    #[default]
    Empty,
    Lines(std::vec::IntoIter<String>),
    Repeat {
        line: String,
        remaining: usize,
    },
    Numbered {
        line: String,
        next: usize,
        end: usize,
    },
}

impl Output {
    pub fn empty() -> Self {
        Output(OutputKind::Empty)
    }

    pub fn once(line: &str) -> Self {
        Output::repeat(line, 1)
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Output(OutputKind::Lines(lines.into_iter()))
    }

    fn repeat(line: &str, times: usize) -> Self {
        Output(OutputKind::Repeat { line: line.to_string(), remaining: times })
    }

    fn numbered(line: &str, end: usize) -> Self {
        Output(OutputKind::Numbered { line: line.to_string(), next: 0, end })
    }
}

impl Iterator for Output {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match &mut self.0 {
            OutputKind::Empty => None,
            OutputKind::Lines(lines) => lines.next(),
            OutputKind::Repeat { line, remaining } => {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
                Some(line.clone())
            }
            OutputKind::Numbered { line, next, end } => {
                if *next >= *end {
                    return None;
                }
                let out = format!("{}: {}", next, line);
                *next += 1;
                Some(out)
            }
        }
    }
}
