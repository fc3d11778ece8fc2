//! The pattern algebra.
//!
//! A [`Pattern`] decides, one line at a time, whether a rule applies and what
//! it matched. Patterns form a closed tree: leaves (`Always`, `Never`, `Regex`,
//! `Predicate`) and combinators over boxed sub-patterns.
//!
//! ## Evaluation contract
//!
//! - Combinators short-circuit exactly like their boolean namesakes: `And`
//!   never evaluates its right side after a miss, `Or` never evaluates its
//!   right side after a hit, `OneOf` stops at the first hit.
//! - `And`/`Or`/`OneOf` return the deciding sub-result itself, so captures
//!   flow through to the handler.
//! - `Range` is the only stateful variant. Its "inside" flag survives between
//!   lines of one run and is only reset by taking a fresh copy of the pattern.
//!   A range whose end never matches stays open for the rest of the input.
//! - With no line (Begin/End phases) regexes and predicates do not match.

use crate::error::PatternError;
use crate::{Captures, Either, MatchResult};
use regex::{Regex, RegexBuilder};

bitflags::bitflags! {
    /// Compilation flags for [`Pattern::regex`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegexFlags: u8 {
        const CASE_INSENSITIVE    = 1 << 0;
        const DOT_MATCHES_NEWLINE = 1 << 1;
        const MULTI_LINE          = 1 << 2;
    }
}

#[derive(Debug, Clone)]
pub enum Pattern {
    /// Sentinel routing an action to the Begin phase. Matches like `Always`.
    Begin,
    /// Sentinel routing an action to the End phase. Matches like `Always`.
    End,
    Always,
    Never,
    /// Unanchored search; yields the capture groups on a hit.
    Regex(Regex),
    Predicate(fn(&str) -> bool),
    And(Box<Pattern>, Box<Pattern>),
    Or(Box<Pattern>, Box<Pattern>),
    Not(Box<Pattern>),
    /// Inclusive `start,end` range, as in `awk '/start/,/end/'`.
    Range {
        start: Box<Pattern>,
        end: Box<Pattern>,
        in_range: bool,
    },
    /// `cond ? then : otherwise`
    IfThen {
        cond: Box<Pattern>,
        then: Box<Pattern>,
        otherwise: Box<Pattern>,
    },
    OneOf(Vec<Pattern>),
    /// Right-tagged match of the first pattern, else left-tagged result of
    /// the second. Fires even when both miss.
    EitherOr(Box<Pattern>, Box<Pattern>),
    /// Right-tagged match of the inner pattern, else a left-tagged `true`.
    MatchOrAlways(Box<Pattern>),
}

impl Pattern {
    /// Compile `source` into a `Regex` pattern.
    pub fn regex(source: &str, flags: RegexFlags) -> Result<Pattern, PatternError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.contains(RegexFlags::CASE_INSENSITIVE))
            .dot_matches_new_line(flags.contains(RegexFlags::DOT_MATCHES_NEWLINE))
            .multi_line(flags.contains(RegexFlags::MULTI_LINE))
            .build()
            .map_err(|source_err| PatternError::Regex { pattern: source.to_string(), source: source_err })?;
        Ok(Pattern::Regex(regex))
    }

    pub fn and(first: Pattern, second: Pattern) -> Pattern {
        Pattern::And(Box::new(first), Box::new(second))
    }

    pub fn or(first: Pattern, second: Pattern) -> Pattern {
        Pattern::Or(Box::new(first), Box::new(second))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Pattern) -> Pattern {
        Pattern::Not(Box::new(inner))
    }

    pub fn range(start: Pattern, end: Pattern) -> Pattern {
        Pattern::Range { start: Box::new(start), end: Box::new(end), in_range: false }
    }

    pub fn if_then(cond: Pattern, then: Pattern, otherwise: Pattern) -> Pattern {
        Pattern::IfThen { cond: Box::new(cond), then: Box::new(then), otherwise: Box::new(otherwise) }
    }

    pub fn one_of(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
        Pattern::OneOf(patterns.into_iter().collect())
    }

    pub fn either_or(first: Pattern, second: Pattern) -> Pattern {
        Pattern::EitherOr(Box::new(first), Box::new(second))
    }

    pub fn match_or_always(inner: Pattern) -> Pattern {
        Pattern::MatchOrAlways(Box::new(inner))
    }

    pub fn is_begin(&self) -> bool {
        matches!(self, Pattern::Begin)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Pattern::End)
    }

    /// Whether a `Range` is currently open. Always false for other variants.
    pub fn in_range(&self) -> bool {
        matches!(self, Pattern::Range { in_range: true, .. })
    }

    /// Evaluate the pattern against `line` (`None` during Begin/End).
    pub fn matches(&mut self, line: Option<&str>) -> MatchResult {
        match self {
            Pattern::Begin | Pattern::End | Pattern::Always => MatchResult::MATCH,
            Pattern::Never => MatchResult::NO_MATCH,
            Pattern::Regex(re) => {
                let Some(line) = line else {
                    return MatchResult::NO_MATCH;
                };
                match re.captures(line) {
                    Some(caps) => MatchResult::Captures(Captures::from_regex(re, &caps, line)),
                    None => MatchResult::NO_MATCH,
                }
            }
            Pattern::Predicate(pred) => MatchResult::Bool(line.is_some_and(|l| pred(l))),
            Pattern::And(first, second) => {
                let m = first.matches(line);
                if !m.is_match() {
                    return m;
                }
                second.matches(line)
            }
            Pattern::Or(first, second) => {
                let m = first.matches(line);
                if m.is_match() {
                    return m;
                }
                second.matches(line)
            }
            Pattern::Not(inner) => MatchResult::Bool(!inner.matches(line).is_match()),
            Pattern::Range { start, end, in_range } => {
                if !*in_range {
                    let m = start.matches(line);
                    if m.is_match() {
                        *in_range = true;
                        return m;
                    }
                    MatchResult::NO_MATCH
                } else {
                    let m = end.matches(line);
                    if m.is_match() {
                        *in_range = false;
                        return m;
                    }
                    MatchResult::MATCH
                }
            }
            Pattern::IfThen { cond, then, otherwise } => {
                if cond.matches(line).is_match() {
                    then.matches(line)
                } else {
                    otherwise.matches(line)
                }
            }
            Pattern::OneOf(patterns) => {
                for pattern in patterns.iter_mut() {
                    let m = pattern.matches(line);
                    if m.is_match() {
                        return m;
                    }
                }
                MatchResult::NO_MATCH
            }
            Pattern::EitherOr(first, second) => {
                let m = first.matches(line);
                if m.is_match() {
                    MatchResult::Either(Either::right(m))
                } else {
                    MatchResult::Either(Either::left(second.matches(line)))
                }
            }
            Pattern::MatchOrAlways(inner) => {
                let m = inner.matches(line);
                if m.is_match() {
                    MatchResult::Either(Either::right(m))
                } else {
                    MatchResult::Either(Either::left(MatchResult::MATCH))
                }
            }
        }
    }
}
