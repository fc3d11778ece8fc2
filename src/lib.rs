extern crate self as specawk;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;
mod spec_file;

pub use api::{Context, Options, add_changelog, bump_release, replace_macro, replace_tag};
pub use engine::{Action, Handler, HandlerFn, Instance, Output, Pattern, Process, Program, RegexFlags, RunMetrics, RunState};
pub use error::{BumpError, PatternError, SpecError};
pub use rules::basic::{doubler, incrementer, repeater};
pub use rules::release::{increase_fallback, increase_jpp, increase_main, increase_release};
pub use rules::spec::{
    ChangeLogEntry, bump_release_action, bump_release_pattern, bump_release_program, changelog_action,
    changelog_pattern, changelog_program, global_macro, release_pattern, replace_macro_program, replace_tag_program,
    tag,
};
pub use spec_file::SpecFile;

// --- Match results ----------------------------------------------------------

/// Byte span into a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// Owned capture groups from a regex search over one line.
///
/// Group `0` is the whole match; numbered groups follow the regex. Named
/// groups can be looked up by name as well as by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    haystack: String,
    groups: Vec<Option<Range>>,
    names: Vec<(String, usize)>,
}

impl Captures {
    pub(crate) fn from_regex(re: &regex::Regex, caps: &regex::Captures<'_>, haystack: &str) -> Self {
        let groups = (0..caps.len()).map(|i| caps.get(i).map(|m| Range { start: m.start(), end: m.end() })).collect();
        let names = re
            .capture_names()
            .enumerate()
            .filter_map(|(idx, name)| name.map(|n| (n.to_string(), idx)))
            .collect();
        Captures { haystack: haystack.to_string(), groups, names }
    }

    /// Text of group `index`, if it participated in the match.
    pub fn get(&self, index: usize) -> Option<&str> {
        let span = self.span(index)?;
        self.haystack.get(span.start..span.end)
    }

    /// Text of the named group `name`.
    pub fn name(&self, name: &str) -> Option<&str> {
        self.get(self.index_of(name)?)
    }

    pub fn span(&self, index: usize) -> Option<Range> {
        self.groups.get(index).copied().flatten()
    }

    pub fn name_span(&self, name: &str) -> Option<Range> {
        self.span(self.index_of(name)?)
    }

    /// Number of groups, including the implicit whole-match group.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().find(|(n, _)| n == name).map(|(_, idx)| *idx)
    }
}

/// Which branch of a disjunctive pattern produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A match tagged with the side that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Either {
    pub value: Box<MatchResult>,
    pub side: Side,
}

impl Either {
    pub fn left(value: MatchResult) -> Self {
        Either { value: Box::new(value), side: Side::Left }
    }

    pub fn right(value: MatchResult) -> Self {
        Either { value: Box::new(value), side: Side::Right }
    }

    pub fn is_left(&self) -> bool {
        self.side == Side::Left
    }

    pub fn is_right(&self) -> bool {
        self.side == Side::Right
    }
}

/// What a [`Pattern`] reports for one line.
///
/// `Bool(false)` is the only "no match" value. Captures and [`Either`] are
/// always a match, even when the `Either` wraps a miss; the handler decides
/// what a left-tagged miss means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Bool(bool),
    Captures(Captures),
    Either(Either),
}

impl MatchResult {
    pub const MATCH: MatchResult = MatchResult::Bool(true);
    pub const NO_MATCH: MatchResult = MatchResult::Bool(false);

    pub fn is_match(&self) -> bool {
        match self {
            MatchResult::Bool(b) => *b,
            MatchResult::Captures(_) => true,
            MatchResult::Either(_) => true,
        }
    }

    pub fn captures(&self) -> Option<&Captures> {
        match self {
            MatchResult::Captures(caps) => Some(caps),
            _ => None,
        }
    }

    pub fn either(&self) -> Option<&Either> {
        match self {
            MatchResult::Either(either) => Some(either),
            _ => None,
        }
    }
}

impl From<bool> for MatchResult {
    fn from(value: bool) -> Self {
        MatchResult::Bool(value)
    }
}
