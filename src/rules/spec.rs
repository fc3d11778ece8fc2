//! RPM spec-file rules.
//!
//! Every program here is a single "transform or pass through" action
//! ([`Action::or_print`]): lines the pattern accepts are rewritten, all other
//! lines come out unchanged.

use crate::engine::{Action, Handler, Pattern, Program, RegexFlags};
use crate::error::PatternError;
use crate::{Context, MatchResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;

// --- Tags and macros -----------------------------------------------------------

/// `Tag: value` lines, e.g. `tag("Version")`. Case-insensitive.
///
/// Captures `key` and `value`; a trailing `\r` is not part of `value`. The
/// value never spans the line terminator, so an empty value is an empty span
/// before it.
pub fn tag(name: &str) -> Result<Pattern, PatternError> {
    Pattern::regex(
        &format!(r"^(?P<key>{}):[ \t]*(?P<value>.*?)\r?$", regex::escape(name)),
        RegexFlags::CASE_INSENSITIVE | RegexFlags::MULTI_LINE,
    )
}

/// `%global name value` lines. Captures `key` and `value`.
pub fn global_macro(name: &str) -> Result<Pattern, PatternError> {
    Pattern::regex(&format!(r"^%global[ \t]+(?P<key>{})[ \t]+(?P<value>.*?)\r?$", regex::escape(name)), RegexFlags::MULTI_LINE)
}

pub fn replace_tag_program(tag_name: &str, value: &str) -> Result<Program, PatternError> {
    Ok(Program::new().with_action(Action::or_print(tag(tag_name)?, Handler::replace_value(value))))
}

pub fn replace_macro_program(name: &str, value: &str) -> Result<Program, PatternError> {
    Ok(Program::new().with_action(Action::or_print(global_macro(name)?, Handler::replace_value(value))))
}

// --- Release bumping -------------------------------------------------------------

/// The recognised release field shapes, in priority order. Each captures the
/// value as `release`, without trailing whitespace or line terminator.
static RELEASE_FIELDS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        re!(r"(?i)^Release[ \t]*:[ \t]*(?P<release>[0-9]+.*?)\s*$"),
        re!(r"^%define[ \t]+rel[ \t]+(?P<release>[0-9]+.*?)\s*$"),
        re!(r"^%define[ \t]+release[ \t]+(?P<release>[0-9]+.*?)\s*$"),
        re!(r"(?i)^Release[ \t]*:[ \t]+%release_func[ \t]+(?P<release>[0-9]+.*?)\s*$"),
        re!(r"^%define[ \t]+baserelease[ \t]+(?P<release>[0-9]+.*?)\s*$"),
    ]
});

/// Any of the recognised release field lines.
pub fn release_pattern() -> Pattern {
    Pattern::one_of(RELEASE_FIELDS.iter().cloned())
}

/// A release field line that is not maintained by a VCS `$Revision:` keyword.
pub fn bump_release_pattern() -> Pattern {
    Pattern::and(Pattern::not(re!(r"\$Revision:")), release_pattern())
}

pub fn bump_release_action(rightmost: bool) -> Action {
    Action::or_print(bump_release_pattern(), Handler::BumpRelease { rightmost })
}

pub fn bump_release_program(rightmost: bool) -> Program {
    Program::new().with_action(bump_release_action(rightmost))
}

/// Rewrite the `release` capture of `m` in `line` to its bumped value.
pub(crate) fn bump_release_line(m: &MatchResult, line: &str, rightmost: bool) -> String {
    let Some(caps) = m.captures() else {
        tracing::warn!(line, "release handler got a match without captures");
        return line.to_string();
    };
    match (caps.name("release"), caps.name_span("release")) {
        (Some(old), Some(span)) => {
            let new = crate::rules::release::increase_release(old, rightmost);
            crate::engine::splice(line, span, &new)
        }
        _ => {
            tracing::warn!(line, "release handler got a match without a `release` group");
            line.to_string()
        }
    }
}

// --- Changelog -------------------------------------------------------------------

/// A changelog entry to insert after the `%changelog` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntry {
    /// `[epoch:]version-release`; left out of the header when empty.
    pub evr: String,
    pub entry: String,
    pub email: String,
}

impl ChangeLogEntry {
    pub fn new(evr: impl Into<String>, entry: impl Into<String>, email: impl Into<String>) -> Self {
        ChangeLogEntry { evr: evr.into(), entry: entry.into(), email: email.into() }
    }
}

pub fn changelog_pattern() -> Pattern {
    re!(r"%changelog")
}

pub fn changelog_action(entry: ChangeLogEntry, context: &Context) -> Action {
    Action::or_print(changelog_pattern(), Handler::ChangeLog { entry, date: context.date })
}

pub fn changelog_program(entry: ChangeLogEntry, context: &Context) -> Program {
    Program::new().with_action(changelog_action(entry, context))
}

/// The marker line followed by a header, the entry and a blank line.
///
/// New lines end with the marker's own terminator (`\r\n`, `\n` or none).
pub(crate) fn changelog_lines(entry: &ChangeLogEntry, date: NaiveDate, line: &str) -> Vec<String> {
    let eol = if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    };
    let evr = if entry.evr.is_empty() { String::new() } else { format!(" - {}", entry.evr) };
    vec![
        line.to_string(),
        format!("* {} {}{}{}", date.format("%a %b %d %Y"), entry.email, evr, eol),
        format!("- {}{}", entry.entry, eol),
        eol.to_string(),
    ]
}
