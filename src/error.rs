use thiserror::Error;

/// A rule could not be built.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regular expression `{pattern}`: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A release string did not fit the scheme that was tried.
///
/// `Rejected` carries a warning worth logging; `NoMatch` is silent.
/// The selection policy in [`crate::increase_release`] downgrades this to the
/// fallback scheme, so callers of the public API never see it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BumpError {
    #[error("release `{0}` does not match the scheme")]
    NoMatch(String),

    #[error("release `{release}`: {reason}")]
    Rejected { release: String, reason: &'static str },
}

/// Errors from reading, rewriting and saving spec files.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("no `{0}:` line found in spec file")]
    MissingTag(String),

    #[error("failed to replace `{path}`: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
