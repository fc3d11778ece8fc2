use crate::error::PatternError;
use crate::rules::spec::{
    ChangeLogEntry, bump_release_program, changelog_program, replace_macro_program, replace_tag_program,
};
use chrono::{Local, NaiveDate};

/// Environment for rules that depend on the outside world.
#[derive(Debug, Clone)]
pub struct Context {
    /// Date stamped on new changelog entries.
    pub date: NaiveDate,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { date: NaiveDate::from_ymd_opt(2013, 2, 12).unwrap_or_default() }
        } else {
            Self { date: Local::now().date_naive() }
        }
    }
}

/// Options that affect a run.
#[derive(Debug, Clone)]
pub struct Options {
    /// `FS`; kept on the instance for handlers, unused by the built-in ones.
    pub field_separator: String,
    /// `RS`; kept on the instance for handlers, unused by the built-in ones.
    pub record_separator: String,
    /// Always bump the rightmost release numeral instead of guessing a scheme.
    pub rightmost: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { field_separator: " ".to_string(), record_separator: "\n".to_string(), rightmost: false }
    }
}

/// Bump every release field in `lines`.
///
/// # Example
/// ```
/// use specawk::{Options, bump_release};
///
/// let out = bump_release(["Name: foo\n", "Release: 3%{?dist}\n"], &Options::default());
/// assert_eq!(out, vec!["Name: foo\n", "Release: 4%{?dist}\n"]);
/// ```
pub fn bump_release<I>(lines: I, options: &Options) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    bump_release_program(options.rightmost).run_with(options).process(lines).collect()
}

/// Set the value of every `tag:` line in `lines`.
pub fn replace_tag<I>(lines: I, tag: &str, value: &str) -> Result<Vec<String>, PatternError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Ok(replace_tag_program(tag, value)?.apply(lines))
}

/// Set the value of every `%global name` line in `lines`.
pub fn replace_macro<I>(lines: I, name: &str, value: &str) -> Result<Vec<String>, PatternError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Ok(replace_macro_program(name, value)?.apply(lines))
}

/// Insert `entry` after the `%changelog` marker.
pub fn add_changelog<I>(lines: I, entry: &ChangeLogEntry, context: &Context) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    changelog_program(entry.clone(), context).apply(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_fixed_under_test() {
        assert_eq!(Context::default().date, NaiveDate::from_ymd_opt(2013, 2, 12).unwrap());
    }

    #[test]
    fn rightmost_option_forces_fallback() {
        let options = Options { rightmost: true, ..Options::default() };
        assert_eq!(bump_release(["Release: 3\n"], &options), vec!["Release: 3.1\n"]);
        assert_eq!(bump_release(["Release: 1.fc9.2\n"], &options), vec!["Release: 1.fc9.3\n"]);
    }

    #[test]
    fn replace_tag_keeps_other_lines() {
        let out = replace_tag(["Name: foo\n", "Version: 1.0\n", "Release: 1\n"], "version", "2.0").unwrap();
        assert_eq!(out, vec!["Name: foo\n", "Version: 2.0\n", "Release: 1\n"]);
    }

    #[test]
    fn replace_macro_sets_global() {
        let out = replace_macro(["%global alphatag 20080101git\n", "Name: foo\n"], "alphatag", "20090202git").unwrap();
        assert_eq!(out, vec!["%global alphatag 20090202git\n", "Name: foo\n"]);
    }

    #[test]
    fn add_changelog_uses_context_date() {
        let entry = ChangeLogEntry::new("1.0-2", "Rebuilt", "Dev <dev@example.org>");
        let out = add_changelog(["%changelog\n", "* old\n"], &entry, &Context::default());
        assert_eq!(out, vec![
            "%changelog\n",
            "* Tue Feb 12 2013 Dev <dev@example.org> - 1.0-2\n",
            "- Rebuilt\n",
            "\n",
            "* old\n",
        ]);
    }
}
