//! Spec files on disk.
//!
//! A [`SpecFile`] holds the file's lines (terminators included) in memory.
//! Every rewrite runs one program instance over all lines and replaces the
//! in-memory contents; nothing touches the disk until [`SpecFile::save`],
//! which swaps the file atomically.

use crate::engine::{Pattern, Program, RunMetrics};
use crate::error::SpecError;
use crate::rules::spec::{
    ChangeLogEntry, bump_release_program, changelog_program, replace_macro_program, replace_tag_program, tag,
};
use crate::{Context, Options};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SpecFile {
    path: PathBuf,
    contents: Vec<String>,
}

impl SpecFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)?;
        Ok(SpecFile::from_text(path, &text))
    }

    /// A spec file whose contents come from `text` rather than the disk.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        SpecFile { path: path.into(), contents: text.split_inclusive('\n').map(str::to_string).collect() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.contents
    }

    pub fn text(&self) -> String {
        self.contents.concat()
    }

    /// Run `program` over the contents and keep its output.
    pub fn rewrite(&mut self, program: &Program, options: &Options) -> RunMetrics {
        let mut instance = program.run_with(options);
        let contents: Vec<String> = instance.process(self.contents.iter().cloned()).collect();
        self.contents = contents;
        instance.metrics().clone()
    }

    /// Value of the first literal `Version:` line.
    pub fn version_line(&self) -> Result<String, SpecError> {
        self.literal_tag("Version")?.ok_or_else(|| SpecError::MissingTag("Version".to_string()))
    }

    /// Value of the first literal `Release:` line.
    pub fn release_line(&self) -> Result<String, SpecError> {
        self.literal_tag("Release")?.ok_or_else(|| SpecError::MissingTag("Release".to_string()))
    }

    /// `[epoch:]version-release` from the literal tag values.
    ///
    /// Macros are not expanded.
    pub fn literal_evr(&self) -> Result<String, SpecError> {
        let epoch = self.literal_tag("Epoch")?;
        let version = self.version_line()?;
        let release = self.release_line()?;
        Ok(match epoch {
            Some(epoch) => format!("{epoch}:{version}-{release}"),
            None => format!("{version}-{release}"),
        })
    }

    fn literal_tag(&self, name: &str) -> Result<Option<String>, SpecError> {
        let mut pattern = tag(name)?;
        Ok(self.contents.iter().find_map(|line| {
            let m = pattern.matches(Some(line));
            m.captures().and_then(|caps| caps.name("value")).map(|v| v.trim_end().to_string())
        }))
    }

    pub fn set_version(&mut self, version: &str) -> Result<RunMetrics, SpecError> {
        self.set_tag("Version", version)
    }

    pub fn set_tag(&mut self, tag: &str, value: &str) -> Result<RunMetrics, SpecError> {
        let program = replace_tag_program(tag, value)?;
        Ok(self.rewrite(&program, &Options::default()))
    }

    pub fn set_macro(&mut self, name: &str, value: &str) -> Result<RunMetrics, SpecError> {
        let program = replace_macro_program(name, value)?;
        Ok(self.rewrite(&program, &Options::default()))
    }

    pub fn set_alphatag(&mut self, alphatag: &str) -> Result<RunMetrics, SpecError> {
        self.set_macro("alphatag", alphatag)
    }

    pub fn increment_release(&mut self, rightmost: bool) -> RunMetrics {
        let options = Options { rightmost, ..Options::default() };
        self.rewrite(&bump_release_program(rightmost), &options)
    }

    /// Add a changelog entry. Without an explicit `evr` the literal one is used.
    pub fn add_changelog(
        &mut self,
        entry: &str,
        email: &str,
        evr: Option<&str>,
        context: &Context,
    ) -> Result<RunMetrics, SpecError> {
        let evr = match evr {
            Some(evr) => evr.to_string(),
            None => self.literal_evr()?,
        };
        let program = changelog_program(ChangeLogEntry::new(evr, entry, email), context);
        Ok(self.rewrite(&program, &Options::default()))
    }

    /// Bump the release, then log the change under the new release.
    pub fn bump_release(
        &mut self,
        entry: &str,
        email: &str,
        rightmost: bool,
        context: &Context,
    ) -> Result<Vec<RunMetrics>, SpecError> {
        let bump = self.increment_release(rightmost);
        let log = self.add_changelog(entry, email, None, context)?;
        Ok(vec![bump, log])
    }

    /// Replace the file on disk with the current contents.
    ///
    /// The new text is written to a temporary file next to the target and
    /// renamed over it.
    pub fn save(&self) -> Result<(), SpecError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(self.text().as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|err| SpecError::Persist { path: self.path.display().to_string(), source: err.error })?;
        tracing::debug!(path = %self.path.display(), lines = self.contents.len(), "spec file saved");
        Ok(())
    }

    /// `true` if any line matches `pattern`.
    pub fn contains(&self, pattern: &Pattern) -> bool {
        let mut pattern = pattern.clone();
        self.contents.iter().any(|line| pattern.matches(Some(line)).is_match())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::spec::changelog_pattern;

    const SPEC: &str = "\
Name: hello
Version: 2.1
Release: 3%{?dist}
Summary: Greets

%changelog
* Mon Jan 07 2013 Dev <dev@example.org> - 2.1-2
- Older entry
";

    fn write_spec(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("hello.spec");
        fs::write(&path, SPEC).unwrap();
        path
    }

    #[test]
    fn open_keeps_line_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let spec = SpecFile::open(write_spec(&dir)).unwrap();
        assert_eq!(spec.lines().len(), 8);
        assert_eq!(spec.lines()[0], "Name: hello\n");
        assert_eq!(spec.text(), SPEC);
    }

    #[test]
    fn literal_fields() {
        let spec = SpecFile::from_text("hello.spec", SPEC);
        assert_eq!(spec.version_line().unwrap(), "2.1");
        assert_eq!(spec.release_line().unwrap(), "3%{?dist}");
        assert_eq!(spec.literal_evr().unwrap(), "2.1-3%{?dist}");

        let with_epoch = SpecFile::from_text("e.spec", &format!("Epoch: 1\n{SPEC}"));
        assert_eq!(with_epoch.literal_evr().unwrap(), "1:2.1-3%{?dist}");
    }

    #[test]
    fn missing_version_is_an_error() {
        let spec = SpecFile::from_text("empty.spec", "Name: x\n");
        assert!(matches!(spec.version_line(), Err(SpecError::MissingTag(name)) if name == "Version"));
    }

    #[test]
    fn bump_release_rewrites_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_spec(&dir);
        let mut spec = SpecFile::open(&path).unwrap();

        let metrics = spec.bump_release("Fix the greeting", "Dev <dev@example.org>", false, &Context::default()).unwrap();
        assert_eq!(metrics[0].records, 8);
        assert_eq!(metrics[1].emitted, 11);

        spec.save().unwrap();
        let saved = fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "\
Name: hello
Version: 2.1
Release: 4%{?dist}
Summary: Greets

%changelog
* Tue Feb 12 2013 Dev <dev@example.org> - 2.1-4%{?dist}
- Fix the greeting

* Mon Jan 07 2013 Dev <dev@example.org> - 2.1-2
- Older entry
");
    }

    #[test]
    fn set_version_and_alphatag() {
        let mut spec = SpecFile::from_text("x.spec", "%global alphatag 20080101git\nVersion: 1.0\n");
        spec.set_version("1.1").unwrap();
        spec.set_alphatag("20090303git").unwrap();
        assert_eq!(spec.text(), "%global alphatag 20090303git\nVersion: 1.1\n");
    }

    #[test]
    fn nothing_is_written_until_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_spec(&dir);
        let mut spec = SpecFile::open(&path).unwrap();
        spec.increment_release(true);

        assert_eq!(fs::read_to_string(&path).unwrap(), SPEC);
        assert_eq!(spec.release_line().unwrap(), "3%{?dist}.1");
        assert!(spec.contains(&changelog_pattern()));
    }
}
