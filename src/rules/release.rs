//! Release-string bumping.
//!
//! Three schemes, tried in a fixed order by [`increase_release`]:
//!
//! 1. **Main**: `N<post>` or `0.N<post>` becomes `N+1<post>` / `0.N+1<post>`.
//!    A non-`0.` release whose suffix mentions `rc` is refused.
//! 2. **JPP**: `<prefix>Njpp.<post>` keeps `N` and bumps `<post>` with Main.
//! 3. **Fallback**: bump the rightmost `.N` at the end of the string, or
//!    append `.1`. Never fails.
//!
//! Only ASCII digits count as numerals.
//! Numerals are incremented as decimal strings, so arbitrarily long release
//! numbers never overflow. Leading zeros are dropped, as an integer parse
//! would do.

use crate::error::BumpError;

fn group<'t>(caps: &regex::Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map(|m| m.as_str()).unwrap_or_default()
}

/// Bump `release` with the Main scheme.
pub fn increase_main(release: &str) -> Result<String, BumpError> {
    let (re, pre) = if release.starts_with("0.") {
        (regex!(r"^0\.(?P<rel>[0-9]+)(?P<post>.*)"), true)
    } else {
        (regex!(r"^(?P<rel>[0-9]+)(?P<post>.*)"), false)
    };
    let caps = re.captures(release).ok_or_else(|| BumpError::NoMatch(release.to_string()))?;
    let rel = increment_decimal(group(&caps, "rel"));
    let post = group(&caps, "post");

    if pre {
        return Ok(format!("0.{rel}{post}"));
    }
    if post.contains("rc") {
        return Err(BumpError::Rejected { release: release.to_string(), reason: "bad pre-release versioning scheme" });
    }
    Ok(format!("{rel}{post}"))
}

/// Bump `release` with the Fedora jpackage scheme (`<prefix>Njpp.<post>`).
pub fn increase_jpp(release: &str) -> Result<String, BumpError> {
    let caps = regex!(r"(?P<prefix>.*)(?P<rel>[0-9]+)(?P<jpp>jpp\.)(?P<post>.*)")
        .captures(release)
        .ok_or_else(|| BumpError::NoMatch(release.to_string()))?;
    let prefix = group(&caps, "prefix");
    let rel = normalize_decimal(group(&caps, "rel"));
    let jpp = group(&caps, "jpp");
    let post = increase_main(group(&caps, "post"))?;
    Ok(format!("{prefix}{rel}{jpp}{post}"))
}

/// Bump the rightmost dot-delimited numeral, or append `.1`.
pub fn increase_fallback(release: &str) -> String {
    match regex!(r"(?P<prefix>.+\.)(?P<post>[0-9]+)$").captures(release) {
        Some(caps) => format!("{}{}", group(&caps, "prefix"), increment_decimal(group(&caps, "post"))),
        None => format!("{}.1", release.trim_end()),
    }
}

/// Pick a scheme for `release` and bump it.
///
/// `rightmost` forces the fallback scheme. Otherwise a release mentioning
/// `jpp` (past its first character) uses JPP, anything else uses Main; a
/// refusal from either retreats to the fallback.
pub fn increase_release(release: &str, rightmost: bool) -> String {
    if rightmost {
        tracing::debug!(release, scheme = "fallback", "bumping release");
        return increase_fallback(release);
    }

    let (scheme, attempt) = if release.find("jpp").is_some_and(|idx| idx > 0) {
        ("jpp", increase_jpp(release))
    } else {
        ("main", increase_main(release))
    };

    match attempt {
        Ok(new) => {
            tracing::debug!(release, scheme, new = new.as_str(), "bumping release");
            new
        }
        Err(err) => {
            if let BumpError::Rejected { .. } = err {
                tracing::warn!("{err}");
            }
            tracing::debug!(release, scheme = "fallback", "bumping release");
            increase_fallback(release)
        }
    }
}

/// Add one to a string of ASCII digits.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = normalize_decimal(digits).into_bytes();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8(bytes).unwrap_or_default();
        }
    }
    bytes.insert(0, b'1');
    String::from_utf8(bytes).unwrap_or_default()
}

/// Strip leading zeros, keeping at least one digit.
fn normalize_decimal(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
}
