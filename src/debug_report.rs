use specawk::RunMetrics;
use std::collections::HashSet;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// What one CLI invocation did to a spec file.
pub struct RunReport<'a> {
    pub path: &'a str,
    pub steps: Vec<(&'static str, RunMetrics)>,
    pub before: &'a [String],
    pub after: &'a [String],
    pub saved: bool,
}

pub fn print_run(report: &RunReport<'_>, color: bool) {
    let palette = ansi::Palette::new(color);
    eprintln!("\n{}", palette.bold(palette.paint(format!("⚙  Rewriting: \"{}\"", report.path), ansi::CYAN)));

    eprintln!("\n{}", palette.paint("━━━ Programs ━━━", ansi::GRAY));
    for (name, metrics) in &report.steps {
        print_step(name, metrics, &palette);
    }

    eprintln!("\n{}", palette.paint("━━━ Changes ━━━", ansi::GRAY));
    print_changes(report.before, report.after, &palette);

    eprintln!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    if report.saved {
        eprintln!("  {}", palette.paint("✓ file replaced", ansi::GREEN));
    } else {
        eprintln!("  {}", palette.dim("dry run: file left untouched"));
    }
    eprintln!();
}

fn print_step(name: &str, metrics: &RunMetrics, palette: &ansi::Palette) {
    eprintln!(
        "  {} {} {} {} {}",
        palette.paint(format!("{name}:"), ansi::BLUE),
        palette.paint(format!("{} records", metrics.records), ansi::YELLOW),
        palette.dim("→"),
        palette.paint(format!("{} lines", metrics.emitted), ansi::YELLOW),
        palette.dim(format!("│ fired {} │ skipped {}", metrics.fired, metrics.skipped)),
    );
}

fn print_changes(before: &[String], after: &[String], palette: &ansi::Palette) {
    let old: HashSet<&str> = before.iter().map(String::as_str).collect();
    let new: HashSet<&str> = after.iter().map(String::as_str).collect();

    let removed: Vec<&str> = before.iter().map(String::as_str).filter(|l| !new.contains(l)).collect();
    let added: Vec<&str> = after.iter().map(String::as_str).filter(|l| !old.contains(l)).collect();

    if removed.is_empty() && added.is_empty() {
        eprintln!("{}", palette.dim("  No lines changed"));
        return;
    }
    for line in removed {
        eprintln!("  {}", palette.paint(format!("- {}", line.trim_end()), ansi::RED));
    }
    for line in added {
        eprintln!("  {}", palette.paint(format!("+ {}", line.trim_end()), ansi::GREEN));
    }
}
