mod debug_report;

use clap::{Parser, Subcommand};
use specawk::{Context, RunMetrics, SpecError, SpecFile};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Rewrite RPM spec files with pattern/action rules.
#[derive(Debug, Parser)]
#[command(name = "specawk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the rewritten file to stdout instead of replacing it.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print a run report to stderr.
    #[arg(long, global = true)]
    report: bool,

    /// Force ANSI color in the report.
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color in the report.
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bump the release, optionally logging the change.
    Bump {
        spec: PathBuf,
        /// Bump the rightmost numeral (or append `.1`) instead of guessing.
        #[arg(long)]
        rightmost: bool,
        /// Changelog entry to add under the new release.
        #[arg(short, long, requires = "email")]
        entry: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Set the `Version:` tag.
    SetVersion { spec: PathBuf, version: String },
    /// Set any `Tag:` line.
    SetTag { spec: PathBuf, tag: String, value: String },
    /// Set a `%global` macro.
    SetMacro { spec: PathBuf, name: String, value: String },
    /// Add a changelog entry.
    Changelog {
        spec: PathBuf,
        #[arg(short, long)]
        entry: String,
        #[arg(long)]
        email: String,
        /// `[epoch:]version-release`; read from the literal tags when omitted.
        #[arg(long)]
        evr: Option<String>,
    },
    /// Show the literal version, release and EVR.
    Info { spec: PathBuf },
}

impl Command {
    fn spec(&self) -> &Path {
        match self {
            Command::Bump { spec, .. }
            | Command::SetVersion { spec, .. }
            | Command::SetTag { spec, .. }
            | Command::SetMacro { spec, .. }
            | Command::Changelog { spec, .. }
            | Command::Info { spec } => spec,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("SPECAWK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SpecError> {
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stderr().is_terminal()
    };
    let context = Context::default();

    let path = cli.command.spec().to_path_buf();
    let mut file = SpecFile::open(&path)?;

    if let Command::Info { .. } = cli.command {
        println!("version: {}", file.version_line()?);
        println!("release: {}", file.release_line()?);
        println!("evr:     {}", file.literal_evr()?);
        return Ok(());
    }

    let before = file.lines().to_vec();
    let mut steps: Vec<(&'static str, RunMetrics)> = Vec::new();

    match cli.command {
        Command::Bump { rightmost, entry, email, .. } => {
            steps.push(("bump-release", file.increment_release(rightmost)));
            if let (Some(entry), Some(email)) = (entry, email) {
                steps.push(("changelog", file.add_changelog(&entry, &email, None, &context)?));
            }
        }
        Command::SetVersion { version, .. } => steps.push(("set-version", file.set_version(&version)?)),
        Command::SetTag { tag, value, .. } => steps.push(("set-tag", file.set_tag(&tag, &value)?)),
        Command::SetMacro { name, value, .. } => steps.push(("set-macro", file.set_macro(&name, &value)?)),
        Command::Changelog { entry, email, evr, .. } => {
            steps.push(("changelog", file.add_changelog(&entry, &email, evr.as_deref(), &context)?));
        }
        Command::Info { .. } => {}
    }

    if cli.dry_run {
        io::stdout().write_all(file.text().as_bytes())?;
    } else {
        file.save()?;
    }

    if cli.report {
        let path = path.display().to_string();
        let report =
            debug_report::RunReport { path: &path, steps, before: &before, after: file.lines(), saved: !cli.dry_run };
        debug_report::print_run(&report, color);
    }

    Ok(())
}
