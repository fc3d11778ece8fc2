//! Programs, instances and the lazy run loop.
//!
//! ## Key concepts
//!
//! - **Program**: an immutable template holding Begin, Main and End actions.
//! - **Instance**: one run of a program. It owns a private copy of every
//!   action, so stateful patterns and handlers start fresh for each run.
//! - **Process**: the iterator returned by [`Instance::process`]. Each call to
//!   `next` does only as much work as needed to produce one output line.
//!
//! ## Run order
//!
//! ```text
//! begin actions (no line)        once
//! for line in input:
//!     main actions, in order     each may emit 0..n lines
//!     record_number += 1
//! end actions (no line)          once
//! ```

use super::action::Action;
use super::handler::{Handler, Output};
use super::metrics::RunMetrics;
use super::pattern::Pattern;
use crate::Options;

/// Per-run variables visible to handlers.
#[derive(Debug, Clone)]
pub struct RunState {
    record_number: usize,
    field_separator: String,
    record_separator: String,
}

impl Default for RunState {
    fn default() -> Self {
        RunState::from_options(&Options::default())
    }
}

impl RunState {
    pub(crate) fn from_options(options: &Options) -> Self {
        RunState {
            record_number: 0,
            field_separator: options.field_separator.clone(),
            record_separator: options.record_separator.clone(),
        }
    }

    /// Number of input lines completed so far (`NR` before the current line).
    pub fn record_number(&self) -> usize {
        self.record_number
    }

    pub fn field_separator(&self) -> &str {
        &self.field_separator
    }

    pub fn record_separator(&self) -> &str {
        &self.record_separator
    }
}

/// A reusable set of actions.
#[derive(Debug, Clone, Default)]
pub struct Program {
    begin: Vec<Action>,
    main: Vec<Action>,
    end: Vec<Action>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Add an action, routed by its pattern: `Pattern::Begin` actions run
    /// before any input, `Pattern::End` actions after all input, anything else
    /// once per line.
    pub fn add_action(&mut self, action: Action) {
        if action.pattern.is_begin() {
            self.begin.push(action);
        } else if action.pattern.is_end() {
            self.end.push(action);
        } else {
            self.main.push(action);
        }
    }

    pub fn add_pattern_with_handler(&mut self, pattern: Pattern, handler: Handler) {
        self.add_action(Action::new(pattern, handler));
    }

    /// Builder form of [`Program::add_action`].
    pub fn with_action(mut self, action: Action) -> Self {
        self.add_action(action);
        self
    }

    pub fn begin(&self) -> &[Action] {
        &self.begin
    }

    pub fn main(&self) -> &[Action] {
        &self.main
    }

    pub fn end(&self) -> &[Action] {
        &self.end
    }

    /// Start a run with default separators.
    pub fn run(&self) -> Instance {
        self.run_with(&Options::default())
    }

    /// Start a run. The instance gets its own deep copy of every action, so
    /// `Range` and `Increment` state never carries over between runs.
    pub fn run_with(&self, options: &Options) -> Instance {
        Instance {
            state: RunState::from_options(options),
            begin: self.begin.clone(),
            main: self.main.clone(),
            end: self.end.clone(),
            metrics: RunMetrics::default(),
        }
    }

    /// Run over `input` and collect every output line.
    pub fn apply<I>(&self, input: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.run().process(input).collect()
    }
}

/// One execution of a [`Program`].
///
/// An instance is meant to be driven over a single input sequence. Calling
/// [`Instance::process`] again replays the Begin phase with whatever state the
/// actions were left in.
#[derive(Debug)]
pub struct Instance {
    state: RunState,
    begin: Vec<Action>,
    main: Vec<Action>,
    end: Vec<Action>,
    metrics: RunMetrics,
}

impl Instance {
    /// Drive the instance over `input`, lazily.
    pub fn process<I>(&mut self, input: I) -> Process<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Process {
            instance: self,
            input: input.into_iter(),
            phase: Phase::Begin,
            action: 0,
            line: None,
            pending: Output::empty(),
        }
    }

    pub fn record_number(&self) -> usize {
        self.state.record_number
    }

    pub fn field_separator(&self) -> &str {
        &self.state.field_separator
    }

    pub fn record_separator(&self) -> &str {
        &self.state.record_separator
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Run action `idx` of `phase` against `line`.
    fn fire(&mut self, phase: Phase, idx: usize, line: Option<&str>) -> Output {
        let Instance { state, begin, main, end, metrics } = self;
        let action = match phase {
            Phase::Begin => &mut begin[idx],
            Phase::Main => &mut main[idx],
            Phase::End | Phase::Done => &mut end[idx],
        };
        match action.apply(state, line) {
            Some(output) => {
                metrics.fired += 1;
                tracing::debug!(?phase, action = idx, record = state.record_number, "action fired");
                output
            }
            None => {
                metrics.skipped += 1;
                Output::empty()
            }
        }
    }

    fn phase_len(&self, phase: Phase) -> usize {
        match phase {
            Phase::Begin => self.begin.len(),
            Phase::Main => self.main.len(),
            Phase::End => self.end.len(),
            Phase::Done => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Begin,
    Main,
    End,
    Done,
}

/// Lazy output of an [`Instance`] run.
#[derive(Debug)]
pub struct Process<'a, I> {
    instance: &'a mut Instance,
    input: I,
    phase: Phase,
    action: usize,
    line: Option<String>,
    pending: Output,
}

impl<I> Process<'_, I> {
    /// The instance being driven; useful to inspect counters mid-run.
    pub fn instance(&self) -> &Instance {
        &*self.instance
    }
}

impl<I> Iterator for Process<'_, I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(out) = self.pending.next() {
                self.instance.metrics.emitted += 1;
                return Some(out);
            }

            match self.phase {
                Phase::Begin | Phase::End => {
                    if self.action < self.instance.phase_len(self.phase) {
                        self.pending = self.instance.fire(self.phase, self.action, None);
                        self.action += 1;
                    } else {
                        self.phase = if self.phase == Phase::Begin { Phase::Main } else { Phase::Done };
                        self.action = 0;
                    }
                }
                Phase::Main => {
                    if self.line.is_none() {
                        match self.input.next() {
                            Some(line) => {
                                self.line = Some(line.into());
                                self.action = 0;
                            }
                            None => {
                                self.phase = Phase::End;
                                self.action = 0;
                                continue;
                            }
                        }
                    }

                    if self.action < self.instance.phase_len(Phase::Main) {
                        self.pending = self.instance.fire(Phase::Main, self.action, self.line.as_deref());
                        self.action += 1;
                    } else {
                        self.instance.state.record_number += 1;
                        self.instance.metrics.records += 1;
                        self.line = None;
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}
