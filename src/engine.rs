//! Pattern/action engine.
//!
//! This module is the *public entry point* for the AWK-style rule engine. It is
//! split into focused submodules under `src/engine/` while keeping public paths
//! stable (for example `crate::engine::Program` and `crate::engine::Pattern`).
//!
//! ## How the parts work together
//!
//! A program is declared once and then run any number of times:
//!
//! ```text
//! Action(pattern, handler) ──┐
//!                            │  Program::add_action      (program.rs)
//!                            └──── begin / main / end ───┐
//!                                                        │
//!                                  Program::run ─────────┼─ deep clone of the
//!                                                        │  three action lists
//!                                                        v
//! input lines ────────────────> Instance::process (program.rs)
//!                                 - Begin actions, no line
//!                                 - every Main action per line, NR += 1
//!                                 - End actions, no line
//!                                                        │
//!                                                        v
//!                                 Process: Iterator<Item = String>
//! ```
//!
//! Evaluation is pull-based. Nothing is read from the input and no action is
//! invoked until the caller asks the [`Process`] iterator for its next line.
//!
//! ## Responsibilities by module
//!
//! - `pattern.rs`: the closed pattern algebra (`Always`, `Never`, regexes,
//!   boolean combinators, ranges, ternary and first-match dispatch, either/or).
//! - `handler.rs`: built-in handlers and the lazy [`Output`] sequence they
//!   return.
//! - `action.rs`: the (pattern, handler) pair and its common constructors.
//! - `program.rs`: program templates, instances and the `Process` iterator.
//! - `metrics.rs`: per-instance counters.
//!
//! ## State
//!
//! `Range` patterns and `Increment` handlers carry mutable state inside their
//! variant. That state belongs to the instance that owns the action: a fresh
//! instance always starts from a fresh copy of the program's actions.
//!
//! ## Debugging
//!
//! Action firings are reported through `tracing` at `debug` level.

#[path = "engine/action.rs"]
mod action;
#[path = "engine/handler.rs"]
mod handler;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pattern.rs"]
mod pattern;
#[path = "engine/program.rs"]
mod program;

pub use action::Action;
pub use handler::{Handler, HandlerFn, Output};
pub(crate) use handler::splice;
pub use metrics::RunMetrics;
pub use pattern::{Pattern, RegexFlags};
pub use program::{Instance, Process, Program, RunState};
