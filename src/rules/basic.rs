//! Small programs showing the engine end to end.

use crate::engine::{Action, Program};

/// Print every line unchanged.
pub fn repeater() -> Program {
    Program::new().with_action(Action::print())
}

/// Print every line twice.
pub fn doubler() -> Program {
    Program::new().with_action(Action::double_print())
}

/// Print the n-th line n times, numbered from 0.
pub fn incrementer() -> Program {
    Program::new().with_action(Action::increment_print())
}
