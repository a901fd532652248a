//! An interactive shell for stepping through Befunge stack-machine
//! semantics one instruction at a time.
//!
//! The shell keeps an integer operand stack, a program-counter direction,
//! and a string-mode flag; each input line is one instruction (or a digit
//! literal, or an auxiliary command like `help` or `show_stack`). Nothing
//! is loaded from files and no 2-D grid exists: the tool is a debugging
//! and teaching aid, not a Befunge interpreter. The grid commands `g` and
//! `p` (and `#`) are recognized but unsupported.
//!
//! Behaviors:
//! - User-facing pops default to 0 on an empty stack; only swap (`\`)
//!   reports underflow, which ends the session.
//! - `/` and `%` use floor semantics; a zero divisor asks the user for
//!   the result instead of failing.
//! - `"` enters string mode, where each single-character line is pushed
//!   as its character code until the next `"`.
//!
//! Quick start:
//!
//! ```no_run
//! use befunge_shell::{config, repl::BareLineSource, Shell};
//!
//! let source = BareLineSource::stdin();
//! let mut shell = Shell::new(source, std::io::stdout(), config::config());
//! shell.run().expect("session should end cleanly");
//! ```

pub mod config;
pub mod help;
pub mod repl;
pub mod shell;
pub mod stack;
pub mod theme;

pub use shell::{Direction, LineSource, Outcome, Shell, ShellError};
pub use stack::{Stack, StackError};
