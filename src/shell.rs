//! The command interpreter loop.
//!
//! [`Shell`] owns the operand stack, the PC direction, and the string-mode
//! flag, and processes one input line at a time: classify (string-mode
//! character, digit literal, known command, unknown token), mutate state,
//! write feedback. Input comes from an injected [`LineSource`] and output
//! goes to an injected writer, so the whole loop runs against in-memory
//! buffers in tests.

use std::fmt;
use std::io::{self, Write};

use rand::seq::SliceRandom;
use thiserror::Error;

use crate::config::ShellConfig;
use crate::help;
use crate::stack::{Stack, StackError};

/// Errors that end a shell session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Underflow from an unguarded stack operation (`\`).
    #[error(transparent)]
    Stack(#[from] StackError),

    /// The input or output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The direction the (imaginary) program counter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// The Befunge instruction character that selects this direction.
    pub fn symbol(self) -> char {
        match self {
            Direction::Right => '>',
            Direction::Left => '<',
            Direction::Up => '^',
            Direction::Down => 'v',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Whether the session continues after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Supplier of input lines for the shell.
///
/// The main loop and the interactive sub-prompts (`&`, `~`, zero-divisor
/// `/` and `%`) both read through this trait, which keeps the interpreter
/// free of direct console access.
pub trait LineSource {
    /// Read the next command line, rendering the shell prompt.
    /// Returns `None` at end of input.
    fn read_command(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Read one reply line for a sub-prompt (the prompt text itself has
    /// already been written to the shell's output). Returns `None` at end
    /// of input.
    fn read_reply(&mut self) -> io::Result<Option<String>>;
}

/// The two-operand instructions.
#[derive(Debug, Clone, Copy)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Greater,
}

/// An interactive Befunge debugging shell session.
pub struct Shell<S, W> {
    source: S,
    out: W,
    stack: Stack,
    pc: Direction,
    string_mode: bool,
    prompt: String,
    ruler: char,
    subruler: char,
}

impl<S: LineSource, W: Write> Shell<S, W> {
    pub fn new(source: S, out: W, config: &ShellConfig) -> Self {
        Self {
            source,
            out,
            stack: Stack::new(),
            pc: Direction::Right,
            string_mode: false,
            prompt: config.prompt.clone(),
            ruler: config.ruler,
            subruler: config.subruler,
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn pc(&self) -> Direction {
        self.pc
    }

    pub fn string_mode(&self) -> bool {
        self.string_mode
    }

    /// Run the read-dispatch-execute loop until quit or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let Some(line) = self.source.read_command(&self.prompt)? else {
                // End of input: finish the prompt line and leave quietly.
                writeln!(self.out)?;
                self.out.flush()?;
                return Ok(());
            };
            if self.handle_line(&line)? == Outcome::Quit {
                return Ok(());
            }
        }
    }

    /// Classify and execute a single input line. Blank lines are a no-op
    /// and never repeat the previous command.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::Continue);
        }

        let outcome = if self.string_mode {
            self.handle_string_mode(line)?
        } else {
            self.handle_normal_mode(line)?
        };
        self.out.flush()?;
        Ok(outcome)
    }

    fn handle_normal_mode(&mut self, line: &str) -> Result<Outcome, ShellError> {
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "quit" | "exit" => return Ok(Outcome::Quit),
            "help" => {
                self.help(arg)?;
                return Ok(Outcome::Continue);
            }
            "show_stack" => {
                writeln!(self.out, "{:?}", self.stack.values())?;
                return Ok(Outcome::Continue);
            }
            "show_pc" => {
                writeln!(self.out, "'{}'", self.pc)?;
                return Ok(Outcome::Continue);
            }
            _ => {}
        }

        // A whole-line integer literal is only accepted in the cell range.
        if let Ok(number) = line.parse::<i64>() {
            if (0..=9).contains(&number) {
                self.stack.push(number);
            } else {
                writeln!(self.out, "Error: only numbers from 0 to 9 are allowed")?;
            }
            return Ok(Outcome::Continue);
        }

        self.dispatch(line)?;
        Ok(Outcome::Continue)
    }

    /// String mode accepts one character per line; the delimiter switches
    /// back to normal mode without pushing anything.
    fn handle_string_mode(&mut self, line: &str) -> Result<Outcome, ShellError> {
        if line == "\"" {
            self.string_mode = false;
            return Ok(Outcome::Continue);
        }
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.stack.push(ch as i64),
            _ => writeln!(
                self.out,
                "Error: string mode takes a single character per line"
            )?,
        }
        Ok(Outcome::Continue)
    }

    /// Execute one Befunge instruction in normal mode.
    fn dispatch(&mut self, token: &str) -> Result<(), ShellError> {
        let mut chars = token.chars();
        let instruction = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => return self.unknown_command(token),
        };

        match instruction {
            '+' => self.calculate(BinOp::Add)?,
            '-' => self.calculate(BinOp::Sub)?,
            '*' => self.calculate(BinOp::Mul)?,
            '/' => self.calculate(BinOp::Div)?,
            '%' => self.calculate(BinOp::Mod)?,
            '`' => self.calculate(BinOp::Greater)?,
            '!' => {
                let value = self.stack.pop_or_zero();
                self.stack.push(i64::from(value == 0));
            }
            '>' => self.pc = Direction::Right,
            '<' => self.pc = Direction::Left,
            '^' => self.pc = Direction::Up,
            'v' => self.pc = Direction::Down,
            '?' => {
                self.pc = Direction::ALL
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(Direction::Right);
            }
            '_' => {
                self.pc = if self.stack.pop_or_zero() == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
            }
            '|' => {
                self.pc = if self.stack.pop_or_zero() == 0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
            }
            '"' => self.string_mode = true,
            ':' => self.stack.duplicate_top(),
            // Swap is deliberately unguarded: underflow ends the session.
            '\\' => self.stack.swap_top()?,
            '$' => {
                self.stack.pop_or_zero();
            }
            '.' => {
                let value = self.stack.pop_or_zero();
                writeln!(self.out, "{value}")?;
            }
            ',' => {
                let value = self.stack.pop_or_zero();
                match u32::try_from(value).ok().and_then(char::from_u32) {
                    Some(ch) => writeln!(self.out, "{ch}")?,
                    None => writeln!(self.out, "Error: {value} is not a valid character")?,
                }
            }
            '&' => {
                if let Some(number) = self.read_number("Enter a number please: ")? {
                    self.stack.push(number);
                }
            }
            '~' => {
                let reply = self.input("Enter one character please: ")?;
                let ch = reply.chars().next().unwrap_or('\n');
                self.stack.push(ch as i64);
            }
            '@' => writeln!(self.out, "Imagine your script would end now ;-)")?,
            '#' | 'g' | 'p' => {
                writeln!(self.out, "Note: The commands #, g, p are not supported.")?;
            }
            _ => self.unknown_command(token)?,
        }
        Ok(())
    }

    /// Pop a (top) and b, push `op(b, a)`. With fewer than two values on
    /// the stack this is a silent no-op.
    fn calculate(&mut self, op: BinOp) -> Result<(), ShellError> {
        if self.stack.len() < 2 {
            return Ok(());
        }
        let a = self.stack.pop()?;
        let b = self.stack.pop()?;
        let result = match op {
            BinOp::Add => b.wrapping_add(a),
            BinOp::Sub => b.wrapping_sub(a),
            BinOp::Mul => b.wrapping_mul(a),
            BinOp::Div | BinOp::Mod if a == 0 => {
                writeln!(self.out, "Cannot divide {b} by zero; you pick the result.")?;
                self.read_number("Enter a number please: ")?.unwrap_or(0)
            }
            BinOp::Div => floor_div(b, a),
            BinOp::Mod => floor_mod(b, a),
            BinOp::Greater => i64::from(b > a),
        };
        self.stack.push(result);
        Ok(())
    }

    fn unknown_command(&mut self, token: &str) -> Result<(), ShellError> {
        writeln!(self.out, "Error: unknown command '{token}'")?;
        Ok(())
    }

    fn help(&mut self, arg: &str) -> Result<(), ShellError> {
        if arg.is_empty() {
            help::write_listing(&mut self.out, self.ruler, self.subruler)?;
        } else if let Some(text) = help::instruction_help(arg) {
            writeln!(self.out, "{text}")?;
        } else if let Some(text) = help::helper_help(arg) {
            writeln!(self.out, "{text}")?;
        }
        // Unrecognized help arguments fail silently.
        Ok(())
    }

    /// Write `prompt` without a newline and read one reply line. End of
    /// input counts as an empty reply.
    fn input(&mut self, prompt: &str) -> Result<String, ShellError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let reply = self.source.read_reply()?.unwrap_or_default();
        Ok(reply.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompt for a base-10 integer; parse failures are reported and yield
    /// `None` so the caller can skip the push.
    fn read_number(&mut self, prompt: &str) -> Result<Option<i64>, ShellError> {
        let reply = self.input(prompt)?;
        match reply.trim().parse::<i64>() {
            Ok(number) => Ok(Some(number)),
            Err(_) => {
                writeln!(self.out, "Error: You should have entered an integer!")?;
                Ok(None)
            }
        }
    }
}

/// Division rounded toward negative infinity, as Befunge expects.
fn floor_div(b: i64, a: i64) -> i64 {
    let quotient = b.wrapping_div(a);
    if b.wrapping_rem(a) != 0 && (b < 0) != (a < 0) {
        quotient - 1
    } else {
        quotient
    }
}

/// Remainder matching [`floor_div`]: the result takes the divisor's sign.
fn floor_mod(b: i64, a: i64) -> i64 {
    b.wrapping_sub(floor_div(b, a).wrapping_mul(a))
}
