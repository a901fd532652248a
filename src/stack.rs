//! The operand stack of the shell.
//!
//! Befunge cells are plain signed integers, so the stack is a thin wrapper
//! around `Vec<i64>` exposing only the operations the interpreter needs.
//! Every user-facing pop goes through [`Stack::pop_or_zero`] so that a
//! malformed session never crashes the shell; [`Stack::swap_top`] is the one
//! operation that reports underflow to the caller instead.

use thiserror::Error;

/// Errors raised by stack operations that require a minimum depth.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// Fewer values were present than the operation needed.
    #[error("stack underflow: needed {needed} value(s), found {found}")]
    Underflow { needed: usize, found: usize },
}

/// An ordered sequence of signed integers with Befunge stack semantics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stack(Vec<i64>);

impl Stack {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The stack contents, bottom first.
    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn push(&mut self, value: i64) {
        self.0.push(value);
    }

    /// Remove and return the top value. Underflows on an empty stack; used
    /// only where emptiness is a programmer error.
    pub fn pop(&mut self) -> Result<i64, StackError> {
        self.0.pop().ok_or(StackError::Underflow {
            needed: 1,
            found: 0,
        })
    }

    /// Remove and return the top value, or 0 if the stack is empty.
    pub fn pop_or_zero(&mut self) -> i64 {
        self.0.pop().unwrap_or(0)
    }

    /// Push a copy of the top value, or 0 if the stack is empty.
    pub fn duplicate_top(&mut self) {
        let top = self.0.last().copied().unwrap_or(0);
        self.0.push(top);
    }

    /// Exchange the two topmost values. Underflows if fewer than 2 exist.
    pub fn swap_top(&mut self) -> Result<(), StackError> {
        let len = self.0.len();
        if len < 2 {
            return Err(StackError::Underflow {
                needed: 2,
                found: len,
            });
        }
        self.0.swap(len - 1, len - 2);
        Ok(())
    }
}

impl From<Vec<i64>> for Stack {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}
