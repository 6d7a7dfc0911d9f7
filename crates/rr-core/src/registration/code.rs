//! Four-digit SMS verification code entry.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

pub const CODE_LEN: usize = 4;

/// Digit slots plus the slot that currently holds focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    digits: [Option<char>; CODE_LEN],
    focus: usize,
}

impl VerificationCode {
    /// Builds an entry from one text per slot, as if typed left to right.
    pub fn from_entries<S: AsRef<str>>(entries: &[S; CODE_LEN]) -> Self {
        let mut code = Self::default();
        for (index, text) in entries.iter().enumerate() {
            code.type_text(index, text.as_ref());
        }
        code
    }

    pub fn digits(&self) -> &[Option<char>; CODE_LEN] {
        &self.digits
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Applies typed text to slot `index`.
    ///
    /// A single digit fills the slot and advances focus. Empty text clears
    /// the slot. Anything else is ignored.
    pub fn type_text(&mut self, index: usize, text: &str) {
        if index >= CODE_LEN {
            return;
        }
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => {
                self.digits[index] = Some(c);
                self.focus = if index < CODE_LEN - 1 { index + 1 } else { index };
            }
            (None, _) => {
                self.digits[index] = None;
                self.focus = index;
            }
            _ => {}
        }
    }

    /// Backspace on slot `index`: clears a filled slot, or moves focus back
    /// when the slot is already empty.
    pub fn erase(&mut self, index: usize) {
        if index >= CODE_LEN {
            return;
        }
        if self.digits[index].is_some() {
            self.digits[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
    }

    pub fn joined(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    /// Compares the entry with the code issued by the server.
    pub fn check(&self, expected: &str) -> Result<String, ValidationError> {
        if !self.is_complete() {
            return Err(ValidationError::CodeFormat);
        }
        let joined = self.joined();
        if joined != expected.trim() {
            return Err(ValidationError::Mismatch);
        }
        Ok(joined)
    }
}
