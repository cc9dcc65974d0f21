//! Player nickname entry
//!
//! A nickname is captured before the first game and attached to every score
//! record after that.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest nickname accepted, in characters
pub const MAX_NICKNAME_LEN: usize = 12;

/// A trimmed, non-empty name of at most [`MAX_NICKNAME_LEN`] characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    /// Validate `raw`; surrounding whitespace is dropped
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > MAX_NICKNAME_LEN {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Nickname {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Nickname::parse(&value)
            .ok_or_else(|| format!("nickname must be 1-{MAX_NICKNAME_LEN} characters"))
    }
}

impl From<Nickname> for String {
    fn from(value: Nickname) -> Self {
        value.0
    }
}

/// Text buffer behind the nickname prompt
#[derive(Debug, Clone, Default)]
pub struct NicknameEntry {
    buffer: String,
}

impl NicknameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a typed character; ignored once the buffer is full or for
    /// control characters
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() || self.buffer.chars().count() >= MAX_NICKNAME_LEN {
            return false;
        }
        self.buffer.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Finish entry. Returns `None` (keeping the buffer) if it is blank.
    pub fn submit(&self) -> Option<Nickname> {
        Nickname::parse(&self.buffer)
    }
}
