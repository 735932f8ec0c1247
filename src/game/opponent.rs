//! # Opponents
//!
//! The named players hiding in the house, and the counter that names
//! opponents created without an explicit name.

use crate::{config, HideError, HideResult};
use std::fmt;

/// A named opponent. Two opponents are the same opponent if their names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opponent {
    name: String,
}

impl Opponent {
    /// Creates an opponent, rejecting empty or whitespace-only names.
    ///
    /// # Examples
    ///
    /// ```
    /// use hide_and_seek::Opponent;
    ///
    /// let joe = Opponent::new("Joe").unwrap();
    /// assert_eq!(joe.name(), "Joe");
    /// assert!(Opponent::new("   ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> HideResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HideError::BlankValue("Opponent name".to_string()));
        }
        Ok(Self { name })
    }

    /// The opponent's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Hands out "Random Opponent N" names, counting up from 1.
///
/// One namer is normally shared for a whole run so that generated names keep
/// increasing across games; [`OpponentNamer::reset`] starts over at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentNamer {
    next: u32,
}

impl Default for OpponentNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentNamer {
    /// Creates a namer whose first name is "Random Opponent 1".
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates an opponent with the next generated name.
    pub fn next_opponent(&mut self) -> Opponent {
        let opponent = Opponent {
            name: format!("{} {}", config::RANDOM_OPPONENT_PREFIX, self.next),
        };
        self.next += 1;
        opponent
    }

    /// Number that the next generated name will carry.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Restarts numbering at 1.
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_blank_names_rejected() {
        for name in ["", " ", "\t\n"] {
            let err = Opponent::new(name).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_equality_by_name() {
        assert_eq!(Opponent::new("Ana").unwrap(), Opponent::new("Ana").unwrap());
        assert_ne!(Opponent::new("Ana").unwrap(), Opponent::new("ana").unwrap());
    }

    #[test]
    fn test_namer_counts_and_resets() {
        let mut namer = OpponentNamer::new();
        assert_eq!(namer.next_opponent().name(), "Random Opponent 1");
        assert_eq!(namer.next_opponent().name(), "Random Opponent 2");
        assert_eq!(namer.peek(), 3);

        namer.reset();
        assert_eq!(namer.next_opponent().name(), "Random Opponent 1");
    }
}
