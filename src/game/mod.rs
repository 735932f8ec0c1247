//! # Game Module
//!
//! Core game state: the direction catalog, the location graph, the house that
//! owns it, opponents, the session controller, and saved game snapshots.
//!
//! This module contains the fundamental building blocks of the game:
//! - Directions and their opposites
//! - Locations, hiding places, and the house graph
//! - The game controller state machine
//! - Saved game persistence and validation

pub mod controller;
pub mod house;
pub mod location;
pub mod opponent;
pub mod saved_game;

pub use controller::*;
pub use house::*;
pub use location::*;
pub use opponent::*;
pub use saved_game::*;

use crate::HideError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Directions an exit can lead in.
///
/// Serialized by full name (`"North"`, `"Up"`, ...), which is also the key
/// format of `ExitsForSerialization` in house layout documents.
///
/// # Examples
///
/// ```
/// use hide_and_seek::Direction;
///
/// assert_eq!(Direction::Northeast.opposite(), Direction::Southwest);
/// assert_eq!(Direction::East.phrase(), "to the East");
/// assert_eq!(Direction::Up.phrase(), "Up");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    South,
    East,
    West,
    Northeast,
    Southwest,
    Southeast,
    Northwest,
    Up,
    Down,
    In,
    Out,
}

impl Direction {
    /// Returns all 12 directions.
    pub fn all() -> [Direction; 12] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Southwest,
            Direction::Southeast,
            Direction::Northwest,
            Direction::Up,
            Direction::Down,
            Direction::In,
            Direction::Out,
        ]
    }

    /// Returns the direction pointing back the way this one came.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Northeast => Direction::Southwest,
            Direction::Southwest => Direction::Northeast,
            Direction::Southeast => Direction::Northwest,
            Direction::Northwest => Direction::Southeast,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }

    /// Canonical full name.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Northeast => "Northeast",
            Direction::Southwest => "Southwest",
            Direction::Southeast => "Southeast",
            Direction::Northwest => "Northwest",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::In => "In",
            Direction::Out => "Out",
        }
    }

    /// One or two letter abbreviation accepted by [`Direction::try_parse`].
    pub fn shorthand(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::Northeast => "NE",
            Direction::Southwest => "SW",
            Direction::Southeast => "SE",
            Direction::Northwest => "NW",
            Direction::Up => "U",
            Direction::Down => "D",
            Direction::In => "I",
            Direction::Out => "O",
        }
    }

    /// True for the four non-compass directions (Up, Down, In, Out).
    pub fn is_vertical_or_in_out(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Down | Direction::In | Direction::Out
        )
    }

    /// Human readable description of where the direction leads: "to the North"
    /// for compass directions, the bare name otherwise.
    pub fn phrase(self) -> String {
        if self.is_vertical_or_in_out() {
            self.name().to_string()
        } else {
            format!("to the {}", self.name())
        }
    }

    /// Parses a full name or shorthand, ignoring case and surrounding whitespace.
    ///
    /// Returns None for empty, whitespace-only, or unrecognized text.
    ///
    /// # Examples
    ///
    /// ```
    /// use hide_and_seek::Direction;
    ///
    /// assert_eq!(Direction::try_parse("northwest"), Some(Direction::Northwest));
    /// assert_eq!(Direction::try_parse("Nw"), Some(Direction::Northwest));
    /// assert_eq!(Direction::try_parse("sideways"), None);
    /// ```
    pub fn try_parse(text: &str) -> Option<Direction> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Direction::all().into_iter().find(|direction| {
            direction.name().eq_ignore_ascii_case(text)
                || direction.shorthand().eq_ignore_ascii_case(text)
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = HideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::try_parse(s).ok_or_else(|| HideError::InvalidDirection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::all() {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_opposite_pairs() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::Southeast.opposite(), Direction::Northwest);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::In.opposite(), Direction::Out);
    }

    #[test]
    fn test_phrases() {
        assert_eq!(Direction::North.phrase(), "to the North");
        assert_eq!(Direction::Southwest.phrase(), "to the Southwest");
        assert_eq!(Direction::Down.phrase(), "Down");
        assert_eq!(Direction::In.phrase(), "In");
        assert_eq!(Direction::Out.phrase(), "Out");
    }

    #[test]
    fn test_parse_full_names_and_shorthand() {
        assert_eq!(Direction::try_parse("North"), Some(Direction::North));
        assert_eq!(Direction::try_parse("SOUTHEAST"), Some(Direction::Southeast));
        assert_eq!(Direction::try_parse("  up "), Some(Direction::Up));
        assert_eq!(Direction::try_parse("sw"), Some(Direction::Southwest));
        assert_eq!(Direction::try_parse("o"), Some(Direction::Out));
        assert_eq!(Direction::try_parse("i"), Some(Direction::In));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Direction::try_parse(""), None);
        assert_eq!(Direction::try_parse("   "), None);
        assert_eq!(Direction::try_parse("Nort"), None);
        assert_eq!(Direction::try_parse("x"), None);

        let err = "upward".parse::<Direction>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "That's not a valid direction");
    }

    #[test]
    fn test_default_is_north() {
        assert_eq!(Direction::default(), Direction::North);
    }

    #[test]
    fn test_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Direction::Northwest).unwrap(), "\"Northwest\"");
        let parsed: Direction = serde_json::from_str("\"In\"").unwrap();
        assert_eq!(parsed, Direction::In);
        assert!(serde_json::from_str::<Direction>("\"Sideways\"").is_err());
    }
}
