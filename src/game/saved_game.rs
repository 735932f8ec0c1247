//! # Saved Games
//!
//! A serializable snapshot of a session. Opponents and locations are stored by
//! name and re-resolved against the house when the snapshot is loaded.
//!
//! Loading applies three tiers of checks, stopping at the first failure:
//!
//! 1. structural: the document parses ([`SavedGame::from_json`])
//! 2. field-level: values are usable and resolve in the referenced house ([`SavedGame::validate_with`])
//! 3. cross-reference: the player's location exists, checked by
//!    [`GameController::load_saved_game`](crate::GameController::load_saved_game)

use crate::utils::files::validate_file_name;
use crate::{config, FileSystem, HideError, HideResult, House};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Snapshot of a game session.
///
/// Field order matches the document layout:
/// `{"HouseFileName":…,"PlayerLocation":…,"MoveNumber":…,"OpponentsAndHidingLocations":{…},"FoundOpponents":[…]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SavedGame {
    /// House layout the game was played in
    pub house_file_name: String,
    /// Name of the location the player is in
    pub player_location: String,
    /// Move number shown in the prompt; must be positive
    pub move_number: i64,
    /// Every opponent and where they hid, in hiding order
    #[serde(with = "crate::utils::ordered_map")]
    pub opponents_and_hiding_locations: Vec<(String, String)>,
    /// Opponents found so far, in the order they were found
    pub found_opponents: Vec<String>,
}

impl SavedGame {
    /// Parses a saved game document. Missing fields and wrong types are
    /// reported as [`HideError::Malformed`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hide_and_seek::{ErrorKind, SavedGame};
    ///
    /// let err = SavedGame::from_json(r#"{"HouseFileName":"DefaultHouse"}"#).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::MalformedData);
    /// ```
    pub fn from_json(json: &str) -> HideResult<Self> {
        serde_json::from_str(json).map_err(|e| HideError::Malformed(e.to_string()))
    }

    /// Serializes the snapshot as compact JSON in canonical field order.
    pub fn to_json(&self) -> HideResult<String> {
        serde_json::to_string(self).map_err(|e| HideError::Malformed(e.to_string()))
    }

    /// Runs the field-level checks, loading the referenced house from `files`.
    pub fn validate(&self, files: &dyn FileSystem) -> HideResult<House> {
        self.validate_with(|name| House::load(files, name))
    }

    /// Runs the field-level checks, obtaining the referenced house from
    /// `resolve_house`. Returns the resolved house on success.
    ///
    /// The house is resolved first so that a broken house reference is
    /// reported before anything that depends on it.
    pub fn validate_with<F>(&self, resolve_house: F) -> HideResult<House>
    where
        F: FnOnce(&str) -> HideResult<House>,
    {
        validate_file_name(&self.house_file_name)?;
        let house = resolve_house(&self.house_file_name)?;

        if self.move_number <= 0 {
            return Err(HideError::InvalidData(format!(
                "MoveNumber must be positive (was {})",
                self.move_number
            )));
        }

        if self.opponents_and_hiding_locations.is_empty() {
            return Err(HideError::InvalidData(
                "No opponents are stored in OpponentsAndHidingLocations".to_string(),
            ));
        }

        if self.opponents_and_hiding_locations.len() as i64 > config::MAX_OPPONENTS {
            return Err(HideError::InvalidData(format!(
                "OpponentsAndHidingLocations holds {} opponents (at most {} are allowed)",
                self.opponents_and_hiding_locations.len(),
                config::MAX_OPPONENTS
            )));
        }

        let mut opponents = HashSet::new();
        for (opponent, location) in &self.opponents_and_hiding_locations {
            if opponent.trim().is_empty() {
                return Err(HideError::BlankValue("Opponent name".to_string()));
            }
            if !opponents.insert(opponent.as_str()) {
                return Err(HideError::DuplicateOpponent(opponent.clone()));
            }
            house.location_with_hiding_place(location)?;
        }

        let mut found = HashSet::new();
        for opponent in &self.found_opponents {
            if !opponents.contains(opponent.as_str()) {
                return Err(HideError::InvalidData(format!(
                    "Found opponent \"{}\" is not an opponent",
                    opponent
                )));
            }
            if !found.insert(opponent.as_str()) {
                return Err(HideError::InvalidData(format!(
                    "Found opponent \"{}\" is listed more than once",
                    opponent
                )));
            }
        }

        Ok(house)
    }
}
