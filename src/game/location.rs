//! # Locations
//!
//! Nodes of the house graph. A location's exits name their targets instead of
//! owning them; the [`House`](crate::House) resolves names against its own
//! collection, which keeps the cyclic graph free of owning references.

use crate::{Direction, HideError, HideResult, Opponent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Somewhere opponents can hide, along with whoever is hiding there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidingPlace {
    description: String,
    concealed: Vec<Opponent>,
}

impl HidingPlace {
    /// Creates an empty hiding place. The description cannot be blank.
    pub fn new(description: impl Into<String>) -> HideResult<Self> {
        let description = validate_text("Hiding place", description.into())?;
        Ok(Self {
            description,
            concealed: Vec::new(),
        })
    }

    /// Text such as "under the bed".
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description, rejecting blank text.
    pub fn set_description(&mut self, description: impl Into<String>) -> HideResult<()> {
        self.description = validate_text("Hiding place", description.into())?;
        Ok(())
    }

    /// Number of opponents currently hidden here.
    pub fn concealed_count(&self) -> usize {
        self.concealed.len()
    }

    fn hide(&mut self, opponent: Opponent) {
        self.concealed.push(opponent);
    }

    fn drain(&mut self) -> Vec<Opponent> {
        std::mem::take(&mut self.concealed)
    }
}

/// A named node in the house graph.
///
/// # Examples
///
/// ```
/// use hide_and_seek::{Direction, Location};
///
/// let mut entry = Location::new("Entry").unwrap();
/// entry.add_exit(Direction::East, "Hallway");
/// assert_eq!(entry.exit(Direction::East), Some("Hallway"));
/// assert_eq!(entry.exit(Direction::West), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    name: String,
    exits: Vec<(Direction, String)>,
    hiding_place: Option<HidingPlace>,
}

impl Location {
    /// Creates a location without a hiding place.
    pub fn new(name: impl Into<String>) -> HideResult<Self> {
        Ok(Self {
            name: validate_text("Location name", name.into())?,
            exits: Vec::new(),
            hiding_place: None,
        })
    }

    /// Creates a location with an empty hiding place.
    pub fn with_hiding_place(
        name: impl Into<String>,
        hiding_place: impl Into<String>,
    ) -> HideResult<Self> {
        let mut location = Self::new(name)?;
        location.hiding_place = Some(HidingPlace::new(hiding_place)?);
        Ok(location)
    }

    /// Unique name within the house.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The hiding place, if this location has one.
    pub fn hiding_place(&self) -> Option<&HidingPlace> {
        self.hiding_place.as_ref()
    }

    /// Returns true if someone could hide here.
    pub fn has_hiding_place(&self) -> bool {
        self.hiding_place.is_some()
    }

    /// Replaces the hiding place description. Fails if this location has no
    /// hiding place or the text is blank.
    pub fn set_hiding_place(&mut self, description: impl Into<String>) -> HideResult<()> {
        match self.hiding_place.as_mut() {
            Some(place) => place.set_description(description),
            None => Err(HideError::NoHidingPlace(self.name.clone())),
        }
    }

    /// Records a one-way exit. An existing exit in the same direction is
    /// retargeted in place so display order is kept.
    pub fn add_exit(&mut self, direction: Direction, target: impl Into<String>) {
        let target = target.into();
        match self.exits.iter_mut().find(|(d, _)| *d == direction) {
            Some(exit) => exit.1 = target,
            None => self.exits.push((direction, target)),
        }
    }

    /// Name of the location reached by going `direction`, if there is an exit.
    pub fn exit(&self, direction: Direction) -> Option<&str> {
        self.exits
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|(_, target)| target.as_str())
    }

    /// Exits in the order they were added.
    pub fn exits(&self) -> &[(Direction, String)] {
        &self.exits
    }

    /// One line per exit, e.g. " - the Hallway is to the East".
    pub fn exit_list(&self) -> Vec<String> {
        self.exits
            .iter()
            .map(|(direction, target)| format!(" - the {} is {}", target, direction.phrase()))
            .collect()
    }

    /// Hides an opponent here. Only valid for locations with a hiding place.
    pub fn hide_opponent(&mut self, opponent: Opponent) -> HideResult<()> {
        match self.hiding_place.as_mut() {
            Some(place) => {
                place.hide(opponent);
                Ok(())
            }
            None => Err(HideError::NoHidingPlace(self.name.clone())),
        }
    }

    /// Removes and returns everyone hidden here, in the order they hid.
    ///
    /// A second call without an intervening [`Location::hide_opponent`]
    /// returns an empty list.
    pub fn check_hiding_place(&mut self) -> HideResult<Vec<Opponent>> {
        match self.hiding_place.as_mut() {
            Some(place) => Ok(place.drain()),
            None => Err(HideError::NoHidingPlace(self.name.clone())),
        }
    }

    /// Sends everyone hidden here home. Does nothing without a hiding place.
    pub(crate) fn clear_hiding_place(&mut self) {
        if let Some(place) = self.hiding_place.as_mut() {
            place.concealed.clear();
        }
    }

    pub(crate) fn record(&self) -> LocationRecord {
        LocationRecord {
            name: self.name.clone(),
            exits_for_serialization: self.exits.clone(),
        }
    }

    pub(crate) fn hiding_record(&self) -> Option<HidingLocationRecord> {
        self.hiding_place.as_ref().map(|place| HidingLocationRecord {
            hiding_place: place.description.clone(),
            name: self.name.clone(),
            exits_for_serialization: self.exits.clone(),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Serialized form of a location without a hiding place.
///
/// Exit targets are stored by name; the house re-links them after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationRecord {
    pub name: String,
    #[serde(with = "crate::utils::ordered_map")]
    pub exits_for_serialization: Vec<(Direction, String)>,
}

/// Serialized form of a location with a hiding place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HidingLocationRecord {
    pub hiding_place: String,
    pub name: String,
    #[serde(with = "crate::utils::ordered_map")]
    pub exits_for_serialization: Vec<(Direction, String)>,
}

impl LocationRecord {
    /// Builds the location, checking that its name is not blank. Exit targets
    /// are not resolved here.
    pub fn to_location(&self) -> HideResult<Location> {
        let mut location = Location::new(self.name.clone())?;
        for (direction, target) in &self.exits_for_serialization {
            location.add_exit(*direction, validate_text("Exit target", target.clone())?);
        }
        Ok(location)
    }
}

impl HidingLocationRecord {
    /// Builds the location, checking that its name and hiding place are not blank.
    pub fn to_location(&self) -> HideResult<Location> {
        let mut location = Location::with_hiding_place(self.name.clone(), self.hiding_place.clone())?;
        for (direction, target) in &self.exits_for_serialization {
            location.add_exit(*direction, validate_text("Exit target", target.clone())?);
        }
        Ok(location)
    }
}

fn validate_text(field: &str, value: String) -> HideResult<String> {
    if value.trim().is_empty() {
        Err(HideError::BlankValue(field.to_string()))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn opponent(name: &str) -> Opponent {
        Opponent::new(name).unwrap()
    }

    #[test]
    fn test_blank_names_rejected() {
        assert_eq!(Location::new("").unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(Location::new("  ").unwrap_err().kind(), ErrorKind::Validation);
        assert!(Location::with_hiding_place("Attic", " ").is_err());
        assert!(Location::with_hiding_place(" ", "in a trunk").is_err());
    }

    #[test]
    fn test_hiding_place_setter_validates() {
        let mut bedroom = Location::with_hiding_place("Bedroom", "under the bed").unwrap();
        bedroom.set_hiding_place("in the closet").unwrap();
        assert_eq!(bedroom.hiding_place().unwrap().description(), "in the closet");

        assert!(bedroom.set_hiding_place("\t").is_err());
        assert_eq!(bedroom.hiding_place().unwrap().description(), "in the closet");

        let mut hallway = Location::new("Hallway").unwrap();
        assert!(matches!(
            hallway.set_hiding_place("behind the plant"),
            Err(HideError::NoHidingPlace(_))
        ));
    }

    #[test]
    fn test_exits_keep_insertion_order() {
        let mut hallway = Location::new("Hallway").unwrap();
        hallway.add_exit(Direction::West, "Entry");
        hallway.add_exit(Direction::Up, "Landing");
        hallway.add_exit(Direction::Northwest, "Kitchen");
        hallway.add_exit(Direction::West, "Front Porch");

        assert_eq!(
            hallway.exit_list(),
            vec![
                " - the Front Porch is to the West".to_string(),
                " - the Landing is Up".to_string(),
                " - the Kitchen is to the Northwest".to_string(),
            ]
        );
    }

    #[test]
    fn test_check_hiding_place_drains_once() {
        let mut bath = Location::with_hiding_place("Master Bath", "in the tub").unwrap();
        bath.hide_opponent(opponent("Joe")).unwrap();
        bath.hide_opponent(opponent("Bob")).unwrap();
        assert_eq!(bath.hiding_place().unwrap().concealed_count(), 2);

        let found = bath.check_hiding_place().unwrap();
        assert_eq!(found, vec![opponent("Joe"), opponent("Bob")]);
        assert!(bath.check_hiding_place().unwrap().is_empty());
    }

    #[test]
    fn test_same_opponent_can_hide_twice() {
        let mut attic = Location::with_hiding_place("Attic", "in a trunk").unwrap();
        attic.hide_opponent(opponent("Ana")).unwrap();
        attic.hide_opponent(opponent("Ana")).unwrap();
        assert_eq!(attic.check_hiding_place().unwrap().len(), 2);
    }

    #[test]
    fn test_plain_location_cannot_hide_or_check() {
        let mut entry = Location::new("Entry").unwrap();
        assert!(matches!(
            entry.hide_opponent(opponent("Joe")),
            Err(HideError::NoHidingPlace(name)) if name == "Entry"
        ));
        assert!(entry.check_hiding_place().is_err());
    }

    #[test]
    fn test_clear_hiding_place() {
        let mut attic = Location::with_hiding_place("Attic", "in a trunk").unwrap();
        attic.hide_opponent(opponent("Ana")).unwrap();
        attic.clear_hiding_place();
        assert_eq!(attic.hiding_place().unwrap().concealed_count(), 0);

        let mut entry = Location::new("Entry").unwrap();
        entry.clear_hiding_place();
        assert!(!entry.has_hiding_place());
    }

    #[test]
    fn test_record_shapes() {
        let mut bedroom = Location::with_hiding_place("Master Bedroom", "under the bed").unwrap();
        bedroom.add_exit(Direction::Southeast, "Landing");
        bedroom.add_exit(Direction::East, "Master Bath");

        let json = serde_json::to_string(&bedroom.hiding_record().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"HidingPlace":"under the bed","Name":"Master Bedroom","ExitsForSerialization":{"Southeast":"Landing","East":"Master Bath"}}"#
        );

        let mut entry = Location::new("Entry").unwrap();
        entry.add_exit(Direction::East, "Hallway");
        assert!(entry.hiding_record().is_none());
        let json = serde_json::to_string(&entry.record()).unwrap();
        assert_eq!(json, r#"{"Name":"Entry","ExitsForSerialization":{"East":"Hallway"}}"#);
    }

    #[test]
    fn test_record_rejects_unknown_direction() {
        let json = r#"{"Name":"Entry","ExitsForSerialization":{"Sideways":"Hallway"}}"#;
        assert!(serde_json::from_str::<LocationRecord>(json).is_err());
    }

    #[test]
    fn test_record_to_location_rejects_blank_target() {
        let record = LocationRecord {
            name: "Entry".to_string(),
            exits_for_serialization: vec![(Direction::East, " ".to_string())],
        };
        assert_eq!(record.to_location().unwrap_err().kind(), ErrorKind::Validation);
    }
}
