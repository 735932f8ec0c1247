//! # House
//!
//! The aggregate that owns every location in a game layout. Locations live in
//! a flat collection with a name index, and exits are resolved by name, so the
//! graph can contain cycles without any shared ownership.
//!
//! Layouts are persisted as `<HouseFileName>.house.json` documents. Loading a
//! layout runs three checks in order, each reported with its own error layer:
//!
//! 1. the document parses into the expected shape ([`HideError::Corrupt`] around [`HideError::Malformed`])
//! 2. required text fields are present and not blank ([`HideError::Invalid`])
//! 3. every exit target and the starting point name an existing location ([`HideError::Corrupt`])

use crate::utils::files::{
    file_stems_with_suffix, house_file_path, json_file_path, validate_file_name,
};
use crate::{
    config, Direction, FileSystem, HideError, HideResult, HidingLocationRecord, Location,
    LocationRecord, Opponent, RandomSource,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Serialized form of a house, as stored in a `.house.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HouseLayout {
    pub name: String,
    pub house_file_name: String,
    pub player_starting_point: String,
    pub locations_without_hiding_places: Vec<LocationRecord>,
    pub locations_with_hiding_places: Vec<HidingLocationRecord>,
}

impl HouseLayout {
    /// Parses a layout document. Any syntax or type error is reported as
    /// [`HideError::Malformed`].
    pub fn from_json(json: &str) -> HideResult<Self> {
        serde_json::from_str(json).map_err(|e| HideError::Malformed(e.to_string()))
    }

    /// Serializes the layout as compact JSON.
    pub fn to_json(&self) -> HideResult<String> {
        serde_json::to_string(self).map_err(|e| HideError::Malformed(e.to_string()))
    }
}

/// The location graph for one game layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    name: String,
    file_name: String,
    start: usize,
    locations: Vec<Location>,
    index: HashMap<String, usize>,
}

impl House {
    /// Creates a house containing only its starting location.
    ///
    /// # Examples
    ///
    /// ```
    /// use hide_and_seek::{Direction, House, Location};
    ///
    /// let mut house = House::new("test house", "TestHouse", Location::new("Entry").unwrap()).unwrap();
    /// house.add_exit_to_new("Entry", Direction::East, "Hallway", None).unwrap();
    /// house.add_exit_to_new("Hallway", Direction::Up, "Attic", Some("in a trunk")).unwrap();
    ///
    /// assert_eq!(house.exit("Hallway", Direction::West).unwrap().name(), "Entry");
    /// assert!(house.does_location_with_hiding_place_exist("Attic"));
    /// ```
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        starting_point: Location,
    ) -> HideResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HideError::BlankValue("House name".to_string()));
        }
        let file_name = file_name.into();
        validate_file_name(&file_name)?;

        let mut index = HashMap::new();
        index.insert(starting_point.name().to_string(), 0);
        Ok(Self {
            name,
            file_name,
            start: 0,
            locations: vec![starting_point],
            index,
        })
    }

    /// Builds the classic layout used when no house file is given.
    pub fn default_house() -> HideResult<Self> {
        let mut house = House::new(
            "my house",
            config::DEFAULT_HOUSE_FILE_NAME,
            Location::new("Entry")?,
        )?;

        house.add_exit_to_new("Entry", Direction::Out, "Garage", Some("behind the car"))?;
        house.add_exit_to_new("Entry", Direction::East, "Hallway", None)?;
        house.add_exit_to_new("Hallway", Direction::Northwest, "Kitchen", Some("next to the stove"))?;
        house.add_exit_to_new("Hallway", Direction::North, "Bathroom", Some("behind the door"))?;
        house.add_exit_to_new("Hallway", Direction::South, "Living Room", Some("behind the sofa"))?;
        house.add_exit_to_new("Hallway", Direction::Up, "Landing", None)?;
        house.add_exit_to_new("Landing", Direction::Northwest, "Master Bedroom", Some("in the closet"))?;
        house.add_exit_to_new("Master Bedroom", Direction::East, "Master Bath", Some("in the bathtub"))?;
        house.add_exit_to_new("Landing", Direction::Southwest, "Nursery", Some("behind the changing table"))?;
        house.add_exit_to_new("Landing", Direction::South, "Pantry", Some("inside a cabinet"))?;
        house.add_exit_to_new("Landing", Direction::Southeast, "Kids Room", Some("in the bunk beds"))?;
        house.add_exit_to_new("Landing", Direction::North, "Second Bathroom", Some("in the shower"))?;
        house.add_exit_to_new("Landing", Direction::Up, "Attic", Some("in a trunk"))?;

        Ok(house)
    }

    /// Display name of the house.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used to persist the house and to reference it from saved games.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Where the player starts every game.
    pub fn starting_point(&self) -> &Location {
        &self.locations[self.start]
    }

    /// All locations, in the order they were added.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Locations without a hiding place, in the order they were added.
    pub fn locations_without_hiding_places(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| !l.has_hiding_place())
    }

    /// Locations with a hiding place, in the order they were added.
    pub fn locations_with_hiding_places(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.has_hiding_place())
    }

    /// Adds a location. Its exits may name locations that are added later;
    /// [`House::verify_references`] checks them once the graph is complete.
    pub fn add_location(&mut self, location: Location) -> HideResult<()> {
        if self.index.contains_key(location.name()) {
            return Err(HideError::DuplicateLocation(location.name().to_string()));
        }
        self.index
            .insert(location.name().to_string(), self.locations.len());
        self.locations.push(location);
        Ok(())
    }

    /// Adds a one-way exit between two existing locations.
    pub fn add_exit(&mut self, from: &str, direction: Direction, to: &str) -> HideResult<()> {
        if !self.does_location_exist(to) {
            return Err(HideError::LocationNotFound(to.to_string()));
        }
        self.location_mut(from)?.add_exit(direction, to);
        Ok(())
    }

    /// Creates a new location, links `from` to it via `direction` and links it
    /// back via the opposite direction. Supplying `hiding_place` makes the new
    /// location a hiding place.
    pub fn add_exit_to_new(
        &mut self,
        from: &str,
        direction: Direction,
        name: &str,
        hiding_place: Option<&str>,
    ) -> HideResult<&Location> {
        if !self.does_location_exist(from) {
            return Err(HideError::LocationNotFound(from.to_string()));
        }
        let mut location = match hiding_place {
            Some(place) => Location::with_hiding_place(name, place)?,
            None => Location::new(name)?,
        };
        location.add_exit(direction.opposite(), from);
        self.add_location(location)?;
        self.location_mut(from)?.add_exit(direction, name);
        self.location(name)
    }

    /// Looks up a location by exact, case-sensitive name.
    pub fn location(&self, name: &str) -> HideResult<&Location> {
        self.index
            .get(name)
            .map(|&i| &self.locations[i])
            .ok_or_else(|| HideError::LocationNotFound(name.to_string()))
    }

    /// Looks up a location that has a hiding place.
    pub fn location_with_hiding_place(&self, name: &str) -> HideResult<&Location> {
        match self.location(name) {
            Ok(location) if location.has_hiding_place() => Ok(location),
            _ => Err(HideError::HidingLocationNotFound(name.to_string())),
        }
    }

    /// Returns true if a location with this name is part of the house.
    pub fn does_location_exist(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns true if the named location exists and has a hiding place.
    pub fn does_location_with_hiding_place_exist(&self, name: &str) -> bool {
        self.location_with_hiding_place(name).is_ok()
    }

    /// Position of the named location in [`House::locations`].
    pub fn index_of(&self, name: &str) -> HideResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| HideError::LocationNotFound(name.to_string()))
    }

    fn location_mut(&mut self, name: &str) -> HideResult<&mut Location> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.locations[i]),
            None => Err(HideError::LocationNotFound(name.to_string())),
        }
    }

    /// Follows the exit from `from` in `direction`.
    pub fn exit(&self, from: &str, direction: Direction) -> HideResult<&Location> {
        let location = self.location(from)?;
        let target = location.exit(direction).ok_or_else(|| HideError::NoExit {
            location: from.to_string(),
            direction,
        })?;
        self.location(target)
    }

    /// Picks one exit of `from`: draws an index in `[0, exit count)` and
    /// returns the exit at that position in display order.
    pub fn random_exit(
        &self,
        from: &str,
        random: &mut dyn RandomSource,
    ) -> HideResult<&Location> {
        let location = self.location(from)?;
        let exits = location.exits();
        if exits.is_empty() {
            return Err(HideError::NoExits(from.to_string()));
        }
        let (_, target) = pick(exits, random)?;
        self.location(target)
    }

    /// Picks one location with a hiding place, in insertion order.
    pub fn random_location_with_hiding_place(
        &self,
        random: &mut dyn RandomSource,
    ) -> HideResult<&Location> {
        let candidates: Vec<&Location> = self.locations_with_hiding_places().collect();
        if candidates.is_empty() {
            return Err(HideError::NoHidingLocations(self.name.clone()));
        }
        pick(&candidates, random).copied()
    }

    /// Hides an opponent at the named hiding place.
    pub fn hide_opponent(&mut self, location: &str, opponent: Opponent) -> HideResult<()> {
        self.location_with_hiding_place(location)?;
        self.location_mut(location)?.hide_opponent(opponent)
    }

    /// Drains the named location's hiding place.
    pub fn check_hiding_place(&mut self, location: &str) -> HideResult<Vec<Opponent>> {
        self.location_mut(location)?.check_hiding_place()
    }

    /// Empties every hiding place in the house.
    pub fn clear_hiding_places(&mut self) {
        for location in &mut self.locations {
            location.clear_hiding_place();
        }
    }

    /// Checks that every exit leads to a location in this house.
    pub fn verify_references(&self) -> HideResult<()> {
        for location in &self.locations {
            for (_, target) in location.exits() {
                if !self.does_location_exist(target) {
                    return Err(HideError::LocationNotFound(target.clone()));
                }
            }
        }
        Ok(())
    }

    /// Builds a house from a parsed layout, running the field and reference checks.
    pub fn from_layout(layout: &HouseLayout) -> HideResult<Self> {
        Self::build(layout, &format!("house layout {}", layout.house_file_name))
    }

    fn build(layout: &HouseLayout, resource: &str) -> HideResult<Self> {
        let locations = Self::build_locations(layout).map_err(|e| e.invalid_in(resource))?;
        Self::link(layout, locations).map_err(|e| e.corrupt_in(resource))
    }

    fn build_locations(layout: &HouseLayout) -> HideResult<Vec<Location>> {
        for (field, value) in [
            ("Name", &layout.name),
            ("HouseFileName", &layout.house_file_name),
            ("PlayerStartingPoint", &layout.player_starting_point),
        ] {
            if value.trim().is_empty() {
                return Err(HideError::BlankValue(field.to_string()));
            }
        }
        validate_file_name(&layout.house_file_name)?;

        let mut locations = Vec::new();
        for record in &layout.locations_without_hiding_places {
            locations.push(record.to_location()?);
        }
        for record in &layout.locations_with_hiding_places {
            locations.push(record.to_location()?);
        }

        let mut seen = HashSet::new();
        for location in &locations {
            if !seen.insert(location.name()) {
                return Err(HideError::DuplicateLocation(location.name().to_string()));
            }
        }
        Ok(locations)
    }

    fn link(layout: &HouseLayout, locations: Vec<Location>) -> HideResult<Self> {
        let index: HashMap<String, usize> = locations
            .iter()
            .enumerate()
            .map(|(i, location)| (location.name().to_string(), i))
            .collect();
        let start = *index
            .get(&layout.player_starting_point)
            .ok_or_else(|| HideError::LocationNotFound(layout.player_starting_point.clone()))?;

        let house = Self {
            name: layout.name.clone(),
            file_name: layout.house_file_name.clone(),
            start,
            locations,
            index,
        };
        house.verify_references()?;
        Ok(house)
    }

    /// Serialized form of this house.
    pub fn to_layout(&self) -> HouseLayout {
        HouseLayout {
            name: self.name.clone(),
            house_file_name: self.file_name.clone(),
            player_starting_point: self.starting_point().name().to_string(),
            locations_without_hiding_places: self
                .locations_without_hiding_places()
                .map(Location::record)
                .collect(),
            locations_with_hiding_places: self
                .locations_with_hiding_places()
                .filter_map(Location::hiding_record)
                .collect(),
        }
    }

    /// Loads `<file_name>.house.json`, falling back to `<file_name>.json`.
    pub fn load(files: &dyn FileSystem, file_name: &str) -> HideResult<Self> {
        validate_file_name(file_name)?;

        let path = Self::layout_path(files, file_name)?;
        let resource = format!("house layout file {}", path.display());
        let json = files.read_to_string(&path)?;
        let mut house = HouseLayout::from_json(&json)
            .map_err(|e| e.corrupt_in(&resource))
            .and_then(|layout| Self::build(&layout, &resource))
            .map_err(|e| {
                warn!("Rejected house layout {}: {}", path.display(), e);
                e
            })?;

        if house.file_name != file_name {
            debug!(
                "House file {} declares HouseFileName {}, using {}",
                path.display(),
                house.file_name,
                file_name
            );
            house.file_name = file_name.to_string();
        }

        info!(
            "Loaded house \"{}\" from {} ({} locations)",
            house.name,
            path.display(),
            house.locations.len()
        );
        Ok(house)
    }

    fn layout_path(files: &dyn FileSystem, file_name: &str) -> HideResult<PathBuf> {
        let house_path = house_file_path(file_name);
        if files.exists(&house_path) {
            return Ok(house_path);
        }
        let json_path = json_file_path(file_name);
        if files.exists(&json_path) {
            return Ok(json_path);
        }
        Err(HideError::FileNotFound(house_path.display().to_string()))
    }

    /// Writes this house to `<file_name>.house.json`, replacing any existing file.
    pub fn save(&self, files: &dyn FileSystem) -> HideResult<()> {
        let path = house_file_path(&self.file_name);
        files.write(&path, &self.to_layout().to_json()?)?;
        info!("Saved house \"{}\" to {}", self.name, path.display());
        Ok(())
    }

    /// Names (without suffix) of every house layout in `dir`, or in the file
    /// system's default directory when `dir` is None.
    pub fn house_file_names(
        files: &dyn FileSystem,
        dir: Option<&Path>,
    ) -> HideResult<Vec<String>> {
        let dir = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| files.default_directory());
        file_stems_with_suffix(files, &dir, config::HOUSE_FILE_SUFFIX)
    }
}

/// Draws one item of `items`, which must not be empty.
fn pick<'a, T>(items: &'a [T], random: &mut dyn RandomSource) -> HideResult<&'a T> {
    let value = random.next(items.len());
    items.get(value).ok_or(HideError::RandomOutOfRange {
        value,
        bound: items.len(),
    })
}
