//! # Game Controller
//!
//! The session state machine. A [`GameController`] owns the house, the
//! player's position, the move counter and the opponent bookkeeping, and
//! applies one command at a time. Every command either succeeds completely or
//! fails without changing anything.

use crate::utils::files::{file_stems_with_suffix, game_file_path, validate_file_name};
use crate::utils::random::ThreadRandom;
use crate::{
    config, Direction, FileSystem, HideError, HideResult, House, LocalFileSystem, Location,
    Opponent, OpponentNamer, RandomSource, SavedGame,
};
use log::{debug, info, warn};
use std::rc::Rc;

/// The environment a game runs in: where files live and where random numbers
/// come from.
#[derive(Debug)]
pub struct Collaborators {
    /// Storage for house layouts and saved games
    pub files: Rc<dyn FileSystem>,
    /// Source for random exits and hiding places
    pub random: Box<dyn RandomSource>,
}

impl Collaborators {
    /// Bundles a file system and a random source.
    pub fn new(files: Rc<dyn FileSystem>, random: Box<dyn RandomSource>) -> Self {
        Self { files, random }
    }

    /// Files beside the running executable and a thread-local random generator.
    pub fn local() -> HideResult<Self> {
        Ok(Self::new(
            Rc::new(LocalFileSystem::beside_executable()?),
            Box::new(ThreadRandom),
        ))
    }
}

/// One game of hide and seek.
///
/// # Examples
///
/// ```
/// use hide_and_seek::{Collaborators, Direction, GameController, MemoryFileSystem};
/// use hide_and_seek::utils::random::ScriptedRandom;
/// use std::rc::Rc;
///
/// let collaborators = Collaborators::new(
///     Rc::new(MemoryFileSystem::new()),
///     Box::new(ScriptedRandom::constant(0)),
/// );
/// let mut game = GameController::with_default_house(collaborators).unwrap();
///
/// assert_eq!(game.move_number(), 1);
/// assert_eq!(game.move_to(Direction::East).unwrap(), "Moving East");
/// assert_eq!(game.current_location().name(), "Hallway");
/// assert_eq!(game.move_number(), 2);
/// ```
#[derive(Debug)]
pub struct GameController {
    house: House,
    files: Rc<dyn FileSystem>,
    random: Box<dyn RandomSource>,
    current: usize,
    move_number: u64,
    opponents_and_hiding_locations: Vec<(Opponent, String)>,
    found_opponents: Vec<Opponent>,
}

impl GameController {
    /// Starts a game in `house` with the given opponents, each hidden at a
    /// random hiding place.
    pub fn new(
        house: House,
        opponents: Vec<Opponent>,
        collaborators: Collaborators,
    ) -> HideResult<Self> {
        validate_opponent_count(opponents.len() as i64)?;
        for (i, opponent) in opponents.iter().enumerate() {
            if opponents[..i].contains(opponent) {
                return Err(HideError::DuplicateOpponent(opponent.name().to_string()));
            }
        }
        ensure_hiding_places(&house)?;

        let Collaborators { files, random } = collaborators;
        let mut game = Self {
            current: house.index_of(house.starting_point().name())?,
            house,
            files,
            random,
            move_number: 1,
            opponents_and_hiding_locations: opponents
                .into_iter()
                .map(|opponent| (opponent, String::new()))
                .collect(),
            found_opponents: Vec::new(),
        };
        game.hide_all_randomly()?;
        Ok(game)
    }

    /// Starts a game with `count` generated opponents in the named house.
    ///
    /// `count` must be between 1 and 10; it is checked before the house is loaded.
    pub fn with_opponent_count(
        count: i64,
        house_file_name: &str,
        namer: &mut OpponentNamer,
        collaborators: Collaborators,
    ) -> HideResult<Self> {
        validate_opponent_count(count)?;
        let house = open_house(collaborators.files.as_ref(), house_file_name)?;
        let opponents = (0..count).map(|_| namer.next_opponent()).collect();
        Self::new(house, opponents, collaborators)
    }

    /// Starts a game with explicitly named opponents in the named house.
    pub fn with_opponent_names<S: AsRef<str>>(
        names: &[S],
        house_file_name: &str,
        collaborators: Collaborators,
    ) -> HideResult<Self> {
        validate_opponent_count(names.len() as i64)?;
        let opponents = names
            .iter()
            .map(|name| Opponent::new(name.as_ref()))
            .collect::<HideResult<Vec<_>>>()?;
        let house = open_house(collaborators.files.as_ref(), house_file_name)?;
        Self::new(house, opponents, collaborators)
    }

    /// Starts a game in the built-in house with the default opponents.
    pub fn with_default_house(collaborators: Collaborators) -> HideResult<Self> {
        let opponents = config::DEFAULT_OPPONENT_NAMES
            .iter()
            .map(|name| Opponent::new(*name))
            .collect::<HideResult<Vec<_>>>()?;
        Self::new(House::default_house()?, opponents, collaborators)
    }

    /// The house this game is played in.
    pub fn house(&self) -> &House {
        &self.house
    }

    /// Where the player is.
    pub fn current_location(&self) -> &Location {
        &self.house.locations()[self.current]
    }

    /// Starts at 1 and counts accepted moves, checks and teleports.
    pub fn move_number(&self) -> u64 {
        self.move_number
    }

    /// Every opponent with the hiding place they were assigned, in order.
    pub fn opponents_and_hiding_locations(&self) -> &[(Opponent, String)] {
        &self.opponents_and_hiding_locations
    }

    /// Every opponent, in hiding order.
    pub fn opponents(&self) -> impl Iterator<Item = &Opponent> {
        self.opponents_and_hiding_locations.iter().map(|(o, _)| o)
    }

    /// Opponents found so far, in the order they were found.
    pub fn found_opponents(&self) -> &[Opponent] {
        &self.found_opponents
    }

    /// True once every opponent has been found.
    pub fn game_over(&self) -> bool {
        self.found_opponents.len() == self.opponents_and_hiding_locations.len()
    }

    /// Moves through the exit in `direction`.
    pub fn move_to(&mut self, direction: Direction) -> HideResult<String> {
        let target = self.house.exit(self.current_location().name(), direction)?;
        let target = self.house.index_of(target.name())?;

        self.current = target;
        self.move_number += 1;
        debug!(
            "Moved {} to {} (move {})",
            direction,
            self.current_location().name(),
            self.move_number
        );
        Ok(format!("Moving {}", direction))
    }

    /// Parses `text` as a direction and moves that way.
    pub fn move_text(&mut self, text: &str) -> HideResult<String> {
        let direction: Direction = text.parse()?;
        self.move_to(direction)
    }

    /// Checks the hiding place in the current location. Everyone hiding there
    /// is found, in the order they hid.
    pub fn check(&mut self) -> HideResult<String> {
        let here = self.current_location();
        let place = here
            .hiding_place()
            .ok_or_else(|| HideError::NoHidingPlace(here.name().to_string()))?
            .description()
            .to_string();
        let name = here.name().to_string();

        let drained = self.house.check_hiding_place(&name)?;
        self.move_number += 1;
        for opponent in &drained {
            if !self.found_opponents.contains(opponent) {
                self.found_opponents.push(opponent.clone());
            }
        }
        debug!("Checked {} and found {} opponent(s)", name, drained.len());

        Ok(match drained.len() {
            0 => format!("Nobody was hiding {}", place),
            1 => format!("You found 1 opponent hiding {}", place),
            n => format!("You found {} opponents hiding {}", n, place),
        })
    }

    /// Jumps to a random location with a hiding place. The destination may be
    /// the current location.
    pub fn teleport(&mut self) -> HideResult<String> {
        let target = self
            .house
            .random_location_with_hiding_place(self.random.as_mut())?
            .name()
            .to_string();
        self.current = self.house.index_of(&target)?;
        self.move_number += 1;
        Ok(format!(
            "Teleporting to random location with hiding place: {}",
            target
        ))
    }

    /// Empties every hiding place, then hides opponent *i* at `locations[i]`.
    /// The same location may appear more than once. Move number and found
    /// opponents are left alone.
    pub fn rehide_all_opponents<S: AsRef<str>>(&mut self, locations: &[S]) -> HideResult<()> {
        if locations.len() != self.opponents_and_hiding_locations.len() {
            return Err(HideError::HidingLocationCountMismatch {
                expected: self.opponents_and_hiding_locations.len(),
                found: locations.len(),
            });
        }
        let targets = locations
            .iter()
            .map(|name| {
                self.house
                    .location_with_hiding_place(name.as_ref())
                    .map(|location| location.name().to_string())
            })
            .collect::<HideResult<Vec<_>>>()?;

        self.place_opponents(targets)
    }

    /// Starts over: back to the starting point at move 1, nobody found, and
    /// every opponent re-hidden at random. With `house_file_name`, the house
    /// is replaced by that layout first.
    pub fn restart(&mut self, house_file_name: Option<&str>) -> HideResult<()> {
        if let Some(name) = house_file_name {
            let house = open_house(self.files.as_ref(), name)?;
            ensure_hiding_places(&house)?;
            self.house = house;
        }

        self.current = self.house.index_of(self.house.starting_point().name())?;
        self.move_number = 1;
        self.found_opponents.clear();
        self.hide_all_randomly()?;
        info!("Restarted game in house \"{}\"", self.house.name());
        Ok(())
    }

    /// Snapshot of the current session.
    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            house_file_name: self.house.file_name().to_string(),
            player_location: self.current_location().name().to_string(),
            move_number: self.move_number as i64,
            opponents_and_hiding_locations: self
                .opponents_and_hiding_locations
                .iter()
                .map(|(opponent, location)| (opponent.name().to_string(), location.clone()))
                .collect(),
            found_opponents: self
                .found_opponents
                .iter()
                .map(|opponent| opponent.name().to_string())
                .collect(),
        }
    }

    /// Saves the session to `<file_name>.game.json`. Refuses to overwrite.
    pub fn save_game(&self, file_name: &str) -> HideResult<String> {
        validate_file_name(file_name)?;
        let path = game_file_path(file_name);
        if self.files.exists(&path) {
            return Err(HideError::FileExists(path.display().to_string()));
        }

        self.files.write(&path, &self.snapshot().to_json()?)?;
        info!("Saved game to {}", path.display());
        Ok(format!("Game successfully saved in {}", file_name))
    }

    /// Replaces the session with the one saved in `<file_name>.game.json`.
    pub fn load_game(&mut self, file_name: &str) -> HideResult<String> {
        validate_file_name(file_name)?;
        let path = game_file_path(file_name);
        if !self.files.exists(&path) {
            return Err(HideError::FileNotFound(path.display().to_string()));
        }

        let resource = format!("saved game file {}", path.display());
        let json = self.files.read_to_string(&path)?;
        let loaded = SavedGame::from_json(&json)
            .map_err(|e| e.corrupt_in(&resource))
            .and_then(|saved| self.apply_saved_game(&saved, &resource));
        if let Err(e) = &loaded {
            warn!("Rejected saved game {}: {}", path.display(), e);
        }
        loaded?;

        info!("Loaded game from {}", path.display());
        Ok(format!("Game successfully loaded from {}", file_name))
    }

    /// Replaces the session with an in-memory snapshot, validating it first.
    pub fn load_saved_game(&mut self, saved: &SavedGame) -> HideResult<()> {
        self.apply_saved_game(saved, "saved game")
    }

    /// Deletes `<file_name>.game.json`.
    pub fn delete_game(&self, file_name: &str) -> HideResult<String> {
        validate_file_name(file_name)?;
        let path = game_file_path(file_name);
        if !self.files.exists(&path) {
            return Err(HideError::FileNotFound(path.display().to_string()));
        }

        self.files.delete(&path)?;
        info!("Deleted saved game {}", path.display());
        Ok(format!(
            "Game file {} has been successfully deleted",
            file_name
        ))
    }

    /// Names (without suffix) of the saved games in the default directory.
    pub fn saved_game_names(&self) -> HideResult<Vec<String>> {
        file_stems_with_suffix(
            self.files.as_ref(),
            &self.files.default_directory(),
            config::GAME_FILE_SUFFIX,
        )
    }

    /// Names (without suffix) of the house layouts in the default directory.
    pub fn house_file_names(&self) -> HideResult<Vec<String>> {
        House::house_file_names(self.files.as_ref(), None)
    }

    /// Where the player is, what exits there are, and who has been found.
    pub fn status(&self) -> String {
        let here = self.current_location();
        let exits = here.exit_list();

        let mut status = format!(
            "You are in the {}. You see the following exit{}:",
            here.name(),
            if exits.len() == 1 { "" } else { "s" }
        );
        for exit in &exits {
            status.push('\n');
            status.push_str(exit);
        }
        if let Some(place) = here.hiding_place() {
            status.push_str(&format!("\nSomeone could hide {}", place.description()));
        }

        status.push('\n');
        if self.found_opponents.is_empty() {
            status.push_str("You have not found any opponents");
        } else {
            let total = self.opponents_and_hiding_locations.len();
            let names: Vec<&str> = self.found_opponents.iter().map(Opponent::name).collect();
            status.push_str(&format!(
                "You have found {} of {} opponent{}: {}",
                self.found_opponents.len(),
                total,
                if total == 1 { "" } else { "s" },
                names.join(", ")
            ));
        }
        status
    }

    /// Move number and the question to ask the player.
    pub fn prompt(&self) -> String {
        let check = if self.current_location().has_hiding_place() {
            " (or type 'check')"
        } else {
            ""
        };
        format!(
            "{}: Which direction do you want to go{}: ",
            self.move_number, check
        )
    }

    fn hide_all_randomly(&mut self) -> HideResult<()> {
        let mut targets = Vec::with_capacity(self.opponents_and_hiding_locations.len());
        for _ in 0..self.opponents_and_hiding_locations.len() {
            let location = self
                .house
                .random_location_with_hiding_place(self.random.as_mut())?;
            targets.push(location.name().to_string());
        }
        self.place_opponents(targets)
    }

    /// `targets` must already be known hiding places, one per opponent.
    fn place_opponents(&mut self, targets: Vec<String>) -> HideResult<()> {
        self.house.clear_hiding_places();
        for ((opponent, location), target) in
            self.opponents_and_hiding_locations.iter_mut().zip(targets)
        {
            self.house.hide_opponent(&target, opponent.clone())?;
            *location = target;
        }
        Ok(())
    }

    fn apply_saved_game(&mut self, saved: &SavedGame, resource: &str) -> HideResult<()> {
        let files = self.files.as_ref();
        let current_house = &self.house;
        let mut house = saved
            .validate_with(|name| {
                if name == current_house.file_name() {
                    Ok(current_house.clone())
                } else {
                    open_house(files, name)
                }
            })
            .map_err(|e| e.invalid_in(resource))?;

        let current = house
            .index_of(&saved.player_location)
            .map_err(|e| e.corrupt_in(resource))?;

        let build = || -> HideResult<(Vec<(Opponent, String)>, Vec<Opponent>, u64)> {
            let mut opponents = Vec::new();
            for (name, location) in &saved.opponents_and_hiding_locations {
                opponents.push((Opponent::new(name.as_str())?, location.clone()));
            }
            let found = saved
                .found_opponents
                .iter()
                .map(|name| Opponent::new(name.as_str()))
                .collect::<HideResult<Vec<_>>>()?;
            let move_number = u64::try_from(saved.move_number).map_err(|_| {
                HideError::InvalidData(format!("MoveNumber {} is out of range", saved.move_number))
            })?;
            Ok((opponents, found, move_number))
        };
        let (opponents, found, move_number) = build().map_err(|e| e.invalid_in(resource))?;

        house.clear_hiding_places();
        for (opponent, location) in &opponents {
            if !found.contains(opponent) {
                house
                    .hide_opponent(location, opponent.clone())
                    .map_err(|e| e.invalid_in(resource))?;
            }
        }

        self.house = house;
        self.current = current;
        self.move_number = move_number;
        self.opponents_and_hiding_locations = opponents;
        self.found_opponents = found;
        Ok(())
    }
}

fn validate_opponent_count(count: i64) -> HideResult<()> {
    if (config::MIN_OPPONENTS..=config::MAX_OPPONENTS).contains(&count) {
        Ok(())
    } else {
        Err(HideError::InvalidOpponentCount(count))
    }
}

fn ensure_hiding_places(house: &House) -> HideResult<()> {
    if house.locations_with_hiding_places().next().is_none() {
        return Err(HideError::NoHidingLocations(house.name().to_string()));
    }
    Ok(())
}

/// Loads the named house layout. The built-in house is used for its own file
/// name when no such file exists.
fn open_house(files: &dyn FileSystem, file_name: &str) -> HideResult<House> {
    match House::load(files, file_name) {
        Err(HideError::FileNotFound(_)) if file_name == config::DEFAULT_HOUSE_FILE_NAME => {
            debug!("No {} file, using the built-in house", file_name);
            House::default_house()
        }
        result => result,
    }
}
