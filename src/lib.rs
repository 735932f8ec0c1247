//! # Hide and Seek
//!
//! A single-player, text-based hide and seek game. The player walks through a
//! house made of named locations and checks hiding places until every opponent
//! has been found.
//!
//! ## Architecture Overview
//!
//! - **Direction Catalog**: the twelve directions an exit can point in
//! - **House**: the location graph, stored as a flat collection keyed by name
//! - **Game Controller**: the session state machine (move, check, teleport, rehide, restart)
//! - **Saved Games**: a serializable snapshot of a session, validated against its house on load
//!
//! File access and random numbers come from explicit collaborators (see [`utils`])
//! so that tests and embedders can substitute their own.

pub mod game;
pub mod input;
pub mod utils;

pub use game::*;
pub use input::*;
pub use utils::*;

pub use game::{
    Collaborators, Direction, GameController, HidingPlace, House, HouseLayout, Location,
    Opponent, OpponentNamer, SavedGame,
};
pub use utils::{FileSystem, LocalFileSystem, MemoryFileSystem, RandomSource};

/// Broad category of a [`HideError`], used by callers that need to react to the
/// kind of failure rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied value failed a precondition
    Validation,
    /// A named location, hiding place or file does not exist
    NotFound,
    /// The operation would overwrite something it may not overwrite
    Conflict,
    /// A persisted document could not be parsed into the expected shape
    MalformedData,
    /// A persisted document parsed but is inconsistent or unusable
    CorruptData,
    /// A persisted document parsed but a field breaks a semantic rule
    InvalidData,
    /// Underlying I/O failed
    Io,
}

/// Core error type for the hide and seek engine.
#[derive(thiserror::Error, Debug)]
pub enum HideError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text did not name any direction
    #[error("That's not a valid direction")]
    InvalidDirection(String),

    /// The location has no exit in the requested direction
    #[error("There is no exit {} from the {location}", .direction.phrase())]
    NoExit {
        location: String,
        direction: Direction,
    },

    /// The location has no exits at all
    #[error("The {0} has no exits")]
    NoExits(String),

    /// Check or hide was attempted somewhere without a hiding place
    #[error("There is no hiding place in the {0}")]
    NoHidingPlace(String),

    /// A required text value was empty or whitespace
    #[error("{0} is invalid (is empty or contains only whitespace)")]
    BlankValue(String),

    /// A file name failed the portable file name rule
    #[error("Cannot perform action because file name \"{0}\" is invalid (is empty or contains illegal characters, e.g. \\, /, or whitespace)")]
    InvalidFileName(String),

    /// Requested opponent count is outside the allowed range
    #[error("Cannot create a new game because the number of opponents specified ({0}) is invalid (must be between {} and {})", config::MIN_OPPONENTS, config::MAX_OPPONENTS)]
    InvalidOpponentCount(i64),

    /// The same opponent name was supplied twice
    #[error("Opponent \"{0}\" appears more than once")]
    DuplicateOpponent(String),

    /// A location name was added to a house twice
    #[error("Location \"{0}\" already exists in the house")]
    DuplicateLocation(String),

    /// Rehide was given the wrong number of hiding locations
    #[error("The number of hiding locations ({found}) must equal the number of opponents ({expected})")]
    HidingLocationCountMismatch { expected: usize, found: usize },

    /// Named location is not part of the house
    #[error("Location \"{0}\" does not exist in House")]
    LocationNotFound(String),

    /// Named location is missing or has no hiding place
    #[error("Location with hiding place \"{0}\" does not exist in House")]
    HidingLocationNotFound(String),

    /// The house has nowhere to hide anyone
    #[error("House \"{0}\" has no locations with hiding places")]
    NoHidingLocations(String),

    /// A random source drew a value outside the range it was asked for
    #[error("Random source returned {value}, which is not below {bound}")]
    RandomOutOfRange { value: usize, bound: usize },

    /// A file the operation needs is missing
    #[error("Cannot find file {0}")]
    FileNotFound(String),

    /// A directory to list is missing
    #[error("Cannot find directory {0}")]
    DirectoryNotFound(String),

    /// The target file already exists
    #[error("Cannot perform action because file {0} already exists")]
    FileExists(String),

    /// A document could not be parsed
    #[error("{0}")]
    Malformed(String),

    /// A parsed document broke a semantic rule
    #[error("{0}")]
    InvalidData(String),

    /// Wraps a failure that leaves a document unusable
    #[error("Cannot process because data in {resource} is corrupt - {source}")]
    Corrupt {
        resource: String,
        #[source]
        source: Box<HideError>,
    },

    /// Wraps a failure where a document field holds an invalid value
    #[error("Cannot process because data in {resource} is invalid - {source}")]
    Invalid {
        resource: String,
        #[source]
        source: Box<HideError>,
    },
}

impl HideError {
    /// Wraps this error as a corrupt-data failure of `resource`.
    pub fn corrupt_in(self, resource: impl Into<String>) -> Self {
        HideError::Corrupt {
            resource: resource.into(),
            source: Box::new(self),
        }
    }

    /// Wraps this error as an invalid-data failure of `resource`.
    pub fn invalid_in(self, resource: impl Into<String>) -> Self {
        HideError::Invalid {
            resource: resource.into(),
            source: Box::new(self),
        }
    }

    /// Returns the taxonomy category of this error (the outermost layer).
    pub fn kind(&self) -> ErrorKind {
        match self {
            HideError::Io(_) => ErrorKind::Io,
            HideError::InvalidDirection(_)
            | HideError::NoHidingPlace(_)
            | HideError::BlankValue(_)
            | HideError::InvalidFileName(_)
            | HideError::InvalidOpponentCount(_)
            | HideError::DuplicateOpponent(_)
            | HideError::DuplicateLocation(_)
            | HideError::HidingLocationCountMismatch { .. }
            | HideError::RandomOutOfRange { .. } => ErrorKind::Validation,
            HideError::NoExit { .. }
            | HideError::NoExits(_)
            | HideError::LocationNotFound(_)
            | HideError::HidingLocationNotFound(_)
            | HideError::NoHidingLocations(_)
            | HideError::FileNotFound(_)
            | HideError::DirectoryNotFound(_) => ErrorKind::NotFound,
            HideError::FileExists(_) => ErrorKind::Conflict,
            HideError::Malformed(_) => ErrorKind::MalformedData,
            HideError::InvalidData(_) | HideError::Invalid { .. } => ErrorKind::InvalidData,
            HideError::Corrupt { .. } => ErrorKind::CorruptData,
        }
    }

    /// Follows `Corrupt`/`Invalid` wrappers down to the innermost error.
    pub fn root_cause(&self) -> &HideError {
        match self {
            HideError::Corrupt { source, .. } | HideError::Invalid { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

/// Result type used throughout the hide and seek codebase.
pub type HideResult<T> = Result<T, HideError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Fewest opponents a game can have
    pub const MIN_OPPONENTS: i64 = 1;

    /// Most opponents a game can have
    pub const MAX_OPPONENTS: i64 = 10;

    /// Suffix of house layout documents
    pub const HOUSE_FILE_SUFFIX: &str = ".house.json";

    /// Suffix of saved game documents
    pub const GAME_FILE_SUFFIX: &str = ".game.json";

    /// Suffix appended by the plain-name helper
    pub const JSON_SUFFIX: &str = ".json";

    /// File name of the house built in code
    pub const DEFAULT_HOUSE_FILE_NAME: &str = "DefaultHouse";

    /// Opponents used when a game is started without any
    pub const DEFAULT_OPPONENT_NAMES: [&str; 5] = ["Joe", "Bob", "Ana", "Owen", "Jimmy"];

    /// Prefix for generated opponent names
    pub const RANDOM_OPPONENT_PREFIX: &str = "Random Opponent";
}
