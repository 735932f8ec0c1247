//! # Input Module
//!
//! Turns lines typed by the player into game controller calls.

pub mod commands;

pub use commands::*;

use crate::{GameController, HideResult};

/// Text shown for the `help` command.
pub const HELP_TEXT: &str = "Commands:
  <direction>     move (North, South, East, West, Northeast, Southwest,
                  Southeast, Northwest, Up, Down, In, Out, or N, S, E, W, NE, ...)
  check           check the hiding place in this location
  teleport        jump to a random location with a hiding place
  save <name>     save the game
  load <name>     load a saved game
  delete <name>   delete a saved game
  games           list saved games
  houses          list house layouts
  new [house]     start a new game, optionally in another house
  quit            leave the game";

/// What the front end should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Show this text and keep playing
    Message(String),
    /// Stop the game loop
    Quit,
}

/// Runs one parsed command against the game.
///
/// # Examples
///
/// ```
/// use hide_and_seek::{execute, Collaborators, GameController, MemoryFileSystem, Outcome, PlayerInput};
/// use hide_and_seek::utils::random::ScriptedRandom;
/// use std::rc::Rc;
///
/// let collaborators = Collaborators::new(
///     Rc::new(MemoryFileSystem::new()),
///     Box::new(ScriptedRandom::constant(0)),
/// );
/// let mut game = GameController::with_default_house(collaborators).unwrap();
///
/// let outcome = execute(&mut game, PlayerInput::parse("east")).unwrap();
/// assert_eq!(outcome, Outcome::Message("Moving East".to_string()));
/// ```
pub fn execute(game: &mut GameController, input: PlayerInput) -> HideResult<Outcome> {
    let message = match input {
        PlayerInput::Move(text) => game.move_text(&text)?,
        PlayerInput::Check => game.check()?,
        PlayerInput::Teleport => game.teleport()?,
        PlayerInput::Save(name) => game.save_game(&name)?,
        PlayerInput::Load(name) => game.load_game(&name)?,
        PlayerInput::Delete(name) => game.delete_game(&name)?,
        PlayerInput::NewGame(house) => {
            game.restart(house.as_deref())?;
            format!("Starting a new game in {}", game.house().name())
        }
        PlayerInput::ListHouses => list("House layouts", game.house_file_names()?),
        PlayerInput::ListSavedGames => list("Saved games", game.saved_game_names()?),
        PlayerInput::Help => HELP_TEXT.to_string(),
        PlayerInput::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Message(message))
}

fn list(title: &str, names: Vec<String>) -> String {
    if names.is_empty() {
        format!("{}: none", title)
    } else {
        format!("{}: {}", title, names.join(", "))
    }
}
