//! # Command Definitions
//!
//! Free-text commands a player can type, and how each line of input maps to one.

/// One line of player input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move in a direction; the text is parsed when the command runs
    Move(String),
    /// Check the hiding place in the current location
    Check,
    /// Jump to a random location with a hiding place
    Teleport,
    /// Save the game under a name
    Save(String),
    /// Load a saved game by name
    Load(String),
    /// Delete a saved game by name
    Delete(String),
    /// Start over, optionally in a different house
    NewGame(Option<String>),
    /// List the house layouts available
    ListHouses,
    /// List the saved games available
    ListSavedGames,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

impl PlayerInput {
    /// Parses a line of input. Keywords are case-insensitive; anything that is
    /// not a keyword is treated as a direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use hide_and_seek::PlayerInput;
    ///
    /// assert_eq!(PlayerInput::parse("CHECK"), PlayerInput::Check);
    /// assert_eq!(PlayerInput::parse("save my_game"), PlayerInput::Save("my_game".to_string()));
    /// assert_eq!(PlayerInput::parse("nw"), PlayerInput::Move("nw".to_string()));
    /// ```
    pub fn parse(line: &str) -> PlayerInput {
        let line = line.trim();
        let (keyword, argument) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        match keyword.to_ascii_lowercase().as_str() {
            "check" if argument.is_empty() => PlayerInput::Check,
            "teleport" if argument.is_empty() => PlayerInput::Teleport,
            "save" => PlayerInput::Save(argument.to_string()),
            "load" => PlayerInput::Load(argument.to_string()),
            "delete" => PlayerInput::Delete(argument.to_string()),
            "new" => PlayerInput::NewGame(if argument.is_empty() {
                None
            } else {
                Some(argument.to_string())
            }),
            "houses" if argument.is_empty() => PlayerInput::ListHouses,
            "games" if argument.is_empty() => PlayerInput::ListSavedGames,
            "help" | "?" if argument.is_empty() => PlayerInput::Help,
            "quit" | "exit" if argument.is_empty() => PlayerInput::Quit,
            _ => PlayerInput::Move(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(PlayerInput::parse("check"), PlayerInput::Check);
        assert_eq!(PlayerInput::parse("  Teleport "), PlayerInput::Teleport);
        assert_eq!(PlayerInput::parse("houses"), PlayerInput::ListHouses);
        assert_eq!(PlayerInput::parse("games"), PlayerInput::ListSavedGames);
        assert_eq!(PlayerInput::parse("?"), PlayerInput::Help);
        assert_eq!(PlayerInput::parse("EXIT"), PlayerInput::Quit);
    }

    #[test]
    fn test_file_commands_keep_argument() {
        assert_eq!(
            PlayerInput::parse("load   slot_1 "),
            PlayerInput::Load("slot_1".to_string())
        );
        assert_eq!(
            PlayerInput::parse("delete slot 1"),
            PlayerInput::Delete("slot 1".to_string())
        );
        assert_eq!(PlayerInput::parse("save"), PlayerInput::Save(String::new()));
    }

    #[test]
    fn test_new_game_with_and_without_house() {
        assert_eq!(PlayerInput::parse("new"), PlayerInput::NewGame(None));
        assert_eq!(
            PlayerInput::parse("new Mansion"),
            PlayerInput::NewGame(Some("Mansion".to_string()))
        );
    }

    #[test]
    fn test_everything_else_is_a_move() {
        assert_eq!(PlayerInput::parse("Up"), PlayerInput::Move("Up".to_string()));
        assert_eq!(
            PlayerInput::parse("check the attic"),
            PlayerInput::Move("check the attic".to_string())
        );
        assert_eq!(PlayerInput::parse(""), PlayerInput::Move(String::new()));
    }
}
