//! Integration tests for saving, loading and deleting games through the
//! file system collaborator.

use hide_and_seek::utils::random::ScriptedRandom;
use hide_and_seek::{
    Collaborators, ErrorKind, FileSystem, GameController, HideError, HideResult, MemoryFileSystem,
};
use std::path::Path;
use std::rc::Rc;

fn game_on(files: &Rc<MemoryFileSystem>) -> HideResult<GameController> {
    let collaborators =
        Collaborators::new(files.clone(), Box::new(ScriptedRandom::constant(0)));
    GameController::with_default_house(collaborators)
}

fn saved_document(move_number: &str, opponents: &str, found: &str) -> String {
    format!(
        r#"{{"HouseFileName":"DefaultHouse","PlayerLocation":"Landing",{}"OpponentsAndHidingLocations":{},"FoundOpponents":{}}}"#,
        move_number, opponents, found
    )
}

/// `{"O0":"Attic","O1":"Attic",...}` with `count` opponents.
fn opponents_in_attic(count: usize) -> String {
    let entries: Vec<String> = (0..count).map(|i| format!(r#""O{}":"Attic""#, i)).collect();
    format!("{{{}}}", entries.join(","))
}

/// Loads `slot` and checks the game was left exactly as it was.
fn load_fails(files: &Rc<MemoryFileSystem>, document: String) -> HideResult<HideError> {
    files.insert("slot.game.json", document);
    let mut game = game_on(files)?;
    let before = game.snapshot();

    let err = game.load_game("slot").unwrap_err();
    assert_eq!(game.snapshot(), before);
    Ok(err)
}

#[test]
fn test_save_and_load_round_trip() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let mut game = game_on(&files)?;
    game.move_text("East")?;
    game.move_text("Up")?;
    game.rehide_all_opponents(&["Kitchen", "Pantry", "Attic", "Garage", "Attic"])?;

    assert_eq!(game.save_game("slot")?, "Game successfully saved in slot");
    assert_eq!(
        files.contents("slot.game.json").unwrap(),
        r#"{"HouseFileName":"DefaultHouse","PlayerLocation":"Landing","MoveNumber":3,"OpponentsAndHidingLocations":{"Joe":"Kitchen","Bob":"Pantry","Ana":"Attic","Owen":"Garage","Jimmy":"Attic"},"FoundOpponents":[]}"#
    );

    let mut other = game_on(&files)?;
    assert_eq!(other.load_game("slot")?, "Game successfully loaded from slot");
    assert_eq!(other.current_location().name(), "Landing");
    assert_eq!(other.move_number(), 3);
    assert_eq!(other.snapshot(), game.snapshot());

    // The restored hiding places are live
    other.move_text("Up")?;
    assert_eq!(other.check()?, "You found 2 opponents hiding in a trunk");

    Ok(())
}

#[test]
fn test_save_refuses_to_overwrite() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let game = game_on(&files)?;
    game.save_game("slot")?;

    let err = game.save_game("slot").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(files.len(), 1);

    let err = game.save_game("my game").unwrap_err();
    assert!(matches!(err, HideError::InvalidFileName(_)));

    Ok(())
}

#[test]
fn test_delete_game() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let game = game_on(&files)?;
    game.save_game("slot")?;
    assert_eq!(game.saved_game_names()?, vec!["slot"]);

    assert_eq!(
        game.delete_game("slot")?,
        "Game file slot has been successfully deleted"
    );
    assert!(!files.exists(Path::new("slot.game.json")));

    let err = game.delete_game("slot").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    Ok(())
}

#[test]
fn test_missing_move_number_is_malformed() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let err = load_fails(&files, saved_document("", r#"{"Joe":"Kitchen"}"#, "[]"))?;

    assert_eq!(err.kind(), ErrorKind::CorruptData);
    assert_eq!(err.root_cause().kind(), ErrorKind::MalformedData);
    assert!(err
        .to_string()
        .starts_with("Cannot process because data in saved game file slot.game.json is corrupt - "));
    assert!(err.to_string().contains("MoveNumber"));

    Ok(())
}

#[test]
fn test_negative_move_number_is_invalid() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let err = load_fails(
        &files,
        saved_document(r#""MoveNumber":-1,"#, r#"{"Joe":"Kitchen"}"#, "[]"),
    )?;

    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_eq!(
        err.root_cause().to_string(),
        "MoveNumber must be positive (was -1)"
    );

    Ok(())
}

#[test]
fn test_empty_opponent_map_is_invalid() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let err = load_fails(&files, saved_document(r#""MoveNumber":2,"#, "{}", "[]"))?;

    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_eq!(
        err.root_cause().to_string(),
        "No opponents are stored in OpponentsAndHidingLocations"
    );

    Ok(())
}

#[test]
fn test_found_opponent_must_be_an_opponent() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let err = load_fails(
        &files,
        saved_document(r#""MoveNumber":2,"#, r#"{"Joe":"Kitchen"}"#, r#"["Mike"]"#),
    )?;

    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_eq!(
        err.root_cause().to_string(),
        "Found opponent \"Mike\" is not an opponent"
    );

    Ok(())
}

#[test]
fn test_hiding_location_must_exist() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let err = load_fails(
        &files,
        saved_document(r#""MoveNumber":2,"#, r#"{"Joe":"Hallway"}"#, "[]"),
    )?;

    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert!(matches!(
        err.root_cause(),
        HideError::HidingLocationNotFound(name) if name == "Hallway"
    ));

    Ok(())
}

#[test]
fn test_unknown_player_location_is_corrupt() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let document = saved_document(r#""MoveNumber":2,"#, r#"{"Joe":"Kitchen"}"#, "[]")
        .replace("Landing", "Basement");
    let err = load_fails(&files, document)?;

    assert_eq!(err.kind(), ErrorKind::CorruptData);
    assert!(matches!(
        err.root_cause(),
        HideError::LocationNotFound(name) if name == "Basement"
    ));

    Ok(())
}

#[test]
fn test_load_missing_file() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let mut game = game_on(&files)?;

    let err = game.load_game("nothing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = game.load_game("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    Ok(())
}

#[test]
fn test_ten_opponents_load() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    files.insert(
        "full.game.json",
        saved_document(r#""MoveNumber":2,"#, &opponents_in_attic(10), "[]"),
    );
    let mut game = game_on(&files)?;

    game.load_game("full")?;
    assert_eq!(game.opponents().count(), 10);
    assert_eq!(game.current_location().name(), "Landing");

    Ok(())
}

#[test]
fn test_eleven_opponents_are_invalid() -> HideResult<()> {
    let files = Rc::new(MemoryFileSystem::new());
    let err = load_fails(
        &files,
        saved_document(r#""MoveNumber":2,"#, &opponents_in_attic(11), "[]"),
    )?;

    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_eq!(
        err.root_cause().to_string(),
        "OpponentsAndHidingLocations holds 11 opponents (at most 10 are allowed)"
    );

    Ok(())
}
