//! # Hide and Seek Main Entry Point
//!
//! Parses arguments, sets up logging and collaborators, and runs the
//! interactive command loop on stdin/stdout.

use clap::Parser;
use hide_and_seek::utils::random::{SeededRandom, ThreadRandom};
use hide_and_seek::{
    config, execute, Collaborators, GameController, HideError, HideResult, LocalFileSystem,
    OpponentNamer, Outcome, PlayerInput, RandomSource,
};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Command line arguments for hide and seek.
#[derive(Parser, Debug)]
#[command(name = "hide_and_seek")]
#[command(about = "Find every opponent hiding in the house")]
#[command(version)]
struct Args {
    /// House layout to play in (file name without the .house.json suffix)
    #[arg(long)]
    house: Option<String>,

    /// Number of generated opponents (1-10)
    #[arg(short, long, conflicts_with = "names")]
    opponents: Option<i64>,

    /// Explicit opponent names
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    names: Vec<String>,

    /// Random seed for reproducible hiding places
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory holding house layouts and saved games (defaults to the executable's directory)
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting hide and seek v{}", hide_and_seek::VERSION);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_target(false)
            .init();
    }
}

fn collaborators(args: &Args) -> HideResult<Collaborators> {
    let files = match &args.data_dir {
        Some(dir) => LocalFileSystem::new(dir),
        None => LocalFileSystem::beside_executable()?,
    };
    let random: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    Ok(Collaborators::new(Rc::new(files), random))
}

fn new_game(args: &Args, namer: &mut OpponentNamer) -> HideResult<GameController> {
    let collaborators = collaborators(args)?;
    let house = args
        .house
        .as_deref()
        .unwrap_or(config::DEFAULT_HOUSE_FILE_NAME);

    if !args.names.is_empty() {
        GameController::with_opponent_names(&args.names, house, collaborators)
    } else if let Some(count) = args.opponents {
        GameController::with_opponent_count(count, house, namer, collaborators)
    } else if args.house.is_some() {
        GameController::with_opponent_names(&config::DEFAULT_OPPONENT_NAMES, house, collaborators)
    } else {
        GameController::with_default_house(collaborators)
    }
}

/// Main game loop implementation.
fn run(args: &Args) -> HideResult<()> {
    let mut namer = OpponentNamer::new();
    let mut game = new_game(args, &mut namer)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        println!();
        println!("{}", game.status());
        print!("{}", game.prompt());
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match execute(&mut game, PlayerInput::parse(&line)) {
            Ok(Outcome::Message(text)) => println!("{}", text),
            Ok(Outcome::Quit) => break,
            Err(e) => report(&e),
        }

        if game.game_over() {
            println!();
            println!("You won the game in {} moves!", game.move_number());
            print!("Play again? (y/n): ");
            stdout.flush()?;

            match lines.next() {
                Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y") => {
                    game.restart(None)?;
                }
                _ => break,
            }
        }
    }

    println!("Thanks for playing!");
    Ok(())
}

fn report(e: &HideError) {
    log::warn!("Command rejected: {}", e);
    println!("{}", e);
}
