use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use gomoku::{Difficulty, GameEvent, GameSettings, GameState, Phase};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
  /// Path to a JSON settings file
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// RNG seed, for reproducible games
  #[arg(long)]
  seed: Option<u64>,

  /// Where games are saved to and loaded from
  #[arg(long)]
  save_path: Option<PathBuf>,

  /// Computer strength: 0 (off), 1 (easy), 2 (medium), 3 (hard)
  #[arg(short, long)]
  difficulty: Option<u8>,

  /// A log level among "off", "error", "warn", "info", "debug", "trace"
  #[arg(short, long, default_value = "warn")]
  log_level: LevelFilter,
}

const HELP: &str = "commands: <col> <row> | new | save | load | diff <0-3> | help | quit";

fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  initialize_logging(args.log_level);

  let mut settings = match &args.config {
    Some(path) => GameSettings::load_or_default(path),
    None => GameSettings::default(),
  };
  if let Some(seed) = args.seed {
    settings.seed = Some(seed);
  }
  if let Some(path) = args.save_path {
    settings.save_path = path;
  }
  if let Some(level) = args.difficulty {
    settings.difficulty = Difficulty::from_level(level)
      .ok_or_else(|| anyhow::anyhow!("difficulty must be between 0 and 3, got {}", level))?;
  }
  info!(save_path = %settings.save_path.display(), "starting");

  let mut game = GameState::new(&settings);
  game.subscribe(print_event);
  print_state(&game);
  println!("{}", HELP);

  let stdin = io::stdin();
  for line in stdin.lock().lines() {
    let line = line?;
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
      [] => continue,
      ["quit"] | ["exit"] => break,
      ["help"] => println!("{}", HELP),
      ["new"] => {
        game.new_game();
        print_state(&game);
      }
      ["save"] => {
        if let Err(err) = game.save_game(&settings.save_path) {
          debug!(%err, "save refused");
        }
      }
      ["load"] => {
        if game.load_game(&settings.save_path).is_ok() {
          print_state(&game);
        }
      }
      ["diff", level] => match level.parse::<u8>() {
        Ok(level) => {
          if let Err(err) = game.set_difficulty(level) {
            println!("{}", err);
          }
        }
        Err(_) => println!("{}", HELP),
      },
      [col, row] => match (col.parse::<usize>(), row.parse::<usize>()) {
        (Ok(x), Ok(y)) => {
          if matches!(game.phase(), Phase::Won | Phase::BoardFull) {
            println!("The game is over; type `new` to play again");
          } else if game.human_click(x, y).is_ok() {
            print_state(&game);
          }
        }
        _ => println!("{}", HELP),
      },
      _ => println!("{}", HELP),
    }
    io::stdout().flush()?;
  }

  Ok(())
}

fn print_event(event: &GameEvent) {
  match event {
    GameEvent::Message { text } => println!("> {}", text),
    GameEvent::Won(outcome) => {
      let verdict = if outcome.human_won { "You win!" } else { "You lose!" };
      println!(
        "> {} ({} from {},{} to {},{})",
        verdict,
        outcome.winner.name(),
        outcome.line.start.x,
        outcome.line.start.y,
        outcome.line.end.x,
        outcome.line.end.y
      );
    }
    GameEvent::DifficultyChanged { difficulty } => {
      println!("> Difficulty is now {:?}", difficulty)
    }
    GameEvent::NewGame { .. } | GameEvent::MoveApplied { .. } => {}
  }
}

fn print_state(game: &GameState) {
  print!("{}", game.board());
  println!(
    "you play {}, move {}, difficulty {}",
    game.human().name(),
    game.move_count(),
    game.difficulty().level()
  );
}

fn initialize_logging(level: LevelFilter) {
  let format = tracing_subscriber::fmt::format()
    .with_target(false)
    .compact();

  let filter = Targets::new().with_default(level);

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(io::stderr),
    )
    .with(filter)
    .init();
}
