pub mod ai;
pub mod engine;
pub mod error;
pub mod events;
pub mod lines;
pub mod patterns;
pub mod rules;
pub mod save;
pub mod settings;
pub mod types;

pub use engine::{Board, GameSetup, GameState, TurnReport};
pub use error::{InvalidDifficulty, LoadError, MoveError, SaveError, SettingsError};
pub use events::{GameEvent, GameListener};
pub use settings::GameSettings;
pub use types::{Cell, Coord, Difficulty, GameOutcome, GameSnapshot, Phase, Player, WinLine};
