use serde::Serialize;

use crate::types::{Coord, Difficulty, GameOutcome, Player};

pub const MSG_NEW_GAME: &str = "A new game has started!";
pub const MSG_BAD_PLACEMENT: &str = "You cannot place your piece there";
pub const MSG_SAVE_FINISHED: &str = "You cannot save this ended game";
pub const MSG_SAVED: &str = "Game saved";
pub const MSG_SAVE_FAILED: &str = "The game could not be saved";
pub const MSG_LOADED: &str = "Game loaded";
pub const MSG_NO_SAVE: &str = "No save file was found!";
pub const MSG_CORRUPT_SAVE: &str = "The save file is corrupt";
pub const MSG_LOAD_FAILED: &str = "The save file could not be read";
pub const MSG_BOARD_FULL: &str = "The board is full, nobody wins";

/// Notifications pushed to whoever renders the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
  #[serde(rename_all = "camelCase")]
  NewGame { dimension: usize, human: Player },
  #[serde(rename_all = "camelCase")]
  MoveApplied { player: Player, coord: Coord, by_human: bool },
  Won(GameOutcome),
  DifficultyChanged { difficulty: Difficulty },
  Message { text: String },
}

impl GameEvent {
  pub fn message(text: &str) -> Self {
    GameEvent::Message {
      text: text.to_string(),
    }
  }
}

pub trait GameListener {
  fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
  F: FnMut(&GameEvent),
{
  fn on_event(&mut self, event: &GameEvent) {
    self(event)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn closures_are_listeners() {
    let mut seen = Vec::new();
    {
      let mut listener = |event: &GameEvent| seen.push(event.clone());
      listener.on_event(&GameEvent::message(MSG_SAVED));
    }
    assert_eq!(seen, vec![GameEvent::message(MSG_SAVED)]);
  }

  #[test]
  fn events_serialize_with_a_type_tag() {
    let event = GameEvent::MoveApplied {
      player: Player::W,
      coord: Coord::new(3, 4),
      by_human: false,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "move_applied");
    assert_eq!(json["player"], "W");
    assert_eq!(json["byHuman"], false);
  }
}
