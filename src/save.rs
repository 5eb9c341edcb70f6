use std::fs;
use std::path::Path;

use crate::engine::Board;
use crate::error::{LoadError, SaveError};
use crate::types::{Cell, Difficulty, Player, MAX_DIMENSION, MIN_DIMENSION};

pub const DEFAULT_SAVE_FILE: &str = "gomoku_Save.gmk";

/// Everything the flat save file carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveData {
  pub move_count: u32,
  pub human: Player,
  pub difficulty: Difficulty,
  pub board: Board,
}

impl SaveData {
  pub fn dimension(&self) -> usize {
    self.board.size()
  }
}

fn player_token(player: Player) -> char {
  Cell::from(player).token()
}

/// Header line of `key,value` pairs, then one line per row in column order.
pub fn encode(data: &SaveData) -> String {
  let size = data.board.size();
  let mut out = format!(
    "move,{};dimension,{};human,{};diff,{}\n",
    data.move_count,
    size,
    player_token(data.human),
    data.difficulty.level()
  );
  for y in 0..size {
    for x in 0..size {
      let cell = data.board.get(x, y).unwrap_or(Cell::Blank);
      out.push(cell.token());
    }
    out.push('\n');
  }
  out
}

pub fn decode(text: &str) -> Result<SaveData, LoadError> {
  let mut lines = text.lines();
  let header = lines
    .next()
    .ok_or_else(|| malformed("the file is empty"))?;

  let mut move_count = None;
  let mut dimension = None;
  let mut human = None;
  let mut difficulty = None;

  for pair in header.split(';') {
    let (key, value) = pair
      .split_once(',')
      .ok_or_else(|| malformed(format!("`{}` is not a key,value pair", pair)))?;
    match key {
      "move" => move_count = Some(parse_number::<u32>(key, value)?),
      "dimension" => {
        let size = parse_number::<usize>(key, value)?;
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&size) {
          return Err(malformed(format!("dimension {} is out of range", size)));
        }
        dimension = Some(size);
      }
      "human" => {
        human = match value {
          "B" => Some(Player::B),
          "W" => Some(Player::W),
          other => return Err(malformed(format!("unknown colour `{}`", other))),
        }
      }
      "diff" => {
        let level = parse_number::<u8>(key, value)?;
        difficulty = Some(
          Difficulty::from_level(level)
            .ok_or_else(|| malformed(format!("difficulty {} is out of range", level)))?,
        );
      }
      other => return Err(malformed(format!("unknown key `{}`", other))),
    }
  }

  let move_count = move_count.ok_or_else(|| malformed("missing `move`"))?;
  let size = dimension.ok_or_else(|| malformed("missing `dimension`"))?;
  let human = human.ok_or_else(|| malformed("missing `human`"))?;
  let difficulty = difficulty.ok_or_else(|| malformed("missing `diff`"))?;

  let rows: Vec<&str> = lines.collect();
  let rows = match rows.split_last() {
    Some((last, rest)) if last.is_empty() => rest,
    _ => &rows[..],
  };
  if rows.len() != size {
    return Err(malformed(format!("expected {} rows, found {}", size, rows.len())));
  }

  let mut cells = Vec::with_capacity(size * size);
  for (y, row) in rows.iter().enumerate() {
    let before = cells.len();
    for token in row.chars() {
      let cell = Cell::from_token(token)
        .ok_or_else(|| malformed(format!("unknown token `{}` in row {}", token, y)))?;
      cells.push(cell);
    }
    if cells.len() - before != size {
      return Err(malformed(format!("row {} does not have {} cells", y, size)));
    }
  }

  Ok(SaveData {
    move_count,
    human,
    difficulty,
    board: Board::from_cells(size, cells),
  })
}

pub fn write(path: &Path, data: &SaveData) -> Result<(), SaveError> {
  fs::write(path, encode(data)).map_err(SaveError::Io)
}

pub fn read(path: &Path) -> Result<SaveData, LoadError> {
  let text = fs::read_to_string(path)?;
  decode(&text)
}

fn malformed(reason: impl Into<String>) -> LoadError {
  LoadError::Malformed(reason.into())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, LoadError> {
  value
    .trim()
    .parse::<T>()
    .map_err(|_| malformed(format!("`{}` is not a number for `{}`", value, key)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Coord;

  fn sample() -> SaveData {
    let mut board = Board::new(10);
    board.place(Coord::new(2, 3), Player::B).unwrap();
    board.place(Coord::new(4, 3), Player::W).unwrap();
    board.place(Coord::new(9, 0), Player::B).unwrap();
    SaveData {
      move_count: 2,
      human: Player::B,
      difficulty: Difficulty::Hard,
      board,
    }
  }

  #[test]
  fn header_and_rows_follow_the_format() {
    let text = encode(&sample());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "move,2;dimension,10;human,B;diff,3");
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[1], "XXXXXXXXXB");
    assert_eq!(lines[4], "XXBXWXXXXX");
  }

  #[test]
  fn decode_restores_everything() {
    let data = sample();
    let decoded = decode(&encode(&data)).unwrap();
    assert_eq!(decoded, data);
    assert_eq!(decoded.dimension(), 10);
  }

  #[test]
  fn rejects_malformed_files() {
    let good = encode(&sample());
    let cases = [
      String::new(),
      good.replacen("move,2", "move,two", 1),
      good.replacen("dimension,10", "dimension,25", 1),
      good.replacen("human,B", "human,Q", 1),
      good.replacen("diff,3", "diff,7", 1),
      good.replacen(";diff,3", "", 1),
      good.replacen("diff,3", "diff,3;colour,red", 1),
      good.replacen("XXBXWXXXXX", "XXBXWXXXX", 1),
      good.replacen("XXBXWXXXXX", "XXBXWXXXX?", 1),
      good.lines().take(6).collect::<Vec<_>>().join("\n"),
    ];
    for text in cases.iter() {
      assert!(
        matches!(decode(text), Err(LoadError::Malformed(_))),
        "accepted {:?}",
        text
      );
    }
  }

  #[test]
  fn missing_file_is_not_found() {
    let path = std::env::temp_dir().join("gomoku-heuristic-definitely-missing.gmk");
    let _ = fs::remove_file(&path);
    assert!(matches!(read(&path), Err(LoadError::NotFound)));
  }

  #[test]
  fn write_then_read() {
    let path = std::env::temp_dir().join(format!("gomoku-save-{}.gmk", std::process::id()));
    let data = sample();
    write(&path, &data).unwrap();
    assert_eq!(read(&path).unwrap(), data);
    let _ = fs::remove_file(&path);
  }
}
