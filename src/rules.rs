use crate::engine::Board;
use crate::types::{Coord, Player, RuleSetKind, WinLine};

/// Run length that wins. Longer runs do not count.
pub const WIN_LENGTH: usize = 5;

pub trait RuleSet {
  fn is_legal(&self, board: &Board, coord: Coord) -> bool;
  fn check_win(&self, board: &Board, coord: Coord, player: Player) -> Option<WinLine>;
}

/// Five in a row wins; six or more does not.
pub struct ExactFiveRuleSet;

impl RuleSet for ExactFiveRuleSet {
  fn is_legal(&self, board: &Board, coord: Coord) -> bool {
    board.is_empty(coord.x, coord.y)
  }

  fn check_win(&self, board: &Board, coord: Coord, player: Player) -> Option<WinLine> {
    let size = board.size() as i32;
    let (x, y) = (coord.x as i32, coord.y as i32);

    for nx in (x - 1)..=(x + 1) {
      for ny in (y - 1)..=(y + 1) {
        if nx < 0 || ny < 0 || nx >= size || ny >= size {
          continue;
        }
        if nx == x && ny == y {
          continue;
        }
        if board.get(nx as usize, ny as usize).and_then(|cell| cell.player()) != Some(player) {
          continue;
        }

        let line = walk_line(board, coord, (nx - x, ny - y), player);
        if line.length == WIN_LENGTH {
          return Some(line);
        }
      }
    }

    None
  }
}

pub fn rules_for(kind: RuleSetKind) -> Box<dyn RuleSet> {
  match kind {
    RuleSetKind::ExactFive => Box::new(ExactFiveRuleSet),
  }
}

// Counts the run through `origin` along `dir` and records the last matching
// stone in each direction.
fn walk_line(board: &Board, origin: Coord, dir: (i32, i32), player: Player) -> WinLine {
  let forward = count_dir(board, origin, dir.0, dir.1, player);
  let backward = count_dir(board, origin, -dir.0, -dir.1, player);

  let step = |n: usize, sign: i32| Coord {
    x: (origin.x as i32 + sign * dir.0 * n as i32) as usize,
    y: (origin.y as i32 + sign * dir.1 * n as i32) as usize,
  };

  WinLine {
    start: step(forward, 1),
    end: step(backward, -1),
    direction: dir,
    length: 1 + forward + backward,
  }
}

fn count_dir(board: &Board, origin: Coord, dx: i32, dy: i32, player: Player) -> usize {
  let mut count = 0;
  let mut cx = origin.x as i32 + dx;
  let mut cy = origin.y as i32 + dy;

  while cx >= 0 && cy >= 0 {
    let ux = cx as usize;
    let uy = cy as usize;
    if !board.in_bounds(ux, uy) {
      break;
    }
    if board.get(ux, uy).and_then(|cell| cell.player()) != Some(player) {
      break;
    }
    count += 1;
    cx += dx;
    cy += dy;
  }

  count
}
