use crate::engine::Board;
use crate::types::{Cell, Coord};

/// Shortest diagonal worth scanning; nothing shorter can hold a five.
pub const MIN_LINE_LEN: usize = 5;

/// A row, column or diagonal of the board. `coords[i]` is where `cells[i]` came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
  pub cells: Vec<Cell>,
  pub coords: Vec<Coord>,
}

impl Line {
  fn walk(board: &Board, x: usize, y: usize, dx: i32, dy: i32) -> Self {
    let mut cells = Vec::new();
    let mut coords = Vec::new();
    let mut cx = x as i32;
    let mut cy = y as i32;

    while cx >= 0 && cy >= 0 {
      let (ux, uy) = (cx as usize, cy as usize);
      let Some(cell) = board.get(ux, uy) else {
        break;
      };
      cells.push(cell);
      coords.push(Coord { x: ux, y: uy });
      cx += dx;
      cy += dy;
    }

    Self { cells, coords }
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }
}

pub fn rows(board: &Board) -> impl Iterator<Item = Line> + '_ {
  (0..board.size()).map(move |y| Line::walk(board, 0, y, 1, 0))
}

pub fn columns(board: &Board) -> impl Iterator<Item = Line> + '_ {
  (0..board.size()).map(move |x| Line::walk(board, x, 0, 0, 1))
}

/// Both diagonal directions, walked left to right. Each direction starts once
/// from every left-edge cell and once from every other cell of the row it
/// walks away from (bottom row when rising, top row when falling).
pub fn diagonals(board: &Board) -> impl Iterator<Item = Line> + '_ {
  let size = board.size();
  [-1i32, 1]
    .into_iter()
    .flat_map(move |dy| {
      let base_row = if dy == -1 { size.saturating_sub(1) } else { 0 };
      let left_edge = (0..size).map(move |y| (0, y));
      let far_edge = (1..size).map(move |x| (x, base_row));
      left_edge.chain(far_edge).map(move |(x, y)| (x, y, dy))
    })
    .map(move |(x, y, dy)| Line::walk(board, x, y, 1, dy))
    .filter(|line| line.len() >= MIN_LINE_LEN)
}

/// Every line in scan order: rows, then columns, then diagonals.
pub fn all_lines(board: &Board) -> impl Iterator<Item = Line> + '_ {
  rows(board).chain(columns(board)).chain(diagonals(board))
}
