use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::engine::Board;
use crate::lines::{all_lines, Line};
use crate::patterns::PatternLibrary;
use crate::types::{Cell, Coord, Difficulty, Player};

/// Attempts around the seed before giving up and picking any cell.
pub const FALLBACK_ATTEMPTS: usize = 30;
/// Attempt index at which the seed switches to the mover's first stone.
pub const FALLBACK_RESEED_AT: usize = 20;

/// A pattern match somewhere on the board and the cell it suggests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
  pub rank: usize,
  pub coord: Coord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementKind {
  Pattern { rank: usize },
  Center,
  Seeded { attempt: usize },
  Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
  pub coord: Coord,
  pub kind: PlacementKind,
}

/// Picks the cell for `library.mover()`: a pattern move if any pattern
/// matches, otherwise a placement near the existing stones.
pub fn choose_move<R: Rng>(
  board: &Board,
  library: &PatternLibrary,
  difficulty: Difficulty,
  rng: &mut R,
) -> Placement {
  if let Some(placement) = pattern_move(board, library, difficulty, rng) {
    return placement;
  }
  fallback_move(board, library.mover(), rng)
}

/// Every hit across all lines, most urgent first. Ties keep scan order.
pub fn pattern_hits(board: &Board, library: &PatternLibrary) -> Vec<Hit> {
  let mut hits = Vec::new();

  for line in all_lines(board) {
    for pattern in library.patterns() {
      let Some(start) = find(&line.cells, &pattern.cells) else {
        continue;
      };
      if let Some(idx) = playable_index(&line, start, pattern.cells.len()) {
        hits.push(Hit {
          rank: pattern.rank,
          coord: line.coords[idx],
        });
      }
    }
  }

  hits.sort_by_key(|hit| hit.rank);
  hits
}

pub fn pattern_move<R: Rng>(
  board: &Board,
  library: &PatternLibrary,
  difficulty: Difficulty,
  rng: &mut R,
) -> Option<Placement> {
  let hits = pattern_hits(board, library);
  debug!(hits = hits.len(), mover = library.mover().name(), "pattern scan");

  let hit = if difficulty == Difficulty::Easy {
    hits.choose(rng).copied()
  } else {
    hits.first().copied()
  }?;

  Some(Placement {
    coord: hit.coord,
    kind: PlacementKind::Pattern { rank: hit.rank },
  })
}

fn find(haystack: &[Cell], needle: &[Cell]) -> Option<usize> {
  if needle.is_empty() || needle.len() > haystack.len() {
    return None;
  }
  haystack.windows(needle.len()).position(|window| window == needle)
}

// First blank inside the matched span that touches a stone on either side.
fn playable_index(line: &Line, start: usize, len: usize) -> Option<usize> {
  (start..start + len).find(|&idx| {
    if !line.cells[idx].is_blank() {
      return false;
    }
    let left = idx.checked_sub(1).map(|i| line.cells[i]);
    let right = line.cells.get(idx + 1).copied();
    [left, right]
      .into_iter()
      .flatten()
      .any(|cell| !cell.is_blank())
  })
}

/// Places near the stones already on the board. Only the final `Random`
/// branch may return an occupied cell.
pub fn fallback_move<R: Rng>(board: &Board, mover: Player, rng: &mut R) -> Placement {
  let own = board.pieces_of(mover);
  let opponent = board.pieces_of(mover.other());

  let mut seed = match (closest_to(&own, &opponent), opponent.first()) {
    (Some(piece), _) => piece,
    (None, Some(piece)) => *piece,
    (None, None) => {
      let center = board.size() / 2;
      return Placement {
        coord: Coord::new(center, center),
        kind: PlacementKind::Center,
      };
    }
  };
  debug!(x = seed.x, y = seed.y, "fallback seed");

  for attempt in 0..FALLBACK_ATTEMPTS {
    if attempt == FALLBACK_RESEED_AT {
      if let Some(first) = own.first() {
        seed = *first;
      }
    }

    let dx: i64 = if rng.gen_bool(0.5) { 1 } else { -1 };
    let dy: i64 = rng.gen_range(-1..=1);
    let x = seed.x as i64 + dx;
    let y = seed.y as i64 + dy;
    if board.is_valid_placement(x, y) {
      return Placement {
        coord: Coord::new(x as usize, y as usize),
        kind: PlacementKind::Seeded { attempt },
      };
    }
  }

  let coord = Coord::new(rng.gen_range(0..board.size()), rng.gen_range(0..board.size()));
  if !board.is_empty(coord.x, coord.y) {
    warn!(x = coord.x, y = coord.y, "fallback exhausted, random cell is occupied");
  }
  Placement {
    coord,
    kind: PlacementKind::Random,
  }
}

// The own stone nearest (Manhattan) to any opponent stone; first found wins ties.
fn closest_to(own: &[Coord], opponent: &[Coord]) -> Option<Coord> {
  if opponent.is_empty() {
    return own.first().copied();
  }

  let mut best: Option<(usize, Coord)> = None;
  for theirs in opponent {
    for mine in own {
      let dist = mine.manhattan(*theirs);
      if best.map_or(true, |(low, _)| dist < low) {
        best = Some((dist, *mine));
      }
    }
  }
  best.map(|(_, coord)| coord)
}

#[cfg(test)]
mod tests {
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;

  fn place_all(board: &mut Board, stones: &[(usize, usize)], player: Player) {
    for &(x, y) in stones {
      board.place(Coord::new(x, y), player).unwrap();
    }
  }

  #[test]
  fn open_four_is_blocked_at_an_end_on_hard() {
    let mut board = Board::new(10);
    place_all(&mut board, &[(2, 2), (3, 2), (4, 2), (5, 2)], Player::B);
    let library = PatternLibrary::new(Difficulty::Hard, Player::W);

    let hits = pattern_hits(&board, &library);
    assert_eq!(hits[0].coord, Coord::new(1, 2));
    for seed in 0..10 {
      let mut rng = StdRng::seed_from_u64(seed);
      let placement = choose_move(&board, &library, Difficulty::Hard, &mut rng);
      assert_eq!(placement.coord, Coord::new(1, 2));
      assert!(matches!(placement.kind, PlacementKind::Pattern { .. }));
    }
  }

  #[test]
  fn easy_picks_from_the_whole_hit_set() {
    let mut board = Board::new(10);
    place_all(&mut board, &[(2, 2), (3, 2), (4, 2), (5, 2)], Player::B);
    let library = PatternLibrary::new(Difficulty::Easy, Player::W);
    let hits = pattern_hits(&board, &library);
    let ends = [Coord::new(1, 2), Coord::new(6, 2)];
    assert!(hits.iter().all(|hit| ends.contains(&hit.coord)));

    let mut seen = Vec::new();
    for seed in 0..64 {
      let mut rng = StdRng::seed_from_u64(seed);
      let placement = choose_move(&board, &library, Difficulty::Easy, &mut rng);
      assert!(ends.contains(&placement.coord));
      if !seen.contains(&placement.coord) {
        seen.push(placement.coord);
      }
    }
    assert_eq!(seen.len(), 2);
  }

  #[test]
  fn hits_are_sorted_by_rank() {
    let mut board = Board::new(12);
    place_all(&mut board, &[(1, 1), (2, 1), (3, 1)], Player::B);
    place_all(&mut board, &[(6, 8), (6, 9), (6, 10), (6, 7)], Player::W);
    let library = PatternLibrary::new(Difficulty::Hard, Player::W);
    let hits = pattern_hits(&board, &library);
    assert!(!hits.is_empty());
    assert!(hits.windows(2).all(|pair| pair[0].rank <= pair[1].rank));
    // Own four in column 6 outranks blocking the opponent's three.
    assert_eq!(hits[0].coord, Coord::new(6, 6));
  }

  #[test]
  fn equal_ranks_keep_row_before_column() {
    let mut board = Board::new(10);
    place_all(&mut board, &[(2, 2), (3, 2), (4, 2), (5, 2)], Player::B);
    place_all(&mut board, &[(0, 4), (0, 5), (0, 6), (0, 7)], Player::B);
    let library = PatternLibrary::new(Difficulty::Hard, Player::W);

    let hits = pattern_hits(&board, &library);
    assert_eq!(hits[0].rank, hits[1].rank);
    assert_eq!(hits[0].coord, Coord::new(1, 2));
    assert_eq!(hits[1].coord, Coord::new(0, 3));
    let mut rng = StdRng::seed_from_u64(3);
    let placement = choose_move(&board, &library, Difficulty::Hard, &mut rng);
    assert_eq!(placement.coord, Coord::new(1, 2));
  }

  #[test]
  fn boxed_in_seed_switches_to_first_stone() {
    let mut board = Board::new(10);
    place_all(&mut board, &[(1, 8), (5, 5)], Player::W);
    place_all(
      &mut board,
      &[(4, 4), (4, 5), (4, 6), (6, 4), (6, 5), (6, 6)],
      Player::B,
    );
    assert_eq!(
      closest_to(&board.pieces_of(Player::W), &board.pieces_of(Player::B)),
      Some(Coord::new(5, 5))
    );

    for seed in 0..200 {
      let mut rng = StdRng::seed_from_u64(seed);
      let placement = fallback_move(&board, Player::W, &mut rng);
      match placement.kind {
        PlacementKind::Seeded { attempt } => {
          assert!(attempt >= FALLBACK_RESEED_AT, "attempt {}", attempt);
          assert_eq!(placement.coord.x.abs_diff(1), 1);
          assert!(placement.coord.y.abs_diff(8) <= 1);
          assert!(board.is_empty(placement.coord.x, placement.coord.y));
        }
        other => panic!("unexpected placement {:?}", other),
      }
    }
  }

  #[test]
  fn playable_cell_touches_a_stone() {
    let cells = vec![
      Cell::Blank,
      Cell::Blank,
      Cell::White,
      Cell::Blank,
      Cell::White,
      Cell::White,
    ];
    let coords = (0..cells.len()).map(|x| Coord::new(x, 0)).collect();
    let line = Line { cells, coords };
    assert_eq!(playable_index(&line, 0, 5), Some(1));
    assert_eq!(playable_index(&line, 1, 5), Some(1));
    assert_eq!(playable_index(&line, 2, 4), Some(3));
  }

  #[test]
  fn no_patterns_on_off() {
    let mut board = Board::new(10);
    place_all(&mut board, &[(2, 2), (3, 2), (4, 2), (5, 2)], Player::B);
    let library = PatternLibrary::new(Difficulty::Off, Player::W);
    assert!(pattern_hits(&board, &library).is_empty());
  }

  #[test]
  fn empty_board_goes_to_center() {
    let board = Board::new(13);
    let mut rng = StdRng::seed_from_u64(1);
    let placement = fallback_move(&board, Player::B, &mut rng);
    assert_eq!(placement.coord, Coord::new(6, 6));
    assert_eq!(placement.kind, PlacementKind::Center);
  }

  #[test]
  fn fallback_stays_next_to_the_seed() {
    let mut board = Board::new(10);
    place_all(&mut board, &[(7, 7)], Player::B);
    for seed in 0..32 {
      let mut rng = StdRng::seed_from_u64(seed);
      let placement = fallback_move(&board, Player::W, &mut rng);
      assert!(board.is_empty(placement.coord.x, placement.coord.y));
      assert_eq!(placement.coord.x.abs_diff(7), 1);
      assert!(placement.coord.y.abs_diff(7) <= 1);
    }
  }

  #[test]
  fn seed_is_own_stone_closest_to_opponent() {
    let own = [Coord::new(0, 0), Coord::new(5, 5), Coord::new(6, 6)];
    let opponent = [Coord::new(9, 9), Coord::new(5, 7)];
    // (5, 5) and (6, 6) are both two steps from (5, 7); the first found wins.
    assert_eq!(closest_to(&own, &opponent), Some(Coord::new(5, 5)));
    assert_eq!(closest_to(&own, &opponent[..1]), Some(Coord::new(6, 6)));
    assert_eq!(closest_to(&own, &[]), Some(Coord::new(0, 0)));
    assert_eq!(closest_to(&[], &opponent), None);
  }

  #[test]
  fn crowded_board_only_goes_random_after_the_ceiling() {
    let size = 10;
    let hole = Coord::new(4, 4);
    let mut board = Board::new(size);
    for y in 0..size {
      for x in 0..size {
        if Coord::new(x, y) == hole {
          continue;
        }
        let player = if (x / 2 + y) % 2 == 0 { Player::B } else { Player::W };
        board.place(Coord::new(x, y), player).unwrap();
      }
    }

    for seed in 0..200 {
      let mut rng = StdRng::seed_from_u64(seed);
      let placement = fallback_move(&board, Player::W, &mut rng);
      assert!(placement.coord.x < size && placement.coord.y < size);
      match placement.kind {
        PlacementKind::Seeded { attempt } => {
          assert!(attempt < FALLBACK_ATTEMPTS);
          assert_eq!(placement.coord, hole);
        }
        PlacementKind::Random => {}
        other => panic!("unexpected placement {:?}", other),
      }
      if placement.coord != hole {
        assert_eq!(placement.kind, PlacementKind::Random);
      }
    }
  }
}
