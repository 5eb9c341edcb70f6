use lazy_static::lazy_static;

use crate::types::{Cell, Difficulty, Player};

/// One position of a template, relative to the side about to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
  Own,
  Opponent,
  Blank,
}

// `S` own stone, `O` opponent stone, `.` blank. Listed strongest first.
const EASY_SOURCE: &[&str] = &[
  ".SSSS", "S.SSS", "SS.SS", ".OOOO", "O.OOO", "OO.OO", ".SSS.", ".OOO.", ".SSS",
];

const HARD_SOURCE: &[&str] = &[
  ".SSSS", "SS.SS", "S.SSS", ".OOOO", "O.OOO", "OO.OO", ".O.OO", ".S.SS", ".SSS.", ".OOO.",
  ".SSS", "S.S.S", ".OOO", "O.O.O",
];

lazy_static! {
  static ref EASY_TEMPLATES: Vec<Vec<Mark>> = parse_templates(EASY_SOURCE);
  static ref HARD_TEMPLATES: Vec<Vec<Mark>> = parse_templates(HARD_SOURCE);
}

fn parse_templates(source: &[&str]) -> Vec<Vec<Mark>> {
  source
    .iter()
    .map(|template| {
      template
        .chars()
        .map(|c| match c {
          'S' => Mark::Own,
          'O' => Mark::Opponent,
          _ => Mark::Blank,
        })
        .collect()
    })
    .collect()
}

/// The generic templates behind a difficulty level, before colour substitution.
pub fn templates_for(difficulty: Difficulty) -> &'static [Vec<Mark>] {
  match difficulty {
    Difficulty::Off => &[],
    Difficulty::Easy | Difficulty::Medium => EASY_TEMPLATES.as_slice(),
    Difficulty::Hard => HARD_TEMPLATES.as_slice(),
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
  pub rank: usize,
  pub cells: Vec<Cell>,
}

/// Ranked, colour-specific patterns for one side. Lower rank is more urgent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternLibrary {
  mover: Player,
  patterns: Vec<Pattern>,
}

impl PatternLibrary {
  pub fn new(difficulty: Difficulty, mover: Player) -> Self {
    let mut patterns: Vec<Pattern> = Vec::new();

    for template in templates_for(difficulty) {
      let cells: Vec<Cell> = template
        .iter()
        .map(|mark| match mark {
          Mark::Own => Cell::from(mover),
          Mark::Opponent => Cell::from(mover.other()),
          Mark::Blank => Cell::Blank,
        })
        .collect();
      let reversed: Vec<Cell> = cells.iter().rev().copied().collect();
      let palindrome = reversed == cells;

      patterns.push(Pattern {
        rank: patterns.len(),
        cells,
      });
      if !palindrome {
        patterns.push(Pattern {
          rank: patterns.len(),
          cells: reversed,
        });
      }
    }

    Self { mover, patterns }
  }

  pub fn mover(&self) -> Player {
    self.mover
  }

  pub fn patterns(&self) -> &[Pattern] {
    &self.patterns
  }

  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use quickcheck::quickcheck;

  use super::*;

  fn difficulty_from(level: u8) -> Difficulty {
    Difficulty::from_level(level % 4).unwrap()
  }

  quickcheck! {
    fn reversal_is_always_present(level: u8, black: bool) -> bool {
      let mover = if black { Player::B } else { Player::W };
      let library = PatternLibrary::new(difficulty_from(level), mover);
      library.patterns().iter().all(|pattern| {
        let reversed: Vec<Cell> = pattern.cells.iter().rev().copied().collect();
        library.patterns().iter().any(|other| other.cells == reversed)
      })
    }

    fn ranks_follow_library_order(level: u8) -> bool {
      let library = PatternLibrary::new(difficulty_from(level), Player::W);
      library.patterns().iter().enumerate().all(|(idx, pattern)| pattern.rank == idx)
    }
  }

  #[test]
  fn off_is_empty() {
    assert!(PatternLibrary::new(Difficulty::Off, Player::B).is_empty());
  }

  #[test]
  fn easy_and_hard_differ() {
    let easy = PatternLibrary::new(Difficulty::Easy, Player::W);
    let medium = PatternLibrary::new(Difficulty::Medium, Player::W);
    let hard = PatternLibrary::new(Difficulty::Hard, Player::W);
    assert!(!easy.is_empty());
    assert!(!hard.is_empty());
    assert_eq!(easy, medium);
    assert_ne!(easy.patterns(), hard.patterns());
    // Four palindromes among nine easy templates, six among fourteen hard ones.
    assert_eq!(easy.len(), 14);
    assert_eq!(hard.len(), 22);
  }

  #[test]
  fn substitutes_mover_colours() {
    let library = PatternLibrary::new(Difficulty::Easy, Player::W);
    let first = &library.patterns()[0];
    assert_eq!(
      first.cells,
      vec![Cell::Blank, Cell::White, Cell::White, Cell::White, Cell::White]
    );
    assert_eq!(
      library.patterns()[1].cells,
      vec![Cell::White, Cell::White, Cell::White, Cell::White, Cell::Blank]
    );

    let as_black = PatternLibrary::new(Difficulty::Easy, Player::B);
    assert_eq!(as_black.patterns()[0].cells[1], Cell::Black);
  }

  #[test]
  fn hard_has_four_cell_templates() {
    let hard = PatternLibrary::new(Difficulty::Hard, Player::B);
    assert!(hard.patterns().iter().any(|p| p.cells.len() == 4));
  }
}
