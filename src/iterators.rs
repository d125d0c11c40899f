//! Ordered iteration over cell children and whole resolutions.
//!
//! Iteration works directly on the bit layout of the index: stepping a child
//! adds one at the finest digit position and lets the carry ripple into
//! coarser digits, skipping the deleted K subsequence under pentagons.

use crate::base_cells::base_cell_number_to_cell;
use crate::constants::{MAX_RES, NUM_BASE_CELLS, PER_DIGIT_OFFSET};
use crate::index::{
  get_index_digit, get_resolution, is_pentagon, is_valid_cell, set_index_digit, set_resolution,
};
use crate::types::{CellIndex, Direction};
use crate::NULL_INDEX;

#[inline]
fn increment_res_digit(h: &mut CellIndex, res: i32) {
  h.0 += 1u64 << ((MAX_RES - res) as u32 * PER_DIGIT_OFFSET as u32);
}

/// Iterator over the children of a cell at a given finer resolution, in
/// index order. Yields nothing if the parent or resolution is invalid.
#[derive(Debug, Clone, Copy)]
pub struct CellChildIter {
  h: CellIndex,
  parent_res: i32,
  // Finest resolution whose digit must still skip KAxes. Moves coarser as
  // the iteration leaves the pentagon's center subsequence. -1 for
  // hexagon parents.
  skip_digit: i32,
}

impl CellChildIter {
  /// Iterate the children of `parent` at `child_res`.
  #[must_use]
  pub fn new(parent: CellIndex, child_res: i32) -> Self {
    let parent_res = get_resolution(parent);
    if child_res < parent_res || child_res > MAX_RES || !is_valid_cell(parent) {
      return Self::exhausted();
    }

    let mut h = parent;
    set_resolution(&mut h, child_res);
    for r in (parent_res + 1)..=child_res {
      set_index_digit(&mut h, r, Direction::Center);
    }

    let skip_digit = if is_pentagon(h) { child_res } else { -1 };
    Self { h, parent_res, skip_digit }
  }

  /// Iterate all cells at `res` descending from base cell `base_cell_num`.
  #[must_use]
  pub fn for_base_cell(base_cell_num: i32, res: i32) -> Self {
    if base_cell_num < 0 || base_cell_num >= NUM_BASE_CELLS || !(0..=MAX_RES).contains(&res) {
      return Self::exhausted();
    }
    Self::new(base_cell_number_to_cell(base_cell_num), res)
  }

  fn exhausted() -> Self {
    Self { h: NULL_INDEX, parent_res: -1, skip_digit: -1 }
  }

  fn step(&mut self) {
    if self.h == NULL_INDEX {
      return;
    }
    let child_res = get_resolution(self.h);
    increment_res_digit(&mut self.h, child_res);

    let mut i = child_res;
    while i >= self.parent_res {
      if i == self.parent_res {
        // The carry reached the parent digit; every child was produced.
        *self = Self::exhausted();
        return;
      }

      // The first nonzero digit below a pentagon is never KAxes.
      if i == self.skip_digit && get_index_digit(self.h, i) == Direction::KAxes {
        increment_res_digit(&mut self.h, i);
        self.skip_digit -= 1;
        return;
      }

      if get_index_digit(self.h, i) == Direction::InvalidDigit {
        // Carry: zeroes this digit and bumps the next coarser one.
        increment_res_digit(&mut self.h, i);
      } else {
        break;
      }
      i -= 1;
    }
  }
}

impl Iterator for CellChildIter {
  type Item = CellIndex;

  fn next(&mut self) -> Option<CellIndex> {
    if self.h == NULL_INDEX {
      return None;
    }
    let current = self.h;
    self.step();
    Some(current)
  }
}

/// Iterator over every cell at a resolution, base cell by base cell, in
/// index order.
#[derive(Debug, Clone, Copy)]
pub struct CellResIter {
  base_cell_num: i32,
  res: i32,
  children: CellChildIter,
}

impl CellResIter {
  #[must_use]
  pub fn new(res: i32) -> Self {
    if !(0..=MAX_RES).contains(&res) {
      return Self {
        base_cell_num: NUM_BASE_CELLS,
        res,
        children: CellChildIter::exhausted(),
      };
    }
    Self {
      base_cell_num: 0,
      res,
      children: CellChildIter::for_base_cell(0, res),
    }
  }
}

impl Iterator for CellResIter {
  type Item = CellIndex;

  fn next(&mut self) -> Option<CellIndex> {
    loop {
      if let Some(h) = self.children.next() {
        return Some(h);
      }
      self.base_cell_num += 1;
      if self.base_cell_num >= NUM_BASE_CELLS {
        return None;
      }
      self.children = CellChildIter::for_base_cell(self.base_cell_num, self.res);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hierarchy::parent_child::{cell_to_children_size, cell_to_parent};
  use crate::index::{get_base_cell, get_num_cells};

  #[test]
  fn test_child_iter_invalid() {
    let parent = CellIndex(0x85283473fffffff);
    assert_eq!(CellChildIter::new(parent, 4).next(), None);
    assert_eq!(CellChildIter::new(parent, MAX_RES + 1).next(), None);
    assert_eq!(CellChildIter::new(NULL_INDEX, 5).next(), None);
  }

  #[test]
  fn test_base_cell_iter_invalid() {
    assert_eq!(CellChildIter::for_base_cell(-1, 0).next(), None);
    assert_eq!(CellChildIter::for_base_cell(NUM_BASE_CELLS, 0).next(), None);
    assert_eq!(CellChildIter::for_base_cell(0, -1).next(), None);
  }

  #[test]
  fn test_child_iter_hexagon() {
    let parent = CellIndex(0x85283473fffffff);
    let child_res = 7;
    let expected = cell_to_children_size(parent, child_res).unwrap();

    let mut count = 0;
    let mut prev = NULL_INDEX;
    for child in CellChildIter::new(parent, child_res) {
      assert_eq!(get_resolution(child), child_res);
      assert_eq!(get_base_cell(child), get_base_cell(parent));
      assert_eq!(cell_to_parent(child, 5).unwrap(), parent);
      if prev != NULL_INDEX {
        assert!(child.0 > prev.0, "children must be ordered");
      }
      prev = child;
      count += 1;
    }
    assert_eq!(count, expected);
  }

  #[test]
  fn test_child_iter_pentagon() {
    let parent = base_cell_number_to_cell(4);
    assert!(is_pentagon(parent));
    let child_res = 2;
    let expected = cell_to_children_size(parent, child_res).unwrap();
    assert_eq!(expected, 41);

    let mut count = 0;
    for child in CellChildIter::new(parent, child_res) {
      assert!(is_valid_cell(child));
      assert_eq!(get_resolution(child), child_res);
      assert_eq!(cell_to_parent(child, 0).unwrap(), parent);
      count += 1;
    }
    assert_eq!(count, expected);
  }

  #[test]
  fn test_child_iter_same_res() {
    let parent = CellIndex(0x85283473fffffff);
    let children: Vec<_> = CellChildIter::new(parent, 5).collect();
    assert_eq!(children, vec![parent]);
  }

  #[test]
  fn test_res_iter() {
    for res in 0..=2 {
      let expected = get_num_cells(res).unwrap();
      let mut count = 0;
      let mut prev = NULL_INDEX;
      for h in CellResIter::new(res) {
        assert_eq!(get_resolution(h), res);
        assert!(is_valid_cell(h));
        if prev != NULL_INDEX {
          assert!(h.0 > prev.0);
        }
        prev = h;
        count += 1;
      }
      assert_eq!(count, expected);
    }
  }

  #[test]
  fn test_res_iter_invalid() {
    assert_eq!(CellResIter::new(-1).next(), None);
    assert_eq!(CellResIter::new(MAX_RES + 1).next(), None);
  }
}
