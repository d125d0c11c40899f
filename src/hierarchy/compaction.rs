//! Lossless compaction of uniform-resolution cell sets.

use std::collections::HashMap;

use crate::constants::MAX_RES;
use crate::hierarchy::parent_child::{cell_to_children, cell_to_children_size, cell_to_parent};
use crate::index::{get_resolution, is_pentagon, is_valid_cell};
use crate::types::{CellIndex, GridError};
use crate::NULL_INDEX;

/// The exact number of cells produced by uncompacting `compacted_set` to
/// `res`. Null entries are skipped.
pub fn uncompact_cells_size(compacted_set: &[CellIndex], res: i32) -> Result<i64, GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }

  let mut count: i64 = 0;
  for &cell in compacted_set {
    if cell == NULL_INDEX {
      continue;
    }
    if !is_valid_cell(cell) {
      return Err(GridError::CellInvalid);
    }
    if get_resolution(cell) > res {
      return Err(GridError::ResMismatch);
    }
    count = count.saturating_add(cell_to_children_size(cell, res)?);
  }
  Ok(count)
}

/// Expand a compacted set back to the uniform resolution `res`, writing the
/// cells into `out`. Size `out` with [`uncompact_cells_size`]; extra entries
/// are nulled.
pub fn uncompact_cells(compacted_set: &[CellIndex], res: i32, out: &mut [CellIndex]) -> Result<(), GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }

  let mut idx = 0;
  for &cell in compacted_set {
    if cell == NULL_INDEX {
      continue;
    }
    if !is_valid_cell(cell) {
      return Err(GridError::CellInvalid);
    }
    if get_resolution(cell) > res {
      return Err(GridError::ResMismatch);
    }

    let children = cell_to_children_size(cell, res)? as usize;
    if idx + children > out.len() {
      return Err(GridError::MemoryBounds);
    }
    cell_to_children(cell, res, &mut out[idx..idx + children])?;
    idx += children;
  }

  for slot in out[idx..].iter_mut() {
    *slot = NULL_INDEX;
  }
  Ok(())
}

/// Compact a set of cells of uniform resolution into the smallest covering
/// set: wherever all 7 children of a parent (6 for a pentagon) are present,
/// they are replaced by the parent, repeatedly.
///
/// The input is sorted in place. Returns the number of cells written to
/// `out`; remaining entries are nulled. Duplicate inputs are an error.
pub fn compact_cells(cell_set: &mut [CellIndex], out: &mut [CellIndex]) -> Result<usize, GridError> {
  cell_set.sort_unstable();

  let mut res = -1;
  for (i, &cell) in cell_set.iter().enumerate() {
    if cell == NULL_INDEX {
      continue;
    }
    if !is_valid_cell(cell) {
      return Err(GridError::CellInvalid);
    }
    if res == -1 {
      res = get_resolution(cell);
    } else if get_resolution(cell) != res {
      return Err(GridError::ResMismatch);
    }
    if i > 0 && cell == cell_set[i - 1] {
      return Err(GridError::DuplicateInput);
    }
  }

  let mut remaining: Vec<CellIndex> =
    cell_set.iter().copied().filter(|&h| h != NULL_INDEX).collect();
  let mut written = 0;

  let mut emit = |cell: CellIndex, written: &mut usize| -> Result<(), GridError> {
    if *written >= out.len() {
      return Err(GridError::MemoryBounds);
    }
    out[*written] = cell;
    *written += 1;
    Ok(())
  };

  while !remaining.is_empty() {
    let current_res = get_resolution(remaining[0]);
    if current_res == 0 {
      for cell in remaining.drain(..) {
        emit(cell, &mut written)?;
      }
      break;
    }

    // Group siblings by parent; a parent whose full complement of children
    // is present replaces them in the next round.
    let mut by_parent: HashMap<CellIndex, Vec<CellIndex>> = HashMap::new();
    for &cell in &remaining {
      let parent = cell_to_parent(cell, current_res - 1)?;
      by_parent.entry(parent).or_default().push(cell);
    }

    let mut next_round = Vec::new();
    for (parent, children) in by_parent {
      let full = if is_pentagon(parent) { 6 } else { 7 };
      if children.len() == full {
        next_round.push(parent);
      } else {
        for cell in children {
          emit(cell, &mut written)?;
        }
      }
    }

    next_round.sort_unstable();
    remaining = next_round;
  }

  for slot in out[written..].iter_mut() {
    *slot = NULL_INDEX;
  }
  Ok(written)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::base_cells::base_cell_number_to_cell;

  #[test]
  fn test_uncompact_cells_size() {
    let compacted = [CellIndex(0x85283473fffffff)];
    assert_eq!(uncompact_cells_size(&compacted, 5), Ok(1));
    assert_eq!(uncompact_cells_size(&compacted, 6), Ok(7));
    assert_eq!(uncompact_cells_size(&compacted, 7), Ok(49));
    assert_eq!(uncompact_cells_size(&compacted, 4), Err(GridError::ResMismatch));
    assert_eq!(uncompact_cells_size(&[NULL_INDEX], 5), Ok(0));

    let pent = [base_cell_number_to_cell(4)];
    assert_eq!(uncompact_cells_size(&pent, 1), Ok(6));
    assert_eq!(uncompact_cells_size(&pent, 2), Ok(41));
  }

  #[test]
  fn test_uncompact_cells() {
    let compacted = [CellIndex(0x85283473fffffff)];

    let mut same_res = [NULL_INDEX; 1];
    uncompact_cells(&compacted, 5, &mut same_res).unwrap();
    assert_eq!(same_res[0], compacted[0]);

    let mut finer = vec![NULL_INDEX; 7];
    uncompact_cells(&compacted, 6, &mut finer).unwrap();
    let mut expected = vec![NULL_INDEX; 7];
    cell_to_children(compacted[0], 6, &mut expected).unwrap();
    finer.sort_unstable();
    expected.sort_unstable();
    assert_eq!(finer, expected);

    let mut too_small = [NULL_INDEX; 6];
    assert_eq!(
      uncompact_cells(&compacted, 6, &mut too_small),
      Err(GridError::MemoryBounds)
    );
  }

  #[test]
  fn test_compact_single_parent() {
    let parent = CellIndex(0x85283473fffffff);
    let mut children = vec![NULL_INDEX; 7];
    cell_to_children(parent, 6, &mut children).unwrap();

    let mut out = vec![NULL_INDEX; 7];
    let written = compact_cells(&mut children, &mut out).unwrap();
    assert_eq!(written, 1);
    assert_eq!(out[0], parent);
  }

  #[test]
  fn test_compact_known_children() {
    let parent = CellIndex(0x8a18443b1337fff);
    let count = cell_to_children_size(parent, 11).unwrap() as usize;
    assert_eq!(count, 7);
    let mut children = vec![NULL_INDEX; count];
    cell_to_children(parent, 11, &mut children).unwrap();

    let mut out = vec![NULL_INDEX; count];
    let written = compact_cells(&mut children, &mut out).unwrap();
    assert_eq!(&out[..written], &[parent]);
  }

  #[test]
  fn test_compact_two_levels() {
    let grandparent = CellIndex(0x85283473fffffff);
    let count = cell_to_children_size(grandparent, 7).unwrap() as usize;
    let mut cells = vec![NULL_INDEX; count];
    cell_to_children(grandparent, 7, &mut cells).unwrap();

    let mut out = vec![NULL_INDEX; count];
    let written = compact_cells(&mut cells, &mut out).unwrap();
    assert_eq!(written, 1);
    assert_eq!(out[0], grandparent);
  }

  #[test]
  fn test_compact_partial() {
    let mut cells = [
      CellIndex(0x86283470fffffff),
      CellIndex(0x86283472fffffff),
      CellIndex(0x86283474fffffff),
    ];
    let expected = {
      let mut v = cells;
      v.sort_unstable();
      v
    };

    let mut out = vec![NULL_INDEX; cells.len()];
    let written = compact_cells(&mut cells, &mut out).unwrap();
    out[..written].sort_unstable();
    assert_eq!(written, 3);
    assert_eq!(&out[..written], &expected[..]);
  }

  #[test]
  fn test_compact_duplicate_input() {
    let mut cells = [CellIndex(0x86283470fffffff), CellIndex(0x86283470fffffff)];
    let mut out = vec![NULL_INDEX; 2];
    assert_eq!(compact_cells(&mut cells, &mut out), Err(GridError::DuplicateInput));
  }

  #[test]
  fn test_compact_mixed_res() {
    let mut cells = [CellIndex(0x85283473fffffff), CellIndex(0x86283470fffffff)];
    let mut out = vec![NULL_INDEX; 2];
    assert_eq!(compact_cells(&mut cells, &mut out), Err(GridError::ResMismatch));
  }

  #[test]
  fn test_compact_pentagon_children() {
    let pent = base_cell_number_to_cell(4);
    let mut children = vec![NULL_INDEX; 6];
    cell_to_children(pent, 1, &mut children).unwrap();

    let mut out = vec![NULL_INDEX; 6];
    let written = compact_cells(&mut children, &mut out).unwrap();
    assert_eq!(written, 1);
    assert_eq!(out[0], pent);
  }

  #[test]
  fn test_compact_round_trip() {
    let parent = CellIndex(0x85283473fffffff);
    let mut cells = vec![NULL_INDEX; 49];
    cell_to_children(parent, 7, &mut cells).unwrap();
    // Drop one cell so only the other six res-6 groups compact.
    let dropped = cells.pop().unwrap();

    let mut out = vec![NULL_INDEX; cells.len()];
    let written = compact_cells(&mut cells, &mut out).unwrap();
    assert!(written < 49);

    let size = uncompact_cells_size(&out[..written], 7).unwrap();
    assert_eq!(size, 48);
    let mut uncompacted = vec![NULL_INDEX; size as usize];
    uncompact_cells(&out[..written], 7, &mut uncompacted).unwrap();
    assert!(!uncompacted.contains(&dropped));
  }
}
