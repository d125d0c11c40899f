//! Moving between resolutions: parents, children, and child positions.

use crate::constants::MAX_RES;
use crate::index::{
  get_index_digit, get_resolution, is_pentagon, is_valid_cell, set_index_digit, set_resolution,
};
use crate::iterators::CellChildIter;
use crate::math::ipow;
use crate::types::{CellIndex, Direction, GridError};
use crate::NULL_INDEX;

/// Number of descendants a cell has `n` resolution steps finer, accounting
/// for the deleted subsequence under pentagons.
#[inline]
fn descendant_count(is_pent: bool, n: i32) -> i64 {
  if is_pent {
    1 + 5 * (ipow(7, n as i64) - 1) / 6
  } else {
    ipow(7, n as i64)
  }
}

/// The parent of `h` at `parent_res`. A cell is its own parent at its own
/// resolution.
pub fn cell_to_parent(h: CellIndex, parent_res: i32) -> Result<CellIndex, GridError> {
  let child_res = get_resolution(h);
  if !(0..=MAX_RES).contains(&parent_res) {
    return Err(GridError::ResDomain);
  }
  if parent_res > child_res {
    return Err(GridError::ResMismatch);
  }
  if !is_valid_cell(h) {
    return Err(GridError::CellInvalid);
  }
  if parent_res == child_res {
    return Ok(h);
  }

  let mut parent = h;
  set_resolution(&mut parent, parent_res);
  for r in (parent_res + 1)..=child_res {
    set_index_digit(&mut parent, r, Direction::InvalidDigit);
  }
  Ok(parent)
}

/// The exact number of children of `h` at `child_res`.
pub fn cell_to_children_size(h: CellIndex, child_res: i32) -> Result<i64, GridError> {
  if !is_valid_cell(h) {
    return Err(GridError::CellInvalid);
  }
  if !(0..=MAX_RES).contains(&child_res) || child_res < get_resolution(h) {
    return Err(GridError::ResDomain);
  }
  let n = child_res - get_resolution(h);
  Ok(descendant_count(is_pentagon(h), n))
}

/// The center child of `h` at `child_res`: the descendant reached by
/// following only Center digits.
pub fn cell_to_center_child(h: CellIndex, child_res: i32) -> Result<CellIndex, GridError> {
  if !is_valid_cell(h) {
    return Err(GridError::CellInvalid);
  }
  if !(0..=MAX_RES).contains(&child_res) || child_res < get_resolution(h) {
    return Err(GridError::ResDomain);
  }

  let parent_res = get_resolution(h);
  let mut child = h;
  set_resolution(&mut child, child_res);
  for r in (parent_res + 1)..=child_res {
    set_index_digit(&mut child, r, Direction::Center);
  }
  Ok(child)
}

/// Fill `children` with every child of `h` at `child_res`, in index order.
/// The slice must hold at least `cell_to_children_size` entries; extra
/// entries are nulled.
pub fn cell_to_children(h: CellIndex, child_res: i32, children: &mut [CellIndex]) -> Result<(), GridError> {
  let expected = cell_to_children_size(h, child_res)? as usize;
  if children.len() < expected {
    return Err(GridError::MemoryBounds);
  }

  let mut i = 0;
  for child in CellChildIter::new(h, child_res) {
    children[i] = child;
    i += 1;
  }
  for slot in children[i..].iter_mut() {
    *slot = NULL_INDEX;
  }
  Ok(())
}

/// The position of `child` within the ordered list of all children of its
/// ancestor at `parent_res`.
pub fn cell_to_child_pos(child: CellIndex, parent_res: i32) -> Result<i64, GridError> {
  // Also validates the cell and the resolution range.
  let _ = cell_to_parent(child, parent_res)?;
  let child_res = get_resolution(child);

  let mut pos: i64 = 0;
  for res in (parent_res + 1)..=child_res {
    let digit = get_index_digit(child, res);
    let n = child_res - res;
    let slot = ipow(7, n as i64);

    let parent = cell_to_parent(child, res - 1)?;
    if is_pentagon(parent) {
      // Ordering under a pentagon: the center subsequence first, then the
      // five hexagon slots with KAxes deleted.
      match digit {
        Direction::Center => {}
        Direction::KAxes => return Err(GridError::CellInvalid),
        _ => {
          pos += descendant_count(true, n);
          pos += (digit as i64 - 2) * slot;
        }
      }
    } else if digit != Direction::Center {
      pos += digit as i64 * slot;
    }
  }
  Ok(pos)
}

/// The child of `parent` at `child_res` occupying position `child_pos` in
/// the ordered child list. Inverse of [`cell_to_child_pos`].
pub fn child_pos_to_cell(child_pos: i64, parent: CellIndex, child_res: i32) -> Result<CellIndex, GridError> {
  if !is_valid_cell(parent) {
    return Err(GridError::CellInvalid);
  }
  if !(0..=MAX_RES).contains(&child_res) {
    return Err(GridError::ResDomain);
  }
  let parent_res = get_resolution(parent);
  if child_res < parent_res {
    return Err(GridError::ResMismatch);
  }
  let count = descendant_count(is_pentagon(parent), child_res - parent_res);
  if child_pos < 0 || child_pos >= count {
    return Err(GridError::Domain);
  }

  let mut child = parent;
  set_resolution(&mut child, child_res);

  let mut pos = child_pos;
  let mut on_pentagon = is_pentagon(parent);
  for res in (parent_res + 1)..=child_res {
    let n = child_res - res;
    let slot = ipow(7, n as i64);

    let digit = if on_pentagon {
      let center_count = descendant_count(true, n);
      if pos < center_count {
        Direction::Center
      } else {
        pos -= center_count;
        let q = pos / slot;
        pos %= slot;
        on_pentagon = false;
        // Slots 0..4 map onto digits 2..6; KAxes is deleted.
        Direction::try_from((q + 2) as u8).map_err(|_| GridError::Failed)?
      }
    } else {
      let q = pos / slot;
      pos %= slot;
      Direction::try_from(q as u8).map_err(|_| GridError::Failed)?
    };
    set_index_digit(&mut child, res, digit);
  }
  Ok(child)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::base_cells::base_cell_number_to_cell;
  use crate::indexing::lat_lng_to_cell;
  use crate::latlng::set_geo_degs;
  use crate::types::LatLng;

  #[test]
  fn test_cell_to_parent() {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, 37.779, -122.419);
    let child = lat_lng_to_cell(&geo, 10).unwrap();

    let parent9 = cell_to_parent(child, 9).unwrap();
    assert_eq!(get_resolution(parent9), 9);
    assert_eq!(parent9, CellIndex(0x89283082877ffff));

    let parent5 = cell_to_parent(child, 5).unwrap();
    assert_eq!(parent5, CellIndex(0x85283083fffffff));

    assert_eq!(cell_to_parent(child, 10), Ok(child));
    assert_eq!(cell_to_parent(child, 11), Err(GridError::ResMismatch));
    assert_eq!(cell_to_parent(child, -1), Err(GridError::ResDomain));
    // the resolution check fires before validity: the null index is res 0
    assert_eq!(cell_to_parent(NULL_INDEX, 5), Err(GridError::ResMismatch));
  }

  #[test]
  fn test_parent_known_value() {
    let child = CellIndex(0x8a18443b1337fff);
    let parent = cell_to_parent(child, 5).unwrap();
    assert_eq!(parent.0, 599405651935887359);
  }

  #[test]
  fn test_cell_to_children_size() {
    let hex = CellIndex(0x85283473fffffff);
    assert_eq!(cell_to_children_size(hex, 5), Ok(1));
    assert_eq!(cell_to_children_size(hex, 6), Ok(7));
    assert_eq!(cell_to_children_size(hex, 7), Ok(49));
    assert_eq!(cell_to_children_size(hex, 4), Err(GridError::ResDomain));

    let pent = base_cell_number_to_cell(4);
    assert!(is_pentagon(pent));
    assert_eq!(cell_to_children_size(pent, 0), Ok(1));
    assert_eq!(cell_to_children_size(pent, 1), Ok(6));
    assert_eq!(cell_to_children_size(pent, 2), Ok(41));
  }

  #[test]
  fn test_cell_to_center_child() {
    let h = CellIndex(0x8a18443b1337fff);
    assert_eq!(cell_to_center_child(h, 10), Ok(h));

    let child13 = cell_to_center_child(h, 13).unwrap();
    assert_eq!(get_resolution(child13), 13);
    assert_eq!(child13.0, 635434448706535487);
    for r in 11..=13 {
      assert_eq!(get_index_digit(child13, r), Direction::Center);
    }
    assert_eq!(cell_to_parent(child13, 10), Ok(h));

    let pent = base_cell_number_to_cell(4);
    let pent_child = cell_to_center_child(pent, 3).unwrap();
    assert!(is_pentagon(pent_child));
  }

  #[test]
  fn test_cell_to_children() {
    let parent = CellIndex(0x85283473fffffff);
    let mut children = [NULL_INDEX; 7];
    cell_to_children(parent, 6, &mut children).unwrap();
    for &child in &children {
      assert!(is_valid_cell(child));
      assert_eq!(cell_to_parent(child, 5), Ok(parent));
    }
    assert_eq!(children[0], cell_to_center_child(parent, 6).unwrap());

    let mut too_small = [NULL_INDEX; 6];
    assert_eq!(
      cell_to_children(parent, 6, &mut too_small),
      Err(GridError::MemoryBounds)
    );
  }

  #[test]
  fn test_child_pos_round_trip_hexagon() {
    let parent = CellIndex(0x85283473fffffff);
    let child_res = 7;
    let count = cell_to_children_size(parent, child_res).unwrap() as usize;
    let mut children = vec![NULL_INDEX; count];
    cell_to_children(parent, child_res, &mut children).unwrap();

    for (expected_pos, &child) in children.iter().enumerate() {
      let pos = cell_to_child_pos(child, 5).unwrap();
      assert_eq!(pos, expected_pos as i64);
      assert_eq!(child_pos_to_cell(pos, parent, child_res), Ok(child));
    }
  }

  #[test]
  fn test_child_pos_round_trip_pentagon() {
    let parent = base_cell_number_to_cell(4);
    let child_res = 3;
    let count = cell_to_children_size(parent, child_res).unwrap() as usize;
    let mut children = vec![NULL_INDEX; count];
    cell_to_children(parent, child_res, &mut children).unwrap();

    for (expected_pos, &child) in children.iter().enumerate() {
      assert!(is_valid_cell(child));
      let pos = cell_to_child_pos(child, 0).unwrap();
      assert_eq!(pos, expected_pos as i64, "child {:x}", child.0);
      assert_eq!(child_pos_to_cell(pos, parent, child_res), Ok(child));
    }
  }

  #[test]
  fn test_child_pos_errors() {
    let child = lat_lng_to_cell(&LatLng { lat: 0.0, lng: 0.0 }, 8).unwrap();
    assert_eq!(cell_to_child_pos(child, -1), Err(GridError::ResDomain));
    assert_eq!(cell_to_child_pos(child, 16), Err(GridError::ResDomain));
    assert_eq!(cell_to_child_pos(child, 9), Err(GridError::ResMismatch));

    let parent = lat_lng_to_cell(&LatLng { lat: 0.0, lng: 0.0 }, 5).unwrap();
    assert_eq!(child_pos_to_cell(0, parent, 4), Err(GridError::ResMismatch));
    assert_eq!(child_pos_to_cell(0, parent, 16), Err(GridError::ResDomain));
    assert_eq!(child_pos_to_cell(-1, parent, 6), Err(GridError::Domain));
    assert_eq!(child_pos_to_cell(7, parent, 6), Err(GridError::Domain));
  }
}
