//! Local IJ coordinate spaces anchored at an origin cell.
//!
//! Coordinates are only comparable when produced from the same origin, and
//! unfolding across icosahedron edges fails for cell pairs that are too far
//! apart or blocked by pentagon distortion.

use crate::base_cells::{
  get_base_cell_direction, get_base_cell_neighbor, is_base_cell_pentagon, is_base_cell_polar_pentagon,
  BASE_CELL_NEIGHBOR_60CCW_ROTS, INVALID_BASE_CELL,
};
use crate::constants::{CELL_MODE, INDEX_BLANK, NUM_BASE_CELLS};
use crate::coords::ijk::{
  down_ap7, down_ap7r, ij_to_ijk, ijk_add, ijk_neighbor, ijk_normalize, ijk_rotate60_cw, ijk_sub,
  ijk_to_ij, rotate60_ccw, rotate60_cw, unit_ijk_to_digit, up_ap7, up_ap7r,
};
use crate::index::{
  cell_rotate60_ccw, cell_rotate60_cw, cell_rotate_pent60_ccw, cell_rotate_pent60_cw,
  cell_to_face_ijk_with_initialized, get_base_cell, get_resolution, is_resolution_class_iii,
  leading_non_zero_digit, set_base_cell, set_index_digit, set_mode, set_resolution,
};
use crate::types::{CellIndex, CoordIJ, CoordIJK, Direction, FaceIJK, GridError};

// Rotations to perform when unfolding across a pentagon, indexed by the
// origin leading digit (or direction between base cells) and the index
// leading digit. -1 marks the deleted K subsequence. Values are 60 degree
// cw rotations; the reverse tables are ccw.
#[rustfmt::skip]
static PENTAGON_ROTATIONS: [[i32; 7]; 7] = [
  [0, -1, 0, 0, 0, 0, 0],
  [-1, -1, -1, -1, -1, -1, -1],
  [0, -1, 0, 0, 0, 1, 0],
  [0, -1, 0, 0, 1, 1, 0],
  [0, -1, 0, 5, 0, 0, 0],
  [0, -1, 5, 5, 0, 0, 0],
  [0, -1, 0, 0, 0, 0, 0],
];

#[rustfmt::skip]
static PENTAGON_ROTATIONS_REVERSE: [[i32; 7]; 7] = [
  [0, 0, 0, 0, 0, 0, 0],
  [-1, -1, -1, -1, -1, -1, -1],
  [0, 1, 0, 0, 0, 0, 0],
  [0, 1, 0, 0, 0, 1, 0],
  [0, 5, 0, 0, 0, 0, 0],
  [0, 5, 0, 5, 0, 0, 0],
  [0, 0, 0, 0, 0, 0, 0],
];

// Variants used when the index, rather than the origin, sits on the
// pentagon; the polar pentagons warp differently.
#[rustfmt::skip]
static PENTAGON_ROTATIONS_REVERSE_NONPOLAR: [[i32; 7]; 7] = [
  [0, 0, 0, 0, 0, 0, 0],
  [-1, -1, -1, -1, -1, -1, -1],
  [0, 1, 0, 0, 0, 0, 0],
  [0, 1, 0, 0, 0, 1, 0],
  [0, 5, 0, 0, 0, 0, 0],
  [0, 1, 0, 5, 1, 1, 0],
  [0, 0, 0, 0, 0, 0, 0],
];

#[rustfmt::skip]
static PENTAGON_ROTATIONS_REVERSE_POLAR: [[i32; 7]; 7] = [
  [0, 0, 0, 0, 0, 0, 0],
  [-1, -1, -1, -1, -1, -1, -1],
  [0, 1, 1, 1, 1, 1, 1],
  [0, 1, 0, 0, 0, 1, 0],
  [0, 1, 0, 0, 1, 1, 1],
  [0, 1, 0, 5, 1, 1, 0],
  [0, 1, 1, 0, 1, 1, 1],
];

/// Digit pairs whose unfolding across a pentagon is not defined.
#[rustfmt::skip]
static FAILED_DIRECTIONS: [[bool; 7]; 7] = [
  [false, false, false, false, false, false, false],
  [false, false, false, false, false, false, false],
  [false, false, false, false, true,  true,  false],
  [false, false, false, false, true,  false, true ],
  [false, false, true,  true,  false, false, false],
  [false, false, true,  false, false, false, true ],
  [false, false, false, true,  false, true,  false],
];

/// Produces the IJK coordinates of `index` in the local coordinate space
/// anchored at `origin`. Both cells must share a resolution and their base
/// cells must be identical or neighboring.
pub(crate) fn cell_to_local_ijk(origin: CellIndex, index: CellIndex, out: &mut CoordIJK) -> Result<(), GridError> {
  let res = get_resolution(origin);
  if res != get_resolution(index) {
    return Err(GridError::ResMismatch);
  }

  let origin_base_cell = get_base_cell(origin);
  let base_cell = get_base_cell(index);
  if !(0..NUM_BASE_CELLS).contains(&origin_base_cell) || !(0..NUM_BASE_CELLS).contains(&base_cell) {
    return Err(GridError::CellInvalid);
  }

  // Direction from the origin base cell to the index base cell, and back.
  let mut dir = Direction::Center;
  let mut rev_dir = Direction::Center;
  if origin_base_cell != base_cell {
    dir = get_base_cell_direction(origin_base_cell, base_cell);
    if dir == Direction::InvalidDigit {
      // Not neighbors; the coordinate space cannot be unfolded this far.
      return Err(GridError::Failed);
    }
    rev_dir = get_base_cell_direction(base_cell, origin_base_cell);
    if rev_dir == Direction::InvalidDigit {
      return Err(GridError::Failed);
    }
  }

  let origin_on_pent = is_base_cell_pentagon(origin_base_cell);
  let index_on_pent = is_base_cell_pentagon(base_cell);

  let mut h = index;
  if dir != Direction::Center {
    // Rotate the index into the orientation of the origin base cell,
    // undoing the rotation into its own base cell.
    let mut base_cell_rotations = BASE_CELL_NEIGHBOR_60CCW_ROTS[origin_base_cell as usize][dir as usize];
    if index_on_pent {
      while base_cell_rotations > 0 {
        h = cell_rotate_pent60_cw(h);
        rev_dir = rotate60_cw(rev_dir);
        if rev_dir == Direction::KAxes {
          rev_dir = rotate60_cw(rev_dir);
        }
        base_cell_rotations -= 1;
      }
    } else {
      while base_cell_rotations > 0 {
        h = cell_rotate60_cw(h);
        rev_dir = rotate60_cw(rev_dir);
        base_cell_rotations -= 1;
      }
    }
  }

  // The face is unused; this produces coordinates in the base cell's own
  // coordinate space.
  let mut index_fijk = FaceIJK::default();
  cell_to_face_ijk_with_initialized(h, &mut index_fijk);

  if dir != Direction::Center {
    if base_cell == origin_base_cell || (origin_on_pent && index_on_pent) {
      // Pentagon base cells are never neighbors of each other.
      return Err(GridError::Failed);
    }

    let mut pentagon_rotations = 0;
    let mut direction_rotations = 0;

    if origin_on_pent {
      let origin_leading = leading_non_zero_digit(origin);
      if origin_leading == Direction::InvalidDigit {
        return Err(GridError::CellInvalid);
      }
      if FAILED_DIRECTIONS[origin_leading as usize][dir as usize] {
        return Err(GridError::Failed);
      }
      direction_rotations = PENTAGON_ROTATIONS[origin_leading as usize][dir as usize];
      pentagon_rotations = direction_rotations;
    } else if index_on_pent {
      let index_leading = leading_non_zero_digit(h);
      if index_leading == Direction::InvalidDigit {
        return Err(GridError::CellInvalid);
      }
      if FAILED_DIRECTIONS[index_leading as usize][rev_dir as usize] {
        return Err(GridError::Failed);
      }
      pentagon_rotations = PENTAGON_ROTATIONS[rev_dir as usize][index_leading as usize];
    }

    if pentagon_rotations < 0 || direction_rotations < 0 {
      return Err(GridError::CellInvalid);
    }

    for _ in 0..pentagon_rotations {
      ijk_rotate60_cw(&mut index_fijk.coord);
    }

    // Translate the index into the origin base cell's space: the unit move
    // towards the index base cell, scaled down to the cell resolution.
    let mut offset = CoordIJK::default();
    ijk_neighbor(&mut offset, dir);
    for r in (0..res).rev() {
      if is_resolution_class_iii(r + 1) {
        down_ap7(&mut offset);
      } else {
        down_ap7r(&mut offset);
      }
    }

    for _ in 0..direction_rotations {
      ijk_rotate60_cw(&mut offset);
    }

    let coord = index_fijk.coord;
    ijk_add(&coord, &offset, &mut index_fijk.coord);
    ijk_normalize(&mut index_fijk.coord);
  } else if origin_on_pent && index_on_pent {
    // Same pentagon base cell for both; warp between their sectors.
    let origin_leading = leading_non_zero_digit(origin);
    let index_leading = leading_non_zero_digit(h);
    if origin_leading == Direction::InvalidDigit || index_leading == Direction::InvalidDigit {
      return Err(GridError::CellInvalid);
    }
    if FAILED_DIRECTIONS[origin_leading as usize][index_leading as usize] {
      return Err(GridError::Failed);
    }

    let within_pentagon_rotations = PENTAGON_ROTATIONS[origin_leading as usize][index_leading as usize];
    if within_pentagon_rotations < 0 {
      return Err(GridError::CellInvalid);
    }
    for _ in 0..within_pentagon_rotations {
      ijk_rotate60_cw(&mut index_fijk.coord);
    }
  }

  *out = index_fijk.coord;
  Ok(())
}

/// Produces the cell at local IJK coordinates `ijk` anchored at `origin`.
/// Inverse of [`cell_to_local_ijk`] over its defined domain.
pub(crate) fn local_ijk_to_cell(origin: CellIndex, ijk: &CoordIJK, out: &mut CellIndex) -> Result<(), GridError> {
  let res = get_resolution(origin);
  let origin_base_cell = get_base_cell(origin);
  if !(0..NUM_BASE_CELLS).contains(&origin_base_cell) {
    return Err(GridError::CellInvalid);
  }
  let origin_on_pent = is_base_cell_pentagon(origin_base_cell);

  *out = CellIndex(INDEX_BLANK);
  set_mode(out, CELL_MODE);
  set_resolution(out, res);

  if res == 0 {
    if ijk.i > 1 || ijk.j > 1 || ijk.k > 1 {
      // Out of range for the base cell neighbor table.
      return Err(GridError::Failed);
    }
    let dir = unit_ijk_to_digit(ijk);
    let new_base_cell = get_base_cell_neighbor(origin_base_cell, dir);
    if new_base_cell == INVALID_BASE_CELL {
      // Moving in the deleted direction off a pentagon.
      return Err(GridError::Failed);
    }
    set_base_cell(out, new_base_cell);
    return Ok(());
  }

  // Build the index from the finest digit up. What remains in `ijk_copy`
  // afterwards is the base cell offset in the origin's coordinate system.
  let mut ijk_copy = *ijk;
  for r in (0..res).rev() {
    let last_ijk = ijk_copy;
    let mut last_center;
    if is_resolution_class_iii(r + 1) {
      up_ap7(&mut ijk_copy);
      last_center = ijk_copy;
      down_ap7(&mut last_center);
    } else {
      up_ap7r(&mut ijk_copy);
      last_center = ijk_copy;
      down_ap7r(&mut last_center);
    }

    let mut diff = CoordIJK::default();
    ijk_sub(&last_ijk, &last_center, &mut diff);
    ijk_normalize(&mut diff);

    set_index_digit(out, r + 1, unit_ijk_to_digit(&diff));
  }

  if ijk_copy.i > 1 || ijk_copy.j > 1 || ijk_copy.k > 1 {
    // Out of range; not the origin's base cell or a neighbor of it.
    return Err(GridError::Failed);
  }

  let mut dir = unit_ijk_to_digit(&ijk_copy);
  let mut base_cell = get_base_cell_neighbor(origin_base_cell, dir);
  // An invalid base cell can only mean the origin is a pentagon, so the
  // index is not itself on a pentagon.
  let index_on_pent = base_cell != INVALID_BASE_CELL && is_base_cell_pentagon(base_cell);

  if dir != Direction::Center {
    // Unwarp the base cell direction before the neighbor lookup.
    let mut pentagon_rotations = 0;
    if origin_on_pent {
      let origin_leading = leading_non_zero_digit(origin);
      if origin_leading == Direction::InvalidDigit {
        return Err(GridError::CellInvalid);
      }
      pentagon_rotations = PENTAGON_ROTATIONS_REVERSE[origin_leading as usize][dir as usize];
      if pentagon_rotations < 0 {
        return Err(GridError::CellInvalid);
      }
      for _ in 0..pentagon_rotations {
        dir = rotate60_ccw(dir);
      }
      // The rotations are chosen so this does not point at the deleted
      // subsequence; if it still does, there is no cell here.
      if dir == Direction::KAxes {
        return Err(GridError::Pentagon);
      }
      base_cell = get_base_cell_neighbor(origin_base_cell, dir);
      if base_cell == INVALID_BASE_CELL || is_base_cell_pentagon(base_cell) {
        return Err(GridError::Failed);
      }
    }

    let base_cell_rotations = BASE_CELL_NEIGHBOR_60CCW_ROTS[origin_base_cell as usize][dir as usize];
    if base_cell_rotations < 0 {
      return Err(GridError::Failed);
    }

    if index_on_pent {
      let rev_dir = get_base_cell_direction(base_cell, origin_base_cell);
      if rev_dir == Direction::InvalidDigit {
        return Err(GridError::Failed);
      }

      // Rotate into the target base cell's space first, then undo the
      // pentagon warp based on the leading digit seen from there.
      for _ in 0..base_cell_rotations {
        *out = cell_rotate60_ccw(*out);
      }

      let index_leading = leading_non_zero_digit(*out);
      if index_leading == Direction::InvalidDigit {
        return Err(GridError::CellInvalid);
      }
      let table = if is_base_cell_polar_pentagon(base_cell) {
        &PENTAGON_ROTATIONS_REVERSE_POLAR
      } else {
        &PENTAGON_ROTATIONS_REVERSE_NONPOLAR
      };
      let reverse_rotations = table[rev_dir as usize][index_leading as usize];
      if reverse_rotations < 0 {
        return Err(GridError::CellInvalid);
      }
      for _ in 0..reverse_rotations {
        *out = cell_rotate_pent60_ccw(*out);
      }
    } else {
      for _ in 0..pentagon_rotations {
        *out = cell_rotate60_ccw(*out);
      }
      for _ in 0..base_cell_rotations {
        *out = cell_rotate60_ccw(*out);
      }
    }
  } else if origin_on_pent && index_on_pent {
    let origin_leading = leading_non_zero_digit(origin);
    let index_leading = leading_non_zero_digit(*out);
    if origin_leading == Direction::InvalidDigit || index_leading == Direction::InvalidDigit {
      return Err(GridError::CellInvalid);
    }
    if FAILED_DIRECTIONS[origin_leading as usize][index_leading as usize] {
      return Err(GridError::Failed);
    }

    let within_pentagon_rotations = PENTAGON_ROTATIONS[origin_leading as usize][index_leading as usize];
    if within_pentagon_rotations < 0 {
      return Err(GridError::CellInvalid);
    }
    for _ in 0..within_pentagon_rotations {
      *out = cell_rotate60_ccw(*out);
    }
  }

  if index_on_pent && leading_non_zero_digit(*out) == Direction::KAxes {
    // Landed on the deleted subsequence of the target pentagon.
    return Err(GridError::Pentagon);
  }

  set_base_cell(out, base_cell);
  Ok(())
}

/// The local IJ coordinates of `index` anchored at `origin`. `mode` is
/// reserved and must be 0.
pub fn cell_to_local_ij(origin: CellIndex, index: CellIndex, mode: u32, out: &mut CoordIJ) -> Result<(), GridError> {
  if mode != 0 {
    return Err(GridError::OptionInvalid);
  }
  let mut ijk = CoordIJK::default();
  cell_to_local_ijk(origin, index, &mut ijk)?;
  ijk_to_ij(&ijk, out);
  Ok(())
}

/// The cell at local IJ coordinates `ij` anchored at `origin`. `mode` is
/// reserved and must be 0.
pub fn local_ij_to_cell(origin: CellIndex, ij: &CoordIJ, mode: u32, out: &mut CellIndex) -> Result<(), GridError> {
  if mode != 0 {
    return Err(GridError::OptionInvalid);
  }
  let mut ijk = CoordIJK::default();
  ij_to_ijk(ij, &mut ijk)?;
  local_ijk_to_cell(origin, &ijk, out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::lat_lng_to_cell;
  use crate::latlng::set_geo_degs;
  use crate::traversal::grid_disk::grid_disk;
  use crate::types::LatLng;
  use crate::NULL_INDEX;

  fn sf_cell(res: i32) -> CellIndex {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, 37.779, -122.419);
    lat_lng_to_cell(&geo, res).unwrap()
  }

  #[test]
  fn test_local_ijk_identity() {
    // The frame is anchored at the origin's base cell, so the origin's own
    // coordinates are not necessarily zero; they must round trip exactly.
    let origin = sf_cell(5);

    let mut ijk = CoordIJK { i: 1, j: 1, k: 1 };
    cell_to_local_ijk(origin, origin, &mut ijk).unwrap();

    let mut back = NULL_INDEX;
    local_ijk_to_cell(origin, &ijk, &mut back).unwrap();
    assert_eq!(back, origin);
  }

  #[test]
  fn test_local_ijk_res_mismatch() {
    let mut ijk = CoordIJK::default();
    assert_eq!(
      cell_to_local_ijk(sf_cell(5), sf_cell(6), &mut ijk),
      Err(GridError::ResMismatch)
    );
  }

  fn assert_round_trip(origin: CellIndex, target: CellIndex) {
    let mut ijk = CoordIJK::default();
    if cell_to_local_ijk(origin, target, &mut ijk).is_err() {
      // Unreachable pairs are allowed to fail; there is nothing to invert.
      return;
    }
    let mut back = NULL_INDEX;
    local_ijk_to_cell(origin, &ijk, &mut back).unwrap();
    assert_eq!(back, target, "origin {:x} target {:x} via {:?}", origin.0, target.0, ijk);
  }

  #[test]
  fn test_local_ijk_round_trip_disk() {
    for res in [1, 2, 5] {
      let origin = sf_cell(res);
      let mut disk = [NULL_INDEX; 19];
      grid_disk(origin, 2, &mut disk).unwrap();
      for &cell in &disk {
        if cell != NULL_INDEX {
          assert_round_trip(origin, cell);
        }
      }
    }
  }

  #[test]
  fn test_local_ijk_neighbor_distance() {
    let origin = sf_cell(5);
    let mut ring = [NULL_INDEX; 7];
    grid_disk(origin, 1, &mut ring).unwrap();

    let mut origin_ijk = CoordIJK::default();
    cell_to_local_ijk(origin, origin, &mut origin_ijk).unwrap();

    for &cell in &ring {
      if cell == NULL_INDEX || cell == origin {
        continue;
      }
      let mut ijk = CoordIJK::default();
      cell_to_local_ijk(origin, cell, &mut ijk).unwrap();
      assert_eq!(
        crate::coords::ijk::ijk_distance(&origin_ijk, &ijk),
        1,
        "direct neighbors are at distance 1"
      );
    }
  }

  #[test]
  fn test_local_ij_wrappers() {
    let origin = sf_cell(5);

    let mut ij = CoordIJ::default();
    cell_to_local_ij(origin, origin, 0, &mut ij).unwrap();

    let mut back = NULL_INDEX;
    local_ij_to_cell(origin, &ij, 0, &mut back).unwrap();
    assert_eq!(back, origin);

    assert_eq!(
      cell_to_local_ij(origin, origin, 1, &mut ij),
      Err(GridError::OptionInvalid)
    );
    assert_eq!(
      local_ij_to_cell(origin, &CoordIJ::default(), 7, &mut back),
      Err(GridError::OptionInvalid)
    );
  }

  #[test]
  fn test_local_ij_base_cells() {
    // Res 0: the origin's neighbors are representable.
    let origin = crate::base_cells::base_cell_number_to_cell(15);
    let mut out = NULL_INDEX;
    local_ijk_to_cell(origin, &CoordIJK { i: 1, j: 0, k: 0 }, &mut out).unwrap();
    assert_eq!(get_resolution(out), 0);
    assert_ne!(out, origin);

    // Far out of range coordinates fail.
    assert_eq!(
      local_ijk_to_cell(origin, &CoordIJK { i: 2, j: 0, k: 0 }, &mut out),
      Err(GridError::Failed)
    );
  }

  #[test]
  fn test_pentagon_local_ijk() {
    let pentagon = CellIndex(0x81083ffffffffff);
    assert!(crate::index::is_pentagon(pentagon));

    let mut ijk = CoordIJK::default();
    cell_to_local_ijk(pentagon, pentagon, &mut ijk).unwrap();
    assert_eq!(ijk, CoordIJK::default());

    let mut disk = [NULL_INDEX; 7];
    grid_disk(pentagon, 1, &mut disk).unwrap();
    for &cell in &disk {
      if cell != NULL_INDEX {
        assert_round_trip(pentagon, cell);
      }
    }
  }
}
