//! Bit layout accessors for 64-bit cell indexes and the conversions
//! between indexes and face coordinates.

#![allow(clippy::cast_possible_truncation)]

pub mod inspection;
pub mod strings;

use crate::base_cells::{
  base_cell_is_cw_offset, base_cell_to_face_ijk, face_ijk_to_base_cell, face_ijk_to_base_cell_ccw_rot60,
  is_base_cell_pentagon, INVALID_BASE_CELL, INVALID_ROTATIONS, MAX_FACE_COORD,
};
use crate::constants::{
  BASE_CELL_MASK, BASE_CELL_OFFSET, CELL_MODE, DIGIT_MASK, HIGH_BIT_MASK, INDEX_BLANK, MAX_RES, MODE_MASK, MODE_OFFSET,
  NUM_BASE_CELLS, PER_DIGIT_OFFSET, RESERVED_MASK, RESERVED_OFFSET, RES_MASK, RES_OFFSET,
};
use crate::coords::face_ijk::{adjust_overage_class_ii, Overage};
use crate::coords::ijk::{
  down_ap7, down_ap7r, ijk_neighbor, ijk_normalize, ijk_sub, rotate60_ccw, rotate60_cw, unit_ijk_to_digit, up_ap7,
  up_ap7r,
};
use crate::types::{CoordIJK, Direction, FaceIJK};
use crate::{CellIndex, GridError, NULL_INDEX};

pub use inspection::{get_num_cells, is_pentagon, is_valid_cell};
pub use strings::{cell_to_string, cell_to_string_buf, string_to_cell};

const DIGITS: [Direction; 8] = [
  Direction::Center,
  Direction::KAxes,
  Direction::JAxes,
  Direction::JkAxes,
  Direction::IAxes,
  Direction::IkAxes,
  Direction::IjAxes,
  Direction::InvalidDigit,
];

/// The mode bits of an index.
#[inline(always)]
#[must_use]
pub const fn get_mode(h: CellIndex) -> u8 {
  ((h.0 & MODE_MASK) >> MODE_OFFSET) as u8
}

#[inline(always)]
pub(crate) fn set_mode(h: &mut CellIndex, mode: u8) {
  h.0 = (h.0 & !MODE_MASK) | ((mode as u64) << MODE_OFFSET);
}

/// The resolution of an index, 0 through 15.
#[inline(always)]
#[must_use]
pub const fn get_resolution(h: CellIndex) -> i32 {
  ((h.0 & RES_MASK) >> RES_OFFSET) as i32
}

#[inline(always)]
pub(crate) fn set_resolution(h: &mut CellIndex, res: i32) {
  h.0 = (h.0 & !RES_MASK) | ((res as u64) << RES_OFFSET);
}

/// The base cell number of an index, 0 through 121 for valid cells.
#[inline(always)]
#[must_use]
pub const fn get_base_cell(h: CellIndex) -> i32 {
  ((h.0 & BASE_CELL_MASK) >> BASE_CELL_OFFSET) as i32
}

#[inline(always)]
pub(crate) fn set_base_cell(h: &mut CellIndex, base_cell: i32) {
  h.0 = (h.0 & !BASE_CELL_MASK) | ((base_cell as u64) << BASE_CELL_OFFSET);
}

/// The digit for resolution `res`. `res` must be between 1 and the
/// index's own resolution.
#[inline(always)]
#[must_use]
pub(crate) fn get_index_digit(h: CellIndex, res: i32) -> Direction {
  let shift = (MAX_RES - res) as u32 * PER_DIGIT_OFFSET as u32;
  DIGITS[((h.0 >> shift) & DIGIT_MASK) as usize]
}

#[inline(always)]
pub(crate) fn set_index_digit(h: &mut CellIndex, res: i32, digit: Direction) {
  let shift = (MAX_RES - res) as u32 * PER_DIGIT_OFFSET as u32;
  h.0 = (h.0 & !(DIGIT_MASK << shift)) | ((digit as u64) << shift);
}

/// The reserved bits, 0 for valid cell indexes.
#[inline(always)]
#[must_use]
pub(crate) const fn get_reserved_bits(h: CellIndex) -> u8 {
  ((h.0 & RESERVED_MASK) >> RESERVED_OFFSET) as u8
}

#[inline(always)]
pub(crate) fn set_reserved_bits(h: &mut CellIndex, v: u8) {
  h.0 = (h.0 & !RESERVED_MASK) | ((v as u64) << RESERVED_OFFSET);
}

#[inline(always)]
#[must_use]
pub(crate) const fn get_high_bit(h: CellIndex) -> u8 {
  ((h.0 & HIGH_BIT_MASK) >> 63) as u8
}

#[inline(always)]
pub(crate) fn set_high_bit(h: &mut CellIndex, v: u8) {
  h.0 = (h.0 & !HIGH_BIT_MASK) | ((v as u64) << 63);
}

/// Initialize a cell index with the given resolution and base cell, with
/// every digit in use set to `init_digit`.
pub(crate) fn set_cell_index(h: &mut CellIndex, res: i32, base_cell: i32, init_digit: Direction) {
  h.0 = INDEX_BLANK;
  set_mode(h, CELL_MODE);
  set_resolution(h, res);
  set_base_cell(h, base_cell);
  for r in 1..=res {
    set_index_digit(h, r, init_digit);
  }
}

/// Odd resolutions are Class III, even resolutions Class II.
#[inline]
#[must_use]
pub(crate) fn is_resolution_class_iii(res: i32) -> bool {
  res % 2 == 1
}

/// The coarsest non-center digit of the index, or `Center` if all digits
/// are centered.
#[inline]
#[must_use]
pub(crate) fn leading_non_zero_digit(h: CellIndex) -> Direction {
  for r in 1..=get_resolution(h) {
    let digit = get_index_digit(h, r);
    if digit != Direction::Center {
      return digit;
    }
  }
  Direction::Center
}

/// Rotate an index 60 degrees counter-clockwise.
pub(crate) fn cell_rotate60_ccw(mut h: CellIndex) -> CellIndex {
  for r in 1..=get_resolution(h) {
    let digit = get_index_digit(h, r);
    set_index_digit(&mut h, r, rotate60_ccw(digit));
  }
  h
}

/// Rotate an index 60 degrees clockwise.
pub(crate) fn cell_rotate60_cw(mut h: CellIndex) -> CellIndex {
  for r in 1..=get_resolution(h) {
    let digit = get_index_digit(h, r);
    set_index_digit(&mut h, r, rotate60_cw(digit));
  }
  h
}

/// Rotate an index 60 degrees counter-clockwise about a pentagonal center,
/// skewing past the deleted K subsequence.
pub(crate) fn cell_rotate_pent60_ccw(mut h: CellIndex) -> CellIndex {
  let res = get_resolution(h);
  let mut found_first_non_zero = false;
  for r in 1..=res {
    let digit = get_index_digit(h, r);
    set_index_digit(&mut h, r, rotate60_ccw(digit));

    if !found_first_non_zero && get_index_digit(h, r) != Direction::Center {
      found_first_non_zero = true;
      if leading_non_zero_digit(h) == Direction::KAxes {
        h = cell_rotate60_ccw(h);
      }
    }
  }
  h
}

/// Rotate an index 60 degrees clockwise about a pentagonal center.
pub(crate) fn cell_rotate_pent60_cw(mut h: CellIndex) -> CellIndex {
  let res = get_resolution(h);
  let mut found_first_non_zero = false;
  for r in 1..=res {
    let digit = get_index_digit(h, r);
    set_index_digit(&mut h, r, rotate60_cw(digit));

    if !found_first_non_zero && get_index_digit(h, r) != Direction::Center {
      found_first_non_zero = true;
      if leading_non_zero_digit(h) == Direction::KAxes {
        h = cell_rotate60_cw(h);
      }
    }
  }
  h
}

/// Encode a face coordinate at the given resolution as a cell index.
/// Returns `NULL_INDEX` when the coordinate does not land on a base cell.
pub(crate) fn face_ijk_to_cell(fijk: &FaceIJK, res: i32) -> CellIndex {
  let mut h = CellIndex(INDEX_BLANK);
  set_mode(&mut h, CELL_MODE);
  set_resolution(&mut h, res);

  if res == 0 {
    if fijk.coord.i > MAX_FACE_COORD || fijk.coord.j > MAX_FACE_COORD || fijk.coord.k > MAX_FACE_COORD {
      return NULL_INDEX;
    }
    let base_cell = face_ijk_to_base_cell(fijk);
    if base_cell == INVALID_BASE_CELL {
      return NULL_INDEX;
    }
    set_base_cell(&mut h, base_cell);
    return h;
  }

  // Build the index digits from the finest resolution up. At each step the
  // cell's coordinates move up an aperture 7 grid, and the digit records
  // the offset from the parent's center at the finer resolution.
  let mut fijk_bc = *fijk;
  for r in (1..=res).rev() {
    let last_ijk = fijk_bc.coord;
    let mut last_center: CoordIJK;
    if is_resolution_class_iii(r) {
      up_ap7(&mut fijk_bc.coord);
      last_center = fijk_bc.coord;
      down_ap7(&mut last_center);
    } else {
      up_ap7r(&mut fijk_bc.coord);
      last_center = fijk_bc.coord;
      down_ap7r(&mut last_center);
    }

    let mut diff = CoordIJK::default();
    ijk_sub(&last_ijk, &last_center, &mut diff);
    ijk_normalize(&mut diff);

    let digit = unit_ijk_to_digit(&diff);
    if digit == Direction::InvalidDigit {
      return NULL_INDEX;
    }
    set_index_digit(&mut h, r, digit);
  }

  // fijk_bc now holds the res 0 coordinates of the containing base cell
  if fijk_bc.coord.i > MAX_FACE_COORD || fijk_bc.coord.j > MAX_FACE_COORD || fijk_bc.coord.k > MAX_FACE_COORD {
    return NULL_INDEX;
  }

  let base_cell = face_ijk_to_base_cell(&fijk_bc);
  if base_cell == INVALID_BASE_CELL {
    return NULL_INDEX;
  }
  set_base_cell(&mut h, base_cell);

  let num_rots = face_ijk_to_base_cell_ccw_rot60(&fijk_bc);
  if num_rots == INVALID_ROTATIONS {
    return NULL_INDEX;
  }

  if is_base_cell_pentagon(base_cell) {
    // force rotation out of the deleted K subsequence
    if leading_non_zero_digit(h) == Direction::KAxes {
      if base_cell_is_cw_offset(base_cell, fijk_bc.face) {
        h = cell_rotate60_cw(h);
      } else {
        h = cell_rotate60_ccw(h);
      }
    }
    for _ in 0..num_rots {
      h = cell_rotate_pent60_ccw(h);
    }
  } else {
    for _ in 0..num_rots {
      h = cell_rotate60_ccw(h);
    }
  }
  h
}

/// The canonical face coordinate of a cell index, adjusting for overage
/// onto a neighboring face when the cell does not lie on its base cell's
/// home face.
pub(crate) fn cell_to_face_ijk(h: CellIndex, fijk: &mut FaceIJK) -> Result<(), GridError> {
  let base_cell = get_base_cell(h);
  if base_cell < 0 || base_cell >= NUM_BASE_CELLS {
    *fijk = FaceIJK::default();
    return Err(GridError::CellInvalid);
  }

  // adjust for the pentagonal missing sequence
  let mut h = h;
  if is_base_cell_pentagon(base_cell) && leading_non_zero_digit(h) == Direction::IkAxes {
    h = cell_rotate60_cw(h);
  }

  // start from the base cell's home face and coordinates
  base_cell_to_face_ijk(base_cell, fijk);
  if !cell_to_face_ijk_with_initialized(h, fijk) {
    return Ok(());
  }

  // the cell is possibly on a different face; check for overage, which is
  // always done on a Class II grid
  let orig_ijk = fijk.coord;
  let res = get_resolution(h);
  let mut overage_res = res;
  if is_resolution_class_iii(res) {
    down_ap7r(&mut fijk.coord);
    overage_res += 1;
  }

  let pent_leading_4 = is_base_cell_pentagon(base_cell) && leading_non_zero_digit(h) == Direction::IAxes;
  let mut overage = adjust_overage_class_ii(fijk, overage_res, pent_leading_4, false);

  if overage != Overage::NoOverage {
    // pentagon base cells may have secondary overages
    if is_base_cell_pentagon(base_cell) {
      while overage == Overage::NewFace {
        overage = adjust_overage_class_ii(fijk, overage_res, false, false);
      }
    }
    if overage_res != res {
      up_ap7r(&mut fijk.coord);
    }
  } else if overage_res != res {
    fijk.coord = orig_ijk;
  }
  Ok(())
}

/// Apply a cell's digits to a face coordinate already initialized with the
/// base cell's position on the desired face. Returns whether the cell may
/// overage onto a neighboring face.
pub(crate) fn cell_to_face_ijk_with_initialized(h: CellIndex, fijk: &mut FaceIJK) -> bool {
  let res = get_resolution(h);
  let base_cell = get_base_cell(h);

  let coord = &mut fijk.coord;
  let mut possible_overage = true;
  if !is_base_cell_pentagon(base_cell) && (res == 0 || (coord.i == 0 && coord.j == 0 && coord.k == 0)) {
    possible_overage = false;
  }

  for r in 1..=res {
    if is_resolution_class_iii(r) {
      down_ap7(coord);
    } else {
      down_ap7r(coord);
    }
    ijk_neighbor(coord, get_index_digit(h, r));
  }
  possible_overage
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::base_cells::BASE_CELL_DATA;
  use crate::constants::NUM_ICOSA_FACES;
  use crate::coords::ijk::ijk_matches;

  #[test]
  fn test_get_set_mode() {
    let mut h = CellIndex(0);
    for mode in 0..=15u8 {
      set_mode(&mut h, mode);
      assert_eq!(get_mode(h), mode);
    }
  }

  #[test]
  fn test_get_set_resolution() {
    let mut h = CellIndex(0);
    for res in 0..=MAX_RES {
      set_resolution(&mut h, res);
      assert_eq!(get_resolution(h), res);
    }
  }

  #[test]
  fn test_get_set_base_cell() {
    let mut h = CellIndex(0);
    for bc in 0..NUM_BASE_CELLS {
      set_base_cell(&mut h, bc);
      assert_eq!(get_base_cell(h), bc);
    }
  }

  #[test]
  fn test_get_set_index_digit() {
    let mut h = CellIndex(0);
    set_resolution(&mut h, MAX_RES);
    for res in 1..=MAX_RES {
      for digit in 0..=6u8 {
        let digit = Direction::try_from(digit).unwrap();
        set_index_digit(&mut h, res, digit);
        assert_eq!(get_index_digit(h, res), digit, "res {res}");
      }
    }
  }

  #[test]
  fn test_get_set_reserved_bits() {
    let mut h = CellIndex(0);
    for v in 0..=0b111u8 {
      set_reserved_bits(&mut h, v);
      assert_eq!(get_reserved_bits(h), v);
    }
  }

  #[test]
  fn test_get_set_high_bit() {
    let mut h = CellIndex(0);
    set_high_bit(&mut h, 1);
    assert_eq!(get_high_bit(h), 1);
    set_high_bit(&mut h, 0);
    assert_eq!(get_high_bit(h), 0);
  }

  #[test]
  fn test_set_cell_index() {
    let mut h = CellIndex::default();
    set_cell_index(&mut h, 5, 12, Direction::KAxes);
    assert_eq!(get_resolution(h), 5);
    assert_eq!(get_base_cell(h), 12);
    assert_eq!(get_mode(h), CELL_MODE);
    for r in 1..=5 {
      assert_eq!(get_index_digit(h, r), Direction::KAxes);
    }
    for r in 6..=MAX_RES {
      assert_eq!(get_index_digit(h, r), Direction::InvalidDigit, "unused digits stay blank");
    }
    assert_eq!(h.0, 0x85184927fffffff);
  }

  #[test]
  fn test_is_resolution_class_iii() {
    assert!(!is_resolution_class_iii(0));
    assert!(is_resolution_class_iii(1));
    assert!(!is_resolution_class_iii(2));
    assert!(is_resolution_class_iii(15));
  }

  #[test]
  fn test_leading_non_zero_digit() {
    let mut h = CellIndex::default();
    set_cell_index(&mut h, 5, 0, Direction::Center);
    assert_eq!(leading_non_zero_digit(h), Direction::Center);

    set_index_digit(&mut h, 3, Direction::JAxes);
    assert_eq!(leading_non_zero_digit(h), Direction::JAxes);

    set_index_digit(&mut h, 1, Direction::KAxes);
    assert_eq!(leading_non_zero_digit(h), Direction::KAxes);
  }

  #[test]
  fn test_cell_rotations() {
    let mut h_i = CellIndex::default();
    set_cell_index(&mut h_i, 1, 0, Direction::IAxes);
    let mut h_ij = CellIndex::default();
    set_cell_index(&mut h_ij, 1, 0, Direction::IjAxes);
    let mut h_ik = CellIndex::default();
    set_cell_index(&mut h_ik, 1, 0, Direction::IkAxes);

    assert_eq!(cell_rotate60_ccw(h_i), h_ij);
    assert_eq!(cell_rotate60_cw(h_i), h_ik);
    assert_eq!(cell_rotate60_cw(cell_rotate60_ccw(h_i)), h_i);

    // pentagonal rotation without a leading K behaves like the plain one
    let mut h_pent_j = CellIndex::default();
    set_cell_index(&mut h_pent_j, 1, 14, Direction::JAxes);
    let mut h_pent_jk = CellIndex::default();
    set_cell_index(&mut h_pent_jk, 1, 14, Direction::JkAxes);
    assert_eq!(cell_rotate_pent60_ccw(h_pent_j), h_pent_jk);
  }

  #[test]
  fn test_face_ijk_cell_round_trip_res0() {
    for face in 0..NUM_ICOSA_FACES {
      for i in 0..=MAX_FACE_COORD {
        for j in 0..=MAX_FACE_COORD {
          for k in 0..=MAX_FACE_COORD {
            let fijk = FaceIJK {
              face,
              coord: CoordIJK { i, j, k },
            };
            if face_ijk_to_base_cell(&fijk) == INVALID_BASE_CELL {
              continue;
            }

            let h = face_ijk_to_cell(&fijk, 0);
            assert_ne!(h, NULL_INDEX, "{fijk:?}");

            let base_cell = get_base_cell(h);
            let expected = BASE_CELL_DATA[base_cell as usize].home_fijk;

            let mut round_trip = FaceIJK::default();
            cell_to_face_ijk(h, &mut round_trip).unwrap();
            assert_eq!(round_trip.face, expected.face, "{fijk:?}");
            assert!(ijk_matches(&round_trip.coord, &expected.coord), "{fijk:?}");
          }
        }
      }
    }
  }

  #[test]
  fn test_cell_fijk_cell_round_trip_finer_res() {
    // one hexagon base cell, one pentagon, one off-center base cell
    for (face, i) in [(1, 1), (0, 2), (4, 1)] {
      let coarse = face_ijk_to_cell(
        &FaceIJK {
          face,
          coord: CoordIJK { i, j: 0, k: 0 },
        },
        0,
      );
      assert_ne!(coarse, NULL_INDEX);

      for res in 1..=2 {
        for child in crate::iterators::CellChildIter::new(coarse, res) {
          let mut fijk = FaceIJK::default();
          cell_to_face_ijk(child, &mut fijk).unwrap();
          let round_trip = face_ijk_to_cell(&fijk, res);
          assert_eq!(round_trip, child, "round trip through {fijk:?}");
        }
      }
    }
  }

  #[test]
  fn test_k_axis_child_to_face_ijk() {
    // base cell 2 sits at the center of face 1; its res 2 K-digit child
    // stays on the home face one K step from the center
    let h = CellIndex(0x82040ffffffffff);
    assert_eq!(get_base_cell(h), 2);
    assert_eq!(get_resolution(h), 2);
    assert_eq!(get_index_digit(h, 1), Direction::Center);
    assert_eq!(get_index_digit(h, 2), Direction::KAxes);

    let mut fijk = FaceIJK::default();
    cell_to_face_ijk(h, &mut fijk).unwrap();
    assert_eq!(fijk.face, 1);
    assert!(ijk_matches(&fijk.coord, &CoordIJK { i: 0, j: 0, k: 1 }));

    let round_trip = face_ijk_to_cell(&fijk, get_resolution(h));
    assert_eq!(round_trip, h);
  }

  #[test]
  fn test_cell_to_face_ijk_invalid_base_cell() {
    let mut h = CellIndex::default();
    set_cell_index(&mut h, 0, 0, Direction::Center);
    set_base_cell(&mut h, 125);
    let mut fijk = FaceIJK::default();
    assert_eq!(cell_to_face_ijk(h, &mut fijk), Err(GridError::CellInvalid));
  }
}
