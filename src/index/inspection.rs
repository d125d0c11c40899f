//! Predicates and property getters for cell indexes.

use crate::base_cells::{base_cell_number_to_cell, is_base_cell_pentagon};
use crate::constants::{
  CELL_MODE, MAX_RES, NUM_BASE_CELLS, NUM_HEX_VERTS, NUM_PENTAGONS, NUM_PENT_VERTS, PER_DIGIT_OFFSET,
};
use crate::coords::face_ijk::{
  adjust_overage_class_ii, adjust_pent_vert_overage, face_ijk_pent_to_verts, face_ijk_to_verts, INVALID_FACE,
};
use crate::math::ipow;
use crate::types::{Direction, FaceIJK};
use crate::{CellIndex, GridError};

use super::{
  cell_to_face_ijk, get_base_cell, get_high_bit, get_index_digit, get_mode, get_reserved_bits, get_resolution,
  is_resolution_class_iii, leading_non_zero_digit, set_index_digit, set_resolution,
};

/// Validates a cell index: mode and reserved bits, resolution and base
/// cell ranges, digit layout, and the pentagon deleted K subsequence.
#[must_use]
pub fn is_valid_cell(h: CellIndex) -> bool {
  if get_high_bit(h) != 0 || get_mode(h) != CELL_MODE || get_reserved_bits(h) != 0 {
    return false;
  }

  let res = get_resolution(h);
  let base_cell = get_base_cell(h);
  if !(0..=MAX_RES).contains(&res) || !(0..NUM_BASE_CELLS).contains(&base_cell) {
    return false;
  }

  // digits in use must not be 7, unused digits must all be 7
  for r in 1..=res {
    if get_index_digit(h, r) == Direction::InvalidDigit {
      return false;
    }
  }
  let unused_bits = ((MAX_RES - res) as u32) * (PER_DIGIT_OFFSET as u32);
  if unused_bits > 0 {
    let unused_mask = (1u64 << unused_bits) - 1;
    if h.0 & unused_mask != unused_mask {
      return false;
    }
  }

  // pentagons have no K-axis children
  if is_base_cell_pentagon(base_cell) && leading_non_zero_digit(h) == Direction::KAxes {
    return false;
  }
  true
}

/// Whether the cell index is one of the 12 pentagons at its resolution.
#[must_use]
pub fn is_pentagon(h: CellIndex) -> bool {
  if get_mode(h) != CELL_MODE || !is_valid_cell(h) {
    return false;
  }
  is_base_cell_pentagon(get_base_cell(h)) && leading_non_zero_digit(h) == Direction::Center
}

/// The base cell number of a cell index.
#[inline]
#[must_use]
pub fn get_base_cell_number(h: CellIndex) -> i32 {
  get_base_cell(h)
}

/// Whether the cell's resolution is Class III (odd).
#[inline]
#[must_use]
pub fn is_res_class_iii(h: CellIndex) -> bool {
  is_resolution_class_iii(get_resolution(h))
}

/// Number of unique cells at the given resolution.
pub fn get_num_cells(res: i32) -> Result<i64, GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }
  Ok(2 + 120 * ipow(7, res as i64))
}

/// Number of pentagons per resolution, always 12.
#[inline]
#[must_use]
pub fn pentagon_count() -> i32 {
  NUM_PENTAGONS
}

/// All 12 pentagon cell indexes at the given resolution.
pub fn get_pentagons(res: i32, out: &mut [CellIndex; NUM_PENTAGONS as usize]) -> Result<(), GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }
  let mut pos = 0;
  for bc in 0..NUM_BASE_CELLS {
    if is_base_cell_pentagon(bc) {
      out[pos] = crate::hierarchy::parent_child::cell_to_center_child(base_cell_number_to_cell(bc), res)?;
      pos += 1;
    }
  }
  Ok(())
}

/// All 122 resolution 0 cell indexes.
pub fn get_res0_cells(out: &mut [CellIndex; NUM_BASE_CELLS as usize]) {
  for bc in 0..NUM_BASE_CELLS {
    out[bc as usize] = base_cell_number_to_cell(bc);
  }
}

/// Maximum number of icosahedron faces the cell's boundary may cross:
/// 2 for hexagons, 5 for pentagons.
#[inline]
#[must_use]
pub fn max_face_count(h: CellIndex) -> usize {
  if is_pentagon(h) {
    5
  } else {
    2
  }
}

/// Find all icosahedron faces intersected by the cell, writing face
/// numbers into `out_faces`. Returns the number of distinct faces found.
/// `out_faces` must have room for `max_face_count(h)` entries.
pub fn get_icosahedron_faces(h: CellIndex, out_faces: &mut [i32]) -> Result<usize, GridError> {
  if !is_valid_cell(h) {
    return Err(GridError::CellInvalid);
  }
  let mut res = get_resolution(h);
  let pentagon = is_pentagon(h);

  // A Class II pentagon has all of its vertices on icosahedron edges, so
  // the vertex faces are ambiguous. Its center child crosses the same
  // faces; use that instead. Res 15 is Class III, so this terminates.
  if pentagon && !is_resolution_class_iii(res) {
    let mut child = h;
    set_resolution(&mut child, res + 1);
    set_index_digit(&mut child, res + 1, Direction::Center);
    return get_icosahedron_faces(child, out_faces);
  }

  let face_count = max_face_count(h);
  if out_faces.len() < face_count {
    return Err(GridError::MemoryBounds);
  }

  let mut fijk = FaceIJK::default();
  cell_to_face_ijk(h, &mut fijk)?;

  // vertices on the substrate grid; pentagons only use the first five
  let mut verts = [FaceIJK::default(); NUM_HEX_VERTS];
  let vert_count = if pentagon {
    let mut pent_verts = [FaceIJK::default(); NUM_PENT_VERTS];
    face_ijk_pent_to_verts(&mut fijk, &mut res, &mut pent_verts);
    verts[..NUM_PENT_VERTS].copy_from_slice(&pent_verts);
    NUM_PENT_VERTS
  } else {
    face_ijk_to_verts(&mut fijk, &mut res, &mut verts);
    NUM_HEX_VERTS
  };

  for slot in out_faces[..face_count].iter_mut() {
    *slot = INVALID_FACE;
  }

  // the output array doubles as a small hash set of faces
  for vert in verts.iter_mut().take(vert_count) {
    if pentagon {
      adjust_pent_vert_overage(vert, res);
    } else {
      adjust_overage_class_ii(vert, res, false, true);
    }

    let mut pos = 0;
    while out_faces[pos] != INVALID_FACE && out_faces[pos] != vert.face {
      pos += 1;
      if pos == face_count {
        return Err(GridError::Failed);
      }
    }
    out_faces[pos] = vert.face;
  }

  Ok(out_faces[..face_count].iter().filter(|&&f| f != INVALID_FACE).count())
}
