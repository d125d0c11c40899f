//! Single-step movement between neighboring cells.
//!
//! Stepping works directly on the index digits, without projecting through
//! the sphere. The rewrite tables encode how a unit move in each direction
//! changes a digit and which direction the move continues in at the next
//! coarser resolution.

use crate::base_cells::{
  base_cell_is_cw_offset, is_base_cell_pentagon, is_base_cell_polar_pentagon, BASE_CELL_DATA,
  BASE_CELL_NEIGHBORS, BASE_CELL_NEIGHBOR_60CCW_ROTS, INVALID_BASE_CELL,
};
use crate::constants::{CELL_MODE, NUM_BASE_CELLS};
use crate::coords::ijk::rotate60_ccw;
use crate::index::{
  cell_rotate60_ccw, cell_rotate60_cw, cell_rotate_pent60_ccw, get_base_cell, get_index_digit,
  get_mode, get_resolution, is_pentagon, is_resolution_class_iii, is_valid_cell,
  leading_non_zero_digit, set_base_cell, set_index_digit,
};
use crate::types::Direction::{Center, IAxes, IjAxes, IkAxes, JAxes, JkAxes, KAxes};
use crate::types::{CellIndex, Direction, GridError};
use crate::NULL_INDEX;

/// New digit when traversing along a direction, Class II resolutions.
/// Indexed by the current digit, then the direction of travel.
#[rustfmt::skip]
static NEW_DIGIT_II: [[Direction; 7]; 7] = [
  [Center, KAxes,  JAxes,  JkAxes, IAxes,  IkAxes, IjAxes],
  [KAxes,  IAxes,  JkAxes, IjAxes, IkAxes, JAxes,  Center],
  [JAxes,  JkAxes, KAxes,  IAxes,  IjAxes, Center, IkAxes],
  [JkAxes, IjAxes, IAxes,  IkAxes, Center, KAxes,  JAxes],
  [IAxes,  IkAxes, IjAxes, Center, JAxes,  JkAxes, KAxes],
  [IkAxes, JAxes,  Center, KAxes,  JkAxes, IjAxes, IAxes],
  [IjAxes, Center, IkAxes, JAxes,  KAxes,  IAxes,  JkAxes],
];

/// Direction the traversal continues in at the next coarser resolution,
/// Class II. `Center` means the move resolved within the current digit.
#[rustfmt::skip]
static NEW_ADJUSTMENT_II: [[Direction; 7]; 7] = [
  [Center, Center, Center, Center, Center, Center, Center],
  [Center, KAxes,  Center, KAxes,  Center, IkAxes, Center],
  [Center, Center, JAxes,  JkAxes, Center, Center, JAxes],
  [Center, KAxes,  JkAxes, JkAxes, Center, Center, Center],
  [Center, Center, Center, Center, IAxes,  IAxes,  IjAxes],
  [Center, IkAxes, Center, Center, IAxes,  IkAxes, Center],
  [Center, Center, JAxes,  Center, IjAxes, Center, IjAxes],
];

/// New digit when traversing along a direction, Class III resolutions.
#[rustfmt::skip]
static NEW_DIGIT_III: [[Direction; 7]; 7] = [
  [Center, KAxes,  JAxes,  JkAxes, IAxes,  IkAxes, IjAxes],
  [KAxes,  JAxes,  JkAxes, IAxes,  IkAxes, IjAxes, Center],
  [JAxes,  JkAxes, IAxes,  IkAxes, IjAxes, Center, KAxes],
  [JkAxes, IAxes,  IkAxes, IjAxes, Center, KAxes,  JAxes],
  [IAxes,  IkAxes, IjAxes, Center, KAxes,  JAxes,  JkAxes],
  [IkAxes, IjAxes, Center, KAxes,  JAxes,  JkAxes, IAxes],
  [IjAxes, Center, KAxes,  JAxes,  JkAxes, IAxes,  IkAxes],
];

/// Direction the traversal continues in at the next coarser resolution,
/// Class III.
#[rustfmt::skip]
static NEW_ADJUSTMENT_III: [[Direction; 7]; 7] = [
  [Center, Center, Center, Center, Center, Center, Center],
  [Center, KAxes,  Center, JkAxes, Center, KAxes,  Center],
  [Center, Center, JAxes,  JAxes,  Center, Center, IjAxes],
  [Center, JkAxes, JAxes,  JkAxes, Center, Center, Center],
  [Center, Center, Center, Center, IAxes,  IkAxes, IAxes],
  [Center, KAxes,  Center, Center, IkAxes, IkAxes, Center],
  [Center, Center, IjAxes, Center, IAxes,  Center, IjAxes],
];

/// Writes the neighbor of `origin` in direction `dir` to `out`.
///
/// `rotations` counts the 60 degree ccw rotations performed relative to
/// the origin's coordinate system. It is read to orient `dir` and updated
/// with the rotations the traversal itself introduced, so ring walks can
/// carry it from step to step.
///
/// Returns `GridError::Pentagon` when the move lands on the deleted K
/// subsequence of a pentagon and has no defined result.
pub(crate) fn neighbor_rotations(
  origin: CellIndex,
  mut dir: Direction,
  rotations: &mut i32,
  out: &mut CellIndex,
) -> Result<(), GridError> {
  let mut current = origin;

  if dir == Direction::InvalidDigit {
    return Err(GridError::Failed);
  }

  // Keep rotations in [0, 6) so repeated additions cannot overflow.
  *rotations = (*rotations).rem_euclid(6);
  for _ in 0..*rotations {
    dir = rotate60_ccw(dir);
  }

  let old_base_cell = get_base_cell(current);
  if old_base_cell < 0 || old_base_cell >= NUM_BASE_CELLS {
    return Err(GridError::CellInvalid);
  }
  let old_leading_digit = leading_non_zero_digit(current);

  // Adjust the indexing digits and, if needed, the base cell, walking from
  // the finest digit until the move stops propagating.
  let mut new_rotations = 0;
  let mut r = get_resolution(current) - 1;
  loop {
    if r == -1 {
      set_base_cell(&mut current, BASE_CELL_NEIGHBORS[old_base_cell as usize][dir as usize]);
      new_rotations = BASE_CELL_NEIGHBOR_60CCW_ROTS[old_base_cell as usize][dir as usize];

      if get_base_cell(current) == INVALID_BASE_CELL {
        // The K neighbor of this pentagon is deleted; the edge actually
        // borders the IK neighbor.
        set_base_cell(
          &mut current,
          BASE_CELL_NEIGHBORS[old_base_cell as usize][IkAxes as usize],
        );
        new_rotations = BASE_CELL_NEIGHBOR_60CCW_ROTS[old_base_cell as usize][IkAxes as usize];

        current = cell_rotate60_ccw(current);
        *rotations += 1;
      }
      break;
    }

    let old_digit = get_index_digit(current, r + 1);
    if old_digit == Direction::InvalidDigit {
      // Only possible on invalid input.
      return Err(GridError::CellInvalid);
    }

    let next_dir = if is_resolution_class_iii(r + 1) {
      set_index_digit(&mut current, r + 1, NEW_DIGIT_II[old_digit as usize][dir as usize]);
      NEW_ADJUSTMENT_II[old_digit as usize][dir as usize]
    } else {
      set_index_digit(&mut current, r + 1, NEW_DIGIT_III[old_digit as usize][dir as usize]);
      NEW_ADJUSTMENT_III[old_digit as usize][dir as usize]
    };

    if next_dir == Center {
      // No more adjustment to perform.
      break;
    }
    dir = next_dir;
    r -= 1;
  }

  let new_base_cell = get_base_cell(current);
  if is_base_cell_pentagon(new_base_cell) {
    let mut already_adjusted_k_subsequence = false;

    // Force rotation out of the missing K subsequence.
    if leading_non_zero_digit(current) == KAxes {
      if old_base_cell != new_base_cell {
        // Traversed into the deleted subsequence of a neighboring pentagon
        // base cell. Rotate out based on the offset of the face we came
        // from; the default is ccw.
        if base_cell_is_cw_offset(new_base_cell, BASE_CELL_DATA[old_base_cell as usize].home_fijk.face) {
          current = cell_rotate60_cw(current);
        } else {
          current = cell_rotate60_ccw(current);
        }
        already_adjusted_k_subsequence = true;
      } else {
        // Traversed into the deleted subsequence from within the same
        // pentagon base cell.
        match old_leading_digit {
          Center => return Err(GridError::Pentagon),
          JkAxes => {
            current = cell_rotate60_ccw(current);
            *rotations += 1;
          }
          IkAxes => {
            current = cell_rotate60_cw(current);
            *rotations += 5;
          }
          _ => return Err(GridError::Failed),
        }
      }
    }

    for _ in 0..new_rotations {
      current = cell_rotate_pent60_ccw(current);
    }

    // Account for differing orientation of the base cells.
    if old_base_cell != new_base_cell {
      if is_base_cell_polar_pentagon(new_base_cell) {
        // The polar pentagons have all I neighbors, except for base cells
        // 8 and 118 which are already aligned.
        if old_base_cell != 118 && old_base_cell != 8 && leading_non_zero_digit(current) != JkAxes {
          *rotations += 1;
        }
      } else if leading_non_zero_digit(current) == IkAxes && !already_adjusted_k_subsequence {
        // Distortion introduced to the 5 neighbor by the deleted
        // subsequence.
        *rotations += 1;
      }
    }
  } else {
    for _ in 0..new_rotations {
      current = cell_rotate60_ccw(current);
    }
  }

  *rotations = (*rotations + new_rotations).rem_euclid(6);
  *out = current;
  Ok(())
}

/// The direction from `origin` to a directly adjacent `destination`, or
/// `InvalidDigit` if they are not neighbors. The direction to self is
/// `Center`.
pub(crate) fn direction_for_neighbor(origin: CellIndex, destination: CellIndex) -> Direction {
  if origin == destination {
    return Center;
  }

  // Pentagons have no K neighbor.
  let start = if is_pentagon(origin) { JAxes as u8 } else { KAxes as u8 };
  for dir_val in start..=(IjAxes as u8) {
    let Ok(dir) = Direction::try_from(dir_val) else {
      continue;
    };
    let mut rotations = 0;
    let mut neighbor = NULL_INDEX;
    if neighbor_rotations(origin, dir, &mut rotations, &mut neighbor).is_ok() && neighbor == destination {
      return dir;
    }
  }
  Direction::InvalidDigit
}

/// Whether two cells share an edge. Cells are not neighbors of themselves,
/// and only cells at the same resolution can be neighbors.
pub fn are_neighbor_cells(origin: CellIndex, destination: CellIndex) -> Result<bool, GridError> {
  if get_mode(origin) != CELL_MODE || get_mode(destination) != CELL_MODE {
    return Err(GridError::CellInvalid);
  }
  if origin == destination {
    return Ok(false);
  }
  if get_resolution(origin) != get_resolution(destination) {
    return Err(GridError::ResMismatch);
  }
  if !is_valid_cell(origin) || !is_valid_cell(destination) {
    return Err(GridError::CellInvalid);
  }

  Ok(direction_for_neighbor(origin, destination) != Direction::InvalidDigit)
}
