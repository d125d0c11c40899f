//! Lines of cells between two endpoints.

use crate::coords::ijk::{cube_to_ijk, ijk_to_cube};
use crate::local_ij::{cell_to_local_ijk, local_ijk_to_cell};
use crate::traversal::distance::grid_distance;
use crate::types::{CellIndex, CoordIJK, GridError};

/// Number of cells in the line from `start` to `end`, endpoints included.
pub fn grid_path_cells_size(start: CellIndex, end: CellIndex) -> Result<i64, GridError> {
  Ok(grid_distance(start, end)? + 1)
}

// Rounds fractional cube coordinates to the nearest cell, repairing the
// i + j + k == 0 constraint by adjusting the component with the largest
// rounding error.
fn cube_round(i: f64, j: f64, k: f64, out: &mut CoordIJK) {
  let mut ri = i.round();
  let mut rj = j.round();
  let mut rk = k.round();

  let i_diff = (ri - i).abs();
  let j_diff = (rj - j).abs();
  let k_diff = (rk - k).abs();

  if i_diff > j_diff && i_diff > k_diff {
    ri = -rj - rk;
  } else if j_diff > k_diff {
    rj = -ri - rk;
  } else {
    rk = -ri - rj;
  }

  out.i = ri as i32;
  out.j = rj as i32;
  out.k = rk as i32;
}

/// Fills `out` with the cells of a line from `start` to `end`, inclusive,
/// by interpolating in cube coordinates within the origin's local space.
///
/// The line is not guaranteed to bend the same way at pentagon distortion
/// as repeated neighbor steps would, but consecutive cells are always
/// neighbors. Fails where [`grid_distance`] fails.
pub fn grid_path_cells(start: CellIndex, end: CellIndex, out: &mut [CellIndex]) -> Result<(), GridError> {
  let distance = grid_distance(start, end)?;
  if out.len() < (distance + 1) as usize {
    return Err(GridError::MemoryBounds);
  }

  // Endpoint coordinates in start's local space. The distance call above
  // already proved these are computable.
  let mut start_ijk = CoordIJK::default();
  cell_to_local_ijk(start, start, &mut start_ijk)?;
  let mut end_ijk = CoordIJK::default();
  cell_to_local_ijk(start, end, &mut end_ijk)?;

  ijk_to_cube(&mut start_ijk);
  ijk_to_cube(&mut end_ijk);

  let (i_step, j_step, k_step) = if distance > 0 {
    let d = distance as f64;
    (
      f64::from(end_ijk.i - start_ijk.i) / d,
      f64::from(end_ijk.j - start_ijk.j) / d,
      f64::from(end_ijk.k - start_ijk.k) / d,
    )
  } else {
    (0.0, 0.0, 0.0)
  };

  let mut current = CoordIJK::default();
  for n in 0..=distance {
    let t = n as f64;
    cube_round(
      f64::from(start_ijk.i) + i_step * t,
      f64::from(start_ijk.j) + j_step * t,
      f64::from(start_ijk.k) + k_step * t,
      &mut current,
    );
    cube_to_ijk(&mut current);
    local_ijk_to_cell(start, &current, &mut out[n as usize])?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::index::is_valid_cell;
  use crate::indexing::lat_lng_to_cell;
  use crate::latlng::set_geo_degs;
  use crate::traversal::neighbors::are_neighbor_cells;
  use crate::NULL_INDEX;
  use crate::types::LatLng;

  fn cell_at(lat: f64, lng: f64, res: i32) -> CellIndex {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, lat, lng);
    lat_lng_to_cell(&geo, res).unwrap()
  }

  #[test]
  fn test_path_identity() {
    let cell = cell_at(37.779, -122.419, 9);
    assert_eq!(grid_path_cells_size(cell, cell), Ok(1));

    let mut out = [NULL_INDEX; 1];
    grid_path_cells(cell, cell, &mut out).unwrap();
    assert_eq!(out[0], cell);
  }

  #[test]
  fn test_path_endpoints_and_adjacency() {
    let start = cell_at(37.779, -122.419, 9);
    let end = cell_at(37.790, -122.402, 9);

    let size = grid_path_cells_size(start, end).unwrap() as usize;
    assert!(size > 2, "line spans multiple cells");

    let mut out = vec![NULL_INDEX; size];
    grid_path_cells(start, end, &mut out).unwrap();

    assert_eq!(out[0], start);
    assert_eq!(out[size - 1], end);
    for pair in out.windows(2) {
      assert!(is_valid_cell(pair[0]) && is_valid_cell(pair[1]));
      assert_eq!(are_neighbor_cells(pair[0], pair[1]), Ok(true));
    }
  }

  #[test]
  fn test_path_length_matches_distance() {
    let start = cell_at(37.779, -122.419, 7);
    let end = cell_at(38.0, -122.0, 7);
    let distance = grid_distance(start, end).unwrap();
    assert_eq!(grid_path_cells_size(start, end), Ok(distance + 1));
  }

  #[test]
  fn test_path_bounds() {
    let start = cell_at(37.779, -122.419, 9);
    let end = cell_at(37.790, -122.402, 9);
    let mut too_small = [NULL_INDEX; 1];
    assert_eq!(grid_path_cells(start, end, &mut too_small), Err(GridError::MemoryBounds));
  }

  #[test]
  fn test_path_res_mismatch() {
    let a = cell_at(37.779, -122.419, 9);
    let b = cell_at(37.779, -122.419, 8);
    assert_eq!(grid_path_cells_size(a, b), Err(GridError::ResMismatch));
  }
}
