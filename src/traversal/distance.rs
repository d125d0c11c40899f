//! Grid distance between cells.

use crate::coords::ijk::ijk_distance;
use crate::local_ij::cell_to_local_ijk;
use crate::types::{CellIndex, CoordIJK, GridError};

/// The number of single-cell steps along a shortest path between two cells.
///
/// Fails for pairs whose local coordinate spaces cannot be joined, for
/// example cells very far apart or separated by pentagon distortion.
pub fn grid_distance(origin: CellIndex, destination: CellIndex) -> Result<i64, GridError> {
  let mut origin_ijk = CoordIJK::default();
  cell_to_local_ijk(origin, origin, &mut origin_ijk)?;

  let mut destination_ijk = CoordIJK::default();
  cell_to_local_ijk(origin, destination, &mut destination_ijk)?;

  Ok(i64::from(ijk_distance(&origin_ijk, &destination_ijk)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::lat_lng_to_cell;
  use crate::latlng::set_geo_degs;
  use crate::traversal::grid_disk::{grid_disk_distances, max_grid_disk_size};
  use crate::NULL_INDEX;
  use crate::types::LatLng;

  #[test]
  fn test_grid_distance_self() {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, 37.779, -122.419);
    let origin = lat_lng_to_cell(&geo, 9).unwrap();
    assert_eq!(grid_distance(origin, origin), Ok(0));
  }

  #[test]
  fn test_grid_distance_matches_disk_rings() {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, 37.779, -122.419);
    let origin = lat_lng_to_cell(&geo, 9).unwrap();

    let k = 3;
    let size = max_grid_disk_size(k).unwrap() as usize;
    let mut disk = vec![NULL_INDEX; size];
    let mut distances = vec![0i32; size];
    grid_disk_distances(origin, k, &mut disk, &mut distances).unwrap();

    for (&cell, &d) in disk.iter().zip(&distances) {
      if cell == NULL_INDEX {
        continue;
      }
      assert_eq!(grid_distance(origin, cell), Ok(i64::from(d)), "cell {:x}", cell.0);
    }
  }

  #[test]
  fn test_grid_distance_res_mismatch() {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, 37.779, -122.419);
    let a = lat_lng_to_cell(&geo, 9).unwrap();
    let b = lat_lng_to_cell(&geo, 8).unwrap();
    assert_eq!(grid_distance(a, b), Err(GridError::ResMismatch));
  }

  #[test]
  fn test_grid_distance_too_far() {
    // Base cells on opposite sides of the globe are not unfoldable into a
    // shared local space.
    let a = crate::base_cells::base_cell_number_to_cell(0);
    let b = crate::base_cells::base_cell_number_to_cell(121);
    assert!(grid_distance(a, b).is_err());
  }
}
