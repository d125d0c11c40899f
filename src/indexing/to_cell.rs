//! Point-to-cell indexing.

use std::f64::consts::FRAC_PI_2;

use crate::constants::{EPSILON_RAD, MAX_RES};
use crate::coords::face_ijk::geo_to_face_ijk;
use crate::index::face_ijk_to_cell;
use crate::types::{CellIndex, FaceIJK, GridError, LatLng};
use crate::NULL_INDEX;

/// Index the cell containing the point at the given resolution.
///
/// Latitude must lie in `[-pi/2, pi/2]`; longitude outside `[-pi, pi]` is
/// wrapped during projection.
pub fn lat_lng_to_cell(geo: &LatLng, res: i32) -> Result<CellIndex, GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }
  if !geo.lat.is_finite() || !geo.lng.is_finite() || geo.lat.abs() > FRAC_PI_2 + EPSILON_RAD {
    return Err(GridError::LatLngDomain);
  }

  let mut fijk = FaceIJK::default();
  geo_to_face_ijk(geo, res, &mut fijk);

  let h = face_ijk_to_cell(&fijk, res);
  if h == NULL_INDEX {
    return Err(GridError::Failed);
  }
  Ok(h)
}
