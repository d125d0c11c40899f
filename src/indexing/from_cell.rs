//! Cell-to-point and cell-to-boundary conversions.

use crate::constants::{NUM_HEX_VERTS, NUM_PENT_VERTS};
use crate::coords::face_ijk::{
  face_ijk_pent_to_cell_boundary, face_ijk_to_cell_boundary, face_ijk_to_geo,
};
use crate::index::{cell_to_face_ijk, get_resolution, is_pentagon, is_valid_cell};
use crate::types::{CellBoundary, CellIndex, FaceIJK, GridError, LatLng};

/// The center point of the given cell.
pub fn cell_to_lat_lng(cell: CellIndex) -> Result<LatLng, GridError> {
  if !is_valid_cell(cell) {
    return Err(GridError::CellInvalid);
  }

  let mut fijk = FaceIJK::default();
  cell_to_face_ijk(cell, &mut fijk)?;

  let mut geo = LatLng::default();
  face_ijk_to_geo(&fijk, get_resolution(cell), &mut geo);
  Ok(geo)
}

/// The boundary of the given cell, as a loop of spherical coordinates.
/// Hexagons have 6 to 10 vertices once distortion vertices along icosahedron
/// edges are included; pentagons have 5 to 10.
pub fn cell_to_boundary(cell: CellIndex) -> Result<CellBoundary, GridError> {
  if !is_valid_cell(cell) {
    return Err(GridError::CellInvalid);
  }

  let mut fijk = FaceIJK::default();
  cell_to_face_ijk(cell, &mut fijk)?;

  let mut boundary = CellBoundary::default();
  let res = get_resolution(cell);
  if is_pentagon(cell) {
    face_ijk_pent_to_cell_boundary(&fijk, res, 0, NUM_PENT_VERTS as i32, &mut boundary);
  } else {
    face_ijk_to_cell_boundary(&fijk, res, 0, NUM_HEX_VERTS as i32, &mut boundary);
  }
  Ok(boundary)
}
