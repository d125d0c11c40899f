//! Exact areas and lengths for individual cells and edges.
//!
//! Unlike the per-resolution averages, these walk the actual boundary of
//! the index, so cells distorted by icosahedron edges get their true
//! spherical measure.

use crate::constants::EARTH_RADIUS_KM;
use crate::edges::directed_edge_to_boundary;
use crate::index::is_valid_cell;
use crate::indexing::cell_to_boundary;
use crate::latlng::great_circle_distance_rads;
use crate::polygon::verts_area_rads2;
use crate::types::{CellIndex, GridError};

/// Exact spherical area of a cell in square radians.
pub fn cell_area_rads2(cell: CellIndex) -> Result<f64, GridError> {
  if !is_valid_cell(cell) {
    return Err(GridError::CellInvalid);
  }
  let boundary = cell_to_boundary(cell)?;
  Ok(verts_area_rads2(&boundary.verts[..boundary.num_verts]))
}

/// Exact area of a cell in square kilometers.
pub fn cell_area_km2(cell: CellIndex) -> Result<f64, GridError> {
  Ok(cell_area_rads2(cell)? * EARTH_RADIUS_KM * EARTH_RADIUS_KM)
}

/// Exact area of a cell in square meters.
pub fn cell_area_m2(cell: CellIndex) -> Result<f64, GridError> {
  Ok(cell_area_km2(cell)? * 1_000_000.0)
}

/// Exact length of a directed edge in radians.
///
/// Sums the great circle distances along the edge's boundary, which may
/// include a distortion vertex where the edge crosses an icosahedron
/// edge.
pub fn edge_length_rads(edge: CellIndex) -> Result<f64, GridError> {
  let boundary = directed_edge_to_boundary(edge)?;
  let mut length = 0.0;
  for pair in boundary.verts[..boundary.num_verts].windows(2) {
    length += great_circle_distance_rads(&pair[0], &pair[1]);
  }
  Ok(length)
}

/// Exact length of a directed edge in kilometers.
pub fn edge_length_km(edge: CellIndex) -> Result<f64, GridError> {
  Ok(edge_length_rads(edge)? * EARTH_RADIUS_KM)
}

/// Exact length of a directed edge in meters.
pub fn edge_length_m(edge: CellIndex) -> Result<f64, GridError> {
  Ok(edge_length_km(edge)? * 1000.0)
}
