//! Directed edge indexes: mode-2 identifiers for an ordered pair of
//! adjacent cells.
//!
//! A directed edge reuses the origin cell's bits and stores the neighbor
//! direction in the reserved field, so origin recovery is a bit mask and
//! destination recovery is a single neighbor step.

use crate::constants::{CELL_MODE, DIRECTED_EDGE_MODE, MAX_CELL_BNDRY_VERTS, NUM_HEX_VERTS};
use crate::coords::face_ijk::{face_ijk_pent_to_cell_boundary, face_ijk_to_cell_boundary};
use crate::index::{
  cell_to_face_ijk, get_mode, get_reserved_bits, get_resolution, is_pentagon, is_valid_cell,
  set_mode, set_reserved_bits,
};
use crate::traversal::neighbors::{are_neighbor_cells, direction_for_neighbor, neighbor_rotations};
use crate::types::{CellBoundary, CellIndex, Direction, FaceIJK, GridError};
use crate::vertexes::{vertex_num_for_direction, INVALID_VERTEX_NUM};
use crate::NULL_INDEX;

/// Number of directed edges originating at a cell. Pentagons use one
/// fewer; their output keeps the first slot null.
pub const MAX_CELL_EDGES: usize = NUM_HEX_VERTS;

/// The directed edge from `origin` to its neighbor `destination`.
pub fn cells_to_directed_edge(
  origin: CellIndex,
  destination: CellIndex,
) -> Result<CellIndex, GridError> {
  if !are_neighbor_cells(origin, destination)? {
    return Err(GridError::NotNeighbors);
  }

  let direction = direction_for_neighbor(origin, destination);
  if direction == Direction::Center || direction == Direction::InvalidDigit {
    return Err(GridError::Failed);
  }

  let mut edge = origin;
  set_mode(&mut edge, DIRECTED_EDGE_MODE);
  set_reserved_bits(&mut edge, direction as u8);
  Ok(edge)
}

/// Whether the index is a valid directed edge.
#[must_use]
pub fn is_valid_directed_edge(edge: CellIndex) -> bool {
  if get_mode(edge) != DIRECTED_EDGE_MODE {
    return false;
  }

  let direction = get_reserved_bits(edge);
  if !(Direction::KAxes as u8..=Direction::IjAxes as u8).contains(&direction) {
    return false;
  }

  let mut origin = edge;
  set_mode(&mut origin, CELL_MODE);
  set_reserved_bits(&mut origin, 0);
  if is_pentagon(origin) && direction == Direction::KAxes as u8 {
    return false;
  }

  is_valid_cell(origin)
}

/// The origin cell of a directed edge.
pub fn get_directed_edge_origin(edge: CellIndex) -> Result<CellIndex, GridError> {
  if get_mode(edge) != DIRECTED_EDGE_MODE {
    return Err(GridError::DirEdgeInvalid);
  }
  let mut origin = edge;
  set_mode(&mut origin, CELL_MODE);
  set_reserved_bits(&mut origin, 0);
  Ok(origin)
}

/// The destination cell of a directed edge.
pub fn get_directed_edge_destination(edge: CellIndex) -> Result<CellIndex, GridError> {
  if !is_valid_directed_edge(edge) {
    return Err(GridError::DirEdgeInvalid);
  }

  let direction = Direction::try_from(get_reserved_bits(edge)).map_err(|_| GridError::Failed)?;
  let origin = get_directed_edge_origin(edge)?;

  let mut rotations = 0;
  let mut destination = NULL_INDEX;
  neighbor_rotations(origin, direction, &mut rotations, &mut destination)?;
  Ok(destination)
}

/// The origin and destination cells of a directed edge, in that order.
pub fn directed_edge_to_cells(edge: CellIndex, out: &mut [CellIndex; 2]) -> Result<(), GridError> {
  if !is_valid_directed_edge(edge) {
    return Err(GridError::DirEdgeInvalid);
  }
  out[0] = get_directed_edge_origin(edge)?;
  out[1] = get_directed_edge_destination(edge)?;
  Ok(())
}

/// All directed edges originating at `origin`, in direction order. For a
/// pentagon the first slot is the null index.
pub fn origin_to_directed_edges(
  origin: CellIndex,
  out: &mut [CellIndex; MAX_CELL_EDGES],
) -> Result<(), GridError> {
  if !is_valid_cell(origin) {
    return Err(GridError::CellInvalid);
  }

  let origin_is_pentagon = is_pentagon(origin);
  for (i, slot) in out.iter_mut().enumerate() {
    if origin_is_pentagon && i == 0 {
      *slot = NULL_INDEX;
      continue;
    }
    let mut edge = origin;
    set_mode(&mut edge, DIRECTED_EDGE_MODE);
    set_reserved_bits(&mut edge, (i + 1) as u8);
    *slot = edge;
  }
  Ok(())
}

/// The geographic boundary of a directed edge: the run of origin-cell
/// boundary vertexes along the shared side, including any distortion
/// vertex from crossing an icosahedron edge.
pub fn directed_edge_to_boundary(edge: CellIndex) -> Result<CellBoundary, GridError> {
  if !is_valid_directed_edge(edge) {
    return Err(GridError::DirEdgeInvalid);
  }

  let direction = Direction::try_from(get_reserved_bits(edge)).map_err(|_| GridError::Failed)?;
  let origin = get_directed_edge_origin(edge)?;

  let start_vertex = vertex_num_for_direction(origin, direction);
  if start_vertex == INVALID_VERTEX_NUM {
    return Err(GridError::Failed);
  }

  let res = get_resolution(origin);
  let mut fijk = FaceIJK::default();
  cell_to_face_ijk(origin, &mut fijk)?;

  // Two topological vertexes; face crossings may add a third point.
  let mut boundary = CellBoundary::default();
  if is_pentagon(origin) {
    face_ijk_pent_to_cell_boundary(&fijk, res, start_vertex, 2, &mut boundary);
  } else {
    face_ijk_to_cell_boundary(&fijk, res, start_vertex, 2, &mut boundary);
  }
  debug_assert!(boundary.num_verts <= MAX_CELL_BNDRY_VERTS);
  Ok(boundary)
}
