//! Vertex indexes: mode-4 identifiers for the shared corners of cells.
//!
//! Every topological vertex is shared by three cells (two at a pentagon
//! distortion). The canonical index for a vertex names the owning cell,
//! the sharing cell with the lowest index, plus the vertex number within
//! that owner, so all cells around a corner derive the same identifier.

use crate::base_cells::{
  base_cell_to_ccw_rot60, base_cell_to_face_ijk, is_base_cell_pentagon, is_base_cell_polar_pentagon,
};
use crate::constants::{CELL_MODE, NUM_HEX_VERTS, NUM_PENTAGONS, NUM_PENT_VERTS, VERTEX_MODE};
use crate::coords::face_ijk::{face_ijk_pent_to_cell_boundary, face_ijk_to_cell_boundary};
use crate::index::{
  cell_to_face_ijk, get_base_cell, get_index_digit, get_mode, get_reserved_bits, get_resolution,
  is_pentagon, is_valid_cell, leading_non_zero_digit, set_mode, set_reserved_bits,
};
use crate::traversal::neighbors::{direction_for_neighbor, neighbor_rotations};
use crate::types::{CellBoundary, CellIndex, Direction, FaceIJK, GridError, LatLng};
use crate::NULL_INDEX;

/// Sentinel for a nonexistent vertex number.
pub(crate) const INVALID_VERTEX_NUM: i32 = -1;

/// Maximum number of topological vertexes on any cell.
pub const MAX_CELL_VERTS: usize = NUM_HEX_VERTS;

// Vertex number of the first (clockwise) vertex of the edge in each
// direction, for an unrotated cell on its home face. Direction 0 (center)
// has no edge; pentagons also lack the K edge.
const DIRECTION_TO_VERTEX_NUM_HEX: [i32; 7] = [INVALID_VERTEX_NUM, 3, 1, 2, 5, 4, 0];
const DIRECTION_TO_VERTEX_NUM_PENT: [i32; 7] =
  [INVALID_VERTEX_NUM, INVALID_VERTEX_NUM, 1, 2, 4, 3, 0];

// Inverse of the tables above: the edge direction whose first vertex is
// the given vertex number.
#[rustfmt::skip]
const VERTEX_NUM_TO_DIRECTION_HEX: [Direction; NUM_HEX_VERTS] = [
  Direction::IjAxes, Direction::JAxes, Direction::JkAxes,
  Direction::KAxes, Direction::IkAxes, Direction::IAxes,
];
#[rustfmt::skip]
const VERTEX_NUM_TO_DIRECTION_PENT: [Direction; NUM_PENT_VERTS] = [
  Direction::IjAxes, Direction::JAxes, Direction::JkAxes,
  Direction::IkAxes, Direction::IAxes,
];

// Icosahedron face found in each neighbor direction (J, JK, I, IK, IJ)
// for the twelve pentagon base cells.
struct PentagonDirectionFaces {
  base_cell: i32,
  faces: [i32; 5],
}

#[rustfmt::skip]
const PENTAGON_DIRECTION_FACES: [PentagonDirectionFaces; NUM_PENTAGONS as usize] = [
  PentagonDirectionFaces { base_cell: 4,   faces: [4, 0, 2, 1, 3] },
  PentagonDirectionFaces { base_cell: 14,  faces: [6, 11, 2, 7, 1] },
  PentagonDirectionFaces { base_cell: 24,  faces: [5, 10, 1, 6, 0] },
  PentagonDirectionFaces { base_cell: 38,  faces: [7, 12, 3, 8, 2] },
  PentagonDirectionFaces { base_cell: 49,  faces: [9, 14, 0, 5, 4] },
  PentagonDirectionFaces { base_cell: 58,  faces: [8, 13, 4, 9, 3] },
  PentagonDirectionFaces { base_cell: 63,  faces: [11, 6, 15, 10, 16] },
  PentagonDirectionFaces { base_cell: 72,  faces: [12, 7, 16, 11, 17] },
  PentagonDirectionFaces { base_cell: 83,  faces: [10, 5, 19, 14, 15] },
  PentagonDirectionFaces { base_cell: 97,  faces: [13, 8, 17, 12, 18] },
  PentagonDirectionFaces { base_cell: 107, faces: [14, 9, 18, 13, 19] },
  PentagonDirectionFaces { base_cell: 117, faces: [15, 19, 17, 18, 16] },
];

fn pentagon_direction_faces(base_cell: i32) -> Option<&'static [i32; 5]> {
  PENTAGON_DIRECTION_FACES
    .iter()
    .find(|entry| entry.base_cell == base_cell)
    .map(|entry| &entry.faces)
}

// Number of 60 degree ccw rotations between the cell's vertex chain and
// the canonical chain for its home-face orientation.
fn vertex_rotations(cell: CellIndex) -> Result<i32, GridError> {
  let mut fijk = FaceIJK::default();
  cell_to_face_ijk(cell, &mut fijk)?;
  let base_cell = get_base_cell(cell);

  let mut base_fijk = FaceIJK::default();
  base_cell_to_face_ijk(base_cell, &mut base_fijk);

  let mut ccw_rot60 = base_cell_to_ccw_rot60(base_cell, fijk.face);

  if is_base_cell_pentagon(base_cell) {
    let faces = pentagon_direction_faces(base_cell).ok_or(GridError::Failed)?;
    let jk_face = faces[Direction::JkAxes as usize - 2];
    let ik_face = faces[Direction::IkAxes as usize - 2];

    // Additional ccw rotation for polar neighbors or IK neighbors.
    if fijk.face != base_fijk.face
      && (is_base_cell_polar_pentagon(base_cell) || fijk.face == ik_face)
    {
      ccw_rot60 = (ccw_rot60 + 1) % 6;
    }

    // Cells that cross the deleted K subsequence pick up another turn.
    match leading_non_zero_digit(cell) {
      Direction::JkAxes if fijk.face == ik_face => ccw_rot60 = (ccw_rot60 + 5) % 6,
      Direction::IkAxes if fijk.face == jk_face => ccw_rot60 = (ccw_rot60 + 1) % 6,
      _ => {}
    }
  }

  Ok(ccw_rot60)
}

/// The vertex number of the first (clockwise) vertex of the cell's edge in
/// the given direction, or `INVALID_VERTEX_NUM` for directions with no
/// edge on this cell.
pub(crate) fn vertex_num_for_direction(origin: CellIndex, direction: Direction) -> i32 {
  let origin_is_pentagon = is_pentagon(origin);
  if direction == Direction::Center
    || direction == Direction::InvalidDigit
    || (origin_is_pentagon && direction == Direction::KAxes)
  {
    return INVALID_VERTEX_NUM;
  }

  let Ok(rotations) = vertex_rotations(origin) else {
    return INVALID_VERTEX_NUM;
  };

  if origin_is_pentagon {
    let n = NUM_PENT_VERTS as i32;
    (DIRECTION_TO_VERTEX_NUM_PENT[direction as usize] + n - rotations) % n
  } else {
    let n = NUM_HEX_VERTS as i32;
    (DIRECTION_TO_VERTEX_NUM_HEX[direction as usize] + n - rotations) % n
  }
}

// Inverse of vertex_num_for_direction.
fn direction_for_vertex_num(origin: CellIndex, vertex_num: i32) -> Direction {
  let origin_is_pentagon = is_pentagon(origin);
  let num_verts = if origin_is_pentagon { NUM_PENT_VERTS } else { NUM_HEX_VERTS } as i32;
  if vertex_num < 0 || vertex_num >= num_verts {
    return Direction::InvalidDigit;
  }

  let Ok(rotations) = vertex_rotations(origin) else {
    return Direction::InvalidDigit;
  };

  let idx = ((vertex_num + rotations) % num_verts) as usize;
  if origin_is_pentagon {
    VERTEX_NUM_TO_DIRECTION_PENT[idx]
  } else {
    VERTEX_NUM_TO_DIRECTION_HEX[idx]
  }
}

/// The canonical vertex index for vertex number `vertex_num` of `cell`.
///
/// Of the cells sharing the vertex, the one with the lowest index owns
/// it, so all of them produce the same result for the shared corner.
pub fn cell_to_vertex(cell: CellIndex, vertex_num: i32) -> Result<CellIndex, GridError> {
  if !is_valid_cell(cell) {
    return Err(GridError::CellInvalid);
  }

  let cell_is_pentagon = is_pentagon(cell);
  let num_verts = if cell_is_pentagon { NUM_PENT_VERTS } else { NUM_HEX_VERTS } as i32;
  if vertex_num < 0 || vertex_num >= num_verts {
    return Err(GridError::Domain);
  }

  let res = get_resolution(cell);
  let mut owner = cell;
  let mut owner_vertex_num = vertex_num;

  // A center child has the lowest index of any cell around its vertexes,
  // so the owner search is only needed for the other children.
  if res == 0 || get_index_digit(cell, res) != Direction::Center {
    // The vertex sits between the edges toward its two flanking
    // neighbors; vertex numbers are ccw so vertex_num - 1 is the right
    // side.
    let left = direction_for_vertex_num(cell, vertex_num);
    if left == Direction::InvalidDigit {
      return Err(GridError::Failed);
    }
    let mut l_rotations = 0;
    let mut left_neighbor = NULL_INDEX;
    neighbor_rotations(cell, left, &mut l_rotations, &mut left_neighbor)?;
    if left_neighbor < owner {
      owner = left_neighbor;
    }

    let right = direction_for_vertex_num(cell, (vertex_num + num_verts - 1) % num_verts);
    if right == Direction::InvalidDigit {
      return Err(GridError::Failed);
    }
    let mut r_rotations = 0;
    let mut right_neighbor = NULL_INDEX;
    neighbor_rotations(cell, right, &mut r_rotations, &mut right_neighbor)?;
    if right_neighbor < owner {
      owner = right_neighbor;
    }

    if owner != cell {
      let dir = direction_for_neighbor(owner, cell);
      let num = vertex_num_for_direction(owner, dir);
      if num == INVALID_VERTEX_NUM {
        return Err(GridError::Failed);
      }
      let owner_num_verts = if is_pentagon(owner) { NUM_PENT_VERTS } else { NUM_HEX_VERTS } as i32;
      // The edge toward the cell starts at `num`; the left neighbor
      // holds the second vertex of that edge.
      owner_vertex_num = if owner == left_neighbor { (num + 1) % owner_num_verts } else { num };
    }
  }

  let mut vertex = owner;
  set_mode(&mut vertex, VERTEX_MODE);
  set_reserved_bits(&mut vertex, owner_vertex_num as u8);
  Ok(vertex)
}

/// The canonical vertex indexes for all of the cell's vertexes, in vertex
/// number order. A pentagon fills five entries; the sixth is the null
/// index.
pub fn cell_to_vertexes(cell: CellIndex, out: &mut [CellIndex; MAX_CELL_VERTS]) -> Result<(), GridError> {
  let num_verts = if is_pentagon(cell) { NUM_PENT_VERTS } else { NUM_HEX_VERTS };
  for (i, slot) in out.iter_mut().enumerate().take(num_verts) {
    *slot = cell_to_vertex(cell, i as i32)?;
  }
  for slot in &mut out[num_verts..] {
    *slot = NULL_INDEX;
  }
  Ok(())
}

/// The spherical coordinates of a vertex.
pub fn vertex_to_lat_lng(vertex: CellIndex) -> Result<LatLng, GridError> {
  if !is_valid_vertex(vertex) {
    return Err(GridError::VertexInvalid);
  }

  let vertex_num = i32::from(get_reserved_bits(vertex));
  let mut owner = vertex;
  set_mode(&mut owner, CELL_MODE);
  set_reserved_bits(&mut owner, 0);

  let res = get_resolution(owner);
  let mut fijk = FaceIJK::default();
  cell_to_face_ijk(owner, &mut fijk)?;

  // A single-vertex run of the owner's boundary.
  let mut boundary = CellBoundary::default();
  if is_pentagon(owner) {
    face_ijk_pent_to_cell_boundary(&fijk, res, vertex_num, 1, &mut boundary);
  } else {
    face_ijk_to_cell_boundary(&fijk, res, vertex_num, 1, &mut boundary);
  }
  Ok(boundary.verts[0])
}

/// Whether the index is a valid, canonical vertex index.
#[must_use]
pub fn is_valid_vertex(vertex: CellIndex) -> bool {
  if get_mode(vertex) != VERTEX_MODE {
    return false;
  }

  let vertex_num = i32::from(get_reserved_bits(vertex));
  let mut owner = vertex;
  set_mode(&mut owner, CELL_MODE);
  set_reserved_bits(&mut owner, 0);
  if !is_valid_cell(owner) {
    return false;
  }

  let num_verts = if is_pentagon(owner) { NUM_PENT_VERTS } else { NUM_HEX_VERTS } as i32;
  if vertex_num >= num_verts {
    return false;
  }

  // The index must be canonical: the named owner actually owns the
  // vertex.
  matches!(cell_to_vertex(owner, vertex_num), Ok(canonical) if canonical == vertex)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::{cell_to_boundary, lat_lng_to_cell};
  use crate::latlng::{geo_almost_equal, set_geo_degs};
  use crate::traversal::grid_disk::{grid_disk, max_grid_disk_size};
  use crate::types::LatLng;
  use std::collections::{HashMap, HashSet};

  fn sf_cell(res: i32) -> CellIndex {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, 37.779, -122.419);
    lat_lng_to_cell(&geo, res).unwrap()
  }

  #[test]
  fn test_vertex_num_for_direction_hex() {
    let origin = sf_cell(9);
    let mut seen = HashSet::new();
    for dir_val in 1u8..7 {
      let dir = Direction::try_from(dir_val).unwrap();
      let num = vertex_num_for_direction(origin, dir);
      assert!((0..6).contains(&num));
      seen.insert(num);
    }
    assert_eq!(seen.len(), 6, "each direction names a distinct vertex");
    assert_eq!(vertex_num_for_direction(origin, Direction::Center), INVALID_VERTEX_NUM);
    assert_eq!(
      vertex_num_for_direction(origin, Direction::InvalidDigit),
      INVALID_VERTEX_NUM
    );
  }

  #[test]
  fn test_vertex_num_for_direction_pentagon() {
    let pentagon = CellIndex(0x820807fffffffff);
    assert!(is_pentagon(pentagon));

    assert_eq!(vertex_num_for_direction(pentagon, Direction::KAxes), INVALID_VERTEX_NUM);
    let mut seen = HashSet::new();
    for dir_val in 2u8..7 {
      let dir = Direction::try_from(dir_val).unwrap();
      let num = vertex_num_for_direction(pentagon, dir);
      assert!((0..5).contains(&num));
      seen.insert(num);
    }
    assert_eq!(seen.len(), 5);
  }

  #[test]
  fn test_direction_round_trip() {
    for cell in [sf_cell(3), sf_cell(9), CellIndex(0x820807fffffffff)] {
      let num_verts: i32 = if is_pentagon(cell) { 5 } else { 6 };
      for vertex_num in 0..num_verts {
        let dir = direction_for_vertex_num(cell, vertex_num);
        assert_ne!(dir, Direction::InvalidDigit);
        assert_eq!(vertex_num_for_direction(cell, dir), vertex_num);
      }
    }
  }

  #[test]
  fn test_cell_to_vertex_invalid_args() {
    let cell = sf_cell(9);
    assert_eq!(cell_to_vertex(cell, -1), Err(GridError::Domain));
    assert_eq!(cell_to_vertex(cell, 6), Err(GridError::Domain));
    assert_eq!(cell_to_vertex(NULL_INDEX, 0), Err(GridError::CellInvalid));

    let pentagon = CellIndex(0x820807fffffffff);
    assert_eq!(cell_to_vertex(pentagon, 5), Err(GridError::Domain));
  }

  #[test]
  fn test_cell_to_vertexes_hexagon() {
    let cell = sf_cell(9);
    let mut verts = [NULL_INDEX; MAX_CELL_VERTS];
    cell_to_vertexes(cell, &mut verts).unwrap();

    let unique: HashSet<_> = verts.iter().collect();
    assert_eq!(unique.len(), 6);
    for &vertex in &verts {
      assert!(is_valid_vertex(vertex));
    }
  }

  #[test]
  fn test_cell_to_vertexes_pentagon() {
    let pentagon = CellIndex(0x820807fffffffff);
    let mut verts = [NULL_INDEX; MAX_CELL_VERTS];
    cell_to_vertexes(pentagon, &mut verts).unwrap();

    assert_eq!(verts[5], NULL_INDEX);
    let unique: HashSet<_> = verts[..5].iter().collect();
    assert_eq!(unique.len(), 5);
    for &vertex in &verts[..5] {
      assert!(is_valid_vertex(vertex));
    }
  }

  #[test]
  fn test_shared_vertexes_are_canonical() {
    // In a disk of hexagons every interior vertex belongs to exactly
    // three cells, and all three must produce the same index for it.
    let origin = sf_cell(9);
    let size = max_grid_disk_size(2).unwrap() as usize;
    let mut disk = vec![NULL_INDEX; size];
    grid_disk(origin, 2, &mut disk).unwrap();

    let mut owners: HashMap<CellIndex, usize> = HashMap::new();
    for &cell in disk.iter().filter(|&&c| c != NULL_INDEX) {
      let mut verts = [NULL_INDEX; MAX_CELL_VERTS];
      cell_to_vertexes(cell, &mut verts).unwrap();
      for &vertex in &verts {
        *owners.entry(vertex).or_default() += 1;
      }
    }

    // The origin's own vertexes are interior to the k=2 disk.
    let mut origin_verts = [NULL_INDEX; MAX_CELL_VERTS];
    cell_to_vertexes(origin, &mut origin_verts).unwrap();
    for &vertex in &origin_verts {
      assert_eq!(owners[&vertex], 3, "vertex {:x}", vertex.0);
    }
  }

  #[test]
  fn test_vertex_to_lat_lng_matches_boundary() {
    let cell = sf_cell(9);
    let boundary = cell_to_boundary(cell).unwrap();

    let mut verts = [NULL_INDEX; MAX_CELL_VERTS];
    cell_to_vertexes(cell, &mut verts).unwrap();

    for &vertex in &verts {
      let point = vertex_to_lat_lng(vertex).unwrap();
      assert!(
        boundary.verts[..boundary.num_verts]
          .iter()
          .any(|v| geo_almost_equal(v, &point)),
        "vertex point must be a boundary vertex"
      );
    }
  }

  #[test]
  fn test_is_valid_vertex_rejects_other_modes() {
    let cell = sf_cell(9);
    assert!(!is_valid_vertex(cell));
    assert!(!is_valid_vertex(NULL_INDEX));

    let vertex = cell_to_vertex(cell, 0).unwrap();
    assert!(is_valid_vertex(vertex));
    assert_eq!(get_mode(vertex), VERTEX_MODE);

    // Vertex numbers past the owner's count are invalid.
    let mut bad = vertex;
    set_reserved_bits(&mut bad, 6);
    assert!(!is_valid_vertex(bad));
  }
}
