//! Tracing the outline of a set of cells as a multi-polygon.
//!
//! Every cell contributes its boundary edges to a vertex graph; an edge
//! shared by two cells in the set appears once in each direction and
//! cancels out, leaving only the outline. Walking the remaining edges
//! end-to-start yields closed loops, which are then sorted into outer
//! loops and holes by winding order.
//!
//! Vertex identity is exact: adjacent cells derive a shared vertex from
//! the same face-lattice coordinates, so their floating point boundaries
//! agree bit for bit.

use std::collections::{HashMap, HashSet};

use crate::bbox::bbox_from_geoloop;
use crate::index::{get_resolution, is_valid_cell};
use crate::indexing::cell_to_boundary;
use crate::polygon::{is_clockwise_geoloop, point_inside_geoloop};
use crate::types::{BBox, CellIndex, GeoLoop, GeoPolygon, GridError, LatLng};

type VertexKey = (u64, u64);

#[inline]
fn vertex_key(v: &LatLng) -> VertexKey {
  (v.lat.to_bits(), v.lng.to_bits())
}

/// Directed edges keyed by their start vertex. Removal by reversed edge
/// cancels internal edges as cells are added.
#[derive(Default)]
struct VertexGraph {
  edges: HashMap<VertexKey, Vec<LatLng>>,
}

impl VertexGraph {
  fn add_edge(&mut self, from: LatLng, to: LatLng) {
    self.edges.entry(vertex_key(&from)).or_default().push(to);
  }

  /// Removes the edge `from` -> `to` if present.
  fn remove_edge(&mut self, from: &LatLng, to: &LatLng) -> bool {
    let key = vertex_key(from);
    if let Some(targets) = self.edges.get_mut(&key) {
      if let Some(pos) = targets.iter().position(|t| vertex_key(t) == vertex_key(to)) {
        targets.swap_remove(pos);
        if targets.is_empty() {
          self.edges.remove(&key);
        }
        return true;
      }
    }
    false
  }

  /// Removes and returns an arbitrary edge.
  fn pop_any(&mut self) -> Option<(LatLng, LatLng)> {
    let (&key, targets) = self.edges.iter_mut().next()?;
    let to = targets.pop()?;
    let from = LatLng {
      lat: f64::from_bits(key.0),
      lng: f64::from_bits(key.1),
    };
    if targets.is_empty() {
      self.edges.remove(&key);
    }
    Some((from, to))
  }

  /// Removes and returns the target of an edge starting at `from`.
  fn take_from(&mut self, from: &LatLng) -> Option<LatLng> {
    let key = vertex_key(from);
    let targets = self.edges.get_mut(&key)?;
    let to = targets.pop()?;
    if targets.is_empty() {
      self.edges.remove(&key);
    }
    Some(to)
  }

  fn is_empty(&self) -> bool {
    self.edges.is_empty()
  }
}

fn build_graph(cells: &[CellIndex]) -> Result<VertexGraph, GridError> {
  let res = get_resolution(cells[0]);
  let mut graph = VertexGraph::default();
  let mut seen = HashSet::with_capacity(cells.len());

  for &cell in cells {
    if !is_valid_cell(cell) {
      return Err(GridError::CellInvalid);
    }
    if get_resolution(cell) != res {
      return Err(GridError::ResMismatch);
    }
    // A repeated cell would re-add its boundary edges in the same
    // direction and corrupt the cancellation.
    if !seen.insert(cell) {
      return Err(GridError::DuplicateInput);
    }

    let boundary = cell_to_boundary(cell)?;
    for i in 0..boundary.num_verts {
      let from = boundary.verts[i];
      let to = boundary.verts[(i + 1) % boundary.num_verts];
      // A shared edge was already added by a neighbor, in the opposite
      // direction; cancel instead of adding.
      if !graph.remove_edge(&to, &from) {
        graph.add_edge(from, to);
      }
    }
  }
  Ok(graph)
}

fn trace_loops(graph: &mut VertexGraph) -> Result<Vec<GeoLoop>, GridError> {
  let mut loops = Vec::new();

  while !graph.is_empty() {
    let Some((from, to)) = graph.pop_any() else { break };
    let mut verts = vec![from];
    let mut next = to;
    while let Some(following) = graph.take_from(&next) {
      verts.push(next);
      next = following;
    }
    // The walk must return to its starting vertex; anything else means
    // the input contained duplicate cells.
    if vertex_key(&next) != vertex_key(&verts[0]) {
      return Err(GridError::DuplicateInput);
    }
    loops.push(GeoLoop { num_verts: verts.len(), verts });
  }
  Ok(loops)
}

/// The outline of a set of cells as polygons with holes.
///
/// All cells must be valid and share one resolution; the set must not
/// contain duplicates. Outer loops wind counterclockwise (matching cell
/// boundaries) and each clockwise loop is attached as a hole to the
/// polygon containing it.
pub fn cells_to_multi_polygon(cells: &[CellIndex]) -> Result<Vec<GeoPolygon>, GridError> {
  if cells.is_empty() {
    return Ok(Vec::new());
  }

  let mut graph = build_graph(cells)?;
  let loops = trace_loops(&mut graph)?;

  let mut polygons: Vec<GeoPolygon> = Vec::new();
  let mut outer_bboxes: Vec<BBox> = Vec::new();
  let mut holes: Vec<GeoLoop> = Vec::new();

  for geoloop in loops {
    if is_clockwise_geoloop(&geoloop) {
      holes.push(geoloop);
    } else {
      let mut bbox = BBox::default();
      bbox_from_geoloop(&geoloop, &mut bbox);
      outer_bboxes.push(bbox);
      polygons.push(GeoPolygon { geoloop, num_holes: 0, holes: Vec::new() });
    }
  }

  for hole in holes {
    let probe = hole.verts[0];
    let parent = polygons
      .iter_mut()
      .zip(&outer_bboxes)
      .find(|(polygon, bbox)| point_inside_geoloop(&polygon.geoloop, bbox, &probe));
    match parent {
      Some((polygon, _)) => {
        polygon.holes.push(hole);
        polygon.num_holes += 1;
      }
      // A hole with no surrounding outer loop means the edge cancellation
      // went wrong, which duplicate input can cause.
      None => return Err(GridError::DuplicateInput),
    }
  }

  Ok(polygons)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::lat_lng_to_cell;
  use crate::latlng::geo_almost_equal;
  use crate::traversal::grid_disk::{grid_disk, max_grid_disk_size};
  use crate::NULL_INDEX;

  fn sf_cell(res: i32) -> CellIndex {
    lat_lng_to_cell(&LatLng { lat: 0.659966917655, lng: -2.1364398519396 }, res).unwrap()
  }

  fn disk(origin: CellIndex, k: i32) -> Vec<CellIndex> {
    let size = max_grid_disk_size(k).unwrap() as usize;
    let mut out = vec![NULL_INDEX; size];
    grid_disk(origin, k, &mut out).unwrap();
    out.retain(|&c| c != NULL_INDEX);
    out
  }

  #[test]
  fn test_empty_set() {
    assert_eq!(cells_to_multi_polygon(&[]), Ok(Vec::new()));
  }

  #[test]
  fn test_single_cell() {
    let cell = sf_cell(9);
    let polygons = cells_to_multi_polygon(&[cell]).unwrap();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].num_holes, 0);
    assert_eq!(polygons[0].geoloop.num_verts, 6);

    // The loop is the cell boundary, possibly rotated.
    let boundary = cell_to_boundary(cell).unwrap();
    for vert in &boundary.verts[..boundary.num_verts] {
      assert!(polygons[0].geoloop.verts.iter().any(|v| geo_almost_equal(v, vert)));
    }
    assert!(!is_clockwise_geoloop(&polygons[0].geoloop));
  }

  #[test]
  fn test_two_contiguous_cells() {
    let origin = sf_cell(9);
    let neighbor = disk(origin, 1).into_iter().find(|&c| c != origin).unwrap();
    let polygons = cells_to_multi_polygon(&[origin, neighbor]).unwrap();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].num_holes, 0);
    assert_eq!(polygons[0].geoloop.num_verts, 10);
  }

  #[test]
  fn test_two_disjoint_cells() {
    let a = sf_cell(9);
    let ring1 = disk(a, 1);
    // A cell two rings out shares no edge with the origin.
    let b = *disk(a, 2).iter().find(|c| !ring1.contains(c)).unwrap();

    let polygons = cells_to_multi_polygon(&[a, b]).unwrap();
    assert_eq!(polygons.len(), 2);
    for polygon in &polygons {
      assert_eq!(polygon.num_holes, 0);
      assert_eq!(polygon.geoloop.num_verts, 6);
    }
  }

  #[test]
  fn test_filled_disk_has_no_holes() {
    let cells = disk(sf_cell(9), 1);
    assert_eq!(cells.len(), 7);
    let polygons = cells_to_multi_polygon(&cells).unwrap();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].num_holes, 0);
    // Each of the six outer cells contributes three outline edges.
    assert_eq!(polygons[0].geoloop.num_verts, 18);
  }

  #[test]
  fn test_donut_has_hole() {
    let origin = sf_cell(9);
    let ring: Vec<CellIndex> = disk(origin, 1).into_iter().filter(|&c| c != origin).collect();
    assert_eq!(ring.len(), 6);

    let polygons = cells_to_multi_polygon(&ring).unwrap();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].num_holes, 1);
    assert_eq!(polygons[0].geoloop.num_verts, 18);
    assert_eq!(polygons[0].holes[0].num_verts, 6);
    assert!(is_clockwise_geoloop(&polygons[0].holes[0]));

    // The hole surrounds the removed center cell.
    let center = crate::indexing::cell_to_lat_lng(origin).unwrap();
    let mut hole_bbox = BBox::default();
    bbox_from_geoloop(&polygons[0].holes[0], &mut hole_bbox);
    assert!(point_inside_geoloop(&polygons[0].holes[0], &hole_bbox, &center));
  }

  #[test]
  fn test_duplicate_input() {
    let cell = sf_cell(9);
    assert_eq!(
      cells_to_multi_polygon(&[cell, cell]),
      Err(GridError::DuplicateInput)
    );

    // A duplicate hidden among distinct cells is rejected too.
    let mut cells = disk(cell, 1);
    cells.push(cells[0]);
    assert_eq!(cells_to_multi_polygon(&cells), Err(GridError::DuplicateInput));
  }

  #[test]
  fn test_res_mismatch() {
    assert_eq!(
      cells_to_multi_polygon(&[sf_cell(9), sf_cell(8)]),
      Err(GridError::ResMismatch)
    );
  }

  #[test]
  fn test_invalid_cell() {
    assert_eq!(
      cells_to_multi_polygon(&[sf_cell(9), CellIndex(0xffff_ffff_ffff_ffff)]),
      Err(GridError::CellInvalid)
    );
  }
}
