//! Polygon fill: finding the cells whose containment predicate holds for a
//! geographic polygon.
//!
//! The search walks the cell hierarchy from the 122 base cells down,
//! pruning subtrees whose padded bounding box misses the polygon and
//! emitting whole subtrees whose bounding box is fully contained. The
//! compact iterator yields that pruned tree directly; the full iterator
//! expands every coarse cell to the target resolution.

use crate::base_cells::base_cell_number_to_cell;
use crate::bbox::{
  bbox_contains_bbox, bbox_from_cell_boundary, bbox_overlaps_bbox, bbox_to_cell_boundary,
  bboxes_from_geo_polygon, scale_bbox,
};
use crate::constants::{
  CELL_SCALE_FACTOR, CHILD_SCALE_FACTOR, MAX_RES, NORTH_POLE_CELLS, NUM_BASE_CELLS, RES0_BBOXES,
  SOUTH_POLE_CELLS,
};
use crate::hierarchy::parent_child::{cell_to_center_child, cell_to_children_size};
use crate::index::{
  get_base_cell, get_index_digit, get_resolution, is_pentagon, set_index_digit, set_resolution,
};
use crate::indexing::{cell_to_boundary, cell_to_lat_lng};
use crate::iterators::CellChildIter;
use crate::polygon::{
  cell_boundary_crosses_polygon, cell_boundary_inside_polygon, flag_get_containment_mode,
  point_inside_cell_boundary, point_inside_polygon, validate_polygon_flags,
};
use crate::types::{BBox, CellIndex, ContainmentMode, Direction, GeoPolygon, GridError};
use crate::NULL_INDEX;
use std::f64::consts::{FRAC_PI_2, PI};

/// A bounding box guaranteed to contain the cell (`cover_children` false) or
/// the cell plus all of its descendants (`cover_children` true).
pub(crate) fn cell_to_bbox(cell: CellIndex, out: &mut BBox, cover_children: bool) -> Result<(), GridError> {
  let res = get_resolution(cell);

  if res == 0 {
    let base_cell = get_base_cell(cell);
    if !(0..NUM_BASE_CELLS).contains(&base_cell) {
      return Err(GridError::CellInvalid);
    }
    *out = RES0_BBOXES[base_cell as usize];
  } else {
    let boundary = cell_to_boundary(cell)?;
    bbox_from_cell_boundary(&boundary, out);
  }

  scale_bbox(out, if cover_children { CHILD_SCALE_FACTOR } else { CELL_SCALE_FACTOR });

  // The cells containing the poles need polar caps the vertex sweep above
  // cannot produce.
  if cell == CellIndex(NORTH_POLE_CELLS[res as usize]) {
    out.north = FRAC_PI_2;
  }
  if cell == CellIndex(SOUTH_POLE_CELLS[res as usize]) {
    out.south = -FRAC_PI_2;
  }
  if out.north == FRAC_PI_2 || out.south == -FRAC_PI_2 {
    out.east = PI;
    out.west = -PI;
  }
  Ok(())
}

// The cell after `cell` in a depth-first walk over all cells at its
// resolution and coarser: the next sibling where one exists, otherwise the
// parent's successor. NULL_INDEX past the last base cell.
fn next_cell(mut cell: CellIndex) -> CellIndex {
  let mut res = get_resolution(cell);
  loop {
    if res == 0 {
      let next_base_cell = get_base_cell(cell) + 1;
      if next_base_cell < NUM_BASE_CELLS {
        return base_cell_number_to_cell(next_base_cell);
      }
      return NULL_INDEX;
    }

    // Single-level parent; the full cell_to_parent revalidation is not
    // needed on indexes produced by this walk.
    let mut parent = cell;
    set_resolution(&mut parent, res - 1);
    set_index_digit(&mut parent, res, Direction::InvalidDigit);

    let digit = get_index_digit(cell, res);
    if (digit as u8) < Direction::IjAxes as u8 {
      // Children of a pentagon skip the deleted K subsequence.
      let skip = if digit == Direction::Center && is_pentagon(parent) { 2 } else { 1 };
      if let Ok(next_digit) = Direction::try_from(digit as u8 + skip) {
        set_index_digit(&mut cell, res, next_digit);
        return cell;
      }
    }

    res -= 1;
    cell = parent;
  }
}

/// Iterator over a compact set of cells covering the polygon: cells at the
/// target resolution plus coarser cells all of whose descendants satisfy
/// the containment predicate.
///
/// Yields `Err` at most once, if a cell conversion fails mid-walk, and is
/// exhausted afterwards.
pub struct PolygonCompactCellIter<'a> {
  polygon: &'a GeoPolygon,
  bboxes: Vec<BBox>,
  res: i32,
  mode: ContainmentMode,
  cell: CellIndex,
  started: bool,
}

impl<'a> PolygonCompactCellIter<'a> {
  /// Validates the resolution and flags and prepares the walk. The first
  /// candidate is produced by the first `next` call.
  pub fn new(polygon: &'a GeoPolygon, res: i32, flags: u32) -> Result<Self, GridError> {
    if !(0..=MAX_RES).contains(&res) {
      return Err(GridError::ResDomain);
    }
    validate_polygon_flags(flags)?;
    let mode = flag_get_containment_mode(flags)?;

    let mut bboxes = vec![BBox::default(); polygon.num_holes + 1];
    bboxes_from_geo_polygon(polygon, &mut bboxes);

    Ok(Self {
      polygon,
      bboxes,
      res,
      mode,
      cell: base_cell_number_to_cell(0),
      started: false,
    })
  }

  // Containment test for a single cell at the target resolution.
  fn test_cell(&self, cell: CellIndex) -> Result<bool, GridError> {
    match self.mode {
      ContainmentMode::Center => {
        let center = cell_to_lat_lng(cell)?;
        Ok(point_inside_polygon(self.polygon, &self.bboxes, &center))
      }
      ContainmentMode::Full => {
        let boundary = cell_to_boundary(cell)?;
        let mut bbox = BBox::default();
        cell_to_bbox(cell, &mut bbox, false)?;
        Ok(cell_boundary_inside_polygon(self.polygon, &self.bboxes, &boundary, &bbox))
      }
      ContainmentMode::Overlapping => {
        let center = cell_to_lat_lng(cell)?;
        if point_inside_polygon(self.polygon, &self.bboxes, &center) {
          return Ok(true);
        }

        let boundary = cell_to_boundary(cell)?;
        let mut bbox = BBox::default();
        cell_to_bbox(cell, &mut bbox, false)?;

        for vert in &boundary.verts[..boundary.num_verts] {
          if point_inside_polygon(self.polygon, &self.bboxes, vert) {
            return Ok(true);
          }
        }
        if cell_boundary_crosses_polygon(self.polygon, &self.bboxes, &boundary, &bbox) {
          return Ok(true);
        }
        // The polygon may sit entirely inside the cell.
        if self.polygon.geoloop.num_verts > 0
          && point_inside_cell_boundary(&boundary, &bbox, &self.polygon.geoloop.verts[0])
        {
          return Ok(true);
        }
        Ok(false)
      }
      // A deliberately coarse predicate: padded cell box against the outer
      // loop's box. Fast, never misses a cell, may include extras.
      ContainmentMode::OverlappingBbox => {
        let mut bbox = BBox::default();
        cell_to_bbox(cell, &mut bbox, false)?;
        Ok(bbox_overlaps_bbox(&bbox, &self.bboxes[0]))
      }
      ContainmentMode::Invalid => Err(GridError::OptionInvalid),
    }
  }
}

impl Iterator for PolygonCompactCellIter<'_> {
  type Item = Result<CellIndex, GridError>;

  fn next(&mut self) -> Option<Self::Item> {
    let mut cell = self.cell;
    if cell == NULL_INDEX {
      return None;
    }

    if self.started {
      cell = next_cell(cell);
    } else {
      self.started = true;
    }

    while cell != NULL_INDEX {
      let cell_res = get_resolution(cell);

      if cell_res == self.res {
        match self.test_cell(cell) {
          Ok(true) => {
            self.cell = cell;
            return Some(Ok(cell));
          }
          Ok(false) => {}
          Err(e) => {
            self.cell = NULL_INDEX;
            return Some(Err(e));
          }
        }
        cell = next_cell(cell);
        continue;
      }

      // Coarser than the target resolution: prune or emit whole subtrees
      // on a bounding box covering every descendant.
      let mut bbox = BBox::default();
      if let Err(e) = cell_to_bbox(cell, &mut bbox, true) {
        self.cell = NULL_INDEX;
        return Some(Err(e));
      }

      if bbox_overlaps_bbox(&bbox, &self.bboxes[0]) {
        if bbox_contains_bbox(&self.bboxes[0], &bbox) {
          // Cheap precondition held; confirm with the exact test. If the
          // whole buffered box is inside the polygon, every descendant
          // satisfies any of the containment modes.
          let bbox_boundary = bbox_to_cell_boundary(&bbox);
          if cell_boundary_inside_polygon(self.polygon, &self.bboxes, &bbox_boundary, &bbox) {
            self.cell = cell;
            return Some(Ok(cell));
          }
        }

        // The subtree straddles the polygon edge; descend.
        match cell_to_center_child(cell, cell_res + 1) {
          Ok(child) => {
            cell = child;
            continue;
          }
          Err(e) => {
            self.cell = NULL_INDEX;
            return Some(Err(e));
          }
        }
      }

      cell = next_cell(cell);
    }

    self.cell = NULL_INDEX;
    None
  }
}

/// Iterator over every cell at the target resolution satisfying the
/// containment predicate, in depth-first hierarchy order.
pub struct PolygonCellIter<'a> {
  compact: PolygonCompactCellIter<'a>,
  children: CellChildIter,
  res: i32,
}

impl<'a> PolygonCellIter<'a> {
  pub fn new(polygon: &'a GeoPolygon, res: i32, flags: u32) -> Result<Self, GridError> {
    Ok(Self {
      compact: PolygonCompactCellIter::new(polygon, res, flags)?,
      children: CellChildIter::new(NULL_INDEX, res),
      res,
    })
  }
}

impl Iterator for PolygonCellIter<'_> {
  type Item = Result<CellIndex, GridError>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(child) = self.children.next() {
        return Some(Ok(child));
      }
      match self.compact.next()? {
        Ok(cell) => self.children = CellChildIter::new(cell, self.res),
        Err(e) => return Some(Err(e)),
      }
    }
  }
}

/// An upper bound on the number of cells `polygon_to_cells` will produce
/// for this polygon, resolution and flags.
pub fn max_polygon_to_cells_size(polygon: &GeoPolygon, res: i32, flags: u32) -> Result<i64, GridError> {
  let mut count: i64 = 0;
  for cell in PolygonCompactCellIter::new(polygon, res, flags)? {
    count = count.saturating_add(cell_to_children_size(cell?, res)?);
  }
  Ok(count)
}

/// Fills `out` with the cells at `res` matching the polygon under the
/// containment mode selected by `flags`. Unused trailing entries are set
/// to the null index; fails with `MemoryBounds` if `out` is too small.
pub fn polygon_to_cells(
  polygon: &GeoPolygon,
  res: i32,
  flags: u32,
  out: &mut [CellIndex],
) -> Result<(), GridError> {
  let mut i = 0;
  for cell in PolygonCellIter::new(polygon, res, flags)? {
    let cell = cell?;
    if i >= out.len() {
      return Err(GridError::MemoryBounds);
    }
    out[i] = cell;
    i += 1;
  }
  for slot in &mut out[i..] {
    *slot = NULL_INDEX;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::index::is_valid_cell;
  use crate::indexing::lat_lng_to_cell;
  use crate::latlng::degs_to_rads;
  use crate::types::{GeoLoop, LatLng};
  use std::collections::HashSet;

  const SF_VERTS_RAW: [(f64, f64); 6] = [
    (0.659966917655, -2.1364398519396),
    (0.6595011102219, -2.1359434279405),
    (0.6583348114025, -2.1354884206045),
    (0.6581220034068, -2.1382437718946),
    (0.6594479998527, -2.1384597563896),
    (0.6599990002976, -2.1376771158464),
  ];

  const SF_HOLE_RAW: [(f64, f64); 3] = [
    (0.6595072188743, -2.1371053983433),
    (0.6591482046471, -2.1373141048153),
    (0.6592295020837, -2.1365222838402),
  ];

  fn geoloop_from(raw: &[(f64, f64)]) -> GeoLoop {
    let verts: Vec<LatLng> = raw.iter().map(|&(lat, lng)| LatLng { lat, lng }).collect();
    GeoLoop { num_verts: verts.len(), verts }
  }

  fn sf_polygon() -> GeoPolygon {
    GeoPolygon { geoloop: geoloop_from(&SF_VERTS_RAW), num_holes: 0, holes: Vec::new() }
  }

  fn sf_polygon_with_hole() -> GeoPolygon {
    GeoPolygon {
      geoloop: geoloop_from(&SF_VERTS_RAW),
      num_holes: 1,
      holes: vec![geoloop_from(&SF_HOLE_RAW)],
    }
  }

  fn fill(polygon: &GeoPolygon, res: i32, flags: u32) -> Vec<CellIndex> {
    let size = max_polygon_to_cells_size(polygon, res, flags).unwrap() as usize;
    let mut out = vec![NULL_INDEX; size];
    polygon_to_cells(polygon, res, flags, &mut out).unwrap();
    out.retain(|&c| c != NULL_INDEX);
    out
  }

  #[test]
  fn test_fill_sf_center() {
    let cells = fill(&sf_polygon(), 9, 0);
    assert_eq!(cells.len(), 1253);
    for &cell in &cells {
      assert!(is_valid_cell(cell));
      assert_eq!(get_resolution(cell), 9);
    }
    let unique: HashSet<_> = cells.iter().collect();
    assert_eq!(unique.len(), cells.len(), "no duplicates");
  }

  #[test]
  fn test_fill_sf_with_hole() {
    let cells = fill(&sf_polygon_with_hole(), 9, 0);
    assert_eq!(cells.len(), 1214);
  }

  #[test]
  fn test_fill_mode_inclusions() {
    let polygon = sf_polygon();
    let full: HashSet<_> = fill(&polygon, 9, 1).into_iter().collect();
    let center: HashSet<_> = fill(&polygon, 9, 0).into_iter().collect();
    let overlapping: HashSet<_> = fill(&polygon, 9, 2).into_iter().collect();
    let bbox: HashSet<_> = fill(&polygon, 9, 3).into_iter().collect();

    assert!(full.is_subset(&center));
    assert!(center.is_subset(&overlapping));
    assert!(overlapping.is_subset(&bbox));
    assert!(!full.is_empty());
  }

  #[test]
  fn test_fill_rectangle_contains_known_cell() {
    let raw = [(47.7, -3.0), (46.7, -3.0), (46.7, -4.0), (47.7, -4.0)];
    let verts: Vec<LatLng> = raw
      .iter()
      .map(|&(lat, lng)| LatLng { lat: degs_to_rads(lat), lng: degs_to_rads(lng) })
      .collect();
    let polygon = GeoPolygon {
      geoloop: GeoLoop { num_verts: verts.len(), verts },
      num_holes: 0,
      holes: Vec::new(),
    };

    let cells = fill(&polygon, 7, 0);
    assert!(cells.contains(&CellIndex(608412563192938495)));

    // Every returned cell center must be inside the rectangle.
    for &cell in &cells {
      let center = cell_to_lat_lng(cell).unwrap();
      assert!(center.lat > degs_to_rads(46.7) && center.lat < degs_to_rads(47.7));
      assert!(center.lng > degs_to_rads(-4.0) && center.lng < degs_to_rads(-3.0));
    }
  }

  #[test]
  fn test_fill_contains_interior_cell() {
    let polygon = sf_polygon();
    let interior = LatLng { lat: 0.659, lng: -2.137 };
    for res in [7, 8, 9] {
      let cells = fill(&polygon, res, 0);
      let expected = lat_lng_to_cell(&interior, res).unwrap();
      assert!(cells.contains(&expected), "res {res}");
    }
  }

  #[test]
  fn test_fill_empty_polygon() {
    let polygon = GeoPolygon::default();
    assert_eq!(fill(&polygon, 5, 0).len(), 0);
  }

  #[test]
  fn test_fill_bad_arguments() {
    let polygon = sf_polygon();
    let mut out = [NULL_INDEX; 1];
    assert_eq!(polygon_to_cells(&polygon, -1, 0, &mut out), Err(GridError::ResDomain));
    assert_eq!(polygon_to_cells(&polygon, 16, 0, &mut out), Err(GridError::ResDomain));
    assert_eq!(polygon_to_cells(&polygon, 9, 4, &mut out), Err(GridError::OptionInvalid));
    assert_eq!(polygon_to_cells(&polygon, 9, 1 << 5, &mut out), Err(GridError::OptionInvalid));
    assert_eq!(
      max_polygon_to_cells_size(&polygon, 9, 42),
      Err(GridError::OptionInvalid)
    );
  }

  #[test]
  fn test_fill_bounds_too_small() {
    let polygon = sf_polygon();
    let mut out = [NULL_INDEX; 2];
    assert_eq!(polygon_to_cells(&polygon, 9, 0, &mut out), Err(GridError::MemoryBounds));
  }

  #[test]
  fn test_max_size_is_upper_bound() {
    let polygon = sf_polygon();
    for res in [7, 8, 9] {
      let max = max_polygon_to_cells_size(&polygon, res, 0).unwrap();
      let actual = fill(&polygon, res, 0).len() as i64;
      assert!(max >= actual, "res {res}: {max} >= {actual}");
    }
  }

  #[test]
  fn test_compact_iter_matches_expanded() {
    let polygon = sf_polygon();
    let res = 9;

    let mut expanded: Vec<CellIndex> = Vec::new();
    for cell in PolygonCompactCellIter::new(&polygon, res, 0).unwrap() {
      let cell = cell.unwrap();
      let cell_res = get_resolution(cell);
      assert!(cell_res <= res);
      expanded.extend(CellChildIter::new(cell, res));
    }

    let direct: HashSet<_> = fill(&polygon, res, 0).into_iter().collect();
    let expanded_set: HashSet<_> = expanded.iter().copied().collect();
    assert_eq!(expanded_set.len(), expanded.len());
    assert_eq!(expanded_set, direct);
  }

  #[test]
  fn test_next_cell_walk_covers_base_cells() {
    // Starting from base cell 0 and repeatedly taking the successor at
    // res 0 visits all 122 base cells exactly once.
    let mut cell = base_cell_number_to_cell(0);
    let mut count = 0;
    while cell != NULL_INDEX {
      count += 1;
      cell = next_cell(cell);
    }
    assert_eq!(count, NUM_BASE_CELLS);
  }

  #[test]
  fn test_cell_to_bbox_pole_cells() {
    let mut bbox = BBox::default();
    cell_to_bbox(CellIndex(NORTH_POLE_CELLS[5]), &mut bbox, false).unwrap();
    assert_eq!(bbox.north, FRAC_PI_2);
    assert_eq!(bbox.east, PI);
    assert_eq!(bbox.west, -PI);

    cell_to_bbox(CellIndex(SOUTH_POLE_CELLS[5]), &mut bbox, true).unwrap();
    assert_eq!(bbox.south, -FRAC_PI_2);
  }

  #[test]
  fn test_cell_to_bbox_contains_boundary() {
    let cell = lat_lng_to_cell(&LatLng { lat: 0.659, lng: -2.137 }, 8).unwrap();
    let mut bbox = BBox::default();
    cell_to_bbox(cell, &mut bbox, false).unwrap();

    let boundary = cell_to_boundary(cell).unwrap();
    for vert in &boundary.verts[..boundary.num_verts] {
      assert!(vert.lat <= bbox.north && vert.lat >= bbox.south);
      assert!(vert.lng <= bbox.east && vert.lng >= bbox.west);
    }
  }
}
