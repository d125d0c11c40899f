//! Filled disks and hollow rings of cells around an origin.

use crate::constants::NUM_CELLS_MAX_RES;
use crate::index::{is_pentagon, is_valid_cell};
use crate::traversal::neighbors::neighbor_rotations;
use crate::types::{CellIndex, Direction, GridError};
use crate::NULL_INDEX;

/// Side order of a ring walk, starting from the cell reached by
/// [`NEXT_RING_DIRECTION`].
static DIRECTIONS: [Direction; 6] = [
  Direction::JAxes,
  Direction::JkAxes,
  Direction::KAxes,
  Direction::IkAxes,
  Direction::IAxes,
  Direction::IjAxes,
];

/// Direction used to move one ring outward.
const NEXT_RING_DIRECTION: Direction = Direction::IAxes;

/// Smallest k whose disk covers every cell at the finest resolution.
const K_ALL_CELLS_AT_MAX_RES: i32 = 13_780_510;

/// Maximum number of cells in a disk of radius `k`: the centered hexagonal
/// number, capped at the total cell count for disks larger than the grid.
pub fn max_grid_disk_size(k: i32) -> Result<i64, GridError> {
  if k < 0 {
    return Err(GridError::Domain);
  }
  if k >= K_ALL_CELLS_AT_MAX_RES {
    return Ok(NUM_CELLS_MAX_RES);
  }
  Ok(3 * i64::from(k) * (i64::from(k) + 1) + 1)
}

/// Recursive flood fill, using `out` as an open-addressed hash set keyed by
/// the index value. A cell reached again on a shorter path is revisited so
/// its recorded distance is the true grid distance.
fn disk_distances_recursive(
  origin: CellIndex,
  k: i32,
  out: &mut [CellIndex],
  distances: &mut [i32],
  cur_k: i32,
) -> Result<(), GridError> {
  let max_idx = out.len() as u64;
  let mut off = (origin.0 % max_idx) as usize;
  while out[off] != NULL_INDEX && out[off] != origin {
    off = (off + 1) % max_idx as usize;
  }

  if out[off] == origin && distances[off] <= cur_k {
    return Ok(());
  }

  out[off] = origin;
  distances[off] = cur_k;

  if cur_k >= k {
    return Ok(());
  }

  for &dir in &DIRECTIONS {
    let mut rotations = 0;
    let mut neighbor = NULL_INDEX;
    match neighbor_rotations(origin, dir, &mut rotations, &mut neighbor) {
      // Expected when walking off a pentagon; that direction has no cell.
      Err(GridError::Pentagon) => continue,
      Err(e) => return Err(e),
      Ok(()) => disk_distances_recursive(neighbor, k, out, distances, cur_k + 1)?,
    }
  }
  Ok(())
}

/// Fills `out` and `distances` with the disk of radius `k` around `origin`,
/// correct in the presence of pentagons. Output order is unspecified and
/// unused entries are nulled.
pub fn grid_disk_distances_safe(
  origin: CellIndex,
  k: i32,
  out: &mut [CellIndex],
  distances: &mut [i32],
) -> Result<(), GridError> {
  let max_size = max_grid_disk_size(k)? as usize;
  if out.len() < max_size || distances.len() < max_size {
    return Err(GridError::MemoryBounds);
  }
  if !is_valid_cell(origin) {
    return Err(GridError::CellInvalid);
  }

  out.fill(NULL_INDEX);
  distances.fill(0);
  disk_distances_recursive(origin, k, out, distances, 0)
}

/// Fills `out` with the disk of radius `k` and `distances` with each cell's
/// ring. Tries the fast ring walk first and falls back to the flood fill
/// when a pentagon distorts the walk.
pub fn grid_disk_distances(
  origin: CellIndex,
  k: i32,
  out: &mut [CellIndex],
  distances: &mut [i32],
) -> Result<(), GridError> {
  let max_size = max_grid_disk_size(k)? as usize;
  if out.len() < max_size || distances.len() < max_size {
    return Err(GridError::MemoryBounds);
  }
  if !is_valid_cell(origin) {
    return Err(GridError::CellInvalid);
  }

  if disk_unsafe_impl(origin, k, out, Some(distances)).is_ok() {
    return Ok(());
  }

  // The walk's partial output cannot be trusted.
  out.fill(NULL_INDEX);
  distances.fill(0);
  disk_distances_recursive(origin, k, out, distances, 0)
}

/// Fills `out` with all cells within grid distance `k` of `origin`. Output
/// order is unspecified; unused entries are nulled.
pub fn grid_disk(origin: CellIndex, k: i32, out: &mut [CellIndex]) -> Result<(), GridError> {
  let max_size = max_grid_disk_size(k)? as usize;
  let mut distances = vec![0i32; max_size];
  grid_disk_distances(origin, k, out, &mut distances)
}

// The fast disk algorithm: spiral outward ring by ring. Fails with
// `Pentagon` as soon as a pentagon is encountered, since the spiral's
// rotation bookkeeping breaks down there.
fn disk_unsafe_impl(
  mut origin: CellIndex,
  k: i32,
  out: &mut [CellIndex],
  mut distances: Option<&mut [i32]>,
) -> Result<(), GridError> {
  let mut idx = 0;
  out[idx] = origin;
  if let Some(d) = distances.as_deref_mut() {
    d[idx] = 0;
  }
  idx += 1;

  if is_pentagon(origin) {
    return Err(GridError::Pentagon);
  }

  // Position in the spiral: ring number, side of the ring, step on that
  // side, and accumulated rotations from crossed faces.
  let mut ring = 1;
  let mut direction = 0;
  let mut i = 0;
  let mut rotations = 0;

  while ring <= k {
    if direction == 0 && i == 0 {
      // Move to the next ring; the cell itself is recorded at the end of
      // the ring walk.
      neighbor_rotations(origin, NEXT_RING_DIRECTION, &mut rotations, &mut origin)?;
      if is_pentagon(origin) {
        return Err(GridError::Pentagon);
      }
    }

    neighbor_rotations(origin, DIRECTIONS[direction], &mut rotations, &mut origin)?;
    out[idx] = origin;
    if let Some(d) = distances.as_deref_mut() {
      d[idx] = ring;
    }
    idx += 1;

    i += 1;
    if i == ring {
      i = 0;
      direction += 1;
      if direction == 6 {
        ring += 1;
        direction = 0;
      }
    }

    if is_pentagon(origin) {
      return Err(GridError::Pentagon);
    }
  }
  Ok(())
}

/// The fast disk fill. Errors with `Pentagon` if a pentagon or its
/// distortion is encountered; use [`grid_disk`] unless that is acceptable.
pub fn grid_disk_unsafe(origin: CellIndex, k: i32, out: &mut [CellIndex]) -> Result<(), GridError> {
  let max_size = max_grid_disk_size(k)? as usize;
  if out.len() < max_size {
    return Err(GridError::MemoryBounds);
  }
  disk_unsafe_impl(origin, k, out, None)
}

/// [`grid_disk_unsafe`], also reporting each cell's ring number.
pub fn grid_disk_distances_unsafe(
  origin: CellIndex,
  k: i32,
  out: &mut [CellIndex],
  distances: &mut [i32],
) -> Result<(), GridError> {
  let max_size = max_grid_disk_size(k)? as usize;
  if out.len() < max_size || distances.len() < max_size {
    return Err(GridError::MemoryBounds);
  }
  disk_unsafe_impl(origin, k, out, Some(distances))
}

/// Fills `out` with the hollow ring of cells at exactly grid distance `k`,
/// in ring walk order. Errors with `Pentagon` when the ring crosses a
/// pentagon or its distortion.
pub fn grid_ring_unsafe(mut origin: CellIndex, k: i32, out: &mut [CellIndex]) -> Result<(), GridError> {
  if k < 0 {
    return Err(GridError::Domain);
  }
  let ring_size = if k == 0 { 1 } else { 6 * k as usize };
  if out.len() < ring_size {
    return Err(GridError::MemoryBounds);
  }
  if k == 0 {
    out[0] = origin;
    return Ok(());
  }

  let mut idx = 0;
  let mut rotations = 0;

  if is_pentagon(origin) {
    return Err(GridError::Pentagon);
  }

  for _ in 0..k {
    neighbor_rotations(origin, NEXT_RING_DIRECTION, &mut rotations, &mut origin)?;
    if is_pentagon(origin) {
      return Err(GridError::Pentagon);
    }
  }

  let last_index = origin;
  out[idx] = origin;
  idx += 1;

  for (direction, &dir) in DIRECTIONS.iter().enumerate() {
    for pos in 0..k {
      neighbor_rotations(origin, dir, &mut rotations, &mut origin)?;

      // The final step returns to the first cell, which is already
      // recorded; the move itself is still needed.
      if pos != k - 1 || direction != 5 {
        out[idx] = origin;
        idx += 1;

        if is_pentagon(origin) {
          return Err(GridError::Pentagon);
        }
      }
    }
  }

  // A mismatch here means pentagonal distortion skewed the walk.
  if last_index != origin {
    return Err(GridError::Pentagon);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::lat_lng_to_cell;
  use crate::latlng::set_geo_degs;
  use crate::types::LatLng;

  fn sf_cell(res: i32) -> CellIndex {
    let mut geo = LatLng::default();
    set_geo_degs(&mut geo, 37.779, -122.419);
    lat_lng_to_cell(&geo, res).unwrap()
  }

  #[test]
  fn test_max_grid_disk_size() {
    assert_eq!(max_grid_disk_size(0), Ok(1));
    assert_eq!(max_grid_disk_size(1), Ok(7));
    assert_eq!(max_grid_disk_size(2), Ok(19));
    assert_eq!(max_grid_disk_size(-1), Err(GridError::Domain));
    // Oversized disks cap at the total number of cells.
    assert_eq!(max_grid_disk_size(i32::MAX), Ok(NUM_CELLS_MAX_RES));
  }

  #[test]
  fn test_grid_disk_k0() {
    let origin = sf_cell(9);
    let mut out = [NULL_INDEX; 1];
    grid_disk(origin, 0, &mut out).unwrap();
    assert_eq!(out[0], origin);
  }

  #[test]
  fn test_grid_disk_k1() {
    let origin = sf_cell(9);
    let mut out = [NULL_INDEX; 7];
    grid_disk(origin, 1, &mut out).unwrap();

    let filled = out.iter().filter(|&&h| h != NULL_INDEX).count();
    assert_eq!(filled, 7);
    assert!(out.contains(&origin));
    for &cell in &out {
      assert!(is_valid_cell(cell));
    }
  }

  #[test]
  fn test_grid_disk_distances() {
    let origin = sf_cell(9);
    let mut out = [NULL_INDEX; 19];
    let mut distances = [0i32; 19];
    grid_disk_distances(origin, 2, &mut out, &mut distances).unwrap();

    let mut by_ring = [0usize; 3];
    for (&cell, &d) in out.iter().zip(&distances) {
      if cell == NULL_INDEX {
        continue;
      }
      assert!((0..=2).contains(&d));
      by_ring[d as usize] += 1;
      if d == 0 {
        assert_eq!(cell, origin);
      }
    }
    assert_eq!(by_ring, [1, 6, 12]);
  }

  #[test]
  fn test_grid_disk_pentagon() {
    // Res 1 center child of base cell 4: the fast walk must fail and the
    // fallback must produce 5 + 1 cells for k = 1.
    let pentagon = CellIndex(0x81083ffffffffff);
    assert!(is_pentagon(pentagon));

    let mut out = [NULL_INDEX; 7];
    assert_eq!(grid_disk_unsafe(pentagon, 1, &mut out), Err(GridError::Pentagon));

    let mut out = [NULL_INDEX; 7];
    grid_disk(pentagon, 1, &mut out).unwrap();
    let filled = out.iter().filter(|&&h| h != NULL_INDEX).count();
    assert_eq!(filled, 6, "pentagon has 5 neighbors");
    assert!(out.contains(&pentagon));
  }

  #[test]
  fn test_grid_disk_bounds() {
    let origin = sf_cell(9);
    let mut too_small = [NULL_INDEX; 6];
    assert_eq!(grid_disk(origin, 1, &mut too_small), Err(GridError::MemoryBounds));
    assert_eq!(
      grid_disk(NULL_INDEX, 0, &mut [NULL_INDEX; 1]),
      Err(GridError::CellInvalid)
    );
  }

  #[test]
  fn test_unsafe_matches_safe() {
    let origin = sf_cell(8);
    let mut fast = [NULL_INDEX; 19];
    let mut safe = [NULL_INDEX; 19];
    let mut distances = [0i32; 19];
    grid_disk_unsafe(origin, 2, &mut fast).unwrap();
    grid_disk_distances_safe(origin, 2, &mut safe, &mut distances).unwrap();

    fast.sort_unstable();
    safe.sort_unstable();
    assert_eq!(fast, safe);
  }

  #[test]
  fn test_grid_ring() {
    let origin = sf_cell(9);

    let mut identity = [NULL_INDEX; 1];
    grid_ring_unsafe(origin, 0, &mut identity).unwrap();
    assert_eq!(identity[0], origin);

    let mut ring = [NULL_INDEX; 12];
    grid_ring_unsafe(origin, 2, &mut ring).unwrap();
    for &cell in &ring {
      assert!(is_valid_cell(cell));
      assert_ne!(cell, origin);
    }

    // The ring matches the k = 2 entries of the distance-annotated disk.
    let mut disk = [NULL_INDEX; 19];
    let mut distances = [0i32; 19];
    grid_disk_distances(origin, 2, &mut disk, &mut distances).unwrap();
    let mut expected: Vec<_> = disk
      .iter()
      .zip(&distances)
      .filter(|&(&h, &d)| h != NULL_INDEX && d == 2)
      .map(|(&h, _)| h)
      .collect();
    let mut got = ring.to_vec();
    expected.sort_unstable();
    got.sort_unstable();
    assert_eq!(got, expected);
  }

  #[test]
  fn test_grid_ring_pentagon() {
    let pentagon = CellIndex(0x81083ffffffffff);
    let mut ring = [NULL_INDEX; 6];
    assert_eq!(grid_ring_unsafe(pentagon, 1, &mut ring), Err(GridError::Pentagon));
  }
}
