use hexcell::*;
use std::collections::HashSet;

fn hex(s: &str) -> CellIndex {
  string_to_cell(s).unwrap()
}

#[test]
fn test_are_neighbor_cells() {
  assert_eq!(
    are_neighbor_cells(hex("85283473fffffff"), hex("85283477fffffff")),
    Ok(true)
  );
  // Structurally broken index: unset digits below the resolution.
  assert_eq!(
    are_neighbor_cells(hex("85283473fffffff"), CellIndex(0x85283472fffffff)),
    Err(GridError::CellInvalid)
  );
}

#[test]
fn test_grid_distance() {
  assert_eq!(grid_distance(hex("85283473fffffff"), hex("8528342bfffffff")), Ok(2));
  let origin = hex("85283473fffffff");
  assert_eq!(grid_distance(origin, origin), Ok(0));
  assert_eq!(
    grid_distance(origin, hex("8428347ffffffff")),
    Err(GridError::ResMismatch)
  );
}

#[test]
fn test_grid_disk_k1() {
  let origin = hex("85283473fffffff");
  let expected: HashSet<CellIndex> = [
    "85283473fffffff",
    "85283447fffffff",
    "8528347bfffffff",
    "85283463fffffff",
    "85283477fffffff",
    "8528340ffffffff",
    "8528340bfffffff",
  ]
  .iter()
  .map(|s| hex(s))
  .collect();

  let size = max_grid_disk_size(1).unwrap() as usize;
  let mut cells = vec![NULL_INDEX; size];
  grid_disk(origin, 1, &mut cells).unwrap();

  let result: HashSet<CellIndex> = cells.into_iter().filter(|&h| h != NULL_INDEX).collect();
  assert_eq!(result, expected);
}

#[test]
fn test_grid_disk_distances() {
  let origin = hex("85283473fffffff");
  let k = 2;
  let size = max_grid_disk_size(k).unwrap() as usize;
  let mut cells = vec![NULL_INDEX; size];
  let mut distances = vec![0i32; size];
  grid_disk_distances(origin, k, &mut cells, &mut distances).unwrap();

  for (&cell, &dist) in cells.iter().zip(&distances) {
    if cell == NULL_INDEX {
      continue;
    }
    assert_eq!(grid_distance(origin, cell), Ok(i64::from(dist)));
  }
}

#[test]
fn test_grid_ring() {
  let origin = hex("85283473fffffff");
  let expected: HashSet<CellIndex> = [
    "8528340bfffffff",
    "85283447fffffff",
    "8528347bfffffff",
    "85283463fffffff",
    "85283477fffffff",
    "8528340ffffffff",
  ]
  .iter()
  .map(|s| hex(s))
  .collect();

  let mut ring = vec![NULL_INDEX; 6];
  grid_ring_unsafe(origin, 1, &mut ring).unwrap();
  let result: HashSet<CellIndex> = ring.into_iter().collect();
  assert_eq!(result, expected);
}

#[test]
fn test_grid_disk_sizes() {
  assert_eq!(max_grid_disk_size(0), Ok(1));
  assert_eq!(max_grid_disk_size(1), Ok(7));
  assert_eq!(max_grid_disk_size(2), Ok(19));
  assert_eq!(max_grid_disk_size(-1), Err(GridError::Domain));
}

#[test]
fn test_grid_disk_around_pentagon() {
  // The pentagon's missing K neighbor shrinks its first ring to five.
  let pentagon = hex("8009fffffffffff");
  assert!(is_pentagon(pentagon));

  let size = max_grid_disk_size(1).unwrap() as usize;
  let mut cells = vec![NULL_INDEX; size];
  grid_disk(pentagon, 1, &mut cells).unwrap();
  let filled = cells.iter().filter(|&&h| h != NULL_INDEX).count();
  assert_eq!(filled, 6);
}

#[test]
fn test_grid_path_cells() {
  let start = hex("85283473fffffff");
  let end = hex("8528342bfffffff");

  let size = grid_path_cells_size(start, end).unwrap() as usize;
  assert_eq!(size, 3, "distance 2 plus the endpoints");

  let mut path = vec![NULL_INDEX; size];
  grid_path_cells(start, end, &mut path).unwrap();
  assert_eq!(path[0], start);
  assert_eq!(path[size - 1], end);
  for pair in path.windows(2) {
    assert_eq!(are_neighbor_cells(pair[0], pair[1]), Ok(true));
  }
}

#[test]
fn test_grid_path_res_mismatch() {
  assert_eq!(
    grid_path_cells_size(hex("85283473fffffff"), hex("8428347ffffffff")),
    Err(GridError::ResMismatch)
  );
}
