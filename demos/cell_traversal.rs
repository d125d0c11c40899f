use hexcell::{
  are_neighbor_cells, cell_to_string, degs_to_rads, grid_disk, grid_distance, grid_path_cells,
  grid_path_cells_size, lat_lng_to_cell, max_grid_disk_size, GridError, LatLng, NULL_INDEX,
};

fn main() -> Result<(), GridError> {
  let res = 7;
  let lorient = LatLng {
    lat: degs_to_rads(47.75),
    lng: degs_to_rads(-3.37),
  };
  let vannes = LatLng {
    lat: degs_to_rads(47.66),
    lng: degs_to_rads(-2.76),
  };

  let start = lat_lng_to_cell(&lorient, res)?;
  let end = lat_lng_to_cell(&vannes, res)?;
  println!("Start: {}", cell_to_string(start));
  println!("End:   {}", cell_to_string(end));

  println!("Neighbors: {}", are_neighbor_cells(start, end)?);
  println!("Grid distance: {}", grid_distance(start, end)?);

  let path_len = grid_path_cells_size(start, end)? as usize;
  let mut path = vec![NULL_INDEX; path_len];
  grid_path_cells(start, end, &mut path)?;
  println!("Path ({path_len} cells):");
  for cell in &path {
    println!("  {}", cell_to_string(*cell));
  }

  let k = 2;
  let size = max_grid_disk_size(k)? as usize;
  let mut disk = vec![NULL_INDEX; size];
  grid_disk(start, k, &mut disk)?;
  let filled = disk.iter().filter(|&&c| c != NULL_INDEX).count();
  println!("Disk of k={k} around start: {filled} cells");

  Ok(())
}
