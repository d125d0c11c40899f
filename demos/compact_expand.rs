use hexcell::{
  cell_to_children, cell_to_children_size, cell_to_string, compact_cells, degs_to_rads,
  lat_lng_to_cell, uncompact_cells, uncompact_cells_size, GridError, LatLng, NULL_INDEX,
};

fn main() -> Result<(), GridError> {
  let point = LatLng {
    lat: degs_to_rads(47.7),
    lng: degs_to_rads(-3.0),
  };
  let parent = lat_lng_to_cell(&point, 6)?;
  println!("Parent: {}", cell_to_string(parent));

  // Expand to all res 8 descendants.
  let size = cell_to_children_size(parent, 8)? as usize;
  let mut cells = vec![NULL_INDEX; size];
  cell_to_children(parent, 8, &mut cells)?;
  println!("Expanded to {size} cells at res 8");

  // A complete child set compacts back to the single parent.
  let mut compacted = vec![NULL_INDEX; size];
  let written = compact_cells(&mut cells, &mut compacted)?;
  println!("Compacted back to {written} cell(s):");
  for cell in &compacted[..written] {
    println!("  {}", cell_to_string(*cell));
  }

  // Remove one cell and compaction can no longer fully merge.
  cell_to_children(parent, 8, &mut cells)?;
  cells.pop();
  let mut partial = vec![NULL_INDEX; cells.len()];
  let written = compact_cells(&mut cells, &mut partial)?;
  println!("Without one cell, compaction keeps {written} cells");

  // Uncompacting restores the uniform resolution set.
  let size = uncompact_cells_size(&partial[..written], 8)? as usize;
  let mut expanded = vec![NULL_INDEX; size];
  uncompact_cells(&partial[..written], 8, &mut expanded)?;
  println!("Uncompacted back to {size} cells at res 8");

  Ok(())
}
