use hexcell::{
  cell_to_string, cells_to_multi_polygon, degs_to_rads, max_polygon_to_cells_size,
  polygon_to_cells, rads_to_degs, ContainmentMode, GeoLoop, GeoPolygon, GridError, LatLng,
  NULL_INDEX,
};

fn main() -> Result<(), GridError> {
  // A rectangle over the Gulf of Morbihan.
  let corners = [(47.7, -3.0), (46.7, -3.0), (46.7, -4.0), (47.7, -4.0)];
  let verts: Vec<LatLng> = corners
    .iter()
    .map(|&(lat, lng)| LatLng {
      lat: degs_to_rads(lat),
      lng: degs_to_rads(lng),
    })
    .collect();
  let polygon = GeoPolygon {
    geoloop: GeoLoop { num_verts: verts.len(), verts },
    num_holes: 0,
    holes: Vec::new(),
  };

  let res = 7;
  let flags = ContainmentMode::Center as u32;
  let size = max_polygon_to_cells_size(&polygon, res, flags)? as usize;
  let mut cells = vec![NULL_INDEX; size];
  polygon_to_cells(&polygon, res, flags, &mut cells)?;
  cells.retain(|&c| c != NULL_INDEX);
  println!("Filled rectangle with {} cells at res {res}", cells.len());
  for cell in cells.iter().take(5) {
    println!("  {}", cell_to_string(*cell));
  }
  println!("  ...");

  // Trace the outline of the filled set back into polygons.
  let outlines = cells_to_multi_polygon(&cells)?;
  println!("Outline: {} polygon(s)", outlines.len());
  for (i, outline) in outlines.iter().enumerate() {
    println!(
      "  polygon {i}: {} outer vertexes, {} hole(s)",
      outline.geoloop.num_verts, outline.num_holes
    );
    let first = outline.geoloop.verts[0];
    println!(
      "  first vertex: lat {:.4} deg, lng {:.4} deg",
      rads_to_degs(first.lat),
      rads_to_degs(first.lng)
    );
  }

  Ok(())
}
