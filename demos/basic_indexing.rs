use hexcell::{
  cell_to_boundary, cell_to_lat_lng, cell_to_parent, cell_to_string, degs_to_rads,
  get_base_cell_number, get_resolution, is_pentagon, is_valid_cell, lat_lng_to_cell, rads_to_degs,
  GridError, LatLng,
};

fn main() -> Result<(), GridError> {
  // A point over southern Brittany.
  let lat_deg = 47.7;
  let lng_deg = -3.0;
  let point = LatLng {
    lat: degs_to_rads(lat_deg),
    lng: degs_to_rads(lng_deg),
  };
  println!("Point: lat {lat_deg:.4} deg, lng {lng_deg:.4} deg");

  let res = 10;
  let cell = lat_lng_to_cell(&point, res)?;
  println!("Cell at res {res}: {} ({})", cell_to_string(cell), cell.0);

  assert!(is_valid_cell(cell));
  println!("Resolution: {}", get_resolution(cell));
  println!("Base cell: {}", get_base_cell_number(cell));
  println!("Pentagon: {}", is_pentagon(cell));

  let center = cell_to_lat_lng(cell)?;
  println!(
    "Center: lat {:.6} deg, lng {:.6} deg",
    rads_to_degs(center.lat),
    rads_to_degs(center.lng)
  );

  let boundary = cell_to_boundary(cell)?;
  println!("Boundary ({} vertexes):", boundary.num_verts);
  for (i, vert) in boundary.verts[..boundary.num_verts].iter().enumerate() {
    println!(
      "  {}: lat {:.6} deg, lng {:.6} deg",
      i,
      rads_to_degs(vert.lat),
      rads_to_degs(vert.lng)
    );
  }

  let parent = cell_to_parent(cell, 5)?;
  println!("Parent at res 5: {}", cell_to_string(parent));

  Ok(())
}
