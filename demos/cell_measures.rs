use hexcell::{
  cell_area_km2, cell_to_string, degs_to_rads, edge_length_km, get_hexagon_area_avg_km2,
  get_hexagon_edge_length_avg_km, lat_lng_to_cell, origin_to_directed_edges, GridError, LatLng,
  MAX_CELL_EDGES, NULL_INDEX,
};

fn main() -> Result<(), GridError> {
  let point = LatLng {
    lat: degs_to_rads(47.7),
    lng: degs_to_rads(-3.0),
  };

  for res in (0..=8).step_by(2) {
    let cell = lat_lng_to_cell(&point, res)?;
    println!("res {res}: cell {}", cell_to_string(cell));

    let avg_area = get_hexagon_area_avg_km2(res)?;
    let area = cell_area_km2(cell)?;
    println!("  area {area:.4} km2 (res average {avg_area:.4} km2)");

    let avg_edge = get_hexagon_edge_length_avg_km(res)?;
    let mut edges = [NULL_INDEX; MAX_CELL_EDGES];
    origin_to_directed_edges(cell, &mut edges)?;
    let first_edge = edges.iter().copied().find(|&e| e != NULL_INDEX).unwrap();
    let edge_km = edge_length_km(first_edge)?;
    println!("  first edge {edge_km:.4} km (res average {avg_edge:.4} km)");
  }
  Ok(())
}
