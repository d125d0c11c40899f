use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hexcell::*;

fn square_geoloop(center_lat_deg: f64, center_lng_deg: f64, size_deg: f64) -> GeoLoop {
  let half = size_deg / 2.0;
  let corners = [
    (center_lat_deg - half, center_lng_deg - half),
    (center_lat_deg - half, center_lng_deg + half),
    (center_lat_deg + half, center_lng_deg + half),
    (center_lat_deg + half, center_lng_deg - half),
  ];
  let verts: Vec<LatLng> = corners
    .iter()
    .map(|&(lat, lng)| LatLng {
      lat: degs_to_rads(lat),
      lng: degs_to_rads(lng),
    })
    .collect();
  GeoLoop { num_verts: verts.len(), verts }
}

fn square_polygon() -> GeoPolygon {
  GeoPolygon {
    geoloop: square_geoloop(47.2, -3.5, 0.5),
    num_holes: 0,
    holes: Vec::new(),
  }
}

fn donut_polygon() -> GeoPolygon {
  GeoPolygon {
    geoloop: square_geoloop(47.2, -3.5, 0.5),
    num_holes: 1,
    holes: vec![square_geoloop(47.2, -3.5, 0.25)],
  }
}

fn fill(polygon: &GeoPolygon, res: i32) -> Vec<CellIndex> {
  let flags = ContainmentMode::Center as u32;
  let size = max_polygon_to_cells_size(polygon, res, flags).unwrap() as usize;
  let mut cells = vec![NULL_INDEX; size];
  polygon_to_cells(polygon, res, flags, &mut cells).unwrap();
  cells.retain(|&c| c != NULL_INDEX);
  cells
}

fn bench_polygon_to_cells(c: &mut Criterion) {
  let square = square_polygon();
  let donut = donut_polygon();
  let flags = ContainmentMode::Center as u32;

  let mut group = c.benchmark_group("polygon_to_cells");
  for res in [6, 7, 8] {
    group.bench_with_input(format!("square_res_{res}"), &square, |b, polygon| {
      let size = max_polygon_to_cells_size(polygon, res, flags).unwrap() as usize;
      let mut out = vec![NULL_INDEX; size];
      b.iter(|| polygon_to_cells(black_box(polygon), black_box(res), black_box(flags), &mut out));
    });
    group.bench_with_input(format!("donut_res_{res}"), &donut, |b, polygon| {
      let size = max_polygon_to_cells_size(polygon, res, flags).unwrap() as usize;
      let mut out = vec![NULL_INDEX; size];
      b.iter(|| polygon_to_cells(black_box(polygon), black_box(res), black_box(flags), &mut out));
    });
  }
  group.finish();
}

fn bench_compact_cells(c: &mut Criterion) {
  let cells = fill(&square_polygon(), 8);
  let mut out = vec![NULL_INDEX; cells.len()];

  c.bench_function("compact_cells_square_res_8", |b| {
    b.iter_batched(
      || cells.clone(),
      |mut data| compact_cells(black_box(&mut data), black_box(&mut out)),
      BatchSize::SmallInput,
    )
  });
}

fn bench_cells_to_multi_polygon(c: &mut Criterion) {
  let square_cells = fill(&square_polygon(), 7);
  let donut_cells = fill(&donut_polygon(), 7);

  c.bench_function("cells_to_multi_polygon_square", |b| {
    b.iter(|| cells_to_multi_polygon(black_box(&square_cells)))
  });
  c.bench_function("cells_to_multi_polygon_donut", |b| {
    b.iter(|| cells_to_multi_polygon(black_box(&donut_cells)))
  });
}

criterion_group!(
  region_benches,
  bench_polygon_to_cells,
  bench_compact_cells,
  bench_cells_to_multi_polygon
);
criterion_main!(region_benches);
