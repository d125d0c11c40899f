//! Point-in-polygon and loop geometry predicates.
//!
//! The ray casting here operates on spherical coordinates treated as planar,
//! which matches the grid's polygon-fill semantics: loops are interpreted as
//! sequences of latitude/longitude vertices joined by lines of constant
//! bearing in lat/lng space, not great-circle arcs.

use std::f64::consts::PI;

use crate::bbox::{
  bbox_contains_point, bbox_is_transmeridian, bbox_normalization, bbox_overlaps_bbox,
  LongitudeNormalization,
};
use crate::latlng::normalize_lng_for_comparison;
use crate::math::vec3d::{geo_to_vec3d, vec3d_cross, vec3d_dot};
use crate::types::{BBox, CellBoundary, ContainmentMode, GeoLoop, GeoPolygon, GridError, LatLng,
                   Vec3d};

/// Bit mask of the polygon-fill flag bits that select a containment mode.
pub const FLAG_CONTAINMENT_MODE_MASK: u32 = 0b1111;

/// Extract the containment mode from a set of polygon-fill flags.
pub fn flag_get_containment_mode(flags: u32) -> Result<ContainmentMode, GridError> {
  ContainmentMode::try_from(flags & FLAG_CONTAINMENT_MODE_MASK)
}

/// Check that polygon-fill flags are valid: no unknown bits set and a legal
/// containment mode selected.
pub fn validate_polygon_flags(flags: u32) -> Result<(), GridError> {
  if flags & !FLAG_CONTAINMENT_MODE_MASK != 0 {
    return Err(GridError::OptionInvalid);
  }
  flag_get_containment_mode(flags)?;
  Ok(())
}

fn normalize_lng(lng: f64, is_transmeridian: bool) -> f64 {
  normalize_lng_for_comparison(
    lng,
    if is_transmeridian { LongitudeNormalization::East } else { LongitudeNormalization::None },
  )
}

/// Ray casting over the vertices of a loop. Rays are cast westward from the
/// test point; vertex and edge ties are broken by nudging the point, so that
/// points exactly on an edge resolve deterministically.
fn point_inside_verts(verts: &[LatLng], bbox: &BBox, coord: &LatLng) -> bool {
  // Fail fast if the point is outside the bounding box of the loop.
  if !bbox_contains_point(bbox, coord) {
    return false;
  }
  let is_transmeridian = bbox_is_transmeridian(bbox);
  let mut contains = false;

  let mut lat = coord.lat;
  let mut lng = normalize_lng(coord.lng, is_transmeridian);

  let num_verts = verts.len();
  for i in 0..num_verts {
    let mut a = verts[i];
    let mut b = verts[(i + 1) % num_verts];

    // Ray casting needs the segment oriented south to north.
    if a.lat > b.lat {
      std::mem::swap(&mut a, &mut b);
    }

    // If the latitude matches a vertex exactly the ray would pass through
    // it; nudge the point north to avoid double counting.
    if lat == a.lat || lat == b.lat {
      lat += f64::EPSILON;
    }

    // Entirely above or below the segment's latitude span.
    if lat < a.lat || lat > b.lat {
      continue;
    }

    let a_lng = normalize_lng(a.lng, is_transmeridian);
    let b_lng = normalize_lng(b.lng, is_transmeridian);

    // If a longitude matches exactly, bias the point westward.
    if a_lng == lng || b_lng == lng {
      lng -= f64::EPSILON;
    }

    // Longitude of the point on the segment at the test latitude.
    let ratio = (lat - a.lat) / (b.lat - a.lat);
    let test_lng = normalize_lng(a_lng + (b_lng - a_lng) * ratio, is_transmeridian);

    if test_lng < lng {
      contains = !contains;
    }
  }

  contains
}

/// Whether a point is inside a loop, using `bbox` as a pre-computed bounding
/// box for the loop.
#[must_use]
pub fn point_inside_geoloop(geoloop: &GeoLoop, bbox: &BBox, coord: &LatLng) -> bool {
  point_inside_verts(&geoloop.verts[..geoloop.num_verts], bbox, coord)
}

/// Whether a point is inside a cell boundary treated as a closed loop.
#[must_use]
pub fn point_inside_cell_boundary(boundary: &CellBoundary, bbox: &BBox, coord: &LatLng) -> bool {
  point_inside_verts(&boundary.verts[..boundary.num_verts], bbox, coord)
}

/// Whether a point is inside the polygon: inside the outer loop and outside
/// every hole. `bboxes` holds the outer loop's bounding box followed by one
/// per hole.
#[must_use]
pub fn point_inside_polygon(polygon: &GeoPolygon, bboxes: &[BBox], coord: &LatLng) -> bool {
  if !point_inside_geoloop(&polygon.geoloop, &bboxes[0], coord) {
    return false;
  }
  for (i, hole) in polygon.holes[..polygon.num_holes].iter().enumerate() {
    if point_inside_geoloop(hole, &bboxes[i + 1], coord) {
      return false;
    }
  }
  true
}

fn is_clockwise_normalized(verts: &[LatLng], is_transmeridian: bool) -> bool {
  let mut sum = 0.;
  let num_verts = verts.len();
  for i in 0..num_verts {
    let a = verts[i];
    let b = verts[(i + 1) % num_verts];
    // A transmeridian arc was identified mid-loop; start over with
    // normalization enabled.
    if !is_transmeridian && (a.lng - b.lng).abs() > PI {
      return is_clockwise_normalized(verts, true);
    }
    sum += (normalize_lng(b.lng, is_transmeridian) - normalize_lng(a.lng, is_transmeridian))
      * (b.lat + a.lat);
  }
  sum > 0.
}

/// Whether the loop winds clockwise, with longitude as the x axis and
/// latitude as the y axis. Handles loops that cross the antimeridian.
#[must_use]
pub fn is_clockwise_geoloop(geoloop: &GeoLoop) -> bool {
  is_clockwise_normalized(&geoloop.verts[..geoloop.num_verts], false)
}

/// Whether two line segments `a1`-`a2` and `b1`-`b2` intersect.
#[must_use]
pub fn line_crosses_line(a1: &LatLng, a2: &LatLng, b1: &LatLng, b2: &LatLng) -> bool {
  let denom = (b2.lat - b1.lat) * (a2.lng - a1.lng) - (b2.lng - b1.lng) * (a2.lat - a1.lat);
  if denom == 0. {
    // Parallel or coincident.
    return false;
  }
  let ua =
    ((b2.lng - b1.lng) * (a1.lat - b1.lat) - (b2.lat - b1.lat) * (a1.lng - b1.lng)) / denom;
  let ub =
    ((a2.lng - a1.lng) * (a1.lat - b1.lat) - (a2.lat - a1.lat) * (a1.lng - b1.lng)) / denom;
  (0. ..=1.).contains(&ua) && (0. ..=1.).contains(&ub)
}

fn verts_cross_verts(
  a_verts: &[LatLng],
  a_bbox: &BBox,
  b_verts: &[LatLng],
  b_bbox: &BBox,
) -> bool {
  if !bbox_overlaps_bbox(a_bbox, b_bbox) {
    return false;
  }
  let (a_norm, b_norm) = bbox_normalization(a_bbox, b_bbox);

  let a_len = a_verts.len();
  let b_len = b_verts.len();
  for i in 0..a_len {
    let mut a1 = a_verts[i];
    let mut a2 = a_verts[(i + 1) % a_len];
    a1.lng = normalize_lng_for_comparison(a1.lng, a_norm);
    a2.lng = normalize_lng_for_comparison(a2.lng, a_norm);
    for j in 0..b_len {
      let mut b1 = b_verts[j];
      let mut b2 = b_verts[(j + 1) % b_len];
      b1.lng = normalize_lng_for_comparison(b1.lng, b_norm);
      b2.lng = normalize_lng_for_comparison(b2.lng, b_norm);
      if line_crosses_line(&a1, &a2, &b1, &b2) {
        return true;
      }
    }
  }
  false
}

/// Whether any edge of the cell boundary crosses any edge of the loop.
#[must_use]
pub fn cell_boundary_crosses_geoloop(
  geoloop: &GeoLoop,
  loop_bbox: &BBox,
  boundary: &CellBoundary,
  boundary_bbox: &BBox,
) -> bool {
  verts_cross_verts(
    &geoloop.verts[..geoloop.num_verts],
    loop_bbox,
    &boundary.verts[..boundary.num_verts],
    boundary_bbox,
  )
}

/// Whether any edge of the cell boundary crosses any edge of the polygon,
/// holes included.
#[must_use]
pub fn cell_boundary_crosses_polygon(
  polygon: &GeoPolygon,
  bboxes: &[BBox],
  boundary: &CellBoundary,
  boundary_bbox: &BBox,
) -> bool {
  if cell_boundary_crosses_geoloop(&polygon.geoloop, &bboxes[0], boundary, boundary_bbox) {
    return true;
  }
  for (i, hole) in polygon.holes[..polygon.num_holes].iter().enumerate() {
    if cell_boundary_crosses_geoloop(hole, &bboxes[i + 1], boundary, boundary_bbox) {
      return true;
    }
  }
  false
}

/// Whether the cell boundary is fully contained in the polygon: every vertex
/// inside the outer loop and outside the holes, no edge crossings, and no
/// hole sitting entirely inside the cell.
#[must_use]
pub fn cell_boundary_inside_polygon(
  polygon: &GeoPolygon,
  bboxes: &[BBox],
  boundary: &CellBoundary,
  boundary_bbox: &BBox,
) -> bool {
  for vert in &boundary.verts[..boundary.num_verts] {
    if !point_inside_polygon(polygon, bboxes, vert) {
      return false;
    }
  }

  if cell_boundary_crosses_polygon(polygon, bboxes, boundary, boundary_bbox) {
    return false;
  }

  // A hole could still lie entirely inside the cell; one vertex of each
  // hole against the boundary treated as a loop is enough, since crossings
  // were ruled out above.
  for hole in polygon.holes[..polygon.num_holes].iter() {
    if hole.num_verts > 0
      && point_inside_verts(&boundary.verts[..boundary.num_verts], boundary_bbox, &hole.verts[0])
    {
      return false;
    }
  }

  true
}

/// Spherical excess area of a loop of vertices, in radians squared. Computed
/// as a fan of spherical triangles anchored at the first vertex, each signed
/// by the tangent half-angle form so concavities cancel.
#[must_use]
pub fn verts_area_rads2(verts: &[LatLng]) -> f64 {
  if verts.len() < 3 {
    return 0.;
  }

  let mut anchor = Vec3d::default();
  geo_to_vec3d(&verts[0], &mut anchor);

  let mut sum = 0.;
  for i in 1..verts.len() - 1 {
    let mut p1 = Vec3d::default();
    let mut p2 = Vec3d::default();
    geo_to_vec3d(&verts[i], &mut p1);
    geo_to_vec3d(&verts[i + 1], &mut p2);

    let mut cross = Vec3d::default();
    vec3d_cross(&p1, &p2, &mut cross);
    let triple = vec3d_dot(&anchor, &cross);
    let denom =
      1. + vec3d_dot(&anchor, &p1) + vec3d_dot(&anchor, &p2) + vec3d_dot(&p1, &p2);
    sum += triple.atan2(denom);
  }

  (sum * 2.).abs()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bbox::bbox_from_geoloop;
  use crate::latlng::degs_to_rads;
  use std::f64::consts::FRAC_PI_2;

  const SF_VERTS_RAW: [(f64, f64); 6] = [
    (0.659966917655, -2.1364398519396),
    (0.6595011102219, -2.1359434279405),
    (0.6583348114025, -2.1354884206045),
    (0.6581220034068, -2.1382437718946),
    (0.6594479998527, -2.1384597563896),
    (0.6599990002976, -2.1376771158464),
  ];

  fn sf_geoloop() -> GeoLoop {
    let verts: Vec<LatLng> =
      SF_VERTS_RAW.iter().map(|&(lat, lng)| LatLng { lat, lng }).collect();
    GeoLoop { num_verts: verts.len(), verts }
  }

  #[test]
  fn test_point_inside_geoloop() {
    let geoloop = sf_geoloop();
    let mut bbox = BBox::default();
    bbox_from_geoloop(&geoloop, &mut bbox);

    let inside = LatLng { lat: 0.659, lng: -2.136 };
    let outside = LatLng { lat: 1., lng: 2. };

    assert!(point_inside_geoloop(&geoloop, &bbox, &inside));
    assert!(!point_inside_geoloop(&geoloop, &bbox, &outside));
  }

  #[test]
  fn test_point_inside_geoloop_transmeridian() {
    let verts = vec![
      LatLng { lat: degs_to_rads(1.), lng: degs_to_rads(179.) },
      LatLng { lat: degs_to_rads(1.), lng: degs_to_rads(-179.) },
      LatLng { lat: degs_to_rads(-1.), lng: degs_to_rads(-179.) },
      LatLng { lat: degs_to_rads(-1.), lng: degs_to_rads(179.) },
    ];
    let geoloop = GeoLoop { num_verts: verts.len(), verts };
    let mut bbox = BBox::default();
    bbox_from_geoloop(&geoloop, &mut bbox);

    let inside_east = LatLng { lat: 0., lng: degs_to_rads(179.5) };
    let inside_west = LatLng { lat: 0., lng: degs_to_rads(-179.5) };
    let outside = LatLng { lat: 0., lng: 0. };

    assert!(point_inside_geoloop(&geoloop, &bbox, &inside_east));
    assert!(point_inside_geoloop(&geoloop, &bbox, &inside_west));
    assert!(!point_inside_geoloop(&geoloop, &bbox, &outside));
  }

  #[test]
  fn test_point_inside_polygon_with_hole() {
    let outer = vec![
      LatLng { lat: 0., lng: 0. },
      LatLng { lat: 0., lng: 0.4 },
      LatLng { lat: 0.4, lng: 0.4 },
      LatLng { lat: 0.4, lng: 0. },
    ];
    let hole = vec![
      LatLng { lat: 0.1, lng: 0.1 },
      LatLng { lat: 0.1, lng: 0.3 },
      LatLng { lat: 0.3, lng: 0.3 },
      LatLng { lat: 0.3, lng: 0.1 },
    ];
    let polygon = GeoPolygon {
      geoloop: GeoLoop { num_verts: outer.len(), verts: outer },
      num_holes: 1,
      holes: vec![GeoLoop { num_verts: hole.len(), verts: hole }],
    };

    let mut bboxes = vec![BBox::default(); 2];
    bbox_from_geoloop(&polygon.geoloop, &mut bboxes[0]);
    bbox_from_geoloop(&polygon.holes[0], &mut bboxes[1]);

    let in_ring = LatLng { lat: 0.05, lng: 0.05 };
    let in_hole = LatLng { lat: 0.2, lng: 0.2 };
    let outside = LatLng { lat: 0.5, lng: 0.5 };

    assert!(point_inside_polygon(&polygon, &bboxes, &in_ring));
    assert!(!point_inside_polygon(&polygon, &bboxes, &in_hole));
    assert!(!point_inside_polygon(&polygon, &bboxes, &outside));
  }

  #[test]
  fn test_is_clockwise_geoloop() {
    // With lng as x and lat as y, this loop winds counterclockwise.
    let ccw = vec![
      LatLng { lat: 0., lng: 0. },
      LatLng { lat: 0., lng: 0.4 },
      LatLng { lat: 0.4, lng: 0.4 },
      LatLng { lat: 0.4, lng: 0. },
    ];
    let geoloop = GeoLoop { num_verts: ccw.len(), verts: ccw };
    assert!(!is_clockwise_geoloop(&geoloop));

    let cw = vec![
      LatLng { lat: 0., lng: 0. },
      LatLng { lat: 0.4, lng: 0. },
      LatLng { lat: 0.4, lng: 0.4 },
      LatLng { lat: 0., lng: 0.4 },
    ];
    let geoloop = GeoLoop { num_verts: cw.len(), verts: cw };
    assert!(is_clockwise_geoloop(&geoloop));
  }

  #[test]
  fn test_is_clockwise_geoloop_transmeridian() {
    let cw = vec![
      LatLng { lat: degs_to_rads(0.4), lng: degs_to_rads(174.) },
      LatLng { lat: degs_to_rads(0.4), lng: degs_to_rads(-174.) },
      LatLng { lat: degs_to_rads(-0.4), lng: degs_to_rads(-174.) },
      LatLng { lat: degs_to_rads(-0.4), lng: degs_to_rads(174.) },
    ];
    let geoloop = GeoLoop { num_verts: cw.len(), verts: cw };
    assert!(is_clockwise_geoloop(&geoloop));

    let ccw = vec![
      LatLng { lat: degs_to_rads(0.4), lng: degs_to_rads(-174.) },
      LatLng { lat: degs_to_rads(0.4), lng: degs_to_rads(174.) },
      LatLng { lat: degs_to_rads(-0.4), lng: degs_to_rads(174.) },
      LatLng { lat: degs_to_rads(-0.4), lng: degs_to_rads(-174.) },
    ];
    let geoloop = GeoLoop { num_verts: ccw.len(), verts: ccw };
    assert!(!is_clockwise_geoloop(&geoloop));
  }

  #[test]
  fn test_line_crosses_line() {
    let a1 = LatLng { lat: 0., lng: 0. };
    let a2 = LatLng { lat: 1., lng: 1. };
    let b1 = LatLng { lat: 0., lng: 1. };
    let b2 = LatLng { lat: 1., lng: 0. };
    assert!(line_crosses_line(&a1, &a2, &b1, &b2));

    let c1 = LatLng { lat: 2., lng: 2. };
    let c2 = LatLng { lat: 3., lng: 3. };
    assert!(!line_crosses_line(&a1, &a2, &c1, &c2));

    // Parallel segments never cross.
    let d1 = LatLng { lat: 0., lng: 0.5 };
    let d2 = LatLng { lat: 1., lng: 1.5 };
    assert!(!line_crosses_line(&a1, &a2, &d1, &d2));
  }

  #[test]
  fn test_cell_boundary_crosses_geoloop() {
    let geoloop = sf_geoloop();
    let mut loop_bbox = BBox::default();
    bbox_from_geoloop(&geoloop, &mut loop_bbox);

    // A boundary straddling one edge of the loop.
    let mut crossing = CellBoundary::default();
    crossing.num_verts = 3;
    crossing.verts[0] = LatLng { lat: 0.6595, lng: -2.1365 };
    crossing.verts[1] = LatLng { lat: 0.6595, lng: -2.1395 };
    crossing.verts[2] = LatLng { lat: 0.6605, lng: -2.1380 };
    let crossing_loop = GeoLoop {
      num_verts: crossing.num_verts,
      verts: crossing.verts[..crossing.num_verts].to_vec(),
    };
    let mut crossing_bbox = BBox::default();
    bbox_from_geoloop(&crossing_loop, &mut crossing_bbox);
    assert!(cell_boundary_crosses_geoloop(&geoloop, &loop_bbox, &crossing, &crossing_bbox));

    // A boundary fully inside the loop.
    let mut inside = CellBoundary::default();
    inside.num_verts = 3;
    inside.verts[0] = LatLng { lat: 0.6590, lng: -2.1365 };
    inside.verts[1] = LatLng { lat: 0.6590, lng: -2.1360 };
    inside.verts[2] = LatLng { lat: 0.6593, lng: -2.1362 };
    let inside_loop = GeoLoop {
      num_verts: inside.num_verts,
      verts: inside.verts[..inside.num_verts].to_vec(),
    };
    let mut inside_bbox = BBox::default();
    bbox_from_geoloop(&inside_loop, &mut inside_bbox);
    assert!(!cell_boundary_crosses_geoloop(&geoloop, &loop_bbox, &inside, &inside_bbox));
  }

  #[test]
  fn test_cell_boundary_inside_polygon() {
    let outer = vec![
      LatLng { lat: 0., lng: 0. },
      LatLng { lat: 0., lng: 0.4 },
      LatLng { lat: 0.4, lng: 0.4 },
      LatLng { lat: 0.4, lng: 0. },
    ];
    let polygon = GeoPolygon {
      geoloop: GeoLoop { num_verts: outer.len(), verts: outer },
      num_holes: 0,
      holes: Vec::new(),
    };
    let mut bboxes = vec![BBox::default()];
    bbox_from_geoloop(&polygon.geoloop, &mut bboxes[0]);

    let mut boundary = CellBoundary::default();
    boundary.num_verts = 4;
    boundary.verts[0] = LatLng { lat: 0.1, lng: 0.1 };
    boundary.verts[1] = LatLng { lat: 0.1, lng: 0.2 };
    boundary.verts[2] = LatLng { lat: 0.2, lng: 0.2 };
    boundary.verts[3] = LatLng { lat: 0.2, lng: 0.1 };
    let boundary_loop = GeoLoop {
      num_verts: boundary.num_verts,
      verts: boundary.verts[..boundary.num_verts].to_vec(),
    };
    let mut boundary_bbox = BBox::default();
    bbox_from_geoloop(&boundary_loop, &mut boundary_bbox);

    assert!(cell_boundary_inside_polygon(&polygon, &bboxes, &boundary, &boundary_bbox));

    // Shift the boundary west so it straddles the outer loop.
    for vert in boundary.verts[..boundary.num_verts].iter_mut() {
      vert.lng -= 0.15;
    }
    let shifted_loop = GeoLoop {
      num_verts: boundary.num_verts,
      verts: boundary.verts[..boundary.num_verts].to_vec(),
    };
    bbox_from_geoloop(&shifted_loop, &mut boundary_bbox);
    assert!(!cell_boundary_inside_polygon(&polygon, &bboxes, &boundary, &boundary_bbox));
  }

  #[test]
  fn test_verts_area_octant() {
    // One octant of the sphere has area 4*pi/8 = pi/2.
    let verts = [
      LatLng { lat: 0., lng: 0. },
      LatLng { lat: 0., lng: FRAC_PI_2 },
      LatLng { lat: FRAC_PI_2, lng: 0. },
    ];
    assert!((verts_area_rads2(&verts) - FRAC_PI_2).abs() < 1e-12);
  }

  #[test]
  fn test_validate_polygon_flags() {
    assert_eq!(validate_polygon_flags(0), Ok(()));
    assert_eq!(validate_polygon_flags(3), Ok(()));
    assert_eq!(validate_polygon_flags(4), Err(GridError::OptionInvalid));
    assert_eq!(validate_polygon_flags(1 << 4), Err(GridError::OptionInvalid));
  }

  #[test]
  fn test_flag_get_containment_mode() {
    assert_eq!(flag_get_containment_mode(0), Ok(ContainmentMode::Center));
    assert_eq!(flag_get_containment_mode(1), Ok(ContainmentMode::Full));
    assert_eq!(flag_get_containment_mode(2), Ok(ContainmentMode::Overlapping));
    assert_eq!(flag_get_containment_mode(3), Ok(ContainmentMode::OverlappingBbox));
    assert!(flag_get_containment_mode(4).is_err());
  }
}
