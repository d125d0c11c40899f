//! Geographic bounding boxes over cell boundaries and polygon loops.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::constants::{EPSILON_RAD, MAX_CELL_BNDRY_VERTS, MAX_RES, NUM_PENTAGONS, TWO_PI};
use crate::latlng::{constrain_lng, great_circle_distance_km, normalize_lng_for_comparison};
use crate::types::BBox;
use crate::{CellBoundary, GeoLoop, GeoPolygon, GridError, LatLng, NULL_INDEX};

/// Longitude normalization scheme for comparing boxes that may span the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LongitudeNormalization {
  None,
  East,
  West,
}

#[inline]
#[must_use]
pub(crate) fn bbox_is_transmeridian(bbox: &BBox) -> bool {
  bbox.east < bbox.west
}

#[inline]
#[must_use]
pub(crate) fn bbox_width_rads(bbox: &BBox) -> f64 {
  if bbox_is_transmeridian(bbox) {
    bbox.east - bbox.west + TWO_PI
  } else {
    bbox.east - bbox.west
  }
}

#[inline]
#[must_use]
pub(crate) fn bbox_height_rads(bbox: &BBox) -> f64 {
  bbox.north - bbox.south
}

/// Whether the bounding box contains a point.
#[inline]
#[must_use]
pub(crate) fn bbox_contains_point(bbox: &BBox, point: &LatLng) -> bool {
  if point.lat < bbox.south - EPSILON_RAD || point.lat > bbox.north + EPSILON_RAD {
    return false;
  }
  if bbox_is_transmeridian(bbox) {
    point.lng >= bbox.west - EPSILON_RAD || point.lng <= bbox.east + EPSILON_RAD
  } else {
    point.lng >= bbox.west - EPSILON_RAD && point.lng <= bbox.east + EPSILON_RAD
  }
}

/// Pick longitude normalization schemes so that two boxes can be compared
/// on a common scale.
pub(crate) fn bbox_normalization(a: &BBox, b: &BBox) -> (LongitudeNormalization, LongitudeNormalization) {
  let a_is_transmeridian = bbox_is_transmeridian(a);
  let b_is_transmeridian = bbox_is_transmeridian(b);
  let a_to_b_trends_east = a.west - b.east < b.west - a.east;

  let a_norm = if !a_is_transmeridian {
    LongitudeNormalization::None
  } else if b_is_transmeridian || a_to_b_trends_east {
    LongitudeNormalization::East
  } else {
    LongitudeNormalization::West
  };
  let b_norm = if !b_is_transmeridian {
    LongitudeNormalization::None
  } else if a_is_transmeridian || !a_to_b_trends_east {
    LongitudeNormalization::East
  } else {
    LongitudeNormalization::West
  };
  (a_norm, b_norm)
}

/// Whether box `a` wholly contains box `b`.
#[must_use]
pub(crate) fn bbox_contains_bbox(a: &BBox, b: &BBox) -> bool {
  if a.north < b.north || a.south > b.south {
    return false;
  }
  let (a_norm, b_norm) = bbox_normalization(a, b);
  normalize_lng_for_comparison(a.west, a_norm) <= normalize_lng_for_comparison(b.west, b_norm)
    && normalize_lng_for_comparison(a.east, a_norm) >= normalize_lng_for_comparison(b.east, b_norm)
}

/// Whether two boxes overlap.
#[must_use]
pub(crate) fn bbox_overlaps_bbox(a: &BBox, b: &BBox) -> bool {
  if a.north < b.south || a.south > b.north {
    return false;
  }
  let (a_norm, b_norm) = bbox_normalization(a, b);
  if normalize_lng_for_comparison(a.east, a_norm) < normalize_lng_for_comparison(b.west, b_norm)
    || normalize_lng_for_comparison(a.west, a_norm) > normalize_lng_for_comparison(b.east, b_norm)
  {
    return false;
  }
  true
}

#[inline]
#[must_use]
pub(crate) fn bbox_equals(a: &BBox, b: &BBox) -> bool {
  (a.north - b.north).abs() < EPSILON_RAD
    && (a.south - b.south).abs() < EPSILON_RAD
    && (a.east - b.east).abs() < EPSILON_RAD
    && (a.west - b.west).abs() < EPSILON_RAD
}

/// The four corners of a bounding box as a cell boundary, counter
/// clockwise from the southwest.
#[must_use]
pub(crate) fn bbox_to_cell_boundary(bbox: &BBox) -> CellBoundary {
  let mut verts = [LatLng::default(); MAX_CELL_BNDRY_VERTS];
  verts[0] = LatLng {
    lat: bbox.south,
    lng: bbox.west,
  };
  verts[1] = LatLng {
    lat: bbox.south,
    lng: bbox.east,
  };
  verts[2] = LatLng {
    lat: bbox.north,
    lng: bbox.east,
  };
  verts[3] = LatLng {
    lat: bbox.north,
    lng: bbox.west,
  };
  CellBoundary { num_verts: 4, verts }
}

/// Radius in kilometers of the most distorted cell at a resolution. The
/// pentagon has the smallest edges, so its center-to-vertex distance
/// bounds the distortion.
fn hex_radius_km(res: i32) -> Result<f64, GridError> {
  let mut pentagons = [NULL_INDEX; NUM_PENTAGONS as usize];
  crate::index::inspection::get_pentagons(res, &mut pentagons)?;
  let center = crate::indexing::cell_to_lat_lng(pentagons[0])?;
  let boundary = crate::indexing::cell_to_boundary(pentagons[0])?;
  Ok(great_circle_distance_km(&center, &boundary.verts[0]))
}

/// Estimate the number of cells at `res` needed to cover the bounding box.
pub(crate) fn bbox_hex_estimate(bbox: &BBox, res: i32) -> Result<i64, GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }

  let pentagon_radius_km = hex_radius_km(res)?;
  // Area of a regular hexagon is 3/2*sqrt(3) * r^2. Shrink by 20% to
  // allow for the bounding box landing on a pentagon.
  let pentagon_area_km2 = 0.8 * (2.59807621135 * pentagon_radius_km * pentagon_radius_km);

  let p1 = LatLng {
    lat: bbox.north,
    lng: bbox.east,
  };
  let height_km = great_circle_distance_km(
    &p1,
    &LatLng {
      lat: bbox.south,
      lng: bbox.east,
    },
  );
  let width_km = great_circle_distance_km(
    &p1,
    &LatLng {
      lat: bbox.north,
      lng: bbox.west,
    },
  );

  let estimate = (width_km * height_km / pentagon_area_km2).ceil();
  if !estimate.is_finite() {
    return Err(GridError::Failed);
  }
  Ok((estimate as i64).max(1))
}

/// Estimate the number of cells at `res` needed to trace the line between
/// two points.
pub(crate) fn line_hex_estimate(origin: &LatLng, destination: &LatLng, res: i32) -> Result<i64, GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }

  let pentagon_radius_km = hex_radius_km(res)?;
  let distance_km = great_circle_distance_km(origin, destination);
  let estimate = (distance_km / (2.0 * pentagon_radius_km)).ceil();
  if !estimate.is_finite() {
    return Err(GridError::Failed);
  }
  Ok((estimate as i64).max(1))
}

/// The bounding box of a loop of geographic points, handling loops whose
/// arcs cross the antimeridian.
pub(crate) fn bbox_from_geoloop(geoloop: &GeoLoop, bbox: &mut BBox) {
  bbox_from_verts(&geoloop.verts[..geoloop.num_verts], bbox);
}

/// The bounding box of a cell boundary treated as a closed loop.
pub(crate) fn bbox_from_cell_boundary(boundary: &CellBoundary, bbox: &mut BBox) {
  bbox_from_verts(&boundary.verts[..boundary.num_verts], bbox);
}

fn bbox_from_verts(verts: &[LatLng], bbox: &mut BBox) {
  if verts.is_empty() {
    *bbox = BBox::default();
    return;
  }

  bbox.south = f64::MAX;
  bbox.west = f64::MAX;
  bbox.north = -f64::MAX;
  bbox.east = -f64::MAX;
  let mut min_pos_lng = f64::MAX;
  let mut max_neg_lng = -f64::MAX;
  let mut is_transmeridian = false;

  for j in 0..verts.len() {
    let coord = verts[j];
    let next = verts[(j + 1) % verts.len()];

    bbox.south = bbox.south.min(coord.lat);
    bbox.west = bbox.west.min(coord.lng);
    bbox.north = bbox.north.max(coord.lat);
    bbox.east = bbox.east.max(coord.lng);

    if coord.lng > 0.0 && coord.lng < min_pos_lng {
      min_pos_lng = coord.lng;
    }
    if coord.lng < 0.0 && coord.lng > max_neg_lng {
      max_neg_lng = coord.lng;
    }

    // an arc spanning more than 180 degrees crosses the antimeridian
    if (coord.lng - next.lng).abs() > PI {
      is_transmeridian = true;
    }
  }

  if is_transmeridian {
    bbox.east = max_neg_lng;
    bbox.west = min_pos_lng;
  }
}

/// Widen a bounding box by a scale factor, clamping at the poles.
pub(crate) fn scale_bbox(bbox: &mut BBox, scale: f64) {
  let width = bbox_width_rads(bbox);
  let height = bbox_height_rads(bbox);
  let width_buffer = (width * scale - width) * 0.5;
  let height_buffer = (height * scale - height) * 0.5;

  bbox.north = (bbox.north + height_buffer).min(FRAC_PI_2);
  bbox.south = (bbox.south - height_buffer).max(-FRAC_PI_2);
  bbox.east = constrain_lng(bbox.east + width_buffer);
  bbox.west = constrain_lng(bbox.west - width_buffer);
}

/// Bounding boxes for a polygon's outer loop and each of its holes.
/// `bboxes_out` must hold `1 + polygon.num_holes` entries.
pub(crate) fn bboxes_from_geo_polygon(polygon: &GeoPolygon, bboxes_out: &mut [BBox]) {
  if bboxes_out.is_empty() {
    return;
  }
  bbox_from_geoloop(&polygon.geoloop, &mut bboxes_out[0]);
  for (i, hole) in polygon.holes.iter().enumerate().take(polygon.num_holes) {
    if i + 1 >= bboxes_out.len() {
      break;
    }
    bbox_from_geoloop(hole, &mut bboxes_out[i + 1]);
  }
}
