//! Spherical coordinate functions: azimuths, great circle distances and
//! the per-resolution average cell metrics.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::bbox::LongitudeNormalization;
use crate::constants::{EARTH_RADIUS_KM, EPSILON_RAD, MAX_RES, TWO_PI};
use crate::types::LatLng;
use crate::GridError;

/// Normalizes radians to the range `[0, 2*PI)`.
#[inline]
#[must_use]
pub(crate) fn pos_angle_rads(rads: f64) -> f64 {
  let mut tmp = if rads < 0.0 { rads + TWO_PI } else { rads };
  while tmp >= TWO_PI {
    tmp -= TWO_PI;
  }
  if tmp == -0.0 {
    tmp = 0.0;
  }
  tmp
}

/// Whether two spherical coordinates are within the given threshold of
/// each other, componentwise.
#[inline]
#[must_use]
pub(crate) fn geo_almost_equal_threshold(p1: &LatLng, p2: &LatLng, threshold: f64) -> bool {
  (p1.lat - p2.lat).abs() < threshold && (p1.lng - p2.lng).abs() < threshold
}

/// Whether two spherical coordinates are within the standard epsilon of
/// each other.
#[inline]
#[must_use]
pub(crate) fn geo_almost_equal(p1: &LatLng, p2: &LatLng) -> bool {
  geo_almost_equal_threshold(p1, p2, EPSILON_RAD)
}

/// Set spherical coordinates from decimal degrees.
#[inline]
pub(crate) fn set_geo_degs(p: &mut LatLng, lat_degs: f64, lng_degs: f64) {
  p.lat = lat_degs.to_radians();
  p.lng = lng_degs.to_radians();
}

/// Constrains latitude to `[-PI/2, PI/2]`, folding over the poles.
#[inline]
#[must_use]
pub(crate) fn constrain_lat(mut lat: f64) -> f64 {
  while lat > FRAC_PI_2 {
    lat -= PI;
  }
  lat
}

/// Constrains longitude to `[-PI, PI]`.
#[inline]
#[must_use]
pub(crate) fn constrain_lng(mut lng: f64) -> f64 {
  while lng > PI {
    lng -= TWO_PI;
  }
  while lng < -PI {
    lng += TWO_PI;
  }
  lng
}

/// The azimuth from `p1` to `p2` in radians.
#[inline]
#[must_use]
pub(crate) fn geo_azimuth_rads(p1: &LatLng, p2: &LatLng) -> f64 {
  (p2.lat.cos() * (p2.lng - p1.lng).sin())
    .atan2(p1.lat.cos() * p2.lat.sin() - p1.lat.sin() * p2.lat.cos() * (p2.lng - p1.lng).cos())
}

/// The point at the given azimuth and great circle distance (radians)
/// from `p1`.
pub(crate) fn geo_az_distance_rads(p1: &LatLng, az: f64, distance: f64, p2: &mut LatLng) {
  if distance < EPSILON_RAD {
    *p2 = *p1;
    return;
  }

  let az = pos_angle_rads(az);

  if az < EPSILON_RAD || (az - PI).abs() < EPSILON_RAD {
    // due north or south
    if az < EPSILON_RAD {
      p2.lat = p1.lat + distance;
    } else {
      p2.lat = p1.lat - distance;
    }

    if (p2.lat - FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = FRAC_PI_2;
      p2.lng = 0.0;
    } else if (p2.lat + FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = -FRAC_PI_2;
      p2.lng = 0.0;
    } else {
      p2.lng = constrain_lng(p1.lng);
    }
  } else {
    let sin_lat = (p1.lat.sin() * distance.cos() + p1.lat.cos() * distance.sin() * az.cos()).clamp(-1.0, 1.0);
    p2.lat = sin_lat.asin();

    if (p2.lat - FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = FRAC_PI_2;
      p2.lng = 0.0;
    } else if (p2.lat + FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = -FRAC_PI_2;
      p2.lng = 0.0;
    } else {
      let cos_p1_lat = p1.lat.cos();
      if cos_p1_lat.abs() < EPSILON_RAD {
        // starting from a pole; the azimuth fixes the longitude
        p2.lng = constrain_lng(az);
      } else {
        let inv_cos_p2_lat = 1.0 / p2.lat.cos();
        let sin_lng = (az.sin() * distance.sin() * inv_cos_p2_lat).clamp(-1.0, 1.0);
        let cos_lng = ((distance.cos() - p1.lat.sin() * p2.lat.sin()) / cos_p1_lat * inv_cos_p2_lat).clamp(-1.0, 1.0);
        p2.lng = constrain_lng(p1.lng + sin_lng.atan2(cos_lng));
      }
    }
  }
}

/// The great circle distance in radians between two spherical
/// coordinates, using the haversine formula.
#[must_use]
pub fn great_circle_distance_rads(a: &LatLng, b: &LatLng) -> f64 {
  let sin_lat = ((b.lat - a.lat) * 0.5).sin();
  let sin_lng = ((b.lng - a.lng) * 0.5).sin();
  let h = (sin_lat * sin_lat + a.lat.cos() * b.lat.cos() * sin_lng * sin_lng).clamp(0.0, 1.0);
  2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// The great circle distance in kilometers between two spherical
/// coordinates.
#[must_use]
pub fn great_circle_distance_km(a: &LatLng, b: &LatLng) -> f64 {
  great_circle_distance_rads(a, b) * EARTH_RADIUS_KM
}

/// The great circle distance in meters between two spherical coordinates.
#[must_use]
pub fn great_circle_distance_m(a: &LatLng, b: &LatLng) -> f64 {
  great_circle_distance_km(a, b) * 1000.0
}

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees.to_radians()
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn rads_to_degs(radians: f64) -> f64 {
  radians.to_degrees()
}

/// Average hexagon area in square kilometers at the given resolution,
/// excluding pentagons.
pub fn get_hexagon_area_avg_km2(res: i32) -> Result<f64, GridError> {
  #[rustfmt::skip]
  const AREAS_KM2: [f64; (MAX_RES + 1) as usize] = [
    4.357_449_416_078_383e+06, 6.097_884_417_941_332e+05, 8.680_178_039_899_720e+04,
    1.239_343_465_508_816e+04, 1.770_347_654_491_307e+03, 2.529_038_581_819_449e+02,
    3.612_906_216_441_245e+01, 5.161_293_359_717_191e+00, 7.373_275_975_944_177e-01,
    1.053_325_134_272_067e-01, 1.504_750_190_766_435e-02, 2.149_643_129_451_879e-03,
    3.070_918_756_316_060e-04, 4.387_026_794_728_296e-05, 6.267_181_135_324_313e-06,
    8.953_115_907_605_790e-07,
  ];
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }
  Ok(AREAS_KM2[res as usize])
}

/// Average hexagon area in square meters at the given resolution,
/// excluding pentagons.
pub fn get_hexagon_area_avg_m2(res: i32) -> Result<f64, GridError> {
  #[rustfmt::skip]
  const AREAS_M2: [f64; (MAX_RES + 1) as usize] = [
    4.357_449_416_078_390e+12, 6.097_884_417_941_339e+11, 8.680_178_039_899_731e+10,
    1.239_343_465_508_818e+10, 1.770_347_654_491_309e+09, 2.529_038_581_819_452e+08,
    3.612_906_216_441_250e+07, 5.161_293_359_717_198e+06, 7.373_275_975_944_188e+05,
    1.053_325_134_272_069e+05, 1.504_750_190_766_437e+04, 2.149_643_129_451_882e+03,
    3.070_918_756_316_063e+02, 4.387_026_794_728_301e+01, 6.267_181_135_324_322e+00,
    8.953_115_907_605_802e-01,
  ];
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }
  Ok(AREAS_M2[res as usize])
}

/// Average hexagon edge length in kilometers at the given resolution,
/// excluding pentagons.
pub fn get_hexagon_edge_length_avg_km(res: i32) -> Result<f64, GridError> {
  #[rustfmt::skip]
  const LENS_KM: [f64; (MAX_RES + 1) as usize] = [
    1281.256011, 483.0568391, 182.5129565, 68.97922179,
    26.07175968, 9.854090990, 3.724532667, 1.406475763,
    0.531414010, 0.200786148, 0.075863783, 0.028663897,
    0.010830188, 0.004092010, 0.001546100, 0.000584169,
  ];
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }
  Ok(LENS_KM[res as usize])
}

/// Average hexagon edge length in meters at the given resolution,
/// excluding pentagons.
pub fn get_hexagon_edge_length_avg_m(res: i32) -> Result<f64, GridError> {
  #[rustfmt::skip]
  const LENS_M: [f64; (MAX_RES + 1) as usize] = [
    1281256.011, 483056.8391, 182512.9565, 68979.22179,
    26071.75968, 9854.090990, 3724.532667, 1406.475763,
    531.4140101, 200.7861476, 75.86378287, 28.66389748,
    10.83018784, 4.092010473, 1.546099657, 0.584168630,
  ];
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResDomain);
  }
  Ok(LENS_M[res as usize])
}

/// Normalizes a longitude for comparisons spanning the antimeridian.
#[inline]
#[must_use]
pub(crate) fn normalize_lng_for_comparison(lng: f64, normalization: LongitudeNormalization) -> f64 {
  match normalization {
    LongitudeNormalization::None => lng,
    LongitudeNormalization::East => {
      if lng < 0.0 {
        lng + TWO_PI
      } else {
        lng
      }
    }
    LongitudeNormalization::West => {
      if lng > 0.0 {
        lng - TWO_PI
      } else {
        lng
      }
    }
  }
}
