//! 3D Cartesian vector helpers for spherical geometry.

use crate::types::{LatLng, Vec3d};

#[inline]
fn square(x: f64) -> f64 {
  x * x
}

/// Squared Euclidean distance between two 3D points.
#[inline]
#[must_use]
pub(crate) fn point_square_dist(a: &Vec3d, b: &Vec3d) -> f64 {
  square(a.x - b.x) + square(a.y - b.y) + square(a.z - b.z)
}

/// Unit-sphere 3D coordinate for spherical coordinates in radians.
#[inline]
pub(crate) fn geo_to_vec3d(geo: &LatLng, point: &mut Vec3d) {
  let r = geo.lat.cos();

  point.z = geo.lat.sin();
  point.x = geo.lng.cos() * r;
  point.y = geo.lng.sin() * r;
}

/// Cross product.
#[inline]
pub(crate) fn vec3d_cross(a: &Vec3d, b: &Vec3d, out: &mut Vec3d) {
  out.x = a.y * b.z - a.z * b.y;
  out.y = a.z * b.x - a.x * b.z;
  out.z = a.x * b.y - a.y * b.x;
}

/// Dot product.
#[inline]
#[must_use]
pub(crate) fn vec3d_dot(a: &Vec3d, b: &Vec3d) -> f64 {
  a.x * b.x + a.y * b.y + a.z * b.z
}
