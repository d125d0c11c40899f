//! 2D Cartesian vector helpers for the face planes.

use crate::types::Vec2d;

/// Magnitude of a 2D vector.
#[inline]
#[must_use]
pub(crate) fn v2d_mag(v: &Vec2d) -> f64 {
  (v.x * v.x + v.y * v.y).sqrt()
}

/// Intersection of the line through `p0`/`p1` with the line through
/// `p2`/`p3`. Callers guarantee the lines are not parallel and that the
/// intersection is interior to both segments.
#[inline]
pub(crate) fn v2d_intersect(p0: &Vec2d, p1: &Vec2d, p2: &Vec2d, p3: &Vec2d, inter: &mut Vec2d) {
  let s1x = p1.x - p0.x;
  let s1y = p1.y - p0.y;
  let s2x = p3.x - p2.x;
  let s2y = p3.y - p2.y;

  let t = (s2x * (p0.y - p2.y) - s2y * (p0.x - p2.x)) / (-s2x * s1y + s1x * s2y);

  inter.x = p0.x + t * s1x;
  inter.y = p0.y + t * s1y;
}

/// Whether two vectors are equal to within machine epsilon.
#[inline]
#[must_use]
pub(crate) fn v2d_almost_equals(a: &Vec2d, b: &Vec2d) -> bool {
  (a.x - b.x).abs() < f64::EPSILON && (a.y - b.y).abs() < f64::EPSILON
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_v2d_mag() {
    let v = Vec2d { x: 3.0, y: 4.0 };
    assert!((v2d_mag(&v) - 5.0).abs() < f64::EPSILON);
  }

  #[test]
  fn test_v2d_intersect() {
    let p0 = Vec2d { x: 2.0, y: 2.0 };
    let p1 = Vec2d { x: 6.0, y: 6.0 };
    let p2 = Vec2d { x: 0.0, y: 4.0 };
    let p3 = Vec2d { x: 10.0, y: 4.0 };
    let mut inter = Vec2d::default();

    v2d_intersect(&p0, &p1, &p2, &p3, &mut inter);

    assert!((inter.x - 4.0).abs() < f64::EPSILON);
    assert!((inter.y - 4.0).abs() < f64::EPSILON);
  }

  #[test]
  fn test_v2d_almost_equals() {
    let a = Vec2d { x: 3.0, y: 4.0 };
    let b = Vec2d { x: 3.0, y: 4.0 };
    let c = Vec2d { x: 3.5, y: 4.0 };
    assert!(v2d_almost_equals(&a, &b));
    assert!(!v2d_almost_equals(&a, &c));
  }
}
