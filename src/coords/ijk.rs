//! Hexagonal IJK lattice arithmetic.
//!
//! Cells on a face are addressed with redundant three-axis coordinates,
//! axes 120 degrees apart. Normalized coordinates have all components
//! non-negative with at least one equal to zero.

use crate::constants::{RSIN60, SIN60};
use crate::types::{CoordIJ, CoordIJK, Direction, GridError};
use crate::Vec2d;

/// IJK unit vectors for the seven refinement digits, indexed by digit.
#[rustfmt::skip]
pub(crate) static UNIT_VECS: [CoordIJK; 7] = [
  CoordIJK { i: 0, j: 0, k: 0 }, // Center
  CoordIJK { i: 0, j: 0, k: 1 }, // KAxes
  CoordIJK { i: 0, j: 1, k: 0 }, // JAxes
  CoordIJK { i: 0, j: 1, k: 1 }, // JkAxes
  CoordIJK { i: 1, j: 0, k: 0 }, // IAxes
  CoordIJK { i: 1, j: 0, k: 1 }, // IkAxes
  CoordIJK { i: 1, j: 1, k: 0 }, // IjAxes
];

#[inline]
pub(crate) fn set_ijk(ijk: &mut CoordIJK, i: i32, j: i32, k: i32) {
  ijk.i = i;
  ijk.j = j;
  ijk.k = k;
}

#[inline]
#[must_use]
pub(crate) fn ijk_matches(a: &CoordIJK, b: &CoordIJK) -> bool {
  a.i == b.i && a.j == b.j && a.k == b.k
}

/// Component-wise sum.
#[inline]
pub(crate) fn ijk_add(a: &CoordIJK, b: &CoordIJK, sum: &mut CoordIJK) {
  sum.i = a.i.saturating_add(b.i);
  sum.j = a.j.saturating_add(b.j);
  sum.k = a.k.saturating_add(b.k);
}

/// Component-wise difference `a - b`.
#[inline]
pub(crate) fn ijk_sub(a: &CoordIJK, b: &CoordIJK, diff: &mut CoordIJK) {
  diff.i = a.i.saturating_sub(b.i);
  diff.j = a.j.saturating_sub(b.j);
  diff.k = a.k.saturating_sub(b.k);
}

/// Uniform scale, in place.
#[inline]
pub(crate) fn ijk_scale(c: &mut CoordIJK, factor: i32) {
  c.i = c.i.saturating_mul(factor);
  c.j = c.j.saturating_mul(factor);
  c.k = c.k.saturating_mul(factor);
}

/// Whether normalizing the given coordinates (with `k == 0`) would overflow
/// the intermediate subtractions. Used to reject pathological caller input
/// before `ijk_normalize`.
#[inline]
#[must_use]
pub(crate) fn ijk_normalize_could_overflow(ijk: &CoordIJK) -> bool {
  let (max_val, min_val) = if ijk.i > ijk.j { (ijk.i, ijk.j) } else { (ijk.j, ijk.i) };
  if min_val < 0 {
    if max_val.checked_sub(min_val).is_none() {
      return true;
    }
    if 0i32.checked_sub(min_val).is_none() {
      return true;
    }
  }
  false
}

/// Normalizes coordinates to the smallest non-negative components, in
/// place. Saturates rather than wrapping on extreme input.
#[inline]
pub(crate) fn ijk_normalize(c: &mut CoordIJK) {
  if c.i < 0 {
    c.j = c.j.saturating_sub(c.i);
    c.k = c.k.saturating_sub(c.i);
    c.i = 0;
  }
  if c.j < 0 {
    c.i = c.i.saturating_sub(c.j);
    c.k = c.k.saturating_sub(c.j);
    c.j = 0;
  }
  if c.k < 0 {
    c.i = c.i.saturating_sub(c.k);
    c.j = c.j.saturating_sub(c.k);
    c.k = 0;
  }

  let min_val = c.i.min(c.j).min(c.k);
  if min_val > 0 {
    c.i -= min_val;
    c.j -= min_val;
    c.k -= min_val;
  }
}

/// The refinement digit for a unit (or zero) vector, or `InvalidDigit` if
/// the normalized input is not one.
#[inline]
#[must_use]
pub(crate) fn unit_ijk_to_digit(ijk: &CoordIJK) -> Direction {
  let mut c = *ijk;
  ijk_normalize(&mut c);

  for (digit, unit) in UNIT_VECS.iter().enumerate() {
    if ijk_matches(&c, unit) {
      return Direction::try_from(digit as u8).unwrap_or(Direction::InvalidDigit);
    }
  }
  Direction::InvalidDigit
}

/// Steps the coordinates one cell in the given digit direction, in place.
#[inline]
pub(crate) fn ijk_neighbor(ijk: &mut CoordIJK, digit: Direction) {
  if digit != Direction::Center && digit != Direction::InvalidDigit {
    let mut sum = CoordIJK::default();
    ijk_add(ijk, &UNIT_VECS[digit as usize], &mut sum);
    *ijk = sum;
    ijk_normalize(ijk);
  }
}

/// Quantizes a 2D Cartesian point on the hex plane to the containing
/// cell's IJK coordinates (DGGRID quantization).
pub(crate) fn hex2d_to_coord_ijk(v: &Vec2d, h: &mut CoordIJK) {
  h.k = 0;

  let a1 = v.x.abs();
  let a2 = v.y.abs();

  // first do a reverse conversion
  let x2 = a2 * RSIN60;
  let x1 = a1 + x2 / 2.0;

  // check if we have the center of a hex
  let m1 = x1 as i32;
  let m2 = x2 as i32;

  // otherwise round correctly
  let r1 = x1 - f64::from(m1);
  let r2 = x2 - f64::from(m2);

  if r1 < 0.5 {
    if r1 < 1.0 / 3.0 {
      if r2 < (1.0 + r1) / 2.0 {
        h.i = m1;
        h.j = m2;
      } else {
        h.i = m1;
        h.j = m2 + 1;
      }
    } else {
      h.j = if r2 < (1.0 - r1) { m2 } else { m2 + 1 };
      h.i = if (1.0 - r1) <= r2 && r2 < (2.0 * r1) { m1 + 1 } else { m1 };
    }
  } else if r1 < 2.0 / 3.0 {
    h.j = if r2 < (1.0 - r1) { m2 } else { m2 + 1 };
    h.i = if (2.0 * r1 - 1.0) < r2 && r2 < (1.0 - r1) { m1 } else { m1 + 1 };
  } else if r2 < (r1 / 2.0) {
    h.i = m1 + 1;
    h.j = m2;
  } else {
    h.i = m1 + 1;
    h.j = m2 + 1;
  }

  // fold across the axes if necessary
  if v.x < 0.0 {
    if (h.j % 2) == 0 {
      let axis_i = i64::from(h.j) / 2;
      let diff = i64::from(h.i) - axis_i;
      h.i = (i64::from(h.i) - 2 * diff) as i32;
    } else {
      let axis_i = (i64::from(h.j) + 1) / 2;
      let diff = i64::from(h.i) - axis_i;
      h.i = (i64::from(h.i) - (2 * diff + 1)) as i32;
    }
  }

  if v.y < 0.0 {
    h.i = (i64::from(h.i) - (2 * i64::from(h.j) + 1) / 2) as i32;
    h.j = -h.j;
  }

  ijk_normalize(h);
}

/// Center point of a cell in 2D Cartesian coordinates on the hex plane.
#[inline]
pub(crate) fn ijk_to_hex2d(h: &CoordIJK, v: &mut Vec2d) {
  let i = h.i - h.k;
  let j = h.j - h.k;

  v.x = f64::from(i) - 0.5 * f64::from(j);
  v.y = f64::from(j) * SIN60;
}

// f64::round ties away from zero, matching C lround for finite input.
#[inline]
pub(crate) fn lround(val: f64) -> i32 {
  val.round() as i32
}

/// Parent coordinates in the counter-clockwise aperture-7 grid
/// (Class III), in place.
#[inline]
pub(crate) fn up_ap7(ijk: &mut CoordIJK) {
  let i = ijk.i - ijk.k;
  let j = ijk.j - ijk.k;

  ijk.i = lround(f64::from(3 * i - j) / 7.0);
  ijk.j = lround(f64::from(i + 2 * j) / 7.0);
  ijk.k = 0;
  ijk_normalize(ijk);
}

/// Parent coordinates in the clockwise aperture-7 grid (Class II), in
/// place.
#[inline]
pub(crate) fn up_ap7r(ijk: &mut CoordIJK) {
  let i = ijk.i - ijk.k;
  let j = ijk.j - ijk.k;

  ijk.i = lround(f64::from(2 * i + j) / 7.0);
  ijk.j = lround(f64::from(3 * j - i) / 7.0);
  ijk.k = 0;
  ijk_normalize(ijk);
}

/// Overflow-checked variant of [`up_ap7`] for coordinates derived from
/// caller-supplied input.
pub(crate) fn up_ap7_checked(ijk: &mut CoordIJK) -> Result<(), GridError> {
  let i = ijk.i.checked_sub(ijk.k).ok_or(GridError::Failed)?;
  let j = ijk.j.checked_sub(ijk.k).ok_or(GridError::Failed)?;

  let num_i = i.checked_mul(3).and_then(|t| t.checked_sub(j)).ok_or(GridError::Failed)?;
  let num_j = j.checked_mul(2).and_then(|t| t.checked_add(i)).ok_or(GridError::Failed)?;

  ijk.i = lround(f64::from(num_i) / 7.0);
  ijk.j = lround(f64::from(num_j) / 7.0);
  ijk.k = 0;
  ijk_normalize(ijk);
  Ok(())
}

/// Overflow-checked variant of [`up_ap7r`].
pub(crate) fn up_ap7r_checked(ijk: &mut CoordIJK) -> Result<(), GridError> {
  let i = ijk.i.checked_sub(ijk.k).ok_or(GridError::Failed)?;
  let j = ijk.j.checked_sub(ijk.k).ok_or(GridError::Failed)?;

  let num_i = i.checked_mul(2).and_then(|t| t.checked_add(j)).ok_or(GridError::Failed)?;
  let num_j = j.checked_mul(3).and_then(|t| t.checked_sub(i)).ok_or(GridError::Failed)?;

  ijk.i = lround(f64::from(num_i) / 7.0);
  ijk.j = lround(f64::from(num_j) / 7.0);
  ijk.k = 0;
  ijk_normalize(ijk);
  Ok(())
}

// Re-expresses the coordinates in a finer or rotated lattice by mapping
// each axis to its image vector and summing.
#[inline]
fn remap_axes(ijk: &mut CoordIJK, i_vec: CoordIJK, j_vec: CoordIJK, k_vec: CoordIJK) {
  let mut i_img = i_vec;
  ijk_scale(&mut i_img, ijk.i);
  let mut j_img = j_vec;
  ijk_scale(&mut j_img, ijk.j);
  let mut k_img = k_vec;
  ijk_scale(&mut k_img, ijk.k);

  let mut sum = CoordIJK::default();
  ijk_add(&i_img, &j_img, &mut sum);
  ijk_add(&sum, &k_img, ijk);

  ijk_normalize(ijk);
}

/// Center of the same cell in the next finer aperture-7 counter-clockwise
/// resolution (Class III), in place.
#[inline]
pub(crate) fn down_ap7(ijk: &mut CoordIJK) {
  remap_axes(
    ijk,
    CoordIJK { i: 3, j: 0, k: 1 },
    CoordIJK { i: 1, j: 3, k: 0 },
    CoordIJK { i: 0, j: 1, k: 3 },
  );
}

/// Center of the same cell in the next finer aperture-7 clockwise
/// resolution (Class II), in place.
#[inline]
pub(crate) fn down_ap7r(ijk: &mut CoordIJK) {
  remap_axes(
    ijk,
    CoordIJK { i: 3, j: 1, k: 0 },
    CoordIJK { i: 0, j: 3, k: 1 },
    CoordIJK { i: 1, j: 0, k: 3 },
  );
}

/// Center of the same cell in the next finer aperture-3 counter-clockwise
/// substrate, in place.
#[inline]
pub(crate) fn down_ap3(ijk: &mut CoordIJK) {
  remap_axes(
    ijk,
    CoordIJK { i: 2, j: 0, k: 1 },
    CoordIJK { i: 1, j: 2, k: 0 },
    CoordIJK { i: 0, j: 1, k: 2 },
  );
}

/// Center of the same cell in the next finer aperture-3 clockwise
/// substrate, in place.
#[inline]
pub(crate) fn down_ap3r(ijk: &mut CoordIJK) {
  remap_axes(
    ijk,
    CoordIJK { i: 2, j: 1, k: 0 },
    CoordIJK { i: 0, j: 2, k: 1 },
    CoordIJK { i: 1, j: 0, k: 2 },
  );
}

/// Rotates coordinates 60 degrees counter-clockwise, in place.
#[inline]
pub(crate) fn ijk_rotate60_ccw(ijk: &mut CoordIJK) {
  remap_axes(
    ijk,
    CoordIJK { i: 1, j: 1, k: 0 },
    CoordIJK { i: 0, j: 1, k: 1 },
    CoordIJK { i: 1, j: 0, k: 1 },
  );
}

/// Rotates coordinates 60 degrees clockwise, in place.
#[inline]
pub(crate) fn ijk_rotate60_cw(ijk: &mut CoordIJK) {
  remap_axes(
    ijk,
    CoordIJK { i: 1, j: 0, k: 1 },
    CoordIJK { i: 1, j: 1, k: 0 },
    CoordIJK { i: 0, j: 1, k: 1 },
  );
}

/// Rotates a digit 60 degrees counter-clockwise.
#[inline]
#[must_use]
pub(crate) fn rotate60_ccw(digit: Direction) -> Direction {
  use Direction::*;
  match digit {
    KAxes => IkAxes,
    IkAxes => IAxes,
    IAxes => IjAxes,
    IjAxes => JAxes,
    JAxes => JkAxes,
    JkAxes => KAxes,
    other => other,
  }
}

/// Rotates a digit 60 degrees clockwise.
#[inline]
#[must_use]
pub(crate) fn rotate60_cw(digit: Direction) -> Direction {
  use Direction::*;
  match digit {
    KAxes => JkAxes,
    JkAxes => JAxes,
    JAxes => IjAxes,
    IjAxes => IAxes,
    IAxes => IkAxes,
    IkAxes => KAxes,
    other => other,
  }
}

/// Hex-grid distance between two coordinates on the same face.
#[inline]
#[must_use]
pub(crate) fn ijk_distance(a: &CoordIJK, b: &CoordIJK) -> i32 {
  let mut diff = CoordIJK::default();
  ijk_sub(a, b, &mut diff);
  ijk_normalize(&mut diff);

  diff.i.abs().max(diff.j.abs()).max(diff.k.abs())
}

/// Projects normalized IJK coordinates onto the two-axis IJ system.
#[inline]
pub(crate) fn ijk_to_ij(ijk: &CoordIJK, ij: &mut CoordIJ) {
  ij.i = ijk.i - ijk.k;
  ij.j = ijk.j - ijk.k;
}

/// Lifts two-axis IJ coordinates into normalized IJK, rejecting input
/// whose normalization would overflow.
pub(crate) fn ij_to_ijk(ij: &CoordIJ, ijk: &mut CoordIJK) -> Result<(), GridError> {
  ijk.i = ij.i;
  ijk.j = ij.j;
  ijk.k = 0;

  if ijk_normalize_could_overflow(ijk) {
    return Err(GridError::Failed);
  }

  ijk_normalize(ijk);
  Ok(())
}

/// Re-expresses the coordinates as cube coordinates (`i + j + k == 0`),
/// in place.
#[inline]
pub(crate) fn ijk_to_cube(ijk: &mut CoordIJK) {
  ijk.i = -ijk.i + ijk.k;
  ijk.j -= ijk.k;
  ijk.k = -ijk.i - ijk.j;
}

/// Reverses [`ijk_to_cube`], producing normalized IJK, in place.
#[inline]
pub(crate) fn cube_to_ijk(ijk: &mut CoordIJK) {
  ijk.i = -ijk.i;
  ijk.k = 0;
  ijk_normalize(ijk);
}
