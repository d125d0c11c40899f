//! Small numeric helpers shared by the lattice and geometry code.

pub mod vec2d;
pub mod vec3d;

/// Integer exponentiation by squaring. Wraps on overflow, which never
/// occurs for the in-range resolution deltas this crate computes with.
#[inline]
#[must_use]
pub(crate) fn ipow(mut base: i64, mut exp: i64) -> i64 {
  if exp < 0 {
    return match base {
      1 => 1,
      -1 => {
        if exp % 2 == 0 {
          1
        } else {
          -1
        }
      }
      _ => 0,
    };
  }

  let mut result: i64 = 1;
  loop {
    if exp & 1 != 0 {
      result = result.wrapping_mul(base);
    }
    exp >>= 1;
    if exp == 0 {
      break;
    }
    base = base.wrapping_mul(base);
  }
  result
}
