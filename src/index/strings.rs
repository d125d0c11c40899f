//! Hexadecimal string conversions for cell indexes.

use crate::{CellIndex, GridError};

/// Parse the hexadecimal string representation of a cell index.
pub fn string_to_cell(s: &str) -> Result<CellIndex, GridError> {
  if s.is_empty() {
    return Err(GridError::Failed);
  }
  u64::from_str_radix(s, 16).map(CellIndex).map_err(|_| GridError::Failed)
}

/// Format a cell index as a lowercase hexadecimal string.
#[must_use]
pub fn cell_to_string(h: CellIndex) -> String {
  format!("{:x}", h.0)
}

/// Format a cell index into a caller-provided byte buffer, NUL terminated.
/// The buffer must hold at least 17 bytes.
pub fn cell_to_string_buf(h: CellIndex, buffer: &mut [u8]) -> Result<(), GridError> {
  let s = cell_to_string(h);
  let bytes = s.as_bytes();
  if bytes.len() + 1 > buffer.len() {
    return Err(GridError::MemoryBounds);
  }
  buffer[..bytes.len()].copy_from_slice(bytes);
  buffer[bytes.len()] = 0;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_string_to_cell() {
    assert_eq!(string_to_cell("8928308280fffff"), Ok(CellIndex(0x8928308280fffff)));
    assert_eq!(string_to_cell("0"), Ok(CellIndex(0)));
    assert_eq!(string_to_cell("ffffffffffffffff"), Ok(CellIndex(u64::MAX)));

    assert_eq!(string_to_cell(""), Err(GridError::Failed));
    assert_eq!(string_to_cell("not hex"), Err(GridError::Failed));
    assert_eq!(string_to_cell("10000000000000000"), Err(GridError::Failed));
  }

  #[test]
  fn test_cell_to_string() {
    assert_eq!(cell_to_string(CellIndex(0x8928308280fffff)), "8928308280fffff");
    assert_eq!(cell_to_string(CellIndex(0)), "0");
  }

  #[test]
  fn test_cell_to_string_buf() {
    let mut buffer = [0u8; 17];
    cell_to_string_buf(CellIndex(0x8928308280fffff), &mut buffer).unwrap();
    assert_eq!(&buffer[..15], b"8928308280fffff");
    assert_eq!(buffer[15], 0);

    let mut small = [0u8; 16];
    assert_eq!(
      cell_to_string_buf(CellIndex(u64::MAX), &mut small),
      Err(GridError::MemoryBounds)
    );
  }

  #[test]
  fn test_round_trip() {
    let h = CellIndex(0x8a18443b1337fff);
    assert_eq!(string_to_cell(&cell_to_string(h)), Ok(h));
  }
}
