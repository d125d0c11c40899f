//! Core value types shared across the grid engines.

use crate::constants::MAX_CELL_BNDRY_VERTS;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// A 64-bit grid identifier: a cell, directed edge or vertex depending on
/// the mode bits.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellIndex(pub u64);

/// The zero index. Never a valid cell; used to signal "no cell".
pub const NULL_INDEX: CellIndex = CellIndex(0);

/// Spherical coordinates in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
  /// Latitude in radians.
  pub lat: f64,
  /// Longitude in radians.
  pub lng: f64,
}

/// The boundary of a cell as counter-clockwise vertices. The loop closes
/// implicitly; the first vertex is not repeated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellBoundary {
  /// Number of meaningful entries in `verts`.
  pub num_verts: usize,
  /// Vertices; entries past `num_verts` are unspecified.
  pub verts: [LatLng; MAX_CELL_BNDRY_VERTS],
}

impl Default for CellBoundary {
  fn default() -> Self {
    Self {
      num_verts: 0,
      verts: [LatLng::default(); MAX_CELL_BNDRY_VERTS],
    }
  }
}

/// A single closed loop of geographic coordinates. The last vertex connects
/// back to the first implicitly.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoLoop {
  /// Number of vertices in the loop.
  pub num_verts: usize,
  /// Vertices forming the loop.
  pub verts: Vec<LatLng>,
}

/// A polygon: one outer loop plus zero or more hole loops.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPolygon {
  /// The outer loop.
  pub geoloop: GeoLoop,
  /// Number of hole loops.
  pub num_holes: usize,
  /// Hole loops.
  pub holes: Vec<GeoLoop>,
}

/// The closed set of error kinds returned by every fallible operation.
///
/// The numeric discriminants are part of the public contract and never
/// change. `Success` exists so the full code space round-trips through
/// `repr(u32)`, but it is never carried inside an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum GridError {
  /// No error.
  #[error("success")]
  Success = 0,
  /// The operation failed for an unspecified reason.
  #[error("operation failed")]
  Failed = 1,
  /// An argument was outside of its acceptable range.
  #[error("argument outside of acceptable range")]
  Domain = 2,
  /// A latitude or longitude argument was outside of its acceptable range.
  #[error("latitude or longitude outside of acceptable range")]
  LatLngDomain = 3,
  /// A resolution argument was outside of 0..=15.
  #[error("resolution outside of acceptable range")]
  ResDomain = 4,
  /// A cell index argument was not valid.
  #[error("cell index argument was not valid")]
  CellInvalid = 5,
  /// A directed edge index argument was not valid.
  #[error("directed edge index argument was not valid")]
  DirEdgeInvalid = 6,
  /// An undirected edge index argument was not valid.
  #[error("undirected edge index argument was not valid")]
  UndirEdgeInvalid = 7,
  /// A vertex index argument was not valid.
  #[error("vertex index argument was not valid")]
  VertexInvalid = 8,
  /// Pentagon distortion was encountered and the algorithm could not cope.
  #[error("pentagon distortion encountered")]
  Pentagon = 9,
  /// Duplicate input the algorithm could not handle.
  #[error("duplicate input")]
  DuplicateInput = 10,
  /// Cell arguments were not neighbors.
  #[error("cells are not neighbors")]
  NotNeighbors = 11,
  /// Cell arguments had incompatible resolutions.
  #[error("cell resolutions are incompatible")]
  ResMismatch = 12,
  /// A necessary memory allocation failed.
  #[error("memory allocation failed")]
  MemoryAlloc = 13,
  /// Provided storage was not large enough.
  #[error("provided memory bounds too small")]
  MemoryBounds = 14,
  /// A mode or flags argument was not valid.
  #[error("mode or flags argument was not valid")]
  OptionInvalid = 15,
}

/// Two-axis hexagon lattice coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordIJ {
  /// I component.
  pub i: i32,
  /// J component.
  pub j: i32,
}

/// Redundant three-axis hexagon lattice coordinates, axes 120 degrees
/// apart. Normalized coordinates satisfy `i + j + k == 0` component-wise
/// minimums of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordIJK {
  /// I component.
  pub i: i32,
  /// J component.
  pub j: i32,
  /// K component.
  pub k: i32,
}

/// An icosahedron face number plus IJK coordinates in that face's lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceIJK {
  /// Icosahedron face number, 0-19.
  pub face: i32,
  /// Lattice coordinates on that face.
  pub coord: CoordIJK,
}

/// 2D Cartesian vector.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2d {
  /// X component.
  pub x: f64,
  /// Y component.
  pub y: f64,
}

/// 3D Cartesian vector.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3d {
  /// X component.
  pub x: f64,
  /// Y component.
  pub y: f64,
  /// Z component.
  pub z: f64,
}

/// A refinement digit: one of the seven child positions (0-6), or the
/// out-of-band invalid value 7 used as the unused-digit sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum Direction {
  /// Center position.
  #[default]
  Center = 0,
  /// K-axis direction. Deleted at pentagons.
  KAxes = 1,
  /// J-axis direction.
  JAxes = 2,
  /// J+K direction.
  JkAxes = 3,
  /// I-axis direction.
  IAxes = 4,
  /// I+K direction.
  IkAxes = 5,
  /// I+J direction.
  IjAxes = 6,
  /// Sentinel for digits beyond the index resolution.
  InvalidDigit = 7,
}

impl TryFrom<u8> for Direction {
  type Error = GridError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Direction::Center),
      1 => Ok(Direction::KAxes),
      2 => Ok(Direction::JAxes),
      3 => Ok(Direction::JkAxes),
      4 => Ok(Direction::IAxes),
      5 => Ok(Direction::IkAxes),
      6 => Ok(Direction::IjAxes),
      7 => Ok(Direction::InvalidDigit),
      _ => Err(GridError::Domain),
    }
  }
}

/// Geographic bounding box in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox {
  /// North latitude.
  pub north: f64,
  /// South latitude.
  pub south: f64,
  /// East longitude.
  pub east: f64,
  /// West longitude.
  pub west: f64,
}

/// Containment predicates selectable when filling a polygon with cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum ContainmentMode {
  /// Cell center is contained in the shape.
  #[default]
  Center = 0,
  /// Cell is fully contained in the shape.
  Full = 1,
  /// Cell overlaps the shape at any point.
  Overlapping = 2,
  /// Cell bounding box overlaps the shape.
  OverlappingBbox = 3,
  /// Bounds sentinel; never a legal argument.
  Invalid = 4,
}

impl TryFrom<u32> for ContainmentMode {
  type Error = GridError;

  fn try_from(value: u32) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(ContainmentMode::Center),
      1 => Ok(ContainmentMode::Full),
      2 => Ok(ContainmentMode::Overlapping),
      3 => Ok(ContainmentMode::OverlappingBbox),
      _ => Err(GridError::OptionInvalid),
    }
  }
}
