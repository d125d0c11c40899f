//! Region operations: polygon fill and cell-set outlines.

pub mod polyfill;
pub mod to_polygon;

pub use polyfill::{max_polygon_to_cells_size, polygon_to_cells, PolygonCellIter, PolygonCompactCellIter};
pub use to_polygon::cells_to_multi_polygon;
