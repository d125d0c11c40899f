#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::similar_names)]
#![allow(clippy::wildcard_imports)]

//! `hexcell` is a hierarchical hexagonal grid for indexing points on the
//! sphere.
//!
//! The grid projects the globe onto an icosahedron and tiles each face
//! with hexagons (plus twelve pentagons) at sixteen resolutions. A cell,
//! a directed edge between adjacent cells, or a cell vertex is packed
//! into a single 64 bit index, and all operations work directly on those
//! indexes: point indexing, hierarchy, traversal, region fill, and
//! topology.

pub mod base_cells;
pub mod bbox;
pub mod constants;
pub mod coords;
pub mod edges;
pub mod hierarchy;
pub mod index;
pub mod indexing;
pub mod iterators;
pub mod latlng;
pub mod local_ij;
pub mod math;
pub mod measures;
pub mod polygon;
pub mod regions;
pub mod traversal;
pub mod types;
pub mod vertexes;

pub use constants::MAX_CELL_BNDRY_VERTS;
pub use types::{
  BBox, CellBoundary, CellIndex, ContainmentMode, CoordIJ, CoordIJK, FaceIJK, GeoLoop, GeoPolygon,
  GridError, LatLng, Vec2d, Vec3d, NULL_INDEX,
};

pub use latlng::{
  degs_to_rads, get_hexagon_area_avg_km2, get_hexagon_area_avg_m2, get_hexagon_edge_length_avg_km,
  get_hexagon_edge_length_avg_m, great_circle_distance_km, great_circle_distance_m,
  great_circle_distance_rads, rads_to_degs,
};

pub use index::get_resolution;
pub use index::inspection::{
  get_base_cell_number, get_icosahedron_faces, get_num_cells, get_pentagons, get_res0_cells,
  is_pentagon, is_res_class_iii, is_valid_cell, max_face_count, pentagon_count,
};
pub use index::strings::{cell_to_string, cell_to_string_buf, string_to_cell};
pub use indexing::{cell_to_boundary, cell_to_lat_lng, lat_lng_to_cell};

pub use hierarchy::{
  cell_to_center_child, cell_to_child_pos, cell_to_children, cell_to_children_size, cell_to_parent,
  child_pos_to_cell, compact_cells, uncompact_cells, uncompact_cells_size,
};
pub use iterators::{CellChildIter, CellResIter};

pub use traversal::{
  are_neighbor_cells, grid_disk, grid_disk_distances, grid_distance, grid_path_cells,
  grid_path_cells_size, grid_ring_unsafe, max_grid_disk_size,
};
pub use local_ij::{cell_to_local_ij, local_ij_to_cell};

pub use edges::{
  cells_to_directed_edge, directed_edge_to_boundary, directed_edge_to_cells,
  get_directed_edge_destination, get_directed_edge_origin, is_valid_directed_edge,
  origin_to_directed_edges, MAX_CELL_EDGES,
};
pub use vertexes::{
  cell_to_vertex, cell_to_vertexes, is_valid_vertex, vertex_to_lat_lng, MAX_CELL_VERTS,
};

pub use measures::{
  cell_area_km2, cell_area_m2, cell_area_rads2, edge_length_km, edge_length_m, edge_length_rads,
};
pub use regions::{
  cells_to_multi_polygon, max_polygon_to_cells_size, polygon_to_cells, PolygonCellIter,
  PolygonCompactCellIter,
};
