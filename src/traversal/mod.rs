//! Movement across the grid: neighbors, disks, rings, distances and lines.

pub mod distance;
pub mod grid_disk;
pub mod grid_path;
pub mod neighbors;

pub use distance::grid_distance;
pub use grid_disk::{
  grid_disk, grid_disk_distances, grid_disk_distances_safe, grid_disk_distances_unsafe,
  grid_disk_unsafe, grid_ring_unsafe, max_grid_disk_size,
};
pub use grid_path::{grid_path_cells, grid_path_cells_size};
pub use neighbors::are_neighbor_cells;
