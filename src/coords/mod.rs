//! Lattice coordinate systems: IJK arithmetic and icosahedron face
//! projection.

pub mod face_ijk;
pub mod ijk;
