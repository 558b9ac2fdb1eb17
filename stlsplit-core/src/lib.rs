/// stlsplit core library - STL decoding and object separation
///
/// Decodes binary and ASCII STL data into a flat vertex buffer and splits
/// that buffer into spatially separated objects that can be drawn and
/// textured independently.

mod error;

pub mod cluster;
pub mod geometry;
pub mod layout;
pub mod projection;
pub mod stl;

// Re-export commonly used types
pub use cluster::{cluster, ClusterConfig, ClusterStrategy, GreedyCenters};
pub use error::{StlError, StlResult};
pub use geometry::{Mesh, MeshGroup, Triangle, Vertex, VERTEX_STRIDE};
pub use layout::{pack_groups, texture_slot, DrawRange, PackedGroups};
pub use projection::spherical_uv;
pub use stl::{decode, detect_format, parse_stl, StlFormat, StlMesh};
