//! Multi-select core primitives
//!
//! Geometry and scene capabilities consumed by the selection controls:
//! - [`Transform`] - local position/rotation/scale with matrix compose/decompose
//! - [`Camera`] - projection and pointer-to-ray unprojection
//! - [`Ray`] / [`BoundingBox`] - picking primitives
//! - [`SceneGraph`] - the narrow scene interface, with [`Scene`] as an in-memory implementation

pub mod camera;
pub mod mesh;
pub mod ray;
pub mod scene;
pub mod transform;

pub use camera::{Camera, Projection};
pub use mesh::MeshGeometry;
pub use ray::{BoundingBox, Ray, ray_aabb_intersection, ray_triangle_intersection};
pub use scene::{Scene, SceneGraph, SceneNode};
pub use transform::Transform;
