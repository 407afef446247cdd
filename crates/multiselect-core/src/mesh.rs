//! Triangle geometry attached to scene nodes

use glam::{Mat4, Vec3};

use crate::ray::{BoundingBox, Ray, ray_aabb_intersection, ray_triangle_intersection};

/// Indexed triangle mesh in node-local coordinates
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    bounds: Option<BoundingBox>,
}

impl MeshGeometry {
    pub fn new(vertices: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let bounds = BoundingBox::from_points(&vertices);
        Self {
            vertices,
            indices,
            bounds,
        }
    }

    /// Axis-aligned box centered on the origin
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            [-h.x, -h.y, -h.z],
            [h.x, -h.y, -h.z],
            [h.x, h.y, -h.z],
            [-h.x, h.y, -h.z],
            [-h.x, -h.y, h.z],
            [h.x, -h.y, h.z],
            [h.x, h.y, h.z],
            [-h.x, h.y, h.z],
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 1, 5, 0, 5, 4, // bottom
            3, 7, 6, 3, 6, 2, // top
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        Self::new(vertices, indices)
    }

    /// Local-space bounds, None for an empty mesh
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Distance to the closest triangle hit along `ray`, with the mesh placed by `world`
    pub fn intersect(&self, ray: &Ray, world: Mat4) -> Option<f32> {
        let bounds = self.bounds?;

        // First check AABB for early rejection
        ray_aabb_intersection(ray, &bounds.transformed(world))?;

        let vertex = |i: u32| {
            self.vertices
                .get(i as usize)
                .map(|v| world.transform_point3(Vec3::from(*v)))
        };

        let mut closest: Option<f32> = None;
        for chunk in self.indices.chunks_exact(3) {
            let (Some(v0), Some(v1), Some(v2)) = (vertex(chunk[0]), vertex(chunk[1]), vertex(chunk[2]))
            else {
                continue;
            };

            if let Some(t) = ray_triangle_intersection(ray, v0, v1, v2)
                && closest.is_none_or(|current| t < current)
            {
                closest = Some(t);
            }
        }
        closest
    }
}
