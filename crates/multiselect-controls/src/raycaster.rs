//! Pointer hit testing

use glam::{Vec2, Vec3};
use multiselect_core::{Camera, Ray, SceneGraph};
use uuid::Uuid;

/// A single ray hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub object: Uuid,
    pub distance: f32,
    pub point: Vec3,
}

/// Casts rays from the camera through the pointer into the scene
#[derive(Debug, Clone)]
pub struct Raycaster {
    /// Hits closer than this are ignored
    pub near: f32,
    /// Hits farther than this are ignored
    pub far: f32,
    /// Only report the nearest hit
    pub first_hit_only: bool,
    pointer: Vec2,
    ray: Option<Ray>,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: f32::INFINITY,
            first_hit_only: true,
            pointer: Vec2::ZERO,
            ray: None,
        }
    }
}

impl Raycaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pointer position in NDC
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    /// Ray of the last [`Self::set_from_camera`] call
    pub fn ray(&self) -> Option<Ray> {
        self.ray
    }

    /// Aim the ray from `camera` through the current pointer
    pub fn set_from_camera(&mut self, camera: &Camera) {
        self.ray = Some(camera.ray_from_ndc(self.pointer));
    }

    /// Intersect the given objects, nearest first.
    ///
    /// With `recursive`, descendants of each object are tested too and a hit
    /// reports the descendant that was actually struck.
    pub fn intersect_objects<S>(&self, scene: &S, objects: &[Uuid], recursive: bool) -> Vec<Intersection>
    where
        S: SceneGraph + ?Sized,
    {
        let Some(ray) = self.ray else {
            return Vec::new();
        };

        let mut hits = Vec::new();
        for object in objects {
            self.intersect_object(scene, &ray, *object, recursive, &mut hits);
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        if self.first_hit_only {
            hits.truncate(1);
        }
        hits
    }

    /// Nearest hit among the given objects
    pub fn intersect_first<S>(&self, scene: &S, objects: &[Uuid], recursive: bool) -> Option<Intersection>
    where
        S: SceneGraph + ?Sized,
    {
        self.intersect_objects(scene, objects, recursive)
            .into_iter()
            .next()
    }

    fn intersect_object<S>(
        &self,
        scene: &S,
        ray: &Ray,
        object: Uuid,
        recursive: bool,
        hits: &mut Vec<Intersection>,
    ) where
        S: SceneGraph + ?Sized,
    {
        if let Some(distance) = scene.intersect_node(object, ray)
            && (self.near..=self.far).contains(&distance)
        {
            hits.push(Intersection {
                object,
                distance,
                point: ray.at(distance),
            });
        }

        if recursive {
            for child in scene.children(object) {
                self.intersect_object(scene, ray, *child, recursive, hits);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use multiselect_core::{MeshGeometry, Scene, SceneNode, Transform};

    fn cube_at(scene: &mut Scene, name: &str, position: Vec3) -> Uuid {
        scene.add(
            SceneNode::with_mesh(name, MeshGeometry::cuboid(Vec3::ONE))
                .at(Transform::from_position(position)),
        )
    }

    fn camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 60.0, 1.0)
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = Scene::new();
        let far = cube_at(&mut scene, "far", Vec3::new(0.0, 0.0, -3.0));
        let near = cube_at(&mut scene, "near", Vec3::ZERO);

        let mut raycaster = Raycaster::new();
        raycaster.set_from_camera(&camera());

        let hit = raycaster.intersect_first(&scene, &[far, near], false).unwrap();
        assert_eq!(hit.object, near);
        assert_relative_eq!(hit.distance, 9.5, epsilon = 1e-3);
        assert!(hit.point.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-3));
    }

    #[test]
    fn test_all_hits_when_not_first_only() {
        let mut scene = Scene::new();
        let a = cube_at(&mut scene, "a", Vec3::ZERO);
        let b = cube_at(&mut scene, "b", Vec3::new(0.0, 0.0, -3.0));

        let mut raycaster = Raycaster::new();
        raycaster.first_hit_only = false;
        raycaster.set_from_camera(&camera());

        let hits = raycaster.intersect_objects(&scene, &[b, a], false);
        let order: Vec<Uuid> = hits.iter().map(|h| h.object).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_recursive_reaches_children() {
        let mut scene = Scene::new();
        let group = scene.add(SceneNode::new("group"));
        let child = scene.add_child(
            group,
            SceneNode::with_mesh("child", MeshGeometry::cuboid(Vec3::ONE)),
        );

        let mut raycaster = Raycaster::new();
        raycaster.set_from_camera(&camera());

        assert!(raycaster.intersect_first(&scene, &[group], false).is_none());
        let hit = raycaster.intersect_first(&scene, &[group], true).unwrap();
        assert_eq!(hit.object, child);
    }

    #[test]
    fn test_far_limit_discards_hits() {
        let mut scene = Scene::new();
        let cube = cube_at(&mut scene, "cube", Vec3::ZERO);

        let mut raycaster = Raycaster::new();
        raycaster.far = 5.0;
        raycaster.set_from_camera(&camera());

        assert!(raycaster.intersect_first(&scene, &[cube], false).is_none());
    }

    #[test]
    fn test_limits_are_measured_from_camera() {
        let mut scene = Scene::new();
        let cube = cube_at(&mut scene, "cube", Vec3::ZERO);

        // The front face sits 9.5 from the eye
        let mut raycaster = Raycaster::new();
        raycaster.set_from_camera(&camera());

        raycaster.far = 9.45;
        assert!(raycaster.intersect_first(&scene, &[cube], false).is_none());

        raycaster.far = 9.55;
        assert!(raycaster.intersect_first(&scene, &[cube], false).is_some());

        raycaster.near = 9.52;
        assert!(raycaster.intersect_first(&scene, &[cube], false).is_none());
    }

    #[test]
    fn test_no_ray_no_hits() {
        let mut scene = Scene::new();
        let cube = cube_at(&mut scene, "cube", Vec3::ZERO);
        assert!(Raycaster::new().intersect_objects(&scene, &[cube], false).is_empty());
    }
}
