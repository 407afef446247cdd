//! Rays and the intersection tests used for picking

use glam::{Mat4, Vec3};

/// A half-line with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all points, or None for an empty slice
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = Vec3::from(*first);
        let mut max = min;
        for p in rest {
            min = min.min(Vec3::from(*p));
            max = max.max(Vec3::from(*p));
        }
        Some(Self { min, max })
    }

    /// World-space AABB of this box after `transform` (approximated with corners)
    pub fn transformed(&self, transform: Mat4) -> Self {
        let (lo, hi) = (self.min, self.max);
        let corners = [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ];

        let first = transform.transform_point3(corners[0]);
        let (mut min, mut max) = (first, first);
        for corner in &corners[1..] {
            let p = transform.transform_point3(*corner);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection test (slab method)
/// Returns the distance to intersection if hit, None otherwise
pub fn ray_aabb_intersection(ray: &Ray, bbox: &BoundingBox) -> Option<f32> {
    let inv_dir = ray.direction.recip();

    let t1 = (bbox.min - ray.origin) * inv_dir;
    let t2 = (bbox.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Ray-triangle intersection using Möller–Trumbore algorithm
/// Returns the distance to intersection if hit, None otherwise
pub fn ray_triangle_intersection(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    if a.abs() < EPSILON {
        return None; // Ray is parallel to triangle
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    if t > EPSILON { Some(t) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_hits_box_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let bbox = BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5));

        let t = ray_aabb_intersection(&ray, &bbox).unwrap();
        assert_relative_eq!(t, 4.5, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let bbox = BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5));

        assert!(ray_aabb_intersection(&ray, &bbox).is_none());
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let v0 = Vec3::new(-1.0, -1.0, 0.0);
        let v1 = Vec3::new(1.0, -1.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let hit = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
        assert_relative_eq!(
            ray_triangle_intersection(&hit, v0, v1, v2).unwrap(),
            2.0,
            epsilon = 1e-5
        );

        let miss = Ray::new(Vec3::new(3.0, 0.0, 2.0), Vec3::NEG_Z);
        assert!(ray_triangle_intersection(&miss, v0, v1, v2).is_none());
    }

    #[test]
    fn test_transformed_box_follows_translation() {
        let bbox = BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let moved = bbox.transformed(Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        assert!(moved.center().abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-6));
    }
}
