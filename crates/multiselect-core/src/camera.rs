//! Camera projection and pointer-to-ray unprojection

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::ray::Ray;

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        /// Half of the visible height in world units
        half_height: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    fn to_mat4(self) -> Mat4 {
        match self {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y, aspect, near, far),
            Projection::Orthographic {
                half_height,
                aspect,
                near,
                far,
            } => {
                let half_width = half_height * aspect;
                Mat4::orthographic_rh(-half_width, half_width, -half_height, half_height, near, far)
            }
        }
    }
}

/// A look-at camera.
///
/// Normalized device coordinates follow the usual convention: x and y in
/// `[-1, 1]` with +y up, depth in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

impl Camera {
    pub fn perspective(eye: Vec3, target: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            projection: Projection::Perspective {
                fov_y: fov_y_degrees.to_radians(),
                aspect,
                near: 0.1,
                far: 1000.0,
            },
        }
    }

    pub fn orthographic(eye: Vec3, target: Vec3, half_height: f32, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            projection: Projection::Orthographic {
                half_height,
                aspect,
                near: 0.1,
                far: 1000.0,
            },
        }
    }

    /// Update the aspect ratio, e.g. after the surface was resized
    pub fn set_aspect(&mut self, new_aspect: f32) {
        match &mut self.projection {
            Projection::Perspective { aspect, .. } | Projection::Orthographic { aspect, .. } => {
                *aspect = new_aspect;
            }
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.to_mat4()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Build a world-space ray through the given NDC point.
    ///
    /// Perspective rays start at the eye, so hit distances are measured from
    /// the camera position. Orthographic rays start on the near plane.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv_view_proj = self.view_projection().inverse();

        let far = inv_view_proj * ndc.extend(1.0).extend(1.0);
        let far = far.xyz() / far.w;

        match self.projection {
            Projection::Perspective { .. } => Ray::new(self.eye, far - self.eye),
            Projection::Orthographic { .. } => {
                let near = inv_view_proj * ndc.extend(0.0).extend(1.0);
                let near = near.xyz() / near.w;
                Ray::new(near, far - near)
            }
        }
    }

    /// Project a world position into NDC (x, y); None when behind the camera
    pub fn world_to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.xy() / clip.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 75.0, 1.0);
        let ray = camera.ray_from_ndc(Vec2::ZERO);

        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_perspective_rays_start_at_eye() {
        let eye = Vec3::new(1.0, 2.0, 6.0);
        let camera = Camera::perspective(eye, Vec3::ZERO, 60.0, 1.5);

        for ndc in [Vec2::new(-0.8, 0.3), Vec2::new(0.5, -0.9)] {
            assert_eq!(camera.ray_from_ndc(ndc).origin, eye);
        }
    }

    #[test]
    fn test_projection_and_unprojection_agree() {
        let camera = Camera::perspective(Vec3::new(0.0, 2.0, 8.0), Vec3::ZERO, 60.0, 1.5);
        let point = Vec3::new(2.0, 0.5, -1.0);

        let ndc = camera.world_to_ndc(point).unwrap();
        let ray = camera.ray_from_ndc(ndc);

        let to_point = (point - ray.origin).normalize();
        assert!(to_point.abs_diff_eq(ray.direction, 1e-4));
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let camera = Camera::orthographic(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 5.0, 1.0);
        let a = camera.ray_from_ndc(Vec2::new(-0.5, 0.5));
        let b = camera.ray_from_ndc(Vec2::new(0.5, -0.5));

        assert!(a.direction.abs_diff_eq(b.direction, 1e-5));
        assert!(!a.origin.abs_diff_eq(b.origin, 1e-3));
    }

    #[test]
    fn test_point_behind_camera_does_not_project() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 75.0, 1.0);
        assert!(camera.world_to_ndc(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }
}
