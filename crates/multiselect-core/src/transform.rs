//! Local transform of a scene node

use glam::{Mat4, Quat, Vec3};

/// Position, rotation and scale of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Compose into a single matrix (translation * rotation * scale)
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Decompose an affine matrix back into position/rotation/scale
    pub fn from_mat4(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }

    /// Pre-multiply this transform by `matrix`.
    ///
    /// The result is `matrix * self`, i.e. the matrix acts in the parent's
    /// space on top of whatever this transform already does.
    pub fn apply_matrix(&mut self, matrix: Mat4) {
        *self = Self::from_mat4(matrix * self.to_mat4());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_mat4_roundtrip_keeps_components() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quat::from_rotation_y(0.5))
            .with_scale(Vec3::splat(2.0));

        let back = Transform::from_mat4(transform.to_mat4());
        assert!(back.position.abs_diff_eq(transform.position, 1e-5));
        assert!(back.rotation.abs_diff_eq(transform.rotation, 1e-5));
        assert!(back.scale.abs_diff_eq(transform.scale, 1e-5));
    }

    #[test]
    fn test_apply_matrix_orbits_position() {
        let mut transform = Transform::from_position(Vec3::X);
        transform.apply_matrix(Mat4::from_rotation_z(FRAC_PI_2));

        assert!(transform.position.abs_diff_eq(Vec3::Y, 1e-5));
        assert!(
            transform
                .rotation
                .abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2), 1e-5)
        );
    }
}
