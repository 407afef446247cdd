//! Scene node definition

use glam::Mat4;
use uuid::Uuid;

use crate::mesh::MeshGeometry;
use crate::transform::Transform;

/// A node in the scene hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: Uuid,
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<MeshGeometry>,
    pub(crate) parent: Option<Uuid>,
    pub(crate) children: Vec<Uuid>,
    /// Cached local matrix, refreshed by `Scene::update_local_matrix`
    pub(crate) matrix: Mat4,
    /// Cached world matrix, refreshed by `Scene::update_world_matrix`
    pub(crate) matrix_world: Mat4,
}

impl SceneNode {
    /// Create an empty grouping node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            parent: None,
            children: Vec::new(),
            matrix: Mat4::IDENTITY,
            matrix_world: Mat4::IDENTITY,
        }
    }

    /// Create a node carrying triangle geometry
    pub fn with_mesh(name: impl Into<String>, mesh: MeshGeometry) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::new(name)
        }
    }

    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<Uuid> {
        self.parent
    }

    pub fn children(&self) -> &[Uuid] {
        &self.children
    }

    /// Local matrix as of the last refresh
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// World matrix as of the last refresh
    pub fn matrix_world(&self) -> Mat4 {
        self.matrix_world
    }
}
