//! Scene graph capability and a reference in-memory implementation.
//!
//! Selection controls only ever talk to a scene through [`SceneGraph`], so a
//! host engine can plug its own hierarchy in. [`Scene`] is a small
//! self-contained implementation used by tests and headless hosts.

mod node;

pub use node::*;

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use uuid::Uuid;

use crate::ray::Ray;
use crate::transform::Transform;

/// The narrow scene-graph interface the selection controls depend on
pub trait SceneGraph {
    /// Returns true if the scene contains a node with the given ID.
    fn contains(&self, id: Uuid) -> bool;

    /// Transform relative to the parent node.
    fn local_transform(&self, id: Uuid) -> Option<Transform>;

    /// Overwrite the transform relative to the parent node.
    fn set_local_transform(&mut self, id: Uuid, transform: Transform);

    fn parent(&self, id: Uuid) -> Option<Uuid>;

    fn children(&self, id: Uuid) -> &[Uuid];

    /// Full world matrix, composed from the root down.
    fn world_matrix(&self, id: Uuid) -> Option<Mat4>;

    fn world_position(&self, id: Uuid) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.w_axis.truncate())
    }

    /// Distance along `ray` to this node's own geometry (descendants excluded).
    fn intersect_node(&self, id: Uuid, ray: &Ray) -> Option<f32>;

    /// Pre-multiply the node's local transform by `matrix`.
    fn apply_matrix(&mut self, id: Uuid, matrix: Mat4) {
        if let Some(mut transform) = self.local_transform(id) {
            transform.apply_matrix(matrix);
            self.set_local_transform(id, transform);
        }
    }

    /// Refresh any cached local matrix for the node.
    fn update_local_matrix(&mut self, _id: Uuid) {}

    /// Refresh any cached world matrix for the node and its descendants.
    fn update_world_matrix(&mut self, _id: Uuid) {}
}

/// In-memory scene hierarchy
#[derive(Debug, Default)]
pub struct Scene {
    nodes: HashMap<Uuid, SceneNode>,
    roots: Vec<Uuid>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at the root of the hierarchy
    pub fn add(&mut self, mut node: SceneNode) -> Uuid {
        let id = node.id;
        node.parent = None;
        self.roots.push(id);
        self.nodes.insert(id, node);
        self.update_world_matrix(id);
        id
    }

    /// Add a node under `parent`; falls back to the root if the parent is unknown
    pub fn add_child(&mut self, parent: Uuid, mut node: SceneNode) -> Uuid {
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            tracing::warn!("Parent {} not found, adding {} at root", parent, node.name);
            return self.add(node);
        };
        let id = node.id;
        parent_node.children.push(id);
        node.parent = Some(parent);
        self.nodes.insert(id, node);
        self.update_world_matrix(id);
        id
    }

    pub fn node(&self, id: Uuid) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: Uuid) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Remove a node together with its descendants
    pub fn remove(&mut self, id: Uuid) -> Option<SceneNode> {
        let node = self.nodes.remove(&id)?;
        self.unlink(id, node.parent);
        for child in &node.children {
            self.remove(*child);
        }
        Some(node)
    }

    /// Move `id` under `new_parent` (or to the root) keeping its world transform
    pub fn attach(&mut self, id: Uuid, new_parent: Option<Uuid>) {
        let Some(world) = self.world_matrix(id) else {
            return;
        };
        if let Some(parent) = new_parent
            && (parent == id || self.is_ancestor(id, parent))
        {
            tracing::warn!("Refusing to attach {} below its own descendant", id);
            return;
        }

        let parent_world = new_parent
            .and_then(|p| self.world_matrix(p))
            .unwrap_or(Mat4::IDENTITY);

        let old_parent = self.nodes.get(&id).and_then(|n| n.parent);
        self.unlink(id, old_parent);

        let new_parent = new_parent.filter(|p| self.nodes.contains_key(p));
        match new_parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }

        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = new_parent;
            node.transform = Transform::from_mat4(parent_world.inverse() * world);
        }
        self.update_world_matrix(id);
    }

    /// Root node IDs in insertion order
    pub fn roots(&self) -> &[Uuid] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Refresh cached matrices for the whole hierarchy
    pub fn update_world_matrices(&mut self) {
        for root in self.roots.clone() {
            self.update_world_matrix(root);
        }
    }

    fn is_ancestor(&self, ancestor: Uuid, id: Uuid) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    fn unlink(&mut self, id: Uuid, parent: Option<Uuid>) {
        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => parent_node.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
    }
}

impl SceneGraph for Scene {
    fn contains(&self, id: Uuid) -> bool {
        self.nodes.contains_key(&id)
    }

    fn local_transform(&self, id: Uuid) -> Option<Transform> {
        self.nodes.get(&id).map(|n| n.transform)
    }

    fn set_local_transform(&mut self, id: Uuid, transform: Transform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.transform = transform;
        }
    }

    fn parent(&self, id: Uuid) -> Option<Uuid> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    fn children(&self, id: Uuid) -> &[Uuid] {
        self.nodes.get(&id).map(|n| n.children()).unwrap_or(&[])
    }

    fn world_matrix(&self, id: Uuid) -> Option<Mat4> {
        let node = self.nodes.get(&id)?;
        let mut transform = node.transform.to_mat4();
        let mut current = node.parent;

        // Walk up to the root, composing parent transforms on the left
        while let Some(parent_id) = current {
            let Some(parent) = self.nodes.get(&parent_id) else {
                break;
            };
            transform = parent.transform.to_mat4() * transform;
            current = parent.parent;
        }

        Some(transform)
    }

    fn intersect_node(&self, id: Uuid, ray: &Ray) -> Option<f32> {
        let mesh = self.nodes.get(&id)?.mesh.as_ref()?;
        mesh.intersect(ray, self.world_matrix(id)?)
    }

    fn update_local_matrix(&mut self, id: Uuid) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.matrix = node.transform.to_mat4();
        }
    }

    fn update_world_matrix(&mut self, id: Uuid) {
        let Some(world) = self.world_matrix(id) else {
            return;
        };
        let children = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.matrix = node.transform.to_mat4();
                node.matrix_world = world;
                node.children.clone()
            }
            None => return,
        };
        for child in children {
            self.update_world_matrix(child);
        }
    }
}
