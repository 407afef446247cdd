//! Selection set and group pivot bookkeeping

use glam::Vec3;
use multiselect_core::{SceneGraph, Transform};
use uuid::Uuid;

/// A selected object and its offset from the group pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedObject {
    pub id: Uuid,
    /// Local position relative to the pivot at the last recomputation
    pub offset: Vec3,
}

/// Ordered, duplicate-free set of selected objects plus the pivot proxy.
///
/// The pivot lives as long as the selection does; its position is only
/// meaningful while the set is non-empty.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    members: Vec<SelectedObject>,
    pivot: Transform,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    pub fn members(&self) -> &[SelectedObject] {
        &self.members
    }

    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.members.iter().map(|m| m.id)
    }

    pub fn pivot(&self) -> &Transform {
        &self.pivot
    }

    pub(crate) fn set_pivot(&mut self, pivot: Transform) {
        self.pivot = pivot;
    }

    /// Add an object, capturing its pre-selection local position.
    /// Returns false if it was already selected.
    pub(crate) fn insert(&mut self, id: Uuid, local_position: Vec3) -> bool {
        if self.contains(id) {
            return false;
        }
        self.members.push(SelectedObject {
            id,
            offset: local_position,
        });
        true
    }

    /// Remove an object by swapping the last member into its slot.
    /// Returns false if it was not selected.
    pub(crate) fn remove(&mut self, id: Uuid) -> bool {
        match self.members.iter().position(|m| m.id == id) {
            Some(index) => {
                self.members.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Empty the set, returning the removed IDs in selection order
    pub(crate) fn clear(&mut self) -> Vec<Uuid> {
        self.members.drain(..).map(|m| m.id).collect()
    }

    /// Move the pivot to the centroid of the members' world positions and
    /// capture each member's offset from it.
    ///
    /// Returns the centroid, or None when nothing could be measured (empty
    /// selection, or every member missing from the scene).
    pub(crate) fn recompute_pivot<S>(&mut self, scene: &S) -> Option<Vec3>
    where
        S: SceneGraph + ?Sized,
    {
        let (sum, count) = self
            .members
            .iter()
            .filter_map(|m| scene.world_position(m.id))
            .fold((Vec3::ZERO, 0u32), |(sum, count), p| (sum + p, count + 1));

        if count == 0 {
            return None;
        }
        let centroid = sum / count as f32;

        for member in &mut self.members {
            match scene.local_transform(member.id) {
                Some(local) => member.offset = local.position - centroid,
                None => tracing::warn!("Selected object {} is no longer in the scene", member.id),
            }
        }

        self.pivot.position = centroid;
        Some(centroid)
    }

    /// Re-measure offsets against the current pivot position without moving it
    pub(crate) fn recapture_offsets<S>(&mut self, scene: &S)
    where
        S: SceneGraph + ?Sized,
    {
        let pivot = self.pivot.position;
        for member in &mut self.members {
            if let Some(local) = scene.local_transform(member.id) {
                member.offset = local.position - pivot;
            }
        }
    }
}
