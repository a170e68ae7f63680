//! Scene/attachment collaborator
//!
//! The core never reasons about scene-graph container internals; it attaches
//! a mesh, keeps the opaque `DrawableId`, pushes transform updates through it
//! and detaches exactly once. The host's renderer reads the drawable table.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position + orientation of one drawable
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Opaque, stable handle to an attached drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableId(u32);

/// One renderable instance: a mesh name plus its world transform
#[derive(Debug, Clone)]
pub struct Drawable {
    pub mesh: &'static str,
    pub transform: Transform,
}

/// In-memory drawable registry
#[derive(Debug, Default)]
pub struct Scene {
    drawables: HashMap<DrawableId, Drawable>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a mesh, returning a stable handle for later updates/detach
    pub fn attach(&mut self, mesh: &'static str, transform: Transform) -> DrawableId {
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        self.drawables.insert(id, Drawable { mesh, transform });
        id
    }

    /// Detach a drawable. Detaching an unknown handle is a tick-ordering
    /// bug in the caller and fails loudly.
    pub fn detach(&mut self, id: DrawableId) {
        let removed = self.drawables.remove(&id);
        assert!(removed.is_some(), "detach of unknown drawable {id:?}");
    }

    /// Push a new transform for an attached drawable
    pub fn set_transform(&mut self, id: DrawableId, transform: Transform) {
        let drawable = self
            .drawables
            .get_mut(&id)
            .unwrap_or_else(|| panic!("set_transform on unknown drawable {id:?}"));
        drawable.transform = transform;
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(&id)
    }

    pub fn contains(&self, id: DrawableId) -> bool {
        self.drawables.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Iterate drawables for rendering
    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> {
        self.drawables.iter().map(|(id, d)| (*id, d))
    }
}
