//! Scene graph contract
//!
//! The renderer lives elsewhere. The world only needs to add a visual,
//! move it, and remove it with its geometry and materials disposed.

use crate::resources::ModelKey;
use chase_core::{Handle, HandleMap};

/// A renderable instance of a model
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub model: ModelKey,
    pub position: [f32; 3],
    pub yaw: f32,
    pub scale: f32,
}

impl Visual {
    pub fn new(model: ModelKey, position: [f32; 3]) -> Self {
        Self {
            model,
            position,
            yaw: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

pub type VisualHandle = Handle<Visual>;

/// Render-side scene
pub trait SceneGraph {
    fn add_visual(&mut self, visual: Visual) -> VisualHandle;

    /// Remove a visual and dispose of its geometry and materials.
    /// Returns false for stale handles.
    fn remove_visual(&mut self, handle: VisualHandle) -> bool;

    fn set_transform(&mut self, handle: VisualHandle, position: [f32; 3], yaw: f32) -> bool;

    fn contains(&self, handle: VisualHandle) -> bool;

    fn visual_count(&self) -> usize;
}

/// Scene with no renderer behind it
#[derive(Default)]
pub struct InMemoryScene {
    visuals: HandleMap<Visual>,
    disposed: usize,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&Visual> {
        self.visuals.get(handle)
    }

    /// Visuals removed so far
    pub fn disposed_count(&self) -> usize {
        self.disposed
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisualHandle, &Visual)> {
        self.visuals.iter()
    }
}

impl SceneGraph for InMemoryScene {
    fn add_visual(&mut self, visual: Visual) -> VisualHandle {
        self.visuals.insert(visual)
    }

    fn remove_visual(&mut self, handle: VisualHandle) -> bool {
        match self.visuals.remove(handle) {
            Some(visual) => {
                log::trace!("Disposed visual {:?}", visual.model);
                self.disposed += 1;
                true
            }
            None => false,
        }
    }

    fn set_transform(&mut self, handle: VisualHandle, position: [f32; 3], yaw: f32) -> bool {
        match self.visuals.get_mut(handle) {
            Some(visual) => {
                visual.position = position;
                visual.yaw = yaw;
                true
            }
            None => false,
        }
    }

    fn contains(&self, handle: VisualHandle) -> bool {
        self.visuals.contains(handle)
    }

    fn visual_count(&self) -> usize {
        self.visuals.len()
    }
}
