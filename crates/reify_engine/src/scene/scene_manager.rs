//! # Scene Stack
//!
//! Owns the scenes of an application as a stack. Only the top `depth`
//! scenes are driven each frame, which lets a pause menu sit over a frozen
//! game scene (`depth == 1`) or a HUD scene run alongside it (`depth == 2`).
//! Within the driven window scenes are updated bottom to top.
//!
//! Popped or replaced scenes are handed back undisposed; the caller decides
//! whether to dispose them or push them again later.

use super::{Scene, SceneError};

/// Errors returned by stack operations
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStackError {
    /// The stack has no scene to remove
    #[error("Scene stack is empty")]
    Underflow,
}

/// Stack of scenes with a configurable number of active scenes
#[derive(Debug)]
pub struct SceneStack {
    scenes: Vec<Scene>,
    depth: usize,
}

impl SceneStack {
    /// Empty stack driving only its top scene
    pub fn new() -> Self {
        Self::with_depth(1)
    }

    /// Empty stack driving its top `depth` scenes
    pub fn with_depth(depth: usize) -> Self {
        Self {
            scenes: Vec::new(),
            depth,
        }
    }

    /// Number of top scenes driven per frame
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Change how many top scenes are driven per frame
    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Push a scene on top
    pub fn push(&mut self, scene: Scene) {
        log::info!("Pushed scene '{}' (stack size {})", scene.name(), self.scenes.len() + 1);
        self.scenes.push(scene);
    }

    /// Remove and return the top scene
    pub fn pop(&mut self) -> Result<Scene, SceneStackError> {
        let scene = self.scenes.pop().ok_or(SceneStackError::Underflow)?;
        log::info!("Popped scene '{}' (stack size {})", scene.name(), self.scenes.len());
        Ok(scene)
    }

    /// Swap the top scene for `scene`, returning the old top
    ///
    /// On an empty stack nothing is pushed and `scene` is dropped.
    pub fn replace(&mut self, scene: Scene) -> Result<Scene, SceneStackError> {
        let previous = self.pop()?;
        self.push(scene);
        Ok(previous)
    }

    /// Top scene
    pub fn top(&self) -> Option<&Scene> {
        self.scenes.last()
    }

    /// Top scene, mutably
    pub fn top_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.last_mut()
    }

    /// Scene at `index` from the bottom
    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Number of scenes on the stack
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Drive the active scenes by one frame
    ///
    /// A failing scene does not stop the scenes above it from being driven;
    /// the first failure is returned.
    pub fn update(&mut self, delta_time: f32) -> Result<(), SceneError> {
        let mut first_error = None;
        for scene in self.active_mut() {
            if let Err(error) = scene.update(delta_time) {
                log::error!("Failed to update scene '{}': {}", scene.name(), error);
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Forward a screen resize to the active scenes
    pub fn resize(&mut self, width: f32, height: f32) {
        for scene in self.active_mut() {
            scene.resize(width, height);
        }
    }

    /// Pop and dispose every scene, top first
    ///
    /// Every scene is disposed even if an earlier one fails; the first
    /// failure is returned.
    pub fn dispose_all(&mut self) -> Result<(), SceneError> {
        let mut first_error = None;
        while let Some(mut scene) = self.scenes.pop() {
            if let Err(error) = scene.dispose() {
                log::error!("Failed to dispose scene '{}': {}", scene.name(), error);
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn active_mut(&mut self) -> &mut [Scene] {
        let start = self.scenes.len().saturating_sub(self.depth);
        &mut self.scenes[start..]
    }
}

impl Default for SceneStack {
    fn default() -> Self {
        Self::new()
    }
}
