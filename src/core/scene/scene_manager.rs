//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, the active scene, and lifecycle.
//
// Scenes are stored in a HashMap by key. Exactly one key is active once
// `start` has run; transitions requested on the message bus are applied
// at the tick boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;

//=== Scene Transition ====================================================

/// Scene change request, pushed onto the message bus by scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Leaves the active scene and enters `K`. Switching to the active
    /// scene exits and re-enters it.
    Switch(K),

    /// Asks the engine to shut down after this tick.
    Exit,
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Owns every scene and drives the active one.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    initial: Option<S>,
    active: Option<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            initial: None,
            active: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene with the manager.
    ///
    /// ```rust
    /// # use dash_runner::prelude::*;
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// # enum Screen { Main }
    /// # impl SceneKey for Screen {}
    /// # struct MainScreen;
    /// # impl Scene<Screen> for MainScreen {
    /// #     fn update(&mut self, _ctx: &mut GlobalContext) {}
    /// # }
    /// let mut manager = SceneManager::new();
    /// manager.register_scene(Screen::Main, MainScreen);
    /// ```
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and marks it as the one entered by [`start`].
    ///
    /// [`start`]: Self::start
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);
        if let Some(previous) = self.initial.replace(key) {
            warn!(target: "scene", "Default scene {:?} replaced by {:?}", previous, key);
        }
        debug!(target: "scene", "Registered scene {:?} as default", key);
    }

    /// Enters the default scene.
    pub fn start(&mut self, context: &mut GlobalContext) {
        let Some(initial) = self.initial else {
            warn!(target: "scene", "No default scene registered");
            return;
        };

        match self.scenes.get_mut(&initial) {
            Some(scene) => {
                info!(target: "scene", "Starting with scene {:?}", initial);
                self.active = Some(initial);
                scene.on_enter(context);
            }
            None => warn!(target: "scene", "Initial scene {:?} not registered", initial),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates the active scene.
    pub fn update(&mut self, context: &mut GlobalContext) {
        let Some(key) = self.active else {
            return;
        };
        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.update(context);
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies every queued [`SceneTransition`] in FIFO order.
    ///
    /// Called at the tick boundary after the scene update.
    pub fn process_transitions(&mut self, context: &mut GlobalContext) {
        for transition in context.message_bus.drain::<SceneTransition<S>>() {
            match transition {
                SceneTransition::Switch(key) => self.switch_internal(key, context),
                SceneTransition::Exit => {
                    info!(target: "scene", "Exit requested");
                    context.request_exit();
                }
            }
        }
    }

    //--- Query Methods ----------------------------------------------------

    /// Key of the active scene.
    pub fn active(&self) -> Option<S> {
        self.active
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Internal Helpers -------------------------------------------------

    fn switch_internal(&mut self, key: S, context: &mut GlobalContext) {
        if !self.scenes.contains_key(&key) {
            warn!(target: "scene", "Attempted to switch to unregistered scene {:?}", key);
            return;
        }

        if let Some(old) = self.active.take() {
            if let Some(scene) = self.scenes.get_mut(&old) {
                scene.on_exit(context);
            }
            info!(target: "scene", "Switching scene {:?} -> {:?}", old, key);
        }

        self.active = Some(key);
        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_enter(context);
        }
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
