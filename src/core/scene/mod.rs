//=========================================================================
// Scene System
//=========================================================================
//
// One active scene at a time, switched through messages on the bus.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S>>>
//     └─ active: Option<S>
//
// Flow:
//   update() → active Scene::update()
//   process_transitions() → on_exit(old) → on_enter(new)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod scene_manager;

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager, SceneTransition};

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// Scenes are registered once in the [`SceneManager`] and keep their own
/// state between activations. Anything that must not survive a switch is
/// built in `on_enter` and dropped in `on_exit`.
///
/// # Minimal Implementation
///
/// Only `update()` is required:
///
/// ```rust
/// # use dash_runner::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Main }
/// # impl SceneKey for Screen {}
/// struct MainScreen;
///
/// impl Scene<Screen> for MainScreen {
///     fn update(&mut self, context: &mut GlobalContext) {
///         // Only this method is required
///     }
/// }
/// ```
pub trait Scene<S: SceneKey>: Send {
    /// Called when the scene becomes active.
    fn on_enter(&mut self, _context: &mut GlobalContext) {}

    /// Called when another scene replaces this one.
    fn on_exit(&mut self, _context: &mut GlobalContext) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, context: &mut GlobalContext);
}
