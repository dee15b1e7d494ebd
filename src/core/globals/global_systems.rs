//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains systems that process input, manage scenes, and coordinate
// game logic. Systems operate on GlobalContext data.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{Action, Held, InputContext, InputEvent, InputSystem, Pressed};
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: key bindings and action resolution
/// - `scene_manager`: scene registry and the active scene
pub struct GlobalSystems<S: SceneKey, A: Action> {
    /// The input system for action mapping and input processing.
    pub input: InputSystem<A>,

    /// The scene manager for scene lifecycle.
    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey, A: Action> GlobalSystems<S, A> {
    pub fn new() -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(),
        }
    }

    /// Enters the default scene and applies its input context.
    pub fn start(&mut self, context: &mut GlobalContext) {
        self.scene_manager.start(context);
        self.apply_context_requests(context);
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one fixed step.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Clock**: advance by `dt`
    /// 2. **Input Processing**: fold `batches` into key state and actions
    /// 3. **Action Publishing**: replace last frame's `Pressed`/`Held`
    /// 4. **Scene Update**: run the active scene
    /// 5. **Transition Processing**: apply queued scene switches
    /// 6. **Context Requests**: apply `InputContext` changes
    pub fn update(&mut self, context: &mut GlobalContext, batches: &[Vec<InputEvent>], dt: Duration) {
        // 1. Advance time
        context.clock.advance(dt);

        // 2. Process input events into state and actions
        self.input.process_frame(&mut context.input_state, batches);

        // 3. Clear previous frame's actions and publish fresh ones
        context.message_bus.clear::<Pressed<A>>();
        context.message_bus.clear::<Held<A>>();
        for action in self.input.pressed() {
            context.message_bus.push(Pressed(*action));
        }
        for action in self.input.held() {
            context.message_bus.push(Held(*action));
        }

        // 4. Update the active scene (reads actions from the bus)
        self.scene_manager.update(context);

        // 5. Process scene transitions
        self.scene_manager.process_transitions(context);

        // 6. Context switches requested by update or on_enter
        self.apply_context_requests(context);
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply_context_requests(&mut self, context: &mut GlobalContext) {
        for requested in context.message_bus.drain::<InputContext>() {
            self.input.set_context(requested);
        }
    }
}

impl<S: SceneKey, A: Action> Default for GlobalSystems<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
