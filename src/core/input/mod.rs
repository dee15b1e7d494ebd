//=========================================================================
// Input System
//
// High-level interface for keyboard handling within the engine.
//
// Responsibilities:
// - Feed each frame's raw events into the `StateTracker`
// - Resolve discrete presses into `Pressed<A>` actions
// - Resolve polled key state into `Held<A>` actions
// - Own the key bindings and the active `InputContext`
//
// Notes:
// The system is owned by `GlobalSystems` and runs first in every tick;
// scenes never see raw bindings, only the actions published on the bus.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub(crate) mod action_mapper;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, Held, InputContext, Pressed};
pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;

//=== External Crates =====================================================

use log::debug;

//=== Internal Imports ====================================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Turns raw key events into game actions.
pub struct InputSystem<A: Action> {
    mapper: ActionMapper<A>,
    pressed: Vec<A>,
    held: Vec<A>,
}

impl<A: Action> InputSystem<A> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
            pressed: Vec::new(),
            held: Vec::new(),
        }
    }

    //--- Bindings ---------------------------------------------------------

    /// Binds `key` to `action` while `context` is active.
    pub fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        debug!(target: "core::input", "Bind {:?} -> {:?} in {:?}", key, action, context);
        self.mapper.bind_key(key, action, context);
    }

    /// Removes a single binding.
    pub fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.mapper.unbind_key(key, context);
    }

    /// Removes every binding of a context.
    pub fn clear_context(&mut self, context: InputContext) {
        self.mapper.clear_context(context);
    }

    /// Switches the active binding set.
    pub fn set_context(&mut self, context: InputContext) {
        if self.mapper.current_context() != context {
            debug!(target: "core::input", "Input context -> {:?}", context);
            self.mapper.set_context(context);
        }
    }

    /// Returns the active binding set.
    pub fn context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- process_frame() --------------------------------------------------
    //
    // Updates the tracker with this frame's batches, then resolves the
    // pressed and held action lists against the active context.
    //
    pub fn process_frame(&mut self, state: &mut StateTracker, batches: &[Vec<InputEvent>]) {
        state.clear();
        for batch in batches {
            state.process_events(batch);
        }

        self.pressed.clear();
        self.held.clear();

        for key in state.pressed_keys() {
            if let Some(action) = self.mapper.map_key(key) {
                if !self.pressed.contains(&action) {
                    self.pressed.push(action);
                }
            }
        }

        for key in state.held_keys() {
            if let Some(action) = self.mapper.map_key(key) {
                if !self.held.contains(&action) {
                    self.held.push(action);
                }
            }
        }
    }

    //--- Query Methods ----------------------------------------------------

    /// Actions whose key went down this frame.
    pub fn pressed(&self) -> &[A] {
        &self.pressed
    }

    /// Actions whose key is held this frame.
    pub fn held(&self) -> &[A] {
        &self.held
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
