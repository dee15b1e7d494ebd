//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps keys to game actions based on configured bindings and context.
//
// Architecture:
//   (key, context) → HashMap → Action
//
// Only bindings in the active context resolve to actions. Several keys
// may map to the same action (Space and ArrowUp both jump).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, InputContext},
    event::KeyCode,
};

//=== ActionMapper ========================================================

/// Maps keys to actions via (key, context) lookups.
pub(crate) struct ActionMapper<A: Action> {
    /// Key bindings: (key, context) → action
    key_bindings: HashMap<(KeyCode, InputContext), A>,

    /// Currently active input context
    current_context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a new mapper with Primary context active and no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            current_context: InputContext::Primary,
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action in a context, replacing any previous binding.
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        self.key_bindings.insert((key, context), action);
    }

    /// Removes a key binding.
    pub(crate) fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.key_bindings.remove(&(key, context));
    }

    /// Clears all bindings for a context.
    pub(crate) fn clear_context(&mut self, context: InputContext) {
        self.key_bindings.retain(|&(_, ctx), _| ctx != context);
    }

    //--- Mapping ----------------------------------------------------------

    /// Maps a key to an action in the active context.
    pub(crate) fn map_key(&self, key: KeyCode) -> Option<A> {
        self.key_bindings.get(&(key, self.current_context)).copied()
    }

    /// Sets the active input context.
    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    /// Returns the current active context.
    pub(crate) fn current_context(&self) -> InputContext {
        self.current_context
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
