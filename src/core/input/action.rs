//=========================================================================
// Action Trait & Input Context
//=========================================================================
//
// Game-defined action trait and input context system.
//
// Actions: Opaque identifiers routed by the engine, interpreted by the game.
// Contexts: Different bindings for different screens (menu vs gameplay).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// Actions represent high-level commands (Start, Jump, Quit) mapped from
/// raw keys. The engine routes actions without interpreting them.
///
/// # Example
///
/// ```
/// use dash_runner::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Confirm, Back }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== Action Messages =====================================================

/// Published once for every action whose key went down this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pressed<A: Action>(pub A);

/// Published every frame for every action whose key is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Held<A: Action>(pub A);

//=== InputContext ========================================================

/// Identifies which set of input bindings are currently active.
///
/// Enables the same key to trigger different actions based on screen.
/// Space = Start on the menus, Space = Jump while running.
///
/// Scenes switch contexts by pushing an `InputContext` onto the message
/// bus; the input system applies it after the scene update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    /// Default context for gameplay.
    #[default]
    Primary,

    /// User-defined context (menus, overlays).
    Custom(u32),
}

impl InputContext {
    /// Creates a custom context.
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Jump,
        Start,
    }

    impl Action for TestAction {}

    #[test]
    fn input_context_primary_default() {
        assert_eq!(InputContext::default(), InputContext::Primary);
    }

    #[test]
    fn input_context_primary_vs_custom_zero() {
        assert_ne!(InputContext::Primary, InputContext::custom(0));
    }

    #[test]
    fn input_context_custom_is_const() {
        const MENU: InputContext = InputContext::custom(0);
        const OVERLAY: InputContext = InputContext::custom(1);
        assert_ne!(MENU, OVERLAY);
    }

    #[test]
    fn pressed_and_held_wrap_the_action() {
        let pressed = Pressed(TestAction::Start);
        let held = Held(TestAction::Jump);
        assert_eq!(pressed.0, TestAction::Start);
        assert_eq!(held.0, TestAction::Jump);
    }

    #[test]
    fn actions_deduplicate_in_sets() {
        let mut set = HashSet::new();
        set.insert(TestAction::Jump);
        set.insert(TestAction::Jump);
        set.insert(TestAction::Start);
        assert_eq!(set.len(), 2);
    }
}
