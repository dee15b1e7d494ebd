//=========================================================================
// Input Event Types
//
// Engine-side representation of keyboard input.
//
// The platform layer (winit) converts OS key events into these types
// before they cross the thread boundary. The game only needs the
// keyboard, so there is no mouse or modifier state here.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / pressed / released)
//         ↓
//    Actions (Start, Jump, Quit)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Only the keys a runner game plausibly binds are listed; everything
/// else arrives as `Unidentified` and is dropped by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Arrow Keys -------------------------------------------------------

    ArrowUp,

    //--- Letters used for alternate bindings ------------------------------

    KeyQ,
    KeyR,
    KeyW,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the platform layer.
///
/// `repeat` is carried so OS auto-repeat does not register as a fresh
/// press; the state tracker already ignores a `KeyDown` for a key that is
/// held, so the flag is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode, repeat: bool },

    /// Key released.
    KeyUp { key: KeyCode },
}

impl InputEvent {
    /// Shorthand for a non-repeat key press.
    pub fn down(key: KeyCode) -> Self {
        Self::KeyDown { key, repeat: false }
    }

    /// Shorthand for a key release.
    pub fn up(key: KeyCode) -> Self {
        Self::KeyUp { key }
    }

    /// The key this event refers to.
    pub fn key(&self) -> KeyCode {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key } => *key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
