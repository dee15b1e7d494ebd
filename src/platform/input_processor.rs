//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard events into engine InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (engine type) → buffer
//
// Unmapped keys (everything the game never binds) are filtered (returns
// None) so they never cross the thread boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Stateless converter from Winit key events to engine events.
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Converts a Winit KeyEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.convert(key_event.physical_key, key_event.state, key_event.repeat)
    }

    //--- Internal Helpers -------------------------------------------------

    fn convert(&self, physical: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        let key = match physical {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, repeat },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Unbound keys return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,

            //--- Letters ------------------------------------------------------

            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyW => KeyCode::KeyW,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
