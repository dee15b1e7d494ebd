//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform ↔ core interface types (events and errors).
//
// Defines the contract for communication between platform and core
// threads. Input flows platform → core; presentation flows core →
// platform.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Keyboard events gathered since the last frame boundary.
    Inputs(Vec<InputEvent>),

    /// The window lost keyboard focus; key releases may go missing.
    FocusLost,

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Presentation updates sent from core to platform.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoreEvent {
    /// New window title (the composed text labels).
    Title(String),

    /// The core loop has stopped; close the window.
    Shutdown,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_display_format() {
        let err = PlatformError::EventLoopCreation("no display".into());
        assert_eq!(err.to_string(), "Event loop creation failed: no display");

        let err = PlatformError::EventLoopExecution("lost".into());
        assert_eq!(err.to_string(), "Event loop error: lost");
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
