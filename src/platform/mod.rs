//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputProcessor          │    │  InputSystem     │
//  │   └─ Converts Winit keys │    │  ↓               │
//  │   ↓                      │    │  Scenes          │
//  │  pending: Vec<InputEvent>│    │  ↓               │
//  │   ↓                      │    │  LabelBoard      │
//  │  RedrawRequested (flush) │    │                  │
//  │   ↓                      │    │                  │
//  │  PlatformEvent ──────────┼───→│                  │
//  │                          │    │                  │
//  │  set_title / exit ←──────┼────│  CoreEvent       │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all buffered keys are sent as
//   one batch, in arrival order
// - **Graceful channel disconnect**: if the core thread dies, the
//   platform logs a warning and keeps the window closable
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::event::InputEvent;
use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

/// Window title and logical size, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Dash Runner".to_string(),
            width: 800,
            height: 500,
        }
    }
}

//=== Platform ============================================================

/// Window manager and keyboard event aggregator.
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
/// Communication with the core thread occurs exclusively via channels.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    settings: WindowSettings,

    /// Key events since the last frame boundary.
    pending: Vec<InputEvent>,

    /// Channel to the core thread.
    event_sender: Sender<PlatformEvent>,

    /// Presentation updates from the core thread.
    core_receiver: Receiver<CoreEvent>,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub fn new(
        event_sender: Sender<PlatformEvent>,
        core_receiver: Receiver<CoreEvent>,
        settings: WindowSettings,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            pending: Vec::with_capacity(16),
            event_sender,
            core_receiver,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or core shuts down.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered key events to the core thread as one batch.
    ///
    /// If the channel is disconnected (core thread exited or panicked),
    /// logs a warning and drops the events so the window stays usable.
    fn flush_input_buffer(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.pending);
        let count = batch.len();
        trace!(target: "platform::input", "Flushing {} key events", count);

        if self.event_sender.send(PlatformEvent::Inputs(batch)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
        }
    }

    /// Applies every pending core update. Returns `true` on shutdown.
    fn apply_core_events(&mut self) -> bool {
        while let Ok(event) = self.core_receiver.try_recv() {
            match event {
                CoreEvent::Title(title) => {
                    let title = if title.is_empty() { self.settings.title.clone() } else { title };
                    if let Some(window) = &self.window {
                        window.set_title(&title);
                    }
                    debug!(target: "platform", "Title: {}", title);
                }
                CoreEvent::Shutdown => {
                    info!(target: "platform", "Core requested shutdown");
                    return true;
                }
            }
        }
        false
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.pending.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform::input", "Focus lost");
                self.pending.clear();
                let _ = self.event_sender.send(PlatformEvent::FocusLost);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    /// Drains presentation updates once the OS queue is empty.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.apply_core_events() {
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
