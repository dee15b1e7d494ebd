//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container handed to the active scene.
//
// Contains state data that scenes read/write:
// - input_state: held / pressed / released keys
// - message_bus: actions, transitions, context requests
// - clock: fixed-step frame time
// - labels / audio: presentation requests
// - store: persisted counters
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::audio::AudioQueue;
use crate::core::input::{Action, Held, Pressed, StateTracker};
use crate::core::labels::LabelBoard;
use crate::core::message_bus::MessageBus;
use crate::core::store::{KeyValueStore, MemoryStore};

//=== FrameClock ==========================================================

/// Simulation time as seen by scenes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    /// Length of the current tick.
    pub delta: Duration,
    /// Total simulated time.
    pub elapsed: Duration,
    /// Ticks run so far, this one included.
    pub tick: u64,
}

impl FrameClock {
    pub(crate) fn advance(&mut self, dt: Duration) {
        self.delta = dt;
        self.elapsed += dt;
        self.tick += 1;
    }
}

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// This is the only state scenes share; there are no process globals.
pub struct GlobalContext {
    /// Raw key state for this frame.
    pub input_state: StateTracker,

    /// Per-frame typed messages.
    pub message_bus: MessageBus,

    /// Fixed-step time.
    pub clock: FrameClock,

    /// Text shown to the player.
    pub labels: LabelBoard,

    /// Sound cues requested this tick.
    pub audio: AudioQueue,

    /// Persisted counters.
    pub store: Box<dyn KeyValueStore>,

    exit_requested: bool,
}

impl GlobalContext {
    /// Creates a context backed by an in-memory store.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Creates a context backed by `store`.
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        Self {
            input_state: StateTracker::new(),
            message_bus: MessageBus::new(),
            clock: FrameClock::default(),
            labels: LabelBoard::new(),
            audio: AudioQueue::new(),
            store: Box::new(store),
            exit_requested: false,
        }
    }

    /// Replaces the persistence backend.
    pub fn set_store(&mut self, store: impl KeyValueStore + 'static) {
        self.store = Box::new(store);
    }

    //--- Action Queries ---------------------------------------------------

    /// Whether `action` was pressed this frame.
    pub fn pressed<A: Action>(&self, action: A) -> bool {
        self.message_bus.read::<Pressed<A>>().contains(&Pressed(action))
    }

    /// Whether `action` is held this frame.
    pub fn held<A: Action>(&self, action: A) -> bool {
        self.message_bus.read::<Held<A>>().contains(&Held(action))
    }

    //--- Shutdown ---------------------------------------------------------

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
