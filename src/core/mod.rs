//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Central coordinator for every engine subsystem running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own GlobalSystems and GlobalContext (all game state lives here)
// - Receive platform events through the bridge
// - Step the simulation at a fixed tick rate (TPS)
// - Send presentation updates (window title) back to the platform
//
// Notes:
// The orchestrator runs independently from the platform layer. The two
// threads only exchange messages, so nothing in the game is shared or
// locked.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod animation;
pub mod audio;
pub mod globals;
pub mod input;
pub mod labels;
pub mod message_bus;
pub mod physics;
pub(crate) mod platform_bridge;
pub mod scene;
pub mod store;
pub mod timer;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};
pub use input::Action;
pub use scene::SceneKey;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use platform_bridge::{CoreEvent, EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

/// Owns the game state and drives it from the core thread.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey, A: Action> {
    systems: GlobalSystems<S, A>,
    context: GlobalContext,
}

impl<S: SceneKey, A: Action> CoreSystemsOrchestrator<S, A> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(),
        }
    }

    /// Gives the game one chance to bind keys, register scenes, and
    /// install its store before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S, A>, &mut GlobalContext),
    {
        init_fn(&mut self.systems, &mut self.context);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects input events from the platform
    //  2. Runs GlobalSystems for one fixed step
    //  3. Publishes label changes and audio cues
    //  4. Sleeps to maintain fixed pacing
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        sender: Sender<CoreEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let Self { mut systems, mut context } = self;
            let mut collector = EventCollector::new(receiver);

            systems.start(&mut context);
            Self::publish(&mut context, &sender);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "core", "Platform closed, core thread exiting");
                    break;
                }

                if collector.focus_lost() {
                    context.input_state.release_all();
                }

                //--- Step 2: Update systems --------------------------------
                systems.update(&mut context, collector.batches(), frame_duration);

                //--- Step 3: Presentation ----------------------------------
                Self::publish(&mut context, &sender);

                if context.exit_requested() {
                    info!(target: "core", "Exit requested, core thread exiting");
                    break;
                }

                //--- Step 4: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    trace!(target: "core", "Tick overran by {:?}", elapsed - frame_duration);
                }
            }

            // Platform may already be gone; nothing to do if so.
            let _ = sender.send(CoreEvent::Shutdown);
        })
    }

    //--- publish() --------------------------------------------------------
    //
    // Forwards changed labels as the window title and logs requested
    // cues. A full channel drops the title; the next change resends it.
    //
    fn publish(context: &mut GlobalContext, sender: &Sender<CoreEvent>) {
        for cue in context.audio.drain() {
            info!(target: "audio", "Cue {:?}", cue);
        }

        if let Some(title) = context.labels.take_changed() {
            debug!(target: "core", "Title -> {:?}", title);
            match sender.try_send(CoreEvent::Title(title)) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(target: "core", "Presentation channel full, title update dropped")
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
