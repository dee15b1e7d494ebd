//=========================================================================
// Dash Runner Library Root
//
// A side-scrolling runner and the small fixed-tick engine core it runs
// on.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the core host services the game consumes (input, scenes,
//   timers, physics, labels, audio cues, persistence)
// - Keep the OS layer (`platform`) hidden from users
//
// Typical usage:
// ```no_run
// use dash_runner::game::{self, GameAction, GameConfig, Screen};
// use dash_runner::EngineBuilder;
//
// let config = GameConfig::default();
// EngineBuilder::<Screen, GameAction>::new()
//     .build()
//     .init(|systems, _context| game::register(systems, &config))
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every engine system that runs on the logic thread.
// `game` is the runner built on top of it.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the winit event loop. `engine` wires the
// platform and core threads together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
