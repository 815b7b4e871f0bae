//=========================================================================
// Outpost Runtime — Library Root
//
// Runtime control layer for a small first-person objective scene.
//
// Responsibilities:
// - Track the game outcome (Playing / Victory / Loss) against a countdown
// - Drive UI navigation (main menu, gameplay, pause, options, loading)
// - Couple world objects to objectives through a synchronous event bus
// - Run timed, non-blocking sequences on a fixed-rate logic thread
//
// Rendering, physics, input polling and real asset loading belong to the
// host; it talks to the runtime through `HostCommand` / `HostEvent`.
//
// Typical usage:
// ```no_run
// use outpost_runtime::prelude::*;
//
// let handle = RuntimeBuilder::new().build().spawn();
// handle.send(HostCommand::PlayClicked).unwrap();
// handle.shutdown().unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the state machines, the event bus, the sequencer and the
// session that ties them together. It is public so hosts can drive a
// `Session` directly (e.g. in tests) without the logic thread.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the runtime entry point and the host handle.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Runtime, RuntimeBuilder, RuntimeHandle};
