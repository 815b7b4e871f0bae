//=========================================================================
// Host Bridge
//=========================================================================
//
// Connects a host (window + widgets, or a headless script) to the logic
// thread. The host only ever sends `HostCommand`s and reads `HostEvent`s;
// it never touches session state directly.
//
// Components:
// - `interface`: command and event types (the contract)
// - `command_collector`: logic-side draining of pending commands
//
//=========================================================================

//=== Module Declarations =================================================

mod command_collector;
mod interface;

//=== Public API ==========================================================

pub use command_collector::{CommandCollector, TickControl};
pub use interface::{HostCommand, HostEvent};
