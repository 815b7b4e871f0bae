//=========================================================================
// Event Bus
//=========================================================================
//
// Decoupled notifications between world objects and state machines.
//
// Terminals publish "objective activated" without knowing who listens;
// the outcome machine subscribes while it is enabled and unsubscribes
// when disabled.
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;

//=== Public API ==========================================================

pub use bus::{EventBus, Handler, SubscriptionId};
