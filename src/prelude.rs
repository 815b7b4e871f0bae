//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use outpost_runtime::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime entry points
pub use crate::engine::{Runtime, RuntimeBuilder, RuntimeHandle};

// Configuration and errors
pub use crate::config::RuntimeConfig;
pub use crate::error::{ConfigError, HandlerResult, RuntimeError, SceneLoadError};

// Host bridge
pub use crate::core::host_bridge::{HostCommand, HostEvent, TickControl};

// Session
pub use crate::core::session::{GameSystems, Session, SessionSnapshot};

// State machines
pub use crate::core::outcome::{
    GameOutcome, OutcomeSettings, OutcomeState, SequenceTimings, VictoryDestination,
};
pub use crate::core::ui::{CursorLock, CursorState, Panel, UiNavigation, UiSnapshot, UiStateKey};

// Event bus and sequences
pub use crate::core::event_bus::{EventBus, SubscriptionId};
pub use crate::core::sequence::{Cue, Sequence, Sequencer, Step};

// World and host capabilities
pub use crate::core::player::{PlayerControl, PlayerController};
pub use crate::core::scene_loader::{LoadTicket, SceneLoader, SimulatedSceneLoader};
pub use crate::core::world::{Interactable, InteractableStatus, Interaction, Level, LevelLayout};
