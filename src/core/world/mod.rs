//=========================================================================
// World
//=========================================================================
//
// Interactable objects placed in a level.
//
// The host resolves what the player is looking at and hands the runtime
// a name; the runtime only needs one entry point per object: interact().
//
// Architecture:
//   Level
//     └─ [(name, Box<dyn Interactable>)]   (Door | Chest | Terminal)
//
//   Terminal ──interact()──> InteractContext::publish_objective_activated
//                                 ↓
//                           objective bus → GameOutcome
//
//=========================================================================

//=== Module Declarations =================================================

mod chest;
mod door;
mod level;
mod terminal;

//=== Public API ==========================================================

pub use chest::Chest;
pub use door::Door;
pub use level::{Level, LevelLayout};
pub use terminal::{IndicatorLight, LightColor, Terminal};

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::event_bus::EventBus;
use crate::core::session::GameSystems;
use crate::error::RuntimeError;

//=== InteractContext =====================================================

/// What an interactable can reach while it is being used.
pub struct InteractContext<'a> {
    bus: &'a mut EventBus<GameSystems>,
    systems: &'a mut GameSystems,
}

impl<'a> InteractContext<'a> {
    pub fn new(bus: &'a mut EventBus<GameSystems>, systems: &'a mut GameSystems) -> Self {
        Self { bus, systems }
    }

    /// Notifies every objective subscriber, synchronously.
    pub fn publish_objective_activated(&mut self) -> Result<(), RuntimeError> {
        self.bus.publish(self.systems)
    }
}

//=== Interaction =========================================================

/// Result of a single `interact()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    DoorOpened,
    DoorClosed,
    ChestOpened,
    ChestAlreadyOpen,
    TerminalActivated,
    TerminalDeactivated,
}

//=== InteractableStatus ==================================================

/// Current state of an interactable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractableStatus {
    Door { open: bool },
    Chest { open: bool },
    Terminal { active: bool },
}

impl fmt::Display for InteractableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractableStatus::Door { open: true } => write!(f, "door (open)"),
            InteractableStatus::Door { open: false } => write!(f, "door (closed)"),
            InteractableStatus::Chest { open: true } => write!(f, "chest (open)"),
            InteractableStatus::Chest { open: false } => write!(f, "chest (closed)"),
            InteractableStatus::Terminal { active: true } => write!(f, "terminal (active)"),
            InteractableStatus::Terminal { active: false } => write!(f, "terminal (inactive)"),
        }
    }
}

//=== Interactable Trait ==================================================

/// Anything the player can use.
pub trait Interactable: Send {
    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> Result<Interaction, RuntimeError>;

    fn status(&self) -> InteractableStatus;
}
