//=========================================================================
// Door
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::{InteractContext, Interactable, InteractableStatus, Interaction};
use crate::error::RuntimeError;

//=== Door ================================================================

/// Toggles between open and closed. Starts closed.
#[derive(Debug, Clone, Default)]
pub struct Door {
    open: bool,
}

impl Door {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Interactable for Door {
    fn interact(&mut self, _ctx: &mut InteractContext<'_>) -> Result<Interaction, RuntimeError> {
        self.open = !self.open;

        if self.open {
            info!("Door opened");
            Ok(Interaction::DoorOpened)
        } else {
            info!("Door closed");
            Ok(Interaction::DoorClosed)
        }
    }

    fn status(&self) -> InteractableStatus {
        InteractableStatus::Door { open: self.open }
    }
}
