//=========================================================================
// Chest
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{InteractContext, Interactable, InteractableStatus, Interaction};
use crate::error::RuntimeError;

//=== Chest ===============================================================

/// Opens once; later interactions do nothing.
#[derive(Debug, Clone, Default)]
pub struct Chest {
    open: bool,
}

impl Chest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Interactable for Chest {
    fn interact(&mut self, _ctx: &mut InteractContext<'_>) -> Result<Interaction, RuntimeError> {
        if self.open {
            debug!("Chest is already open");
            return Ok(Interaction::ChestAlreadyOpen);
        }

        self.open = true;
        info!("Chest opened");
        Ok(Interaction::ChestOpened)
    }

    fn status(&self) -> InteractableStatus {
        InteractableStatus::Chest { open: self.open }
    }
}
