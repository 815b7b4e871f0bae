//=========================================================================
// Terminal
//=========================================================================
//
// Objective source. Switching a terminal on publishes one objective
// notification; switching it off publishes nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::{InteractContext, Interactable, InteractableStatus, Interaction};
use crate::error::RuntimeError;

//=== IndicatorLight ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    Red,
    Green,
}

/// Status light next to a terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorLight {
    pub color: LightColor,
    pub intensity: f32,
}

impl IndicatorLight {
    pub const ACTIVE: IndicatorLight = IndicatorLight {
        color: LightColor::Green,
        intensity: 4.0,
    };

    pub const INACTIVE: IndicatorLight = IndicatorLight {
        color: LightColor::Red,
        intensity: 2.0,
    };

    fn for_state(active: bool) -> Self {
        if active {
            Self::ACTIVE
        } else {
            Self::INACTIVE
        }
    }
}

//=== Terminal ============================================================

#[derive(Debug, Clone)]
pub struct Terminal {
    active: bool,
    light: IndicatorLight,
}

impl Terminal {
    pub fn new(start_active: bool) -> Self {
        Self {
            active: start_active,
            light: IndicatorLight::for_state(start_active),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn light(&self) -> IndicatorLight {
        self.light
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Interactable for Terminal {
    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> Result<Interaction, RuntimeError> {
        self.active = !self.active;
        self.light = IndicatorLight::for_state(self.active);

        if !self.active {
            info!("Terminal deactivated");
            return Ok(Interaction::TerminalDeactivated);
        }

        info!("Terminal activated");
        ctx.publish_objective_activated()?;
        Ok(Interaction::TerminalActivated)
    }

    fn status(&self) -> InteractableStatus {
        InteractableStatus::Terminal {
            active: self.active,
        }
    }
}
