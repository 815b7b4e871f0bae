//=========================================================================
// Game Systems
//=========================================================================
//
// Shared context handed to objective subscribers at publish time.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::outcome::GameOutcome;
use crate::core::player::PlayerControl;
use crate::core::ui::UiNavigation;

//=== GameSystems =========================================================

/// The state machines and capabilities of one running session.
///
/// `outcome` is `None` until a level has been activated.
pub struct GameSystems {
    pub ui: UiNavigation,
    pub outcome: Option<GameOutcome>,
    pub player: Box<dyn PlayerControl>,
}

impl GameSystems {
    pub fn new(ui: UiNavigation, player: Box<dyn PlayerControl>) -> Self {
        Self {
            ui,
            outcome: None,
            player,
        }
    }

    /// Routes one objective notification to the active outcome machine.
    pub fn objective_activated(&mut self) {
        match self.outcome.as_mut() {
            Some(outcome) => outcome.handle_objective_activated(&mut self.ui),
            None => debug!("Objective activated with no outcome machine running"),
        }
    }

    /// Advances the outcome machine by `dt` seconds of scaled time.
    pub fn tick_outcome(&mut self, dt: f32) {
        if let Some(outcome) = self.outcome.as_mut() {
            outcome.tick(dt, &mut self.ui, self.player.as_mut());
        }
    }
}
