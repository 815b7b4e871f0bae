//=========================================================================
// UI States
//=========================================================================
//
// The four navigation states and their Enter/Exit side effects.
//
//   State     | Enter                                         | Exit
//   ----------+-----------------------------------------------+---------------------
//   MainMenu  | show main menu, freeze time, free cursor      | hide main menu
//   InGame    | hide menus, show HUD, resume time, lock cursor| (nothing)
//   Pause     | show pause, freeze time, free cursor          | hide pause, resume
//   Options   | hide main/pause/HUD, show options, freeze,    | hide options
//             | free cursor, remember where we came from      |
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::surface::{CursorState, Panel, UiSurface};
use super::{UiState, UiStateKey};

//=== MainMenuState =======================================================

#[derive(Debug, Default)]
pub struct MainMenuState;

impl UiState for MainMenuState {
    fn key(&self) -> UiStateKey {
        UiStateKey::MainMenu
    }

    fn on_enter(&mut self, surface: &mut UiSurface, _previous: Option<UiStateKey>) {
        info!("Entering main menu");
        surface.panels.set(Panel::MainMenu, true);
        surface.freeze_for_menu();
    }

    fn on_exit(&mut self, surface: &mut UiSurface) {
        info!("Leaving main menu");
        surface.panels.set(Panel::MainMenu, false);
    }
}

//=== InGameState =========================================================

#[derive(Debug, Default)]
pub struct InGameState;

impl UiState for InGameState {
    fn key(&self) -> UiStateKey {
        UiStateKey::InGame
    }

    fn on_enter(&mut self, surface: &mut UiSurface, _previous: Option<UiStateKey>) {
        info!("Entering gameplay");
        surface
            .panels
            .hide_all(&[Panel::MainMenu, Panel::Pause, Panel::Options]);
        surface.panels.set(Panel::InGameHud, true);
        surface.resume_time();
        surface.cursor = CursorState::CAPTURED;
    }

    fn on_exit(&mut self, _surface: &mut UiSurface) {
        debug!("Leaving gameplay");
    }
}

//=== PauseState ==========================================================

#[derive(Debug, Default)]
pub struct PauseState;

impl UiState for PauseState {
    fn key(&self) -> UiStateKey {
        UiStateKey::Pause
    }

    fn on_enter(&mut self, surface: &mut UiSurface, _previous: Option<UiStateKey>) {
        info!("Entering pause menu");
        surface.panels.set(Panel::Pause, true);
        surface.freeze_for_menu();
    }

    fn on_exit(&mut self, surface: &mut UiSurface) {
        info!("Leaving pause menu");
        surface.panels.set(Panel::Pause, false);
        surface.resume_time();
    }
}

//=== OptionsState ========================================================

/// Options screen. Remembers which state opened it.
#[derive(Debug, Default)]
pub struct OptionsState {
    return_target: Option<UiStateKey>,
}

impl UiState for OptionsState {
    fn key(&self) -> UiStateKey {
        UiStateKey::Options
    }

    fn on_enter(&mut self, surface: &mut UiSurface, previous: Option<UiStateKey>) {
        info!("Entering options");
        surface
            .panels
            .hide_all(&[Panel::MainMenu, Panel::Pause, Panel::InGameHud]);
        surface.panels.set(Panel::Options, true);
        surface.freeze_for_menu();

        // Re-entering from Options keeps the original caller.
        if previous != Some(UiStateKey::Options) {
            self.return_target = previous;
        }
        debug!("Options return target: {:?}", self.return_target);
    }

    fn on_exit(&mut self, surface: &mut UiSurface) {
        info!("Leaving options");
        surface.panels.set(Panel::Options, false);
    }

    fn return_target(&self) -> Option<UiStateKey> {
        self.return_target
    }

    fn take_return_target(&mut self) -> Option<UiStateKey> {
        self.return_target.take()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
