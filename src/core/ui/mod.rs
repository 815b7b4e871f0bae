//=========================================================================
// UI Navigation
//=========================================================================
//
// Screen state machine: which menu or HUD is active, and the side effects
// each screen applies on the UI surface.
//
// Architecture:
//   UiNavigation
//     ├─ states: HashMap<UiStateKey, Box<dyn UiState>>   (one per key)
//     ├─ current: Option<UiStateKey>
//     ├─ surface: UiSurface   (panels, timer, loading bar, cursor, time)
//     └─ sequencer: Sequencer<Cue>   (scene-load choreography)
//
// Victory and loss are panel overlays driven by the outcome machine, not
// navigation states.
//
//=========================================================================

//=== Module Declarations =================================================

mod loading;
mod navigation;
mod states;
mod surface;

//=== Public API ==========================================================

pub use loading::{
    loading_sequence, LoadingSettings, LOADING_SEQUENCE, MIN_PROGRESS_STEP, PROGRESS_CEILING,
};
pub use navigation::{UiNavigation, UiSnapshot};
pub use states::{InGameState, MainMenuState, OptionsState, PauseState};
pub use surface::{
    format_timer, CursorLock, CursorState, LoadingBar, Panel, PanelSet, TimerText, UiSurface,
};

//=== UiStateKey ==========================================================

/// Identifies a navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiStateKey {
    MainMenu,
    InGame,
    Pause,
    Options,
}

//=== UiState Trait =======================================================

/// A navigation state with Enter/Exit side effects on the UI surface.
///
/// One long-lived instance exists per [`UiStateKey`]; instances keep their
/// own data between activations (Options keeps its return target).
pub trait UiState: Send {
    /// The key this state is registered under.
    fn key(&self) -> UiStateKey;

    /// Called when the state becomes active. `previous` is the state that
    /// was active before, if any.
    fn on_enter(&mut self, surface: &mut UiSurface, previous: Option<UiStateKey>);

    /// Called when the state stops being active.
    fn on_exit(&mut self, _surface: &mut UiSurface) {}

    /// State to go back to, for states that remember their caller.
    fn return_target(&self) -> Option<UiStateKey> {
        None
    }

    /// Takes and clears the remembered caller.
    fn take_return_target(&mut self) -> Option<UiStateKey> {
        None
    }
}
