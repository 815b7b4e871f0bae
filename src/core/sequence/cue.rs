//=========================================================================
// Cues
//=========================================================================
//
// Effects scheduled by the timed sequences of both state machines.
//
// Keeping them as plain data (instead of closures) lets tests read a
// sequence's step list and assert exactly what it will do.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::ui::{Panel, UiStateKey};

//=== Cue =================================================================

/// An immediate effect executed by a [`super::Step::Do`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    /// Show or hide a single panel.
    SetPanel(Panel, bool),

    /// Show or hide the countdown text.
    ShowTimer(bool),

    /// Hide HUD and timer, show the victory overlay.
    ShowVictoryPanel,

    /// Hide HUD and timer, show the loss overlay.
    ShowLossPanel,

    /// Switch the UI navigation machine to another state.
    Navigate(UiStateKey),

    /// Enable or disable the player-control capability.
    SetPlayerControl(bool),

    /// Set the displayed (simulated) loading progress, 0..=100.
    SetLoadingProgress(f32),

    /// Let the deferred scene load finish.
    AllowSceneActivation,
}
