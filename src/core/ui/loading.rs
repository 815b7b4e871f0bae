//=========================================================================
// Loading Choreography
//=========================================================================
//
// Builds the scene-load sequence shown between the main menu and
// gameplay. The progress bar is simulated: it climbs in fixed steps
// regardless of how far the real load has come, and the load is only
// allowed to activate once the bar is full.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Panel, UiStateKey};
use crate::core::sequence::{Cue, Sequence, Step};

//=== Constants ===========================================================

/// Label of the scene-load sequence.
pub const LOADING_SEQUENCE: &str = "scene_load";

/// Full scale of the simulated progress bar.
pub const PROGRESS_CEILING: f32 = 100.0;

/// Smallest progress step; keeps the bar to at most 100 steps.
pub const MIN_PROGRESS_STEP: f32 = 1.0;

//=== LoadingSettings =====================================================

/// Timing of the simulated loading bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingSettings {
    /// Progress added per step (units of 0..=100).
    pub progress_step: f32,
    /// Seconds between progress steps.
    pub progress_interval: f32,
    /// Pause after the bar is full, before activation is allowed.
    pub settle_delay: f32,
    /// Pause after activation, before the loading panel is hidden.
    pub reveal_delay: f32,
}

impl Default for LoadingSettings {
    fn default() -> Self {
        Self {
            progress_step: 20.0,
            progress_interval: 0.5,
            settle_delay: 0.5,
            reveal_delay: 0.2,
        }
    }
}

//=== Sequence Builder ====================================================

/// Builds the loading sequence for the given settings.
pub fn loading_sequence(settings: &LoadingSettings) -> Sequence<Cue> {
    let mut steps = vec![
        Step::Do(Cue::SetPanel(Panel::MainMenu, false)),
        Step::Do(Cue::SetPanel(Panel::Pause, false)),
        Step::Do(Cue::SetPanel(Panel::Options, false)),
        Step::Do(Cue::SetPanel(Panel::Victory, false)),
        Step::Do(Cue::SetPanel(Panel::Loss, false)),
        Step::Do(Cue::SetPanel(Panel::InGameHud, false)),
        Step::Do(Cue::ShowTimer(false)),
        Step::Do(Cue::SetPanel(Panel::LoadingScreen, true)),
        Step::Do(Cue::SetLoadingProgress(0.0)),
    ];

    let increment = if settings.progress_step >= MIN_PROGRESS_STEP {
        settings.progress_step.min(PROGRESS_CEILING)
    } else {
        MIN_PROGRESS_STEP
    };

    let mut progress = 0.0_f32;
    while progress < PROGRESS_CEILING {
        progress = (progress + increment).min(PROGRESS_CEILING);
        steps.push(Step::Do(Cue::SetLoadingProgress(progress)));
        steps.push(Step::Wait(settings.progress_interval));
    }

    steps.extend([
        Step::Wait(settings.settle_delay),
        Step::Do(Cue::AllowSceneActivation),
        Step::Wait(settings.reveal_delay),
        Step::Do(Cue::SetPanel(Panel::LoadingScreen, false)),
        Step::Do(Cue::SetPanel(Panel::InGameHud, true)),
        Step::Do(Cue::Navigate(UiStateKey::InGame)),
    ]);

    Sequence::new(LOADING_SEQUENCE, steps)
}

//=========================================================================
// Unit Tests
//=========================================================================
