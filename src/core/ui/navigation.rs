//=========================================================================
// UI Navigation Machine
//=========================================================================
//
// Owns the navigation states, the UI surface and the scene-load flow.
//
// States are registered once and referenced by key, so they keep their
// data between activations. Transitions are always explicit: a button
// handler, the pause toggle, or a cue from a running sequence.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::loading::{loading_sequence, LoadingSettings};
use super::surface::{CursorState, Panel, UiSurface};
use super::states::{InGameState, MainMenuState, OptionsState, PauseState};
use super::{UiState, UiStateKey};
use crate::core::scene_loader::{LoadTicket, SceneLoader};
use crate::core::sequence::{Cue, Sequencer};
use crate::error::RuntimeError;

//=== UiSnapshot ==========================================================

/// Observable UI state at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct UiSnapshot {
    pub state: Option<UiStateKey>,
    pub visible_panels: Vec<Panel>,
    pub timer_text: Option<String>,
    pub timer_visible: bool,
    pub loading_progress: Option<f32>,
    pub cursor: CursorState,
    pub time_scale: f32,
    pub quit_requested: bool,
}

//=== ActiveLoad ==========================================================

#[derive(Debug, Clone)]
struct ActiveLoad {
    ticket: LoadTicket,
    scene: String,
}

//=== UiNavigation ========================================================

/// UI screen state machine.
pub struct UiNavigation {
    states: HashMap<UiStateKey, Box<dyn UiState>>,
    current: Option<UiStateKey>,
    surface: UiSurface,
    loader: Box<dyn SceneLoader>,
    loading: LoadingSettings,
    level_scene: String,
    sequencer: Sequencer<Cue>,
    active_load: Option<ActiveLoad>,
    activated_scene: Option<String>,
    quit_requested: bool,
}

impl UiNavigation {
    //--- Construction -----------------------------------------------------

    /// Creates the machine with all four states registered and none active.
    ///
    /// Call [`UiNavigation::start`] to enter the main menu.
    pub fn new(
        surface: UiSurface,
        loader: Box<dyn SceneLoader>,
        loading: LoadingSettings,
        level_scene: impl Into<String>,
    ) -> Self {
        let mut navigation = Self {
            states: HashMap::new(),
            current: None,
            surface,
            loader,
            loading,
            level_scene: level_scene.into(),
            sequencer: Sequencer::new(),
            active_load: None,
            activated_scene: None,
            quit_requested: false,
        };

        navigation.register(MainMenuState);
        navigation.register(InGameState);
        navigation.register(PauseState);
        navigation.register(OptionsState::default());
        navigation
    }

    fn register<T>(&mut self, state: T)
    where
        T: UiState + 'static,
    {
        let key = state.key();
        if self.states.insert(key, Box::new(state)).is_some() {
            warn!("UI state {:?} was already registered and has been replaced", key);
        }
    }

    /// Enters the initial state (main menu).
    pub fn start(&mut self) {
        debug!("Starting UI navigation");
        self.change_state(UiStateKey::MainMenu);
    }

    //--- Transitions ------------------------------------------------------

    /// Exits the current state and enters `next`.
    ///
    /// Re-entering the active state is allowed and re-applies its Enter
    /// side effects.
    pub fn change_state(&mut self, next: UiStateKey) {
        let previous = self.current;

        if let Some(key) = previous {
            if let Some(state) = self.states.get_mut(&key) {
                state.on_exit(&mut self.surface);
            }
        }

        debug!("UI state {:?} -> {:?}", previous, next);
        self.current = Some(next);

        match self.states.get_mut(&next) {
            Some(state) => state.on_enter(&mut self.surface, previous),
            None => warn!("UI state {:?} is not registered", next),
        }
    }

    /// Currently active state.
    pub fn current(&self) -> Option<UiStateKey> {
        self.current
    }

    /// Where Options will return to, if it recorded a caller.
    pub fn options_return_target(&self) -> Option<UiStateKey> {
        self.states
            .get(&UiStateKey::Options)
            .and_then(|state| state.return_target())
    }

    //--- Input ------------------------------------------------------------

    /// Pause toggle: flips InGame and Pause, ignored elsewhere.
    pub fn on_pause_requested(&mut self) {
        match self.current {
            Some(UiStateKey::InGame) => self.change_state(UiStateKey::Pause),
            Some(UiStateKey::Pause) => self.change_state(UiStateKey::InGame),
            other => debug!("Pause request ignored in {:?}", other),
        }
    }

    //--- Buttons ----------------------------------------------------------

    /// Play: loads the configured level scene behind the loading screen.
    pub fn on_play_clicked(&mut self) -> Result<(), RuntimeError> {
        info!("Play clicked");
        let scene = self.level_scene.clone();
        self.start_scene_load(&scene)
    }

    pub fn on_resume_clicked(&mut self) {
        self.change_state(UiStateKey::InGame);
    }

    pub fn on_options_clicked(&mut self) {
        self.change_state(UiStateKey::Options);
    }

    /// Leaves Options for the recorded caller, or the main menu.
    pub fn on_options_back_clicked(&mut self) {
        let target = self
            .states
            .get_mut(&UiStateKey::Options)
            .and_then(|state| state.take_return_target())
            .unwrap_or(UiStateKey::MainMenu);

        self.change_state(target);
    }

    pub fn on_exit_clicked(&mut self) {
        info!("Exit requested");
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    //--- Overlays ---------------------------------------------------------

    /// Hides HUD and timer and shows the victory panel.
    ///
    /// The navigation state is left untouched.
    pub fn show_victory_panel(&mut self) {
        info!("Showing victory panel");
        self.surface.panels.set(Panel::InGameHud, false);
        self.surface.show_timer(false);
        self.surface.panels.set(Panel::Victory, true);
    }

    /// Hides HUD and timer and shows the loss panel.
    pub fn show_loss_panel(&mut self) {
        info!("Showing loss panel");
        self.surface.panels.set(Panel::InGameHud, false);
        self.surface.show_timer(false);
        self.surface.panels.set(Panel::Loss, true);
    }

    pub fn set_panel(&mut self, panel: Panel, visible: bool) {
        self.surface.panels.set(panel, visible);
    }

    pub fn set_timer(&mut self, seconds: f32) {
        self.surface.set_timer(seconds);
    }

    pub fn show_timer(&mut self, visible: bool) {
        self.surface.show_timer(visible);
    }

    //--- Scene Loading ----------------------------------------------------

    /// Starts loading `scene` behind the loading screen.
    ///
    /// The load begins with activation deferred; the loading sequence
    /// allows it once the simulated bar is full.
    pub fn start_scene_load(&mut self, scene: &str) -> Result<(), RuntimeError> {
        if let Some(active) = &self.active_load {
            warn!("Scene '{}' is still loading, ignoring request", active.scene);
            return Err(RuntimeError::LoadInProgress(active.scene.clone()));
        }

        let ticket = self.loader.begin_load(scene)?;
        self.loader.set_allow_activation(ticket, false)?;

        self.active_load = Some(ActiveLoad {
            ticket,
            scene: scene.to_string(),
        });
        self.sequencer.start(loading_sequence(&self.loading));
        Ok(())
    }

    /// Returns true while a scene load is in flight.
    pub fn is_loading(&self) -> bool {
        self.active_load.is_some()
    }

    /// Takes the name of a scene that finished loading since the last call.
    pub fn take_activated_scene(&mut self) -> Option<String> {
        self.activated_scene.take()
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the loader and the UI's own sequences by `dt` real seconds.
    pub fn tick(&mut self, dt: f32) {
        self.loader.update(dt);

        // Cues never start sequences, so the sequencer can be detached
        // while they are applied.
        let mut sequencer = std::mem::take(&mut self.sequencer);
        sequencer.advance(dt, |cue| self.apply_cue(cue));
        self.sequencer = sequencer;

        if let Some(active) = &self.active_load {
            if self.loader.is_done(active.ticket) {
                info!("Scene '{}' is active", active.scene);
                self.loader.release(active.ticket);
                self.activated_scene = Some(active.scene.clone());
                self.active_load = None;
            }
        }
    }

    /// Applies one sequence cue to the UI.
    pub fn apply_cue(&mut self, cue: &Cue) {
        match cue {
            Cue::SetPanel(panel, visible) => self.surface.panels.set(*panel, *visible),
            Cue::ShowTimer(visible) => self.surface.show_timer(*visible),
            Cue::ShowVictoryPanel => self.show_victory_panel(),
            Cue::ShowLossPanel => self.show_loss_panel(),
            Cue::Navigate(key) => self.change_state(*key),
            Cue::SetLoadingProgress(value) => self.surface.set_loading_progress(*value),
            Cue::AllowSceneActivation => self.allow_scene_activation(),
            Cue::SetPlayerControl(_) => {
                warn!("Cue {:?} has no effect on the UI", cue);
            }
        }
    }

    fn allow_scene_activation(&mut self) {
        let Some(active) = &self.active_load else {
            warn!("No scene load to activate");
            return;
        };

        if let Err(e) = self.loader.set_allow_activation(active.ticket, true) {
            error!("Failed to activate scene '{}': {}", active.scene, e);
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn surface(&self) -> &UiSurface {
        &self.surface
    }

    pub fn time_scale(&self) -> f32 {
        self.surface.time_scale
    }

    /// Returns true while a UI sequence (e.g. loading) is running.
    pub fn is_sequence_running(&self, label: &str) -> bool {
        self.sequencer.is_running(label)
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            state: self.current,
            visible_panels: self.surface.panels.visible(),
            timer_text: self.surface.timer_text().map(str::to_string),
            timer_visible: self.surface.is_timer_visible(),
            loading_progress: self.surface.loading_progress(),
            cursor: self.surface.cursor,
            time_scale: self.surface.time_scale,
            quit_requested: self.quit_requested,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
