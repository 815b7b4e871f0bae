//=========================================================================
// Session
//=========================================================================
//
// Top-level owner of one running game: the shared systems, the objective
// bus and the active level.
//
// Flow per tick:
//   1. ui.tick(dt)             loader + UI sequences, real time
//   2. activate new level      if a scene load finished
//   3. outcome.tick(dt*scale)  countdown + outcome sequences, game time
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::GameSystems;
use crate::config::RuntimeConfig;
use crate::core::event_bus::EventBus;
use crate::core::host_bridge::{HostCommand, TickControl};
use crate::core::outcome::{GameOutcome, OutcomeSettings, OutcomeSnapshot};
use crate::core::player::PlayerControl;
use crate::core::scene_loader::SceneLoader;
use crate::core::ui::{UiNavigation, UiSnapshot, UiSurface};
use crate::core::world::{InteractableStatus, Interaction, Level, LevelLayout};
use crate::error::RuntimeError;

//=== SessionSnapshot =====================================================

/// Observable state of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub ui: UiSnapshot,
    pub outcome: Option<OutcomeSnapshot>,
    pub scene: Option<String>,
    pub objects: Vec<(String, InteractableStatus)>,
    pub player_enabled: bool,
}

//=== Session =============================================================

pub struct Session {
    systems: GameSystems,
    objective_events: EventBus<GameSystems>,
    level: Option<Level>,
    outcome_settings: OutcomeSettings,
    layout: LevelLayout,
}

impl Session {
    /// Builds the session and enters the main menu.
    pub fn new(
        config: &RuntimeConfig,
        loader: Box<dyn SceneLoader>,
        player: Box<dyn PlayerControl>,
    ) -> Self {
        let ui = UiNavigation::new(
            UiSurface::new(),
            loader,
            config.loading,
            config.level_scene.clone(),
        );

        let mut session = Self {
            systems: GameSystems::new(ui, player),
            objective_events: EventBus::new(),
            level: None,
            outcome_settings: config.outcome,
            layout: config.level.clone(),
        };

        session.systems.ui.start();
        session
    }

    //--- Host Commands ----------------------------------------------------

    /// Applies one host command.
    pub fn handle(&mut self, command: HostCommand) -> Result<TickControl, RuntimeError> {
        debug!("Handling {:?}", command);

        match command {
            HostCommand::Interact(name) => {
                self.interact(&name)?;
            }
            HostCommand::PauseRequested => self.systems.ui.on_pause_requested(),
            HostCommand::PlayClicked => self.systems.ui.on_play_clicked()?,
            HostCommand::ResumeClicked => self.systems.ui.on_resume_clicked(),
            HostCommand::OptionsClicked => self.systems.ui.on_options_clicked(),
            HostCommand::OptionsBackClicked => self.systems.ui.on_options_back_clicked(),
            HostCommand::ExitClicked => {
                self.systems.ui.on_exit_clicked();
                return Ok(TickControl::Exit);
            }
            HostCommand::Shutdown => return Ok(TickControl::Exit),
        }

        Ok(TickControl::Continue)
    }

    /// Uses the named object in the active level.
    ///
    /// Returns `Ok(None)` when no level is loaded or nothing has that name.
    pub fn interact(&mut self, name: &str) -> Result<Option<Interaction>, RuntimeError> {
        let Some(level) = self.level.as_mut() else {
            warn!("Interaction with '{}' ignored: no level loaded", name);
            return Ok(None);
        };

        level.interact(name, &mut self.objective_events, &mut self.systems)
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the session by `dt` real seconds.
    pub fn tick(&mut self, dt: f32) {
        self.systems.ui.tick(dt);

        if let Some(scene) = self.systems.ui.take_activated_scene() {
            self.activate_level(&scene);
        }

        let scaled = dt * self.systems.ui.time_scale();
        self.systems.tick_outcome(scaled);
    }

    /// Replaces the level and the outcome machine with fresh ones.
    fn activate_level(&mut self, scene: &str) {
        if let Some(mut previous) = self.systems.outcome.take() {
            debug!("Retiring outcome machine ({})", previous.state());
            previous.on_disable(&mut self.objective_events);
        }

        self.level = Some(Level::from_layout(scene, &self.layout));

        let mut outcome = GameOutcome::new(self.outcome_settings);
        outcome.on_enable(&mut self.objective_events);
        outcome.start(&mut self.systems.ui);
        self.systems.outcome = Some(outcome);

        info!("Level '{}' is live", scene);
    }

    //--- Query API --------------------------------------------------------

    pub fn systems(&self) -> &GameSystems {
        &self.systems
    }

    pub fn ui(&self) -> &UiNavigation {
        &self.systems.ui
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.systems.outcome.as_ref()
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Number of live objective subscriptions.
    pub fn objective_subscribers(&self) -> usize {
        self.objective_events.len()
    }

    pub fn quit_requested(&self) -> bool {
        self.systems.ui.quit_requested()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            ui: self.systems.ui.snapshot(),
            outcome: self.systems.outcome.as_ref().map(GameOutcome::snapshot),
            scene: self.level.as_ref().map(|l| l.scene().to_string()),
            objects: self.level.as_ref().map(Level::statuses).unwrap_or_default(),
            player_enabled: self.systems.player.is_enabled(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::OutcomeState;
    use crate::core::player::PlayerController;
    use crate::core::scene_loader::SimulatedSceneLoader;
    use crate::core::ui::{Panel, UiStateKey};

    const DT: f32 = 0.25;

    fn session() -> Session {
        let config = RuntimeConfig::new();
        Session::new(
            &config,
            Box::new(SimulatedSceneLoader::new([config.level_scene.clone()])),
            Box::new(PlayerController::default()),
        )
    }

    fn run(session: &mut Session, seconds: f32) {
        let steps = (seconds / DT).round() as usize;
        for _ in 0..steps {
            session.tick(DT);
        }
    }

    fn loaded_session() -> Session {
        let mut session = session();
        session.handle(HostCommand::PlayClicked).unwrap();
        run(&mut session, 4.0);
        session
    }

    //=====================================================================
    // Startup & Loading
    //=====================================================================

    #[test]
    fn starts_in_main_menu_without_level() {
        let session = session();

        assert_eq!(session.ui().current(), Some(UiStateKey::MainMenu));
        assert!(session.level().is_none());
        assert!(session.outcome().is_none());
        assert_eq!(session.objective_subscribers(), 0);
    }

    #[test]
    fn play_loads_level_and_starts_outcome() {
        let session = loaded_session();

        assert_eq!(session.ui().current(), Some(UiStateKey::InGame));
        assert_eq!(session.level().map(Level::scene), Some("Level_001"));
        assert_eq!(session.outcome().map(|o| o.state()), Some(OutcomeState::Playing));
        assert_eq!(session.objective_subscribers(), 1);
        assert!(session.ui().surface().is_timer_visible());
    }

    #[test]
    fn second_play_during_load_is_rejected() {
        let mut session = session();
        session.handle(HostCommand::PlayClicked).unwrap();

        let result = session.handle(HostCommand::PlayClicked);

        assert!(matches!(result, Err(RuntimeError::LoadInProgress(_))));
    }

    #[test]
    fn interact_without_level_is_noop() {
        let mut session = session();

        assert_eq!(session.interact("terminal_a"), Ok(None));
    }

    //=====================================================================
    // Objectives
    //=====================================================================

    #[test]
    fn three_terminals_win() {
        let mut session = loaded_session();

        for name in ["terminal_a", "terminal_b", "terminal_c"] {
            session.handle(HostCommand::Interact(name.into())).unwrap();
        }

        let snapshot = session.snapshot();
        let outcome = snapshot.outcome.unwrap();
        assert_eq!(outcome.state, OutcomeState::Victory);
        assert_eq!(outcome.objectives_completed, 3);
        assert!(!snapshot.ui.timer_visible);
    }

    #[test]
    fn countdown_pauses_with_pause_menu() {
        let mut session = loaded_session();
        let before = session.outcome().map(|o| o.remaining());

        session.handle(HostCommand::PauseRequested).unwrap();
        run(&mut session, 10.0);

        assert_eq!(session.outcome().map(|o| o.remaining()), before);

        session.handle(HostCommand::PauseRequested).unwrap();
        run(&mut session, 2.0);

        assert_eq!(
            session.outcome().map(|o| o.remaining()),
            before.map(|r| r - 2.0)
        );
    }

    #[test]
    fn replay_replaces_outcome_and_subscription() {
        let mut session = loaded_session();
        session.handle(HostCommand::Interact("terminal_a".into())).unwrap();

        // Time out, sit through the loss sequence, then play again.
        run(&mut session, 70.0);
        assert_eq!(session.ui().current(), Some(UiStateKey::MainMenu));

        session.handle(HostCommand::PlayClicked).unwrap();
        run(&mut session, 4.0);

        assert_eq!(session.objective_subscribers(), 1);
        assert_eq!(session.outcome().map(|o| o.state()), Some(OutcomeState::Playing));
        assert_eq!(session.outcome().map(|o| o.objectives_completed()), Some(0));
        assert_eq!(
            session.level().and_then(|l| l.status("terminal_a")),
            Some(InteractableStatus::Terminal { active: false })
        );
    }

    //=====================================================================
    // Exit
    //=====================================================================

    #[test]
    fn exit_button_stops_loop() {
        let mut session = session();

        assert_eq!(session.handle(HostCommand::ExitClicked), Ok(TickControl::Exit));
        assert!(session.quit_requested());
    }

    #[test]
    fn shutdown_stops_loop() {
        let mut session = session();
        assert_eq!(session.handle(HostCommand::Shutdown), Ok(TickControl::Exit));
        assert!(!session.quit_requested());
    }

    #[test]
    fn options_from_pause_and_back() {
        let mut session = loaded_session();
        session.handle(HostCommand::PauseRequested).unwrap();
        session.handle(HostCommand::OptionsClicked).unwrap();

        assert_eq!(session.snapshot().ui.visible_panels, vec![Panel::Options]);

        session.handle(HostCommand::OptionsBackClicked).unwrap();
        assert_eq!(session.ui().current(), Some(UiStateKey::Pause));

        session.handle(HostCommand::ResumeClicked).unwrap();
        assert_eq!(session.ui().current(), Some(UiStateKey::InGame));
    }
}
