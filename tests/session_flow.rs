//=========================================================================
// Session Flow
//=========================================================================
//
// End-to-end sessions driven through the public API with a fixed,
// binary-exact step so every run is deterministic.
//
//=========================================================================

use outpost_runtime::prelude::*;

const DT: f32 = 1.0 / 16.0;

//=== Helpers =============================================================

fn session_with(config: RuntimeConfig) -> Session {
    let loader = SimulatedSceneLoader::new([config.level_scene.clone()]);
    Session::new(
        &config,
        Box::new(loader),
        Box::new(PlayerController::default()),
    )
}

fn run(session: &mut Session, seconds: f32) {
    let steps = (seconds / DT).round() as usize;
    for _ in 0..steps {
        session.tick(DT);
    }
}

fn play(session: &mut Session) {
    session.handle(HostCommand::PlayClicked).unwrap();
    run(session, 4.0);
}

fn outcome_state(session: &Session) -> Option<OutcomeState> {
    session.snapshot().outcome.map(|o| o.state)
}

//=========================================================================
// Win Path
//=========================================================================

#[test]
fn menu_to_victory_and_back_to_hud() {
    let mut session = session_with(RuntimeConfig::new());
    assert_eq!(session.snapshot().ui.state, Some(UiStateKey::MainMenu));
    assert_eq!(session.snapshot().ui.time_scale, 0.0);

    play(&mut session);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.ui.state, Some(UiStateKey::InGame));
    assert_eq!(snapshot.ui.visible_panels, vec![Panel::InGameHud]);
    assert_eq!(snapshot.ui.cursor, CursorState::CAPTURED);
    assert!(snapshot.ui.timer_visible);
    assert_eq!(snapshot.scene.as_deref(), Some("Level_001"));

    for name in ["terminal_a", "terminal_b", "terminal_c"] {
        let result = session.handle(HostCommand::Interact(name.into()));
        assert_eq!(result, Ok(TickControl::Continue));
    }
    assert_eq!(outcome_state(&session), Some(OutcomeState::Victory));

    // Player frozen right away, overlay after one second.
    run(&mut session, 0.5);
    assert!(!session.snapshot().player_enabled);
    run(&mut session, 0.5);
    assert_eq!(session.snapshot().ui.visible_panels, vec![Panel::Victory]);
    assert!(!session.snapshot().ui.timer_visible);

    run(&mut session, 3.0);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.ui.state, Some(UiStateKey::InGame));
    assert_eq!(snapshot.ui.visible_panels, vec![Panel::InGameHud]);
    assert!(snapshot.player_enabled);
    assert_eq!(outcome_state(&session), Some(OutcomeState::Victory));
}

#[test]
fn extra_objectives_after_victory_are_ignored() {
    let mut session = session_with(RuntimeConfig::new());
    play(&mut session);

    for name in ["terminal_a", "terminal_b", "terminal_c"] {
        session.handle(HostCommand::Interact(name.into())).unwrap();
    }
    // Off and on again: a fourth activation.
    session.interact("terminal_a").unwrap();
    session.interact("terminal_a").unwrap();

    let outcome = session.snapshot().outcome.unwrap();
    assert_eq!(outcome.objectives_completed, 3);
    assert_eq!(outcome.state, OutcomeState::Victory);
}

#[test]
fn win_with_time_left_never_loses() {
    let mut session = session_with(RuntimeConfig::new());
    play(&mut session);

    let remaining = session.snapshot().outcome.unwrap().remaining;
    run(&mut session, remaining - 37.0);
    assert_eq!(session.snapshot().outcome.unwrap().remaining, 37.0);
    assert_eq!(session.snapshot().ui.timer_text.as_deref(), Some("00:37"));

    for name in ["terminal_a", "terminal_b", "terminal_c"] {
        session.interact(name).unwrap();
    }
    run(&mut session, 90.0);

    assert_eq!(outcome_state(&session), Some(OutcomeState::Victory));
    assert_eq!(session.snapshot().outcome.unwrap().remaining, 37.0);
}

#[test]
fn victory_can_return_to_main_menu() {
    let mut config = RuntimeConfig::new();
    config.outcome.victory_destination = VictoryDestination::MainMenu;
    let mut session = session_with(config);
    play(&mut session);

    for name in ["terminal_a", "terminal_b", "terminal_c"] {
        session.interact(name).unwrap();
    }
    run(&mut session, 4.5);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.ui.state, Some(UiStateKey::MainMenu));
    assert_eq!(snapshot.ui.visible_panels, vec![Panel::MainMenu]);
    assert_eq!(snapshot.ui.cursor, CursorState::FREE);
}

//=========================================================================
// Loss Path
//=========================================================================

#[test]
fn countdown_runs_out_into_loss_and_main_menu() {
    let mut config = RuntimeConfig::new();
    config.outcome.time_limit = 5.0;
    let mut session = session_with(config);
    play(&mut session);

    // Two terminals are not enough.
    session.interact("terminal_a").unwrap();
    session.interact("terminal_b").unwrap();

    run(&mut session, 5.0);
    assert_eq!(outcome_state(&session), Some(OutcomeState::Loss));
    assert_eq!(session.snapshot().ui.timer_text.as_deref(), Some("00:00"));
    assert!(!session.snapshot().ui.timer_visible);

    run(&mut session, 1.0);
    assert_eq!(session.snapshot().ui.visible_panels, vec![Panel::Loss]);

    run(&mut session, 3.5);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.ui.state, Some(UiStateKey::MainMenu));
    assert_eq!(snapshot.ui.visible_panels, vec![Panel::MainMenu]);
    assert!(snapshot.player_enabled);

    // Late objectives do nothing.
    session.interact("terminal_c").unwrap();
    assert_eq!(session.snapshot().outcome.unwrap().objectives_completed, 2);
}

#[test]
fn replay_after_loss_starts_a_fresh_round() {
    let mut config = RuntimeConfig::new();
    config.outcome.time_limit = 3.0;
    let mut session = session_with(config);
    play(&mut session);
    run(&mut session, 10.0);
    assert_eq!(session.snapshot().ui.state, Some(UiStateKey::MainMenu));

    play(&mut session);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.ui.state, Some(UiStateKey::InGame));
    assert_eq!(outcome_state(&session), Some(OutcomeState::Playing));
    assert_eq!(session.objective_subscribers(), 1);
    assert!(snapshot
        .objects
        .iter()
        .all(|(_, status)| !matches!(status, InteractableStatus::Terminal { active: true })));
}

//=========================================================================
// Navigation
//=========================================================================

#[test]
fn pause_freezes_countdown_and_options_returns_to_pause() {
    let mut session = session_with(RuntimeConfig::new());
    play(&mut session);
    let before = session.snapshot().outcome.unwrap().remaining;

    session.handle(HostCommand::PauseRequested).unwrap();
    assert_eq!(
        session.snapshot().ui.visible_panels,
        vec![Panel::Pause, Panel::InGameHud]
    );

    session.handle(HostCommand::OptionsClicked).unwrap();
    run(&mut session, 5.0);
    session.handle(HostCommand::OptionsBackClicked).unwrap();
    assert_eq!(session.snapshot().ui.state, Some(UiStateKey::Pause));

    session.handle(HostCommand::PauseRequested).unwrap();
    assert_eq!(session.snapshot().ui.state, Some(UiStateKey::InGame));
    assert_eq!(session.snapshot().outcome.unwrap().remaining, before);
}

#[test]
fn options_from_main_menu_returns_to_main_menu() {
    let mut session = session_with(RuntimeConfig::new());

    session.handle(HostCommand::OptionsClicked).unwrap();
    assert_eq!(session.snapshot().ui.visible_panels, vec![Panel::Options]);

    session.handle(HostCommand::OptionsBackClicked).unwrap();
    assert_eq!(session.snapshot().ui.state, Some(UiStateKey::MainMenu));
    assert_eq!(session.snapshot().ui.visible_panels, vec![Panel::MainMenu]);
}

#[test]
fn doors_and_chests_do_not_count_as_objectives() {
    let mut session = session_with(RuntimeConfig::new());
    play(&mut session);

    assert_eq!(session.interact("door_entrance"), Ok(Some(Interaction::DoorOpened)));
    assert_eq!(session.interact("chest_storage"), Ok(Some(Interaction::ChestOpened)));
    assert_eq!(session.interact("chest_storage"), Ok(Some(Interaction::ChestAlreadyOpen)));
    assert_eq!(session.interact("door_entrance"), Ok(Some(Interaction::DoorClosed)));

    assert_eq!(session.snapshot().outcome.unwrap().objectives_completed, 0);
}

//=========================================================================
// Threaded Runtime
//=========================================================================

#[test]
fn runtime_handle_round_trip() {
    let mut config = RuntimeConfig::new();
    config.tps = 200.0;
    let handle = RuntimeBuilder::new().with_config(config).build().spawn();

    handle.send(HostCommand::OptionsClicked).unwrap();
    handle.send(HostCommand::ExitClicked).unwrap();
    let session = handle.join().unwrap();

    assert!(session.quit_requested());
    assert_eq!(session.ui().current(), Some(UiStateKey::Options));
}
