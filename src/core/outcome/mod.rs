//=========================================================================
// Game Outcome
//=========================================================================
//
// Tracks whether the current session is still being played, was won, or
// was lost.
//
// Architecture:
//   GameOutcome
//     ├─ state: OutcomeState   (Playing → Victory | Loss)
//     ├─ objectives_completed  (frozen once Playing is left)
//     ├─ countdown: Countdown  (1s logical ticks, scaled time)
//     └─ sequencer: Sequencer<Cue>   (victory / loss choreography)
//
// Flow:
//   terminal → objective bus → handle_objective_activated → Victory
//   tick(dt) → countdown expires → Loss
//   tick(dt) → sequence cues → UiNavigation / PlayerControl
//
// Victory and Loss are terminal: re-entering either is a no-op, so each
// sequence runs at most once per session.
//
//=========================================================================

//=== Module Declarations =================================================

mod countdown;
mod sequences;

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::event_bus::{EventBus, SubscriptionId};
use crate::core::player::PlayerControl;
use crate::core::sequence::{Cue, Sequencer};
use crate::core::session::GameSystems;
use crate::core::ui::UiNavigation;

//=== Public API ==========================================================

pub use countdown::{Countdown, CountdownPhase, COUNTDOWN_TICK};
pub use sequences::{loss_sequence, victory_sequence, LOSS_SEQUENCE, VICTORY_SEQUENCE};

//=== OutcomeState ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutcomeState {
    #[default]
    Playing,
    Victory,
    Loss,
}

impl fmt::Display for OutcomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeState::Playing => write!(f, "playing"),
            OutcomeState::Victory => write!(f, "victory"),
            OutcomeState::Loss => write!(f, "loss"),
        }
    }
}

//=== VictoryDestination ==================================================

/// Where the UI ends up once the victory overlay has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VictoryDestination {
    /// Back to the HUD in the same level.
    #[default]
    InGame,
    /// Back to the main menu.
    MainMenu,
}

impl FromStr for VictoryDestination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_game" => Ok(VictoryDestination::InGame),
            "main_menu" => Ok(VictoryDestination::MainMenu),
            other => Err(format!("expected 'in_game' or 'main_menu', got '{}'", other)),
        }
    }
}

impl fmt::Display for VictoryDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VictoryDestination::InGame => write!(f, "in_game"),
            VictoryDestination::MainMenu => write!(f, "main_menu"),
        }
    }
}

//=== Settings ============================================================

/// Waits used by the victory and loss sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceTimings {
    /// Delay between freezing the player and showing the overlay.
    pub intro_delay: f32,
    /// How long the overlay stays up.
    pub hold_delay: f32,
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self {
            intro_delay: 1.0,
            hold_delay: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeSettings {
    pub objectives_to_win: u32,
    /// Countdown budget in seconds.
    pub time_limit: f32,
    pub timings: SequenceTimings,
    pub victory_destination: VictoryDestination,
}

impl Default for OutcomeSettings {
    fn default() -> Self {
        Self {
            objectives_to_win: 3,
            time_limit: 60.0,
            timings: SequenceTimings::default(),
            victory_destination: VictoryDestination::default(),
        }
    }
}

//=== OutcomeSnapshot =====================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeSnapshot {
    pub state: OutcomeState,
    pub objectives_completed: u32,
    pub objectives_to_win: u32,
    pub remaining: f32,
}

//=== GameOutcome =========================================================

/// Playing/Victory/Loss machine for one session.
pub struct GameOutcome {
    settings: OutcomeSettings,
    state: OutcomeState,
    objectives_completed: u32,
    won: bool,
    countdown: Countdown,
    sequencer: Sequencer<Cue>,
    subscription: Option<SubscriptionId>,
}

impl GameOutcome {
    pub fn new(settings: OutcomeSettings) -> Self {
        Self {
            settings,
            state: OutcomeState::Playing,
            objectives_completed: 0,
            won: false,
            countdown: Countdown::new(settings.time_limit),
            sequencer: Sequencer::new(),
            subscription: None,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Subscribes to objective notifications. Enabling twice is a no-op.
    pub fn on_enable(&mut self, bus: &mut EventBus<GameSystems>) {
        if self.subscription.is_some() {
            debug!("Outcome machine already subscribed");
            return;
        }

        let id = bus.subscribe(|systems: &mut GameSystems| {
            systems.objective_activated();
            Ok(())
        });
        self.subscription = Some(id);
    }

    /// Removes the objective subscription, if any.
    pub fn on_disable(&mut self, bus: &mut EventBus<GameSystems>) {
        if let Some(id) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts the countdown and shows the full budget. Only the first call
    /// has an effect.
    pub fn start(&mut self, ui: &mut UiNavigation) {
        if !self.countdown.start() {
            debug!("Countdown already started");
            return;
        }

        info!(
            "Session started: {} objective(s) in {}s",
            self.settings.objectives_to_win, self.settings.time_limit
        );
        ui.show_timer(true);
        ui.set_timer(self.countdown.remaining());
    }

    /// Moves to `next` and starts its sequence.
    ///
    /// Returns false when `next` is already the current state.
    pub fn change_state(&mut self, next: OutcomeState) -> bool {
        if next == self.state {
            debug!("Outcome already {}, ignoring", next);
            return false;
        }

        info!("Outcome state: {} -> {}", self.state, next);
        self.state = next;

        match next {
            OutcomeState::Playing => {}
            OutcomeState::Victory => self.sequencer.start(victory_sequence(
                &self.settings.timings,
                self.settings.victory_destination,
            )),
            OutcomeState::Loss => self.sequencer.start(loss_sequence(&self.settings.timings)),
        }
        true
    }

    //--- Events -----------------------------------------------------------

    /// Counts one activated objective while playing.
    pub fn handle_objective_activated(&mut self, ui: &mut UiNavigation) {
        if self.state != OutcomeState::Playing {
            debug!("Objective ignored in state {}", self.state);
            return;
        }

        self.objectives_completed += 1;
        info!(
            "Objective completed: {}/{}",
            self.objectives_completed, self.settings.objectives_to_win
        );

        if self.objectives_completed >= self.settings.objectives_to_win {
            self.won = true;
            self.countdown.stop();
            ui.show_timer(false);
            self.change_state(OutcomeState::Victory);
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the countdown and the outcome sequences by `dt` seconds of
    /// scaled game time.
    pub fn tick(&mut self, dt: f32, ui: &mut UiNavigation, player: &mut dyn PlayerControl) {
        if !self.won {
            let expired = self.countdown.advance(dt, |remaining| {
                debug!("Time remaining: {}s", remaining);
                ui.set_timer(remaining);
            });

            if expired {
                info!("Time is up");
                ui.show_timer(false);
                self.change_state(OutcomeState::Loss);
            }
        }

        self.sequencer.advance(dt, |cue| match cue {
            Cue::SetPlayerControl(enabled) => player.set_enabled(*enabled),
            other => ui.apply_cue(other),
        });
    }

    //--- Query API --------------------------------------------------------

    pub fn state(&self) -> OutcomeState {
        self.state
    }

    pub fn objectives_completed(&self) -> u32 {
        self.objectives_completed
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn remaining(&self) -> f32 {
        self.countdown.remaining()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn settings(&self) -> &OutcomeSettings {
        &self.settings
    }

    /// Returns true while a victory or loss sequence is still running.
    pub fn is_sequence_running(&self) -> bool {
        !self.sequencer.is_empty()
    }

    pub fn snapshot(&self) -> OutcomeSnapshot {
        OutcomeSnapshot {
            state: self.state,
            objectives_completed: self.objectives_completed,
            objectives_to_win: self.settings.objectives_to_win,
            remaining: self.countdown.remaining(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
