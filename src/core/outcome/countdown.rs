//=========================================================================
// Countdown
//=========================================================================
//
// Whole-second countdown driven by the fixed update tick.
//
// Elapsed time accumulates until a full logical second has passed; each
// second decrements the remaining budget by exactly one. The countdown
// expires on the tick where the remaining budget reaches zero, and can be
// stopped at any point (a win) so it never expires afterwards.
//
//=========================================================================

//=== Constants ===========================================================

/// Length of one logical countdown tick, in seconds.
pub const COUNTDOWN_TICK: f32 = 1.0;

/// Slack when comparing accumulated time against a full tick.
const TICK_EPSILON: f32 = 1e-4;

//=== CountdownPhase ======================================================

/// Lifecycle of a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    NotStarted,
    Running,
    Stopped,
    Expired,
}

//=== Countdown ===========================================================

#[derive(Debug, Clone)]
pub struct Countdown {
    budget: f32,
    remaining: f32,
    carry: f32,
    phase: CountdownPhase,
}

impl Countdown {
    /// Creates a countdown with `budget` seconds, not yet running.
    pub fn new(budget: f32) -> Self {
        Self {
            budget,
            remaining: budget,
            carry: 0.0,
            phase: CountdownPhase::NotStarted,
        }
    }

    /// Starts the countdown. Returns false if it was already started once.
    pub fn start(&mut self) -> bool {
        if self.phase != CountdownPhase::NotStarted {
            return false;
        }
        self.phase = CountdownPhase::Running;
        true
    }

    /// Stops a running countdown for good.
    pub fn stop(&mut self) {
        if self.phase == CountdownPhase::Running {
            self.phase = CountdownPhase::Stopped;
        }
    }

    /// Advances by `dt` seconds.
    ///
    /// `on_tick` receives the new remaining value after every whole-second
    /// decrement. Returns true on the call where the countdown expires.
    pub fn advance(&mut self, dt: f32, mut on_tick: impl FnMut(f32)) -> bool {
        if self.phase != CountdownPhase::Running {
            return false;
        }

        self.carry += dt.max(0.0);

        loop {
            if self.remaining <= 0.0 {
                self.phase = CountdownPhase::Expired;
                return true;
            }
            if self.carry + TICK_EPSILON < COUNTDOWN_TICK {
                return false;
            }

            self.carry -= COUNTDOWN_TICK;
            self.remaining -= COUNTDOWN_TICK;
            on_tick(self.remaining);
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn budget(&self) -> f32 {
        self.budget
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == CountdownPhase::Running
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
