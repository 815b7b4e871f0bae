//=========================================================================
// Sequencer
//=========================================================================
//
// Cooperative step lists driven by the fixed update tick.
//
// A sequence is a flat list of steps, each either an immediate effect or
// a wait. Its runtime state is just a cursor and the time spent in the
// current wait, so sequences can be inspected and stepped in tests
// without real time passing.
//
//   advance(dt):
//     Do(a)   → apply(a), cursor += 1, continue
//     Wait(t) → consume dt until t is reached, then continue
//     end     → finished
//
// Leftover time from a completed wait flows into the following steps.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Constants ===========================================================

/// Slack allowed when comparing accumulated tick time against a wait.
const WAIT_EPSILON: f32 = 1e-4;

//=== Step ================================================================

/// One entry in a [`Sequence`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step<A> {
    /// Apply an effect immediately.
    Do(A),

    /// Suspend for the given number of seconds.
    Wait(f32),
}

//=== Sequence ============================================================

/// A labelled list of steps with its own cursor.
#[derive(Debug, Clone)]
pub struct Sequence<A> {
    label: &'static str,
    steps: Vec<Step<A>>,
    cursor: usize,
    waited: f32,
}

impl<A> Sequence<A> {
    /// Creates a sequence positioned at its first step.
    pub fn new(label: &'static str, steps: Vec<Step<A>>) -> Self {
        Self {
            label,
            steps,
            cursor: 0,
            waited: 0.0,
        }
    }

    /// Name used in logs and [`Sequencer::is_running`].
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// All steps, including the ones already executed.
    pub fn steps(&self) -> &[Step<A>] {
        &self.steps
    }

    /// Index of the next step to execute.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true once every step has run.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Runs every step that becomes due within `dt` seconds.
    ///
    /// Returns true when the sequence has finished.
    pub fn advance(&mut self, dt: f32, mut apply: impl FnMut(&A)) -> bool {
        let mut budget = dt.max(0.0);

        while let Some(step) = self.steps.get(self.cursor) {
            match step {
                Step::Do(action) => {
                    apply(action);
                    self.cursor += 1;
                }
                Step::Wait(duration) => {
                    let needed = duration - self.waited;
                    if budget + WAIT_EPSILON >= needed {
                        budget = (budget - needed).max(0.0);
                        self.waited = 0.0;
                        self.cursor += 1;
                    } else {
                        self.waited += budget;
                        return false;
                    }
                }
            }
        }

        true
    }
}

//=== Sequencer ===========================================================

/// Runs any number of sequences side by side.
///
/// Sequences are advanced in start order and dropped once finished.
/// Nothing cancels a sequence: once started it runs to completion.
#[derive(Debug, Clone)]
pub struct Sequencer<A> {
    running: Vec<Sequence<A>>,
}

impl<A> Sequencer<A> {
    pub fn new() -> Self {
        Self {
            running: Vec::new(),
        }
    }

    /// Queues a sequence. Its leading immediate steps run on the next advance.
    pub fn start(&mut self, sequence: Sequence<A>) {
        debug!("Starting sequence '{}' ({} steps)", sequence.label(), sequence.steps().len());
        self.running.push(sequence);
    }

    /// Advances all running sequences by `dt` seconds.
    pub fn advance(&mut self, dt: f32, mut apply: impl FnMut(&A)) {
        for sequence in self.running.iter_mut() {
            sequence.advance(dt, &mut apply);
        }

        self.running.retain(|sequence| {
            if sequence.is_finished() {
                debug!("Sequence '{}' finished", sequence.label());
                false
            } else {
                true
            }
        });
    }

    /// Returns true if a sequence with this label is still running.
    pub fn is_running(&self, label: &str) -> bool {
        self.running.iter().any(|s| s.label() == label)
    }

    /// Currently running sequences, in start order.
    pub fn running(&self) -> &[Sequence<A>] {
        &self.running
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

impl<A> Default for Sequencer<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
