//=========================================================================
// Timed Sequences
//=========================================================================
//
// Non-blocking choreography for victory, loss and scene loading.
//
// Architecture:
//   Sequencer<A>
//     └─ running: Vec<Sequence<A>>
//          └─ steps: [Do(A) | Wait(secs)], cursor, waited
//
// Flow:
//   owner.tick(dt) → sequencer.advance(dt, apply) → apply(cue) per due step
//
//=========================================================================

//=== Module Declarations =================================================

mod cue;
mod sequencer;

//=== Public API ==========================================================

pub use cue::Cue;
pub use sequencer::{Sequence, Sequencer, Step};
