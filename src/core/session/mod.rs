//=========================================================================
// Session
//=========================================================================
//
// Wires the state machines, the objective bus and the level together.
//
// Architecture:
//   Session
//     ├─ systems: GameSystems          (context passed to bus handlers)
//     │    ├─ ui: UiNavigation
//     │    ├─ outcome: Option<GameOutcome>
//     │    └─ player: Box<dyn PlayerControl>
//     ├─ objective_events: EventBus<GameSystems>
//     └─ level: Option<Level>
//
// The bus lives outside the context it delivers to, so a terminal can
// publish while the level it belongs to is borrowed.
//
//=========================================================================

//=== Module Declarations =================================================

mod game_session;
mod systems;

//=== Public API ==========================================================

pub use game_session::{Session, SessionSnapshot};
pub use systems::GameSystems;
