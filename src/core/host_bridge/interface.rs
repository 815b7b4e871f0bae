//=========================================================================
// Host Bridge Interface
//=========================================================================
//
// Messages exchanged between the host (window, input, widgets) and the
// logic thread.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::session::SessionSnapshot;

//=== HostCommand =========================================================

/// Requests sent from the host to the logic thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// The player used the object with this name.
    Interact(String),

    /// Pause key pressed.
    PauseRequested,

    PlayClicked,
    ResumeClicked,
    OptionsClicked,
    OptionsBackClicked,
    ExitClicked,

    /// Host is closing; stop the logic thread.
    Shutdown,
}

//=== HostEvent ===========================================================

/// Notifications sent from the logic thread back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Observable state after a tick.
    Snapshot(SessionSnapshot),

    /// The logic thread has stopped.
    Exited,
}
