//=========================================================================
// Errors
//=========================================================================
//
// Error types shared across the runtime.
//
// Bad input to the state machines (re-entering a state, going back from
// Options with nothing recorded, touching a missing panel) is handled by
// fallback policy and never shows up here. These types only describe
// real failures: configuration I/O, unknown scenes, event handlers that
// fail, and a logic thread that went away.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SceneLoadError ======================================================

/// Failures reported by a [`crate::core::scene_loader::SceneLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneLoadError {
    #[error("scene '{0}' is not known to the loader")]
    UnknownScene(String),

    #[error("scene load ticket {0} is not tracked by the loader")]
    UnknownTicket(u64),
}

//=== ConfigError =========================================================

/// Failures while reading or writing the runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to write config: {0}")]
    Write(String),

    #[error("invalid value for [{section}] {key}: {reason}")]
    Invalid {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

//=== RuntimeError ========================================================

/// Top-level error for runtime operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An event handler reported a failure. Publishing stops at the first one.
    #[error("event handler failed: {0}")]
    Handler(String),

    /// A play request arrived while a scene load was still running.
    #[error("scene '{0}' is already loading")]
    LoadInProgress(String),

    #[error(transparent)]
    SceneLoad(#[from] SceneLoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The logic thread is gone and can no longer receive commands.
    #[error("runtime channel closed")]
    ChannelClosed,

    #[error("logic thread panicked")]
    ThreadPanicked,
}

/// Result alias used by event handlers and interactables.
pub type HandlerResult = Result<(), RuntimeError>;

//=========================================================================
// Unit Tests
//=========================================================================
