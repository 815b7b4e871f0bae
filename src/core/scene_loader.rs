//=========================================================================
// Scene Loader
//=========================================================================
//
// Contract for the host's asynchronous scene loading, plus an in-memory
// implementation used by the headless runtime and the tests.
//
// The UI only needs three things from a loader: start a load by name,
// hold activation until it says so, and tell when the load is done.
// Real progress is never shown; the loading bar is simulated.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::error::SceneLoadError;

//=== LoadTicket ==========================================================

/// Identifies one in-flight (or finished) scene load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub u64);

//=== SceneLoader Trait ===================================================

/// Asynchronous scene loading with deferred activation.
pub trait SceneLoader: Send {
    /// Starts loading `scene`. Activation is deferred until allowed.
    fn begin_load(&mut self, scene: &str) -> Result<LoadTicket, SceneLoadError>;

    /// Allows (or keeps holding) activation of a load.
    fn set_allow_activation(&mut self, ticket: LoadTicket, allow: bool)
        -> Result<(), SceneLoadError>;

    /// Real progress in `0.0..=1.0`. Unknown tickets report 0.
    fn progress(&self, ticket: LoadTicket) -> f32;

    /// Returns true once the scene is loaded and activated.
    fn is_done(&self, ticket: LoadTicket) -> bool;

    /// Advances in-flight loads by `dt` real seconds.
    fn update(&mut self, _dt: f32) {}

    /// Forgets a finished load. Its ticket is unknown afterwards.
    fn release(&mut self, _ticket: LoadTicket) {}
}

//=== SimulatedSceneLoader ================================================

/// Progress at which a load waits for activation to be allowed.
pub const ACTIVATION_THRESHOLD: f32 = 0.9;

#[derive(Debug, Clone)]
struct PendingLoad {
    scene: String,
    progress: f32,
    allow_activation: bool,
    done: bool,
}

/// In-memory loader that knows a fixed set of scene names.
///
/// Progress climbs at `load_rate` per second up to
/// [`ACTIVATION_THRESHOLD`] and completes on the first update after
/// activation is allowed.
#[derive(Debug, Clone)]
pub struct SimulatedSceneLoader {
    scenes: HashSet<String>,
    loads: HashMap<LoadTicket, PendingLoad>,
    next_ticket: u64,
    load_rate: f32,
}

impl SimulatedSceneLoader {
    /// Creates a loader able to load the given scenes.
    pub fn new<I, S>(scenes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scenes: scenes.into_iter().map(Into::into).collect(),
            loads: HashMap::new(),
            next_ticket: 0,
            load_rate: 1.0,
        }
    }

    /// Sets how much real progress is made per second.
    pub fn with_load_rate(mut self, rate: f32) -> Self {
        self.load_rate = rate.max(0.0);
        self
    }

    /// Registers another loadable scene.
    pub fn add_scene(&mut self, scene: impl Into<String>) {
        self.scenes.insert(scene.into());
    }

    /// Number of loads still tracked (in flight or not yet released).
    pub fn tracked_loads(&self) -> usize {
        self.loads.len()
    }

    /// Name of the scene behind a ticket.
    pub fn scene_of(&self, ticket: LoadTicket) -> Option<&str> {
        self.loads.get(&ticket).map(|load| load.scene.as_str())
    }
}

impl SceneLoader for SimulatedSceneLoader {
    fn begin_load(&mut self, scene: &str) -> Result<LoadTicket, SceneLoadError> {
        if !self.scenes.contains(scene) {
            return Err(SceneLoadError::UnknownScene(scene.to_string()));
        }

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.loads.insert(
            ticket,
            PendingLoad {
                scene: scene.to_string(),
                progress: 0.0,
                allow_activation: false,
                done: false,
            },
        );

        info!("Loading scene '{}' ({:?})", scene, ticket);
        Ok(ticket)
    }

    fn set_allow_activation(
        &mut self,
        ticket: LoadTicket,
        allow: bool,
    ) -> Result<(), SceneLoadError> {
        let load = self
            .loads
            .get_mut(&ticket)
            .ok_or(SceneLoadError::UnknownTicket(ticket.0))?;
        load.allow_activation = allow;
        debug!("Scene '{}' activation allowed: {}", load.scene, allow);
        Ok(())
    }

    fn progress(&self, ticket: LoadTicket) -> f32 {
        self.loads.get(&ticket).map(|l| l.progress).unwrap_or(0.0)
    }

    fn is_done(&self, ticket: LoadTicket) -> bool {
        self.loads.get(&ticket).map(|l| l.done).unwrap_or(false)
    }

    fn release(&mut self, ticket: LoadTicket) {
        if let Some(load) = self.loads.remove(&ticket) {
            debug!("Released load of scene '{}' ({:?})", load.scene, ticket);
        }
    }

    fn update(&mut self, dt: f32) {
        for load in self.loads.values_mut().filter(|l| !l.done) {
            load.progress = (load.progress + self.load_rate * dt).min(ACTIVATION_THRESHOLD);

            if load.allow_activation {
                load.progress = 1.0;
                load.done = true;
                info!("Scene '{}' activated", load.scene);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
