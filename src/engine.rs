//=========================================================================
// Outpost Runtime
//
// Main entry point for hosts.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──spawn()──>  RuntimeHandle
//         │                           │                        │
//         ├─ with_config()            └─ init()                ├─ send()
//         ├─ with_tps()                                        ├─ events()
//         ├─ with_channel_capacity()                           └─ shutdown()
//         ├─ with_scene_loader()
//         └─ with_player()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::{RuntimeConfig, MAX_TPS, MIN_TPS};
use crate::core::host_bridge::{HostCommand, HostEvent};
use crate::core::player::{PlayerControl, PlayerController};
use crate::core::scene_loader::{SceneLoader, SimulatedSceneLoader};
use crate::core::session::{Session, SessionSnapshot};
use crate::core::CoreSystemsOrchestrator;
use crate::error::RuntimeError;

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 commands
/// - **Scene loader**: [`SimulatedSceneLoader`] knowing the configured level
/// - **Player**: [`PlayerController`] with a main camera
///
/// # Examples
///
/// ```no_run
/// use outpost_runtime::prelude::*;
///
/// let handle = RuntimeBuilder::new()
///     .with_tps(120.0)
///     .build()
///     .spawn();
///
/// handle.send(HostCommand::PlayClicked).unwrap();
/// let session = handle.shutdown().unwrap();
/// ```
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    loader: Option<Box<dyn SceneLoader>>,
    player: Option<Box<dyn PlayerControl>>,
}

impl RuntimeBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::new(),
            loader: None,
            player: None,
        }
    }

    /// Replaces the whole configuration, including tps and channel capacity.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Self::with_tps`] and
    /// [`Self::with_channel_capacity`].
    pub fn with_config(self, config: RuntimeConfig) -> Self {
        let (tps, capacity) = (config.tps, config.channel_capacity);
        Self { config, ..self }
            .with_tps(tps)
            .with_channel_capacity(capacity)
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0` or `tps` lies outside `1.0..=10000.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        assert!(
            (MIN_TPS..=MAX_TPS).contains(&tps),
            "TPS must be between {} and {}, got {}",
            MIN_TPS,
            MAX_TPS,
            tps
        );
        self.config.tps = tps;
        self
    }

    /// Sets the capacity of the host → logic command channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    /// Uses a host-provided scene loader.
    pub fn with_scene_loader<L>(mut self, loader: L) -> Self
    where
        L: SceneLoader + 'static,
    {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Uses a host-provided player controller.
    pub fn with_player<P>(mut self, player: P) -> Self
    where
        P: PlayerControl + 'static,
    {
        self.player = Some(Box::new(player));
        self
    }

    /// Builds the runtime and its session (which enters the main menu).
    pub fn build(self) -> Runtime {
        info!(
            "Building runtime (TPS: {}, channel: {})",
            self.config.tps, self.config.channel_capacity
        );

        let loader: Box<dyn SceneLoader> = match self.loader {
            Some(loader) => loader,
            None => Box::new(SimulatedSceneLoader::new([self.config.level_scene.clone()])),
        };
        let player: Box<dyn PlayerControl> = match self.player {
            Some(player) => player,
            None => Box::new(PlayerController::default()),
        };

        Runtime {
            session: Session::new(&self.config, loader, player),
            tps: self.config.tps,
            channel_capacity: self.config.channel_capacity,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// A built session waiting to be moved onto its logic thread.
///
/// # Architecture
///
/// ```text
/// Host (caller thread)
///   └─► RuntimeHandle ──HostCommand──► CoreSystemsOrchestrator (Logic Thread @ TPS)
///                     ◄──HostEvent───       └─► Session
/// ```
pub struct Runtime {
    session: Session,
    tps: f64,
    channel_capacity: usize,
}

impl Runtime {
    /// Gives access to the session before the logic thread starts.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Session),
    {
        info!("Initializing session");
        init_fn(&mut self.session);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Spawns the logic thread and returns the host's handle to it.
    pub fn spawn(self) -> RuntimeHandle {
        info!("Starting runtime (TPS: {})", self.tps);

        let (command_tx, command_rx) = bounded(self.channel_capacity);
        let (event_tx, event_rx) = bounded(self.channel_capacity);

        let orchestrator =
            CoreSystemsOrchestrator::new(self.session, command_rx, event_tx, event_rx.clone());
        let thread = orchestrator.spawn_core_thread(self.tps);
        info!("Core logic thread spawned");

        RuntimeHandle {
            commands: command_tx,
            events: event_rx,
            thread,
        }
    }
}

//=== RuntimeHandle =======================================================

/// Host-side handle to a running logic thread.
pub struct RuntimeHandle {
    commands: Sender<HostCommand>,
    events: Receiver<HostEvent>,
    thread: JoinHandle<Session>,
}

impl RuntimeHandle {
    /// Queues a command for the logic thread.
    pub fn send(&self, command: HostCommand) -> Result<(), RuntimeError> {
        self.commands
            .send(command)
            .map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Events published by the logic thread.
    pub fn events(&self) -> &Receiver<HostEvent> {
        &self.events
    }

    /// Drains pending events and returns the most recent snapshot, if any.
    pub fn latest_snapshot(&self) -> Option<SessionSnapshot> {
        self.events
            .try_iter()
            .filter_map(|event| match event {
                HostEvent::Snapshot(snapshot) => Some(snapshot),
                HostEvent::Exited => None,
            })
            .last()
    }

    /// Returns true once the logic thread has stopped.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Asks the logic thread to stop and waits for it.
    pub fn shutdown(self) -> Result<Session, RuntimeError> {
        // A closed channel means the thread is already on its way out.
        let _ = self.commands.send(HostCommand::Shutdown);
        self.join()
    }

    /// Waits for the logic thread to stop on its own (e.g. Exit button).
    pub fn join(self) -> Result<Session, RuntimeError> {
        drop(self.commands);

        match self.thread.join() {
            Ok(session) => {
                info!("Core thread terminated cleanly");
                Ok(session)
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
                Err(RuntimeError::ThreadPanicked)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
