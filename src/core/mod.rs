//=========================================================================
// Core Systems Orchestrator
//
// Runs the session on the logic (non-host) thread.
//
// Responsibilities:
// - Receive host commands via a bounded channel
// - Tick the session at a fixed rate (TPS)
// - Publish a snapshot of the observable state after every tick
//
// The event channel never blocks the logic thread. When the host falls
// behind, the oldest unread event is discarded so the newest snapshot
// always gets through.
//
// Notes:
// The session is owned by the logic thread for its whole life. Hosts
// only talk to it through `HostCommand` / `HostEvent` message passing,
// so no session state is ever shared across threads.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_bus;
pub mod host_bridge;
pub mod outcome;
pub mod player;
pub mod scene_loader;
pub mod sequence;
pub mod session;
pub mod ui;
pub mod world;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{error, info, trace, warn};

//=== Internal Dependencies ===============================================

use host_bridge::{CommandCollector, HostCommand, HostEvent, TickControl};
use session::Session;

//=== CoreSystemsOrchestrator =============================================

/// Owns the session and drives it at a fixed tick rate.
pub(crate) struct CoreSystemsOrchestrator {
    session: Session,
    collector: CommandCollector,
    events: Sender<HostEvent>,
    /// Receiving end of `events`, used to evict unread events when full.
    backlog: Receiver<HostEvent>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        session: Session,
        commands: Receiver<HostCommand>,
        events: Sender<HostEvent>,
        backlog: Receiver<HostEvent>,
    ) -> Self {
        Self {
            session,
            collector: CommandCollector::new(commands),
            events,
            backlog,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects host commands and applies them to the session
    //  2. Advances the session by one fixed step
    //  3. Publishes a snapshot
    //  4. Sleeps to maintain fixed pacing
    //
    // The session is handed back through the join handle on exit.
    //
    pub(crate) fn spawn_core_thread(self, tps: f64) -> thread::JoinHandle<Session> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        thread::spawn(move || {
            let mut orchestrator = self;

            loop {
                let frame_start = Instant::now();

                if orchestrator.run_frame(dt) == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            orchestrator.push_event(HostEvent::Exited);
            orchestrator.session
        })
    }

    //--- run_frame() ------------------------------------------------------

    /// Runs one logic frame of `dt` seconds.
    pub(crate) fn run_frame(&mut self, dt: f32) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        for command in self.collector.take_commands() {
            match self.session.handle(command) {
                Ok(TickControl::Continue) => {}
                Ok(TickControl::Exit) => return TickControl::Exit,
                Err(e) => warn!("Command failed: {}", e),
            }
        }

        self.session.tick(dt);
        self.publish_snapshot();

        TickControl::Continue
    }

    fn publish_snapshot(&self) {
        self.push_event(HostEvent::Snapshot(self.session.snapshot()));
    }

    /// Queues `event`, evicting the oldest unread event if the channel is full.
    fn push_event(&self, event: HostEvent) {
        let event = match self.events.try_send(event) {
            Ok(()) => return,
            Err(TrySendError::Full(event)) => event,
            Err(TrySendError::Disconnected(_)) => {
                error!("Host event channel disconnected");
                return;
            }
        };

        if self.backlog.try_recv().is_ok() {
            trace!("Host is not draining events, evicted the oldest one");
        }
        if let Err(e) = self.events.try_send(event) {
            warn!("Dropped host event: {}", e);
        }
    }

    #[cfg(test)]
    fn session(&self) -> &Session {
        &self.session
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
