//=========================================================================
// Command Collector
//=========================================================================
//
// Logic-side collector for host commands with bounded polling and
// shutdown detection.
//
// Architecture:
//   Receiver<HostCommand> → collect_frame() → commands → TickControl
//
// Bounded polling keeps a flooding host from starving the update tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::HostCommand;

//=== Constants ===========================================================

const MAX_COMMANDS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== CommandCollector ====================================================

pub struct CommandCollector {
    receiver: Receiver<HostCommand>,
    commands: Vec<HostCommand>,
}

impl CommandCollector {
    pub fn new(receiver: Receiver<HostCommand>) -> Self {
        Self {
            receiver,
            commands: Vec::with_capacity(8),
        }
    }

    /// Collects pending commands for this frame.
    ///
    /// Returns `Exit` on `Shutdown` or when every sender is gone.
    pub fn collect_frame(&mut self) -> TickControl {
        self.commands.clear();
        let mut drained = 0;

        while drained < MAX_COMMANDS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(HostCommand::Shutdown) => {
                    info!("Shutdown requested by host");
                    return TickControl::Exit;
                }
                Ok(command) => {
                    self.commands.push(command);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    info!("Host disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_COMMANDS_PER_FRAME {
            warn!("Command queue backlog: drained {} commands this frame", drained);
        }

        TickControl::Continue
    }

    /// Commands collected by the last [`collect_frame`](Self::collect_frame).
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Takes the collected commands, leaving an empty buffer.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<HostCommand>();
        let mut collector = CommandCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.commands().is_empty());
    }

    #[test]
    fn collect_keeps_send_order() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);

        tx.send(HostCommand::PlayClicked).unwrap();
        tx.send(HostCommand::Interact("terminal_a".into())).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.take_commands(),
            vec![
                HostCommand::PlayClicked,
                HostCommand::Interact("terminal_a".into())
            ]
        );
        assert!(collector.commands().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_shutdown() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);

        tx.send(HostCommand::Shutdown).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<HostCommand>();
        let mut collector = CommandCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);

        for _ in 0..150 {
            tx.send(HostCommand::PauseRequested).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.commands().len(), MAX_COMMANDS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.commands().len(), 50);
    }

    #[test]
    fn collect_clears_previous_frame() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);

        tx.send(HostCommand::OptionsClicked).unwrap();
        collector.collect_frame();
        assert_eq!(collector.commands().len(), 1);

        collector.collect_frame();
        assert!(collector.commands().is_empty());
    }
}
