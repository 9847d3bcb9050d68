use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use log::{debug, warn};

use crate::engine::{RunController, StepOutcome, build_settings};
use crate::worker::types::{Command, Event, Status, WorkerError};

/// Handle to the solver thread. Commands go in over one channel, status,
/// messages and snapshots come back over another; no memory is shared with
/// the engine. Dropping the handle closes the command channel, which makes
/// the thread finish its current batch and exit.
#[derive(Debug)]
pub struct SolverWorker {
    commands: Option<Sender<Command>>,
    events: Receiver<Event>,
    handle: Option<JoinHandle<()>>,
}

impl SolverWorker {
    /// Spawn the solver thread.
    ///
    /// # Errors
    ///
    /// Fails only if the OS refuses to spawn the thread.
    pub fn spawn() -> Result<Self, WorkerError> {
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let handle = thread::Builder::new()
            .name("everynumber-solver".to_string())
            .spawn(move || run_loop(&command_rx, &event_tx))?;
        Ok(Self {
            commands: Some(command_tx),
            events: event_rx,
            handle: Some(handle),
        })
    }

    /// Send a command to the worker.
    ///
    /// # Errors
    ///
    /// Fails if the worker thread has exited.
    pub fn send(&self, command: Command) -> Result<(), WorkerError> {
        self.commands
            .as_ref()
            .ok_or(WorkerError::Disconnected)?
            .send(command)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// The event channel carrying status changes, messages and snapshots.
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Close the command channel and wait for the thread to finish.
    pub fn shutdown(mut self) {
        self.commands.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SolverWorker {
    fn drop(&mut self) {
        self.commands.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

struct WorkerState {
    session: Option<RunController>,
    status: Status,
    events: Sender<Event>,
}

fn run_loop(commands: &Receiver<Command>, events: &Sender<Event>) {
    let mut worker = WorkerState {
        session: None,
        status: Status::Idle,
        events: events.clone(),
    };
    loop {
        // while running, drain commands without blocking so work continues;
        // otherwise block until the next command arrives
        let command = if worker.status == Status::Running {
            match commands.try_recv() {
                Ok(command) => Some(command),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => return,
            }
        } else {
            match commands.recv() {
                Ok(command) => Some(command),
                Err(_) => return,
            }
        };
        match command {
            Some(command) => worker.handle_command(command),
            None => worker.step(),
        }
    }
}

impl WorkerState {
    fn emit(&self, event: Event) {
        // the host may have stopped listening; the command channel
        // disconnect will end the loop shortly after
        let _ = self.events.send(event);
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        self.emit(Event::Status(status));
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start(options) => {
                self.emit(Event::ClearMessages);
                match build_settings(&options) {
                    Ok(settings) => {
                        let controller = RunController::new(settings);
                        self.emit(Event::Message("Starting".to_string()));
                        self.emit(Event::Snapshot(controller.snapshot(false)));
                        self.session = Some(controller);
                        self.set_status(Status::Running);
                    }
                    Err(error) => {
                        warn!("Rejecting start: {}", error);
                        self.emit(Event::Message(format!("Cannot start: {}", error)));
                        self.session = None;
                        self.set_status(Status::Idle);
                    }
                }
            }
            Command::Pause => {
                if self.status == Status::Running
                    && let Some(controller) = self.session.as_mut()
                {
                    controller.pause();
                    let snapshot = controller.snapshot(true);
                    self.emit(Event::Message("Pausing".to_string()));
                    self.emit(Event::Snapshot(snapshot));
                    self.set_status(Status::Paused);
                }
            }
            Command::Resume => {
                if self.status == Status::Paused
                    && let Some(controller) = self.session.as_mut()
                {
                    controller.resume();
                    self.emit(Event::Message("Resuming".to_string()));
                    self.set_status(Status::Running);
                }
            }
            Command::Stop => {
                if let Some(controller) = self.session.take() {
                    self.emit(Event::Message("Finished (stopped)".to_string()));
                    self.emit(Event::Snapshot(controller.snapshot(true)));
                }
                self.set_status(Status::Idle);
            }
        }
    }

    fn step(&mut self) {
        let Some(controller) = self.session.as_mut() else {
            self.status = Status::Idle;
            return;
        };
        match controller.step_batch() {
            StepOutcome::Continue | StepOutcome::Yielded => {
                if controller.take_snapshot_due() {
                    let snapshot = controller.snapshot(false);
                    debug!(
                        "Heartbeat: {} processed, {} queued, {} solved",
                        snapshot.processed_total, snapshot.queue_size, snapshot.solution_count
                    );
                    self.emit(Event::Snapshot(snapshot));
                }
            }
            StepOutcome::Paused => {
                let snapshot = controller.snapshot(true);
                self.emit(Event::Message("Pausing (time budget reached)".to_string()));
                self.emit(Event::Snapshot(snapshot));
                self.set_status(Status::Paused);
            }
            StepOutcome::Done => {
                let snapshot = controller.snapshot(true);
                self.emit(Event::Message("Finished (complete)".to_string()));
                self.emit(Event::Snapshot(snapshot));
                self.set_status(Status::Done);
            }
        }
    }
}
