//! Channels between the input task and the simulation tick.
//!
//! The input side only ever holds senders and the tick only ever holds
//! receivers, so direction state is owned by the simulation alone.

use std::io;

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use tracing::{debug, trace};

use crate::input::Direction;

/// Creates a bounded turn-intent queue.
#[must_use]
pub fn turn_queue(capacity: usize) -> (TurnSender, DirectionQueue) {
    let (sender, receiver) = crossbeam_channel::bounded(capacity);
    (TurnSender { sender }, DirectionQueue { receiver })
}

/// Creates the single-slot quit signal.
#[must_use]
pub fn quit_signal() -> (QuitSender, QuitReceiver) {
    let (sender, receiver) = crossbeam_channel::bounded(1);
    (QuitSender { sender }, QuitReceiver { receiver })
}

/// Producer half of the turn queue, owned by the input task.
#[derive(Debug, Clone)]
pub struct TurnSender {
    sender: Sender<Direction>,
}

impl TurnSender {
    /// Queues a turn intent without blocking.
    ///
    /// Returns false when the intent was dropped because the queue is full or
    /// the game has already finished.
    pub fn push(&self, direction: Direction) -> bool {
        match self.sender.try_send(direction) {
            Ok(()) => true,
            Err(TrySendError::Full(direction)) => {
                debug!(?direction, "turn queue full, dropping intent");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer half of the turn queue, drained once per tick.
#[derive(Debug)]
pub struct DirectionQueue {
    receiver: Receiver<Direction>,
}

impl DirectionQueue {
    /// Pulls queued intents in arrival order until one is an actual turn
    /// away from `current`.
    ///
    /// Repeats of the current direction and reversals are discarded. Intents
    /// behind the accepted one stay queued for the next tick.
    pub fn next_turn(&self, current: Direction) -> Option<Direction> {
        for direction in self.receiver.try_iter() {
            if current.accepts_turn(direction) {
                trace!(from = ?current, to = ?direction, "turn accepted");
                return Some(direction);
            }
            trace!(current = ?current, rejected = ?direction, "turn discarded");
        }
        None
    }

    /// Number of intents still waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

/// Reason the input task asks the game loop to stop.
#[derive(Debug)]
pub enum QuitSignal {
    /// The player pressed the quit key.
    Requested,
    /// Key capture failed; the run must abort.
    InputFailed(io::Error),
}

/// Producer half of the quit signal.
#[derive(Debug, Clone)]
pub struct QuitSender {
    sender: Sender<QuitSignal>,
}

impl QuitSender {
    /// Raises the quit signal. A second signal while one is pending is dropped.
    pub fn signal(&self, signal: QuitSignal) {
        let _ = self.sender.try_send(signal);
    }

    /// Shorthand for a player-requested quit.
    pub fn request(&self) {
        self.signal(QuitSignal::Requested);
    }
}

/// Consumer half of the quit signal, polled once per tick.
#[derive(Debug)]
pub struct QuitReceiver {
    receiver: Receiver<QuitSignal>,
}

impl QuitReceiver {
    /// Non-blocking check for a pending signal.
    ///
    /// A disconnected sender is not a quit: the input task may finish without
    /// ever asking to stop, and the game keeps ticking on its own.
    pub fn poll(&self) -> Option<QuitSignal> {
        match self.receiver.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
