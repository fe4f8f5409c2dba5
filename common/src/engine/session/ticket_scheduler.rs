use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, Sleep};

use super::game_session::{ComputerTurn, RoundRestart};

/// Holds at most one pending ticket and the timer that releases it.
///
/// `wait` is cancel-safe: dropping it inside `tokio::select!` keeps the
/// ticket and the deadline for the next call.
pub struct TicketScheduler<T> {
    delay: Duration,
    pending: Option<T>,
    timer: Option<Pin<Box<Sleep>>>,
}

/// Releases the computer's reply after a short pause.
pub type ComputerTurnScheduler = TicketScheduler<ComputerTurn>;

/// Releases the automatic new round after a result has been shown.
pub type RoundRestartScheduler = TicketScheduler<RoundRestart>;

impl<T: Copy> TicketScheduler<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            timer: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces any earlier ticket. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, ticket: T) {
        let deadline = Instant::now() + self.delay;
        match self.timer.as_mut() {
            Some(timer) => timer.as_mut().reset(deadline),
            None => self.timer = Some(Box::pin(tokio::time::sleep_until(deadline))),
        }
        self.pending = Some(ticket);
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Resolves with the ticket once the delay has elapsed, or `None`
    /// straight away when nothing is scheduled.
    pub async fn wait(&mut self) -> Option<T> {
        if self.pending.is_none() {
            return None;
        }
        if let Some(timer) = self.timer.as_mut() {
            timer.as_mut().await;
        }
        self.pending.take()
    }
}
