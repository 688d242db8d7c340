//! Per-question countdown timer.
//!
//! One activation is alive at a time. Each activation is a spawned task
//! that sends one [`TimerEvent::Tick`] per elapsed second and a terminal
//! [`TimerEvent::Expired`] over the session's event channel, so timer
//! events reach the controller on the same serialized context as user
//! input.
//!
//! Every activation carries a generation number. [`CountdownTimer::cancel`]
//! bumps the generation and aborts the task; an event from a previous
//! activation that was already queued fails [`CountdownTimer::is_current`]
//! on delivery and must be dropped by the consumer. This is what keeps a
//! stale timer from question N from corrupting question N+1.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Notification from a timer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One whole second elapsed; `remaining` counts down to 0 inclusive.
    Tick { generation: u64, remaining: u32 },
    /// The countdown reached zero. Sent exactly once per activation,
    /// immediately after the tick at zero; the activation then stops.
    Expired { generation: u64 },
}

impl TimerEvent {
    pub fn generation(&self) -> u64 {
        match self {
            TimerEvent::Tick { generation, .. } | TimerEvent::Expired { generation } => {
                *generation
            }
        }
    }
}

/// Single-activation countdown clock.
pub struct CountdownTimer {
    events: UnboundedSender<TimerEvent>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    /// Create an idle timer that will emit onto `events`.
    pub fn new(events: UnboundedSender<TimerEvent>) -> Self {
        Self {
            events,
            generation: 0,
            handle: None,
        }
    }

    /// Begin a fresh activation counting down from `duration_secs`.
    ///
    /// Replaces any prior activation. Starting with a zero duration is a
    /// programming error.
    pub fn start(&mut self, duration_secs: u32) {
        assert!(duration_secs > 0, "timer duration must be positive");

        self.cancel();
        let generation = self.generation;
        let events = self.events.clone();

        self.handle = Some(tokio::spawn(async move {
            let mut remaining = duration_secs;
            while remaining > 0 {
                tokio::time::sleep(Duration::from_secs(1)).await;
                remaining -= 1;
                if events.send(TimerEvent::Tick { generation, remaining }).is_err() {
                    return;
                }
            }
            let _ = events.send(TimerEvent::Expired { generation });
        }));
    }

    /// Stop the current activation, if any.
    ///
    /// Bumps the generation so an event the old activation already queued
    /// is rejected by [`is_current`](Self::is_current) when it arrives.
    /// Safe to call on an idle or already-cancelled timer.
    pub fn cancel(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether an event belongs to the live activation.
    pub fn is_current(&self, event: &TimerEvent) -> bool {
        self.handle.is_some() && event.generation() == self.generation
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn counts_down_to_zero_then_expires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new(tx);
        timer.start(5);

        let mut ticks = Vec::new();
        loop {
            match rx.recv().await.unwrap() {
                TimerEvent::Tick { remaining, .. } => ticks.push(remaining),
                TimerEvent::Expired { .. } => break,
            }
        }

        assert_eq!(ticks, vec![4, 3, 2, 1, 0]);

        // The activation stopped with expiry; nothing else arrives.
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_activation_events_are_stale() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new(tx);
        timer.start(3);

        // Let one tick get queued before cancelling.
        let first = rx.recv().await.unwrap();
        assert!(timer.is_current(&first));

        timer.cancel();
        assert!(!timer.is_current(&first));

        // Anything the aborted task may still have queued is stale too.
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        while let Ok(event) = rx.try_recv() {
            assert!(!timer.is_current(&event));
        }
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new(tx);
        timer.cancel();
        timer.cancel();

        timer.start(2);
        timer.cancel();
        timer.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_the_previous_activation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new(tx);
        timer.start(10);
        timer.start(2);

        // Only events of the second activation are current.
        let mut current = Vec::new();
        loop {
            let event = rx.recv().await.unwrap();
            if !timer.is_current(&event) {
                continue;
            }
            let done = matches!(event, TimerEvent::Expired { .. });
            current.push(event);
            if done {
                break;
            }
        }

        let generation = timer.generation();
        assert_eq!(
            current,
            vec![
                TimerEvent::Tick { generation, remaining: 1 },
                TimerEvent::Tick { generation, remaining: 0 },
                TimerEvent::Expired { generation },
            ]
        );
    }

    #[tokio::test]
    #[should_panic(expected = "timer duration must be positive")]
    async fn zero_duration_panics() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new(tx);
        timer.start(0);
    }
}
