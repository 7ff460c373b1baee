// SPDX-License-Identifier: GPL-3.0-only

//! Key repeat while a key is held.
//!
//! A [`KeyRepeat`] is a cancellable periodic timer scoped to one press
//! gesture. It waits the initial delay, then delivers a [`RepeatTick`] every
//! interval until it is cancelled or dropped. Each tick carries the press
//! generation so the session can discard ticks that were already queued when
//! the key was released.
//!
//! Ticks go out over a bounded channel with `try_send`. When the consumer
//! has not drained the previous tick, the new one is skipped, so a stalled
//! host never accumulates a backlog of deletes.

use futures::channel::mpsc::Sender;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// One repeat event for the press identified by `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTick {
    /// Press generation this tick belongs to
    pub generation: u64,
}

/// Owned handle to a running repeat timer.
///
/// Dropping the handle aborts the timer task.
#[derive(Debug)]
pub struct KeyRepeat {
    generation: u64,
    handle: JoinHandle<()>,
}

impl KeyRepeat {
    /// Spawns the repeat timer on the current tokio runtime.
    ///
    /// Returns `None` when called outside a runtime; the press then behaves
    /// as a single tap.
    pub fn start(
        initial_delay: Duration,
        interval: Duration,
        generation: u64,
        mut tx: Sender<RepeatTick>,
    ) -> Option<Self> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No tokio runtime, key repeat disabled");
            return None;
        };

        let handle = runtime.spawn(async move {
            tokio::time::sleep(initial_delay).await;

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = tx.try_send(RepeatTick { generation }) {
                    if err.is_disconnected() {
                        // Session is gone
                        break;
                    }
                    tracing::debug!("Key repeat {} skipped a tick, consumer is behind", generation);
                }
            }
        });

        tracing::debug!(
            "Key repeat {} started: delay={:?} interval={:?}",
            generation,
            initial_delay,
            interval
        );
        Some(Self { generation, handle })
    }

    /// Press generation this timer delivers ticks for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stops the timer. Equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for KeyRepeat {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Key repeat {} stopped", self.generation);
    }
}
