// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard session: the engine wired to a host input connection.
//!
//! A [`KeyboardSession`] lives while the keyboard is shown. It owns the
//! [`KeyboardEngine`], the host's [`InputSink`], the active [`KeyRepeat`] (if a
//! key is being held) and a `watch` channel that publishes a new
//! [`DisplaySnapshot`] whenever the shift state or layer changes.
//!
//! # Architecture
//!
//! - **Taps** go straight to the engine; the emitted text action is applied
//!   to the sink.
//! - **Holding Delete** deletes once immediately and arms a repeat timer.
//!   The timer sends [`RepeatTick`]s over a channel; the host loop awaits
//!   [`KeyboardSession::next_repeat_tick`] and feeds each tick back through
//!   [`KeyboardSession::on_repeat_tick`].
//! - **Release** cancels the timer. Ticks from an earlier press that are
//!   still queued are recognised by their generation and ignored.
//! - **Teardown** (`finish` or drop) cancels the timer and discards the
//!   engine state.
//!
//! # Example
//!
//! ```rust
//! use softboard::config::KeyboardConfig;
//! use softboard::layout::KeyAction;
//! use softboard::session::{KeyboardSession, TextBuffer};
//!
//! let mut session = KeyboardSession::start(TextBuffer::new(), KeyboardConfig::default());
//! session.tap(KeyAction::Shift);
//! session.tap(KeyAction::Character('H'));
//! session.tap(KeyAction::Character('I'));
//! assert_eq!(session.finish().text(), "Hi");
//! ```

pub mod repeat;
pub mod sink;

pub use repeat::{KeyRepeat, RepeatTick};
pub use sink::{resolve_enter, EditorAction, EnterResolution, InputSink, TextBuffer};

use crate::config::KeyboardConfig;
use crate::input::{DisplaySnapshot, KeyboardEngine, TextAction};
use crate::layout::KeyAction;
use futures::channel::mpsc::{self, Receiver, Sender};
use futures::StreamExt;
use std::time::Instant;
use tokio::sync::watch;

/// Buffered repeat ticks. A consumer that falls behind loses ticks rather
/// than queueing them.
const TICK_QUEUE_CAPACITY: usize = 1;

/// One active keyboard session.
pub struct KeyboardSession<S: InputSink> {
    /// Shift and layer state machine
    engine: KeyboardEngine,

    /// Host input connection
    sink: S,

    /// Timing configuration
    config: KeyboardConfig,

    /// Repeat timer for the key being held, if any
    repeat: Option<KeyRepeat>,

    /// Generation handed to the next press
    next_generation: u64,

    /// Sender cloned into each repeat timer
    tick_tx: Sender<RepeatTick>,

    /// Ticks delivered by repeat timers, at most one pending per timer
    tick_rx: Receiver<RepeatTick>,

    /// Publishes display changes to the host
    display_tx: watch::Sender<DisplaySnapshot>,
}

impl<S: InputSink> std::fmt::Debug for KeyboardSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardSession")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .field("repeat", &self.repeat)
            .field("next_generation", &self.next_generation)
            .finish_non_exhaustive()
    }
}

impl<S: InputSink> KeyboardSession<S> {
    /// Starts a session with fresh engine state.
    pub fn start(sink: S, config: KeyboardConfig) -> Self {
        let engine = KeyboardEngine::new(&config);
        let (tick_tx, tick_rx) = mpsc::channel(TICK_QUEUE_CAPACITY);
        let (display_tx, _) = watch::channel(engine.current_display());

        tracing::info!("Keyboard session started");

        Self {
            engine,
            sink,
            config,
            repeat: None,
            next_generation: 0,
            tick_tx,
            tick_rx,
            display_tx,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &KeyboardEngine {
        &self.engine
    }

    /// Returns the host sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the current display snapshot.
    pub fn display(&self) -> DisplaySnapshot {
        self.display_tx.borrow().clone()
    }

    /// Subscribes to display changes.
    ///
    /// The receiver is marked changed only when the shift state or layer
    /// actually changed.
    pub fn subscribe_display(&self) -> watch::Receiver<DisplaySnapshot> {
        self.display_tx.subscribe()
    }

    /// Returns `true` while a held key is repeating.
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// Taps a key now.
    pub fn tap(&mut self, action: KeyAction) -> Option<TextAction> {
        self.tap_at(action, Instant::now())
    }

    /// Taps a key at the given time.
    pub fn tap_at(&mut self, action: KeyAction, now: Instant) -> Option<TextAction> {
        let (text_action, state_changed) = self.engine.apply(action, now);

        if let Some(ref text_action) = text_action {
            self.apply_to_sink(text_action);
        }

        if state_changed {
            self.display_tx.send_replace(self.engine.current_display());
        }

        text_action
    }

    /// Presses a key down.
    ///
    /// Delete fires immediately and starts repeating after the configured
    /// delay; any other key behaves as a tap. A press while another key is
    /// held releases the earlier one first.
    pub fn press(&mut self, action: KeyAction) -> Option<TextAction> {
        self.release();

        let text_action = self.tap(action);
        if action == KeyAction::Delete {
            let generation = self.next_generation;
            self.next_generation += 1;
            self.repeat = KeyRepeat::start(
                self.config.repeat_initial_delay(),
                self.config.repeat_interval(),
                generation,
                self.tick_tx.clone(),
            );
        }
        text_action
    }

    /// Releases the held key, cancelling any repeat.
    pub fn release(&mut self) {
        if let Some(repeat) = self.repeat.take() {
            repeat.cancel();
        }
    }

    /// Waits for the next repeat tick.
    ///
    /// Pending forever while nothing is held; meant to be awaited alongside
    /// other host events.
    pub async fn next_repeat_tick(&mut self) -> Option<RepeatTick> {
        self.tick_rx.next().await
    }

    /// Handles a repeat tick.
    ///
    /// Returns `true` if the tick belonged to the current press and a Delete
    /// was dispatched.
    pub fn on_repeat_tick(&mut self, tick: RepeatTick) -> bool {
        let current = self.repeat.as_ref().map(KeyRepeat::generation);
        if current != Some(tick.generation) {
            tracing::debug!(
                "Dropping stale repeat tick {} (active: {:?})",
                tick.generation,
                current
            );
            return false;
        }

        self.tap(KeyAction::Delete);
        true
    }

    /// Ends the session, cancelling any repeat, and returns the sink.
    pub fn finish(mut self) -> S {
        self.release();
        tracing::info!("Keyboard session finished");
        self.sink
    }

    fn apply_to_sink(&mut self, action: &TextAction) {
        match action {
            TextAction::InsertText(text) => self.sink.commit_text(text),
            TextAction::DeleteBackward(count) => self.sink.delete_backward(*count),
            TextAction::SubmitOrNewline => match resolve_enter(self.sink.editor_action()) {
                EnterResolution::PerformEditorAction(editor_action) => {
                    self.sink.perform_editor_action(editor_action)
                }
                EnterResolution::Newline => self.sink.send_enter_key(),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
