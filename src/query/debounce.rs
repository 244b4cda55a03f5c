//! Settling-window gate for rapidly changing search input.
//!
//! Search text changes on every keystroke, but the Collection Service should
//! see at most one request per burst of typing. [`DebounceGate`] holds each
//! observed value for a fixed quiet window; a newer observation inside the
//! window supersedes the pending one and restarts the timer, so only the last
//! value of a burst is ever emitted.
//!
//! The gate performs no network calls itself: settled values are delivered to
//! the runtime driver over a channel, and the driver turns them into pipeline
//! fetches. The value type is generic so callers can tag what they observe —
//! the applications gate carries the job id its term was typed under, which
//! lets the consumer drop a settled value whose scope has since changed.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delays a rapidly changing input until it settles.
///
/// Each [`observe`](DebounceGate::observe) aborts the previous pending timer
/// (if any) and starts a fresh one; when a timer survives the full quiet
/// window, its value is sent over the gate's channel. Dropping the gate, or
/// calling [`cancel`](DebounceGate::cancel), aborts the pending timer so a
/// torn-down view emits nothing.
#[derive(Debug)]
pub struct DebounceGate<T> {
    window: Duration,
    settled_tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> DebounceGate<T> {
    /// Creates a gate that emits settled values over `settled_tx` after
    /// `window` of quiet.
    #[must_use]
    pub fn new(window: Duration, settled_tx: mpsc::UnboundedSender<T>) -> Self {
        Self {
            window,
            settled_tx,
            pending: None,
        }
    }

    /// Observes a new raw value, superseding any value still settling.
    ///
    /// Must be called from within a tokio runtime.
    pub fn observe(&mut self, value: T) {
        self.cancel();

        tracing::trace!(window_ms = self.window.as_millis() as u64, "debounce restarted");

        let tx = self.settled_tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Receiver gone means the driver shut down; nothing to emit to.
            let _ = tx.send(value);
        }));
    }

    /// Aborts the pending timer, if any, so no emission occurs.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Returns `true` while a value is still settling.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for DebounceGate<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn a_burst_emits_exactly_the_last_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut gate = DebounceGate::new(WINDOW, tx);

        // "Senior De" typed in under 300ms: every keystroke restarts the
        // window, so only the final text settles.
        for prefix in ["S", "Se", "Senior", "Senior D", "Senior De"] {
            gate.observe(prefix.to_string());
            tokio::time::advance(Duration::from_millis(50)).await;
        }

        tokio::time::advance(WINDOW).await;
        assert_eq!(rx.recv().await.as_deref(), Some("Senior De"));
        assert!(rx.try_recv().is_err(), "burst must emit exactly once");
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_emit_separately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut gate = DebounceGate::new(WINDOW, tx);

        gate.observe("rust".to_string());
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;
        assert_eq!(rx.recv().await.as_deref(), Some("rust"));

        gate.observe("rust engineer".to_string());
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;
        assert_eq!(rx.recv().await.as_deref(), Some("rust engineer"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_the_pending_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut gate = DebounceGate::new(WINDOW, tx);

        gate.observe("abandoned".to_string());
        gate.cancel();

        tokio::time::advance(WINDOW * 2).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_acts_like_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut gate = DebounceGate::new(WINDOW, tx);
            gate.observe("torn down".to_string());
        }

        tokio::time::advance(WINDOW * 2).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.recv().await, None, "sender dropped without emitting");
    }

    #[tokio::test(start_paused = true)]
    async fn tagged_values_settle_with_their_tag() {
        let (tx, mut rx) = mpsc::unbounded_channel::<(u32, String)>();
        let mut gate = DebounceGate::new(WINDOW, tx);

        gate.observe((7, "fro".to_string()));
        gate.observe((7, "frontend".to_string()));
        tokio::time::advance(WINDOW).await;

        assert_eq!(rx.recv().await, Some((7, "frontend".to_string())));
    }
}
