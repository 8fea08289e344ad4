use crate::engine::{ConversationEngine, ReplyOutcome};
use crate::state::ConversationState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Default pause before the concierge replies
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1500);

/// A concierge conversation with a visible "typing" pause
///
/// Wraps a [`ConversationEngine`] and schedules each reply on a background
/// task after the typing delay. At most one reply is scheduled at a time.
/// [`reset`](Self::reset) and dropping the session abort the scheduled task;
/// if it already woke up, the engine discards its reply as stale.
///
/// # Example
///
/// ```rust
/// # async fn example() {
/// use vastucraft::{ConciergeSession, ConversationEngine, LoggingSink};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let engine = ConversationEngine::new(Arc::new(LoggingSink));
/// let mut session = ConciergeSession::new(engine, Duration::from_millis(10));
///
/// assert!(session.submit("Priya").await);
/// assert!(session.snapshot().await.is_awaiting_response);
///
/// session.settle().await;
/// assert_eq!(session.snapshot().await.current_step, 1);
/// # }
/// ```
pub struct ConciergeSession {
    engine: Arc<Mutex<ConversationEngine>>,
    typing_delay: Duration,
    scheduled: Option<JoinHandle<ReplyOutcome>>,
}

impl ConciergeSession {
    pub fn new(engine: ConversationEngine, typing_delay: Duration) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            typing_delay,
            scheduled: None,
        }
    }

    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Record an answer and schedule the reply
    ///
    /// Returns `false` if the engine ignored the answer.
    pub async fn submit(&mut self, text: &str) -> bool {
        let pending = {
            let mut engine = self.engine.lock().await;
            engine.accept_answer(text)
        };
        let Some(pending) = pending else {
            return false;
        };

        let engine = Arc::clone(&self.engine);
        let delay = self.typing_delay;
        self.scheduled = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.lock().await.deliver_reply(pending).await
        }));
        true
    }

    /// Wait for the scheduled reply, if any
    ///
    /// Returns `None` when nothing was scheduled or the task was aborted.
    pub async fn settle(&mut self) -> Option<ReplyOutcome> {
        let handle = self.scheduled.take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Scheduled concierge reply panicked");
                }
                None
            }
        }
    }

    /// Cancel any scheduled reply and start over
    pub async fn reset(&mut self) {
        if let Some(handle) = self.scheduled.take() {
            handle.abort();
        }
        self.engine.lock().await.reset();
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> ConversationState {
        self.engine.lock().await.state().clone()
    }

    pub async fn is_complete(&self) -> bool {
        self.engine.lock().await.is_complete()
    }
}

impl Drop for ConciergeSession {
    fn drop(&mut self) {
        if let Some(handle) = self.scheduled.take() {
            handle.abort();
        }
    }
}
