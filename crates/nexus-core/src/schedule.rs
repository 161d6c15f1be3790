//! Deferred bot replies.
//!
//! Each reply is a tokio task that sleeps for the configured delay and then
//! sends a [`Delivery`] down a channel drained by the UI loop. Pending tasks
//! can be cancelled, e.g. when the user starts a new chat before the reply
//! arrives.

use std::time::Duration;

use tokio::{sync::mpsc, task::AbortHandle};

use crate::conversation::ReplyTicket;

/// The delay used when none is configured.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// A reply that has waited out its delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
  pub ticket: ReplyTicket,
  pub text:   String,
}

/// Schedules and cancels deferred replies.
///
/// Must be used from within a tokio runtime.
pub struct ReplyScheduler {
  delay:   Duration,
  tx:      mpsc::UnboundedSender<Delivery>,
  pending: Vec<AbortHandle>,
}

impl ReplyScheduler {
  /// Create a scheduler and the receiver its deliveries arrive on.
  pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Delivery>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { delay, tx, pending: Vec::new() }, rx)
  }

  /// Deliver `text` for `ticket` once the delay has elapsed.
  pub fn schedule(&mut self, ticket: ReplyTicket, text: String) {
    self.pending.retain(|h| !h.is_finished());

    let delay = self.delay;
    let tx = self.tx.clone();
    let handle = tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      // The receiver is gone only when the UI has shut down.
      let _ = tx.send(Delivery { ticket, text });
    });
    self.pending.push(handle.abort_handle());
  }

  /// Abort every reply that has not been delivered yet.
  pub fn cancel_all(&mut self) {
    let live = self.pending.iter().filter(|h| !h.is_finished()).count();
    if live > 0 {
      tracing::debug!(cancelled = live, "cancelling pending replies");
    }
    for handle in self.pending.drain(..) {
      handle.abort();
    }
  }

  /// Number of replies still waiting out their delay.
  pub fn pending(&self) -> usize {
    self.pending.iter().filter(|h| !h.is_finished()).count()
  }
}

impl Drop for ReplyScheduler {
  fn drop(&mut self) { self.cancel_all(); }
}

#[cfg(test)]
mod tests {
  use tokio::time::{Instant, timeout};

  use super::*;
  use crate::conversation::Conversation;

  fn ticket() -> ReplyTicket {
    let mut c = Conversation::new();
    c.append_user_message("hi").unwrap()
  }

  #[tokio::test(start_paused = true)]
  async fn delivers_after_delay() {
    let (mut scheduler, mut rx) = ReplyScheduler::new(DEFAULT_REPLY_DELAY);
    let t = ticket();
    let started = Instant::now();

    scheduler.schedule(t, "reply".into());
    let delivery = rx.recv().await.unwrap();

    assert_eq!(delivery, Delivery { ticket: t, text: "reply".into() });
    assert!(started.elapsed() >= DEFAULT_REPLY_DELAY);
  }

  #[tokio::test(start_paused = true)]
  async fn deliveries_arrive_in_schedule_order() {
    let (mut scheduler, mut rx) = ReplyScheduler::new(Duration::from_millis(10));
    let t = ticket();
    scheduler.schedule(t, "one".into());
    tokio::time::sleep(Duration::from_millis(1)).await;
    scheduler.schedule(t, "two".into());

    assert_eq!(rx.recv().await.unwrap().text, "one");
    assert_eq!(rx.recv().await.unwrap().text, "two");
  }

  #[tokio::test(start_paused = true)]
  async fn cancelled_reply_never_arrives() {
    let (mut scheduler, mut rx) = ReplyScheduler::new(DEFAULT_REPLY_DELAY);
    scheduler.schedule(ticket(), "reply".into());
    assert_eq!(scheduler.pending(), 1);

    scheduler.cancel_all();
    assert_eq!(scheduler.pending(), 0);

    let waited = timeout(DEFAULT_REPLY_DELAY * 5, rx.recv()).await;
    assert!(waited.is_err(), "cancelled reply was delivered");
  }
}
