//! The in-memory conversation store: the visible message list plus every
//! saved session.
//!
//! Bot replies are bound to the conversation they answer through a
//! [`ReplyTicket`]. Starting a new chat or loading another session begins a
//! new epoch, after which older tickets are stale and their replies are
//! dropped instead of landing in the wrong thread.

use uuid::Uuid;

use crate::message::{Message, Session};

/// The opening bot message of every new conversation.
pub const GREETING: &str = "Hello! I am your AIML Nexus assistant. How can I \
                            help you today? You can ask about your results, \
                            timetable, attendance, or fees.";

/// Binds a pending bot reply to the conversation it was requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket {
  pub session_id: Uuid,
  epoch:          u64,
}

/// Conversation state owned by the UI controller.
#[derive(Debug)]
pub struct Conversation {
  /// The messages currently on screen.
  messages: Vec<Message>,
  /// Saved sessions, most recent first.
  sessions: Vec<Session>,
  /// The session the visible messages belong to, if one has been created.
  active:   Option<Uuid>,
  /// Bumped whenever the visible conversation is replaced.
  epoch:    u64,
}

impl Default for Conversation {
  fn default() -> Self { Self::new() }
}

impl Conversation {
  /// A fresh conversation showing only the greeting.
  pub fn new() -> Self {
    Self {
      messages: vec![Message::bot(GREETING)],
      sessions: Vec::new(),
      active:   None,
      epoch:    0,
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn messages(&self) -> &[Message] { &self.messages }

  pub fn sessions(&self) -> &[Session] { &self.sessions }

  pub fn active_session_id(&self) -> Option<Uuid> { self.active }

  pub fn session(&self, id: Uuid) -> Option<&Session> {
    self.sessions.iter().find(|s| s.id == id)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Clear the active session and show only the greeting.
  pub fn start_new(&mut self) {
    self.active = None;
    self.messages = vec![Message::bot(GREETING)];
    self.epoch += 1;
  }

  /// Append a user message, creating a session on the first turn.
  ///
  /// Returns `None` and changes nothing when `text` is blank. Otherwise
  /// returns the ticket the eventual bot reply must present.
  pub fn append_user_message(&mut self, text: &str) -> Option<ReplyTicket> {
    if text.trim().is_empty() {
      return None;
    }

    self.messages.push(Message::user(text));
    let snapshot = self.messages.clone();

    let active = self.active;
    let session_id = match self.sessions.iter_mut().find(|s| Some(s.id) == active) {
      Some(session) => {
        session.messages = snapshot;
        session.id
      }
      None => {
        let session = Session::new(text, snapshot);
        let id = session.id;
        tracing::info!(session_id = %id, title = %session.title, "created session");
        self.sessions.insert(0, session);
        self.active = Some(id);
        id
      }
    };

    Some(ReplyTicket { session_id, epoch: self.epoch })
  }

  /// Append a bot reply for `ticket`.
  ///
  /// Returns `false` and changes nothing when the ticket is stale, i.e. the
  /// user has since started a new chat or switched sessions.
  pub fn append_bot_message(&mut self, ticket: ReplyTicket, text: impl Into<String>) -> bool {
    if !self.is_current(ticket) {
      tracing::warn!(session_id = %ticket.session_id, "dropping reply for inactive session");
      return false;
    }

    self.messages.push(Message::bot(text));
    let messages = self.messages.clone();
    if let Some(session) = self.session_mut(ticket.session_id) {
      session.messages = messages;
    }
    true
  }

  /// Show a saved session and make it active. Unknown ids are ignored.
  ///
  /// Selecting the session that is already active leaves the thread and any
  /// outstanding reply ticket untouched.
  pub fn load_session(&mut self, id: Uuid) -> bool {
    let Some(session) = self.session(id) else {
      return false;
    };
    if self.active == Some(id) {
      return true;
    }
    self.messages = session.messages.clone();
    self.active = Some(id);
    self.epoch += 1;
    true
  }

  /// Whether a reply for `ticket` would still land in the visible thread.
  pub fn is_current(&self, ticket: ReplyTicket) -> bool {
    ticket.epoch == self.epoch && self.active == Some(ticket.session_id)
  }

  fn session_mut(&mut self, id: Uuid) -> Option<&mut Session> {
    self.sessions.iter_mut().find(|s| s.id == id)
  }
}
