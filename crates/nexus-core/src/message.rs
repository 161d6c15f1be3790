//! Messages and saved sessions: the unit of conversation history.
//!
//! A message is immutable once created. A session owns an ordered list of
//! messages and is never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters of the first user message kept in a title.
pub const TITLE_LEN: usize = 30;

/// Who authored a message.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
  User,
  Bot,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub text:   String,
  pub sender: Sender,
}

impl Message {
  pub fn user(text: impl Into<String>) -> Self {
    Self { text: text.into(), sender: Sender::User }
  }

  pub fn bot(text: impl Into<String>) -> Self {
    Self { text: text.into(), sender: Sender::Bot }
  }
}

/// One saved conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  /// Time-ordered (UUIDv7) so ids sort by creation.
  pub id:         Uuid,
  pub title:      String,
  pub messages:   Vec<Message>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Start a session whose title is derived from `first_text`.
  pub fn new(first_text: &str, messages: Vec<Message>) -> Self {
    Self {
      id: Uuid::now_v7(),
      title: derive_title(first_text),
      messages,
      created_at: Utc::now(),
    }
  }
}

/// The first [`TITLE_LEN`] characters of `text`, with `...` appended when
/// anything was cut off.
pub fn derive_title(text: &str) -> String {
  let mut chars = text.chars();
  let head: String = chars.by_ref().take(TITLE_LEN).collect();
  if chars.next().is_some() {
    format!("{head}...")
  } else {
    head
  }
}
