//! Error types for `nexus-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  #[error(
    "password must be at least 6 characters with uppercase, lowercase, \
     number, and symbol"
  )]
  WeakPassword,

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("section not found: {0:?}")]
  SectionNotFound(String),

  #[error("speech recognition is not supported on this platform")]
  VoiceUnsupported,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
