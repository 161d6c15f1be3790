//! The `KeyValueStore` trait: a string-keyed store of JSON text.
//!
//! The trait is implemented by storage backends (e.g. `nexus-store-sqlite`).
//! [`crate::account::Accounts`] depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

/// Abstraction over a local key-value store.
///
/// Values are opaque text; callers decide the encoding.
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`. Returns `None` if absent.
  fn get_item<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Store `value` under `key`, replacing any previous value.
  fn set_item<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
