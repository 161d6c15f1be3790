//! Mock registration and login over a [`KeyValueStore`].
//!
//! Only one user exists at a time: registering stores the credential record
//! under [`USER_KEY`] as JSON, overwriting whoever registered before. Login
//! compares the submitted email and password with that record verbatim.
//! Passwords are kept in plaintext.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, store::KeyValueStore};

/// The key the credential record lives under.
pub const USER_KEY: &str = "user";

/// Characters accepted as the required password symbol.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// The registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
  pub name:     String,
  /// College-issued student id.
  pub id:       String,
  pub email:    String,
  pub password: String,
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn require(value: &str, field: &'static str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(())
}

/// A bare `local@domain` shape check.
pub fn validate_email(email: &str) -> Result<()> {
  require(email, "email")?;
  let valid = email
    .split_once('@')
    .is_some_and(|(local, domain)| {
      !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
    });
  if valid { Ok(()) } else { Err(Error::InvalidEmail(email.to_owned())) }
}

/// At least [`PASSWORD_MIN_LEN`] characters drawn from ASCII letters, digits
/// and [`PASSWORD_SYMBOLS`], with at least one of each of lowercase,
/// uppercase, digit and symbol.
pub fn validate_password(password: &str) -> Result<()> {
  require(password, "password")?;

  let is_symbol = |c: char| PASSWORD_SYMBOLS.contains(c);
  let allowed = password
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || is_symbol(c));

  let strong = allowed
    && password.chars().count() >= PASSWORD_MIN_LEN
    && password.chars().any(|c| c.is_ascii_lowercase())
    && password.chars().any(|c| c.is_ascii_uppercase())
    && password.chars().any(|c| c.is_ascii_digit())
    && password.chars().any(is_symbol);

  if strong { Ok(()) } else { Err(Error::WeakPassword) }
}

/// Check every field of a registration form.
pub fn validate_registration(credential: &Credential) -> Result<()> {
  require(&credential.name, "name")?;
  require(&credential.id, "id")?;
  validate_email(&credential.email)?;
  validate_password(&credential.password)
}

// ─── Accounts ────────────────────────────────────────────────────────────────

/// Registration and login against a single stored credential record.
///
/// Cloning is cheap; the store is reference-counted.
pub struct Accounts<S> {
  store: Arc<S>,
}

impl<S> Clone for Accounts<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: KeyValueStore> Accounts<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate `credential` and store it, replacing any previous user.
  ///
  /// Nothing is written when validation fails.
  pub async fn register(&self, credential: Credential) -> Result<()> {
    validate_registration(&credential)?;

    let json = serde_json::to_string(&credential)?;
    self
      .store
      .set_item(USER_KEY, json)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    tracing::info!(email = %credential.email, "registered user");
    Ok(())
  }

  /// The currently registered user, if any.
  pub async fn registered_user(&self) -> Result<Option<Credential>> {
    let raw = self
      .store
      .get_item(USER_KEY)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    raw
      .map(|json| serde_json::from_str(&json))
      .transpose()
      .map_err(Error::from)
  }

  /// Log in as the registered user. Never writes to the store.
  pub async fn login(&self, email: &str, password: &str) -> Result<Credential> {
    require(email, "email")?;
    validate_password(password)?;

    match self.registered_user().await? {
      Some(user) if user.email == email && user.password == password => {
        tracing::info!(email = %user.email, "login succeeded");
        Ok(user)
      }
      _ => {
        tracing::info!(email, "login rejected");
        Err(Error::InvalidCredentials)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{
      Mutex,
      atomic::{AtomicUsize, Ordering},
    },
  };

  use super::*;

  // An in-memory store that counts writes.
  #[derive(Default)]
  struct MemoryStore {
    items:  Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
  }

  impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    async fn get_item(&self, key: &str) -> Result<Option<String>, Infallible> {
      Ok(self.items.lock().unwrap().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), Infallible> {
      self.writes.fetch_add(1, Ordering::SeqCst);
      self.items.lock().unwrap().insert(key.to_owned(), value);
      Ok(())
    }
  }

  fn accounts() -> (Accounts<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (Accounts::new(Arc::clone(&store)), store)
  }

  fn alice() -> Credential {
    Credential {
      name:     "Alice".into(),
      id:       "1DS21AI001".into(),
      email:    "alice@dsc.edu.in".into(),
      password: "Secret@1".into(),
    }
  }

  #[test]
  fn password_rules() {
    assert!(validate_password("Abc12@").is_ok());
    assert!(validate_password("Secret@1").is_ok());

    for weak in ["abc12@", "ABC12@", "Abcde@", "Abcd12", "Ab1@", "Abc 12@", "Abc12#x"] {
      assert!(
        matches!(validate_password(weak), Err(Error::WeakPassword)),
        "{weak:?} accepted"
      );
    }
    assert!(matches!(validate_password(""), Err(Error::MissingField("password"))));
  }

  #[test]
  fn email_shape() {
    assert!(validate_email("a@b").is_ok());
    assert!(matches!(validate_email("nobody"), Err(Error::InvalidEmail(_))));
    assert!(matches!(validate_email("@dsc.edu.in"), Err(Error::InvalidEmail(_))));
    assert!(matches!(validate_email("a b@c"), Err(Error::InvalidEmail(_))));
  }

  #[tokio::test]
  async fn register_then_login() {
    let (accounts, store) = accounts();
    accounts.register(alice()).await.unwrap();

    let raw = store.items.lock().unwrap().get(USER_KEY).cloned().unwrap();
    assert!(raw.contains(r#""email":"alice@dsc.edu.in""#));

    let user = accounts.login("alice@dsc.edu.in", "Secret@1").await.unwrap();
    assert_eq!(user, alice());
    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn weak_password_is_rejected_before_any_write() {
    let (accounts, store) = accounts();
    let weak = Credential { password: "password".into(), ..alice() };

    assert!(matches!(accounts.register(weak).await, Err(Error::WeakPassword)));
    assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    assert!(accounts.registered_user().await.unwrap().is_none());
  }

  #[tokio::test]
  async fn missing_name_is_rejected() {
    let (accounts, store) = accounts();
    let nameless = Credential { name: "  ".into(), ..alice() };

    assert!(matches!(accounts.register(nameless).await, Err(Error::MissingField("name"))));
    assert_eq!(store.writes.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn mismatched_login_leaves_store_untouched() {
    let (accounts, store) = accounts();
    accounts.register(alice()).await.unwrap();

    let wrong_password = accounts.login("alice@dsc.edu.in", "Secret@2").await;
    assert!(matches!(wrong_password, Err(Error::InvalidCredentials)));
    let wrong_email = accounts.login("bob@dsc.edu.in", "Secret@1").await;
    assert!(matches!(wrong_email, Err(Error::InvalidCredentials)));

    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    assert_eq!(accounts.registered_user().await.unwrap(), Some(alice()));
  }

  #[tokio::test]
  async fn login_without_registration_fails() {
    let (accounts, _) = accounts();
    let result = accounts.login("alice@dsc.edu.in", "Secret@1").await;
    assert!(matches!(result, Err(Error::InvalidCredentials)));
  }

  #[tokio::test]
  async fn registering_again_replaces_the_user() {
    let (accounts, _) = accounts();
    accounts.register(alice()).await.unwrap();
    let bob = Credential {
      name:     "Bob".into(),
      id:       "1DS21AI002".into(),
      email:    "bob@dsc.edu.in".into(),
      password: "Hunter2!".into(),
    };
    accounts.register(bob.clone()).await.unwrap();

    assert!(accounts.login("alice@dsc.edu.in", "Secret@1").await.is_err());
    assert_eq!(accounts.login("bob@dsc.edu.in", "Hunter2!").await.unwrap(), bob);
  }
}
