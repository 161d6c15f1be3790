//! Application state machine and event dispatcher.

use std::{sync::Arc, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use nexus_core::{
  account::{Accounts, Credential},
  conversation::Conversation,
  message::Session,
  respond,
  schedule::{Delivery, ReplyScheduler},
  section::{self, Section},
  voice::{Unsupported, VoiceInput},
};
use nexus_store_sqlite::SqliteStore;
use tokio::sync::mpsc;
use uuid::Uuid;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Login or registration form.
  Login,
  /// Section tiles, plus the route prompt.
  Dashboard,
  /// A single section page, or the not-found placeholder.
  Section,
  /// Chatbot: session sidebar and message thread.
  Chat,
}

// ─── Login form ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Id,
  Email,
  Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
  /// Registration mode shows all four fields; login shows email and password.
  pub register: bool,
  pub name:     String,
  pub id:       String,
  pub email:    String,
  pub password: String,
  /// Index into [`LoginForm::fields`].
  pub focus:    usize,
}

impl LoginForm {
  pub fn fields(&self) -> &'static [Field] {
    if self.register {
      &[Field::Name, Field::Id, Field::Email, Field::Password]
    } else {
      &[Field::Email, Field::Password]
    }
  }

  pub fn focused(&self) -> Field { self.fields()[self.focus.min(self.fields().len() - 1)] }

  pub fn value(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Id => &self.id,
      Field::Email => &self.email,
      Field::Password => &self.password,
    }
  }

  fn value_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::Name => &mut self.name,
      Field::Id => &mut self.id,
      Field::Email => &mut self.email,
      Field::Password => &mut self.password,
    }
  }

  fn toggle_mode(&mut self) {
    self.register = !self.register;
    self.focus = 0;
  }

  fn credential(&self) -> Credential {
    Credential {
      name:     self.name.clone(),
      id:       self.id.clone(),
      email:    self.email.clone(),
      password: self.password.clone(),
    }
  }
}

/// Which chat pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFocus {
  Input,
  Sessions,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  pub form: LoginForm,

  /// The logged-in user, if any.
  pub user: Option<Credential>,

  /// Cursor over the dashboard tiles.
  pub section_cursor: usize,

  /// Route typed at the dashboard prompt (only while `route_active`).
  pub route_input: String,

  pub route_active: bool,

  /// Slug of the section page being shown.
  pub route: String,

  pub conversation: Conversation,

  /// Chat input line.
  pub input: String,

  pub chat_focus: ChatFocus,

  /// Cursor within the *filtered* session list.
  pub session_cursor: usize,

  /// Current fuzzy-filter string over session titles.
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  pub voice: VoiceInput<Unsupported>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  accounts:  Accounts<SqliteStore>,
  scheduler: ReplyScheduler,
  replies:   mpsc::UnboundedReceiver<Delivery>,
}

impl App {
  /// Create an [`App`] on the login screen. Must be called inside a tokio
  /// runtime.
  pub fn new(store: Arc<SqliteStore>, reply_delay: Duration) -> Self {
    let (scheduler, replies) = ReplyScheduler::new(reply_delay);
    Self {
      screen: Screen::Login,
      form: LoginForm::default(),
      user: None,
      section_cursor: 0,
      route_input: String::new(),
      route_active: false,
      route: String::new(),
      conversation: Conversation::new(),
      input: String::new(),
      chat_focus: ChatFocus::Input,
      session_cursor: 0,
      filter: String::new(),
      filter_active: false,
      voice: VoiceInput::new(Unsupported),
      status_msg: String::new(),
      accounts: Accounts::new(store),
      scheduler,
      replies,
    }
  }

  // ── Replies ───────────────────────────────────────────────────────────────

  /// Append every delivered reply that still belongs to the visible thread.
  pub fn drain_replies(&mut self) {
    while let Ok(Delivery { ticket, text }) = self.replies.try_recv() {
      self.conversation.append_bot_message(ticket, text);
    }
  }

  /// Replies still waiting out their delay.
  pub fn pending_replies(&self) -> usize { self.scheduler.pending() }

  // ── Sections ──────────────────────────────────────────────────────────────

  /// The section behind the current route.
  pub fn current_section(&self) -> nexus_core::Result<&'static Section> {
    section::find(&self.route)
  }

  fn open_section(&mut self, slug: String) {
    tracing::debug!(slug, "opening section");
    self.route = slug;
    self.screen = Screen::Section;
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  /// Returns sessions whose titles match the current filter query.
  pub fn filtered_sessions(&self) -> Vec<&Session> {
    let sessions = self.conversation.sessions();
    if self.filter.is_empty() {
      return sessions.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    sessions
      .iter()
      .filter(|s| matcher.fuzzy_match(&s.title, &self.filter).is_some())
      .collect()
  }

  fn cursor_session_id(&self) -> Option<Uuid> {
    self.filtered_sessions().get(self.session_cursor).map(|s| s.id)
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  async fn submit_form(&mut self) {
    if self.form.register {
      match self.accounts.register(self.form.credential()).await {
        Ok(()) => {
          self.form = LoginForm::default();
          self.status_msg = "Registration successful! Please log in.".into();
        }
        Err(e) => self.status_msg = e.to_string(),
      }
      return;
    }

    match self.accounts.login(&self.form.email, &self.form.password).await {
      Ok(user) => {
        self.status_msg = format!("Welcome, {}", user.name);
        self.user = Some(user);
        self.form = LoginForm::default();
        self.screen = Screen::Dashboard;
      }
      Err(e) => self.status_msg = e.to_string(),
    }
  }

  fn logout(&mut self) {
    if let Some(user) = self.user.take() {
      tracing::info!(email = %user.email, "logged out");
    }
    self.scheduler.cancel_all();
    self.conversation = Conversation::new();
    self.input.clear();
    self.filter.clear();
    self.session_cursor = 0;
    self.status_msg.clear();
    self.screen = Screen::Login;
  }

  /// Send `text` as a user message and schedule the bot's answer.
  fn submit(&mut self, text: &str) {
    let Some(ticket) = self.conversation.append_user_message(text) else {
      return;
    };
    self.voice.reset();
    self.scheduler.schedule(ticket, respond::answer(text));
  }

  fn new_chat(&mut self) {
    self.scheduler.cancel_all();
    self.conversation.start_new();
    self.input.clear();
    self.chat_focus = ChatFocus::Input;
  }

  fn load_session(&mut self, id: Uuid) {
    let switching = self.conversation.active_session_id() != Some(id);
    if self.conversation.load_session(id) {
      if switching {
        self.scheduler.cancel_all();
      }
      self.chat_focus = ChatFocus::Input;
    }
  }

  fn toggle_voice(&mut self) {
    match self.voice.toggle() {
      Ok(Some(transcript)) => {
        self.status_msg.clear();
        self.submit(&transcript);
      }
      Ok(None) if self.voice.is_listening() => self.status_msg = "Listening…".into(),
      Ok(None) => self.status_msg.clear(),
      Err(e) => self.status_msg = e.to_string(),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.screen {
      Screen::Login => self.handle_login_key(key).await,
      Screen::Dashboard if self.route_active => Ok(self.handle_route_key(key)),
      Screen::Dashboard => Ok(self.handle_dashboard_key(key)),
      Screen::Section => Ok(self.handle_section_key(key)),
      Screen::Chat if self.filter_active => Ok(self.handle_filter_key(key)),
      Screen::Chat => Ok(self.handle_chat_key(key)),
    }
  }

  async fn handle_login_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      if key.code == KeyCode::Char('r') {
        self.form.toggle_mode();
        self.status_msg.clear();
      }
      return Ok(true);
    }

    let len = self.form.fields().len();
    match key.code {
      KeyCode::Esc => return Ok(false),
      KeyCode::Tab | KeyCode::Down => self.form.focus = (self.form.focus + 1) % len,
      KeyCode::BackTab | KeyCode::Up => self.form.focus = (self.form.focus + len - 1) % len,
      KeyCode::Enter => self.submit_form().await,
      KeyCode::Backspace => {
        let field = self.form.focused();
        self.form.value_mut(field).pop();
      }
      KeyCode::Char(c) => {
        let field = self.form.focused();
        self.form.value_mut(field).push(c);
      }
      _ => {}
    }
    Ok(true)
  }

  fn handle_dashboard_key(&mut self, key: KeyEvent) -> bool {
    let len = section::sections().len();
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        if self.section_cursor + 1 < len {
          self.section_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.section_cursor = self.section_cursor.saturating_sub(1);
      }

      KeyCode::Enter => {
        if let Some(s) = section::sections().get(self.section_cursor) {
          self.open_section(s.slug());
        }
      }

      // Type a route directly.
      KeyCode::Char('g') => {
        self.route_active = true;
        self.route_input.clear();
      }

      KeyCode::Char('c') => {
        self.status_msg.clear();
        self.screen = Screen::Chat;
      }
      KeyCode::Char('o') => self.logout(),

      _ => {}
    }
    true
  }

  fn handle_route_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.route_active = false;
        self.route_input.clear();
      }
      KeyCode::Enter => {
        self.route_active = false;
        let slug = std::mem::take(&mut self.route_input);
        self.open_section(slug.trim().to_owned());
      }
      KeyCode::Backspace => {
        self.route_input.pop();
      }
      KeyCode::Char(c) => self.route_input.push(c),
      _ => {}
    }
    true
  }

  fn handle_section_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.screen = Screen::Dashboard,
      _ => {}
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.session_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.session_cursor = 0;
        // Load straight away when exactly one session matches.
        let list = self.filtered_sessions();
        if list.len() == 1 {
          let id = list[0].id;
          self.load_session(id);
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.session_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.session_cursor = 0;
      }
      _ => {}
    }
    true
  }

  fn handle_chat_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      match key.code {
        KeyCode::Char('n') => self.new_chat(),
        KeyCode::Char('v') => self.toggle_voice(),
        _ => {}
      }
      return true;
    }

    match (self.chat_focus, key.code) {
      (_, KeyCode::Esc) => self.screen = Screen::Dashboard,
      (ChatFocus::Input, KeyCode::Tab) => self.chat_focus = ChatFocus::Sessions,
      (ChatFocus::Sessions, KeyCode::Tab) => self.chat_focus = ChatFocus::Input,

      (ChatFocus::Input, KeyCode::Enter) => {
        let text = std::mem::take(&mut self.input);
        self.submit(&text);
      }
      (ChatFocus::Input, KeyCode::Backspace) => {
        self.input.pop();
      }
      (ChatFocus::Input, KeyCode::Char(c)) => self.input.push(c),

      (ChatFocus::Sessions, KeyCode::Char('q')) => return false,
      (ChatFocus::Sessions, KeyCode::Down | KeyCode::Char('j')) => {
        let len = self.filtered_sessions().len();
        if len > 0 && self.session_cursor + 1 < len {
          self.session_cursor += 1;
        }
      }
      (ChatFocus::Sessions, KeyCode::Up | KeyCode::Char('k')) => {
        self.session_cursor = self.session_cursor.saturating_sub(1);
      }
      (ChatFocus::Sessions, KeyCode::Enter) => {
        if let Some(id) = self.cursor_session_id() {
          self.load_session(id);
        }
      }
      (ChatFocus::Sessions, KeyCode::Char('/')) => {
        self.filter_active = true;
        self.filter.clear();
        self.session_cursor = 0;
      }
      (ChatFocus::Sessions, KeyCode::Char('n')) => self.new_chat(),

      _ => {}
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use nexus_core::{Error, conversation::GREETING, message::Sender};

  use super::*;

  const DELAY: Duration = Duration::from_millis(1000);

  async fn app() -> App {
    let store = SqliteStore::open_in_memory().await.unwrap();
    App::new(Arc::new(store), DELAY)
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn ctrl(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL) }

  async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
  }

  async fn register_and_login(app: &mut App) {
    app.handle_key(ctrl('r')).await.unwrap();
    for value in ["Priya", "1DS22AI017", "priya@dsc.edu.in", "Nexus@42"] {
      type_text(app, value).await;
      app.handle_key(key(KeyCode::Tab)).await.unwrap();
    }
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    assert!(!app.form.register, "{}", app.status_msg);

    type_text(app, "priya@dsc.edu.in").await;
    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    type_text(app, "Nexus@42").await;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
  }

  async fn open_chat(app: &mut App) {
    register_and_login(app).await;
    app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
    assert_eq!(app.screen, Screen::Chat);
  }

  async fn send(app: &mut App, text: &str) {
    type_text(app, text).await;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
  }

  // ─── Accounts ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn login_without_registration_is_rejected() {
    let mut app = app().await;
    type_text(&mut app, "priya@dsc.edu.in").await;
    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    type_text(&mut app, "Nexus@42").await;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.status_msg, Error::InvalidCredentials.to_string());
  }

  #[tokio::test]
  async fn weak_password_keeps_registration_form_open() {
    let mut app = app().await;
    app.handle_key(ctrl('r')).await.unwrap();
    for value in ["Priya", "1DS22AI017", "priya@dsc.edu.in", "password"] {
      type_text(&mut app, value).await;
      app.handle_key(key(KeyCode::Tab)).await.unwrap();
    }
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert!(app.form.register);
    assert_eq!(app.status_msg, Error::WeakPassword.to_string());
  }

  #[tokio::test]
  async fn register_then_login_reaches_dashboard() {
    let mut app = app().await;
    register_and_login(&mut app).await;

    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(app.user.as_ref().map(|u| u.name.as_str()), Some("Priya"));
  }

  #[tokio::test]
  async fn logout_returns_to_login_with_fresh_chat() {
    let mut app = app().await;
    open_chat(&mut app).await;
    send(&mut app, "fees").await;
    app.handle_key(key(KeyCode::Esc)).await.unwrap();
    app.handle_key(key(KeyCode::Char('o'))).await.unwrap();

    assert_eq!(app.screen, Screen::Login);
    assert!(app.user.is_none());
    assert!(app.conversation.sessions().is_empty());
    assert_eq!(app.pending_replies(), 0);
  }

  // ─── Dashboard ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn enter_opens_section_under_cursor() {
    let mut app = app().await;
    register_and_login(&mut app).await;
    app.handle_key(key(KeyCode::Down)).await.unwrap();
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert_eq!(app.screen, Screen::Section);
    assert_eq!(app.current_section().unwrap().name, "Timetable");
  }

  #[tokio::test]
  async fn typed_route_resolves_multiword_slug() {
    let mut app = app().await;
    register_and_login(&mut app).await;
    app.handle_key(key(KeyCode::Char('g'))).await.unwrap();
    type_text(&mut app, "fees-structure").await;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert_eq!(app.current_section().unwrap().name, "Fees Structure");
  }

  #[tokio::test]
  async fn unknown_route_shows_not_found() {
    let mut app = app().await;
    register_and_login(&mut app).await;
    app.handle_key(key(KeyCode::Char('g'))).await.unwrap();
    type_text(&mut app, "grades").await;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert_eq!(app.screen, Screen::Section);
    assert!(matches!(app.current_section(), Err(Error::SectionNotFound(s)) if s == "grades"));
  }

  // ─── Chat ──────────────────────────────────────────────────────────────────

  #[tokio::test(start_paused = true)]
  async fn reply_arrives_after_delay() {
    let mut app = app().await;
    open_chat(&mut app).await;
    send(&mut app, "What are my fees?").await;

    assert_eq!(app.conversation.messages().len(), 2);
    assert!(app.input.is_empty());

    tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
    app.drain_replies();

    let messages = app.conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].sender, Sender::Bot);
    assert_eq!(messages[2].text, respond::answer("What are my fees?"));
    assert_eq!(app.conversation.sessions()[0].messages.len(), 3);
  }

  #[tokio::test(start_paused = true)]
  async fn new_chat_drops_pending_reply() {
    let mut app = app().await;
    open_chat(&mut app).await;
    send(&mut app, "placement").await;
    app.handle_key(ctrl('n')).await.unwrap();

    tokio::time::sleep(DELAY * 2).await;
    app.drain_replies();

    assert_eq!(app.conversation.messages().len(), 1);
    assert_eq!(app.conversation.messages()[0].text, GREETING);
    // The saved session never received the reply either.
    assert_eq!(app.conversation.sessions()[0].messages.len(), 2);
  }

  #[tokio::test]
  async fn blank_input_sends_nothing() {
    let mut app = app().await;
    open_chat(&mut app).await;
    send(&mut app, "   ").await;

    assert_eq!(app.conversation.messages().len(), 1);
    assert_eq!(app.pending_replies(), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn selecting_a_session_restores_it() {
    let mut app = app().await;
    open_chat(&mut app).await;
    send(&mut app, "library").await;
    app.handle_key(ctrl('n')).await.unwrap();
    send(&mut app, "exam").await;

    // Sessions are most recent first: "exam", then "library".
    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    app.handle_key(key(KeyCode::Down)).await.unwrap();
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert_eq!(app.chat_focus, ChatFocus::Input);
    let library = app.conversation.sessions()[1].id;
    assert_eq!(app.conversation.active_session_id(), Some(library));
    assert_eq!(app.conversation.messages()[1].text, "library");
    assert_eq!(app.pending_replies(), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn reselecting_the_active_session_keeps_pending_reply() {
    let mut app = app().await;
    open_chat(&mut app).await;
    send(&mut app, "fees").await;

    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    assert_eq!(app.pending_replies(), 1);

    tokio::time::sleep(DELAY * 5).await;
    app.drain_replies();

    assert_eq!(app.conversation.messages().len(), 3);
    assert_eq!(app.conversation.messages()[2].text, respond::answer("fees"));
    assert_eq!(app.conversation.sessions()[0].messages.len(), 3);
  }

  #[tokio::test]
  async fn filter_with_single_match_loads_it() {
    let mut app = app().await;
    open_chat(&mut app).await;
    send(&mut app, "attendance for 2022-2025").await;
    app.handle_key(ctrl('n')).await.unwrap();
    send(&mut app, "contact").await;

    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    type_text(&mut app, "attnd").await;
    assert_eq!(app.filtered_sessions().len(), 1);
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert_eq!(app.conversation.messages()[1].text, "attendance for 2022-2025");
  }

  #[tokio::test]
  async fn voice_toggle_reports_unsupported() {
    let mut app = app().await;
    open_chat(&mut app).await;
    app.handle_key(ctrl('v')).await.unwrap();

    assert_eq!(app.status_msg, Error::VoiceUnsupported.to_string());
    assert!(!app.voice.is_listening());
    assert_eq!(app.conversation.messages().len(), 1);
  }
}
