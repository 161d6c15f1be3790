//! TUI rendering: header, the active screen, and the status bar.

pub mod chat;
pub mod dashboard;
pub mod login;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, ChatFocus, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Login => login::draw(f, rows[1], app),
    Screen::Dashboard => dashboard::draw(f, rows[1], app),
    Screen::Section => dashboard::draw_section(f, rows[1], app),
    Screen::Chat => chat::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " AIML Nexus",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = match &app.user {
    Some(user) => format!("{} ({})  {date} ", user.name, user.id),
    None => format!("{date} "),
  };
  let right = Span::styled(right, Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::Login if app.form.register => (
      "REGISTER",
      "Tab next field  Enter register  Ctrl-R back to login  Esc quit",
    ),
    Screen::Login => (
      "LOGIN",
      "Tab next field  Enter log in  Ctrl-R new user? register  Esc quit",
    ),
    Screen::Dashboard if app.route_active => ("ROUTE", "Type a section slug  Enter open  Esc cancel"),
    Screen::Dashboard => (
      "DASHBOARD",
      "↑↓/jk navigate  Enter open  g go to  c chatbot  o log out  q quit",
    ),
    Screen::Section => ("SECTION", "Esc back  q quit"),
    Screen::Chat if app.filter_active => ("SEARCH", "Type to filter  Esc cancel  Enter select"),
    Screen::Chat if app.voice.is_listening() => ("LISTENING", "Ctrl-V stop and send"),
    Screen::Chat => match app.chat_focus {
      ChatFocus::Input => (
        "CHAT",
        "Enter send  Tab sessions  Ctrl-N new chat  Ctrl-V voice  Esc dashboard",
      ),
      ChatFocus::Sessions => (
        "SESSIONS",
        "↑↓/jk navigate  Enter load  / search  n new chat  Tab input  Esc dashboard",
      ),
    },
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}
