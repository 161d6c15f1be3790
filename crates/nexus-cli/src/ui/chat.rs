//! Chatbot screen: session sidebar, message thread, input line.

use nexus_core::message::Sender;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, ChatFocus};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
    .split(area);

  draw_sessions(f, cols[0], app);

  let [thread, input] =
    Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(cols[1]);
  draw_thread(f, thread, app);
  draw_input(f, input, app);
}

fn border(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  }
}

// ─── Sessions ─────────────────────────────────────────────────────────────────

fn draw_sessions(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_sessions();
  let total = app.conversation.sessions().len();
  let active = app.conversation.active_session_id();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Chats ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Chats ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border(app.chat_focus == ChatFocus::Sessions));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  if (app.filter_active || !app.filter.is_empty()) && inner.height > 2 {
    let filter_area = Rect { y: inner.y + inner.height - 1, height: 1, ..inner };
    inner.height -= 1;

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|s| {
      let title_style = if Some(s.id) == active {
        Style::default().add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      ListItem::new(vec![
        Line::from(Span::styled(s.title.clone(), title_style)),
        Line::from(Span::styled(
          s.created_at.format("%Y-%m-%d").to_string(),
          Style::default().fg(Color::DarkGray),
        )),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select(
    (app.chat_focus == ChatFocus::Sessions && !filtered.is_empty()).then_some(app.session_cursor),
  );

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}

// ─── Thread ───────────────────────────────────────────────────────────────────

fn draw_thread(f: &mut Frame, area: Rect, app: &App) {
  let mut lines: Vec<Line> = Vec::new();
  for message in app.conversation.messages() {
    let (label, color) = match message.sender {
      Sender::User => ("You", Color::Green),
      Sender::Bot => ("Nexus", Color::Cyan),
    };
    lines.push(Line::from(Span::styled(
      label,
      Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    lines.extend(message.text.lines().map(|l| Line::from(l.to_owned())));
    lines.push(Line::default());
  }
  if app.pending_replies() > 0 {
    lines.push(Line::from(Span::styled("Nexus is typing…", Style::default().fg(Color::DarkGray))));
  }

  let block = Block::default()
    .title(" AIML Nexus Assistant ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  // Keep the newest message in view.
  let inner_height = area.height.saturating_sub(2);
  let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
  let rendered = paragraph.line_count(area.width.saturating_sub(2)) as u16;
  let scroll = rendered.saturating_sub(inner_height);

  f.render_widget(paragraph.block(block).scroll((scroll, 0)), area);
}

// ─── Input ────────────────────────────────────────────────────────────────────

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.chat_focus == ChatFocus::Input && !app.filter_active;
  let text = if app.voice.is_listening() {
    Span::styled("Listening…", Style::default().fg(Color::Red))
  } else if focused {
    Span::raw(format!("{}_", app.input))
  } else {
    Span::raw(app.input.clone())
  };

  f.render_widget(
    Paragraph::new(Line::from(text)).block(
      Block::default()
        .title(" Ask about results, timetable, attendance, fees… ")
        .borders(Borders::ALL)
        .border_style(border(focused)),
    ),
    area,
  );
}
