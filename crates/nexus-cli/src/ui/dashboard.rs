//! Dashboard tiles and the section page behind each one.

use nexus_core::section::{self, NOT_FOUND};
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::App;

/// Render the section tiles, with the route prompt when it is open.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Dashboard ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [list_area, prompt_area] =
    Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

  let items: Vec<ListItem> = section::sections()
    .iter()
    .map(|s| {
      ListItem::new(vec![
        Line::from(Span::styled(s.name, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
          format!("  {}", s.description),
          Style::default().fg(Color::Gray),
        )),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.section_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
      .highlight_symbol("▸ "),
    list_area,
    &mut state,
  );

  if app.route_active {
    f.render_widget(
      Paragraph::new(format!("/dashboard/{}_", app.route_input))
        .style(Style::default().fg(Color::Yellow)),
      prompt_area,
    );
  }
}

/// Render the page for the current route, or the not-found placeholder.
pub fn draw_section(f: &mut Frame, area: Rect, app: &App) {
  let (title, body) = match app.current_section() {
    Ok(s) => (s.title, Paragraph::new(s.content)),
    Err(_) => (
      NOT_FOUND,
      Paragraph::new(Line::from(Span::styled(
        format!("No section is available at /dashboard/{}.", app.route),
        Style::default().fg(Color::DarkGray),
      ))),
    ),
  };

  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  f.render_widget(body.block(block).wrap(Wrap { trim: false }), area);
}
