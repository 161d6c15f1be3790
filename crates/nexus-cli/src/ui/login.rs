//! Login / registration form.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Field};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let form = &app.form;
  let fields = form.fields();

  let [column] = Layout::horizontal([Constraint::Length(50)])
    .flex(Flex::Center)
    .areas(area);
  let [card] = Layout::vertical([Constraint::Length(fields.len() as u16 * 3 + 4)])
    .flex(Flex::Center)
    .areas(column);

  let title = if form.register { " Register " } else { " Login " };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(card);
  f.render_widget(block, card);

  let mut constraints = vec![Constraint::Length(3); fields.len()];
  constraints.push(Constraint::Length(1));
  let rows = Layout::vertical(constraints).split(inner);

  for (i, field) in fields.iter().enumerate() {
    draw_field(f, rows[i], *field, form.value(*field), form.focused() == *field);
  }

  let toggle = if form.register {
    "Already registered? Ctrl-R to log in"
  } else {
    "New user? Ctrl-R to register"
  };
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(toggle, Style::default().fg(Color::DarkGray)))),
    rows[fields.len()],
  );
}

fn draw_field(f: &mut Frame, area: Rect, field: Field, value: &str, focused: bool) {
  let label = match field {
    Field::Name => " Name ",
    Field::Id => " Student ID ",
    Field::Email => " Email ",
    Field::Password => " Password ",
  };

  let shown = match field {
    Field::Password => "•".repeat(value.chars().count()),
    _ => value.to_owned(),
  };
  let text = if focused { format!("{shown}_") } else { shown };

  let border = if focused {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };

  f.render_widget(
    Paragraph::new(text).block(
      Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(border),
    ),
    area,
  );
}
