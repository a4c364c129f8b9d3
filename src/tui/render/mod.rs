pub mod list_view;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title | list | prompt/mode | message | help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(1),    // task list
            Constraint::Length(1), // mode / prompt row
            Constraint::Length(1), // message row
            Constraint::Length(1), // help row
        ])
        .split(area);

    let title = Paragraph::new(Line::from("T W I G").centered()).style(
        Style::default()
            .fg(app.theme.title)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, chunks[0]);

    list_view::render_list(frame, app, chunks[1]);
    status_row::render_prompt_row(frame, app, chunks[2]);
    status_row::render_message_row(frame, app, chunks[3]);
    status_row::render_help_row(frame, app, chunks[4]);
}
