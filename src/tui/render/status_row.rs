use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InsertTarget, Mode};

/// Render the mode/prompt row: insert prompt with a block cursor,
/// command buffer, or a `-- MODE --` indicator.
pub fn render_prompt_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Insert => {
            let prompt = match app.insert_target {
                InsertTarget::NewTask => "new todo: ",
                InsertTarget::EditTask => "edit todo: ",
                InsertTarget::NewSubtask => "new subtask: ",
            };
            let before = &app.input_buffer[..app.input_cursor];
            let after = &app.input_buffer[app.input_cursor..];
            let mut spans = vec![
                Span::styled(prompt, Style::default().fg(app.theme.title).bg(bg)),
                Span::styled(before.to_string(), Style::default().fg(app.theme.text).bg(bg)),
                Span::styled("\u{258C}", Style::default().fg(app.theme.cursor_bg).bg(bg)), // ▌
                Span::styled(after.to_string(), Style::default().fg(app.theme.text).bg(bg)),
            ];
            push_right_hint(&mut spans, width, "Enter save  Esc cancel", app);
            Line::from(spans)
        }
        Mode::Command => {
            let mut spans = vec![
                Span::styled(
                    format!(":{}", app.command_buffer),
                    Style::default().fg(app.theme.text).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.cursor_bg).bg(bg)),
            ];
            push_right_hint(&mut spans, width, "Enter run  Esc cancel", app);
            Line::from(spans)
        }
        Mode::Visual => Line::from(Span::styled(
            "-- VISUAL --",
            Style::default().fg(app.theme.title).bg(bg),
        )),
        Mode::Normal => Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(bg),
        )),
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Pad to the right edge and append a dimmed hint, if it fits
fn push_right_hint(spans: &mut Vec<Span<'_>>, width: usize, hint: &'static str, app: &App) {
    let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let hint_width = hint.width();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(
            " ".repeat(padding),
            Style::default().bg(app.theme.background),
        ));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.done).bg(app.theme.background),
        ));
    }
}

/// Render the transient status message row
pub fn render_message_row(frame: &mut Frame, app: &App, area: Rect) {
    let fg = if app.message_is_error {
        app.theme.error
    } else {
        app.theme.text
    };
    let msg = app.message.as_deref().unwrap_or("");
    let paragraph = Paragraph::new(msg).style(Style::default().fg(fg).bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

/// Render the fixed key-hint row
pub fn render_help_row(frame: &mut Frame, app: &App, area: Rect) {
    let help =
        "q:quit i:new e:edit I:subtask x:toggle d:delete y:yank p:paste V:visual u:undo U:redo :w save";
    let paragraph =
        Paragraph::new(help).style(Style::default().fg(app.theme.help).bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
