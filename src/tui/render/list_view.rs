use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::tree;
use crate::tui::app::App;

/// Render the task list: one row per flattened entry, indented two
/// columns per nesting level, `[x]` / `[ ]` checkbox prefix.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let paths = tree::flatten(&app.tasks);

    if paths.is_empty() {
        let empty = Paragraph::new("  no todos — press i to add one")
            .style(Style::default().fg(app.theme.done).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let cursor_idx = app
        .cursor
        .as_ref()
        .and_then(|c| paths.iter().position(|p| p == c));
    let selection = app.selection_range();

    // Keep the cursor row inside the viewport
    let visible_height = area.height as usize;
    if let Some(idx) = cursor_idx {
        if idx < app.scroll_offset {
            app.scroll_offset = idx;
        } else if visible_height > 0 && idx >= app.scroll_offset + visible_height {
            app.scroll_offset = idx.saturating_sub(visible_height - 1);
        }
    }
    app.scroll_offset = app.scroll_offset.min(paths.len().saturating_sub(1));

    let mut lines = Vec::with_capacity(visible_height);
    for (i, path) in paths
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
    {
        let Ok(task) = tree::get(&app.tasks, path) else {
            continue;
        };
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        let indent = "  ".repeat(path.len() - 1);
        let text = format!("  {}{} {}", indent, checkbox, task.text);

        let in_selection = selection.is_some_and(|(start, end)| start <= i && i <= end);
        let style = if cursor_idx == Some(i) {
            Style::default()
                .fg(app.theme.cursor_fg)
                .bg(app.theme.cursor_bg)
                .add_modifier(Modifier::BOLD)
        } else if in_selection {
            Style::default()
                .fg(app.theme.text)
                .bg(app.theme.selection_bg)
        } else if task.completed {
            Style::default()
                .fg(app.theme.done)
                .bg(app.theme.background)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(app.theme.text).bg(app.theme.background)
        };

        lines.push(Line::from(Span::styled(text, style)));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}
