use crossterm::event::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::App;

pub(super) fn handle_insert(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_insert(),
        KeyCode::Esc => app.cancel_insert(),

        KeyCode::Backspace => {
            if let Some(start) = prev_grapheme_start(&app.input_buffer, app.input_cursor) {
                app.input_buffer.replace_range(start..app.input_cursor, "");
                app.input_cursor = start;
            }
        }
        KeyCode::Left => {
            if let Some(start) = prev_grapheme_start(&app.input_buffer, app.input_cursor) {
                app.input_cursor = start;
            }
        }
        KeyCode::Right => {
            if let Some(end) = next_grapheme_end(&app.input_buffer, app.input_cursor) {
                app.input_cursor = end;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input_buffer.len(),

        KeyCode::Char(c) => {
            app.input_buffer.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Byte offset of the grapheme boundary before `cursor`, if any
fn prev_grapheme_start(text: &str, cursor: usize) -> Option<usize> {
    text[..cursor]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// Byte offset of the grapheme boundary after `cursor`, if any
fn next_grapheme_end(text: &str, cursor: usize) -> Option<usize> {
    text[cursor..]
        .graphemes(true)
        .next()
        .map(|g| cursor + g.len())
}
