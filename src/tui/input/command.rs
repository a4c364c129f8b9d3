use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_command(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.execute_command(),
        KeyCode::Esc => app.cancel_command(),
        KeyCode::Backspace => {
            if app.command_buffer.pop().is_none() {
                // Backspace past the `:` leaves command mode, like vim
                app.cancel_command();
            }
        }
        KeyCode::Char(c) => app.command_buffer.push(c),
        _ => {}
    }
}
