mod command;
mod insert;
mod normal;
mod visual;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Transient status messages last until the next keypress
    app.message = None;
    app.message_is_error = false;

    match app.mode {
        Mode::Normal => normal::handle_normal(app, key),
        Mode::Insert => insert::handle_insert(app, key),
        Mode::Command => command::handle_command(app, key),
        Mode::Visual => visual::handle_visual(app, key),
    }
}
