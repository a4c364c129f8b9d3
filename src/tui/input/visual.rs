use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

/// Visual mode: navigation moves only the range end (the cursor); the
/// anchor stays where `V` captured it.
pub(super) fn handle_visual(app: &mut App, key: KeyEvent) {
    if app.pending_g {
        app.pending_g = false;
        if key.code == KeyCode::Char('g') {
            app.move_to_top();
            return;
        }
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.pending_g = true,
        KeyCode::Char('G') => app.move_to_bottom(),

        // Yank exits visual mode itself
        KeyCode::Char('y') => app.yank_todo(),
        KeyCode::Esc => app.exit_visual(),
        _ => {}
    }
}
