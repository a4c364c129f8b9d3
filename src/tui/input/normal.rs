use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, InsertTarget};

pub(super) fn handle_normal(app: &mut App, key: KeyEvent) {
    // gg: second g jumps to the top, any other key cancels the pending g
    if app.pending_g {
        app.pending_g = false;
        if key.code == KeyCode::Char('g') {
            app.move_to_top();
            return;
        }
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.pending_g = true,
        KeyCode::Char('G') => app.move_to_bottom(),

        KeyCode::Char('i') => app.enter_insert(InsertTarget::NewTask),
        KeyCode::Char('e') => app.enter_insert(InsertTarget::EditTask),
        KeyCode::Char('I') => app.enter_insert(InsertTarget::NewSubtask),

        KeyCode::Char('x') => app.toggle_todo(),
        KeyCode::Char('d') => app.delete_todo(),
        KeyCode::Char('y') => app.yank_todo(),
        KeyCode::Char('p') => app.paste_todo(),

        KeyCode::Char('V') => app.enter_visual(),

        KeyCode::Char('u') => app.undo(),
        KeyCode::Char('U') => app.redo(),

        KeyCode::Char('w') => app.save(),
        KeyCode::Char(':') => app.enter_command(),

        _ => {}
    }
}
