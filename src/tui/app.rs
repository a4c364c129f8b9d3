use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::io::store;
use crate::model::Task;
use crate::ops::tree;

use super::history::History;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    Visual,
}

impl Mode {
    /// Allowed-transition table. Every mode change goes through
    /// [`App::set_mode`], so an illegal transition is a bug in the key
    /// handlers, not a runtime condition.
    pub fn allows(self, next: Mode) -> bool {
        use Mode::*;
        matches!(
            (self, next),
            (Normal, Insert)
                | (Normal, Command)
                | (Normal, Visual)
                | (Insert, Normal)
                | (Command, Normal)
                | (Visual, Normal)
        )
    }
}

/// What committing the insert buffer does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTarget {
    /// Append a new root task
    NewTask,
    /// Replace the cursor task's text
    EditTask,
    /// Append a child under the cursor task
    NewSubtask,
}

/// Main application state: the forest, the cursor, modal bookkeeping,
/// and the undo history. All mutating operations follow the same
/// pattern: record a history snapshot, mutate, persist best-effort,
/// reposition the cursor. Side-effect failures (store, clipboard) are
/// surfaced as status messages and never roll back the in-memory tree.
pub struct App {
    pub tasks: Vec<Task>,
    /// Path of the active task; `None` means no selection (empty tree)
    pub cursor: Option<Vec<usize>>,
    pub mode: Mode,
    pub insert_target: InsertTarget,
    /// Insert-mode line buffer and byte-offset cursor within it
    pub input_buffer: String,
    pub input_cursor: usize,
    /// Command-mode buffer (the text after `:`)
    pub command_buffer: String,
    /// Visual-mode anchor; the range runs from here to the cursor in
    /// flattened order
    pub visual_anchor: Option<Vec<usize>>,
    pub history: History,
    /// Transient status message shown under the list
    pub message: Option<String>,
    pub message_is_error: bool,
    pub should_quit: bool,
    /// First `g` of a `gg` was pressed
    pub pending_g: bool,
    /// First visible row of the list view
    pub scroll_offset: usize,
    pub theme: Theme,
    pub store_path: PathBuf,
    pub clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(tasks: Vec<Task>, store_path: PathBuf, clipboard: Box<dyn Clipboard>) -> Self {
        let cursor = tree::flatten(&tasks).into_iter().next();
        App {
            tasks,
            cursor,
            mode: Mode::Normal,
            insert_target: InsertTarget::NewTask,
            input_buffer: String::new(),
            input_cursor: 0,
            command_buffer: String::new(),
            visual_anchor: None,
            history: History::new(),
            message: None,
            message_is_error: false,
            should_quit: false,
            pending_g: false,
            scroll_offset: 0,
            theme: Theme::default(),
            store_path,
            clipboard,
        }
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_error = false;
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_error = true;
    }

    fn set_mode(&mut self, next: Mode) {
        debug_assert!(
            self.mode.allows(next),
            "illegal mode transition {:?} -> {:?}",
            self.mode,
            next
        );
        self.mode = next;
    }

    /// Position of the cursor within `paths` (value equality)
    fn cursor_index(&self, paths: &[Vec<usize>]) -> Option<usize> {
        let cursor = self.cursor.as_ref()?;
        paths.iter().position(|p| p == cursor)
    }

    /// The task under the cursor, if the cursor points at a live path
    pub fn cursor_task(&self) -> Option<&Task> {
        let cursor = self.cursor.as_ref()?;
        tree::get(&self.tasks, cursor).ok()
    }

    /// Visual selection as a flattened-order index span (inclusive).
    /// The range spans arbitrary depths: it is simply every entry of
    /// the flattened list between the anchor and the cursor.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        if self.mode != Mode::Visual {
            return None;
        }
        let paths = tree::flatten(&self.tasks);
        let cur = self.cursor_index(&paths)?;
        let anchor = self
            .visual_anchor
            .as_ref()
            .and_then(|a| paths.iter().position(|p| p == a))
            .unwrap_or(cur);
        Some((cur.min(anchor), cur.max(anchor)))
    }

    // -----------------------------------------------------------------
    // Navigation (never recorded in history)
    // -----------------------------------------------------------------

    pub fn move_up(&mut self) {
        let paths = tree::flatten(&self.tasks);
        if paths.is_empty() {
            return;
        }
        let next = match self.cursor_index(&paths) {
            Some(i) => i.saturating_sub(1),
            // Stale cursor falls back to the first entry
            None => 0,
        };
        self.cursor = Some(paths[next].clone());
    }

    pub fn move_down(&mut self) {
        let paths = tree::flatten(&self.tasks);
        if paths.is_empty() {
            return;
        }
        let next = match self.cursor_index(&paths) {
            Some(i) => (i + 1).min(paths.len() - 1),
            // Stale cursor falls back to the last entry
            None => paths.len() - 1,
        };
        self.cursor = Some(paths[next].clone());
    }

    pub fn move_to_top(&mut self) {
        self.cursor = tree::flatten(&self.tasks).into_iter().next();
    }

    pub fn move_to_bottom(&mut self) {
        if let Some(last) = tree::flatten(&self.tasks).into_iter().next_back() {
            self.cursor = Some(last);
        }
    }

    /// After undo/redo the old cursor path may not exist; reposition to
    /// the first entry of the new flattened list.
    fn reset_cursor_to_first(&mut self) {
        self.cursor = tree::flatten(&self.tasks).into_iter().next();
    }

    // -----------------------------------------------------------------
    // Mutation operations
    // -----------------------------------------------------------------

    /// Best-effort persist after a structural mutation. Failure is a
    /// status message; the in-memory tree is never rolled back.
    fn persist(&mut self) {
        if let Err(e) = store::save(&self.store_path, &self.tasks) {
            self.error(format!("could not save: {}", e));
        }
    }

    /// Explicit save (`w` / `:w`)
    pub fn save(&mut self) {
        match store::save(&self.store_path, &self.tasks) {
            Ok(()) => self.info("saved"),
            Err(e) => self.error(format!("could not save: {}", e)),
        }
    }

    /// Append a new root-level task; cursor moves to it
    pub fn add_todo(&mut self, text: String) {
        self.history.record(&self.tasks);
        self.tasks.push(Task::new(text));
        self.cursor = Some(vec![self.tasks.len() - 1]);
        self.persist();
    }

    /// Append a child under the cursor task; cursor moves to it
    pub fn add_subtask(&mut self, text: String) {
        let Some(parent) = self.cursor.clone() else {
            self.error("no parent selected");
            return;
        };
        if tree::get(&self.tasks, &parent).is_err() {
            self.error("no parent selected");
            return;
        }
        self.history.record(&self.tasks);
        // get() above validated the path, so children_mut cannot fail
        if let Ok(children) = tree::children_mut(&mut self.tasks, &parent) {
            children.push(Task::new(text));
            let mut cursor = parent;
            cursor.push(children.len() - 1);
            self.cursor = Some(cursor);
        }
        self.persist();
    }

    /// Replace the cursor task's text in place
    pub fn edit_todo(&mut self, text: String) {
        let Some(cursor) = self.cursor.clone() else {
            self.error("no todo selected");
            return;
        };
        if tree::get(&self.tasks, &cursor).is_err() {
            self.error("no todo selected");
            return;
        }
        self.history.record(&self.tasks);
        if let Ok(task) = tree::get_mut(&mut self.tasks, &cursor) {
            task.text = text;
            self.info("edited");
        }
        self.persist();
    }

    /// Flip the cursor task's completed flag
    pub fn toggle_todo(&mut self) {
        let Some(cursor) = self.cursor.clone() else {
            self.error("no todo selected");
            return;
        };
        if tree::get(&self.tasks, &cursor).is_err() {
            self.error("no todo selected");
            return;
        }
        self.history.record(&self.tasks);
        if let Ok(task) = tree::get_mut(&mut self.tasks, &cursor) {
            task.completed = !task.completed;
        }
        self.persist();
    }

    /// Remove the cursor's subtree, copying its text to the clipboard
    /// best-effort. Cursor lands on the previous flattened entry.
    pub fn delete_todo(&mut self) {
        let paths = tree::flatten(&self.tasks);
        let Some(idx) = self.cursor_index(&paths) else {
            self.error("no todo selected");
            return;
        };
        self.history.record(&self.tasks);
        let removed = match tree::remove(&mut self.tasks, &paths[idx]) {
            Ok(task) => task,
            Err(e) => {
                self.error(e.to_string());
                return;
            }
        };
        // Clipboard failure must not abort the completed deletion
        match self.clipboard.copy(&removed.text) {
            Ok(()) => self.info("deleted and copied to clipboard"),
            Err(e) => self.error(format!("deleted; {}", e)),
        }
        self.persist();

        let paths = tree::flatten(&self.tasks);
        self.cursor = if paths.is_empty() {
            None
        } else {
            Some(paths[idx.saturating_sub(1).min(paths.len() - 1)].clone())
        };
    }

    /// Copy the cursor task's text — or, in visual mode, the joined
    /// texts of the selected flattened-order span — to the clipboard.
    /// Non-mutating; never touches history.
    pub fn yank_todo(&mut self) {
        if let Some((start, end)) = self.selection_range() {
            let paths = tree::flatten(&self.tasks);
            let texts: Vec<String> = paths[start..=end]
                .iter()
                .filter_map(|p| tree::get(&self.tasks, p).ok())
                .map(|t| t.text.clone())
                .collect();
            let n = texts.len();
            match self.clipboard.copy(&texts.join("\n")) {
                Ok(()) => self.info(format!("yanked {} todos to clipboard", n)),
                Err(e) => self.error(e.to_string()),
            }
            self.exit_visual();
        } else {
            let Some(text) = self.cursor_task().map(|t| t.text.clone()) else {
                self.error("no todo selected");
                return;
            };
            match self.clipboard.copy(&text) {
                Ok(()) => self.info("yanked to clipboard"),
                Err(e) => self.error(e.to_string()),
            }
        }
    }

    /// Insert each clipboard line as a new sibling after the cursor
    /// task, at the cursor's depth. Cursor moves to the last inserted
    /// line. Empty tree (or no selection) appends at the root.
    pub fn paste_todo(&mut self) {
        let content = match self.clipboard.paste() {
            Ok(text) => text,
            Err(e) => {
                self.error(e.to_string());
                return;
            }
        };
        if content.trim().is_empty() {
            self.error("clipboard empty");
            return;
        }
        let lines: Vec<&str> = content.lines().collect();
        self.history.record(&self.tasks);

        let inserted_at = match self.cursor.clone() {
            Some(cursor) => match tree::siblings_mut(&mut self.tasks, &cursor) {
                Ok((seq, idx)) => {
                    for (i, line) in lines.iter().enumerate() {
                        seq.insert(idx + 1 + i, Task::new(*line));
                    }
                    let mut path = cursor;
                    *path.last_mut().unwrap() += lines.len();
                    Some(path)
                }
                Err(_) => None,
            },
            None => None,
        };
        let cursor = inserted_at.unwrap_or_else(|| {
            // No valid insertion point: append at the root
            for line in &lines {
                self.tasks.push(Task::new(*line));
            }
            vec![self.tasks.len() - 1]
        });

        self.info(format!("pasted {} todos from clipboard", lines.len()));
        self.persist();

        // Clamp to the new flattened list
        let paths = tree::flatten(&self.tasks);
        self.cursor = if paths.contains(&cursor) {
            Some(cursor)
        } else {
            paths.into_iter().next_back()
        };
    }

    pub fn undo(&mut self) {
        match self.history.undo(&self.tasks) {
            Ok(snapshot) => {
                self.tasks = snapshot;
                self.reset_cursor_to_first();
                self.info("undid change");
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn redo(&mut self) {
        match self.history.redo(&self.tasks) {
            Ok(snapshot) => {
                self.tasks = snapshot;
                self.reset_cursor_to_first();
                self.info("redid change");
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------
    // Mode transitions
    // -----------------------------------------------------------------

    /// Enter insert mode. Edit prefills the buffer with the current
    /// text; both add variants start blank. The subtask and edit
    /// variants need a live cursor task up front.
    pub fn enter_insert(&mut self, target: InsertTarget) {
        let prefill = match target {
            InsertTarget::EditTask => match self.cursor_task() {
                Some(task) => task.text.clone(),
                None => {
                    self.error("no todo selected");
                    return;
                }
            },
            InsertTarget::NewSubtask => {
                if self.cursor_task().is_none() {
                    self.error("no parent selected");
                    return;
                }
                String::new()
            }
            InsertTarget::NewTask => String::new(),
        };
        self.input_cursor = prefill.len();
        self.input_buffer = prefill;
        self.insert_target = target;
        self.set_mode(Mode::Insert);
    }

    /// Commit the insert buffer. Blank input commits nothing, matching
    /// Escape's discard.
    pub fn commit_insert(&mut self) {
        let text = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.set_mode(Mode::Normal);
        if text.is_empty() {
            return;
        }
        match self.insert_target {
            InsertTarget::NewTask => self.add_todo(text),
            InsertTarget::EditTask => self.edit_todo(text),
            InsertTarget::NewSubtask => self.add_subtask(text),
        }
    }

    pub fn cancel_insert(&mut self) {
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.set_mode(Mode::Normal);
    }

    /// Enter visual mode with the range anchored at the cursor
    pub fn enter_visual(&mut self) {
        if self.cursor.is_none() {
            self.error("no todo selected");
            return;
        }
        self.visual_anchor = self.cursor.clone();
        self.set_mode(Mode::Visual);
    }

    pub fn exit_visual(&mut self) {
        self.visual_anchor = None;
        self.set_mode(Mode::Normal);
    }

    pub fn enter_command(&mut self) {
        self.command_buffer.clear();
        self.set_mode(Mode::Command);
    }

    pub fn cancel_command(&mut self) {
        self.command_buffer.clear();
        self.set_mode(Mode::Normal);
    }

    /// Execute the command buffer (`w`, `q`, `wq`)
    pub fn execute_command(&mut self) {
        let cmd = self.command_buffer.trim().to_string();
        self.command_buffer.clear();
        self.set_mode(Mode::Normal);
        match cmd.as_str() {
            "" => {}
            "w" => self.save(),
            "q" => self.should_quit = true,
            "wq" | "x" => {
                self.save();
                self.should_quit = true;
            }
            other => self.error(format!("not a command: {}", other)),
        }
    }
}

/// Run the TUI application
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store_path = store::default_store_path()?;
    let (tasks, load_error) = match store::load(&store_path) {
        Ok(tasks) => (tasks, None),
        Err(e) => (Vec::new(), Some(format!("could not load todos: {}", e))),
    };

    let mut app = App::new(tasks, store_path, Box::new(SystemClipboard));
    if let Some(msg) = load_error {
        app.error(msg);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{BrokenClipboard, MemClipboard};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_app(texts: &[&str]) -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let tasks = texts.iter().map(|t| Task::new(*t)).collect();
        let app = App::new(
            tasks,
            dir.path().join(".twig.json"),
            Box::new(MemClipboard::default()),
        );
        (app, dir)
    }

    fn set_clipboard(app: &mut App, text: &str) {
        app.clipboard.copy(text).unwrap();
    }

    fn clipboard_content(app: &mut App) -> String {
        app.clipboard.paste().unwrap()
    }

    #[test]
    fn new_app_cursor_is_first_entry_or_none() {
        let (app, _dir) = test_app(&["A", "B"]);
        assert_eq!(app.cursor, Some(vec![0]));
        let (empty, _dir) = test_app(&[]);
        assert_eq!(empty.cursor, None);
    }

    #[test]
    fn add_todo_appends_and_moves_cursor() {
        let (mut app, _dir) = test_app(&["A"]);
        app.add_todo("B".into());
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.tasks[1].text, "B");
        assert!(!app.tasks[1].completed);
        assert_eq!(app.cursor, Some(vec![1]));
    }

    #[test]
    fn add_subtask_on_b_lands_at_1_0() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.cursor = Some(vec![1]);
        app.add_subtask("B1".into());
        assert_eq!(app.tasks[0].children.len(), 0);
        assert_eq!(app.tasks[1].children.len(), 1);
        assert_eq!(app.tasks[1].children[0].text, "B1");
        assert!(!app.tasks[1].children[0].completed);
        assert_eq!(app.cursor, Some(vec![1, 0]));
    }

    #[test]
    fn add_subtask_without_selection_fails() {
        let (mut app, _dir) = test_app(&[]);
        app.add_subtask("orphan".into());
        assert!(app.tasks.is_empty());
        assert_eq!(app.message.as_deref(), Some("no parent selected"));
    }

    #[test]
    fn edit_and_toggle_change_in_place() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.cursor = Some(vec![1]);
        app.edit_todo("B'".into());
        assert_eq!(app.tasks[1].text, "B'");
        app.toggle_todo();
        assert!(app.tasks[1].completed);
        app.toggle_todo();
        assert!(!app.tasks[1].completed);
        // Structural shape unchanged throughout
        assert_eq!(tree::count(&app.tasks), 2);
    }

    #[test]
    fn delete_moves_cursor_to_previous_entry() {
        let (mut app, _dir) = test_app(&["A", "B", "C"]);
        app.cursor = Some(vec![1]);
        app.delete_todo();
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.cursor, Some(vec![0]));
        assert_eq!(clipboard_content(&mut app), "B");
    }

    #[test]
    fn delete_first_entry_keeps_cursor_at_first() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.cursor = Some(vec![0]);
        app.delete_todo();
        assert_eq!(app.cursor, Some(vec![0]));
        assert_eq!(app.tasks[0].text, "B");
    }

    #[test]
    fn delete_last_todo_clears_cursor() {
        let (mut app, _dir) = test_app(&["A"]);
        app.cursor = Some(vec![0]);
        app.delete_todo();
        assert!(app.tasks.is_empty());
        assert_eq!(app.cursor, None);
    }

    #[test]
    fn delete_removes_whole_subtree() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.cursor = Some(vec![1]);
        app.add_subtask("B1".into());
        app.cursor = Some(vec![1]);
        app.delete_todo();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(tree::count(&app.tasks), 1);
        assert_eq!(app.cursor, Some(vec![0]));
    }

    #[test]
    fn delete_without_selection_reports() {
        let (mut app, _dir) = test_app(&[]);
        app.delete_todo();
        assert_eq!(app.message.as_deref(), Some("no todo selected"));
    }

    #[test]
    fn paste_inserts_siblings_after_cursor() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        set_clipboard(&mut app, "X\nY");
        app.cursor = Some(vec![0]);
        app.paste_todo();
        let texts: Vec<&str> = app.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "X", "Y", "B"]);
        assert_eq!(app.cursor, Some(vec![2]));
    }

    #[test]
    fn paste_at_nested_cursor_stays_at_depth() {
        let (mut app, _dir) = test_app(&["A"]);
        app.cursor = Some(vec![0]);
        app.add_subtask("A0".into());
        set_clipboard(&mut app, "A1");
        app.paste_todo();
        assert_eq!(app.tasks[0].children.len(), 2);
        assert_eq!(app.tasks[0].children[1].text, "A1");
        assert_eq!(app.cursor, Some(vec![0, 1]));
    }

    #[test]
    fn paste_whitespace_clipboard_is_a_no_op() {
        let (mut app, _dir) = test_app(&["A"]);
        set_clipboard(&mut app, "  \n\t ");
        app.paste_todo();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.message.as_deref(), Some("clipboard empty"));
        assert_eq!(app.history.undo_depth(), 0);
    }

    #[test]
    fn paste_into_empty_tree_appends_at_root() {
        let (mut app, _dir) = test_app(&[]);
        set_clipboard(&mut app, "X\nY");
        app.paste_todo();
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.cursor, Some(vec![1]));
    }

    #[test]
    fn undo_restores_and_repositions() {
        let (mut app, _dir) = test_app(&["A"]);
        app.add_todo("B".into());
        app.undo();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.cursor, Some(vec![0]));
        app.redo();
        assert_eq!(app.tasks.len(), 2);
    }

    #[test]
    fn undo_empty_stack_reports_nothing_to_undo() {
        let (mut app, _dir) = test_app(&["A"]);
        let before = app.tasks.clone();
        app.undo();
        assert_eq!(app.tasks, before);
        assert_eq!(app.message.as_deref(), Some("nothing to undo"));
    }

    #[test]
    fn mutation_after_undo_discards_redo() {
        let (mut app, _dir) = test_app(&[]);
        app.add_todo("A".into());
        app.add_todo("B".into());
        app.undo();
        app.add_todo("C".into());
        assert_eq!(app.history.redo_depth(), 0);
        app.redo();
        assert_eq!(app.message.as_deref(), Some("nothing to redo"));
    }

    #[test]
    fn undo_to_exhaustion_restores_initial_forest() {
        let (mut app, _dir) = test_app(&["seed"]);
        let initial = app.tasks.clone();
        app.add_todo("A".into());
        app.cursor = Some(vec![0]);
        app.add_subtask("sub".into());
        app.toggle_todo();
        app.delete_todo();
        while app.history.undo_depth() > 0 {
            app.undo();
        }
        assert_eq!(app.tasks, initial);
    }

    #[test]
    fn navigation_walks_flattened_order() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.cursor = Some(vec![0]);
        app.add_subtask("A0".into());
        // flattened: [0], [0,0], [1]
        app.move_to_top();
        assert_eq!(app.cursor, Some(vec![0]));
        app.move_down();
        assert_eq!(app.cursor, Some(vec![0, 0]));
        app.move_down();
        assert_eq!(app.cursor, Some(vec![1]));
        app.move_down(); // no-op at last entry
        assert_eq!(app.cursor, Some(vec![1]));
        app.move_up();
        assert_eq!(app.cursor, Some(vec![0, 0]));
        app.move_to_bottom();
        assert_eq!(app.cursor, Some(vec![1]));
    }

    #[test]
    fn stale_cursor_falls_back_to_ends() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.cursor = Some(vec![7]);
        app.move_up();
        assert_eq!(app.cursor, Some(vec![0]));
        app.cursor = Some(vec![7]);
        app.move_down();
        assert_eq!(app.cursor, Some(vec![1]));
    }

    #[test]
    fn navigation_does_not_touch_history() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.move_down();
        app.move_to_top();
        assert_eq!(app.history.undo_depth(), 0);
    }

    #[test]
    fn yank_copies_without_history() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.cursor = Some(vec![1]);
        app.yank_todo();
        assert_eq!(clipboard_content(&mut app), "B");
        assert_eq!(app.history.undo_depth(), 0);
    }

    #[test]
    fn visual_yank_joins_flattened_span() {
        let (mut app, _dir) = test_app(&["A", "B", "C"]);
        app.cursor = Some(vec![0]);
        app.add_subtask("A0".into());
        // flattened: A, A0, B, C — select A..B
        app.cursor = Some(vec![0]);
        app.enter_visual();
        app.move_down();
        app.move_down();
        app.yank_todo();
        assert_eq!(clipboard_content(&mut app), "A\nA0\nB");
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.visual_anchor.is_none());
    }

    #[test]
    fn visual_range_is_direction_agnostic() {
        let (mut app, _dir) = test_app(&["A", "B", "C"]);
        app.cursor = Some(vec![2]);
        app.enter_visual();
        app.move_up();
        assert_eq!(app.selection_range(), Some((1, 2)));
    }

    #[test]
    fn insert_commits_add_edit_and_subtask() {
        let (mut app, _dir) = test_app(&["A"]);
        app.enter_insert(InsertTarget::NewTask);
        app.input_buffer = "  B  ".into();
        app.commit_insert();
        assert_eq!(app.tasks[1].text, "B");
        assert_eq!(app.mode, Mode::Normal);

        app.enter_insert(InsertTarget::EditTask);
        assert_eq!(app.input_buffer, "B"); // prefilled
        app.input_buffer = "B'".into();
        app.commit_insert();
        assert_eq!(app.tasks[1].text, "B'");

        app.enter_insert(InsertTarget::NewSubtask);
        app.input_buffer = "B'0".into();
        app.commit_insert();
        assert_eq!(app.tasks[1].children[0].text, "B'0");
        assert_eq!(app.cursor, Some(vec![1, 0]));
    }

    #[test]
    fn blank_insert_commits_nothing() {
        let (mut app, _dir) = test_app(&["A"]);
        app.enter_insert(InsertTarget::NewTask);
        app.input_buffer = "   ".into();
        app.commit_insert();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.history.undo_depth(), 0);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn cancel_insert_discards_input() {
        let (mut app, _dir) = test_app(&["A"]);
        app.enter_insert(InsertTarget::NewTask);
        app.input_buffer = "discarded".into();
        app.cancel_insert();
        assert_eq!(app.tasks.len(), 1);
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn command_execution() {
        let (mut app, _dir) = test_app(&["A"]);
        app.enter_command();
        app.command_buffer = "q".into();
        app.execute_command();
        assert!(app.should_quit);

        let (mut app, dir) = test_app(&["A"]);
        app.enter_command();
        app.command_buffer = "w".into();
        app.execute_command();
        assert_eq!(app.message.as_deref(), Some("saved"));
        assert!(dir.path().join(".twig.json").exists());

        app.enter_command();
        app.command_buffer = "frobnicate".into();
        app.execute_command();
        assert_eq!(app.message.as_deref(), Some("not a command: frobnicate"));
    }

    #[test]
    fn mode_transition_table() {
        use Mode::*;
        assert!(Normal.allows(Insert));
        assert!(Normal.allows(Command));
        assert!(Normal.allows(Visual));
        assert!(Insert.allows(Normal));
        assert!(Command.allows(Normal));
        assert!(Visual.allows(Normal));
        // Modal modes never stack
        assert!(!Insert.allows(Visual));
        assert!(!Visual.allows(Insert));
        assert!(!Command.allows(Visual));
        assert!(!Insert.allows(Command));
    }

    #[test]
    fn delete_commits_despite_clipboard_failure() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.clipboard = Box::new(BrokenClipboard);
        app.cursor = Some(vec![1]);
        app.delete_todo();
        // Clipboard is a best-effort side effect: the deletion stands,
        // the cursor repositions, and the failure is only a message
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].text, "A");
        assert_eq!(app.cursor, Some(vec![0]));
        assert!(app.message_is_error);
        assert_eq!(app.history.undo_depth(), 1);
    }

    #[test]
    fn yank_with_broken_clipboard_reports_without_mutating() {
        let (mut app, _dir) = test_app(&["A", "B"]);
        app.clipboard = Box::new(BrokenClipboard);
        app.yank_todo();
        assert!(app.message_is_error);
        assert_eq!(app.tasks.len(), 2);

        // Visual-mode yank still exits visual mode on failure
        app.enter_visual();
        app.move_down();
        app.yank_todo();
        assert!(app.message_is_error);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.visual_anchor.is_none());
    }

    #[test]
    fn paste_with_broken_clipboard_is_a_no_op() {
        let (mut app, _dir) = test_app(&["A"]);
        app.clipboard = Box::new(BrokenClipboard);
        app.paste_todo();
        assert_eq!(app.tasks.len(), 1);
        assert!(app.message_is_error);
        assert_eq!(app.history.undo_depth(), 0);
    }

    #[test]
    fn persist_failure_keeps_mutation_and_reports() {
        let (mut app, dir) = test_app(&["A"]);
        // Point the store at a directory that does not exist so the
        // temp-file write fails
        app.store_path = dir.path().join("missing").join(".twig.json");
        app.add_todo("B".into());
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.cursor, Some(vec![1]));
        assert!(app.message_is_error);
        assert!(
            app.message.as_deref().unwrap().starts_with("could not save"),
            "unexpected message: {:?}",
            app.message
        );
        // The failed save is still undoable like any other mutation
        app.undo();
        assert_eq!(app.tasks.len(), 1);
    }

    #[test]
    fn explicit_save_failure_reports() {
        let (mut app, dir) = test_app(&["A"]);
        app.store_path = dir.path().join("missing").join(".twig.json");
        app.save();
        assert!(app.message_is_error);
        assert!(app.message.as_deref().unwrap().starts_with("could not save"));
    }

    #[test]
    fn mutations_persist_to_store() {
        let (mut app, _dir) = test_app(&[]);
        app.add_todo("A".into());
        let loaded = store::load(&app.store_path).unwrap();
        assert_eq!(loaded, app.tasks);
    }
}
