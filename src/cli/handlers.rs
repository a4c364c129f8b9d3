use crate::io::store::{self, StoreError};
use crate::model::Task;

use super::commands::AddArgs;

/// `tw list` — print the forest with indentation and checkboxes
pub fn cmd_list() -> Result<(), StoreError> {
    let tasks = store::load(&store::default_store_path()?)?;
    if tasks.is_empty() {
        println!("no todos");
        return Ok(());
    }
    print_tasks(&tasks, 0);
    Ok(())
}

fn print_tasks(tasks: &[Task], depth: usize) {
    for task in tasks {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        println!("{}{} {}", "  ".repeat(depth), checkbox, task.text);
        print_tasks(&task.children, depth + 1);
    }
}

/// `tw add <text>` — append a root task and save
pub fn cmd_add(args: AddArgs) -> Result<(), StoreError> {
    let path = store::default_store_path()?;
    let mut tasks = store::load(&path)?;
    tasks.push(Task::new(args.text));
    store::save(&path, &tasks)?;
    println!("added ({} total)", tasks.len());
    Ok(())
}
