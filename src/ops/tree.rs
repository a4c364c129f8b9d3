use crate::model::Task;

/// Error type for path addressing
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("no task at path {0:?}")]
    NotFound(Vec<usize>),
}

/// Look up the task at `path`, descending one child index per segment.
///
/// Paths come from [`flatten`] and are only valid until the next
/// structural mutation — sibling indices shift on insert/delete, so a
/// held path must be recomputed, never reused across a mutation. An
/// empty path never names a task and reports `NotFound`.
pub fn get<'a>(tasks: &'a [Task], path: &[usize]) -> Result<&'a Task, TreeError> {
    let mut current = tasks;
    for (depth, &i) in path.iter().enumerate() {
        let task = current.get(i).ok_or_else(|| TreeError::NotFound(path.to_vec()))?;
        if depth == path.len() - 1 {
            return Ok(task);
        }
        current = &task.children;
    }
    Err(TreeError::NotFound(path.to_vec()))
}

/// Mutable variant of [`get`]
pub fn get_mut<'a>(tasks: &'a mut Vec<Task>, path: &[usize]) -> Result<&'a mut Task, TreeError> {
    let mut current = tasks;
    for (depth, &i) in path.iter().enumerate() {
        if i >= current.len() {
            return Err(TreeError::NotFound(path.to_vec()));
        }
        if depth == path.len() - 1 {
            return Ok(&mut current[i]);
        }
        current = &mut current[i].children;
    }
    Err(TreeError::NotFound(path.to_vec()))
}

/// The child sequence of the task at `path`, for appending subtasks
pub fn children_mut<'a>(
    tasks: &'a mut Vec<Task>,
    path: &[usize],
) -> Result<&'a mut Vec<Task>, TreeError> {
    Ok(&mut get_mut(tasks, path)?.children)
}

/// The sequence containing `path`'s final index — the root sequence for
/// a depth-0 path, otherwise the parent's children — plus that index.
/// Backs sibling-level insertion and removal.
pub fn siblings_mut<'a>(
    tasks: &'a mut Vec<Task>,
    path: &[usize],
) -> Result<(&'a mut Vec<Task>, usize), TreeError> {
    let Some((&last, parent)) = path.split_last() else {
        return Err(TreeError::NotFound(Vec::new()));
    };
    let seq = if parent.is_empty() {
        tasks
    } else {
        children_mut(tasks, parent)?
    };
    if last >= seq.len() {
        return Err(TreeError::NotFound(path.to_vec()));
    }
    Ok((seq, last))
}

/// Detach and return the subtree at `path`
pub fn remove(tasks: &mut Vec<Task>, path: &[usize]) -> Result<Task, TreeError> {
    let (seq, idx) = siblings_mut(tasks, path)?;
    Ok(seq.remove(idx))
}

/// Pre-order depth-first traversal: every task's path, parent before
/// children, children in original order. This is the display order and
/// the cursor navigation order. O(n); recomputed on demand because
/// mutation invalidates every cached path.
pub fn flatten(tasks: &[Task]) -> Vec<Vec<usize>> {
    let mut paths = Vec::with_capacity(count(tasks));
    flatten_into(tasks, &mut Vec::new(), &mut paths);
    paths
}

fn flatten_into(tasks: &[Task], prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for (i, task) in tasks.iter().enumerate() {
        prefix.push(i);
        out.push(prefix.clone());
        flatten_into(&task.children, prefix, out);
        prefix.pop();
    }
}

/// Total task count across the whole forest
pub fn count(tasks: &[Task]) -> usize {
    tasks.iter().map(|t| 1 + count(&t.children)).sum()
}
