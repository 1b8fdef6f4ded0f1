// Batch todo operations over an injected store
// Every operation is a single load-modify-save cycle returning one text block

use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::TodoError;
use crate::models::{StatusFilter, Todo, TodoState};
use crate::storage::TodoStore;

/// One entry of an edit batch
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TodoEdit {
    /// Content hash of the todo to edit
    pub hash: String,
    /// Replacement text for the todo
    pub text: String,
}

/// Parse and append one new todo per text, preserving input order.
///
/// Returns one `Added todo [<hash>]: <display>` line per item, in input
/// order. An empty batch is rejected before the store is touched.
pub async fn add_todos(store: &dyn TodoStore, texts: &[String]) -> Result<String, TodoError> {
    if texts.is_empty() {
        return Err(TodoError::InvalidInput("no todos to add".to_string()));
    }

    let mut todos = store.load().await?;
    let mut lines = Vec::with_capacity(texts.len());
    for text in texts {
        let todo = Todo::parse(text);
        lines.push(format!("Added todo [{}]: {}", todo.hash(), todo.to_display_string()));
        todos.push(todo);
    }
    store.save(&todos).await?;

    Ok(lines.join("\n"))
}

/// Apply a batch of text replacements, matching each edit against the
/// current hash of a stored record.
///
/// A hash that resolves nothing yields a `Todo with hash <h> not found.`
/// line without aborting the remaining edits; every input edit produces
/// exactly one line. All changes are saved together in one cycle.
pub async fn edit_todos(store: &dyn TodoStore, edits: &[TodoEdit]) -> Result<String, TodoError> {
    if edits.is_empty() {
        return Err(TodoError::InvalidInput("no edits given".to_string()));
    }

    let mut todos = store.load().await?;
    let mut lines = Vec::with_capacity(edits.len());
    for edit in edits {
        match todos.iter_mut().find(|t| t.hash() == edit.hash) {
            Some(todo) => {
                todo.set_text(&edit.text);
                lines.push(format!("Edited todo [{}]: {}", todo.hash(), todo.to_display_string()));
            }
            None => lines.push(format!("Todo with hash {} not found.", edit.hash)),
        }
    }
    store.save(&todos).await?;

    Ok(lines.join("\n"))
}

/// Force a todo into the requested status.
///
/// Completing a todo that carries a `rec` tag also appends the spawned next
/// occurrence before saving and reports it on a second line. A todo already
/// in the requested status is left as is.
pub async fn set_todo_status(
    store: &dyn TodoStore,
    hash: &str,
    status: TodoState,
) -> Result<String, TodoError> {
    let mut todos = store.load().await?;
    let Some(index) = todos.iter().position(|t| t.hash() == hash) else {
        return Ok(format!("Todo with hash {hash} not found."));
    };

    let mut lines = Vec::new();
    let spawned = if todos[index].state() == status {
        None
    } else {
        todos[index].toggle_state()
    };
    lines.push(format!(
        "Marked todo [{}] as {}: {}",
        todos[index].hash(),
        status,
        todos[index].to_display_string()
    ));
    if let Some(next) = spawned {
        lines.push(format!(
            "Added recurring todo [{}]: {}",
            next.hash(),
            next.to_display_string()
        ));
        todos.push(next);
    }
    store.save(&todos).await?;

    Ok(lines.join("\n"))
}

/// Render matching todos as `[<hash>] <marker> <display>` lines.
///
/// Filters by status, then by substring search over the display text, then
/// applies offset and limit over the store-ordered survivors. An empty
/// result yields an explicit message rather than an empty block.
pub async fn list_todos(
    store: &dyn TodoStore,
    status: StatusFilter,
    search: Option<&str>,
    limit: Option<usize>,
    offset: usize,
) -> Result<String, TodoError> {
    let todos = store.load().await?;

    let lines: Vec<String> = todos
        .iter()
        .filter(|t| status.matches(t.state()))
        .filter(|t| search.is_none_or(|q| t.to_display_string().contains(q)))
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| format!("[{}] {} {}", t.hash(), t.state().marker(), t.to_display_string()))
        .collect();

    if lines.is_empty() {
        return Ok("No matching todos found.".to_string());
    }
    Ok(lines.join("\n"))
}
