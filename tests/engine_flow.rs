// End-to-end engine flows over the file-backed store

use todo_mcp::engine::{self, TodoEdit};
use todo_mcp::models::{StatusFilter, TodoState};
use todo_mcp::storage::{FileStore, TodoStore};

fn temp_store() -> (tempfile::TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("todo.txt"));
    (dir, store)
}

#[tokio::test]
async fn add_edit_mark_done_cycle_persists_to_disk() {
    let (_dir, store) = temp_store();

    engine::add_todos(&store, &["Test Hash Todo".to_string()]).await.unwrap();
    let hash = store.load().await.unwrap()[0].hash();

    let edits = [TodoEdit { hash, text: "Test Hash Todo Edited".to_string() }];
    engine::edit_todos(&store, &edits).await.unwrap();

    let edited_hash = store.load().await.unwrap()[0].hash();
    engine::set_todo_status(&store, &edited_hash, TodoState::Done).await.unwrap();

    // reopen the file through a fresh store instance
    let reopened = FileStore::new(store.path().clone());
    let todos = reopened.load().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].state(), TodoState::Done);
    assert_eq!(todos[0].text(), "Test Hash Todo Edited");
    assert!(todos[0].completed().is_some());
}

#[tokio::test]
async fn completing_recurring_todo_persists_both_records() {
    let (_dir, store) = temp_store();

    engine::add_todos(&store, &["water plants rec:1w".to_string()]).await.unwrap();
    let hash = store.load().await.unwrap()[0].hash();

    let result = engine::set_todo_status(&store, &hash, TodoState::Done).await.unwrap();
    assert!(result.contains("Added recurring todo"));

    let todos = store.load().await.unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].state(), TodoState::Done);
    assert_eq!(todos[1].state(), TodoState::Pending);
    assert_eq!(todos[1].tag("rec"), Some("1w"));
    assert!(todos[1].tag("due").is_some());
}

#[tokio::test]
async fn list_filters_over_seeded_file() {
    let (_dir, store) = temp_store();

    let seed: Vec<String> = [
        "Active Task 1",
        "Active Task 2",
        "x Done Task 1",
        "x Done Task 2",
        "UniqueSearchTerm Task",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    engine::add_todos(&store, &seed).await.unwrap();

    let text = engine::list_todos(&store, StatusFilter::default(), None, None, 0).await.unwrap();
    assert!(text.contains("Active Task 1"));
    assert!(!text.contains("Done Task 1"));

    let text = engine::list_todos(&store, StatusFilter::Done, None, None, 0).await.unwrap();
    assert!(text.contains("Done Task 1"));
    assert!(!text.contains("Active Task 1"));

    let text = engine::list_todos(&store, StatusFilter::All, Some("UniqueSearchTerm"), None, 0)
        .await
        .unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("UniqueSearchTerm Task"));

    let text = engine::list_todos(&store, StatusFilter::Todo, None, Some(1), 0).await.unwrap();
    assert_eq!(text.lines().count(), 1);
}
