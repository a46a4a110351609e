use notes_api::models::Note;
use notes_api::repository::{MemoryRepository, RepoError, Repository};

#[tokio::test]
async fn save_assigns_an_id_and_stamps_both_timestamps() {
    let repo = MemoryRepository::new();

    let note = Note::new("groceries".to_string(), "milk, eggs".to_string());
    let saved = repo.save(note).await.unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.title, "groceries");
    assert_eq!(saved.content, "milk, eggs");
    assert!(saved.created_at <= saved.updated_at);
}

#[tokio::test]
async fn saved_note_round_trips_through_find_by_id() {
    let repo = MemoryRepository::new();

    let saved = repo
        .save(Note::new("title".to_string(), "content".to_string()))
        .await
        .unwrap();
    let found = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();

    assert_eq!(found, saved);
}

#[tokio::test]
async fn resave_preserves_created_at_and_restamps_updated_at() {
    let repo = MemoryRepository::new();

    let saved = repo
        .save(Note::new("draft".to_string(), "v1".to_string()))
        .await
        .unwrap();

    let mut changed = saved.clone();
    changed.content = "v2".to_string();
    let updated = repo.save(changed).await.unwrap();

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.content, "v2");
    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at >= saved.updated_at);
}

#[tokio::test]
async fn resave_of_an_unknown_id_fails_with_not_found() {
    let repo = MemoryRepository::new();

    let mut ghost = Note::new("ghost".to_string(), "boo".to_string());
    ghost.id = Some(42);

    let result = repo.save(ghost).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn absent_id_on_read_is_not_an_error() {
    let repo: MemoryRepository<Note> = MemoryRepository::new();

    let found = repo.find_by_id(7).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn delete_removes_the_note() {
    let repo = MemoryRepository::new();

    let saved = repo
        .save(Note::new("to delete".to_string(), "bye".to_string()))
        .await
        .unwrap();
    let id = saved.id.unwrap();

    repo.delete_by_id(id).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_of_an_unknown_id_fails_with_not_found() {
    let repo: MemoryRepository<Note> = MemoryRepository::new();

    let result = repo.delete_by_id(7).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn count_matches_find_all_after_every_mutation() {
    let repo = MemoryRepository::new();

    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.find_all().await.unwrap().is_empty());

    let first = repo
        .save(Note::new("first".to_string(), "1".to_string()))
        .await
        .unwrap();
    repo.save(Note::new("second".to_string(), "2".to_string()))
        .await
        .unwrap();

    assert_eq!(
        repo.count().await.unwrap(),
        repo.find_all().await.unwrap().len() as i64
    );

    repo.delete_by_id(first.id.unwrap()).await.unwrap();

    assert_eq!(
        repo.count().await.unwrap(),
        repo.find_all().await.unwrap().len() as i64
    );
}

#[tokio::test]
async fn find_all_returns_notes_in_insertion_order() {
    let repo = MemoryRepository::new();

    for title in ["a", "b", "c"] {
        repo.save(Note::new(title.to_string(), String::new()))
            .await
            .unwrap();
    }

    let titles: Vec<String> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect();

    assert_eq!(titles, ["a", "b", "c"]);
}
