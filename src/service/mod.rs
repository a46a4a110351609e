use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::Note,
    repository::{PgRepository, RepoError, Repository},
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<PgRepository<Note>>>,
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<PgRepository<Note>>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, RepoError> {
        let note = Note::new(request.title, request.content);

        self.repo
            .lock()
            .await
            .save(note)
            .await
            .map(NoteResponse::from)
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, RepoError> {
        let repo = self.repo.lock().await;

        let mut note = repo.find_by_id(id).await?.ok_or(RepoError::NotFound)?;
        note.title = request.title;
        note.content = request.content;

        repo.save(note).await.map(NoteResponse::from)
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), RepoError> {
        self.repo.lock().await.delete_by_id(id).await
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<NoteResponse>, RepoError> {
        self.repo
            .lock()
            .await
            .find_by_id(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, RepoError> {
        self.repo
            .lock()
            .await
            .find_all()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn count_notes(&self) -> Result<i64, RepoError> {
        self.repo.lock().await.count().await
    }
}
