use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

use crate::entity::Entity;

/// A stored note. `id` stays `None` until the first save assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates an unsaved note. The timestamps here are placeholders; the
    /// repository restamps both on save.
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Note {
    type Key = i64;

    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &["title", "content"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn from_row(row: &Row) -> Self {
        Self {
            id: Some(row.get("id")),
            title: row.get("title"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn bind_values(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![&self.title, &self.content]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_has_no_id_and_equal_timestamps() {
        let note = Note::new("title".to_string(), "content".to_string());
        assert!(note.id.is_none());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn audit_columns_are_not_part_of_the_column_list() {
        let note = Note::new(String::new(), String::new());
        assert_eq!(Note::TABLE, "notes");
        assert_eq!(Note::COLUMNS, &["title", "content"]);
        assert_eq!(Note::COLUMNS.len(), note.bind_values().len());
    }
}
