use std::marker::PhantomData;

use chrono::Utc;
use tokio_postgres::{Client, NoTls};

use super::{RepoError, RepoResult, Repository};
use crate::entity::Entity;

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// Postgres-backed implementation of [`Repository`], generic over the
/// entity. All statements are assembled from the entity's declared table
/// and column list.
pub struct PgRepository<E: Entity> {
    client: Client,
    _entity: PhantomData<E>,
}

impl<E: Entity> PgRepository<E> {
    pub async fn connect(database_dsn: String) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(&database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self {
            client,
            _entity: PhantomData,
        })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = embedded::migrations::runner()
            .run_async(&mut self.client)
            .await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn save(&self, mut entity: E) -> RepoResult<E> {
        let now = Utc::now();

        if let Some(id) = entity.id() {
            entity.set_updated_at(now);

            let statement = update_statement::<E>();
            let mut params = entity.bind_values();
            params.push(&now);
            params.push(&id);

            let row = self.client.query_opt(&statement, &params).await?;
            row.map(|row| E::from_row(&row)).ok_or(RepoError::NotFound)
        } else {
            entity.set_created_at(now);
            entity.set_updated_at(now);

            let statement = insert_statement::<E>();
            let mut params = entity.bind_values();
            params.push(&now);
            params.push(&now);

            let row = self.client.query_one(&statement, &params).await?;
            Ok(E::from_row(&row))
        }
    }

    async fn find_by_id(&self, id: E::Key) -> RepoResult<Option<E>> {
        let row = self
            .client
            .query_opt(&select_by_id_statement::<E>(), &[&id])
            .await?;

        Ok(row.map(|row| E::from_row(&row)))
    }

    async fn find_all(&self) -> RepoResult<Vec<E>> {
        let rows = self
            .client
            .query(&select_all_statement::<E>(), &[])
            .await?;

        let mut vec: Vec<E> = Vec::new();

        for row in rows {
            vec.push(E::from_row(&row));
        }

        Ok(vec)
    }

    async fn delete_by_id(&self, id: E::Key) -> RepoResult<()> {
        let rows = self
            .client
            .execute(&delete_statement::<E>(), &[&id])
            .await?;

        if rows == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        let row = self.client.query_one(&count_statement::<E>(), &[]).await?;

        Ok(row.get(0))
    }
}

/// Columns selected back on every read and `RETURNING` clause, with the
/// repository-owned `id` and audit columns around the entity's own.
fn select_list<E: Entity>() -> String {
    let mut columns = Vec::with_capacity(E::COLUMNS.len() + 3);
    columns.push("id");
    columns.extend_from_slice(E::COLUMNS);
    columns.push("created_at");
    columns.push("updated_at");
    columns.join(", ")
}

fn insert_statement<E: Entity>() -> String {
    let placeholders: Vec<String> = (1..=E::COLUMNS.len() + 2)
        .map(|i| format!("${i}"))
        .collect();

    format!(
        "INSERT INTO {} ({}, created_at, updated_at) VALUES ({}) RETURNING {}",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders.join(", "),
        select_list::<E>(),
    )
}

fn update_statement<E: Entity>() -> String {
    let assignments: Vec<String> = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect();

    format!(
        "UPDATE {} SET {}, updated_at = ${} WHERE id = ${} RETURNING {}",
        E::TABLE,
        assignments.join(", "),
        E::COLUMNS.len() + 1,
        E::COLUMNS.len() + 2,
        select_list::<E>(),
    )
}

fn select_by_id_statement<E: Entity>() -> String {
    format!(
        "SELECT {} FROM {} WHERE id = $1",
        select_list::<E>(),
        E::TABLE
    )
}

fn select_all_statement<E: Entity>() -> String {
    format!("SELECT {} FROM {} ORDER BY id", select_list::<E>(), E::TABLE)
}

fn delete_statement<E: Entity>() -> String {
    format!("DELETE FROM {} WHERE id = $1", E::TABLE)
}

fn count_statement<E: Entity>() -> String {
    format!("SELECT COUNT(*) FROM {}", E::TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Note;

    #[test]
    fn insert_statement_appends_audit_stamps_and_returns_the_row() {
        assert_eq!(
            insert_statement::<Note>(),
            "INSERT INTO notes (title, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, content, created_at, updated_at"
        );
    }

    #[test]
    fn update_statement_restamps_updated_at_only() {
        assert_eq!(
            update_statement::<Note>(),
            "UPDATE notes SET title = $1, content = $2, updated_at = $3 \
             WHERE id = $4 \
             RETURNING id, title, content, created_at, updated_at"
        );
    }

    #[test]
    fn reads_select_the_full_column_list() {
        assert_eq!(
            select_by_id_statement::<Note>(),
            "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1"
        );
        assert_eq!(
            select_all_statement::<Note>(),
            "SELECT id, title, content, created_at, updated_at FROM notes ORDER BY id"
        );
    }

    #[test]
    fn delete_and_count_target_the_entity_table() {
        assert_eq!(delete_statement::<Note>(), "DELETE FROM notes WHERE id = $1");
        assert_eq!(count_statement::<Note>(), "SELECT COUNT(*) FROM notes");
    }
}
