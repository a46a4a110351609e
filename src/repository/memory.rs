use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::Mutex;

use super::{RepoError, RepoResult, Repository};
use crate::entity::Entity;

/// In-memory implementation of [`Repository`] for entities with an `i64`
/// key. Assigns ids from a monotonic counter, so iteration over the map
/// yields insertion order.
pub struct MemoryRepository<E> {
    state: Mutex<State<E>>,
}

struct State<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

impl<E> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity<Key = i64>> Repository<E> for MemoryRepository<E> {
    async fn save(&self, mut entity: E) -> RepoResult<E> {
        let now = Utc::now();
        let mut state = self.state.lock().await;

        if let Some(id) = entity.id() {
            let existing = state.rows.get(&id).ok_or(RepoError::NotFound)?;
            entity.set_created_at(existing.created_at());
            entity.set_updated_at(now);
            state.rows.insert(id, entity.clone());
        } else {
            let id = state.next_id;
            state.next_id += 1;
            entity.set_id(id);
            entity.set_created_at(now);
            entity.set_updated_at(now);
            state.rows.insert(id, entity.clone());
        }

        Ok(entity)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<E>> {
        let state = self.state.lock().await;

        Ok(state.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<E>> {
        let state = self.state.lock().await;

        Ok(state.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.lock().await;

        state.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    async fn count(&self) -> RepoResult<i64> {
        let state = self.state.lock().await;

        Ok(state.rows.len() as i64)
    }
}
