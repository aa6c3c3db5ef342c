use crate::{
    dto::{NoteInput, NoteResponse},
    error::StorageError,
    repository::NoteStore,
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteStore>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, input: NoteInput) -> Result<NoteResponse, StorageError> {
        self.repo.create_note(input).await.map(NoteResponse::from)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, StorageError> {
        self.repo
            .list_notes()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn update_note(&self, id: i64, input: NoteInput) -> Result<(), StorageError> {
        let rows = self.repo.update_note(id, input).await?;
        if rows == 0 {
            tracing::debug!("update of note {id} matched no rows");
        }
        Ok(())
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), StorageError> {
        let rows = self.repo.delete_note(id).await?;
        if rows == 0 {
            tracing::debug!("delete of note {id} matched no rows");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;

    fn input(title: &str, content: &str) -> NoteInput {
        NoteInput {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let service = NoteService::new(Arc::new(MemoryStore::default()));

        let first = service.create_note(input("first", "a")).await.unwrap();
        let second = service.create_note(input("second", "b")).await.unwrap();

        let ids: Vec<i64> = service
            .get_all_notes()
            .await
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn update_keeps_id_and_creation_time() {
        let service = NoteService::new(Arc::new(MemoryStore::default()));
        let created = service.create_note(input("A", "B")).await.unwrap();

        service
            .update_note(created.id, input("C", "D"))
            .await
            .unwrap();

        let notes = service.get_all_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, created.id);
        assert_eq!(notes[0].created_at, created.created_at);
        assert_eq!(notes[0].title, "C");
        assert_eq!(notes[0].content, "D");
    }

    #[tokio::test]
    async fn missing_id_is_a_silent_no_op() {
        let store = Arc::new(MemoryStore::default());
        let service = NoteService::new(store.clone());
        service.create_note(input("A", "B")).await.unwrap();
        let before = store.snapshot();

        service.update_note(42, input("C", "D")).await.unwrap();
        service.delete_note(42).await.unwrap();

        assert_eq!(store.snapshot(), before);
    }
}
