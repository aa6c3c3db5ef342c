#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use crate::{dto::NoteInput, error::StorageError, models::Note};

/// Storage operations the service needs for notes.
///
/// `update` and `delete` do not check that the note exists: a missing id
/// affects zero rows and still succeeds. Both return the affected row count.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, input: NoteInput) -> Result<Note, StorageError>;

    /// All notes, newest first.
    async fn list_notes(&self) -> Result<Vec<Note>, StorageError>;

    async fn update_note(&self, id: i64, input: NoteInput) -> Result<u64, StorageError>;

    async fn delete_note(&self, id: i64) -> Result<u64, StorageError>;
}

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn connect(database_dsn: &str) -> Result<Self, StorageError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    // The driver task exits once the connection drops; fail fast after that.
    fn client(&self) -> Result<&Client, StorageError> {
        if self.client.is_closed() {
            return Err(StorageError::ConnectionClosed);
        }
        Ok(&self.client)
    }
}

fn note_from_row(row: &Row) -> Result<Note, tokio_postgres::Error> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created")?,
    })
}

#[async_trait]
impl NoteStore for Repository {
    async fn create_note(&self, input: NoteInput) -> Result<Note, StorageError> {
        let row = self
            .client()?
            .query_one(
                "INSERT INTO notes (title, content, created) VALUES ($1, $2, NOW()) \
                 RETURNING id, title, content, created",
                &[&input.title, &input.content],
            )
            .await?;

        Ok(note_from_row(&row)?)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StorageError> {
        let rows = self
            .client()?
            .query(
                "SELECT id, title, content, created FROM notes ORDER BY created DESC",
                &[],
            )
            .await?;

        rows.iter()
            .map(|row| note_from_row(row).map_err(StorageError::from))
            .collect()
    }

    async fn update_note(&self, id: i64, input: NoteInput) -> Result<u64, StorageError> {
        let rows = self
            .client()?
            .execute(
                "UPDATE notes SET title = $1, content = $2 WHERE id = $3",
                &[&input.title, &input.content, &id],
            )
            .await?;

        Ok(rows)
    }

    async fn delete_note(&self, id: i64) -> Result<u64, StorageError> {
        let rows = self
            .client()?
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows)
    }
}
