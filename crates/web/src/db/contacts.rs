//! Contact repository for database operations.
//!
//! Every method runs a single statement against the pool. The connection is
//! acquired for that statement and returned to the pool when it completes,
//! on success and on error alike.

use sqlx::SqlitePool;

use contactbook_core::{Contact, ContactDraft, ContactId};

use super::RepositoryError;

/// Internal row type for contact queries.
#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    phone: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: ContactId::new(row.id),
            name: row.name,
            phone: row.phone,
        }
    }
}

/// Repository for contact database operations.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every contact in storage order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, name, phone
            FROM contacts
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    /// Get a contact by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, name, phone
            FROM contacts
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Contact::from))
    }

    /// Insert a new contact. The database assigns the ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, draft: &ContactDraft) -> Result<Contact, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            INSERT INTO contacts (name, phone)
            VALUES (?1, ?2)
            RETURNING id, name, phone
            ",
        )
        .bind(draft.name())
        .bind(draft.phone())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Overwrite the name and phone of a contact.
    ///
    /// Returns `false` when no contact has that ID. The caller decides
    /// whether that matters; the statement itself succeeds either way.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE contacts
            SET name = ?1, phone = ?2
            WHERE id = ?3
            ",
        )
        .bind(draft.name())
        .bind(draft.phone())
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a contact. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ContactId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM contacts
            WHERE id = ?1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all contacts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::AppConfig;
    use crate::db::init_database;

    async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::for_data_dir(tmp.path(), SecretString::from("k".repeat(32)));
        let pool = init_database(&config).await.expect("init");
        (tmp, pool)
    }

    fn draft(name: &str, phone: &str) -> ContactDraft {
        ContactDraft::new(name, phone).expect("valid draft")
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let (_tmp, pool) = test_pool().await;
        let repo = ContactRepository::new(&pool);

        let alice = repo.create(&draft("Alice", "555-1111")).await.expect("create");
        let bob = repo.create(&draft("Bob", "555-2222")).await.expect("create");

        assert_eq!(alice.id, ContactId::new(1));
        assert_eq!(bob.id, ContactId::new(2));
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.phone, "555-1111");
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let (_tmp, pool) = test_pool().await;
        let repo = ContactRepository::new(&pool);

        assert!(repo.list_all().await.expect("list").is_empty());

        repo.create(&draft("Alice", "1")).await.expect("create");
        repo.create(&draft("Bob", "2")).await.expect("create");

        let names: Vec<_> = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let (_tmp, pool) = test_pool().await;
        let repo = ContactRepository::new(&pool);

        assert!(repo.get_by_id(ContactId::new(99)).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn test_update_changes_only_target_row() {
        let (_tmp, pool) = test_pool().await;
        let repo = ContactRepository::new(&pool);
        let alice = repo.create(&draft("Alice", "1")).await.expect("create");
        let bob = repo.create(&draft("Bob", "2")).await.expect("create");

        let updated = repo
            .update(alice.id, &draft("Alice B.", "555-3333"))
            .await
            .expect("update");
        assert!(updated);

        let alice_after = repo.get_by_id(alice.id).await.expect("get").expect("exists");
        assert_eq!(alice_after.id, alice.id);
        assert_eq!(alice_after.name, "Alice B.");
        assert_eq!(alice_after.phone, "555-3333");

        let bob_after = repo.get_by_id(bob.id).await.expect("get").expect("exists");
        assert_eq!(bob_after, bob);
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let (_tmp, pool) = test_pool().await;
        let repo = ContactRepository::new(&pool);

        let updated = repo
            .update(ContactId::new(5), &draft("Ghost", "000"))
            .await
            .expect("update");
        assert!(!updated);
        assert_eq!(repo.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (_tmp, pool) = test_pool().await;
        let repo = ContactRepository::new(&pool);
        let alice = repo.create(&draft("Alice", "1")).await.expect("create");

        assert!(repo.delete(alice.id).await.expect("first delete"));
        assert!(!repo.delete(alice.id).await.expect("second delete"));
        assert_eq!(repo.count().await.expect("count"), 0);
    }
}
