use crate::db::traits::{User, UserStore};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row};
use std::path::Path;

/// libsql-backed user store (in-memory, local file, or remote Turso).
///
/// Holds one connection for its whole lifetime; an in-memory database only
/// lives as long as the connection that created it.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;

        Self::from_database(db).await
    }

    pub async fn new_local(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Database(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;

        Self::from_database(db).await
    }

    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    async fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    email TEXT UNIQUE NOT NULL,
                    username TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }

    async fn query_one_user(&self, sql: &str, value: &str) -> Result<Option<User>> {
        let mut rows = self
            .conn
            .query(sql, [value])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        email: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        username: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        password_hash: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        created_at: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        updated_at: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

const SELECT_USER: &str = "SELECT id, email, username, password_hash, created_at, updated_at FROM users";

#[async_trait]
impl UserStore for TursoClient {
    async fn create_user(
        &self,
        id: &str,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<User> {
        let now = Utc::now().timestamp();

        self.conn
            .execute(
                "INSERT INTO users (id, email, username, password_hash, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                (id, email, username, password_hash, now, now),
            )
            .await
            .map_err(|e| {
                let message = e.to_string();
                if message.contains("UNIQUE constraint failed") {
                    AppError::AlreadyExists(email.to_string())
                } else {
                    AppError::Database(format!("Failed to create user: {}", message))
                }
            })?;

        Ok(User {
            id: id.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.query_one_user(&format!("{} WHERE email = ?", SELECT_USER), email)
            .await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.query_one_user(&format!("{} WHERE username = ?", SELECT_USER), username)
            .await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.query_one_user(&format!("{} WHERE id = ?", SELECT_USER), id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let client = TursoClient::new_memory().await.expect("memory db");

        let created = client
            .create_user("user-1", "a@x.com", "alice", "$argon2id$hash")
            .await
            .expect("should create");
        assert_eq!(created.email, "a@x.com");

        let by_email = client.get_user_by_email("a@x.com").await.unwrap();
        let by_username = client.get_user_by_username("alice").await.unwrap();
        let by_id = client.get_user_by_id("user-1").await.unwrap();

        assert_eq!(by_email.as_ref(), Some(&created));
        assert_eq!(by_username.as_ref(), Some(&created));
        assert_eq!(by_id, Some(created));
    }

    #[tokio::test]
    async fn test_missing_user() {
        let client = TursoClient::new_memory().await.expect("memory db");

        assert!(client.get_user_by_email("nobody@x.com").await.unwrap().is_none());
        assert!(client.get_user_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let client = TursoClient::new_memory().await.expect("memory db");

        client
            .create_user("user-1", "a@x.com", "alice", "hash")
            .await
            .expect("first insert");
        let result = client.create_user("user-2", "a@x.com", "bob", "hash").await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_already_exists() {
        let client = TursoClient::new_memory().await.expect("memory db");

        client
            .create_user("user-1", "a@x.com", "alice", "hash")
            .await
            .expect("first insert");
        let result = client.create_user("user-2", "b@x.com", "alice", "hash").await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_local_file_persists_across_clients() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("ident.db");
        let path = path.to_str().expect("utf-8 path");

        {
            let client = TursoClient::new_local(path).await.expect("local db");
            client
                .create_user("user-1", "a@x.com", "alice", "hash")
                .await
                .expect("insert");
        }

        let reopened = TursoClient::new_local(path).await.expect("reopen");
        assert!(reopened.get_user_by_id("user-1").await.unwrap().is_some());
    }
}
