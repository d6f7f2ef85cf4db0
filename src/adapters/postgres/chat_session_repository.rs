//! PostgreSQL implementation of ChatSessionRepository.
//!
//! The message history is stored as a single JSONB array per session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::chat::{ChatMessage, ChatSession, SessionType};
use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ChatSessionRepository;

#[derive(Clone)]
pub struct PostgresChatSessionRepository {
    pool: PgPool,
}

impl PostgresChatSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatSessionRepository for PostgresChatSessionRepository {
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_sessions (
                id, user_id, title, session_type, messages, is_active,
                created_at, last_activity
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_str())
        .bind(session.title())
        .bind(session.session_type().as_str())
        .bind(Json(session.messages()))
        .bind(session.is_active())
        .bind(session.created_at().as_datetime())
        .bind(session.last_activity().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert chat session: {}", e)))?;

        Ok(())
    }

    async fn update(&self, session: &ChatSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE chat_sessions SET
                messages = $3,
                is_active = $4,
                last_activity = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_str())
        .bind(Json(session.messages()))
        .bind(session.is_active())
        .bind(session.last_activity().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update chat session: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ChatSessionNotFound,
                format!("Chat session not found: {}", session.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &ChatSessionId,
    ) -> Result<Option<ChatSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, session_type, messages, is_active,
                   created_at, last_activity
            FROM chat_sessions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch chat session: {}", e)))?;

        row.map(row_to_session).transpose()
    }

    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<ChatSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, session_type, messages, is_active,
                   created_at, last_activity
            FROM chat_sessions
            WHERE user_id = $1
            ORDER BY last_activity DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list chat sessions: {}", e)))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn delete(&self, user_id: &UserId, id: &ChatSessionId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete chat session: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_session(row: PgRow) -> Result<ChatSession, DomainError> {
    let get_err = |column: &str, e: sqlx::Error| {
        DomainError::database(format!("Failed to get {}: {}", column, e))
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| get_err("id", e))?;
    let user_id: String = row.try_get("user_id").map_err(|e| get_err("user_id", e))?;
    let title: String = row.try_get("title").map_err(|e| get_err("title", e))?;
    let session_type: String = row
        .try_get("session_type")
        .map_err(|e| get_err("session_type", e))?;
    let Json(messages): Json<Vec<ChatMessage>> =
        row.try_get("messages").map_err(|e| get_err("messages", e))?;
    let is_active: bool = row.try_get("is_active").map_err(|e| get_err("is_active", e))?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(|e| get_err("created_at", e))?;
    let last_activity: DateTime<Utc> = row
        .try_get("last_activity")
        .map_err(|e| get_err("last_activity", e))?;

    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;

    Ok(ChatSession::reconstitute(
        ChatSessionId::from_uuid(id),
        user_id,
        title,
        SessionType::from_str_lossy(&session_type),
        messages,
        is_active,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(last_activity),
    ))
}
