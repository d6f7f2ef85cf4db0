//! PostgreSQL implementation of JournalRepository.
//!
//! Entries live in `journal_entries`; the embedded analysis is a JSONB
//! document so partially written analyses survive a round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::analysis::EntryAnalysis;
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, Timestamp, UserId};
use crate::domain::journal::{JournalEntry, Mood};
use crate::ports::{EntryFilter, EntryPage, JournalRepository, PageRequest};

const ENTRY_COLUMNS: &str =
    "id, user_id, title, content, mood, tags, is_private, analysis, created_at, updated_at";

/// PostgreSQL implementation of JournalRepository.
#[derive(Clone)]
pub struct PostgresJournalRepository {
    pool: PgPool,
}

impl PostgresJournalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JournalRepository for PostgresJournalRepository {
    async fn save(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries (
                id, user_id, title, content, mood, tags, is_private, analysis,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.user_id().as_str())
        .bind(entry.title())
        .bind(entry.content())
        .bind(entry.mood().as_str())
        .bind(entry.tags().to_vec())
        .bind(entry.is_private())
        .bind(entry.analysis().map(Json))
        .bind(entry.created_at().as_datetime())
        .bind(entry.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert journal entry: {}", e)))?;

        Ok(())
    }

    async fn update(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries SET
                title = $3,
                content = $4,
                mood = $5,
                tags = $6,
                is_private = $7,
                updated_at = $8
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.user_id().as_str())
        .bind(entry.title())
        .bind(entry.content())
        .bind(entry.mood().as_str())
        .bind(entry.tags().to_vec())
        .bind(entry.is_private())
        .bind(entry.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update journal entry: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(entry_not_found(entry.id()));
        }
        Ok(())
    }

    async fn update_analysis(
        &self,
        user_id: &UserId,
        id: &EntryId,
        analysis: &EntryAnalysis,
        updated_at: &Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries SET
                analysis = $3,
                updated_at = GREATEST(updated_at, $4)
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .bind(Json(analysis))
        .bind(updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to store analysis: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(entry_not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &EntryId,
    ) -> Result<Option<JournalEntry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM journal_entries WHERE id = $1 AND user_id = $2",
            ENTRY_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch journal entry: {}", e)))?;

        row.map(row_to_entry).transpose()
    }

    async fn delete(&self, user_id: &UserId, id: &EntryId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete journal entry: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        user_id: &UserId,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> Result<EntryPage, DomainError> {
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM journal_entries WHERE user_id = ");
        push_filters(&mut count_query, user_id, filter);
        let total: i64 = count_query
            .build()
            .fetch_one(&self.pool)
            .await
            .and_then(|row| row.try_get(0))
            .map_err(|e| DomainError::database(format!("Failed to count journal entries: {}", e)))?;

        let mut list_query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM journal_entries WHERE user_id = ",
            ENTRY_COLUMNS
        ));
        push_filters(&mut list_query, user_id, filter);
        list_query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let rows = list_query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to list journal entries: {}", e)))?;

        let entries = rows
            .into_iter()
            .map(row_to_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EntryPage {
            entries,
            total: total.max(0) as u64,
        })
    }

    async fn count(&self, user_id: &UserId, since: Option<&Timestamp>) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM journal_entries
            WHERE user_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
            "#,
        )
        .bind(user_id.as_str())
        .bind(since.map(|t| *t.as_datetime()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count journal entries: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn mood_counts(&self, user_id: &UserId) -> Result<Vec<(Mood, u64)>, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT mood, COUNT(*) FROM journal_entries
            WHERE user_id = $1
            GROUP BY mood
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count moods: {}", e)))?;

        let mut counts = Vec::with_capacity(rows.len());
        for (mood, count) in rows {
            match mood.parse::<Mood>() {
                Ok(mood) => counts.push((mood, count.max(0) as u64)),
                Err(_) => tracing::warn!(mood = %mood, "Skipping unknown stored mood"),
            }
        }
        Ok(counts)
    }

    async fn wellness_scores(&self, user_id: &UserId) -> Result<Vec<u8>, DomainError> {
        let scores: Vec<(f64,)> = sqlx::query_as(
            r#"
            SELECT (analysis->>'wellnessScore')::float8 FROM journal_entries
            WHERE user_id = $1 AND jsonb_typeof(analysis->'wellnessScore') = 'number'
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch wellness scores: {}", e)))?;

        Ok(scores
            .into_iter()
            .map(|(score,)| score.round().clamp(0.0, 100.0) as u8)
            .collect())
    }

    async fn daily_counts(
        &self,
        user_id: &UserId,
        since: &Timestamp,
    ) -> Result<Vec<(String, u64)>, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS day, COUNT(*)
            FROM journal_entries
            WHERE user_id = $1 AND created_at >= $2
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count daily activity: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(day, count)| (day, count.max(0) as u64))
            .collect())
    }

    async fn find_created_between(
        &self,
        user_id: &UserId,
        from: &Timestamp,
        until: Option<&Timestamp>,
    ) -> Result<Vec<JournalEntry>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM journal_entries
            WHERE user_id = $1
              AND created_at >= $2
              AND ($3::timestamptz IS NULL OR created_at < $3)
            ORDER BY created_at ASC
            "#,
            ENTRY_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(from.as_datetime())
        .bind(until.map(|t| *t.as_datetime()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch entries by date: {}", e)))?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn entry_not_found(id: &EntryId) -> DomainError {
    DomainError::new(
        ErrorCode::EntryNotFound,
        format!("Journal entry not found: {}", id),
    )
}

/// Appends the owner bind and filter predicates. The builder must end in
/// `user_id = `.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, user_id: &UserId, filter: &EntryFilter) {
    query.push_bind(user_id.as_str().to_string());
    if let Some(mood) = filter.mood {
        query.push(" AND mood = ").push_bind(mood.as_str());
    }
    if !filter.tags.is_empty() {
        query.push(" AND tags && ").push_bind(filter.tags.clone());
    }
    if let Some(start) = filter.start_date {
        query.push(" AND created_at >= ").push_bind(*start.as_datetime());
    }
    if let Some(end) = filter.end_date {
        query.push(" AND created_at <= ").push_bind(*end.as_datetime());
    }
}

/// Decodes a stored analysis document. A document that no longer matches the
/// expected shape is treated as empty, which later triggers re-analysis.
fn decode_analysis(id: &uuid::Uuid, value: Option<serde_json::Value>) -> Option<EntryAnalysis> {
    let value = value?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<EntryAnalysis>(value) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            tracing::warn!(entry_id = %id, error = %e, "Stored analysis is malformed");
            Some(EntryAnalysis::default())
        }
    }
}

fn row_to_entry(row: PgRow) -> Result<JournalEntry, DomainError> {
    let get_err = |column: &str, e: sqlx::Error| {
        DomainError::database(format!("Failed to get {}: {}", column, e))
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| get_err("id", e))?;
    let user_id: String = row.try_get("user_id").map_err(|e| get_err("user_id", e))?;
    let title: String = row.try_get("title").map_err(|e| get_err("title", e))?;
    let content: String = row.try_get("content").map_err(|e| get_err("content", e))?;
    let mood: String = row.try_get("mood").map_err(|e| get_err("mood", e))?;
    let tags: Vec<String> = row.try_get("tags").map_err(|e| get_err("tags", e))?;
    let is_private: bool = row.try_get("is_private").map_err(|e| get_err("is_private", e))?;
    let analysis: Option<serde_json::Value> =
        row.try_get("analysis").map_err(|e| get_err("analysis", e))?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(|e| get_err("created_at", e))?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(|e| get_err("updated_at", e))?;

    let mood = mood
        .parse::<Mood>()
        .map_err(|e| DomainError::database(format!("Invalid stored mood: {}", e)))?;
    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;

    Ok(JournalEntry::reconstitute(
        EntryId::from_uuid(id),
        user_id,
        title,
        content,
        mood,
        tags,
        is_private,
        decode_analysis(&id, analysis),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_or_null_analysis_decodes_to_none() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(decode_analysis(&id, None), None);
        assert_eq!(decode_analysis(&id, Some(serde_json::Value::Null)), None);
    }

    #[test]
    fn partial_analysis_keeps_what_it_has() {
        let id = uuid::Uuid::new_v4();
        let analysis = decode_analysis(&id, Some(json!({"wellnessScore": 40}))).unwrap();
        assert_eq!(analysis.wellness_score, Some(40));
        assert!(analysis.analyzed_at.is_none());
    }

    #[test]
    fn malformed_analysis_decodes_to_empty_document() {
        let id = uuid::Uuid::new_v4();
        let analysis = decode_analysis(&id, Some(json!({"wellnessScore": "high"}))).unwrap();
        assert_eq!(analysis, EntryAnalysis::default());
    }

    #[test]
    fn filters_render_in_order() {
        let filter = EntryFilter {
            mood: Some(Mood::Happy),
            tags: vec!["work".to_string()],
            start_date: Some(Timestamp::now()),
            end_date: None,
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1 FROM journal_entries WHERE user_id = ");
        push_filters(&mut query, &UserId::new("u").unwrap(), &filter);

        assert_eq!(
            query.sql(),
            "SELECT 1 FROM journal_entries WHERE user_id = $1 AND mood = $2 AND tags && $3 AND created_at >= $4"
        );
    }
}
