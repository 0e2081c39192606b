//! Email log repository
//!
//! Logs are append-only; there is deliberately no update operation here.

use crate::domain::{EmailLogRecord, NewEmailLog, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::MySqlPool;

const LOG_RECORD_SELECT: &str = r#"
    SELECT l.id, l.sender_id, s.name AS sender_name,
           l.template_id, t.name AS template_name,
           l.subject, l.body, l.recipients, l.status, l.error_message, l.sent_at
    FROM email_logs l
    JOIN users s ON s.id = l.sender_id
    LEFT JOIN templates t ON t.id = l.template_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    async fn create(&self, log: &NewEmailLog) -> Result<EmailLogRecord>;
    async fn find_by_sender(&self, sender_id: StringUuid) -> Result<Vec<EmailLogRecord>>;
}

pub struct EmailLogRepositoryImpl {
    pool: MySqlPool,
}

impl EmailLogRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailLogRepository for EmailLogRepositoryImpl {
    async fn create(&self, log: &NewEmailLog) -> Result<EmailLogRecord> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO email_logs
                (id, sender_id, template_id, subject, body, recipients, status, error_message, sent_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(id)
        .bind(log.sender_id)
        .bind(log.template_id)
        .bind(&log.subject)
        .bind(&log.body)
        .bind(Json(&log.recipients))
        .bind(log.status)
        .bind(&log.error_message)
        .execute(&self.pool)
        .await?;

        let record =
            sqlx::query_as::<_, EmailLogRecord>(&format!("{} WHERE l.id = ?", LOG_RECORD_SELECT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        record.ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create email log")))
    }

    async fn find_by_sender(&self, sender_id: StringUuid) -> Result<Vec<EmailLogRecord>> {
        let records = sqlx::query_as::<_, EmailLogRecord>(&format!(
            "{} WHERE l.sender_id = ? ORDER BY l.sent_at DESC",
            LOG_RECORD_SELECT
        ))
        .bind(sender_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
