//! Email log domain model
//!
//! Log rows are immutable: one insert per dispatch, no update path.

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

/// Delivery outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmailStatus {
    Sent,
    Failed,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Sent => "SENT",
            EmailStatus::Failed => "FAILED",
        }
    }
}

impl std::str::FromStr for EmailStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SENT" => Ok(EmailStatus::Sent),
            "FAILED" => Ok(EmailStatus::Failed),
            _ => Err(format!("Unknown email status: {}", s)),
        }
    }
}

impl std::fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl sqlx::Type<sqlx::MySql> for EmailStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for EmailStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for EmailStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <&str as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Email log row joined with sender name and template name.
/// `template_name` becomes null once the template is deleted; the frozen
/// subject and body survive regardless.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmailLogRecord {
    pub id: StringUuid,
    pub sender_id: StringUuid,
    pub sender_name: String,
    pub template_id: Option<StringUuid>,
    pub template_name: Option<String>,
    pub subject: String,
    pub body: String,
    #[sqlx(json)]
    pub recipients: Vec<String>,
    pub status: EmailStatus,
    pub error_message: Option<String>,
    pub sent_at: DateTime<Utc>,
}

/// Input for dispatching a templated email
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendEmailInput {
    pub template_id: StringUuid,
    #[validate(length(min = 1, message = "Informe ao menos um destinatário"))]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

/// Values persisted for a dispatch attempt
#[derive(Debug, Clone)]
pub struct NewEmailLog {
    pub sender_id: StringUuid,
    pub template_id: StringUuid,
    pub subject: String,
    pub body: String,
    pub recipients: Vec<String>,
    pub status: EmailStatus,
    pub error_message: Option<String>,
}
