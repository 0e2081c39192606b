//! Email template domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Closed set of template categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateCategory {
    AvisoIncidente,
    ConfirmacaoEquipamento,
    AvisoManutencao,
    ComunicadoEvento,
    ConviteReuniao,
    Outros,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::AvisoIncidente => "AVISO_INCIDENTE",
            TemplateCategory::ConfirmacaoEquipamento => "CONFIRMACAO_EQUIPAMENTO",
            TemplateCategory::AvisoManutencao => "AVISO_MANUTENCAO",
            TemplateCategory::ComunicadoEvento => "COMUNICADO_EVENTO",
            TemplateCategory::ConviteReuniao => "CONVITE_REUNIAO",
            TemplateCategory::Outros => "OUTROS",
        }
    }
}

impl std::str::FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "AVISO_INCIDENTE" => Ok(TemplateCategory::AvisoIncidente),
            "CONFIRMACAO_EQUIPAMENTO" => Ok(TemplateCategory::ConfirmacaoEquipamento),
            "AVISO_MANUTENCAO" => Ok(TemplateCategory::AvisoManutencao),
            "COMUNICADO_EVENTO" => Ok(TemplateCategory::ComunicadoEvento),
            "CONVITE_REUNIAO" => Ok(TemplateCategory::ConviteReuniao),
            "OUTROS" => Ok(TemplateCategory::Outros),
            _ => Err(format!("Categoria inválida: {}", s)),
        }
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl sqlx::Type<sqlx::MySql> for TemplateCategory {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for TemplateCategory {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for TemplateCategory {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <&str as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Template entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Template {
    pub id: StringUuid,
    pub name: String,
    pub category: TemplateCategory,
    pub subject: String,
    pub body: String,
    pub owner_id: StringUuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Template joined with its owner's name and email
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TemplateWithOwner {
    pub id: StringUuid,
    pub name: String,
    pub category: TemplateCategory,
    pub subject: String,
    pub body: String,
    pub owner_id: StringUuid,
    pub owner_name: String,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a template.
/// Category arrives as a string and is parsed against the closed set,
/// so an unknown value reports a validation error instead of a decode failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TemplateInput {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    #[validate(length(min = 1, message = "Categoria é obrigatória"))]
    pub category: String,
    #[validate(length(min = 1, message = "Assunto é obrigatório"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Corpo é obrigatório"))]
    pub body: String,
}

impl TemplateInput {
    /// Parse the category field against the closed enum
    pub fn parsed_category(&self) -> Result<TemplateCategory, crate::error::AppError> {
        self.category
            .parse()
            .map_err(crate::error::AppError::Validation)
    }
}
