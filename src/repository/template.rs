//! Template repository

use crate::domain::{StringUuid, Template, TemplateCategory, TemplateInput, TemplateWithOwner};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

const TEMPLATE_WITH_OWNER_SELECT: &str = r#"
    SELECT t.id, t.name, t.category, t.subject, t.body, t.owner_id,
           u.name AS owner_name, u.email AS owner_email,
           t.created_at, t.updated_at
    FROM templates t
    JOIN users u ON u.id = t.owner_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(
        &self,
        owner_id: StringUuid,
        category: TemplateCategory,
        input: &TemplateInput,
    ) -> Result<Template>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Template>>;
    async fn find_with_owner(&self, id: StringUuid) -> Result<Option<TemplateWithOwner>>;
    async fn list_all(&self) -> Result<Vec<TemplateWithOwner>>;
    async fn list_by_owner(&self, owner_id: StringUuid) -> Result<Vec<TemplateWithOwner>>;
    async fn update(
        &self,
        id: StringUuid,
        category: TemplateCategory,
        input: &TemplateInput,
    ) -> Result<()>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct TemplateRepositoryImpl {
    pool: MySqlPool,
}

impl TemplateRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for TemplateRepositoryImpl {
    async fn create(
        &self,
        owner_id: StringUuid,
        category: TemplateCategory,
        input: &TemplateInput,
    ) -> Result<Template> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO templates (id, name, category, subject, body, owner_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(category)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create template")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Template>> {
        let template = sqlx::query_as::<_, Template>(
            r#"
            SELECT id, name, category, subject, body, owner_id, created_at, updated_at
            FROM templates
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    async fn find_with_owner(&self, id: StringUuid) -> Result<Option<TemplateWithOwner>> {
        let template = sqlx::query_as::<_, TemplateWithOwner>(&format!(
            "{} WHERE t.id = ?",
            TEMPLATE_WITH_OWNER_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    async fn list_all(&self) -> Result<Vec<TemplateWithOwner>> {
        let templates = sqlx::query_as::<_, TemplateWithOwner>(&format!(
            "{} ORDER BY t.created_at DESC",
            TEMPLATE_WITH_OWNER_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    async fn list_by_owner(&self, owner_id: StringUuid) -> Result<Vec<TemplateWithOwner>> {
        let templates = sqlx::query_as::<_, TemplateWithOwner>(&format!(
            "{} WHERE t.owner_id = ? ORDER BY t.created_at DESC",
            TEMPLATE_WITH_OWNER_SELECT
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    async fn update(
        &self,
        id: StringUuid,
        category: TemplateCategory,
        input: &TemplateInput,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE templates
            SET name = ?, category = ?, subject = ?, body = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(category)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        // email_logs.template_id is ON DELETE SET NULL; history rows survive
        sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
