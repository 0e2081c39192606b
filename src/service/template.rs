//! Template business logic: CRUD plus the ownership guard

use crate::domain::{StringUuid, Template, TemplateInput, TemplateWithOwner, User};
use crate::error::{AppError, Result};
use crate::repository::{TemplateRepository, UserRepository};
use std::sync::Arc;
use validator::Validate;

pub struct TemplateService<T: TemplateRepository, U: UserRepository> {
    templates: Arc<T>,
    users: Arc<U>,
}

impl<T: TemplateRepository, U: UserRepository> TemplateService<T, U> {
    pub fn new(templates: Arc<T>, users: Arc<U>) -> Self {
        Self { templates, users }
    }

    async fn require_user(&self, email: &str) -> Result<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Usuário não encontrado".to_string()))
    }

    async fn require_template(&self, id: StringUuid) -> Result<Template> {
        self.templates
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Template não encontrado".to_string()))
    }

    pub async fn create(&self, owner_email: &str, input: TemplateInput) -> Result<TemplateWithOwner> {
        input.validate()?;
        let category = input.parsed_category()?;
        let owner = self.require_user(owner_email).await?;

        let template = self.templates.create(owner.id, category, &input).await?;
        self.templates
            .find_with_owner(template.id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Template vanished after insert")))
    }

    pub async fn list_all(&self) -> Result<Vec<TemplateWithOwner>> {
        self.templates.list_all().await
    }

    pub async fn list_mine(&self, owner_email: &str) -> Result<Vec<TemplateWithOwner>> {
        let owner = self.require_user(owner_email).await?;
        self.templates.list_by_owner(owner.id).await
    }

    pub async fn get(&self, id: StringUuid) -> Result<TemplateWithOwner> {
        self.templates
            .find_with_owner(id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Template não encontrado".to_string()))
    }

    /// Replace a template's content. Only the owner may edit; ownership
    /// never changes on update.
    pub async fn update(
        &self,
        editor_email: &str,
        id: StringUuid,
        input: TemplateInput,
    ) -> Result<TemplateWithOwner> {
        input.validate()?;
        let category = input.parsed_category()?;
        let editor = self.require_user(editor_email).await?;
        let existing = self.require_template(id).await?;

        if existing.owner_id != editor.id {
            return Err(AppError::Forbidden(
                "Sem permissão para editar este template".to_string(),
            ));
        }

        self.templates.update(id, category, &input).await?;
        self.templates
            .find_with_owner(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Template vanished after update")))
    }

    /// Delete a template. Only the owner may delete; past email logs keep
    /// their frozen subject and body.
    pub async fn delete(&self, editor_email: &str, id: StringUuid) -> Result<()> {
        let editor = self.require_user(editor_email).await?;
        let existing = self.require_template(id).await?;

        if existing.owner_id != editor.id {
            return Err(AppError::Forbidden(
                "Sem permissão para deletar este template".to_string(),
            ));
        }

        self.templates.delete(id).await
    }
}
