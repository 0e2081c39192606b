//! Email dispatch workflow and history
//!
//! Dispatch validates sender, template, and every recipient before any
//! network call, renders the template, attempts delivery, and records
//! exactly one log row. A transport failure is logged as FAILED and the
//! request still succeeds; it is never turned into an error response.

use crate::domain::{EmailLogRecord, EmailStatus, NewEmailLog, SendEmailInput, User};
use crate::email::render::resolve;
use crate::email::Mailer;
use crate::error::{AppError, Result};
use crate::repository::{EmailLogRepository, TemplateRepository, UserRepository};
use std::sync::Arc;
use validator::Validate;

pub struct EmailService<U, T, L, M>
where
    U: UserRepository,
    T: TemplateRepository,
    L: EmailLogRepository,
    M: Mailer,
{
    users: Arc<U>,
    templates: Arc<T>,
    logs: Arc<L>,
    mailer: Arc<M>,
}

impl<U, T, L, M> EmailService<U, T, L, M>
where
    U: UserRepository,
    T: TemplateRepository,
    L: EmailLogRepository,
    M: Mailer,
{
    pub fn new(users: Arc<U>, templates: Arc<T>, logs: Arc<L>, mailer: Arc<M>) -> Self {
        Self {
            users,
            templates,
            logs,
            mailer,
        }
    }

    async fn require_sender(&self, email: &str) -> Result<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Usuário não encontrado".to_string()))
    }

    /// Dispatch a templated email to registered recipients
    pub async fn send(&self, sender_email: &str, input: SendEmailInput) -> Result<EmailLogRecord> {
        input.validate()?;

        let sender = self.require_sender(sender_email).await?;

        let template = self
            .templates
            .find_by_id(input.template_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Template não encontrado".to_string()))?;

        // Every recipient must be a registered user; the message names the
        // offending address and nothing is sent or logged.
        for recipient in &input.recipients {
            if self.users.find_by_email(recipient).await?.is_none() {
                return Err(AppError::BadRequest(format!(
                    "Usuário não encontrado: {}",
                    recipient
                )));
            }
        }

        let subject = resolve(&template.subject, &input.variables);
        let body = resolve(&template.body, &input.variables);

        let (status, error_message) = match self
            .mailer
            .send(&input.recipients, &subject, &body)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    sender = %sender.email,
                    recipients = input.recipients.len(),
                    template = %template.name,
                    "email sent"
                );
                (EmailStatus::Sent, None)
            }
            Err(e) => {
                tracing::warn!(
                    sender = %sender.email,
                    template = %template.name,
                    error = %e,
                    "email delivery failed"
                );
                (EmailStatus::Failed, Some(e.to_string()))
            }
        };

        self.logs
            .create(&NewEmailLog {
                sender_id: sender.id,
                template_id: template.id,
                subject,
                body,
                recipients: input.recipients,
                status,
                error_message,
            })
            .await
    }

    /// Caller's dispatch history, most recent first
    pub async fn history(&self, sender_email: &str) -> Result<Vec<EmailLogRecord>> {
        let sender = self.require_sender(sender_email).await?;
        self.logs.find_by_sender(sender.id).await
    }
}
