//! SMTP mailer implementation using lettre

use super::provider::{Mailer, MailerError};
use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// SMTP-based mailer
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    from_name: Option<String>,
}

impl SmtpMailer {
    /// Create a new SMTP mailer from configuration
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailerError> {
        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailerError::InvalidConfiguration(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let credentials = Credentials::new(username.clone(), password.clone());
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        })
    }

    fn build_from_mailbox(&self) -> Result<Mailbox, MailerError> {
        let mailbox = if let Some(name) = &self.from_name {
            format!("{} <{}>", name, self.from_email)
        } else {
            self.from_email.clone()
        };

        mailbox.parse().map_err(|e| {
            MailerError::InvalidConfiguration(format!("Invalid from address: {}", e))
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), MailerError> {
        let from = self.build_from_mailbox()?;

        if recipients.is_empty() {
            return Err(MailerError::InvalidConfiguration(
                "No recipients specified".to_string(),
            ));
        }

        let mut builder = Message::builder().from(from).subject(subject);
        for recipient in recipients {
            let mailbox: Mailbox = recipient.parse().map_err(|e| {
                MailerError::InvalidConfiguration(format!("Invalid to address: {}", e))
            })?;
            builder = builder.to(mailbox);
        }

        let email = builder
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailerError::SendFailed(e.to_string()))?;

        match self.transport.send(email).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("authentication") || error_msg.contains("AUTH") {
                    Err(MailerError::AuthenticationFailed(error_msg))
                } else if error_msg.contains("connection") || error_msg.contains("timeout") {
                    Err(MailerError::ConnectionError(error_msg))
                } else {
                    Err(MailerError::SendFailed(error_msg))
                }
            }
        }
    }
}
