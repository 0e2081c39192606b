//! Outbound email: transport trait, SMTP implementation, and template rendering

pub mod provider;
pub mod render;
pub mod smtp;

pub use provider::{Mailer, MailerError};
pub use smtp::SmtpMailer;
