//! Data access layer

pub mod email_log;
pub mod template;
pub mod user;

pub use email_log::{EmailLogRepository, EmailLogRepositoryImpl};
pub use template::{TemplateRepository, TemplateRepositoryImpl};
pub use user::{UserRepository, UserRepositoryImpl};
