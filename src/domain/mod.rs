//! Domain models

pub mod common;
pub mod email_log;
pub mod template;
pub mod user;

pub use common::StringUuid;
pub use email_log::{EmailLogRecord, EmailStatus, NewEmailLog, SendEmailInput};
pub use template::{Template, TemplateCategory, TemplateInput, TemplateWithOwner};
pub use user::{AuthResponse, LoginInput, RegisterInput, Role, User, UserResponse};
