//! Business logic layer

pub mod auth;
pub mod email;
pub mod template;
pub mod user;

pub use auth::AuthService;
pub use email::EmailService;
pub use template::TemplateService;
pub use user::UserService;
