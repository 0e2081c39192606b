//! Application state trait for dependency injection
//!
//! Handlers are generic over this trait so the same code serves both the
//! production `AppState` and test states built over fake repositories.

use crate::config::Config;
use crate::email::Mailer;
use crate::jwt::JwtManager;
use crate::repository::{EmailLogRepository, TemplateRepository, UserRepository};
use crate::service::{AuthService, EmailService, TemplateService, UserService};

/// Trait for application state that provides access to all services
pub trait AppContext: Clone + Send + Sync + 'static {
    /// The user repository type
    type Users: UserRepository;
    /// The template repository type
    type Templates: TemplateRepository;
    /// The email log repository type
    type Logs: EmailLogRepository;
    /// The mail transport type
    type Mail: Mailer;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    /// Get the auth service
    fn auth_service(&self) -> &AuthService<Self::Users>;

    /// Get the user service
    fn user_service(&self) -> &UserService<Self::Users>;

    /// Get the template service
    fn template_service(&self) -> &TemplateService<Self::Templates, Self::Users>;

    /// Get the email service
    fn email_service(&self) -> &EmailService<Self::Users, Self::Templates, Self::Logs, Self::Mail>;
}
