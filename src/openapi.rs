//! OpenAPI document definition

use crate::domain::{
    AuthResponse, EmailLogRecord, EmailStatus, LoginInput, RegisterInput, Role, SendEmailInput,
    Template, TemplateCategory, TemplateInput, TemplateWithOwner, UserResponse,
};
use crate::error::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mensageiro Core API",
        description = "Templated email notification backend",
        version = "0.1.0"
    ),
    components(schemas(
        RegisterInput,
        LoginInput,
        AuthResponse,
        UserResponse,
        Role,
        Template,
        TemplateWithOwner,
        TemplateInput,
        TemplateCategory,
        SendEmailInput,
        EmailLogRecord,
        EmailStatus,
        ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "templates", description = "Email template management"),
        (name = "emails", description = "Templated email dispatch and history"),
        (name = "users", description = "User profile and directory")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("Mensageiro Core API"));
        assert!(json.contains("TemplateInput"));
    }
}
