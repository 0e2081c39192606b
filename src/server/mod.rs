//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::email::SmtpMailer;
use crate::jwt::JwtManager;
use crate::migration;
use crate::openapi::ApiDoc;
use crate::repository::{EmailLogRepositoryImpl, TemplateRepositoryImpl, UserRepositoryImpl};
use crate::service::{AuthService, EmailService, TemplateService, UserService};
use crate::state::AppContext;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt_manager: JwtManager,
    pub auth_service: Arc<AuthService<UserRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub template_service: Arc<TemplateService<TemplateRepositoryImpl, UserRepositoryImpl>>,
    pub email_service: Arc<
        EmailService<
            UserRepositoryImpl,
            TemplateRepositoryImpl,
            EmailLogRepositoryImpl,
            SmtpMailer,
        >,
    >,
}

impl AppContext for AppState {
    type Users = UserRepositoryImpl;
    type Templates = TemplateRepositoryImpl;
    type Logs = EmailLogRepositoryImpl;
    type Mail = SmtpMailer;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn auth_service(&self) -> &AuthService<Self::Users> {
        &self.auth_service
    }

    fn user_service(&self) -> &UserService<Self::Users> {
        &self.user_service
    }

    fn template_service(&self) -> &TemplateService<Self::Templates, Self::Users> {
        &self.template_service
    }

    fn email_service(&self) -> &EmailService<Self::Users, Self::Templates, Self::Logs, Self::Mail> {
        &self.email_service
    }
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    migration::run_migrations(&config).await?;

    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
    let template_repo = Arc::new(TemplateRepositoryImpl::new(db_pool.clone()));
    let email_log_repo = Arc::new(EmailLogRepositoryImpl::new(db_pool.clone()));

    let jwt_manager = JwtManager::new(config.jwt.clone());

    let mailer = Arc::new(
        SmtpMailer::from_config(&config.smtp)
            .map_err(|e| anyhow::anyhow!("SMTP configuration error: {}", e))?,
    );

    let auth_service = Arc::new(AuthService::new(user_repo.clone(), jwt_manager.clone()));
    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let template_service = Arc::new(TemplateService::new(
        template_repo.clone(),
        user_repo.clone(),
    ));
    let email_service = Arc::new(EmailService::new(
        user_repo,
        template_repo,
        email_log_repo,
        mailer,
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        jwt_manager,
        auth_service,
        user_service,
        template_service,
        email_service,
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve the OpenAPI document as JSON
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the HTTP router with generic state type
///
/// Generic over the state so the same routes work with the production
/// `AppState` and test states.
pub fn build_router<S: AppContext>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(api::health::health))
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi_json))
        // Auth
        .route("/api/auth/register", post(api::auth::register::<S>))
        .route("/api/auth/login", post(api::auth::login::<S>))
        // Templates
        .route(
            "/api/templates",
            get(api::template::list_all::<S>).post(api::template::create::<S>),
        )
        .route("/api/templates/mine", get(api::template::list_mine::<S>))
        .route(
            "/api/templates/{id}",
            get(api::template::get::<S>)
                .put(api::template::update::<S>)
                .delete(api::template::delete::<S>),
        )
        // Emails
        .route("/api/emails/send", post(api::email::send::<S>))
        .route("/api/emails/history", get(api::email::history::<S>))
        // Users
        .route("/api/users/me", get(api::user::me::<S>))
        .route("/api/users", get(api::user::list::<S>))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
