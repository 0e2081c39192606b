//! Shared test fixtures: in-memory repositories, a recording mailer and
//! helpers for driving the router with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use mensageiro_core::config::{Config, DatabaseConfig, JwtConfig, SmtpConfig};
use mensageiro_core::domain::{
    EmailLogRecord, NewEmailLog, RegisterInput, Role, StringUuid, Template, TemplateCategory,
    TemplateInput, TemplateWithOwner, User,
};
use mensageiro_core::email::{Mailer, MailerError};
use mensageiro_core::error::Result;
use mensageiro_core::jwt::JwtManager;
use mensageiro_core::repository::{EmailLogRepository, TemplateRepository, UserRepository};
use mensageiro_core::server::build_router;
use mensageiro_core::service::{AuthService, EmailService, TemplateService, UserService};
use mensageiro_core::state::AppContext;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Backing store shared by all fake repositories
#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub templates: Vec<Template>,
    pub logs: Vec<EmailLogRecord>,
}

pub type SharedStore = Arc<Mutex<Store>>;

pub struct FakeUserRepository {
    store: SharedStore,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn create(&self, input: &RegisterInput, password_hash: &str) -> Result<User> {
        let user = User {
            id: StringUuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: password_hash.to_string(),
            role: Role::User,
            created_at: Utc::now(),
        };
        self.store.lock().unwrap().users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_others(&self, id: StringUuid) -> Result<Vec<User>> {
        let store = self.store.lock().unwrap();
        let mut users: Vec<User> = store
            .users
            .iter()
            .filter(|u| u.id != id)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

pub struct FakeTemplateRepository {
    store: SharedStore,
}

impl FakeTemplateRepository {
    fn with_owner(store: &Store, template: &Template) -> Option<TemplateWithOwner> {
        let owner = store.users.iter().find(|u| u.id == template.owner_id)?;
        Some(TemplateWithOwner {
            id: template.id,
            name: template.name.clone(),
            category: template.category,
            subject: template.subject.clone(),
            body: template.body.clone(),
            owner_id: template.owner_id,
            owner_name: owner.name.clone(),
            owner_email: owner.email.clone(),
            created_at: template.created_at,
            updated_at: template.updated_at,
        })
    }
}

#[async_trait]
impl TemplateRepository for FakeTemplateRepository {
    async fn create(
        &self,
        owner_id: StringUuid,
        category: TemplateCategory,
        input: &TemplateInput,
    ) -> Result<Template> {
        let now = Utc::now();
        let template = Template {
            id: StringUuid::new_v4(),
            name: input.name.clone(),
            category,
            subject: input.subject.clone(),
            body: input.body.clone(),
            owner_id,
            created_at: now,
            updated_at: now,
        };
        self.store.lock().unwrap().templates.push(template.clone());
        Ok(template)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Template>> {
        let store = self.store.lock().unwrap();
        Ok(store.templates.iter().find(|t| t.id == id).cloned())
    }

    async fn find_with_owner(&self, id: StringUuid) -> Result<Option<TemplateWithOwner>> {
        let store = self.store.lock().unwrap();
        let template = store.templates.iter().find(|t| t.id == id);
        Ok(template.and_then(|t| Self::with_owner(&store, t)))
    }

    async fn list_all(&self) -> Result<Vec<TemplateWithOwner>> {
        let store = self.store.lock().unwrap();
        let mut templates: Vec<TemplateWithOwner> = store
            .templates
            .iter()
            .filter_map(|t| Self::with_owner(&store, t))
            .collect();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    async fn list_by_owner(&self, owner_id: StringUuid) -> Result<Vec<TemplateWithOwner>> {
        let store = self.store.lock().unwrap();
        let mut templates: Vec<TemplateWithOwner> = store
            .templates
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .filter_map(|t| Self::with_owner(&store, t))
            .collect();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    async fn update(
        &self,
        id: StringUuid,
        category: TemplateCategory,
        input: &TemplateInput,
    ) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(template) = store.templates.iter_mut().find(|t| t.id == id) {
            template.name = input.name.clone();
            template.category = category;
            template.subject = input.subject.clone();
            template.body = input.body.clone();
            template.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.templates.retain(|t| t.id != id);
        // mirrors the schema's ON DELETE SET NULL on email_logs.template_id
        for log in store.logs.iter_mut() {
            if log.template_id == Some(id) {
                log.template_id = None;
                log.template_name = None;
            }
        }
        Ok(())
    }
}

pub struct FakeEmailLogRepository {
    store: SharedStore,
}

#[async_trait]
impl EmailLogRepository for FakeEmailLogRepository {
    async fn create(&self, log: &NewEmailLog) -> Result<EmailLogRecord> {
        let mut store = self.store.lock().unwrap();
        let sender_name = store
            .users
            .iter()
            .find(|u| u.id == log.sender_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let template_name = store
            .templates
            .iter()
            .find(|t| t.id == log.template_id)
            .map(|t| t.name.clone());
        let record = EmailLogRecord {
            id: StringUuid::new_v4(),
            sender_id: log.sender_id,
            sender_name,
            template_id: Some(log.template_id),
            template_name,
            subject: log.subject.clone(),
            body: log.body.clone(),
            recipients: log.recipients.clone(),
            status: log.status,
            error_message: log.error_message.clone(),
            sent_at: Utc::now(),
        };
        store.logs.push(record.clone());
        Ok(record)
    }

    async fn find_by_sender(&self, sender_id: StringUuid) -> Result<Vec<EmailLogRecord>> {
        let store = self.store.lock().unwrap();
        let mut records: Vec<EmailLogRecord> = store
            .logs
            .iter()
            .filter(|l| l.sender_id == sender_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(records)
    }
}

/// Mailer that records what was handed to it, optionally failing every send
pub struct FakeMailer {
    pub fail: AtomicBool,
    pub sent: Mutex<Vec<(Vec<String>, String, String)>>,
}

impl FakeMailer {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> std::result::Result<(), MailerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailerError::ConnectionError(
                "connection refused".to_string(),
            ));
        }
        self.sent.lock().unwrap().push((
            recipients.to_vec(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}

#[derive(Clone)]
pub struct TestState {
    config: Arc<Config>,
    jwt_manager: JwtManager,
    auth_service: Arc<AuthService<FakeUserRepository>>,
    user_service: Arc<UserService<FakeUserRepository>>,
    template_service: Arc<TemplateService<FakeTemplateRepository, FakeUserRepository>>,
    email_service: Arc<
        EmailService<FakeUserRepository, FakeTemplateRepository, FakeEmailLogRepository, FakeMailer>,
    >,
}

impl AppContext for TestState {
    type Users = FakeUserRepository;
    type Templates = FakeTemplateRepository;
    type Logs = FakeEmailLogRepository;
    type Mail = FakeMailer;

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

pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        database: DatabaseConfig {
            url: "mysql://localhost/test".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            issuer: "mensageiro.test".to_string(),
            token_ttl_secs: 3600,
        },
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            use_tls: false,
            from_email: "noreply@mensageiro.test".to_string(),
            from_name: Some("Mensageiro".to_string()),
        },
    }
}

/// Build a router over in-memory repositories and the given mailer
pub fn test_app(mailer: Arc<FakeMailer>) -> Router {
    let config = test_config();
    let store: SharedStore = Arc::new(Mutex::new(Store::default()));

    let users = Arc::new(FakeUserRepository {
        store: store.clone(),
    });
    let templates = Arc::new(FakeTemplateRepository {
        store: store.clone(),
    });
    let logs = Arc::new(FakeEmailLogRepository { store });

    let jwt_manager = JwtManager::new(config.jwt.clone());

    let state = TestState {
        config: Arc::new(config),
        jwt_manager: jwt_manager.clone(),
        auth_service: Arc::new(AuthService::new(users.clone(), jwt_manager)),
        user_service: Arc::new(UserService::new(users.clone())),
        template_service: Arc::new(TemplateService::new(templates.clone(), users.clone())),
        email_service: Arc::new(EmailService::new(users, templates, logs, mailer)),
    };

    build_router(state)
}

pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return their access token
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let response = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

/// Create a template and return its id
pub async fn create_template(
    app: &Router,
    token: &str,
    name: &str,
    category: &str,
    subject: &str,
    body: &str,
) -> String {
    let response = request(
        app,
        "POST",
        "/api/templates",
        Some(token),
        Some(serde_json::json!({
            "name": name,
            "category": category,
            "subject": subject,
            "body": body,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}
