//! Registration and login

use crate::domain::{AuthResponse, LoginInput, RegisterInput};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::UserRepository;
use std::sync::Arc;
use validator::Validate;

pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    jwt_manager: JwtManager,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: Arc<U>, jwt_manager: JwtManager) -> Self {
        Self { users, jwt_manager }
    }

    /// Register a new account. Emails are unique; the role is always USER.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResponse> {
        input.validate()?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::BadRequest("E-mail já cadastrado".to_string()));
        }

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)?;
        let user = self.users.create(&input, &password_hash).await?;

        let token = self.jwt_manager.create_token(&user.email, &user.name)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Authenticate and issue a token. Unknown email and wrong password
    /// answer with the same message.
    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse> {
        input.validate()?;

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciais inválidas".to_string()))?;

        if !bcrypt::verify(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Credenciais inválidas".to_string()));
        }

        let token = self.jwt_manager.create_token(&user.email, &user.name)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}
