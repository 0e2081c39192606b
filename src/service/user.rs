//! User profile queries

use crate::domain::UserResponse;
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use std::sync::Arc;

pub struct UserService<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Current user's profile. The only 404 in the API.
    pub async fn me(&self, email: &str) -> Result<UserResponse> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))?;
        Ok(user.into())
    }

    /// All registered users except the caller (recipient picker)
    pub async fn list_others(&self, email: &str) -> Result<Vec<UserResponse>> {
        let current = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Usuário não encontrado".to_string()))?;

        let users = self.users.list_others(current.id).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
