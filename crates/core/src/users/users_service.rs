use async_trait::async_trait;
use std::sync::Arc;

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing users. All user state lives in the store; there is
/// no process-wide user map.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        // The unique index on email is the real guard; this check only
        // produces a friendlier error for the common case.
        if self.repository.get_by_email(&new_user.email)?.is_some() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Email is already registered".to_string(),
            )));
        }

        self.repository.create(new_user).await
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.get_by_email(email)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))
    }
}
