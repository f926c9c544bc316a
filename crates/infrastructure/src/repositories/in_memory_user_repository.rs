use crate::storage::{self, SharedUsers};
use async_trait::async_trait;
use domain::{DomainError, User, UserRepository};

/// List-backed user store; every lookup is a linear scan.
pub struct InMemoryUserRepository {
    users: SharedUsers,
}

impl InMemoryUserRepository {
    pub fn new(users: SharedUsers) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let users = storage::read(&self.users)?;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = storage::read(&self.users)?;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut users = storage::write(&self.users)?;
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = storage::write(&self.users)?;
        let slot = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| DomainError::EntityNotFound(format!("User {} is not stored", user.id)))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut users = storage::write(&self.users)?;
        users.retain(|user| user.id != id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(storage::read(&self.users)?.clone())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        storage::write(&self.users)?.clear();
        Ok(())
    }
}
