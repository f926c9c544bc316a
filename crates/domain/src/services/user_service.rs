use crate::entities::{User, UserDetails};
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use crate::services::FieldUpdater;
use crate::validation;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// User Service - the user operations, written against the repository port
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    minimum_age: u32,
    user_counter: AtomicI32,
    // Serialises check-then-write sequences (email uniqueness, id assignment).
    write_lock: Mutex<()>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>, minimum_age: u32) -> Self {
        Self {
            user_repository,
            minimum_age,
            user_counter: AtomicI32::new(0),
            write_lock: Mutex::new(()),
        }
    }

    pub fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    /// Register a new user; the email must not belong to anyone yet.
    ///
    /// Ids come from a counter that starts at 1 and is never rewound, so an
    /// id freed by a delete is not handed out again.
    pub async fn register(&self, details: UserDetails) -> Result<User, DomainError> {
        let _guard = self.write_lock.lock().await;

        if self.user_repository.find_by_email(&details.email).await?.is_some() {
            warn!("Registration rejected: email {} is taken", details.email);
            return Err(DomainError::Registration("Can't register user".to_string()));
        }

        let id = self.user_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let user = self.user_repository.save(&User::with_id(id, details)).await?;
        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Replace every field of an existing user.
    pub async fn update_user_info(&self, id: i32, details: UserDetails) -> Result<User, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut user = self.find_existing(id, "update").await?;
        self.ensure_email_available(id, &details.email).await?;

        user.replace_details(details);
        let user = self.user_repository.update(&user).await?;
        info!("Updated user {}", user.id);
        Ok(user)
    }

    /// Apply the named fields to an existing user.
    ///
    /// Fields are validated and written one by one. When a field fails, the
    /// ones before it remain written and the error is returned.
    pub async fn update_user_info_partially(
        &self,
        id: i32,
        fields: &Map<String, Value>,
    ) -> Result<User, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut user = self.find_existing(id, "update").await?;
        let taken_emails: HashSet<String> = self
            .user_repository
            .find_all()
            .await?
            .into_iter()
            .filter(|other| other.id != id)
            .map(|other| other.email)
            .collect();

        let outcome = FieldUpdater::new(self.minimum_age, validation::today())
            .with_taken_emails(taken_emails)
            .apply(&mut user, fields);
        let user = self.user_repository.update(&user).await?;

        match outcome {
            Ok(()) => {
                info!("Partially updated user {} ({} field(s))", user.id, fields.len());
                Ok(user)
            }
            Err(e) => {
                warn!("Partial update of user {} stopped: {}", user.id, e);
                Err(e)
            }
        }
    }

    pub async fn delete_user(&self, id: i32) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        self.find_existing(id, "delete").await?;
        self.user_repository.delete(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }

    /// Users born strictly between `from_date` and `to_date`, in store order.
    pub async fn search_by_birth_date_range(
        &self,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<User>, DomainError> {
        let users: Vec<User> = self
            .user_repository
            .find_all()
            .await?
            .into_iter()
            .filter(|user| user.born_between(from_date, to_date))
            .collect();
        debug!("{} user(s) born between {} and {}", users.len(), from_date, to_date);
        Ok(users)
    }

    /// Get user by ID
    pub async fn find_user(&self, id: i32) -> Result<User, DomainError> {
        self.find_existing(id, "get").await
    }

    /// Get all users
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repository.find_all().await
    }

    async fn find_existing(&self, id: i32, action: &str) -> Result<User, DomainError> {
        self.user_repository.find_by_id(id).await?.ok_or_else(|| {
            DomainError::EntityNotFound(format!("Can't find and {} user by id: {}", action, id))
        })
    }

    async fn ensure_email_available(&self, id: i32, email: &str) -> Result<(), DomainError> {
        match self.user_repository.find_by_email(email).await? {
            Some(owner) if owner.id != id => {
                warn!("User {} can't take email {} from user {}", id, email, owner.id);
                Err(DomainError::Registration("Can't change email address".to_string()))
            }
            _ => Ok(()),
        }
    }
}
