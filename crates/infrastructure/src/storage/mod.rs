use domain::{DomainError, User};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared, process-wide list of user records
pub type SharedUsers = Arc<RwLock<Vec<User>>>;

/// Volatile in-memory storage; lives as long as the process that built it
pub struct Storage {
    users: SharedUsers,
}

impl Storage {
    pub fn new() -> Self {
        Storage {
            users: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn get_users(&self) -> &SharedUsers {
        &self.users
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn read(users: &SharedUsers) -> Result<RwLockReadGuard<'_, Vec<User>>, DomainError> {
    users
        .read()
        .map_err(|e| DomainError::Repository(format!("user storage poisoned: {}", e)))
}

pub(crate) fn write(users: &SharedUsers) -> Result<RwLockWriteGuard<'_, Vec<User>>, DomainError> {
    users
        .write()
        .map_err(|e| DomainError::Repository(format!("user storage poisoned: {}", e)))
}
