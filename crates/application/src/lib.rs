use config::Config;
use domain::*;
use infrastructure::*;
use std::sync::Arc;

/// User Application - wires the record store into the user operations
pub struct UserApp {
    pub user_service: UserService,
}

impl UserApp {
    pub fn new(minimum_age: u32) -> Self {
        // Infrastructure layer - one volatile store per application instance
        let storage = Storage::new();

        let user_repository: Arc<dyn UserRepository> =
            Arc::new(InMemoryUserRepository::new(storage.get_users().clone()));

        // Domain services
        let user_service = UserService::new(user_repository, minimum_age);

        Self { user_service }
    }

    pub fn new_with_config(config: &Config) -> Self {
        Self::new(config.minimum_age)
    }
}
