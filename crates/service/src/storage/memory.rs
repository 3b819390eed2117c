use std::collections::HashMap;

use models::user::{self, User};
use parking_lot::RwLock;
use tracing::debug;

use crate::errors::RepositoryError;
use crate::repository::UserRepository;

/// In-memory user repository.
///
/// A single `RwLock` guards the whole map: `save` holds the write lock for one
/// insert, lookups share the read lock. Records are cloned on the way out, so
/// callers never hold references into the map.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { users: RwLock::new(HashMap::with_capacity(capacity)) }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, user: User) -> Result<(), RepositoryError> {
        user::validate_id(&user.id).map_err(|e| RepositoryError::InvalidArgument(e.to_string()))?;

        let id = user.id.clone();
        let replaced = self.users.write().insert(id.clone(), user).is_some();
        debug!(user_id = %id, replaced, "user saved");
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<User, RepositoryError> {
        self.users
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::user_not_found(id))
    }

    fn find_all(&self) -> Vec<User> {
        self.users.read().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.users.read().len()
    }
}
