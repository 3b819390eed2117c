use std::sync::Arc;

use models::user::{self, User};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::errors::{RepositoryError, ServiceError};
use crate::repository::UserRepository;

/// Create-user input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserInput {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// User business service independent of web framework.
///
/// Holds the repository behind an `Arc`, so clones share the same records.
pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Validate and store a user, replacing any record with the same id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::{CreateUserInput, InMemoryUserRepository, UserService};
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::new()));
    /// let input = CreateUserInput { id: "1".into(), name: "Alice".into(), email: None };
    /// let user = svc.create_user(input).unwrap();
    /// assert_eq!(svc.get_user("1").unwrap(), user);
    /// ```
    #[instrument(skip(self, input), fields(user_id = %input.id))]
    pub fn create_user(&self, input: CreateUserInput) -> Result<User, ServiceError> {
        // id problems surface as InvalidArgument, ahead of any field checks
        user::validate_id(&input.id).map_err(|e| RepositoryError::InvalidArgument(e.to_string()))?;
        user::validate_name(&input.name)?;
        if let Some(email) = &input.email {
            user::validate_email(email)?;
        }

        let user = User { id: input.id, name: input.name, email: input.email };
        self.repo.save(user.clone())?;
        info!(user_id = %user.id, total = self.repo.len(), "user_saved");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub fn get_user(&self, id: &str) -> Result<User, ServiceError> {
        let found = self.repo.find_by_id(id)?;
        debug!("user found");
        Ok(found)
    }

    pub fn list_users(&self) -> Vec<User> {
        let users = self.repo.find_all();
        debug!(count = users.len(), "users listed");
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryUserRepository;
    use uuid::Uuid;

    fn svc() -> UserService<dyn UserRepository> {
        let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        UserService::new(repo)
    }

    fn input(id: &str, name: &str) -> CreateUserInput {
        CreateUserInput { id: id.into(), name: name.into(), email: None }
    }

    #[test]
    fn create_get_list() -> anyhow::Result<()> {
        let svc = svc();
        let id = Uuid::new_v4().to_string();

        let created = svc.create_user(CreateUserInput {
            email: Some("alice@example.com".into()),
            ..input(&id, "Alice")
        })?;
        assert_eq!(created.email.as_deref(), Some("alice@example.com"));
        assert_eq!(svc.get_user(&id)?, created);
        assert_eq!(svc.list_users(), vec![created]);
        Ok(())
    }

    #[test]
    fn empty_id_surfaces_invalid_argument() {
        let svc = svc();
        let err = svc.create_user(input("", "X")).unwrap_err();
        assert!(matches!(err, ServiceError::Repository(RepositoryError::InvalidArgument(_))));
        assert_eq!(err.code(), 1001);
        assert!(svc.list_users().is_empty());
    }

    #[test]
    fn empty_id_wins_over_invalid_fields() {
        let svc = svc();
        let err = svc.create_user(CreateUserInput { email: Some("nope".into()), ..input("", "") }).unwrap_err();
        assert!(matches!(err, ServiceError::Repository(RepositoryError::InvalidArgument(_))));
        assert_eq!(err.code(), 1001);
        assert!(svc.repository().is_empty());
    }

    #[test]
    fn field_validation_runs_before_save() {
        let svc = svc();
        assert!(matches!(svc.create_user(input("1", " ")), Err(ServiceError::Model(_))));
        let bad_email = CreateUserInput { email: Some("nope".into()), ..input("1", "Alice") };
        assert!(matches!(svc.create_user(bad_email), Err(ServiceError::Model(_))));
        assert!(svc.repository().is_empty());
    }

    #[test]
    fn missing_user_is_not_found() {
        let err = svc().get_user("999").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.code(), 1003);
    }

    #[test]
    fn clones_share_one_repository() -> anyhow::Result<()> {
        let a = svc();
        let b = a.clone();
        a.create_user(input("1", "Alice"))?;
        b.create_user(input("1", "Bob"))?;
        assert_eq!(a.get_user("1")?.name, "Bob");
        assert_eq!(b.list_users().len(), 1);
        Ok(())
    }
}
