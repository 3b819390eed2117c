use models::user::User;

use crate::errors::RepositoryError;

/// Repository abstraction for user records.
///
/// Implementations must be safe to share across threads: every method takes
/// `&self` and each call is atomic with respect to every other call.
pub trait UserRepository: Send + Sync {
    /// Insert `user`, or replace the whole record stored under the same id.
    /// Fails with [`RepositoryError::InvalidArgument`] on an empty id, before anything is written.
    fn save(&self, user: User) -> Result<(), RepositoryError>;

    /// Copy of the record currently stored under `id`.
    fn find_by_id(&self, id: &str) -> Result<User, RepositoryError>;

    /// Copies of every stored record, in no particular order.
    fn find_all(&self) -> Vec<User>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
