//! Service layer for user records.
//! - `repository` defines the storage capability set consumed by callers.
//! - `storage` holds the conforming backends (in-memory only).
//! - `user_service` adds input validation and logging on top of a repository.

pub mod errors;
pub mod repository;
pub mod storage;
pub mod user_service;

pub use repository::UserRepository;
pub use storage::memory::InMemoryUserRepository;
pub use user_service::{CreateUserInput, UserService};
