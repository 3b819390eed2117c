use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A stored user record.
///
/// `id` is the primary key. Every other field is opaque to the store and is
/// replaced wholesale when a record with the same `id` is saved again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), email: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Identifiers must contain at least one non-whitespace character.
pub fn validate_id(id: &str) -> Result<(), ModelError> {
    if id.trim().is_empty() {
        return Err(ModelError::Validation("user id cannot be empty".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_blank_ids() {
        assert!(validate_id("").is_err());
        assert!(validate_id("   ").is_err());
        assert!(validate_id("1").is_ok());
    }

    #[test]
    fn name_and_email_rules() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name(" ").is_err());
        assert!(validate_email("alice@example.com").is_ok());
        assert_eq!(
            validate_email("alice").unwrap_err(),
            ModelError::Validation("invalid email".into())
        );
    }

    #[test]
    fn email_is_optional_on_the_wire() -> Result<(), serde_json::Error> {
        let user: User = serde_json::from_str(r#"{"id":"1","name":"Alice"}"#)?;
        assert_eq!(user, User::new("1", "Alice"));
        assert_eq!(serde_json::to_string(&user)?, r#"{"id":"1","name":"Alice"}"#);
        Ok(())
    }
}
