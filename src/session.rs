//! Session context passed explicitly to whatever needs the signed-in user.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    ProjectLead,
    Developer,
    Client,
    Other(String),
}

impl Role {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().replace('-', "_").as_str() {
            "ADMIN" => Role::Admin,
            "PROJECT_LEAD" => Role::ProjectLead,
            "DEVELOPER" => Role::Developer,
            "CLIENT" => Role::Client,
            _ => Role::Other(token.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::ProjectLead => "PROJECT_LEAD",
            Role::Developer => "DEVELOPER",
            Role::Client => "CLIENT",
            Role::Other(token) => token.as_str(),
        }
    }
}

impl From<String> for Role {
    fn from(token: String) -> Self {
        Role::from_token(&token)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.token().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Auth token plus user, handed to record sources instead of read from
/// ambient storage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub user: SessionUser,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Context for local, unauthenticated use (the CLI reading a file).
    pub fn anonymous() -> Self {
        Self::new(
            "",
            SessionUser {
                id: "local".to_string(),
                name: "Local user".to_string(),
                role: Role::Admin,
            },
        )
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

// Keep the token out of logs.
impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("user", &self.user)
            .finish()
    }
}
