use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. Owns its technology sequence exclusively; the
/// username doubles as the lookup key for the account-resolution gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub technologies: Vec<Technology>,
}

impl User {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            technologies: Vec::new(),
        }
    }
}

/// A study item tracked by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub id: Uuid,
    pub title: String,
    pub studied: bool,
    pub deadline: DateTime<Utc>,
    /// Set once at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

impl Technology {
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            studied: false,
            deadline,
            created_at: Utc::now(),
        }
    }
}
