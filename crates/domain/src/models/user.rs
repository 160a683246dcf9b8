//! User and acting-principal domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role name for users who publish availability and answer requests.
pub const MENTOR_ROLE: &str = "mentor";

/// Role name for users who send mentorship requests.
pub const MENTEE_ROLE: &str = "mentee";

/// A registered user as seen by the scheduling core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role names are compared case-insensitively.
    pub fn has_role(&self, role: &str) -> bool {
        self.role_name.eq_ignore_ascii_case(role)
    }

    pub fn is_mentor(&self) -> bool {
        self.has_role(MENTOR_ROLE)
    }
}

/// The authenticated user acting on a request, as supplied by the identity layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role_name: String,
}

impl Principal {
    pub fn new(user_id: Uuid, role_name: impl Into<String>) -> Self {
        Self {
            user_id,
            role_name: role_name.into(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role_name.eq_ignore_ascii_case(role)
    }

    pub fn is_mentor(&self) -> bool {
        self.has_role(MENTOR_ROLE)
    }

    pub fn is_mentee(&self) -> bool {
        self.has_role(MENTEE_ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_comparison_ignores_case() {
        let principal = Principal::new(Uuid::new_v4(), "Mentor");
        assert!(principal.is_mentor());
        assert!(!principal.is_mentee());

        let principal = Principal::new(Uuid::new_v4(), "MENTEE");
        assert!(principal.is_mentee());
        assert!(!principal.is_mentor());
    }

    #[test]
    fn test_unknown_role_has_no_capabilities() {
        let principal = Principal::new(Uuid::new_v4(), "admin");
        assert!(!principal.is_mentor());
        assert!(!principal.is_mentee());
        assert!(principal.has_role("ADMIN"));
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: Uuid::nil(),
            email: "m@example.com".to_string(),
            display_name: Some("Ada".to_string()),
            role_name: "mentor".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["roleName"], "mentor");
        assert_eq!(json["displayName"], "Ada");
        assert!(user.is_mentor());
    }
}
