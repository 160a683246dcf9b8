//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::User;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            display_name: entity.display_name,
            role_name: entity.role_name,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_entity_conversion() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            email: "mentor@example.com".to_string(),
            display_name: Some("Grace".to_string()),
            role_name: "Mentor".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let user: User = entity.clone().into();
        assert_eq!(user.id, entity.id);
        assert_eq!(user.display_name.as_deref(), Some("Grace"));
        assert!(user.is_mentor());
    }
}
