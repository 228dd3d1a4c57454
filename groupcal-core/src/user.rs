use serde::{Deserialize, Deserializer, Serialize};

use crate::UserId;

/// A user as returned by `GET /me` or embedded in other records.
///
/// Embedded copies are sometimes bare stubs (`{ "user_id": 6 }`), so only
/// the id is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn new(user_id: UserId) -> Self {
        User {
            user_id,
            user_name: None,
            email: None,
        }
    }

    /// Name for display, falling back to email and then the id.
    pub fn display_name(&self) -> String {
        self.user_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user {}", self.user_id))
    }

    /// First character of the user name, or "U".
    pub fn initial(&self) -> char {
        self.user_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .unwrap_or('U')
    }
}

/// Deserialize an embedded user, treating a record without a usable
/// `user_id` as absent.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<User>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_user_deserializes() {
        let user: User = serde_json::from_str(r#"{"user_id": 6}"#).unwrap();
        assert_eq!(user, User::new(6));
        assert_eq!(user.display_name(), "user 6");
        assert_eq!(user.initial(), 'U');
    }

    #[test]
    fn initial_uses_first_character() {
        let user = User {
            user_name: Some("太郎".into()),
            ..User::new(1)
        };
        assert_eq!(user.initial(), '太');
    }
}
