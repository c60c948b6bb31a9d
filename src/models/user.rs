use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile record for an authenticated user, as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(rename = "isEmailVerified")]
    pub is_email_verified: bool,
    #[serde(rename = "createdAt")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_wire_format() {
        let json = r#"{
            "id": "u_42",
            "name": "Ada",
            "email": "ada@example.com",
            "isEmailVerified": true,
            "createdAt": "2025-03-01T12:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u_42");
        assert!(user.is_email_verified);
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_user_roundtrip_keeps_avatar() {
        let json = r#"{
            "id": "u_1",
            "name": "Grace",
            "email": "grace@example.com",
            "avatar": "https://cdn.example.com/g.png",
            "isEmailVerified": false,
            "createdAt": "2025-01-15T08:30:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        let back = serde_json::to_string(&user).unwrap();
        let again: User = serde_json::from_str(&back).unwrap();
        assert_eq!(user, again);
    }
}
