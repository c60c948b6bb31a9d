use serde::Deserialize;

use super::{Note, User};

/// Uniform response envelope the server wraps every payload in.
///
/// The server reuses one shape for all endpoints and fills in whichever
/// optional fields apply; helpers on `ApiClient` pull out the field they
/// expect and reject envelopes that are missing it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    pub user: Option<User>,
    pub token: Option<String>,
    pub notes: Option<Vec<Note>>,
    pub note: Option<Note>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_envelope() {
        let json = r#"{
            "success": true,
            "message": "Login successful",
            "user": {
                "id": "u_42",
                "name": "Ada",
                "email": "ada@example.com",
                "isEmailVerified": true,
                "createdAt": "2025-03-01T12:00:00Z"
            },
            "token": "tok_abc123"
        }"#;
        let envelope: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.token.as_deref(), Some("tok_abc123"));
        assert_eq!(envelope.user.unwrap().name, "Ada");
        assert!(envelope.notes.is_none());
    }

    #[test]
    fn test_notes_envelope_with_pagination() {
        let json = r#"{
            "success": true,
            "message": "Notes fetched",
            "notes": [{
                "id": "n_1",
                "title": "t",
                "content": "c",
                "createdAt": "2025-06-01T09:00:00Z",
                "updatedAt": "2025-06-01T09:00:00Z",
                "userId": "u_42"
            }],
            "pagination": {"page": 1, "limit": 20, "total": 1, "pages": 1}
        }"#;
        let envelope: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.notes.unwrap().len(), 1);
        assert_eq!(envelope.pagination.unwrap().total, 1);
    }

    #[test]
    fn test_failure_envelope_without_message() {
        // Some error paths send only {"success": false}.
        let envelope: ApiResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.message.is_empty());
    }
}
