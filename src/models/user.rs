//! User and session data structures.

use serde::{Deserialize, Serialize};

/// An account as returned by the current-user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Credentials submitted to the login and registration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair issued by the login endpoint and echoed on every
/// subsequent authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_defaults_superuser() {
        let user: User = serde_json::from_str(r#"{"id": 3, "email": "a@b.c"}"#).unwrap();
        assert_eq!(user.id, 3);
        assert!(!user.is_superuser);
    }

    #[test]
    fn test_token_response_round_trip() {
        let json = r#"{"access_token": "tok", "token_type": "bearer"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.token_type, "bearer");
    }
}
