use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Reply message the service sends on a successful login.
pub const LOGIN_OK_MESSAGE: &str = "Login exitoso";

/// The role a user authenticates with. It decides which login endpoint is used
/// and which operations the front end allows afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }

    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_review_orders(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_edit_settings(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_place_orders(&self) -> bool {
        matches!(self, Role::Client)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Login reply body. The service answers 2xx for both outcomes and puts the
/// verdict in `message`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub message: String,
}

impl LoginReply {
    pub fn is_success(&self) -> bool {
        self.message == LOGIN_OK_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Client ".parse::<Role>(), Ok(Role::Client));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_manage_catalog());
        assert!(Role::Admin.can_review_orders());
        assert!(!Role::Admin.can_place_orders());
        assert!(Role::Client.can_place_orders());
        assert!(!Role::Client.can_manage_catalog());
        assert!(!Role::Client.can_edit_settings());
    }

    #[test]
    fn test_login_reply_verdict() {
        let ok: LoginReply = serde_json::from_str(r#"{"message": "Login exitoso"}"#).unwrap();
        let bad: LoginReply = serde_json::from_str(r#"{"message": "Credenciales invalidas"}"#).unwrap();
        let empty: LoginReply = serde_json::from_str("{}").unwrap();
        assert!(ok.is_success());
        assert!(!bad.is_success());
        assert!(!empty.is_success());
    }
}
