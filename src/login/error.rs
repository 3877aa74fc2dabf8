//! Error types for the login flow.

use crate::model::Role;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoginError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Please select a role (Administrator or Client)")]
    RoleNotSelected,

    /// The service answered but did not accept the credentials.
    #[error("Login failed as {0}")]
    Refused(Role),

    #[error("Server error while logging in as {role}: {detail}")]
    Server { role: Role, detail: String },

    #[error("Connection error while logging in as {role}: {detail}")]
    Connection { role: Role, detail: String },

    /// Login worked but the role could not be remembered.
    #[error("Could not save session: {0}")]
    Session(#[from] StoreError),
}
