//! # Login & Session
//!
//! [`LoginForm`] validates input, authenticates against the endpoint for the
//! selected [`Role`](crate::model::Role), and stores the role in the preference
//! store. [`current_role`] and [`logout`] read and clear that session.

pub mod error;
pub mod form;

pub use error::*;
pub use form::*;

use crate::model::Role;
use crate::store::{PreferenceClient, StoreError, USER_ROLE_KEY};
use tracing::{info, warn};

/// The role saved by the last successful login, if any.
pub async fn current_role(prefs: &PreferenceClient) -> Result<Option<Role>, StoreError> {
    let Some(raw) = prefs.get(USER_ROLE_KEY).await? else {
        return Ok(None);
    };
    match raw.parse::<Role>() {
        Ok(role) => Ok(Some(role)),
        Err(e) => {
            warn!(error = %e, "Ignoring stored role");
            Ok(None)
        }
    }
}

/// Forgets the saved role.
pub async fn logout(prefs: &PreferenceClient) -> Result<(), StoreError> {
    if prefs.remove(USER_ROLE_KEY).await? {
        info!("Logged out");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PreferenceStore;

    #[tokio::test]
    async fn test_session_round_trip() {
        let (store, prefs) = PreferenceStore::in_memory(8);
        tokio::spawn(store.run());

        assert_eq!(current_role(&prefs).await.unwrap(), None);
        prefs.set(USER_ROLE_KEY, "client").await.unwrap();
        assert_eq!(current_role(&prefs).await.unwrap(), Some(Role::Client));
        logout(&prefs).await.unwrap();
        assert_eq!(current_role(&prefs).await.unwrap(), None);

        prefs.set(USER_ROLE_KEY, "superuser").await.unwrap();
        assert_eq!(current_role(&prefs).await.unwrap(), None);
    }
}
