use crate::api::{ApiError, CatalogService};
use crate::login::LoginError;
use crate::model::{Credentials, Role};
use crate::store::{PreferenceClient, USER_ROLE_KEY};
use tracing::{info, instrument, warn};
use validator::ValidateEmail;

/// State holder behind the login view.
#[derive(Debug, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    role: Option<Role>,
    email_error: Option<LoginError>,
    error: Option<LoginError>,
    is_loading: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        let email = self.email.trim();
        self.email_error =
            (!email.is_empty() && !email.validate_email()).then_some(LoginError::InvalidEmail);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn select_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    pub fn email_error(&self) -> Option<&LoginError> {
        self.email_error.as_ref()
    }

    pub fn error(&self) -> Option<&LoginError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn login_enabled(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty() && self.email_error.is_none()
    }

    /// Attempts to log in and, on success, remembers the role.
    ///
    /// Returns the role to continue with, or `None` when the attempt did not
    /// happen or failed (see [`LoginForm::error`]).
    #[instrument(skip_all, fields(email = %self.email, role = ?self.role))]
    pub async fn submit(
        &mut self,
        service: &dyn CatalogService,
        prefs: &PreferenceClient,
    ) -> Option<Role> {
        if !self.login_enabled() {
            return None;
        }
        let Some(role) = self.role else {
            self.error = Some(LoginError::RoleNotSelected);
            return None;
        };

        self.is_loading = true;
        self.error = None;
        let credentials = Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        let outcome = match service.login(role, &credentials).await {
            Ok(reply) if reply.is_success() => prefs
                .set(USER_ROLE_KEY, role.as_str())
                .await
                .map_err(LoginError::from),
            Ok(reply) => {
                warn!(message = %reply.message, "Login refused");
                Err(LoginError::Refused(role))
            }
            Err(ApiError::Rejected { body, .. }) => Err(LoginError::Server { role, detail: body }),
            Err(e) => Err(LoginError::Connection {
                role,
                detail: e.detail().to_string(),
            }),
        };
        self.is_loading = false;

        match outcome {
            Ok(()) => {
                info!(%role, "Logged in");
                Some(role)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.error = Some(e);
                None
            }
        }
    }
}
