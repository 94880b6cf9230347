//! Session/auth gate and auth endpoint client.
//!
//! The gate holds at most one bearer token for the browser session and
//! resolves the current user by validating the token against the profile
//! endpoint, once per session. Validation failure is never an error at the
//! gate's surface: the token is cleared and the session degrades to
//! anonymous. Password hashing and token signing happen server-side; this
//! module only stores and forwards the opaque token.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use kuchostore_core::{Email, User};

// =============================================================================
// Wire types
// =============================================================================

/// Envelope every auth endpoint answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable message, present on most failures.
    #[serde(default)]
    pub message: Option<String>,
    /// The user, present on sign-in and profile reads.
    #[serde(default)]
    pub user: Option<User>,
    /// A fresh bearer token, present on sign-in.
    #[serde(default)]
    pub token: Option<String>,
}

/// Sign-up request body.
#[derive(Debug, Serialize)]
pub struct SignUpData {
    /// Email to register.
    pub email: Email,
    /// Plain-text password; hashed server-side.
    pub password: String,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Serialize)]
pub struct SignInData {
    /// Registered email.
    pub email: Email,
    /// Plain-text password; verified server-side.
    pub password: String,
}

/// Profile update request body.
#[derive(Debug, Serialize)]
pub struct UserProfileData {
    /// New display name.
    pub name: String,
    /// New email.
    pub email: Email,
    /// New phone number.
    pub phone: String,
}

// =============================================================================
// AuthClient
// =============================================================================

/// Client for the auth endpoints.
///
/// All endpoints speak the [`AuthResponse`] envelope; `success: false` maps
/// to [`AuthError::Rejected`] with the server's message.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client for the auth endpoints under `base_url`.
    #[must_use]
    pub const fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<AuthResponse, AuthError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| AuthError::MissingField("endpoint"))?;

        let response: AuthResponse = self
            .client
            .post(url)
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            Ok(response)
        } else {
            Err(AuthError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "authentication failed".to_owned()),
            ))
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] if the email is already registered,
    /// or [`AuthError::Http`] on transport failure.
    pub async fn sign_up(&self, data: &SignUpData) -> Result<AuthResponse, AuthError> {
        self.post_json("api/auth/signup", data).await
    }

    /// Sign in and obtain a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] on bad credentials,
    /// [`AuthError::MissingField`] if a success envelope carries no token
    /// or user, or [`AuthError::Http`] on transport failure.
    pub async fn sign_in(&self, data: &SignInData) -> Result<(User, String), AuthError> {
        let response = self.post_json("api/auth/signin", data).await?;
        let user = response.user.ok_or(AuthError::MissingField("user"))?;
        let token = response.token.ok_or(AuthError::MissingField("token"))?;
        Ok((user, token))
    }

    /// Ask for a password-reset email.
    ///
    /// # Errors
    ///
    /// See [`AuthError`].
    pub async fn request_password_reset(&self, email: &Email) -> Result<AuthResponse, AuthError> {
        self.post_json(
            "api/auth/request-reset",
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    /// Complete a password reset with the emailed token.
    ///
    /// # Errors
    ///
    /// See [`AuthError`].
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        self.post_json(
            "api/auth/reset-password",
            &serde_json::json!({ "token": token, "password": password }),
        )
        .await
    }

    /// Update the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// See [`AuthError`].
    pub async fn update_profile(&self, data: &UserProfileData) -> Result<AuthResponse, AuthError> {
        self.post_json("api/auth/update-profile", data).await
    }
}

// =============================================================================
// ProfileSource
// =============================================================================

/// Seam between the gate and the profile endpoint, so the gate's state
/// machine can be exercised without HTTP.
pub trait ProfileSource {
    /// Resolve the user a bearer token belongs to.
    fn fetch_profile(&self, token: &str) -> impl Future<Output = Result<User, AuthError>>;
}

impl ProfileSource for AuthClient {
    /// `GET /api/user/profile` with the token as a bearer credential.
    async fn fetch_profile(&self, token: &str) -> Result<User, AuthError> {
        let url = self
            .base_url
            .join("api/user/profile")
            .map_err(|_| AuthError::MissingField("endpoint"))?;

        let response: AuthResponse = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;

        if !response.success {
            return Err(AuthError::Rejected(
                response.message.unwrap_or_else(|| "invalid token".to_owned()),
            ));
        }

        response.user.ok_or(AuthError::MissingField("user"))
    }
}

// =============================================================================
// AuthGate
// =============================================================================

/// Session state as seen by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No validation attempted yet.
    Unknown,
    /// Token validated; the user is populated.
    Authenticated(User),
    /// No token, or validation failed.
    Anonymous,
}

/// Holds the session's bearer token and resolves the current user.
///
/// State machine: `Unknown` on construction; the first
/// [`AuthGate::current_user`] call validates the stored token and settles
/// on `Authenticated` or `Anonymous`. [`AuthGate::sign_out`] forces
/// `Anonymous` from any state and clears the token. There is no client-side
/// token refresh; expiry is enforced server-side only.
#[derive(Debug)]
pub struct AuthGate<P> {
    profiles: P,
    token: Option<SecretString>,
    state: SessionState,
}

impl<P: ProfileSource> AuthGate<P> {
    /// Create a gate with no token.
    pub const fn new(profiles: P) -> Self {
        Self {
            profiles,
            token: None,
            state: SessionState::Unknown,
        }
    }

    /// The stored bearer token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Store a token (e.g. after sign-in) and mark the session for
    /// re-validation.
    pub fn set_token(&mut self, token: SecretString) {
        self.token = Some(token);
        self.state = SessionState::Unknown;
    }

    /// Drop the stored token without touching the resolved state.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Store a token together with the already-validated user, as returned
    /// by sign-in, skipping the extra profile round-trip.
    pub fn accept_sign_in(&mut self, user: User, token: SecretString) {
        self.token = Some(token);
        self.state = SessionState::Authenticated(user);
    }

    /// The current session state without triggering validation.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Resolve the currently authenticated user.
    ///
    /// Validates the stored token against the profile endpoint at most once
    /// per session. Any failure (no token, transport error, rejected token)
    /// clears the token and settles on anonymous; this method never
    /// surfaces an error to the caller.
    #[instrument(skip(self))]
    pub async fn current_user(&mut self) -> Option<&User> {
        if matches!(self.state, SessionState::Unknown) {
            self.validate().await;
        }

        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Sign the session out: anonymous state, token gone.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.state = SessionState::Anonymous;
    }

    async fn validate(&mut self) {
        let Some(token) = self.token.as_ref() else {
            self.state = SessionState::Anonymous;
            return;
        };

        match self.profiles.fetch_profile(token.expose_secret()).await {
            Ok(user) => {
                debug!(user_id = %user.id, "session validated");
                self.state = SessionState::Authenticated(user);
            }
            Err(e) => {
                // Fail open to logged-out; the page renders anonymously.
                warn!(error = %e, "session validation failed, clearing token");
                self.token = None;
                self.state = SessionState::Anonymous;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kuchostore_core::UserId;

    use super::*;

    struct StubProfiles {
        accept: Option<User>,
    }

    impl ProfileSource for StubProfiles {
        async fn fetch_profile(&self, _token: &str) -> Result<User, AuthError> {
            self.accept
                .clone()
                .ok_or_else(|| AuthError::Rejected("invalid token".to_owned()))
        }
    }

    fn user() -> User {
        User {
            id: UserId::new("u-1"),
            email: Email::parse("cat@example.com").unwrap(),
            name: Some("Kucho".to_owned()),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_no_token_resolves_anonymous() {
        let mut gate = AuthGate::new(StubProfiles { accept: None });
        assert!(gate.current_user().await.is_none());
        assert_eq!(*gate.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_valid_token_resolves_authenticated() {
        let mut gate = AuthGate::new(StubProfiles {
            accept: Some(user()),
        });
        gate.set_token(SecretString::from("tok-1"));

        let resolved = gate.current_user().await.cloned();
        assert_eq!(resolved.unwrap().id, UserId::new("u-1"));
        assert!(matches!(gate.state(), SessionState::Authenticated(_)));
        assert!(gate.token().is_some());
    }

    #[tokio::test]
    async fn test_invalid_token_clears_and_degrades() {
        let mut gate = AuthGate::new(StubProfiles { accept: None });
        gate.set_token(SecretString::from("tok-bad"));

        assert!(gate.current_user().await.is_none());
        assert_eq!(*gate.state(), SessionState::Anonymous);
        assert!(gate.token().is_none());
    }

    #[tokio::test]
    async fn test_validation_happens_once_per_session() {
        let mut gate = AuthGate::new(StubProfiles {
            accept: Some(user()),
        });
        gate.set_token(SecretString::from("tok-1"));

        assert!(gate.current_user().await.is_some());
        // Second resolution answers from the settled state.
        assert!(gate.current_user().await.is_some());
    }

    #[tokio::test]
    async fn test_sign_out_forces_anonymous() {
        let mut gate = AuthGate::new(StubProfiles {
            accept: Some(user()),
        });
        gate.accept_sign_in(user(), SecretString::from("tok-1"));
        assert!(matches!(gate.state(), SessionState::Authenticated(_)));

        gate.sign_out();
        assert_eq!(*gate.state(), SessionState::Anonymous);
        assert!(gate.token().is_none());
        assert!(gate.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_set_token_marks_for_revalidation() {
        let mut gate = AuthGate::new(StubProfiles {
            accept: Some(user()),
        });
        gate.sign_out();
        gate.set_token(SecretString::from("tok-2"));
        assert_eq!(*gate.state(), SessionState::Unknown);
        assert!(gate.current_user().await.is_some());
    }
}
