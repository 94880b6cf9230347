//! Client for the audit-log sink.
//!
//! The sink accepts `USER_ACTION` and `SYSTEM_EVENT` records over a single
//! `POST /api/audit-logs` endpoint and answers with a saved/failed envelope.
//! Posting is fire-and-forget from the UI's point of view: failures surface
//! as [`AuditError`] at the call site and are logged, never fatal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use kuchostore_core::{LogId, UserId};

/// Errors that can occur when posting to the audit sink.
#[derive(Debug, Error)]
pub enum AuditError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sink answered with a failure envelope.
    #[error("audit sink rejected record: {error}: {message}")]
    Rejected {
        /// Error name reported by the sink.
        error: String,
        /// Human-readable message reported by the sink.
        message: String,
    },
}

/// A record to append to the audit log.
///
/// Serializes with an external `"type"` tag matching the sink's wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AuditLogRequest {
    /// Something a signed-in (or anonymous) user did.
    #[serde(rename = "USER_ACTION")]
    UserAction {
        /// The acting user's id.
        #[serde(rename = "userId")]
        user_id: UserId,
        /// Action name, e.g. `CONFIRM_ORDER`.
        action: String,
        /// Free-form action payload.
        details: serde_json::Value,
        /// Client-side timestamp of the action.
        timestamp: DateTime<Utc>,
    },
    /// Something the system did on its own.
    #[serde(rename = "SYSTEM_EVENT")]
    SystemEvent {
        /// Event name.
        event: String,
        /// Free-form event payload.
        details: serde_json::Value,
        /// Client-side timestamp of the event.
        timestamp: DateTime<Utc>,
    },
}

/// Successful sink response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogSaved {
    /// Always `true`.
    pub success: bool,
    /// Id assigned to the stored record. The sink reports the inserted
    /// row id as a JSON number, but older records quote it, so both are
    /// accepted.
    #[serde(rename = "logId", deserialize_with = "log_id_from_string_or_number")]
    pub log_id: LogId,
    /// Server-side timestamp.
    pub timestamp: String,
    /// Human-readable confirmation.
    pub message: String,
}

fn log_id_from_string_or_number<'de, D>(deserializer: D) -> Result<LogId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(id) => LogId::new(id),
        Raw::Number(id) => LogId::new(id.to_string()),
    })
}

/// Failure envelope from the sink.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogFailure {
    /// Always `false`.
    pub success: bool,
    /// Error name.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Server-side timestamp.
    pub timestamp: String,
}

/// Either shape the sink can answer with.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuditLogOutcome {
    /// Record stored.
    Saved(AuditLogSaved),
    /// Record rejected.
    Failed(AuditLogFailure),
}

impl AuditLogOutcome {
    /// Collapse the envelope into a result, keeping the sink's error name
    /// and message on the failure side.
    fn into_result(self) -> Result<AuditLogSaved, AuditError> {
        match self {
            Self::Saved(saved) => Ok(saved),
            Self::Failed(failure) => Err(AuditError::Rejected {
                error: failure.error,
                message: failure.message,
            }),
        }
    }
}

/// Client for the audit-log sink.
#[derive(Debug, Clone)]
pub struct AuditClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl AuditClient {
    /// Path of the sink endpoint under the API base URL.
    const ENDPOINT_PATH: &'static str = "api/audit-logs";

    /// Create a client posting to `{base_url}/api/audit-logs`.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the base URL cannot be joined with
    /// the sink path.
    pub fn new(client: reqwest::Client, base_url: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            endpoint: base_url.join(Self::ENDPOINT_PATH)?,
        })
    }

    /// Post one record to the sink.
    ///
    /// The sink sends its failure envelope with a 500 status, so the body is
    /// parsed regardless of the status code; only transport-level failures
    /// surface as [`AuditError::Http`].
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Http`] on transport failure and
    /// [`AuditError::Rejected`] when the sink answers with its failure
    /// envelope.
    #[instrument(skip(self, request))]
    pub async fn submit(&self, request: &AuditLogRequest) -> Result<AuditLogSaved, AuditError> {
        let outcome: AuditLogOutcome = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        let saved = outcome.into_result()?;
        debug!(log_id = %saved.log_id, "audit record saved");
        Ok(saved)
    }

    /// Record a user action, stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`AuditClient::submit`].
    pub async fn log_user_action(
        &self,
        user_id: UserId,
        action: &str,
        details: serde_json::Value,
    ) -> Result<AuditLogSaved, AuditError> {
        self.submit(&AuditLogRequest::UserAction {
            user_id,
            action: action.to_owned(),
            details,
            timestamp: Utc::now(),
        })
        .await
    }

    /// Record a system event, stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`AuditClient::submit`].
    pub async fn log_system_event(
        &self,
        event: &str,
        details: serde_json::Value,
    ) -> Result<AuditLogSaved, AuditError> {
        self.submit(&AuditLogRequest::SystemEvent {
            event: event.to_owned(),
            details,
            timestamp: Utc::now(),
        })
        .await
    }
}
