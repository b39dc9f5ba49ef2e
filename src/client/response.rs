use reqwest::StatusCode;
use serde::Deserialize;

/// Header carrying the identifier of a freshly created entity. The remote
/// service returns it instead of a response body.
pub const RESOURCE_ID_HEADER: &str = "Resource-Id";

/// Structured error body returned by the remote service on client errors.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Outcome of one remote call: the HTTP status plus whatever the transport
/// layer managed to decode for it. Interpreting the status is the
/// reconciler's job, not this type's.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    status: StatusCode,
    resource_id: Option<String>,
    body: Option<T>,
    error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Response with only a status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            resource_id: None,
            body: None,
            error: None,
        }
    }

    /// Attaches a decoded success body.
    pub fn with_body(mut self, body: T) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches the `Resource-Id` header value.
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Attaches a decoded service error message.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(ErrorBody {
            error: message.into(),
        });
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.error.as_str())
    }
}
