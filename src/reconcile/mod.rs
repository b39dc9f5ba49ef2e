//! Reconciliation engine: per-entity Create/Read/Update/Delete orchestration
//! against the remote service.
//!
//! Every operation routes each remote response through [`assert_status`]
//! before trusting it, and every record it returns is obtained by reading
//! the remote state back, never synthesized from a write response.
//! Multi-step operations run strictly in order and are not transactional:
//! when a step fails, earlier steps have already taken effect remotely and
//! are left standing for the next reconciliation pass to observe.

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::{ApiResponse, ClientError};
use crate::models::CodecError;

pub mod attribute_definition;
pub mod category;
pub mod category_attribute;
pub mod context;
pub mod webhook;

/// Errors raised by reconciler operations. All are terminal for the
/// operation that raised them; nothing is retried internally.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Network or serialization failure before a usable status code existed.
    #[error("transport failure: {0}")]
    Transport(#[from] ClientError),
    /// The service rejected the call and supplied its own message.
    #[error("remote error (status {status}): {message}")]
    Remote { status: u16, message: String },
    /// The remote answered with an undocumented status.
    #[error("unexpected status: expected {expected}, got {actual}")]
    UnexpectedStatus { expected: u16, actual: u16 },
    /// A query that must match at most one row matched several.
    #[error("expected at most {expected} matching rows, got {actual}")]
    AmbiguousResult { expected: usize, actual: usize },
    /// A create response carried no usable identifier for the new entity.
    #[error("create response for {entity} carried no usable identifier")]
    MissingIdentifier { entity: &'static str },
    /// A response whose status promises a body had none.
    #[error("{entity} response had no decodable body")]
    MissingBody { entity: &'static str },
    /// An entity that was just written could not be read back.
    #[error("{entity} {id} was not visible on read-back")]
    ReadBackMissing { entity: &'static str, id: String },
    /// The requested change cannot be expressed as an update; the entity
    /// must be deleted and recreated.
    #[error("changing `{0}` requires replacing the entity")]
    RequiresReplacement(&'static str),
    /// A wire payload did not match the expected shape.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Convenient alias for results returned from reconciler operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Classifies a remote response against the endpoint's documented status.
///
/// On a client error (400-499) with a decodable error body, the returned
/// error carries the service's own message; any other mismatch yields the
/// expected/actual pair.
pub fn assert_status<T>(response: &ApiResponse<T>, expected: StatusCode) -> ReconcileResult<()> {
    if response.status() == expected {
        return Ok(());
    }
    if response.status().is_client_error() {
        if let Some(message) = response.error_message() {
            return Err(ReconcileError::Remote {
                status: response.status().as_u16(),
                message: message.to_string(),
            });
        }
    }
    Err(ReconcileError::UnexpectedStatus {
        expected: expected.as_u16(),
        actual: response.status().as_u16(),
    })
}

/// Resolves a filtered list result that must contain at most one row.
pub(crate) fn single_row<T>(mut rows: Vec<T>) -> ReconcileResult<Option<T>> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        n => Err(ReconcileError::AmbiguousResult {
            expected: 1,
            actual: n,
        }),
    }
}

/// Extracts the identifier of a freshly created entity from the
/// `Resource-Id` response header.
pub(crate) fn created_resource_id<T>(
    response: &ApiResponse<T>,
    entity: &'static str,
) -> ReconcileResult<String> {
    response
        .resource_id()
        .map(str::to_owned)
        .ok_or(ReconcileError::MissingIdentifier { entity })
}

/// Unwraps the decoded body of a response already classified as successful.
pub(crate) fn require_body<T>(
    response: ApiResponse<T>,
    entity: &'static str,
) -> ReconcileResult<T> {
    response
        .into_body()
        .ok_or(ReconcileError::MissingBody { entity })
}

/// Unwraps the read-back of an entity that was just written.
pub(crate) fn require_read_back<T>(
    record: Option<T>,
    entity: &'static str,
    id: &str,
) -> ReconcileResult<T> {
    record.ok_or_else(|| ReconcileError::ReadBackMissing {
        entity,
        id: id.to_string(),
    })
}

type PlanStep<'a> = (&'static str, Box<dyn FnOnce() -> ReconcileResult<()> + 'a>);

/// Ordered list of the narrow remote calls one update needs.
///
/// Each entity contributes its per-field rules as (changed?, endpoint, call)
/// entries; unchanged fields add no step, and an empty plan skips the remote
/// side entirely. Steps execute strictly in insertion order, each classified
/// independently by its own call.
pub(crate) struct UpdatePlan<'a> {
    entity: &'static str,
    steps: Vec<PlanStep<'a>>,
}

impl<'a> UpdatePlan<'a> {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            steps: Vec::new(),
        }
    }

    /// Adds a step when the guarding field comparison detected a change.
    pub fn step_if<F>(&mut self, changed: bool, endpoint: &'static str, run: F)
    where
        F: FnOnce() -> ReconcileResult<()> + 'a,
    {
        if changed {
            self.steps.push((endpoint, Box::new(run)));
        }
    }

    /// Executes the planned calls, returning how many ran.
    pub fn run(self) -> ReconcileResult<usize> {
        if self.steps.is_empty() {
            log::debug!("{}: no fields changed, skipping remote update", self.entity);
            return Ok(0);
        }
        let total = self.steps.len();
        for (endpoint, run) in self.steps {
            log::debug!("{}: applying {}", self.entity, endpoint);
            run()?;
        }
        Ok(total)
    }
}
