//! Wire representation of the remote PIM API.
//!
//! Each entity module defines the serde request/response payloads for its
//! endpoints together with the codec between wire structs and domain
//! records. Decoding is total: absent or null wire fields map to `None`,
//! never to a zero value.

use serde::Serialize;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

pub mod attribute_definition;
pub mod category;
pub mod category_attribute;
pub mod config;
pub mod context;
pub mod webhook;

/// Errors raised while converting between wire payloads and domain records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A field the domain record requires was absent from the payload.
    #[error("{entity} payload is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// A wire value violated a domain type constraint.
    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
    /// A restrictions payload populated more than one branch of the union.
    #[error("restrictions payload populates more than one branch")]
    ConflictingRestrictions,
}

/// Filter request selecting entities by identifier, shared by the filtered
/// list endpoints.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdFilterRequest {
    pub filters: Vec<IdFilter>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub values: Vec<String>,
}

impl IdFilterRequest {
    /// Filter matching exactly the given identifier (`ID_IN`).
    pub fn id_in(id: &str) -> Self {
        Self {
            filters: vec![IdFilter {
                kind: "ID_IN".to_string(),
                values: vec![id.to_string()],
            }],
        }
    }
}
