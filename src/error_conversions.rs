//! Error conversion glue between layers.
//!
//! Domain constraint failures surface from codecs and reconcilers alike;
//! these conversions let `?` route them into the layer error types without
//! the domain depending on either.

use crate::domain::types::TypeConstraintError;
use crate::models::CodecError;
use crate::reconcile::ReconcileError;

impl From<TypeConstraintError> for ReconcileError {
    fn from(value: TypeConstraintError) -> Self {
        ReconcileError::Codec(CodecError::Constraint(value))
    }
}
