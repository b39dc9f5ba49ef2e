use serde::{Deserialize, Serialize};

use crate::domain::types::{ContextId, ContextName, Locale};

/// Canonical localization context record as read back from the remote
/// service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Context {
    pub id: ContextId,
    pub name: ContextName,
    pub locale: Locale,
    /// Weak reference to another context; deleting the target is the remote
    /// service's concern, not this layer's.
    pub fallback: Option<ContextId>,
}

/// Desired state for a [`Context`] before the server has assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContext {
    pub name: ContextName,
    pub locale: Locale,
    pub fallback: Option<ContextId>,
}

impl NewContext {
    /// Desired state equivalent to an already-applied record.
    pub fn from_record(record: &Context) -> Self {
        Self {
            name: record.name.clone(),
            locale: record.locale.clone(),
            fallback: record.fallback.clone(),
        }
    }
}
