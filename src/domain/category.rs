use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, ContextId};

/// Canonical category record as read back from the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    /// Alternate human-readable identifier.
    pub number: Option<String>,
    pub description: Option<String>,
    /// `None` means the category sits at the root of the tree.
    pub parent_id: Option<CategoryId>,
    pub context_id: Option<ContextId>,
}

/// Desired state for a [`Category`] before the server has assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub number: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub context_id: Option<ContextId>,
}

impl NewCategory {
    /// Desired state equivalent to an already-applied record, used as the
    /// planned side of a no-op update.
    pub fn from_record(record: &Category) -> Self {
        Self {
            name: record.name.clone(),
            number: record.number.clone(),
            description: record.description.clone(),
            parent_id: record.parent_id.clone(),
            context_id: record.context_id.clone(),
        }
    }
}
