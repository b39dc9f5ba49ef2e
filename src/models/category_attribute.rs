use serde::{Deserialize, Serialize};

use crate::domain::category_attribute::{CategoryAttribute, CategoryAttributeKey};

/// Row of the "attributes attached to a category" list response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttributeData {
    pub attribute_definition_id: Option<String>,
    /// Identifier of the category the attribute was assigned on; inherited
    /// assignments carry an ancestor's id here.
    pub assigned_on: Option<String>,
    /// Identifier of the category the mandatory flag was set on, if any.
    pub mandatory_set_on: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NodeAttributeListResponse {
    pub data: Vec<NodeAttributeData>,
}

/// The assign endpoint takes an empty body; flags are set afterwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct AssignAttributeRequest {}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdateNodeAttributeRequest {
    pub mandatory: bool,
}

impl NodeAttributeData {
    /// Whether this row is the direct assignment for `key` (as opposed to an
    /// assignment inherited from an ancestor category).
    pub fn matches(&self, key: &CategoryAttributeKey) -> bool {
        self.attribute_definition_id.as_deref() == Some(key.attribute_definition_id.as_str())
            && self.assigned_on.as_deref() == Some(key.category_id.as_str())
    }

    /// Decodes the row into a link record for `key`. The mandatory flag is
    /// set only when it was set on this category itself.
    pub fn into_record(self, key: &CategoryAttributeKey) -> CategoryAttribute {
        let mandatory = self.mandatory_set_on.as_deref() == Some(key.category_id.as_str());
        CategoryAttribute {
            category_id: key.category_id.clone(),
            attribute_definition_id: key.attribute_definition_id.clone(),
            mandatory,
        }
    }
}
