use serde::{Deserialize, Serialize};

use crate::domain::types::{AttributeDefinitionId, CategoryId};

/// Composite identity of a category-attribute link. The link has no
/// server-assigned id of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CategoryAttributeKey {
    pub category_id: CategoryId,
    pub attribute_definition_id: AttributeDefinitionId,
}

/// Assignment of an attribute definition to a category. `mandatory` marks
/// whether the attribute is required specifically on that category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryAttribute {
    pub category_id: CategoryId,
    pub attribute_definition_id: AttributeDefinitionId,
    pub mandatory: bool,
}

impl CategoryAttribute {
    /// The composite key identifying this link.
    pub fn key(&self) -> CategoryAttributeKey {
        CategoryAttributeKey {
            category_id: self.category_id.clone(),
            attribute_definition_id: self.attribute_definition_id.clone(),
        }
    }
}
