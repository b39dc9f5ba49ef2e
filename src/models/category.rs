use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryName, ContextId};
use crate::models::CodecError;

/// Row of the filtered category list response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub number: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub context_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CategoryListResponse {
    pub data: Vec<CategoryData>,
}

/// Create payload. Description is deliberately absent: the create endpoint
/// ignores it, so it is applied with a follow-up metadata call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

/// Main update payload: the fields the update endpoint accepts together.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub number: Option<String>,
    pub context_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryMetadataRequest {
    pub description: Option<String>,
}

/// Payload of the dedicated move endpoint. A null parent moves the category
/// to the root.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveCategoryRequest {
    pub parent_id: Option<String>,
}

impl TryFrom<CategoryData> for Category {
    type Error = CodecError;

    fn try_from(data: CategoryData) -> Result<Self, Self::Error> {
        let id = data.id.ok_or(CodecError::MissingField {
            entity: "category",
            field: "id",
        })?;
        let name = data.name.ok_or(CodecError::MissingField {
            entity: "category",
            field: "name",
        })?;
        Ok(Self {
            id: CategoryId::new(id)?,
            name: CategoryName::new(name)?,
            number: data.number,
            description: data.description,
            parent_id: data.parent_id.map(CategoryId::new).transpose()?,
            context_id: data.context_id.map(ContextId::new).transpose()?,
        })
    }
}

impl From<&NewCategory> for CreateCategoryRequest {
    fn from(desired: &NewCategory) -> Self {
        Self {
            name: desired.name.as_str().to_string(),
            number: desired.number.clone(),
            parent_id: desired.parent_id.as_ref().map(|id| id.as_str().to_string()),
            context_id: desired.context_id.as_ref().map(|id| id.as_str().to_string()),
        }
    }
}

impl From<&NewCategory> for UpdateCategoryRequest {
    fn from(planned: &NewCategory) -> Self {
        Self {
            name: planned.name.as_str().to_string(),
            number: planned.number.clone(),
            context_id: planned.context_id.as_ref().map(|id| id.as_str().to_string()),
        }
    }
}
