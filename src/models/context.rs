use serde::{Deserialize, Serialize};

use crate::domain::context::{Context, NewContext};
use crate::domain::types::{ContextId, ContextName, Locale};
use crate::models::CodecError;

/// Body of the direct context fetch and row of the context listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContextData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub locale: Option<String>,
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContextListResponse {
    pub data: Vec<ContextData>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateContextRequest {
    pub name: String,
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContextRequest {
    pub name: String,
    pub locale: String,
    pub fallback: Option<String>,
}

impl TryFrom<ContextData> for Context {
    type Error = CodecError;

    fn try_from(data: ContextData) -> Result<Self, Self::Error> {
        let id = data.id.ok_or(CodecError::MissingField {
            entity: "context",
            field: "id",
        })?;
        let name = data.name.ok_or(CodecError::MissingField {
            entity: "context",
            field: "name",
        })?;
        let locale = data.locale.ok_or(CodecError::MissingField {
            entity: "context",
            field: "locale",
        })?;
        Ok(Self {
            id: ContextId::new(id)?,
            name: ContextName::new(name)?,
            locale: Locale::new(locale)?,
            fallback: data.fallback.map(ContextId::new).transpose()?,
        })
    }
}

impl From<&NewContext> for CreateContextRequest {
    fn from(desired: &NewContext) -> Self {
        Self {
            name: desired.name.as_str().to_string(),
            locale: desired.locale.as_str().to_string(),
            fallback: desired.fallback.as_ref().map(|id| id.as_str().to_string()),
        }
    }
}

impl From<&NewContext> for UpdateContextRequest {
    fn from(planned: &NewContext) -> Self {
        Self {
            name: planned.name.as_str().to_string(),
            locale: planned.locale.as_str().to_string(),
            fallback: planned.fallback.as_ref().map(|id| id.as_str().to_string()),
        }
    }
}
