use serde::{Deserialize, Serialize};

use crate::domain::attribute_definition::{
    AttributeDefinition, EnumRestriction, EnumValue, NewAttributeDefinition, RangeRestriction,
    Restriction, TextRestriction,
};
use crate::domain::types::{AttributeDefinitionId, AttributeName, GroupId};
use crate::models::CodecError;

/// Row of the filtered attribute definition list response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinitionData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub number: Option<String>,
    pub description: Option<String>,
    pub data_type: Option<String>,
    pub content_type: Option<String>,
    pub character_set: Option<String>,
    pub external_source: Option<bool>,
    pub internal: Option<bool>,
    pub group_id: Option<String>,
    pub unit: Option<String>,
    pub restrictions: Option<RestrictionsData>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AttributeDefinitionListResponse {
    pub data: Vec<AttributeDefinitionData>,
}

/// Wire shape of the restriction union: the service populates at most one
/// branch. Payloads with several branches are rejected by the codec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RestrictionsData {
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<EnumRestrictionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeRestrictionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextRestrictionData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnumRestrictionData {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub values: Vec<EnumValueData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RangeRestrictionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextRestrictionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitespaces: Option<bool>,
}

/// Create payload. Description is deliberately absent: the create endpoint
/// rejects it, so it is applied with a follow-up metadata call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttributeDefinitionRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<String>,
    pub external_source: bool,
    pub internal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<RestrictionsData>,
}

/// Main update payload: every mutable field except the description, which
/// has its own metadata endpoint, and the data type, which is immutable.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttributeDefinitionRequest {
    pub name: String,
    pub number: Option<String>,
    pub content_type: Option<String>,
    pub character_set: Option<String>,
    pub external_source: bool,
    pub internal: bool,
    pub group_id: Option<String>,
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<RestrictionsData>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttributeDefinitionMetadataRequest {
    pub description: Option<String>,
}

impl TryFrom<RestrictionsData> for Restriction {
    type Error = CodecError;

    fn try_from(data: RestrictionsData) -> Result<Self, Self::Error> {
        let populated = usize::from(data.enumeration.is_some())
            + usize::from(data.range.is_some())
            + usize::from(data.text.is_some());
        if populated > 1 {
            return Err(CodecError::ConflictingRestrictions);
        }

        if let Some(enumeration) = data.enumeration {
            let kind = enumeration.kind.as_deref().unwrap_or("text").parse()?;
            let values = enumeration
                .values
                .into_iter()
                .map(|v| EnumValue {
                    metadata: v.metadata,
                    number: v.number,
                    value: v.value,
                    value_id: v.value_id,
                })
                .collect();
            return Ok(Restriction::Enum(EnumRestriction { kind, values }));
        }
        if let Some(range) = data.range {
            return Ok(Restriction::Range(RangeRestriction {
                min: range.min,
                max: range.max,
                step: range.step,
            }));
        }
        if let Some(text) = data.text {
            return Ok(Restriction::Text(TextRestriction {
                max_length: text.max_length,
                pattern: text.pattern,
                whitespaces: text.whitespaces,
            }));
        }
        Err(CodecError::MissingField {
            entity: "restrictions",
            field: "enum|range|text",
        })
    }
}

impl From<&Restriction> for RestrictionsData {
    fn from(restriction: &Restriction) -> Self {
        match restriction {
            Restriction::Enum(e) => RestrictionsData {
                enumeration: Some(EnumRestrictionData {
                    kind: Some(e.kind.as_str().to_string()),
                    values: e
                        .values
                        .iter()
                        .map(|v| EnumValueData {
                            metadata: v.metadata.clone(),
                            number: v.number.clone(),
                            value: v.value.clone(),
                            value_id: v.value_id.clone(),
                        })
                        .collect(),
                }),
                ..Default::default()
            },
            Restriction::Range(r) => RestrictionsData {
                range: Some(RangeRestrictionData {
                    min: r.min.clone(),
                    max: r.max.clone(),
                    step: r.step.clone(),
                }),
                ..Default::default()
            },
            Restriction::Text(t) => RestrictionsData {
                text: Some(TextRestrictionData {
                    max_length: t.max_length,
                    pattern: t.pattern.clone(),
                    whitespaces: t.whitespaces,
                }),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<AttributeDefinitionData> for AttributeDefinition {
    type Error = CodecError;

    fn try_from(data: AttributeDefinitionData) -> Result<Self, Self::Error> {
        let id = data.id.ok_or(CodecError::MissingField {
            entity: "attribute definition",
            field: "id",
        })?;
        let name = data.name.ok_or(CodecError::MissingField {
            entity: "attribute definition",
            field: "name",
        })?;
        let data_type = data.data_type.ok_or(CodecError::MissingField {
            entity: "attribute definition",
            field: "dataType",
        })?;
        Ok(Self {
            id: AttributeDefinitionId::new(id)?,
            name: AttributeName::new(name)?,
            number: data.number,
            description: data.description,
            data_type: data_type.parse()?,
            content_type: data.content_type,
            character_set: data.character_set,
            external_source: data.external_source.unwrap_or(false),
            internal: data.internal.unwrap_or(false),
            group_id: data.group_id.map(GroupId::new).transpose()?,
            unit: data.unit,
            restrictions: data.restrictions.map(Restriction::try_from).transpose()?,
        })
    }
}

impl From<&NewAttributeDefinition> for CreateAttributeDefinitionRequest {
    fn from(desired: &NewAttributeDefinition) -> Self {
        Self {
            name: desired.name.as_str().to_string(),
            number: desired.number.clone(),
            data_type: desired.data_type.as_str().to_string(),
            content_type: desired.content_type.clone(),
            character_set: desired.character_set.clone(),
            external_source: desired.external_source,
            internal: desired.internal,
            group_id: desired.group_id.as_ref().map(|id| id.as_str().to_string()),
            unit: desired.unit.clone(),
            restrictions: desired.restrictions.as_ref().map(RestrictionsData::from),
        }
    }
}

impl From<&NewAttributeDefinition> for UpdateAttributeDefinitionRequest {
    fn from(planned: &NewAttributeDefinition) -> Self {
        Self {
            name: planned.name.as_str().to_string(),
            number: planned.number.clone(),
            content_type: planned.content_type.clone(),
            character_set: planned.character_set.clone(),
            external_source: planned.external_source,
            internal: planned.internal,
            group_id: planned.group_id.as_ref().map(|id| id.as_str().to_string()),
            unit: planned.unit.clone(),
            restrictions: planned.restrictions.as_ref().map(RestrictionsData::from),
        }
    }
}
