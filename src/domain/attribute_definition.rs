use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::domain::types::{
    AttributeDefinitionId, AttributeName, GroupId, TypeConstraintError,
};

/// Data type of an attribute definition. Immutable once the definition is
/// created; the remote service requires a full recreation to change it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Boolean,
    Integer,
    Decimal,
    Date,
    Time,
    DateTime,
    Location,
    SingleSelect,
    MultiSelect,
    Text,
    FormattedText,
    Pattern,
    Multiline,
}

impl DataType {
    /// String token used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
            Self::Location => "location",
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
            Self::Text => "text",
            Self::FormattedText => "formatted_text",
            Self::Pattern => "pattern",
            Self::Multiline => "multiline",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "decimal" => Ok(Self::Decimal),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "date_time" => Ok(Self::DateTime),
            "location" => Ok(Self::Location),
            "single_select" => Ok(Self::SingleSelect),
            "multi_select" => Ok(Self::MultiSelect),
            "text" => Ok(Self::Text),
            "formatted_text" => Ok(Self::FormattedText),
            "pattern" => Ok(Self::Pattern),
            "multiline" => Ok(Self::Multiline),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown data type `{other}`"
            ))),
        }
    }
}

/// Rendering style of an enum restriction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EnumKind {
    Text,
    Color,
}

impl EnumKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Color => "color",
        }
    }
}

impl FromStr for EnumKind {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "color" => Ok(Self::Color),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown enum restriction type `{other}`"
            ))),
        }
    }
}

/// One selectable value of an enum restriction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumValue {
    pub metadata: Option<String>,
    pub number: Option<String>,
    pub value: String,
    /// Assigned by the server; absent on desired records.
    pub value_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumRestriction {
    pub kind: EnumKind,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeRestriction {
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextRestriction {
    pub max_length: Option<i32>,
    pub pattern: Option<String>,
    pub whitespaces: Option<bool>,
}

/// Constraint sub-structure of an attribute definition. A definition carries
/// at most one restriction; "no restriction" is `Option::None` on the record,
/// never an empty branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    Enum(EnumRestriction),
    Range(RangeRestriction),
    Text(TextRestriction),
}

impl Restriction {
    /// Structural comparison ignoring server-assigned enum value ids.
    pub fn same_shape(&self, other: &Restriction) -> bool {
        match (self, other) {
            (Restriction::Enum(a), Restriction::Enum(b)) => {
                a.kind == b.kind
                    && a.values.len() == b.values.len()
                    && a.values.iter().zip(&b.values).all(|(x, y)| {
                        x.metadata == y.metadata && x.number == y.number && x.value == y.value
                    })
            }
            (Restriction::Range(a), Restriction::Range(b)) => a == b,
            (Restriction::Text(a), Restriction::Text(b)) => a == b,
            _ => false,
        }
    }
}

/// Comparison helper for the optional restriction slot of two records.
pub fn restrictions_match(a: &Option<Restriction>, b: &Option<Restriction>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same_shape(b),
        _ => false,
    }
}

/// Canonical attribute definition record as read back from the remote
/// service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub id: AttributeDefinitionId,
    pub name: AttributeName,
    pub number: Option<String>,
    pub description: Option<String>,
    pub data_type: DataType,
    pub content_type: Option<String>,
    pub character_set: Option<String>,
    pub external_source: bool,
    pub internal: bool,
    pub group_id: Option<GroupId>,
    pub unit: Option<String>,
    pub restrictions: Option<Restriction>,
}

/// Desired state for an [`AttributeDefinition`] before the server has
/// assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAttributeDefinition {
    pub name: AttributeName,
    pub number: Option<String>,
    pub description: Option<String>,
    pub data_type: DataType,
    pub content_type: Option<String>,
    pub character_set: Option<String>,
    pub external_source: bool,
    pub internal: bool,
    pub group_id: Option<GroupId>,
    pub unit: Option<String>,
    pub restrictions: Option<Restriction>,
}

impl NewAttributeDefinition {
    /// Desired state equivalent to an already-applied record.
    pub fn from_record(record: &AttributeDefinition) -> Self {
        Self {
            name: record.name.clone(),
            number: record.number.clone(),
            description: record.description.clone(),
            data_type: record.data_type,
            content_type: record.content_type.clone(),
            character_set: record.character_set.clone(),
            external_source: record.external_source,
            internal: record.internal,
            group_id: record.group_id.clone(),
            unit: record.unit.clone(),
            restrictions: record.restrictions.clone(),
        }
    }
}
