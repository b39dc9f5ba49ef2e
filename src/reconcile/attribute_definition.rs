use reqwest::StatusCode;

use crate::client::AttributeDefinitionApi;
use crate::domain::attribute_definition::{
    AttributeDefinition, NewAttributeDefinition, restrictions_match,
};
use crate::domain::types::AttributeDefinitionId;
use crate::models::IdFilterRequest;
use crate::models::attribute_definition::{
    CreateAttributeDefinitionRequest, UpdateAttributeDefinitionMetadataRequest,
    UpdateAttributeDefinitionRequest,
};
use crate::reconcile::{
    ReconcileError, ReconcileResult, UpdatePlan, assert_status, created_resource_id,
    require_body, require_read_back, single_row,
};

/// Looks an attribute definition up through the filtered list endpoint.
pub fn get_attribute_definition_by_id<C: AttributeDefinitionApi>(
    client: &C,
    id: &AttributeDefinitionId,
) -> ReconcileResult<Option<AttributeDefinition>> {
    let response = client.find_attribute_definitions(&IdFilterRequest::id_in(id.as_str()))?;
    assert_status(&response, StatusCode::OK)?;
    let rows = require_body(response, "attribute definition")?.data;
    let Some(row) = single_row(rows)? else {
        return Ok(None);
    };
    Ok(Some(row.try_into()?))
}

/// Creates an attribute definition and returns the canonical record read
/// back from the service. The create endpoint rejects the free-text
/// description, so a present description is applied with a follow-up
/// metadata call before the read-back.
pub fn create_attribute_definition<C: AttributeDefinitionApi>(
    client: &C,
    desired: &NewAttributeDefinition,
) -> ReconcileResult<AttributeDefinition> {
    let response =
        client.create_attribute_definition(&CreateAttributeDefinitionRequest::from(desired))?;
    assert_status(&response, StatusCode::CREATED)?;
    let id =
        AttributeDefinitionId::new(created_resource_id(&response, "attribute definition")?)?;

    if desired.description.is_some() {
        let response = client.update_attribute_definition_metadata(
            &id,
            &UpdateAttributeDefinitionMetadataRequest {
                description: desired.description.clone(),
            },
        )?;
        assert_status(&response, StatusCode::OK)?;
    }

    require_read_back(
        get_attribute_definition_by_id(client, &id)?,
        "attribute definition",
        id.as_str(),
    )
}

/// Converges the attribute definition identified by `id` from `current` to
/// `planned` and returns the canonical record read back afterwards.
///
/// The data type is immutable on the remote side: a change is reported as
/// a replacement requirement before any call is issued. A change confined
/// to the description touches only the metadata endpoint.
pub fn update_attribute_definition_by_id<C: AttributeDefinitionApi>(
    client: &C,
    id: &AttributeDefinitionId,
    current: &AttributeDefinition,
    planned: &NewAttributeDefinition,
) -> ReconcileResult<AttributeDefinition> {
    if current.data_type != planned.data_type {
        return Err(ReconcileError::RequiresReplacement("data_type"));
    }

    let mut plan = UpdatePlan::new("attribute definition");
    plan.step_if(
        current.name != planned.name
            || current.number != planned.number
            || current.content_type != planned.content_type
            || current.character_set != planned.character_set
            || current.external_source != planned.external_source
            || current.internal != planned.internal
            || current.group_id != planned.group_id
            || current.unit != planned.unit
            || !restrictions_match(&current.restrictions, &planned.restrictions),
        "update",
        || {
            let response = client
                .update_attribute_definition(id, &UpdateAttributeDefinitionRequest::from(planned))?;
            assert_status(&response, StatusCode::OK)
        },
    );
    plan.step_if(
        current.description != planned.description,
        "update-metadata",
        || {
            let response = client.update_attribute_definition_metadata(
                id,
                &UpdateAttributeDefinitionMetadataRequest {
                    description: planned.description.clone(),
                },
            )?;
            assert_status(&response, StatusCode::OK)
        },
    );
    plan.run()?;

    require_read_back(
        get_attribute_definition_by_id(client, id)?,
        "attribute definition",
        id.as_str(),
    )
}

/// Deletes the attribute definition. The remote acknowledges with `202
/// Accepted` and finishes the removal asynchronously.
pub fn delete_attribute_definition_by_id<C: AttributeDefinitionApi>(
    client: &C,
    id: &AttributeDefinitionId,
) -> ReconcileResult<()> {
    let response = client.delete_attribute_definition(id)?;
    assert_status(&response, StatusCode::ACCEPTED)
}
