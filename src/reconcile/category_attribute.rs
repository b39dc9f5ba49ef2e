use reqwest::StatusCode;

use crate::client::CategoryAttributeApi;
use crate::domain::category_attribute::{CategoryAttribute, CategoryAttributeKey};
use crate::models::category_attribute::{AssignAttributeRequest, UpdateNodeAttributeRequest};
use crate::reconcile::{
    ReconcileResult, UpdatePlan, assert_status, require_body, require_read_back, single_row,
};

/// Looks the link up by scanning the category's attribute listing for the
/// direct assignment matching `key`. Inherited assignments are skipped; an
/// absent row is `Ok(None)`.
pub fn get_category_attribute<C: CategoryAttributeApi>(
    client: &C,
    key: &CategoryAttributeKey,
) -> ReconcileResult<Option<CategoryAttribute>> {
    let response = client.list_category_attributes(&key.category_id)?;
    assert_status(&response, StatusCode::OK)?;
    let rows = require_body(response, "category attribute")?.data;
    let matches: Vec<_> = rows.into_iter().filter(|row| row.matches(key)).collect();
    let Some(row) = single_row(matches)? else {
        return Ok(None);
    };
    Ok(Some(row.into_record(key)))
}

/// Assigns the attribute definition to the category and returns the
/// canonical link read back from the service. The assign endpoint accepts
/// no flags, so a desired `mandatory` is applied with a follow-up update
/// call before the read-back.
pub fn assign_category_attribute<C: CategoryAttributeApi>(
    client: &C,
    desired: &CategoryAttribute,
) -> ReconcileResult<CategoryAttribute> {
    let response = client.assign_attribute(
        &desired.category_id,
        &desired.attribute_definition_id,
        &AssignAttributeRequest::default(),
    )?;
    assert_status(&response, StatusCode::ACCEPTED)?;

    if desired.mandatory {
        let response = client.update_category_attribute(
            &desired.category_id,
            &desired.attribute_definition_id,
            &UpdateNodeAttributeRequest { mandatory: true },
        )?;
        assert_status(&response, StatusCode::ACCEPTED)?;
    }

    let key = desired.key();
    require_read_back(
        get_category_attribute(client, &key)?,
        "category attribute",
        key.attribute_definition_id.as_str(),
    )
}

/// Converges the link from `current` to `planned` and returns the canonical
/// link read back afterwards.
pub fn update_category_attribute<C: CategoryAttributeApi>(
    client: &C,
    current: &CategoryAttribute,
    planned: &CategoryAttribute,
) -> ReconcileResult<CategoryAttribute> {
    let mut plan = UpdatePlan::new("category attribute");
    plan.step_if(current.mandatory != planned.mandatory, "update", || {
        let response = client.update_category_attribute(
            &current.category_id,
            &current.attribute_definition_id,
            &UpdateNodeAttributeRequest {
                mandatory: planned.mandatory,
            },
        )?;
        assert_status(&response, StatusCode::ACCEPTED)
    });
    plan.run()?;

    let key = current.key();
    require_read_back(
        get_category_attribute(client, &key)?,
        "category attribute",
        key.attribute_definition_id.as_str(),
    )
}

/// Removes the attribute definition from the category.
pub fn unassign_category_attribute<C: CategoryAttributeApi>(
    client: &C,
    key: &CategoryAttributeKey,
) -> ReconcileResult<()> {
    let response = client.unassign_attribute(&key.category_id, &key.attribute_definition_id)?;
    assert_status(&response, StatusCode::NO_CONTENT)
}
