use reqwest::StatusCode;

use crate::client::CategoryApi;
use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::IdFilterRequest;
use crate::models::category::{
    CreateCategoryRequest, MoveCategoryRequest, UpdateCategoryMetadataRequest,
    UpdateCategoryRequest,
};
use crate::reconcile::{
    ReconcileResult, UpdatePlan, assert_status, created_resource_id, require_body,
    require_read_back, single_row,
};

/// Looks a category up through the filtered list endpoint. A legitimately
/// empty result is `Ok(None)`; more than one row for one id is an
/// invariant violation.
pub fn get_category_by_id<C: CategoryApi>(
    client: &C,
    id: &CategoryId,
) -> ReconcileResult<Option<Category>> {
    let response = client.find_categories(&IdFilterRequest::id_in(id.as_str()))?;
    assert_status(&response, StatusCode::OK)?;
    let rows = require_body(response, "category")?.data;
    let Some(row) = single_row(rows)? else {
        return Ok(None);
    };
    Ok(Some(row.try_into()?))
}

/// Creates a category and returns the canonical record read back from the
/// service. The create endpoint ignores the free-text description, so a
/// present description is applied with a follow-up metadata call before the
/// read-back.
pub fn create_category<C: CategoryApi>(
    client: &C,
    desired: &NewCategory,
) -> ReconcileResult<Category> {
    let response = client.create_category(&CreateCategoryRequest::from(desired))?;
    assert_status(&response, StatusCode::CREATED)?;
    let id = CategoryId::new(created_resource_id(&response, "category")?)?;

    if desired.description.is_some() {
        let response = client.update_category_metadata(
            &id,
            &UpdateCategoryMetadataRequest {
                description: desired.description.clone(),
            },
        )?;
        assert_status(&response, StatusCode::OK)?;
    }

    require_read_back(get_category_by_id(client, &id)?, "category", id.as_str())
}

/// Converges the category identified by `id` from `current` to `planned`
/// and returns the canonical record read back afterwards.
pub fn update_category_by_id<C: CategoryApi>(
    client: &C,
    id: &CategoryId,
    current: &Category,
    planned: &NewCategory,
) -> ReconcileResult<Category> {
    let mut plan = UpdatePlan::new("category");
    plan.step_if(
        current.name != planned.name
            || current.number != planned.number
            || current.context_id != planned.context_id,
        "update",
        || {
            let response = client.update_category(id, &UpdateCategoryRequest::from(planned))?;
            assert_status(&response, StatusCode::OK)
        },
    );
    plan.step_if(
        current.description != planned.description,
        "update-metadata",
        || {
            let response = client.update_category_metadata(
                id,
                &UpdateCategoryMetadataRequest {
                    description: planned.description.clone(),
                },
            )?;
            assert_status(&response, StatusCode::OK)
        },
    );
    plan.step_if(current.parent_id != planned.parent_id, "move", || {
        let response = client.move_category(
            id,
            &MoveCategoryRequest {
                parent_id: planned
                    .parent_id
                    .as_ref()
                    .map(|parent| parent.as_str().to_string()),
            },
        )?;
        assert_status(&response, StatusCode::NO_CONTENT)
    });
    plan.run()?;

    require_read_back(get_category_by_id(client, id)?, "category", id.as_str())
}

/// Deletes the category. No verification read follows.
pub fn delete_category_by_id<C: CategoryApi>(client: &C, id: &CategoryId) -> ReconcileResult<()> {
    let response = client.delete_category(id)?;
    assert_status(&response, StatusCode::NO_CONTENT)
}
