use reqwest::StatusCode;

use crate::client::ContextApi;
use crate::domain::context::{Context, NewContext};
use crate::domain::types::{ContextId, Locale};
use crate::models::context::{CreateContextRequest, UpdateContextRequest};
use crate::reconcile::{
    ReconcileError, ReconcileResult, UpdatePlan, assert_status, require_body, require_read_back,
    single_row,
};

/// Fetches a context directly by id. A `404` is an ordinary not-found;
/// archived contexts are gone from this layer's point of view.
pub fn get_context_by_id<C: ContextApi>(
    client: &C,
    id: &ContextId,
) -> ReconcileResult<Option<Context>> {
    let response = client.get_context(id)?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    assert_status(&response, StatusCode::OK)?;
    let data = require_body(response, "context")?;
    Ok(Some(data.try_into()?))
}

/// Creates a context and returns the canonical record read back from the
/// service.
///
/// The context create endpoint does not reliably return a `Resource-Id`
/// header; when it is absent the new context is located by scanning the
/// context listing for the desired locale.
pub fn create_context<C: ContextApi>(
    client: &C,
    desired: &NewContext,
) -> ReconcileResult<Context> {
    let response = client.create_context(&CreateContextRequest::from(desired))?;
    assert_status(&response, StatusCode::CREATED)?;

    let id = match response.resource_id() {
        Some(id) => ContextId::new(id)?,
        None => {
            log::warn!(
                "context create response carried no Resource-Id header, locating context by locale {}",
                desired.locale
            );
            find_context_id_by_locale(client, &desired.locale)?
        }
    };

    require_read_back(get_context_by_id(client, &id)?, "context", id.as_str())
}

fn find_context_id_by_locale<C: ContextApi>(
    client: &C,
    locale: &Locale,
) -> ReconcileResult<ContextId> {
    let response = client.find_contexts()?;
    assert_status(&response, StatusCode::OK)?;
    let rows = require_body(response, "context")?.data;
    let matches: Vec<_> = rows
        .into_iter()
        .filter(|row| row.locale.as_deref() == Some(locale.as_str()))
        .collect();
    match single_row(matches)? {
        Some(row) => {
            let id = row.id.ok_or(ReconcileError::MissingIdentifier {
                entity: "context",
            })?;
            Ok(ContextId::new(id)?)
        }
        None => Err(ReconcileError::MissingIdentifier { entity: "context" }),
    }
}

/// Converges the context identified by `id` from `current` to `planned` and
/// returns the canonical record read back afterwards.
pub fn update_context_by_id<C: ContextApi>(
    client: &C,
    id: &ContextId,
    current: &Context,
    planned: &NewContext,
) -> ReconcileResult<Context> {
    let mut plan = UpdatePlan::new("context");
    plan.step_if(
        current.name != planned.name
            || current.locale != planned.locale
            || current.fallback != planned.fallback,
        "update",
        || {
            let response = client.update_context(id, &UpdateContextRequest::from(planned))?;
            assert_status(&response, StatusCode::NO_CONTENT)
        },
    );
    plan.run()?;

    require_read_back(get_context_by_id(client, id)?, "context", id.as_str())
}

/// Archives the context. No verification read follows.
pub fn delete_context_by_id<C: ContextApi>(client: &C, id: &ContextId) -> ReconcileResult<()> {
    let response = client.archive_context(id)?;
    assert_status(&response, StatusCode::NO_CONTENT)
}
