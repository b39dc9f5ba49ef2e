use reqwest::StatusCode;

use crate::client::WebhookApi;
use crate::domain::types::WebhookId;
use crate::domain::webhook::{NewWebhook, SubscriptionChanges, Webhook};
use crate::models::webhook::{
    CreateWebhookRequest, EventTypeListRequest, UpdateWebhookRequest, decode_webhook,
};
use crate::reconcile::{
    ReconcileResult, UpdatePlan, assert_status, created_resource_id, require_body,
    require_read_back,
};

/// Fetches a webhook and its subscription listing. A `404` on the direct
/// fetch is an ordinary not-found.
pub fn get_webhook_by_id<C: WebhookApi>(
    client: &C,
    id: &WebhookId,
) -> ReconcileResult<Option<Webhook>> {
    let response = client.get_webhook(id)?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    assert_status(&response, StatusCode::OK)?;
    let data = require_body(response, "webhook")?;

    let response = client.get_webhook_subscriptions(id)?;
    assert_status(&response, StatusCode::OK)?;
    let subscriptions = require_body(response, "webhook subscriptions")?;

    Ok(Some(decode_webhook(data, subscriptions)?))
}

/// Creates a webhook and returns the canonical record read back from the
/// service. The create endpoint never accepts event types; a non-empty
/// desired set is subscribed with a follow-up call before the read-back.
pub fn create_webhook<C: WebhookApi>(
    client: &C,
    desired: &NewWebhook,
) -> ReconcileResult<Webhook> {
    let response = client.create_webhook(&CreateWebhookRequest::from(desired))?;
    assert_status(&response, StatusCode::CREATED)?;
    let id = WebhookId::new(created_resource_id(&response, "webhook")?)?;

    if !desired.event_types.is_empty() {
        let tokens: Vec<_> = desired.event_types.iter().cloned().collect();
        let response = client.subscribe(&id, &EventTypeListRequest::new(&tokens))?;
        assert_status(&response, StatusCode::OK)?;
    }

    require_read_back(get_webhook_by_id(client, &id)?, "webhook", id.as_str())
}

/// Converges the webhook identified by `id` from `current` to `planned` and
/// returns the canonical record read back afterwards.
///
/// Event-type membership changes go through the two disjoint subscription
/// endpoints: removed tokens are unsubscribed first, then added tokens are
/// subscribed. Tokens on both sides are never touched.
pub fn update_webhook_by_id<C: WebhookApi>(
    client: &C,
    id: &WebhookId,
    current: &Webhook,
    planned: &NewWebhook,
) -> ReconcileResult<Webhook> {
    let changes = SubscriptionChanges::between(&current.event_types, &planned.event_types);

    let mut plan = UpdatePlan::new("webhook");
    plan.step_if(
        current.secret != planned.secret
            || current.url != planned.url
            || current.active != planned.active,
        "update",
        || {
            let response = client.update_webhook(id, &UpdateWebhookRequest::from(planned))?;
            assert_status(&response, StatusCode::OK)
        },
    );
    plan.step_if(!changes.unsubscribe.is_empty(), "unsubscribe", || {
        let response = client.unsubscribe(id, &EventTypeListRequest::new(&changes.unsubscribe))?;
        assert_status(&response, StatusCode::OK)
    });
    plan.step_if(!changes.subscribe.is_empty(), "subscribe", || {
        let response = client.subscribe(id, &EventTypeListRequest::new(&changes.subscribe))?;
        assert_status(&response, StatusCode::OK)
    });
    plan.run()?;

    require_read_back(get_webhook_by_id(client, id)?, "webhook", id.as_str())
}

/// Deletes the webhook. No verification read follows.
pub fn delete_webhook_by_id<C: WebhookApi>(client: &C, id: &WebhookId) -> ReconcileResult<()> {
    let response = client.delete_webhook(id)?;
    assert_status(&response, StatusCode::OK)
}
