use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::types::{EventType, WebhookId, WebhookSecret, WebhookUrl};
use crate::domain::webhook::{NewWebhook, Webhook};
use crate::models::CodecError;

/// Body of the direct webhook fetch.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    pub id: Option<String>,
    pub secret: Option<String>,
    pub url: Option<String>,
    pub active: Option<bool>,
}

/// Body of the subscription listing for one webhook.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionListResponse {
    #[serde(default)]
    pub event_types: Vec<String>,
}

/// Create payload. Event types are deliberately absent: the create endpoint
/// never accepts them, subscriptions are added with a follow-up call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    pub secret: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhookRequest {
    pub secret: String,
    pub url: String,
    pub active: bool,
}

/// Payload of the subscribe and unsubscribe endpoints.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeListRequest {
    pub event_types: Vec<String>,
}

impl EventTypeListRequest {
    pub fn new(tokens: &[EventType]) -> Self {
        Self {
            event_types: tokens.iter().map(|t| t.as_str().to_string()).collect(),
        }
    }
}

/// Combines the webhook body and its subscription listing into one record.
pub fn decode_webhook(
    data: WebhookData,
    subscriptions: SubscriptionListResponse,
) -> Result<Webhook, CodecError> {
    let id = data.id.ok_or(CodecError::MissingField {
        entity: "webhook",
        field: "id",
    })?;
    let secret = data.secret.ok_or(CodecError::MissingField {
        entity: "webhook",
        field: "secret",
    })?;
    let url = data.url.ok_or(CodecError::MissingField {
        entity: "webhook",
        field: "url",
    })?;
    let event_types = subscriptions
        .event_types
        .into_iter()
        .map(EventType::new)
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(Webhook {
        id: WebhookId::new(id)?,
        secret: WebhookSecret::new(secret)?,
        url: WebhookUrl::new(url)?,
        active: data.active.unwrap_or(false),
        event_types,
    })
}

impl From<&NewWebhook> for CreateWebhookRequest {
    fn from(desired: &NewWebhook) -> Self {
        Self {
            secret: desired.secret.as_str().to_string(),
            url: desired.url.as_str().to_string(),
            active: desired.active,
        }
    }
}

impl From<&NewWebhook> for UpdateWebhookRequest {
    fn from(planned: &NewWebhook) -> Self {
        Self {
            secret: planned.secret.as_str().to_string(),
            url: planned.url.as_str().to_string(),
            active: planned.active,
        }
    }
}
