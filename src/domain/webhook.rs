use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::types::{EventType, WebhookId, WebhookSecret, WebhookUrl};

/// Canonical webhook record as read back from the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Webhook {
    pub id: WebhookId,
    pub secret: WebhookSecret,
    pub url: WebhookUrl,
    pub active: bool,
    pub event_types: BTreeSet<EventType>,
}

/// Desired state for a [`Webhook`] before the server has assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewWebhook {
    pub secret: WebhookSecret,
    pub url: WebhookUrl,
    pub active: bool,
    pub event_types: BTreeSet<EventType>,
}

impl NewWebhook {
    /// Desired state equivalent to an already-applied record.
    pub fn from_record(record: &Webhook) -> Self {
        Self {
            secret: record.secret.clone(),
            url: record.url.clone(),
            active: record.active,
            event_types: record.event_types.clone(),
        }
    }
}

/// Set difference between the applied and desired event-type subscriptions.
///
/// Tokens present on both sides are never touched. Unsubscribing must run
/// before subscribing so a token that is simultaneously removed and re-added
/// is not mistaken for already covered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionChanges {
    pub unsubscribe: Vec<EventType>,
    pub subscribe: Vec<EventType>,
}

impl SubscriptionChanges {
    /// Computes the two disjoint change sets between `current` and `planned`.
    pub fn between(current: &BTreeSet<EventType>, planned: &BTreeSet<EventType>) -> Self {
        Self {
            unsubscribe: current.difference(planned).cloned().collect(),
            subscribe: planned.difference(current).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.unsubscribe.is_empty() && self.subscribe.is_empty()
    }
}
