//! Helpers for integration tests.
//!
//! `FakePim` is a stateful in-memory stand-in for the remote service. It
//! stores entities, assigns deterministic identifiers, honours the
//! `Resource-Id` header contract (including the context-create gap) and
//! records every endpoint hit so tests can assert which calls ran.

use std::cell::RefCell;
use std::collections::BTreeSet;

use reqwest::StatusCode;

use pim_sync::client::{
    ApiResponse, AttributeDefinitionApi, CategoryApi, CategoryAttributeApi, ClientResult,
    ContextApi, WebhookApi,
};
use pim_sync::domain::types::{AttributeDefinitionId, CategoryId, ContextId, WebhookId};
use pim_sync::models::IdFilterRequest;
use pim_sync::models::attribute_definition::{
    AttributeDefinitionData, AttributeDefinitionListResponse, CreateAttributeDefinitionRequest,
    RestrictionsData, UpdateAttributeDefinitionMetadataRequest, UpdateAttributeDefinitionRequest,
};
use pim_sync::models::category::{
    CategoryData, CategoryListResponse, CreateCategoryRequest, MoveCategoryRequest,
    UpdateCategoryMetadataRequest, UpdateCategoryRequest,
};
use pim_sync::models::category_attribute::{
    AssignAttributeRequest, NodeAttributeData, NodeAttributeListResponse,
    UpdateNodeAttributeRequest,
};
use pim_sync::models::context::{
    ContextData, ContextListResponse, CreateContextRequest, UpdateContextRequest,
};
use pim_sync::models::webhook::{
    CreateWebhookRequest, EventTypeListRequest, SubscriptionListResponse, UpdateWebhookRequest,
    WebhookData,
};

#[derive(Clone)]
struct StoredCategory {
    id: String,
    name: String,
    number: Option<String>,
    description: Option<String>,
    parent_id: Option<String>,
    context_id: Option<String>,
}

#[derive(Clone)]
struct StoredAttribute {
    id: String,
    name: String,
    number: Option<String>,
    description: Option<String>,
    data_type: String,
    content_type: Option<String>,
    character_set: Option<String>,
    external_source: bool,
    internal: bool,
    group_id: Option<String>,
    unit: Option<String>,
    restrictions: Option<RestrictionsData>,
}

#[derive(Clone)]
struct StoredLink {
    category_id: String,
    attribute_id: String,
    mandatory: bool,
}

#[derive(Clone)]
struct StoredWebhook {
    id: String,
    secret: String,
    url: String,
    active: bool,
    event_types: BTreeSet<String>,
}

#[derive(Clone)]
struct StoredContext {
    id: String,
    name: String,
    locale: String,
    fallback: Option<String>,
}

/// In-memory remote service shared by the integration tests.
#[derive(Default)]
pub struct FakePim {
    next_id: RefCell<u32>,
    categories: RefCell<Vec<StoredCategory>>,
    attributes: RefCell<Vec<StoredAttribute>>,
    links: RefCell<Vec<StoredLink>>,
    webhooks: RefCell<Vec<StoredWebhook>>,
    contexts: RefCell<Vec<StoredContext>>,
    calls: RefCell<Vec<&'static str>>,
    fail_once: RefCell<Option<&'static str>>,
}

impl FakePim {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self::default()
    }

    /// Every endpoint hit so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    /// Makes the next hit on `endpoint` answer with a server error.
    pub fn fail_next(&self, endpoint: &'static str) {
        *self.fail_once.borrow_mut() = Some(endpoint);
    }

    fn alloc(&self, prefix: &str) -> String {
        let mut next = self.next_id.borrow_mut();
        *next += 1;
        format!("{prefix}-{next}")
    }

    /// Records the call and returns an injected failure when armed.
    fn enter<T>(&self, endpoint: &'static str) -> Option<ApiResponse<T>> {
        self.calls.borrow_mut().push(endpoint);
        let mut fail = self.fail_once.borrow_mut();
        if *fail == Some(endpoint) {
            *fail = None;
            return Some(ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR));
        }
        None
    }

    fn filtered_id(filter: &IdFilterRequest) -> Option<&str> {
        filter
            .filters
            .first()
            .and_then(|f| f.values.first())
            .map(String::as_str)
    }

    /// Simulates the server assigning identifiers to enum restriction
    /// values.
    fn assign_value_ids(&self, restrictions: &mut Option<RestrictionsData>) {
        if let Some(data) = restrictions {
            if let Some(enumeration) = &mut data.enumeration {
                for value in &mut enumeration.values {
                    if value.value_id.is_none() {
                        value.value_id = Some(self.alloc("val"));
                    }
                }
            }
        }
    }
}

impl CategoryApi for FakePim {
    fn find_categories(
        &self,
        filter: &IdFilterRequest,
    ) -> ClientResult<ApiResponse<CategoryListResponse>> {
        if let Some(response) = self.enter("find_categories") {
            return Ok(response);
        }
        let id = Self::filtered_id(filter);
        let data = self
            .categories
            .borrow()
            .iter()
            .filter(|c| id == Some(c.id.as_str()))
            .map(|c| CategoryData {
                id: Some(c.id.clone()),
                name: Some(c.name.clone()),
                number: c.number.clone(),
                description: c.description.clone(),
                parent_id: c.parent_id.clone(),
                context_id: c.context_id.clone(),
            })
            .collect();
        Ok(ApiResponse::new(StatusCode::OK).with_body(CategoryListResponse { data }))
    }

    fn create_category(&self, request: &CreateCategoryRequest) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("create_category") {
            return Ok(response);
        }
        let id = self.alloc("cat");
        self.categories.borrow_mut().push(StoredCategory {
            id: id.clone(),
            name: request.name.clone(),
            number: request.number.clone(),
            description: None,
            parent_id: request.parent_id.clone(),
            context_id: request.context_id.clone(),
        });
        Ok(ApiResponse::new(StatusCode::CREATED).with_resource_id(id))
    }

    fn update_category(
        &self,
        id: &CategoryId,
        request: &UpdateCategoryRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("update_category") {
            return Ok(response);
        }
        let mut categories = self.categories.borrow_mut();
        match categories.iter_mut().find(|c| c.id == id.as_str()) {
            Some(category) => {
                category.name = request.name.clone();
                category.number = request.number.clone();
                category.context_id = request.context_id.clone();
                Ok(ApiResponse::new(StatusCode::OK))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such node")),
        }
    }

    fn update_category_metadata(
        &self,
        id: &CategoryId,
        request: &UpdateCategoryMetadataRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("update_category_metadata") {
            return Ok(response);
        }
        let mut categories = self.categories.borrow_mut();
        match categories.iter_mut().find(|c| c.id == id.as_str()) {
            Some(category) => {
                category.description = request.description.clone();
                Ok(ApiResponse::new(StatusCode::OK))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such node")),
        }
    }

    fn move_category(
        &self,
        id: &CategoryId,
        request: &MoveCategoryRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("move_category") {
            return Ok(response);
        }
        let mut categories = self.categories.borrow_mut();
        match categories.iter_mut().find(|c| c.id == id.as_str()) {
            Some(category) => {
                category.parent_id = request.parent_id.clone();
                Ok(ApiResponse::new(StatusCode::NO_CONTENT))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such node")),
        }
    }

    fn delete_category(&self, id: &CategoryId) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("delete_category") {
            return Ok(response);
        }
        self.categories.borrow_mut().retain(|c| c.id != id.as_str());
        Ok(ApiResponse::new(StatusCode::NO_CONTENT))
    }
}

impl AttributeDefinitionApi for FakePim {
    fn find_attribute_definitions(
        &self,
        filter: &IdFilterRequest,
    ) -> ClientResult<ApiResponse<AttributeDefinitionListResponse>> {
        if let Some(response) = self.enter("find_attribute_definitions") {
            return Ok(response);
        }
        let id = Self::filtered_id(filter);
        let data = self
            .attributes
            .borrow()
            .iter()
            .filter(|a| id == Some(a.id.as_str()))
            .map(|a| AttributeDefinitionData {
                id: Some(a.id.clone()),
                name: Some(a.name.clone()),
                number: a.number.clone(),
                description: a.description.clone(),
                data_type: Some(a.data_type.clone()),
                content_type: a.content_type.clone(),
                character_set: a.character_set.clone(),
                external_source: Some(a.external_source),
                internal: Some(a.internal),
                group_id: a.group_id.clone(),
                unit: a.unit.clone(),
                restrictions: a.restrictions.clone(),
            })
            .collect();
        Ok(ApiResponse::new(StatusCode::OK).with_body(AttributeDefinitionListResponse { data }))
    }

    fn create_attribute_definition(
        &self,
        request: &CreateAttributeDefinitionRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("create_attribute_definition") {
            return Ok(response);
        }
        let id = self.alloc("attr");
        let mut restrictions = request.restrictions.clone();
        self.assign_value_ids(&mut restrictions);
        self.attributes.borrow_mut().push(StoredAttribute {
            id: id.clone(),
            name: request.name.clone(),
            number: request.number.clone(),
            description: None,
            data_type: request.data_type.clone(),
            content_type: request.content_type.clone(),
            character_set: request.character_set.clone(),
            external_source: request.external_source,
            internal: request.internal,
            group_id: request.group_id.clone(),
            unit: request.unit.clone(),
            restrictions,
        });
        Ok(ApiResponse::new(StatusCode::CREATED).with_resource_id(id))
    }

    fn update_attribute_definition(
        &self,
        id: &AttributeDefinitionId,
        request: &UpdateAttributeDefinitionRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("update_attribute_definition") {
            return Ok(response);
        }
        let mut attributes = self.attributes.borrow_mut();
        match attributes.iter_mut().find(|a| a.id == id.as_str()) {
            Some(attribute) => {
                attribute.name = request.name.clone();
                attribute.number = request.number.clone();
                attribute.content_type = request.content_type.clone();
                attribute.character_set = request.character_set.clone();
                attribute.external_source = request.external_source;
                attribute.internal = request.internal;
                attribute.group_id = request.group_id.clone();
                attribute.unit = request.unit.clone();
                let mut restrictions = request.restrictions.clone();
                self.assign_value_ids(&mut restrictions);
                attribute.restrictions = restrictions;
                Ok(ApiResponse::new(StatusCode::OK))
            }
            None => {
                Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such definition"))
            }
        }
    }

    fn update_attribute_definition_metadata(
        &self,
        id: &AttributeDefinitionId,
        request: &UpdateAttributeDefinitionMetadataRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("update_attribute_definition_metadata") {
            return Ok(response);
        }
        let mut attributes = self.attributes.borrow_mut();
        match attributes.iter_mut().find(|a| a.id == id.as_str()) {
            Some(attribute) => {
                attribute.description = request.description.clone();
                Ok(ApiResponse::new(StatusCode::OK))
            }
            None => {
                Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such definition"))
            }
        }
    }

    fn delete_attribute_definition(
        &self,
        id: &AttributeDefinitionId,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("delete_attribute_definition") {
            return Ok(response);
        }
        self.attributes.borrow_mut().retain(|a| a.id != id.as_str());
        Ok(ApiResponse::new(StatusCode::ACCEPTED))
    }
}

impl CategoryAttributeApi for FakePim {
    fn list_category_attributes(
        &self,
        category_id: &CategoryId,
    ) -> ClientResult<ApiResponse<NodeAttributeListResponse>> {
        if let Some(response) = self.enter("list_category_attributes") {
            return Ok(response);
        }
        let data = self
            .links
            .borrow()
            .iter()
            .filter(|l| l.category_id == category_id.as_str())
            .map(|l| NodeAttributeData {
                attribute_definition_id: Some(l.attribute_id.clone()),
                assigned_on: Some(l.category_id.clone()),
                mandatory_set_on: l.mandatory.then(|| l.category_id.clone()),
            })
            .collect();
        Ok(ApiResponse::new(StatusCode::OK).with_body(NodeAttributeListResponse { data }))
    }

    fn assign_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
        _request: &AssignAttributeRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("assign_attribute") {
            return Ok(response);
        }
        self.links.borrow_mut().push(StoredLink {
            category_id: category_id.as_str().to_string(),
            attribute_id: attribute_id.as_str().to_string(),
            mandatory: false,
        });
        Ok(ApiResponse::new(StatusCode::ACCEPTED))
    }

    fn update_category_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
        request: &UpdateNodeAttributeRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("update_category_attribute") {
            return Ok(response);
        }
        let mut links = self.links.borrow_mut();
        match links.iter_mut().find(|l| {
            l.category_id == category_id.as_str() && l.attribute_id == attribute_id.as_str()
        }) {
            Some(link) => {
                link.mandatory = request.mandatory;
                Ok(ApiResponse::new(StatusCode::ACCEPTED))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such assignment")),
        }
    }

    fn unassign_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("unassign_attribute") {
            return Ok(response);
        }
        self.links.borrow_mut().retain(|l| {
            !(l.category_id == category_id.as_str() && l.attribute_id == attribute_id.as_str())
        });
        Ok(ApiResponse::new(StatusCode::NO_CONTENT))
    }
}

impl WebhookApi for FakePim {
    fn get_webhook(&self, id: &WebhookId) -> ClientResult<ApiResponse<WebhookData>> {
        if let Some(response) = self.enter("get_webhook") {
            return Ok(response);
        }
        match self
            .webhooks
            .borrow()
            .iter()
            .find(|w| w.id == id.as_str())
        {
            Some(webhook) => Ok(ApiResponse::new(StatusCode::OK).with_body(WebhookData {
                id: Some(webhook.id.clone()),
                secret: Some(webhook.secret.clone()),
                url: Some(webhook.url.clone()),
                active: Some(webhook.active),
            })),
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND)),
        }
    }

    fn get_webhook_subscriptions(
        &self,
        id: &WebhookId,
    ) -> ClientResult<ApiResponse<SubscriptionListResponse>> {
        if let Some(response) = self.enter("get_webhook_subscriptions") {
            return Ok(response);
        }
        match self
            .webhooks
            .borrow()
            .iter()
            .find(|w| w.id == id.as_str())
        {
            Some(webhook) => {
                Ok(ApiResponse::new(StatusCode::OK).with_body(SubscriptionListResponse {
                    event_types: webhook.event_types.iter().cloned().collect(),
                }))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND)),
        }
    }

    fn create_webhook(&self, request: &CreateWebhookRequest) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("create_webhook") {
            return Ok(response);
        }
        let id = self.alloc("wh");
        self.webhooks.borrow_mut().push(StoredWebhook {
            id: id.clone(),
            secret: request.secret.clone(),
            url: request.url.clone(),
            active: request.active,
            event_types: BTreeSet::new(),
        });
        Ok(ApiResponse::new(StatusCode::CREATED).with_resource_id(id))
    }

    fn update_webhook(
        &self,
        id: &WebhookId,
        request: &UpdateWebhookRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("update_webhook") {
            return Ok(response);
        }
        let mut webhooks = self.webhooks.borrow_mut();
        match webhooks.iter_mut().find(|w| w.id == id.as_str()) {
            Some(webhook) => {
                webhook.secret = request.secret.clone();
                webhook.url = request.url.clone();
                webhook.active = request.active;
                Ok(ApiResponse::new(StatusCode::OK))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such webhook")),
        }
    }

    fn subscribe(
        &self,
        id: &WebhookId,
        request: &EventTypeListRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("subscribe") {
            return Ok(response);
        }
        let mut webhooks = self.webhooks.borrow_mut();
        match webhooks.iter_mut().find(|w| w.id == id.as_str()) {
            Some(webhook) => {
                webhook
                    .event_types
                    .extend(request.event_types.iter().cloned());
                Ok(ApiResponse::new(StatusCode::OK))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such webhook")),
        }
    }

    fn unsubscribe(
        &self,
        id: &WebhookId,
        request: &EventTypeListRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("unsubscribe") {
            return Ok(response);
        }
        let mut webhooks = self.webhooks.borrow_mut();
        match webhooks.iter_mut().find(|w| w.id == id.as_str()) {
            Some(webhook) => {
                for token in &request.event_types {
                    webhook.event_types.remove(token);
                }
                Ok(ApiResponse::new(StatusCode::OK))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such webhook")),
        }
    }

    fn delete_webhook(&self, id: &WebhookId) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("delete_webhook") {
            return Ok(response);
        }
        self.webhooks.borrow_mut().retain(|w| w.id != id.as_str());
        Ok(ApiResponse::new(StatusCode::OK))
    }
}

impl ContextApi for FakePim {
    fn get_context(&self, id: &ContextId) -> ClientResult<ApiResponse<ContextData>> {
        if let Some(response) = self.enter("get_context") {
            return Ok(response);
        }
        match self
            .contexts
            .borrow()
            .iter()
            .find(|c| c.id == id.as_str())
        {
            Some(context) => Ok(ApiResponse::new(StatusCode::OK).with_body(ContextData {
                id: Some(context.id.clone()),
                name: Some(context.name.clone()),
                locale: Some(context.locale.clone()),
                fallback: context.fallback.clone(),
            })),
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND)),
        }
    }

    fn find_contexts(&self) -> ClientResult<ApiResponse<ContextListResponse>> {
        if let Some(response) = self.enter("find_contexts") {
            return Ok(response);
        }
        let data = self
            .contexts
            .borrow()
            .iter()
            .map(|c| ContextData {
                id: Some(c.id.clone()),
                name: Some(c.name.clone()),
                locale: Some(c.locale.clone()),
                fallback: c.fallback.clone(),
            })
            .collect();
        Ok(ApiResponse::new(StatusCode::OK).with_body(ContextListResponse { data }))
    }

    fn create_context(&self, request: &CreateContextRequest) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("create_context") {
            return Ok(response);
        }
        let id = self.alloc("ctx");
        self.contexts.borrow_mut().push(StoredContext {
            id,
            name: request.name.clone(),
            locale: request.locale.clone(),
            fallback: request.fallback.clone(),
        });
        // The real service omits the Resource-Id header on context creation.
        Ok(ApiResponse::new(StatusCode::CREATED))
    }

    fn update_context(
        &self,
        id: &ContextId,
        request: &UpdateContextRequest,
    ) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("update_context") {
            return Ok(response);
        }
        let mut contexts = self.contexts.borrow_mut();
        match contexts.iter_mut().find(|c| c.id == id.as_str()) {
            Some(context) => {
                context.name = request.name.clone();
                context.locale = request.locale.clone();
                context.fallback = request.fallback.clone();
                Ok(ApiResponse::new(StatusCode::NO_CONTENT))
            }
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND).with_error("no such context")),
        }
    }

    fn archive_context(&self, id: &ContextId) -> ClientResult<ApiResponse<()>> {
        if let Some(response) = self.enter("archive_context") {
            return Ok(response);
        }
        self.contexts.borrow_mut().retain(|c| c.id != id.as_str());
        Ok(ApiResponse::new(StatusCode::NO_CONTENT))
    }
}
