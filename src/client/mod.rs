//! Remote client facade: one capability trait per remote entity family,
//! one method per endpoint. No method retries or interprets status codes;
//! every call returns the raw [`ApiResponse`] for the reconciler to
//! classify.

use thiserror::Error;

use crate::domain::types::{AttributeDefinitionId, CategoryId, ContextId, WebhookId};
use crate::models::IdFilterRequest;
use crate::models::attribute_definition::{
    AttributeDefinitionListResponse, CreateAttributeDefinitionRequest,
    UpdateAttributeDefinitionMetadataRequest, UpdateAttributeDefinitionRequest,
};
use crate::models::category::{
    CategoryListResponse, CreateCategoryRequest, MoveCategoryRequest,
    UpdateCategoryMetadataRequest, UpdateCategoryRequest,
};
use crate::models::category_attribute::{
    AssignAttributeRequest, NodeAttributeListResponse, UpdateNodeAttributeRequest,
};
use crate::models::context::{ContextData, ContextListResponse, CreateContextRequest, UpdateContextRequest};
use crate::models::webhook::{
    CreateWebhookRequest, EventTypeListRequest, SubscriptionListResponse, UpdateWebhookRequest,
    WebhookData,
};

pub mod http;
pub mod response;

pub use http::{HttpPimClient, LogObserver, TransportObserver};
pub use response::{ApiResponse, ErrorBody, RESOURCE_ID_HEADER};

/// Transport-level failures: the call never produced a usable status code.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or protocol failure.
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),
    /// A body the endpoint's contract promises could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenient alias for results returned from client calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Remote operations on categories.
pub trait CategoryApi {
    /// Filtered listing, used for by-id lookups (`ID_IN`).
    fn find_categories(
        &self,
        filter: &IdFilterRequest,
    ) -> ClientResult<ApiResponse<CategoryListResponse>>;
    fn create_category(&self, request: &CreateCategoryRequest) -> ClientResult<ApiResponse<()>>;
    fn update_category(
        &self,
        id: &CategoryId,
        request: &UpdateCategoryRequest,
    ) -> ClientResult<ApiResponse<()>>;
    /// Dedicated endpoint for the free-text description.
    fn update_category_metadata(
        &self,
        id: &CategoryId,
        request: &UpdateCategoryMetadataRequest,
    ) -> ClientResult<ApiResponse<()>>;
    /// Dedicated endpoint re-parenting the category in the tree.
    fn move_category(
        &self,
        id: &CategoryId,
        request: &MoveCategoryRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn delete_category(&self, id: &CategoryId) -> ClientResult<ApiResponse<()>>;
}

/// Remote operations on attribute definitions.
pub trait AttributeDefinitionApi {
    fn find_attribute_definitions(
        &self,
        filter: &IdFilterRequest,
    ) -> ClientResult<ApiResponse<AttributeDefinitionListResponse>>;
    fn create_attribute_definition(
        &self,
        request: &CreateAttributeDefinitionRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn update_attribute_definition(
        &self,
        id: &AttributeDefinitionId,
        request: &UpdateAttributeDefinitionRequest,
    ) -> ClientResult<ApiResponse<()>>;
    /// Dedicated endpoint for the free-text description.
    fn update_attribute_definition_metadata(
        &self,
        id: &AttributeDefinitionId,
        request: &UpdateAttributeDefinitionMetadataRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn delete_attribute_definition(
        &self,
        id: &AttributeDefinitionId,
    ) -> ClientResult<ApiResponse<()>>;
}

/// Remote operations on category-attribute links.
pub trait CategoryAttributeApi {
    /// Lists every attribute attached to the category, inherited ones
    /// included.
    fn list_category_attributes(
        &self,
        category_id: &CategoryId,
    ) -> ClientResult<ApiResponse<NodeAttributeListResponse>>;
    fn assign_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
        request: &AssignAttributeRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn update_category_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
        request: &UpdateNodeAttributeRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn unassign_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
    ) -> ClientResult<ApiResponse<()>>;
}

/// Remote operations on webhooks.
pub trait WebhookApi {
    fn get_webhook(&self, id: &WebhookId) -> ClientResult<ApiResponse<WebhookData>>;
    fn get_webhook_subscriptions(
        &self,
        id: &WebhookId,
    ) -> ClientResult<ApiResponse<SubscriptionListResponse>>;
    fn create_webhook(&self, request: &CreateWebhookRequest) -> ClientResult<ApiResponse<()>>;
    fn update_webhook(
        &self,
        id: &WebhookId,
        request: &UpdateWebhookRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn subscribe(
        &self,
        id: &WebhookId,
        request: &EventTypeListRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn unsubscribe(
        &self,
        id: &WebhookId,
        request: &EventTypeListRequest,
    ) -> ClientResult<ApiResponse<()>>;
    fn delete_webhook(&self, id: &WebhookId) -> ClientResult<ApiResponse<()>>;
}

/// Remote operations on localization contexts.
pub trait ContextApi {
    fn get_context(&self, id: &ContextId) -> ClientResult<ApiResponse<ContextData>>;
    /// Unfiltered listing; the create flow scans it when the service omits
    /// the `Resource-Id` header.
    fn find_contexts(&self) -> ClientResult<ApiResponse<ContextListResponse>>;
    fn create_context(&self, request: &CreateContextRequest) -> ClientResult<ApiResponse<()>>;
    fn update_context(
        &self,
        id: &ContextId,
        request: &UpdateContextRequest,
    ) -> ClientResult<ApiResponse<()>>;
    /// Archiving is the only removal the service offers; archived contexts
    /// are treated as gone.
    fn archive_context(&self, id: &ContextId) -> ClientResult<ApiResponse<()>>;
}
