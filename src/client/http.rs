//! `reqwest`-backed implementation of the client facade.

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::response::{ApiResponse, ErrorBody, RESOURCE_ID_HEADER};
use crate::client::{
    AttributeDefinitionApi, CategoryApi, CategoryAttributeApi, ClientResult, ContextApi,
    WebhookApi,
};
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
use crate::models::config::SyncConfig;
use crate::models::context::{
    ContextData, ContextListResponse, CreateContextRequest, UpdateContextRequest,
};
use crate::models::webhook::{
    CreateWebhookRequest, EventTypeListRequest, SubscriptionListResponse, UpdateWebhookRequest,
    WebhookData,
};

/// Hook observing every request/response pair. Passed into client
/// construction instead of mutating a shared transport.
pub trait TransportObserver: Send + Sync {
    fn observe(&self, method: &Method, url: &str, status: StatusCode);
}

/// Observer writing one debug log line per remote call.
pub struct LogObserver;

impl TransportObserver for LogObserver {
    fn observe(&self, method: &Method, url: &str, status: StatusCode) {
        log::debug!("{method} {url} -> {status}");
    }
}

/// Blocking HTTP client for the three remote service families.
///
/// The underlying `reqwest` client carries the connection pool and is the
/// only shared resource; the struct itself holds no mutable state.
pub struct HttpPimClient {
    http: Client,
    config: SyncConfig,
    observer: Option<Box<dyn TransportObserver>>,
}

impl HttpPimClient {
    /// Creates a client; the debug flag in `config` enables [`LogObserver`].
    pub fn new(config: SyncConfig) -> Self {
        let observer: Option<Box<dyn TransportObserver>> = if config.debug {
            Some(Box::new(LogObserver))
        } else {
            None
        };
        Self::with_observer(config, observer)
    }

    /// Creates a client with an explicit transport observer.
    pub fn with_observer(
        config: SyncConfig,
        observer: Option<Box<dyn TransportObserver>>,
    ) -> Self {
        Self {
            http: Client::new(),
            config,
            observer,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    fn notification_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.notification_url.trim_end_matches('/'),
            path
        )
    }

    fn settings_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.settings_url.trim_end_matches('/'), path)
    }

    /// Sends the request and captures status, `Resource-Id` header and raw
    /// body text.
    fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> ClientResult<(StatusCode, Option<String>, String)> {
        let mut builder = self.http.request(method.clone(), url.as_str());
        if !self.config.token.is_empty() {
            builder = builder.bearer_auth(&self.config.token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send()?;
        let status = response.status();
        let resource_id = response
            .headers()
            .get(RESOURCE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response.text()?;
        if let Some(observer) = &self.observer {
            observer.observe(&method, &url, status);
        }
        Ok((status, resource_id, text))
    }

    /// Call whose `success` status carries a JSON body. The body is decoded
    /// only on that status; client-error statuses decode the service error
    /// body instead.
    fn request<B, T>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
        success: StatusCode,
    ) -> ClientResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (status, resource_id, text) = self.dispatch(method, url, body)?;
        let mut response = ApiResponse::new(status);
        if let Some(id) = resource_id {
            response = response.with_resource_id(id);
        }
        if status == success {
            if !text.is_empty() {
                response = response.with_body(serde_json::from_str(&text)?);
            }
        } else if status.is_client_error() {
            if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
                response = response.with_error(body.error);
            }
        }
        Ok(response)
    }

    /// Call whose success carries no body.
    fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> ClientResult<ApiResponse<()>> {
        let (status, resource_id, text) = self.dispatch(method, url, body)?;
        let mut response = ApiResponse::new(status);
        if let Some(id) = resource_id {
            response = response.with_resource_id(id);
        }
        if status.is_client_error() {
            if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
                response = response.with_error(body.error);
            }
        }
        Ok(response)
    }
}

impl CategoryApi for HttpPimClient {
    fn find_categories(
        &self,
        filter: &IdFilterRequest,
    ) -> ClientResult<ApiResponse<CategoryListResponse>> {
        self.request(
            Method::POST,
            self.api_url("categories/filtered"),
            Some(filter),
            StatusCode::OK,
        )
    }

    fn create_category(&self, request: &CreateCategoryRequest) -> ClientResult<ApiResponse<()>> {
        self.execute(Method::POST, self.api_url("categories"), Some(request))
    }

    fn update_category(
        &self,
        id: &CategoryId,
        request: &UpdateCategoryRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PATCH,
            self.api_url(&format!("categories/{id}")),
            Some(request),
        )
    }

    fn update_category_metadata(
        &self,
        id: &CategoryId,
        request: &UpdateCategoryMetadataRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PATCH,
            self.api_url(&format!("categories/{id}/metadata")),
            Some(request),
        )
    }

    fn move_category(
        &self,
        id: &CategoryId,
        request: &MoveCategoryRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PUT,
            self.api_url(&format!("categories/{id}/parent")),
            Some(request),
        )
    }

    fn delete_category(&self, id: &CategoryId) -> ClientResult<ApiResponse<()>> {
        self.execute::<()>(
            Method::DELETE,
            self.api_url(&format!("categories/{id}")),
            None,
        )
    }
}

impl AttributeDefinitionApi for HttpPimClient {
    fn find_attribute_definitions(
        &self,
        filter: &IdFilterRequest,
    ) -> ClientResult<ApiResponse<AttributeDefinitionListResponse>> {
        self.request(
            Method::POST,
            self.api_url("attribute-definitions/filtered"),
            Some(filter),
            StatusCode::OK,
        )
    }

    fn create_attribute_definition(
        &self,
        request: &CreateAttributeDefinitionRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::POST,
            self.api_url("attribute-definitions"),
            Some(request),
        )
    }

    fn update_attribute_definition(
        &self,
        id: &AttributeDefinitionId,
        request: &UpdateAttributeDefinitionRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PATCH,
            self.api_url(&format!("attribute-definitions/{id}")),
            Some(request),
        )
    }

    fn update_attribute_definition_metadata(
        &self,
        id: &AttributeDefinitionId,
        request: &UpdateAttributeDefinitionMetadataRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PATCH,
            self.api_url(&format!("attribute-definitions/{id}/metadata")),
            Some(request),
        )
    }

    fn delete_attribute_definition(
        &self,
        id: &AttributeDefinitionId,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute::<()>(
            Method::DELETE,
            self.api_url(&format!("attribute-definitions/{id}")),
            None,
        )
    }
}

impl CategoryAttributeApi for HttpPimClient {
    fn list_category_attributes(
        &self,
        category_id: &CategoryId,
    ) -> ClientResult<ApiResponse<NodeAttributeListResponse>> {
        self.request::<(), _>(
            Method::GET,
            self.api_url(&format!("categories/{category_id}/attributes")),
            None,
            StatusCode::OK,
        )
    }

    fn assign_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
        request: &AssignAttributeRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::POST,
            self.api_url(&format!(
                "categories/{category_id}/attributes/{attribute_id}"
            )),
            Some(request),
        )
    }

    fn update_category_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
        request: &UpdateNodeAttributeRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PATCH,
            self.api_url(&format!(
                "categories/{category_id}/attributes/{attribute_id}"
            )),
            Some(request),
        )
    }

    fn unassign_attribute(
        &self,
        category_id: &CategoryId,
        attribute_id: &AttributeDefinitionId,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute::<()>(
            Method::DELETE,
            self.api_url(&format!(
                "categories/{category_id}/attributes/{attribute_id}"
            )),
            None,
        )
    }
}

impl WebhookApi for HttpPimClient {
    fn get_webhook(&self, id: &WebhookId) -> ClientResult<ApiResponse<WebhookData>> {
        self.request::<(), _>(
            Method::GET,
            self.notification_url(&format!("webhooks/{id}")),
            None,
            StatusCode::OK,
        )
    }

    fn get_webhook_subscriptions(
        &self,
        id: &WebhookId,
    ) -> ClientResult<ApiResponse<SubscriptionListResponse>> {
        self.request::<(), _>(
            Method::GET,
            self.notification_url(&format!("webhooks/{id}/subscriptions")),
            None,
            StatusCode::OK,
        )
    }

    fn create_webhook(&self, request: &CreateWebhookRequest) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::POST,
            self.notification_url("webhooks"),
            Some(request),
        )
    }

    fn update_webhook(
        &self,
        id: &WebhookId,
        request: &UpdateWebhookRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PUT,
            self.notification_url(&format!("webhooks/{id}")),
            Some(request),
        )
    }

    fn subscribe(
        &self,
        id: &WebhookId,
        request: &EventTypeListRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::POST,
            self.notification_url(&format!("webhooks/{id}/subscriptions/subscribe")),
            Some(request),
        )
    }

    fn unsubscribe(
        &self,
        id: &WebhookId,
        request: &EventTypeListRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::POST,
            self.notification_url(&format!("webhooks/{id}/subscriptions/unsubscribe")),
            Some(request),
        )
    }

    fn delete_webhook(&self, id: &WebhookId) -> ClientResult<ApiResponse<()>> {
        self.execute::<()>(
            Method::DELETE,
            self.notification_url(&format!("webhooks/{id}")),
            None,
        )
    }
}

impl ContextApi for HttpPimClient {
    fn get_context(&self, id: &ContextId) -> ClientResult<ApiResponse<ContextData>> {
        self.request::<(), _>(
            Method::GET,
            self.settings_url(&format!("contexts/{id}")),
            None,
            StatusCode::OK,
        )
    }

    fn find_contexts(&self) -> ClientResult<ApiResponse<ContextListResponse>> {
        self.request::<(), _>(Method::GET, self.settings_url("contexts"), None, StatusCode::OK)
    }

    fn create_context(&self, request: &CreateContextRequest) -> ClientResult<ApiResponse<()>> {
        self.execute(Method::POST, self.settings_url("contexts"), Some(request))
    }

    fn update_context(
        &self,
        id: &ContextId,
        request: &UpdateContextRequest,
    ) -> ClientResult<ApiResponse<()>> {
        self.execute(
            Method::PUT,
            self.settings_url(&format!("contexts/{id}")),
            Some(request),
        )
    }

    fn archive_context(&self, id: &ContextId) -> ClientResult<ApiResponse<()>> {
        self.execute::<()>(
            Method::POST,
            self.settings_url(&format!("contexts/{id}/archive")),
            None,
        )
    }
}
