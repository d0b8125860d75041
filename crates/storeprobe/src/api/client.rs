//! HTTP client for the demo store's REST endpoints.
//!
//! Every call reads the body as text and decodes it tolerantly. A non-2xx
//! status is returned as data, not as an error: the store reports most
//! failures through `responseCode` inside a 200 response anyway.

use reqwest::{Method, RequestBuilder};
use tracing::Instrument;

use super::config::{join_endpoint, ApiConfig};
use super::types::{AccountForm, AddressUpdate, ApiResponse};
use crate::form::{FormBody, FORM_URLENCODED_CONTENT_TYPE};
use crate::result::ProbeResult;

/// Endpoint paths, relative to the base URL
pub mod endpoints {
    /// `GET` all products
    pub const PRODUCTS_LIST: &str = "/api/productsList";
    /// `GET` all brands
    pub const BRANDS_LIST: &str = "/api/brandsList";
    /// `POST` a product search
    pub const SEARCH_PRODUCT: &str = "/api/searchProduct";
    /// `POST` a new account
    pub const CREATE_ACCOUNT: &str = "/api/createAccount";
    /// `POST` credentials
    pub const VERIFY_LOGIN: &str = "/api/verifyLogin";
    /// `GET` account details by email
    pub const USER_DETAIL_BY_EMAIL: &str = "/api/getUserDetailByEmail";
    /// `PUT` account changes
    pub const UPDATE_ACCOUNT: &str = "/api/updateAccount";
    /// `DELETE` an account
    pub const DELETE_ACCOUNT: &str = "/api/deleteAccount";
}

/// Store API client
#[derive(Debug, Clone)]
pub struct StoreApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl StoreApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }

    /// Create a client configured from the environment
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Config`] for bad environment values, or
    /// [`crate::ProbeError::Http`] if the HTTP client cannot be built.
    pub fn from_env() -> ProbeResult<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    /// Create a client around an existing reqwest client
    #[must_use]
    pub const fn with_client(config: ApiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL for an endpoint path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_endpoint(&self.config.base_url, path)
    }

    /// `GET /api/productsList`
    pub async fn products_list(&self) -> ProbeResult<ApiResponse> {
        self.send_raw(Method::GET, endpoints::PRODUCTS_LIST, None)
            .await
    }

    /// `GET /api/brandsList`
    pub async fn brands_list(&self) -> ProbeResult<ApiResponse> {
        self.send_raw(Method::GET, endpoints::BRANDS_LIST, None)
            .await
    }

    /// `POST /api/searchProduct`; `None` posts an empty form
    pub async fn search_product(&self, term: Option<&str>) -> ProbeResult<ApiResponse> {
        let form = FormBody::new().field("search_product", term);
        self.send_raw(Method::POST, endpoints::SEARCH_PRODUCT, Some(&form))
            .await
    }

    /// `POST /api/createAccount`
    pub async fn create_account(&self, account: &AccountForm) -> ProbeResult<ApiResponse> {
        self.send_raw(
            Method::POST,
            endpoints::CREATE_ACCOUNT,
            Some(&account.to_form()),
        )
        .await
    }

    /// `POST /api/verifyLogin`
    pub async fn verify_login(&self, email: &str, password: &str) -> ProbeResult<ApiResponse> {
        let form = credentials(email, password);
        self.send_raw(Method::POST, endpoints::VERIFY_LOGIN, Some(&form))
            .await
    }

    /// `GET /api/getUserDetailByEmail?email=...`
    pub async fn user_detail_by_email(&self, email: &str) -> ProbeResult<ApiResponse> {
        let url = self.url(endpoints::USER_DETAIL_BY_EMAIL);
        let request = self.client.get(&url).query(&[("email", email)]);
        self.execute(Method::GET, &url, request).await
    }

    /// `PUT /api/updateAccount`
    pub async fn update_account(
        &self,
        email: &str,
        password: &str,
        address: &AddressUpdate,
    ) -> ProbeResult<ApiResponse> {
        let form = address.extend_form(credentials(email, password));
        self.send_raw(Method::PUT, endpoints::UPDATE_ACCOUNT, Some(&form))
            .await
    }

    /// `DELETE /api/deleteAccount`
    pub async fn delete_account(&self, email: &str, password: &str) -> ProbeResult<ApiResponse> {
        let form = credentials(email, password);
        self.send_raw(Method::DELETE, endpoints::DELETE_ACCOUNT, Some(&form))
            .await
    }

    /// Send any method to any path, with an optional form body.
    ///
    /// Used for negative cases such as `POST /api/productsList`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Http`] on transport failure. HTTP error
    /// statuses are not errors.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        form: Option<&FormBody>,
    ) -> ProbeResult<ApiResponse> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(form) = form {
            request = request
                .header(reqwest::header::CONTENT_TYPE, FORM_URLENCODED_CONTENT_TYPE)
                .body(form.encode());
        }
        self.execute(method, &url, request).await
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> ProbeResult<ApiResponse> {
        let span = tracing::debug_span!("store_api", %method, url);
        async move {
            let resp = request.send().await?;
            let status = resp.status().as_u16();
            let body = resp.text().await?;
            let response = ApiResponse::from_body(status, body);
            tracing::debug!(
                status,
                response_code = ?response.response_code(),
                decoded = response.decoded.source_label(),
                "store API response"
            );
            Ok(response)
        }
        .instrument(span)
        .await
    }
}

fn credentials(email: &str, password: &str) -> FormBody {
    FormBody::new()
        .field("email", email)
        .field("password", password)
}
