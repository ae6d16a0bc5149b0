//! Typed REST access to the backend API.
//!
//! One [`ApiClient`] is shared by the whole console; each record kind gets a cheap
//! [`HttpGateway`] view over it. Nothing here retries - every failure goes straight back
//! to the caller.

use crate::{
    config::ApiConfig,
    data::{Persisted, RecordFields, RecordId},
    error::{
        BuildHttpClientSnafu, GatewayError, GatewayResult, MalformedResponseSnafu,
        MissingCollectionSnafu, NetworkSnafu, NotFoundSnafu, RosterResult, ServerSnafu,
        ValidationSnafu,
    },
    session::UserProfile,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use snafu::{OptionExt, ResultExt};
use std::{marker::PhantomData, sync::Arc};
use tokio::sync::RwLock;

/// The bearer token every request is sent with, if there is one.
pub type SharedToken = Arc<RwLock<Option<SecretString>>>;

#[async_trait]
pub trait RecordGateway<T: RecordFields>: Send + Sync {
    async fn list(&self) -> GatewayResult<Vec<Persisted<T>>>;
    async fn create(&self, fields: &T) -> GatewayResult<()>;
    ///full replace, not a patch
    async fn update(&self, id: &RecordId, fields: &T) -> GatewayResult<()>;
    async fn remove(&self, id: &RecordId) -> GatewayResult<()>;
}

#[async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn fetch_self(&self) -> GatewayResult<UserProfile>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Arc<str>,
    token: SharedToken,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, token: SharedToken) -> RosterResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context(BuildHttpClientSnafu)?;

        Ok(Self {
            client,
            base: config.base_url.trim_end_matches('/').into(),
            token,
        })
    }

    pub fn records<T: RecordFields>(&self) -> HttpGateway<T> {
        HttpGateway {
            api: self.clone(),
            _kind: PhantomData,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = self.url(path);
        let mut builder = self.client.request(method.clone(), &url);
        if let Some(token) = self.token.read().await.as_ref() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        debug!(%method, %url, "Calling backend");
        (builder, url)
    }

    async fn send(&self, builder: RequestBuilder, url: &str) -> GatewayResult<Response> {
        let response = builder.send().await.context(NetworkSnafu { url })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, %url, "Backend returned an error");

        if status == StatusCode::NOT_FOUND {
            NotFoundSnafu { url }.fail()
        } else if status.is_client_error() {
            ValidationSnafu { status, body }.fail()
        } else {
            ServerSnafu { status, body }.fail()
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> GatewayResult<R> {
        let (builder, url) = self.request(Method::GET, path).await;
        let response = self.send(builder, &url).await?;
        let bytes = response.bytes().await.context(NetworkSnafu { url: &url })?;
        serde_json::from_slice(&bytes).context(MalformedResponseSnafu { url })
    }

    ///any 2xx body is accepted and thrown away
    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> GatewayResult<()> {
        let (mut builder, url) = self.request(method, path).await;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder, &url).await.map(|_| ())
    }
}

#[async_trait]
impl ProfileGateway for ApiClient {
    async fn fetch_self(&self) -> GatewayResult<UserProfile> {
        self.get_json("/users/self").await
    }
}

/// [`RecordGateway`] for one record kind, rooted at `/api/<kind>`.
#[derive(Clone, Debug)]
pub struct HttpGateway<T> {
    api: ApiClient,
    _kind: PhantomData<fn() -> T>,
}

impl<T: RecordFields> HttpGateway<T> {
    fn collection_path() -> String {
        format!("/api/{}", T::KIND.segment())
    }

    fn item_path(id: &RecordId) -> String {
        format!("/api/{}/{}", T::KIND.segment(), id.path_segment())
    }
}

#[async_trait]
impl<T: RecordFields> RecordGateway<T> for HttpGateway<T> {
    async fn list(&self) -> GatewayResult<Vec<Persisted<T>>> {
        let path = Self::collection_path();
        let key = T::KIND.collection_key();

        let mut wrapper: Value = self.api.get_json(&path).await?;
        let collection = wrapper
            .get_mut(key)
            .map(Value::take)
            .with_context(|| MissingCollectionSnafu {
                key,
                url: self.api.url(&path),
            })?;

        serde_json::from_value(collection).with_context(|_| MalformedResponseSnafu {
            url: self.api.url(&path),
        })
    }

    async fn create(&self, fields: &T) -> GatewayResult<()> {
        self.api
            .send_json(Method::POST, &Self::collection_path(), Some(fields))
            .await
    }

    async fn update(&self, id: &RecordId, fields: &T) -> GatewayResult<()> {
        self.api
            .send_json(Method::PUT, &Self::item_path(id), Some(fields))
            .await
    }

    async fn remove(&self, id: &RecordId) -> GatewayResult<()> {
        self.api
            .send_json(Method::DELETE, &Self::item_path(id), None::<&()>)
            .await
    }
}
