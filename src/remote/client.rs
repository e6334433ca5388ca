//! HTTP client wrapper shared by the remote adapters.

use super::{CredentialStore, RemoteError, RemoteResult};
use crate::config::ClientConfig;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::debug;

/// JSON client for the task API that attaches the current bearer credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
}

impl ApiClient {
    /// Builds a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig, credentials: Arc<CredentialStore>) -> RemoteResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RemoteError::network)?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            credentials,
        })
    }

    /// Returns the credential store used for every request.
    #[must_use]
    pub const fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Resolves an API path against the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issues a `GET` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the call fails or the body is malformed.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<T> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    /// Issues a `POST` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the call fails or the body is malformed.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        let response = self.execute(request).await?;
        decode(response).await
    }

    /// Issues a `PUT` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the call fails or the body is malformed.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.execute(request).await?;
        decode(response).await
    }

    /// Issues a `DELETE`, discarding the acknowledgement body.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the call fails.
    pub async fn delete(&self, path: &str) -> RemoteResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        match self.credentials.token() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request.send().await.map_err(RemoteError::network)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "task API responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = RemoteError::from_status(status.as_u16(), &body);
        if error.is_unauthorized() {
            self.credentials.terminate();
        }
        Err(error)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
    let bytes = response.bytes().await.map_err(RemoteError::network)?;
    serde_json::from_slice(&bytes).map_err(RemoteError::decode)
}
