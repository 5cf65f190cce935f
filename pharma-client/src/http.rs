//! HTTP client for the remote pharmacy API

use crate::{ClientConfig, ClientError, ClientResult, CredentialsProvider};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use std::sync::Arc;

/// Header carrying the pharmacy datastore key
pub const DATASTORE_KEY_HEADER: &str = "X-Datastore-Key";

/// HTTP client with injected credentials
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration and a credentials provider
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialsProvider>) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Credentials this client signs requests with
    pub fn credentials(&self) -> &Arc<dyn CredentialsProvider> {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach bearer token and datastore key, when present
    fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }
        if let Some(key) = self.credentials.datastore_key() {
            request = request.header(DATASTORE_KEY_HEADER, key);
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        self.send(request).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        self.send(request).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.url(path)).json(body));
        self.send(request).await
    }

    /// Make a DELETE request; the envelope carries no data
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(self.client.delete(self.url(path)));
        let response = request.send().await?;
        self.read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        self.read_envelope::<T>(response)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("Missing data".to_string()))
    }

    /// Handle the HTTP response and unwrap the API envelope
    async fn read_envelope<T: DeserializeOwned>(&self, response: reqwest::Response) -> ClientResult<Option<T>> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .map(|r| r.message)
                .unwrap_or(text);
            tracing::debug!(status = %status, message = %message, "API request failed");
            return match status {
                StatusCode::UNAUTHORIZED => {
                    self.credentials.on_unauthorized();
                    Err(ClientError::Unauthorized)
                }
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::Validation(message))
                }
                _ => Err(ClientError::Internal(message)),
            };
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if let Some(err) = envelope.to_error() {
            return Err(ClientError::Api(err));
        }
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticCredentials;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://localhost:8000/api/");
        let client = HttpClient::new(&config, Arc::new(StaticCredentials::anonymous())).unwrap();
        assert_eq!(client.url("/distributors"), "http://localhost:8000/api/distributors");
        assert_eq!(client.url("stock"), "http://localhost:8000/api/stock");
    }
}
