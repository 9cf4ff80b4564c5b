//! API Client for testing

use crate::response::TestResponse;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// HTTP client bound to a base URL, optionally carrying a bearer token
///
/// # Examples
///
/// ```
/// use upow_test::APIClient;
///
/// let client = APIClient::with_base_url("http://127.0.0.1:8000");
/// assert_eq!(client.base_url(), "http://127.0.0.1:8000");
/// ```
#[derive(Clone)]
pub struct APIClient {
	base_url: String,
	token: Arc<RwLock<Option<String>>>,
	http_client: reqwest::Client,
}

impl APIClient {
	pub fn with_base_url(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			token: Arc::new(RwLock::new(None)),
			http_client: reqwest::Client::new(),
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Send `Authorization: Bearer <token>` on every following request
	pub async fn set_token(&self, token: impl Into<String>) {
		*self.token.write().await = Some(token.into());
	}

	pub async fn clear_auth(&self) {
		*self.token.write().await = None;
	}

	pub async fn get(&self, path: &str) -> ClientResult<TestResponse> {
		self.request(Method::GET, path, None).await
	}

	pub async fn post<T: Serialize>(&self, path: &str, data: &T) -> ClientResult<TestResponse> {
		let body = serde_json::to_vec(data)?;
		self.request(Method::POST, path, Some(body)).await
	}

	pub async fn patch<T: Serialize>(&self, path: &str, data: &T) -> ClientResult<TestResponse> {
		let body = serde_json::to_vec(data)?;
		self.request(Method::PATCH, path, Some(body)).await
	}

	pub async fn delete(&self, path: &str) -> ClientResult<TestResponse> {
		self.request(Method::DELETE, path, None).await
	}

	/// POST with a raw body, for exercising malformed payloads
	pub async fn post_raw(&self, path: &str, body: &str) -> ClientResult<TestResponse> {
		self.request(Method::POST, path, Some(body.as_bytes().to_vec()))
			.await
	}

	async fn request(
		&self,
		method: Method,
		path: &str,
		body: Option<Vec<u8>>,
	) -> ClientResult<TestResponse> {
		let url = format!("{}{}", self.base_url, path);
		let mut builder = self.http_client.request(method, url);

		if let Some(token) = self.token.read().await.as_deref() {
			builder = builder.bearer_auth(token);
		}
		if let Some(body) = body {
			builder = builder
				.header(reqwest::header::CONTENT_TYPE, "application/json")
				.body(body);
		}

		let response = builder.send().await?;
		Ok(TestResponse::from_reqwest(response).await?)
	}
}
