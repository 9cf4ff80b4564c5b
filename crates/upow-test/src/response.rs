use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Fully read response from the server under test
#[derive(Debug, Clone)]
pub struct TestResponse {
	status: StatusCode,
	headers: HeaderMap,
	body: Bytes,
}

impl TestResponse {
	pub(crate) async fn from_reqwest(response: reqwest::Response) -> reqwest::Result<Self> {
		let status = response.status();
		let headers = response.headers().clone();
		let body = response.bytes().await?;
		Ok(Self {
			status,
			headers,
			body,
		})
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}

	pub fn status_code(&self) -> u16 {
		self.status.as_u16()
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	pub fn body(&self) -> &Bytes {
		&self.body
	}

	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Deserialize the body, panicking with the raw body on failure
	pub fn json<T: DeserializeOwned>(&self) -> T {
		serde_json::from_slice(&self.body)
			.unwrap_or_else(|e| panic!("response is not the expected JSON ({}): {}", e, self.text()))
	}

	/// `code` of an error body, if any
	pub fn error_code(&self) -> Option<String> {
		serde_json::from_slice::<serde_json::Value>(&self.body)
			.ok()?
			.get("code")?
			.as_str()
			.map(str::to_string)
	}
}
