use super::Extensions;
use crate::exception::{Error, Result};
use bytes::Bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Uri, Version};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::net::SocketAddr;

/// HTTP request as seen by handlers and middleware
#[derive(Debug)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Values captured from `{name}` segments by the router
	pub path_params: HashMap<String, String>,
	pub remote_addr: Option<SocketAddr>,
	pub extensions: Extensions,
}

impl Request {
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
			path_params: HashMap::new(),
			remote_addr: None,
			extensions: Extensions::new(),
		}
	}

	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Look up a captured path parameter
	///
	/// # Examples
	///
	/// ```
	/// use upow_core::Request;
	///
	/// let mut request = Request::builder().uri("/entries/e-1/").build().unwrap();
	/// request.path_params.insert("id".into(), "e-1".into());
	///
	/// assert_eq!(request.path_param("id").unwrap(), "e-1");
	/// assert!(request.path_param("missing").is_err());
	/// ```
	pub fn path_param(&self, name: &str) -> Result<&str> {
		self.path_params
			.get(name)
			.map(String::as_str)
			.ok_or_else(|| Error::Http(format!("Missing path parameter: {}", name)))
	}

	/// Deserialize the body as JSON
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		if self.body.is_empty() {
			return Err(Error::Http("Request body is empty".into()));
		}
		serde_json::from_slice(&self.body).map_err(Error::from)
	}

	/// Token from an `Authorization: Bearer <token>` header
	pub fn bearer_token(&self) -> Option<&str> {
		self.headers
			.get(AUTHORIZATION)?
			.to_str()
			.ok()?
			.strip_prefix("Bearer ")
			.map(str::trim)
			.filter(|token| !token.is_empty())
	}
}

/// Builder used by tests and by callers constructing requests by hand
#[derive(Default)]
pub struct RequestBuilder {
	method: Method,
	uri: Option<String>,
	headers: HeaderMap,
	body: Bytes,
	error: Option<Error>,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.insert(name, value);
			}
			_ => self.error = Some(Error::Http(format!("Invalid header: {}", name))),
		}
		self
	}

	pub fn bearer(self, token: &str) -> Self {
		self.header(AUTHORIZATION.as_str(), &format!("Bearer {}", token))
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn json<T: Serialize>(mut self, data: &T) -> Self {
		match serde_json::to_vec(data) {
			Ok(bytes) => {
				self.body = Bytes::from(bytes);
				self.headers
					.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
			}
			Err(e) => self.error = Some(Error::from(e)),
		}
		self
	}

	pub fn build(self) -> Result<Request> {
		if let Some(error) = self.error {
			return Err(error);
		}
		let uri = self
			.uri
			.unwrap_or_else(|| "/".to_string())
			.parse::<Uri>()
			.map_err(|e| Error::Http(format!("Invalid URI: {}", e)))?;
		Ok(Request::new(
			self.method,
			uri,
			Version::HTTP_11,
			self.headers,
			self.body,
		))
	}
}
