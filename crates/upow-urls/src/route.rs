use crate::pattern::PathPattern;
use hyper::Method;
use std::sync::Arc;
use upow_core::{Handler, Result};

/// A single method + path pattern bound to a handler
#[derive(Clone)]
pub struct Route {
	pub method: Method,
	pub pattern: PathPattern,
	pub name: Option<String>,
	handler: Arc<dyn Handler>,
}

impl Route {
	pub fn new(method: Method, path: &str, handler: Arc<dyn Handler>) -> Result<Self> {
		Ok(Self {
			method,
			pattern: PathPattern::new(path)?,
			name: None,
			handler,
		})
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn handler(&self) -> Arc<dyn Handler> {
		self.handler.clone()
	}

	/// Rebuild this route under a path prefix
	pub(crate) fn prefixed(&self, prefix: &str) -> Result<Self> {
		let path = format!(
			"{}{}",
			prefix.trim_end_matches('/'),
			self.pattern.pattern()
		);
		Ok(Self {
			method: self.method.clone(),
			pattern: PathPattern::new(&path)?,
			name: self.name.clone(),
			handler: self.handler.clone(),
		})
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("method", &self.method)
			.field("pattern", &self.pattern.pattern())
			.field("name", &self.name)
			.finish()
	}
}
