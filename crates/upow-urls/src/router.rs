use crate::route::Route;
use async_trait::async_trait;
use hyper::Method;
use std::sync::Arc;
use upow_core::{Error, Handler, Request, Response, Result};

/// Ordered route table. The first route whose pattern and method match wins.
#[derive(Clone, Debug, Default)]
pub struct Router {
	routes: Vec<Route>,
}

impl Router {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a handler for `method` on `path`
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use hyper::Method;
	/// use upow_core::{Request, Response, handler_fn};
	/// use upow_urls::Router;
	///
	/// let router = Router::new()
	///     .route(
	///         Method::GET,
	///         "/health/",
	///         Arc::new(handler_fn(|_req: Request| async {
	///             Ok::<_, upow_core::Error>(Response::ok())
	///         })),
	///     )
	///     .unwrap();
	/// assert_eq!(router.routes().len(), 1);
	/// ```
	pub fn route(mut self, method: Method, path: &str, handler: Arc<dyn Handler>) -> Result<Self> {
		self.routes.push(Route::new(method, path, handler)?);
		Ok(self)
	}

	pub fn named_route(
		mut self,
		method: Method,
		path: &str,
		name: &str,
		handler: Arc<dyn Handler>,
	) -> Result<Self> {
		self.routes
			.push(Route::new(method, path, handler)?.with_name(name));
		Ok(self)
	}

	/// Mount every route of `other` below `prefix`
	pub fn include(mut self, prefix: &str, other: Router) -> Result<Self> {
		for route in other.routes {
			self.routes.push(route.prefixed(prefix)?);
		}
		Ok(self)
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Path of the route registered under `name`, with parameters substituted
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
		let route = self
			.routes
			.iter()
			.find(|route| route.name.as_deref() == Some(name))?;
		let mut path = route.pattern.pattern().to_string();
		for name in route.pattern.param_names() {
			let (_, value) = params.iter().find(|(key, _)| key == name)?;
			path = path.replace(&format!("{{{}}}", name), value);
		}
		Some(path)
	}
}

#[async_trait]
impl Handler for Router {
	async fn handle(&self, mut request: Request) -> Result<Response> {
		let mut path_matched = false;

		for route in &self.routes {
			let Some(params) = route.pattern.matches(request.path()) else {
				continue;
			};
			path_matched = true;

			// HEAD falls back to GET routes
			let method_matches = route.method == request.method
				|| (request.method == Method::HEAD && route.method == Method::GET);
			if !method_matches {
				continue;
			}

			request.path_params = params;
			return route.handler().handle(request).await;
		}

		if path_matched {
			tracing::debug!(method = %request.method, path = request.path(), "method not allowed");
			return Err(Error::MethodNotAllowed);
		}
		Err(Error::NotFound(format!("No route for {}", request.path())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use upow_core::handler_fn;

	fn echo(label: &'static str) -> Arc<dyn Handler> {
		Arc::new(handler_fn(move |request: Request| async move {
			let id = request.path_params.get("id").cloned().unwrap_or_default();
			Ok::<_, Error>(Response::ok().with_body(format!("{}:{}", label, id)))
		}))
	}

	fn router() -> Router {
		let entries = Router::new()
			.route(Method::GET, "/", echo("list"))
			.unwrap()
			.named_route(Method::GET, "/{id}/", "entry-detail", echo("get"))
			.unwrap()
			.route(Method::DELETE, "/{id}/", echo("delete"))
			.unwrap();

		Router::new()
			.route(Method::GET, "/health/", echo("health"))
			.unwrap()
			.include("/api/entries/", entries)
			.unwrap()
	}

	async fn call(router: &Router, method: Method, uri: &str) -> Result<String> {
		let request = Request::builder().method(method).uri(uri).build().unwrap();
		let response = router.handle(request).await?;
		Ok(String::from_utf8(response.body.to_vec()).unwrap())
	}

	#[rstest]
	#[case(Method::GET, "/health/", "health:")]
	#[case(Method::GET, "/api/entries/", "list:")]
	#[case(Method::GET, "/api/entries/e1/", "get:e1")]
	#[case(Method::DELETE, "/api/entries/e1", "delete:e1")]
	#[case(Method::HEAD, "/api/entries/e1/", "get:e1")]
	#[tokio::test]
	async fn test_dispatch(#[case] method: Method, #[case] uri: &str, #[case] expected: &str) {
		assert_eq!(call(&router(), method, uri).await.unwrap(), expected);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_path_is_not_found() {
		let result = call(&router(), Method::GET, "/nope/").await;
		assert!(matches!(result, Err(Error::NotFound(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_wrong_method_is_not_allowed() {
		let result = call(&router(), Method::POST, "/api/entries/e1/").await;
		assert!(matches!(result, Err(Error::MethodNotAllowed)));
	}

	#[rstest]
	fn test_reverse() {
		let router = router();

		assert_eq!(
			router.reverse("entry-detail", &[("id", "e9")]).as_deref(),
			Some("/api/entries/e9/")
		);
		assert_eq!(router.reverse("entry-detail", &[]), None);
		assert_eq!(router.reverse("missing", &[]), None);
	}
}
