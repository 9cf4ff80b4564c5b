use crate::exception::Result;
use crate::http::{Request, Response};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Handler trait for processing requests
/// This is the core abstraction - all request handlers implement this
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Blanket implementation for `Arc<T>` where T: Handler
/// This allows `Arc<dyn Handler>` to be used as a Handler
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Middleware trait for request/response processing
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;

	/// Whether this middleware runs for the given request.
	///
	/// Skipped middleware is left out of the composed chain entirely.
	fn should_continue(&self, _request: &Request) -> bool {
		true
	}
}

/// Adapter turning an async closure into a [`Handler`]
pub struct FnHandler<F> {
	f: F,
}

/// Wrap an async function or closure as a handler
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use upow_core::{Handler, Request, Response, handler_fn};
///
/// let handler: Arc<dyn Handler> = Arc::new(handler_fn(|_request: Request| async {
///     Ok::<_, upow_core::Error>(Response::ok().with_body("pong"))
/// }));
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
	F: Fn(Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	FnHandler { f }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
	F: Fn(Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	async fn handle(&self, request: Request) -> Result<Response> {
		(self.f)(request).await
	}
}

/// Middleware chain - composes multiple middleware around a handler
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	/// Adds a middleware using builder pattern.
	///
	/// Middleware run in the order they were added; the first one added sees
	/// the request first and the response last.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
		self.middlewares.push(middleware);
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		if self.middlewares.is_empty() {
			return self.handler.handle(request).await;
		}

		let mut current_handler = self.handler.clone();

		let active_middlewares: Vec<_> = self
			.middlewares
			.iter()
			.rev()
			.filter(|mw| mw.should_continue(&request))
			.collect();

		for middleware in active_middlewares {
			current_handler = Arc::new(ComposedHandler {
				middleware: middleware.clone(),
				next: current_handler,
			});
		}

		current_handler.handle(request).await
	}
}

struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}
