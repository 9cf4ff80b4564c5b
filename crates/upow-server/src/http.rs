use crate::ServerError;
use crate::shutdown::ShutdownCoordinator;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use upow_core::{Handler, Middleware, MiddlewareChain, Request, Response};

/// HTTP Server with middleware support
pub struct HttpServer {
	pub handler: Arc<dyn Handler>,
	middlewares: Vec<Arc<dyn Middleware>>,
}

impl HttpServer {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			handler,
			middlewares: Vec::new(),
		}
	}

	/// Add a middleware. Middlewares are executed in the order they are added.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	fn build_handler(&self) -> Arc<dyn Handler> {
		if self.middlewares.is_empty() {
			return self.handler.clone();
		}

		let mut chain = MiddlewareChain::new(self.handler.clone());
		for middleware in &self.middlewares {
			chain.add_middleware(middleware.clone());
		}

		Arc::new(chain)
	}

	/// Bind `addr` and serve until the coordinator signals shutdown
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> Result<(), ServerError> {
		let listener = TcpListener::bind(addr).await?;
		self.serve(listener, coordinator).await
	}

	/// Serve on an already bound listener until the coordinator signals shutdown.
	///
	/// In-flight connections are dropped when shutdown is requested.
	pub async fn serve(
		self,
		listener: TcpListener,
		coordinator: ShutdownCoordinator,
	) -> Result<(), ServerError> {
		let local_addr = listener.local_addr()?;
		tracing::info!(address = %local_addr, "server listening on http://{}", local_addr);

		let handler = self.build_handler();
		let mut shutdown_rx = coordinator.subscribe();

		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, socket_addr) = match result {
						Ok(accepted) => accepted,
						Err(e) => {
							tracing::warn!(error = %e, "failed to accept connection");
							continue;
						}
					};
					let handler = handler.clone();
					let mut conn_shutdown = coordinator.subscribe();

					tokio::task::spawn(async move {
						tokio::select! {
							result = Self::handle_connection(stream, socket_addr, handler) => {
								if let Err(err) = result {
									tracing::debug!(peer = %socket_addr, error = %err, "connection closed with error");
								}
							}
							_ = conn_shutdown.recv() => {}
						}
					});
				}
				_ = shutdown_rx.recv() => {
					tracing::info!("shutdown signal received, stopping server");
					break;
				}
			}
		}

		coordinator.notify_shutdown_complete();
		Ok(())
	}

	async fn handle_connection(
		stream: TcpStream,
		socket_addr: SocketAddr,
		handler: Arc<dyn Handler>,
	) -> Result<(), ServerError> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr: socket_addr,
		};

		http1::Builder::new().serve_connection(io, service).await?;

		Ok(())
	}
}

/// Service implementation for hyper
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = ServerError;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body_bytes = body.collect().await?.to_bytes();

			let mut request = Request::new(
				parts.method,
				parts.uri,
				parts.version,
				parts.headers,
				body_bytes,
			);
			request.remote_addr = Some(remote_addr);

			let response = handler.handle(request).await.unwrap_or_else(|error| {
				if error.status_code() >= 500 {
					tracing::error!(error = %error, "request failed");
				}
				Response::from(error)
			});

			let mut hyper_response = hyper::Response::builder().status(response.status);
			for (key, value) in response.headers.iter() {
				hyper_response = hyper_response.header(key, value);
			}

			Ok(hyper_response.body(Full::new(response.body))?)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::time::Duration;
	use upow_core::{Error, handler_fn};

	async fn spawn(handler: Arc<dyn Handler>) -> (String, ShutdownCoordinator) {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let url = format!("http://{}", listener.local_addr().unwrap());
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		let server_coordinator = coordinator.clone();
		tokio::spawn(async move {
			let _ = HttpServer::new(handler)
				.serve(listener, server_coordinator)
				.await;
		});
		(url, coordinator)
	}

	#[rstest]
	#[tokio::test]
	async fn test_serves_handler_response() {
		let handler = Arc::new(handler_fn(|request: Request| async move {
			Ok::<_, Error>(Response::ok().with_body(format!("{} {}", request.method, request.path())))
		}));
		let (url, coordinator) = spawn(handler).await;

		let body = reqwest::get(format!("{}/ping", url))
			.await
			.unwrap()
			.text()
			.await
			.unwrap();
		assert_eq!(body, "GET /ping");

		coordinator.shutdown();
		assert!(coordinator.wait_for_shutdown().await);
	}

	#[rstest]
	#[tokio::test]
	async fn test_errors_become_json_responses() {
		let handler = Arc::new(handler_fn(|_request: Request| async move {
			Err::<Response, _>(Error::NotFound("Work entry not found.".into()))
		}));
		let (url, coordinator) = spawn(handler).await;

		let response = reqwest::get(format!("{}/api/entries/x/", url)).await.unwrap();
		assert_eq!(response.status(), 404);
		let body: serde_json::Value = response.json().await.unwrap();
		assert_eq!(body["code"], "not_found");

		coordinator.shutdown();
	}
}
