use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use upow_core::{Handler, Middleware};
use upow_server::{HttpServer, ShutdownCoordinator};

/// Running test server, shut down when dropped.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use upow_core::{Handler, Request, Response, handler_fn};
/// use upow_test::test_server_guard;
///
/// # async fn demo() {
/// let handler: Arc<dyn Handler> = Arc::new(handler_fn(|_request: Request| async {
///     Ok::<_, upow_core::Error>(Response::ok())
/// }));
/// let server = test_server_guard(handler, Vec::new()).await;
/// let response = reqwest::get(format!("{}/", server.url)).await.unwrap();
/// assert_eq!(response.status(), 200);
/// # }
/// ```
pub struct TestServerGuard {
	/// Server URL (e.g., "http://127.0.0.1:12345")
	pub url: String,
	pub addr: SocketAddr,
	pub coordinator: ShutdownCoordinator,
	server_task: Option<JoinHandle<()>>,
}

impl TestServerGuard {
	/// Bind `127.0.0.1:0` and serve `handler` wrapped in `middlewares`.
	///
	/// The listener is bound before the server task starts, so requests can
	/// be sent as soon as this returns.
	pub async fn start(handler: Arc<dyn Handler>, middlewares: Vec<Arc<dyn Middleware>>) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0")
			.await
			.expect("failed to bind test listener");
		let addr = listener
			.local_addr()
			.expect("test listener has no local address");

		let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
		let server_coordinator = coordinator.clone();

		let mut server = HttpServer::new(handler);
		for middleware in middlewares {
			server = server.with_middleware(middleware);
		}

		let server_task = tokio::spawn(async move {
			let _ = server.serve(listener, server_coordinator).await;
		});

		Self {
			url: format!("http://{}", addr),
			addr,
			coordinator,
			server_task: Some(server_task),
		}
	}
}

impl Drop for TestServerGuard {
	fn drop(&mut self) {
		self.coordinator.shutdown();

		if let Some(task) = self.server_task.take() {
			task.abort();
		}
	}
}

pub async fn test_server_guard(
	handler: Arc<dyn Handler>,
	middlewares: Vec<Arc<dyn Middleware>>,
) -> TestServerGuard {
	TestServerGuard::start(handler, middlewares).await
}
