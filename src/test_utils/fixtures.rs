//! State and server fixtures for tests.

use crate::config::middleware::create_middleware_stack;
use crate::config::state::AppState;
use crate::config::urls::url_patterns;
use chrono::Duration;
use rstest::fixture;
use std::sync::Arc;
use upow_auth::{Argon2Hasher, AuthProvider, DocumentAuthProvider, JwtAuth};
use upow_conf::Settings;
use upow_db::{DocumentBackend, MemoryBackend};
use upow_test::{APIClient, TestServerGuard};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";
pub const TEST_BASE_URL: &str = "https://upow.test";

pub fn test_settings() -> Settings {
	Settings {
		secret_key: TEST_SECRET.to_string(),
		public_base_url: TEST_BASE_URL.to_string(),
		..Settings::default()
	}
}

/// State over `store` with a low-cost password hasher
pub fn state_with_backend(store: Arc<dyn DocumentBackend>) -> Arc<AppState> {
	let settings = test_settings();
	let provider = DocumentAuthProvider::new(
		store.clone(),
		JwtAuth::new(settings.secret_key.as_bytes(), Duration::hours(1)),
	)
	.with_hasher(Arc::new(
		Argon2Hasher::with_params(1024, 1, 1).expect("valid argon2 parameters"),
	));
	let auth: Arc<dyn AuthProvider> = Arc::new(provider);
	Arc::new(AppState::with_provider(settings, store, auth))
}

#[fixture]
pub fn memory_state() -> Arc<AppState> {
	state_with_backend(Arc::new(MemoryBackend::new()))
}

/// State over either backend, by name
pub async fn state_for(backend: &str) -> Arc<AppState> {
	let store = match backend {
		"memory" => upow_db::connect("memory").await,
		"sqlite" => upow_db::connect("sqlite::memory:").await,
		other => panic!("unknown backend {}", other),
	}
	.expect("backend connects");
	state_with_backend(store)
}

/// Test context containing client, state and server guard.
///
/// The server guard keeps the test server alive for the duration of the test.
pub struct TestContext {
	pub client: APIClient,
	pub state: Arc<AppState>,
	pub _guard: TestServerGuard,
}

impl TestContext {
	/// A fresh client against the same server
	pub fn new_client(&self) -> APIClient {
		APIClient::with_base_url(&self._guard.url)
	}
}

/// Real server on an ephemeral port serving the full route table and
/// middleware stack.
#[fixture]
pub async fn test_context() -> TestContext {
	let state = memory_state();
	let router = url_patterns(state.clone()).expect("route table compiles");
	let guard = TestServerGuard::start(Arc::new(router), create_middleware_stack(&state)).await;

	TestContext {
		client: APIClient::with_base_url(&guard.url),
		state,
		_guard: guard,
	}
}
