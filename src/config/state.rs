//! Shared application state

use crate::apps::profile::store::ProfileStore;
use crate::apps::validation::workflow::ValidationWorkflow;
use crate::apps::work::store::WorkEntryStore;
use std::future::Future;
use std::sync::Arc;
use upow_auth::{AuthProvider, DocumentAuthProvider, JwtAuth};
use upow_conf::{MAX_TOKEN_TTL_HOURS, Settings};
use upow_core::{Handler, Request, Response, Result, handler_fn};
use upow_db::DocumentBackend;

/// Stores, providers and settings shared by every request
pub struct AppState {
	pub settings: Settings,
	pub store: Arc<dyn DocumentBackend>,
	pub auth: Arc<dyn AuthProvider>,
	pub profiles: Arc<ProfileStore>,
	pub entries: Arc<WorkEntryStore>,
	pub validation: Arc<ValidationWorkflow>,
}

impl AppState {
	/// Connect to `settings.database_url` and wire everything together
	pub async fn from_settings(settings: Settings) -> Result<Self> {
		let store = upow_db::connect(&settings.database_url).await?;
		tracing::info!(backend = store.backend_name(), "document store ready");
		Ok(Self::with_backend(settings, store))
	}

	/// `token_ttl_hours` is clamped to `1..=MAX_TOKEN_TTL_HOURS` for settings
	/// that skipped `validate()`
	pub fn with_backend(settings: Settings, store: Arc<dyn DocumentBackend>) -> Self {
		let ttl_hours = settings.token_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS);
		let jwt = JwtAuth::new(settings.secret_key.as_bytes(), chrono::Duration::hours(ttl_hours));
		let auth: Arc<dyn AuthProvider> = Arc::new(DocumentAuthProvider::new(store.clone(), jwt));
		Self::with_provider(settings, store, auth)
	}

	pub fn with_provider(
		settings: Settings,
		store: Arc<dyn DocumentBackend>,
		auth: Arc<dyn AuthProvider>,
	) -> Self {
		let profiles = Arc::new(ProfileStore::new(store.clone()));
		let entries = Arc::new(WorkEntryStore::new(store.clone()));
		let validation = Arc::new(ValidationWorkflow::new(entries.clone(), profiles.clone()));

		Self {
			settings,
			store,
			auth,
			profiles,
			entries,
			validation,
		}
	}

	/// Shareable link to a profile's public page
	pub fn share_url(&self, profile_id: &str) -> String {
		format!(
			"{}/profile/{}",
			self.settings.public_base_url.trim_end_matches('/'),
			profile_id
		)
	}
}

/// Bind a view function to the shared state
pub fn view<F, Fut>(state: &Arc<AppState>, f: F) -> Arc<dyn Handler>
where
	F: Fn(Arc<AppState>, Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	let state = state.clone();
	Arc::new(handler_fn(move |request: Request| f(state.clone(), request)))
}
