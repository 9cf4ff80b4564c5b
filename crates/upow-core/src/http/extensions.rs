//! Type-keyed storage attached to a request.
//!
//! Middleware uses it to hand values (such as [`AuthState`](super::AuthState))
//! to the handlers further down the chain.

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Extensions {
	map: Arc<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>>,
}

impl Extensions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a value, replacing any previous value of the same type
	///
	/// # Examples
	///
	/// ```
	/// use upow_core::Extensions;
	///
	/// let extensions = Extensions::new();
	/// extensions.insert(42u32);
	///
	/// assert_eq!(extensions.get::<u32>(), Some(42));
	/// assert_eq!(extensions.get::<String>(), None);
	/// ```
	pub fn insert<T: Send + Sync + 'static>(&self, value: T) {
		self.map.lock().insert(TypeId::of::<T>(), Box::new(value));
	}

	pub fn get<T>(&self) -> Option<T>
	where
		T: Clone + Send + Sync + 'static,
	{
		self.map
			.lock()
			.get(&TypeId::of::<T>())
			.and_then(|boxed| boxed.downcast_ref::<T>())
			.cloned()
	}

	pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
		self.map.lock().contains_key(&TypeId::of::<T>())
	}

	pub fn remove<T: Send + Sync + 'static>(&self) -> Option<T> {
		let boxed = self.map.lock().remove(&TypeId::of::<T>())?;
		boxed.downcast::<T>().ok().map(|value| *value)
	}
}

impl std::fmt::Debug for Extensions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Extensions")
			.field("len", &self.map.lock().len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_insert_replaces_same_type() {
		let extensions = Extensions::new();
		extensions.insert("first".to_string());
		extensions.insert("second".to_string());

		assert_eq!(extensions.get::<String>(), Some("second".to_string()));
	}

	#[rstest]
	fn test_clones_share_storage() {
		let extensions = Extensions::new();
		let cloned = extensions.clone();
		cloned.insert(7u8);

		assert!(extensions.contains::<u8>());
		assert_eq!(extensions.remove::<u8>(), Some(7));
		assert!(!cloned.contains::<u8>());
	}
}
